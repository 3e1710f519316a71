//! Conversion between units of the same dimension

use dimen_core::{lit, unit, Error, Quantity};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

#[test]
fn test_ratio_round_trip() {
    for x in [0.0, 1.0, 26.2, -3.5, 1e6] {
        let miles = lit(x, "mile").unwrap();
        let meters = miles.convert_to(&unit("meter").unwrap()).unwrap();
        let back = meters.convert_to(&unit("mile").unwrap()).unwrap();
        assert!(close(back.magnitude(), x), "{x} -> {meters} -> {back}");
        assert_eq!(back.unit(), miles.unit());
    }
}

#[test]
fn test_prefix_conversions() {
    let km = lit(1, "km").unwrap();
    assert!(close(km.convert_to(&unit("meter").unwrap()).unwrap().magnitude(), 1000.0));

    let um = lit(3, "um").unwrap();
    assert!(close(um.convert_to(&unit("nanometer").unwrap()).unwrap().magnitude(), 3000.0));

    let ms = lit(1500, "ms").unwrap();
    assert!(close(ms.convert_to(&unit("second").unwrap()).unwrap().magnitude(), 1.5));
}

#[test]
fn test_extreme_prefixes_compose_exactly() {
    let em = lit(1, "Em").unwrap();
    let fm = em.convert_to(&unit("femtometer").unwrap()).unwrap();
    assert!(close(fm.magnitude(), 1e33));
}

#[test]
fn test_exponent_raised_factor() {
    let area = lit(1, "m").unwrap().powi(2).unwrap().into_quantity().unwrap();
    let target = unit("foot").unwrap().powi(2).unwrap();
    let sq_ft = area.convert_to(&target).unwrap();
    assert!(close(sq_ft.magnitude(), 1.0 / (0.3048 * 0.3048)));
}

#[test]
fn test_angle_sub_units() {
    let right = lit(90, "deg").unwrap();
    let rad = right.convert_to(&unit("radian").unwrap()).unwrap();
    assert!(close(rad.magnitude(), std::f64::consts::FRAC_PI_2));
    let grad = right.convert_to(&unit("gradian").unwrap()).unwrap();
    assert!(close(grad.magnitude(), 100.0));
}

#[test]
fn test_affine_round_trip() {
    let zero = lit(0, "degC").unwrap();
    let kelvin = zero.convert_to(&unit("kelvin").unwrap()).unwrap();
    assert!(close(kelvin.magnitude(), 273.15));
    let back = kelvin.convert_to(&unit("celsius").unwrap()).unwrap();
    assert!(back.magnitude().abs() < 1e-9);
    assert_eq!(back.unit(), zero.unit());

    let boiling = lit(100, "degC").unwrap();
    let mk = boiling.convert_to(&unit("millikelvin").unwrap()).unwrap();
    assert!(close(mk.magnitude(), 373_150.0));
}

#[test]
fn test_affine_rejected_above_exponent_one() {
    let celsius_sq = unit("celsius").unwrap().powi(2).unwrap();
    let kelvin_sq = unit("kelvin").unwrap().powi(2).unwrap();
    let q = Quantity::new(4.0, celsius_sq);
    assert!(matches!(
        q.convert_to(&kelvin_sq),
        Err(Error::UnsupportedConversion { .. })
    ));
}

#[test]
fn test_rejected_conversions() {
    let meters = lit(1, "m").unwrap();
    for target in ["second", "square_meter", "meter_per_second"] {
        assert!(
            matches!(
                meters.convert_to(&unit(target).unwrap()),
                Err(Error::UnsupportedConversion { .. })
            ),
            "m -> {target}"
        );
    }
    let speed = lit(1, "mph").unwrap();
    assert!(speed
        .convert_to(&unit("meter_per_second").unwrap())
        .is_err());
}

#[test]
fn test_compound_conversion() {
    let speed = lit(60, "mph").unwrap();
    let si = speed
        .convert_compound(&unit("meter_per_second").unwrap())
        .unwrap();
    assert!(close(si.magnitude(), 26.8224));

    let kph = speed
        .convert_compound(&unit("kilometer_per_hour").unwrap())
        .unwrap();
    assert!(close(kph.magnitude(), 96.56064));

    assert!(matches!(
        speed.convert_compound(&unit("hertz").unwrap()),
        Err(Error::UnsupportedConversion { .. })
    ));
}

#[test]
fn test_compound_conversion_rejects_affine() {
    let per_celsius = unit("celsius")
        .unwrap()
        .invert()
        .multiply(&unit("joule").unwrap())
        .unwrap();
    let q = Quantity::new(1.0, per_celsius);
    assert!(matches!(
        q.convert_compound(&unit("joule_per_kelvin").unwrap()),
        Err(Error::UnsupportedConversion { .. })
    ));
}
