//! Unit catalog
//!
//! Named units and literal suffixes, assembled once from the declarative
//! tables in [`defs`] and [`prefix`] through the same unit algebra callers
//! use. The catalog is read-only after initialization.

pub mod defs;
pub mod prefix;

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::{BaseUnit, CompoundUnit, Quantity};
use defs::{UnitDef, UnitKind, UNITS};
use prefix::{Prefix, PREFIXES};

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    let catalog = Catalog::build(UNITS, PREFIXES).expect("built-in unit tables are consistent");
    tracing::debug!(
        units = catalog.len(),
        names = catalog.by_name.len(),
        "unit catalog assembled"
    );
    catalog
});

/// The process-wide catalog of built-in units.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// A named unit with its literal suffix
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub name: String,
    pub literal: String,
    pub unit: CompoundUnit,
}

#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_name: HashMap<String, usize>,
    by_literal: HashMap<String, usize>,
}

impl Catalog {
    /// Assembles a catalog from unit definitions, generating the prefixed
    /// family of every prefixed base unit.
    pub fn build(defs: &[UnitDef], prefixes: &[Prefix]) -> Result<Self> {
        let mut catalog = Catalog::default();
        for def in defs {
            match &def.kind {
                UnitKind::Base { symbol, prefixed } => {
                    let unit = CompoundUnit::from(BaseUnit::new(*symbol));
                    catalog.define(def.name.to_string(), def.literal.to_string(), unit.clone())?;
                    if *prefixed {
                        for prefix in prefixes {
                            let scaled = unit.apply_scale(prefix.scale(), prefix.symbol)?;
                            catalog.define(
                                format!("{}{}", prefix.name, def.name),
                                format!("{}{}", prefix.literal, def.literal),
                                scaled,
                            )?;
                        }
                    }
                }
                UnitKind::Sub {
                    symbol,
                    display,
                    conversion,
                } => {
                    let unit = BaseUnit::sub_unit(*symbol, *display, *conversion).into();
                    catalog.define(def.name.to_string(), def.literal.to_string(), unit)?;
                }
                UnitKind::Derived { factors } => {
                    let mut unit = CompoundUnit::dimensionless();
                    for (name, exponent) in factors.iter() {
                        let factor = catalog.unit(name).map_err(|_| {
                            Error::Catalog(format!(
                                "'{}' references undefined unit '{name}'",
                                def.name
                            ))
                        })?;
                        unit = unit.multiply(&factor.powi(*exponent)?)?;
                    }
                    catalog.define(def.name.to_string(), def.literal.to_string(), unit)?;
                }
            }
            for alias in def.aliases {
                catalog.alias(alias, def.name)?;
            }
        }
        Ok(catalog)
    }

    fn define(&mut self, name: String, literal: String, unit: CompoundUnit) -> Result<()> {
        if self.by_name.contains_key(&name) {
            return Err(Error::Catalog(format!("duplicate unit name '{name}'")));
        }
        if self.by_literal.contains_key(&literal) {
            return Err(Error::Catalog(format!("duplicate literal '{literal}'")));
        }
        let index = self.entries.len();
        self.by_name.insert(name.clone(), index);
        self.by_literal.insert(literal.clone(), index);
        self.entries.push(CatalogEntry {
            name,
            literal,
            unit,
        });
        Ok(())
    }

    fn alias(&mut self, alias: &str, name: &str) -> Result<()> {
        let index = *self
            .by_name
            .get(name)
            .ok_or_else(|| Error::Catalog(format!("alias of undefined unit '{name}'")))?;
        if self.by_name.insert(alias.to_string(), index).is_some() {
            return Err(Error::Catalog(format!("duplicate unit name '{alias}'")));
        }
        Ok(())
    }

    /// Unit by name ("kilometer", "newton").
    pub fn unit(&self, name: &str) -> Result<&CompoundUnit> {
        self.by_name
            .get(name)
            .map(|&i| &self.entries[i].unit)
            .ok_or_else(|| Error::UnknownUnit(name.to_string()))
    }

    /// Unit by literal suffix ("km", "N").
    pub fn by_literal(&self, literal: &str) -> Result<&CompoundUnit> {
        self.by_literal
            .get(literal)
            .map(|&i| &self.entries[i].unit)
            .ok_or_else(|| Error::UnknownUnit(literal.to_string()))
    }

    /// Literal suffix first, then name.
    pub fn resolve(&self, name_or_literal: &str) -> Result<&CompoundUnit> {
        self.by_literal(name_or_literal)
            .or_else(|_| self.unit(name_or_literal))
    }

    /// Builds a quantity from a magnitude and a literal suffix: `quantity(3, "km")`.
    pub fn quantity(&self, value: impl Into<f64>, literal: &str) -> Result<Quantity> {
        Ok(Quantity::new(value.into(), self.by_literal(literal)?.clone()))
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::symbol::{LENGTH, MASS, TIME};
    use crate::types::Conversion;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_catalog_assembles() {
        assert!(Catalog::build(UNITS, PREFIXES).is_ok());
        assert!(catalog().len() > UNITS.len());
    }

    #[test]
    fn test_prefixed_family() {
        let km = catalog().by_literal("km").unwrap();
        assert_eq!(km, catalog().unit("kilometer").unwrap());
        assert_eq!(km.to_string(), "km");
        assert_eq!(catalog().by_literal("um").unwrap().to_string(), "μm");
        assert_eq!(catalog().by_literal("das").unwrap().to_string(), "das");
        assert!(catalog().unit("kilosteradian").is_err());
    }

    #[test]
    fn test_derived_units() {
        let newton = catalog().by_literal("N").unwrap();
        assert_eq!(newton.to_string(), "kg*m*s^-2");
        assert_eq!(newton.exponent_of(MASS), 1);
        assert_eq!(newton.exponent_of(TIME), -2);

        let joule = catalog().unit("joule").unwrap();
        assert_eq!(joule.exponent_of(LENGTH), 2);

        let liter = catalog().by_literal("L").unwrap();
        assert_eq!(liter.to_string(), "dm^3");
    }

    #[test]
    fn test_alias_resolves_to_same_unit() {
        assert_eq!(
            catalog().unit("magnetic_flux_density").unwrap(),
            catalog().unit("tesla").unwrap()
        );
    }

    #[test]
    fn test_resolve_prefers_literal() {
        assert_eq!(
            catalog().resolve("m").unwrap(),
            catalog().unit("meter").unwrap()
        );
        assert_eq!(
            catalog().resolve("mile").unwrap(),
            catalog().unit("mile").unwrap()
        );
        assert_eq!(
            catalog().resolve("furlong"),
            Err(Error::UnknownUnit("furlong".into()))
        );
    }

    #[test]
    fn test_quantity_from_literal() {
        let q = catalog().quantity(3, "km").unwrap();
        assert_eq!(q.to_string(), "3 km");
        assert!(catalog().quantity(1, "nope").is_err());
    }

    #[test]
    fn test_duplicate_literal_rejected() {
        let defs = [
            UnitDef {
                name: "meter",
                literal: "m",
                aliases: &[],
                kind: UnitKind::Base {
                    symbol: LENGTH,
                    prefixed: false,
                },
            },
            UnitDef {
                name: "minute",
                literal: "m",
                aliases: &[],
                kind: UnitKind::Sub {
                    symbol: TIME,
                    display: "min",
                    conversion: Conversion::Ratio { factor: 60.0 },
                },
            },
        ];
        assert!(matches!(
            Catalog::build(&defs, PREFIXES),
            Err(Error::Catalog(_))
        ));
    }

    #[test]
    fn test_undefined_reference_rejected() {
        let defs = [UnitDef {
            name: "newton",
            literal: "N",
            aliases: &[],
            kind: UnitKind::Derived {
                factors: &[("kilogram", 1)],
            },
        }];
        assert!(matches!(
            Catalog::build(&defs, PREFIXES),
            Err(Error::Catalog(_))
        ));
    }
}
