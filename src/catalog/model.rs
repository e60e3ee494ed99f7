//! Catalog records and their write-time validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::choices::{Cylinders, Engine, OilSpecific, Primary, Typology};
use crate::db::entities::{car, car_filter, filter};
use crate::error::{Result, ServerError};

pub const MAX_CODE_LEN: usize = 16;
pub const MAX_NAME_LEN: usize = 100;
pub const YEAR_LEN: usize = 4;
pub const MAX_OIL_QUANTITY: f64 = 10000.0;

/// A replacement filter and its stock count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub id: i32,
    pub code: String,
    pub primary: Primary,
    pub typology: Typology,
    pub quantity: u32,
}

/// A car model the shop services.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Car {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub year: String,
    pub engine: Engine,
    pub cylinders: Cylinders,
    pub oil_quantity: f64,
    pub oil_specific: OilSpecific,
}

/// Link stating that a filter fits a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarFilter {
    pub id: i32,
    pub car_id: i32,
    pub filter_id: i32,
}

impl Filter {
    pub const VERBOSE_NAME_PLURAL: &'static str = "Filtri";

    /// Display label of each field, keyed by field name.
    pub const FIELD_LABELS: &'static [(&'static str, &'static str)] = &[
        ("code", "Codice"),
        ("primary", "Primario"),
        ("typology", "Tipologia"),
        ("quantity", "Quantita'"),
        ("cars", "Auto"),
    ];
}

impl Car {
    pub const VERBOSE_NAME: &'static str = "Auto";

    pub const FIELD_LABELS: &'static [(&'static str, &'static str)] = &[
        ("make", "Produttore"),
        ("model", "Modello"),
        ("year", "Anno"),
        ("engine", "Motore"),
        ("cylinders", "Cilindrata"),
        ("oil_quantity", "Quantita' Olio"),
        ("oil_specific", "Specifica Olio"),
        ("filters", "Filtri"),
    ];
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.typology.label())
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {})",
            self.make,
            self.model,
            self.engine.label(),
            self.year
        )
    }
}

/// Fields of a car to create or replace.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: String,
    #[serde(default)]
    pub engine: Engine,
    pub cylinders: Cylinders,
    #[serde(default)]
    pub oil_quantity: f64,
    #[serde(default)]
    pub oil_specific: OilSpecific,
}

impl NewCar {
    /// Car with default engine, oil quantity and oil specification.
    pub fn new(make: &str, model: &str, year: &str, cylinders: Cylinders) -> Self {
        Self {
            make: make.to_string(),
            model: model.to_string(),
            year: year.to_string(),
            engine: Engine::default(),
            cylinders,
            oil_quantity: 0.0,
            oil_specific: OilSpecific::default(),
        }
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_oil(mut self, quantity: f64, specific: OilSpecific) -> Self {
        self.oil_quantity = quantity;
        self.oil_specific = specific;
        self
    }

    /// Check field-level constraints.
    pub fn validate(&self) -> Result<()> {
        check_max_len("make", &self.make, MAX_NAME_LEN)?;
        check_max_len("model", &self.model, MAX_NAME_LEN)?;

        if self.year.chars().count() != YEAR_LEN {
            return Err(ServerError::Validation(format!(
                "year must be exactly {} characters, got '{}'",
                YEAR_LEN, self.year
            )));
        }

        // NaN fails both comparisons
        if !(self.oil_quantity >= 0.0 && self.oil_quantity <= MAX_OIL_QUANTITY) {
            return Err(ServerError::Validation(format!(
                "oil_quantity must be between 0 and {}, got {}",
                MAX_OIL_QUANTITY, self.oil_quantity
            )));
        }

        Ok(())
    }
}

/// Fields of a filter to create or replace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewFilter {
    pub code: String,
    #[serde(default)]
    pub primary: Primary,
    pub typology: Typology,
    #[serde(default)]
    pub quantity: u32,
}

impl NewFilter {
    /// Non-primary filter with no stock.
    pub fn new(code: &str, typology: Typology) -> Self {
        Self {
            code: code.to_string(),
            primary: Primary::default(),
            typology,
            quantity: 0,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_primary(mut self, primary: Primary) -> Self {
        self.primary = primary;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_max_len("code", &self.code, MAX_CODE_LEN)
    }
}

/// Equality filters for listing cars. Unset fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarQuery {
    pub make: Option<String>,
    pub model: Option<String>,
    pub engine: Option<Engine>,
}

fn check_max_len(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(ServerError::Validation(format!(
            "{} must be at most {} characters, got {}",
            field, max, len
        )));
    }
    Ok(())
}

impl TryFrom<car::Model> for Car {
    type Error = ServerError;

    fn try_from(m: car::Model) -> Result<Self> {
        Ok(Self {
            engine: m.engine.parse()?,
            cylinders: m.cylinders.parse()?,
            oil_specific: m.oil_specific.parse()?,
            id: m.id,
            make: m.make,
            model: m.model,
            year: m.year,
            oil_quantity: m.oil_quantity,
        })
    }
}

impl TryFrom<filter::Model> for Filter {
    type Error = ServerError;

    fn try_from(m: filter::Model) -> Result<Self> {
        let quantity = u32::try_from(m.quantity).map_err(|_| {
            ServerError::Internal(format!("filter {} has invalid quantity {}", m.id, m.quantity))
        })?;
        Ok(Self {
            primary: m.primary.parse()?,
            typology: m.typology.parse()?,
            id: m.id,
            code: m.code,
            quantity,
        })
    }
}

impl From<car_filter::Model> for CarFilter {
    fn from(m: car_filter::Model) -> Self {
        Self {
            id: m.id,
            car_id: m.car_id,
            filter_id: m.filter_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panda() -> Car {
        Car {
            id: 1,
            make: "Fiat".to_string(),
            model: "Panda".to_string(),
            year: "2015".to_string(),
            engine: Engine::Petrol,
            cylinders: Cylinders::Cc1200,
            oil_quantity: 0.0,
            oil_specific: OilSpecific::Rn0710,
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(panda().to_string(), "Fiat Panda (Benzina, 2015)");

        let filter = Filter {
            id: 3,
            code: "F100".to_string(),
            primary: Primary::No,
            typology: Typology::Passenger,
            quantity: 5,
        };
        assert_eq!(filter.to_string(), "F100 Abitacolo");
    }

    #[test]
    fn test_car_defaults() {
        let car = NewCar::new("Fiat", "Panda", "2015", Cylinders::Cc1200);
        assert_eq!(car.engine, Engine::Petrol);
        assert_eq!(car.oil_quantity, 0.0);
        assert_eq!(car.oil_specific, OilSpecific::Rn0710);
        assert!(car.validate().is_ok());
    }

    #[test]
    fn test_oil_quantity_range() {
        let base = NewCar::new("Fiat", "Panda", "2015", Cylinders::Cc1200);

        assert!(base.clone().with_oil(0.0, OilSpecific::Rn17).validate().is_ok());
        assert!(base.clone().with_oil(10000.0, OilSpecific::Rn17).validate().is_ok());
        assert!(base.clone().with_oil(-0.5, OilSpecific::Rn17).validate().is_err());
        assert!(base.clone().with_oil(10000.5, OilSpecific::Rn17).validate().is_err());
        assert!(base.with_oil(f64::NAN, OilSpecific::Rn17).validate().is_err());
    }

    #[test]
    fn test_year_and_name_lengths() {
        let short_year = NewCar::new("Fiat", "Panda", "15", Cylinders::Cc1200);
        assert!(matches!(short_year.validate(), Err(ServerError::Validation(_))));

        let long_make = NewCar::new(&"x".repeat(101), "Panda", "2015", Cylinders::Cc1200);
        assert!(long_make.validate().is_err());

        let max_make = NewCar::new(&"x".repeat(100), "Panda", "2015", Cylinders::Cc1200);
        assert!(max_make.validate().is_ok());
    }

    #[test]
    fn test_filter_code_length() {
        assert!(NewFilter::new(&"A".repeat(16), Typology::Air).validate().is_ok());
        assert!(NewFilter::new(&"A".repeat(17), Typology::Air).validate().is_err());
    }

    #[test]
    fn test_new_car_from_json_applies_defaults() {
        let car: NewCar = serde_json::from_str(
            r#"{"make":"Fiat","model":"Punto","year":"2008","cylinders":"1300"}"#,
        )
        .unwrap();
        assert_eq!(car.engine, Engine::Petrol);
        assert_eq!(car.cylinders, Cylinders::Cc1300);
        assert_eq!(car.oil_specific, OilSpecific::Rn0710);
    }

    #[test]
    fn test_from_entity_rejects_unknown_choice() {
        let model = car::Model {
            id: 1,
            make: "Fiat".to_string(),
            model: "Panda".to_string(),
            year: "2015".to_string(),
            engine: "electric".to_string(),
            cylinders: "1200".to_string(),
            oil_quantity: 3.5,
            oil_specific: "RN0710".to_string(),
        };
        assert!(Car::try_from(model).is_err());
    }
}
