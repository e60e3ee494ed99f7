//! Closed choice sets used by cars and filters.
//!
//! Each choice has a stored value (what goes into the database and over the
//! wire) and an Italian display label. Both strings are part of the persisted
//! contract and must not change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ServerError;

/// Declares a choice enum together with its value/label table.
macro_rules! choices {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => ($value:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every choice, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value stored in the database.
            pub fn value(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Display label shown to users.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ServerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(ServerError::Validation(format!(
                        "{} must be one of {:?}, got '{}'",
                        $field,
                        [$($value),+],
                        other
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value())
            }
        }
    };
}

choices! {
    /// Whether a filter is a primary part for the cars it fits.
    Primary, "primary" {
        Si => ("Si", "Si"),
        No => ("No", "No"),
    }
}

choices! {
    /// Functional category of a filter.
    Typology, "typology" {
        Air => ("air", "Aria"),
        Oil => ("oil", "Olio"),
        Passenger => ("passenger", "Abitacolo"),
        Diesel => ("diesel", "Gasolio"),
        Gas => ("gas", "Gas"),
    }
}

choices! {
    /// Fuel type of a car engine.
    Engine, "engine" {
        Petrol => ("petrol", "Benzina"),
        Diesel => ("diesel", "Diesel"),
    }
}

choices! {
    /// Engine displacement in cc.
    Cylinders, "cylinders" {
        Cc900 => ("900", "900"),
        Cc1000 => ("1000", "1000"),
        Cc1200 => ("1200", "1200"),
        Cc1300 => ("1300", "1300"),
        Cc1500 => ("1500", "1500"),
        Cc1600 => ("1600", "1600"),
        Cc1700 => ("1700", "1700"),
        Cc1900 => ("1900", "1900"),
        Cc2000 => ("2000", "2000"),
    }
}

choices! {
    /// Oil specification required by a car.
    OilSpecific, "oil_specific" {
        Rn0710 => ("RN0710", "RN0710"),
        Rn0720 => ("RN0720", "RN0720"),
        Rn17 => ("RN17", "RN17"),
    }
}

impl Default for Primary {
    fn default() -> Self {
        Primary::No
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::Petrol
    }
}

impl Default for OilSpecific {
    fn default() -> Self {
        OilSpecific::Rn0710
    }
}
