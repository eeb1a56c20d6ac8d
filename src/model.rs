use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::EditorError;

/// A finished recipe, as exported to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: Measure,
}

/// Units of measure, declared smallest to largest so that the derived
/// ordering drives conversion. `Whole` sits outside the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Unit {
    /// "A pinch of salt", not enough for even a teaspoon
    Pinch,
    Teaspoons,
    Tablespoons,
    Ounces,
    Cups,
    /// A whole pepper, 2 potatoes, 1 and a half lemons
    Whole,
}

impl Unit {
    /// Units in the order a unit selector offers them
    pub const ALL: [Unit; 6] = [
        Unit::Cups,
        Unit::Ounces,
        Unit::Tablespoons,
        Unit::Teaspoons,
        Unit::Pinch,
        Unit::Whole,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Cups => "Cups",
            Unit::Ounces => "Ounces",
            Unit::Tablespoons => "Tablespoons",
            Unit::Teaspoons => "Teaspoons",
            Unit::Pinch => "Pinch",
            Unit::Whole => "Whole",
        }
    }

    /// Multiplier and unit one step up the scale
    fn next_biggest(self) -> (f64, Unit) {
        match self {
            Unit::Cups => (1.0, Unit::Cups),
            Unit::Ounces => (0.125, Unit::Cups),
            Unit::Tablespoons => (0.5, Unit::Ounces),
            Unit::Teaspoons => (1.0 / 3.0, Unit::Tablespoons),
            Unit::Pinch => (0.25, Unit::Teaspoons),
            Unit::Whole => (1.0, Unit::Whole),
        }
    }

    /// Multiplier and unit one step down the scale
    fn next_smallest(self) -> (f64, Unit) {
        match self {
            Unit::Cups => (8.0, Unit::Ounces),
            Unit::Ounces => (2.0, Unit::Tablespoons),
            Unit::Tablespoons => (3.0, Unit::Teaspoons),
            Unit::Teaspoons => (4.0, Unit::Pinch),
            Unit::Pinch => (1.0, Unit::Pinch),
            Unit::Whole => (1.0, Unit::Whole),
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::ALL[0]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = EditorError;

    /// Case-insensitive match against the unit names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Unit::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| EditorError::UnknownUnit(needle.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub quantity: f64,
    pub unit: Unit,
}

impl Measure {
    pub fn new(quantity: f64, unit: Unit) -> Self {
        Self { quantity, unit }
    }

    /// Converts to `unit`, stepping one unit at a time. Measures in or
    /// into `Whole` are returned unchanged.
    pub fn convert_to(&self, unit: Unit) -> Measure {
        if self.unit == unit || self.unit == Unit::Whole || unit == Unit::Whole {
            return *self;
        }

        let step = if self.unit < unit {
            Unit::next_biggest
        } else {
            Unit::next_smallest
        };

        let mut quantity = self.quantity;
        let mut current = self.unit;
        while current != unit {
            let (multiplier, next) = step(current);
            quantity *= multiplier;
            current = next;
        }

        Measure::new(quantity, current)
    }
}

impl Add for Measure {
    type Output = Measure;

    /// Sum in the left operand's unit
    fn add(self, rhs: Measure) -> Measure {
        let converted = rhs.convert_to(self.unit);
        Measure::new(self.quantity + converted.quantity, self.unit)
    }
}
