use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::model::{Measure, Recipe, Unit};

/// `Whole` counts cannot be merged with measured amounts, so an ingredient
/// used both ways gets one line per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Kind {
    Measured,
    Counted,
}

impl From<Unit> for Kind {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Whole => Kind::Counted,
            _ => Kind::Measured,
        }
    }
}

/// One line of a shopping list
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingItem {
    pub name: String,
    pub measure: Measure,
    /// Names of the recipes that call for this ingredient
    pub recipes: BTreeSet<String>,
}

/// Ingredients of several recipes merged by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    items: BTreeMap<(String, Kind), ShoppingItem>,
}

impl ShoppingList {
    /// Merges the ingredients of `recipes`. Amounts of the same ingredient are
    /// summed in the larger of the two units.
    pub fn generate<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> Self {
        let mut list = ShoppingList::default();
        for recipe in recipes {
            for ingredient in &recipe.ingredients {
                list.add(&recipe.name, &ingredient.name, ingredient.measure);
            }
        }
        list
    }

    fn add(&mut self, recipe: &str, name: &str, measure: Measure) {
        let key = (name.to_string(), Kind::from(measure.unit));
        let item = self.items.entry(key).or_insert_with(|| ShoppingItem {
            name: name.to_string(),
            measure: Measure::new(0.0, measure.unit),
            recipes: BTreeSet::new(),
        });

        // Always promote to the bigger unit
        item.measure = if item.measure.unit >= measure.unit {
            item.measure + measure
        } else {
            measure + item.measure
        };
        item.recipes.insert(recipe.to_string());
    }

    /// Items ordered by ingredient name
    pub fn items(&self) -> impl Iterator<Item = &ShoppingItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.items() {
            let recipes: Vec<&str> = item.recipes.iter().map(String::as_str).collect();
            writeln!(
                f,
                "{}: {} {} ({})",
                item.name,
                item.measure.quantity,
                item.measure.unit,
                recipes.join(", ")
            )?;
        }
        Ok(())
    }
}
