//! The ingredient table: an ordered set of editable rows, one per ingredient.
//!
//! The table always holds at least one row. Rows are identified by a
//! [`RowId`] allocated from a counter that only ever grows, so an id is
//! never handed out twice by the same table.

use std::fmt;

use log::debug;

use crate::model::{Ingredient, Measure, Recipe, Unit};

/// Identifier of a live row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    pub fn new(raw: u64) -> Self {
        RowId(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the editable controls in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Quantity,
    Unit,
}

/// Where input focus currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    RecipeName,
    Cell(RowId, Field),
}

/// Editable state of one ingredient row
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    id: RowId,
    pub name: String,
    pub quantity: String,
    pub unit: Unit,
}

impl RowRecord {
    fn new(id: RowId, unit: Unit) -> Self {
        Self {
            id,
            name: String::new(),
            quantity: String::new(),
            unit,
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// The ingredient this row describes, or `None` when the name is blank or
    /// the quantity is not a finite number
    pub fn to_ingredient(&self) -> Option<Ingredient> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }

        let quantity = parse_quantity(&self.quantity)?;
        Some(Ingredient {
            name: name.to_string(),
            measure: Measure::new(quantity, self.unit),
        })
    }
}

/// Parses quantity text; empty, malformed and non-finite values are rejected
pub fn parse_quantity(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|quantity| quantity.is_finite())
}

#[derive(Debug, Clone)]
pub struct IngredientTable {
    rows: Vec<RowRecord>,
    next_id: u64,
    default_unit: Unit,
    focus: Option<Focus>,
}

impl Default for IngredientTable {
    fn default() -> Self {
        Self::new(Unit::default())
    }
}

impl IngredientTable {
    /// Creates a table holding its first, empty row
    pub fn new(default_unit: Unit) -> Self {
        let mut table = Self {
            rows: Vec::new(),
            next_id: 0,
            default_unit,
            focus: None,
        };
        table.add_row(false);
        table
    }

    /// Appends an empty row and optionally moves focus to its name field
    pub fn add_row(&mut self, focus_new_field: bool) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(RowRecord::new(id, self.default_unit));
        debug!("Added row {} ({} rows)", id, self.rows.len());

        if focus_new_field {
            self.focus = Some(Focus::Cell(id, Field::Name));
        }
        id
    }

    /// Removes the row with `id`. The sole remaining row is never removed and
    /// unknown ids are ignored. Returns whether a row was removed.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        if self.rows.len() == 1 {
            debug!("Refusing to remove row {}: it is the last row", id);
            return false;
        }

        let Some(index) = self.position(id) else {
            debug!("Ignoring removal of unknown row {}", id);
            return false;
        };

        self.rows.remove(index);
        if matches!(self.focus, Some(Focus::Cell(focused, _)) if focused == id) {
            self.focus = None;
        }
        debug!("Removed row {} ({} rows)", id, self.rows.len());
        true
    }

    /// Builds a recipe from `name` and every well-formed row, in table order.
    /// Returns `None` when the name is blank. The name is kept as typed;
    /// ingredient names are trimmed.
    pub fn collect_recipe(&self, name: &str) -> Option<Recipe> {
        if name.trim().is_empty() {
            return None;
        }

        let ingredients = self
            .rows
            .iter()
            .filter_map(|row| {
                let ingredient = row.to_ingredient();
                if ingredient.is_none() {
                    debug!("Skipping incomplete row {}", row.id);
                }
                ingredient
            })
            .collect();

        Some(Recipe {
            name: name.to_string(),
            ingredients,
        })
    }

    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Never true: the table keeps at least one row
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: RowId) -> Option<&RowRecord> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn row_mut(&mut self, id: RowId) -> Option<&mut RowRecord> {
        self.rows.iter_mut().find(|row| row.id == id)
    }

    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub fn last_id(&self) -> RowId {
        // The table is never empty
        self.rows[self.rows.len() - 1].id
    }

    pub fn is_last(&self, id: RowId) -> bool {
        self.last_id() == id
    }

    pub fn default_unit(&self) -> Unit {
        self.default_unit
    }

    pub fn set_name(&mut self, id: RowId, name: impl Into<String>) -> bool {
        self.row_mut(id).map(|row| row.name = name.into()).is_some()
    }

    pub fn set_quantity(&mut self, id: RowId, quantity: impl Into<String>) -> bool {
        self.row_mut(id)
            .map(|row| row.quantity = quantity.into())
            .is_some()
    }

    pub fn set_unit(&mut self, id: RowId, unit: Unit) -> bool {
        self.row_mut(id).map(|row| row.unit = unit).is_some()
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    /// Moves focus; focusing a cell of a row that does not exist is ignored
    pub fn set_focus(&mut self, focus: Focus) {
        if let Focus::Cell(id, _) = focus {
            if self.row(id).is_none() {
                return;
            }
        }
        self.focus = Some(focus);
    }

    pub fn blur(&mut self) -> Option<Focus> {
        self.focus.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(table: &mut IngredientTable, id: RowId, name: &str, qty: &str, unit: Unit) {
        table.set_name(id, name);
        table.set_quantity(id, qty);
        table.set_unit(id, unit);
    }

    #[test]
    fn test_new_table_has_one_row() {
        let table = IngredientTable::default();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].unit, Unit::Cups);
        assert!(table.focus().is_none());
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut table = IngredientTable::default();
        let second = table.add_row(false);
        assert!(table.remove_row(second));
        let third = table.add_row(false);
        assert_ne!(second, third);
        assert!(third > second);
    }

    #[test]
    fn test_add_row_with_focus() {
        let mut table = IngredientTable::default();
        let id = table.add_row(true);
        assert_eq!(table.focus(), Some(Focus::Cell(id, Field::Name)));
        assert!(table.is_last(id));
    }

    #[test]
    fn test_add_row_without_focus_keeps_focus() {
        let mut table = IngredientTable::default();
        let first = table.last_id();
        table.set_focus(Focus::Cell(first, Field::Quantity));
        table.add_row(false);
        assert_eq!(table.focus(), Some(Focus::Cell(first, Field::Quantity)));
    }

    #[test]
    fn test_remove_last_remaining_row_is_refused() {
        let mut table = IngredientTable::default();
        let only = table.last_id();
        assert!(!table.remove_row(only));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_unknown_row_is_noop() {
        let mut table = IngredientTable::default();
        table.add_row(false);
        assert!(!table.remove_row(RowId::new(999)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_remove_focused_row_clears_focus() {
        let mut table = IngredientTable::default();
        let id = table.add_row(true);
        table.remove_row(id);
        assert!(table.focus().is_none());
    }

    #[test]
    fn test_focus_unknown_row_is_ignored() {
        let mut table = IngredientTable::default();
        table.set_focus(Focus::Cell(RowId::new(42), Field::Name));
        assert!(table.focus().is_none());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("2"), Some(2.0));
        assert_eq!(parse_quantity(" 0.25 "), Some(0.25));
        assert_eq!(parse_quantity("1e2"), Some(100.0));
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("   "), None);
        assert_eq!(parse_quantity("two"), None);
        assert_eq!(parse_quantity("inf"), None);
        assert_eq!(parse_quantity("NaN"), None);
    }

    #[test]
    fn test_collect_trims_ingredient_names_only() {
        let mut table = IngredientTable::default();
        let id = table.last_id();
        fill(&mut table, id, "  Butter ", " 4 ", Unit::Tablespoons);

        let recipe = table.collect_recipe("  Cookies  ").unwrap();
        assert_eq!(recipe.name, "  Cookies  ");
        assert_eq!(recipe.ingredients[0].name, "Butter");
        assert_eq!(recipe.ingredients[0].measure.quantity, 4.0);
    }

    #[test]
    fn test_collect_blank_name() {
        let mut table = IngredientTable::default();
        let id = table.last_id();
        fill(&mut table, id, "Flour", "2", Unit::Cups);
        assert!(table.collect_recipe("").is_none());
        assert!(table.collect_recipe(" \t ").is_none());
    }

    #[test]
    fn test_collect_with_no_valid_rows() {
        let table = IngredientTable::default();
        let recipe = table.collect_recipe("Water").unwrap();
        assert!(recipe.ingredients.is_empty());
    }
}
