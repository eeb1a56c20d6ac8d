use log::{debug, info, warn};

use crate::model::{Recipe, Unit};
use crate::table::{Field, Focus, IngredientTable, RowId};

/// Keys the form reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Other,
}

/// Buttons on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    NewRow,
    DeleteRow(RowId),
    GenerateRecipe,
}

/// Events delivered by whatever surface renders the form
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The value of a control changed
    Input { target: Focus, value: String },
    Focus(Focus),
    Blur(Focus),
    KeyUp(Key),
    Click(Button),
}

/// What the form did in response to an event
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    RowAdded(RowId),
    RowRemoved(RowId),
    /// The recipe is ready to be handed to an export sink
    Export(Recipe),
}

/// The recipe form: a name field above an ingredient table
#[derive(Debug, Clone)]
pub struct RecipeForm {
    recipe_name: String,
    table: IngredientTable,
}

impl Default for RecipeForm {
    fn default() -> Self {
        RecipeForm::builder().build()
    }
}

impl RecipeForm {
    /// Creates a new builder for the form
    ///
    /// # Example
    /// ```
    /// use recipe_editor::{RecipeForm, Unit};
    ///
    /// let form = RecipeForm::builder()
    ///     .default_unit(Unit::Teaspoons)
    ///     .recipe_name("Bread")
    ///     .build();
    /// assert_eq!(form.table().len(), 1);
    /// ```
    pub fn builder() -> RecipeFormBuilder {
        RecipeFormBuilder::default()
    }

    pub fn recipe_name(&self) -> &str {
        &self.recipe_name
    }

    pub fn set_recipe_name(&mut self, name: impl Into<String>) {
        self.recipe_name = name.into();
    }

    pub fn table(&self) -> &IngredientTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut IngredientTable {
        &mut self.table
    }

    pub fn focus(&self) -> Option<Focus> {
        self.table.focus()
    }

    /// Collects the recipe from the current name and rows
    pub fn collect_recipe(&self) -> Option<Recipe> {
        self.table.collect_recipe(&self.recipe_name)
    }

    /// Handles a single event as its own gesture
    pub fn handle(&mut self, event: UiEvent) -> Option<FormAction> {
        self.dispatch(event, true)
    }

    /// Handles every event produced by one user gesture. At most one row is
    /// appended per gesture, so a blur-triggered advance and an Enter key-up
    /// arriving together yield a single new row.
    pub fn handle_gesture(&mut self, events: impl IntoIterator<Item = UiEvent>) -> Vec<FormAction> {
        let mut actions = Vec::new();
        let mut may_append = true;

        for event in events {
            if let Some(action) = self.dispatch(event, may_append) {
                if matches!(action, FormAction::RowAdded(_)) {
                    may_append = false;
                }
                actions.push(action);
            }
        }

        actions
    }

    fn dispatch(&mut self, event: UiEvent, may_append: bool) -> Option<FormAction> {
        match event {
            UiEvent::Input { target, value } => {
                self.input(target, value);
                None
            }
            UiEvent::Focus(target) => {
                self.table.set_focus(target);
                None
            }
            UiEvent::Blur(target) => self.blur(target, may_append),
            UiEvent::KeyUp(Key::Enter) | UiEvent::Click(Button::NewRow) => {
                if !may_append {
                    debug!("Row already appended during this gesture");
                    return None;
                }
                Some(FormAction::RowAdded(self.table.add_row(false)))
            }
            UiEvent::KeyUp(_) => None,
            UiEvent::Click(Button::DeleteRow(id)) => self
                .table
                .remove_row(id)
                .then_some(FormAction::RowRemoved(id)),
            UiEvent::Click(Button::GenerateRecipe) => match self.collect_recipe() {
                Some(recipe) => {
                    info!(
                        "Generated recipe '{}' with {} ingredients",
                        recipe.name,
                        recipe.ingredients.len()
                    );
                    Some(FormAction::Export(recipe))
                }
                None => {
                    debug!("Recipe name is blank, nothing to export");
                    None
                }
            },
        }
    }

    fn input(&mut self, target: Focus, value: String) {
        match target {
            Focus::RecipeName => self.recipe_name = value,
            Focus::Cell(id, Field::Name) => {
                self.table.set_name(id, value);
            }
            Focus::Cell(id, Field::Quantity) => {
                self.table.set_quantity(id, value);
            }
            Focus::Cell(id, Field::Unit) => match value.parse::<Unit>() {
                Ok(unit) => {
                    self.table.set_unit(id, unit);
                }
                Err(e) => warn!("Ignoring unit selection for row {}: {}", id, e),
            },
        }
    }

    /// Leaving the unit selector of the last row appends a fresh row and
    /// focuses its name field. Only the focused control can be blurred.
    fn blur(&mut self, target: Focus, may_append: bool) -> Option<FormAction> {
        if self.table.focus() != Some(target) {
            debug!("Ignoring blur of unfocused {:?}", target);
            return None;
        }
        self.table.blur();

        match target {
            Focus::Cell(id, Field::Unit) if self.table.is_last(id) && may_append => {
                Some(FormAction::RowAdded(self.table.add_row(true)))
            }
            _ => None,
        }
    }
}

/// Builder for configuring a [`RecipeForm`]
#[derive(Debug, Default)]
pub struct RecipeFormBuilder {
    default_unit: Option<Unit>,
    recipe_name: Option<String>,
}

impl RecipeFormBuilder {
    /// Unit preselected in every new row
    pub fn default_unit(mut self, unit: Unit) -> Self {
        self.default_unit = Some(unit);
        self
    }

    /// Prefill the recipe name field
    pub fn recipe_name(mut self, name: impl Into<String>) -> Self {
        self.recipe_name = Some(name.into());
        self
    }

    /// Builds the form with its initial row
    pub fn build(self) -> RecipeForm {
        RecipeForm {
            recipe_name: self.recipe_name.unwrap_or_default(),
            table: IngredientTable::new(self.default_unit.unwrap_or_default()),
        }
    }
}
