pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod form;
pub mod library;
pub mod model;
pub mod shopping_list;
pub mod table;

pub use config::EditorConfig;
pub use error::EditorError;
pub use export::{export_recipe, DirectorySink, ExportSink};
pub use form::{Button, FormAction, Key, RecipeForm, RecipeFormBuilder, UiEvent};
pub use library::RecipeLibrary;
pub use model::{Ingredient, Measure, Recipe, Unit};
pub use shopping_list::{ShoppingItem, ShoppingList};
pub use table::{Field, Focus, IngredientTable, RowId, RowRecord};

use log::{error, info};

/// Hands every export produced by a gesture to `sink`. Delivery failures
/// are logged and otherwise dropped; returns the recipes that were delivered.
pub async fn deliver_actions<'a>(
    actions: &'a [FormAction],
    sink: &dyn ExportSink,
    pretty: bool,
) -> Vec<&'a Recipe> {
    let mut delivered = Vec::new();
    for action in actions {
        if let FormAction::Export(recipe) = action {
            match export_recipe(recipe, sink, pretty).await {
                Ok(_) => delivered.push(recipe),
                Err(e) => error!("Failed to export '{}': {}", recipe.name, e),
            }
        }
    }
    delivered
}

/// Delivers the exports of a gesture and records the delivered recipes in
/// `library`. Returns the file names written.
pub async fn deliver_to_library(
    actions: &[FormAction],
    sink: &dyn ExportSink,
    pretty: bool,
    library: &mut RecipeLibrary,
) -> Vec<String> {
    let delivered = deliver_actions(actions, sink, pretty).await;
    delivered
        .into_iter()
        .map(|recipe| {
            if library.replace_recipe(recipe.clone()).is_some() {
                info!("Replaced existing recipe '{}'", recipe.name);
            }
            export::file_name(recipe)
        })
        .collect()
}
