use std::sync::Mutex;

use async_trait::async_trait;
use recipe_editor::export::{self, file_name};
use recipe_editor::{
    deliver_actions, deliver_to_library, export_recipe, Button, DirectorySink, EditorError,
    ExportSink, FormAction, Ingredient, Measure, Recipe, RecipeForm, RecipeLibrary, UiEvent, Unit,
};

/// Collects deliveries in memory
#[derive(Default)]
struct MemorySink {
    files: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ExportSink for MemorySink {
    async fn deliver(&self, file_name: &str, payload: &str) -> Result<(), EditorError> {
        self.files
            .lock()
            .unwrap()
            .push((file_name.to_string(), payload.to_string()));
        Ok(())
    }
}

/// Refuses every delivery
struct FailingSink;

#[async_trait]
impl ExportSink for FailingSink {
    async fn deliver(&self, file_name: &str, _payload: &str) -> Result<(), EditorError> {
        Err(EditorError::InvalidFileName(file_name.to_string()))
    }
}

fn tacos() -> Recipe {
    Recipe {
        name: "Sante Fe Pork Tacos".to_string(),
        ingredients: vec![
            Ingredient {
                name: "Cilantro".to_string(),
                measure: Measure::new(0.25, Unit::Ounces),
            },
            Ingredient {
                name: "Sour Cream".to_string(),
                measure: Measure::new(1.5, Unit::Tablespoons),
            },
        ],
    }
}

#[tokio::test]
async fn test_export_to_memory_round_trips() {
    let sink = MemorySink::default();

    let name = export_recipe(&tacos(), &sink, false).await.unwrap();

    assert_eq!(name, "Sante Fe Pork Tacos.json");
    let files = sink.files.lock().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, file_name(&tacos()));
    assert_eq!(export::from_json(&files[0].1).unwrap(), tacos());
}

#[tokio::test]
async fn test_export_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(dir.path().join("out"));

    export_recipe(&tacos(), &sink, true).await.unwrap();

    let path = dir.path().join("out").join("Sante Fe Pork Tacos.json");
    let payload = std::fs::read_to_string(&path).unwrap();
    assert_eq!(export::from_json(&payload).unwrap(), tacos());

    let library = RecipeLibrary::load_from_dir(dir.path().join("out")).unwrap();
    assert_eq!(library.recipe_by_name("Sante Fe Pork Tacos"), Some(&tacos()));
}

#[tokio::test]
async fn test_export_rejects_names_with_separators() {
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(dir.path());
    let mut recipe = tacos();
    recipe.name = "../escape".to_string();

    let result = export_recipe(&recipe, &sink, false).await;

    assert!(matches!(result, Err(EditorError::InvalidFileName(_))));
    assert!(!dir.path().join("../escape.json").exists());
}

#[tokio::test]
async fn test_generate_button_exports_form() {
    let mut form = RecipeForm::builder().recipe_name("Bread").build();
    let id = form.table().last_id();
    form.table_mut().set_name(id, "Flour");
    form.table_mut().set_quantity(id, "2");

    let actions = form.handle_gesture([UiEvent::Click(Button::GenerateRecipe)]);
    assert!(matches!(actions.as_slice(), [FormAction::Export(_)]));

    let sink = MemorySink::default();
    let delivered = deliver_actions(&actions, &sink, false).await;

    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].name, "Bread");
    let files = sink.files.lock().unwrap();
    let value: serde_json::Value = serde_json::from_str(&files[0].1).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "name": "Bread",
            "ingredients": [
                { "name": "Flour", "measure": { "quantity": 2.0, "unit": "Cups" } }
            ]
        })
    );
}

#[tokio::test]
async fn test_generate_with_blank_name_exports_nothing() {
    let mut form = RecipeForm::default();
    let id = form.table().last_id();
    form.table_mut().set_name(id, "Flour");
    form.table_mut().set_quantity(id, "2");

    let actions = form.handle_gesture([UiEvent::Click(Button::GenerateRecipe)]);

    let sink = MemorySink::default();
    assert!(deliver_actions(&actions, &sink, false).await.is_empty());
    assert!(sink.files.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_delivery_is_swallowed() {
    let actions = vec![FormAction::Export(tacos())];
    let delivered = deliver_actions(&actions, &FailingSink, false).await;
    assert!(delivered.is_empty());
}

/// Only recipes that reached the sink are recorded in the library
#[tokio::test]
async fn test_library_only_records_delivered_recipes() {
    let mut library = RecipeLibrary::default();
    let actions = vec![FormAction::Export(tacos())];

    let written = deliver_to_library(&actions, &FailingSink, false, &mut library).await;
    assert!(written.is_empty());
    assert!(library.is_empty());

    let sink = MemorySink::default();
    let written = deliver_to_library(&actions, &sink, false, &mut library).await;
    assert_eq!(written, vec!["Sante Fe Pork Tacos.json".to_string()]);
    assert_eq!(library.recipe_by_name("Sante Fe Pork Tacos"), Some(&tacos()));
}
