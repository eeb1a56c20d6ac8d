use std::path::Path;

use log::{info, warn};

use crate::shopping_list::ShoppingList;
use crate::{export, EditorError, Recipe};

/// Recipes previously exported to a directory, unique by name, plus the
/// names currently picked for a shopping list
#[derive(Debug, Clone, Default)]
pub struct RecipeLibrary {
    recipes: Vec<Recipe>,
    selected: Vec<String>,
}

impl RecipeLibrary {
    /// Loads every `*.json` recipe in `path`, creating the directory if it
    /// does not exist. Files that fail to parse are logged and skipped.
    pub fn load_from_dir(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref();
        if !path.is_dir() {
            if path.exists() {
                return Err(EditorError::NotADirectory(path.display().to_string()));
            }
            std::fs::create_dir_all(path)?;
            info!("Created recipe directory {}", path.display());
        }

        let mut library = RecipeLibrary::default();
        let mut files: Vec<_> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|file| file.is_file())
            .filter(|file| file.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        for file in files {
            match std::fs::read_to_string(&file)
                .map_err(EditorError::from)
                .and_then(|payload| export::from_json(&payload))
            {
                Ok(recipe) => {
                    let name = recipe.name.clone();
                    if !library.add_recipe(recipe) {
                        warn!("Skipping duplicate recipe \"{}\" in {}", name, file.display());
                    }
                }
                Err(e) => warn!("Error loading recipe \"{}\": {}", file.display(), e),
            }
        }

        info!("Loaded {} recipes from {}", library.len(), path.display());
        Ok(library)
    }

    /// Adds a recipe unless one with the same name is already present
    pub fn add_recipe(&mut self, recipe: Recipe) -> bool {
        if self.recipe_by_name(&recipe.name).is_some() {
            return false;
        }
        self.recipes.push(recipe);
        true
    }

    /// Inserts a recipe, returning the one it replaced with the same name
    pub fn replace_recipe(&mut self, recipe: Recipe) -> Option<Recipe> {
        match self.recipes.iter_mut().find(|other| other.name == recipe.name) {
            Some(existing) => Some(std::mem::replace(existing, recipe)),
            None => {
                self.recipes.push(recipe);
                None
            }
        }
    }

    pub fn recipe_by_name(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.name == name)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Picks a known recipe for the shopping list. Returns false for unknown
    /// or already selected names.
    pub fn select(&mut self, name: &str) -> bool {
        if self.recipe_by_name(name).is_none() || self.is_selected(name) {
            return false;
        }
        self.selected.push(name.to_string());
        true
    }

    pub fn unselect(&mut self, name: &str) -> bool {
        let Some(index) = self.selected.iter().position(|other| other == name) else {
            return false;
        };
        self.selected.remove(index);
        true
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|other| other == name)
    }

    /// Selected recipes in selection order
    pub fn selected(&self) -> Vec<&Recipe> {
        self.selected
            .iter()
            .filter_map(|name| self.recipe_by_name(name))
            .collect()
    }

    /// Shopping list for the selected recipes
    pub fn shopping_list(&self) -> ShoppingList {
        ShoppingList::generate(self.selected())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
