//! Turning a collected [`Recipe`] into a downloadable JSON document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info};

use crate::{EditorError, Recipe};

/// Name of the file a recipe is exported as: `<name>.json`
pub fn file_name(recipe: &Recipe) -> String {
    format!("{}.json", recipe.name)
}

/// Serializes a recipe to its JSON payload
pub fn to_json(recipe: &Recipe, pretty: bool) -> Result<String, EditorError> {
    let json = if pretty {
        serde_json::to_string_pretty(recipe)?
    } else {
        serde_json::to_string(recipe)?
    };
    Ok(json)
}

/// Parses a JSON payload back into a recipe
pub fn from_json(payload: &str) -> Result<Recipe, EditorError> {
    Ok(serde_json::from_str(payload)?)
}

/// Destination for exported recipe documents
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Deliver `payload` under `file_name`
    async fn deliver(&self, file_name: &str, payload: &str) -> Result<(), EditorError>;
}

/// Writes exported recipes into a directory, creating it when needed
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path a file would be written to. Rejects names that could land
    /// outside the directory.
    pub fn target_path(&self, file_name: &str) -> Result<PathBuf, EditorError> {
        let stem = file_name.strip_suffix(".json").unwrap_or(file_name);
        if stem.is_empty()
            || stem == "."
            || stem == ".."
            || file_name.contains(['/', '\\'])
            || file_name.contains('\0')
        {
            return Err(EditorError::InvalidFileName(file_name.to_string()));
        }
        Ok(self.dir.join(file_name))
    }
}

#[async_trait]
impl ExportSink for DirectorySink {
    async fn deliver(&self, file_name: &str, payload: &str) -> Result<(), EditorError> {
        let path = self.target_path(file_name)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, payload.as_bytes()).await?;
        debug!("Wrote {} bytes to {}", payload.len(), path.display());
        Ok(())
    }
}

/// Serializes `recipe` and hands it to `sink` as `<name>.json`
pub async fn export_recipe(
    recipe: &Recipe,
    sink: &dyn ExportSink,
    pretty: bool,
) -> Result<String, EditorError> {
    let name = file_name(recipe);
    let payload = to_json(recipe, pretty)?;
    sink.deliver(&name, &payload).await?;
    info!(
        "Exported '{}' ({} ingredients) as {}",
        recipe.name,
        recipe.ingredients.len(),
        name
    );
    Ok(name)
}
