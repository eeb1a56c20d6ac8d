//! Line-oriented front-end: each command becomes the UI events of one gesture.

use std::fmt::Write;

use crate::form::{Button, Key, RecipeForm, UiEvent};
use crate::library::RecipeLibrary;
use crate::table::{Field, Focus, RowId};
use crate::EditorError;

pub const HELP: &str = "Commands:
  name <text>                 set the recipe name
  add                         add an ingredient row
  remove <id>                 delete a row
  set <id> name|qty|unit <v>  fill in a field
  focus <id> name|qty|unit    move focus to a field
  tab                         move focus to the next field
  blur                        leave the focused field
  enter                       press Enter
  list                        show the table
  export                      generate the recipe file
  recipes                     show saved recipes
  select <recipe>             add a saved recipe to the shopping list
  unselect <recipe>           drop a recipe from the shopping list
  shop                        show the shopping list
  help                        show this text
  quit                        exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Name(String),
    Add,
    Remove(RowId),
    Set(RowId, Field, String),
    Focus(RowId, Field),
    Tab,
    Blur,
    Enter,
    List,
    Export,
    Recipes,
    Select(String),
    Unselect(String),
    Shop,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, EditorError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        "name" => Command::Name(rest.to_string()),
        "add" => Command::Add,
        "remove" | "rm" => Command::Remove(parse_row_id(rest)?),
        "set" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            let id = parse_row_id(parts.next().unwrap_or(""))?;
            let field = parse_field(parts.next().unwrap_or(""))?;
            let value = parts.next().unwrap_or("").trim().to_string();
            Command::Set(id, field, value)
        }
        "focus" => {
            let mut parts = rest.split_whitespace();
            let id = parse_row_id(parts.next().unwrap_or(""))?;
            let field = parse_field(parts.next().unwrap_or(""))?;
            Command::Focus(id, field)
        }
        "tab" => Command::Tab,
        "blur" => Command::Blur,
        "enter" => Command::Enter,
        "list" | "ls" => Command::List,
        "export" | "generate" => Command::Export,
        "recipes" => Command::Recipes,
        "select" => Command::Select(parse_recipe_name(rest)?),
        "unselect" => Command::Unselect(parse_recipe_name(rest)?),
        "shop" => Command::Shop,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(EditorError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn parse_recipe_name(text: &str) -> Result<String, EditorError> {
    if text.is_empty() {
        return Err(EditorError::InvalidArgument(
            "expected a recipe name".to_string(),
        ));
    }
    Ok(text.to_string())
}

fn parse_row_id(text: &str) -> Result<RowId, EditorError> {
    text.trim()
        .parse::<u64>()
        .map(RowId::new)
        .map_err(|_| EditorError::InvalidArgument(format!("expected a row id, got '{}'", text)))
}

fn parse_field(text: &str) -> Result<Field, EditorError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "name" => Ok(Field::Name),
        "qty" | "quantity" => Ok(Field::Quantity),
        "unit" => Ok(Field::Unit),
        other => Err(EditorError::InvalidArgument(format!(
            "expected name, qty or unit, got '{}'",
            other
        ))),
    }
}

impl Command {
    /// The events this command produces against the current form state.
    /// Commands that only read state produce none.
    pub fn to_gesture(&self, form: &RecipeForm) -> Vec<UiEvent> {
        match self {
            Command::Name(text) => {
                let mut events = move_focus(form, Focus::RecipeName);
                events.push(UiEvent::Input {
                    target: Focus::RecipeName,
                    value: text.clone(),
                });
                events
            }
            Command::Add => vec![UiEvent::Click(Button::NewRow)],
            Command::Remove(id) => vec![UiEvent::Click(Button::DeleteRow(*id))],
            Command::Set(id, field, value) => {
                let target = Focus::Cell(*id, *field);
                let mut events = move_focus(form, target);
                events.push(UiEvent::Input {
                    target,
                    value: value.clone(),
                });
                events
            }
            Command::Focus(id, field) => move_focus(form, Focus::Cell(*id, *field)),
            Command::Tab => {
                let mut events = match next_focus(form) {
                    Some(next) => move_focus(form, next),
                    None => form.focus().map(UiEvent::Blur).into_iter().collect(),
                };
                events.push(UiEvent::KeyUp(Key::Tab));
                events
            }
            Command::Blur => form.focus().map(UiEvent::Blur).into_iter().collect(),
            Command::Enter => vec![UiEvent::KeyUp(Key::Enter)],
            Command::Export => vec![UiEvent::Click(Button::GenerateRecipe)],
            Command::List
            | Command::Recipes
            | Command::Select(_)
            | Command::Unselect(_)
            | Command::Shop
            | Command::Help
            | Command::Quit => Vec::new(),
        }
    }
}

/// Blur the focused control (if it is not `target`) and focus `target`
fn move_focus(form: &RecipeForm, target: Focus) -> Vec<UiEvent> {
    match form.focus() {
        Some(current) if current == target => Vec::new(),
        Some(current) => vec![UiEvent::Blur(current), UiEvent::Focus(target)],
        None => vec![UiEvent::Focus(target)],
    }
}

/// Tab order: recipe name, then each row's name, quantity and unit
fn next_focus(form: &RecipeForm) -> Option<Focus> {
    let table = form.table();
    match form.focus() {
        None => Some(Focus::RecipeName),
        Some(Focus::RecipeName) => table
            .rows()
            .first()
            .map(|row| Focus::Cell(row.id(), Field::Name)),
        Some(Focus::Cell(id, Field::Name)) => Some(Focus::Cell(id, Field::Quantity)),
        Some(Focus::Cell(id, Field::Quantity)) => Some(Focus::Cell(id, Field::Unit)),
        Some(Focus::Cell(id, Field::Unit)) => {
            let next = table.position(id)? + 1;
            table
                .rows()
                .get(next)
                .map(|row| Focus::Cell(row.id(), Field::Name))
        }
    }
}

/// Text rendering of the form for the `list` command
pub fn render(form: &RecipeForm) -> String {
    let mut out = String::new();
    let marker = |focus: Focus| if form.focus() == Some(focus) { "*" } else { " " };

    let _ = writeln!(
        out,
        "{}Recipe: {}",
        marker(Focus::RecipeName),
        form.recipe_name()
    );
    for row in form.table().rows() {
        let id = row.id();
        let _ = writeln!(
            out,
            "  [{:>3}] {}{:<24} {}{:>8} {}{}",
            id,
            marker(Focus::Cell(id, Field::Name)),
            row.name,
            marker(Focus::Cell(id, Field::Quantity)),
            row.quantity,
            marker(Focus::Cell(id, Field::Unit)),
            row.unit
        );
    }
    out
}

/// Saved recipes, with the ones picked for shopping marked
pub fn render_library(library: &RecipeLibrary) -> String {
    let mut out = String::new();
    for recipe in library.recipes() {
        let mark = if library.is_selected(&recipe.name) { "x" } else { " " };
        let _ = writeln!(
            out,
            "  [{}] {} ({} ingredients)",
            mark,
            recipe.name,
            recipe.ingredients.len()
        );
    }
    out
}
