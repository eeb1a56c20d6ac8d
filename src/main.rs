use log::{debug, info};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use recipe_editor::console::{self, Command};
use recipe_editor::{
    deliver_to_library, DirectorySink, EditorConfig, FormAction, RecipeForm, RecipeLibrary,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut config = EditorConfig::load()?;
    // Optional output directory from command-line arguments
    if let Some(dir) = env::args().nth(1) {
        config.output_dir = PathBuf::from(dir);
    }
    debug!("{:#?}", config);

    let mut library = RecipeLibrary::load_from_dir(&config.output_dir)?;
    let sink = DirectorySink::new(config.output_dir.clone());
    let mut form = RecipeForm::builder()
        .default_unit(config.default_unit)
        .build();

    info!("Writing recipes to {}", sink.dir().display());
    println!("{} recipes in {}", library.len(), sink.dir().display());
    println!("{}", console::HELP);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let command = match console::parse_command(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("Error: {}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", console::HELP),
            Command::List => print!("{}", console::render(&form)),
            Command::Recipes => print!("{}", console::render_library(&library)),
            Command::Select(name) => {
                if !library.select(&name) {
                    eprintln!("Error: no unselected recipe named '{}'", name);
                }
            }
            Command::Unselect(name) => {
                if !library.unselect(&name) {
                    eprintln!("Error: '{}' is not selected", name);
                }
            }
            Command::Shop => print!("{}", library.shopping_list()),
            command => {
                let events = command.to_gesture(&form);
                let actions = form.handle_gesture(events);
                for action in &actions {
                    match action {
                        FormAction::RowAdded(id) => println!("Added row {}", id),
                        FormAction::RowRemoved(id) => println!("Removed row {}", id),
                        FormAction::Export(_) => {}
                    }
                }
                let written =
                    deliver_to_library(&actions, &sink, config.pretty, &mut library).await;
                for name in written {
                    println!("Saved {}", sink.dir().join(name).display());
                }
            }
        }
    }

    Ok(())
}
