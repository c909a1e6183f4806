//! Main application entry point (native).

#[cfg(feature = "native")]
use circuitdraft_app::{Flow, Shell};
#[cfg(feature = "native")]
use circuitdraft_core::{CanvasResult, Editor, EditorConfig, StaticCatalog};
#[cfg(feature = "native")]
use std::io::{self, BufRead, Write};
#[cfg(feature = "native")]
use std::path::Path;

/// Build the editor from optional config and extra-catalog paths.
#[cfg(feature = "native")]
fn load_editor(config_path: Option<&str>, catalog_path: Option<&str>) -> CanvasResult<Editor> {
    let config = match config_path {
        Some(path) => EditorConfig::load(Path::new(path))?,
        None => EditorConfig::default(),
    };

    let mut catalog = StaticCatalog::circuit_symbols();
    if let Some(path) = catalog_path {
        catalog.extend(StaticCatalog::load(Path::new(path))?);
    }
    log::info!("Catalog has {} shape type(s)", catalog.len());

    Ok(Editor::new(config, catalog))
}

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting CircuitDraft");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = args.first().map(String::as_str);
    let catalog_path = args.get(1).map(String::as_str);
    let editor = match load_editor(config_path, catalog_path) {
        Ok(editor) => editor,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut shell = Shell::new(editor);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        };
        match shell.execute(&line) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue(Some(output))) => {
                if writeln!(stdout, "{}", output).is_err() {
                    break;
                }
            }
            Ok(Flow::Continue(None)) => {}
            Err(e) => eprintln!("error: {}", e),
        }
    }
    log::info!("Exiting CircuitDraft");
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
