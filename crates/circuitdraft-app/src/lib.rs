//! CircuitDraft Application
//!
//! A headless shell standing in for the rendering layer: it feeds line
//! commands to the canvas core and prints the visible shapes as JSON.

mod commands;
mod shell;

pub use commands::{Command, CommandHelp, CommandRegistry, ParseError};
pub use shell::{Flow, RenderedShape, Shell, ShellError};
