//! Line commands understood by the shell, and their help text.

use kurbo::Point;
use thiserror::Error;

/// Command parse errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Catalog,
    Pages,
    Show,
    AddPage,
    SelectPage(String),
    RemovePage(String),
    Add(String),
    Remove(String),
    Rotate(String),
    /// Pointer pressed: grab the shape under it.
    Down(Point),
    /// Pointer moved.
    Move(Point),
    /// Pointer released.
    Up,
}

impl Command {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(None);
        };
        if name.starts_with('#') {
            return Ok(None);
        }

        let command = match name {
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "catalog" => Command::Catalog,
            "pages" => Command::Pages,
            "show" => Command::Show,
            "add-page" => Command::AddPage,
            "page" => Command::SelectPage(arg(&mut parts, "page")?),
            "remove-page" => Command::RemovePage(arg(&mut parts, "remove-page")?),
            "add" => Command::Add(arg(&mut parts, "add")?),
            "remove" => Command::Remove(arg(&mut parts, "remove")?),
            "rotate" => Command::Rotate(arg(&mut parts, "rotate")?),
            "down" => Command::Down(point(&mut parts, "down")?),
            "move" => Command::Move(point(&mut parts, "move")?),
            "up" => Command::Up,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn arg<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<String, ParseError> {
    parts
        .next()
        .map(str::to_string)
        .ok_or(ParseError::MissingArgument(command))
}

fn point<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<Point, ParseError> {
    let x = number(&arg(&mut *parts, command)?)?;
    let y = number(&arg(&mut *parts, command)?)?;
    Ok(Point::new(x, y))
}

fn number(token: &str) -> Result<f64, ParseError> {
    token
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(token.to_string()))
}

/// Help entry for a command.
#[derive(Debug, Clone)]
pub struct CommandHelp {
    pub usage: &'static str,
    pub description: &'static str,
}

impl CommandHelp {
    pub const fn new(usage: &'static str, description: &'static str) -> Self {
        Self { usage, description }
    }
}

/// Registry of all shell commands.
pub struct CommandRegistry;

impl CommandRegistry {
    /// Get all registered commands.
    pub fn all() -> Vec<CommandHelp> {
        vec![
            CommandHelp::new("catalog", "List placeable shape types"),
            CommandHelp::new("pages", "List pages (* marks the active one)"),
            CommandHelp::new("show", "Print the shapes on the active page"),
            CommandHelp::new("add-page", "Append a new page"),
            CommandHelp::new("page <n|id>", "Switch to a page"),
            CommandHelp::new("remove-page <n|id>", "Remove a page and its shapes"),
            CommandHelp::new("add <type>", "Place a shape on the active page"),
            CommandHelp::new("remove <n|id>", "Remove a shape"),
            CommandHelp::new("rotate <n|id>", "Rotate a shape by 90 degrees"),
            CommandHelp::new("down <x> <y>", "Press the pointer (grab the shape under it)"),
            CommandHelp::new("move <x> <y>", "Move the pointer"),
            CommandHelp::new("up", "Release the pointer"),
            CommandHelp::new("quit", "Exit"),
        ]
    }

    /// Format the help listing.
    pub fn format_all() -> String {
        Self::all()
            .iter()
            .map(|help| format!("  {:20} {}", help.usage, help.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("pages"), Ok(Some(Command::Pages)));
        assert_eq!(Command::parse("  up  "), Ok(Some(Command::Up)));
        assert_eq!(Command::parse("add Resistor"), Ok(Some(Command::Add("Resistor".to_string()))));
    }

    #[test]
    fn test_parse_pointer_commands() {
        assert_eq!(
            Command::parse("down 150 150.5"),
            Ok(Some(Command::Down(Point::new(150.0, 150.5))))
        );
        assert_eq!(
            Command::parse("move 1 x"),
            Err(ParseError::InvalidNumber("x".to_string()))
        );
        assert_eq!(Command::parse("move 1"), Err(ParseError::MissingArgument("move")));
    }

    #[test]
    fn test_parse_blank_and_comments() {
        assert_eq!(Command::parse(""), Ok(None));
        assert_eq!(Command::parse("   "), Ok(None));
        assert_eq!(Command::parse("# setup"), Ok(None));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Command::parse("undo"), Err(ParseError::Unknown("undo".to_string())));
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = CommandRegistry::format_all();
        for usage in ["add <type>", "down <x> <y>", "remove-page <n|id>"] {
            assert!(help.contains(usage));
        }
    }
}
