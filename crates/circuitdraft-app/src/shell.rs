//! Headless shell: drives the canvas core from line commands and prints
//! the visible set whenever the active page's contents change.

use crate::commands::{Command, CommandRegistry, ParseError};
use circuitdraft_core::{
    CanvasError, CanvasEvent, Editor, InstanceId, PageId, ShapeCatalog, ShapeInstance,
    rotated_transform,
};
use serde::Serialize;
use std::sync::mpsc::Receiver;
use thiserror::Error;

/// Shell errors.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error("No such {kind}: {reference}")]
    UnknownReference { kind: &'static str, reference: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Drawable record handed to a renderer.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedShape {
    pub id: String,
    pub type_id: String,
    pub visual_ref: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: u16,
    pub transform: String,
}

impl RenderedShape {
    fn from_instance(instance: &ShapeInstance, catalog: &impl ShapeCatalog) -> Self {
        Self {
            id: instance.id().to_string(),
            type_id: instance.type_id.clone(),
            visual_ref: catalog
                .lookup(&instance.type_id)
                .map(|template| template.visual_ref.clone()),
            x: instance.position.x,
            y: instance.position.y,
            width: instance.width,
            height: instance.height,
            rotation: instance.rotation_degrees,
            transform: rotated_transform(instance).svg(),
        }
    }
}

/// Outcome of executing one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Continue(Option<String>),
    Quit,
}

/// Interactive front end over an [`Editor`].
pub struct Shell {
    editor: Editor,
    events: Receiver<CanvasEvent>,
}

impl Shell {
    pub fn new(mut editor: Editor) -> Self {
        let events = editor.subscribe();
        Self { editor, events }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Execute one input line.
    ///
    /// Output is the command's own reply followed by the refreshed view
    /// when the change notification says the active page changed.
    pub fn execute(&mut self, line: &str) -> Result<Flow, ShellError> {
        let Some(command) = Command::parse(line)? else {
            return Ok(Flow::Continue(None));
        };
        if command == Command::Quit {
            return Ok(Flow::Quit);
        }

        let reply = self.apply(command)?;
        let refresh = self.refresh()?;
        let output = match (reply, refresh) {
            (Some(reply), Some(view)) => Some(format!("{}\n{}", reply, view)),
            (reply, view) => reply.or(view),
        };
        Ok(Flow::Continue(output))
    }

    fn apply(&mut self, command: Command) -> Result<Option<String>, ShellError> {
        let reply = match command {
            Command::Help => Some(CommandRegistry::format_all()),
            Command::Quit => None,
            Command::Catalog => Some(self.catalog_listing()),
            Command::Pages => Some(self.page_listing()),
            Command::Show => Some(format!("{}\n{}", self.render()?, self.bounds_line())),
            Command::AddPage => {
                let id = self.editor.add_page();
                Some(format!("page {} added", id))
            }
            Command::SelectPage(reference) => {
                let id = self.resolve_page(&reference)?;
                self.editor.set_active_page(id)?;
                None
            }
            Command::RemovePage(reference) => {
                let id = self.resolve_page(&reference)?;
                let removed = self.editor.remove_page(id)?;
                Some(format!("page {} removed with {} shape(s)", id, removed.len()))
            }
            Command::Add(type_id) => {
                let id = self.editor.add_to_active_page(&type_id)?;
                Some(format!("{} {} added", type_id, id))
            }
            Command::Remove(reference) => {
                let id = self.resolve_instance(&reference)?;
                self.editor.remove_instance(id);
                None
            }
            Command::Rotate(reference) => {
                let id = self.resolve_instance(&reference)?;
                let degrees = self.editor.rotate(id)?;
                Some(format!("rotated to {}", degrees))
            }
            Command::Down(pointer) => {
                let id = self.editor.begin_drag_at(pointer)?;
                Some(format!("grabbed {}", id))
            }
            Command::Move(pointer) => {
                self.editor.update_drag(pointer);
                None
            }
            Command::Up => {
                self.editor.end_drag();
                None
            }
        };
        Ok(reply)
    }

    /// Drain notifications; re-render if any touched the active page.
    fn refresh(&mut self) -> Result<Option<String>, ShellError> {
        let active = self.editor.active_page();
        let changed = self
            .events
            .try_iter()
            .fold(false, |changed, event| changed | event.affects_page(active));
        if changed {
            Ok(Some(self.render()?))
        } else {
            Ok(None)
        }
    }

    /// The active page's shapes as JSON.
    pub fn render(&self) -> Result<String, ShellError> {
        let catalog = self.editor.catalog();
        let shapes: Vec<RenderedShape> = self
            .editor
            .project()
            .iter()
            .map(|instance| RenderedShape::from_instance(instance, catalog))
            .collect();
        Ok(serde_json::to_string_pretty(&shapes)?)
    }

    /// Extent of the visible set, for fitting the viewport.
    fn bounds_line(&self) -> String {
        match self.editor.project().bounds() {
            Some(rect) => format!(
                "bounds: ({}, {}) - ({}, {})",
                rect.x0, rect.y0, rect.x1, rect.y1
            ),
            None => "bounds: none".to_string(),
        }
    }

    fn catalog_listing(&self) -> String {
        self.editor
            .catalog()
            .templates()
            .map(|t| format!("  {:12} {:20} {}x{}", t.type_id, t.visual_ref, t.width, t.height))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn page_listing(&self) -> String {
        let active = self.editor.active_page();
        self.editor
            .pages()
            .iter()
            .enumerate()
            .map(|(i, page)| {
                let marker = if Some(page.id) == active { '*' } else { ' ' };
                let count = self.editor.list_by_page(page.id).count();
                format!("{} {:2} {} ({} shapes)", marker, i + 1, page.id, count)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A page by 1-based position or full id.
    fn resolve_page(&self, reference: &str) -> Result<PageId, ShellError> {
        let pages = self.editor.pages();
        let by_index = reference
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| pages.get(i));
        by_index
            .or_else(|| pages.iter().find(|page| page.id.to_string() == reference))
            .map(|page| page.id)
            .ok_or_else(|| ShellError::UnknownReference {
                kind: "page",
                reference: reference.to_string(),
            })
    }

    /// A shape on the active page by 1-based position, or any shape by full id.
    fn resolve_instance(&self, reference: &str) -> Result<InstanceId, ShellError> {
        let visible = self.editor.project();
        let by_index = reference
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| visible.iter().nth(i));
        by_index
            .or_else(|| self.editor.store().iter().find(|s| s.id().to_string() == reference))
            .map(|instance| instance.id())
            .ok_or_else(|| ShellError::UnknownReference {
                kind: "shape",
                reference: reference.to_string(),
            })
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(Editor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(shell: &mut Shell, line: &str) -> Option<String> {
        match shell.execute(line).unwrap() {
            Flow::Continue(output) => output,
            Flow::Quit => None,
        }
    }

    #[test]
    fn test_add_prints_view() {
        let mut shell = Shell::default();
        let output = run(&mut shell, "add Resistor").unwrap();
        assert!(output.contains("\"visual_ref\": \"#ResistorSymbol\""));
        assert!(output.contains("\"transform\": \"rotate(0 130 110)\""));
    }

    #[test]
    fn test_drag_session() {
        let mut shell = Shell::default();
        run(&mut shell, "add Capacitor");
        run(&mut shell, "down 130 130");
        run(&mut shell, "move 140 140");
        run(&mut shell, "up");

        let instance = shell.editor().project().iter().next().unwrap().clone();
        assert_eq!(instance.position, kurbo::Point::new(110.0, 110.0));
        assert!(shell.editor().dragging().is_none());
    }

    #[test]
    fn test_down_outside_shape_misses() {
        let mut shell = Shell::default();
        run(&mut shell, "add Capacitor");
        assert!(matches!(
            shell.execute("down 150 150"),
            Err(ShellError::Canvas(CanvasError::InvalidReference(_)))
        ));
        assert!(shell.editor().dragging().is_none());
    }

    #[test]
    fn test_show_reports_bounds() {
        let mut shell = Shell::default();
        let empty = run(&mut shell, "show").unwrap();
        assert!(empty.ends_with("bounds: none"));

        run(&mut shell, "add Resistor");
        run(&mut shell, "add Capacitor");
        let output = run(&mut shell, "show").unwrap();
        assert!(output.ends_with("bounds: (100, 100) - (160, 140)"));
    }

    #[test]
    fn test_switching_to_empty_page() {
        let mut shell = Shell::default();
        run(&mut shell, "add Inductor");
        run(&mut shell, "add-page");
        let output = run(&mut shell, "page 2").unwrap();
        assert_eq!(output, "[]");
    }

    #[test]
    fn test_rotate_by_position() {
        let mut shell = Shell::default();
        run(&mut shell, "add Resistor");
        let output = run(&mut shell, "rotate 1").unwrap();
        assert!(output.starts_with("rotated to 90"));
    }

    #[test]
    fn test_errors_are_reported() {
        let mut shell = Shell::default();
        assert!(matches!(
            shell.execute("add Transistor"),
            Err(ShellError::Canvas(CanvasError::UnknownShapeType(_)))
        ));
        assert!(matches!(
            shell.execute("page 7"),
            Err(ShellError::UnknownReference { kind: "page", .. })
        ));
        assert!(matches!(shell.execute("down 0 0"), Err(ShellError::Canvas(_))));
        assert!(matches!(shell.execute("jump"), Err(ShellError::Parse(_))));
    }

    #[test]
    fn test_quit() {
        let mut shell = Shell::default();
        assert_eq!(shell.execute("quit").unwrap(), Flow::Quit);
    }
}
