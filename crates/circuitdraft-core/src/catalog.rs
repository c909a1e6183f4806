//! Shape catalog: immutable template definitions for placeable symbols.

use crate::error::{CanvasError, CanvasResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Immutable template for a shape type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeTemplate {
    /// Shape type name (e.g. "Resistor").
    pub type_id: String,
    /// Reference to the symbol the renderer draws (e.g. "#ResistorSymbol").
    pub visual_ref: String,
    /// Intrinsic width.
    pub width: f64,
    /// Intrinsic height.
    pub height: f64,
}

impl ShapeTemplate {
    pub fn new(
        type_id: impl Into<String>,
        visual_ref: impl Into<String>,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            type_id: type_id.into(),
            visual_ref: visual_ref.into(),
            width,
            height,
        }
    }
}

/// Read-only registry of shape templates keyed by type name.
pub trait ShapeCatalog {
    /// Look up a template by its type name.
    fn lookup(&self, type_id: &str) -> Option<&ShapeTemplate>;
}

/// Catalog backed by an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    templates: HashMap<String, ShapeTemplate>,
    /// Type names in registration order (for palettes).
    order: Vec<String>,
}

impl StaticCatalog {
    /// Symbol sizes for the built-in circuit components.
    pub const RESISTOR_SIZE: (f64, f64) = (60.0, 20.0);
    pub const CAPACITOR_SIZE: (f64, f64) = (40.0, 40.0);
    pub const INDUCTOR_SIZE: (f64, f64) = (80.0, 20.0);

    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the fundamental circuit symbols.
    pub fn circuit_symbols() -> Self {
        let mut catalog = Self::new();
        for (name, (width, height)) in [
            ("Resistor", Self::RESISTOR_SIZE),
            ("Capacitor", Self::CAPACITOR_SIZE),
            ("Inductor", Self::INDUCTOR_SIZE),
        ] {
            catalog.register(ShapeTemplate::new(name, format!("#{}Symbol", name), width, height));
        }
        catalog
    }

    /// Parse a JSON array of templates.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let templates: Vec<ShapeTemplate> = serde_json::from_str(json)
            .map_err(|e| CanvasError::Config(format!("Invalid catalog: {}", e)))?;
        let mut catalog = Self::new();
        for template in templates {
            catalog.register(template);
        }
        Ok(catalog)
    }

    /// Load a JSON catalog file.
    pub fn load(path: &Path) -> CanvasResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            CanvasError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Add or replace a template. Replacing keeps the existing palette position.
    pub fn register(&mut self, template: ShapeTemplate) {
        if !self.templates.contains_key(&template.type_id) {
            self.order.push(template.type_id.clone());
        }
        self.templates.insert(template.type_id.clone(), template);
    }

    /// Merge another catalog into this one.
    pub fn extend(&mut self, other: StaticCatalog) {
        let StaticCatalog { mut templates, order } = other;
        for type_id in order {
            if let Some(template) = templates.remove(&type_id) {
                self.register(template);
            }
        }
    }

    /// Templates in registration order.
    pub fn templates(&self) -> impl Iterator<Item = &ShapeTemplate> {
        self.order.iter().filter_map(|id| self.templates.get(id))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl ShapeCatalog for StaticCatalog {
    fn lookup(&self, type_id: &str) -> Option<&ShapeTemplate> {
        self.templates.get(type_id)
    }
}
