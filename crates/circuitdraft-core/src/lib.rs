//! CircuitDraft Core Library
//!
//! In-memory canvas state for the CircuitDraft diagram editor: pages,
//! placed circuit symbols, drag and rotation gestures, and the projected
//! view of the active page.

pub mod catalog;
pub mod config;
pub mod drag;
pub mod editor;
pub mod error;
pub mod events;
pub mod geometry;
pub mod pages;
pub mod projector;
pub mod rotation;
pub mod store;

pub use catalog::{ShapeCatalog, ShapeTemplate, StaticCatalog};
pub use config::{EditorConfig, DEFAULT_PLACEMENT};
pub use drag::{DragController, DragState};
pub use editor::Editor;
pub use error::{CanvasError, CanvasResult};
pub use events::{CanvasEvent, EventSignal};
pub use geometry::{rotated_bounds, rotated_transform, RotatedTransform};
pub use pages::{Page, PageId, PageRegistry};
pub use projector::{project, Projection};
pub use rotation::ROTATION_STEP_DEGREES;
pub use store::{InstanceId, ShapeInstance, ShapeStore};
