//! Shape store: every placed shape instance across all pages.

use crate::catalog::ShapeCatalog;
use crate::error::{CanvasError, CanvasResult};
use crate::pages::{PageId, PageRegistry};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a placed shape instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub Uuid);

impl InstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One placed occurrence of a catalog template on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeInstance {
    pub(crate) id: InstanceId,
    /// Catalog type name.
    pub type_id: String,
    /// Top-left anchor before rotation.
    pub position: Point,
    /// Width copied from the template.
    pub width: f64,
    /// Height copied from the template.
    pub height: f64,
    /// Owning page.
    pub page_id: PageId,
    /// Rotation about the center, always one of 0, 90, 180, 270.
    pub rotation_degrees: u16,
}

impl ShapeInstance {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Unrotated rectangle occupied by the instance.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Rotation pivot.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }
}

/// Owns all shape instances, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    instances: HashMap<InstanceId, ShapeInstance>,
    /// Insertion order (oldest first).
    order: Vec<InstanceId>,
}

impl ShapeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate a catalog template on a page at `placement`.
    ///
    /// Nothing is stored unless both the type and the page resolve.
    pub fn add_instance(
        &mut self,
        catalog: &dyn ShapeCatalog,
        pages: &PageRegistry,
        type_id: &str,
        page_id: PageId,
        placement: Point,
    ) -> CanvasResult<InstanceId> {
        let template = catalog
            .lookup(type_id)
            .ok_or_else(|| CanvasError::UnknownShapeType(type_id.to_string()))?;
        if !pages.contains(page_id) {
            return Err(CanvasError::InvalidReference(format!("page {}", page_id)));
        }

        let id = InstanceId::new();
        self.order.push(id);
        self.instances.insert(
            id,
            ShapeInstance {
                id,
                type_id: template.type_id.clone(),
                position: placement,
                width: template.width,
                height: template.height,
                page_id,
                rotation_degrees: 0,
            },
        );
        Ok(id)
    }

    /// Delete an instance. Missing ids are ignored.
    pub fn remove_instance(&mut self, id: InstanceId) -> Option<ShapeInstance> {
        let removed = self.instances.remove(&id)?;
        self.order.retain(|&other| other != id);
        Some(removed)
    }

    /// Delete every instance on a page, returning their ids in insertion order.
    pub fn remove_page_instances(&mut self, page_id: PageId) -> Vec<InstanceId> {
        let removed: Vec<InstanceId> = self.list_by_page(page_id).map(|s| s.id).collect();
        for id in &removed {
            self.instances.remove(id);
        }
        self.order.retain(|id| self.instances.contains_key(id));
        removed
    }

    /// Get an instance by id.
    pub fn get_instance(&self, id: InstanceId) -> CanvasResult<&ShapeInstance> {
        self.instances.get(&id).ok_or(CanvasError::NotFound(id))
    }

    /// Mutable access for the drag and rotation controllers.
    pub(crate) fn get_instance_mut(&mut self, id: InstanceId) -> CanvasResult<&mut ShapeInstance> {
        self.instances.get_mut(&id).ok_or(CanvasError::NotFound(id))
    }

    /// Instances on a page in insertion order.
    pub fn list_by_page(
        &self,
        page_id: PageId,
    ) -> impl DoubleEndedIterator<Item = &ShapeInstance> + Clone + '_ {
        self.iter().filter(move |s| s.page_id == page_id)
    }

    /// All instances in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ShapeInstance> + Clone + '_ {
        self.order.iter().filter_map(|id| self.instances.get(id))
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
