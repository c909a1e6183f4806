//! Editor state: the single owner of pages, shapes and gesture state.
//!
//! The rendering layer holds an `Editor`, issues operations on it and reads
//! projections back. It never touches page or shape records directly.

use crate::catalog::{ShapeCatalog, StaticCatalog};
use crate::config::EditorConfig;
use crate::drag::DragController;
use crate::error::{CanvasError, CanvasResult};
use crate::events::{CanvasEvent, EventSignal};
use crate::pages::{Page, PageId, PageRegistry};
use crate::projector::{self, Projection};
use crate::rotation;
use crate::store::{InstanceId, ShapeInstance, ShapeStore};
use kurbo::Point;
use std::sync::mpsc::Receiver;

/// Canvas editing session.
#[derive(Debug)]
pub struct Editor<C: ShapeCatalog = StaticCatalog> {
    config: EditorConfig,
    catalog: C,
    pages: PageRegistry,
    store: ShapeStore,
    drag: DragController,
    events: EventSignal,
}

impl Default for Editor<StaticCatalog> {
    fn default() -> Self {
        Self::new(EditorConfig::default(), StaticCatalog::circuit_symbols())
    }
}

impl<C: ShapeCatalog> Editor<C> {
    /// Create an editor. Starts with one active page if the config asks for it.
    pub fn new(config: EditorConfig, catalog: C) -> Self {
        let mut editor = Self {
            config,
            catalog,
            pages: PageRegistry::new(),
            store: ShapeStore::new(),
            drag: DragController::new(),
            events: EventSignal::new(),
        };
        if editor.config.create_initial_page {
            editor.pages.add_page();
        }
        editor
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&mut self) -> Receiver<CanvasEvent> {
        let rx = self.events.subscribe();
        log::debug!("Subscriber added ({} live)", self.events.subscriber_count());
        rx
    }

    /// Subscribers still listening as of the last emitted event.
    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    // --- Pages ---

    /// Append a page. The first page becomes active.
    pub fn add_page(&mut self) -> PageId {
        let was_active = self.pages.active();
        let id = self.pages.add_page();
        log::info!("Added page {} ({} total)", id, self.pages.len());

        self.events.emit(CanvasEvent::PageAdded(id));
        if self.pages.active() != was_active {
            self.events.emit(CanvasEvent::ActivePageChanged(self.pages.active()));
        }
        id
    }

    /// Switch the active page.
    pub fn set_active_page(&mut self, id: PageId) -> CanvasResult<()> {
        if let Err(e) = self.pages.set_active(id) {
            log::warn!("Cannot activate page: {}", e);
            return Err(e);
        }
        log::debug!("Active page is now {}", id);
        self.events.emit(CanvasEvent::ActivePageChanged(Some(id)));
        Ok(())
    }

    /// Remove a page and every instance on it.
    ///
    /// Returns the ids of the cascaded instances. A drag on one of them ends.
    pub fn remove_page(&mut self, id: PageId) -> CanvasResult<Vec<InstanceId>> {
        if !self.pages.contains(id) {
            let e = CanvasError::InvalidReference(format!("page {}", id));
            log::warn!("Cannot remove page: {}", e);
            return Err(e);
        }

        if let Some(dragged) = self.drag.dragging() {
            let on_page = self
                .store
                .get_instance(dragged)
                .map(|s| s.page_id == id)
                .unwrap_or(false);
            if on_page {
                self.end_drag();
            }
        }

        let was_active = self.pages.active();
        let removed_instances = self.store.remove_page_instances(id);
        let now_active = self.pages.remove_page(id)?;
        log::info!(
            "Removed page {} with {} shape(s)",
            id,
            removed_instances.len()
        );

        self.events.emit(CanvasEvent::PageRemoved {
            page: id,
            removed_instances: removed_instances.clone(),
        });
        if now_active != was_active {
            self.events.emit(CanvasEvent::ActivePageChanged(now_active));
        }
        Ok(removed_instances)
    }

    pub fn active_page(&self) -> Option<PageId> {
        self.pages.active()
    }

    /// Pages in creation order.
    pub fn pages(&self) -> &[Page] {
        self.pages.pages()
    }

    pub fn page_registry(&self) -> &PageRegistry {
        &self.pages
    }

    // --- Shapes ---

    /// Place a new instance of `type_id` on `page_id` at the default position.
    pub fn add_instance(&mut self, type_id: &str, page_id: PageId) -> CanvasResult<InstanceId> {
        let placement = self.config.default_placement;
        let id = self
            .store
            .add_instance(&self.catalog, &self.pages, type_id, page_id, placement)
            .inspect_err(|e| log::warn!("Cannot add shape: {}", e))?;
        log::debug!("Added {} {} on page {}", type_id, id, page_id);

        self.events.emit(CanvasEvent::InstanceAdded(id));
        Ok(id)
    }

    /// Place a new instance on the active page.
    pub fn add_to_active_page(&mut self, type_id: &str) -> CanvasResult<InstanceId> {
        let page = self
            .pages
            .active()
            .ok_or_else(|| CanvasError::InvalidReference("no active page".to_string()))?;
        self.add_instance(type_id, page)
    }

    /// Remove an instance. Missing ids are ignored; returns whether anything was removed.
    pub fn remove_instance(&mut self, id: InstanceId) -> bool {
        if self.drag.dragging() == Some(id) {
            self.end_drag();
        }
        match self.store.remove_instance(id) {
            Some(_) => {
                log::debug!("Removed shape {}", id);
                self.events.emit(CanvasEvent::InstanceRemoved(id));
                true
            }
            None => false,
        }
    }

    pub fn get_instance(&self, id: InstanceId) -> CanvasResult<&ShapeInstance> {
        self.store.get_instance(id)
    }

    /// Instances on a page in insertion order.
    pub fn list_by_page(
        &self,
        page_id: PageId,
    ) -> impl DoubleEndedIterator<Item = &ShapeInstance> + Clone + '_ {
        self.store.list_by_page(page_id)
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    // --- Gestures ---

    /// Grab an instance at the given pointer position.
    pub fn begin_drag(&mut self, id: InstanceId, pointer: Point) -> CanvasResult<()> {
        self.drag
            .begin(&self.store, id, pointer)
            .inspect_err(|e| log::warn!("Cannot begin drag: {}", e))?;
        self.events.emit(CanvasEvent::DragStarted(id));
        Ok(())
    }

    /// Grab whatever visible instance lies under the pointer.
    pub fn begin_drag_at(&mut self, pointer: Point) -> CanvasResult<InstanceId> {
        let id = self
            .instance_at(pointer)
            .map(|s| s.id())
            .ok_or_else(|| {
                CanvasError::InvalidReference(format!("no shape at ({}, {})", pointer.x, pointer.y))
            })?;
        self.begin_drag(id, pointer)?;
        Ok(id)
    }

    /// Pointer moved. Ignored when no drag is in progress.
    pub fn update_drag(&mut self, pointer: Point) -> Option<Point> {
        let (id, position) = self.drag.update(&mut self.store, pointer)?;
        self.events.emit(CanvasEvent::InstanceMoved { id, position });
        Some(position)
    }

    /// Pointer released (or left the surface).
    pub fn end_drag(&mut self) {
        if let Some(id) = self.drag.end() {
            self.events.emit(CanvasEvent::DragEnded(id));
        }
    }

    pub fn dragging(&self) -> Option<InstanceId> {
        self.drag.dragging()
    }

    /// Rotate an instance a quarter turn clockwise.
    pub fn rotate(&mut self, id: InstanceId) -> CanvasResult<u16> {
        let degrees = rotation::rotate(&mut self.store, id)
            .inspect_err(|e| log::warn!("Cannot rotate: {}", e))?;
        self.events.emit(CanvasEvent::InstanceRotated { id, degrees });
        Ok(degrees)
    }

    // --- Queries ---

    /// The visible set for the active page.
    pub fn project(&self) -> Projection<'_> {
        projector::project(&self.store, self.pages.active())
    }

    /// Topmost visible instance under a canvas point.
    pub fn instance_at(&self, point: Point) -> Option<&ShapeInstance> {
        self.project().instance_at(point, self.config.hit_tolerance)
    }
}
