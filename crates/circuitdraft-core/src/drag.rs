//! Drag controller: turns pointer gestures into position updates.
//!
//! The grab offset between the pointer and the shape anchor is captured when
//! the drag begins, so the shape keeps its grab point instead of jumping its
//! origin to the pointer on the first move.

use crate::error::{CanvasError, CanvasResult};
use crate::store::{InstanceId, ShapeStore};
use kurbo::{Point, Vec2};

/// State of the drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// One instance is tracking the pointer.
    Dragging {
        /// The instance being moved.
        instance_id: InstanceId,
        /// Pointer position minus the instance anchor at grab time.
        offset: Vec2,
    },
}

/// Tracks at most one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging an instance grabbed at `pointer`.
    ///
    /// A second gesture is rejected while one is in progress; the first
    /// one continues untouched.
    pub fn begin(
        &mut self,
        store: &ShapeStore,
        id: InstanceId,
        pointer: Point,
    ) -> CanvasResult<()> {
        if let DragState::Dragging { instance_id, .. } = self.state {
            return Err(CanvasError::AlreadyDragging(instance_id));
        }
        let anchor = store.get_instance(id)?.position;
        self.state = DragState::Dragging {
            instance_id: id,
            offset: pointer - anchor,
        };
        Ok(())
    }

    /// Move the dragged instance so its grab point follows `pointer`.
    ///
    /// Returns the instance and its new anchor, or `None` when idle. If the
    /// instance vanished mid-gesture the drag is dropped.
    pub fn update(
        &mut self,
        store: &mut ShapeStore,
        pointer: Point,
    ) -> Option<(InstanceId, Point)> {
        let DragState::Dragging { instance_id, offset } = self.state else {
            return None;
        };
        match store.get_instance_mut(instance_id) {
            Ok(instance) => {
                instance.position = pointer - offset;
                Some((instance_id, instance.position))
            }
            Err(_) => {
                self.state = DragState::Idle;
                None
            }
        }
    }

    /// Finish the gesture. Returns the instance that was being dragged, if any.
    pub fn end(&mut self) -> Option<InstanceId> {
        let dragged = self.dragging();
        self.state = DragState::Idle;
        dragged
    }

    /// The instance currently being dragged.
    pub fn dragging(&self) -> Option<InstanceId> {
        match self.state {
            DragState::Dragging { instance_id, .. } => Some(instance_id),
            DragState::Idle => None,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }
}
