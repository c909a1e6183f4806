//! Canvas projector: the visible subset of shapes for the active page.
//!
//! A projection borrows the store and is rebuilt from scratch on every
//! query; it never caches or patches a previous view.

use crate::geometry;
use crate::pages::PageId;
use crate::store::{ShapeInstance, ShapeStore};
use kurbo::{Point, Rect};

/// Project the store onto the active page.
pub fn project(store: &ShapeStore, active_page: Option<PageId>) -> Projection<'_> {
    Projection { store, page: active_page }
}

/// Read-only view of the instances on one page.
#[derive(Debug, Clone, Copy)]
pub struct Projection<'a> {
    store: &'a ShapeStore,
    page: Option<PageId>,
}

impl<'a> Projection<'a> {
    /// The projected page (`None` when no page is active).
    pub fn page(&self) -> Option<PageId> {
        self.page
    }

    /// Visible instances in insertion order (back to front).
    ///
    /// Each call starts a fresh pass over the store.
    pub fn iter(self) -> impl DoubleEndedIterator<Item = &'a ShapeInstance> + Clone + 'a {
        let store = self.store;
        self.page
            .into_iter()
            .flat_map(move |page| store.list_by_page(page))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Topmost visible instance under a canvas point, honoring rotation.
    pub fn instance_at(&self, point: Point, tolerance: f64) -> Option<&'a ShapeInstance> {
        self.iter()
            .rev()
            .find(|instance| geometry::hit_test(instance, point, tolerance))
    }

    /// Bounding box of everything visible.
    pub fn bounds(&self) -> Option<Rect> {
        self.iter()
            .map(geometry::rotated_bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }

    /// Owned copy of the visible set, for consumers that outlive the borrow.
    pub fn to_vec(self) -> Vec<ShapeInstance> {
        self.iter().cloned().collect()
    }
}
