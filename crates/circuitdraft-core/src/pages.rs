//! Page registry: the ordered set of pages and the active page pointer.

use crate::error::{CanvasError, CanvasResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(pub Uuid);

impl PageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A diagram page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
}

/// Owns the pages and tracks which one is active.
///
/// Exactly one page is active whenever at least one page exists.
#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    pages: Vec<Page>,
    active: Option<PageId>,
}

impl PageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new page. The first page ever added becomes active.
    pub fn add_page(&mut self) -> PageId {
        let id = PageId::new();
        self.pages.push(Page { id });
        if self.active.is_none() {
            self.active = Some(id);
        }
        id
    }

    /// Make an existing page the active one.
    pub fn set_active(&mut self, id: PageId) -> CanvasResult<()> {
        if !self.contains(id) {
            return Err(CanvasError::InvalidReference(format!("page {}", id)));
        }
        self.active = Some(id);
        Ok(())
    }

    /// Remove a page.
    ///
    /// If it was active, the page before it takes over, else the page after
    /// it, else nothing is active. Returns the active page after removal.
    pub fn remove_page(&mut self, id: PageId) -> CanvasResult<Option<PageId>> {
        let index = self
            .index_of(id)
            .ok_or_else(|| CanvasError::InvalidReference(format!("page {}", id)))?;
        self.pages.remove(index);

        if self.active == Some(id) {
            let successor = if index > 0 {
                self.pages.get(index - 1)
            } else {
                self.pages.first()
            };
            self.active = successor.map(|page| page.id);
        }
        Ok(self.active)
    }

    /// The active page, `None` only when the registry is empty.
    pub fn active(&self) -> Option<PageId> {
        self.active
    }

    pub fn contains(&self, id: PageId) -> bool {
        self.pages.iter().any(|page| page.id == id)
    }

    /// Position of a page in the ordered list.
    pub fn index_of(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|page| page.id == id)
    }

    /// Pages in creation order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
