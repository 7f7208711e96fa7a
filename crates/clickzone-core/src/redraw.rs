//! Redraw requests shared between the view and its components.

use std::cell::Cell;
use std::rc::Rc;

/// A cloneable handle used by components to ask the host for a new frame.
///
/// All clones point to the same flag. The view hands one to each component at
/// construction and the host drains it with [`Invalidator::take`].
#[derive(Debug, Clone, Default)]
pub struct Invalidator {
    requested: Rc<Cell<bool>>,
}

impl Invalidator {
    /// Create a new handle with no pending request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a redraw.
    pub fn invalidate(&self) {
        self.requested.set(true);
    }

    /// Return whether a redraw was pending and clear the request.
    pub fn take(&self) -> bool {
        self.requested.replace(false)
    }
}
