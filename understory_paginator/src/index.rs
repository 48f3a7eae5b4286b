// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page index state: the authoritative current page and page count.
//!
//! Every write notifies observers, including writes of the value that is
//! already current. Each notification carries a [`ChangeSource`] so that a
//! listener which reacts by scrolling can skip changes that a scroll caused.
//!
//! The stored value is the raw index last written. [`PageIndexState::next`]
//! does not clamp at the upper end, so the raw value may reach `total`; reads
//! through [`PageIndexState::index`] are always clamped into range. Consumers
//! that map indices to slots treat a raw index `>= total` as having no target.
//!
//! ## Minimal example
//!
//! ```
//! use understory_paginator::{ChangeSource, PageIndexState};
//!
//! let mut pages = PageIndexState::new();
//! pages.set_total(3);
//!
//! let change = pages.set(7, ChangeSource::Programmatic);
//! assert_eq!(change.new, 2, "explicit writes clamp");
//!
//! pages.next(ChangeSource::Programmatic);
//! assert_eq!(pages.raw_index(), 3, "next does not clamp");
//! assert_eq!(pages.index(), 2);
//!
//! pages.prev(ChangeSource::Programmatic);
//! assert_eq!(pages.index(), 1);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Where an index write came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeSource {
    /// Driven by a navigation call (`next`, `prev`, `set_index`).
    Programmatic,
    /// Driven by direct UI interaction: a gesture or a host-side scroll.
    Ui,
}

/// Notification payload for an index write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexChange {
    /// Raw index before the write.
    pub old: usize,
    /// Raw index after the write.
    pub new: usize,
    /// Origin of the write.
    pub source: ChangeSource,
}

impl IndexChange {
    /// Returns `true` when the write re-confirmed the current value.
    #[must_use]
    pub fn is_same(&self) -> bool {
        self.old == self.new
    }
}

/// Handle returned by [`PageIndexState::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// Callback invoked on every index write.
pub type IndexListener = Box<dyn FnMut(&IndexChange)>;

/// Current page index and page count, with change observers.
#[derive(Default)]
pub struct PageIndexState {
    index: usize,
    total: usize,
    listeners: Vec<(ListenerId, IndexListener)>,
    next_listener: u32,
}

// Manual Debug impl since listeners aren't Debug
impl fmt::Debug for PageIndexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageIndexState")
            .field("index", &self.index)
            .field("total", &self.total)
            .field("listeners", &self.listeners.len())
            .field("next_listener", &self.next_listener)
            .finish()
    }
}

impl PageIndexState {
    /// Creates an empty state: no pages, index 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current index, clamped to `[0, total - 1]`, or 0 without pages.
    #[must_use]
    pub fn index(&self) -> usize {
        self.clamp(self.index)
    }

    /// The last written index, which `next` may have pushed to `total`.
    #[must_use]
    pub fn raw_index(&self) -> usize {
        self.index
    }

    /// Number of page slots.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` when there are no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Updates the page count. Forces the index to 0 when `total` is 0.
    ///
    /// This does not notify observers; the index value itself is unchanged
    /// unless the page set became empty.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        if total == 0 {
            self.index = 0;
        }
    }

    /// Writes a clamped index and notifies observers.
    pub fn set(&mut self, index: usize, source: ChangeSource) -> IndexChange {
        let clamped = self.clamp(index);
        self.write(clamped, source)
    }

    /// Writes `index() + 1` without clamping it to the page count.
    ///
    /// Returns `None` without writing when there are no pages.
    pub fn next(&mut self, source: ChangeSource) -> Option<IndexChange> {
        if self.is_empty() {
            return None;
        }
        let target = self.index() + 1;
        Some(self.write(target, source))
    }

    /// Writes `index() - 1`, saturating at 0.
    ///
    /// Returns `None` without writing when there are no pages.
    pub fn prev(&mut self, source: ChangeSource) -> Option<IndexChange> {
        if self.is_empty() {
            return None;
        }
        let target = self.index().saturating_sub(1);
        Some(self.write(target, source))
    }

    /// Registers a listener that runs on every write.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&IndexChange) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `true` if it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.total.saturating_sub(1))
    }

    fn write(&mut self, index: usize, source: ChangeSource) -> IndexChange {
        let change = IndexChange {
            old: self.index,
            new: index,
            source,
        };
        self.index = index;
        tracing::debug!(
            old = change.old,
            new = change.new,
            ?source,
            total = self.total,
            "page index write"
        );
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
        change
    }
}
