// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture axis tracker: axis lock plus per-slot drag bookkeeping.
//!
//! ## Usage
//!
//! 1) On pointer down, call [`GestureTracker::begin`] with the pointer position,
//!    the host scroll position and the slot the gesture starts on.
//! 2) On each move, call [`GestureTracker::sample`]; the returned [`MoveAction`]
//!    says which live offset to apply.
//! 3) On pointer up, call [`GestureTracker::finish`]; the returned [`EndAction`]
//!    says whether to snap back, change page, or leave things as they are.
//!
//! The tracker never talks to the host itself. It only decides; the paginator
//! turns decisions into offsets and index writes.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_paginator::{EndAction, GestureTracker, MoveAction, SlotState};
//!
//! let mut slot = SlotState::<u32>::new();
//! let mut tracker = GestureTracker::new();
//!
//! tracker.begin(Point::new(50.0, 200.0), Point::ZERO, 0, Some(&mut slot));
//!
//! // Drag up by 30px: the slot scrolls forward by 30.
//! let action = tracker.sample(Point::new(52.0, 170.0), Some(&mut slot));
//! assert_eq!(action, MoveAction::Vertical { slot: 0, from: 0.0, to: 30.0 });
//! slot.set_scroll_y(30.0);
//!
//! // Releasing inside the slot keeps the free-form offset.
//! assert_eq!(tracker.finish(Point::new(52.0, 170.0), Some(&slot)), EndAction::Rest);
//! ```

use kurbo::Point;

use crate::axis::{Axis, AxisLock};

/// Drag bookkeeping for one page slot.
///
/// Created when pages are discovered. `node` is cleared while the slot is
/// hidden by the visibility window and rebound when it becomes visible again.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotState<N> {
    scroll_y: f64,
    prev_pointer_y: f64,
    node: Option<N>,
}

impl<N> Default for SlotState<N> {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            prev_pointer_y: 0.0,
            node: None,
        }
    }
}

impl<N> SlotState<N> {
    /// Creates a slot with no offset and no bound node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot bound to `node`.
    #[must_use]
    pub fn with_node(node: N) -> Self {
        Self {
            node: Some(node),
            ..Self::default()
        }
    }

    /// Last known vertical offset inside this slot.
    ///
    /// Negative while the user over-pulls past the slot's top.
    #[must_use]
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Stores the vertical offset inside this slot.
    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    /// Pointer Y at the last move sample.
    #[must_use]
    pub fn prev_pointer_y(&self) -> f64 {
        self.prev_pointer_y
    }

    /// The realized node for this slot, if any.
    #[must_use]
    pub fn node(&self) -> Option<&N> {
        self.node.as_ref()
    }

    /// Binds the realized node.
    pub fn bind(&mut self, node: N) {
        self.node = Some(node);
    }

    /// Clears the node reference, returning it.
    pub fn unbind(&mut self) -> Option<N> {
        self.node.take()
    }

    /// Returns `true` while a node is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.node.is_some()
    }
}

/// Live offset to apply for a move sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveAction {
    /// Nothing to apply (no gesture in flight).
    None,
    /// Scroll inside `slot` from `from` to `to` on the vertical axis.
    Vertical {
        /// Slot the gesture started on.
        slot: usize,
        /// The slot's offset before this sample.
        from: f64,
        /// The slot's offset after this sample.
        to: f64,
    },
    /// Move the shared content surface to `scroll_x`.
    Horizontal {
        /// Primary-axis scroll position for the content surface.
        scroll_x: f64,
    },
}

/// Decision taken when a gesture ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndAction {
    /// No gesture was in flight, or it did not move along its axis.
    None,
    /// Vertical gesture over-pulled `slot`; settle its offset back to zero.
    SnapBack {
        /// Slot to settle.
        slot: usize,
    },
    /// Vertical gesture within bounds; keep the free-form offset.
    Rest,
    /// Horizontal gesture toward the next page.
    Forward,
    /// Horizontal gesture toward the previous page.
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Active {
    lock: AxisLock,
    slot: usize,
}

/// Tracks the in-flight gesture and remembers the last completed one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureTracker {
    active: Option<Active>,
    last: Option<AxisLock>,
}

impl GestureTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a gesture on `slot_index`.
    ///
    /// Records the pointer Y on the slot so the first vertical sample yields an
    /// incremental delta. Starting a gesture while one is in flight replaces it.
    pub fn begin<N>(
        &mut self,
        pointer: Point,
        start_scroll: Point,
        slot_index: usize,
        slot: Option<&mut SlotState<N>>,
    ) {
        if let Some(slot) = slot {
            slot.prev_pointer_y = pointer.y;
        }
        self.active = Some(Active {
            lock: AxisLock::new(pointer, start_scroll),
            slot: slot_index,
        });
    }

    /// Processes a move sample.
    ///
    /// Resolves the axis on the first sample and keeps it for the rest of the
    /// gesture. Vertical samples accumulate against the slot's own offset; on
    /// the horizontal axis the content surface follows the total displacement.
    pub fn sample<N>(&mut self, pointer: Point, slot: Option<&mut SlotState<N>>) -> MoveAction {
        let Some(active) = self.active.as_mut() else {
            return MoveAction::None;
        };
        let axis = active.lock.resolve(pointer);
        active.lock.track(pointer);
        tracing::trace!(?axis, x = pointer.x, y = pointer.y, "gesture sample");

        match axis {
            Axis::Vertical => {
                let Some(slot) = slot else {
                    return MoveAction::None;
                };
                let delta = pointer.y - slot.prev_pointer_y;
                slot.prev_pointer_y = pointer.y;
                MoveAction::Vertical {
                    slot: active.slot,
                    from: slot.scroll_y,
                    to: slot.scroll_y - delta,
                }
            }
            Axis::Horizontal => MoveAction::Horizontal {
                scroll_x: active.lock.start_scroll().x - (pointer.x - active.lock.start().x),
            },
        }
    }

    /// Records the flick velocity on the in-flight gesture.
    pub fn flick(&mut self, velocity: f64) {
        if let Some(active) = self.active.as_mut() {
            active.lock.set_velocity(velocity);
        }
    }

    /// Ends the gesture and decides what should happen next.
    ///
    /// An unresolved gesture is resolved here with the usual rule, so a
    /// gesture without movement counts as horizontal.
    pub fn finish<N>(&mut self, pointer: Point, slot: Option<&SlotState<N>>) -> EndAction {
        let Some(mut active) = self.active.take() else {
            return EndAction::None;
        };
        active.lock.track(pointer);
        let axis = active.lock.resolve(pointer);
        self.last = Some(active.lock);

        match axis {
            Axis::Vertical => match slot {
                Some(slot) if slot.scroll_y < 0.0 => EndAction::SnapBack { slot: active.slot },
                _ => EndAction::Rest,
            },
            Axis::Horizontal => {
                let delta = active.lock.delta_along(Axis::Horizontal);
                if delta == 0.0 {
                    EndAction::None
                } else if active.lock.is_forward() {
                    EndAction::Forward
                } else {
                    EndAction::Backward
                }
            }
        }
    }

    /// The in-flight gesture's lock, if any.
    #[must_use]
    pub fn active(&self) -> Option<&AxisLock> {
        self.active.as_ref().map(|a| &a.lock)
    }

    /// Slot the in-flight gesture started on.
    #[must_use]
    pub fn active_slot(&self) -> Option<usize> {
        self.active.map(|a| a.slot)
    }

    /// The lock of the most recently finished gesture.
    #[must_use]
    pub fn last(&self) -> Option<&AxisLock> {
        self.last.as_ref()
    }

    /// The in-flight gesture if there is one, else the last finished gesture.
    #[must_use]
    pub fn latest(&self) -> Option<&AxisLock> {
        self.active().or(self.last.as_ref())
    }

    /// Returns `true` while a gesture is in flight.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }
}
