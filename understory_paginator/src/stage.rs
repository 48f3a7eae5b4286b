// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility window ("stage"): which page slots stay realized.
//!
//! The window is `2 * padding + 1` slots wide and tries to center on the
//! current index. Near either end of the page set it slides instead of
//! shrinking, so it keeps its full width whenever there are enough pages.
//!
//! ## Minimal example
//!
//! ```
//! use understory_paginator::compute_stage;
//!
//! let stage = compute_stage(9, 10, 1);
//! assert_eq!(stage.visible(), 7..10);
//! assert_eq!(stage.hidden().collect::<Vec<_>>(), (0..7).collect::<Vec<_>>());
//! ```

use core::iter::Chain;
use core::ops::Range;

use crate::gesture::SlotState;
use crate::surface::PagedSurface;

/// Partition of `0..total` into one visible range and the hidden rest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stage {
    visible: Range<usize>,
    total: usize,
}

impl Stage {
    /// Slots that must stay realized.
    #[must_use]
    pub fn visible(&self) -> Range<usize> {
        self.visible.clone()
    }

    /// Slots eligible for hiding, in ascending order.
    pub fn hidden(&self) -> Chain<Range<usize>, Range<usize>> {
        (0..self.visible.start).chain(self.visible.end..self.total)
    }

    /// Number of slots the stage was computed for.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` when `slot` is inside the visible range.
    #[must_use]
    pub fn is_visible(&self, slot: usize) -> bool {
        self.visible.contains(&slot)
    }
}

/// Computes the stage for `index` among `total` slots.
///
/// `index` may exceed `total`; the window then clamps to the last slots.
#[must_use]
pub fn compute_stage(index: usize, total: usize, padding: usize) -> Stage {
    let width = padding.saturating_mul(2).saturating_add(1);
    let mut start = index.saturating_sub(padding);
    let end = start.saturating_add(width);
    if end > total {
        start = start.saturating_sub(end - total);
    }
    let visible = start.min(total)..start.saturating_add(width).min(total);
    Stage { visible, total }
}

/// Applies `stage` to the slots and the host.
///
/// Slots entering the hidden set are hidden on the host and unbound; slots in
/// the visible range are shown and rebound to their page node. Slots already
/// in the requested state are left alone, so re-applying a stage is a no-op.
/// Returns how many slots changed state.
pub fn apply_stage<S: PagedSurface>(
    stage: &Stage,
    slots: &mut [SlotState<S::Node>],
    pages: &[S::Node],
    surface: &mut S,
) -> usize {
    let mut changed = 0;
    for slot in stage.hidden() {
        let Some(state) = slots.get_mut(slot) else {
            continue;
        };
        if let Some(node) = state.unbind() {
            surface.set_node_hidden(&node, true);
            changed += 1;
        }
    }
    for slot in stage.visible() {
        let (Some(state), Some(node)) = (slots.get_mut(slot), pages.get(slot)) else {
            continue;
        };
        if !state.is_bound() {
            surface.set_node_hidden(node, false);
            state.bind(node.clone());
            changed += 1;
        }
    }
    tracing::debug!(
        visible_start = stage.visible.start,
        visible_end = stage.visible.end,
        total = stage.total,
        changed,
        "stage applied"
    );
    changed
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Vec2};

    use super::*;
    use crate::transition::{OffsetTarget, Transition};

    /// Records display toggles only.
    #[derive(Default)]
    struct Toggles {
        calls: Vec<(u8, bool)>,
    }

    impl PagedSurface for Toggles {
        type Node = u8;

        fn page_nodes(&self, _selector: Option<&str>) -> Vec<u8> {
            Vec::new()
        }
        fn scroll_position(&self) -> Point {
            Point::ZERO
        }
        fn node_position(&self, _node: &u8) -> Point {
            Point::ZERO
        }
        fn set_translation(&mut self, _target: &OffsetTarget<u8>, _translation: Vec2) {}
        fn start_transition(&mut self, _target: &OffsetTarget<u8>, _transition: &Transition) {}
        fn set_node_hidden(&mut self, node: &u8, hidden: bool) {
            self.calls.push((*node, hidden));
        }
    }

    fn bound_slots(count: u8) -> (Vec<u8>, Vec<SlotState<u8>>) {
        let nodes: Vec<u8> = (0..count).collect();
        let slots = nodes.iter().copied().map(SlotState::with_node).collect();
        (nodes, slots)
    }

    fn hidden(stage: &Stage) -> Vec<usize> {
        stage.hidden().collect()
    }

    #[test]
    fn window_at_start() {
        let stage = compute_stage(0, 10, 1);
        assert_eq!(stage.visible(), 0..3);
        assert_eq!(hidden(&stage), (3..10).collect::<Vec<_>>());
    }

    #[test]
    fn window_slides_left_at_end() {
        let stage = compute_stage(9, 10, 1);
        assert_eq!(stage.visible(), 7..10);
        assert_eq!(hidden(&stage), (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn window_centers_in_the_middle() {
        let stage = compute_stage(5, 10, 2);
        assert_eq!(stage.visible(), 3..8);
        assert_eq!(hidden(&stage), [0, 1, 2, 8, 9]);
    }

    #[test]
    fn window_wider_than_total_shows_everything() {
        let stage = compute_stage(5, 3, 1);
        assert_eq!(stage.visible(), 0..3);
        assert!(hidden(&stage).is_empty());
    }

    #[test]
    fn zero_padding_shows_only_current() {
        let stage = compute_stage(4, 10, 0);
        assert_eq!(stage.visible(), 4..5);
        assert!(stage.is_visible(4));
        assert!(!stage.is_visible(5));
    }

    #[test]
    fn empty_page_set() {
        let stage = compute_stage(0, 0, 1);
        assert_eq!(stage.visible(), 0..0);
        assert!(hidden(&stage).is_empty());
    }

    #[test]
    fn out_of_range_index_clamps_to_tail() {
        let stage = compute_stage(10, 10, 1);
        assert_eq!(stage.visible(), 7..10);
    }

    #[test]
    fn huge_padding_does_not_overflow() {
        let stage = compute_stage(3, 8, usize::MAX);
        assert_eq!(stage.visible(), 0..8);
    }

    #[test]
    fn reapplying_a_stage_is_a_no_op() {
        let (nodes, mut slots) = bound_slots(6);
        let mut surface = Toggles::default();
        let stage = compute_stage(4, 6, 1);

        assert_eq!(apply_stage(&stage, &mut slots, &nodes, &mut surface), 3);
        assert_eq!(surface.calls, [(0, true), (1, true), (2, true)]);

        surface.calls.clear();
        assert_eq!(apply_stage(&stage, &mut slots, &nodes, &mut surface), 0);
        assert!(surface.calls.is_empty(), "second apply touched the host: {:?}", surface.calls);

        let bound: Vec<bool> = slots.iter().map(SlotState::is_bound).collect();
        assert_eq!(bound, [false, false, false, true, true, true]);
    }

    #[test]
    fn moving_the_stage_hides_before_showing() {
        let (nodes, mut slots) = bound_slots(6);
        let mut surface = Toggles::default();
        let _ = apply_stage(&compute_stage(5, 6, 1), &mut slots, &nodes, &mut surface);
        surface.calls.clear();

        let changed = apply_stage(&compute_stage(0, 6, 1), &mut slots, &nodes, &mut surface);

        assert_eq!(changed, 6);
        assert_eq!(
            surface.calls,
            [(3, true), (4, true), (5, true), (0, false), (1, false), (2, false)]
        );
        assert_eq!(slots[0].node(), Some(&0));
    }
}
