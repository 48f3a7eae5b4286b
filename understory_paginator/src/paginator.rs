// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paginator: gesture hooks, navigation, and page-level state machine.
//!
//! [`Paginator`] owns all per-instance state (page index, page nodes, per-slot
//! drag state, the in-flight gesture and the pending transition). The host
//! forwards its events to the `on_*` hooks, passing itself as the
//! [`PagedSurface`]; each gesture hook returns a [`Propagation`] telling the
//! host whether to run its own default handling.
//!
//! Phases:
//!
//! - [`Phase::Idle`] → [`Phase::Dragging`] on the first move with a resolved axis.
//! - [`Phase::Dragging`] → [`Phase::Settling`] when the gesture ends in a page
//!   change or an over-pull snap-back that animates.
//! - [`Phase::Settling`] → [`Phase::Idle`] once no transition is pending: the
//!   host has reported the end of every transition it was handed, or the end
//!   of the scroll. Immediate (zero-duration) writes never enter `Settling`.
//!
//! A gesture that starts while settling does not cancel the transitions in
//! flight; when it ends without starting its own, the phase returns to
//! `Settling` rather than `Idle`.
//!
//! While not idle, `next`/`prev` requested from outside the in-flight gesture
//! are blocked (see [`PaginatorConfig::gate_navigation`]).

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Point;

use crate::axis::{Axis, AxisLock};
use crate::config::PaginatorConfig;
use crate::gesture::{EndAction, GestureTracker, MoveAction, SlotState};
use crate::index::{ChangeSource, IndexChange, ListenerId, PageIndexState};
use crate::stage::{Stage, apply_stage, compute_stage};
use crate::surface::PagedSurface;
use crate::transition::{Easing, OffsetOutcome, OffsetRequest, OffsetTarget, TransitionController};

/// Page-level interaction phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// No gesture or animation in flight.
    #[default]
    Idle,
    /// A gesture with a resolved axis is in flight.
    Dragging(Axis),
    /// An animated transition toward `target` is in flight.
    Settling {
        /// Slot the transition settles on.
        target: usize,
    },
}

/// Whether the host should continue with its own default handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Propagation {
    /// The paginator handled the event; skip the host default.
    Handled,
    /// Let the host run its default handling.
    Continue,
}

impl Propagation {
    /// Returns `true` for [`Propagation::Handled`].
    #[must_use]
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// Why a navigation request did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The page set is empty.
    NoPages,
    /// The last gesture did not move along the paging axis.
    NoMovement,
    /// No page slot exists at the requested index.
    NoSlot,
    /// The surface is already at the requested offset.
    Redundant,
    /// A gesture or animation is in flight.
    Blocked,
    /// The index change came from the UI, which already positioned the surface.
    UiSourced,
}

/// Result of a navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum ScrollOutcome {
    /// An offset was issued toward `index`.
    Scrolled {
        /// Target slot.
        index: usize,
        /// Whether a timed transition was started.
        animated: bool,
    },
    /// Nothing was issued.
    Skipped(SkipReason),
}

impl ScrollOutcome {
    /// Returns `true` when an offset was issued.
    #[must_use]
    pub fn is_scrolled(self) -> bool {
        matches!(self, Self::Scrolled { .. })
    }
}

/// Discrete page navigation on top of a free-scrolling surface.
#[derive(Debug)]
pub struct Paginator<N> {
    config: PaginatorConfig,
    pages: PageIndexState,
    nodes: Vec<N>,
    slots: Vec<SlotState<N>>,
    gesture: GestureTracker,
    transitions: TransitionController<N>,
    phase: Phase,
}

impl<N: Clone + PartialEq + core::fmt::Debug> Paginator<N> {
    /// Creates a paginator. Pages are discovered on [`Paginator::on_render`].
    #[must_use]
    pub fn new(config: PaginatorConfig) -> Self {
        let transitions = TransitionController::new(config.transition);
        Self {
            config,
            pages: PageIndexState::new(),
            nodes: Vec::new(),
            slots: Vec::new(),
            gesture: GestureTracker::new(),
            transitions,
            phase: Phase::Idle,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// Current page, clamped into the page set.
    #[must_use]
    pub fn index(&self) -> usize {
        self.pages.index()
    }

    /// Last written page index, which may equal [`Paginator::total`] after
    /// `next` on the last page.
    #[must_use]
    pub fn raw_index(&self) -> usize {
        self.pages.raw_index()
    }

    /// Number of page slots at the last discovery.
    #[must_use]
    pub fn total(&self) -> usize {
        self.pages.total()
    }

    /// Current interaction phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` while navigation is not gated by an in-flight gesture or
    /// animation.
    #[must_use]
    pub fn is_ui_enabled(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Page nodes found at the last discovery.
    #[must_use]
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Per-slot drag state.
    #[must_use]
    pub fn slots(&self) -> &[SlotState<N>] {
        &self.slots
    }

    /// The in-flight gesture's descriptor, if any.
    #[must_use]
    pub fn gesture(&self) -> Option<&AxisLock> {
        self.gesture.active()
    }

    /// The most recently finished gesture's descriptor, if any.
    #[must_use]
    pub fn last_gesture(&self) -> Option<&AxisLock> {
        self.gesture.last()
    }

    /// The stage for the current index, whether or not it is being applied.
    #[must_use]
    pub fn stage(&self) -> Stage {
        compute_stage(self.pages.index(), self.pages.total(), self.config.padding)
    }

    /// Registers an index-change observer.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&IndexChange) + 'static,
    {
        self.pages.subscribe(listener)
    }

    /// Removes an index-change observer.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.pages.unsubscribe(id)
    }

    /// Host finished rendering: discover pages and allocate fresh slot state.
    pub fn on_render<S: PagedSurface<Node = N>>(&mut self, surface: &mut S) {
        self.nodes = surface.page_nodes(self.config.selector.as_deref());
        self.slots = self.nodes.iter().cloned().map(SlotState::with_node).collect();
        self.pages.set_total(self.nodes.len());
        tracing::debug!(total = self.nodes.len(), "pages discovered on render");
        surface.set_paged(true);
        self.optimize(surface);
    }

    /// Host dimensions changed: re-measure the page set.
    ///
    /// Slot state for surviving indices is kept.
    pub fn on_dimensions_changed<S: PagedSurface<Node = N>>(&mut self, surface: &mut S) {
        let nodes = surface.page_nodes(self.config.selector.as_deref());
        let before = self.pages.total();
        self.slots.truncate(nodes.len());
        for (slot, node) in self.slots.iter_mut().zip(&nodes) {
            if slot.is_bound() {
                slot.bind(node.clone());
            }
        }
        let existing = self.slots.len();
        self.slots.extend(nodes[existing..].iter().cloned().map(SlotState::with_node));
        self.nodes = nodes;
        self.pages.set_total(self.nodes.len());
        tracing::debug!(before, total = self.nodes.len(), "pages re-measured");
        if before != self.nodes.len() {
            self.optimize(surface);
        }
    }

    /// Host finished a scroll: the content surface has come to rest.
    ///
    /// Any content transition still awaited is dropped without calling
    /// [`PagedSurface::transition_ended`]. Slot transitions keep the paginator
    /// settling until they end.
    pub fn on_scroll_end<S: PagedSurface<Node = N>>(&mut self, _surface: &mut S) {
        if self.transitions.forget(&OffsetTarget::Content) {
            tracing::debug!("scroll ended before its transition reported");
        }
        self.release_if_settled();
    }

    /// The host's animation engine finished the transition on `target`.
    pub fn on_transition_end<S: PagedSurface<Node = N>>(
        &mut self,
        surface: &mut S,
        target: &OffsetTarget<N>,
    ) {
        if !self.transitions.complete(surface, target) {
            tracing::debug!(?target, "transition end with nothing pending");
        }
        self.release_if_settled();
    }

    /// Gesture start. Never prevents the host default.
    pub fn on_move_start<S: PagedSurface<Node = N>>(
        &mut self,
        surface: &mut S,
        pointer: Point,
    ) -> Propagation {
        let index = self.pages.index();
        let node = self.nodes.get(index).cloned();
        let slot = self.slots.get_mut(index);
        let slot = match (slot, node) {
            (Some(slot), Some(node)) => {
                slot.bind(node);
                Some(slot)
            }
            (slot, _) => slot,
        };
        self.gesture
            .begin(pointer, surface.scroll_position(), index, slot);
        Propagation::Continue
    }

    /// Gesture move: resolve the axis and apply the live offset.
    pub fn on_move<S: PagedSurface<Node = N>>(
        &mut self,
        surface: &mut S,
        pointer: Point,
    ) -> Propagation {
        let Some(slot_index) = self.gesture.active_slot() else {
            return Propagation::Continue;
        };
        let action = self.gesture.sample(pointer, self.slots.get_mut(slot_index));
        if let Some(axis) = self.gesture.active().and_then(AxisLock::axis) {
            self.set_phase(Phase::Dragging(axis));
        }

        match action {
            MoveAction::None => {}
            MoveAction::Vertical { slot, from, to } => {
                if let Some(state) = self.slots.get_mut(slot) {
                    if let Some(node) = state.node().cloned() {
                        let request =
                            OffsetRequest::immediate(OffsetTarget::Slot(node), Axis::Vertical, to);
                        let _ = self.transitions.apply(surface, &request, from);
                    }
                    state.set_scroll_y(to);
                }
            }
            MoveAction::Horizontal { scroll_x } => {
                let request =
                    OffsetRequest::immediate(OffsetTarget::Content, Axis::Horizontal, scroll_x);
                let current = surface.scroll_position().x;
                let _ = self.transitions.apply(surface, &request, current);
            }
        }
        Propagation::Handled
    }

    /// Gesture end: snap back, change page, or rest.
    pub fn on_move_end<S: PagedSurface<Node = N>>(
        &mut self,
        surface: &mut S,
        pointer: Point,
    ) -> Propagation {
        let Some(slot_index) = self.gesture.active_slot() else {
            return Propagation::Continue;
        };
        let action = self.gesture.finish(pointer, self.slots.get(slot_index));
        tracing::debug!(?action, slot = slot_index, "gesture ended");

        match action {
            EndAction::None | EndAction::Rest => self.settle_or_idle(),
            EndAction::SnapBack { slot } => self.snap_back(surface, slot),
            EndAction::Forward | EndAction::Backward => {
                let change = if action == EndAction::Forward {
                    self.pages.next(ChangeSource::Ui)
                } else {
                    self.pages.prev(ChangeSource::Ui)
                };
                match change {
                    Some(change) => {
                        let _ = self.react_to_change(surface, change);
                        // Past either end, settle back onto the nearest real page.
                        let target = self.pages.index();
                        let _ = self.scroll_to_index(surface, target, None, None);
                    }
                    None => self.settle_or_idle(),
                }
            }
        }
        Propagation::Handled
    }

    /// Flick: suppress the host's inertia unless the gesture is vertical.
    pub fn on_flick(&mut self, velocity: f64) -> Propagation {
        self.gesture.flick(velocity);
        match self.gesture.latest().and_then(AxisLock::axis) {
            Some(Axis::Vertical) => Propagation::Continue,
            _ => Propagation::Handled,
        }
    }

    /// Wheel input: one page per event when it happened inside the content
    /// surface.
    pub fn on_wheel<S: PagedSurface<Node = N>>(
        &mut self,
        surface: &mut S,
        delta: f64,
        inside_content: bool,
    ) -> Propagation {
        if !inside_content {
            return Propagation::Continue;
        }
        let outcome = if self.config.wheel_direction.is_forward(delta) {
            self.next(surface)
        } else {
            self.prev(surface)
        };
        tracing::debug!(delta, ?outcome, "wheel navigation");
        Propagation::Handled
    }

    /// Moves to the next page.
    ///
    /// The index is not clamped at the upper end here; past the last page the
    /// scroll finds no slot and does nothing.
    pub fn next<S: PagedSurface<Node = N>>(&mut self, surface: &mut S) -> ScrollOutcome {
        if self.is_gated() {
            return ScrollOutcome::Skipped(SkipReason::Blocked);
        }
        match self.pages.next(ChangeSource::Programmatic) {
            Some(change) => self.react_to_change(surface, change),
            None => ScrollOutcome::Skipped(SkipReason::NoPages),
        }
    }

    /// Moves to the previous page, stopping at the first.
    pub fn prev<S: PagedSurface<Node = N>>(&mut self, surface: &mut S) -> ScrollOutcome {
        if self.is_gated() {
            return ScrollOutcome::Skipped(SkipReason::Blocked);
        }
        match self.pages.prev(ChangeSource::Programmatic) {
            Some(change) => self.react_to_change(surface, change),
            None => ScrollOutcome::Skipped(SkipReason::NoPages),
        }
    }

    /// Writes the index (clamped) and scrolls to it.
    pub fn set_index<S: PagedSurface<Node = N>>(
        &mut self,
        surface: &mut S,
        index: usize,
    ) -> ScrollOutcome {
        let change = self.pages.set(index, ChangeSource::Programmatic);
        self.react_to_change(surface, change)
    }

    /// Records an index the host's own scrolling settled on.
    ///
    /// Observers are notified with [`ChangeSource::Ui`]; no scroll is issued.
    pub fn sync_index_from_ui<S: PagedSurface<Node = N>>(
        &mut self,
        surface: &mut S,
        index: usize,
    ) -> IndexChange {
        let change = self.pages.set(index, ChangeSource::Ui);
        let _ = self.react_to_change(surface, change);
        change
    }

    /// Alias of [`Paginator::scroll_to_index`].
    pub fn scroll_to<S: PagedSurface<Node = N>>(
        &mut self,
        surface: &mut S,
        index: usize,
        duration: Option<Duration>,
        easing: Option<Easing>,
    ) -> ScrollOutcome {
        self.scroll_to_index(surface, index, duration, easing)
    }

    /// Scrolls the content surface to the slot at `index`.
    ///
    /// `duration` and `easing` default to the configured transition. Does
    /// nothing when the last gesture did not move along the paging axis (a
    /// tap), when no slot exists at `index`, or when the surface is already
    /// there. The target slot is realized before the transition is issued.
    pub fn scroll_to_index<S: PagedSurface<Node = N>>(
        &mut self,
        surface: &mut S,
        index: usize,
        duration: Option<Duration>,
        easing: Option<Easing>,
    ) -> ScrollOutcome {
        let outcome = self.scroll_to_index_inner(surface, index, duration, easing);
        match outcome {
            ScrollOutcome::Scrolled { animated: true, .. } => {}
            _ => {
                if matches!(self.phase, Phase::Dragging(_)) {
                    self.settle_or_idle();
                } else {
                    self.release_if_settled();
                }
            }
        }
        if let ScrollOutcome::Skipped(reason) = outcome {
            tracing::debug!(index, ?reason, "scroll to index skipped");
        }
        outcome
    }

    fn scroll_to_index_inner<S: PagedSurface<Node = N>>(
        &mut self,
        surface: &mut S,
        index: usize,
        duration: Option<Duration>,
        easing: Option<Easing>,
    ) -> ScrollOutcome {
        if self.pages.is_empty() {
            return ScrollOutcome::Skipped(SkipReason::NoPages);
        }
        let axis = self.config.paging_axis;
        if self
            .gesture
            .last()
            .is_some_and(|last| last.delta_along(axis) == 0.0)
        {
            return ScrollOutcome::Skipped(SkipReason::NoMovement);
        }
        let Some(node) = self.nodes.get(index).cloned() else {
            return ScrollOutcome::Skipped(SkipReason::NoSlot);
        };

        if let Some(slot) = self.slots.get_mut(index)
            && !slot.is_bound()
        {
            surface.set_node_hidden(&node, false);
            slot.bind(node.clone());
        }

        let defaults = self.transitions.defaults();
        let duration = duration.unwrap_or(defaults.duration);
        let easing = easing.unwrap_or(defaults.easing);
        let destination = axis.of_point(surface.node_position(&node));
        let current = axis.of_point(surface.scroll_position());
        let request = OffsetRequest::immediate(OffsetTarget::Content, axis, destination)
            .animated(duration, easing);

        match self.transitions.apply(surface, &request, current) {
            OffsetOutcome::Skipped => ScrollOutcome::Skipped(SkipReason::Redundant),
            OffsetOutcome::Applied => ScrollOutcome::Scrolled {
                index,
                animated: false,
            },
            OffsetOutcome::Animating => {
                self.set_phase(Phase::Settling { target: index });
                ScrollOutcome::Scrolled {
                    index,
                    animated: true,
                }
            }
        }
    }

    /// Reaction to every index write: refresh the stage and, unless the
    /// change came from the UI, scroll to the new index.
    fn react_to_change<S: PagedSurface<Node = N>>(
        &mut self,
        surface: &mut S,
        change: IndexChange,
    ) -> ScrollOutcome {
        self.optimize(surface);
        match change.source {
            ChangeSource::Ui => ScrollOutcome::Skipped(SkipReason::UiSourced),
            ChangeSource::Programmatic => self.scroll_to_index(surface, change.new, None, None),
        }
    }

    fn snap_back<S: PagedSurface<Node = N>>(&mut self, surface: &mut S, slot: usize) {
        let mut outcome = OffsetOutcome::Skipped;
        if let Some(state) = self.slots.get_mut(slot) {
            let from = state.scroll_y();
            state.set_scroll_y(0.0);
            if let Some(node) = state.node().cloned() {
                let request =
                    OffsetRequest::immediate(OffsetTarget::Slot(node), Axis::Vertical, 0.0)
                        .animated(self.config.snap_back_duration, self.transitions.defaults().easing);
                outcome = self.transitions.apply(surface, &request, from);
            }
        }
        if outcome == OffsetOutcome::Animating {
            self.set_phase(Phase::Settling { target: slot });
        } else {
            self.settle_or_idle();
        }
    }

    /// Applies the stage when memory optimization is on. Returns whether it ran.
    fn optimize<S: PagedSurface<Node = N>>(&mut self, surface: &mut S) -> bool {
        if !self.config.optimize_memory {
            return false;
        }
        let stage = self.stage();
        apply_stage(&stage, &mut self.slots, &self.nodes, surface);
        true
    }

    /// Leaves a gesture: back to `Idle`, or to `Settling` while transitions
    /// started earlier are still running.
    fn settle_or_idle(&mut self) {
        if !self.transitions.is_pending() {
            self.set_phase(Phase::Idle);
        } else if !matches!(self.phase, Phase::Settling { .. }) {
            self.set_phase(Phase::Settling {
                target: self.pages.index(),
            });
        }
    }

    fn release_if_settled(&mut self) {
        if matches!(self.phase, Phase::Settling { .. }) && !self.transitions.is_pending() {
            self.set_phase(Phase::Idle);
        }
    }

    fn is_gated(&self) -> bool {
        let gated = self.config.gate_navigation && !self.is_ui_enabled();
        if gated {
            tracing::debug!(phase = ?self.phase, "navigation blocked while busy");
        }
        gated
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "phase change");
            self.phase = phase;
        }
    }
}
