// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host scroll surface, seen from the paginator.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Vec2};

use crate::transition::{OffsetTarget, Transition};

/// Operations the paginator needs from the scroll surface it is attached to.
///
/// The host owns its node tree, physics and animation engine. It forwards
/// gesture and lifecycle events to [`Paginator`](crate::Paginator) hooks,
/// passing itself as the surface, and the paginator calls back into it to
/// query layout and write transforms.
pub trait PagedSurface {
    /// Handle to a page node. Cheap to clone; compared by identity.
    type Node: Clone + PartialEq + Debug;

    /// Page nodes inside the content surface, in order.
    ///
    /// With a selector, only matching descendants; without one, the content
    /// surface's direct children. Returns an empty list when nothing matches.
    fn page_nodes(&self, selector: Option<&str>) -> Vec<Self::Node>;

    /// Current scroll offsets on both axes.
    ///
    /// Expected to follow the translations written to the content surface,
    /// including completed transitions.
    fn scroll_position(&self) -> Point;

    /// Layout position (left, top) of `node` within the content surface.
    fn node_position(&self, node: &Self::Node) -> Point;

    /// Writes an immediate, non-animated translation on `target`.
    ///
    /// A transition still running on `target` is superseded; the paginator no
    /// longer waits for its end.
    fn set_translation(&mut self, target: &OffsetTarget<Self::Node>, translation: Vec2);

    /// Starts a timed transition on `target`.
    ///
    /// When it completes the host calls
    /// [`Paginator::on_transition_end`](crate::Paginator::on_transition_end)
    /// with the same `target`.
    /// Starting a transition on a target that is already animating replaces it.
    fn start_transition(&mut self, target: &OffsetTarget<Self::Node>, transition: &Transition);

    /// Removes `node` from (or restores it to) layout and paint, updating its
    /// hidden marker to match.
    fn set_node_hidden(&mut self, node: &Self::Node, hidden: bool);

    /// Marks the bounding surface as paged.
    fn set_paged(&mut self, _paged: bool) {}

    /// Runs the host's own transition-end bookkeeping for the content surface.
    fn transition_ended(&mut self) {}
}
