// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_paginator --heading-base-level=0

//! Understory Paginator: discrete page snapping for free-scrolling surfaces.
//!
//! This crate turns drag, flick and wheel input on a scrollable surface into
//! navigation between `N` ordered page slots. Each gesture is locked to one
//! axis on its first move: horizontal gestures page between slots, vertical
//! gestures scroll freely inside the current slot and spring back when pulled
//! past its top.
//!
//! The core pieces are:
//!
//! - [`AxisLock`] and [`GestureTracker`]: per-gesture axis resolution and the
//!   per-slot drag bookkeeping ([`SlotState`]) used for vertical scrolling.
//! - [`PageIndexState`]: the authoritative page index and count, with observers
//!   that learn whether a change came from the UI or from a navigation call
//!   ([`ChangeSource`]).
//! - [`compute_stage`]: the visibility window of slots kept realized around the
//!   current page when memory optimization is enabled.
//! - [`TransitionController`]: maps offsets to immediate translations or timed
//!   transitions on the host.
//! - [`Paginator`]: ties these together behind host hooks and the `next`,
//!   `prev` and `scroll_to_index` operations.
//!
//! This crate deliberately does **not** know about any particular UI framework.
//! Hosts implement [`PagedSurface`] to expose page nodes, layout positions,
//! transforms and an animation engine, and forward their pointer and lifecycle
//! events to the paginator's `on_*` hooks. Each gesture hook returns a
//! [`Propagation`] saying whether the host's own default handling should run.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_paginator::{
//!     OffsetTarget, PagedSurface, Paginator, PaginatorConfig, Phase, Transition,
//! };
//!
//! /// Three 100px-wide pages laid out side by side.
//! #[derive(Default)]
//! struct Strip {
//!     scroll: Point,
//!     animations: Vec<Transition>,
//! }
//!
//! impl PagedSurface for Strip {
//!     type Node = usize;
//!
//!     fn page_nodes(&self, _selector: Option<&str>) -> Vec<usize> {
//!         vec![0, 1, 2]
//!     }
//!     fn scroll_position(&self) -> Point {
//!         self.scroll
//!     }
//!     fn node_position(&self, node: &usize) -> Point {
//!         Point::new(*node as f64 * 100.0, 0.0)
//!     }
//!     fn set_translation(&mut self, target: &OffsetTarget<usize>, translation: Vec2) {
//!         if let OffsetTarget::Content = target {
//!             self.scroll.x = -translation.x;
//!         }
//!     }
//!     fn start_transition(&mut self, _target: &OffsetTarget<usize>, transition: &Transition) {
//!         self.animations.push(*transition);
//!     }
//!     fn set_node_hidden(&mut self, _node: &usize, _hidden: bool) {}
//! }
//!
//! let mut strip = Strip::default();
//! let mut pages = Paginator::new(PaginatorConfig::default());
//! pages.on_render(&mut strip);
//! assert_eq!(pages.total(), 3);
//!
//! // Drag left by 60px: the content follows the pointer...
//! let _ = pages.on_move_start(&mut strip, Point::new(200.0, 50.0));
//! assert!(pages.on_move(&mut strip, Point::new(140.0, 52.0)).is_handled());
//! assert_eq!(strip.scroll.x, 60.0);
//!
//! // ...and on release it settles on the next page.
//! let _ = pages.on_move_end(&mut strip, Point::new(140.0, 52.0));
//! assert_eq!(pages.index(), 1);
//! assert_eq!(strip.animations.last().map(|t| t.offset), Some(100.0));
//! assert_eq!(pages.phase(), Phase::Settling { target: 1 });
//!
//! // The host's animation engine reports completion.
//! pages.on_transition_end(&mut strip, &OffsetTarget::Content);
//! assert_eq!(pages.phase(), Phase::Idle);
//! ```
//!
//! ## Memory optimization
//!
//! With [`PaginatorConfig::optimize_memory`] enabled, only the slots inside the
//! [`Stage`] around the current page stay displayed; the rest are hidden on the
//! host through [`PagedSurface::set_node_hidden`] and their node references are
//! released. The window keeps its full `2 * padding + 1` width near either end
//! of the page set by sliding rather than shrinking.
//!
//! ## Logging
//!
//! Navigation decisions, phase changes and skipped work are reported through
//! [`tracing`] at `debug` level; per-sample gesture events at `trace` level.
//! The crate installs no subscriber.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod axis;
mod config;
mod gesture;
mod index;
mod paginator;
mod stage;
mod surface;
mod transition;

pub use axis::{Axis, AxisLock};
pub use config::{PaginatorConfig, SNAP_BACK_DURATION, WheelDirection};
pub use gesture::{EndAction, GestureTracker, MoveAction, SlotState};
pub use index::{ChangeSource, IndexChange, IndexListener, ListenerId, PageIndexState};
pub use paginator::{Paginator, Phase, Propagation, ScrollOutcome, SkipReason};
pub use stage::{Stage, apply_stage, compute_stage};
pub use surface::PagedSurface;
pub use transition::{
    Easing, OffsetOutcome, OffsetRequest, OffsetTarget, Transition, TransitionController,
    TransitionSpec, UnknownEasing, translation,
};
