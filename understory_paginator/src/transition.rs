// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition controller: turns offsets into host transform commands.
//!
//! Offsets are scroll positions; the host receives the matching translation
//! (the negated offset along the locked axis). A zero duration writes the
//! translation immediately and is cheap enough for every pointer sample. A
//! positive duration asks the host's animation engine for a timed transition.
//!
//! Horizontal paging moves the host's own content surface, so when a
//! transition on [`OffsetTarget::Content`] completes the host's transition-end
//! bookkeeping is notified through [`PagedSurface::transition_ended`].
//! Vertical scrolling moves a slot node the host does not manage and needs no
//! such notification. Both kinds may be in flight at once; each completes on
//! its own.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use kurbo::Vec2;

use crate::axis::Axis;
use crate::surface::PagedSurface;

/// Timing curve for animated transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// CSS `ease`.
    Ease,
    /// CSS `ease-in`.
    EaseIn,
    /// CSS `ease-out`.
    #[default]
    EaseOut,
    /// CSS `ease-in-out`.
    EaseInOut,
}

impl Easing {
    /// Parses a CSS timing-function keyword.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Self::Linear),
            "ease" => Some(Self::Ease),
            "ease-in" => Some(Self::EaseIn),
            "ease-out" => Some(Self::EaseOut),
            "ease-in-out" => Some(Self::EaseInOut),
            _ => None,
        }
    }

    /// The CSS keyword for this curve.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }

    /// Cubic-bezier control points `(x1, y1, x2, y2)`.
    #[must_use]
    pub fn control_points(self) -> (f64, f64, f64, f64) {
        match self {
            Self::Linear => (0.0, 0.0, 1.0, 1.0),
            Self::Ease => (0.25, 0.1, 0.25, 1.0),
            Self::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => (0.42, 0.0, 0.58, 1.0),
        }
    }

    /// Eased progress for linear progress `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if matches!(self, Self::Linear) {
            return t;
        }
        let (x1, y1, x2, y2) = self.control_points();
        // x(s) is monotonic for all CSS keywords; bisect for s with x(s) == t.
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        let mut s = t;
        for _ in 0..48 {
            let x = cubic(x1, x2, s);
            if (x - t).abs() < 1e-9 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        cubic(y1, y2, s)
    }
}

fn cubic(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown easing keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownEasing;

impl fmt::Display for UnknownEasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown easing keyword")
    }
}

impl core::error::Error for UnknownEasing {}

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or(UnknownEasing)
    }
}

/// Duration and easing used when a caller does not pick their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionSpec {
    /// Animation length.
    pub duration: Duration,
    /// Timing curve.
    pub easing: Easing,
}

impl TransitionSpec {
    /// Default page transition: 300 ms, ease-out.
    pub const DEFAULT: Self = Self {
        duration: Duration::from_millis(300),
        easing: Easing::EaseOut,
    };
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Which node an offset command moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OffsetTarget<N> {
    /// The host's shared content surface (horizontal paging).
    Content,
    /// A single page slot's node (vertical scrolling within a slot).
    Slot(N),
}

/// A timed transform handed to the host's animation engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Axis being animated.
    pub axis: Axis,
    /// Destination scroll offset along `axis`.
    pub offset: f64,
    /// Animation length.
    pub duration: Duration,
    /// Timing curve.
    pub easing: Easing,
}

impl Transition {
    /// The translation matching [`Transition::offset`].
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        translation(self.axis, self.offset)
    }
}

/// Translation that shows scroll offset `offset` along `axis`.
#[must_use]
pub fn translation(axis: Axis, offset: f64) -> Vec2 {
    axis.vec(-offset)
}

/// An offset command for [`TransitionController::apply`].
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetRequest<N> {
    /// Node to move.
    pub target: OffsetTarget<N>,
    /// Axis to move along.
    pub axis: Axis,
    /// Destination scroll offset.
    pub offset: f64,
    /// Zero for an immediate write.
    pub duration: Duration,
    /// Timing curve for animated writes.
    pub easing: Easing,
}

impl<N> OffsetRequest<N> {
    /// An immediate (non-animated) offset write.
    #[must_use]
    pub fn immediate(target: OffsetTarget<N>, axis: Axis, offset: f64) -> Self {
        Self {
            target,
            axis,
            offset,
            duration: Duration::ZERO,
            easing: Easing::default(),
        }
    }

    /// Turns this request into a timed transition.
    #[must_use]
    pub fn animated(mut self, duration: Duration, easing: Easing) -> Self {
        self.duration = duration;
        self.easing = easing;
        self
    }

    /// Returns `true` when the request will be animated.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        !self.duration.is_zero()
    }
}

/// Result of [`TransitionController::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum OffsetOutcome {
    /// Written immediately.
    Applied,
    /// Handed to the host's animation engine; completion is pending.
    Animating,
    /// Already at the requested offset; nothing was issued.
    Skipped,
}

impl OffsetOutcome {
    /// Returns `true` unless the request was skipped.
    #[must_use]
    pub fn is_issued(self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

/// Issues offset commands and tracks the animations awaiting completion.
///
/// Completions are tracked per target: at most one on the content surface and
/// one per slot node. A new transition on a target replaces the pending one,
/// and an immediate write on a target cancels it.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionController<N> {
    defaults: TransitionSpec,
    content: Option<Axis>,
    slots: Vec<N>,
}

impl<N> Default for TransitionController<N> {
    fn default() -> Self {
        Self::new(TransitionSpec::DEFAULT)
    }
}

impl<N> TransitionController<N> {
    /// Creates a controller with the given default duration and easing.
    #[must_use]
    pub fn new(defaults: TransitionSpec) -> Self {
        Self {
            defaults,
            content: None,
            slots: Vec::new(),
        }
    }

    /// Default duration and easing.
    #[must_use]
    pub fn defaults(&self) -> TransitionSpec {
        self.defaults
    }

    /// Axis of the pending content-surface transition, if any.
    #[must_use]
    pub fn pending_content(&self) -> Option<Axis> {
        self.content
    }

    /// Slot nodes with a pending transition.
    #[must_use]
    pub fn pending_slots(&self) -> &[N] {
        &self.slots
    }

    /// Returns `true` while any transition awaits completion.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.content.is_some() || !self.slots.is_empty()
    }
}

impl<N: Clone + PartialEq> TransitionController<N> {
    /// Issues `request` against `surface`.
    ///
    /// `current` is the last known offset of the request's target along its
    /// axis. Requests for exactly that offset are skipped.
    pub fn apply<S: PagedSurface<Node = N>>(
        &mut self,
        surface: &mut S,
        request: &OffsetRequest<N>,
        current: f64,
    ) -> OffsetOutcome {
        if request.offset == current {
            tracing::trace!(axis = ?request.axis, offset = request.offset, "offset unchanged, skipping");
            return OffsetOutcome::Skipped;
        }
        if request.is_animated() {
            let transition = Transition {
                axis: request.axis,
                offset: request.offset,
                duration: request.duration,
                easing: request.easing,
            };
            tracing::debug!(
                axis = ?request.axis,
                offset = request.offset,
                duration_ms = u64::try_from(request.duration.as_millis()).unwrap_or(u64::MAX),
                easing = request.easing.name(),
                "starting transition"
            );
            surface.start_transition(&request.target, &transition);
            match &request.target {
                OffsetTarget::Content => self.content = Some(request.axis),
                OffsetTarget::Slot(node) => {
                    if !self.slots.contains(node) {
                        self.slots.push(node.clone());
                    }
                }
            }
            OffsetOutcome::Animating
        } else {
            surface.set_translation(&request.target, translation(request.axis, request.offset));
            if self.forget(&request.target) {
                tracing::trace!(axis = ?request.axis, "immediate write cancelled a pending transition");
            }
            OffsetOutcome::Applied
        }
    }

    /// Records that the transition on `target` finished.
    ///
    /// Notifies the host's own transition-end handling when the content
    /// surface's transition completes. Returns `false` when nothing was
    /// pending on `target`.
    pub fn complete<S: PagedSurface<Node = N>>(
        &mut self,
        surface: &mut S,
        target: &OffsetTarget<N>,
    ) -> bool {
        let completed = self.forget(target);
        if completed && matches!(target, OffsetTarget::Content) {
            surface.transition_ended();
        }
        completed
    }

    /// Drops the pending entry for `target` without notifying the host.
    ///
    /// Returns `false` when nothing was pending on `target`.
    pub fn forget(&mut self, target: &OffsetTarget<N>) -> bool {
        match target {
            OffsetTarget::Content => self.content.take().is_some(),
            OffsetTarget::Slot(node) => {
                let before = self.slots.len();
                self.slots.retain(|pending| pending != node);
                self.slots.len() != before
            }
        }
    }
}
