// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis selection and the per-gesture axis lock.
//!
//! An [`AxisLock`] is created when a gesture starts and discarded when it ends.
//! The first significant move resolves it to [`Axis::Vertical`] or
//! [`Axis::Horizontal`]; after that the decision is sticky for the rest of the
//! gesture.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_paginator::{Axis, AxisLock};
//!
//! let mut lock = AxisLock::new(Point::new(100.0, 100.0), Point::ZERO);
//! assert_eq!(lock.axis(), None);
//!
//! // Mostly vertical movement locks the vertical axis.
//! assert_eq!(lock.resolve(Point::new(104.0, 60.0)), Axis::Vertical);
//!
//! // Later horizontal movement does not change the decision.
//! assert_eq!(lock.resolve(Point::new(300.0, 60.0)), Axis::Vertical);
//! ```

use core::fmt;

use kurbo::{Point, Vec2};

/// One of the two scroll axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// The X axis. Paging between slots happens along this axis by default.
    #[default]
    Horizontal,
    /// The Y axis. Used for free-form scrolling inside a single slot.
    Vertical,
}

impl Axis {
    /// Returns the component of `point` along this axis.
    #[must_use]
    pub fn of_point(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// Returns the component of `vec` along this axis.
    #[must_use]
    pub fn of_vec(self, vec: Vec2) -> f64 {
        match self {
            Self::Horizontal => vec.x,
            Self::Vertical => vec.y,
        }
    }

    /// Builds a vector that is `value` along this axis and zero on the other.
    #[must_use]
    pub fn vec(self, value: f64) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(value, 0.0),
            Self::Vertical => Vec2::new(0.0, value),
        }
    }

    /// Returns `true` for [`Axis::Vertical`].
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        })
    }
}

/// Ephemeral gesture descriptor: start/end pointer positions, the resolved
/// axis, and the flick velocity reported by the host, if any.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisLock {
    start: Point,
    end: Point,
    start_scroll: Point,
    axis: Option<Axis>,
    velocity: Option<f64>,
}

impl AxisLock {
    /// Starts a new, unresolved lock at `pointer`.
    ///
    /// `start_scroll` is the host's scroll position when the gesture began; the
    /// horizontal live offset is measured relative to it.
    #[must_use]
    pub fn new(pointer: Point, start_scroll: Point) -> Self {
        Self {
            start: pointer,
            end: pointer,
            start_scroll,
            axis: None,
            velocity: None,
        }
    }

    /// Pointer position at gesture start.
    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Pointer position at the most recent sample.
    #[must_use]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Host scroll position when the gesture began.
    #[must_use]
    pub fn start_scroll(&self) -> Point {
        self.start_scroll
    }

    /// The resolved axis, or `None` before the first move.
    #[must_use]
    pub fn axis(&self) -> Option<Axis> {
        self.axis
    }

    /// Flick velocity, if the host reported one for this gesture.
    #[must_use]
    pub fn velocity(&self) -> Option<f64> {
        self.velocity
    }

    /// Records the flick velocity.
    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = Some(velocity);
    }

    /// Records the latest pointer sample.
    pub fn track(&mut self, pointer: Point) {
        self.end = pointer;
    }

    /// Resolves the axis from `pointer` if it is not yet resolved, and returns it.
    ///
    /// Strictly smaller horizontal than vertical displacement locks the vertical
    /// axis; everything else, ties included, locks horizontal.
    pub fn resolve(&mut self, pointer: Point) -> Axis {
        *self.axis.get_or_insert_with(|| {
            let delta = pointer - self.start;
            if delta.x.abs() < delta.y.abs() {
                Axis::Vertical
            } else {
                Axis::Horizontal
            }
        })
    }

    /// Displacement from start to the latest sample.
    #[must_use]
    pub fn displacement(&self) -> Vec2 {
        self.end - self.start
    }

    /// `start - end` along `axis`: positive when the pointer moved toward the
    /// origin (left or up).
    #[must_use]
    pub fn delta_along(&self, axis: Axis) -> f64 {
        axis.of_point(self.start) - axis.of_point(self.end)
    }

    /// Whether the gesture moves forward: dragging left (horizontal) or up
    /// (vertical) advances.
    ///
    /// Returns `false` while the axis is unresolved.
    #[must_use]
    pub fn is_forward(&self) -> bool {
        self.axis.is_some_and(|axis| self.delta_along(axis) > 0.0)
    }
}
