// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paginator configuration.

use alloc::string::String;
use core::time::Duration;

use crate::axis::Axis;
use crate::transition::TransitionSpec;

/// Vertical over-pull settle duration.
pub const SNAP_BACK_DURATION: Duration = Duration::from_millis(400);

/// How a wheel delta maps to page direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WheelDirection {
    /// A negative delta advances to the next page.
    #[default]
    NegativeIsForward,
    /// A positive delta advances to the next page.
    PositiveIsForward,
}

impl WheelDirection {
    /// Returns `true` when `delta` should advance.
    #[must_use]
    pub fn is_forward(self, delta: f64) -> bool {
        match self {
            Self::NegativeIsForward => delta < 0.0,
            Self::PositiveIsForward => delta > 0.0,
        }
    }
}

/// Options for a [`Paginator`](crate::Paginator).
///
/// # Example
///
/// ```rust
/// use understory_paginator::PaginatorConfig;
///
/// let config = PaginatorConfig::new()
///     .with_selector(".card")
///     .with_padding(2)
///     .with_optimize_memory(true);
///
/// assert_eq!(config.selector.as_deref(), Some(".card"));
/// assert_eq!(config.padding, 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PaginatorConfig {
    /// Selector for page nodes; `None` uses the content surface's children.
    pub selector: Option<String>,
    /// Slots kept realized on each side of the current one.
    pub padding: usize,
    /// Hide page nodes outside the visibility window.
    pub optimize_memory: bool,
    /// Axis along which pages are laid out.
    pub paging_axis: Axis,
    /// Duration and easing for page transitions.
    pub transition: TransitionSpec,
    /// Duration of the vertical over-pull settle.
    pub snap_back_duration: Duration,
    /// Wheel delta sign convention.
    pub wheel_direction: WheelDirection,
    /// Block `next`/`prev` while a gesture or animation is in flight.
    pub gate_navigation: bool,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            selector: None,
            padding: 1,
            optimize_memory: false,
            paging_axis: Axis::Horizontal,
            transition: TransitionSpec::DEFAULT,
            snap_back_duration: SNAP_BACK_DURATION,
            wheel_direction: WheelDirection::default(),
            gate_navigation: true,
        }
    }
}

impl PaginatorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page-node selector.
    #[must_use]
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Sets the visibility window padding.
    #[must_use]
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Enables or disables the visibility window.
    #[must_use]
    pub fn with_optimize_memory(mut self, optimize_memory: bool) -> Self {
        self.optimize_memory = optimize_memory;
        self
    }

    /// Sets the paging axis.
    #[must_use]
    pub fn with_paging_axis(mut self, axis: Axis) -> Self {
        self.paging_axis = axis;
        self
    }

    /// Sets the default page transition.
    #[must_use]
    pub fn with_transition(mut self, transition: TransitionSpec) -> Self {
        self.transition = transition;
        self
    }

    /// Sets the over-pull settle duration.
    #[must_use]
    pub fn with_snap_back_duration(mut self, duration: Duration) -> Self {
        self.snap_back_duration = duration;
        self
    }

    /// Sets the wheel delta sign convention.
    #[must_use]
    pub fn with_wheel_direction(mut self, direction: WheelDirection) -> Self {
        self.wheel_direction = direction;
        self
    }

    /// Enables or disables the navigation gate.
    #[must_use]
    pub fn with_gate_navigation(mut self, gate: bool) -> Self {
        self.gate_navigation = gate;
        self
    }
}
