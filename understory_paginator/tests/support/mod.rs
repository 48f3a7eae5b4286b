// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording surface shared by the integration tests.

#![allow(dead_code, reason = "not every test file uses every helper")]

use std::cell::RefCell;

use kurbo::{Point, Vec2};
use understory_paginator::{
    OffsetTarget, PagedSurface, Paginator, PaginatorConfig, Transition,
};

/// Everything the paginator asked the surface to do, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Translate(OffsetTarget<u32>, Vec2),
    Animate(OffsetTarget<u32>, Transition),
    Hide(u32, bool),
    Paged(bool),
    TransitionEnded,
}

/// Pages laid out side by side, `width` apart. Node ids start at 100 so they
/// are never confused with slot indices.
#[derive(Debug)]
pub struct Surface {
    pub nodes: Vec<u32>,
    pub width: f64,
    pub scroll: Point,
    pub calls: Vec<Call>,
    /// Selectors the paginator queried with.
    pub selectors: RefCell<Vec<Option<String>>>,
    /// Transitions started and not yet finished, oldest first.
    pub running: Vec<OffsetTarget<u32>>,
    pending_scroll: Option<Point>,
}

impl Surface {
    pub fn with_pages(count: u32) -> Self {
        Self {
            nodes: (0..count).map(|i| 100 + i).collect(),
            width: 320.0,
            scroll: Point::ZERO,
            calls: Vec::new(),
            selectors: RefCell::new(Vec::new()),
            running: Vec::new(),
            pending_scroll: None,
        }
    }

    pub fn node(&self, slot: usize) -> u32 {
        self.nodes[slot]
    }

    pub fn animations(&self) -> Vec<(OffsetTarget<u32>, Transition)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Animate(target, transition) => Some((target.clone(), *transition)),
                _ => None,
            })
            .collect()
    }

    pub fn hide_calls(&self) -> Vec<(u32, bool)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Hide(node, hidden) => Some((*node, *hidden)),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Plays every running transition to its end and reports each one.
    pub fn finish_animation(&mut self, pages: &mut Paginator<u32>) {
        for target in core::mem::take(&mut self.running) {
            self.finish(pages, &target);
        }
    }

    /// Plays the transition on `target` to its end and reports it.
    pub fn finish(&mut self, pages: &mut Paginator<u32>, target: &OffsetTarget<u32>) {
        self.running.retain(|running| running != target);
        if let OffsetTarget::Content = target
            && let Some(scroll) = self.pending_scroll.take()
        {
            self.scroll = scroll;
        }
        pages.on_transition_end(self, target);
    }
}

impl PagedSurface for Surface {
    type Node = u32;

    fn page_nodes(&self, selector: Option<&str>) -> Vec<u32> {
        self.selectors.borrow_mut().push(selector.map(String::from));
        if selector == Some(".missing") {
            return Vec::new();
        }
        self.nodes.clone()
    }

    fn scroll_position(&self) -> Point {
        self.scroll
    }

    fn node_position(&self, node: &u32) -> Point {
        let slot = self.nodes.iter().position(|n| n == node).unwrap_or(0);
        Point::new(slot as f64 * self.width, 0.0)
    }

    fn set_translation(&mut self, target: &OffsetTarget<u32>, translation: Vec2) {
        if let OffsetTarget::Content = target {
            self.scroll = Point::new(-translation.x, -translation.y);
            self.pending_scroll = None;
        }
        self.running.retain(|running| running != target);
        self.calls.push(Call::Translate(target.clone(), translation));
    }

    fn start_transition(&mut self, target: &OffsetTarget<u32>, transition: &Transition) {
        if let OffsetTarget::Content = target {
            let translation = transition.translation();
            self.pending_scroll = Some(Point::new(-translation.x, -translation.y));
        }
        self.running.retain(|running| running != target);
        self.running.push(target.clone());
        self.calls.push(Call::Animate(target.clone(), *transition));
    }

    fn set_node_hidden(&mut self, node: &u32, hidden: bool) {
        self.calls.push(Call::Hide(*node, hidden));
    }

    fn set_paged(&mut self, paged: bool) {
        self.calls.push(Call::Paged(paged));
    }

    fn transition_ended(&mut self) {
        self.calls.push(Call::TransitionEnded);
    }
}

/// Builds a rendered paginator over `count` pages.
pub fn rendered(count: u32, config: PaginatorConfig) -> (Paginator<u32>, Surface) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
    let mut surface = Surface::with_pages(count);
    let mut pages = Paginator::new(config);
    pages.on_render(&mut surface);
    surface.clear_calls();
    (pages, surface)
}

/// Drives a full horizontal drag from `from_x` to `to_x`.
pub fn swipe(pages: &mut Paginator<u32>, surface: &mut Surface, from_x: f64, to_x: f64) {
    let _ = pages.on_move_start(surface, Point::new(from_x, 200.0));
    let _ = pages.on_move(surface, Point::new(to_x, 201.0));
    let _ = pages.on_move_end(surface, Point::new(to_x, 201.0));
}

/// Drives a full vertical drag through `ys`.
pub fn drag_vertically(pages: &mut Paginator<u32>, surface: &mut Surface, ys: &[f64]) {
    let _ = pages.on_move_start(surface, Point::new(50.0, ys[0]));
    for &y in &ys[1..] {
        let _ = pages.on_move(surface, Point::new(50.0, y));
    }
    let last = ys[ys.len() - 1];
    let _ = pages.on_move_end(surface, Point::new(50.0, last));
}

/// A tap: start and end at the same point.
pub fn tap(pages: &mut Paginator<u32>, surface: &mut Surface) {
    let _ = pages.on_move_start(surface, Point::new(80.0, 80.0));
    let _ = pages.on_move_end(surface, Point::new(80.0, 80.0));
}
