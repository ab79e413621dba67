// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use core::time::Duration;

use kurbo::{Point, Vec2};
use understory_timing::{Clock, DebounceDelay, Debouncer, Edge};

use crate::matrix::Matrix;

/// Payload of a typed change notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Change<T> {
    /// Value before the mutation.
    pub from: T,
    /// Value after the mutation.
    pub to: T,
}

/// The four notification channels of a controller, sharing one clock and
/// one set of debounce settings.
pub(crate) struct Notifiers {
    pub(crate) change: Debouncer<Matrix>,
    pub(crate) pan: Debouncer<Change<Vec2>>,
    pub(crate) zoom: Debouncer<Change<f64>>,
    pub(crate) origin: Debouncer<Change<Point>>,
}

impl Notifiers {
    pub(crate) fn new(clock: Rc<dyn Clock>, delay: DebounceDelay, edge: Edge) -> Self {
        Self {
            change: Debouncer::noop(clock.clone(), delay, edge),
            pan: Debouncer::noop(clock.clone(), delay, edge),
            zoom: Debouncer::noop(clock.clone(), delay, edge),
            origin: Debouncer::noop(clock, delay, edge),
        }
    }

    pub(crate) fn delay(&self) -> DebounceDelay {
        self.change.delay()
    }

    pub(crate) fn edge(&self) -> Edge {
        self.change.edge()
    }

    /// Rebuilds every channel with `delay`, discarding open windows.
    pub(crate) fn set_delay(&mut self, delay: DebounceDelay) {
        log::debug!("notification delay set to {delay:?}");
        self.pan.set_delay(delay);
        self.zoom.set_delay(delay);
        self.origin.set_delay(delay);
        self.change.set_delay(delay);
    }

    /// Rebuilds every channel with `edge`, discarding open windows.
    pub(crate) fn set_edge(&mut self, edge: Edge) {
        log::debug!("notification edge set to {edge:?}");
        self.pan.set_edge(edge);
        self.zoom.set_edge(edge);
        self.origin.set_edge(edge);
        self.change.set_edge(edge);
    }

    /// Closes due windows, typed channels before the generic one.
    pub(crate) fn poll(&mut self) -> usize {
        [
            self.pan.poll(),
            self.zoom.poll(),
            self.origin.poll(),
            self.change.poll(),
        ]
        .into_iter()
        .filter(|&delivered| delivered)
        .count()
    }

    pub(crate) fn next_deadline(&self) -> Option<Duration> {
        [
            self.pan.next_deadline(),
            self.zoom.next_deadline(),
            self.origin.next_deadline(),
            self.change.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pan.is_pending()
            || self.zoom.is_pending()
            || self.origin.is_pending()
            || self.change.is_pending()
    }
}
