// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for change notifications, immediate and debounced.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Vec2};
use understory_pan_zoom::{
    Change, DebounceDelay, ManualClock, Matrix, PanZoom, PanZoomOptions,
};

/// Everything the four callbacks saw, in delivery order.
#[derive(Debug, PartialEq)]
enum Event {
    Change(Matrix),
    Pan(Change<Vec2>),
    Zoom(Change<f64>),
    Origin(Change<Point>),
}

type Log = Rc<RefCell<Vec<Event>>>;

fn recorded(options: PanZoomOptions, log: &Log) -> PanZoomOptions {
    let (a, b, c, d) = (log.clone(), log.clone(), log.clone(), log.clone());
    options
        .on_change(move |m| a.borrow_mut().push(Event::Change(m)))
        .on_pan(move |ch| b.borrow_mut().push(Event::Pan(ch)))
        .on_zoom(move |ch| c.borrow_mut().push(Event::Zoom(ch)))
        .on_origin(move |ch| d.borrow_mut().push(Event::Origin(ch)))
}

fn setup(options: PanZoomOptions) -> (PanZoom, Log, ManualClock) {
    let log = Log::default();
    let clock = ManualClock::new();
    let view = PanZoom::with_clock(recorded(options, &log), clock.clone());
    (view, log, clock)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn pans(log: &Log) -> Vec<Change<Vec2>> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Pan(c) => Some(*c),
            _ => None,
        })
        .collect()
}

fn changes(log: &Log) -> usize {
    log.borrow()
        .iter()
        .filter(|e| matches!(e, Event::Change(_)))
        .count()
}

#[test]
fn construction_does_not_notify() {
    let (_view, log, _clock) = setup(PanZoomOptions::new().pan_x(10).zoom(3).origin_y(4));
    assert!(log.borrow().is_empty());
}

#[test]
fn typed_channel_fires_before_change() {
    let (mut view, log, _clock) = setup(PanZoomOptions::new());

    view.set_zoom(2);
    view.set_origin_x(5);
    view.set_pan(1, 2);

    let expected = [
        Event::Zoom(Change { from: 1.0, to: 2.0 }),
        Event::Change(Matrix::scale(2.0)),
        Event::Origin(Change {
            from: Point::ZERO,
            to: Point::new(5.0, 0.0),
        }),
        Event::Change(Matrix::new([2.0, 0.0, -5.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0])),
        Event::Pan(Change {
            from: Vec2::ZERO,
            to: Vec2::new(1.0, 2.0),
        }),
        Event::Change(Matrix::new([2.0, 0.0, -4.0, 0.0, 2.0, 2.0, 0.0, 0.0, 1.0])),
    ];
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn unchanged_writes_are_silent() {
    let (mut view, log, _clock) = setup(PanZoomOptions::new().pan_x(10).max_zoom(4));

    view.set_pan_x(10);
    view.set_pan_x("10");
    view.set_pan(10, 0);
    view.set_zoom(1);
    view.set_origin(0, 0);
    assert!(log.borrow().is_empty());

    // Clamped to the value already held.
    view.set_zoom(9);
    view.set_zoom(12);
    assert_eq!(log.borrow().len(), 2);

    // Loosening a limit never moves the value.
    view.set_min_pan_x(-1000);
    view.set_max_zoom(100);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn tightened_limit_notifies_once() {
    let (mut view, log, _clock) = setup(PanZoomOptions::new().pan_x(150));

    view.set_max_pan_x(100);
    assert_eq!(view.pan_x(), 100.0);
    assert_eq!(
        pans(&log),
        [Change {
            from: Vec2::new(150.0, 0.0),
            to: Vec2::new(100.0, 0.0),
        }]
    );
    assert_eq!(changes(&log), 1);
}

#[test]
fn pair_setter_notifies_once() {
    let (mut view, log, _clock) = setup(PanZoomOptions::new());
    view.set_origin(3, 4);
    assert_eq!(log.borrow().len(), 2);
    assert_eq!(
        log.borrow()[0],
        Event::Origin(Change {
            from: Point::ZERO,
            to: Point::new(3.0, 4.0),
        })
    );
}

#[test]
fn change_payload_is_transform_at_mutation() {
    let (mut view, log, _clock) = setup(PanZoomOptions::new());
    view.set_pan_x(7);
    view.set_pan_x(9);
    let seen: Vec<Matrix> = log
        .borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Change(m) => Some(*m),
            _ => None,
        })
        .collect();
    assert_eq!(
        seen,
        [
            Matrix::translate((7.0, 0.0)),
            Matrix::translate((9.0, 0.0)),
        ]
    );
    assert_eq!(seen[1], view.transform());
}

#[test]
fn trailing_debounce_delivers_last_change() {
    let (mut view, log, clock) = setup(
        PanZoomOptions::new()
            .notify_delay(50)
            .notify_leading(false),
    );

    view.set_pan_x(1);
    clock.advance(ms(5));
    view.set_pan_x(2);
    clock.advance(ms(5));
    view.set_pan_x(3);
    assert!(log.borrow().is_empty());
    assert!(view.has_pending_notifications());
    assert_eq!(view.next_deadline(), Some(ms(60)));

    clock.advance(ms(49));
    assert_eq!(view.poll(), 0);
    assert!(log.borrow().is_empty());

    clock.advance(ms(1));
    assert_eq!(view.poll(), 2);
    assert_eq!(
        pans(&log),
        [Change {
            from: Vec2::new(2.0, 0.0),
            to: Vec2::new(3.0, 0.0),
        }]
    );
    assert_eq!(
        log.borrow().last(),
        Some(&Event::Change(Matrix::translate((3.0, 0.0))))
    );
    assert!(!view.has_pending_notifications());
    assert_eq!(view.next_deadline(), None);

    // Nothing left to deliver.
    clock.advance(ms(500));
    assert_eq!(view.poll(), 0);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn leading_debounce_fires_first_change_only() {
    let (mut view, log, clock) = setup(PanZoomOptions::new().notify_delay(50));

    view.set_zoom(2);
    clock.advance(ms(10));
    view.set_zoom(3);
    clock.advance(ms(10));
    view.set_zoom(4);
    assert_eq!(
        *log.borrow(),
        [
            Event::Zoom(Change { from: 1.0, to: 2.0 }),
            Event::Change(Matrix::scale(2.0)),
        ]
    );

    // The window closes silently.
    clock.advance(ms(50));
    assert_eq!(view.poll(), 0);
    assert_eq!(log.borrow().len(), 2);

    // A fresh burst fires again on its first call.
    view.set_zoom(5);
    assert_eq!(log.borrow().len(), 4);
    assert_eq!(log.borrow()[2], Event::Zoom(Change { from: 4.0, to: 5.0 }));
}

#[test]
fn bursts_separated_by_idle_gap_notify_without_polling() {
    let (mut view, log, clock) = setup(PanZoomOptions::new().notify_delay(50));
    view.set_pan_x(1);
    clock.advance(ms(1000));
    view.set_pan_x(2);
    assert_eq!(
        pans(&log),
        [
            Change {
                from: Vec2::ZERO,
                to: Vec2::new(1.0, 0.0),
            },
            Change {
                from: Vec2::new(1.0, 0.0),
                to: Vec2::new(2.0, 0.0),
            },
        ]
    );
    assert_eq!(changes(&log), 2);
}

#[test]
fn late_call_flushes_previous_trailing_burst() {
    let (mut view, log, clock) = setup(
        PanZoomOptions::new()
            .notify_delay(50)
            .notify_leading(false),
    );
    view.set_zoom(2);
    clock.advance(ms(1000));
    view.set_zoom(3);
    assert_eq!(
        *log.borrow(),
        [
            Event::Zoom(Change { from: 1.0, to: 2.0 }),
            Event::Change(Matrix::scale(2.0)),
        ]
    );

    clock.advance(ms(50));
    assert_eq!(view.poll(), 2);
    assert_eq!(log.borrow()[2], Event::Zoom(Change { from: 2.0, to: 3.0 }));
}

#[test]
fn channels_debounce_independently() {
    let (mut view, log, clock) = setup(
        PanZoomOptions::new()
            .notify_delay(20)
            .notify_leading(false),
    );

    view.set_pan_x(1);
    clock.advance(ms(15));
    view.set_zoom(2);
    assert_eq!(view.next_deadline(), Some(ms(20)));

    // The pan window is due; zoom and change are still open.
    clock.advance(ms(5));
    assert_eq!(view.poll(), 1);
    assert_eq!(pans(&log).len(), 1);
    assert_eq!(changes(&log), 0);

    clock.advance(ms(15));
    assert_eq!(view.poll(), 2);
    assert_eq!(
        log.borrow()[1..],
        [
            Event::Zoom(Change { from: 1.0, to: 2.0 }),
            Event::Change(view.transform()),
        ]
    );
}

#[test]
fn changing_delay_discards_pending_calls() {
    let (mut view, log, clock) = setup(
        PanZoomOptions::new()
            .notify_delay(50)
            .notify_leading(false),
    );

    view.set_pan_x(1);
    assert!(view.has_pending_notifications());

    // Same value: windows stay open.
    view.set_notify_delay("50");
    assert!(view.has_pending_notifications());

    view.set_notify_delay(80);
    assert_eq!(view.notify_delay(), DebounceDelay::from_millis(80));
    assert!(!view.has_pending_notifications());

    clock.advance(ms(1000));
    assert_eq!(view.poll(), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn changing_edge_discards_pending_calls() {
    let (mut view, log, clock) = setup(
        PanZoomOptions::new()
            .notify_delay(50)
            .notify_leading(false),
    );

    view.set_zoom(3);
    view.set_notify_leading(false);
    assert!(view.has_pending_notifications());

    view.set_notify_leading(true);
    assert!(view.notify_leading());
    assert!(!view.has_pending_notifications());

    clock.advance(ms(100));
    view.poll();
    assert!(log.borrow().is_empty());

    // Leading edge now applies.
    view.set_zoom(4);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn replacing_callback_discards_its_pending_call() {
    let (mut view, log, clock) = setup(
        PanZoomOptions::new()
            .notify_delay(50)
            .notify_leading(false),
    );
    view.set_pan_x(4);

    let replaced = Rc::new(RefCell::new(Vec::new()));
    let sink = replaced.clone();
    view.set_on_pan(move |c| sink.borrow_mut().push(c));

    clock.advance(ms(50));
    assert_eq!(view.poll(), 1);

    // Only the untouched change channel delivers.
    assert_eq!(changes(&log), 1);
    assert!(pans(&log).is_empty());
    assert!(replaced.borrow().is_empty());

    view.set_pan_x(5);
    clock.advance(ms(50));
    view.poll();
    assert_eq!(
        *replaced.borrow(),
        [Change {
            from: Vec2::new(4.0, 0.0),
            to: Vec2::new(5.0, 0.0),
        }]
    );
}

#[test]
fn negative_delay_disables_debouncing() {
    let (mut view, log, _clock) = setup(
        PanZoomOptions::new()
            .notify_delay(-1)
            .notify_leading(false),
    );
    assert_eq!(view.notify_delay(), DebounceDelay::Disabled);

    view.set_pan_x(1);
    view.set_pan_x(2);
    assert_eq!(pans(&log).len(), 2);
    assert!(!view.has_pending_notifications());
}

#[test]
fn unreadable_delay_reads_as_zero() {
    let (mut view, log, _clock) = setup(PanZoomOptions::new().notify_delay(50));
    view.set_notify_delay("soon");
    assert_eq!(view.notify_delay(), DebounceDelay::IMMEDIATE);

    view.set_zoom(2);
    view.set_zoom(3);
    assert_eq!(log.borrow().len(), 4);
}

#[test]
fn callbacks_installed_after_construction() {
    let mut view = PanZoom::with_clock(PanZoomOptions::new(), ManualClock::new());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    view.set_on_change(move |m| sink.borrow_mut().push(m));

    view.set_zoom(2);
    assert_eq!(*seen.borrow(), [Matrix::scale(2.0)]);
}
