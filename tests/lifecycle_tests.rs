// Host-side tests for cancellation, teardown and the frame clock.

use ambient_core::lifecycle::MAX_FRAME_STEP;
use ambient_core::*;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

#[test]
fn guard_stops_calling_after_cancel() {
    let token = CancelToken::new();
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    let mut guarded = token.guard(move |n: u32| h.set(h.get() + n));
    guarded(2);
    guarded(3);
    token.cancel();
    guarded(100);
    assert_eq!(hits.get(), 5);
    assert!(token.is_cancelled());
}

#[test]
fn token_clones_share_state() {
    let a = CancelToken::new();
    let b = a.clone();
    assert!(!b.is_cancelled());
    a.cancel();
    assert!(b.is_cancelled());
}

#[test]
fn teardown_runs_each_action_once_in_reverse_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut teardown = Teardown::new(CancelToken::new());
    for name in ["listener", "observer", "frame"] {
        let log = log.clone();
        teardown.defer(move || log.borrow_mut().push(name));
    }
    assert_eq!(teardown.len(), 3);
    assert!(!teardown.is_done());

    teardown.run();
    assert!(teardown.token().is_cancelled());
    assert!(teardown.is_done());
    assert_eq!(*log.borrow(), vec!["frame", "observer", "listener"]);

    teardown.run();
    drop(teardown);
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn dropping_teardown_runs_it() {
    let token = CancelToken::new();
    let ran = Rc::new(Cell::new(false));
    {
        let mut teardown = Teardown::new(token.clone());
        let ran = ran.clone();
        teardown.defer(move || ran.set(true));
    }
    assert!(ran.get());
    assert!(token.is_cancelled());
}

/// Minimal stand-in for a browser event loop: queued callbacks run in order.
#[derive(Default)]
struct FakeHost {
    queue: RefCell<VecDeque<Box<dyn FnOnce()>>>,
}

impl FakeHost {
    fn post(&self, f: impl FnOnce() + 'static) {
        self.queue.borrow_mut().push_back(Box::new(f));
    }

    fn drain(&self) -> usize {
        let mut n = 0;
        loop {
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(f) => {
                    f();
                    n += 1;
                }
                None => return n,
            }
        }
    }
}

fn schedule_frame(host: &Rc<FakeHost>, token: &CancelToken, frames: &Rc<Cell<u32>>) {
    let (h, t, f) = (host.clone(), token.clone(), frames.clone());
    host.post(move || {
        if t.is_cancelled() {
            return;
        }
        f.set(f.get() + 1);
        schedule_frame(&h, &t, &f);
    });
}

#[test]
fn nothing_runs_after_teardown_even_if_already_queued() {
    let host = Rc::new(FakeHost::default());
    let token = CancelToken::new();
    let mut teardown = Teardown::new(token.clone());
    let frames = Rc::new(Cell::new(0));
    let input = Rc::new(RefCell::new(InputState::default()));
    let events = Rc::new(Cell::new(0));

    let on_move = {
        let input = input.clone();
        let events = events.clone();
        Rc::new(RefCell::new(token.guard(move |(x, y): (f32, f32)| {
            events.set(events.get() + 1);
            input.borrow_mut().pointer_moved(x, y);
        })))
    };

    schedule_frame(&host, &token, &frames);
    for _ in 0..5 {
        let cb = on_move.clone();
        host.post(move || (&mut *cb.borrow_mut())((10.0, 20.0)));
        // Run the pending frame (which queues the next) and the event.
        let next = host.queue.borrow_mut().pop_front().unwrap();
        next();
        let next = host.queue.borrow_mut().pop_front().unwrap();
        next();
    }
    assert_eq!(frames.get(), 5);
    assert_eq!(events.get(), 5);

    // A frame and an event are pending at the moment of teardown.
    let cb = on_move.clone();
    host.post(move || (&mut *cb.borrow_mut())((99.0, 99.0)));
    assert_eq!(host.queue.borrow().len(), 2);

    teardown.run();
    assert_eq!(host.drain(), 2);
    assert_eq!(frames.get(), 5);
    assert_eq!(events.get(), 5);
    assert_eq!(input.borrow().pointer.x, 10.0);
    assert!(host.queue.borrow().is_empty(), "no frame rescheduled");
}

#[test]
fn clock_accumulates_and_caps_long_gaps() {
    let mut clock = FrameClock::default();
    assert_eq!(clock.seconds(), 0.0);
    clock.advance(Duration::from_millis(16));
    clock.advance(Duration::from_millis(16));
    assert!((clock.seconds() - 0.032).abs() < 1e-6);
    assert_eq!(clock.frames(), 2);

    let t = clock.advance(Duration::from_secs(30));
    assert!((t - (0.032 + MAX_FRAME_STEP.as_secs_f32())).abs() < 1e-5);
}

#[test]
fn input_state_tracks_scroll_and_pointer() {
    let mut input = InputState::default();
    input.scrolled(100.0);
    input.pointer_moved(40.0, 50.0);
    assert_eq!(input.pointer, PointerState { x: 40.0, y: 150.0, active: true });

    // Scrolling carries the pointer's document position along.
    input.scrolled(300.0);
    assert_eq!(input.pointer.y, 350.0);
    assert_eq!(input.surface.scroll_y, 300.0);

    input.pointer_left();
    assert_eq!(input.pointer.active_position(), None);
    input.scrolled(0.0);
    assert_eq!(input.pointer.y, 350.0);

    input.resized(-5.0, 900.0);
    assert_eq!((input.surface.width, input.surface.height), (0.0, 900.0));
}
