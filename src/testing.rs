//! Test utilities shared across unit and integration tests.
//!
//! Always compiled but hidden from documentation, so `tests/` can use them.

#![doc(hidden)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{SearchResponse, Suggestion};
use crate::search::debounce::Scheduler;

struct Timer {
    id: u32,
    due: u64,
    action: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: u32,
    cancelled: usize,
    timers: Vec<Timer>,
}

/// Virtual-time scheduler. Time only moves when [`ManualScheduler::advance`]
/// is called; due actions fire in deadline order.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `cancel` has been called.
    pub fn cancelled(&self) -> usize {
        self.clock.borrow().cancelled
    }

    /// Number of armed, not yet fired timers.
    pub fn armed(&self) -> usize {
        self.clock.borrow().timers.len()
    }

    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now + ms;
        loop {
            // Release the borrow before running the action: it may schedule more timers.
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(i, _)| i);
                match due {
                    Some(i) => {
                        let timer = clock.timers.remove(i);
                        clock.now = timer.due;
                        Some(timer.action)
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };
            match next {
                Some(action) => action(),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u32;

    fn schedule(&self, delay_ms: u32, action: Box<dyn FnOnce()>) -> Option<u32> {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let id = clock.next_id;
        let due = clock.now + u64::from(delay_ms);
        clock.timers.push(Timer { id, due, action });
        Some(id)
    }

    fn cancel(&self, handle: u32) {
        let mut clock = self.clock.borrow_mut();
        clock.cancelled += 1;
        clock.timers.retain(|t| t.id != handle);
    }
}

pub fn suggestion(name: &str, diameter: Option<f64>, variants: Option<u32>) -> Suggestion {
    Suggestion {
        name: name.to_string(),
        diameter,
        variant_count: variants,
    }
}

/// Decode a search response fixture, panicking on malformed JSON.
pub fn search_response(json: &str) -> SearchResponse {
    serde_json::from_str(json).expect("fixture must be a valid search response")
}
