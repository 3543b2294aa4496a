use std::collections::BTreeMap;

use ironsight_input::{Action, MoveKey};
use ironsight_kernel::Session;

/// Something that produces input actions once per frame.
///
/// `frame` is the number of frames already presented, so the first poll
/// sees 0.
pub trait InputSource {
    fn poll(&mut self, frame: u64, session: &Session) -> Vec<Action>;
}

/// No input at all. The player stands still and enemies close in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl InputSource for Idle {
    fn poll(&mut self, _frame: u64, _session: &Session) -> Vec<Action> {
        Vec::new()
    }
}

/// A fixed timeline of actions keyed by frame.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    timeline: BTreeMap<u64, Vec<Action>>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` for `frame`. Actions on the same frame keep their order.
    pub fn push(&mut self, frame: u64, action: Action) {
        self.timeline.entry(frame).or_default().push(action);
    }

    pub fn at(mut self, frame: u64, action: Action) -> Self {
        self.push(frame, action);
        self
    }

    /// Hold `key` from frame `from` until it is released on frame `until`.
    pub fn hold(self, key: MoveKey, from: u64, until: u64) -> Self {
        self.at(from, Action::Move { key, pressed: true })
            .at(until, Action::Move { key, pressed: false })
    }

    /// Frames that still have actions queued.
    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }
}

impl InputSource for InputScript {
    fn poll(&mut self, frame: u64, _session: &Session) -> Vec<Action> {
        self.timeline.remove(&frame).unwrap_or_default()
    }
}
