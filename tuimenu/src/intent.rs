//! Hover intent: debounced show/hide transitions.
//!
//! A [`HoverIntent`] holds at most one pending transition. Scheduling a new
//! one replaces whatever was pending (last writer wins). Time is passed in
//! explicitly; the owner polls with the current instant and receives the
//! action exactly once when its deadline has passed.

use std::time::{Duration, Instant};

use log::trace;

/// Direction of a pending transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Show,
    Hide,
}

#[derive(Debug, Clone)]
struct Pending<A> {
    kind: IntentKind,
    action: A,
    deadline: Instant,
}

/// Cancelable delayed action bound to one menu level.
#[derive(Debug, Clone)]
pub struct HoverIntent<A> {
    pending: Option<Pending<A>>,
}

impl<A> Default for HoverIntent<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A: PartialEq> HoverIntent<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a show transition, replacing any pending one.
    pub fn schedule_show(&mut self, delay: Duration, action: A, now: Instant) {
        self.schedule(IntentKind::Show, delay, action, now);
    }

    /// Arm a hide transition, replacing any pending one.
    pub fn schedule_hide(&mut self, delay: Duration, action: A, now: Instant) {
        self.schedule(IntentKind::Hide, delay, action, now);
    }

    /// Arm a show transition unless the same one is already pending.
    ///
    /// Keeps the original deadline so repeated pointer motion over the same
    /// target does not postpone the transition.
    pub fn ensure_show(&mut self, delay: Duration, action: A, now: Instant) {
        if !self.is_pending_with(IntentKind::Show, &action) {
            self.schedule_show(delay, action, now);
        }
    }

    /// Arm a hide transition unless the same one is already pending.
    pub fn ensure_hide(&mut self, delay: Duration, action: A, now: Instant) {
        if !self.is_pending_with(IntentKind::Hide, &action) {
            self.schedule_hide(delay, action, now);
        }
    }

    fn schedule(&mut self, kind: IntentKind, delay: Duration, action: A, now: Instant) {
        if self.pending.is_some() {
            trace!("intent: replacing pending transition with {:?}", kind);
        }
        self.pending = Some(Pending {
            kind,
            action,
            deadline: now + delay,
        });
    }

    fn is_pending_with(&self, kind: IntentKind, action: &A) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.kind == kind && p.action == *action)
    }

    /// Drop the pending transition, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            trace!("intent: canceled pending {:?}", pending.kind);
        }
    }

    /// Cancel only if the pending transition is of the given kind.
    pub fn cancel_kind(&mut self, kind: IntentKind) {
        if self.pending_kind() == Some(kind) {
            self.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_kind(&self) -> Option<IntentKind> {
        self.pending.as_ref().map(|p| p.kind)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Take the pending action if its deadline has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<A> {
        match &self.pending {
            Some(pending) if pending.deadline <= now => self.pending.take().map(|p| p.action),
            _ => None,
        }
    }
}
