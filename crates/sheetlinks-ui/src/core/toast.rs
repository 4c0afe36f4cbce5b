//! Toast queue.
//!
//! # Design
//! - Toasts expire a fixed time after they are pushed; there is no cap on how
//!   many are visible at once.
//! - Dismissal by id is independent of expiry: removing one toast never
//!   touches another.
//! - Time is passed in, so the queue has no clock of its own.

use crate::models::{Toast, ToastKind};

/// Lifetime of a toast in milliseconds.
pub const TOAST_TTL_MS: u64 = 3000;

/// Ordered list of live toasts, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    /// Append a toast and return its id.
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, now_ms: u64) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            expires_at_ms: now_ms.saturating_add(TOAST_TTL_MS),
        });
        id
    }

    /// Remove one toast immediately. Returns whether it was present.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        before != self.toasts.len()
    }

    /// Drop every toast whose lifetime has elapsed.
    pub fn prune(&mut self, now_ms: u64) {
        self.toasts.retain(|toast| toast.expires_at_ms > now_ms);
    }

    /// Live toasts, oldest first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// True when nothing is showing; the container is not rendered then.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Milliseconds left before `toast` expires.
#[must_use]
pub const fn remaining_ms(toast: &Toast, now_ms: u64) -> u64 {
    toast.expires_at_ms.saturating_sub(now_ms)
}
