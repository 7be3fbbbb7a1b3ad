//! # Notification Center
//!
//! The single, process-wide transient message slot. Success and info messages hide
//! themselves after a fixed delay; errors stay until replaced or hidden.
//!
//! Every `show` and `hide` bumps a generation and aborts the pending auto-hide
//! task, and a timer only clears the slot if its generation is still current, so
//! a stale timer can never hide a newer message.

use crate::constants::{messages, NOTIFICATION_AUTO_HIDE};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Error,
}

impl Severity {
    pub fn auto_hides(&self) -> bool {
        !matches!(self, Self::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub visible: bool,
    pub text: String,
    pub severity: Severity,
}

impl Notification {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            text: String::new(),
            severity: Severity::Info,
        }
    }

    /// Header line shown above the message
    pub fn title(&self) -> &'static str {
        match self.severity {
            Severity::Error => messages::TITLE_ERROR,
            Severity::Success | Severity::Info => messages::TITLE_REFRESHED,
        }
    }
}

impl Default for Notification {
    fn default() -> Self {
        Self::hidden()
    }
}

#[derive(Debug, Default)]
struct TimerSlot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

#[derive(Debug)]
struct Inner {
    sender: watch::Sender<Notification>,
    timer: Mutex<TimerSlot>,
    auto_hide: Duration,
}

impl Inner {
    fn expire(&self, ticket: u64) {
        let mut slot = self.timer.lock();
        if slot.generation != ticket {
            debug!(ticket, current = slot.generation, "Ignoring stale auto-hide timer");
            return;
        }
        slot.handle = None;
        self.sender.send_replace(Notification::hidden());
        debug!(ticket, "Notification auto-hidden");
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.get_mut().handle.take() {
            handle.abort();
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

impl NotificationCenter {
    pub fn new(auto_hide: Duration) -> Self {
        let (sender, _) = watch::channel(Notification::hidden());
        Self {
            inner: Arc::new(Inner {
                sender,
                timer: Mutex::new(TimerSlot::default()),
                auto_hide,
            }),
        }
    }

    /// Replace the current notification
    ///
    /// Success and info messages schedule an auto-hide on the current tokio
    /// runtime.
    pub fn show(&self, text: impl Into<String>, severity: Severity) {
        let text = text.into();
        let mut slot = self.inner.timer.lock();
        slot.generation += 1;
        if let Some(handle) = slot.handle.take() {
            handle.abort();
        }

        debug!(severity = ?severity, generation = slot.generation, text = %text, "Showing notification");
        self.inner.sender.send_replace(Notification {
            visible: true,
            text,
            severity,
        });

        if !severity.auto_hides() {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let ticket = slot.generation;
                let deadline = Instant::now() + self.inner.auto_hide;
                let weak: Weak<Inner> = Arc::downgrade(&self.inner);
                slot.handle = Some(runtime.spawn(async move {
                    tokio::time::sleep_until(deadline).await;
                    if let Some(inner) = weak.upgrade() {
                        inner.expire(ticket);
                    }
                }));
            }
            Err(_) => warn!("No tokio runtime available, notification will not auto-hide"),
        }
    }

    /// Clear the notification and cancel any pending auto-hide
    pub fn hide(&self) {
        let mut slot = self.inner.timer.lock();
        slot.generation += 1;
        if let Some(handle) = slot.handle.take() {
            handle.abort();
        }
        self.inner.sender.send_replace(Notification::hidden());
    }

    pub fn current(&self) -> Notification {
        self.inner.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Notification> {
        self.inner.sender.subscribe()
    }

    pub fn auto_hide(&self) -> Duration {
        self.inner.auto_hide
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(NOTIFICATION_AUTO_HIDE)
    }
}
