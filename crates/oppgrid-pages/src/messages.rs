//! Host notifications
//!
//! The controller reports the outcome of loads and saves as one-off
//! [`Notification`]s (title, message, level). Hosts receive them through a
//! [`Notifier`]: any `Fn(Notification)` closure works, and [`MemoryNotifier`]
//! queues them for later display.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
	/// The operation completed
	Success,
	/// The operation failed
	Error,
}

impl Level {
	/// Returns the string representation of the level
	pub fn as_str(&self) -> &'static str {
		match self {
			Level::Success => "success",
			Level::Error => "error",
		}
	}
}

/// A one-off message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
	/// Short heading
	pub title: String,
	/// Body text
	pub message: String,
	/// Severity
	pub level: Level,
}

impl Notification {
	/// Creates a success notification
	pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			message: message.into(),
			level: Level::Success,
		}
	}

	/// Creates an error notification
	pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			message: message.into(),
			level: Level::Error,
		}
	}
}

/// Receives notifications from the controller
pub trait Notifier: Send + Sync {
	/// Delivers one notification
	fn notify(&self, notification: Notification);
}

impl<F> Notifier for F
where
	F: Fn(Notification) + Send + Sync,
{
	fn notify(&self, notification: Notification) {
		self(notification)
	}
}

/// In-memory notification queue
///
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
	notifications: Arc<Mutex<VecDeque<Notification>>>,
}

impl MemoryNotifier {
	/// Creates an empty queue
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns queued notifications without removing them
	pub fn peek(&self) -> Vec<Notification> {
		self.notifications.lock().iter().cloned().collect()
	}

	/// Removes and returns every queued notification
	pub fn drain(&self) -> Vec<Notification> {
		self.notifications.lock().drain(..).collect()
	}

	/// Drops every queued notification
	pub fn clear(&self) {
		self.notifications.lock().clear();
	}
}

impl Notifier for MemoryNotifier {
	fn notify(&self, notification: Notification) {
		self.notifications.lock().push_back(notification);
	}
}
