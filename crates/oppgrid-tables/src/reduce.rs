//! Remote error model and message normalization
//!
//! Remote collaborators report failures in one of three shapes:
//!
//! - `{ "body": [{ "message": "A" }, { "message": "B" }] }`
//! - `{ "body": { "message": "A" } }`
//! - `{ "message": "A" }`
//!
//! [`reduce_error`] collapses any of them into a single, never-empty string.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Message used when an error carries no usable text
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// One sub-error reported by a remote collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
	/// Human-readable message
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

impl ErrorDetail {
	/// Creates a detail with a message
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: Some(message.into()),
		}
	}

	fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Object(map) => Some(Self {
				message: map.get("message").and_then(Value::as_str).map(str::to_string),
			}),
			Value::String(s) => Some(Self::new(s.as_str())),
			_ => None,
		}
	}
}

/// The `body` of a remote error: a list of sub-errors or a single one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
	/// Several sub-errors
	List(Vec<ErrorDetail>),
	/// One sub-error
	Single(ErrorDetail),
}

impl ErrorBody {
	fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Array(items) => Some(Self::List(
				items.iter().filter_map(ErrorDetail::from_value).collect(),
			)),
			other => ErrorDetail::from_value(other).map(Self::Single),
		}
	}
}

/// Structured error returned by the remote read and write collaborators
///
/// Deserialization is total: any JSON value becomes a `RemoteError`, keeping
/// whatever message fields it can recognise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct RemoteError {
	/// Sub-error payload
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body: Option<ErrorBody>,
	/// Flat message
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

impl RemoteError {
	/// Creates an error with a flat message
	pub fn message(message: impl Into<String>) -> Self {
		Self {
			body: None,
			message: Some(message.into()),
		}
	}

	/// Creates an error whose body is a list of sub-errors
	pub fn details<I, S>(messages: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			body: Some(ErrorBody::List(
				messages.into_iter().map(ErrorDetail::new).collect(),
			)),
			message: None,
		}
	}

	/// Creates an error whose body is a single sub-error
	pub fn body_message(message: impl Into<String>) -> Self {
		Self {
			body: Some(ErrorBody::Single(ErrorDetail::new(message))),
			message: None,
		}
	}

	/// Builds an error from an arbitrary JSON value; never fails
	pub fn from_value(value: &Value) -> Self {
		match value {
			Value::Object(map) => Self {
				body: map.get("body").and_then(ErrorBody::from_value),
				message: map.get("message").and_then(Value::as_str).map(str::to_string),
			},
			Value::String(s) => Self::message(s.as_str()),
			_ => Self::default(),
		}
	}
}

impl fmt::Display for RemoteError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&reduce_error(self))
	}
}

impl std::error::Error for RemoteError {}

impl From<Value> for RemoteError {
	fn from(value: Value) -> Self {
		Self::from_value(&value)
	}
}

fn non_empty(message: Option<&str>) -> Option<&str> {
	message.filter(|m| !m.trim().is_empty())
}

/// Reduces a remote error to one human-readable message.
///
/// A list body joins its messages with `", "`; otherwise a single body
/// message is used, then the flat message, then [`UNKNOWN_ERROR`].
pub fn reduce_error(error: &RemoteError) -> String {
	match &error.body {
		Some(ErrorBody::List(details)) => {
			let messages: Vec<&str> = details
				.iter()
				.filter_map(|d| non_empty(d.message.as_deref()))
				.collect();
			if !messages.is_empty() {
				return messages.join(", ");
			}
		}
		Some(ErrorBody::Single(detail)) => {
			if let Some(message) = non_empty(detail.message.as_deref()) {
				return message.to_string();
			}
		}
		None => {}
	}

	non_empty(error.message.as_deref())
		.unwrap_or(UNKNOWN_ERROR)
		.to_string()
}
