// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Result type alias for authorization operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors produced by the authorization engine.
///
/// Every failure the engine can report collapses to a single
/// unauthorized-class condition at the HTTP boundary. The `reason` string is
/// for server logs only and must never be surfaced to the client, so that a
/// caller cannot distinguish a bad signature from an insufficient scope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
	#[error("authorization failed: {reason}")]
	AuthFailed { reason: String },

	#[error("malformed scope: {0}")]
	MalformedScope(String),
}

impl AuthError {
	/// Build the opaque unauthorized error with a log-only reason.
	pub fn failed(reason: impl Into<String>) -> Self {
		AuthError::AuthFailed {
			reason: reason.into(),
		}
	}

	/// Fold any engine error into the unauthorized class surfaced at the
	/// HTTP boundary.
	pub fn into_auth_failed(self) -> Self {
		match self {
			AuthError::AuthFailed { .. } => self,
			AuthError::MalformedScope(s) => AuthError::failed(format!("malformed scope: {s}")),
		}
	}
}
