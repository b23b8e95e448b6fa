// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bearer token claims, as produced by the external token verifier.
//!
//! The engine never parses or verifies JWTs itself. A [`TokenClaims`] value
//! arrives already signature-checked through the
//! [`ClaimsVerifier`](crate::middleware::ClaimsVerifier) seam; the fields
//! here are the subset the authorization decision consumes, plus audit
//! identity.

use chrono::{DateTime, Utc};
use fleet_common_model::{EdgeId, Role, TenantId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Privileged role override carried in a token, independent of scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialRole {
	/// Infra-admin token: authorization is unconditional.
	Admin,
	/// Edge device token: capabilities come from the fixed edge table.
	Edge,
}

impl fmt::Display for SpecialRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SpecialRole::Admin => write!(f, "admin"),
			SpecialRole::Edge => write!(f, "edge"),
		}
	}
}

/// Verified claims of a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
	pub tenant_id: TenantId,
	/// Privileged override; when absent, `scopes` is authoritative.
	#[serde(default)]
	pub special_role: Option<SpecialRole>,
	/// Granted capability scopes, `"<resource>.<op>"` strings.
	#[serde(default)]
	pub scopes: Vec<String>,
	/// User identity, present on user and admin tokens.
	#[serde(default)]
	pub user_id: Option<UserId>,
	/// Edge identity, present on edge tokens.
	#[serde(default)]
	pub edge_id: Option<EdgeId>,
	#[serde(default)]
	pub email: Option<String>,
	/// Tenant-wide role of the user, when known.
	#[serde(default)]
	pub role: Option<Role>,
	/// Expiry instant; enforced by the middleware, not by `authorize`.
	#[serde(default)]
	pub expires_at: Option<DateTime<Utc>>,
}

impl TokenClaims {
	/// Claims for an ordinary user token.
	pub fn for_user(tenant_id: TenantId, user_id: UserId, scopes: Vec<String>) -> Self {
		Self {
			tenant_id,
			special_role: None,
			scopes,
			user_id: Some(user_id),
			edge_id: None,
			email: None,
			role: None,
			expires_at: None,
		}
	}

	/// Claims for an infra-admin token.
	pub fn for_admin(tenant_id: TenantId, user_id: UserId) -> Self {
		Self {
			tenant_id,
			special_role: Some(SpecialRole::Admin),
			scopes: Vec::new(),
			user_id: Some(user_id),
			edge_id: None,
			email: None,
			role: Some(Role::InfraAdmin),
			expires_at: None,
		}
	}

	/// Claims for an edge device token.
	pub fn for_edge(tenant_id: TenantId, edge_id: EdgeId) -> Self {
		Self {
			tenant_id,
			special_role: Some(SpecialRole::Edge),
			scopes: Vec::new(),
			user_id: None,
			edge_id: Some(edge_id),
			email: None,
			role: None,
			expires_at: None,
		}
	}

	/// Set the expiry instant.
	pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
		self.expires_at = Some(expires_at);
		self
	}

	/// Returns true if the token is past its expiry at the given instant.
	pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
		self.expires_at.is_some_and(|exp| exp <= now)
	}
}
