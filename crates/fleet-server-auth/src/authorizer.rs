// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Token scope authorization.
//!
//! [`authorize`] decides whether a verified token carries sufficient
//! capability for an endpoint's [`RequiredScopes`] and, on success,
//! constructs the [`Principal`] for the rest of the request. It is a pure
//! function over the claims; token verification and expiry enforcement
//! happen in the middleware.

use crate::claims::{SpecialRole, TokenClaims};
use crate::error::{AuthError, AuthResult};
use crate::principal::Principal;
use crate::scope::{RequiredScopes, ScopeSet};
use fleet_common_model::{Role, UserId};
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// The fixed capability table granted to every edge device token.
///
/// Edge tokens carry no scopes of their own; this table is the complete
/// capability set, expanded through the same `.a` wildcard rule as ordinary
/// scopes. It is built once at first use and never mutated.
static EDGE_SCOPES: LazyLock<ScopeSet> = LazyLock::new(|| {
	use crate::scope::{Scope, ScopeOp};

	[
		("category", ScopeOp::All),
		("cluster", ScopeOp::Read),
		("aggregate", ScopeOp::Read),
		("aggregate", ScopeOp::Update),
		("datasource", ScopeOp::All),
		("datastream", ScopeOp::Read),
		("edge", ScopeOp::Read),
		("project", ScopeOp::Read),
		("script", ScopeOp::Read),
		("sensor", ScopeOp::All),
		("user", ScopeOp::Read),
		("log", ScopeOp::Create),
		("log", ScopeOp::Update),
	]
	.into_iter()
	.map(|(resource, op)| Scope::new(resource, op))
	.collect()
});

/// The capability set of edge device tokens.
pub fn edge_capabilities() -> &'static ScopeSet {
	&EDGE_SCOPES
}

/// Authorize a verified token against an endpoint's required scopes.
///
/// - `specialRole = admin` succeeds unconditionally and yields an
///   infra-admin user principal (claims still carry the real identity for
///   auditing; a missing id falls back to the nil UUID).
/// - `specialRole = edge` succeeds iff any alternative is covered by the
///   fixed edge capability table, independent of the token's own scopes.
/// - Otherwise the token's scopes decide, after wildcard expansion.
///
/// Failure is the single opaque [`AuthError::AuthFailed`]; the reason string
/// is for logs only.
#[instrument(level = "debug", skip(claims, required), fields(
	tenant_id = %claims.tenant_id,
	special_role = ?claims.special_role,
))]
pub fn authorize(claims: &TokenClaims, required: &RequiredScopes) -> AuthResult<Principal> {
	match claims.special_role {
		Some(SpecialRole::Admin) => {
			let id = claims.user_id.unwrap_or_else(UserId::nil);
			debug!(user_id = %id, "admin token: authorization unconditional");
			Ok(Principal::User {
				id,
				tenant_id: claims.tenant_id,
				role: Role::InfraAdmin,
			})
		}
		Some(SpecialRole::Edge) => {
			let edge_id = claims
				.edge_id
				.ok_or_else(|| AuthError::failed("edge token without edgeId claim"))?;
			if !required.satisfied_by(edge_capabilities()) {
				return Err(AuthError::failed(format!(
					"edge {edge_id} lacks required scopes"
				)));
			}
			Ok(Principal::Edge {
				edge_id,
				tenant_id: claims.tenant_id,
			})
		}
		None => {
			let id = claims
				.user_id
				.ok_or_else(|| AuthError::failed("user token without id claim"))?;
			let granted = ScopeSet::parse(&claims.scopes)
				.map_err(AuthError::into_auth_failed)?;
			if !required.satisfied_by(&granted) {
				return Err(AuthError::failed(format!(
					"user {id} lacks required scopes"
				)));
			}
			Ok(Principal::User {
				id,
				tenant_id: claims.tenant_id,
				role: claims.role.unwrap_or_default(),
			})
		}
	}
}
