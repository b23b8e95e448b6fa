// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request-boundary helpers for the authorization engine.
//!
//! This module is the thin glue between HTTP and the pure engine:
//! - [`extract_bearer_token`] pulls the token out of the Authorization header
//! - [`ClaimsVerifier`] is the seam for the external JWT verifier
//! - [`authorize_request`] chains extraction, verification, expiry, and the
//!   scope check into one call
//!
//! # Security Notes
//!
//! - Token values are never logged
//! - Every failure collapses to the opaque unauthorized class; only the
//!   server log sees the reason

use crate::authorizer::authorize;
use crate::claims::TokenClaims;
use crate::error::{AuthError, AuthResult};
use crate::principal::Principal;
use crate::scope::RequiredScopes;
use chrono::Utc;
use fleet_common_model::{Role, TenantId, UserId};
use http::header::AUTHORIZATION;
use http::HeaderMap;
use tracing::{error, instrument, warn};

/// Environment variable to enable dev mode (bypass authentication).
pub const DEV_MODE_ENV_VAR: &str = "FLEET_SERVER_AUTH_DEV_MODE";
pub const FLEET_ENV_VAR: &str = "FLEET_SERVER_ENV";

/// Verifies a raw bearer token and returns its claims.
///
/// Implemented by the external token verification collaborator (JWT
/// signature checks, key resolution). The engine only consumes the verified
/// [`TokenClaims`].
pub trait ClaimsVerifier {
	/// Verify the token; any failure is the opaque unauthorized class.
	fn verify(&self, token: &str) -> AuthResult<TokenClaims>;
}

/// Configuration for authorization at the request boundary.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
	/// Enable dev mode (bypass authentication when FLEET_SERVER_AUTH_DEV_MODE=1).
	pub dev_mode: bool,
}

impl AuthConfig {
	/// Create a new AuthConfig with default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create AuthConfig from environment variables.
	///
	/// Reads `FLEET_SERVER_AUTH_DEV_MODE` to determine if dev mode should be
	/// enabled.
	///
	/// # Panics
	///
	/// Panics if both `FLEET_SERVER_AUTH_DEV_MODE=1` and
	/// `FLEET_SERVER_ENV=production` are set, as dev mode must never be
	/// enabled in production environments.
	pub fn from_env() -> Self {
		let dev_mode = std::env::var(DEV_MODE_ENV_VAR)
			.map(|v| v == "1" || v.to_lowercase() == "true")
			.unwrap_or(false);

		let fleet_env = std::env::var(FLEET_ENV_VAR).unwrap_or_default();

		if dev_mode && fleet_env.to_lowercase() == "production" {
			panic!(
                "FATAL: FLEET_SERVER_AUTH_DEV_MODE=1 is set while FLEET_SERVER_ENV=production. \
                 Dev mode authentication bypass MUST NOT be enabled in production. \
                 Remove FLEET_SERVER_AUTH_DEV_MODE or set FLEET_SERVER_ENV to a non-production value."
            );
		}

		Self { dev_mode }
	}

	/// Set dev mode.
	pub fn with_dev_mode(mut self, enabled: bool) -> Self {
		self.dev_mode = enabled;
		self
	}
}

/// Extract bearer token from the Authorization header.
///
/// Expects the format: `Authorization: Bearer <token>`. Returns `None` if
/// the header is missing or malformed.
#[instrument(level = "trace", skip_all)]
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
	let auth_header = headers.get(AUTHORIZATION)?;
	let auth_str = auth_header.to_str().ok()?;
	auth_str
		.strip_prefix("Bearer ")
		.map(|token| token.to_string())
}

/// Authorize an inbound request end to end.
///
/// Extracts the bearer token, verifies it through `verifier`, rejects
/// expired tokens, and checks the endpoint's required scopes. On success the
/// constructed [`Principal`] flows into visibility and mutation decisions.
///
/// When `config.dev_mode` is enabled the whole chain is bypassed and a
/// synthetic infra-admin principal is returned; [`AuthConfig::from_env`]
/// refuses to enable that in production.
///
/// Failures are logged with their reason and surfaced as the single opaque
/// [`AuthError::AuthFailed`]; the HTTP layer maps that to 401 without
/// distinguishing cause to the client.
#[instrument(level = "debug", skip_all)]
pub fn authorize_request(
	headers: &HeaderMap,
	verifier: &dyn ClaimsVerifier,
	required: &RequiredScopes,
	config: &AuthConfig,
) -> AuthResult<Principal> {
	if config.dev_mode {
		warn!("dev mode enabled: bypassing authentication");
		return Ok(Principal::User {
			id: UserId::nil(),
			tenant_id: TenantId::nil(),
			role: Role::InfraAdmin,
		});
	}

	let result = authorize_request_inner(headers, verifier, required);
	if let Err(err) = &result {
		error!("failed to authorize the request: {err}");
	}
	result.map_err(AuthError::into_auth_failed)
}

fn authorize_request_inner(
	headers: &HeaderMap,
	verifier: &dyn ClaimsVerifier,
	required: &RequiredScopes,
) -> AuthResult<Principal> {
	let token =
		extract_bearer_token(headers).ok_or_else(|| AuthError::failed("missing bearer token"))?;
	let claims = verifier.verify(&token)?;
	if claims.is_expired_at(Utc::now()) {
		return Err(AuthError::failed("token expired"));
	}
	authorize(&claims, required)
}
