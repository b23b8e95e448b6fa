// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization and visibility engine for Fleet.
//!
//! Three components, evaluated per request, leaf-first:
//!
//! - **Token scope authorization** ([`authorize`]): decides whether a
//!   verified bearer token carries sufficient capability for an endpoint's
//!   required scopes and constructs the [`Principal`].
//! - **Visibility resolution** ([`resolve_visibility`]): computes, for a
//!   principal and a materialized tenant snapshot, the filtered subset of
//!   every entity collection that principal may see.
//! - **Mutation authorization** ([`can_mutate`]): a pure predicate deciding
//!   whether a principal may create, update, or delete a candidate entity.
//!
//! All three are pure, synchronous computations over already-fetched data:
//! no I/O, no locks, no shared mutable state. Token verification and
//! persistence are external collaborators behind the
//! [`middleware::ClaimsVerifier`] seam and the
//! [`TenantSnapshot`](fleet_common_model::TenantSnapshot) supply contract.
//!
//! # Example
//!
//! ```
//! use fleet_common_model::{TenantId, TenantSnapshot, UserId};
//! use fleet_server_auth::{authorize, resolve_visibility, RequiredScopes, TokenClaims};
//!
//! let tenant_id = TenantId::generate();
//! let claims = TokenClaims::for_user(
//!     tenant_id,
//!     UserId::generate(),
//!     vec!["datastream.a".to_string()],
//! );
//! let required = RequiredScopes::parse(&["datastream.c,datastream.r"]).unwrap();
//! let principal = authorize(&claims, &required).unwrap();
//!
//! let tenant = TenantSnapshot::new(tenant_id);
//! let visible = resolve_visibility(&principal, &tenant);
//! assert!(visible.data_streams.is_empty());
//! ```

pub mod authorizer;
pub mod claims;
pub mod error;
pub mod membership;
pub mod middleware;
pub mod mutation;
pub mod principal;
pub mod scope;
pub mod visibility;

pub use authorizer::{authorize, edge_capabilities};
pub use claims::{SpecialRole, TokenClaims};
pub use error::{AuthError, AuthResult};
pub use membership::{CategorySelector, ExplicitList, MembershipResolver, SelectorMembership};
pub use middleware::{authorize_request, extract_bearer_token, AuthConfig, ClaimsVerifier};
pub use mutation::{can_mutate, EntityAttrs};
pub use principal::Principal;
pub use scope::{RequiredScopes, Scope, ScopeAlternative, ScopeOp, ScopeSet};
pub use visibility::{resolve_visibility, resolve_visibility_with, VisibleSet};
