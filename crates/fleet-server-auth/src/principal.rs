// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The authenticated actor behind a request.

use fleet_common_model::{EdgeId, Role, TenantId, UserId};
use serde::{Deserialize, Serialize};

/// The authenticated principal: a human user or an edge device.
///
/// Exactly one variant is active per request; the two are never merged.
/// Adding a principal kind forces every decision site to be revisited
/// through exhaustive matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Principal {
	/// A human user with a tenant-wide role.
	User {
		id: UserId,
		tenant_id: TenantId,
		role: Role,
	},
	/// An edge device.
	Edge { edge_id: EdgeId, tenant_id: TenantId },
}

impl Principal {
	/// The tenant this principal belongs to.
	pub fn tenant_id(&self) -> TenantId {
		match self {
			Principal::User { tenant_id, .. } | Principal::Edge { tenant_id, .. } => *tenant_id,
		}
	}

	/// Returns true for a user principal with the tenant-wide admin role.
	pub fn is_infra_admin(&self) -> bool {
		matches!(
			self,
			Principal::User {
				role: Role::InfraAdmin,
				..
			}
		)
	}
}
