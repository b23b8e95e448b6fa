// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role enums for tenant-wide and per-project membership.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tenant-wide role carried by a user record.
///
/// Only [`Role::InfraAdmin`] is consulted by the authorization engine. The
/// operator roles exist for operational tooling and are admin-equivalent by
/// convention, never derived here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	/// Tenant-wide administrator; sees and mutates everything in the tenant.
	InfraAdmin,
	/// Plain project member.
	#[default]
	User,
	/// Operational role for the operator service.
	Operator,
	/// Operational role scoped to the operator tenant.
	OperatorTenant,
}

impl Role {
	/// Returns all available tenant-wide roles.
	pub fn all() -> &'static [Role] {
		&[
			Role::InfraAdmin,
			Role::User,
			Role::Operator,
			Role::OperatorTenant,
		]
	}

	/// Returns true for the tenant-wide administrator role.
	pub fn is_infra_admin(&self) -> bool {
		matches!(self, Role::InfraAdmin)
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::InfraAdmin => write!(f, "infra_admin"),
			Role::User => write!(f, "user"),
			Role::Operator => write!(f, "operator"),
			Role::OperatorTenant => write!(f, "operator_tenant"),
		}
	}
}

/// Role of a user within a single project.
///
/// Mutation of project-scoped entities is role-blind: any member may
/// create, update, or delete them regardless of this value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
	/// Can manage the project's membership and settings.
	Admin,
	/// Standard project member.
	#[default]
	User,
}

impl fmt::Display for ProjectRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ProjectRole::Admin => write!(f, "admin"),
			ProjectRole::User => write!(f, "user"),
		}
	}
}
