// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tenant entity definitions and their static classification.
//!
//! Every entity belongs to exactly one tenant. Entities are either
//! *tenant-scoped* (gated by the tenant-wide admin role) or *project-scoped*
//! (gated by project membership); the split is static and captured by
//! [`EntityKind`]. All entities here are read-only inputs to the
//! authorization engine; only the persistence layer mutates them.

use crate::category::CategoryInfo;
use crate::ids::{
	ApplicationId, CloudCredsId, DataSourceId, DataStreamId, DockerProfileId, EdgeId, ProjectId,
	ScriptId, ScriptRuntimeId, TenantId, UserId,
};
use crate::role::{ProjectRole, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Tenant-scoped entities
// =============================================================================

/// An edge device registered with the tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
	pub id: EdgeId,
	pub tenant_id: TenantId,
	pub name: String,
	pub serial_number: String,
	/// Category labels used by category-selector project membership.
	#[serde(default)]
	pub labels: Vec<CategoryInfo>,
}

/// A sensor or other data producer attached to an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
	pub id: DataSourceId,
	pub tenant_id: TenantId,
	/// The edge this data source is attached to. Always set.
	pub edge_id: EdgeId,
	pub name: String,
	pub protocol: String,
}

/// A cloud credential profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudCreds {
	pub id: CloudCredsId,
	pub tenant_id: TenantId,
	pub name: String,
	pub kind: String,
}

/// A container registry profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerProfile {
	pub id: DockerProfileId,
	pub tenant_id: TenantId,
	pub name: String,
	pub server: String,
}

/// A user account within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	pub tenant_id: TenantId,
	pub name: String,
	pub email: String,
	pub role: Role,
}

/// Membership entry on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUserInfo {
	pub user_id: UserId,
	pub role: ProjectRole,
}

/// How a project determines its edge membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeSelectorType {
	/// Edges are listed explicitly in `edge_ids`.
	#[default]
	Explicit,
	/// Edges are selected dynamically by matching `edge_selectors` against
	/// edge category labels.
	Category,
}

impl fmt::Display for EdgeSelectorType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EdgeSelectorType::Explicit => write!(f, "Explicit"),
			EdgeSelectorType::Category => write!(f, "Category"),
		}
	}
}

/// A project: the grouping that scopes visibility and ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
	pub id: ProjectId,
	pub tenant_id: TenantId,
	pub name: String,
	/// Cloud credential profiles the project can access.
	pub cloud_credential_ids: Vec<CloudCredsId>,
	/// Container registry profiles the project can access.
	pub docker_profile_ids: Vec<DockerProfileId>,
	/// Users who are members of the project.
	pub users: Vec<ProjectUserInfo>,
	pub edge_selector_type: EdgeSelectorType,
	/// Relevant when `edge_selector_type` is `Explicit`.
	#[serde(default)]
	pub edge_ids: Vec<EdgeId>,
	/// Relevant when `edge_selector_type` is `Category`.
	#[serde(default)]
	pub edge_selectors: Vec<CategoryInfo>,
}

impl Project {
	/// Returns true if the given user appears in the membership list.
	pub fn has_user(&self, user_id: UserId) -> bool {
		self.users.iter().any(|u| u.user_id == user_id)
	}
}

// =============================================================================
// Project-scoped entities
// =============================================================================

/// A Kubernetes application deployed into a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
	pub id: ApplicationId,
	pub tenant_id: TenantId,
	pub project_id: ProjectId,
	pub name: String,
}

/// A data pipeline within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStream {
	pub id: DataStreamId,
	pub tenant_id: TenantId,
	pub project_id: ProjectId,
	pub name: String,
	pub origin: String,
}

/// A user function within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
	pub id: ScriptId,
	pub tenant_id: TenantId,
	pub project_id: ProjectId,
	pub name: String,
	pub runtime_id: ScriptRuntimeId,
}

/// A runtime environment for scripts within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRuntime {
	pub id: ScriptRuntimeId,
	pub tenant_id: TenantId,
	pub project_id: ProjectId,
	pub name: String,
	pub docker_image: String,
}

// =============================================================================
// Classification
// =============================================================================

/// Static classification of every tenant entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
	Category,
	Edge,
	DataSource,
	CloudCreds,
	DockerProfile,
	Project,
	User,
	Application,
	DataStream,
	Script,
	ScriptRuntime,
}

impl EntityKind {
	/// Returns all entity kinds.
	pub fn all() -> &'static [EntityKind] {
		&[
			EntityKind::Category,
			EntityKind::Edge,
			EntityKind::DataSource,
			EntityKind::CloudCreds,
			EntityKind::DockerProfile,
			EntityKind::Project,
			EntityKind::User,
			EntityKind::Application,
			EntityKind::DataStream,
			EntityKind::Script,
			EntityKind::ScriptRuntime,
		]
	}

	/// Returns true if visibility and mutation of this kind are gated by
	/// project membership.
	pub fn is_project_scoped(&self) -> bool {
		matches!(
			self,
			EntityKind::Application
				| EntityKind::DataStream
				| EntityKind::Script
				| EntityKind::ScriptRuntime
		)
	}

	/// Returns true if mutation of this kind requires the tenant-wide admin
	/// role.
	pub fn is_tenant_scoped(&self) -> bool {
		!self.is_project_scoped()
	}
}

impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EntityKind::Category => write!(f, "category"),
			EntityKind::Edge => write!(f, "edge"),
			EntityKind::DataSource => write!(f, "data_source"),
			EntityKind::CloudCreds => write!(f, "cloud_creds"),
			EntityKind::DockerProfile => write!(f, "docker_profile"),
			EntityKind::Project => write!(f, "project"),
			EntityKind::User => write!(f, "user"),
			EntityKind::Application => write!(f, "application"),
			EntityKind::DataStream => write!(f, "data_stream"),
			EntityKind::Script => write!(f, "script"),
			EntityKind::ScriptRuntime => write!(f, "script_runtime"),
		}
	}
}
