// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mutation authorization.
//!
//! [`can_mutate`] is a pure predicate, not an enforcement point: callers
//! must reject the persistence call when it returns false, and callers that
//! need strict consistency must re-validate membership inside the write
//! transaction (a membership revoked between check and write is otherwise a
//! check-then-act race).

use crate::principal::Principal;
use fleet_common_model::{
	Application, DataStream, EntityKind, Project, ProjectId, Role, Script, ScriptRuntime,
};
use tracing::instrument;

/// Attributes of a candidate entity for a create/update/delete decision.
///
/// Computed before evaluation; the entity itself is never touched. For
/// tenant-scoped kinds `project_id` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityAttrs {
	pub kind: EntityKind,
	pub project_id: Option<ProjectId>,
}

impl EntityAttrs {
	/// Attributes for a tenant-scoped entity kind.
	pub fn tenant_scoped(kind: EntityKind) -> Self {
		Self {
			kind,
			project_id: None,
		}
	}

	/// Attributes for an application.
	pub fn application(app: &Application) -> Self {
		Self {
			kind: EntityKind::Application,
			project_id: Some(app.project_id),
		}
	}

	/// Attributes for a data stream.
	pub fn data_stream(stream: &DataStream) -> Self {
		Self {
			kind: EntityKind::DataStream,
			project_id: Some(stream.project_id),
		}
	}

	/// Attributes for a script.
	pub fn script(script: &Script) -> Self {
		Self {
			kind: EntityKind::Script,
			project_id: Some(script.project_id),
		}
	}

	/// Attributes for a script runtime.
	pub fn script_runtime(runtime: &ScriptRuntime) -> Self {
		Self {
			kind: EntityKind::ScriptRuntime,
			project_id: Some(runtime.project_id),
		}
	}
}

/// Decide whether the principal may create, update, or delete the entity.
///
/// Project-scoped kinds are gated solely by membership in the entity's
/// project, for either principal kind and with no role check: any member
/// may mutate. Tenant-scoped kinds require the infra-admin role; edges can
/// never mutate them.
#[instrument(level = "debug", skip(member_projects), fields(kind = %entity.kind))]
pub fn can_mutate(
	principal: &Principal,
	member_projects: &[Project],
	entity: &EntityAttrs,
) -> bool {
	if entity.kind.is_project_scoped() {
		let Some(project_id) = entity.project_id else {
			return false;
		};
		return member_projects.iter().any(|p| p.id == project_id);
	}

	match principal {
		Principal::User { role, .. } => *role == Role::InfraAdmin,
		Principal::Edge { .. } => false,
	}
}
