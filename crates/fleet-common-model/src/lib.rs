// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared tenant entity model for Fleet.
//!
//! This crate provides the typed IDs, roles, category labels, and entity
//! definitions shared between the Fleet server and its authorization engine
//! (`fleet-server-auth`). It carries no behavior beyond classification and
//! category matching; persistence and transport live elsewhere.

pub mod category;
pub mod entity;
pub mod ids;
pub mod role;
pub mod snapshot;

pub use category::{category_match, selectors_are_valid, Category, CategoryInfo};
pub use entity::{
	Application, CloudCreds, DataSource, DataStream, DockerProfile, Edge, EdgeSelectorType,
	EntityKind, Project, ProjectUserInfo, Script, ScriptRuntime, User,
};
pub use ids::{
	ApplicationId, CategoryId, CloudCredsId, DataSourceId, DataStreamId, DockerProfileId, EdgeId,
	ProjectId, ScriptId, ScriptRuntimeId, TenantId, UserId,
};
pub use role::{ProjectRole, Role};
pub use snapshot::TenantSnapshot;
