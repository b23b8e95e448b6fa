// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fully materialized view of one tenant's entity collections.

use crate::category::{selectors_are_valid, Category};
use crate::entity::{
	Application, CloudCreds, DataSource, DataStream, DockerProfile, Edge, Project, Script,
	ScriptRuntime, User,
};
use crate::ids::TenantId;
use serde::{Deserialize, Serialize};

/// All entity collections of a single tenant, fetched in one consistent read.
///
/// The authorization engine performs no store I/O: callers must supply the
/// snapshot fully materialized, ideally one bulk fetch per collection within
/// the same transaction, so that the visibility derivation never observes a
/// torn read. Callers that need strict consistency between a visibility
/// check and a subsequent write must re-validate membership inside the
/// transaction that performs the write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSnapshot {
	pub tenant_id: TenantId,
	#[serde(default)]
	pub categories: Vec<Category>,
	#[serde(default)]
	pub projects: Vec<Project>,
	#[serde(default)]
	pub edges: Vec<Edge>,
	#[serde(default)]
	pub data_sources: Vec<DataSource>,
	#[serde(default)]
	pub cloud_creds: Vec<CloudCreds>,
	#[serde(default)]
	pub docker_profiles: Vec<DockerProfile>,
	#[serde(default)]
	pub users: Vec<User>,
	#[serde(default)]
	pub script_runtimes: Vec<ScriptRuntime>,
	#[serde(default)]
	pub scripts: Vec<Script>,
	#[serde(default)]
	pub applications: Vec<Application>,
	#[serde(default)]
	pub data_streams: Vec<DataStream>,
}

impl TenantSnapshot {
	/// Create an empty snapshot for the given tenant.
	pub fn new(tenant_id: TenantId) -> Self {
		Self {
			tenant_id,
			categories: Vec::new(),
			projects: Vec::new(),
			edges: Vec::new(),
			data_sources: Vec::new(),
			cloud_creds: Vec::new(),
			docker_profiles: Vec::new(),
			users: Vec::new(),
			script_runtimes: Vec::new(),
			scripts: Vec::new(),
			applications: Vec::new(),
			data_streams: Vec::new(),
		}
	}

	/// Returns true if every project's edge selectors reference a known
	/// category and one of its allowed values.
	///
	/// An invalid selector is not an error at resolution time (it simply
	/// matches nothing); this check lets callers surface stale project
	/// definitions before they silently empty a project's edge membership.
	pub fn selectors_are_valid(&self) -> bool {
		self.projects
			.iter()
			.all(|p| selectors_are_valid(&self.categories, &p.edge_selectors))
	}
}
