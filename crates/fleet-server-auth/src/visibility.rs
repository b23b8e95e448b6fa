// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-principal visibility over a tenant's entity collections.
//!
//! Given a [`Principal`] and a fully materialized [`TenantSnapshot`],
//! [`resolve_visibility`] computes the filtered subset of every collection
//! that the principal may see. The derivation is graph-shaped: project
//! membership anchors everything, and dependent entities follow through
//! their references (data sources via edges, project-scoped entities via
//! `project_id`, credentials and profiles via the project's reference
//! lists).
//!
//! The derivation is pure and order-independent. Dangling references yield
//! empty intersections, never errors.

use crate::membership::{MembershipResolver, SelectorMembership};
use crate::principal::Principal;
use fleet_common_model::{
	Application, CloudCreds, CloudCredsId, DataSource, DataStream, DockerProfile,
	DockerProfileId, Edge, EdgeId, Project, ProjectId, Role, Script, ScriptRuntime,
	TenantSnapshot, User, UserId,
};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// The per-principal filtered view of a tenant's collections.
///
/// `projects` intentionally holds **all** tenant projects: the full project
/// list is visible even to non-members, and only project-scoped contents are
/// filtered. `member_projects` is the member-only subset; it feeds the
/// mutation authorizer and the rest of the derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleSet {
	/// All tenant projects, unfiltered.
	pub projects: Vec<Project>,
	/// Projects the principal is a member of.
	pub member_projects: Vec<Project>,
	pub edges: Vec<Edge>,
	pub data_sources: Vec<DataSource>,
	pub cloud_creds: Vec<CloudCreds>,
	pub docker_profiles: Vec<DockerProfile>,
	pub users: Vec<User>,
	pub script_runtimes: Vec<ScriptRuntime>,
	pub scripts: Vec<Script>,
	pub applications: Vec<Application>,
	pub data_streams: Vec<DataStream>,
}

/// Resolve visibility with the default selector-dispatching membership
/// resolver.
pub fn resolve_visibility(principal: &Principal, tenant: &TenantSnapshot) -> VisibleSet {
	resolve_visibility_with(&SelectorMembership, principal, tenant)
}

/// Resolve visibility with an explicit membership resolver.
#[instrument(level = "debug", skip(resolver, tenant), fields(tenant_id = %tenant.tenant_id))]
pub fn resolve_visibility_with(
	resolver: &dyn MembershipResolver,
	principal: &Principal,
	tenant: &TenantSnapshot,
) -> VisibleSet {
	match principal {
		Principal::User {
			role: Role::InfraAdmin,
			..
		} => admin_view(tenant),
		Principal::User { id, .. } => {
			let member_projects: Vec<Project> = tenant
				.projects
				.iter()
				.filter(|p| p.has_user(*id))
				.cloned()
				.collect();
			member_view(resolver, tenant, member_projects, None, Some(*id))
		}
		Principal::Edge { edge_id, .. } => {
			let member_projects: Vec<Project> = tenant
				.projects
				.iter()
				.filter(|p| resolver.resolve_edges(p, &tenant.edges).contains(edge_id))
				.cloned()
				.collect();
			member_view(resolver, tenant, member_projects, Some(*edge_id), None)
		}
	}
}

/// The infra-admin view: every collection unfiltered.
fn admin_view(tenant: &TenantSnapshot) -> VisibleSet {
	VisibleSet {
		projects: tenant.projects.clone(),
		member_projects: tenant.projects.clone(),
		edges: tenant.edges.clone(),
		data_sources: tenant.data_sources.clone(),
		cloud_creds: tenant.cloud_creds.clone(),
		docker_profiles: tenant.docker_profiles.clone(),
		users: tenant.users.clone(),
		script_runtimes: tenant.script_runtimes.clone(),
		scripts: tenant.scripts.clone(),
		applications: tenant.applications.clone(),
		data_streams: tenant.data_streams.clone(),
	}
}

/// The membership-anchored derivation shared by user and edge principals.
///
/// `self_edge` keeps an edge visible to itself outside any project;
/// `self_user` keeps a user's own record visible with zero memberships.
/// There is no self-inclusion rule for edges in the `users` collection.
fn member_view(
	resolver: &dyn MembershipResolver,
	tenant: &TenantSnapshot,
	member_projects: Vec<Project>,
	self_edge: Option<EdgeId>,
	self_user: Option<UserId>,
) -> VisibleSet {
	let member_ids: HashSet<ProjectId> = member_projects.iter().map(|p| p.id).collect();

	let mut edge_ids: HashSet<EdgeId> = member_projects
		.iter()
		.flat_map(|p| resolver.resolve_edges(p, &tenant.edges))
		.collect();
	edge_ids.extend(self_edge);

	let cred_ids: HashSet<CloudCredsId> = member_projects
		.iter()
		.flat_map(|p| p.cloud_credential_ids.iter().copied())
		.collect();
	let profile_ids: HashSet<DockerProfileId> = member_projects
		.iter()
		.flat_map(|p| p.docker_profile_ids.iter().copied())
		.collect();

	let mut user_ids: HashSet<UserId> = member_projects
		.iter()
		.flat_map(|p| p.users.iter().map(|u| u.user_id))
		.collect();
	user_ids.extend(self_user);

	debug!(
		member_projects = member_ids.len(),
		edges = edge_ids.len(),
		"resolved membership"
	);

	VisibleSet {
		projects: tenant.projects.clone(),
		edges: tenant
			.edges
			.iter()
			.filter(|e| edge_ids.contains(&e.id))
			.cloned()
			.collect(),
		data_sources: tenant
			.data_sources
			.iter()
			.filter(|ds| edge_ids.contains(&ds.edge_id))
			.cloned()
			.collect(),
		cloud_creds: tenant
			.cloud_creds
			.iter()
			.filter(|c| cred_ids.contains(&c.id))
			.cloned()
			.collect(),
		docker_profiles: tenant
			.docker_profiles
			.iter()
			.filter(|p| profile_ids.contains(&p.id))
			.cloned()
			.collect(),
		users: tenant
			.users
			.iter()
			.filter(|u| user_ids.contains(&u.id))
			.cloned()
			.collect(),
		script_runtimes: tenant
			.script_runtimes
			.iter()
			.filter(|r| member_ids.contains(&r.project_id))
			.cloned()
			.collect(),
		scripts: tenant
			.scripts
			.iter()
			.filter(|s| member_ids.contains(&s.project_id))
			.cloned()
			.collect(),
		applications: tenant
			.applications
			.iter()
			.filter(|a| member_ids.contains(&a.project_id))
			.cloned()
			.collect(),
		data_streams: tenant
			.data_streams
			.iter()
			.filter(|d| member_ids.contains(&d.project_id))
			.cloned()
			.collect(),
		member_projects,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use fleet_common_model::{
		ApplicationId, DataSourceId, DataStreamId, EdgeSelectorType, ProjectRole,
		ProjectUserInfo, ScriptId, ScriptRuntimeId, TenantId,
	};

	fn user_principal(tenant_id: TenantId, id: UserId, role: Role) -> Principal {
		Principal::User {
			id,
			tenant_id,
			role,
		}
	}

	fn user(tenant_id: TenantId, role: Role) -> User {
		let id = UserId::generate();
		User {
			id,
			tenant_id,
			name: format!("user-{id}"),
			email: format!("{id}@example.com"),
			role,
		}
	}

	fn edge(tenant_id: TenantId) -> Edge {
		let id = EdgeId::generate();
		Edge {
			id,
			tenant_id,
			name: format!("edge-{id}"),
			serial_number: id.to_string(),
			labels: vec![],
		}
	}

	fn cloud_creds(tenant_id: TenantId) -> CloudCreds {
		CloudCreds {
			id: CloudCredsId::generate(),
			tenant_id,
			name: "aws".to_string(),
			kind: "aws".to_string(),
		}
	}

	fn docker_profile(tenant_id: TenantId) -> DockerProfile {
		DockerProfile {
			id: DockerProfileId::generate(),
			tenant_id,
			name: "registry".to_string(),
			server: "registry.example.com".to_string(),
		}
	}

	fn data_source(tenant_id: TenantId, edge_id: EdgeId) -> DataSource {
		DataSource {
			id: DataSourceId::generate(),
			tenant_id,
			edge_id,
			name: "sensor-feed".to_string(),
			protocol: "mqtt".to_string(),
		}
	}

	fn project(tenant_id: TenantId, members: &[UserId], edge_ids: &[EdgeId]) -> Project {
		Project {
			id: ProjectId::generate(),
			tenant_id,
			name: "project".to_string(),
			cloud_credential_ids: vec![],
			docker_profile_ids: vec![],
			users: members
				.iter()
				.map(|user_id| ProjectUserInfo {
					user_id: *user_id,
					role: ProjectRole::User,
				})
				.collect(),
			edge_selector_type: EdgeSelectorType::Explicit,
			edge_ids: edge_ids.to_vec(),
			edge_selectors: vec![],
		}
	}

	fn application(tenant_id: TenantId, project_id: ProjectId) -> Application {
		Application {
			id: ApplicationId::generate(),
			tenant_id,
			project_id,
			name: "app".to_string(),
		}
	}

	fn data_stream(tenant_id: TenantId, project_id: ProjectId) -> DataStream {
		DataStream {
			id: DataStreamId::generate(),
			tenant_id,
			project_id,
			name: "stream".to_string(),
			origin: "Data Source".to_string(),
		}
	}

	fn script(tenant_id: TenantId, project_id: ProjectId) -> (ScriptRuntime, Script) {
		let runtime = ScriptRuntime {
			id: ScriptRuntimeId::generate(),
			tenant_id,
			project_id,
			name: "python".to_string(),
			docker_image: "python:3".to_string(),
		};
		let script = Script {
			id: ScriptId::generate(),
			tenant_id,
			project_id,
			name: "transform".to_string(),
			runtime_id: runtime.id,
		};
		(runtime, script)
	}

	/// Two of everything; `users[0]`, `edges[0]`, `cloud_creds[0]`, and
	/// `docker_profiles[0]` belong to `projects[0]` only.
	fn snapshot() -> TenantSnapshot {
		let tenant_id = TenantId::generate();
		let mut tenant = TenantSnapshot::new(tenant_id);
		let member = user(tenant_id, Role::User);
		let outsider = user(tenant_id, Role::User);
		let in_edge = edge(tenant_id);
		let out_edge = edge(tenant_id);
		let in_creds = cloud_creds(tenant_id);
		let out_creds = cloud_creds(tenant_id);
		let in_profile = docker_profile(tenant_id);
		let out_profile = docker_profile(tenant_id);
		let mut p1 = project(tenant_id, &[member.id], &[in_edge.id]);
		let mut p2 = project(tenant_id, &[outsider.id], &[out_edge.id]);
		p1.cloud_credential_ids = vec![in_creds.id];
		p1.docker_profile_ids = vec![in_profile.id];
		p2.cloud_credential_ids = vec![out_creds.id];
		p2.docker_profile_ids = vec![out_profile.id];
		tenant.cloud_creds = vec![in_creds, out_creds];
		tenant.docker_profiles = vec![in_profile, out_profile];
		tenant.data_sources = vec![
			data_source(tenant_id, in_edge.id),
			data_source(tenant_id, out_edge.id),
		];
		tenant.applications = vec![
			application(tenant_id, p1.id),
			application(tenant_id, p2.id),
		];
		tenant.data_streams = vec![data_stream(tenant_id, p1.id), data_stream(tenant_id, p2.id)];
		let (rt1, s1) = script(tenant_id, p1.id);
		let (rt2, s2) = script(tenant_id, p2.id);
		tenant.script_runtimes = vec![rt1, rt2];
		tenant.scripts = vec![s1, s2];
		tenant.users = vec![member.clone(), outsider.clone()];
		tenant.edges = vec![in_edge, out_edge];
		tenant.projects = vec![p1, p2];
		tenant
	}

	mod admin {
		use super::*;

		#[test]
		fn admin_sees_every_collection_unfiltered() {
			let tenant = snapshot();
			let admin = user_principal(tenant.tenant_id, UserId::generate(), Role::InfraAdmin);
			let visible = resolve_visibility(&admin, &tenant);
			assert_eq!(visible.projects, tenant.projects);
			assert_eq!(visible.member_projects, tenant.projects);
			assert_eq!(visible.edges, tenant.edges);
			assert_eq!(visible.data_sources, tenant.data_sources);
			assert_eq!(visible.cloud_creds, tenant.cloud_creds);
			assert_eq!(visible.docker_profiles, tenant.docker_profiles);
			assert_eq!(visible.users, tenant.users);
			assert_eq!(visible.applications, tenant.applications);
			assert_eq!(visible.data_streams, tenant.data_streams);
			assert_eq!(visible.scripts, tenant.scripts);
			assert_eq!(visible.script_runtimes, tenant.script_runtimes);
		}
	}

	mod users {
		use super::*;

		#[test]
		fn member_sees_only_member_project_contents() {
			let tenant = snapshot();
			let member_id = tenant.users[0].id;
			let p1 = tenant.projects[0].id;
			let principal = user_principal(tenant.tenant_id, member_id, Role::User);
			let visible = resolve_visibility(&principal, &tenant);

			assert_eq!(visible.member_projects.len(), 1);
			assert_eq!(visible.member_projects[0].id, p1);
			assert_eq!(visible.edges, vec![tenant.edges[0].clone()]);
			assert_eq!(visible.data_sources, vec![tenant.data_sources[0].clone()]);
			assert_eq!(visible.cloud_creds, vec![tenant.cloud_creds[0].clone()]);
			assert_eq!(
				visible.docker_profiles,
				vec![tenant.docker_profiles[0].clone()]
			);
			assert_eq!(visible.applications, vec![tenant.applications[0].clone()]);
			assert_eq!(visible.data_streams, vec![tenant.data_streams[0].clone()]);
			assert_eq!(visible.scripts, vec![tenant.scripts[0].clone()]);
			assert_eq!(
				visible.script_runtimes,
				vec![tenant.script_runtimes[0].clone()]
			);
		}

		#[test]
		fn full_project_list_is_visible_to_non_members() {
			let tenant = snapshot();
			let member_id = tenant.users[0].id;
			let principal = user_principal(tenant.tenant_id, member_id, Role::User);
			let visible = resolve_visibility(&principal, &tenant);
			// Intentional asymmetry: the project list itself is unfiltered.
			assert_eq!(visible.projects, tenant.projects);
		}

		#[test]
		fn user_always_sees_own_record() {
			let tenant_id = TenantId::generate();
			let mut tenant = TenantSnapshot::new(tenant_id);
			let loner = user(tenant_id, Role::User);
			tenant.users = vec![loner.clone()];
			let principal = user_principal(tenant_id, loner.id, Role::User);
			let visible = resolve_visibility(&principal, &tenant);
			assert_eq!(visible.users, vec![loner]);
		}

		#[test]
		fn co_members_are_visible() {
			let tenant_id = TenantId::generate();
			let mut tenant = TenantSnapshot::new(tenant_id);
			let a = user(tenant_id, Role::User);
			let b = user(tenant_id, Role::User);
			let c = user(tenant_id, Role::User);
			tenant.projects = vec![project(tenant_id, &[a.id, b.id], &[])];
			tenant.users = vec![a.clone(), b.clone(), c];
			let principal = user_principal(tenant_id, a.id, Role::User);
			let visible = resolve_visibility(&principal, &tenant);
			assert_eq!(visible.users, vec![a, b]);
		}

		#[test]
		fn membership_only_grows_visibility() {
			let mut tenant = snapshot();
			let member_id = tenant.users[0].id;
			let principal = user_principal(tenant.tenant_id, member_id, Role::User);
			let before = resolve_visibility(&principal, &tenant);

			// Add the user to the second project as well.
			tenant.projects[1].users.push(ProjectUserInfo {
				user_id: member_id,
				role: ProjectRole::User,
			});
			let after = resolve_visibility(&principal, &tenant);

			assert!(after.member_projects.len() > before.member_projects.len());
			for e in &before.edges {
				assert!(after.edges.contains(e));
			}
			for ds in &before.data_sources {
				assert!(after.data_sources.contains(ds));
			}
			for c in &before.cloud_creds {
				assert!(after.cloud_creds.contains(c));
			}
			for p in &before.docker_profiles {
				assert!(after.docker_profiles.contains(p));
			}
			for u in &before.users {
				assert!(after.users.contains(u));
			}
			for a in &before.applications {
				assert!(after.applications.contains(a));
			}
			for d in &before.data_streams {
				assert!(after.data_streams.contains(d));
			}
			for s in &before.scripts {
				assert!(after.scripts.contains(s));
			}
			for r in &before.script_runtimes {
				assert!(after.script_runtimes.contains(r));
			}
		}

		#[test]
		fn credentials_and_profiles_follow_membership() {
			let tenant = snapshot();
			let outsider_id = tenant.users[1].id;
			let principal = user_principal(tenant.tenant_id, outsider_id, Role::User);
			let visible = resolve_visibility(&principal, &tenant);
			assert_eq!(visible.cloud_creds, vec![tenant.cloud_creds[1].clone()]);
			assert_eq!(
				visible.docker_profiles,
				vec![tenant.docker_profiles[1].clone()]
			);
		}

		#[test]
		fn dangling_edge_reference_yields_empty_intersection() {
			let tenant_id = TenantId::generate();
			let mut tenant = TenantSnapshot::new(tenant_id);
			let member = user(tenant_id, Role::User);
			// Project references an edge, a credential, and a profile that do
			// not exist in the tenant.
			let mut p = project(tenant_id, &[member.id], &[EdgeId::generate()]);
			p.cloud_credential_ids = vec![CloudCredsId::generate()];
			p.docker_profile_ids = vec![DockerProfileId::generate()];
			tenant.projects = vec![p];
			tenant.users = vec![member.clone()];
			let principal = user_principal(tenant_id, member.id, Role::User);
			let visible = resolve_visibility(&principal, &tenant);
			assert!(visible.edges.is_empty());
			assert!(visible.data_sources.is_empty());
			assert!(visible.cloud_creds.is_empty());
			assert!(visible.docker_profiles.is_empty());
		}
	}

	mod edges {
		use super::*;

		#[test]
		fn edge_sees_itself_outside_any_project() {
			let tenant_id = TenantId::generate();
			let mut tenant = TenantSnapshot::new(tenant_id);
			let loner = edge(tenant_id);
			tenant.edges = vec![loner.clone()];
			let principal = Principal::Edge {
				edge_id: loner.id,
				tenant_id,
			};
			let visible = resolve_visibility(&principal, &tenant);
			assert_eq!(visible.edges, vec![loner]);
			assert!(visible.member_projects.is_empty());
		}

		#[test]
		fn edge_membership_mirrors_user_derivation() {
			let tenant = snapshot();
			let in_edge = tenant.edges[0].clone();
			let principal = Principal::Edge {
				edge_id: in_edge.id,
				tenant_id: tenant.tenant_id,
			};
			let visible = resolve_visibility(&principal, &tenant);

			assert_eq!(visible.member_projects.len(), 1);
			assert_eq!(visible.member_projects[0].id, tenant.projects[0].id);
			assert_eq!(visible.edges, vec![in_edge]);
			assert_eq!(visible.data_sources, vec![tenant.data_sources[0].clone()]);
			assert_eq!(visible.applications, vec![tenant.applications[0].clone()]);
			assert_eq!(visible.projects, tenant.projects);
		}

		#[test]
		fn edge_has_no_user_self_inclusion() {
			let tenant_id = TenantId::generate();
			let mut tenant = TenantSnapshot::new(tenant_id);
			let loner = edge(tenant_id);
			tenant.edges = vec![loner.clone()];
			tenant.users = vec![user(tenant_id, Role::User)];
			let principal = Principal::Edge {
				edge_id: loner.id,
				tenant_id,
			};
			let visible = resolve_visibility(&principal, &tenant);
			assert!(visible.users.is_empty());
		}
	}

	mod purity {
		use super::*;

		#[test]
		fn resolve_is_idempotent() {
			let tenant = snapshot();
			let principal = user_principal(tenant.tenant_id, tenant.users[0].id, Role::User);
			let first = resolve_visibility(&principal, &tenant);
			let second = resolve_visibility(&principal, &tenant);
			assert_eq!(first, second);
		}
	}
}
