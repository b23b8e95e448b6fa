// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project edge-membership resolution.
//!
//! A project names its member edges either explicitly (`edge_ids`) or
//! dynamically through category selectors matched against edge labels. The
//! [`MembershipResolver`] trait makes that choice an explicit seam:
//! [`SelectorMembership`] dispatches on the project's selector type, while
//! [`ExplicitList`] reproduces the legacy behavior of ignoring selectors
//! entirely for callers that need to replay it.

use fleet_common_model::{category_match, Edge, EdgeId, EdgeSelectorType, Project};

/// Resolves which edges belong to a project.
pub trait MembershipResolver {
	/// The member edge IDs of `project`, drawn from the tenant's `edges`.
	fn resolve_edges(&self, project: &Project, edges: &[Edge]) -> Vec<EdgeId>;
}

/// Membership from the project's explicit `edge_ids` list only.
///
/// IDs that reference no known edge are dropped; a dangling reference is an
/// empty intersection, not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitList;

impl MembershipResolver for ExplicitList {
	fn resolve_edges(&self, project: &Project, edges: &[Edge]) -> Vec<EdgeId> {
		project
			.edge_ids
			.iter()
			.copied()
			.filter(|id| edges.iter().any(|edge| edge.id == *id))
			.collect()
	}
}

/// Membership from category selectors matched against edge labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategorySelector;

impl MembershipResolver for CategorySelector {
	fn resolve_edges(&self, project: &Project, edges: &[Edge]) -> Vec<EdgeId> {
		edges
			.iter()
			.filter(|edge| category_match(&edge.labels, &project.edge_selectors))
			.map(|edge| edge.id)
			.collect()
	}
}

/// The default resolver: dispatches on the project's `edge_selector_type`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorMembership;

impl MembershipResolver for SelectorMembership {
	fn resolve_edges(&self, project: &Project, edges: &[Edge]) -> Vec<EdgeId> {
		match project.edge_selector_type {
			EdgeSelectorType::Explicit => ExplicitList.resolve_edges(project, edges),
			EdgeSelectorType::Category => CategorySelector.resolve_edges(project, edges),
		}
	}
}
