// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Categories and category label matching.
//!
//! Categories are tenant-scoped key/value vocabularies. Edges carry category
//! labels; projects may select edges dynamically with category selectors.

use crate::ids::{CategoryId, TenantId};
use serde::{Deserialize, Serialize};

/// A single category assignment: one value of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
	/// The category being referenced.
	pub id: CategoryId,
	/// The selected value within that category.
	pub value: String,
}

/// A tenant-scoped category with its allowed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
	pub id: CategoryId,
	pub tenant_id: TenantId,
	pub name: String,
	pub purpose: String,
	/// The values an edge label may take for this category.
	pub values: Vec<String>,
}

/// Checks whether a set of labels satisfies a set of selectors.
///
/// Values within the same category have OR semantics; values across
/// different categories have AND semantics. Empty labels or empty selectors
/// never match.
pub fn category_match(labels: &[CategoryInfo], selectors: &[CategoryInfo]) -> bool {
	if labels.is_empty() || selectors.is_empty() {
		return false;
	}

	let mut matched: std::collections::HashSet<CategoryId> = std::collections::HashSet::new();
	let mut all: std::collections::HashSet<CategoryId> = std::collections::HashSet::new();

	for selector in selectors {
		all.insert(selector.id);
		if matched.contains(&selector.id) {
			continue;
		}
		if labels
			.iter()
			.any(|label| label.id == selector.id && label.value == selector.value)
		{
			matched.insert(selector.id);
		}
	}

	matched.len() == all.len()
}

/// Checks that every selector references a known category and one of its
/// allowed values.
///
/// Selectors are written against the tenant's category vocabulary; a
/// selector naming an unknown category or a value outside the category's
/// `values` list can never match any well-formed label and indicates a
/// stale or corrupted project definition.
pub fn selectors_are_valid(categories: &[Category], selectors: &[CategoryInfo]) -> bool {
	selectors.iter().all(|selector| {
		categories
			.iter()
			.any(|cat| cat.id == selector.id && cat.values.iter().any(|v| *v == selector.value))
	})
}
