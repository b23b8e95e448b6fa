// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Capability scope grammar.
//!
//! A scope is a string `"<resource>.<op>"` with `<op>` one of `c`, `r`, `u`,
//! `d`, or the wildcard `a` meaning all four CRUD operations on the
//! resource. Endpoints declare a [`RequiredScopes`] specification: an
//! ordered OR-list of alternatives, each alternative a comma-joined AND-list
//! of scopes. Grant sets are held as a [`ScopeSet`], which expands the
//! wildcard at insertion time so that coverage checks are plain membership.

use crate::error::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A single CRUD operation, or the wildcard covering all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScopeOp {
	Create,
	Read,
	Update,
	Delete,
	/// Wildcard: all of create, read, update, delete.
	All,
}

impl ScopeOp {
	/// The four concrete CRUD operations, in grammar order.
	pub fn crud() -> &'static [ScopeOp] {
		&[
			ScopeOp::Create,
			ScopeOp::Read,
			ScopeOp::Update,
			ScopeOp::Delete,
		]
	}

	/// The single-letter grammar form.
	pub fn as_char(&self) -> char {
		match self {
			ScopeOp::Create => 'c',
			ScopeOp::Read => 'r',
			ScopeOp::Update => 'u',
			ScopeOp::Delete => 'd',
			ScopeOp::All => 'a',
		}
	}
}

impl fmt::Display for ScopeOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_char())
	}
}

/// A capability token of the form `resource.op`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Scope {
	pub resource: String,
	pub op: ScopeOp,
}

impl Scope {
	/// Build a scope from its parts.
	pub fn new(resource: impl Into<String>, op: ScopeOp) -> Self {
		Self {
			resource: resource.into(),
			op,
		}
	}
}

impl FromStr for Scope {
	type Err = AuthError;

	fn from_str(s: &str) -> AuthResult<Self> {
		let (resource, op) = s
			.rsplit_once('.')
			.ok_or_else(|| AuthError::MalformedScope(s.to_string()))?;
		if resource.is_empty() {
			return Err(AuthError::MalformedScope(s.to_string()));
		}
		let op = match op {
			"c" => ScopeOp::Create,
			"r" => ScopeOp::Read,
			"u" => ScopeOp::Update,
			"d" => ScopeOp::Delete,
			"a" => ScopeOp::All,
			_ => return Err(AuthError::MalformedScope(s.to_string())),
		};
		Ok(Scope::new(resource, op))
	}
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.resource, self.op)
	}
}

impl TryFrom<String> for Scope {
	type Error = AuthError;

	fn try_from(s: String) -> AuthResult<Self> {
		s.parse()
	}
}

impl From<Scope> for String {
	fn from(scope: Scope) -> Self {
		scope.to_string()
	}
}

/// An immutable, wildcard-expanded set of granted scopes.
///
/// Inserting `res.a` records `res.c`, `res.r`, `res.u`, and `res.d`, so
/// [`ScopeSet::covers`] is exact membership afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet(BTreeSet<Scope>);

impl ScopeSet {
	/// An empty grant set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse and expand a list of scope strings.
	pub fn parse(scopes: &[impl AsRef<str>]) -> AuthResult<Self> {
		let mut set = Self::new();
		for s in scopes {
			set.insert(s.as_ref().parse()?);
		}
		Ok(set)
	}

	/// Insert one scope, expanding the wildcard.
	pub fn insert(&mut self, scope: Scope) {
		match scope.op {
			ScopeOp::All => {
				for op in ScopeOp::crud() {
					self.0.insert(Scope::new(scope.resource.clone(), *op));
				}
			}
			_ => {
				self.0.insert(scope);
			}
		}
	}

	/// Returns true if the grant covers the given concrete scope. A wildcard
	/// query is covered only when all four CRUD operations are.
	pub fn covers(&self, scope: &Scope) -> bool {
		match scope.op {
			ScopeOp::All => ScopeOp::crud()
				.iter()
				.all(|op| self.0.contains(&Scope::new(scope.resource.clone(), *op))),
			_ => self.0.contains(scope),
		}
	}

	/// Number of concrete scopes granted.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no scopes are granted.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterate over the concrete granted scopes.
	pub fn iter(&self) -> impl Iterator<Item = &Scope> {
		self.0.iter()
	}
}

impl FromIterator<Scope> for ScopeSet {
	fn from_iter<T: IntoIterator<Item = Scope>>(iter: T) -> Self {
		let mut set = Self::new();
		for scope in iter {
			set.insert(scope);
		}
		set
	}
}

/// One AND-list of scopes that must all be granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeAlternative(Vec<Scope>);

impl ScopeAlternative {
	/// Parse a comma-joined AND-list such as `"datastream.c,datastream.r"`.
	pub fn parse(s: &str) -> AuthResult<Self> {
		let scopes = s
			.split(',')
			.map(|part| part.trim().parse())
			.collect::<AuthResult<Vec<Scope>>>()?;
		if scopes.is_empty() {
			return Err(AuthError::MalformedScope(s.to_string()));
		}
		Ok(Self(scopes))
	}

	/// Returns true if every scope of the alternative is covered.
	pub fn satisfied_by(&self, granted: &ScopeSet) -> bool {
		self.0.iter().all(|scope| granted.covers(scope))
	}

	/// The scopes of this alternative.
	pub fn scopes(&self) -> &[Scope] {
		&self.0
	}
}

/// The required-scope specification an endpoint declares: an ordered
/// OR-list of [`ScopeAlternative`]s. Satisfying any one alternative
/// satisfies the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredScopes(Vec<ScopeAlternative>);

impl RequiredScopes {
	/// Parse the routing-configuration form: each element a comma-joined
	/// AND-list, the array itself the OR-list.
	pub fn parse(alternatives: &[impl AsRef<str>]) -> AuthResult<Self> {
		let alts = alternatives
			.iter()
			.map(|s| ScopeAlternative::parse(s.as_ref()))
			.collect::<AuthResult<Vec<_>>>()?;
		Ok(Self(alts))
	}

	/// Returns true if any alternative is fully covered by the grant.
	///
	/// An empty specification requires nothing and is always satisfied.
	pub fn satisfied_by(&self, granted: &ScopeSet) -> bool {
		self.0.is_empty() || self.0.iter().any(|alt| alt.satisfied_by(granted))
	}

	/// The alternatives of this specification.
	pub fn alternatives(&self) -> &[ScopeAlternative] {
		&self.0
	}
}
