// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed ID newtypes for tenant entities.
//!
//! Every entity kind gets its own UUID wrapper so that an [`EdgeId`] can never
//! be passed where a [`ProjectId`] is expected. All ID types serialize
//! transparently as UUID strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// The all-zero ID, used as an audit placeholder when a token
			/// carries no identity claim.
			pub fn nil() -> Self {
				Self(Uuid::nil())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(TenantId, "Unique identifier for a tenant.");
define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(EdgeId, "Unique identifier for an edge device.");
define_id_type!(ProjectId, "Unique identifier for a project.");
define_id_type!(CategoryId, "Unique identifier for a category.");
define_id_type!(DataSourceId, "Unique identifier for a data source.");
define_id_type!(CloudCredsId, "Unique identifier for a cloud credential profile.");
define_id_type!(DockerProfileId, "Unique identifier for a container registry profile.");
define_id_type!(ScriptId, "Unique identifier for a script.");
define_id_type!(ScriptRuntimeId, "Unique identifier for a script runtime.");
define_id_type!(ApplicationId, "Unique identifier for an application.");
define_id_type!(DataStreamId, "Unique identifier for a data stream.");
