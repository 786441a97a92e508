// Copyright 2022-2023 the subvent authors.
// This file is part of subvent.
//
// subvent is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// subvent is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with subvent.  If not, see <http://www.gnu.org/licenses/>.

//! The schema catalog: every historical layout we know how to decode, keyed
//! by logical event name.
//!
//! A catalog is authored once, at process start, and only read afterwards;
//! shared references to it can be used from any number of threads. The
//! invariant that no two schemas for the same name share a content hash is
//! enforced at registration time, so a violation is an authoring bug caught
//! when the catalog is built (or by its tests), never a condition decode
//! paths have to handle.

use crate::common::{ContentHash, EventName, HashError, SpecVersion};
use crate::shape::Shape;
use std::collections::HashMap;

/// One historical layout of one event: the runtime version that introduced
/// it, the content hash identifying it exactly, and the decoded shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaVersion {
	pub name: EventName,
	/// The spec version this layout first appeared in. Orders the catalog
	/// entry; selection is by hash equality, never by this field.
	pub since: SpecVersion,
	pub hash: ContentHash,
	pub shape: Shape,
}

impl SchemaVersion {
	pub fn new(name: impl Into<EventName>, since: SpecVersion, hash: ContentHash, shape: Shape) -> Self {
		SchemaVersion { name: name.into(), since, hash, shape }
	}
}

/// An error registering a schema with a [`SchemaCatalog`]. These indicate
/// bugs in the catalog data itself, not runtime conditions.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
	#[error("{name} already has a schema with hash {hash}")]
	DuplicateHash { name: EventName, hash: ContentHash },
	#[error("{name} already has a schema introduced at spec version {since}")]
	DuplicateVersion { name: EventName, since: SpecVersion },
	#[error(transparent)]
	Hash(#[from] HashError),
}

/// Read-only (after construction) registry of known schemas per event name.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
	entries: HashMap<EventName, Vec<SchemaVersion>>,
}

impl SchemaCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a schema, keeping the per-name list ordered by introduction
	/// version. Rejects a hash or introduction version already present for
	/// the same name.
	pub fn register(&mut self, version: SchemaVersion) -> Result<(), CatalogError> {
		let list = self.entries.entry(version.name.clone()).or_default();
		if list.iter().any(|v| v.hash == version.hash) {
			return Err(CatalogError::DuplicateHash { name: version.name, hash: version.hash });
		}
		if list.iter().any(|v| v.since == version.since) {
			return Err(CatalogError::DuplicateVersion { name: version.name, since: version.since });
		}
		let at = list.iter().position(|v| v.since > version.since).unwrap_or(list.len());
		list.insert(at, version);
		Ok(())
	}

	/// All known schemas for `name`, oldest first. Unknown names yield an
	/// empty slice: an event we have no schemas for is a legitimate
	/// "nothing to decode" state, not an error.
	pub fn schemas_for(&self, name: &str) -> &[SchemaVersion] {
		self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
	}

	/// The event names the catalog knows about, in no particular order.
	pub fn names(&self) -> impl Iterator<Item = &EventName> {
		self.entries.keys()
	}

	/// Total number of registered schemas across all names.
	pub fn len(&self) -> usize {
		self.entries.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
