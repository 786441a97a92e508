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

//! The chain-facing seam: raw events as received from upstream, and the
//! [`ChainContext`] collaborator that knows which layout hash was active
//! when an event was emitted.
//!
//! Chain connectivity, block retrieval and metadata extraction all live
//! behind [`ChainContext`]; this crate only consumes the trait. A ready-made
//! implementation backed by per-spec-version hash tables is provided as
//! [`HashRegistry`] for pipelines that extract those tables from runtime
//! metadata ahead of time.

use crate::common::{ContentHash, EventName, SpecVersion};
use crate::decode::{self, DecodeError};
use crate::shape::Shape;
use crate::value::Value;
use std::collections::HashMap;

/// One event occurrence as observed on chain. Immutable once received.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
	/// The logical name the event was emitted under.
	pub name: EventName,
	/// The SCALE encoded event payload.
	pub data: Vec<u8>,
	/// Block the event was emitted in. Carried for diagnostics.
	pub block: u64,
	/// Spec version of the runtime that produced the block.
	pub spec_version: SpecVersion,
}

impl RawEvent {
	pub fn new(name: impl Into<EventName>, data: Vec<u8>, block: u64, spec_version: SpecVersion) -> Self {
		RawEvent { name: name.into(), data, block, spec_version }
	}
}

/// The collaborator that resolves layout hashes and performs raw byte
/// decoding for events. Implementations must be deterministic: for a fixed
/// event, repeated calls return the same answers and never mutate the event.
///
/// If the implementation wraps a connection or cached metadata that needs
/// serialized access, that locking discipline is its own concern; nothing in
/// this crate holds locks around these calls.
pub trait ChainContext {
	/// The content hash of the layout `event`'s runtime encoded it with, or
	/// `None` if this context cannot name one (say, because it holds no
	/// table for that runtime version). `None` matches no schema, so such
	/// events surface as unsupported rather than wrongly decoded.
	fn active_content_hash(&self, event: &RawEvent) -> Option<ContentHash>;

	/// Decode `event`'s payload against `shape`. Called only once a schema
	/// has been selected by hash; failures here mean the payload is
	/// malformed with respect to the layout its hash promised.
	fn decode_event(&self, event: &RawEvent, shape: &Shape) -> Result<Value, DecodeError>;
}

/// The context an event arrives in: the chain collaborator plus the event
/// currently being processed. Accessors built from one of these bind to the
/// current event implicitly.
#[derive(Debug)]
pub struct EventContext<'a, C: ?Sized> {
	pub chain: &'a C,
	pub event: &'a RawEvent,
}

impl<'a, C: ChainContext + ?Sized> EventContext<'a, C> {
	pub fn new(chain: &'a C, event: &'a RawEvent) -> Self {
		EventContext { chain, event }
	}
}

/// A [`ChainContext`] backed by static hash tables, one per runtime spec
/// version. Register each version's `name → hash` table up front (extracted
/// from that runtime's metadata), then decode any number of events against
/// it. Decoding itself is delegated to [`crate::decode`].
#[derive(Debug, Clone, Default)]
pub struct HashRegistry {
	versions: HashMap<SpecVersion, HashMap<EventName, ContentHash>>,
}

impl HashRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register the event hash table of one runtime version. Registering the
	/// same version again replaces its table.
	pub fn register_version<N: Into<EventName>>(
		&mut self,
		version: SpecVersion,
		hashes: impl IntoIterator<Item = (N, ContentHash)>,
	) {
		let table = hashes.into_iter().map(|(name, hash)| (name.into(), hash)).collect();
		self.versions.insert(version, table);
	}

	pub fn has_version(&self, version: &SpecVersion) -> bool {
		self.versions.contains_key(version)
	}
}

impl ChainContext for HashRegistry {
	fn active_content_hash(&self, event: &RawEvent) -> Option<ContentHash> {
		self.versions.get(&event.spec_version)?.get(event.name.as_str()).copied()
	}

	fn decode_event(&self, event: &RawEvent, shape: &Shape) -> Result<Value, DecodeError> {
		decode::decode_event_data(&mut &*event.data, shape)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn hash(byte: u8) -> ContentHash {
		ContentHash::from_bytes([byte; 32])
	}

	#[test]
	fn registry_resolves_by_spec_version_and_name() {
		let mut registry = HashRegistry::new();
		registry.register_version(42, [("NFT.InstanceMinted", hash(1))]);
		registry.register_version(62, [("NFT.InstanceMinted", hash(2))]);
		assert!(registry.has_version(&42));
		assert!(!registry.has_version(&55));

		let event = RawEvent::new("NFT.InstanceMinted", vec![], 100, 62);
		assert_eq!(registry.active_content_hash(&event), Some(hash(2)));

		// Same event at an earlier runtime resolves to the older layout.
		let event = RawEvent::new("NFT.InstanceMinted", vec![], 10, 42);
		assert_eq!(registry.active_content_hash(&event), Some(hash(1)));

		// Unknown runtime version or name: no hash, not a panic.
		let event = RawEvent::new("NFT.InstanceMinted", vec![], 50, 55);
		assert_eq!(registry.active_content_hash(&event), None);
		let event = RawEvent::new("NFT.ClassCreated", vec![], 100, 62);
		assert_eq!(registry.active_content_hash(&event), None);
	}
}
