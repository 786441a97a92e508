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

//! Per-event accessors: bind to one raw event, test schema versions by hash,
//! decode against the one that matches.
//!
//! One generic [`EventAccessor`] replaces the hand-written
//! one-class-per-event pattern such catalogs usually generate: the
//! `is_v42`/`as_v42` pairs collapse into [`EventAccessor::is`] and
//! [`EventAccessor::decode_as`] over [`SchemaVersion`] data.

use crate::catalog::SchemaVersion;
use crate::common::{ContentHash, EventName};
use crate::context::{ChainContext, EventContext, RawEvent};
use crate::error::Error;
use crate::value::Value;

/// An accessor bound to one event occurrence for its lifetime. It borrows
/// the event and the chain context, holds no other state, and caches
/// nothing: repeated decode calls re-decode.
#[derive(Debug)]
pub struct EventAccessor<'a, C: ?Sized> {
	chain: &'a C,
	event: &'a RawEvent,
}

impl<'a, C: ChainContext + ?Sized> EventAccessor<'a, C> {
	/// Bind to the context's current event (implicit binding).
	///
	/// The event's logical name must equal `expected`; a mismatch means the
	/// caller misrouted an event and is reported as
	/// [`Error::EventNameMismatch`] rather than silently tolerated.
	pub fn new(ctx: &EventContext<'a, C>, expected: &str) -> Result<Self, Error> {
		Self::with_event(ctx.chain, ctx.event, expected)
	}

	/// Bind to an explicit event that is not the context's current one
	/// (explicit binding, e.g. during batched reprocessing). Same name
	/// invariant as [`EventAccessor::new`].
	pub fn with_event(chain: &'a C, event: &'a RawEvent, expected: &str) -> Result<Self, Error> {
		if event.name.as_str() != expected {
			return Err(Error::EventNameMismatch {
				expected: EventName::from(expected),
				got: event.name.clone(),
			});
		}
		Ok(EventAccessor { chain, event })
	}

	pub fn name(&self) -> &EventName {
		&self.event.name
	}

	pub fn event(&self) -> &RawEvent {
		self.event
	}

	/// The content hash active where the event was emitted, as resolved by
	/// the chain context. Stable for a fixed event.
	pub fn active_hash(&self) -> Option<ContentHash> {
		self.chain.active_content_hash(self.event)
	}

	/// True iff the event's active hash equals `version`'s. Pure; call it
	/// for as many versions as you like. At most one version of a
	/// well-formed catalog entry tests true for a given event.
	pub fn is(&self, version: &SchemaVersion) -> bool {
		self.active_hash().map_or(false, |hash| hash == version.hash)
	}

	/// Decode the event as `version`. Requires [`EventAccessor::is`] to hold
	/// for it: decoding with a non-matching schema would be wrong-shape and
	/// is refused with [`Error::VersionMismatch`] (calling this without a
	/// prior true `is` is a caller defect). Malformed payloads surface as
	/// [`Error::Malformed`].
	pub fn decode_as(&self, version: &SchemaVersion) -> Result<Value, Error> {
		if version.name != self.event.name {
			return Err(Error::EventNameMismatch {
				expected: version.name.clone(),
				got: self.event.name.clone(),
			});
		}
		if !self.is(version) {
			return Err(Error::VersionMismatch {
				name: self.event.name.clone(),
				since: version.since,
				hash: version.hash,
			});
		}
		Ok(self.chain.decode_event(self.event, &version.shape)?)
	}
}
