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

//! Convenience layer over [`EventAccessor`]: scan the catalog entry for an
//! event's name and decode against the first (and, per the catalog's
//! uniqueness invariant, only) schema whose hash matches.

use crate::accessor::EventAccessor;
use crate::catalog::{SchemaCatalog, SchemaVersion};
use crate::context::ChainContext;
use crate::error::Error;
use crate::value::Value;

/// A successful resolution: the matching schema and the value decoded with
/// it.
#[derive(Debug)]
pub struct Resolved<'a> {
	pub version: &'a SchemaVersion,
	pub value: Value,
}

/// Find the schema matching `accessor`'s event and decode with it.
///
/// Versions are tested in introduction order and the scan short-circuits on
/// the first hash match; a second match could only mean the catalog's
/// uniqueness invariant was violated, and scanning further cannot recover
/// correctness. `Ok(None)` means no registered schema matches — an expected
/// condition whenever runtime upgrades outpace the catalog — while decode
/// failures on the matched schema propagate as [`Error::Malformed`].
pub fn resolve<'a, C: ChainContext + ?Sized>(
	catalog: &'a SchemaCatalog,
	accessor: &EventAccessor<'_, C>,
) -> Result<Option<Resolved<'a>>, Error> {
	for version in catalog.schemas_for(accessor.name().as_str()) {
		if accessor.is(version) {
			log::trace!(
				"{} at block {} matches schema v{}",
				accessor.name(),
				accessor.event().block,
				version.since
			);
			let value = accessor.decode_as(version)?;
			return Ok(Some(Resolved { version, value }));
		}
	}
	Ok(None)
}

/// Like [`resolve`], but treats an unrecognized shape as
/// [`Error::UnsupportedVersion`], for callers that consider every event of
/// this name decodable.
pub fn resolve_required<'a, C: ChainContext + ?Sized>(
	catalog: &'a SchemaCatalog,
	accessor: &EventAccessor<'_, C>,
) -> Result<Resolved<'a>, Error> {
	match resolve(catalog, accessor)? {
		Some(resolved) => Ok(resolved),
		None => {
			log::warn!(
				"no schema for {} (active hash {:?}) at block {}",
				accessor.name(),
				accessor.active_hash(),
				accessor.event().block
			);
			Err(Error::UnsupportedVersion {
				name: accessor.name().clone(),
				hash: accessor.active_hash(),
			})
		}
	}
}
