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

use crate::common::{ContentHash, EventName, SpecVersion};
use crate::decode::DecodeError;
use thiserror::Error;

/// Errors from binding to and decoding events.
///
/// The first two kinds are contract violations: the caller routed the wrong
/// event to an accessor, or decoded against a schema whose guard is false.
/// They indicate a defect in the wiring and should fail the offending unit
/// of work loudly rather than be retried. The last two are expected
/// operational conditions a pipeline handles per event, typically by logging
/// and skipping.
#[derive(Debug, Error)]
pub enum Error {
	/// An accessor expecting one logical event name was handed an event
	/// carrying another.
	#[error("accessor for '{expected}' was handed event '{got}'")]
	EventNameMismatch { expected: EventName, got: EventName },

	/// `decode_as` was called for a schema whose hash does not match the
	/// event. Decoding anyway would produce silently corrupted data, so it
	/// is refused.
	#[error("event '{name}' does not match schema v{since} ({hash})")]
	VersionMismatch { name: EventName, since: SpecVersion, hash: ContentHash },

	/// No registered schema's hash matches the event. Common whenever
	/// runtime upgrades outpace the catalog.
	#[error("no registered schema for '{name}' matches active hash {hash:?}")]
	UnsupportedVersion { name: EventName, hash: Option<ContentHash> },

	/// The payload could not be parsed against the schema its hash
	/// selected; the catalog and the chain's metadata disagree.
	#[error(transparent)]
	Malformed(#[from] DecodeError),
}
