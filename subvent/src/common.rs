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

//! Identifiers shared across the crate: logical event names, runtime spec
//! versions and content hashes.

use std::borrow::Borrow;
use std::fmt;

/// The version of a runtime, as reported by the chain. Schemas are introduced
/// at a spec version and stay valid until the next layout-changing upgrade.
pub type SpecVersion = u32;

/// Stable, human-readable identifier of an event kind in `"Pallet.Event"`
/// form, independent of the binary encoding any particular runtime uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventName(String);

impl EventName {
	pub fn new(name: impl Into<String>) -> Self {
		EventName(name.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The `(pallet, event)` halves of the name, if it is dotted.
	pub fn split(&self) -> Option<(&str, &str)> {
		self.0.split_once('.')
	}
}

impl From<&str> for EventName {
	fn from(name: &str) -> Self {
		EventName(name.to_string())
	}
}

impl From<String> for EventName {
	fn from(name: String) -> Self {
		EventName(name)
	}
}

impl Borrow<str> for EventName {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for EventName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Opaque identifier of one exact binary layout of an event.
///
/// Hashes are compared for equality only; they carry no ordering semantics.
/// Two hashes being equal means the wire shape is byte-for-byte identical,
/// whichever runtime versions produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
	pub fn from_bytes(bytes: [u8; 32]) -> Self {
		ContentHash(bytes)
	}

	/// Parse a hash from hex, with or without a `0x` prefix.
	pub fn from_hex(s: &str) -> Result<Self, HashError> {
		let s = s.strip_prefix("0x").unwrap_or(s);
		let bytes = hex::decode(s)?;
		let bytes: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| HashError::BadLength(b.len()))?;
		Ok(ContentHash(bytes))
	}

	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}
}

impl fmt::Display for ContentHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(self.0))
	}
}

impl fmt::Debug for ContentHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ContentHash({self})")
	}
}

/// An error parsing a [`ContentHash`] from hex.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HashError {
	#[error("invalid hex: {0}")]
	Hex(#[from] hex::FromHexError),
	#[error("content hashes are 32 bytes, got {0}")]
	BadLength(usize),
}

#[cfg(test)]
mod tests {
	use super::*;

	const MINTED_V42: &str = "eb2d7da6cd031b1051bd4c0ebcbe8cd70b244f54737e21a7f8279dccee6fa006";

	#[test]
	fn hash_round_trips_through_hex() {
		let hash = ContentHash::from_hex(MINTED_V42).expect("valid hash");
		assert_eq!(hash.to_string(), format!("0x{MINTED_V42}"));
		assert_eq!(ContentHash::from_hex(&hash.to_string()).expect("0x-prefixed form parses"), hash);
	}

	#[test]
	fn hash_rejects_wrong_length() {
		assert!(matches!(ContentHash::from_hex("ab1234"), Err(HashError::BadLength(3))));
		assert!(matches!(ContentHash::from_hex("not hex at all"), Err(HashError::Hex(_))));
	}

	#[test]
	fn event_name_splits_on_the_first_dot() {
		let name = EventName::from("Marketplace.OfferAccepted");
		assert_eq!(name.split(), Some(("Marketplace", "OfferAccepted")));
		assert_eq!(EventName::from("NoDot").split(), None);
	}
}
