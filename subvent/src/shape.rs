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

//! Structural descriptions of decoded event values.
//!
//! A [`Shape`] is the schema-side counterpart of a [`crate::Value`]: it says
//! whether an event's fields are positional or named, and what type each
//! field carries on the wire.

/// The decoded structure of one event layout.
///
/// Older runtimes emitted events as anonymous tuples; later ones switched to
/// named fields. Both occur in real catalogs, often for the same logical
/// event across an upgrade boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
	/// Positional fields, e.g. `(AccountId, u128, u128)`.
	Tuple(Vec<FieldType>),
	/// Named fields, e.g. `{ owner, classId, instanceId }`.
	Named(Vec<(String, FieldType)>),
}

impl Shape {
	pub fn tuple(fields: impl IntoIterator<Item = FieldType>) -> Self {
		Shape::Tuple(fields.into_iter().collect())
	}

	pub fn named<N: Into<String>>(fields: impl IntoIterator<Item = (N, FieldType)>) -> Self {
		Shape::Named(fields.into_iter().map(|(name, ty)| (name.into(), ty)).collect())
	}

	/// The number of top-level fields.
	pub fn len(&self) -> usize {
		match self {
			Shape::Tuple(fields) => fields.len(),
			Shape::Named(fields) => fields.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// The wire type of a single event field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
	Bool,
	U32,
	U64,
	U128,
	/// Variable-length byte sequence, compact-length prefixed.
	Bytes,
	/// A raw 32-byte account id.
	AccountId,
	/// SCALE `Option<T>`: one flag byte, then the inner value if set.
	Option(Box<FieldType>),
	/// An enum field; the wire carries the variant index followed by the
	/// variant's field values.
	Variant(Vec<VariantDef>),
}

impl FieldType {
	pub fn option(inner: FieldType) -> Self {
		FieldType::Option(Box::new(inner))
	}
}

/// One variant of a [`FieldType::Variant`] field, in index order.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantDef {
	pub name: String,
	pub fields: Vec<FieldType>,
}

impl VariantDef {
	/// A variant with no payload.
	pub fn unit(name: impl Into<String>) -> Self {
		VariantDef { name: name.into(), fields: Vec::new() }
	}

	/// A variant carrying positional values.
	pub fn tuple(name: impl Into<String>, fields: impl IntoIterator<Item = FieldType>) -> Self {
		VariantDef { name: name.into(), fields: fields.into_iter().collect() }
	}
}
