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

/*!
This module exposes the [`Value`] type and related subtypes, the runtime
representation of decoded event data (much like `serde_json::Value` is a
runtime representation of JSON data). A decoded event is a [`Composite`] at
the top level, named or unnamed per the matched schema's shape.
*/

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A decoded value. Values are built on demand by decoding and never cached;
/// they own their data and borrow nothing from the raw event.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// A named or unnamed set of values.
	Composite(Composite),
	/// An enum variant and its payload.
	Variant(Variant),
	/// An optional value.
	Option(Option<Box<Value>>),
	/// Any of the primitive values we can have.
	Primitive(Primitive),
}

impl Value {
	pub fn bool(val: bool) -> Value {
		Value::Primitive(Primitive::Bool(val))
	}
	pub fn u32(val: u32) -> Value {
		Value::Primitive(Primitive::U32(val))
	}
	pub fn u64(val: u64) -> Value {
		Value::Primitive(Primitive::U64(val))
	}
	pub fn u128(val: u128) -> Value {
		Value::Primitive(Primitive::U128(val))
	}
	pub fn bytes(val: impl Into<Vec<u8>>) -> Value {
		Value::Primitive(Primitive::Bytes(val.into()))
	}
	pub fn account_id(val: [u8; 32]) -> Value {
		Value::Primitive(Primitive::AccountId(val))
	}
	pub fn some(val: Value) -> Value {
		Value::Option(Some(Box::new(val)))
	}
	pub fn none() -> Value {
		Value::Option(None)
	}
	pub fn named_composite<N: Into<String>>(vals: impl IntoIterator<Item = (N, Value)>) -> Value {
		Value::Composite(Composite::Named(vals.into_iter().map(|(n, v)| (n.into(), v)).collect()))
	}
	pub fn unnamed_composite(vals: impl IntoIterator<Item = Value>) -> Value {
		Value::Composite(Composite::Unnamed(vals.into_iter().collect()))
	}
	pub fn variant(name: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Value {
		Value::Variant(Variant { name: name.into(), values: values.into_iter().collect() })
	}

	/// Look up a field by name. `None` unless this is a named composite
	/// carrying the field.
	pub fn field(&self, name: &str) -> Option<&Value> {
		match self {
			Value::Composite(Composite::Named(vals)) => {
				vals.iter().find(|(n, _)| n == name).map(|(_, v)| v)
			}
			_ => None,
		}
	}

	/// Look up a field by position in a composite.
	pub fn at(&self, index: usize) -> Option<&Value> {
		match self {
			Value::Composite(Composite::Named(vals)) => vals.get(index).map(|(_, v)| v),
			Value::Composite(Composite::Unnamed(vals)) => vals.get(index),
			_ => None,
		}
	}
}

/// A named or unnamed set of values. This is what an entire decoded event
/// looks like, and also the payload of a [`Variant`].
#[derive(Debug, Clone, PartialEq)]
pub enum Composite {
	/// Eg `{ owner: .., classId: .. }`
	Named(Vec<(String, Value)>),
	/// Eg `(.., ..)`
	Unnamed(Vec<Value>),
}

impl Composite {
	/// Return the number of values stored in this composite.
	pub fn len(&self) -> usize {
		match self {
			Composite::Named(values) => values.len(),
			Composite::Unnamed(values) => values.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The field names, in order, if this composite is named.
	pub fn names(&self) -> Option<Vec<&str>> {
		match self {
			Composite::Named(values) => Some(values.iter().map(|(n, _)| n.as_str()).collect()),
			Composite::Unnamed(_) => None,
		}
	}
}

/// An enum variant value.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
	/// The name of the variant.
	pub name: String,
	/// Values for each of the variant's fields, empty for unit variants.
	pub values: Vec<Value>,
}

/// A primitive value.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
	Bool(bool),
	U32(u32),
	U64(u64),
	U128(u128),
	Bytes(Vec<u8>),
	AccountId([u8; 32]),
}

// Values serialize to the data they represent, not to a description of the
// enum wrappers around it: named composites become maps, unnamed ones become
// sequences, byte values become 0x-prefixed hex strings.

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Value::Composite(val) => val.serialize(serializer),
			Value::Variant(val) => val.serialize(serializer),
			Value::Option(Some(val)) => serializer.serialize_some(val),
			Value::Option(None) => serializer.serialize_none(),
			Value::Primitive(val) => val.serialize(serializer),
		}
	}
}

impl Serialize for Composite {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Composite::Named(values) => {
				serializer.collect_map(values.iter().map(|(name, value)| (name, value)))
			}
			Composite::Unnamed(values) => serializer.collect_seq(values.iter()),
		}
	}
}

impl Serialize for Variant {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		if self.values.is_empty() {
			serializer.serialize_str(&self.name)
		} else {
			let mut map = serializer.serialize_map(Some(1))?;
			map.serialize_entry(&self.name, &self.values)?;
			map.end()
		}
	}
}

impl Serialize for Primitive {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Primitive::Bool(val) => serializer.serialize_bool(*val),
			Primitive::U32(val) => serializer.serialize_u32(*val),
			Primitive::U64(val) => serializer.serialize_u64(*val),
			Primitive::U128(val) => serializer.serialize_u128(*val),
			Primitive::Bytes(val) => serializer.serialize_str(&format!("0x{}", hex::encode(val))),
			Primitive::AccountId(val) => serializer.serialize_str(&format!("0x{}", hex::encode(val))),
		}
	}
}
