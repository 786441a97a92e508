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

//! Shape-driven decoding of SCALE encoded event payloads into [`Value`]s.
//!
//! Everything in here presumes the right [`Shape`] has already been selected
//! by content hash; a payload that does not fit the shape it is decoded
//! against is malformed, which is a distinct condition from the hash not
//! matching any known schema.

use crate::shape::{FieldType, Shape};
use crate::value::Value;
use codec::Decode;

/// An enum of the possible errors that can be returned from attempting to
/// decode a payload against a shape. All of these mean the payload is
/// malformed with respect to the schema the content hash promised.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecodeError {
	#[error("failed to decode: {0}")]
	Codec(#[from] codec::Error),
	#[error("failed to decode: {0} bytes of the payload were not consumed")]
	ExcessBytes(usize),
	#[error("variant index {index} out of range for a field with {count} variants")]
	UnknownVariantIndex { index: u8, count: usize },
	#[error("unexpected Option discriminant {0}")]
	UnexpectedOptionFlag(u8),
}

/// Decode a full event payload against `shape`. The payload must be consumed
/// exactly: leftover bytes mean the shape cannot be the one the payload was
/// encoded with, and are reported rather than ignored.
pub fn decode_event_data(data: &mut &[u8], shape: &Shape) -> Result<Value, DecodeError> {
	log::trace!("decoding {} field(s)", shape.len());
	let value = match shape {
		Shape::Tuple(fields) => {
			let values =
				fields.iter().map(|ty| decode_field(data, ty)).collect::<Result<Vec<_>, _>>()?;
			Value::unnamed_composite(values)
		}
		Shape::Named(fields) => {
			let mut values = Vec::with_capacity(fields.len());
			for (name, ty) in fields {
				values.push((name.clone(), decode_field(data, ty)?));
			}
			Value::named_composite(values)
		}
	};
	if !data.is_empty() {
		return Err(DecodeError::ExcessBytes(data.len()));
	}
	Ok(value)
}

fn decode_field(data: &mut &[u8], ty: &FieldType) -> Result<Value, DecodeError> {
	match ty {
		FieldType::Bool => Ok(Value::bool(bool::decode(data)?)),
		FieldType::U32 => Ok(Value::u32(u32::decode(data)?)),
		FieldType::U64 => Ok(Value::u64(u64::decode(data)?)),
		FieldType::U128 => Ok(Value::u128(u128::decode(data)?)),
		FieldType::Bytes => Ok(Value::bytes(<Vec<u8>>::decode(data)?)),
		FieldType::AccountId => Ok(Value::account_id(<[u8; 32]>::decode(data)?)),
		FieldType::Option(inner) => match u8::decode(data)? {
			0 => Ok(Value::none()),
			1 => Ok(Value::some(decode_field(data, inner)?)),
			flag => Err(DecodeError::UnexpectedOptionFlag(flag)),
		},
		FieldType::Variant(variants) => {
			let index = u8::decode(data)?;
			let def = variants
				.get(index as usize)
				.ok_or(DecodeError::UnknownVariantIndex { index, count: variants.len() })?;
			let values = def
				.fields
				.iter()
				.map(|field| decode_field(data, field))
				.collect::<Result<Vec<_>, _>>()?;
			Ok(Value::variant(def.name.clone(), values))
		}
	}
}
