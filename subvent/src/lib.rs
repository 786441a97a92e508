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

//! Decode chain events emitted by any historical runtime version.
//!
//! A runtime upgrade may silently change the binary layout of the events a
//! pallet emits. Every known layout of an event is identified by an opaque
//! [`ContentHash`]; a [`SchemaCatalog`] holds, per logical event name (such as
//! `"NFT.InstanceMinted"`), the ordered list of layouts seen over the chain's
//! history. Given a [`RawEvent`] and a [`ChainContext`] that knows which hash
//! was active at the event's block, an [`EventAccessor`] tests each
//! [`SchemaVersion`] by hash equality and decodes against exactly the one that
//! matches, refusing to decode with the wrong schema rather than producing
//! corrupted data.
//!
//! See [`resolver::resolve`] for the usual entry point, and [`basilisk`] for a
//! ready-made catalog of the Basilisk NFT marketplace pallets.

#![forbid(unsafe_code)]

mod accessor;
mod common;
mod error;

pub mod basilisk;
pub mod catalog;
pub mod context;
pub mod decode;
pub mod resolver;
pub mod shape;
pub mod value;

pub use accessor::EventAccessor;
pub use catalog::{CatalogError, SchemaCatalog, SchemaVersion};
pub use common::{ContentHash, EventName, HashError, SpecVersion};
pub use context::{ChainContext, EventContext, HashRegistry, RawEvent};
pub use decode::DecodeError;
pub use error::Error;
pub use resolver::{resolve, resolve_required, Resolved};
pub use shape::{FieldType, Shape, VariantDef};
pub use value::{Composite, Primitive, Value};
