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

//! End-to-end decoding against the built-in Basilisk catalog: a registry of
//! per-runtime hash tables plays the chain context, and payloads are
//! SCALE-encoded fixtures.

use codec::Encode;
use subvent::{
	basilisk, resolve, resolve_required, ContentHash, Error, EventAccessor, EventContext,
	HashRegistry, RawEvent, SchemaCatalog, Value,
};

const MINTED: &str = "NFT.InstanceMinted";
const MINTED_V42: &str = "eb2d7da6cd031b1051bd4c0ebcbe8cd70b244f54737e21a7f8279dccee6fa006";
const MINTED_V62: &str = "cbf0740ecac063f0cc91759153cc494f3d948025e716ccd16da079129444cc1d";

fn catalog() -> SchemaCatalog {
	basilisk::catalog().expect("built-in catalog is well-formed")
}

fn hash(hex: &str) -> ContentHash {
	ContentHash::from_hex(hex).expect("valid hash hex")
}

/// A registry covering the v42 and v62 runtimes for the minted event, plus
/// a v99 runtime whose layout hash the catalog has never heard of.
fn registry() -> HashRegistry {
	let mut registry = HashRegistry::new();
	registry.register_version(42, [(MINTED, hash(MINTED_V42))]);
	registry.register_version(62, [(MINTED, hash(MINTED_V62))]);
	registry.register_version(99, [(MINTED, ContentHash::from_bytes([0xde; 32]))]);
	registry
}

/// `{owner, classId, instanceId}`, the three-field layout active from v62.
fn minted_v62_event() -> RawEvent {
	let payload = ([7u8; 32], 3u128, 1234u128).encode();
	RawEvent::new(MINTED, payload, 1_500_000, 62)
}

#[test]
fn minted_event_decodes_with_exactly_its_own_schema() {
	let _ = pretty_env_logger::try_init();
	let catalog = catalog();
	let registry = registry();
	let event = minted_v62_event();
	let accessor = EventAccessor::with_event(&registry, &event, MINTED).expect("name matches");

	// Exactly one registered schema tests true, and it is the v62 one.
	let matching: Vec<_> =
		catalog.schemas_for(MINTED).iter().filter(|v| accessor.is(v)).collect();
	assert_eq!(matching.len(), 1);
	assert_eq!(matching[0].since, 62);

	let value = accessor.decode_as(matching[0]).expect("guarded decode succeeds");
	assert_eq!(value.field("owner"), Some(&Value::account_id([7; 32])));
	assert_eq!(value.field("classId"), Some(&Value::u128(3)));
	assert_eq!(value.field("instanceId"), Some(&Value::u128(1234)));

	// The field set matches the shape exactly: no extra, no missing.
	match value {
		Value::Composite(composite) => {
			assert_eq!(composite.names(), Some(vec!["owner", "classId", "instanceId"]));
		}
		other => panic!("expected a named composite, got {other:?}"),
	}
}

#[test]
fn resolve_picks_the_unique_matching_version() {
	let catalog = catalog();
	let registry = registry();
	let event = minted_v62_event();
	let accessor = EventAccessor::with_event(&registry, &event, MINTED).expect("name matches");

	let resolved = resolve(&catalog, &accessor).expect("decodes").expect("schema is known");
	assert_eq!(resolved.version.since, 62);
	assert_eq!(resolved.value.field("instanceId"), Some(&Value::u128(1234)));
}

#[test]
fn older_runtime_resolves_to_the_older_layout() {
	let catalog = catalog();
	let registry = registry();

	// The v42 layout carries a trailing metadata byte string.
	let payload = ([7u8; 32], 3u128, 1234u128, b"ipfs://QmFoo".to_vec()).encode();
	let event = RawEvent::new(MINTED, payload, 200_000, 42);
	let accessor = EventAccessor::with_event(&registry, &event, MINTED).expect("name matches");

	let resolved = resolve(&catalog, &accessor).expect("decodes").expect("schema is known");
	assert_eq!(resolved.version.since, 42);
	assert_eq!(resolved.value.field("metadata"), Some(&Value::bytes(b"ipfs://QmFoo".to_vec())));
}

#[test]
fn decoding_with_a_non_matching_schema_is_refused() {
	let catalog = catalog();
	let registry = registry();
	let event = minted_v62_event();
	let accessor = EventAccessor::with_event(&registry, &event, MINTED).expect("name matches");

	let v42 = &catalog.schemas_for(MINTED)[0];
	assert_eq!(v42.since, 42);
	assert!(!accessor.is(v42));
	// Never a silently wrong value: the guard violation is reported as such.
	assert!(matches!(accessor.decode_as(v42), Err(Error::VersionMismatch { .. })));
}

#[test]
fn unregistered_hash_resolves_to_none_without_failing() {
	let catalog = catalog();
	let registry = registry();

	let payload = ([7u8; 32], 3u128, 1234u128).encode();
	let event = RawEvent::new(MINTED, payload, 9_000_000, 99);
	let accessor = EventAccessor::with_event(&registry, &event, MINTED).expect("name matches");

	assert!(catalog.schemas_for(MINTED).iter().all(|v| !accessor.is(v)));
	assert!(resolve(&catalog, &accessor).expect("no decode happens").is_none());
	assert!(matches!(
		resolve_required(&catalog, &accessor),
		Err(Error::UnsupportedVersion { .. })
	));
}

#[test]
fn truncated_payload_is_malformed_not_partially_decoded() {
	let catalog = catalog();
	let registry = registry();

	// Hash says v62 (three fields), but the payload stops after two.
	let payload = ([7u8; 32], 3u128).encode();
	let event = RawEvent::new(MINTED, payload, 1_500_000, 62);
	let accessor = EventAccessor::with_event(&registry, &event, MINTED).expect("name matches");

	assert!(matches!(resolve(&catalog, &accessor), Err(Error::Malformed(_))));
}

#[test]
fn oversized_payload_is_malformed_too() {
	let catalog = catalog();
	let registry = registry();

	let payload = ([7u8; 32], 3u128, 1234u128, 5u128).encode();
	let event = RawEvent::new(MINTED, payload, 1_500_000, 62);
	let accessor = EventAccessor::with_event(&registry, &event, MINTED).expect("name matches");

	assert!(matches!(resolve(&catalog, &accessor), Err(Error::Malformed(_))));
}

#[test]
fn accessor_construction_checks_the_event_name() {
	let registry = registry();
	let event = minted_v62_event();

	assert!(matches!(
		EventAccessor::with_event(&registry, &event, "NFT.InstanceBurned"),
		Err(Error::EventNameMismatch { .. })
	));

	// Implicit binding through an event context checks the same invariant.
	let ctx = EventContext::new(&registry, &event);
	assert!(EventAccessor::new(&ctx, MINTED).is_ok());
	assert!(matches!(
		EventAccessor::new(&ctx, "Marketplace.TokenSold"),
		Err(Error::EventNameMismatch { .. })
	));
}

#[test]
fn tuple_layout_decodes_positionally() {
	let catalog = catalog();
	let mut registry = HashRegistry::new();
	registry.register_version(
		42,
		[(
			"Marketplace.OfferWithdrawn",
			hash("0f263bfdefa394edfb38d20d33662423a2e0902235b599f9b2b0292f157f0902"),
		)],
	);

	let payload = ([1u8; 32], 8u128, 9u128).encode();
	let event = RawEvent::new("Marketplace.OfferWithdrawn", payload, 100_000, 42);
	let accessor =
		EventAccessor::with_event(&registry, &event, "Marketplace.OfferWithdrawn").expect("name matches");

	let resolved = resolve(&catalog, &accessor).expect("decodes").expect("schema is known");
	assert_eq!(resolved.version.since, 42);
	assert_eq!(resolved.value.at(0), Some(&Value::account_id([1; 32])));
	assert_eq!(resolved.value.at(1), Some(&Value::u128(8)));
	assert_eq!(resolved.value.at(2), Some(&Value::u128(9)));
}

#[test]
fn optional_and_enum_fields_decode() {
	let catalog = catalog();
	let mut registry = HashRegistry::new();
	registry.register_version(
		55,
		[(
			"Marketplace.TokenPriceUpdated",
			hash("36db2c5ce4786a5437e40968bfcb5727b1548bed0fec7d93b771e5f589c2233a"),
		)],
	);
	registry.register_version(
		62,
		[(
			"NFT.ClassCreated",
			hash("7adeb3f2ae9b2b9c39201542a741e44b5484fadd52179e412e45be77a794f225"),
		)],
	);

	// Delisting: price goes to None.
	let payload = ([2u8; 32], 8u128, 9u128, None::<u128>).encode();
	let event = RawEvent::new("Marketplace.TokenPriceUpdated", payload, 800_000, 55);
	let accessor = EventAccessor::with_event(&registry, &event, "Marketplace.TokenPriceUpdated")
		.expect("name matches");
	let resolved = resolve(&catalog, &accessor).expect("decodes").expect("schema is known");
	assert_eq!(resolved.value.field("price"), Some(&Value::none()));

	// ClassType is the first enum variant, Marketplace.
	let payload = ([2u8; 32], 8u128, 0u8).encode();
	let event = RawEvent::new("NFT.ClassCreated", payload, 1_500_000, 62);
	let accessor =
		EventAccessor::with_event(&registry, &event, "NFT.ClassCreated").expect("name matches");
	let resolved = resolve(&catalog, &accessor).expect("decodes").expect("schema is known");
	assert_eq!(resolved.value.field("classType"), Some(&Value::variant("Marketplace", [])));
}

#[test]
fn decoded_values_serialize_to_plain_json() {
	let catalog = catalog();
	let registry = registry();
	let event = minted_v62_event();
	let accessor = EventAccessor::with_event(&registry, &event, MINTED).expect("name matches");
	let resolved = resolve(&catalog, &accessor).expect("decodes").expect("schema is known");

	let json = serde_json::to_value(&resolved.value).expect("serializable");
	assert_eq!(
		json,
		serde_json::json!({
			"owner": format!("0x{}", "07".repeat(32)),
			"classId": 3,
			"instanceId": 1234,
		})
	);
}
