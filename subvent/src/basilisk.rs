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

//! Built-in schema catalog for the Basilisk NFT marketplace pallets.
//!
//! Covers the `AssetRegistry`, `Marketplace` and `NFT` events across the
//! v42, v55 and v62 runtime upgrades. The v71 upgrade re-introduced the v42
//! layouts for `NFT.ClassCreated` and `NFT.InstanceMinted` byte-for-byte
//! (same content hash), so those runtime ranges share a single catalog
//! entry each.

use crate::catalog::{CatalogError, SchemaCatalog, SchemaVersion};
use crate::common::{ContentHash, SpecVersion};
use crate::shape::{FieldType, Shape, VariantDef};

/// Build the catalog. Construction validates the per-name hash uniqueness
/// invariant, so an error here means the tables below are mis-authored.
pub fn catalog() -> Result<SchemaCatalog, CatalogError> {
	let mut catalog = SchemaCatalog::new();
	register_asset_registry(&mut catalog)?;
	register_marketplace(&mut catalog)?;
	register_nft(&mut catalog)?;
	Ok(catalog)
}

fn register(
	catalog: &mut SchemaCatalog,
	name: &str,
	since: SpecVersion,
	hash: &str,
	shape: Shape,
) -> Result<(), CatalogError> {
	catalog.register(SchemaVersion::new(name, since, ContentHash::from_hex(hash)?, shape))
}

/// `AssetType` as the asset registry emits it.
fn asset_type() -> FieldType {
	FieldType::Variant(vec![
		VariantDef::unit("Token"),
		VariantDef::tuple("PoolShare", [FieldType::U32, FieldType::U32]),
	])
}

/// `ClassType` as the NFT pallet emits it.
fn class_type() -> FieldType {
	FieldType::Variant(vec![
		VariantDef::unit("Marketplace"),
		VariantDef::unit("LiquidityMining"),
		VariantDef::unit("Redeemable"),
		VariantDef::unit("Auction"),
		VariantDef::unit("HydraHeads"),
	])
}

fn register_asset_registry(catalog: &mut SchemaCatalog) -> Result<(), CatalogError> {
	// Metadata set for an asset. [asset_id, symbol, decimals]
	register(
		catalog,
		"AssetRegistry.MetadataSet",
		42,
		"cad7da1bfdc997e45555af3932618a9edaf0bdcedd143aba212bd33a734a2ff9",
		Shape::tuple([FieldType::U32, FieldType::Bytes, FieldType::U32]),
	)?;
	register(
		catalog,
		"AssetRegistry.MetadataSet",
		55,
		"5733a2ab6f544e91ef9651644e4a8f3fc7257fa3a961ba51dd1f0c862b7a7a0a",
		Shape::named([
			("assetId", FieldType::U32),
			("symbol", FieldType::Bytes),
			("decimals", FieldType::U32),
		]),
	)?;

	// Asset was registered. [asset_id, name, type]
	register(
		catalog,
		"AssetRegistry.Registered",
		42,
		"510495ed7e324b369098067e61ab7fafe595b625beb491dd78b4bef707e70be0",
		Shape::tuple([FieldType::U32, FieldType::Bytes, asset_type()]),
	)?;
	register(
		catalog,
		"AssetRegistry.Registered",
		55,
		"630ef237faec740bf89f2ba6fec4038447ad86f6dfd1d9b5df4dcfdd30d82d78",
		Shape::named([
			("assetId", FieldType::U32),
			("assetName", FieldType::Bytes),
			("assetType", asset_type()),
		]),
	)?;

	// Asset was updated. [asset_id, name, type]
	register(
		catalog,
		"AssetRegistry.Updated",
		42,
		"510495ed7e324b369098067e61ab7fafe595b625beb491dd78b4bef707e70be0",
		Shape::tuple([FieldType::U32, FieldType::Bytes, asset_type()]),
	)?;
	register(
		catalog,
		"AssetRegistry.Updated",
		55,
		"630ef237faec740bf89f2ba6fec4038447ad86f6dfd1d9b5df4dcfdd30d82d78",
		Shape::named([
			("assetId", FieldType::U32),
			("assetName", FieldType::Bytes),
			("assetType", asset_type()),
		]),
	)?;

	Ok(())
}

fn register_marketplace(catalog: &mut SchemaCatalog) -> Result<(), CatalogError> {
	// Offer was accepted. [sender, class_id, instance_id]
	register(
		catalog,
		"Marketplace.OfferAccepted",
		42,
		"426271b0ff71255c125e9a4ea897d86d39682c8454bbff4c6c9a8d50e0d966a4",
		Shape::tuple([FieldType::AccountId, FieldType::U128, FieldType::U128, FieldType::U128]),
	)?;
	register(
		catalog,
		"Marketplace.OfferAccepted",
		55,
		"809213614dd888d0b0df83a1b4bb816a4bb8f7d702f40d7145c4c9532e70508e",
		Shape::named([
			("who", FieldType::AccountId),
			("class", FieldType::U128),
			("instance", FieldType::U128),
			("amount", FieldType::U128),
		]),
	)?;
	register(
		catalog,
		"Marketplace.OfferAccepted",
		62,
		"f0c64969aa0bb38598d60ee40e1c6befae4abc5b1835302ebc1b957c05eb0c42",
		Shape::named([
			("who", FieldType::AccountId),
			("class", FieldType::U128),
			("instance", FieldType::U128),
			("amount", FieldType::U128),
			("maker", FieldType::AccountId),
		]),
	)?;

	// Offer was placed on a token. [offerer, class_id, instance_id, price, expires]
	register(
		catalog,
		"Marketplace.OfferPlaced",
		42,
		"0c0020b8a59f4c44bfafff6516e075c67efa07d49d2257040c27bd47de251831",
		Shape::tuple([
			FieldType::AccountId,
			FieldType::U128,
			FieldType::U128,
			FieldType::U128,
			FieldType::U32,
		]),
	)?;
	register(
		catalog,
		"Marketplace.OfferPlaced",
		55,
		"e16435d4410d4a6b6ffce5b4169856dae7831e563e44572ff395cd265d9d64d1",
		Shape::named([
			("who", FieldType::AccountId),
			("class", FieldType::U128),
			("instance", FieldType::U128),
			("amount", FieldType::U128),
			("expires", FieldType::U32),
		]),
	)?;

	// Offer was withdrawn. [sender, class_id, instance_id]
	register(
		catalog,
		"Marketplace.OfferWithdrawn",
		42,
		"0f263bfdefa394edfb38d20d33662423a2e0902235b599f9b2b0292f157f0902",
		Shape::tuple([FieldType::AccountId, FieldType::U128, FieldType::U128]),
	)?;
	register(
		catalog,
		"Marketplace.OfferWithdrawn",
		55,
		"669141c2bfed250cfd51ec61736d5b23f65d22716737b27cfa84f9a287f1412f",
		Shape::named([
			("who", FieldType::AccountId),
			("class", FieldType::U128),
			("instance", FieldType::U128),
		]),
	)?;

	// Marketplace data has been added. [class_type, sender, class_id, instance_id]
	register(
		catalog,
		"Marketplace.RoyaltyAdded",
		42,
		"b25c5b1351882b8049f26b3ffe8318b0c04beabe7f3b1174b983af490abf68f7",
		Shape::tuple([FieldType::U128, FieldType::U128, FieldType::AccountId, FieldType::U32]),
	)?;
	register(
		catalog,
		"Marketplace.RoyaltyAdded",
		55,
		"f0b773a6ad41ebc0b1145b9a33782c7e6ea900db44e465cd5ee41e90a342ce57",
		Shape::named([
			("class", FieldType::U128),
			("instance", FieldType::U128),
			("author", FieldType::AccountId),
			("royalty", FieldType::U32),
		]),
	)?;

	// Royalty has been paid to the author. [class_id, instance_id, author, royalty, royalty_amount]
	register(
		catalog,
		"Marketplace.RoyaltyPaid",
		42,
		"82293205d464a489606def2289dde2ad7444a78cb3ae19f599a2160d68a0b720",
		Shape::tuple([
			FieldType::U128,
			FieldType::U128,
			FieldType::AccountId,
			FieldType::U32,
			FieldType::U128,
		]),
	)?;
	register(
		catalog,
		"Marketplace.RoyaltyPaid",
		55,
		"3f9760ce8b8d78244eecfd769b57213a52326480392d53bcbaef555fda8245b2",
		Shape::named([
			("class", FieldType::U128),
			("instance", FieldType::U128),
			("author", FieldType::AccountId),
			("royalty", FieldType::U32),
			("royaltyAmount", FieldType::U128),
		]),
	)?;

	// The price for a token was updated. [owner, class_id, instance_id, price]
	register(
		catalog,
		"Marketplace.TokenPriceUpdated",
		42,
		"4100700286e3b39a636551e9e9872940d3c125d1b8729ac058742455e638fbe2",
		Shape::tuple([
			FieldType::AccountId,
			FieldType::U128,
			FieldType::U128,
			FieldType::option(FieldType::U128),
		]),
	)?;
	register(
		catalog,
		"Marketplace.TokenPriceUpdated",
		55,
		"36db2c5ce4786a5437e40968bfcb5727b1548bed0fec7d93b771e5f589c2233a",
		Shape::named([
			("who", FieldType::AccountId),
			("class", FieldType::U128),
			("instance", FieldType::U128),
			("price", FieldType::option(FieldType::U128)),
		]),
	)?;

	// Token was sold to a new owner. [owner, buyer, class_id, instance_id, price]
	register(
		catalog,
		"Marketplace.TokenSold",
		42,
		"4a3bc2182538af0cb911036daeda76c419c2f42491eda8f66b9ca681035507c0",
		Shape::tuple([
			FieldType::AccountId,
			FieldType::AccountId,
			FieldType::U128,
			FieldType::U128,
			FieldType::U128,
		]),
	)?;
	register(
		catalog,
		"Marketplace.TokenSold",
		55,
		"c30b6db0fb1c37eb14b31c9148a9b2c3afdbe6f034f90a5f7160a284a8388c46",
		Shape::named([
			("owner", FieldType::AccountId),
			("buyer", FieldType::AccountId),
			("class", FieldType::U128),
			("instance", FieldType::U128),
			("price", FieldType::U128),
		]),
	)?;

	Ok(())
}

fn register_nft(catalog: &mut SchemaCatalog) -> Result<(), CatalogError> {
	// A class was created. [owner, class_id, class_type]
	// Also the active layout from v71 onwards.
	register(
		catalog,
		"NFT.ClassCreated",
		42,
		"964234ae203d3207b740072bc8630eee21c72fe7995f3fc03e62f0bb443cca32",
		Shape::named([
			("owner", FieldType::AccountId),
			("classId", FieldType::U128),
			("classType", class_type()),
			("metadata", FieldType::Bytes),
		]),
	)?;
	register(
		catalog,
		"NFT.ClassCreated",
		62,
		"7adeb3f2ae9b2b9c39201542a741e44b5484fadd52179e412e45be77a794f225",
		Shape::named([
			("owner", FieldType::AccountId),
			("classId", FieldType::U128),
			("classType", class_type()),
		]),
	)?;

	// A class was destroyed. [class_id]
	register(
		catalog,
		"NFT.ClassDestroyed",
		42,
		"51309f98603f5eeb2eb07f9373848f1874c4bfaea4a29b0e0d21dd93b98da94a",
		Shape::named([("owner", FieldType::AccountId), ("classId", FieldType::U128)]),
	)?;

	// An instance was burned. [sender, class_id, instance_id]
	register(
		catalog,
		"NFT.InstanceBurned",
		42,
		"cbf0740ecac063f0cc91759153cc494f3d948025e716ccd16da079129444cc1d",
		Shape::named([
			("owner", FieldType::AccountId),
			("classId", FieldType::U128),
			("instanceId", FieldType::U128),
		]),
	)?;

	// An instance was minted. [owner, class_id, instance_id]
	// Also the active layout from v71 onwards.
	register(
		catalog,
		"NFT.InstanceMinted",
		42,
		"eb2d7da6cd031b1051bd4c0ebcbe8cd70b244f54737e21a7f8279dccee6fa006",
		Shape::named([
			("owner", FieldType::AccountId),
			("classId", FieldType::U128),
			("instanceId", FieldType::U128),
			("metadata", FieldType::Bytes),
		]),
	)?;
	register(
		catalog,
		"NFT.InstanceMinted",
		62,
		"cbf0740ecac063f0cc91759153cc494f3d948025e716ccd16da079129444cc1d",
		Shape::named([
			("owner", FieldType::AccountId),
			("classId", FieldType::U128),
			("instanceId", FieldType::U128),
		]),
	)?;

	// An instance was transferred. [from, to, class_id, instance_id]
	register(
		catalog,
		"NFT.InstanceTransferred",
		42,
		"e0a071978a33a540c15a46174c5018087ae648a19419f54dab0cb069ce949563",
		Shape::named([
			("from", FieldType::AccountId),
			("to", FieldType::AccountId),
			("classId", FieldType::U128),
			("instanceId", FieldType::U128),
		]),
	)?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn catalog_builds_and_validates() {
		let catalog = catalog().expect("catalog data is well-formed");
		assert_eq!(catalog.names().count(), 15);
		assert_eq!(catalog.len(), 28);
	}

	#[test]
	fn hashes_are_unique_per_name() {
		let catalog = catalog().expect("catalog data is well-formed");
		for name in catalog.names() {
			let schemas = catalog.schemas_for(name.as_str());
			for (i, a) in schemas.iter().enumerate() {
				for b in &schemas[i + 1..] {
					assert_ne!(a.hash, b.hash, "duplicate hash for {name}");
				}
			}
		}
	}

	#[test]
	fn entries_are_ordered_by_introduction() {
		let catalog = catalog().expect("catalog data is well-formed");
		let offer_accepted: Vec<_> =
			catalog.schemas_for("Marketplace.OfferAccepted").iter().map(|v| v.since).collect();
		assert_eq!(offer_accepted, vec![42, 55, 62]);
	}
}
