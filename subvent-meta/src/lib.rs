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

//! Fetch and sanitize off-chain token metadata.
//!
//! Decoded events frequently carry `ipfs://` links to JSON metadata and
//! media. This crate rewrites those links onto an HTTP gateway, fetches the
//! metadata as typed JSON, and sniffs media MIME types via `HEAD` requests.
//! It is deliberately thin: no retries, no caching — those belong to the
//! pipeline driving it.

#![forbid(unsafe_code)]

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Public IPFS gateway used when none is configured.
pub const DEFAULT_GATEWAY: &str = "https://ipfs.io";

/// Errors fetching off-chain metadata.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Http(#[from] reqwest::Error),
	#[error("request to {url} returned status {status}")]
	Status { url: String, status: StatusCode },
}

/// Rewrite an `ipfs://` url onto an HTTP gateway. Both the `ipfs://ipfs/CID`
/// and the plain `ipfs://CID` forms occur in the wild and normalize to
/// `<gateway>/ipfs/CID`; anything else passes through untouched.
pub fn sanitize_ipfs_url(url: &str, gateway: &str) -> String {
	match url.strip_prefix("ipfs://") {
		Some(rest) => {
			let path = rest.strip_prefix("ipfs/").unwrap_or(rest);
			format!("{}/ipfs/{}", gateway.trim_end_matches('/'), path)
		}
		None => url.to_string(),
	}
}

/// An HTTP client bound to one gateway.
#[derive(Debug, Clone)]
pub struct MetaClient {
	http: reqwest::Client,
	gateway: String,
}

impl Default for MetaClient {
	fn default() -> Self {
		MetaClient::new(DEFAULT_GATEWAY)
	}
}

impl MetaClient {
	pub fn new(gateway: impl Into<String>) -> Self {
		MetaClient { http: reqwest::Client::new(), gateway: gateway.into() }
	}

	/// Use a preconfigured [`reqwest::Client`] (timeouts, proxies, ...).
	pub fn with_client(http: reqwest::Client, gateway: impl Into<String>) -> Self {
		MetaClient { http, gateway: gateway.into() }
	}

	pub fn sanitize(&self, url: &str) -> String {
		sanitize_ipfs_url(url, &self.gateway)
	}

	/// Fetch and deserialize JSON metadata from `url` (sanitized first).
	/// Failures are returned, not swallowed: downstream decides whether a
	/// token without metadata is skippable.
	pub async fn fetch_metadata<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
		let target = self.sanitize(url);
		let response = self.http.get(&target).send().await?;
		let status = response.status();
		log::trace!("[ipfs] {} {}", status, target);
		if !status.is_success() {
			log::warn!("[ipfs] metadata fetch failed: {} {}", status, target);
			return Err(Error::Status { url: target, status });
		}
		Ok(response.json::<T>().await?)
	}

	/// Sniff the MIME type of the asset behind `url` with a `HEAD` request.
	/// `Ok(None)` when the server does not say.
	pub async fn fetch_mime_type(&self, url: &str) -> Result<Option<String>, Error> {
		let target = self.sanitize(url);
		let response = self.http.head(&target).send().await?;
		let status = response.status();
		if !status.is_success() {
			log::warn!("[mime] unable to access type of {}: {}", target, status);
			return Err(Error::Status { url: target, status });
		}
		let mime = response
			.headers()
			.get(CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.map(str::to_string);
		Ok(mime)
	}
}
