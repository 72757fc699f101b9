// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Local-request configuration.
//!
//! Origins can be faked, so "local" requests prove themselves by carrying a
//! shared secret in a query parameter: `?local=<secret>`.

use serde::Deserialize;
use tollgate_common_secret::SecretString;
use tracing::warn;

/// Default query parameter carrying the local secret.
pub const DEFAULT_LOCAL_QUERY_PARAM: &str = "local";

/// Local-request configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct LocalRequestConfig {
	/// Shared secret; `None` means no request is ever considered local.
	pub secret: Option<SecretString>,
	/// Name of the query parameter compared against the secret.
	pub query_param: String,
}

impl Default for LocalRequestConfig {
	fn default() -> Self {
		Self {
			secret: None,
			query_param: DEFAULT_LOCAL_QUERY_PARAM.to_string(),
		}
	}
}

impl LocalRequestConfig {
	/// Config with the given secret and the default query parameter.
	///
	/// An empty secret leaves local requests disabled.
	pub fn with_secret(secret: impl Into<String>) -> Self {
		let secret = secret.into();
		Self {
			secret: (!secret.is_empty()).then(|| SecretString::new(secret)),
			..Default::default()
		}
	}

	pub fn with_query_param(mut self, name: impl Into<String>) -> Self {
		self.query_param = name.into();
		self
	}

	pub fn has_secret(&self) -> bool {
		self.secret.is_some()
	}
}

/// Local-request configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalRequestConfigLayer {
	#[serde(default)]
	pub secret: Option<SecretString>,
	#[serde(default)]
	pub query_param: Option<String>,
}

impl LocalRequestConfigLayer {
	pub fn merge(&mut self, other: LocalRequestConfigLayer) {
		if other.secret.is_some() {
			self.secret = other.secret;
		}
		if other.query_param.is_some() {
			self.query_param = other.query_param;
		}
	}

	pub fn finalize(self) -> LocalRequestConfig {
		let secret = match self.secret {
			Some(secret) if secret.is_empty() => {
				warn!("local secret is empty, local requests are disabled");
				None
			}
			other => other,
		};

		LocalRequestConfig {
			secret,
			query_param: self
				.query_param
				.unwrap_or_else(|| DEFAULT_LOCAL_QUERY_PARAM.to_string()),
		}
	}
}
