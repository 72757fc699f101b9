// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request context seen by predicates.
//!
//! Every field is populated by collaborators upstream of the gate (session
//! middleware for the identity, API-key lookup for the key, the router for
//! the query string). Predicates only read it.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::scope::Scope;

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	pub id: String,
	#[serde(default)]
	pub is_admin: bool,
}

impl Identity {
	/// A regular, non-admin user.
	pub fn user(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			is_admin: false,
		}
	}

	/// A user with the admin flag set.
	pub fn admin(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			is_admin: true,
		}
	}
}

/// An API key presented with the request, reduced to its granted scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
	#[serde(default)]
	pub scopes: BTreeSet<Scope>,
}

impl ApiKey {
	pub fn with_scopes<I, S>(scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Scope>,
	{
		Self {
			scopes: scopes.into_iter().map(Into::into).collect(),
		}
	}

	pub fn has_scope(&self, scope: &str) -> bool {
		self.scopes.contains(scope)
	}
}

/// Read-only view of a request for gate evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
	pub identity: Option<Identity>,
	pub query_params: HashMap<String, String>,
	pub api_key: Option<ApiKey>,
}

impl RequestContext {
	/// An anonymous request with no query parameters and no API key.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_identity(mut self, identity: Identity) -> Self {
		self.identity = Some(identity);
		self
	}

	pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query_params.insert(key.into(), value.into());
		self
	}

	pub fn with_api_key(mut self, api_key: ApiKey) -> Self {
		self.api_key = Some(api_key);
		self
	}

	pub fn query_param(&self, key: &str) -> Option<&str> {
		self.query_params.get(key).map(String::as_str)
	}
}
