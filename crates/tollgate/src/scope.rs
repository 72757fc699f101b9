// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named permission an API key may carry, e.g. `threads:read`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(String);

impl Scope {
	pub fn new(scope: impl Into<String>) -> Self {
		Self(scope.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Scope {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for Scope {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl AsRef<str> for Scope {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for Scope {
	fn borrow(&self) -> &str {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::BTreeSet;

	#[test]
	fn displays_raw_name() {
		assert_eq!(Scope::from("threads:read").to_string(), "threads:read");
	}

	#[test]
	fn set_lookup_by_str() {
		let scopes: BTreeSet<Scope> = ["read", "write"].into_iter().map(Scope::from).collect();
		assert!(scopes.contains("read"));
		assert!(!scopes.contains("Read"));
	}

	#[test]
	fn serializes_as_plain_string() {
		let json = serde_json::to_string(&Scope::new("llm:use")).unwrap();
		assert_eq!(json, "\"llm:use\"");
	}
}
