// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use http::StatusCode;
use thiserror::Error;

use crate::scope::Scope;

/// A reportable condition raised while evaluating a predicate.
///
/// Unlike a plain `false`, a failure carries a message meant for the caller
/// and is propagated to the pipeline's error channel instead of becoming a
/// bare denial. Only the API-scope check raises these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateFailure {
	#[error("Missing api key")]
	MissingApiKey,

	#[error(
		"Your api key does not have the required scope ({scope}) for this request. \
		 If this request was not made in error you should contact the comptrollers \
		 and ask for access to the scope"
	)]
	ScopeNotGranted { scope: Scope },
}

impl GateFailure {
	/// HTTP status reported for this failure. Always 403.
	pub fn status(&self) -> StatusCode {
		StatusCode::FORBIDDEN
	}

	/// Stable machine-readable code.
	pub fn code(&self) -> &'static str {
		match self {
			GateFailure::MissingApiKey => "missing_api_key",
			GateFailure::ScopeNotGranted { .. } => "scope_not_granted",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_key_message() {
		let failure = GateFailure::MissingApiKey;
		assert_eq!(failure.to_string(), "Missing api key");
		assert_eq!(failure.status(), StatusCode::FORBIDDEN);
		assert_eq!(failure.code(), "missing_api_key");
	}

	#[test]
	fn scope_message_names_scope() {
		let failure = GateFailure::ScopeNotGranted {
			scope: Scope::new("threads:delete"),
		};
		let message = failure.to_string();
		assert!(message.contains("(threads:delete)"));
		assert!(message.starts_with("Your api key does not have the required scope"));
		assert_eq!(failure.status(), StatusCode::FORBIDDEN);
		assert_eq!(failure.code(), "scope_not_granted");
	}
}
