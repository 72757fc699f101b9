// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ready-made gates for the built-in predicates.

use tollgate_config::{GateConfig, LocalRequestConfig};

use crate::gate::{create_middleware, Gate};
use crate::predicates::{self, IsLocalRequest};
use crate::scope::Scope;

pub fn is_logged_in() -> Gate {
	create_middleware(predicates::is_logged_in())
}

pub fn is_admin() -> Gate {
	create_middleware(predicates::is_admin())
}

pub fn is_not_logged_in() -> Gate {
	create_middleware(predicates::is_not_logged_in())
}

pub fn is_local_request(config: &LocalRequestConfig) -> Gate {
	create_middleware(predicates::is_local_request(config))
}

pub fn has_api_scope(scope: impl Into<Scope>) -> Gate {
	create_middleware(predicates::has_api_scope(scope))
}

/// Gate factory bound to a loaded [`GateConfig`].
///
/// Holds the injected local secret so every gate is zero-argument except
/// the scope check.
#[derive(Debug, Clone, Default)]
pub struct Gates {
	local: LocalRequestConfig,
}

impl Gates {
	pub fn new(local: LocalRequestConfig) -> Self {
		Self { local }
	}

	pub fn from_config(config: &GateConfig) -> Self {
		Self::new(config.local.clone())
	}

	pub fn is_logged_in(&self) -> Gate {
		is_logged_in()
	}

	pub fn is_admin(&self) -> Gate {
		is_admin()
	}

	pub fn is_not_logged_in(&self) -> Gate {
		is_not_logged_in()
	}

	pub fn is_local_request(&self) -> Gate {
		is_local_request(&self.local)
	}

	pub fn has_api_scope(&self, scope: impl Into<Scope>) -> Gate {
		has_api_scope(scope)
	}

	/// The local-request predicate, for use inside combinations.
	pub fn local_request(&self) -> IsLocalRequest {
		predicates::is_local_request(&self.local)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::context::{ApiKey, Identity, RequestContext};
	use crate::error::GateFailure;
	use crate::gate::GateOutcome;

	#[test]
	fn ready_made_gates() {
		let anonymous = RequestContext::new();
		let user = RequestContext::new().with_identity(Identity::user("u"));
		let admin = RequestContext::new().with_identity(Identity::admin("a"));

		assert!(is_logged_in().check(&user).is_passed());
		assert!(is_logged_in().check(&anonymous).is_denied());
		assert!(is_not_logged_in().check(&anonymous).is_passed());
		assert!(is_not_logged_in().check(&user).is_denied());
		assert!(is_admin().check(&admin).is_passed());
		assert!(is_admin().check(&user).is_denied());
	}

	#[test]
	fn scope_gate_propagates_failures() {
		assert_eq!(
			has_api_scope("read").check(&RequestContext::new()),
			GateOutcome::Failed(GateFailure::MissingApiKey)
		);
		let ctx = RequestContext::new().with_api_key(ApiKey::with_scopes(["read"]));
		assert!(has_api_scope("read").check(&ctx).is_passed());
	}

	#[test]
	fn gates_from_config_inject_secret() {
		let config = GateConfig {
			local: LocalRequestConfig::with_secret("s3cret"),
		};
		let gates = Gates::from_config(&config);

		let local = RequestContext::new().with_query_param("local", "s3cret");
		assert!(gates.is_local_request().check(&local).is_passed());
		assert!(gates.is_local_request().check(&RequestContext::new()).is_denied());
		assert_eq!(gates.local_request().query_param(), "local");
	}

	#[test]
	fn default_gates_have_no_local_secret() {
		let gates = Gates::default();
		let ctx = RequestContext::new().with_query_param("local", "");
		assert!(gates.is_local_request().check(&ctx).is_denied());
		assert!(gates.is_logged_in().check(&ctx).is_denied());
		assert!(gates.is_not_logged_in().check(&ctx).is_passed());
		assert!(gates.is_admin().check(&ctx).is_denied());
		assert!(gates.has_api_scope("read").check(&ctx).is_failed());
	}
}
