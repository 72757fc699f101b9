// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Built-in predicates.
//!
//! These are the building blocks handed to [`combine_or`](crate::combine_or)
//! and [`combine_and`](crate::combine_and). Each one is a pure function of the
//! [`RequestContext`]; only [`HasApiScope`] can raise a [`GateFailure`], and
//! it must therefore be placed last in any combination.

use subtle::ConstantTimeEq;
use tollgate_common_secret::SecretString;
use tollgate_config::LocalRequestConfig;
use tracing::trace;

use crate::context::RequestContext;
use crate::error::GateFailure;
use crate::predicate::{Predicate, PredicateResult};
use crate::scope::Scope;

/// Passes when the request carries an identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsLoggedIn;

impl Predicate for IsLoggedIn {
	fn evaluate(&self, ctx: &RequestContext) -> PredicateResult {
		Ok(ctx.identity.is_some())
	}

	fn name(&self) -> &str {
		"is_logged_in"
	}
}

/// Passes when the request carries an identity with the admin flag set.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAdmin;

impl Predicate for IsAdmin {
	fn evaluate(&self, ctx: &RequestContext) -> PredicateResult {
		Ok(ctx.identity.as_ref().is_some_and(|identity| identity.is_admin))
	}

	fn name(&self) -> &str {
		"is_admin"
	}
}

/// Passes when the request carries no identity. Exact negation of [`IsLoggedIn`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IsNotLoggedIn;

impl Predicate for IsNotLoggedIn {
	fn evaluate(&self, ctx: &RequestContext) -> PredicateResult {
		IsLoggedIn.evaluate(ctx).map(|logged_in| !logged_in)
	}

	fn name(&self) -> &str {
		"is_not_logged_in"
	}
}

/// Passes when a query parameter carries the configured local secret.
///
/// Origins can be faked, so local callers prove themselves with a shared
/// key: `?local=<secret>`. The comparison is exact byte equality, done in
/// constant time once the lengths match. With no secret configured, or an
/// empty one, nothing is local.
#[derive(Debug, Clone)]
pub struct IsLocalRequest {
	secret: Option<SecretString>,
	query_param: String,
}

impl IsLocalRequest {
	pub fn new(config: &LocalRequestConfig) -> Self {
		Self {
			secret: config.secret.clone().filter(|s| !s.is_empty()),
			query_param: config.query_param.clone(),
		}
	}

	pub fn query_param(&self) -> &str {
		&self.query_param
	}
}

impl Predicate for IsLocalRequest {
	fn evaluate(&self, ctx: &RequestContext) -> PredicateResult {
		let Some(secret) = &self.secret else {
			trace!("no local secret configured");
			return Ok(false);
		};

		let Some(given) = ctx.query_param(&self.query_param) else {
			return Ok(false);
		};

		let expected_bytes = secret.expose().as_bytes();
		let given_bytes = given.as_bytes();

		if expected_bytes.len() != given_bytes.len() {
			trace!("local secret length mismatch");
			return Ok(false);
		}

		Ok(expected_bytes.ct_eq(given_bytes).into())
	}

	fn name(&self) -> &str {
		"is_local_request"
	}
}

/// Passes when the request's API key grants `scope`.
///
/// Raises [`GateFailure::MissingApiKey`] when no key is present and
/// [`GateFailure::ScopeNotGranted`] when the key lacks the scope. It never
/// returns `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasApiScope {
	scope: Scope,
}

impl HasApiScope {
	pub fn new(scope: impl Into<Scope>) -> Self {
		Self {
			scope: scope.into(),
		}
	}

	pub fn scope(&self) -> &Scope {
		&self.scope
	}
}

impl Predicate for HasApiScope {
	fn evaluate(&self, ctx: &RequestContext) -> PredicateResult {
		let Some(api_key) = &ctx.api_key else {
			trace!(scope = %self.scope, "no api key on request");
			return Err(GateFailure::MissingApiKey);
		};

		if api_key.has_scope(self.scope.as_str()) {
			return Ok(true);
		}

		trace!(scope = %self.scope, "api key lacks scope");
		Err(GateFailure::ScopeNotGranted {
			scope: self.scope.clone(),
		})
	}

	fn name(&self) -> &str {
		"has_api_scope"
	}

	fn is_fallible(&self) -> bool {
		true
	}
}

pub fn is_logged_in() -> IsLoggedIn {
	IsLoggedIn
}

pub fn is_admin() -> IsAdmin {
	IsAdmin
}

pub fn is_not_logged_in() -> IsNotLoggedIn {
	IsNotLoggedIn
}

pub fn is_local_request(config: &LocalRequestConfig) -> IsLocalRequest {
	IsLocalRequest::new(config)
}

/// Build a scope check bound to `scope`. Place it last in combinations.
pub fn has_api_scope(scope: impl Into<Scope>) -> HasApiScope {
	HasApiScope::new(scope)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::context::{ApiKey, Identity};
	use proptest::prelude::*;

	fn anonymous() -> RequestContext {
		RequestContext::new()
	}

	fn user() -> RequestContext {
		RequestContext::new().with_identity(Identity::user("u1"))
	}

	fn admin() -> RequestContext {
		RequestContext::new().with_identity(Identity::admin("a1"))
	}

	mod login {
		use super::*;

		#[test]
		fn is_logged_in_requires_identity() {
			assert_eq!(is_logged_in().evaluate(&anonymous()), Ok(false));
			assert_eq!(is_logged_in().evaluate(&user()), Ok(true));
			assert_eq!(is_logged_in().evaluate(&admin()), Ok(true));
		}

		#[test]
		fn is_not_logged_in_is_negation() {
			assert_eq!(is_not_logged_in().evaluate(&anonymous()), Ok(true));
			assert_eq!(is_not_logged_in().evaluate(&user()), Ok(false));
		}

		#[test]
		fn is_admin_requires_flag() {
			assert_eq!(is_admin().evaluate(&anonymous()), Ok(false));
			assert_eq!(is_admin().evaluate(&user()), Ok(false));
			assert_eq!(is_admin().evaluate(&admin()), Ok(true));
		}
	}

	mod local {
		use super::*;

		#[test]
		fn matches_configured_secret() {
			let p = is_local_request(&LocalRequestConfig::with_secret("s3cret"));
			let ctx = anonymous().with_query_param("local", "s3cret");
			assert_eq!(p.evaluate(&ctx), Ok(true));
		}

		#[test]
		fn mismatch_is_false() {
			let p = is_local_request(&LocalRequestConfig::with_secret("s3cret"));
			let ctx = anonymous().with_query_param("local", "nope");
			assert_eq!(p.evaluate(&ctx), Ok(false));
		}

		#[test]
		fn comparison_is_exact() {
			let p = is_local_request(&LocalRequestConfig::with_secret("s3cret"));
			for given in ["S3CRET", " s3cret", "s3cret ", "s3cre", ""] {
				let ctx = anonymous().with_query_param("local", given);
				assert_eq!(p.evaluate(&ctx), Ok(false), "given {given:?}");
			}
		}

		#[test]
		fn missing_param_is_false() {
			let p = is_local_request(&LocalRequestConfig::with_secret("s3cret"));
			assert_eq!(p.evaluate(&anonymous()), Ok(false));
		}

		#[test]
		fn no_secret_is_never_local() {
			let p = is_local_request(&LocalRequestConfig::default());
			assert_eq!(p.evaluate(&anonymous()), Ok(false));
			let ctx = anonymous().with_query_param("local", "");
			assert_eq!(p.evaluate(&ctx), Ok(false));
		}

		#[test]
		fn empty_secret_is_never_local() {
			let hand_built = LocalRequestConfig {
				secret: Some(SecretString::from("")),
				..LocalRequestConfig::default()
			};
			for config in [LocalRequestConfig::with_secret(""), hand_built] {
				let p = is_local_request(&config);
				for given in ["", "x"] {
					let ctx = anonymous().with_query_param("local", given);
					assert_eq!(p.evaluate(&ctx), Ok(false), "given {given:?}");
				}
				assert_eq!(p.evaluate(&anonymous()), Ok(false));
			}
		}

		#[test]
		fn custom_query_param() {
			let config = LocalRequestConfig::with_secret("s3cret").with_query_param("internal");
			let p = is_local_request(&config);
			assert_eq!(p.query_param(), "internal");

			let wrong_param = anonymous().with_query_param("local", "s3cret");
			assert_eq!(p.evaluate(&wrong_param), Ok(false));

			let right_param = anonymous().with_query_param("internal", "s3cret");
			assert_eq!(p.evaluate(&right_param), Ok(true));
		}

		#[test]
		fn debug_does_not_leak_secret() {
			let p = is_local_request(&LocalRequestConfig::with_secret("s3cret"));
			assert!(!format!("{p:?}").contains("s3cret"));
		}
	}

	mod api_scope {
		use super::*;

		#[test]
		fn granted_scope_passes() {
			let ctx = anonymous().with_api_key(ApiKey::with_scopes(["read", "write"]));
			assert_eq!(has_api_scope("read").evaluate(&ctx), Ok(true));
		}

		#[test]
		fn missing_scope_raises_naming_scope() {
			let ctx = anonymous().with_api_key(ApiKey::with_scopes(["write"]));
			let err = has_api_scope("read").evaluate(&ctx).unwrap_err();
			assert_eq!(
				err,
				GateFailure::ScopeNotGranted {
					scope: Scope::new("read")
				}
			);
			assert!(err.to_string().contains("read"));
		}

		#[test]
		fn missing_key_raises() {
			let err = has_api_scope("read").evaluate(&anonymous()).unwrap_err();
			assert_eq!(err, GateFailure::MissingApiKey);
			assert!(err.to_string().contains("Missing api key"));
		}

		#[test]
		fn empty_scope_set_raises_scope_error() {
			let ctx = anonymous().with_api_key(ApiKey::default());
			assert!(matches!(
				has_api_scope("read").evaluate(&ctx),
				Err(GateFailure::ScopeNotGranted { .. })
			));
		}

		#[test]
		fn only_scope_check_is_fallible() {
			assert!(has_api_scope("read").is_fallible());
			assert!(!is_logged_in().is_fallible());
			assert!(!is_admin().is_fallible());
			assert!(!is_not_logged_in().is_fallible());
			assert!(!is_local_request(&LocalRequestConfig::default()).is_fallible());
		}

		#[test]
		fn factory_binds_independent_scopes() {
			let read = has_api_scope("read");
			let write = has_api_scope("write");
			let ctx = anonymous().with_api_key(ApiKey::with_scopes(["write"]));
			assert!(read.evaluate(&ctx).is_err());
			assert_eq!(write.evaluate(&ctx), Ok(true));
			assert_eq!(read.scope().as_str(), "read");
		}
	}

	proptest! {
		#[test]
		fn not_logged_in_negates_logged_in(
			has_identity in any::<bool>(),
			is_admin_flag in any::<bool>(),
		) {
			let mut ctx = RequestContext::new();
			if has_identity {
				ctx = ctx.with_identity(Identity { id: "u".to_string(), is_admin: is_admin_flag });
			}
			let logged_in = is_logged_in().evaluate(&ctx).unwrap();
			let not_logged_in = is_not_logged_in().evaluate(&ctx).unwrap();
			prop_assert_eq!(logged_in, !not_logged_in);
			prop_assert_eq!(is_admin().evaluate(&ctx).unwrap(), has_identity && is_admin_flag);
		}

		#[test]
		fn local_request_is_string_equality(secret in "[a-z0-9]{1,12}", given in "[a-z0-9]{0,12}") {
			let p = is_local_request(&LocalRequestConfig::with_secret(secret.clone()));
			let ctx = RequestContext::new().with_query_param("local", given.clone());
			prop_assert_eq!(p.evaluate(&ctx).unwrap(), secret == given);
		}
	}
}
