// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The [`Predicate`] trait and helpers for building predicates from closures.

use std::fmt;
use std::sync::Arc;

use crate::context::RequestContext;
use crate::error::GateFailure;

/// `Ok(true)` passes, `Ok(false)` denies, `Err` propagates a failure.
pub type PredicateResult = Result<bool, GateFailure>;

/// A check over a [`RequestContext`].
///
/// Implementations must be pure: no I/O, no shared mutable state. The same
/// context always yields the same result.
pub trait Predicate: Send + Sync {
	fn evaluate(&self, ctx: &RequestContext) -> PredicateResult;

	/// Name used in log fields.
	fn name(&self) -> &str;

	/// Whether this predicate can return `Err` rather than `Ok(false)`.
	///
	/// Fallible predicates belong at the end of a combination.
	fn is_fallible(&self) -> bool {
		false
	}
}

/// A predicate shared between gates and combinations.
pub type SharedPredicate = Arc<dyn Predicate>;

/// Wrap a predicate for use in a combination.
pub fn shared<P: Predicate + 'static>(predicate: P) -> SharedPredicate {
	Arc::new(predicate)
}

impl<P: Predicate + ?Sized> Predicate for Arc<P> {
	fn evaluate(&self, ctx: &RequestContext) -> PredicateResult {
		(**self).evaluate(ctx)
	}

	fn name(&self) -> &str {
		(**self).name()
	}

	fn is_fallible(&self) -> bool {
		(**self).is_fallible()
	}
}

impl<P: Predicate + ?Sized> Predicate for Box<P> {
	fn evaluate(&self, ctx: &RequestContext) -> PredicateResult {
		(**self).evaluate(ctx)
	}

	fn name(&self) -> &str {
		(**self).name()
	}

	fn is_fallible(&self) -> bool {
		(**self).is_fallible()
	}
}

/// A predicate backed by a closure. Built with [`predicate_fn`].
#[derive(Clone)]
pub struct FnPredicate<F> {
	name: &'static str,
	fallible: bool,
	f: F,
}

/// Build a named predicate from a closure.
///
/// ```ignore
/// let has_token = predicate_fn("has_token", |ctx| Ok(ctx.query_param("token").is_some()));
/// ```
pub fn predicate_fn<F>(name: &'static str, f: F) -> FnPredicate<F>
where
	F: Fn(&RequestContext) -> PredicateResult + Send + Sync,
{
	FnPredicate {
		name,
		fallible: false,
		f,
	}
}

impl<F> FnPredicate<F> {
	/// Mark the closure as able to raise a [`GateFailure`].
	pub fn fallible(mut self) -> Self {
		self.fallible = true;
		self
	}
}

impl<F> Predicate for FnPredicate<F>
where
	F: Fn(&RequestContext) -> PredicateResult + Send + Sync,
{
	fn evaluate(&self, ctx: &RequestContext) -> PredicateResult {
		(self.f)(ctx)
	}

	fn name(&self) -> &str {
		self.name
	}

	fn is_fallible(&self) -> bool {
		self.fallible
	}
}

impl<F> fmt::Debug for FnPredicate<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnPredicate")
			.field("name", &self.name)
			.field("fallible", &self.fallible)
			.finish()
	}
}
