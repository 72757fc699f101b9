// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Short-circuit OR / AND over predicate lists.
//!
//! Both combinations evaluate strictly left to right and stop as soon as the
//! outcome is known:
//!
//! | Combination | Stops at        | Empty list |
//! |-------------|-----------------|------------|
//! | [`AnyOf`]   | first `Ok(true)`  | `false` (deny) |
//! | [`AllOf`]   | first `Ok(false)` | `true` (pass)  |
//!
//! A predicate returning `Err` stops evaluation immediately and the failure
//! is propagated as-is. For [`AnyOf`] this means a raising predicate in the
//! middle of the list hides any later predicate that would have passed, so
//! fallible predicates ([`has_api_scope`](crate::predicates::has_api_scope))
//! go last. Construction logs a warning when they do not.

use tracing::{trace, warn};

use crate::context::RequestContext;
use crate::gate::Gate;
use crate::predicate::{Predicate, PredicateResult, SharedPredicate};

/// Passes if any predicate passes.
#[derive(Clone)]
pub struct AnyOf {
	predicates: Vec<SharedPredicate>,
}

impl AnyOf {
	pub fn new(predicates: Vec<SharedPredicate>) -> Self {
		warn_if_fallible_not_last("any_of", &predicates);
		Self { predicates }
	}

	pub fn len(&self) -> usize {
		self.predicates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.predicates.is_empty()
	}
}

impl Predicate for AnyOf {
	fn evaluate(&self, ctx: &RequestContext) -> PredicateResult {
		for (index, predicate) in self.predicates.iter().enumerate() {
			if predicate.evaluate(ctx)? {
				trace!(index, predicate = predicate.name(), "any_of satisfied");
				return Ok(true);
			}
		}
		Ok(false)
	}

	fn name(&self) -> &str {
		"any_of"
	}

	fn is_fallible(&self) -> bool {
		self.predicates.iter().any(|p| p.is_fallible())
	}
}

/// Passes if every predicate passes.
#[derive(Clone)]
pub struct AllOf {
	predicates: Vec<SharedPredicate>,
}

impl AllOf {
	pub fn new(predicates: Vec<SharedPredicate>) -> Self {
		warn_if_fallible_not_last("all_of", &predicates);
		Self { predicates }
	}

	pub fn len(&self) -> usize {
		self.predicates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.predicates.is_empty()
	}
}

impl Predicate for AllOf {
	fn evaluate(&self, ctx: &RequestContext) -> PredicateResult {
		for (index, predicate) in self.predicates.iter().enumerate() {
			if !predicate.evaluate(ctx)? {
				trace!(index, predicate = predicate.name(), "all_of short-circuited");
				return Ok(false);
			}
		}
		Ok(true)
	}

	fn name(&self) -> &str {
		"all_of"
	}

	fn is_fallible(&self) -> bool {
		self.predicates.iter().any(|p| p.is_fallible())
	}
}

impl std::fmt::Debug for AnyOf {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list()
			.entries(self.predicates.iter().map(|p| p.name()))
			.finish()
	}
}

impl std::fmt::Debug for AllOf {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list()
			.entries(self.predicates.iter().map(|p| p.name()))
			.finish()
	}
}

fn warn_if_fallible_not_last(combinator: &'static str, predicates: &[SharedPredicate]) {
	let Some((_, leading)) = predicates.split_last() else {
		return;
	};
	if let Some(position) = leading.iter().position(|p| p.is_fallible()) {
		warn!(
			combinator,
			predicate = predicates[position].name(),
			position,
			total = predicates.len(),
			"fallible predicate is not last; a failure will skip the predicates after it"
		);
	}
}

/// Gate that continues when any predicate passes (logical OR).
///
/// An empty list always denies.
pub fn combine_or(predicates: Vec<SharedPredicate>) -> Gate {
	Gate::new(AnyOf::new(predicates))
}

/// Gate that continues only when every predicate passes (logical AND).
///
/// An empty list always continues.
pub fn combine_and(predicates: Vec<SharedPredicate>) -> Gate {
	Gate::new(AllOf::new(predicates))
}

/// Build an [`AnyOf`] from predicate expressions.
///
/// ```ignore
/// let gate = Gate::new(any_of![is_admin(), has_api_scope("threads:read")]);
/// ```
#[macro_export]
macro_rules! any_of {
	($($predicate:expr),* $(,)?) => {
		$crate::combinator::AnyOf::new(vec![$($crate::predicate::shared($predicate)),*])
	};
}

/// Build an [`AllOf`] from predicate expressions.
#[macro_export]
macro_rules! all_of {
	($($predicate:expr),* $(,)?) => {
		$crate::combinator::AllOf::new(vec![$($crate::predicate::shared($predicate)),*])
	};
}
