// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Adapting predicates to the request pipeline.
//!
//! A [`Gate`] evaluates one predicate (possibly a combination) and lands in
//! exactly one terminal state:
//!
//! ```text
//! Evaluating ──Ok(true)──▶ Passed  → continue to the next handler
//!      │
//!      ├──────Ok(false)──▶ Denied  → 403, no continuation
//!      │
//!      └──────Err(e)─────▶ Failed  → propagate e to the error channel
//! ```

use std::fmt;

use http::StatusCode;
use tracing::{debug, instrument};

use crate::context::RequestContext;
use crate::error::GateFailure;
use crate::predicate::{Predicate, PredicateResult, SharedPredicate};

/// Terminal state of one gate invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
	/// The request may continue.
	Passed,
	/// The check failed; respond with this status and no message.
	Denied(StatusCode),
	/// A predicate raised; hand the failure to the error channel.
	Failed(GateFailure),
}

impl GateOutcome {
	pub fn is_passed(&self) -> bool {
		matches!(self, GateOutcome::Passed)
	}

	pub fn is_denied(&self) -> bool {
		matches!(self, GateOutcome::Denied(_))
	}

	pub fn is_failed(&self) -> bool {
		matches!(self, GateOutcome::Failed(_))
	}
}

impl From<PredicateResult> for GateOutcome {
	fn from(result: PredicateResult) -> Self {
		match result {
			Ok(true) => GateOutcome::Passed,
			Ok(false) => GateOutcome::Denied(StatusCode::FORBIDDEN),
			Err(failure) => GateOutcome::Failed(failure),
		}
	}
}

/// A predicate bound into the continue / deny / propagate contract.
///
/// Gates are built once at startup and shared freely; cloning is cheap.
#[derive(Clone)]
pub struct Gate {
	predicate: SharedPredicate,
}

impl Gate {
	pub fn new(predicate: impl Predicate + 'static) -> Self {
		Self::from_shared(std::sync::Arc::new(predicate))
	}

	pub fn from_shared(predicate: SharedPredicate) -> Self {
		Self { predicate }
	}

	pub fn name(&self) -> &str {
		self.predicate.name()
	}

	/// Evaluate the gate against a request.
	#[instrument(level = "debug", skip_all, fields(gate = %self.name()))]
	pub fn check(&self, ctx: &RequestContext) -> GateOutcome {
		let outcome = GateOutcome::from(self.predicate.evaluate(ctx));
		match &outcome {
			GateOutcome::Passed => debug!("gate passed"),
			GateOutcome::Denied(status) => debug!(status = status.as_u16(), "gate denied"),
			GateOutcome::Failed(failure) => {
				debug!(code = failure.code(), error = %failure, "gate failed")
			}
		}
		outcome
	}

	/// Evaluate the gate and invoke exactly one of the three continuations.
	pub fn run<R>(
		&self,
		ctx: &RequestContext,
		proceed: impl FnOnce() -> R,
		deny: impl FnOnce(StatusCode) -> R,
		propagate: impl FnOnce(GateFailure) -> R,
	) -> R {
		match self.check(ctx) {
			GateOutcome::Passed => proceed(),
			GateOutcome::Denied(status) => deny(status),
			GateOutcome::Failed(failure) => propagate(failure),
		}
	}
}

/// Gates are predicates too, so a gate can be nested in a combination.
impl Predicate for Gate {
	fn evaluate(&self, ctx: &RequestContext) -> PredicateResult {
		self.predicate.evaluate(ctx)
	}

	fn name(&self) -> &str {
		self.predicate.name()
	}

	fn is_fallible(&self) -> bool {
		self.predicate.is_fallible()
	}
}

impl fmt::Debug for Gate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Gate")
			.field("predicate", &self.name())
			.field("fallible", &self.predicate.is_fallible())
			.finish()
	}
}

/// Wrap a single predicate as a gate.
pub fn create_middleware(predicate: impl Predicate + 'static) -> Gate {
	Gate::new(predicate)
}
