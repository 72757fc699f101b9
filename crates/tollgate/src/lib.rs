// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request gates: small access predicates and the combinators that compose them.
//!
//! This crate provides:
//! - [`RequestContext`] - the caller identity, query parameters and API key a gate inspects
//! - [`predicates`] - `is_logged_in`, `is_admin`, `is_not_logged_in`,
//!   `is_local_request` and the `has_api_scope` factory
//! - [`combine_or`] / [`combine_and`] - short-circuit OR / AND over predicate lists
//! - [`Gate`] - a predicate bound into the continue / deny / propagate contract
//!
//! # Outcomes
//!
//! ```text
//! Predicate result     Gate outcome     Pipeline action
//! ────────────────     ────────────     ───────────────────────────────
//! Ok(true)          →  Passed        →  continue to the next handler
//! Ok(false)         →  Denied(403)   →  respond 403, no message
//! Err(GateFailure)  →  Failed        →  propagate to the error channel
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tollgate::{combine_or, predicates::{has_api_scope, is_admin}, shared};
//!
//! // The scope check can raise, so it goes last.
//! let gate = combine_or(vec![shared(is_admin()), shared(has_api_scope("threads:read"))]);
//!
//! gate.run(&ctx, || next(), |status| respond(status), |err| fail(err));
//! ```

pub mod combinator;
pub mod context;
pub mod error;
pub mod gate;
pub mod gates;
pub mod predicate;
pub mod predicates;
pub mod scope;

pub use combinator::{combine_and, combine_or, AllOf, AnyOf};
pub use context::{ApiKey, Identity, RequestContext};
pub use error::GateFailure;
pub use gate::{create_middleware, Gate, GateOutcome};
pub use gates::Gates;
pub use predicate::{predicate_fn, shared, FnPredicate, Predicate, PredicateResult, SharedPredicate};
pub use scope::Scope;
