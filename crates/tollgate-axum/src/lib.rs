// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! axum integration for tollgate gates.
//!
//! - [`RequireGate`] - Tower layer that runs a [`tollgate::Gate`] before a route
//! - [`request_context`] - builds the [`tollgate::RequestContext`] from a request
//! - [`GateFailureResponse`] - client rendering of a propagated gate failure
//!
//! Identity and API keys are read from request extensions, so the session and
//! API-key layers must run before this one.

pub mod context;
pub mod layer;
pub mod response;

pub use context::request_context;
pub use layer::{RequireGate, RequireGateFuture, RequireGateService};
pub use response::{denied_response, ErrorResponse, GateFailureResponse};
