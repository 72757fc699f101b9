// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Route layer running a [`Gate`] before the inner service.
//!
//! # Outcomes
//!
//! - Passed: the request goes to the inner service untouched
//! - Denied: `403 Forbidden` with an empty body
//! - Failed: the failure's status with a JSON `{ error, message }` body; the
//!   [`GateFailure`](tollgate::GateFailure) rides along in the response
//!   extensions for outer error-reporting layers
//!
//! # Example
//!
//! ```ignore
//! use tollgate::{combine_or, gates, predicates::{has_api_scope, is_admin}, shared};
//! use tollgate_axum::RequireGate;
//!
//! Router::new()
//!     .route("/admin", get(admin_dashboard))
//!     .route_layer(RequireGate::new(gates::is_admin()));
//!
//! Router::new()
//!     .route("/threads", get(list_threads))
//!     .route_layer(RequireGate::new(combine_or(vec![
//!         shared(is_admin()),
//!         shared(has_api_scope("threads:read")),
//!     ])));
//! ```

use std::{
	future::Future,
	pin::Pin,
	task::{Context, Poll},
};

use axum::{
	body::Body,
	http::Request,
	response::{IntoResponse, Response},
};
use pin_project_lite::pin_project;
use tollgate::{Gate, GateOutcome};
use tower::{Layer, Service};

use crate::context::request_context;
use crate::response::{denied_response, GateFailureResponse};

/// Route layer that admits a request only if its gate passes.
#[derive(Clone, Debug)]
pub struct RequireGate {
	gate: Gate,
}

impl RequireGate {
	pub fn new(gate: Gate) -> Self {
		Self { gate }
	}

	pub fn gate(&self) -> &Gate {
		&self.gate
	}
}

impl From<Gate> for RequireGate {
	fn from(gate: Gate) -> Self {
		Self::new(gate)
	}
}

impl<S> Layer<S> for RequireGate {
	type Service = RequireGateService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		RequireGateService {
			inner,
			gate: self.gate.clone(),
		}
	}
}

/// Service wrapper for [`RequireGate`] layer.
#[derive(Clone, Debug)]
pub struct RequireGateService<S> {
	inner: S,
	gate: Gate,
}

impl<S> Service<Request<Body>> for RequireGateService<S>
where
	S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
{
	type Response = Response;
	type Error = S::Error;
	type Future = RequireGateFuture<S::Future>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let ctx = request_context(&req);

		match self.gate.check(&ctx) {
			GateOutcome::Passed => {
				tracing::debug!(
					gate = %self.gate.name(),
					path = %req.uri().path(),
					"Gate passed"
				);
				RequireGateFuture::Inner {
					fut: self.inner.call(req),
				}
			}
			GateOutcome::Denied(status) => {
				tracing::info!(
					gate = %self.gate.name(),
					path = %req.uri().path(),
					logged_in = ctx.identity.is_some(),
					"Gate denied request"
				);
				RequireGateFuture::Rejected {
					resp: Some(denied_response(status)),
				}
			}
			GateOutcome::Failed(failure) => {
				tracing::warn!(
					gate = %self.gate.name(),
					path = %req.uri().path(),
					code = failure.code(),
					error = %failure,
					"Gate failed"
				);
				RequireGateFuture::Rejected {
					resp: Some(GateFailureResponse(failure).into_response()),
				}
			}
		}
	}
}

pin_project! {
	/// Future for [`RequireGateService`].
	#[project = RequireGateFutureProj]
	pub enum RequireGateFuture<F> {
		Inner { #[pin] fut: F },
		Rejected { resp: Option<Response> },
	}
}

impl<F, E> Future for RequireGateFuture<F>
where
	F: Future<Output = Result<Response, E>>,
{
	type Output = Result<Response, E>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		match self.project() {
			RequireGateFutureProj::Inner { fut } => fut.poll(cx),
			RequireGateFutureProj::Rejected { resp } => {
				Poll::Ready(Ok(resp.take().expect("polled after completion")))
			}
		}
	}
}
