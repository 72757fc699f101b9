// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Responses for denied and failed gates.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::Serialize;
use tollgate::GateFailure;

/// JSON body for a failed gate.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

/// A [`GateFailure`] rendered for the client.
///
/// The failure is also stored in the response extensions so outer layers
/// (error reporting, access logs) can read it without parsing the body.
#[derive(Debug, Clone)]
pub struct GateFailureResponse(pub GateFailure);

impl IntoResponse for GateFailureResponse {
	fn into_response(self) -> Response {
		let failure = self.0;
		let body = ErrorResponse {
			error: failure.code().to_string(),
			message: failure.to_string(),
		};
		let mut resp = (failure.status(), Json(body)).into_response();
		resp.extensions_mut().insert(failure);
		resp
	}
}

/// A denial: the status alone, no body.
pub fn denied_response(status: StatusCode) -> Response {
	status.into_response()
}
