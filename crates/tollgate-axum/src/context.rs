// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Building a [`RequestContext`] from an incoming request.
//!
//! Session and API-key middleware run before the gate and insert
//! [`Identity`] / [`ApiKey`] into the request extensions. The query string
//! is parsed here. When a parameter repeats, the first value wins.

use std::collections::HashMap;

use axum::http::Request;
use tollgate::{ApiKey, Identity, RequestContext};

/// Snapshot the gate-relevant parts of `req`.
pub fn request_context<B>(req: &Request<B>) -> RequestContext {
	let extensions = req.extensions();

	RequestContext {
		identity: extensions.get::<Identity>().cloned(),
		query_params: parse_query(req.uri().query()),
		api_key: extensions.get::<ApiKey>().cloned(),
	}
}

fn parse_query(query: Option<&str>) -> HashMap<String, String> {
	let mut params = HashMap::new();
	let Some(query) = query else {
		return params;
	};

	for (key, value) in url::form_urlencoded::parse(query.as_bytes()).into_owned() {
		params.entry(key).or_insert(value);
	}
	params
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::body::Body;

	#[test]
	fn empty_request_has_empty_context() {
		let req = Request::get("/").body(Body::empty()).unwrap();
		assert_eq!(request_context(&req), RequestContext::new());
	}

	#[test]
	fn reads_extensions() {
		let mut req = Request::get("/").body(Body::empty()).unwrap();
		req.extensions_mut().insert(Identity::admin("a1"));
		req.extensions_mut().insert(ApiKey::with_scopes(["read"]));

		let ctx = request_context(&req);
		assert_eq!(ctx.identity, Some(Identity::admin("a1")));
		assert!(ctx.api_key.unwrap().has_scope("read"));
	}

	#[test]
	fn decodes_query_parameters() {
		let req = Request::get("/x?local=a%20b%2Bc&other=1")
			.body(Body::empty())
			.unwrap();

		let ctx = request_context(&req);
		assert_eq!(ctx.query_param("local"), Some("a b+c"));
		assert_eq!(ctx.query_param("other"), Some("1"));
	}

	#[test]
	fn first_repeated_parameter_wins() {
		let req = Request::get("/x?local=first&local=second")
			.body(Body::empty())
			.unwrap();
		assert_eq!(request_context(&req).query_param("local"), Some("first"));
	}

	#[test]
	fn valueless_parameter_is_empty_string() {
		let req = Request::get("/x?local").body(Body::empty()).unwrap();
		assert_eq!(request_context(&req).query_param("local"), Some(""));
	}
}
