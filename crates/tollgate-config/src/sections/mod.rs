// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod local;

pub use local::{LocalRequestConfig, LocalRequestConfigLayer, DEFAULT_LOCAL_QUERY_PARAM};
