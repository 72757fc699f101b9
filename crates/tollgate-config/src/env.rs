// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loading secrets from the environment.
//!
//! A secret `FOO` may be given directly as `FOO=value`, or indirectly as
//! `FOO_FILE=/run/secrets/foo`, in which case the file contents (minus one
//! trailing newline) become the value. Setting both is an error.

use std::path::PathBuf;

use thiserror::Error;
use tollgate_common_secret::SecretString;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file {path} (from {var}_FILE): {source}")]
	FileRead {
		var: String,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("both {var} and {var}_FILE are set; set only one")]
	Conflict { var: String },
}

/// Load a secret from `var` or `var_FILE`.
///
/// Empty values count as unset. Returns `Ok(None)` when neither is set.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");
	let direct = std::env::var(var).ok().filter(|v| !v.is_empty());
	let file = std::env::var(&file_var).ok().filter(|v| !v.is_empty());

	match (direct, file) {
		(Some(_), Some(_)) => Err(SecretEnvError::Conflict {
			var: var.to_string(),
		}),
		(Some(value), None) => {
			debug!(var, "loaded secret from environment");
			Ok(Some(SecretString::new(value)))
		}
		(None, Some(path)) => {
			let path = PathBuf::from(path);
			let mut contents =
				std::fs::read_to_string(&path).map_err(|source| SecretEnvError::FileRead {
					var: var.to_string(),
					path: path.clone(),
					source,
				})?;
			if contents.ends_with('\n') {
				contents.pop();
				if contents.ends_with('\r') {
					contents.pop();
				}
			}
			debug!(var, path = %path.display(), "loaded secret from file");
			if contents.is_empty() {
				return Ok(None);
			}
			Ok(Some(SecretString::new(contents)))
		}
		(None, None) => Ok(None),
	}
}
