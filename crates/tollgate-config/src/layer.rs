// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration merged across sources.

use serde::Deserialize;

use crate::sections::LocalRequestConfigLayer;

/// One source's view of the configuration; unset sections are `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GateConfigLayer {
	#[serde(default)]
	pub local: Option<LocalRequestConfigLayer>,
}

impl GateConfigLayer {
	/// Merge `other` on top of `self`; fields set in `other` win.
	pub fn merge(&mut self, other: GateConfigLayer) {
		if let Some(local) = other.local {
			match &mut self.local {
				Some(existing) => existing.merge(local),
				None => self.local = Some(local),
			}
		}
	}
}
