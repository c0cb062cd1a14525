// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! The topo image a session draws over.

use crate::model::TopoId;
use kurbo::Size;

/// A crag/sector photograph used as the drawing background.
///
/// Immutable once loaded; fetched once per editor session. The intrinsic
/// pixel size may be unknown until the host's image loader reports it, and
/// no coordinate work happens before then.
#[derive(Debug, Clone)]
pub struct TopoImage {
    pub id: TopoId,
    /// Where the host can fetch the bitmap. Opaque to this crate.
    pub url: String,
    /// Intrinsic pixel size, once known.
    pub size: Option<Size>,
}

impl TopoImage {
    pub fn new(id: TopoId, url: impl Into<String>, size: Option<Size>) -> Self {
        Self {
            id,
            url: url.into(),
            size,
        }
    }

    /// True once the intrinsic size is known and usable.
    pub fn is_loaded(&self) -> bool {
        matches!(self.size, Some(s) if s.width > 0.0 && s.height > 0.0)
    }
}
