//! Error type shared by field construction, placement, and the distance routine.

use thiserror::Error;

/// Errors surfaced before any computation starts.
///
/// Rejected seed candidates and too-short lines are normal outcomes of the
/// placement loop and never show up here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StreamError {
    /// A placement parameter is non-positive or non-finite.
    #[error("invalid placement params: {reason}")]
    InvalidParams { reason: String },

    /// The sampled field cannot support bilinear interpolation.
    #[error("invalid vector field: {reason}")]
    InvalidField { reason: String },

    /// A NaN-separated point table has the wrong shape or separator layout.
    #[error("malformed streamline layout: {reason}")]
    Layout { reason: String },
}

impl StreamError {
    pub(crate) fn params(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    pub(crate) fn field(reason: impl Into<String>) -> Self {
        Self::InvalidField {
            reason: reason.into(),
        }
    }

    pub(crate) fn layout(reason: impl Into<String>) -> Self {
        Self::Layout {
            reason: reason.into(),
        }
    }
}
