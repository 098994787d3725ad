//! Conversion parameters.
//!
//! Contains the HtmlParams struct for controlling classifier and line-buffer
//! behavior.

use crate::error::{ConvertError, Result};

/// Parameters for text-state tracking and line serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlParams {
    /// Fallback output mode: colors are rasterized by the background layer,
    /// so fill/stroke color tracking is disabled entirely.
    pub fallback: bool,

    /// Epsilon for scalar and matrix comparisons in the classifier.
    pub eps: f64,

    /// Minimum magnitude (CSS px) for an emitted horizontal offset. Offsets
    /// below this are dropped during the pre-flush optimization pass.
    pub offset_eps: f64,

    /// Relative tolerance, in em, for rendering a horizontal offset as a
    /// literal space character instead of an empty inline element.
    pub space_threshold: f64,

    /// Device scale constant applied when factoring the draw scale out of
    /// the composed text transform.
    pub text_scale_factor: f64,
}

impl Default for HtmlParams {
    fn default() -> Self {
        Self {
            fallback: false,
            eps: crate::utils::EPSILON,
            offset_eps: 1e-3,
            space_threshold: 0.125,
            text_scale_factor: 1.0,
        }
    }
}

impl HtmlParams {
    /// Creates new parameters with the specified values.
    ///
    /// # Errors
    /// Returns `InvalidParam` if an epsilon is non-positive or the scale
    /// factor is not positive.
    pub fn new(
        fallback: bool,
        eps: f64,
        offset_eps: f64,
        space_threshold: f64,
        text_scale_factor: f64,
    ) -> Result<Self> {
        if eps <= 0.0 || offset_eps <= 0.0 {
            return Err(ConvertError::InvalidParam(
                "epsilons must be positive".to_string(),
            ));
        }
        if text_scale_factor <= 0.0 {
            return Err(ConvertError::InvalidParam(
                "text_scale_factor must be positive".to_string(),
            ));
        }
        Ok(Self {
            fallback,
            eps,
            offset_eps,
            space_threshold,
            text_scale_factor,
        })
    }
}
