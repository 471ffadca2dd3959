use thiserror::Error;

use crate::numeric::EPSILON;

// any of these ends the run, no partial trace is handed out
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    #[error("singular system: determinant {determinant} is within {} of zero", EPSILON)]
    SingularSystem { determinant: f64 },

    #[error(
        "degenerate pivot {value} in column {column}: no row below has a usable entry in that column"
    )]
    DegeneratePivot { column: usize, value: f64 },

    #[error("step {step} ({narration:?}) would record a non-finite value")]
    NonFiniteValue { step: usize, narration: String },

    #[error("trace is empty: no step was recorded")]
    EmptyTrace,
}

impl TraceError {
    #[cfg(test)]
    pub(crate) fn is_degenerate_input(&self) -> bool {
        matches!(
            self,
            Self::SingularSystem { .. } | Self::DegeneratePivot { .. }
        )
    }
}
