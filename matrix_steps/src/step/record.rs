use serde::{Deserialize, Serialize};

use super::highlight::Highlights;
use crate::grid::MatrixSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub narration: String,
    pub equation: String,
    pub snapshot: MatrixSnapshot,
    pub highlights: Highlights,
    // index into the method's listing
    pub source_line: Option<usize>,
}

impl StepRecord {
    pub fn new(
        narration: impl Into<String>,
        equation: impl Into<String>,
        snapshot: MatrixSnapshot,
    ) -> Self {
        Self {
            narration: narration.into(),
            equation: equation.into(),
            snapshot,
            highlights: Highlights::new(),
            source_line: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.source_line = Some(line);
        self
    }

    pub fn highlighted(mut self, highlights: Highlights) -> Self {
        self.highlights = highlights;
        self
    }
}
