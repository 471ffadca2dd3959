use serde::{Deserialize, Serialize};

use super::record::StepRecord;
use crate::{error::TraceError, method::Method};

// never empty: built only by TraceRecorder::finish or the checked RawTrace conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrace")]
pub struct Trace {
    method: Method,
    steps: Vec<StepRecord>,
}

#[derive(Deserialize)]
struct RawTrace {
    method: Method,
    steps: Vec<StepRecord>,
}

impl TryFrom<RawTrace> for Trace {
    type Error = TraceError;

    fn try_from(raw: RawTrace) -> Result<Self, Self::Error> {
        if raw.steps.is_empty() {
            return Err(TraceError::EmptyTrace);
        }
        Ok(Trace {
            method: raw.method,
            steps: raw.steps,
        })
    }
}

impl Trace {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepRecord> {
        self.steps.get(index)
    }

    pub fn first(&self) -> &StepRecord {
        &self.steps[0]
    }

    pub fn last(&self) -> &StepRecord {
        &self.steps[self.steps.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepRecord> {
        self.steps.iter()
    }

    // solved vector of the terminal step
    pub fn solution(&self) -> Option<Vec<f64>> {
        let snapshot = &self.last().snapshot;
        if !snapshot.is_single_row() {
            return None;
        }
        snapshot.first_row_values()
    }

    #[cfg(test)]
    pub(crate) fn find(&self, prefix: &str) -> Option<&StepRecord> {
        self.steps.iter().find(|s| s.narration.starts_with(prefix))
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

pub struct TraceRecorder {
    method: Method,
    steps: Vec<StepRecord>,
}

impl TraceRecorder {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, step: StepRecord) -> Result<(), TraceError> {
        if !step.snapshot.is_finite() {
            log::warn!(
                "{}: refusing to record step {} with a non-finite cell",
                self.method,
                self.steps.len()
            );
            return Err(TraceError::NonFiniteValue {
                step: self.steps.len(),
                narration: step.narration,
            });
        }
        log::trace!(
            "{} step {}: {}",
            self.method,
            self.steps.len(),
            step.narration
        );
        self.steps.push(step);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn finish(self) -> Result<Trace, TraceError> {
        if self.steps.is_empty() {
            return Err(TraceError::EmptyTrace);
        }
        log::debug!("{}: trace finished with {} steps", self.method, self.steps.len());
        Ok(Trace {
            method: self.method,
            steps: self.steps,
        })
    }
}
