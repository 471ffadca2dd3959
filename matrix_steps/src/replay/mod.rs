use crate::step::{StepRecord, Trace};

// moving yields a new state; the trace is never touched
#[derive(Debug, Clone, Copy)]
pub struct ReplayState<'t> {
    trace: &'t Trace,
    cursor: usize,
}

impl<'t> ReplayState<'t> {
    pub fn new(trace: &'t Trace) -> Self {
        Self { trace, cursor: 0 }
    }

    pub fn at(trace: &'t Trace, index: usize) -> Self {
        Self {
            trace,
            cursor: index.min(trace.len().saturating_sub(1)),
        }
    }

    pub fn trace(&self) -> &'t Trace {
        self.trace
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &'t StepRecord {
        &self.trace.steps()[self.cursor]
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.trace.len()
    }

    pub fn forward(self) -> Self {
        if self.can_go_forward() {
            Self {
                cursor: self.cursor + 1,
                ..self
            }
        } else {
            self
        }
    }

    pub fn backward(self) -> Self {
        if self.can_go_back() {
            Self {
                cursor: self.cursor - 1,
                ..self
            }
        } else {
            self
        }
    }

    pub fn reset(self) -> Self {
        Self::new(self.trace)
    }

    // 1-based
    pub fn position(&self) -> String {
        format!("{} / {}", self.cursor + 1, self.trace.len())
    }
}
