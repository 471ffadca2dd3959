pub mod highlight;
pub mod record;
pub mod trace;

pub use highlight::{HighlightEntry, HighlightStyle, Highlights};
pub use record::StepRecord;
pub use trace::{Trace, TraceRecorder};
