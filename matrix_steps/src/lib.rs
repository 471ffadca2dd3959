pub mod engines;
pub mod error;
pub mod grid;
pub mod method;
pub mod numeric;
pub mod render;
pub mod replay;
pub mod step;

pub use engines::{generate_trace, generate_trace_for, TraceEngine};
pub use error::TraceError;
pub use method::Method;
pub use replay::ReplayState;
pub use step::{StepRecord, Trace};
