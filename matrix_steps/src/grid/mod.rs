pub mod matrix;
pub mod snapshot;

pub use matrix::{Grid, PartialGrid};
pub use snapshot::{MatrixSnapshot, Snapshot};
