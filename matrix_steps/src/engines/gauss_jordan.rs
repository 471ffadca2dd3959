use super::{
    describe_system,
    elimination::{EliminationScope, ReductionLines, RowReducer},
    AugmentedMatrix, TraceEngine, CANONICAL_SYSTEM,
};
use crate::{
    error::TraceError,
    grid::{Grid, Snapshot},
    method::Method,
    numeric::fixed2_list,
    step::{StepRecord, Trace, TraceRecorder},
};

const START_LINE: usize = 0;
const EXTRACT_LINE: usize = 23;

const REDUCTION: ReductionLines = ReductionLines {
    column_loop: 2,
    replacement: 5,
    pivot: 7,
    normalize: 10,
    elimination_loop: 13,
    skip: 16,
    eliminate: 19,
};

pub struct GaussJordanEngine {
    system: AugmentedMatrix,
}

impl GaussJordanEngine {
    pub fn new(system: AugmentedMatrix) -> Self {
        Self { system }
    }

    pub fn canonical() -> Self {
        Self::new(CANONICAL_SYSTEM)
    }
}

impl TraceEngine for GaussJordanEngine {
    fn method(&self) -> Method {
        Method::GaussJordan
    }

    fn generate(&self) -> Result<Trace, TraceError> {
        let mut recorder = TraceRecorder::new(self.method());
        let mut grid = Grid::from_rows(&self.system);
        recorder.record(
            StepRecord::new(
                "Start: Gauss-Jordan, goal is the identity matrix",
                describe_system(&grid),
                grid.snapshot(),
            )
            .at_line(START_LINE),
        )?;

        RowReducer::new(EliminationScope::AllOtherRows, REDUCTION, &mut recorder)
            .reduce(&mut grid)?;

        let solution = grid.column(grid.number_of_columns - 1);
        recorder.record(
            StepRecord::new(
                "Diagonal matrix reached, solution column extracted",
                format!("Solution = [{}]", fixed2_list(&solution)),
                solution.snapshot(),
            )
            .at_line(EXTRACT_LINE),
        )?;
        recorder.finish()
    }
}
