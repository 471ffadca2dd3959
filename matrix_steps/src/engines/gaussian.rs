use super::{
    describe_system,
    elimination::{EliminationScope, ReductionLines, RowReducer},
    AugmentedMatrix, TraceEngine, CANONICAL_SYSTEM, VARIABLES,
};
use crate::{
    error::TraceError,
    grid::{Grid, Snapshot},
    method::Method,
    numeric::{fixed2, fixed2_list},
    step::{HighlightStyle, Highlights, StepRecord, Trace, TraceRecorder},
};

mod line {
    pub const START: usize = 0;
    pub const ECHELON: usize = 23;
    pub const SOLUTION_INIT: usize = 28;
    pub const VARIABLE_LOOP: usize = 29;
    pub const SUM_TERM: usize = 32;
    pub const SOLVED: usize = 34;
    pub const RESULT: usize = 36;
}

const REDUCTION: ReductionLines = ReductionLines {
    column_loop: 2,
    replacement: 5,
    pivot: 7,
    normalize: 10,
    elimination_loop: 13,
    skip: 16,
    eliminate: 19,
};

pub struct GaussianEliminationEngine {
    system: AugmentedMatrix,
}

impl GaussianEliminationEngine {
    pub fn new(system: AugmentedMatrix) -> Self {
        Self { system }
    }

    pub fn canonical() -> Self {
        Self::new(CANONICAL_SYSTEM)
    }

    fn back_substitute(
        grid: &Grid,
        recorder: &mut TraceRecorder,
    ) -> Result<Vec<f64>, TraceError> {
        let n = grid.number_of_rows();
        let mut solution = vec![0.0; n];
        recorder.record(
            StepRecord::new(
                "Starting back substitution",
                format!("solution = [{}]", fixed2_list(&solution)),
                grid.snapshot(),
            )
            .at_line(line::SOLUTION_INIT),
        )?;

        for i in (0..n).rev() {
            let var = VARIABLES[i];
            recorder.record(
                StepRecord::new(
                    format!("Solving for {var}"),
                    format!("i = {i} (walking upwards)"),
                    grid.snapshot(),
                )
                .at_line(line::VARIABLE_LOOP),
            )?;

            let mut sum = 0.0;
            let mut terms = Vec::new();
            for j in i + 1..n {
                let coefficient = grid.get(i, j);
                sum += coefficient * solution[j];
                terms.push(format!("({} × {})", fixed2(coefficient), fixed2(solution[j])));
                recorder.record(
                    StepRecord::new(
                        format!("Adding the known {} term", VARIABLES[j]),
                        format!(
                            "sum += {} × {}\ncurrent sum: {}",
                            fixed2(coefficient),
                            fixed2(solution[j]),
                            fixed2(sum)
                        ),
                        grid.snapshot(),
                    )
                    .highlighted(Highlights::cell(i, j, HighlightStyle::Plain))
                    .at_line(line::SUM_TERM),
                )?;
            }

            let rhs = grid.get(i, n);
            let coefficient = grid.get(i, i);
            let value = (rhs - sum) / coefficient;
            solution[i] = value;
            let substituted = if terms.is_empty() {
                "0".to_string()
            } else {
                terms.join(" + ")
            };
            recorder.record(
                StepRecord::new(
                    format!("Solved {var}"),
                    format!(
                        "{c}{var} + sum = {r}\n{c}{var} + [{substituted}] = {r}\n{var} = ({r} - {s}) / {c}\n{var} = {v}",
                        c = fixed2(coefficient),
                        r = fixed2(rhs),
                        s = fixed2(sum),
                        v = fixed2(value),
                    ),
                    grid.snapshot(),
                )
                .highlighted(
                    Highlights::cell(i, i, HighlightStyle::HighlightPos).with(
                        i,
                        n,
                        HighlightStyle::Plain,
                    ),
                )
                .at_line(line::SOLVED),
            )?;
        }
        Ok(solution)
    }
}

impl TraceEngine for GaussianEliminationEngine {
    fn method(&self) -> Method {
        Method::Gaussian
    }

    fn generate(&self) -> Result<Trace, TraceError> {
        let mut recorder = TraceRecorder::new(self.method());
        let mut grid = Grid::from_rows(&self.system);
        recorder.record(
            StepRecord::new(
                "Start: augmented matrix [A|B]",
                describe_system(&grid),
                grid.snapshot(),
            )
            .at_line(line::START),
        )?;

        log::debug!("gaussian: forward elimination");
        RowReducer::new(EliminationScope::RowsBelow, REDUCTION, &mut recorder).reduce(&mut grid)?;
        recorder.record(
            StepRecord::new(
                "Forward elimination complete",
                "The matrix is in row echelon form",
                grid.snapshot(),
            )
            .at_line(line::ECHELON),
        )?;

        log::debug!("gaussian: back substitution");
        let solution = Self::back_substitute(&grid, &mut recorder)?;
        recorder.record(
            StepRecord::new(
                "Gaussian elimination complete",
                format!("Solution: [{}]", fixed2_list(&solution)),
                solution.snapshot(),
            )
            .at_line(line::RESULT),
        )?;
        recorder.finish()
    }
}
