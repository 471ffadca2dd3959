// row reduction shared by gaussian elimination and gauss-jordan. the two
// only differ in which rows get cleared for a given pivot.

use crate::{
    error::TraceError,
    grid::{Grid, Snapshot},
    numeric::{fixed2, is_effectively_zero},
    step::{HighlightStyle, Highlights, StepRecord, TraceRecorder},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EliminationScope {
    // row echelon form
    RowsBelow,
    // reduced row echelon form
    AllOtherRows,
}

impl EliminationScope {
    pub fn targets(self, pivot_row: usize, number_of_rows: usize) -> Vec<usize> {
        match self {
            Self::RowsBelow => (pivot_row + 1..number_of_rows).collect(),
            Self::AllOtherRows => (0..number_of_rows).filter(|&j| j != pivot_row).collect(),
        }
    }

    fn describe(self, pivot_row: usize, number_of_rows: usize) -> String {
        match self {
            Self::RowsBelow => format!("j in {}..{}", pivot_row + 1, number_of_rows),
            Self::AllOtherRows => format!("j in 0..{number_of_rows}, j != {pivot_row}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReductionLines {
    pub column_loop: usize,
    pub replacement: usize,
    pub pivot: usize,
    pub normalize: usize,
    pub elimination_loop: usize,
    pub skip: usize,
    pub eliminate: usize,
}

pub struct RowReducer<'r> {
    scope: EliminationScope,
    lines: ReductionLines,
    recorder: &'r mut TraceRecorder,
}

impl<'r> RowReducer<'r> {
    pub fn new(
        scope: EliminationScope,
        lines: ReductionLines,
        recorder: &'r mut TraceRecorder,
    ) -> Self {
        Self {
            scope,
            lines,
            recorder,
        }
    }

    pub fn reduce(&mut self, grid: &mut Grid) -> Result<(), TraceError> {
        for column in 0..grid.number_of_rows() {
            self.reduce_column(grid, column)?;
        }
        Ok(())
    }

    fn reduce_column(&mut self, grid: &mut Grid, i: usize) -> Result<(), TraceError> {
        let width = grid.number_of_columns;
        self.recorder.record(
            StepRecord::new(
                format!("Working on column {}", i + 1),
                format!("i = {i}"),
                grid.snapshot(),
            )
            .at_line(self.lines.column_loop),
        )?;

        if is_effectively_zero(grid.get(i, i)) {
            self.swap_in_replacement_row(grid, i)?;
        }

        let pivot = grid.get(i, i);
        self.recorder.record(
            StepRecord::new(
                format!("Pivot of column {} is {}", i + 1, fixed2(pivot)),
                format!("pivot = m[{i}][{i}] = {}", fixed2(pivot)),
                grid.snapshot(),
            )
            .highlighted(Highlights::cell(i, i, HighlightStyle::Plain))
            .at_line(self.lines.pivot),
        )?;

        if pivot != 1.0 {
            grid.divide_row(i, pivot);
            self.recorder.record(
                StepRecord::new(
                    format!("Row {} normalized", i + 1),
                    format!(
                        "{} != 1, so divide the row by it\nR{} = R{} / {}",
                        fixed2(pivot),
                        i + 1,
                        i + 1,
                        fixed2(pivot)
                    ),
                    grid.snapshot(),
                )
                .highlighted(Highlights::whole_row(i, width, HighlightStyle::Plain))
                .at_line(self.lines.normalize),
            )?;
        }

        let targets = self.scope.targets(i, grid.number_of_rows());
        if targets.is_empty() {
            return Ok(());
        }
        self.recorder.record(
            StepRecord::new(
                match self.scope {
                    EliminationScope::RowsBelow => "Eliminating the rows below the pivot",
                    EliminationScope::AllOtherRows => "Eliminating every other row",
                },
                self.scope.describe(i, grid.number_of_rows()),
                grid.snapshot(),
            )
            .at_line(self.lines.elimination_loop),
        )?;
        for j in targets {
            self.eliminate_row(grid, i, j)?;
        }
        Ok(())
    }

    fn swap_in_replacement_row(&mut self, grid: &mut Grid, i: usize) -> Result<(), TraceError> {
        let value = grid.get(i, i);
        let replacement = (i + 1..grid.number_of_rows())
            .find(|&r| !is_effectively_zero(grid.get(r, i)));
        let Some(r) = replacement else {
            log::warn!(
                "pivot {value:e} in column {} is effectively zero and no row below can replace it",
                i + 1
            );
            return Err(TraceError::DegeneratePivot { column: i, value });
        };
        grid.swap_rows(i, r);
        let width = grid.number_of_columns;
        let highlights = (0..width).fold(Highlights::new(), |h, c| {
            h.with(i, c, HighlightStyle::Plain)
                .with(r, c, HighlightStyle::Plain)
        });
        self.recorder.record(
            StepRecord::new(
                format!("Swapped row {} with row {}", i + 1, r + 1),
                format!(
                    "|{}| < 1e-9, so R{} <-> R{}",
                    fixed2(value),
                    i + 1,
                    r + 1
                ),
                grid.snapshot(),
            )
            .highlighted(highlights)
            .at_line(self.lines.replacement),
        )?;
        Ok(())
    }

    fn eliminate_row(&mut self, grid: &mut Grid, i: usize, j: usize) -> Result<(), TraceError> {
        let factor = grid.get(j, i);
        if is_effectively_zero(factor) {
            self.recorder.record(
                StepRecord::new(
                    format!("Row {} already has 0 in column {}", j + 1, i + 1),
                    format!("|m[{j}][{i}]| < 1e-9, nothing to eliminate"),
                    grid.snapshot(),
                )
                .highlighted(Highlights::cell(j, i, HighlightStyle::Dimmed))
                .at_line(self.lines.skip),
            )?;
            return Ok(());
        }
        grid.subtract_multiple_of_row(j, factor, i);
        let highlights = Highlights::whole_row(j, grid.number_of_columns, HighlightStyle::Plain)
            .with(i, i, HighlightStyle::HighlightPos);
        self.recorder.record(
            StepRecord::new(
                format!("Row {} eliminated", j + 1),
                format!(
                    "factor = m[{j}][{i}] = {}\nR{} = R{} - ({} × R{})",
                    fixed2(factor),
                    j + 1,
                    j + 1,
                    fixed2(factor),
                    i + 1
                ),
                grid.snapshot(),
            )
            .highlighted(highlights)
            .at_line(self.lines.eliminate),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::method::Method;

    const LINES: ReductionLines = ReductionLines {
        column_loop: 2,
        replacement: 5,
        pivot: 7,
        normalize: 10,
        elimination_loop: 13,
        skip: 16,
        eliminate: 19,
    };

    fn reduce(rows: &[[f64; 4]; 3], scope: EliminationScope) -> (Grid, TraceRecorder) {
        let mut grid = Grid::from_rows(rows);
        let mut recorder = TraceRecorder::new(Method::Gaussian);
        RowReducer::new(scope, LINES, &mut recorder)
            .reduce(&mut grid)
            .unwrap();
        (grid, recorder)
    }

    #[test]
    fn targets_per_scope() {
        assert_eq!(EliminationScope::RowsBelow.targets(0, 3), vec![1, 2]);
        assert_eq!(EliminationScope::RowsBelow.targets(2, 3), Vec::<usize>::new());
        assert_eq!(EliminationScope::AllOtherRows.targets(1, 3), vec![0, 2]);
    }

    #[test]
    fn rows_below_reaches_echelon_form() {
        let (grid, _) = reduce(
            &[[2.0, 1.0, -1.0, 8.0], [-3.0, -1.0, 2.0, -11.0], [-2.0, 1.0, 2.0, -3.0]],
            EliminationScope::RowsBelow,
        );
        for i in 0..3 {
            assert!((grid.get(i, i) - 1.0).abs() < 1e-12);
            for j in i + 1..3 {
                assert!(grid.get(j, i).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn all_other_rows_reaches_identity() {
        let (grid, _) = reduce(
            &[[2.0, 1.0, -1.0, 8.0], [-3.0, -1.0, 2.0, -11.0], [-2.0, 1.0, 2.0, -3.0]],
            EliminationScope::AllOtherRows,
        );
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((grid.get(i, j) - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn zero_pivot_is_replaced_by_the_first_usable_row() {
        let (grid, recorder) = reduce(
            &[[0.0, 1.0, 0.0, 2.0], [0.0, 0.0, 1.0, 3.0], [1.0, 0.0, 0.0, 1.0]],
            EliminationScope::RowsBelow,
        );
        assert_eq!(grid.column(3), vec![1.0, 2.0, 3.0]);
        let trace = recorder.finish().unwrap();
        let swap = trace.find("Swapped").unwrap();
        assert_eq!(swap.narration, "Swapped row 1 with row 3");
        assert_eq!(swap.source_line, Some(LINES.replacement));
    }

    #[test]
    fn near_zero_entries_are_skipped_not_eliminated() {
        let (_, recorder) = reduce(
            &[[1.0, 0.0, 0.0, 1.0], [1e-12, 1.0, 0.0, 2.0], [0.0, 0.0, 1.0, 3.0]],
            EliminationScope::RowsBelow,
        );
        let trace = recorder.finish().unwrap();
        assert!(trace.find("Row 2 eliminated").is_none());
        let skipped = trace.find("Row 2 already has 0").unwrap();
        assert_eq!(skipped.snapshot.get(1, 0), Some(1e-12));
        assert_eq!(skipped.highlights.get(1, 0), Some(HighlightStyle::Dimmed));
    }
}
