// sarrus determinant, minors, cofactors, adjugate, adj(A) / det(A), then x = A^-1 b

use itertools::Itertools;

use super::{CoefficientMatrix, TraceEngine, CANONICAL_SYSTEM, VARIABLES};
use crate::{
    error::TraceError,
    grid::{Grid, PartialGrid, Snapshot},
    method::Method,
    numeric::{fixed2, fixed2_list, is_effectively_zero},
    step::{HighlightStyle, Highlights, StepRecord, Trace, TraceRecorder},
};

mod line {
    pub const START: usize = 0;
    pub const EXTEND: usize = 3;
    pub const POSITIVE: usize = 7;
    pub const NEGATIVE: usize = 10;
    pub const DETERMINANT: usize = 12;
    pub const MINOR: usize = 20;
    pub const MINORS: usize = 29;
    pub const MINORS_ROW: usize = 31;
    pub const COFACTORS: usize = 35;
    pub const SIGN_FLIP: usize = 38;
    pub const ADJUGATE: usize = 42;
    pub const ADJUGATE_DONE: usize = 43;
    pub const SWAP: usize = 45;
    pub const INVERSE: usize = 48;
    pub const INVERSE_ROW: usize = 51;
    pub const INVERSE_DONE: usize = 54;
    pub const SOLVE: usize = 57;
    pub const SOLVE_ROW: usize = 60;
    pub const SOLUTION: usize = 62;
}

// off-diagonal pairs exchanged to transpose a 3x3 grid in place
const TRANSPOSE_SWAPS: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

// cells of the extended 3x5 grid, top-left to bottom-right
pub fn positive_diagonal(i: usize) -> [(usize, usize); 3] {
    [(0, i), (1, i + 1), (2, i + 2)]
}

// bottom-left to top-right
pub fn negative_diagonal(i: usize) -> [(usize, usize); 3] {
    [(2, i), (1, i + 1), (0, i + 2)]
}

pub fn extend_for_sarrus(a: &CoefficientMatrix) -> Grid {
    let rows = a.map(|r| [r[0], r[1], r[2], r[0], r[1]]);
    Grid::from_rows(&rows)
}

fn diagonal_product(extended: &Grid, cells: [(usize, usize); 3]) -> f64 {
    cells.iter().map(|&(r, c)| extended.get(r, c)).product()
}

pub fn sarrus_determinant(a: &CoefficientMatrix) -> f64 {
    let extended = extend_for_sarrus(a);
    let positive: f64 = (0..3)
        .map(|i| diagonal_product(&extended, positive_diagonal(i)))
        .sum();
    let negative: f64 = (0..3)
        .map(|i| diagonal_product(&extended, negative_diagonal(i)))
        .sum();
    positive - negative
}

// [a, b, c, d]
pub fn submatrix(a: &CoefficientMatrix, row: usize, column: usize) -> [f64; 4] {
    let mut block = [0.0; 4];
    let cells = (0..3)
        .filter(|&r| r != row)
        .cartesian_product((0..3).filter(|&c| c != column));
    for (slot, (r, c)) in cells.enumerate() {
        block[slot] = a[r][c];
    }
    block
}

pub fn minor(a: &CoefficientMatrix, row: usize, column: usize) -> f64 {
    let [p, q, r, s] = submatrix(a, row, column);
    p * s - q * r
}

// expansion along the first row
#[cfg(test)]
pub(crate) fn cofactor_expansion_determinant(a: &CoefficientMatrix) -> f64 {
    (0..3)
        .map(|j| {
            let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
            sign * a[0][j] * minor(a, 0, j)
        })
        .sum()
}

pub struct MatrixInverseEngine {
    coefficients: CoefficientMatrix,
    constants: [f64; 3],
}

impl MatrixInverseEngine {
    pub fn new(coefficients: CoefficientMatrix, constants: [f64; 3]) -> Self {
        Self {
            coefficients,
            constants,
        }
    }

    pub fn canonical() -> Self {
        let (coefficients, constants) = super::split_augmented(&CANONICAL_SYSTEM);
        Self::new(coefficients, constants)
    }

    fn determinant(&self, recorder: &mut TraceRecorder) -> Result<f64, TraceError> {
        let a = Grid::from_rows(&self.coefficients);
        recorder.record(
            StepRecord::new(
                "Step 1: determinant, extending the matrix",
                "Append columns 1 and 2 to the right",
                a.snapshot(),
            )
            .at_line(line::START),
        )?;
        let extended = extend_for_sarrus(&self.coefficients);
        recorder.record(
            StepRecord::new("Extended matrix ready", "Rule of Sarrus setup", extended.snapshot())
                .at_line(line::EXTEND),
        )?;

        let positive = self.diagonal_sum(&extended, recorder, true)?;
        let negative = self.diagonal_sum(&extended, recorder, false)?;
        let determinant = positive - negative;
        recorder.record(
            StepRecord::new(
                "Determinant",
                format!(
                    "det = pos_sum - neg_sum\n    = {} - {} = {}",
                    fixed2(positive),
                    fixed2(negative),
                    fixed2(determinant)
                ),
                a.snapshot(),
            )
            .at_line(line::DETERMINANT),
        )?;
        Ok(determinant)
    }

    fn diagonal_sum(
        &self,
        extended: &Grid,
        recorder: &mut TraceRecorder,
        positive: bool,
    ) -> Result<f64, TraceError> {
        let (label, style, source_line) = if positive {
            ("Positive", HighlightStyle::HighlightPos, line::POSITIVE)
        } else {
            ("Negative", HighlightStyle::HighlightNeg, line::NEGATIVE)
        };
        let mut sum = 0.0;
        for i in 0..3 {
            let cells = if positive {
                positive_diagonal(i)
            } else {
                negative_diagonal(i)
            };
            let product = diagonal_product(extended, cells);
            sum += product;
            let factors = cells
                .iter()
                .map(|&(r, c)| fixed2(extended.get(r, c)))
                .join(" × ");
            let highlights = cells
                .iter()
                .fold(Highlights::new(), |h, &(r, c)| h.with(r, c, style));
            recorder.record(
                StepRecord::new(
                    format!("{label} diagonal {}", i + 1),
                    format!("({factors}) = {}", fixed2(product)),
                    extended.snapshot(),
                )
                .highlighted(highlights)
                .at_line(source_line),
            )?;
        }
        let name = if positive { "pos_sum" } else { "neg_sum" };
        recorder.record(
            StepRecord::new(
                format!("Sum of {} diagonals", label.to_lowercase()),
                format!("{name} = {}", fixed2(sum)),
                extended.snapshot(),
            )
            .at_line(source_line),
        )?;
        Ok(sum)
    }

    fn minors(&self, recorder: &mut TraceRecorder) -> Result<Grid, TraceError> {
        let a = Grid::from_rows(&self.coefficients);
        recorder.record(
            StepRecord::new(
                "Step 2: matrix of minors",
                "For each cell, the determinant of the 2x2 left after deleting its row and column",
                a.snapshot(),
            )
            .at_line(line::MINORS),
        )?;

        let mut minors = Grid::zeroes(3, 3);
        let mut progress = PartialGrid::empty(3, 3);
        for i in 0..3 {
            for j in 0..3 {
                let [p, q, r, s] = submatrix(&self.coefficients, i, j);
                let value = minor(&self.coefficients, i, j);
                minors.set(i, j, value);
                progress.fill(i, j, value);

                let mut highlights = Highlights::new();
                for k in 0..3 {
                    highlights.insert(i, k, HighlightStyle::Dimmed);
                    highlights.insert(k, j, HighlightStyle::Dimmed);
                }
                for (kept_row, kept_col) in (0..3)
                    .filter(|&r| r != i)
                    .cartesian_product((0..3).filter(|&c| c != j))
                {
                    highlights.insert(kept_row, kept_col, HighlightStyle::Submatrix);
                }
                let (p, q, r, s) = (fixed2(p), fixed2(q), fixed2(r), fixed2(s));
                recorder.record(
                    StepRecord::new(
                        format!("Minor at [{i},{j}]"),
                        format!(
                            "| {p}  {q} |\n| {r}  {s} | = ({p} × {s}) - ({q} × {r}) = {}",
                            fixed2(value)
                        ),
                        a.snapshot(),
                    )
                    .highlighted(highlights)
                    .at_line(line::MINOR),
                )?;
            }
            let row = (0..3).map(|j| minors.get(i, j)).collect_vec();
            recorder.record(
                StepRecord::new(
                    format!("Row {} of the minors matrix filled", i + 1),
                    format!("M[{i}] = [{}]", fixed2_list(&row)),
                    progress.snapshot(),
                )
                .highlighted(Highlights::whole_row(i, 3, HighlightStyle::Plain))
                .at_line(line::MINORS_ROW),
            )?;
        }
        Ok(minors)
    }

    fn cofactors(&self, minors: &Grid, recorder: &mut TraceRecorder) -> Result<Grid, TraceError> {
        recorder.record(
            StepRecord::new(
                "Step 3: cofactor matrix",
                "Apply the checkerboard of signs:\n+ - +\n- + -\n+ - +",
                minors.snapshot(),
            )
            .at_line(line::COFACTORS),
        )?;
        let mut cofactors = minors.clone();
        for (i, j) in (0..3).cartesian_product(0..3) {
            if (i + j) % 2 == 0 {
                continue;
            }
            let old = cofactors.get(i, j);
            cofactors.set(i, j, -old);
            recorder.record(
                StepRecord::new(
                    format!("Sign change at [{i},{j}]"),
                    format!(
                        "({i} + {j}) is odd, sign (-)\n{} × -1 = {}",
                        fixed2(old),
                        fixed2(-old)
                    ),
                    cofactors.snapshot(),
                )
                .highlighted(Highlights::cell(i, j, HighlightStyle::HighlightNeg))
                .at_line(line::SIGN_FLIP),
            )?;
        }
        Ok(cofactors)
    }

    fn adjugate(&self, cofactors: &Grid, recorder: &mut TraceRecorder) -> Result<Grid, TraceError> {
        recorder.record(
            StepRecord::new(
                "Step 4: adjugate, the transposed cofactor matrix",
                "Swap rows with columns",
                cofactors.snapshot(),
            )
            .at_line(line::ADJUGATE),
        )?;
        let mut adjugate = cofactors.clone();
        for (r, c) in TRANSPOSE_SWAPS {
            let upper = adjugate.get(r, c);
            let lower = adjugate.get(c, r);
            adjugate.swap_cells((r, c), (c, r));
            recorder.record(
                StepRecord::new(
                    format!("Swapping [{r},{c}] with [{c},{r}]"),
                    format!("{} <-> {}", fixed2(upper), fixed2(lower)),
                    adjugate.snapshot(),
                )
                .highlighted(
                    Highlights::cell(r, c, HighlightStyle::Plain).with(c, r, HighlightStyle::Plain),
                )
                .at_line(line::SWAP),
            )?;
        }
        recorder.record(
            StepRecord::new("Adjugate complete", "adj(A)", adjugate.snapshot())
                .at_line(line::ADJUGATE_DONE),
        )?;
        Ok(adjugate)
    }

    fn inverse(
        &self,
        adjugate: &Grid,
        determinant: f64,
        recorder: &mut TraceRecorder,
    ) -> Result<Grid, TraceError> {
        recorder.record(
            StepRecord::new(
                "Step 5: inverse",
                format!("Multiply by 1/det (1/{})", fixed2(determinant)),
                adjugate.snapshot(),
            )
            .at_line(line::INVERSE),
        )?;
        let scale = 1.0 / determinant;
        let mut inverse = Grid::zeroes(3, 3);
        let mut progress = PartialGrid::empty(3, 3);
        for i in 0..3 {
            for j in 0..3 {
                let value = adjugate.get(i, j) * scale;
                inverse.set(i, j, value);
                progress.fill(i, j, value);
            }
            recorder.record(
                StepRecord::new(
                    format!("Inverse row {}", i + 1),
                    format!(
                        "[{}] / {}\n= [{}]",
                        fixed2_list(adjugate.row(i)),
                        fixed2(determinant),
                        fixed2_list(inverse.row(i))
                    ),
                    progress.snapshot(),
                )
                .highlighted(Highlights::whole_row(i, 3, HighlightStyle::HighlightPos))
                .at_line(line::INVERSE_ROW),
            )?;
        }
        recorder.record(
            StepRecord::new("Matrix inverse complete", "A^(-1)", inverse.snapshot())
                .at_line(line::INVERSE_DONE),
        )?;
        Ok(inverse)
    }

    fn solve(&self, inverse: &Grid, recorder: &mut TraceRecorder) -> Result<Vec<f64>, TraceError> {
        recorder.record(
            StepRecord::new(
                "Step 6: solve x = A^(-1) · b",
                format!(
                    "Multiply the inverse by the constants b = [{}]",
                    fixed2_list(&self.constants)
                ),
                inverse.snapshot(),
            )
            .at_line(line::SOLVE),
        )?;
        let mut solution = Vec::with_capacity(3);
        for i in 0..3 {
            let value: f64 = (0..3).map(|j| inverse.get(i, j) * self.constants[j]).sum();
            let terms = (0..3)
                .map(|j| format!("({} × {})", fixed2(inverse.get(i, j)), fixed2(self.constants[j])))
                .join(" + ");
            solution.push(value);
            recorder.record(
                StepRecord::new(
                    format!("Solving {} from row {} of the inverse", VARIABLES[i], i + 1),
                    format!("{} = {terms}\n  = {}", VARIABLES[i], fixed2(value)),
                    inverse.snapshot(),
                )
                .highlighted(Highlights::whole_row(i, 3, HighlightStyle::Plain))
                .at_line(line::SOLVE_ROW),
            )?;
        }
        Ok(solution)
    }
}

impl TraceEngine for MatrixInverseEngine {
    fn method(&self) -> Method {
        Method::Inverse
    }

    fn generate(&self) -> Result<Trace, TraceError> {
        let mut recorder = TraceRecorder::new(self.method());

        log::debug!("inverse: determinant");
        let determinant = self.determinant(&mut recorder)?;
        if is_effectively_zero(determinant) {
            log::warn!("determinant {determinant:e} is effectively zero, matrix has no inverse");
            return Err(TraceError::SingularSystem { determinant });
        }

        log::debug!("inverse: minors, cofactors and adjugate");
        let minors = self.minors(&mut recorder)?;
        let cofactors = self.cofactors(&minors, &mut recorder)?;
        let adjugate = self.adjugate(&cofactors, &mut recorder)?;

        log::debug!("inverse: scaling by 1/{determinant} and solving");
        let inverse = self.inverse(&adjugate, determinant, &mut recorder)?;
        let solution = self.solve(&inverse, &mut recorder)?;
        recorder.record(
            StepRecord::new(
                "Solution found",
                format!("X = [{}]", fixed2_list(&solution)),
                solution.snapshot(),
            )
            .at_line(line::SOLUTION),
        )?;
        recorder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::{gaussian::GaussianEliminationEngine, listing, split_augmented};

    fn canonical_coefficients() -> CoefficientMatrix {
        split_augmented(&CANONICAL_SYSTEM).0
    }

    #[test]
    fn lines_point_at_the_matching_listing_code() {
        let check = |index: usize, needle: &str| {
            let text = listing::line(Method::Inverse, index).unwrap();
            assert!(text.contains(needle), "line {index}: {text:?} lacks {needle:?}");
        };
        check(line::START, "fn determinant");
        check(line::EXTEND, "r[0], r[1]]");
        check(line::POSITIVE, "pos_sum +=");
        check(line::NEGATIVE, "neg_sum +=");
        check(line::DETERMINANT, "pos_sum - neg_sum");
        check(line::MINOR, "sub[0] * sub[3]");
        check(line::MINORS, "for i in 0..3");
        check(line::MINORS_ROW, "minors[i][j] =");
        check(line::COFACTORS, "for i in 0..3");
        check(line::SIGN_FLIP, "-cofactors[i][j]");
        check(line::ADJUGATE, "let mut adjugate");
        check(line::ADJUGATE_DONE, "[(0, 1), (0, 2), (1, 2)]");
        check(line::SWAP, "adjugate[r][c] = adjugate[c][r]");
        check(line::INVERSE, "let mut inverse");
        check(line::INVERSE_ROW, "(1.0 / det)");
        check(line::INVERSE_DONE, "Ok(inverse)");
        check(line::SOLVE, "fn solve");
        check(line::SOLVE_ROW, "inverse[i][j] * b[j]");
        check(line::SOLUTION, "x");
    }

    #[test]
    fn sarrus_matches_first_row_expansion() {
        let a = canonical_coefficients();
        assert_eq!(sarrus_determinant(&a), -1.0);
        assert_eq!(cofactor_expansion_determinant(&a), -1.0);
        let b = [[4.0, -2.0, 1.0], [-2.0, 4.0, -2.0], [1.0, -2.0, 4.0]];
        assert!((sarrus_determinant(&b) - cofactor_expansion_determinant(&b)).abs() < 1e-9);
    }

    #[test]
    fn submatrix_skips_row_and_column() {
        let a = canonical_coefficients();
        assert_eq!(submatrix(&a, 0, 0), [-1.0, 2.0, 1.0, 2.0]);
        assert_eq!(submatrix(&a, 1, 2), [2.0, 1.0, -2.0, 1.0]);
        assert_eq!(minor(&a, 1, 2), 4.0);
    }

    #[test]
    fn diagonal_steps_highlight_their_three_cells() {
        let trace = MatrixInverseEngine::canonical().generate().unwrap();
        let first = trace.find("Positive diagonal 1").unwrap();
        assert_eq!(first.equation, "(2.00 × -1.00 × 2.00) = -4.00");
        assert_eq!(first.highlights.len(), 3);
        assert_eq!(first.highlights.get(2, 2), Some(HighlightStyle::HighlightPos));
        assert_eq!(first.snapshot.number_of_columns(), 5);
        let last = trace.find("Negative diagonal 3").unwrap();
        assert_eq!(last.highlights.get(0, 4), Some(HighlightStyle::HighlightNeg));
        let det = trace.find("Determinant").unwrap();
        assert_eq!(det.equation, "det = pos_sum - neg_sum\n    = -5.00 - -4.00 = -1.00");
    }

    #[test]
    fn minors_matrix_fills_in_row_by_row() {
        let trace = MatrixInverseEngine::canonical().generate().unwrap();
        let minor_steps = trace
            .iter()
            .filter(|s| s.narration.starts_with("Minor at"))
            .count();
        assert_eq!(minor_steps, 9);

        let first_row = trace.find("Row 1 of the minors matrix").unwrap();
        assert_eq!(first_row.snapshot.get(0, 0), Some(-4.0));
        assert_eq!(first_row.snapshot.get(0, 2), Some(-5.0));
        assert_eq!(first_row.snapshot.get(1, 0), None);
        assert_eq!(first_row.snapshot.get(2, 2), None);
        let last_row = trace.find("Row 3 of the minors matrix").unwrap();
        assert!(last_row.snapshot.to_grid().is_some());

        let m12 = trace.find("Minor at [1,2]").unwrap();
        assert_eq!(
            m12.equation,
            "| 2.00  1.00 |\n| -2.00  1.00 | = (2.00 × 1.00) - (1.00 × -2.00) = 4.00"
        );
        assert_eq!(m12.highlights.get(1, 0), Some(HighlightStyle::Dimmed));
        assert_eq!(m12.highlights.get(0, 2), Some(HighlightStyle::Dimmed));
        assert_eq!(m12.highlights.get(2, 1), Some(HighlightStyle::Submatrix));
    }

    #[test]
    fn only_odd_positions_record_a_sign_change() {
        let trace = MatrixInverseEngine::canonical().generate().unwrap();
        let flips = trace
            .iter()
            .filter(|s| s.narration.starts_with("Sign change"))
            .map(|s| s.narration.as_str())
            .collect_vec();
        assert_eq!(
            flips,
            vec![
                "Sign change at [0,1]",
                "Sign change at [1,0]",
                "Sign change at [1,2]",
                "Sign change at [2,1]"
            ]
        );
    }

    #[test]
    fn three_swaps_transpose_the_cofactors() {
        let trace = MatrixInverseEngine::canonical().generate().unwrap();
        let swaps = trace
            .iter()
            .filter(|s| s.narration.starts_with("Swapping"))
            .count();
        assert_eq!(swaps, 3);
        let cofactors = trace
            .find("Step 4")
            .and_then(|s| s.snapshot.to_grid())
            .unwrap();
        let adjugate = trace
            .find("Adjugate complete")
            .and_then(|s| s.snapshot.to_grid())
            .unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(adjugate.get(i, j), cofactors.get(j, i));
            }
        }
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let trace = MatrixInverseEngine::canonical().generate().unwrap();
        let inverse = trace
            .find("Matrix inverse complete")
            .and_then(|s| s.snapshot.to_grid())
            .unwrap();
        let a = Grid::from_rows(&canonical_coefficients());
        let product = inverse.multiply(&a);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product.get(i, j) - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn inverse_rows_appear_one_at_a_time() {
        let trace = MatrixInverseEngine::canonical().generate().unwrap();
        let row1 = trace.find("Inverse row 1").unwrap();
        assert!(row1.snapshot.first_row_values().is_some());
        assert_eq!(row1.snapshot.get(1, 1), None);
        assert_eq!(row1.source_line, Some(line::INVERSE_ROW));
    }

    #[test]
    fn solving_with_the_inverse_matches_gaussian_elimination() {
        let by_inverse = MatrixInverseEngine::canonical()
            .generate()
            .unwrap()
            .solution()
            .unwrap();
        let by_elimination = GaussianEliminationEngine::canonical()
            .generate()
            .unwrap()
            .solution()
            .unwrap();
        for (a, b) in by_inverse.iter().zip(&by_elimination) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn singular_matrix_stops_after_the_determinant() {
        let engine = MatrixInverseEngine::new(
            [[1.0, 2.0, 3.0], [1.0, 2.0, 3.0], [0.0, 1.0, 1.0]],
            [1.0, 2.0, 3.0],
        );
        assert_eq!(
            engine.generate().unwrap_err(),
            TraceError::SingularSystem { determinant: 0.0 }
        );
    }
}
