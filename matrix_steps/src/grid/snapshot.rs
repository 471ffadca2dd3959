use serde::{Deserialize, Serialize};

use super::matrix::{Grid, PartialGrid};

// owns its cells; None where the source had not been filled in yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixSnapshot {
    cells: Vec<Vec<Option<f64>>>,
}

impl MatrixSnapshot {
    pub fn from_cells(cells: Vec<Vec<Option<f64>>>) -> Self {
        Self { cells }
    }

    pub fn solution_row(values: &[f64]) -> Self {
        Self {
            cells: vec![values.iter().copied().map(Some).collect()],
        }
    }

    pub fn number_of_rows(&self) -> usize {
        self.cells.len()
    }

    pub fn number_of_columns(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_single_row(&self) -> bool {
        self.cells.len() == 1
    }

    pub fn get(&self, r: usize, c: usize) -> Option<f64> {
        self.cells.get(r).and_then(|row| row.get(c)).copied().flatten()
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.cells
    }

    pub fn is_finite(&self) -> bool {
        self.cells.iter().flatten().flatten().all(|v| v.is_finite())
    }

    pub fn first_row_values(&self) -> Option<Vec<f64>> {
        self.cells.first()?.iter().copied().collect()
    }

    pub fn to_grid(&self) -> Option<Grid> {
        PartialGrid {
            number_of_columns: self.number_of_columns(),
            rows: self.cells.clone(),
        }
        .to_grid()
    }

    #[cfg(test)]
    pub(crate) fn matches(&self, grid: &Grid) -> bool {
        self.to_grid().as_ref() == Some(grid)
    }
}

pub trait Snapshot {
    fn snapshot(&self) -> MatrixSnapshot;
}

impl Snapshot for Grid {
    fn snapshot(&self) -> MatrixSnapshot {
        MatrixSnapshot {
            cells: self
                .rows
                .iter()
                .map(|row| row.iter().copied().map(Some).collect())
                .collect(),
        }
    }
}

impl Snapshot for PartialGrid {
    fn snapshot(&self) -> MatrixSnapshot {
        MatrixSnapshot {
            cells: self.rows.clone(),
        }
    }
}

impl Snapshot for [f64] {
    fn snapshot(&self) -> MatrixSnapshot {
        MatrixSnapshot::solution_row(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn snapshot_does_not_follow_later_mutation() {
        let mut grid = Grid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let before = grid.snapshot();
        grid.divide_row(0, 2.0);
        grid.set(1, 1, 40.0);
        assert_eq!(before.get(0, 0), Some(1.0));
        assert_eq!(before.get(1, 1), Some(4.0));
        assert!(!before.matches(&grid));
        assert!(grid.snapshot().matches(&grid));
    }

    #[test]
    fn partial_snapshot_keeps_placeholders() {
        let mut minors = PartialGrid::empty(3, 3);
        minors.fill(0, 0, -1.0);
        let snapshot = minors.snapshot();
        assert_eq!(snapshot.get(0, 0), Some(-1.0));
        assert_eq!(snapshot.get(2, 2), None);
        assert_eq!(snapshot.number_of_columns(), 3);
        assert!(snapshot.to_grid().is_none());
        assert!(snapshot.first_row_values().is_none());
    }

    #[test]
    fn non_finite_cells_are_detected() {
        let grid = Grid::from_rows(&[[1.0, f64::NAN]]);
        assert!(!grid.snapshot().is_finite());
        assert!([1.0, f64::INFINITY].snapshot().is_single_row());
        assert!(!MatrixSnapshot::solution_row(&[f64::NEG_INFINITY]).is_finite());
    }
}
