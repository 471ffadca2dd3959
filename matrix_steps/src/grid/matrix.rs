// mutable working grids the engines operate on. nothing here is handed out
// to consumers directly: a step only ever sees a snapshot copy.

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub number_of_columns: usize,
    pub rows: Vec<Vec<f64>>,
}

impl Grid {
    pub fn zeroes(rows: usize, cols: usize) -> Self {
        Self {
            number_of_columns: cols,
            rows: (0..rows).map(|_| vec![0.0; cols]).collect(),
        }
    }

    pub fn from_rows<const R: usize, const C: usize>(rows: &[[f64; C]; R]) -> Self {
        Self {
            number_of_columns: C,
            rows: rows.iter().map(|row| row.to_vec()).collect(),
        }
    }

    pub fn number_of_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.rows[r][c]
    }

    pub fn set(&mut self, r: usize, c: usize, v: f64) {
        self.rows[r][c] = v;
    }

    pub fn row(&self, r: usize) -> &[f64] {
        &self.rows[r]
    }

    pub fn column(&self, c: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[c]).collect()
    }

    pub fn divide_row(&mut self, r: usize, divisor: f64) {
        for value in self.rows[r].iter_mut() {
            *value /= divisor;
        }
    }

    // row[target] -= factor * row[source]
    pub fn subtract_multiple_of_row(&mut self, target: usize, factor: f64, source: usize) {
        debug_assert_ne!(target, source);
        for k in 0..self.number_of_columns {
            let delta = factor * self.rows[source][k];
            self.rows[target][k] -= delta;
        }
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    pub fn swap_cells(&mut self, (r1, c1): (usize, usize), (r2, c2): (usize, usize)) {
        let first = self.rows[r1][c1];
        self.rows[r1][c1] = self.rows[r2][c2];
        self.rows[r2][c2] = first;
    }

    // plain product, used to check an inverse against the matrix it came from
    #[cfg(test)]
    pub(crate) fn multiply(&self, other: &Grid) -> Grid {
        debug_assert_eq!(self.number_of_columns, other.number_of_rows());
        let mut product = Grid::zeroes(self.number_of_rows(), other.number_of_columns);
        for i in 0..self.number_of_rows() {
            for j in 0..other.number_of_columns {
                let sum = (0..self.number_of_columns)
                    .map(|k| self.rows[i][k] * other.rows[k][j])
                    .sum();
                product.rows[i][j] = sum;
            }
        }
        product
    }
}

// a grid whose cells are filled in one at a time, e.g. the matrix of minors
#[derive(Debug, Clone, PartialEq)]
pub struct PartialGrid {
    pub number_of_columns: usize,
    pub rows: Vec<Vec<Option<f64>>>,
}

impl PartialGrid {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            number_of_columns: cols,
            rows: (0..rows).map(|_| vec![None; cols]).collect(),
        }
    }

    pub fn fill(&mut self, r: usize, c: usize, v: f64) {
        self.rows[r][c] = Some(v);
    }

    #[cfg(test)]
    pub(crate) fn is_complete(&self) -> bool {
        self.rows.iter().flatten().all(Option::is_some)
    }

    pub fn to_grid(&self) -> Option<Grid> {
        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().copied().collect::<Option<Vec<f64>>>())
            .collect::<Option<Vec<_>>>()?;
        Some(Grid {
            number_of_columns: self.number_of_columns,
            rows,
        })
    }
}
