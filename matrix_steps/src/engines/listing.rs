// reference listings shown next to a replay. `StepRecord::source_line`
// indexes the lines of the listing for the trace's method.

use crate::method::Method;

const GAUSSIAN: &str = r#"fn forward_elimination(m: &mut [[f64; 4]; 3]) -> Result<(), DegeneratePivot> {
    let n = m.len();
    for i in 0..n {
        if m[i][i].abs() < EPSILON {
            let r = (i + 1..n).find(|&r| m[r][i].abs() >= EPSILON).ok_or(DegeneratePivot(i))?;
            m.swap(i, r);
        }
        let pivot = m[i][i];
        if pivot != 1.0 {
            for k in 0..=n {
                m[i][k] /= pivot;
            }
        }
        for j in i + 1..n {
            let factor = m[j][i];
            if factor.abs() < EPSILON {
                continue;
            }
            for k in 0..=n {
                m[j][k] -= factor * m[i][k];
            }
        }
    }
    Ok(())
}

fn back_substitution(m: &[[f64; 4]; 3]) -> [f64; 3] {
    let n = m.len();
    let mut solution = [0.0; 3];
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in i + 1..n {
            sum += m[i][j] * solution[j];
        }
        solution[i] = (m[i][n] - sum) / m[i][i];
    }
    solution
}"#;

const GAUSS_JORDAN: &str = r#"fn gauss_jordan(m: &mut [[f64; 4]; 3]) -> Result<[f64; 3], DegeneratePivot> {
    let n = m.len();
    for i in 0..n {
        if m[i][i].abs() < EPSILON {
            let r = (i + 1..n).find(|&r| m[r][i].abs() >= EPSILON).ok_or(DegeneratePivot(i))?;
            m.swap(i, r);
        }
        let pivot = m[i][i];
        if pivot != 1.0 {
            for k in 0..=n {
                m[i][k] /= pivot;
            }
        }
        for j in (0..n).filter(|&j| j != i) {
            let factor = m[j][i];
            if factor.abs() < EPSILON {
                continue;
            }
            for k in 0..=n {
                m[j][k] -= factor * m[i][k];
            }
        }
    }
    Ok([m[0][n], m[1][n], m[2][n]])
}"#;

const INVERSE: &str = r#"fn determinant(a: &[[f64; 3]; 3]) -> f64 {
    let extended: Vec<[f64; 5]> = a
        .iter()
        .map(|r| [r[0], r[1], r[2], r[0], r[1]])
        .collect();
    let (mut pos_sum, mut neg_sum) = (0.0, 0.0);
    for i in 0..3 {
        pos_sum += extended[0][i] * extended[1][i + 1] * extended[2][i + 2];
    }
    for i in 0..3 {
        neg_sum += extended[2][i] * extended[1][i + 1] * extended[0][i + 2];
    }
    pos_sum - neg_sum
}

fn minor(a: &[[f64; 3]; 3], r_skip: usize, c_skip: usize) -> f64 {
    let sub: Vec<f64> = (0..3)
        .filter(|&r| r != r_skip)
        .flat_map(|r| (0..3).filter(move |&c| c != c_skip).map(move |c| a[r][c]))
        .collect();
    sub[0] * sub[3] - sub[1] * sub[2]
}

fn inverse(a: &[[f64; 3]; 3]) -> Result<[[f64; 3]; 3], SingularSystem> {
    let det = determinant(a);
    if det.abs() < EPSILON {
        return Err(SingularSystem(det));
    }
    let mut minors = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            minors[i][j] = minor(a, i, j);
        }
    }
    let mut cofactors = minors;
    for i in 0..3 {
        for j in 0..3 {
            if (i + j) % 2 != 0 {
                cofactors[i][j] = -cofactors[i][j];
            }
        }
    }
    let mut adjugate = cofactors;
    for (r, c) in [(0, 1), (0, 2), (1, 2)] {
        let tmp = adjugate[r][c];
        adjugate[r][c] = adjugate[c][r];
        adjugate[c][r] = tmp;
    }
    let mut inverse = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            inverse[i][j] = adjugate[i][j] * (1.0 / det);
        }
    }
    Ok(inverse)
}

fn solve(inverse: &[[f64; 3]; 3], b: &[f64; 3]) -> [f64; 3] {
    let mut x = [0.0; 3];
    for i in 0..3 {
        x[i] = (0..3).map(|j| inverse[i][j] * b[j]).sum();
    }
    x
}"#;

pub fn source(method: Method) -> &'static str {
    match method {
        Method::Gaussian => GAUSSIAN,
        Method::GaussJordan => GAUSS_JORDAN,
        Method::Inverse => INVERSE,
    }
}

pub fn lines(method: Method) -> Vec<&'static str> {
    source(method).lines().collect()
}

pub fn line(method: Method, index: usize) -> Option<&'static str> {
    source(method).lines().nth(index)
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_listing_is_non_empty() {
        for method in Method::iter() {
            assert!(lines(method).len() > 20, "{method} listing too short");
            assert!(line(method, 0).unwrap().starts_with("fn "));
        }
        assert_eq!(line(Method::Inverse, 10_000), None);
    }
}
