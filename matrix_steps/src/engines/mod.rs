pub mod elimination;
pub mod gauss_jordan;
pub mod gaussian;
pub mod inverse;
pub mod listing;

use crate::{error::TraceError, grid::Grid, method::Method, numeric::fixed2, step::Trace};

use gauss_jordan::GaussJordanEngine;
use gaussian::GaussianEliminationEngine;
use inverse::MatrixInverseEngine;

// constants in the last column
pub type AugmentedMatrix = [[f64; 4]; 3];
pub type CoefficientMatrix = [[f64; 3]; 3];

pub const VARIABLES: [&str; 3] = ["x", "y", "z"];

//  2x +  y -  z =   8
// -3x -  y + 2z = -11
// -2x +  y + 2z =  -3
pub const CANONICAL_SYSTEM: AugmentedMatrix = [
    [2.0, 1.0, -1.0, 8.0],
    [-3.0, -1.0, 2.0, -11.0],
    [-2.0, 1.0, 2.0, -3.0],
];

pub fn split_augmented(system: &AugmentedMatrix) -> (CoefficientMatrix, [f64; 3]) {
    let mut coefficients = [[0.0; 3]; 3];
    let mut constants = [0.0; 3];
    for (i, row) in system.iter().enumerate() {
        coefficients[i].copy_from_slice(&row[..3]);
        constants[i] = row[3];
    }
    (coefficients, constants)
}

pub trait TraceEngine {
    fn method(&self) -> Method;
    fn generate(&self) -> Result<Trace, TraceError>;
}

pub fn engine_for(method: Method, system: &AugmentedMatrix) -> Box<dyn TraceEngine> {
    match method {
        Method::Gaussian => Box::new(GaussianEliminationEngine::new(*system)),
        Method::GaussJordan => Box::new(GaussJordanEngine::new(*system)),
        Method::Inverse => {
            let (coefficients, constants) = split_augmented(system);
            Box::new(MatrixInverseEngine::new(coefficients, constants))
        }
    }
}

pub fn generate_trace(method: Method) -> Result<Trace, TraceError> {
    generate_trace_for(method, &CANONICAL_SYSTEM)
}

pub fn generate_trace_for(method: Method, system: &AugmentedMatrix) -> Result<Trace, TraceError> {
    log::debug!("generating {method} trace");
    let trace = engine_for(method, system).generate();
    if let Err(err) = &trace {
        log::warn!("{method} trace generation failed: {err}");
    }
    trace
}

// "2.00x + 1.00y - 1.00z = 8.00", one line per row of an augmented grid
pub(crate) fn describe_system(grid: &Grid) -> String {
    let unknowns = grid.number_of_columns - 1;
    grid.rows
        .iter()
        .map(|row| {
            let mut line = String::new();
            for (j, value) in row[..unknowns].iter().enumerate() {
                if j == 0 {
                    line.push_str(&format!("{}{}", fixed2(*value), VARIABLES[j]));
                } else {
                    let sign = if value.is_sign_negative() { '-' } else { '+' };
                    line.push_str(&format!(" {sign} {}{}", fixed2(value.abs()), VARIABLES[j]));
                }
            }
            format!("{line} = {}", fixed2(row[unknowns]))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
