// tolerance used everywhere a value is asked "is this effectively zero?"
pub const EPSILON: f64 = 1e-9;

pub fn is_effectively_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

// narration and equation text always show two decimals, snapshots keep the
// full value.
pub fn fixed2(value: f64) -> String {
    format!("{value:.2}")
}

pub fn fixed2_list(values: &[f64]) -> String {
    values.iter().map(|v| fixed2(*v)).collect::<Vec<_>>().join(", ")
}
