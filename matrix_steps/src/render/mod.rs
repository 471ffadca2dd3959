// plain-text rendering of steps and listings for the command line.

use itertools::Itertools;

use crate::{
    engines::{listing, VARIABLES},
    method::Method,
    step::{HighlightStyle, StepRecord},
};

const CELL_WIDTH: usize = 8;

fn marker(style: Option<HighlightStyle>) -> char {
    match style {
        None => ' ',
        Some(HighlightStyle::Plain) => '*',
        Some(HighlightStyle::HighlightPos) => '+',
        Some(HighlightStyle::HighlightNeg) => '-',
        Some(HighlightStyle::Dimmed) => '~',
        Some(HighlightStyle::Submatrix) => '#',
    }
}

// integers without decimals, the rest to at most two
pub fn format_cell(value: Option<f64>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    // avoid printing "-0"
    let value = if value == 0.0 { 0.0 } else { value };
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn render_grid(step: &StepRecord) -> String {
    let snapshot = &step.snapshot;
    let mut out = Vec::new();
    if snapshot.is_single_row() {
        let header = (0..snapshot.number_of_columns())
            .map(|c| {
                let label = VARIABLES.get(c).copied().unwrap_or("?");
                format!("{label:>CELL_WIDTH$} ")
            })
            .join("");
        out.push(header.trim_end().to_string());
    }
    for (r, row) in snapshot.rows().iter().enumerate() {
        let line = row
            .iter()
            .enumerate()
            .map(|(c, value)| {
                format!(
                    "{:>CELL_WIDTH$}{}",
                    format_cell(*value),
                    marker(step.highlights.get(r, c))
                )
            })
            .join("");
        out.push(line.trim_end().to_string());
    }
    out.join("\n")
}

pub fn render_step(step: &StepRecord) -> String {
    let mut out = vec![step.narration.clone()];
    out.extend(step.equation.lines().map(|l| format!("    {l}")));
    out.push(render_grid(step));
    out.join("\n")
}

pub fn render_listing(method: Method, active: Option<usize>) -> String {
    listing::lines(method)
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let pointer = if Some(i) == active { '>' } else { ' ' };
            format!("{pointer}{i:>3} | {text}").trim_end().to_string()
        })
        .join("\n")
}

pub fn legend() -> &'static str {
    "* highlight  + highlight-pos  - highlight-neg  ~ dimmed  # submatrix"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::MatrixSnapshot,
        step::{Highlights, StepRecord},
    };

    #[test]
    fn cell_formatting() {
        assert_eq!(format_cell(None), "");
        assert_eq!(format_cell(Some(3.0)), "3");
        assert_eq!(format_cell(Some(-0.0)), "0");
        assert_eq!(format_cell(Some(0.5)), "0.5");
        assert_eq!(format_cell(Some(-1.0 / 3.0)), "-0.33");
        assert_eq!(format_cell(Some(-0.001)), "0");
        assert_eq!(format_cell(Some(2.999)), "3");
    }

    #[test]
    fn solution_row_is_labeled() {
        let step = StepRecord::new("done", "x = 1", MatrixSnapshot::solution_row(&[2.0, 3.0, -1.0]));
        assert_eq!(
            render_grid(&step),
            "       x        y        z\n       2        3       -1"
        );
    }

    #[test]
    fn highlights_and_blanks_are_marked() {
        let snapshot = MatrixSnapshot::from_cells(vec![
            vec![Some(1.0), None],
            vec![Some(0.5), Some(-2.0)],
        ]);
        let step = StepRecord::new("partial", "a\nb", snapshot)
            .highlighted(Highlights::cell(1, 1, HighlightStyle::HighlightNeg).with(
                0,
                0,
                HighlightStyle::Dimmed,
            ));
        assert_eq!(
            render_step(&step),
            "partial\n    a\n    b\n       1~\n     0.5       -2-"
        );
    }

    #[test]
    fn listing_marks_the_active_line() {
        let text = render_listing(Method::GaussJordan, Some(1));
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[1], ">  1 |     let n = m.len();");
        assert!(lines[0].starts_with("   0 | fn gauss_jordan"));
    }
}
