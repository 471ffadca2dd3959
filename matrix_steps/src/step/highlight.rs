use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum HighlightStyle {
    Plain,
    HighlightPos,
    HighlightNeg,
    Dimmed,
    Submatrix,
}

impl HighlightStyle {
    pub fn is_dimmed(self) -> bool {
        self == Self::Dimmed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightEntry {
    pub row: usize,
    pub column: usize,
    pub style: HighlightStyle,
}

// at most one style per cell, flagging again replaces it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<HighlightEntry>", from = "Vec<HighlightEntry>")]
pub struct Highlights {
    cells: IndexMap<(usize, usize), HighlightStyle>,
}

impl Highlights {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn cell(row: usize, column: usize, style: HighlightStyle) -> Self {
        Self::new().with(row, column, style)
    }

    pub fn with(mut self, row: usize, column: usize, style: HighlightStyle) -> Self {
        self.insert(row, column, style);
        self
    }

    pub fn whole_row(row: usize, number_of_columns: usize, style: HighlightStyle) -> Self {
        (0..number_of_columns).fold(Self::new(), |h, c| h.with(row, c, style))
    }

    pub fn insert(&mut self, row: usize, column: usize, style: HighlightStyle) {
        self.cells.insert((row, column), style);
    }

    pub fn get(&self, row: usize, column: usize) -> Option<HighlightStyle> {
        self.cells.get(&(row, column)).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = HighlightEntry> + '_ {
        self.cells
            .iter()
            .map(|(&(row, column), &style)| HighlightEntry { row, column, style })
    }
}

impl From<Highlights> for Vec<HighlightEntry> {
    fn from(highlights: Highlights) -> Self {
        highlights.entries().collect()
    }
}

impl From<Vec<HighlightEntry>> for Highlights {
    fn from(entries: Vec<HighlightEntry>) -> Self {
        entries
            .into_iter()
            .fold(Self::new(), |h, e| h.with(e.row, e.column, e.style))
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn one_style_per_cell() {
        let h = Highlights::cell(0, 0, HighlightStyle::Dimmed)
            .with(0, 1, HighlightStyle::Dimmed)
            .with(0, 0, HighlightStyle::Dimmed)
            .with(1, 1, HighlightStyle::Submatrix);
        assert_eq!(h.len(), 3);
        assert_eq!(h.get(0, 0), Some(HighlightStyle::Dimmed));
        assert_eq!(h.get(2, 2), None);
    }

    #[test]
    fn entries_keep_flagging_order() {
        let h = Highlights::whole_row(2, 4, HighlightStyle::Plain);
        assert_eq!(
            h.entries().map(|e| (e.row, e.column)).collect_vec(),
            vec![(2, 0), (2, 1), (2, 2), (2, 3)]
        );
    }

    #[test]
    fn style_names_match_the_renderer_classes() {
        assert_eq!(HighlightStyle::HighlightPos.to_string(), "highlight-pos");
        assert_eq!(HighlightStyle::Submatrix.to_string(), "submatrix");
        let json = serde_json::to_string(&Highlights::cell(1, 2, HighlightStyle::HighlightNeg))
            .unwrap();
        assert_eq!(json, r#"[{"row":1,"column":2,"style":"highlight-neg"}]"#);
    }
}
