use serde::Serialize;

pub(crate) fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // -0.0 would print as "-0.00"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Text(String),
    /// Currency amount, already rounded to cents.
    Money(f64),
    Count(usize),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn money(value: f64) -> Self {
        Self::Money(round_cents(value))
    }

    pub fn display(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Money(value) => format!("{value:.2}"),
            Self::Count(value) => value.to_string(),
        }
    }

    pub fn as_money(&self) -> Option<f64> {
        match self {
            Self::Money(value) => Some(*value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Names a block; renderers usually span it across the table.
    SectionHeader,
    ColumnHeader,
    Data,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn section(title: impl Into<String>) -> Self {
        Self {
            kind: RowKind::SectionHeader,
            cells: vec![Cell::text(title)],
        }
    }

    pub fn columns<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: RowKind::ColumnHeader,
            cells: labels.into_iter().map(Cell::text).collect(),
        }
    }

    pub fn data(cells: Vec<Cell>) -> Self {
        Self {
            kind: RowKind::Data,
            cells,
        }
    }

    pub fn display_cells(&self) -> Vec<String> {
        self.cells.iter().map(Cell::display).collect()
    }
}

/// Markup-free table: ordered rows of typed cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn section_titles(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|row| row.kind == RowKind::SectionHeader)
            .map(|row| row.display_cells().join(" "))
            .collect()
    }

    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.kind == RowKind::Data)
    }
}
