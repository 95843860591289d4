//! Editable measurement table for one laboratory

use common::format::PLACEHOLDER;

use crate::{round_to, LabKind, TableColumn, TableRow, Values};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WorksheetError {
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Column '{0}' is calculated and cannot be edited")]
    DerivedColumn(&'static str),

    #[error("Row {index} does not exist (worksheet has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("'{0}' is not a number")]
    InvalidNumber(String),
}

/// Rows of one lab. Derived cells are kept in sync with the inputs of
/// their own row.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    kind: LabKind,
    rows: Vec<TableRow>,
}

impl Worksheet {
    /// A worksheet with one empty row
    pub fn new(kind: LabKind) -> Self {
        Self {
            kind,
            rows: vec![TableRow::empty(1, kind.columns())],
        }
    }

    /// Rebuild from stored rows. Unknown cells are dropped and derived cells
    /// recomputed, so a stored table can't smuggle in hand-edited results.
    pub fn from_rows(kind: LabKind, rows: Vec<TableRow>) -> Self {
        let rows = rows
            .into_iter()
            .map(|stored| {
                let mut row = TableRow::empty(0, kind.columns());
                for column in kind.inputs() {
                    let value = stored.get(column.id).filter(|v| v.is_finite());
                    row.values.insert(column.id.to_string(), value);
                }
                row
            })
            .collect();
        let mut worksheet = Self { kind, rows };
        if worksheet.rows.is_empty() {
            worksheet.rows.push(TableRow::empty(1, kind.columns()));
        }
        worksheet.reindex();
        for index in 0..worksheet.rows.len() {
            worksheet.recompute(index);
        }
        worksheet
    }

    pub fn kind(&self) -> LabKind {
        self.kind
    }

    pub fn columns(&self) -> &'static [TableColumn] {
        self.kind.columns()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append an empty row and return its id
    pub fn add_row(&mut self) -> usize {
        let id = self.rows.len() + 1;
        self.rows.push(TableRow::empty(id, self.columns()));
        id
    }

    /// Remove the row at `index`; the remaining rows are renumbered
    pub fn remove_row(&mut self, index: usize) -> Result<TableRow, WorksheetError> {
        self.check_row(index)?;
        let removed = self.rows.remove(index);
        self.reindex();
        Ok(removed)
    }

    /// Set an input cell from user text. Blank text clears the cell.
    pub fn edit(&mut self, index: usize, column: &str, text: &str) -> Result<Option<f64>, WorksheetError> {
        let text = text.trim();
        let value = if text.is_empty() {
            None
        } else {
            let parsed = text
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| WorksheetError::InvalidNumber(text.to_string()))?;
            Some(parsed)
        };
        self.set_input(index, column, value)?;
        Ok(value)
    }

    pub fn set_input(&mut self, index: usize, column: &str, value: Option<f64>) -> Result<(), WorksheetError> {
        self.check_row(index)?;
        let column = self
            .kind
            .column(column)
            .ok_or_else(|| WorksheetError::UnknownColumn(column.to_string()))?;
        if !column.is_input {
            return Err(WorksheetError::DerivedColumn(column.id));
        }
        self.rows[index].values.insert(column.id.to_string(), value);
        self.recompute(index);
        Ok(())
    }

    /// Fill derived cells of one row, or clear them if any input is missing
    fn recompute(&mut self, index: usize) {
        let kind = self.kind;
        let row = &mut self.rows[index];

        let inputs: Option<Values> = kind
            .inputs()
            .map(|c| row.get(c.id).filter(|v| v.is_finite()).map(|v| (c.id, v)))
            .collect();
        let outputs = inputs.map(|inputs| kind.calculate(&inputs));

        for column in kind.columns().iter().filter(|c| !c.is_input) {
            let value = outputs
                .as_ref()
                .and_then(|out| out.get(column.id).copied())
                .filter(|v| v.is_finite())
                .map(|v| round_to(v, column.decimals));
            row.values.insert(column.id.to_string(), value);
        }
    }

    /// Mean over the filled cells of a column
    pub fn average(&self, column: &str) -> Option<f64> {
        let filled: Vec<f64> = self.rows.iter().filter_map(|row| row.get(column)).collect();
        if filled.is_empty() {
            None
        } else {
            Some(filled.iter().sum::<f64>() / filled.len() as f64)
        }
    }

    /// Display text for a cell, `—` when empty
    pub fn cell_text(&self, index: usize, column: &str) -> String {
        let value = self.rows.get(index).and_then(|row| row.get(column));
        let decimals = self.kind.column(column).map_or(2, |c| c.decimals) as usize;
        match value {
            Some(value) => format!("{value:.decimals$}"),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// Average of a column as display text
    pub fn average_text(&self, column: &str) -> String {
        let decimals = self.kind.column(column).map_or(2, |c| c.decimals) as usize;
        match self.average(column) {
            Some(value) => format!("{value:.decimals$}"),
            None => PLACEHOLDER.to_string(),
        }
    }

    fn check_row(&self, index: usize) -> Result<(), WorksheetError> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(WorksheetError::RowOutOfRange {
                index,
                len: self.rows.len(),
            })
        }
    }

    fn reindex(&mut self) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.id = i + 1;
        }
    }
}
