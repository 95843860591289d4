//! Laboratory worksheets
//!
//! Each laboratory ([`LabKind`]) declares a table of columns. Input columns
//! hold the student's measurements; derived columns are computed from the
//! inputs of the same row and can't be edited. Worksheets are saved and
//! loaded as whole row arrays through a [`ResultsSink`].

pub mod labs;
pub mod session;
pub mod sink;
pub mod worksheet;

use std::collections::BTreeMap;

use common::Locale;
use serde::{Deserialize, Serialize};

pub use labs::LabKind;
pub use session::{LabSession, Notification, SyncState};
pub use sink::{JsonFileStore, MemoryStore, ResultsSink, SinkError};
pub use worksheet::{Worksheet, WorksheetError};

/// Values keyed by column id
pub type Values = BTreeMap<&'static str, f64>;

/// One column of a lab table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableColumn {
    pub id: &'static str,
    pub name: &'static str,
    pub name_uz: &'static str,
    pub unit: &'static str,
    pub is_input: bool,
    /// Derived values are rounded to this many decimals
    pub decimals: u32,
}

impl TableColumn {
    pub fn name(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.name,
            Locale::Uz => self.name_uz,
        }
    }

    /// Header text, e.g. `Length (m)`
    pub fn header(&self, locale: Locale) -> String {
        if self.unit.is_empty() {
            self.name(locale).to_string()
        } else {
            format!("{} ({})", self.name(locale), self.unit)
        }
    }
}

/// One row of measurements; `None` means the cell is empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: usize,
    pub values: BTreeMap<String, Option<f64>>,
}

impl TableRow {
    /// Empty row with a cell for every column
    pub fn empty(id: usize, columns: &[TableColumn]) -> Self {
        Self {
            id,
            values: columns.iter().map(|c| (c.id.to_string(), None)).collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied().flatten()
    }
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
