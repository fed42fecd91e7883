//! The spreadsheet-shaped document the store persists: named tables of
//! scalar cells, header row first.

use crate::error::{MenuError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name and header layout of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl Table {
    /// Zero-based position of a column in this table's rows.
    pub fn column(&self, name: &str) -> usize {
        self.columns
            .iter()
            .position(|c| *c == name)
            .unwrap_or(self.columns.len())
    }
}

pub const USERS: Table = Table {
    name: "Users",
    columns: &["ID", "Username", "PasswordHash", "Role"],
};

pub const RESTAURANTS: Table = Table {
    name: "Restaurants",
    columns: &["ID", "Name", "Phone", "Address"],
};

pub const MENU: Table = Table {
    name: "Menu",
    columns: &["ID", "RestaurantID", "Name", "Price", "Status"],
};

pub const TABLES: [Table; 3] = [USERS, RESTAURANTS, MENU];

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Cell contents as a string, the way a spreadsheet would display them.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Bool(b) => b.to_string(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }

    fn to_u32(&self) -> std::result::Result<u32, String> {
        match self {
            Cell::Int(i) => u32::try_from(*i).map_err(|_| format!("{} is not a valid id", i)),
            Cell::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64 => {
                Ok(*f as u32)
            }
            Cell::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| format!("'{}' is not a valid id", s)),
            other => Err(format!("expected an integer, found {:?}", other)),
        }
    }

    fn to_f64(&self) -> std::result::Result<f64, String> {
        let value = match self {
            Cell::Int(i) => *i as f64,
            Cell::Float(f) => *f,
            Cell::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| format!("'{}' is not a number", s))?,
            other => return Err(format!("expected a number, found {:?}", other)),
        };
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{} is not a valid price", value));
        }
        Ok(value)
    }

    fn to_bool(&self) -> std::result::Result<bool, String> {
        match self {
            Cell::Bool(b) => Ok(*b),
            Cell::Int(0) => Ok(false),
            Cell::Int(1) => Ok(true),
            Cell::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(format!("'{}' is not a boolean", s)),
            },
            other => Err(format!("expected a boolean, found {:?}", other)),
        }
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Int(i64::from(value))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// A table: header row at position 0, data rows after it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sheet {
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn with_header(table: &Table) -> Self {
        Self {
            rows: vec![table.columns.iter().map(|c| Cell::from(*c)).collect()],
        }
    }

    pub fn header(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.iter().map(Cell::to_text).collect())
            .unwrap_or_default()
    }

    /// Data rows with their position in `rows`.
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[Cell])> {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(pos, row)| (pos, row.as_slice()))
    }

    pub fn data_len(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn append(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

/// Read access to one data row with positional context for error reporting.
pub struct RowRef<'a> {
    table: &'a Table,
    position: usize,
    cells: &'a [Cell],
}

impl<'a> RowRef<'a> {
    pub fn new(table: &'a Table, position: usize, cells: &'a [Cell]) -> Self {
        Self {
            table,
            position,
            cells,
        }
    }

    fn cell(&self, column: &str) -> &Cell {
        self.cells
            .get(self.table.column(column))
            .unwrap_or(&EMPTY_CELL)
    }

    fn corrupt(&self, column: &str, reason: String) -> MenuError {
        MenuError::DataCorruption {
            table: self.table.name.to_string(),
            // spreadsheet numbering: the header is row 1
            row: self.position + 1,
            column: column.to_string(),
            reason,
        }
    }

    /// `None` for a blank cell, which marks a placeholder row when used on `ID`.
    pub fn opt_u32(&self, column: &str) -> Result<Option<u32>> {
        let cell = self.cell(column);
        if cell.is_blank() {
            return Ok(None);
        }
        cell.to_u32()
            .map(Some)
            .map_err(|reason| self.corrupt(column, reason))
    }

    pub fn u32(&self, column: &str) -> Result<u32> {
        self.opt_u32(column)?
            .ok_or_else(|| self.corrupt(column, "missing value".to_string()))
    }

    pub fn f64(&self, column: &str) -> Result<f64> {
        self.cell(column)
            .to_f64()
            .map_err(|reason| self.corrupt(column, reason))
    }

    pub fn bool(&self, column: &str) -> Result<bool> {
        self.cell(column)
            .to_bool()
            .map_err(|reason| self.corrupt(column, reason))
    }

    pub fn text(&self, column: &str) -> String {
        self.cell(column).to_text()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: BTreeMap<String, Sheet>,
    /// Highest ID ever handed out per table.
    #[serde(default)]
    pub counters: BTreeMap<String, u32>,
}

impl Workbook {
    /// An empty workbook with every table and its header row.
    pub fn with_schema() -> Self {
        let sheets = TABLES
            .iter()
            .map(|table| (table.name.to_string(), Sheet::with_header(table)))
            .collect();
        Self {
            sheets,
            counters: BTreeMap::new(),
        }
    }

    fn check_header(table: &Table, sheet: &Sheet) -> Result<()> {
        let header = sheet.header();
        if header.iter().map(String::as_str).ne(table.columns.iter().copied()) {
            return Err(MenuError::Storage(format!(
                "table '{}' has header {:?}, expected {:?}",
                table.name, header, table.columns
            )));
        }
        Ok(())
    }

    pub fn sheet(&self, table: &Table) -> Result<&Sheet> {
        let sheet = self
            .sheets
            .get(table.name)
            .ok_or_else(|| MenuError::Storage(format!("missing table '{}'", table.name)))?;
        Self::check_header(table, sheet)?;
        Ok(sheet)
    }

    pub fn sheet_mut(&mut self, table: &Table) -> Result<&mut Sheet> {
        let sheet = self
            .sheets
            .get_mut(table.name)
            .ok_or_else(|| MenuError::Storage(format!("missing table '{}'", table.name)))?;
        Self::check_header(table, sheet)?;
        Ok(sheet)
    }

    pub fn counter(&self, table: &Table) -> u32 {
        self.counters.get(table.name).copied().unwrap_or(0)
    }

    pub fn set_counter(&mut self, table: &Table, value: u32) {
        self.counters.insert(table.name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_has_all_headers() {
        let workbook = Workbook::with_schema();
        for table in TABLES {
            let sheet = workbook.sheet(&table).unwrap();
            assert_eq!(sheet.header(), table.columns);
            assert_eq!(sheet.data_len(), 0);
        }
    }

    #[test]
    fn rejects_wrong_header() {
        let mut workbook = Workbook::with_schema();
        workbook.sheets.insert(
            MENU.name.to_string(),
            Sheet {
                rows: vec![vec![Cell::from("ID"), Cell::from("Name")]],
            },
        );
        assert!(matches!(workbook.sheet(&MENU), Err(MenuError::Storage(_))));
    }

    #[test]
    fn cells_deserialize_from_json_scalars() {
        let cells: Vec<Cell> = serde_json::from_str(r#"[null, true, 3, 450.5, "Pizza"]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                Cell::Empty,
                Cell::Bool(true),
                Cell::Int(3),
                Cell::Float(450.5),
                Cell::text("Pizza"),
            ]
        );
    }

    #[test]
    fn row_ref_reads_typed_values() {
        let cells = vec![
            Cell::Int(7),
            Cell::text("3"),
            Cell::text("Soup"),
            Cell::text("120.5"),
            Cell::Int(0),
        ];
        let row = RowRef::new(&MENU, 4, &cells);
        assert_eq!(row.u32("ID").unwrap(), 7);
        assert_eq!(row.u32("RestaurantID").unwrap(), 3);
        assert_eq!(row.text("Name"), "Soup");
        assert_eq!(row.f64("Price").unwrap(), 120.5);
        assert!(!row.bool("Status").unwrap());
    }

    #[test]
    fn row_ref_reports_corrupt_cells_with_position() {
        let cells = vec![Cell::text("x1"), Cell::Int(1), Cell::text("Soup"), Cell::text("free")];
        let row = RowRef::new(&MENU, 2, &cells);

        match row.u32("ID").unwrap_err() {
            MenuError::DataCorruption {
                table, row, column, ..
            } => {
                assert_eq!(table, "Menu");
                assert_eq!(row, 3);
                assert_eq!(column, "ID");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            row.f64("Price"),
            Err(MenuError::DataCorruption { .. })
        ));
        // short rows read as blank cells
        assert!(matches!(
            row.bool("Status"),
            Err(MenuError::DataCorruption { .. })
        ));
    }

    #[test]
    fn blank_id_reads_as_none() {
        let cells = vec![Cell::text("  "), Cell::text("Ghost")];
        let row = RowRef::new(&RESTAURANTS, 1, &cells);
        assert_eq!(row.opt_u32("ID").unwrap(), None);
    }
}
