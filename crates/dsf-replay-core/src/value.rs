//! Cell values and result grids

/// Value held by a traced cell.
///
/// `Blank` is the explicit "not yet computed / no data" sentinel; it is
/// distinct from `Number(0.0)` so a derived cell that has never been
/// evaluated cannot be confused with one that evaluated to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    /// No data / not yet computed
    #[default]
    Blank,
    /// Numeric value
    Number(f64),
}

impl Value {
    /// Check whether this is the blank sentinel
    pub fn is_blank(&self) -> bool {
        matches!(self, Value::Blank)
    }

    /// The numeric value, if present
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Blank => None,
        }
    }

    /// The numeric value, coercing blank to 0.0 the way the source workbook
    /// treats empty cells in arithmetic
    pub fn number_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

/// A two-dimensional block of values, row-major.
///
/// Compute entry points return one `Grid` per target range (one row by N
/// projection years for the traced indicators).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    rows: u32,
    cols: u16,
    cells: Vec<Value>,
}

impl Grid {
    /// Create a grid filled with [`Value::Blank`]
    pub fn blank(rows: u32, cols: u16) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Value::Blank; rows as usize * cols as usize],
        }
    }

    /// Build a single-row grid from an ordered sequence of numbers
    pub fn from_row(values: impl IntoIterator<Item = f64>) -> Self {
        let cells: Vec<Value> = values.into_iter().map(Value::Number).collect();
        Self {
            rows: 1,
            cols: cells.len() as u16,
            cells,
        }
    }

    /// Number of rows
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Value at (row, col), if in bounds
    pub fn get(&self, row: u32, col: u16) -> Option<Value> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row as usize * self.cols as usize + col as usize])
    }

    /// Set the value at (row, col); out-of-bounds writes are ignored
    pub fn set(&mut self, row: u32, col: u16, value: Value) {
        if row < self.rows && col < self.cols {
            self.cells[row as usize * self.cols as usize + col as usize] = value;
        }
    }

    /// One row as a slice
    pub fn row(&self, row: u32) -> &[Value] {
        let w = self.cols as usize;
        let start = row as usize * w;
        &self.cells[start..start + w]
    }

    /// All values in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        self.cells.iter().copied()
    }

    /// Numeric values of a single-row grid, blanks coerced to 0.0
    pub fn to_row_numbers(&self) -> Vec<f64> {
        self.row(0).iter().map(Value::number_or_zero).collect()
    }
}
