//! Cell and range addressing
//!
//! Addresses follow the source workbook's own notation so results stay
//! auditable against the original template: `Sheet!C35`, `Sheet!C35:X35`,
//! with single-quoted sheet names when the name contains spaces
//! (`'B4_other flows_ext'!C35`).

use crate::error::{Error, Result};
use std::fmt;

/// The fixed set of sheet names a traced workbook slice may address.
///
/// Sheet names are interned as `&'static str` so cell identifiers stay
/// `Copy` and cheap to hash; parsing resolves a textual name against this
/// registry.
#[derive(Debug, Clone, Copy)]
pub struct SheetRegistry {
    names: &'static [&'static str],
}

impl SheetRegistry {
    /// Create a registry over a fixed list of sheet names
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    /// Resolve a textual sheet name to its interned form
    pub fn resolve(&self, name: &str) -> Result<&'static str> {
        self.names
            .iter()
            .copied()
            .find(|n| *n == name)
            .ok_or_else(|| Error::UnknownSheet(name.to_string()))
    }

    /// All registered sheet names
    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }
}

/// Identifier of a single traced cell
///
/// Row and column are 0-based internally (row 0 / col 0 displays as `A1`),
/// matching the convention of the rest of the engine. Ordering is sheet name,
/// then row, then column, which gives deterministic iteration wherever cell
/// sets are sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CellId {
    /// Interned sheet name
    pub sheet: &'static str,
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: u16,
}

impl CellId {
    /// Create a new cell identifier
    pub const fn new(sheet: &'static str, row: u32, col: u16) -> Self {
        Self { sheet, row, col }
    }

    /// Parse a sheet-qualified address such as `B1_GDP_ext!C35`
    pub fn parse(s: &str, sheets: &SheetRegistry) -> Result<Self> {
        let (sheet, a1) = split_sheet(s)?;
        let sheet = sheets.resolve(&sheet)?;
        let (row, col) = parse_a1(a1, s)?;
        Ok(Self { sheet, row, col })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, ...)
    pub fn column_to_letters(col: u16) -> String {
        let mut result = String::new();
        let mut n = col as u32 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, ((n % 26) as u8 + b'A') as char);
            n /= 26;
        }
        result
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, ...)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }
        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{c}'"
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > u16::MAX as u32 {
                return Err(Error::InvalidAddress(format!(
                    "column '{letters}' out of range"
                )));
            }
        }
        Ok((col - 1) as u16)
    }

    /// The unqualified A1-style part of the address
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sheet(f, self.sheet)?;
        write!(f, "!{}", self.to_a1_string())
    }
}

/// A rectangular group of cells on one sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RangeRef {
    pub sheet: &'static str,
    pub start_row: u32,
    pub start_col: u16,
    pub end_row: u32,
    pub end_col: u16,
}

impl RangeRef {
    /// Create a range from corner indices, normalizing corner order
    pub fn new(sheet: &'static str, r1: u32, c1: u16, r2: u32, c2: u16) -> Self {
        Self {
            sheet,
            start_row: r1.min(r2),
            start_col: c1.min(c2),
            end_row: r1.max(r2),
            end_col: c1.max(c2),
        }
    }

    /// A single-cell range
    pub fn single(cell: CellId) -> Self {
        Self::new(cell.sheet, cell.row, cell.col, cell.row, cell.col)
    }

    /// Parse `Sheet!C35`, `Sheet!C35:X35`, or the sheet-repeated
    /// `Sheet!C35:Sheet!X35` form the source workbook uses in its target
    /// labels. Both endpoints must name the same sheet.
    pub fn parse(s: &str, sheets: &SheetRegistry) -> Result<Self> {
        let (sheet_name, rest) = split_sheet(s)?;
        let sheet = sheets.resolve(&sheet_name)?;
        match rest.split_once(':') {
            None => {
                let (row, col) = parse_a1(rest, s)?;
                Ok(Self::new(sheet, row, col, row, col))
            }
            Some((first, second)) => {
                let (r1, c1) = parse_a1(first, s)?;
                let (r2, c2) = if second.contains('!') || second.starts_with('\'') {
                    let end = CellId::parse(second, sheets)?;
                    if end.sheet != sheet {
                        return Err(Error::InvalidAddress(format!(
                            "range endpoints on different sheets in '{s}'"
                        )));
                    }
                    (end.row, end.col)
                } else {
                    parse_a1(second, s)?
                };
                Ok(Self::new(sheet, r1, c1, r2, c2))
            }
        }
    }

    /// Number of rows in the range
    pub fn rows(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    /// Number of columns in the range
    pub fn cols(&self) -> u16 {
        self.end_col - self.start_col + 1
    }

    /// Iterate over the cells of the range in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        let sheet = self.sheet;
        (self.start_row..=self.end_row).flat_map(move |row| {
            (self.start_col..=self.end_col).map(move |col| CellId::new(sheet, row, col))
        })
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sheet(f, self.sheet)?;
        write!(
            f,
            "!{}{}",
            CellId::column_to_letters(self.start_col),
            self.start_row + 1
        )?;
        if self.start_row != self.end_row || self.start_col != self.end_col {
            write!(
                f,
                ":{}{}",
                CellId::column_to_letters(self.end_col),
                self.end_row + 1
            )?;
        }
        Ok(())
    }
}

fn sheet_needs_quoting(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn write_sheet(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if sheet_needs_quoting(name) {
        write!(f, "'{}'", name.replace('\'', "''"))
    } else {
        f.write_str(name)
    }
}

/// Split `Sheet!Rest` into the (unescaped) sheet name and the part after `!`,
/// honoring single-quoted sheet names with `''` escapes.
fn split_sheet(address: &str) -> Result<(String, &str)> {
    let invalid = || Error::InvalidAddress(address.to_string());
    if let Some(stripped) = address.strip_prefix('\'') {
        let mut sheet = String::new();
        let bytes = stripped.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'\'' {
                if bytes.get(i + 1) == Some(&b'\'') {
                    sheet.push('\'');
                    i += 2;
                    continue;
                }
                if bytes.get(i + 1) == Some(&b'!') {
                    let rest = &stripped[i + 2..];
                    if sheet.is_empty() || rest.is_empty() {
                        return Err(invalid());
                    }
                    return Ok((sheet, rest));
                }
                return Err(invalid());
            }
            let ch = stripped[i..].chars().next().ok_or_else(invalid)?;
            sheet.push(ch);
            i += ch.len_utf8();
        }
        Err(invalid())
    } else {
        let (sheet, rest) = address.split_once('!').ok_or_else(invalid)?;
        if sheet.is_empty() || rest.is_empty() {
            return Err(invalid());
        }
        Ok((sheet.to_string(), rest))
    }
}

/// Parse a plain A1 reference (no `$` markers) into (row, col), 0-based.
fn parse_a1(a1: &str, full: &str) -> Result<(u32, u16)> {
    let invalid = || Error::InvalidAddress(full.to_string());
    let letters_end = a1
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or(a1.len());
    let letters = &a1[..letters_end];
    let digits = &a1[letters_end..];
    if letters.is_empty() || digits.is_empty() {
        return Err(invalid());
    }
    let col = CellId::letters_to_column(letters).map_err(|_| invalid())?;
    let row: u32 = digits.parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }
    Ok((row - 1, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SHEETS: SheetRegistry =
        SheetRegistry::new(&["B1_GDP_ext", "B4_other flows_ext", "Ext_Debt_Data"]);

    #[test]
    fn test_column_letters_round_trip() {
        assert_eq!(CellId::column_to_letters(0), "A");
        assert_eq!(CellId::column_to_letters(2), "C");
        assert_eq!(CellId::column_to_letters(23), "X");
        assert_eq!(CellId::column_to_letters(26), "AA");
        assert_eq!(CellId::letters_to_column("A").unwrap(), 0);
        assert_eq!(CellId::letters_to_column("x").unwrap(), 23);
        assert_eq!(CellId::letters_to_column("AA").unwrap(), 26);
        assert!(CellId::letters_to_column("").is_err());
        assert!(CellId::letters_to_column("A1").is_err());
    }

    #[test]
    fn test_parse_plain_address() {
        let id = CellId::parse("B1_GDP_ext!C35", &SHEETS).unwrap();
        assert_eq!(id.sheet, "B1_GDP_ext");
        assert_eq!(id.row, 34);
        assert_eq!(id.col, 2);
        assert_eq!(id.to_string(), "B1_GDP_ext!C35");
    }

    #[test]
    fn test_parse_quoted_sheet() {
        let id = CellId::parse("'B4_other flows_ext'!X40", &SHEETS).unwrap();
        assert_eq!(id.sheet, "B4_other flows_ext");
        assert_eq!(id.row, 39);
        assert_eq!(id.col, 23);
        // Quoting survives display
        assert_eq!(id.to_string(), "'B4_other flows_ext'!X40");
    }

    #[test]
    fn test_parse_errors() {
        assert!(CellId::parse("C35", &SHEETS).is_err());
        assert!(CellId::parse("B1_GDP_ext!", &SHEETS).is_err());
        assert!(CellId::parse("B1_GDP_ext!35", &SHEETS).is_err());
        assert!(CellId::parse("B1_GDP_ext!C0", &SHEETS).is_err());
        assert!(CellId::parse("'B4_other flows_ext!C35", &SHEETS).is_err());
        assert!(matches!(
            CellId::parse("NoSuchSheet!C35", &SHEETS),
            Err(Error::UnknownSheet(_))
        ));
    }

    #[test]
    fn test_range_parse_forms() {
        let plain = RangeRef::parse("B1_GDP_ext!C35:X35", &SHEETS).unwrap();
        let repeated = RangeRef::parse("B1_GDP_ext!C35:B1_GDP_ext!X35", &SHEETS).unwrap();
        assert_eq!(plain, repeated);
        assert_eq!(plain.rows(), 1);
        assert_eq!(plain.cols(), 22);
        assert_eq!(plain.to_string(), "B1_GDP_ext!C35:X35");

        let single = RangeRef::parse("Ext_Debt_Data!B8", &SHEETS).unwrap();
        assert_eq!(single.rows(), 1);
        assert_eq!(single.cols(), 1);
        assert_eq!(single.to_string(), "Ext_Debt_Data!B8");

        let quoted =
            RangeRef::parse("'B4_other flows_ext'!C35:'B4_other flows_ext'!X35", &SHEETS).unwrap();
        assert_eq!(quoted.sheet, "B4_other flows_ext");

        assert!(RangeRef::parse("B1_GDP_ext!C35:Ext_Debt_Data!X35", &SHEETS).is_err());
    }

    #[test]
    fn test_range_cells_row_major() {
        let range = RangeRef::parse("Ext_Debt_Data!C20:D21", &SHEETS).unwrap();
        let cells: Vec<String> = range.cells().map(|c| c.to_a1_string()).collect();
        assert_eq!(cells, vec!["C20", "D20", "C21", "D21"]);
    }

    #[test]
    fn test_cell_ordering_is_total() {
        let mut cells = vec![
            CellId::new("Ext_Debt_Data", 0, 5),
            CellId::new("B1_GDP_ext", 10, 0),
            CellId::new("B1_GDP_ext", 0, 5),
            CellId::new("B1_GDP_ext", 0, 2),
        ];
        cells.sort();
        assert_eq!(cells[0], CellId::new("B1_GDP_ext", 0, 2));
        assert_eq!(cells[3], CellId::new("Ext_Debt_Data", 0, 5));
    }
}
