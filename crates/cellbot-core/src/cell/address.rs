//! Cell address and range types
//!
//! Addresses use A1-style labels externally and zero-based `(row, col)`
//! indices internally. Parsing is deliberately lenient: the labels come out
//! of model-generated text, so missing pieces fall back to column `A` and
//! row `1` rather than failing the whole operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Convert column letters to a zero-based index (A = 0, Z = 25, AA = 26, ...)
///
/// Case-insensitive. Non-letter characters are ignored; an input with no
/// letters at all maps to column 0.
///
/// # Examples
/// ```
/// use cellbot_core::letters_to_column;
///
/// assert_eq!(letters_to_column("A"), 0);
/// assert_eq!(letters_to_column("aa"), 26);
/// assert_eq!(letters_to_column(""), 0);
/// ```
pub fn letters_to_column(letters: &str) -> usize {
    let mut col: usize = 0;
    let mut seen = false;

    for c in letters.chars() {
        if c.is_ascii_alphabetic() {
            col = col * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
            seen = true;
        }
    }

    if seen {
        col - 1
    } else {
        0
    }
}

/// Convert a zero-based column index to letters (0 = A, 25 = Z, 26 = AA, ...)
pub fn column_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col + 1; // 1-based for calculation

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// A cell address with zero-based row and column indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in the A1 label)
    pub row: usize,
    /// Column index (0-based, A=0)
    pub col: usize,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parse an A1-style label into indices
    ///
    /// Leading letters name the column, trailing digits the 1-based row.
    /// Missing parts default to column `A` and row `1`, so `"7"` parses as
    /// row 6 column 0 and `"C"` as row 0 column 2.
    ///
    /// # Examples
    /// ```
    /// use cellbot_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B3");
    /// assert_eq!(addr.row, 2);
    /// assert_eq!(addr.col, 1);
    /// ```
    pub fn parse(label: &str) -> Self {
        let label = label.trim();

        let letters: String = label.chars().filter(|c| c.is_ascii_alphabetic()).collect();
        let digits: String = label.chars().filter(|c| c.is_ascii_digit()).collect();

        let row = digits.parse::<usize>().unwrap_or(1).max(1) - 1;
        let col = letters_to_column(&letters);

        Self { row, col }
    }

    /// Format as an A1-style label
    pub fn to_a1(&self) -> String {
        format!("{}{}", column_to_letters(self.col), self.row + 1)
    }

    /// Create a range from this address to another
    pub fn to(&self, other: CellAddress) -> CellRange {
        CellRange::new(*self, other)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

impl FromStr for CellAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// A rectangular range of cells (e.g. "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Start address (top-left after normalization)
    pub start: CellAddress,
    /// End address (bottom-right after normalization)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new range, normalizing so start is top-left
    ///
    /// Reversed inputs ("B3:A1") swap rather than producing an empty range.
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        let (start_row, end_row) = if start.row <= end.row {
            (start.row, end.row)
        } else {
            (end.row, start.row)
        };
        let (start_col, end_col) = if start.col <= end.col {
            (start.col, end.col)
        } else {
            (end.col, start.col)
        };

        Self {
            start: CellAddress::new(start_row, start_col),
            end: CellAddress::new(end_row, end_col),
        }
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse "A1:B10" notation; a bare label parses as a single-cell range
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s.split_once(':') {
            Some((start, end)) => Self::new(CellAddress::parse(start), CellAddress::parse(end)),
            None => Self::single(CellAddress::parse(s)),
        }
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Number of rows in the range
    pub fn row_count(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    /// Number of columns in the range
    pub fn col_count(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    /// Total number of cells in the range
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.col_count()
    }

    /// Iterate over all addresses in the range, row by row
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: self.start.row,
            current_col: self.start.col,
            done: false,
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    current_row: usize,
    current_col: usize,
    done: bool,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let addr = CellAddress::new(self.current_row, self.current_col);

        if self.current_col < self.range.end.col {
            self.current_col += 1;
        } else if self.current_row < self.range.end.row {
            self.current_col = self.range.start.col;
            self.current_row += 1;
        } else {
            self.done = true;
        }

        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let total = self.range.cell_count();
        let consumed = (self.current_row - self.range.start.row) * self.range.col_count()
            + (self.current_col - self.range.start.col);
        (total - consumed, Some(total - consumed))
    }
}

impl ExactSizeIterator for CellRangeIterator {}
