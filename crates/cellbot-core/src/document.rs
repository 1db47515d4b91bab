//! Document type - the multi-sheet container
//!
//! The external JSON shape keeps sheets as a name-keyed map with a separate
//! `activeSheet` field, matching what the rendering and file-codec
//! collaborators exchange:
//!
//! ```json
//! { "sheets": { "Sheet 1": { "data": [...] } }, "activeSheet": "Sheet 1" }
//! ```

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cell::{Cell, Scalar};
use crate::error::{Error, Result};
use crate::sheet::Sheet;
use crate::{column_to_letters, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS};

/// A spreadsheet document: named sheets plus which one is active
///
/// Invariants: at least one sheet exists, and `active_sheet` always names
/// one of them. Mutation happens exclusively through the operation applier,
/// which clones the document first (snapshot semantics).
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Sheets, in insertion order
    sheets: Vec<Sheet>,
    /// Name of the active sheet
    active_sheet: String,
}

impl Document {
    /// Create the "new sheet" layout: a header row of column letters plus
    /// blank padding rows
    pub fn new() -> Self {
        let header: Vec<Cell> = (0..DEFAULT_GRID_COLS)
            .map(|col| Cell::from(column_to_letters(col)))
            .collect();
        let mut data = vec![header];
        for _ in 0..DEFAULT_GRID_ROWS {
            data.push(vec![Cell::blank(); DEFAULT_GRID_COLS]);
        }

        Self {
            sheets: vec![Sheet::with_grid("Sheet 1", data)],
            active_sheet: "Sheet 1".to_string(),
        }
    }

    /// Build a document from a single existing sheet
    pub fn from_sheet(sheet: Sheet) -> Self {
        let active_sheet = sheet.name.clone();
        Self {
            sheets: vec![sheet],
            active_sheet,
        }
    }

    /// Seed a document from imported raw rows (the file-codec shape)
    ///
    /// The first sheet becomes active. Fails on an empty import.
    pub fn from_imported(sheets: Vec<(String, Vec<Vec<Scalar>>)>) -> Result<Self> {
        let sheets: Vec<Sheet> = sheets
            .into_iter()
            .map(|(name, rows)| {
                let data = rows
                    .into_iter()
                    .map(|row| row.into_iter().map(Cell::Plain).collect())
                    .collect();
                Sheet::with_grid(name, data)
            })
            .collect();

        let active_sheet = match sheets.first() {
            Some(sheet) => sheet.name.clone(),
            None => return Err(Error::EmptyDocument),
        };

        Ok(Self {
            sheets,
            active_sheet,
        })
    }

    /// Name of the active sheet
    pub fn active_sheet_name(&self) -> &str {
        &self.active_sheet
    }

    /// Switch the active sheet
    pub fn set_active_sheet(&mut self, name: &str) -> Result<()> {
        if self.sheet_by_name(name).is_none() {
            return Err(Error::SheetNotFound(name.to_string()));
        }
        self.active_sheet = name.to_string();
        Ok(())
    }

    /// The active sheet
    pub fn active_sheet(&self) -> &Sheet {
        // The constructor invariant guarantees the lookup succeeds
        self.sheet_by_name(&self.active_sheet)
            .unwrap_or(&self.sheets[0])
    }

    /// The active sheet, mutably
    pub fn active_sheet_mut(&mut self) -> &mut Sheet {
        let name = self.active_sheet.clone();
        let idx = self
            .sheets
            .iter()
            .position(|s| s.name == name)
            .unwrap_or(0);
        &mut self.sheets[idx]
    }

    /// Look up a sheet by name
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Iterate over all sheets in order
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    /// Add a sheet; rejects duplicate names
    pub fn add_sheet(&mut self, sheet: Sheet) -> Result<()> {
        if sheet.name.trim().is_empty() {
            return Err(Error::InvalidSheetName(sheet.name));
        }
        if self.sheet_by_name(&sheet.name).is_some() {
            return Err(Error::DuplicateSheetName(sheet.name));
        }
        self.sheets.push(sheet);
        Ok(())
    }

    /// Flatten every sheet to display primitives for the file codec
    pub fn export_rows(&self) -> Vec<(String, Vec<Vec<Scalar>>)> {
        self.sheets
            .iter()
            .map(|s| (s.name.clone(), s.export_rows()))
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// === External JSON shape ===

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        struct SheetsAsMap<'a>(&'a [Sheet]);

        impl Serialize for SheetsAsMap<'_> {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for sheet in self.0 {
                    map.serialize_entry(&sheet.name, sheet)?;
                }
                map.end()
            }
        }

        let mut doc = serializer.serialize_struct("Document", 2)?;
        doc.serialize_field("sheets", &SheetsAsMap(&self.sheets))?;
        doc.serialize_field("activeSheet", &self.active_sheet)?;
        doc.end()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        /// Name-keyed sheet map, preserving source order
        struct NamedSheets(Vec<Sheet>);

        impl<'de> Deserialize<'de> for NamedSheets {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                struct SheetMapVisitor;

                impl<'de> Visitor<'de> for SheetMapVisitor {
                    type Value = NamedSheets;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str("a map of sheet name to sheet body")
                    }

                    fn visit_map<A: MapAccess<'de>>(
                        self,
                        mut access: A,
                    ) -> std::result::Result<NamedSheets, A::Error> {
                        let mut sheets = Vec::new();
                        while let Some((name, mut sheet)) =
                            access.next_entry::<String, Sheet>()?
                        {
                            sheet.name = name;
                            sheets.push(sheet);
                        }
                        Ok(NamedSheets(sheets))
                    }
                }

                deserializer.deserialize_map(SheetMapVisitor)
            }
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Repr {
            sheets: NamedSheets,
            active_sheet: Option<String>,
        }

        let repr = Repr::deserialize(deserializer)?;
        let sheets = repr.sheets.0;
        let first = sheets
            .first()
            .map(|s| s.name.clone())
            .ok_or_else(|| de::Error::custom("document has no sheets"))?;

        // A stale activeSheet falls back to the first sheet rather than
        // breaking the active-sheet invariant.
        let active_sheet = match repr.active_sheet {
            Some(name) if sheets.iter().any(|s| s.name == name) => name,
            _ => first,
        };

        Ok(Document {
            sheets,
            active_sheet,
        })
    }
}
