//! Export serializers
//!
//! Both exports are pure functions of the navigation state and the store, so
//! whatever is on screen is exactly what gets copied or written:
//!
//! - Plain text: the clipboard payload
//! - Table: `Platform, Category, Control, Type` rows, written as CSV

use super::error::ExportError;
use super::navigation::{NavigationState, Selection};
use super::parser::{self, ParsedControl};
use super::store::{Category, ChecklistStore};
use std::path::{Path, PathBuf};

/// Header row of the tabular export
pub const TABLE_HEADER: [&str; 4] = ["Platform", "Category", "Control", "Type"];

/// Preferred column widths in characters (display hint only)
pub const COLUMN_WIDTHS: [usize; 4] = [15, 20, 80, 12];

/// File extension of the tabular export
pub const TABLE_EXTENSION: &str = "csv";

/// Plain-text rendering of the current selection.
///
/// Tags are presentational and left out of the text.
pub fn to_plain_text(state: &NavigationState, store: &ChecklistStore) -> Result<String, ExportError> {
    match state.resolve(store) {
        Selection::None => Err(ExportError::NoSelection),
        Selection::Category { platform, category } => {
            let mut text = format!("{} - {}\n\n", platform.to_uppercase(), category.name);
            for control in parser::parse_all(&category.controls) {
                text.push_str(&format!("{}. {}\n", control.index, control.text));
            }
            Ok(text)
        }
        Selection::Platform {
            platform,
            categories,
        } => {
            let mut text = format!("{} Categories\n\n", platform.to_uppercase());
            for category in categories {
                text.push_str(&format!(
                    "{} ({} controls)\n",
                    category.name,
                    category.control_count()
                ));
            }
            Ok(text)
        }
    }
}

/// One data row of the tabular export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub platform: String,
    pub category: String,
    pub control: String,
    /// Lower-case tag name or `N/A`
    pub kind: &'static str,
}

impl TableRow {
    fn new(platform_upper: &str, category: &Category, control: &ParsedControl) -> Self {
        Self {
            platform: platform_upper.to_string(),
            category: category.name.clone(),
            control: control.text.clone(),
            kind: control.type_label(),
        }
    }

    pub fn cells(&self) -> [&str; 4] {
        [&self.platform, &self.category, &self.control, self.kind]
    }
}

/// Rectangular export grid (header excluded from `rows`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header row followed by the data rows
    pub fn grid(&self) -> Vec<Vec<String>> {
        std::iter::once(TABLE_HEADER.map(String::from).to_vec())
            .chain(
                self.rows
                    .iter()
                    .map(|row| row.cells().map(String::from).to_vec()),
            )
            .collect()
    }

    /// Serialize as CSV, header first
    pub fn to_csv(&self) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in self.grid() {
            writer.write_record(&record)?;
        }
        writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
    }

    /// Write the CSV serialization to `path`, replacing any existing file
    pub fn write_csv(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, self.to_csv()?)?;
        Ok(())
    }
}

/// Tabular rendering of the current selection.
///
/// A category selection yields one row per control; a platform selection
/// flattens every category in display order.
pub fn to_table(state: &NavigationState, store: &ChecklistStore) -> Result<Table, ExportError> {
    let rows = match state.resolve(store) {
        Selection::None => return Err(ExportError::NoSelection),
        Selection::Category { platform, category } => category_rows(&platform.to_uppercase(), category),
        Selection::Platform {
            platform,
            categories,
        } => {
            let upper = platform.to_uppercase();
            categories
                .iter()
                .flat_map(|category| category_rows(&upper, category))
                .collect()
        }
    };

    Ok(Table { rows })
}

fn category_rows(platform_upper: &str, category: &Category) -> Vec<TableRow> {
    parser::parse_all(&category.controls)
        .iter()
        .map(|control| TableRow::new(platform_upper, category, control))
        .collect()
}

/// Replace every character outside `[A-Za-z0-9]` with `_`
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Export file name: `SecurityChecklist_<platform>[_<category>].csv`
///
/// Named after the resolved selection, so a category missing from the store
/// gives the platform-level name, matching what `to_table` exports.
pub fn filename_for(state: &NavigationState, store: &ChecklistStore) -> Result<String, ExportError> {
    let (platform, category) = match state.resolve(store) {
        Selection::None => return Err(ExportError::NoSelection),
        Selection::Platform { platform, .. } => (platform, None),
        Selection::Category { platform, category } => (platform, Some(category.name.as_str())),
    };

    let mut name = format!("SecurityChecklist_{}", sanitize(platform));
    if let Some(category) = category {
        name.push('_');
        name.push_str(&sanitize(category));
    }
    name.push('.');
    name.push_str(TABLE_EXTENSION);
    Ok(name)
}

/// Write the current selection as CSV into `dir`, returning the file path
pub fn write_table(
    state: &NavigationState,
    store: &ChecklistStore,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let table = to_table(state, store)?;
    let path = dir.join(filename_for(state, store)?);

    if table.is_empty() {
        tracing::warn!("Selection has no controls, writing header only");
    }

    std::fs::create_dir_all(dir)?;
    table.write_csv(&path)?;

    tracing::info!(
        "Exported {} rows to {}",
        table.len(),
        path.display()
    );
    Ok(path)
}
