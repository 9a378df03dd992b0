//! CSV edge-name source: `street_edge_id,street_name`, one row per edge.
//! An empty name field marks an unnamed street.

use std::path::Path;

use csv::ReaderBuilder;
use hashbrown::HashMap;
use serde::Deserialize;
use tracing::info;

use crate::error::Result;
use crate::model::{EdgeId, StreetName};

#[derive(Debug, Deserialize)]
struct NameRow {
    street_edge_id: EdgeId,
    #[serde(default)]
    street_name: Option<String>,
}

/// Load the edge-id -> street-name mapping.
pub fn load_edge_names(path: &Path) -> Result<HashMap<EdgeId, StreetName>> {
    info!("Loading edge names from {}", path.display());

    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut names = HashMap::new();
    for row in reader.deserialize() {
        let row: NameRow = row?;
        let name = StreetName::from_field(row.street_name.as_deref().unwrap_or(""));
        names.insert(row.street_edge_id, name);
    }

    info!("Loaded names for {} edges", names.len());
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_names(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_named_and_unnamed_rows() {
        let file = write_names("street_edge_id,street_name\n1,Main St\n2,\n3,Oak Ave\n");
        let names = load_edge_names(file.path()).unwrap();

        assert_eq!(names.len(), 3);
        assert_eq!(names[&1], StreetName::Named("Main St".to_string()));
        assert_eq!(names[&2], StreetName::Unnamed);
        assert_eq!(names[&3], StreetName::Named("Oak Ave".to_string()));
    }

    #[test]
    fn malformed_rows_are_a_csv_error() {
        let file = write_names("street_edge_id,street_name\nnot-a-number,Main St\n");
        assert!(load_edge_names(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_edge_names(Path::new("/nonexistent/names.csv")).is_err());
    }
}
