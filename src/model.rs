//! Administrative division tree read from the census JSON extract.
//!
//! The document is a plain nesting of districts, tehsils and villages:
//!
//! ```json
//! {
//!   "districts": [
//!     {
//!       "name": "Lahore",
//!       "code": "0101",
//!       "tehsils": [
//!         { "name": "Model Town", "code": "010101", "villages": [{ "name": "Alpha" }] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::error::SeedError;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// Top-level input document
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Document {
    pub districts: Vec<District>,
}

/// First-level subdivision, keyed by name
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct District {
    pub name: String,
    /// Census code; required on input but never emitted
    pub code: String,
    pub tehsils: Vec<Tehsil>,
}

/// Second-level subdivision, keyed by (name, district)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Tehsil {
    pub name: String,
    pub code: String,
    pub villages: Vec<Village>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Village {
    pub name: String,
}

impl Document {
    /// Parse a document from JSON text.
    ///
    /// `origin` is only used to label I/O errors surfaced by the reader.
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self, SeedError> {
        serde_json::from_str(json).map_err(|e| SeedError::from_json(origin, e))
    }

    pub fn tehsil_count(&self) -> usize {
        self.districts.iter().map(|d| d.tehsils.len()).sum()
    }

    pub fn village_count(&self) -> usize {
        self.districts
            .iter()
            .flat_map(|d| &d.tehsils)
            .map(|t| t.villages.len())
            .sum()
    }
}

/// Load the division tree from a JSON file
///
/// # Errors
///
/// * `SeedError::FileNotFound` - the path does not exist
/// * `SeedError::Parse` - the file is not valid JSON
/// * `SeedError::MalformedInput` - a required field is missing or mistyped
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document, SeedError> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SeedError::FileNotFound { path: path.to_path_buf() },
        _ => SeedError::io(path, e),
    })?;

    let document = Document::from_json_str(&contents, path)?;

    tracing::debug!(
        path = %path.display(),
        districts = document.districts.len(),
        tehsils = document.tehsil_count(),
        villages = document.village_count(),
        "Loaded division tree"
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<Document, SeedError> {
        Document::from_json_str(&value.to_string(), Path::new("test.json"))
    }

    #[test]
    fn test_parse_nested_tree() {
        let doc = parse(json!({
            "districts": [{
                "name": "Lahore",
                "code": "0101",
                "tehsils": [
                    { "name": "Model Town", "code": "010101", "villages": [{ "name": "Alpha" }, { "name": "Beta" }] },
                    { "name": "Raiwind", "code": "010102", "villages": [] }
                ]
            }]
        }))
        .unwrap();

        assert_eq!(doc.districts.len(), 1);
        assert_eq!(doc.districts[0].code, "0101");
        assert_eq!(doc.tehsil_count(), 2);
        assert_eq!(doc.village_count(), 2);
        assert_eq!(doc.districts[0].tehsils[0].villages[1].name, "Beta");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let doc = parse(json!({
            "source": "census 2017",
            "districts": [{
                "name": "Kasur",
                "code": "02",
                "population": 3454996,
                "tehsils": [{ "name": "Chunian", "code": "0201", "villages": [{ "name": "Kot", "code": "x" }] }]
            }]
        }))
        .unwrap();

        assert_eq!(doc.districts[0].code, "02");
        assert_eq!(doc.village_count(), 1);
    }

    #[test]
    fn test_missing_district_code_is_malformed() {
        let err = parse(json!({
            "districts": [{ "name": "L", "tehsils": [{ "name": "T", "code": "01", "villages": [] }] }]
        }))
        .unwrap_err();

        match err {
            SeedError::MalformedInput(msg) => assert!(msg.contains("code")),
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_tehsil_code_is_malformed() {
        let err = parse(json!({
            "districts": [{ "name": "L", "code": "01", "tehsils": [{ "name": "T", "villages": [] }] }]
        }))
        .unwrap_err();

        match err {
            SeedError::MalformedInput(msg) => assert!(msg.contains("code")),
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_villages_is_malformed() {
        let err = parse(json!({
            "districts": [{ "name": "Kasur", "code": "02", "tehsils": [{ "name": "Chunian", "code": "0201" }] }]
        }))
        .unwrap_err();

        match err {
            SeedError::MalformedInput(msg) => assert!(msg.contains("villages")),
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_districts_is_malformed() {
        let err = parse(json!({ "regions": [] })).unwrap_err();
        assert!(matches!(err, SeedError::MalformedInput(_)));
    }

    #[test]
    fn test_truncated_json_is_parse_error() {
        let err = Document::from_json_str(r#"{"districts": [{"name": "Lah"#, Path::new("t.json"))
            .unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");

        match load_document(&missing) {
            Err(SeedError::FileNotFound { path }) => assert_eq!(path, missing),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }
}
