use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RegionDataError;

/// Nationwide source: province name to its raw location payload.
///
/// Payloads are kept as JSON values so provinces are copied through
/// extraction without reshaping, whatever structure the source uses.
pub type SourceLocations = BTreeMap<String, Value>;

/// Region-filtered `province -> municipality -> [barangay]` mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionLocationDataset {
    provinces: BTreeMap<String, Value>,
}

/// One municipality as read from a province payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityEntry {
    pub name: String,
    pub barangays: Vec<String>,
}

impl RegionLocationDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, province: String, payload: Value) {
        self.provinces.insert(province, payload);
    }

    pub fn len(&self) -> usize {
        self.provinces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.provinces.is_empty()
    }

    pub fn contains(&self, province: &str) -> bool {
        self.provinces.contains_key(province)
    }

    pub fn province_names(&self) -> impl Iterator<Item = &str> {
        self.provinces.keys().map(String::as_str)
    }

    pub fn raw(&self, province: &str) -> Option<&Value> {
        self.provinces.get(province)
    }

    /// Municipalities of `province` with their barangay names.
    ///
    /// A nested object yields one entry per key; a flat list yields one entry
    /// per string element with no barangays. Anything else yields nothing.
    pub fn municipalities(&self, province: &str) -> Vec<MunicipalityEntry> {
        self.provinces
            .get(province)
            .map(municipalities_of)
            .unwrap_or_default()
    }

    /// Read a dataset previously written by [`RegionLocationDataset::save`].
    pub fn load(path: &Path) -> Result<Self, RegionDataError> {
        let provinces = read_json(path)?;
        Ok(Self { provinces })
    }

    /// Write as two-space indented JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), RegionDataError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RegionDataError::io(parent, e))?;
        }
        let body = serde_json::to_string_pretty(self).map_err(|e| RegionDataError::json(path, e))?;
        fs::write(path, body).map_err(|e| RegionDataError::io(path, e))
    }
}

pub(crate) fn municipalities_of(payload: &Value) -> Vec<MunicipalityEntry> {
    match payload {
        Value::Object(map) => map
            .iter()
            .map(|(name, barangays)| MunicipalityEntry {
                name: name.clone(),
                barangays: barangays
                    .as_array()
                    .map(|list| {
                        list.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect(),
        Value::Array(list) => list
            .iter()
            .filter_map(Value::as_str)
            .map(|name| MunicipalityEntry {
                name: name.to_string(),
                barangays: Vec::new(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Load the nationwide source file.
pub fn load_source(path: &Path) -> Result<SourceLocations, RegionDataError> {
    if !path.exists() {
        return Err(RegionDataError::InputMissing {
            path: path.to_path_buf(),
        });
    }
    read_json(path)
}

fn read_json(path: &Path) -> Result<BTreeMap<String, Value>, RegionDataError> {
    let text = fs::read_to_string(path).map_err(|e| RegionDataError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| RegionDataError::json(path, e))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn nested_payload_lists_municipalities_and_barangays() {
        let mut dataset = RegionLocationDataset::new();
        dataset.insert(
            "Aurora".into(),
            json!({"Baler": ["Barangay I", "Barangay II"], "Casiguran": []}),
        );

        let municipalities = dataset.municipalities("Aurora");
        assert_eq!(municipalities.len(), 2);
        assert_eq!(municipalities[0].name, "Baler");
        assert_eq!(municipalities[0].barangays, vec!["Barangay I", "Barangay II"]);
        assert!(municipalities[1].barangays.is_empty());
    }

    #[test]
    fn flat_payload_yields_names_only() {
        let mut dataset = RegionLocationDataset::new();
        dataset.insert("Bataan".into(), json!(["Abucay", "Bagac", 7]));

        let names: Vec<_> = dataset
            .municipalities("Bataan")
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Abucay", "Bagac"]);
        assert!(dataset.municipalities("Tarlac").is_empty());
    }

    #[test]
    fn save_then_load_preserves_unicode_and_structure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/region.json");

        let mut dataset = RegionLocationDataset::new();
        dataset.insert(
            "Bulacan".into(),
            json!({"Doña Remedios Trinidad": ["Kabayunan"]}),
        );
        dataset.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Doña Remedios Trinidad"));
        assert!(text.contains("\n  \"Bulacan\""));

        assert_eq!(RegionLocationDataset::load(&path).unwrap(), dataset);
    }

    #[test]
    fn missing_source_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_source(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, RegionDataError::InputMissing { .. }));
    }
}
