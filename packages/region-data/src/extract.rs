use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::dataset::{load_source, RegionLocationDataset, SourceLocations};
use crate::error::RegionDataError;

pub const REGION3_NAME: &str = "Central Luzon";

/// Provinces that make up Region III, in display order.
pub const REGION3_PROVINCES: [&str; 7] = [
    "Aurora",
    "Bataan",
    "Bulacan",
    "Nueva Ecija",
    "Pampanga",
    "Tarlac",
    "Zambales",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvinceSummary {
    pub name: String,
    /// `None` when the payload is not a municipality mapping.
    pub municipalities: Option<usize>,
}

/// Operator-facing counts for one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub extracted: Vec<ProvinceSummary>,
    pub missing: Vec<String>,
    pub total_municipalities: usize,
    pub total_barangays: usize,
}

impl ExtractionReport {
    pub fn provinces_extracted(&self) -> usize {
        self.extracted.len()
    }
}

/// Keep only the allow-listed provinces of `source`, payloads untouched.
///
/// Allow-listed names absent from the source land in `report.missing`;
/// they never fail the run.
pub fn extract_region(
    source: &SourceLocations,
    allow_list: &[&str],
) -> (RegionLocationDataset, ExtractionReport) {
    let mut dataset = RegionLocationDataset::new();
    let mut report = ExtractionReport::default();

    for &province in allow_list {
        let Some(payload) = source.get(province) else {
            report.missing.push(province.to_string());
            continue;
        };

        let municipalities = match payload {
            Value::Object(map) => {
                report.total_municipalities += map.len();
                report.total_barangays += map
                    .values()
                    .filter_map(Value::as_array)
                    .map(Vec::len)
                    .sum::<usize>();
                Some(map.len())
            }
            Value::Array(list) => {
                report.total_municipalities += list.len();
                None
            }
            _ => None,
        };

        report.extracted.push(ProvinceSummary {
            name: province.to_string(),
            municipalities,
        });
        dataset.insert(province.to_string(), payload.clone());
    }

    (dataset, report)
}

/// Read `input`, extract `allow_list`, and write the result to `output`.
pub fn extract_region_file(
    input: &Path,
    output: &Path,
    allow_list: &[&str],
) -> Result<ExtractionReport, RegionDataError> {
    info!(input = %input.display(), "extract=read");
    let source = load_source(input)?;

    let (dataset, report) = extract_region(&source, allow_list);

    for summary in &report.extracted {
        match summary.municipalities {
            Some(count) => info!("[OK] {}: {} municipalities", summary.name, count),
            None => info!("[OK] {}: N/A municipalities", summary.name),
        }
    }
    for name in &report.missing {
        warn!("[NOT FOUND] {name}: NOT FOUND in location data");
    }

    info!(output = %output.display(), "extract=write");
    dataset.save(output)?;

    info!(
        provinces = report.provinces_extracted(),
        municipalities = report.total_municipalities,
        barangays = report.total_barangays,
        "extract=done"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn source(entries: &[(&str, Value)]) -> SourceLocations {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn flat_list_counts_municipalities_without_barangays() {
        let src = source(&[("Tarlac", json!(["Anao", "Bamban", "Capas"]))]);
        let (dataset, report) = extract_region(&src, &REGION3_PROVINCES);

        assert!(dataset.contains("Tarlac"));
        assert_eq!(report.total_municipalities, 3);
        assert_eq!(report.total_barangays, 0);
        assert_eq!(report.extracted[0].municipalities, None);
    }

    #[test]
    fn non_list_barangay_values_are_not_counted() {
        let src = source(&[(
            "Zambales",
            json!({"Iba": ["Amungan", "Bangantalinga"], "Subic": "unknown"}),
        )]);
        let (_, report) = extract_region(&src, &REGION3_PROVINCES);

        assert_eq!(report.total_municipalities, 2);
        assert_eq!(report.total_barangays, 2);
    }

    #[test]
    fn empty_source_reports_every_province_missing() {
        let (dataset, report) = extract_region(&SourceLocations::new(), &REGION3_PROVINCES);

        assert!(dataset.is_empty());
        assert_eq!(report.missing, REGION3_PROVINCES.to_vec());
        assert_eq!(report.provinces_extracted(), 0);
    }
}
