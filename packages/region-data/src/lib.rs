//! Administrative geography for Region III (Central Luzon).
//!
//! Filters a nationwide `province -> municipality -> [barangay]` dataset down
//! to the region's provinces and derives the URL slugs used for them.

pub mod dataset;
pub mod error;
pub mod extract;
pub mod slug;

pub use dataset::{MunicipalityEntry, RegionLocationDataset, SourceLocations};
pub use error::RegionDataError;
pub use extract::{
    extract_region, extract_region_file, ExtractionReport, ProvinceSummary, REGION3_NAME,
    REGION3_PROVINCES,
};
pub use slug::{municipality_slug, province_slug, slugify};
