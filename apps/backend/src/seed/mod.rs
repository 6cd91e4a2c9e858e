//! Reference-data seeding.
//!
//! Seeding runs once, guarded by the province count. Each group is written in
//! its own transaction; a failed group is rolled back, logged and recorded in
//! the [`SeedReport`] while later groups still run.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use region_data::{municipality_slug, province_slug, RegionLocationDataset, REGION3_NAME, REGION3_PROVINCES};
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{info, warn};

use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::{
    BarangayDraft, BarangayRepo, BenefitProgramRepo, DocumentTypeRepo, IssueCategoryRepo,
    MunicipalityDraft, MunicipalityFilter, MunicipalityRepo, ProvinceDraft, ProvinceFilter,
    ProvinceRepo, Repo,
};

pub mod data;
pub mod locations;

use locations::BUILTIN_MUNICIPALITIES;

/// Seed groups in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedGroup {
    Provinces,
    Municipalities,
    Barangays,
    DocumentTypes,
    IssueCategories,
    BenefitPrograms,
}

impl SeedGroup {
    pub const ALL: [SeedGroup; 6] = [
        SeedGroup::Provinces,
        SeedGroup::Municipalities,
        SeedGroup::Barangays,
        SeedGroup::DocumentTypes,
        SeedGroup::IssueCategories,
        SeedGroup::BenefitPrograms,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SeedGroup::Provinces => "provinces",
            SeedGroup::Municipalities => "municipalities",
            SeedGroup::Barangays => "barangays",
            SeedGroup::DocumentTypes => "document_types",
            SeedGroup::IssueCategories => "issue_categories",
            SeedGroup::BenefitPrograms => "benefit_programs",
        }
    }
}

impl fmt::Display for SeedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to one seed group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupResult {
    /// Committed with this many rows
    Inserted(usize),
    /// Nothing to write for this group
    Skipped(String),
    /// Rolled back
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub groups: Vec<(SeedGroup, GroupResult)>,
}

impl SeedReport {
    pub fn result(&self, group: SeedGroup) -> Option<&GroupResult> {
        self.groups
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, result)| result)
    }

    /// Rows committed for `group` (0 when skipped or failed).
    pub fn inserted(&self, group: SeedGroup) -> usize {
        match self.result(group) {
            Some(GroupResult::Inserted(rows)) => *rows,
            _ => 0,
        }
    }

    pub fn failed(&self) -> Vec<SeedGroup> {
        self.groups
            .iter()
            .filter(|(_, result)| matches!(result, GroupResult::Failed(_)))
            .map(|(group, _)| *group)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failed().is_empty()
    }
}

/// Result of the seed check at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    AlreadySeeded { provinces: u64 },
    Seeded(SeedReport),
}

/// Where municipalities and barangays come from.
#[derive(Debug, Clone)]
pub enum LocationSource {
    /// Region dataset produced by the extractor
    Dataset(RegionLocationDataset),
    /// Built-in municipality list; no barangays
    BuiltIn,
}

impl LocationSource {
    /// Load the region dataset at `path`, falling back to the built-in list.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            warn!(
                "seed=dataset_missing path={} fallback=builtin barangays=skipped",
                path.display()
            );
            return LocationSource::BuiltIn;
        }
        match RegionLocationDataset::load(path) {
            Ok(dataset) => {
                info!(
                    "seed=dataset_loaded path={} provinces={}",
                    path.display(),
                    dataset.len()
                );
                LocationSource::Dataset(dataset)
            }
            Err(e) => {
                warn!(
                    "seed=dataset_unreadable path={} error={} fallback=builtin",
                    path.display(),
                    e
                );
                LocationSource::BuiltIn
            }
        }
    }

    /// (name, slug) pairs for one province, de-duplicated by slug.
    ///
    /// A province the dataset does not carry gets the built-in list, so no
    /// province is left without municipalities.
    fn municipalities(&self, province: &str) -> Vec<(String, String)> {
        let mut seen = HashSet::new();
        let pairs: Vec<(String, String)> = match self {
            LocationSource::Dataset(dataset) if dataset.contains(province) => dataset
                .municipalities(province)
                .into_iter()
                .map(|m| {
                    let slug = municipality_slug(&m.name);
                    (m.name, slug)
                })
                .collect(),
            LocationSource::Dataset(_) => {
                warn!(
                    "seed=province_missing_in_dataset province={} fallback=builtin",
                    province
                );
                builtin_municipalities(province)
            }
            LocationSource::BuiltIn => builtin_municipalities(province),
        };
        pairs
            .into_iter()
            .filter(|(_, slug)| seen.insert(slug.clone()))
            .collect()
    }
}

fn builtin_municipalities(province: &str) -> Vec<(String, String)> {
    BUILTIN_MUNICIPALITIES
        .iter()
        .find(|(name, _)| *name == province)
        .map(|(_, list)| {
            list.iter()
                .map(|(name, slug)| (name.to_string(), slug.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Seed reference data unless provinces already exist.
///
/// Only the count itself can fail; group failures end up in the report.
pub async fn ensure_seeded(
    db: &DatabaseConnection,
    source: &LocationSource,
) -> Result<SeedOutcome, DomainError> {
    let provinces = ProvinceRepo.count(db, &ProvinceFilter::default()).await?;
    if provinces > 0 {
        info!("seed=present provinces={}", provinces);
        return Ok(SeedOutcome::AlreadySeeded { provinces });
    }

    info!("seed=missing");
    Ok(SeedOutcome::Seeded(seed_reference_data(db, source).await))
}

/// Write every seed group, one transaction each.
pub async fn seed_reference_data(db: &DatabaseConnection, source: &LocationSource) -> SeedReport {
    let mut report = SeedReport::default();

    for group in SeedGroup::ALL {
        let result = match seed_group_in_transaction(db, group, source).await {
            Ok(Some(rows)) => {
                info!("seed=group_ok group={} rows={}", group, rows);
                GroupResult::Inserted(rows)
            }
            Ok(None) => {
                warn!("seed=group_skipped group={} reason=no_region_dataset", group);
                GroupResult::Skipped("no region dataset".to_string())
            }
            Err(e) => {
                warn!("seed=group_failed group={} error={}", group, e);
                GroupResult::Failed(e.to_string())
            }
        };
        report.groups.push((group, result));
    }

    info!(
        "seed=done complete={} failed_groups={}",
        report.is_complete(),
        report.failed().len()
    );
    report
}

async fn seed_group_in_transaction(
    db: &DatabaseConnection,
    group: SeedGroup,
    source: &LocationSource,
) -> Result<Option<usize>, DomainError> {
    let txn = db.begin().await?;

    match seed_group(&txn, group, source).await {
        Ok(result) => {
            txn.commit().await?;
            Ok(result)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!("seed=rollback_failed group={} error={}", group, rollback_err);
            }
            Err(e)
        }
    }
}

/// Rows written for `group`, or `None` when the group has nothing to write.
async fn seed_group(
    txn: &DatabaseTransaction,
    group: SeedGroup,
    source: &LocationSource,
) -> Result<Option<usize>, DomainError> {
    let rows = match group {
        SeedGroup::Provinces => seed_provinces(txn).await?,
        SeedGroup::Municipalities => seed_municipalities(txn, source).await?,
        SeedGroup::Barangays => match source {
            LocationSource::Dataset(dataset) => seed_barangays(txn, dataset).await?,
            LocationSource::BuiltIn => return Ok(None),
        },
        SeedGroup::DocumentTypes => {
            create_all(txn, &DocumentTypeRepo, data::document_types()).await?
        }
        SeedGroup::IssueCategories => {
            create_all(txn, &IssueCategoryRepo, data::issue_categories()).await?
        }
        SeedGroup::BenefitPrograms => {
            create_all(txn, &BenefitProgramRepo, data::benefit_programs()).await?
        }
    };
    Ok(Some(rows))
}

async fn create_all<C, R>(conn: &C, repo: &R, drafts: Vec<R::Draft>) -> Result<usize, DomainError>
where
    C: ConnectionTrait,
    R: Repo,
{
    let total = drafts.len();
    for draft in drafts {
        repo.create(conn, draft).await?;
    }
    Ok(total)
}

async fn seed_provinces<C: ConnectionTrait>(conn: &C) -> Result<usize, DomainError> {
    let drafts = REGION3_PROVINCES
        .iter()
        .map(|name| ProvinceDraft {
            name: name.to_string(),
            slug: province_slug(name),
            region_name: REGION3_NAME.to_string(),
        })
        .collect();
    create_all(conn, &ProvinceRepo, drafts).await
}

async fn province_id<C: ConnectionTrait>(conn: &C, name: &str) -> Result<i32, DomainError> {
    ProvinceRepo
        .find_by_key(conn, &province_slug(name))
        .await?
        .map(|p| p.id)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Province, format!("province '{name}' is not seeded")))
}

async fn seed_municipalities<C: ConnectionTrait>(
    conn: &C,
    source: &LocationSource,
) -> Result<usize, DomainError> {
    let mut total = 0;
    for province in REGION3_PROVINCES {
        let province_id = province_id(conn, province).await?;
        let drafts = source
            .municipalities(province)
            .into_iter()
            .map(|(name, slug)| MunicipalityDraft {
                province_id,
                name,
                slug,
            })
            .collect();
        total += create_all(conn, &MunicipalityRepo, drafts).await?;
    }
    Ok(total)
}

async fn seed_barangays<C: ConnectionTrait>(
    conn: &C,
    dataset: &RegionLocationDataset,
) -> Result<usize, DomainError> {
    let mut total = 0;
    for province in REGION3_PROVINCES {
        if !dataset.contains(province) {
            continue;
        }
        let province_id = province_id(conn, province).await?;
        let filter = MunicipalityFilter {
            province_id: Some(province_id),
            active_only: false,
        };
        let municipality_ids: HashMap<String, i32> = MunicipalityRepo
            .list(conn, &filter)
            .await?
            .into_iter()
            .map(|m| (m.slug, m.id))
            .collect();

        let mut drafts = Vec::new();
        for municipality in dataset.municipalities(province) {
            let Some(&municipality_id) = municipality_ids.get(&municipality_slug(&municipality.name))
            else {
                warn!(
                    "seed=barangays_orphaned province={} municipality={}",
                    province, municipality.name
                );
                continue;
            };
            let mut seen = HashSet::new();
            for name in municipality.barangays {
                let slug = municipality_slug(&name);
                if seen.insert(slug.clone()) {
                    drafts.push(BarangayDraft {
                        municipality_id,
                        name,
                        slug,
                    });
                }
            }
        }
        total += BarangayRepo.create_many(conn, drafts).await?;
    }
    Ok(total)
}
