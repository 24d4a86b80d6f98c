//! Pairs two snapshots by external id and answers queries over the results.

use crate::categories::ErrorCategory;
use crate::comparison::compare_companies;
use crate::errors::AppError;
use crate::models::{CompanyRecord, ComparisonResult, QualityReport};
use crate::stats::generate_quality_stats;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Results of comparing every paired company, plus how many records had no counterpart.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetComparison {
    pub comparisons: Vec<ComparisonResult>,
    pub unmatched_stage: usize,
    pub unmatched_prod: usize,
}

/// Compares every staging record that has a production counterpart.
///
/// Results follow staging order. When production lists an id more than once,
/// the first record wins. Unmatched records are skipped.
pub fn compare_datasets(stage: &[CompanyRecord], prod: &[CompanyRecord]) -> DatasetComparison {
    let mut prod_by_id: HashMap<&str, &CompanyRecord> = HashMap::with_capacity(prod.len());
    for record in prod {
        prod_by_id.entry(record.external_id.as_str()).or_insert(record);
    }

    let mut matched_ids: HashSet<&str> = HashSet::new();
    let mut comparisons = Vec::with_capacity(stage.len());
    let mut unmatched_stage = 0;

    for record in stage {
        match prod_by_id.get(record.external_id.as_str()) {
            Some(counterpart) => {
                matched_ids.insert(record.external_id.as_str());
                comparisons.push(compare_companies(record, counterpart));
            }
            None => unmatched_stage += 1,
        }
    }

    let unmatched_prod = prod_by_id
        .keys()
        .filter(|id| !matched_ids.contains(*id))
        .count();

    tracing::info!(
        "Compared {} companies ({} staging-only, {} production-only)",
        comparisons.len(),
        unmatched_stage,
        unmatched_prod
    );

    DatasetComparison {
        comparisons,
        unmatched_stage,
        unmatched_prod,
    }
}

/// Compares two snapshots and aggregates the outcome.
///
/// # Errors
///
/// * `AppError::EmptyInput` when no company could be paired.
pub fn build_report(
    stage: &[CompanyRecord],
    prod: &[CompanyRecord],
    bucket_width: u8,
) -> Result<QualityReport, AppError> {
    let dataset = compare_datasets(stage, prod);
    if dataset.comparisons.is_empty() {
        return Err(AppError::EmptyInput(format!(
            "No companies matched between staging ({}) and production ({})",
            stage.len(),
            prod.len()
        )));
    }

    let stats = generate_quality_stats(&dataset.comparisons, bucket_width)?;

    Ok(QualityReport {
        stats,
        comparisons: dataset.comparisons,
        unmatched_stage: dataset.unmatched_stage,
        unmatched_prod: dataset.unmatched_prod,
    })
}

/// Ordering of a comparison listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most error categories first.
    #[default]
    Errors,
    /// Highest correctness first.
    Accuracy,
    /// Alphabetical by company name.
    Name,
}

/// Filters for listing comparison results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparisonQuery {
    /// Case-insensitive substring of the company name.
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
    /// Only companies exhibiting this category.
    pub category: Option<ErrorCategory>,
    pub limit: Option<usize>,
}

impl ComparisonQuery {
    pub fn for_category(category: ErrorCategory) -> Self {
        Self {
            category: Some(category),
            ..Default::default()
        }
    }

    /// Applies search, category filter, ordering and limit. Sorting is stable.
    pub fn apply(&self, results: &[ComparisonResult]) -> Vec<ComparisonResult> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut selected: Vec<ComparisonResult> = results
            .iter()
            .filter(|r| match &needle {
                Some(needle) => r.company_name.to_lowercase().contains(needle),
                None => true,
            })
            .filter(|r| self.category.map_or(true, |c| r.has_error(c)))
            .cloned()
            .collect();

        match self.sort {
            SortKey::Errors => selected.sort_by(|a, b| b.errors.len().cmp(&a.errors.len())),
            SortKey::Accuracy => {
                selected.sort_by(|a, b| b.correctness_percentage.cmp(&a.correctness_percentage))
            }
            SortKey::Name => selected.sort_by(|a, b| {
                a.company_name
                    .to_lowercase()
                    .cmp(&b.company_name.to_lowercase())
            }),
        }

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}
