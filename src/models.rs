use crate::categories::{serialize_category_set, ErrorCategory};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ============ Snapshot Input Models ============

/// A company as published by one environment (staging or production).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    /// Stable cross-environment identifier used to pair records.
    /// The upstream API publishes it as `wikidataId`.
    #[serde(rename = "externalId", alias = "wikidataId")]
    pub external_id: String,
    /// Display name. Informational only.
    #[serde(default)]
    pub name: String,
    /// Reporting periods in the order the source lists them.
    #[serde(default)]
    pub reporting_periods: Vec<ReportingPeriod>,
}

/// One reporting period of a company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingPeriod {
    /// Period start, either `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub start_date: Option<String>,
    /// Period end, same formats as `start_date`.
    pub end_date: Option<String>,
    /// Emissions block, absent when the period reports none.
    pub emissions: Option<Emissions>,
    /// Economy block, absent when the period reports none.
    pub economy: Option<Economy>,
}

/// Emissions reported for a period, one optional block per scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Emissions {
    pub scope1: Option<Scope1>,
    pub scope2: Option<Scope2>,
    pub scope3: Option<Scope3>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scope1 {
    pub total: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope2 {
    /// Market-based figure.
    pub mb: Option<f64>,
    /// Location-based figure.
    pub lb: Option<f64>,
    /// Precomputed total. Preferred over `mb` when both are present.
    #[serde(alias = "calculatedTotal")]
    pub calculated_total_emissions: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope3 {
    #[serde(alias = "calculatedTotal")]
    pub calculated_total_emissions: Option<f64>,
}

/// Economic figures reported for a period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    pub turnover: Option<Turnover>,
    pub employees: Option<Employees>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Turnover {
    pub value: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employees {
    pub value: Option<f64>,
    pub unit: Option<String>,
}

// ============ Derived Models ============

/// Flattened, comparable values of a single reporting period.
///
/// `None` always means "not reported"; a reported zero is `Some(0.0)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactSheet {
    pub scope1: Option<f64>,
    pub scope2: Option<f64>,
    pub scope3: Option<f64>,
    pub currency: Option<String>,
    pub revenue: Option<f64>,
    pub employees: Option<f64>,
    pub year: Option<i32>,
}

// ============ Comparison Output Models ============

/// Staging and production value of one compared field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldPair<T> {
    pub stage: Option<T>,
    pub prod: Option<T>,
}

impl<T: Clone> FieldPair<T> {
    pub fn new(stage: &Option<T>, prod: &Option<T>) -> Self {
        Self {
            stage: stage.clone(),
            prod: prod.clone(),
        }
    }
}

/// Raw values that were compared, kept for display and debugging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDetails {
    pub scope1: FieldPair<f64>,
    pub scope2: FieldPair<f64>,
    pub scope3: FieldPair<f64>,
    pub currency: FieldPair<String>,
    pub revenue: FieldPair<f64>,
    pub employees: FieldPair<f64>,
    pub year: FieldPair<i32>,
}

impl FieldDetails {
    pub fn from_sheets(stage: &FactSheet, prod: &FactSheet) -> Self {
        Self {
            scope1: FieldPair::new(&stage.scope1, &prod.scope1),
            scope2: FieldPair::new(&stage.scope2, &prod.scope2),
            scope3: FieldPair::new(&stage.scope3, &prod.scope3),
            currency: FieldPair::new(&stage.currency, &prod.currency),
            revenue: FieldPair::new(&stage.revenue, &prod.revenue),
            employees: FieldPair::new(&stage.employees, &prod.employees),
            year: FieldPair::new(&stage.year, &prod.year),
        }
    }
}

/// Outcome of comparing one staging record with its production counterpart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub company_id: String,
    pub company_name: String,
    /// 0..=100, higher is better.
    pub correctness_percentage: u8,
    /// At most one entry per category.
    #[serde(serialize_with = "serialize_category_set")]
    pub errors: BTreeSet<ErrorCategory>,
    pub field_details: FieldDetails,
}

impl ComparisonResult {
    pub fn has_error(&self, category: ErrorCategory) -> bool {
        self.errors.contains(&category)
    }
}

// ============ Aggregate Models ============

/// One fixed-width slice of the correctness histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBucket {
    /// Display label, e.g. `"80-84%"`.
    pub range: String,
    pub range_start: u8,
    /// Inclusive upper bound.
    pub range_end: u8,
    /// Number of results whose score falls in the range.
    pub total: usize,
    /// Share of all results in this bucket, 0..=100.
    pub percentage: f64,
    /// In-range results per category, keyed by category identifier.
    #[serde(flatten)]
    pub categories: BTreeMap<ErrorCategory, usize>,
}

/// Summary statistics over a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityStats {
    pub total_companies: usize,
    /// Mean correctness, rounded to two decimals.
    pub average_correctness: f64,
    /// Companies exhibiting each category (every category present).
    pub error_distribution: BTreeMap<ErrorCategory, usize>,
    pub correctness_histogram: Vec<HistogramBucket>,
}

/// Everything a dashboard needs for one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub stats: QualityStats,
    pub comparisons: Vec<ComparisonResult>,
    /// Staging records without a production counterpart.
    pub unmatched_stage: usize,
    /// Production records without a staging counterpart.
    pub unmatched_prod: usize,
}

// ============ API Request Models ============

/// Body of `POST /api/v1/compare`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparePayload {
    #[serde(default)]
    pub stage: Vec<CompanyRecord>,
    #[serde(default)]
    pub prod: Vec<CompanyRecord>,
}
