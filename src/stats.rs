//! Folds comparison results into run-level statistics.

use crate::categories::ErrorCategory;
use crate::errors::AppError;
use crate::models::{ComparisonResult, HistogramBucket, QualityStats};
use std::collections::BTreeMap;

/// Default histogram bucket width, in percentage points.
pub const DEFAULT_BUCKET_WIDTH: u8 = 5;

fn zeroed_categories() -> BTreeMap<ErrorCategory, usize> {
    ErrorCategory::ALL.iter().map(|c| (*c, 0)).collect()
}

fn bucket_count(width: u8) -> usize {
    (100 + width as usize - 1) / width as usize
}

/// Empty buckets partitioning 0..=100. The last bucket always ends at 100.
pub fn empty_histogram(width: u8) -> Result<Vec<HistogramBucket>, AppError> {
    if width == 0 || width > 100 {
        return Err(AppError::BadRequest(format!(
            "Histogram bucket width must be between 1 and 100, got {}",
            width
        )));
    }

    let count = bucket_count(width);
    let buckets = (0..count)
        .map(|index| {
            let start = index * width as usize;
            let end = if index + 1 == count {
                100
            } else {
                start + width as usize - 1
            };
            HistogramBucket {
                range: format!("{}-{}%", start, end),
                range_start: start as u8,
                range_end: end as u8,
                total: 0,
                percentage: 0.0,
                categories: zeroed_categories(),
            }
        })
        .collect();

    Ok(buckets)
}

/// Index of the bucket a score falls into.
pub fn bucket_index(score: u8, width: u8) -> usize {
    let count = bucket_count(width);
    (score.min(100) as usize / width as usize).min(count - 1)
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Builds the quality statistics for a comparison run.
///
/// # Errors
///
/// * `AppError::EmptyInput` when `results` is empty.
/// * `AppError::BadRequest` when `bucket_width` is outside 1..=100.
pub fn generate_quality_stats(
    results: &[ComparisonResult],
    bucket_width: u8,
) -> Result<QualityStats, AppError> {
    if results.is_empty() {
        return Err(AppError::EmptyInput(
            "Cannot compute quality statistics without any comparisons".to_string(),
        ));
    }

    let mut histogram = empty_histogram(bucket_width)?;
    let mut error_distribution = zeroed_categories();
    let mut score_sum: u64 = 0;

    for result in results {
        score_sum += result.correctness_percentage as u64;

        let bucket = &mut histogram[bucket_index(result.correctness_percentage, bucket_width)];
        bucket.total += 1;

        for category in &result.errors {
            *error_distribution.entry(*category).or_insert(0) += 1;
            *bucket.categories.entry(*category).or_insert(0) += 1;
        }
    }

    let total = results.len();
    for bucket in &mut histogram {
        bucket.percentage = round_two_decimals(bucket.total as f64 / total as f64 * 100.0);
    }

    let average_correctness = round_two_decimals(score_sum as f64 / total as f64);
    tracing::debug!(
        "Aggregated {} comparisons, average correctness {:.2}%",
        total,
        average_correctness
    );

    Ok(QualityStats {
        total_companies: total,
        average_correctness,
        error_distribution,
        correctness_histogram: histogram,
    })
}
