//! Scores a staging company record against its production counterpart.
//!
//! The checks run in a fixed order because later steps are gated on earlier
//! ones:
//!
//! 1. identity (`externalId`)
//! 2. currency
//! 3. reporting year, which decides whether numeric fields are compared
//! 4. numeric fields: a consistent unit-scale pass over the scopes, then
//!    per-field checks for scopes, revenue and employees
//! 5. a fiscal-year realignment scan across all reporting periods
//!
//! Every problem found is recorded as an [`ErrorCategory`] on the result and
//! costs penalty points; the comparison itself never fails.

use crate::categories::ErrorCategory;
use crate::models::{CompanyRecord, ComparisonResult, FactSheet, FieldDetails};
use crate::normalizer::{data_bearing_periods, latest_position, normalize};
use std::collections::BTreeSet;

const MISSING_PENALTY: u32 = 1;
const CURRENCY_MISMATCH_PENALTY: u32 = 2;
const YEAR_MISMATCH_PENALTY: u32 = 5;
const UNIT_ERROR_PENALTY: u32 = 2;
const MINOR_PENALTY: u32 = 2;
const MAJOR_PENALTY: u32 = 5;
const WRONG_FISCAL_YEAR_PENALTY: u32 = 3;
const IDENTITY_PENALTY: u32 = 10;

/// Power-of-ten factors recognised as a unit mix-up, in either direction.
const UNIT_SCALE_FACTORS: [f64; 4] = [10.0, 100.0, 1_000.0, 10_000.0];
const UNIT_SCALE_TOLERANCE: f64 = 0.10;

const SCOPE_ACCEPTABLE_DIFF: f64 = 0.05;
const SCOPE_MINOR_DIFF: f64 = 0.20;
const ECONOMY_ACCEPTABLE_DIFF: f64 = 0.10;
const ECONOMY_MAJOR_DIFF: f64 = 0.20;

/// Slack for threshold comparisons, so decimal inputs such as 1.2 vs 1.0 land
/// on the boundary they describe.
const BOUNDARY_EPSILON: f64 = 1e-9;

/// Realignment is reported when another period pair beats the baseline by more than this.
const REALIGNMENT_MARGIN: u32 = 2;

/// Errors found so far and the points they cost.
#[derive(Debug, Default)]
struct Scorecard {
    errors: BTreeSet<ErrorCategory>,
    penalty: u32,
}

impl Scorecard {
    /// Records a category. Points are only charged the first time a category is seen.
    fn flag(&mut self, category: ErrorCategory, points: u32) {
        if self.errors.insert(category) {
            self.penalty += points;
        }
    }

    fn correctness(&self) -> u8 {
        100u32.saturating_sub(self.penalty) as u8
    }
}

/// Categories charged for one numeric field.
#[derive(Debug, Clone, Copy)]
struct FieldCategories {
    missing: ErrorCategory,
    minor: ErrorCategory,
    major: ErrorCategory,
}

const SCOPE_CATEGORIES: [FieldCategories; 3] = [
    FieldCategories {
        missing: ErrorCategory::MissingScope1,
        minor: ErrorCategory::Scope1MinorError,
        major: ErrorCategory::Scope1MajorError,
    },
    FieldCategories {
        missing: ErrorCategory::MissingScope2,
        minor: ErrorCategory::Scope2MinorError,
        major: ErrorCategory::Scope2MajorError,
    },
    FieldCategories {
        missing: ErrorCategory::MissingScope3,
        minor: ErrorCategory::Scope3MinorError,
        major: ErrorCategory::Scope3MajorError,
    },
];

const REVENUE_CATEGORIES: FieldCategories = FieldCategories {
    missing: ErrorCategory::MissingRevenue,
    minor: ErrorCategory::RevenueMinorError,
    major: ErrorCategory::RevenueMajorError,
};

const EMPLOYEE_CATEGORIES: FieldCategories = FieldCategories {
    missing: ErrorCategory::MissingEmployees,
    minor: ErrorCategory::EmployeesMinorError,
    major: ErrorCategory::EmployeesMajorError,
};

fn scopes(sheet: &FactSheet) -> [Option<f64>; 3] {
    [sheet.scope1, sheet.scope2, sheet.scope3]
}

/// `|stage - prod| / |prod|`. A zero production value against a nonzero
/// staging value is an infinite difference.
pub fn relative_difference(stage: f64, prod: f64) -> f64 {
    if prod == 0.0 {
        if stage == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        (stage - prod).abs() / prod.abs()
    }
}

/// `diff > limit`, with exact boundary values counting as equal to the limit.
fn exceeds(diff: f64, limit: f64) -> bool {
    diff > limit + BOUNDARY_EPSILON
}

/// `diff < limit`, with exact boundary values counting as equal to the limit.
fn below(diff: f64, limit: f64) -> bool {
    diff < limit - BOUNDARY_EPSILON
}

/// Ratio stage/prod, only defined when both values are nonzero.
fn scale_ratio(stage: f64, prod: f64) -> Option<f64> {
    if stage == 0.0 || prod == 0.0 {
        return None;
    }
    let ratio = (stage / prod).abs();
    ratio.is_finite().then_some(ratio)
}

/// True when the ratio lies within ±10% of 10, 100, 1000 or 10000 (or their reciprocals).
pub fn is_unit_scale(ratio: f64) -> bool {
    let ratio = ratio.abs();
    UNIT_SCALE_FACTORS.iter().any(|factor| {
        let within = |target: f64| (ratio - target).abs() <= target * UNIT_SCALE_TOLERANCE;
        within(*factor) || within(1.0 / factor)
    })
}

/// A single root cause for all scopes: at least two scope ratios, all of them unit scales.
fn has_consistent_unit_scale(stage: &FactSheet, prod: &FactSheet) -> bool {
    let ratios: Vec<f64> = scopes(stage)
        .into_iter()
        .zip(scopes(prod))
        .filter_map(|pair| match pair {
            (Some(s), Some(p)) => scale_ratio(s, p),
            _ => None,
        })
        .collect();

    ratios.len() >= 2 && ratios.iter().all(|ratio| is_unit_scale(*ratio))
}

fn compare_currency(card: &mut Scorecard, stage: Option<&str>, prod: Option<&str>) {
    match (stage, prod) {
        (Some(s), Some(p)) if s == p => {}
        (None, Some(_)) => card.flag(ErrorCategory::CurrencyError, MISSING_PENALTY),
        (_, None) => {}
        (Some(_), Some(_)) => card.flag(ErrorCategory::CurrencyError, CURRENCY_MISMATCH_PENALTY),
    }
}

/// Returns whether numeric fields may be compared.
fn compare_year(card: &mut Scorecard, stage: Option<i32>, prod: Option<i32>) -> bool {
    match (stage, prod) {
        (Some(s), Some(p)) if s == p => true,
        (None, Some(_)) => {
            card.flag(ErrorCategory::MissingYear, MISSING_PENALTY);
            true
        }
        (_, None) => true,
        (Some(_), Some(_)) => {
            card.flag(ErrorCategory::YearMismatch, YEAR_MISMATCH_PENALTY);
            false
        }
    }
}

fn compare_scope(
    card: &mut Scorecard,
    categories: FieldCategories,
    stage: Option<f64>,
    prod: Option<f64>,
) {
    match (stage, prod) {
        (Some(s), Some(p)) if s == p => {}
        (None, Some(_)) => card.flag(categories.missing, MISSING_PENALTY),
        (_, None) => {}
        (Some(s), Some(p)) => {
            if scale_ratio(s, p).is_some_and(is_unit_scale) {
                card.flag(ErrorCategory::UnitError, UNIT_ERROR_PENALTY);
                return;
            }
            let diff = relative_difference(s, p);
            if exceeds(diff, SCOPE_MINOR_DIFF) {
                card.flag(categories.major, MAJOR_PENALTY);
            } else if exceeds(diff, SCOPE_ACCEPTABLE_DIFF) {
                card.flag(categories.minor, MINOR_PENALTY);
            }
        }
    }
}

/// Revenue and employees: up to 10% drift is fine, 20% and above is major
/// unless it looks like a unit-scale mix-up.
fn compare_economic_field(
    card: &mut Scorecard,
    categories: FieldCategories,
    stage: Option<f64>,
    prod: Option<f64>,
) {
    match (stage, prod) {
        (Some(s), Some(p)) if s == p => {}
        (None, Some(_)) => card.flag(categories.missing, MISSING_PENALTY),
        (_, None) => {}
        (Some(s), Some(p)) => {
            let diff = relative_difference(s, p);
            if !exceeds(diff, ECONOMY_ACCEPTABLE_DIFF) {
                return;
            }
            if below(diff, ECONOMY_MAJOR_DIFF) {
                card.flag(categories.minor, MINOR_PENALTY);
            } else if scale_ratio(s, p).is_some_and(is_unit_scale) {
                card.flag(ErrorCategory::UnitError, UNIT_ERROR_PENALTY);
            } else {
                card.flag(categories.major, MAJOR_PENALTY);
            }
        }
    }
}

/// How well two periods agree on their scopes: 3 points per scope within 5%,
/// 1 point within 20%.
pub fn match_score(stage: &FactSheet, prod: &FactSheet) -> u32 {
    scopes(stage)
        .into_iter()
        .zip(scopes(prod))
        .map(|pair| match pair {
            (Some(s), Some(p)) => {
                let diff = relative_difference(s, p);
                if below(diff, SCOPE_ACCEPTABLE_DIFF) {
                    3
                } else if below(diff, SCOPE_MINOR_DIFF) {
                    1
                } else {
                    0
                }
            }
            _ => 0,
        })
        .sum()
}

fn different_years(a: Option<i32>, b: Option<i32>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x != y)
}

/// Looks for "right data, wrong year label": some other pair of periods, filed
/// under different years, agrees clearly better than the pair actually compared.
pub fn detect_fiscal_year_shift(stage: &CompanyRecord, prod: &CompanyRecord) -> bool {
    let stage_periods = data_bearing_periods(stage);
    let prod_periods = data_bearing_periods(prod);

    if stage_periods.is_empty() || prod_periods.is_empty() {
        return false;
    }
    if stage_periods.len() < 2 && prod_periods.len() < 2 {
        return false;
    }

    let (Some(stage_latest), Some(prod_latest)) = (
        latest_position(&stage_periods),
        latest_position(&prod_periods),
    ) else {
        return false;
    };

    let stage_sheets: Vec<FactSheet> = stage_periods
        .iter()
        .map(|p| FactSheet::from_period(p))
        .collect();
    let prod_sheets: Vec<FactSheet> = prod_periods
        .iter()
        .map(|p| FactSheet::from_period(p))
        .collect();

    let selected = (stage_latest, prod_latest);
    let selected_score = match_score(&stage_sheets[stage_latest], &prod_sheets[prod_latest]);

    let best_shifted = (0..stage_sheets.len())
        .flat_map(|i| (0..prod_sheets.len()).map(move |j| (i, j)))
        .filter(|pair| *pair != selected)
        .filter(|&(i, j)| different_years(stage_sheets[i].year, prod_sheets[j].year))
        .map(|(i, j)| match_score(&stage_sheets[i], &prod_sheets[j]))
        .max()
        .unwrap_or(0);

    best_shifted > selected_score + REALIGNMENT_MARGIN
}

/// Compares a staging record with its production counterpart.
///
/// Never fails: missing or malformed data is reported through the result's
/// error categories.
pub fn compare_companies(stage: &CompanyRecord, prod: &CompanyRecord) -> ComparisonResult {
    let mut card = Scorecard::default();

    if stage.external_id != prod.external_id {
        tracing::warn!(
            "Comparing records with different ids: stage={} prod={}",
            stage.external_id,
            prod.external_id
        );
        card.flag(ErrorCategory::DataStructureError, IDENTITY_PENALTY);
    }

    let stage_sheet = normalize(stage);
    let prod_sheet = normalize(prod);

    compare_currency(
        &mut card,
        stage_sheet.currency.as_deref(),
        prod_sheet.currency.as_deref(),
    );

    let years_match = compare_year(&mut card, stage_sheet.year, prod_sheet.year);

    if years_match {
        if has_consistent_unit_scale(&stage_sheet, &prod_sheet) {
            card.flag(ErrorCategory::UnitError, UNIT_ERROR_PENALTY);
        } else {
            for ((categories, s), p) in SCOPE_CATEGORIES
                .into_iter()
                .zip(scopes(&stage_sheet))
                .zip(scopes(&prod_sheet))
            {
                compare_scope(&mut card, categories, s, p);
            }
        }

        compare_economic_field(
            &mut card,
            REVENUE_CATEGORIES,
            stage_sheet.revenue,
            prod_sheet.revenue,
        );
        compare_economic_field(
            &mut card,
            EMPLOYEE_CATEGORIES,
            stage_sheet.employees,
            prod_sheet.employees,
        );
    }

    if detect_fiscal_year_shift(stage, prod) {
        card.flag(ErrorCategory::WrongFiscalYear, WRONG_FISCAL_YEAR_PENALTY);
    }

    let correctness_percentage = card.correctness();
    tracing::debug!(
        "Compared {}: {}% correct, {} error categories",
        stage.external_id,
        correctness_percentage,
        card.errors.len()
    );

    ComparisonResult {
        company_id: stage.external_id.clone(),
        company_name: stage.name.clone(),
        correctness_percentage,
        field_details: FieldDetails::from_sheets(&stage_sheet, &prod_sheet),
        errors: card.errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Economy, Emissions, Employees, ReportingPeriod, Scope1, Scope2, Scope3, Turnover,
    };

    #[derive(Default, Clone)]
    struct Figures {
        scope1: Option<f64>,
        scope2: Option<f64>,
        scope3: Option<f64>,
        revenue: Option<f64>,
        currency: Option<&'static str>,
        employees: Option<f64>,
    }

    fn period(year: i32, figures: Figures) -> ReportingPeriod {
        ReportingPeriod {
            start_date: Some(format!("{}-01-01", year)),
            end_date: Some(format!("{}-12-31", year)),
            emissions: Some(Emissions {
                scope1: Some(Scope1 {
                    total: figures.scope1,
                    unit: Some("tCO2e".to_string()),
                }),
                scope2: Some(Scope2 {
                    mb: figures.scope2,
                    ..Default::default()
                }),
                scope3: Some(Scope3 {
                    calculated_total_emissions: figures.scope3,
                }),
            }),
            economy: Some(Economy {
                turnover: Some(Turnover {
                    value: figures.revenue,
                    currency: figures.currency.map(str::to_string),
                }),
                employees: Some(Employees {
                    value: figures.employees,
                    unit: None,
                }),
            }),
        }
    }

    fn company(periods: Vec<ReportingPeriod>) -> CompanyRecord {
        CompanyRecord {
            external_id: "Q123".to_string(),
            name: "Acme AB".to_string(),
            reporting_periods: periods,
        }
    }

    fn baseline() -> Figures {
        Figures {
            scope1: Some(15_000.0),
            scope2: Some(8_000.0),
            scope3: Some(45_000.0),
            revenue: Some(5_000_000.0),
            currency: Some("SEK"),
            employees: Some(250.0),
        }
    }

    fn compare(stage: Figures, prod: Figures) -> ComparisonResult {
        compare_companies(
            &company(vec![period(2023, stage)]),
            &company(vec![period(2023, prod)]),
        )
    }

    #[test]
    fn test_identical_records_are_fully_correct() {
        let result = compare(baseline(), baseline());
        assert_eq!(result.correctness_percentage, 100);
        assert!(result.errors.is_empty());
        assert_eq!(result.company_id, "Q123");
        assert_eq!(result.company_name, "Acme AB");
    }

    #[test]
    fn test_identity_mismatch_is_reported_not_raised() {
        let stage = company(vec![period(2023, baseline())]);
        let mut prod = stage.clone();
        prod.external_id = "Q999".to_string();

        let result = compare_companies(&stage, &prod);
        assert!(result.has_error(ErrorCategory::DataStructureError));
        assert_eq!(result.correctness_percentage, 90);
    }

    #[test]
    fn test_currency_rules() {
        let mut stage = baseline();
        stage.currency = None;
        let result = compare(stage, baseline());
        assert!(result.has_error(ErrorCategory::CurrencyError));
        assert_eq!(result.correctness_percentage, 99);

        let mut prod = baseline();
        prod.currency = None;
        let result = compare(baseline(), prod);
        assert!(!result.has_error(ErrorCategory::CurrencyError));

        let mut prod = baseline();
        prod.currency = Some("EUR");
        let result = compare(baseline(), prod);
        assert!(result.has_error(ErrorCategory::CurrencyError));
        assert_eq!(result.correctness_percentage, 98);
    }

    #[test]
    fn test_missing_year_still_compares_numbers() {
        let mut stage_period = period(2023, baseline());
        stage_period.start_date = None;
        let mut prod_figures = baseline();
        prod_figures.scope1 = Some(30_000.0);

        let result = compare_companies(
            &company(vec![stage_period]),
            &company(vec![period(2023, prod_figures)]),
        );
        assert!(result.has_error(ErrorCategory::MissingYear));
        assert!(result.has_error(ErrorCategory::Scope1MajorError));
        assert_eq!(result.correctness_percentage, 94);
    }

    #[test]
    fn test_year_mismatch_skips_numeric_fields() {
        let mut prod = baseline();
        prod.scope1 = Some(1.0);
        prod.revenue = Some(1.0);
        let result = compare_companies(
            &company(vec![period(2022, baseline())]),
            &company(vec![period(2023, prod)]),
        );

        assert_eq!(
            result.errors.iter().copied().collect::<Vec<_>>(),
            vec![ErrorCategory::YearMismatch]
        );
        assert_eq!(result.correctness_percentage, 95);
    }

    #[test]
    fn test_consistent_unit_scale_collapses_to_one_error() {
        let stage = baseline();
        let prod = Figures {
            scope1: Some(15_000_000.0),
            scope2: Some(8_000_000.0),
            scope3: Some(45_000_000.0),
            ..baseline()
        };

        let result = compare(stage, prod);
        assert_eq!(
            result.errors.iter().copied().collect::<Vec<_>>(),
            vec![ErrorCategory::UnitError]
        );
        assert_eq!(result.correctness_percentage, 98);
    }

    #[test]
    fn test_single_scope_unit_error() {
        let prod = Figures {
            scope1: Some(150.0),
            ..baseline()
        };
        let result = compare(baseline(), prod);
        assert!(result.has_error(ErrorCategory::UnitError));
        assert!(!result.has_error(ErrorCategory::Scope1MajorError));
        assert_eq!(result.correctness_percentage, 98);
    }

    #[test]
    fn test_unit_error_charged_once() {
        let prod = Figures {
            scope1: Some(150.0),
            scope2: Some(9_000.0),
            revenue: Some(500_000.0),
            ..baseline()
        };
        // scope1 (x100) and revenue (x10) both hit the unit rule, scope2 only 12.5% off.
        let result = compare(baseline(), prod);
        assert!(result.has_error(ErrorCategory::UnitError));
        assert!(result.has_error(ErrorCategory::Scope2MinorError));
        assert!(!result.has_error(ErrorCategory::RevenueMajorError));
        assert_eq!(result.correctness_percentage, 96);
    }

    #[test]
    fn test_scope_thresholds() {
        // Production scope 1 is 15000: 4%, 10%, exactly 20%, 30% drift.
        let cases = [
            (15_600.0, None),
            (16_500.0, Some(ErrorCategory::Scope1MinorError)),
            (18_000.0, Some(ErrorCategory::Scope1MinorError)),
            (19_500.0, Some(ErrorCategory::Scope1MajorError)),
        ];

        for (stage_value, expected) in cases {
            let stage = Figures {
                scope1: Some(stage_value),
                ..baseline()
            };
            let result = compare(stage, baseline());
            let scope1_errors: Vec<_> = result
                .errors
                .iter()
                .copied()
                .filter(|c| c.id().starts_with("scope1"))
                .collect();
            assert_eq!(scope1_errors, expected.into_iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_missing_scope_asymmetry() {
        let stage = Figures {
            scope3: None,
            ..baseline()
        };
        let result = compare(stage.clone(), baseline());
        assert!(result.has_error(ErrorCategory::MissingScope3));
        assert_eq!(result.correctness_percentage, 99);

        let result = compare(baseline(), stage);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_zero_production_scope_is_major() {
        let prod = Figures {
            scope2: Some(0.0),
            ..baseline()
        };
        let result = compare(baseline(), prod);
        assert!(result.has_error(ErrorCategory::Scope2MajorError));

        let both_zero = Figures {
            scope2: Some(0.0),
            ..baseline()
        };
        assert!(compare(both_zero.clone(), both_zero).errors.is_empty());
    }

    #[test]
    fn test_revenue_boundaries() {
        let at = |stage: f64| {
            compare(
                Figures {
                    revenue: Some(stage),
                    ..baseline()
                },
                Figures {
                    revenue: Some(1_000.0),
                    ..baseline()
                },
            )
        };

        assert!(at(1_100.0).errors.is_empty());
        assert!(at(900.0).errors.is_empty());
        assert!(at(1_150.0).has_error(ErrorCategory::RevenueMinorError));

        let twenty = at(1_200.0);
        assert!(twenty.has_error(ErrorCategory::RevenueMajorError));
        assert!(!twenty.has_error(ErrorCategory::RevenueMinorError));
    }

    #[test]
    fn test_decimal_boundaries() {
        let revenue = |stage: f64| {
            compare(
                Figures {
                    revenue: Some(stage),
                    ..baseline()
                },
                Figures {
                    revenue: Some(1.0),
                    ..baseline()
                },
            )
        };
        assert!(revenue(1.1).errors.is_empty());
        assert_eq!(
            revenue(1.2).errors.iter().copied().collect::<Vec<_>>(),
            vec![ErrorCategory::RevenueMajorError]
        );

        let scope1 = |stage: f64| {
            compare(
                Figures {
                    scope1: Some(stage),
                    ..baseline()
                },
                Figures {
                    scope1: Some(1.0),
                    ..baseline()
                },
            )
        };
        assert!(scope1(1.05).errors.is_empty());
        assert_eq!(
            scope1(1.2).errors.iter().copied().collect::<Vec<_>>(),
            vec![ErrorCategory::Scope1MinorError]
        );
    }

    #[test]
    fn test_match_score_decimal_boundaries() {
        let sheet = |value: f64| FactSheet {
            scope1: Some(value),
            ..Default::default()
        };
        // Exactly 5% is no longer a close match; exactly 20% is no match.
        assert_eq!(match_score(&sheet(1.05), &sheet(1.0)), 1);
        assert_eq!(match_score(&sheet(1.2), &sheet(1.0)), 0);
        assert_eq!(match_score(&sheet(1.04), &sheet(1.0)), 3);
    }

    #[test]
    fn test_employee_rules() {
        let stage = Figures {
            employees: None,
            ..baseline()
        };
        assert!(compare(stage, baseline()).has_error(ErrorCategory::MissingEmployees));

        let stage = Figures {
            employees: Some(290.0),
            ..baseline()
        };
        assert!(compare(stage, baseline()).has_error(ErrorCategory::EmployeesMinorError));

        let stage = Figures {
            employees: Some(400.0),
            ..baseline()
        };
        assert!(compare(stage, baseline()).has_error(ErrorCategory::EmployeesMajorError));
    }

    #[test]
    fn test_fiscal_year_shift_detected() {
        let shifted = baseline();
        let stale = Figures {
            scope1: Some(9_000.0),
            scope2: Some(3_000.0),
            scope3: Some(20_000.0),
            ..baseline()
        };
        // Latest staging period carries economy data only; its emissions sit under 2022.
        let economy_only = Figures {
            scope1: None,
            scope2: None,
            scope3: None,
            ..baseline()
        };

        let stage = company(vec![period(2023, economy_only), period(2022, shifted.clone())]);
        let prod = company(vec![period(2023, shifted), period(2022, stale)]);

        let result = compare_companies(&stage, &prod);
        assert!(result.has_error(ErrorCategory::WrongFiscalYear));
        assert!(!result.has_error(ErrorCategory::YearMismatch));
        assert!(result.has_error(ErrorCategory::MissingScope1));
        assert_eq!(result.correctness_percentage, 94);
    }

    #[test]
    fn test_selected_pair_is_not_its_own_realignment() {
        let figures = Figures {
            scope1: Some(100.0),
            scope2: Some(200.0),
            scope3: Some(300.0),
            ..baseline()
        };
        let unrelated = Figures {
            scope1: Some(1.0),
            scope2: Some(2.0),
            scope3: Some(3.0),
            ..baseline()
        };
        let prod = company(vec![period(2024, figures.clone())]);

        let alone = compare_companies(&company(vec![period(2023, figures.clone())]), &prod);
        let with_history = compare_companies(
            &company(vec![period(2023, figures), period(2022, unrelated)]),
            &prod,
        );

        for result in [alone, with_history] {
            assert_eq!(
                result.errors.iter().copied().collect::<Vec<_>>(),
                vec![ErrorCategory::YearMismatch]
            );
        }
    }

    #[test]
    fn test_consistent_history_is_not_a_fiscal_shift() {
        let older = Figures {
            scope1: Some(12_000.0),
            scope2: Some(6_000.0),
            scope3: Some(30_000.0),
            ..baseline()
        };
        let periods = vec![period(2022, older), period(2023, baseline())];

        let result = compare_companies(&company(periods.clone()), &company(periods));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_match_score() {
        let a = FactSheet {
            scope1: Some(100.0),
            scope2: Some(100.0),
            scope3: Some(100.0),
            ..Default::default()
        };
        let b = FactSheet {
            scope1: Some(102.0),
            scope2: Some(110.0),
            scope3: None,
            ..Default::default()
        };
        assert_eq!(match_score(&a, &a), 9);
        assert_eq!(match_score(&b, &a), 4);
    }

    #[test]
    fn test_is_unit_scale() {
        assert!(is_unit_scale(1_000.0));
        assert!(is_unit_scale(0.001));
        assert!(is_unit_scale(105.0));
        assert!(is_unit_scale(9.2));
        assert!(!is_unit_scale(1.0));
        assert!(!is_unit_scale(50.0));
        assert!(!is_unit_scale(1_200.0));
    }
}
