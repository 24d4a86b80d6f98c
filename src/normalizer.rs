//! Reduces a company record to the flat fact sheet the comparator works on.
//!
//! Only the most recent data-bearing reporting period is used: staging and
//! production are expected to describe the same latest filing.

use crate::models::{CompanyRecord, FactSheet, ReportingPeriod};
use chrono::{DateTime, Datelike, NaiveDate};

/// Parses a period start date given as `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_start_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    // Timestamps without an offset, e.g. "2023-01-01T00:00:00"
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

fn start_date(period: &ReportingPeriod) -> Option<NaiveDate> {
    period.start_date.as_deref().and_then(parse_start_date)
}

/// A period is only worth comparing when it carries emissions or economy data.
pub fn is_data_bearing(period: &ReportingPeriod) -> bool {
    period.emissions.is_some() || period.economy.is_some()
}

/// Data-bearing periods of a record, in source order.
pub fn data_bearing_periods(record: &CompanyRecord) -> Vec<&ReportingPeriod> {
    record
        .reporting_periods
        .iter()
        .filter(|period| is_data_bearing(period))
        .collect()
}

/// Index of the most recent period. Ties keep the earlier entry; periods
/// without a readable start date sort before all dated ones.
pub fn latest_position(periods: &[&ReportingPeriod]) -> Option<usize> {
    let mut latest: Option<(usize, Option<NaiveDate>)> = None;
    for (index, period) in periods.iter().enumerate() {
        let date = start_date(period);
        match latest {
            Some((_, best)) if date <= best => {}
            _ => latest = Some((index, date)),
        }
    }
    latest.map(|(index, _)| index)
}

/// The period used for comparison, if any qualifies.
pub fn select_period(record: &CompanyRecord) -> Option<&ReportingPeriod> {
    let periods = data_bearing_periods(record);
    latest_position(&periods).map(|index| periods[index])
}

impl FactSheet {
    /// Flattens a single reporting period.
    pub fn from_period(period: &ReportingPeriod) -> Self {
        let emissions = period.emissions.as_ref();
        let economy = period.economy.as_ref();
        let turnover = economy.and_then(|e| e.turnover.as_ref());

        Self {
            scope1: emissions
                .and_then(|e| e.scope1.as_ref())
                .and_then(|s| s.total),
            scope2: emissions
                .and_then(|e| e.scope2.as_ref())
                .and_then(|s| s.calculated_total_emissions.or(s.mb)),
            scope3: emissions
                .and_then(|e| e.scope3.as_ref())
                .and_then(|s| s.calculated_total_emissions),
            currency: turnover.and_then(|t| t.currency.clone()),
            revenue: turnover.and_then(|t| t.value),
            employees: economy
                .and_then(|e| e.employees.as_ref())
                .and_then(|e| e.value),
            year: start_date(period).map(|date| date.year()),
        }
    }
}

/// Builds the fact sheet for a record; every field is absent when the
/// record has no data-bearing period.
pub fn normalize(record: &CompanyRecord) -> FactSheet {
    select_period(record)
        .map(FactSheet::from_period)
        .unwrap_or_default()
}
