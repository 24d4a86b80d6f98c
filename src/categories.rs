use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Closed vocabulary of data quality problems a comparison can report.
///
/// Serializes as its snake_case identifier (e.g. `"scope1_major_error"`), which is
/// also the key used in aggregated distributions and histogram buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The paired records do not share the same external identifier.
    DataStructureError,
    /// Currency is missing in staging or differs from production.
    CurrencyError,
    /// Staging lacks the reporting year production has.
    MissingYear,
    /// Both sides report different years.
    YearMismatch,
    /// Data matches a differently labelled reporting year on the other side.
    WrongFiscalYear,
    /// Values differ by a power of ten (e.g. kg vs tonnes).
    UnitError,
    MissingScope1,
    Scope1MajorError,
    Scope1MinorError,
    MissingScope2,
    Scope2MajorError,
    Scope2MinorError,
    MissingScope3,
    Scope3MajorError,
    Scope3MinorError,
    MissingRevenue,
    RevenueMajorError,
    RevenueMinorError,
    MissingEmployees,
    EmployeesMajorError,
    EmployeesMinorError,
}

impl ErrorCategory {
    /// Every category, in presentation order.
    pub const ALL: [ErrorCategory; 21] = [
        ErrorCategory::DataStructureError,
        ErrorCategory::CurrencyError,
        ErrorCategory::MissingYear,
        ErrorCategory::YearMismatch,
        ErrorCategory::WrongFiscalYear,
        ErrorCategory::UnitError,
        ErrorCategory::MissingScope1,
        ErrorCategory::Scope1MajorError,
        ErrorCategory::Scope1MinorError,
        ErrorCategory::MissingScope2,
        ErrorCategory::Scope2MajorError,
        ErrorCategory::Scope2MinorError,
        ErrorCategory::MissingScope3,
        ErrorCategory::Scope3MajorError,
        ErrorCategory::Scope3MinorError,
        ErrorCategory::MissingRevenue,
        ErrorCategory::RevenueMajorError,
        ErrorCategory::RevenueMinorError,
        ErrorCategory::MissingEmployees,
        ErrorCategory::EmployeesMajorError,
        ErrorCategory::EmployeesMinorError,
    ];

    /// Stable identifier, identical to the serialized form.
    pub fn id(self) -> &'static str {
        match self {
            ErrorCategory::DataStructureError => "data_structure_error",
            ErrorCategory::CurrencyError => "currency_error",
            ErrorCategory::MissingYear => "missing_year",
            ErrorCategory::YearMismatch => "year_mismatch",
            ErrorCategory::WrongFiscalYear => "wrong_fiscal_year",
            ErrorCategory::UnitError => "unit_error",
            ErrorCategory::MissingScope1 => "missing_scope1",
            ErrorCategory::Scope1MajorError => "scope1_major_error",
            ErrorCategory::Scope1MinorError => "scope1_minor_error",
            ErrorCategory::MissingScope2 => "missing_scope2",
            ErrorCategory::Scope2MajorError => "scope2_major_error",
            ErrorCategory::Scope2MinorError => "scope2_minor_error",
            ErrorCategory::MissingScope3 => "missing_scope3",
            ErrorCategory::Scope3MajorError => "scope3_major_error",
            ErrorCategory::Scope3MinorError => "scope3_minor_error",
            ErrorCategory::MissingRevenue => "missing_revenue",
            ErrorCategory::RevenueMajorError => "revenue_major_error",
            ErrorCategory::RevenueMinorError => "revenue_minor_error",
            ErrorCategory::MissingEmployees => "missing_employees",
            ErrorCategory::EmployeesMajorError => "employees_major_error",
            ErrorCategory::EmployeesMinorError => "employees_minor_error",
        }
    }

    /// Human readable description shown next to the category.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCategory::DataStructureError => "Records paired with different identifiers",
            ErrorCategory::CurrencyError => "Wrong or missing currency",
            ErrorCategory::MissingYear => "Missing reporting year",
            ErrorCategory::YearMismatch => "Reporting year differs",
            ErrorCategory::WrongFiscalYear => "Data filed under the wrong fiscal year",
            ErrorCategory::UnitError => "Wrong unit (power-of-ten scale)",
            ErrorCategory::MissingScope1 => "Missing scope 1 emissions",
            ErrorCategory::Scope1MajorError => "Scope 1 emissions differ by more than 20%",
            ErrorCategory::Scope1MinorError => "Scope 1 emissions differ by 5-20%",
            ErrorCategory::MissingScope2 => "Missing scope 2 emissions",
            ErrorCategory::Scope2MajorError => "Scope 2 emissions differ by more than 20%",
            ErrorCategory::Scope2MinorError => "Scope 2 emissions differ by 5-20%",
            ErrorCategory::MissingScope3 => "Missing scope 3 emissions",
            ErrorCategory::Scope3MajorError => "Scope 3 emissions differ by more than 20%",
            ErrorCategory::Scope3MinorError => "Scope 3 emissions differ by 5-20%",
            ErrorCategory::MissingRevenue => "Missing revenue",
            ErrorCategory::RevenueMajorError => "Revenue differs by 20% or more",
            ErrorCategory::RevenueMinorError => "Revenue differs by 10-20%",
            ErrorCategory::MissingEmployees => "Missing employee count",
            ErrorCategory::EmployeesMajorError => "Employee count differs by 20% or more",
            ErrorCategory::EmployeesMinorError => "Employee count differs by 10-20%",
        }
    }

    /// Presentation color (hex). Carried for dashboard consumers only.
    pub fn color(self) -> &'static str {
        match self {
            ErrorCategory::DataStructureError => "#991b1b",
            ErrorCategory::CurrencyError => "#22c55e",
            ErrorCategory::MissingYear => "#a855f7",
            ErrorCategory::YearMismatch => "#7c3aed",
            ErrorCategory::WrongFiscalYear => "#c026d3",
            ErrorCategory::UnitError => "#3b82f6",
            ErrorCategory::MissingScope1 => "#fca5a5",
            ErrorCategory::Scope1MajorError => "#ef4444",
            ErrorCategory::Scope1MinorError => "#f87171",
            ErrorCategory::MissingScope2 => "#fdba74",
            ErrorCategory::Scope2MajorError => "#f97316",
            ErrorCategory::Scope2MinorError => "#fb923c",
            ErrorCategory::MissingScope3 => "#fde047",
            ErrorCategory::Scope3MajorError => "#eab308",
            ErrorCategory::Scope3MinorError => "#facc15",
            ErrorCategory::MissingRevenue => "#ec4899",
            ErrorCategory::RevenueMajorError => "#be185d",
            ErrorCategory::RevenueMinorError => "#14b8a6",
            ErrorCategory::MissingEmployees => "#94a3b8",
            ErrorCategory::EmployeesMajorError => "#475569",
            ErrorCategory::EmployeesMinorError => "#6b7280",
        }
    }

    pub fn info(self) -> CategoryInfo {
        CategoryInfo {
            category: self,
            description: self.description(),
            color: self.color(),
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Expanded view of a category as exposed to API consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    #[serde(rename = "type")]
    pub category: ErrorCategory,
    pub description: &'static str,
    pub color: &'static str,
}

/// Serializes a category set as a list of `{type, description, color}` objects.
pub fn serialize_category_set<S>(
    categories: &BTreeSet<ErrorCategory>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(categories.iter().map(|c| c.info()))
}
