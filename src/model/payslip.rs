use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Salary bands run from level 1 to 19.
pub const MAX_SALARY_LEVEL: u8 = 19;

const TRANSPORT_ALLOWANCE: f64 = 1600.0;
const MEDICAL_REIMBURSEMENT: f64 = 1250.0;

/// A persisted payslip document. All derived figures are computed
/// server-side from the gross fixed pay; admins only enter the inputs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payslip {
    #[schema(example = 50000.0)]
    pub gross_fixed: f64,

    #[schema(example = 20000.0)]
    pub basic_salary: f64,

    #[schema(example = 8000.0)]
    pub hra: f64,

    #[schema(example = 1600.0)]
    pub transport_allowance: f64,

    #[schema(example = 1250.0)]
    pub medical_reimbursement: f64,

    #[schema(example = 19150.0)]
    pub fixed_allowance: f64,

    #[schema(example = 50000.0)]
    pub gross_salary: f64,

    #[schema(example = 5)]
    pub level: u8,

    #[schema(example = "30k to 35k")]
    pub salary_range: String,

    #[schema(example = "2026-03-02T09:00:00Z")]
    pub timestamp: String,
}

impl Payslip {
    /// Derives the salary components from the gross fixed pay:
    /// basic is 40% of gross, HRA is 40% of basic, transport and medical
    /// are flat figures, and the fixed allowance absorbs the remainder so
    /// the components sum back to the gross.
    pub fn derive(gross_fixed: f64, level: u8, created_at: DateTime<Utc>) -> Self {
        let basic_salary = round2(gross_fixed * 0.4);
        let hra = round2(basic_salary * 0.4);
        let fixed_allowance = round2(
            gross_fixed - (basic_salary + hra + TRANSPORT_ALLOWANCE + MEDICAL_REIMBURSEMENT),
        );
        let gross_salary = round2(
            basic_salary + hra + TRANSPORT_ALLOWANCE + MEDICAL_REIMBURSEMENT + fixed_allowance,
        );

        Self {
            gross_fixed,
            basic_salary,
            hra,
            transport_allowance: TRANSPORT_ALLOWANCE,
            medical_reimbursement: MEDICAL_REIMBURSEMENT,
            fixed_allowance,
            gross_salary,
            level,
            salary_range: salary_range_for_level(level),
            timestamp: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Maps a salary level (1..=19) to its display range, starting at 10k
/// for level 1 and stepping 5k per level.
pub fn salary_range_for_level(level: u8) -> String {
    let base = (u32::from(level) - 1) * 5000 + 10_000;
    format!("{}k to {}k", base, base + 5000)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
