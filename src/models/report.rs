use serde::Serialize;

/// One aggregated row of a payroll or project report.
///
/// `pay_rate` is a snapshot of the user's current rate at report time, not a
/// historical rate per entry.
#[derive(Debug, Clone, Serialize)]
pub struct PayrollRow {
    pub user_id: String,
    pub user_name: String,
    pub total_hours: f64,
    pub pay_rate: f64,
}

impl PayrollRow {
    pub fn gross_pay(&self) -> f64 {
        self.total_hours * self.pay_rate
    }
}
