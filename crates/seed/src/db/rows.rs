//! Column mappings for the seeded records.

use catwatch_core::{CouponRecord, IssueRecord, UserRecord};

use super::{ColumnValue, SeedRow};

fn text(value: impl Into<String>) -> ColumnValue {
    ColumnValue::Text(Some(value.into()))
}

impl SeedRow for UserRecord {
    const TABLE: &'static str = "users";
    const LABEL: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["role", "email", "password", "name"];

    fn values(&self) -> Vec<ColumnValue> {
        vec![
            text(self.role.as_str()),
            text(self.email.as_str()),
            text(self.password.as_str()),
            text(self.name.as_str()),
        ]
    }
}

impl SeedRow for IssueRecord {
    const TABLE: &'static str = "issues";
    const LABEL: &'static str = "issues";
    const COLUMNS: &'static [&'static str] = &["status", "label", "email", "question"];

    fn values(&self) -> Vec<ColumnValue> {
        vec![
            text(self.status.as_str()),
            text(self.label.as_str()),
            text(self.email.as_str()),
            text(self.question.as_str()),
        ]
    }
}

impl SeedRow for CouponRecord {
    const TABLE: &'static str = "coupons";
    const LABEL: &'static str = "coupons";
    const COLUMNS: &'static [&'static str] = &[
        "code",
        "duration",
        "percent_off",
        "amount_off",
        "currency",
        "redeem_by",
        "max_redemptions",
        "duration_in_months",
    ];

    fn values(&self) -> Vec<ColumnValue> {
        vec![
            text(self.code.as_str()),
            text(self.duration().as_str()),
            ColumnValue::Int(self.discount.percent_off()),
            ColumnValue::Int(self.discount.amount_off()),
            ColumnValue::Text(self.discount.currency().map(|c| c.as_str().to_string())),
            ColumnValue::Timestamp(self.redeem_by),
            ColumnValue::Int(self.max_redemptions),
            ColumnValue::Int(self.duration_in_months()),
        ]
    }
}
