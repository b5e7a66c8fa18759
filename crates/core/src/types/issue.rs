//! Support issue records.

use serde::{Deserialize, Serialize};

use crate::define_text_enum;

define_text_enum! {
    /// Triage status of a support issue.
    IssueStatus {
        Unread => "unread",
        Open => "open",
        Contacted => "contacted",
        Closed => "closed",
    }
}

define_text_enum! {
    /// Topic the reporter picked for a support issue.
    IssueLabel {
        /// Cannot access the account.
        Login => "login",
        /// Sign up inquiry.
        Signup => "signup",
        /// Billing question.
        Billing => "billing",
        /// Email question.
        Email => "email",
        /// Feature request.
        Request => "request",
        Other => "other",
    }
}

/// A row of the `issues` table as written by the seeder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub status: IssueStatus,
    pub label: IssueLabel,
    /// Reporter email address.
    pub email: String,
    /// Free-text question body.
    pub question: String,
}
