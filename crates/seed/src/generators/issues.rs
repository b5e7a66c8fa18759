//! Issue batch generator.

use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Paragraph;
use rand::Rng;

use catwatch_core::{IssueLabel, IssueRecord, IssueStatus};

use super::pick;

/// Issues generated per batch.
pub const ISSUE_COUNT: usize = 50;

/// Generate [`ISSUE_COUNT`] issues with a random status, label, reporter
/// address and question paragraph.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Vec<IssueRecord> {
    (0..ISSUE_COUNT)
        .map(|_| IssueRecord {
            status: pick(rng, IssueStatus::ALL),
            label: pick(rng, IssueLabel::ALL),
            email: SafeEmail().fake_with_rng(rng),
            question: Paragraph(3..6).fake_with_rng(rng),
        })
        .collect()
}
