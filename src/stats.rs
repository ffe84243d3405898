use chrono::{Datelike, NaiveDate};

use crate::models::{Member, MemberStatus, Payment};

/// Header counters of the payments screens
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaymentSummary {
    pub total_count: usize,
    pub total_amount: f64,
    pub month_count: usize,
    pub month_amount: f64,
}

impl PaymentSummary {
    /// "This month" is the calendar month of `today`
    pub fn from_payments<'a>(payments: impl IntoIterator<Item = &'a Payment>, today: NaiveDate) -> Self {
        payments
            .into_iter()
            .fold(Self::default(), |mut summary, payment| {
                summary.total_count += 1;
                summary.total_amount += payment.amount;
                let date = payment.transaction_date;
                if date.year() == today.year() && date.month() == today.month() {
                    summary.month_count += 1;
                    summary.month_amount += payment.amount;
                }
                summary
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberCounts {
    pub total: usize,
    pub inactive: usize,
    pub active: usize,
    pub rejected: usize,
}

impl MemberCounts {
    pub fn from_members<'a>(members: impl IntoIterator<Item = &'a Member>) -> Self {
        members
            .into_iter()
            .fold(Self::default(), |mut counts, member| {
                counts.total += 1;
                match member.status {
                    MemberStatus::Inactive => counts.inactive += 1,
                    MemberStatus::Active => counts.active += 1,
                    MemberStatus::Reject => counts.rejected += 1,
                }
                counts
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResolutionField;

    fn payment(id: u64, amount: f64, date: &str) -> Payment {
        Payment {
            id,
            user_id: 1,
            member_name: None,
            member_email: None,
            job_id: id,
            job_description: None,
            category: ResolutionField::Mediation,
            amount,
            transaction_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            notes: None,
        }
    }

    #[test]
    fn test_payment_summary_splits_current_month() {
        let payments = vec![
            payment(1, 100.0, "2025-06-03"),
            payment(2, 250.5, "2025-06-28"),
            payment(3, 400.0, "2025-05-30"),
            payment(4, 50.0, "2024-06-10"),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let summary = PaymentSummary::from_payments(&payments, today);
        assert_eq!(summary.total_count, 4);
        assert_eq!(summary.total_amount, 800.5);
        assert_eq!(summary.month_count, 2);
        assert_eq!(summary.month_amount, 350.5);
    }

    #[test]
    fn test_empty_summary() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert_eq!(PaymentSummary::from_payments(&[], today), PaymentSummary::default());
    }
}
