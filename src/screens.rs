//! List state for each console screen: which predicates it offers and how
//! it is ordered.

use std::cmp::Ordering;

use crate::list::{FilterSet, ListState, Predicate};
use crate::models::{Activity, Job, Member, Payment, Prospect};

pub const SEARCH: &str = "search";
pub const STATUS: &str = "status";
pub const FIELD: &str = "field";

fn job_overview(job: &Job) -> Vec<&str> {
    vec![job.brief_overview.as_str()]
}

fn job_status(job: &Job) -> Vec<&str> {
    vec![job.status.as_str()]
}

fn job_field(job: &Job) -> Vec<&str> {
    vec![job.resolution_field.as_str()]
}

fn member_text(member: &Member) -> Vec<&str> {
    let mut fields = vec![
        member.first_name.as_str(),
        member.last_name.as_str(),
        member.email_address.as_str(),
    ];
    fields.extend(member.company_name.as_deref());
    fields
}

fn member_status(member: &Member) -> Vec<&str> {
    vec![member.status.as_str()]
}

fn payment_text(payment: &Payment) -> Vec<&str> {
    let mut fields = Vec::with_capacity(3);
    fields.extend(payment.member_name.as_deref());
    fields.extend(payment.job_description.as_deref());
    fields.extend(payment.notes.as_deref());
    fields
}

fn payment_category(payment: &Payment) -> Vec<&str> {
    vec![payment.category.as_str()]
}

fn prospect_text(prospect: &Prospect) -> Vec<&str> {
    let mut fields = vec![prospect.name.as_str()];
    fields.extend(prospect.state.as_deref());
    fields.extend(prospect.field.as_deref());
    fields
}

fn prospect_field(prospect: &Prospect) -> Vec<&str> {
    prospect.field.as_deref().into_iter().collect()
}

fn by_completed_jobs(a: &Member, b: &Member) -> Ordering {
    b.completed_jobs.cmp(&a.completed_jobs)
}

/// Job lists search the brief overview
pub fn jobs(page_size: usize) -> ListState<Job> {
    ListState::new(
        FilterSet::new()
            .with(Predicate::contains(SEARCH, job_overview))
            .with(Predicate::exact(STATUS, job_status))
            .with(Predicate::exact(FIELD, job_field)),
        page_size,
    )
}

pub fn members(page_size: usize) -> ListState<Member> {
    ListState::new(
        FilterSet::new()
            .with(Predicate::contains(SEARCH, member_text))
            .with(Predicate::exact(STATUS, member_status)),
        page_size,
    )
}

/// Members ordered by completed jobs, most first
pub fn leaderboard(page_size: usize) -> ListState<Member> {
    members(page_size).with_sort(by_completed_jobs)
}

pub fn payments(page_size: usize) -> ListState<Payment> {
    ListState::new(
        FilterSet::new()
            .with(Predicate::contains(SEARCH, payment_text))
            .with(Predicate::exact(FIELD, payment_category)),
        page_size,
    )
}

/// Prospect search spans name, state and field
pub fn prospects(page_size: usize) -> ListState<Prospect> {
    ListState::new(
        FilterSet::new()
            .with(Predicate::contains(SEARCH, prospect_text))
            .with(Predicate::exact(FIELD, prospect_field)),
        page_size,
    )
}

fn by_newest_job(a: &Activity, b: &Activity) -> Ordering {
    b.job_date.cmp(&a.job_date)
}

/// Finished jobs, newest first; no filters
pub fn recent_activity(page_size: usize) -> ListState<Activity> {
    ListState::new(FilterSet::new(), page_size).with_sort(by_newest_job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberStatus;

    fn member(id: u64, name: &str, completed: u32, status: MemberStatus) -> Member {
        Member {
            id,
            first_name: name.into(),
            last_name: "Doe".into(),
            email_address: format!("{}@example.com", name.to_lowercase()),
            company_name: None,
            address: None,
            phone_mobile: None,
            accredited_by: None,
            license_number: None,
            expertise: None,
            status,
            completed_jobs: completed,
        }
    }

    fn prospect(name: &str, state: &str, field: &str) -> Prospect {
        Prospect {
            id: name.into(),
            name: name.into(),
            email: Some(format!("{}@example.com", name.to_lowercase())),
            state: Some(state.into()),
            field: Some(field.into()),
            email_sent: false,
            message: None,
        }
    }

    #[test]
    fn test_leaderboard_orders_by_completed_jobs() {
        let mut list = leaderboard(10);
        list.replace(vec![
            member(1, "Ann", 2, MemberStatus::Active),
            member(2, "Ben", 9, MemberStatus::Active),
            member(3, "Cat", 2, MemberStatus::Active),
            member(4, "Dan", 5, MemberStatus::Inactive),
        ]);
        let ids: Vec<u64> = list.view().rows.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);

        list.set_filter(STATUS, Some("active"));
        let ids: Vec<u64> = list.view().rows.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_prospect_search_and_field() {
        let mut list = prospects(10);
        list.replace(vec![
            prospect("Alice", "NSW", "Mediation"),
            prospect("Bob", "WA", "Arbitration"),
            prospect("Carol", "Western NSW", "Litigation"),
        ]);

        list.set_filter(SEARCH, Some("nsw"));
        assert_eq!(list.view().rows.len(), 2);

        list.set_filter(FIELD, Some("litigation"));
        let view = list.view();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].name, "Carol");
    }
}
