use prettytable::{Cell, Row, Table, format};

use crate::list::{ListView, PageInfo};
use crate::models::{Activity, Job, Member, Payment, Prospect};

pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No records found";

const MAX_CELL_WIDTH: usize = 40;

/// Row rendering for a list item
pub trait Presentable {
    fn columns() -> &'static [&'static str];

    fn cells(&self) -> Vec<String>;

    /// Actions the current state allows; empty for read-only rows
    fn actions(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

/// The three mutually exclusive ways a list can be drawn
#[derive(Debug)]
pub enum Presentation<'a, T> {
    Loading,
    Empty,
    Populated { rows: Vec<&'a T>, page: PageInfo },
}

impl<'a, T> From<ListView<'a, T>> for Presentation<'a, T> {
    fn from(view: ListView<'a, T>) -> Self {
        if view.loading {
            Presentation::Loading
        } else if view.rows.is_empty() {
            Presentation::Empty
        } else {
            Presentation::Populated {
                rows: view.rows,
                page: view.page,
            }
        }
    }
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        return value.to_owned();
    }
    let mut out: String = value.chars().take(MAX_CELL_WIDTH - 3).collect();
    out.push_str("...");
    out
}

fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => truncate(v),
        _ => "-".to_owned(),
    }
}

pub fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table
}

/// Draws a list view. The actions column is added when `with_actions`
/// is set, and the page footer only when there is more than one page.
pub fn render<T: Presentable>(view: ListView<'_, T>, with_actions: bool) -> String {
    let (rows, page) = match Presentation::from(view) {
        Presentation::Loading => return LOADING_TEXT.to_owned(),
        Presentation::Empty => return EMPTY_TEXT.to_owned(),
        Presentation::Populated { rows, page } => (rows, page),
    };

    let mut table = new_table();
    let mut titles: Vec<Cell> = T::columns().iter().map(|c| Cell::new(c)).collect();
    if with_actions {
        titles.push(Cell::new("Actions"));
    }
    table.set_titles(Row::new(titles));

    for item in rows {
        let mut cells: Vec<Cell> = item.cells().iter().map(|c| Cell::new(c)).collect();
        if with_actions {
            let actions = item.actions();
            let text = if actions.is_empty() {
                "-".to_owned()
            } else {
                actions.join(" / ")
            };
            cells.push(Cell::new(&text));
        }
        table.add_row(Row::new(cells));
    }

    let mut out = table.to_string();
    if page.show_controls() {
        out.push_str(&footer(&page));
    }
    out
}

pub fn footer(page: &PageInfo) -> String {
    format!(
        "Page {} of {} ({} records)\n",
        page.page, page.total_pages, page.total_items
    )
}

/// Two-column label/value table for summaries
pub fn render_summary(entries: &[(&str, String)]) -> String {
    let mut table = new_table();
    for (label, value) in entries {
        table.add_row(Row::new(vec![Cell::new(label), Cell::new(value)]));
    }
    table.to_string()
}

impl Presentable for Job {
    fn columns() -> &'static [&'static str] {
        &[
            "ID",
            "Date",
            "Field",
            "Venue",
            "Duration",
            "Remuneration",
            "Status",
            "Overview",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.job_date.format("%d %b %Y").to_string(),
            self.resolution_field.to_string(),
            truncate(&self.venue),
            self.duration.as_str().to_owned(),
            money(self.remuneration),
            self.status.to_string(),
            or_dash(Some(&self.brief_overview)),
        ]
    }

    fn actions(&self) -> Vec<&'static str> {
        self.status
            .available_actions()
            .iter()
            .map(|a| a.as_str())
            .collect()
    }
}

impl Presentable for Member {
    fn columns() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Company", "Expertise", "Status", "Completed"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.display_name()),
            or_dash(Some(&self.email_address)),
            or_dash(self.company_name.as_deref()),
            or_dash(self.expertise.as_deref()),
            self.status.to_string(),
            self.completed_jobs.to_string(),
        ]
    }

    fn actions(&self) -> Vec<&'static str> {
        self.status
            .available_actions()
            .iter()
            .map(|a| a.as_str())
            .collect()
    }
}

impl Presentable for Payment {
    fn columns() -> &'static [&'static str] {
        &["ID", "Date", "Member", "Job", "Category", "Amount", "Notes"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.transaction_date.format("%d %b %Y").to_string(),
            or_dash(self.member_name.as_deref()),
            or_dash(self.job_description.as_deref()),
            self.category.to_string(),
            money(self.amount),
            or_dash(self.notes.as_deref()),
        ]
    }
}

impl Presentable for Prospect {
    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "State", "Field", "Emailed"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            truncate(&self.name),
            or_dash(self.normalized_email().as_deref()),
            or_dash(self.state.as_deref()),
            or_dash(self.field.as_deref()),
            if self.email_sent { "yes" } else { "no" }.to_owned(),
        ]
    }
}

impl Presentable for Activity {
    fn columns() -> &'static [&'static str] {
        &[
            "ID",
            "Date",
            "Field",
            "Venue",
            "Duration",
            "Remuneration",
            "Activity",
            "Overview",
        ]
    }

    fn cells(&self) -> Vec<String> {
        let overview = match self.brief_overview.trim() {
            "" => format!("Job {}", self.id),
            text => truncate(text),
        };
        vec![
            self.id.to_string(),
            self.job_date.format("%d %b %Y").to_string(),
            self.resolution_field.to_string(),
            or_dash(Some(&self.venue)),
            self.duration.as_str().to_owned(),
            money(self.remuneration),
            self.activity_type.to_string(),
            overview,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::{FilterSet, ListState};
    use crate::models::{JobDuration, JobStatus, ResolutionField};
    use chrono::NaiveDate;

    fn job(id: u64, status: JobStatus) -> Job {
        Job {
            id,
            job_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            resolution_field: ResolutionField::Mediation,
            venue: "Perth".into(),
            duration: JobDuration::FullDay,
            remuneration: 1200.0,
            brief_overview: format!("Dispute {id}"),
            intake_details: String::new(),
            status,
            user_id: None,
            user_name: None,
            parties: vec![],
        }
    }

    #[test]
    fn test_loading_and_empty_states() {
        let mut list: ListState<Job> = ListState::new(FilterSet::new(), 10);
        list.begin_fetch();
        assert_eq!(render(list.view(), true), LOADING_TEXT);

        list.replace(vec![]);
        assert_eq!(render(list.view(), true), EMPTY_TEXT);
    }

    #[test]
    fn test_populated_table_shows_actions() {
        let mut list = ListState::new(FilterSet::new(), 10);
        list.replace(vec![job(1, JobStatus::Available), job(2, JobStatus::Booked)]);
        let out = render(list.view(), true);
        assert!(out.contains("Actions"));
        assert!(out.contains("book"));
        assert!(out.contains("complete / abort"));
        assert!(out.contains("$1200.00"));
        assert!(!out.contains("Page "));
    }

    #[test]
    fn test_footer_only_past_one_page() {
        let mut list = ListState::new(FilterSet::new(), 10);
        list.replace((1..=11).map(|i| job(i, JobStatus::Completed)).collect());
        let out = render(list.view(), false);
        assert!(out.contains("Page 1 of 2 (11 records)"));
        assert!(!out.contains("Actions"));

        list.replace((1..=10).map(|i| job(i, JobStatus::Completed)).collect());
        assert!(!render(list.view(), false).contains("Page "));
    }

    #[test]
    fn test_truncate_long_cells() {
        let long = "x".repeat(60);
        let cell = truncate(&long);
        assert_eq!(cell.chars().count(), MAX_CELL_WIDTH);
        assert!(cell.ends_with("..."));
        assert_eq!(or_dash(Some("  ")), "-");
    }

    #[test]
    fn test_activity_rows_name_untitled_jobs() {
        let activity = Activity {
            id: 12,
            brief_overview: " ".into(),
            job_date: NaiveDate::from_ymd_opt(2025, 4, 9).unwrap(),
            resolution_field: ResolutionField::Arbitration,
            venue: String::new(),
            duration: JobDuration::HalfDay,
            remuneration: 750.0,
            activity_type: JobStatus::Aborted,
        };
        let cells = activity.cells();
        assert_eq!(cells[3], "-");
        assert_eq!(cells[6], "Aborted");
        assert_eq!(cells[7], "Job 12");

        let mut list = crate::screens::recent_activity(10);
        list.replace(vec![activity]);
        let out = render(list.view(), false);
        assert!(out.contains("Activity"));
        assert!(out.contains("$750.00"));
    }
}
