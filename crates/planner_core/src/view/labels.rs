//! Display strings shared by list rows and detail screens.

use crate::model::project::Project;
use chrono::{NaiveDate, NaiveDateTime};

/// `May 01, 2024`.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// `14:30`.
pub fn time_label(moment: NaiveDateTime) -> String {
    moment.format("%H:%M").to_string()
}

/// `1/3 tasks`.
pub fn progress_label(project: &Project) -> String {
    format!("{}/{} tasks", project.completed_tasks(), project.total_tasks())
}
