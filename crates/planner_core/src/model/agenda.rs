//! Per-day projection of the store.

use crate::model::home_task::HomeTask;
use crate::model::lesson::Lesson;
use crate::model::project::Project;
use chrono::NaiveDate;

/// Everything scheduled on one calendar day, in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAgenda {
    pub date: NaiveDate,
    pub projects: Vec<Project>,
    pub lessons: Vec<Lesson>,
    pub home_tasks: Vec<HomeTask>,
}

impl DayAgenda {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            projects: Vec::new(),
            lessons: Vec::new(),
            home_tasks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.lessons.is_empty() && self.home_tasks.is_empty()
    }

    pub fn total(&self) -> usize {
        self.projects.len() + self.lessons.len() + self.home_tasks.len()
    }
}
