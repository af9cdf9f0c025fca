//! Category filter and section visibility for day lists.
//!
//! Filtering only decides which sections are shown; the agenda is never
//! modified.

use crate::model::agenda::DayAgenda;

/// Category chosen in the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    NoFilters,
    OnlyProjects,
    OnlyLessons,
    OnlyHomeTasks,
}

impl CategoryFilter {
    pub const ALL: [CategoryFilter; 4] = [
        CategoryFilter::NoFilters,
        CategoryFilter::OnlyProjects,
        CategoryFilter::OnlyLessons,
        CategoryFilter::OnlyHomeTasks,
    ];

    /// Filter button key, e.g. `OnlyLessons`.
    pub fn key(self) -> &'static str {
        match self {
            Self::NoFilters => "NoFilters",
            Self::OnlyProjects => "OnlyProjects",
            Self::OnlyLessons => "OnlyLessons",
            Self::OnlyHomeTasks => "OnlyHomeTasks",
        }
    }

    /// Parses a filter button key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.key() == key.trim())
    }

    /// Text shown on the filter button.
    pub fn label(self) -> &'static str {
        match self {
            Self::NoFilters => "No filters",
            Self::OnlyProjects => "Only projects",
            Self::OnlyLessons => "Only lessons",
            Self::OnlyHomeTasks => "Only home tasks",
        }
    }

    pub fn shows_projects(self) -> bool {
        matches!(self, Self::NoFilters | Self::OnlyProjects)
    }

    pub fn shows_lessons(self) -> bool {
        matches!(self, Self::NoFilters | Self::OnlyLessons)
    }

    pub fn shows_home_tasks(self) -> bool {
        matches!(self, Self::NoFilters | Self::OnlyHomeTasks)
    }
}

/// Which day-list sections a renderer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionVisibility {
    pub projects: bool,
    pub lessons: bool,
    pub home_tasks: bool,
    /// The "nothing planned" placeholder; independent of the filter.
    pub empty_state: bool,
}

impl SectionVisibility {
    /// A section is shown when the filter allows it and it has entries.
    pub fn compute(agenda: &DayAgenda, filter: CategoryFilter) -> Self {
        Self {
            projects: filter.shows_projects() && !agenda.projects.is_empty(),
            lessons: filter.shows_lessons() && !agenda.lessons.is_empty(),
            home_tasks: filter.shows_home_tasks() && !agenda.home_tasks.is_empty(),
            empty_state: agenda.is_empty(),
        }
    }
}
