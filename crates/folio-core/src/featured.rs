// Featured project selection
//
// Two policies exist and they are NOT interchangeable. Every call site picks
// one by name.
use crate::models::{ProjectRecord, ProjectType};

/// How to pick a bounded highlight subset of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Newest `completed_date` first, ties keep catalog order
    MostRecent(usize),
    /// Personal projects only, in catalog order
    PersonalFirst(usize),
}

impl SelectionPolicy {
    /// What the home page highlights
    pub const HOME: SelectionPolicy = SelectionPolicy::MostRecent(3);

    pub fn limit(&self) -> usize {
        match self {
            SelectionPolicy::MostRecent(n) | SelectionPolicy::PersonalFirst(n) => *n,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SelectionPolicy::MostRecent(_) => "most recent",
            SelectionPolicy::PersonalFirst(_) => "personal first",
        }
    }

    pub fn select<'a>(&self, projects: &'a [ProjectRecord]) -> Vec<&'a ProjectRecord> {
        match *self {
            SelectionPolicy::MostRecent(n) => most_recent(projects, n),
            SelectionPolicy::PersonalFirst(n) => personal_first(projects, n),
        }
    }
}

/// Sort by completion date descending and take `n`
///
/// `sort_by` is stable, which is what gives us the catalog-order tie-break.
pub fn most_recent(projects: &[ProjectRecord], n: usize) -> Vec<&ProjectRecord> {
    let mut sorted: Vec<&ProjectRecord> = projects.iter().collect();
    sorted.sort_by(|a, b| b.completed_date.cmp(&a.completed_date));
    sorted.truncate(n);
    sorted
}

/// First `n` personal projects, no sorting
pub fn personal_first(projects: &[ProjectRecord], n: usize) -> Vec<&ProjectRecord> {
    projects
        .iter()
        .filter(|p| p.project_type == ProjectType::Personal)
        .take(n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::project;

    fn ids(projects: &[&ProjectRecord]) -> Vec<u32> {
        projects.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_most_recent_ties_keep_catalog_order() {
        let catalog = vec![
            project(1, "Old", (2023, 1, 10)),
            project(2, "Tie A", (2024, 6, 1)),
            project(3, "Tie B", (2024, 6, 1)),
        ];
        assert_eq!(ids(&most_recent(&catalog, 2)), vec![2, 3]);
        assert_eq!(ids(&most_recent(&catalog, 10)), vec![2, 3, 1]);
    }

    #[test]
    fn test_most_recent_is_sorted_descending() {
        let catalog = vec![
            project(1, "A", (2022, 3, 1)),
            project(2, "B", (2025, 1, 1)),
            project(3, "C", (2023, 7, 1)),
            project(4, "D", (2024, 2, 1)),
        ];
        let picked = most_recent(&catalog, 3);
        assert_eq!(ids(&picked), vec![2, 4, 3]);
        assert!(picked
            .windows(2)
            .all(|w| w[0].completed_date >= w[1].completed_date));
    }

    #[test]
    fn test_personal_first_skips_academic() {
        let mut academic = project(1, "Course", (2025, 1, 1));
        academic.project_type = ProjectType::Academic;
        let catalog = vec![
            academic,
            project(2, "Mine", (2020, 1, 1)),
            project(3, "Also mine", (2021, 1, 1)),
            project(4, "Third", (2022, 1, 1)),
        ];
        assert_eq!(ids(&personal_first(&catalog, 2)), vec![2, 3]);
    }

    #[test]
    fn test_policies_disagree() {
        let mut academic = project(1, "Newest", (2025, 1, 1));
        academic.project_type = ProjectType::Academic;
        let catalog = vec![project(2, "Older", (2020, 1, 1)), academic];

        let recent = SelectionPolicy::MostRecent(1).select(&catalog);
        let personal = SelectionPolicy::PersonalFirst(1).select(&catalog);
        assert_ne!(ids(&recent), ids(&personal));
    }

    #[test]
    fn test_empty_catalog_and_zero_limit() {
        let empty: Vec<ProjectRecord> = Vec::new();
        assert!(SelectionPolicy::HOME.select(&empty).is_empty());
        assert!(SelectionPolicy::PersonalFirst(3).select(&empty).is_empty());

        let catalog = vec![project(1, "A", (2024, 1, 1))];
        assert!(most_recent(&catalog, 0).is_empty());
    }

    #[test]
    fn test_home_policy() {
        assert_eq!(SelectionPolicy::HOME.limit(), 3);
        assert_eq!(SelectionPolicy::HOME.name(), "most recent");
    }
}
