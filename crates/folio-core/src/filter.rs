// Project view filter - category + free-text search over the catalog
use crate::{catalog::Catalog, models::ProjectRecord};
use std::collections::HashSet;

/// Label of the catch-all category
pub const ALL_CATEGORIES: &str = "All";

/// Which category the visitor picked
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategorySelection {
    #[default]
    All,
    Named(String),
}

impl CategorySelection {
    pub fn label(&self) -> &str {
        match self {
            CategorySelection::All => ALL_CATEGORIES,
            CategorySelection::Named(name) => name,
        }
    }

    pub fn matches(&self, project: &ProjectRecord) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Named(name) => project.has_category(name),
        }
    }
}

impl From<&str> for CategorySelection {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategorySelection::All
        } else {
            CategorySelection::Named(value.to_string())
        }
    }
}

impl std::fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Transient filter state owned by whatever view shows the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub selected_category: CategorySelection,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategorySelection>) -> Self {
        self.selected_category = category.into();
        self
    }

    /// True when the filter lets every project through
    pub fn is_identity(&self) -> bool {
        self.search_term.is_empty() && self.selected_category == CategorySelection::All
    }

    /// Back to "All" with an empty search box
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, project: &ProjectRecord) -> bool {
        self.selected_category.matches(project) && matches_search(project, &self.search_term)
    }

    /// Step to the next (or previous) category, wrapping around
    ///
    /// If the current selection isn't in `categories` anymore we land on the
    /// first entry, which is "All" for anything built by `available_categories`.
    pub fn cycle_category(&mut self, categories: &[CategorySelection], forward: bool) {
        if categories.is_empty() {
            return;
        }

        let next = match categories.iter().position(|c| c == &self.selected_category) {
            Some(i) if forward => (i + 1) % categories.len(),
            Some(i) => (i + categories.len() - 1) % categories.len(),
            None => 0,
        };
        self.selected_category = categories[next].clone();
    }
}

impl From<String> for CategorySelection {
    fn from(value: String) -> Self {
        CategorySelection::from(value.as_str())
    }
}

fn matches_search(project: &ProjectRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    project.title.to_lowercase().contains(&needle)
        || project.description.to_lowercase().contains(&needle)
        || project
            .tech_stack
            .iter()
            .any(|tech| tech.to_lowercase().contains(&needle))
}

/// Apply the filter, keeping catalog order
///
/// Takes any iterator of record references so a filtered result can be fed
/// straight back in.
pub fn filter_projects<'a, I>(projects: I, state: &FilterState) -> Vec<&'a ProjectRecord>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    projects.into_iter().filter(|p| state.matches(p)).collect()
}

/// "All" followed by every category in first-seen order
pub fn available_categories<'a, I>(projects: I) -> Vec<CategorySelection>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    let mut seen = HashSet::new();
    let mut categories = vec![CategorySelection::All];

    for project in projects {
        for category in &project.category {
            if seen.insert(category.as_str()) {
                categories.push(CategorySelection::Named(category.clone()));
            }
        }
    }

    categories
}

/// What the projects list should show
///
/// "Nothing matched" and "nothing loaded yet" look the same as an empty Vec,
/// so they get their own variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectsView<'a> {
    NotLoaded,
    NoResults,
    Matches(Vec<&'a ProjectRecord>),
}

impl<'a> ProjectsView<'a> {
    pub fn derive(catalog: Option<&'a Catalog>, state: &FilterState) -> Self {
        let Some(catalog) = catalog else {
            return ProjectsView::NotLoaded;
        };

        let matches = filter_projects(catalog, state);
        if matches.is_empty() {
            ProjectsView::NoResults
        } else {
            ProjectsView::Matches(matches)
        }
    }

    pub fn projects(&self) -> &[&'a ProjectRecord] {
        match self {
            ProjectsView::Matches(projects) => projects,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.projects().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::project;

    fn sample() -> Vec<ProjectRecord> {
        let mut react = project(1, "Dashboard", (2024, 1, 1));
        react.tech_stack = vec!["React".into(), "TypeScript".into()];
        react.category = vec!["Web".into(), "Data Science".into()];

        let mut game = project(2, "Dungeon", (2023, 5, 1));
        game.tech_stack = vec!["C++".into(), "SDL3".into()];
        game.category = vec!["Game Development".into()];

        let mut ai = project(3, "Guardify", (2025, 6, 1));
        ai.description = "Detects shoplifting with computer vision".into();
        ai.tech_stack = vec!["Python".into()];
        ai.category = vec!["AI".into(), "Web".into()];

        vec![react, game, ai]
    }

    fn ids(projects: &[&ProjectRecord]) -> Vec<u32> {
        projects.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_identity_filter_returns_everything() {
        let catalog = sample();
        let state = FilterState::new();
        assert!(state.is_identity());
        assert_eq!(ids(&filter_projects(&catalog, &state)), vec![1, 2, 3]);
    }

    #[test]
    fn test_tech_stack_search_is_case_insensitive() {
        let catalog = sample();
        for term in ["react", "REACT", "ReAc"] {
            let state = FilterState::new().with_search(term);
            assert_eq!(ids(&filter_projects(&catalog, &state)), vec![1], "term {}", term);
        }
    }

    #[test]
    fn test_search_hits_title_and_description() {
        let catalog = sample();
        let by_title = FilterState::new().with_search("dungeon");
        assert_eq!(ids(&filter_projects(&catalog, &by_title)), vec![2]);

        let by_description = FilterState::new().with_search("computer VISION");
        assert_eq!(ids(&filter_projects(&catalog, &by_description)), vec![3]);
    }

    #[test]
    fn test_category_and_search_must_both_match() {
        let catalog = sample();
        let state = FilterState::new().with_category("Web");
        assert_eq!(ids(&filter_projects(&catalog, &state)), vec![1, 3]);

        let state = state.with_search("python");
        assert_eq!(ids(&filter_projects(&catalog, &state)), vec![3]);

        let state = FilterState::new().with_category("Game Development").with_search("python");
        assert!(filter_projects(&catalog, &state).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = sample();
        let state = FilterState::new().with_category("Web").with_search("a");
        let once = filter_projects(&catalog, &state);
        let twice = filter_projects(once.iter().copied(), &state);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog: Vec<ProjectRecord> = Vec::new();
        let state = FilterState::new().with_search("anything");
        assert!(filter_projects(&catalog, &state).is_empty());
        assert_eq!(available_categories(&catalog), vec![CategorySelection::All]);
    }

    #[test]
    fn test_available_categories_first_seen_order() {
        let catalog = sample();
        let labels: Vec<String> = available_categories(&catalog)
            .iter()
            .map(|c| c.label().to_string())
            .collect();
        assert_eq!(labels, vec!["All", "Web", "Data Science", "Game Development", "AI"]);
    }

    #[test]
    fn test_cycle_category_wraps() {
        let categories = available_categories(&sample());
        let mut state = FilterState::new();

        state.cycle_category(&categories, false);
        assert_eq!(state.selected_category.label(), "AI");

        state.cycle_category(&categories, true);
        assert_eq!(state.selected_category, CategorySelection::All);

        state.cycle_category(&categories, true);
        assert_eq!(state.selected_category.label(), "Web");

        state.selected_category = CategorySelection::Named("Gone".into());
        state.cycle_category(&categories, true);
        assert_eq!(state.selected_category, CategorySelection::All);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = FilterState::new().with_category("AI").with_search("x");
        state.reset();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_all_label_round_trips_to_sentinel() {
        assert_eq!(CategorySelection::from("All"), CategorySelection::All);
        assert_eq!(
            CategorySelection::from("all"),
            CategorySelection::Named("all".into())
        );
    }

    #[test]
    fn test_projects_view_variants() {
        let (catalog, _) = Catalog::new(sample());
        let state = FilterState::new();
        assert_eq!(ProjectsView::derive(None, &state), ProjectsView::NotLoaded);

        let none = FilterState::new().with_search("cobol");
        assert_eq!(ProjectsView::derive(Some(&catalog), &none), ProjectsView::NoResults);

        let view = ProjectsView::derive(Some(&catalog), &state);
        assert_eq!(view.len(), 3);
    }
}
