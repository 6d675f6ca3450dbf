use chrono::NaiveDate;
use folio_core::{
    featured::most_recent, filter_projects, Catalog, FilterState, ProjectRecord, ProjectType,
    Registry, SelectionPolicy, TimelineOrder,
};

fn record(id: u32, title: &str, tech: &[&str], categories: &[&str], date: &str) -> ProjectRecord {
    ProjectRecord {
        id,
        title: title.to_string(),
        description: format!("About {}", title),
        long_description: String::new(),
        tech_stack: tech.iter().map(|t| t.to_string()).collect(),
        github_url: None,
        linkedin_url: None,
        image_url: String::new(),
        category: categories.iter().map(|c| c.to_string()).collect(),
        completed_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        project_type: ProjectType::Personal,
    }
}

fn catalogs() -> Vec<Vec<ProjectRecord>> {
    vec![
        Vec::new(),
        vec![record(1, "Solo", &["Rust"], &["Tools"], "2024-01-01")],
        vec![
            record(1, "Web app", &["React", "Node.js"], &["Web"], "2023-01-15"),
            record(2, "Game", &["C++"], &["Games"], "2024-06-01"),
            record(3, "Model", &["Python", "React"], &["AI", "Web"], "2024-06-01"),
            record(4, "CLI", &["Rust"], &["Tools"], "2022-11-11"),
        ],
    ]
}

fn states() -> Vec<FilterState> {
    vec![
        FilterState::new(),
        FilterState::new().with_search("react"),
        FilterState::new().with_category("Web"),
        FilterState::new().with_category("Web").with_search("MODEL"),
        FilterState::new().with_category("Nope"),
        FilterState::new().with_search("o"),
    ]
}

/// `needle` appears in `haystack` in the same relative order
fn is_subsequence(needle: &[&ProjectRecord], haystack: &[ProjectRecord]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|n| rest.any(|h| h.id == n.id))
}

#[test]
fn filter_is_an_order_preserving_subsequence() {
    for catalog in catalogs() {
        for state in states() {
            let result = filter_projects(&catalog, &state);
            assert!(is_subsequence(&result, &catalog), "{:?}", state);
        }
    }
}

#[test]
fn identity_filter_returns_catalog() {
    for catalog in catalogs() {
        let result = filter_projects(&catalog, &FilterState::new());
        let expected: Vec<&ProjectRecord> = catalog.iter().collect();
        assert_eq!(result, expected);
    }
}

#[test]
fn filter_is_idempotent() {
    for catalog in catalogs() {
        for state in states() {
            let once = filter_projects(&catalog, &state);
            let twice = filter_projects(once.iter().copied(), &state);
            assert_eq!(once, twice, "{:?}", state);
        }
    }
}

#[test]
fn filtering_leaves_source_untouched() {
    for catalog in catalogs() {
        let before = catalog.clone();
        for state in states() {
            let _ = filter_projects(&catalog, &state);
            let _ = most_recent(&catalog, 2);
        }
        assert_eq!(before, catalog);
    }
}

#[test]
fn recent_n_is_sorted_bounded_and_stable() {
    for catalog in catalogs() {
        for n in 0..6 {
            let picked = most_recent(&catalog, n);
            assert_eq!(picked.len(), n.min(catalog.len()));
            for pair in picked.windows(2) {
                assert!(pair[0].completed_date >= pair[1].completed_date);
                if pair[0].completed_date == pair[1].completed_date {
                    let pos = |id| catalog.iter().position(|p| p.id == id).unwrap();
                    assert!(pos(pair[0].id) < pos(pair[1].id));
                }
            }
        }
    }
}

#[test]
fn recent_two_breaks_ties_by_insertion_order() {
    let catalog = vec![
        record(1, "Jan", &[], &["X"], "2023-01-01"),
        record(2, "June first", &[], &["X"], "2024-06-01"),
        record(3, "June second", &[], &["X"], "2024-06-01"),
    ];
    let ids: Vec<u32> = most_recent(&catalog, 2).iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn react_search_matches_case_insensitively() {
    let catalog = vec![
        record(1, "Frontend", &["React"], &["Web"], "2024-01-01"),
        record(2, "Backend", &["Go"], &["Web"], "2024-01-01"),
    ];
    for term in ["react", "REACT"] {
        let ids: Vec<u32> = filter_projects(&catalog, &FilterState::new().with_search(term))
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1]);
    }
}

#[test]
fn bundled_content_renders_every_page() {
    let registry = Registry::bundled().unwrap();
    let (catalog, report) = Catalog::bundled().unwrap();
    assert!(report.is_clean());

    let today = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
    let home = folio_core::HomePage::build(&registry, &catalog, 3, today);
    assert_eq!(home.featured.len(), 3);
    assert_eq!(home.policy, SelectionPolicy::HOME);

    let about = folio_core::AboutPage::build(&registry, TimelineOrder::Chronological);
    assert_eq!(about.timeline.entries[0].year, "2018-2020");

    let projects = folio_core::ProjectsPage::build(Some(&catalog), &FilterState::new());
    assert_eq!(projects.view.len(), catalog.len());

    let contact = folio_core::ContactPage::build(&registry);
    assert_eq!(contact.methods.len(), 4);
}
