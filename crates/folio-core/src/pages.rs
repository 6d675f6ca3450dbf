// Page view models - what each page needs, already derived
//
// Front-ends only lay these out. Every page borrows from the registry and the
// catalog; nothing here owns content.
use crate::{
    catalog::Catalog,
    featured::SelectionPolicy,
    filter::{available_categories, CategorySelection, FilterState, ProjectsView},
    models::ProjectRecord,
    registry::{
        ContactMethod, ContactReason, FooterText, HighlightSkill, Interest, NavLink,
        PersonalProfile, Registry, SkillCategory, SocialLink,
    },
    timeline::{order_timeline, OrderedTimeline, TimelineOrder},
};
use chrono::NaiveDate;

/// One number in the hero/quick-facts strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStat {
    pub label: &'static str,
    pub value: String,
}

/// Resolve the profile's quick stats against the catalog
///
/// "auto" project counts come from the catalog; completed projects are the
/// ones whose completion date is not in the future relative to `today`.
pub fn resolve_stats(profile: &PersonalProfile, catalog: &Catalog, today: NaiveDate) -> Vec<ResolvedStat> {
    let stats = &profile.stats;
    vec![
        ResolvedStat {
            label: "Projects",
            value: stats.projects_count.resolve(|| catalog.len()),
        },
        ResolvedStat {
            label: "Completed",
            value: stats
                .completed_projects
                .resolve(|| catalog.iter().filter(|p| p.completed_date <= today).count()),
        },
        ResolvedStat {
            label: "Years Coding",
            value: stats.years_of_coding.resolve(|| 0),
        },
        ResolvedStat {
            label: "Technologies",
            value: stats.technologies.resolve(|| {
                let mut techs: Vec<&str> = catalog
                    .iter()
                    .flat_map(|p| p.tech_stack.iter().map(String::as_str))
                    .collect();
                techs.sort_unstable();
                techs.dedup();
                techs.len()
            }),
        },
    ]
}

/// Navigation, socials and footer - shared by every page
#[derive(Debug, Clone)]
pub struct Chrome<'a> {
    pub site_name: &'a str,
    pub logo_initials: &'a str,
    pub links: &'a [NavLink],
    pub social: &'a [SocialLink],
    pub footer_links: &'a [NavLink],
    pub footer: &'a FooterText,
}

impl<'a> Chrome<'a> {
    pub fn build(registry: &'a Registry) -> Self {
        let nav = registry.navigation();
        Self {
            site_name: &registry.site().name,
            logo_initials: &registry.site().logo.initials,
            links: &nav.links,
            social: &nav.social,
            footer_links: &nav.footer,
            footer: &registry.personal().footer,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HomePage<'a> {
    pub profile: &'a PersonalProfile,
    pub stats: Vec<ResolvedStat>,
    pub highlighted_skills: &'a [HighlightSkill],
    pub policy: SelectionPolicy,
    pub featured: Vec<&'a ProjectRecord>,
}

impl<'a> HomePage<'a> {
    /// Home highlights the newest projects
    pub fn build(registry: &'a Registry, catalog: &'a Catalog, featured_limit: usize, today: NaiveDate) -> Self {
        let policy = SelectionPolicy::MostRecent(featured_limit);
        Self {
            profile: registry.personal(),
            stats: resolve_stats(registry.personal(), catalog, today),
            highlighted_skills: registry.home_skills(),
            policy,
            featured: policy.select(catalog.projects()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AboutPage<'a> {
    pub profile: &'a PersonalProfile,
    pub quick_facts: Vec<(&'static str, &'a str)>,
    pub skills: &'a [SkillCategory],
    pub interests: &'a [Interest],
    pub timeline: OrderedTimeline<'a>,
}

impl<'a> AboutPage<'a> {
    pub fn build(registry: &'a Registry, order: TimelineOrder) -> Self {
        let profile = registry.personal();
        Self {
            profile,
            quick_facts: vec![
                ("Location", profile.location.as_str()),
                ("Study", profile.study.as_str()),
                ("Experience", profile.experience.as_str()),
                ("Focus", profile.focus.as_str()),
            ],
            skills: registry.skills(),
            interests: registry.interests(),
            timeline: order_timeline(registry.timeline(), order),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectsPage<'a> {
    pub categories: Vec<CategorySelection>,
    pub filter: FilterState,
    pub view: ProjectsView<'a>,
    pub total: usize,
}

impl<'a> ProjectsPage<'a> {
    /// `catalog` is `None` while nothing has been loaded yet
    pub fn build(catalog: Option<&'a Catalog>, filter: &FilterState) -> Self {
        Self {
            categories: catalog
                .map(|c| available_categories(c))
                .unwrap_or_else(|| vec![CategorySelection::All]),
            filter: filter.clone(),
            view: ProjectsView::derive(catalog, filter),
            total: catalog.map(Catalog::len).unwrap_or(0),
        }
    }

    pub fn summary(&self) -> String {
        match &self.view {
            ProjectsView::NotLoaded => "Loading projects...".to_string(),
            ProjectsView::NoResults => "No projects match your filters".to_string(),
            ProjectsView::Matches(found) => format!("Showing {} of {} projects", found.len(), self.total),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactPage<'a> {
    pub reasons: &'a [ContactReason],
    pub methods: Vec<(&'static str, &'a ContactMethod)>,
    pub subjects: &'a [String],
    pub form_enabled: bool,
}

impl<'a> ContactPage<'a> {
    pub fn build(registry: &'a Registry) -> Self {
        let contact = registry.contact();
        let site = registry.site();
        Self {
            reasons: &contact.reasons,
            methods: contact.methods.iter().collect(),
            subjects: &site.contact_form.subjects,
            form_enabled: site.features.contact_form,
        }
    }
}
