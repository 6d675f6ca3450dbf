// Configuration registry - every content table the pages read
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Content that ships with the binary
const BUNDLED_SITE: &str = include_str!("../data/site.toml");

/// Personal profile shown on Home and About
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalProfile {
    pub name: String,
    pub initials: String,
    pub title: String,
    pub location: String,
    pub study: String,
    pub university: String,
    pub experience: String,
    pub focus: String,
    pub profile_image: String,
    pub hero_description: String,
    pub about_description: String,
    #[serde(default)]
    pub personal_story: Vec<String>,
    pub stats: QuickStats,
    pub footer: FooterText,
}

/// Hero section numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickStats {
    pub years_of_coding: StatValue,
    pub technologies: StatValue,
    pub projects_count: StatValue,
    pub completed_projects: StatValue,
}

/// A stat is either written by hand or computed from the catalog
///
/// On disk it's just a string; the literal `"auto"` means "work it out".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatValue {
    Auto,
    Fixed(String),
}

impl StatValue {
    pub fn resolve(&self, computed: impl FnOnce() -> usize) -> String {
        match self {
            StatValue::Auto => computed().to_string(),
            StatValue::Fixed(value) => value.clone(),
        }
    }
}

impl From<String> for StatValue {
    fn from(value: String) -> Self {
        if value == "auto" {
            StatValue::Auto
        } else {
            StatValue::Fixed(value)
        }
    }
}

impl From<StatValue> for String {
    fn from(value: StatValue) -> Self {
        match value {
            StatValue::Auto => "auto".to_string(),
            StatValue::Fixed(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterText {
    pub brand_description: String,
    pub copyright: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub technologies: Vec<String>,
}

/// Simplified skill chip on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSkill {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Either a single year ("2023") or a range ("2018-2020")
    pub year: String,
    pub title: String,
    pub description: String,
    pub kind: TimelineKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Education,
    Work,
    Milestone,
    Goal,
    Volunteering,
}

impl TimelineKind {
    pub fn label(&self) -> &'static str {
        match self {
            TimelineKind::Education => "Education",
            TimelineKind::Work => "Work",
            TimelineKind::Milestone => "Milestone",
            TimelineKind::Goal => "Goal",
            TimelineKind::Volunteering => "Volunteering",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TimelineKind::Education => "🎓",
            TimelineKind::Work => "💼",
            TimelineKind::Milestone => "🏆",
            TimelineKind::Goal => "🎯",
            TimelineKind::Volunteering => "🤝",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub name: String,
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReason {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMethod {
    pub title: String,
    pub value: String,
    pub href: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMethods {
    pub email: ContactMethod,
    pub linkedin: ContactMethod,
    pub github: ContactMethod,
    pub location: ContactMethod,
}

impl ContactMethods {
    /// Fixed display order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ContactMethod)> {
        [
            ("email", &self.email),
            ("linkedin", &self.linkedin),
            ("github", &self.github),
            ("location", &self.location),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactTables {
    pub reasons: Vec<ContactReason>,
    pub methods: ContactMethods,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub href: String,
    pub label: String,
    pub icon: SocialIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialIcon {
    Github,
    Linkedin,
    Twitter,
    Email,
    Website,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub links: Vec<NavLink>,
    pub social: Vec<SocialLink>,
    pub footer: Vec<NavLink>,
}

/// Site-wide metadata and feature switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMetadata {
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub author: String,
    pub url: String,
    pub logo: Logo,
    pub theme: ThemeColors,
    #[serde(default)]
    pub features: Features,
    #[serde(default)]
    pub contact_form: ContactFormSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    pub text: String,
    pub initials: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    /// `#rrggbb`; front-ends fall back to their own colours if it doesn't parse
    pub primary_color: String,
    pub accent_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    #[serde(default = "default_true")]
    pub contact_form: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            contact_form: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormSettings {
    pub subjects: Vec<String>,
}

impl Default for ContactFormSettings {
    fn default() -> Self {
        Self {
            subjects: vec!["General Question".to_string(), "Other".to_string()],
        }
    }
}

/// Names consumers can ask the registry for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableName {
    Personal,
    Skills,
    HomeSkills,
    Timeline,
    Interests,
    Contact,
    Navigation,
    Site,
}

impl TableName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Personal => "personal",
            TableName::Skills => "skills",
            TableName::HomeSkills => "home_skills",
            TableName::Timeline => "timeline",
            TableName::Interests => "interests",
            TableName::Contact => "contact",
            TableName::Navigation => "navigation",
            TableName::Site => "site",
        }
    }

    pub fn all() -> [TableName; 8] {
        [
            TableName::Personal,
            TableName::Skills,
            TableName::HomeSkills,
            TableName::Timeline,
            TableName::Interests,
            TableName::Contact,
            TableName::Navigation,
            TableName::Site,
        ]
    }
}

impl std::str::FromStr for TableName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().replace('-', "_");
        TableName::all()
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| Error::UnknownTable(s.to_string()))
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of one whole table
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Table<'a> {
    Personal(&'a PersonalProfile),
    Skills(&'a [SkillCategory]),
    HomeSkills(&'a [HighlightSkill]),
    Timeline(&'a [TimelineEntry]),
    Interests(&'a [Interest]),
    Contact(&'a ContactTables),
    Navigation(&'a Navigation),
    Site(&'a SiteMetadata),
}

/// An entry in a list table that didn't match its schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedEntry {
    pub table: &'static str,
    pub index: usize,
    pub reason: String,
}

/// All content tables, loaded once and never changed
///
/// Share it behind an `Arc`; there's no mutation API to worry about.
#[derive(Debug, Clone)]
pub struct Registry {
    personal: PersonalProfile,
    skills: Vec<SkillCategory>,
    home_skills: Vec<HighlightSkill>,
    timeline: Vec<TimelineEntry>,
    interests: Vec<Interest>,
    contact: ContactTables,
    navigation: Navigation,
    site: SiteMetadata,
    dropped: Vec<DroppedEntry>,
}

/// On-disk layout. List tables stay untyped until each entry is checked.
#[derive(Deserialize)]
struct RawSite {
    personal: PersonalProfile,
    #[serde(default)]
    skills: Vec<toml::Value>,
    #[serde(default)]
    home_skills: Vec<toml::Value>,
    #[serde(default)]
    timeline: Vec<toml::Value>,
    #[serde(default)]
    interests: Vec<toml::Value>,
    contact: RawContact,
    #[serde(default)]
    navigation: RawNavigation,
    site: SiteMetadata,
}

#[derive(Deserialize)]
struct RawContact {
    #[serde(default)]
    reasons: Vec<toml::Value>,
    methods: ContactMethods,
}

#[derive(Deserialize, Default)]
struct RawNavigation {
    #[serde(default)]
    links: Vec<toml::Value>,
    #[serde(default)]
    social: Vec<toml::Value>,
    #[serde(default)]
    footer: Vec<toml::Value>,
}

impl Registry {
    /// Registry built from the bundled `site.toml`
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_SITE)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading site tables from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Either the override file or the bundled tables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::bundled(),
        }
    }

    /// Parse every table
    ///
    /// Single-record tables (personal, contact methods, site) are required;
    /// without them there's nothing to render, so they fail the load. Entries
    /// of list tables are checked one by one and bad ones are dropped.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let raw: RawSite = toml::from_str(source)
            .map_err(|e| Error::ConfigError(format!("Failed to parse site tables: {}", e)))?;

        let mut dropped = Vec::new();
        let registry = Registry {
            personal: raw.personal,
            skills: typed_entries("skills", raw.skills, &mut dropped),
            home_skills: typed_entries("home_skills", raw.home_skills, &mut dropped),
            timeline: typed_entries("timeline", raw.timeline, &mut dropped),
            interests: typed_entries("interests", raw.interests, &mut dropped),
            contact: ContactTables {
                reasons: typed_entries("contact.reasons", raw.contact.reasons, &mut dropped),
                methods: raw.contact.methods,
            },
            navigation: Navigation {
                links: typed_entries("navigation.links", raw.navigation.links, &mut dropped),
                social: typed_entries("navigation.social", raw.navigation.social, &mut dropped),
                footer: typed_entries("navigation.footer", raw.navigation.footer, &mut dropped),
            },
            site: raw.site,
            dropped,
        };

        info!(
            "Loaded site tables: {} skills, {} timeline entries, {} interests ({} dropped)",
            registry.skills.len(),
            registry.timeline.len(),
            registry.interests.len(),
            registry.dropped.len()
        );

        Ok(registry)
    }

    pub fn personal(&self) -> &PersonalProfile {
        &self.personal
    }

    pub fn skills(&self) -> &[SkillCategory] {
        &self.skills
    }

    pub fn home_skills(&self) -> &[HighlightSkill] {
        &self.home_skills
    }

    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    pub fn interests(&self) -> &[Interest] {
        &self.interests
    }

    pub fn contact(&self) -> &ContactTables {
        &self.contact
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn site(&self) -> &SiteMetadata {
        &self.site
    }

    /// Entries left out at load time
    pub fn dropped(&self) -> &[DroppedEntry] {
        &self.dropped
    }

    /// Look a table up by name
    pub fn table(&self, name: TableName) -> Table<'_> {
        match name {
            TableName::Personal => Table::Personal(&self.personal),
            TableName::Skills => Table::Skills(&self.skills),
            TableName::HomeSkills => Table::HomeSkills(&self.home_skills),
            TableName::Timeline => Table::Timeline(&self.timeline),
            TableName::Interests => Table::Interests(&self.interests),
            TableName::Contact => Table::Contact(&self.contact),
            TableName::Navigation => Table::Navigation(&self.navigation),
            TableName::Site => Table::Site(&self.site),
        }
    }

    /// Pretty JSON dump of one table, handy for the CLI
    pub fn table_json(&self, name: TableName) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.table(name))?)
    }
}

fn typed_entries<T>(
    table: &'static str,
    values: Vec<toml::Value>,
    dropped: &mut Vec<DroppedEntry>,
) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    let mut entries = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        match T::deserialize(value) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!("Dropping {}[{}]: {}", table, index, e);
                dropped.push(DroppedEntry {
                    table,
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    entries
}
