// TUI application state and event handling
use folio_core::{
    available_categories, config::UiConfig, filter_projects, Catalog, CategorySelection,
    ContactForm, FilterState, FormStatus, ProjectRecord, Registry, TimelineOrder,
};
use ratatui::{style::Color, widgets::ListState};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    About,
    Projects,
    Contact,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::About, Tab::Projects, Tab::Contact];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::About => "About",
            Tab::Projects => "Projects",
            Tab::Contact => "Contact",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,      // Moving between tabs and items
    Searching,   // Typing in the projects search box
    EditingForm, // Typing into the contact form
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Subject => "Subject",
            FormField::Message => "Message",
        }
    }

    fn next(&self) -> FormField {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Subject,
            FormField::Subject => FormField::Message,
            FormField::Message => FormField::Name,
        }
    }

    fn previous(&self) -> FormField {
        match self {
            FormField::Name => FormField::Message,
            FormField::Email => FormField::Name,
            FormField::Subject => FormField::Email,
            FormField::Message => FormField::Subject,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub tab: Tab,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub registry: Arc<Registry>,
    pub catalog: Arc<Catalog>,
    pub featured_limit: usize,
    // Site theme, already converted for the terminal
    pub primary: Color,
    pub accent: Color,
    // Projects tab
    pub filter: FilterState,
    pub categories: Vec<CategorySelection>,
    pub selected_index: usize,
    pub list_state: ListState,
    // About tab
    pub timeline_order: TimelineOrder,
    pub about_scroll: u16,
    // Contact tab
    pub form: ContactForm,
    pub form_field: FormField,
    pub form_status: FormStatus,
}

impl App {
    pub fn new(registry: Arc<Registry>, catalog: Arc<Catalog>, ui: &UiConfig) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        let categories = available_categories(catalog.as_ref());
        let theme = &registry.site().theme;
        let primary = parse_hex_color(&theme.primary_color).unwrap_or(Color::Blue);
        let accent = parse_hex_color(&theme.accent_color).unwrap_or(Color::Cyan);
        let mut form = ContactForm::default();
        if let Some(first) = registry.site().contact_form.subjects.first() {
            form.subject = first.clone();
        }

        Self {
            should_quit: false,
            tab: Tab::Home,
            input_mode: InputMode::Normal,
            show_help: false,
            registry,
            catalog,
            featured_limit: ui.featured_limit,
            primary,
            accent,
            filter: FilterState::new(),
            categories,
            selected_index: 0,
            list_state,
            timeline_order: ui.timeline_order,
            about_scroll: 0,
            form,
            form_field: FormField::Name,
            form_status: FormStatus::Idle,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn next_tab(&mut self) {
        self.set_tab(self.tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.set_tab(self.tab.previous());
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_form_mode(&mut self) {
        if self.registry.site().features.contact_form {
            self.input_mode = InputMode::EditingForm;
        }
    }

    // --- Projects ---

    pub fn visible_projects(&self) -> Vec<&ProjectRecord> {
        filter_projects(self.catalog.as_ref(), &self.filter)
    }

    pub fn selected_project(&self) -> Option<&ProjectRecord> {
        self.visible_projects().get(self.selected_index).copied()
    }

    pub fn next_result(&mut self) {
        let len = self.visible_projects().len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1).min(len - 1);
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn previous_result(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        self.filter.search_term.push(c);
        self.reset_selection();
    }

    pub fn pop_search_char(&mut self) {
        self.filter.search_term.pop();
        self.reset_selection();
    }

    pub fn cycle_category(&mut self, forward: bool) {
        self.filter.cycle_category(&self.categories, forward);
        self.reset_selection();
    }

    /// Back to "All" with an empty search
    pub fn reset_filter(&mut self) {
        self.filter.reset();
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    // --- About ---

    pub fn toggle_timeline_order(&mut self) {
        self.timeline_order = self.timeline_order.reversed();
    }

    pub fn scroll_down(&mut self) {
        self.about_scroll = self.about_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.about_scroll = self.about_scroll.saturating_sub(1);
    }

    // --- Contact ---

    pub fn subjects(&self) -> &[String] {
        &self.registry.site().contact_form.subjects
    }

    pub fn next_field(&mut self) {
        self.form_field = self.form_field.next();
    }

    pub fn previous_field(&mut self) {
        self.form_field = self.form_field.previous();
    }

    pub fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.form.name,
            FormField::Email => &self.form.email,
            FormField::Subject => &self.form.subject,
            FormField::Message => &self.form.message,
        }
    }

    /// Subject is picked from the configured list, not typed
    fn active_text_field(&mut self) -> Option<&mut String> {
        match self.form_field {
            FormField::Name => Some(&mut self.form.name),
            FormField::Email => Some(&mut self.form.email),
            FormField::Subject => None,
            FormField::Message => Some(&mut self.form.message),
        }
    }

    pub fn push_form_char(&mut self, c: char) {
        if self.form_status.is_submitting() {
            return;
        }
        if let Some(field) = self.active_text_field() {
            field.push(c);
        }
    }

    pub fn pop_form_char(&mut self) {
        if self.form_status.is_submitting() {
            return;
        }
        if let Some(field) = self.active_text_field() {
            field.pop();
        }
    }

    pub fn cycle_subject(&mut self, forward: bool) {
        if self.form_field != FormField::Subject || self.form_status.is_submitting() {
            return;
        }
        let registry = Arc::clone(&self.registry);
        let subjects = &registry.site().contact_form.subjects;
        if subjects.is_empty() {
            return;
        }

        let current = subjects.iter().position(|s| *s == self.form.subject);
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % subjects.len(),
            (Some(i), false) => (i + subjects.len() - 1) % subjects.len(),
        };
        self.form.subject = subjects[next].clone();
    }

    /// Record a new form status; a sent message empties the form
    pub fn set_form_status(&mut self, status: FormStatus) {
        if let FormStatus::Sent(_) = status {
            self.form.clear();
            if let Some(first) = self.subjects().first().cloned() {
                self.form.subject = first;
            }
            self.form_field = FormField::Name;
        }
        self.form_status = status;
    }
}

/// `#rrggbb` to a truecolor `Color`
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::SubmissionReceipt;

    fn app() -> App {
        let registry = Arc::new(Registry::bundled().unwrap());
        let (catalog, _) = Catalog::bundled().unwrap();
        App::new(registry, Arc::new(catalog), &UiConfig::default())
    }

    #[test]
    fn test_tabs_wrap_around() {
        let mut app = app();
        assert_eq!(app.tab, Tab::Home);
        app.previous_tab();
        assert_eq!(app.tab, Tab::Contact);
        app.next_tab();
        app.next_tab();
        assert_eq!(app.tab, Tab::About);
    }

    #[test]
    fn test_search_narrows_and_resets_selection() {
        let mut app = app();
        let total = app.visible_projects().len();
        app.next_result();
        assert_eq!(app.selected_index, 1);

        for c in "guardify".chars() {
            app.push_search_char(c);
        }
        assert_eq!(app.selected_index, 0);
        assert!(app.visible_projects().len() < total);
        assert_eq!(app.selected_project().unwrap().title, "Guardify AI");

        app.reset_filter();
        assert_eq!(app.visible_projects().len(), total);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut app = app();
        let total = app.visible_projects().len();
        for _ in 0..total + 3 {
            app.next_result();
        }
        assert_eq!(app.selected_index, total - 1);

        app.previous_result();
        assert_eq!(app.selected_index, total - 2);
    }

    #[test]
    fn test_category_cycle() {
        let mut app = app();
        app.cycle_category(true);
        assert_ne!(app.filter.selected_category, CategorySelection::All);
        app.cycle_category(false);
        assert_eq!(app.filter.selected_category, CategorySelection::All);
    }

    #[test]
    fn test_subject_is_cycled_not_typed() {
        let mut app = app();
        let first = app.form.subject.clone();
        assert_eq!(first, "Job Opportunity");

        app.form_field = FormField::Subject;
        app.push_form_char('x');
        assert_eq!(app.form.subject, first);

        app.cycle_subject(true);
        assert_eq!(app.form.subject, "Collaboration");
        app.cycle_subject(false);
        app.cycle_subject(false);
        assert_eq!(app.form.subject, "Other");
    }

    #[test]
    fn test_form_editing_and_sent_clears() {
        let mut app = app();
        for c in "Dana".chars() {
            app.push_form_char(c);
        }
        app.pop_form_char();
        assert_eq!(app.form.name, "Dan");

        app.next_field();
        assert_eq!(app.form_field, FormField::Email);

        app.set_form_status(FormStatus::Submitting);
        app.push_form_char('a');
        assert!(app.form.email.is_empty());

        app.set_form_status(FormStatus::Sent(SubmissionReceipt {
            subject: "Job Opportunity".to_string(),
            delivered_at: chrono::Utc::now(),
        }));
        assert!(app.form.name.is_empty());
        assert_eq!(app.form.subject, "Job Opportunity");
        assert_eq!(app.form_field, FormField::Name);
    }

    #[test]
    fn test_failed_status_keeps_form() {
        let mut app = app();
        app.form.name = "Dan".to_string();
        app.set_form_status(FormStatus::Failed {
            message: "nope".to_string(),
            retryable: true,
        });
        assert_eq!(app.form.name, "Dan");
    }

    #[test]
    fn test_theme_colors_come_from_site() {
        let app = app();
        // bundled accent is #3b82f6
        assert_eq!(app.accent, Color::Rgb(0x3b, 0x82, 0xf6));
        assert_eq!(app.primary, Color::Rgb(0x25, 0x63, 0xeb));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color(" #00FF7f "), Some(Color::Rgb(0, 255, 127)));
        assert_eq!(parse_hex_color("ff0000"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn test_timeline_order_toggle() {
        let mut app = app();
        assert_eq!(app.timeline_order, TimelineOrder::MostRecentFirst);
        app.toggle_timeline_order();
        assert_eq!(app.timeline_order, TimelineOrder::Chronological);
    }
}
