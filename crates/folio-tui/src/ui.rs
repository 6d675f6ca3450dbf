// UI rendering with ratatui
use crate::app::{App, FormField, InputMode, Tab};
use folio_core::{
    AboutPage, Chrome, ContactPage, FormStatus, HomePage, ProjectRecord, ProjectsPage, ProjectsView,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};
use std::sync::Arc;

const MUTED: Color = Color::DarkGray;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header + tabs
            Constraint::Min(5),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.tab {
        Tab::Home => render_home(frame, app, chunks[1]),
        Tab::About => render_about(frame, app, chunks[1]),
        Tab::Projects => render_projects(frame, app, chunks[1]),
        Tab::Contact => render_contact(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);

    if app.show_help {
        let area = frame.area();
        render_help(frame, app.accent, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chrome = Chrome::build(&app.registry);
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.primary))
                .title(format!(" [{}] {} ", chrome.logo_initials, chrome.site_name)),
        )
        .highlight_style(Style::default().fg(app.accent).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

fn section(title: &str, accent: Color) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ))
}

fn project_line(project: &ProjectRecord) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{} ", project.project_type.icon())),
        Span::styled(project.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}", project.completed_label()),
            Style::default().fg(MUTED),
        ),
    ])
}

fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let accent = app.accent;
    let today = chrono::Local::now().date_naive();
    let home = HomePage::build(&app.registry, &app.catalog, app.featured_limit, today);
    let chrome = Chrome::build(&app.registry);

    let mut lines = vec![
        Line::from(Span::styled(
            home.profile.name.clone(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(home.profile.title.clone()),
        Line::from(""),
        Line::from(home.profile.hero_description.clone()),
        Line::from(""),
    ];

    let mut stats = Vec::new();
    for stat in &home.stats {
        stats.push(Span::styled(stat.value.clone(), Style::default().fg(Color::Yellow)));
        stats.push(Span::raw(format!(" {}   ", stat.label)));
    }
    lines.push(Line::from(stats));
    lines.push(Line::from(""));

    lines.push(section("Skills", accent));
    let skills: Vec<&str> = home.highlighted_skills.iter().map(|s| s.name.as_str()).collect();
    lines.push(Line::from(skills.join("  ·  ")));
    lines.push(Line::from(""));

    lines.push(section("Featured Projects", accent));
    for project in &home.featured {
        lines.push(project_line(project));
        lines.push(Line::from(Span::styled(
            format!("   {}", project.description),
            Style::default().fg(MUTED),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        chrome.footer.copyright.clone(),
        Style::default().fg(MUTED),
    )));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Home "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_about(frame: &mut Frame, app: &App, area: Rect) {
    let accent = app.accent;
    let about = AboutPage::build(&app.registry, app.timeline_order);

    let mut lines = vec![Line::from(about.profile.about_description.clone()), Line::from("")];

    for (label, value) in &about.quick_facts {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>12}: ", label), Style::default().fg(MUTED)),
            Span::raw(value.to_string()),
        ]));
    }
    lines.push(Line::from(""));

    for paragraph in &about.profile.personal_story {
        lines.push(Line::from(paragraph.clone()));
        lines.push(Line::from(""));
    }

    lines.push(section("Skills", accent));
    for skill in about.skills {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", skill.category), Style::default().fg(Color::Yellow)),
            Span::raw(skill.technologies.join(", ")),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(section("Interests", accent));
    for interest in about.interests {
        lines.push(Line::from(format!(
            "{} {} - {}",
            interest.icon, interest.name, interest.description
        )));
    }
    lines.push(Line::from(""));

    lines.push(section(&format!("Timeline ({})", about.timeline.order.label()), accent));
    for entry in &about.timeline.entries {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", entry.year), Style::default().fg(Color::Yellow)),
            Span::raw(format!("{} ", entry.kind.icon())),
            Span::styled(entry.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("           {}", entry.description),
            Style::default().fg(MUTED),
        )));
    }

    // Entries with an unreadable year are left off the timeline but still listed
    if !about.timeline.rejected.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Skipped:", Style::default().fg(MUTED))));
        for rejected in &about.timeline.rejected {
            lines.push(Line::from(Span::styled(
                format!("  {}", rejected.reason),
                Style::default().fg(MUTED),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" About "))
        .wrap(Wrap { trim: false })
        .scroll((app.about_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_projects(frame: &mut Frame, app: &mut App, area: Rect) {
    let accent = app.accent;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let search_style = if app.input_mode == InputMode::Searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let filter_bar = Paragraph::new(Line::from(vec![
        Span::raw(format!("Search: {}", app.filter.search_term)),
        Span::styled("   Category: ", Style::default().fg(MUTED)),
        Span::styled(
            app.filter.selected_category.label().to_string(),
            Style::default().fg(accent),
        ),
    ]))
    .style(search_style)
    .block(Block::default().borders(Borders::ALL).title(" Filter "));
    frame.render_widget(filter_bar, chunks[0]);

    // Keep the page borrowing a local Arc so the list state stays mutable
    let catalog = Arc::clone(&app.catalog);
    let page = ProjectsPage::build(Some(catalog.as_ref()), &app.filter);

    let projects = match &page.view {
        ProjectsView::Matches(found) => found,
        ProjectsView::NotLoaded | ProjectsView::NoResults => {
            let empty = Paragraph::new(page.summary())
                .alignment(Alignment::Center)
                .style(Style::default().fg(MUTED))
                .block(Block::default().borders(Borders::ALL).title(" Projects "));
            frame.render_widget(empty, chunks[1]);
            return;
        }
    };

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    let items: Vec<ListItem> = projects.iter().map(|p| ListItem::new(project_line(p))).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", page.summary())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, content[0], &mut app.list_state);

    if let Some(project) = projects.get(app.selected_index) {
        render_project_detail(frame, project, accent, content[1]);
    }
}

fn render_project_detail(frame: &mut Frame, project: &ProjectRecord, accent: Color, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            project.title.clone(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} {}  ·  {}",
                project.project_type.icon(),
                project.project_type.label(),
                project.completed_label()
            ),
            Style::default().fg(MUTED),
        )),
        Line::from(""),
        Line::from(project.description.clone()),
        Line::from(""),
    ];

    if !project.long_description.is_empty() {
        lines.push(Line::from(project.long_description.clone()));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Tech: ", Style::default().fg(Color::Yellow)),
        Span::raw(project.tech_stack.join(", ")),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Categories: ", Style::default().fg(Color::Yellow)),
        Span::raw(project.category.join(", ")),
    ]));

    if let Some(url) = &project.github_url {
        lines.push(Line::from(vec![
            Span::styled("GitHub: ", Style::default().fg(Color::Yellow)),
            Span::raw(url.clone()),
        ]));
    }
    if let Some(url) = &project.linkedin_url {
        lines.push(Line::from(vec![
            Span::styled("LinkedIn: ", Style::default().fg(Color::Yellow)),
            Span::raw(url.clone()),
        ]));
    }

    let detail = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Details "))
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, area);
}

fn render_contact(frame: &mut Frame, app: &App, area: Rect) {
    let accent = app.accent;
    let page = ContactPage::build(&app.registry);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let mut lines = vec![section("Get in touch", accent)];
    for (_, method) in &page.methods {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", method.title), Style::default().fg(Color::Yellow)),
            Span::raw(method.value.clone()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(section("Reach out about", accent));
    for reason in page.reasons {
        lines.push(Line::from(format!("{} {}", reason.icon, reason.title)));
        lines.push(Line::from(Span::styled(
            format!("   {}", reason.description),
            Style::default().fg(MUTED),
        )));
    }

    let info = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Contact "))
        .wrap(Wrap { trim: false });
    frame.render_widget(info, chunks[0]);

    if page.form_enabled {
        render_contact_form(frame, app, chunks[1]);
    } else {
        let disabled = Paragraph::new("The contact form is turned off. Use one of the methods on the left.")
            .style(Style::default().fg(MUTED))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Message "));
        frame.render_widget(disabled, chunks[1]);
    }
}

fn render_contact_form(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::EditingForm;
    let mut lines = Vec::new();

    for field in FormField::ALL {
        let active = editing && app.form_field == field;
        let label_style = if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        let value = match field {
            FormField::Subject => format!("< {} >", app.field_value(field)),
            _ if active => format!("{}_", app.field_value(field)),
            _ => app.field_value(field).to_string(),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<9}", field.label()), label_style),
            Span::raw(value),
        ]));
        lines.push(Line::from(""));
    }

    if let Some(message) = app.form_status.message() {
        let color = match &app.form_status {
            FormStatus::Sent(_) => Color::Green,
            FormStatus::Failed { .. } => Color::Red,
            _ => Color::Yellow,
        };
        lines.push(Line::from(Span::styled(message, Style::default().fg(color))));
    }

    let border = if editing { Color::Yellow } else { Color::Reset };
    let form = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Send a message "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(form, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = match app.input_mode {
        InputMode::Searching => Span::styled(
            "SEARCH | type to filter | ENTER/ESC: done",
            Style::default().fg(Color::Yellow),
        ),
        InputMode::EditingForm if app.form_status.is_submitting() => Span::styled(
            "SENDING | ESC: cancel",
            Style::default().fg(Color::Yellow),
        ),
        InputMode::EditingForm => Span::styled(
            "FORM | TAB/↑↓: field | ←/→: subject | ENTER: send | ESC: back",
            Style::default().fg(Color::Green),
        ),
        InputMode::Normal => Span::raw(match app.tab {
            Tab::Home => "TAB/1-4: pages | ?: help | q: quit",
            Tab::About => "j/k: scroll | o: flip timeline | TAB/1-4: pages | ?: help | q: quit",
            Tab::Projects => "j/k: navigate | /: search | c/C: category | r: reset | TAB/1-4: pages | q: quit",
            Tab::Contact => "ENTER/i: edit form | TAB/1-4: pages | ?: help | q: quit",
        }),
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}

fn render_help(frame: &mut Frame, accent: Color, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let key = |k: &str, what: &str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", k), Style::default().fg(Color::Yellow)),
            Span::raw(what.to_string()),
        ])
    };

    let lines = vec![
        section("Everywhere", accent),
        key("TAB / l", "next page"),
        key("Shift+TAB / h", "previous page"),
        key("1-4", "jump to page"),
        key("?", "toggle this help"),
        key("q / Ctrl+C", "quit"),
        Line::from(""),
        section("Projects", accent),
        key("/", "search title, description and tech"),
        key("c / C", "next / previous category"),
        key("r", "clear filters"),
        key("j / k", "move selection"),
        Line::from(""),
        section("About", accent),
        key("o", "flip timeline order"),
        key("j / k", "scroll"),
        Line::from(""),
        section("Contact", accent),
        key("ENTER / i", "edit the form"),
        key("ENTER", "send (while editing)"),
        key("ESC", "cancel sending / stop editing"),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keybindings Help ")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(accent)),
    );
    frame.render_widget(help, popup_area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
