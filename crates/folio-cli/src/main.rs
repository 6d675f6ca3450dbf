use anyhow::Context;
use clap::Parser;
use folio_core::{
    export::Exporter, AboutPage, AppConfig, Catalog, CategorySelection, Chrome, ContactForm,
    ContactService, FilterState, FormStatus, HomePage, ProjectRecord, ProjectsPage, ProjectsView,
    Registry, SelectionPolicy, SimulatedTransport, TableName, TimelineOrder,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Personal portfolio in your terminal", long_about = None)]
struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Home page: profile, stats and featured projects
    Home,
    /// About page: story, skills, interests and timeline
    About {
        /// Timeline direction (defaults to the config value)
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
    },
    /// List projects, optionally filtered
    Projects {
        /// Case-insensitive search over title, description and tech stack
        #[arg(short, long, default_value = "")]
        search: String,
        /// Category to show ("All" for everything)
        #[arg(short, long, default_value = "All")]
        category: String,
    },
    /// List the categories projects can be filtered by
    Categories,
    /// Pick highlighted projects
    Featured {
        #[arg(long, value_enum, default_value_t = PolicyArg::Recent)]
        policy: PolicyArg,
        /// How many to pick (defaults to the config's featured limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show the timeline in an explicit order
    Timeline {
        #[arg(long, value_enum, default_value_t = OrderArg::Desc)]
        order: OrderArg,
    },
    /// Dump one content table as JSON
    Table {
        /// personal, skills, home_skills, timeline, interests, contact, navigation or site
        name: String,
    },
    /// Export (filtered) projects to .json, .csv or .md
    Export {
        path: PathBuf,
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long, default_value = "All")]
        category: String,
    },
    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Interactive terminal UI
    Tui,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum PolicyArg {
    /// Newest completion date first
    Recent,
    /// Personal projects in catalog order
    Personal,
}

impl PolicyArg {
    fn with_limit(self, limit: usize) -> SelectionPolicy {
        match self {
            PolicyArg::Recent => SelectionPolicy::MostRecent(limit),
            PolicyArg::Personal => SelectionPolicy::PersonalFirst(limit),
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OrderArg {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

impl From<OrderArg> for TimelineOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Asc => TimelineOrder::Chronological,
            OrderArg::Desc => TimelineOrder::MostRecentFirst,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log lines would scribble over the TUI, so it stays quiet unless RUST_LOG says otherwise
    let default_filter = match cli.command {
        Some(Commands::Tui) => "off",
        _ => "folio_cli=info,folio_tui=info,folio_core=warn",
    };

    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default config: {}", e);
            AppConfig::default()
        }),
    };

    // Content is loaded once and shared read-only from here on
    let registry = Arc::new(
        Registry::load(config.data.site_path.as_deref()).context("Failed to load site tables")?,
    );
    let (catalog, report) =
        Catalog::load(config.data.projects_path.as_deref()).context("Failed to load projects")?;
    if !report.is_clean() {
        tracing::warn!("{} project records were skipped", report.rejected.len());
    }
    let catalog = Arc::new(catalog);

    match cli.command {
        Some(Commands::Home) | None => print_home(&registry, &catalog, config.ui.featured_limit),
        Some(Commands::About { order }) => {
            let order = order.map(TimelineOrder::from).unwrap_or(config.ui.timeline_order);
            print_about(&registry, order);
        }
        Some(Commands::Projects { search, category }) => {
            let filter = FilterState::new()
                .with_search(search)
                .with_category(category);
            print_projects(&catalog, &filter);
        }
        Some(Commands::Categories) => {
            let page = ProjectsPage::build(Some(catalog.as_ref()), &FilterState::new());
            for category in page.categories {
                println!("{}", category);
            }
        }
        Some(Commands::Featured { policy, limit }) => {
            let policy = policy.with_limit(limit.unwrap_or(config.ui.featured_limit));
            tracing::info!("Selecting {} projects ({})", policy.limit(), policy.name());
            for project in policy.select(catalog.projects()) {
                print_project_line(project);
            }
        }
        Some(Commands::Timeline { order }) => print_timeline(&registry, order.into()),
        Some(Commands::Table { name }) => {
            let table: TableName = name.parse()?;
            println!("{}", registry.table_json(table)?);
        }
        Some(Commands::Export {
            path,
            search,
            category,
        }) => {
            let filter = FilterState::new()
                .with_search(search)
                .with_category(category);
            let projects = folio_core::filter_projects(catalog.as_ref(), &filter);
            let format = Exporter::export_to_file(&projects, &path)?;
            println!(
                "Exported {} projects to {} ({})",
                projects.len(),
                path.display(),
                format.extension()
            );
        }
        Some(Commands::Contact {
            name,
            email,
            subject,
            message,
        }) => {
            let service = contact_service(&config, &registry);
            let form = ContactForm {
                name,
                email,
                subject,
                message,
            };

            println!("Sending...");
            let status = FormStatus::from_outcome(service.send(form).await);
            if let Some(message) = status.message() {
                println!("{}", message);
            }
            if let FormStatus::Failed { .. } = status {
                std::process::exit(1);
            }
        }
        Some(Commands::Tui) => {
            let app = folio_tui::App::new(Arc::clone(&registry), Arc::clone(&catalog), &config.ui);
            let service = contact_service(&config, &registry);
            folio_tui::run_tui(app, service, Duration::from_millis(config.ui.tick_rate_ms)).await?;
        }
    }

    Ok(())
}

fn print_home(registry: &Registry, catalog: &Catalog, featured_limit: usize) {
    let today = chrono_today();
    let chrome = Chrome::build(registry);
    let home = HomePage::build(registry, catalog, featured_limit, today);

    println!("{}  [{}]", chrome.site_name, chrome.logo_initials);
    let nav: Vec<&str> = chrome.links.iter().map(|l| l.label.as_str()).collect();
    println!("{}\n", nav.join(" | "));

    println!("{}", home.profile.name);
    println!("{}\n", home.profile.title);
    println!("{}\n", home.profile.hero_description);

    let stats: Vec<String> = home
        .stats
        .iter()
        .map(|s| format!("{} {}", s.value, s.label))
        .collect();
    println!("{}\n", stats.join("  •  "));

    let skills: Vec<&str> = home.highlighted_skills.iter().map(|s| s.name.as_str()).collect();
    println!("Skills: {}\n", skills.join(", "));

    println!("Featured projects ({}):", home.policy.name());
    for project in &home.featured {
        print_project_line(project);
    }

    println!("\n{}", chrome.footer.brand_description);
}

fn print_about(registry: &Registry, order: TimelineOrder) {
    let about = AboutPage::build(registry, order);

    println!("About Me\n");
    println!("{}\n", about.profile.about_description);
    for (label, value) in &about.quick_facts {
        println!("{:>12}: {}", label, value);
    }
    println!();
    for paragraph in &about.profile.personal_story {
        println!("{}\n", paragraph);
    }

    println!("Skills");
    for skill in about.skills {
        println!("  {}: {}", skill.category, skill.technologies.join(", "));
    }

    println!("\nInterests");
    for interest in about.interests {
        println!("  {} {} - {}", interest.icon, interest.name, interest.description);
    }

    println!();
    print_timeline(registry, order);
}

fn print_timeline(registry: &Registry, order: TimelineOrder) {
    let timeline = folio_core::order_timeline(registry.timeline(), order);
    println!("Timeline ({})", timeline.order.label());
    for entry in &timeline.entries {
        println!(
            "  {:<10} {} {} [{}]",
            entry.year,
            entry.kind.icon(),
            entry.title,
            entry.kind.label()
        );
    }
    for rejected in &timeline.rejected {
        eprintln!("  skipped: {}", rejected.reason);
    }
}

fn print_projects(catalog: &Catalog, filter: &FilterState) {
    let page = ProjectsPage::build(Some(catalog), filter);

    if filter.selected_category != CategorySelection::All || !filter.search_term.is_empty() {
        println!(
            "Filter: category={} search='{}'",
            filter.selected_category, filter.search_term
        );
    }
    println!("{}\n", page.summary());

    if let ProjectsView::Matches(projects) = &page.view {
        for project in projects {
            print_project_line(project);
            println!("      {}", project.description);
        }
    }
}

fn print_project_line(project: &ProjectRecord) {
    println!(
        "  #{:<3} {} {:<32} {:<10} {}",
        project.id,
        project.project_type.icon(),
        project.title,
        project.completed_date.format("%Y-%m"),
        project.tech_stack.join(", ")
    );
}

fn contact_service(config: &AppConfig, registry: &Registry) -> ContactService {
    let delay = Duration::from_millis(config.contact.submit_delay_ms);
    ContactService::new(
        Arc::new(SimulatedTransport::new(delay)),
        registry.site().contact_form.subjects.clone(),
    )
}

fn chrono_today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
