// Core portfolio logic - content tables, the project catalog and everything derived from them
pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod export;
pub mod featured;
pub mod filter;
pub mod models;
pub mod pages;
pub mod registry;
pub mod timeline;

pub use catalog::{Catalog, LoadReport, RejectedRecord};
pub use config::AppConfig;
pub use contact::{
    ContactForm, ContactService, ContactTransport, FormStatus, SimulatedTransport,
    SubmissionHandle, SubmissionReceipt,
};
pub use error::Error;
pub use export::{ExportFormat, Exporter};
pub use featured::SelectionPolicy;
pub use filter::{available_categories, filter_projects, CategorySelection, FilterState, ProjectsView};
pub use models::{ProjectRecord, ProjectType};
pub use pages::{AboutPage, Chrome, ContactPage, HomePage, ProjectsPage};
pub use registry::{Registry, TableName};
pub use timeline::{order_timeline, start_year, OrderedTimeline, TimelineOrder};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
