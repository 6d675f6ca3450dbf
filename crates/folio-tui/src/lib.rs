// Terminal UI for browsing the portfolio
pub mod app;
pub mod runner;
pub mod ui;

pub use app::{App, FormField, InputMode, Tab};
pub use runner::run_tui;
