// Terminal UI: ratatui dashboard and live session feedback

mod app;
mod dashboard;
pub mod live;
mod widgets;

pub use app::{App, Panel};
pub use dashboard::Dashboard;
