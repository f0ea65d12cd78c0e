//! # vx-tui
//!
//! Terminal front end for vaxsearch.
//!
//! This crate renders search-select controls with ratatui and drives them
//! from crossterm keyboard and mouse events. The demo application is a
//! campaign form with a single-selection "Health unit" field and a
//! multi-selection "Vaccines" field.

pub mod app;
pub mod event;
pub mod event_handler;
pub mod tui;
pub mod widgets;

pub use app::{App, Outcome};
pub use tui::Tui;

use anyhow::Result;
use vx_core::config::models::AppConfig;
use vx_protocol::CampaignDraft;

/// Run the campaign form until the user saves or cancels.
///
/// Returns the draft if it was saved.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to or restored.
pub async fn run_app(config: &AppConfig) -> Result<Option<CampaignDraft>> {
    let mut app = App::new(config);
    let mut tui = Tui::init()?;

    let outcome = app.run(&mut tui).await;
    tui.restore()?;

    match outcome? {
        Outcome::Saved(draft) => Ok(Some(draft)),
        Outcome::Cancelled => Ok(None),
    }
}
