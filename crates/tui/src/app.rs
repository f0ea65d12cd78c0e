//! TUI application state and event loop.
//!
//! The campaign form owns two search-select controls: "Health unit" keeps
//! its selection, "Vaccines" works as a tag picker. Their `on_commit`
//! callbacks post a [`FieldCommit`] on a channel, and the form folds those
//! into its [`CampaignDraft`].

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_stream::StreamExt;
use tracing::{debug, info};
use vx_core::config::models::AppConfig;
use vx_core::search::{SearchSelect, SearchSource};
use vx_core::sources::CatalogSource;
use vx_protocol::{CampaignDraft, HealthUnitHit, SelectionMode, VaccineHit};

use crate::event::{EventStatus, FormCommand};
use crate::event_handler;
use crate::tui::{Tui, TuiEvent};
use crate::widgets::draft_view::{render_draft, render_help};
use crate::widgets::search_select::{Hit, SearchSelectRegions, SearchSelectView};

/// Spinner frame interval while a lookup is in flight.
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// Height of a search-select input box.
const INPUT_HEIGHT: u16 = 3;

/// A commit reported by one of the form's controls.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldCommit {
    HealthUnit(Option<HealthUnitHit>),
    Vaccine(Option<VaccineHit>),
}

/// The control that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    HealthUnit,
    Vaccines,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Focus::HealthUnit => Focus::Vaccines,
            Focus::Vaccines => Focus::HealthUnit,
        }
    }
}

/// How the form was closed.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Saved(CampaignDraft),
    Cancelled,
}

#[derive(Debug, Default)]
struct FieldRegions {
    health_unit: Option<SearchSelectRegions>,
    vaccines: Option<SearchSelectRegions>,
}

/// Main TUI application state.
pub struct App {
    health_unit: SearchSelect<HealthUnitHit>,
    vaccines: SearchSelect<VaccineHit>,
    /// Values committed so far.
    pub draft: CampaignDraft,
    pub focus: Focus,
    commit_rx: UnboundedReceiver<FieldCommit>,
    regions: FieldRegions,
    spinner_frame: usize,
    /// Set once the user saves or cancels.
    pub outcome: Option<Outcome>,
}

impl App {
    /// Build the form over the sources described by `config`.
    pub fn new(config: &AppConfig) -> Self {
        let latency = config.global.source.latency();
        let units: Arc<dyn SearchSource<HealthUnitHit>> = Arc::new(
            CatalogSource::health_units(config.catalog.health_units.clone()).with_latency(latency),
        );
        let vaccines: Arc<dyn SearchSource<VaccineHit>> = Arc::new(
            CatalogSource::vaccines(config.catalog.vaccines.clone()).with_latency(latency),
        );
        Self::with_sources(units, vaccines, *config.search(), CampaignDraft::default())
    }

    /// Build the form over explicit sources, pre-filled from `draft`.
    pub fn with_sources(
        units: Arc<dyn SearchSource<HealthUnitHit>>,
        vaccines: Arc<dyn SearchSource<VaccineHit>>,
        settings: vx_protocol::SearchSettings,
        draft: CampaignDraft,
    ) -> Self {
        let (commit_tx, commit_rx) = unbounded_channel();

        let health_unit =
            SearchSelect::with_shared_source(units, |unit: &HealthUnitHit| unit.name.clone())
                .with_settings(settings)
                .with_mode(SelectionMode::Persist)
                .with_initial_value(draft.health_unit.clone())
                .on_commit(commit_sender(&commit_tx, FieldCommit::HealthUnit));

        let vaccines = SearchSelect::with_shared_source(vaccines, VaccineHit::display_label)
            .with_settings(settings)
            .retain_after_commit(true)
            .on_commit(commit_sender(&commit_tx, FieldCommit::Vaccine));

        Self {
            health_unit,
            vaccines,
            draft,
            focus: Focus::HealthUnit,
            commit_rx,
            regions: FieldRegions::default(),
            spinner_frame: 0,
            outcome: None,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.outcome.is_some()
    }

    fn is_loading(&self) -> bool {
        self.health_unit.is_loading() || self.vaccines.is_loading()
    }

    /// Main event loop.
    ///
    /// Uses `tokio::select!` to handle terminal input and the controls'
    /// timer and lookup signals concurrently.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<Outcome> {
        let mut tui_events = tui.event_stream();
        let frames = tui.frame_requester();

        frames.schedule_frame();

        while !self.should_exit() {
            let loading = self.is_loading();
            select! {
                Some(signal) = self.health_unit.next_signal() => {
                    if self.health_unit.apply(signal) {
                        frames.schedule_frame();
                    }
                }
                Some(signal) = self.vaccines.next_signal() => {
                    if self.vaccines.apply(signal) {
                        frames.schedule_frame();
                    }
                }
                Some(tui_event) = tui_events.next() => {
                    self.handle_tui_event(tui, tui_event)?;
                }
                _ = tokio::time::sleep(SPINNER_INTERVAL), if loading => {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                    frames.schedule_frame();
                }
            }
            self.process_commits();
        }

        Ok(self.outcome.take().unwrap_or(Outcome::Cancelled))
    }

    /// Handle TUI events (keyboard, mouse, resize, draw).
    fn handle_tui_event(&mut self, tui: &mut Tui, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) => {
                self.handle_key_event(key_event);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Mouse(mouse_event) => {
                self.handle_mouse_event(mouse_event);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Paste(text) => {
                self.paste(&text);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Draw => {
                tui.draw(|frame| self.render(frame))?;
            }
        }
        Ok(())
    }

    /// Handle keyboard events.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if let Some(command) = event_handler::form_command(key_event) {
            self.apply_command(command);
            return;
        }

        let status = match self.focus {
            Focus::HealthUnit => event_handler::handle_search_key(&mut self.health_unit, key_event),
            Focus::Vaccines => event_handler::handle_search_key(&mut self.vaccines, key_event),
        };

        if status == EventStatus::NotConsumed
            && self.focus == Focus::Vaccines
            && key_event.kind == KeyEventKind::Press
            && key_event.code == KeyCode::Backspace
        {
            if let Some(removed) = self.draft.remove_last_vaccine() {
                debug!(vaccine = %removed.name, "removed vaccine tag");
            }
        }

        self.process_commits();
    }

    /// Handle mouse events.
    ///
    /// Every control sees every press, so a press outside a control closes
    /// its popup.
    pub fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        let unit_hit = event_handler::handle_search_mouse(
            &mut self.health_unit,
            self.regions.health_unit.as_ref(),
            mouse_event,
        );

        // The health unit popup is drawn over the vaccines input, so a press
        // the health unit control used is outside the vaccines control.
        let vaccine_hit = match unit_hit {
            Some(hit) if hit != Hit::Outside => {
                self.vaccines.dismiss();
                Some(Hit::Outside)
            }
            _ => event_handler::handle_search_mouse(
                &mut self.vaccines,
                self.regions.vaccines.as_ref(),
                mouse_event,
            ),
        };

        match (unit_hit, vaccine_hit) {
            (Some(hit), _) if hit != Hit::Outside => self.focus = Focus::HealthUnit,
            (_, Some(hit)) if hit != Hit::Outside => self.focus = Focus::Vaccines,
            _ => {}
        }

        self.process_commits();
    }

    /// Bracketed paste types the text into the focused control.
    fn paste(&mut self, text: &str) {
        let line = text.lines().next().unwrap_or_default();
        match self.focus {
            Focus::HealthUnit => {
                let query = format!("{}{}", self.health_unit.query(), line);
                self.health_unit.input_changed(query);
            }
            Focus::Vaccines => {
                let query = format!("{}{}", self.vaccines.query(), line);
                self.vaccines.input_changed(query);
            }
        }
        self.process_commits();
    }

    fn apply_command(&mut self, command: FormCommand) {
        match command {
            FormCommand::NextField | FormCommand::PreviousField => {
                // Two fields: next and previous are the same move.
                match self.focus {
                    Focus::HealthUnit => {
                        self.health_unit.dismiss();
                        self.vaccines.focus();
                    }
                    Focus::Vaccines => {
                        self.vaccines.dismiss();
                        self.health_unit.focus();
                    }
                }
                self.focus = self.focus.toggle();
            }
            FormCommand::Save => {
                self.process_commits();
                info!(
                    vaccines = self.draft.vaccines.len(),
                    has_health_unit = self.draft.health_unit.is_some(),
                    "campaign draft saved"
                );
                self.outcome = Some(Outcome::Saved(self.draft.clone()));
            }
            FormCommand::Cancel => {
                info!("campaign form cancelled");
                self.outcome = Some(Outcome::Cancelled);
            }
        }
    }

    /// Fold pending commits into the draft.
    pub fn process_commits(&mut self) {
        while let Ok(commit) = self.commit_rx.try_recv() {
            debug!(?commit, "field commit");
            match commit {
                FieldCommit::HealthUnit(unit) => self.draft.health_unit = unit,
                FieldCommit::Vaccine(Some(vaccine)) => {
                    if !self.draft.add_vaccine(vaccine) {
                        debug!("vaccine already listed");
                    }
                }
                // Clearing the tag input removes no tag.
                FieldCommit::Vaccine(None) => {}
            }
        }
    }

    /// Render the TUI.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),            // Title
                Constraint::Length(INPUT_HEIGHT), // Health unit
                Constraint::Length(INPUT_HEIGHT), // Vaccines
                Constraint::Min(4),               // Draft
                Constraint::Length(1),            // Help
            ])
            .split(area);

        let title = Paragraph::new(Line::styled(
            "New vaccination campaign",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        render_draft(frame, chunks[3], &self.draft);
        render_help(frame, chunks[4]);

        let unit_view = SearchSelectView::new(&self.health_unit, "Health unit")
            .placeholder("Search health units (3+ letters)")
            .focused(self.focus == Focus::HealthUnit)
            .spinner_frame(self.spinner_frame);
        let render_vaccine = |vaccine: &VaccineHit| {
            Line::from(format!("{:>4}  {}", vaccine.id, vaccine.display_label()))
        };
        let vaccine_view = SearchSelectView::new(&self.vaccines, "Vaccines")
            .placeholder("Add vaccines (3+ letters)")
            .focused(self.focus == Focus::Vaccines)
            .spinner_frame(self.spinner_frame)
            .render_candidate(&render_vaccine);

        let buf = frame.buffer_mut();
        let mut unit_regions = unit_view.render_input(chunks[1], buf);
        let mut vaccine_regions = vaccine_view.render_input(chunks[2], buf);
        // Popups last, over the inputs and the draft.
        vaccine_view.render_popup(&mut vaccine_regions, area, buf);
        unit_view.render_popup(&mut unit_regions, area, buf);

        let cursor = match self.focus {
            Focus::HealthUnit => unit_regions.cursor,
            Focus::Vaccines => vaccine_regions.cursor,
        };
        if let Some(position) = cursor {
            frame.set_cursor_position(position);
        }

        self.regions = FieldRegions {
            health_unit: Some(unit_regions),
            vaccines: Some(vaccine_regions),
        };
    }
}

/// `on_commit` callback forwarding to the form's commit channel.
fn commit_sender<T, F>(
    tx: &UnboundedSender<FieldCommit>,
    wrap: F,
) -> impl FnMut(Option<&T>) + Send + 'static
where
    T: Clone + 'static,
    F: Fn(Option<T>) -> FieldCommit + Send + 'static,
{
    let tx = tx.clone();
    move |item: Option<&T>| {
        let _ = tx.send(wrap(item.cloned()));
    }
}
