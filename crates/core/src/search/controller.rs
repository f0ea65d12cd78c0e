//! The search-select controller.
//!
//! `SearchSelect` ties the debounce timer, the query gate, the fetch
//! coordinator and the selection state into one state machine. It is
//! headless: a front end feeds it user events (`input_changed`, `select`,
//! `clear`, `dismiss`, ...) and renders from its accessors.
//!
//! Timer expiry and lookup results arrive asynchronously. They are posted to
//! an internal channel and applied by the owner's event loop:
//!
//! ```rust,no_run
//! use vx_core::search::SearchSelect;
//! use vx_core::sources::CatalogSource;
//!
//! # async fn example() {
//! let source = CatalogSource::new(vec!["CoronaVac".to_string()], |s: &String| s.clone());
//! let mut field = SearchSelect::new(source, |s: &String| s.clone())
//!     .on_commit(|item| println!("committed {item:?}"));
//!
//! field.input_changed("cor");
//! // Debounce timer, then the lookup itself.
//! field.pump().await;
//! field.pump().await;
//! assert_eq!(field.results().len(), 1);
//! # }
//! ```

use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};
use vx_protocol::search_models::{SearchSettings, SelectionMode};

use crate::search::coordinator::{FetchCoordinator, Settlement};
use crate::search::debounce::Debouncer;
use crate::search::phase::{Phase, PopupView};
use crate::search::signal::{FetchOutcome, RequestId, Signal};
use crate::search::source::SearchSource;

/// Canonical label of an item, shown in the input once it is selected.
pub type DisplayFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Owner callback notified of every user-driven commit (`Some`) or clear (`None`).
pub type CommitFn<T> = Box<dyn FnMut(Option<&T>) + Send>;

/// Debounced asynchronous search-select control.
///
/// Must be driven from within a Tokio runtime: typing arms a timer task and
/// an eligible query spawns a lookup task.
pub struct SearchSelect<T> {
    settings: SearchSettings,
    mode: SelectionMode,
    display: DisplayFn<T>,
    on_commit: Option<CommitFn<T>>,
    query: String,
    selection: Option<T>,
    phase: Phase,
    popup_open: bool,
    highlighted: usize,
    debouncer: Debouncer,
    coordinator: FetchCoordinator<T>,
    signals_tx: UnboundedSender<Signal<T>>,
    signals_rx: UnboundedReceiver<Signal<T>>,
}

impl<T> SearchSelect<T>
where
    T: Clone + Send + 'static,
{
    /// Create a control in persist mode with default settings.
    pub fn new<S, D>(source: S, display: D) -> Self
    where
        S: SearchSource<T> + 'static,
        D: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self::with_shared_source(Arc::new(source), display)
    }

    /// Create a control over a source shared with other controls.
    pub fn with_shared_source<D>(source: Arc<dyn SearchSource<T>>, display: D) -> Self
    where
        D: Fn(&T) -> String + Send + Sync + 'static,
    {
        let settings = SearchSettings::default();
        let (signals_tx, signals_rx) = unbounded_channel();

        Self {
            settings,
            mode: SelectionMode::default(),
            display: Arc::new(display),
            on_commit: None,
            query: String::new(),
            selection: None,
            phase: Phase::Idle,
            popup_open: false,
            highlighted: 0,
            debouncer: Debouncer::new(settings.debounce_window()),
            coordinator: FetchCoordinator::new(source, settings.fetch_timeout()),
            signals_tx,
            signals_rx,
        }
    }

    pub fn with_settings(mut self, settings: SearchSettings) -> Self {
        self.debouncer = Debouncer::new(settings.debounce_window());
        self.coordinator.set_timeout(settings.fetch_timeout());
        self.settings = settings;
        self
    }

    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// `true` switches to [`SelectionMode::Tag`].
    pub fn retain_after_commit(self, retain_after_commit: bool) -> Self {
        self.with_mode(SelectionMode::from_retain_after_commit(retain_after_commit))
    }

    pub fn on_commit<F>(mut self, on_commit: F) -> Self
    where
        F: FnMut(Option<&T>) + Send + 'static,
    {
        self.on_commit = Some(Box::new(on_commit));
        self
    }

    /// Seed the selection, as a form editing an existing record would.
    pub fn with_initial_value(mut self, value: Option<T>) -> Self {
        self.set_initial_value(value);
        self
    }

    // --- accessors ---

    /// Text currently shown in the input.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selection(&self) -> Option<&T> {
        self.selection.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    pub fn results(&self) -> &[T] {
        self.coordinator.results()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Lookup whose result the control is waiting for, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.coordinator.in_flight()
    }

    /// Label of `item` as configured for this control.
    pub fn display_text(&self, item: &T) -> String {
        (self.display)(item)
    }

    /// What the results popup should show right now.
    pub fn popup_view(&self) -> PopupView<'_, T> {
        if !self.popup_open {
            return PopupView::Hidden;
        }
        let results = self.coordinator.results();
        if !results.is_empty() {
            PopupView::Candidates(results)
        } else if !self.is_loading() && self.settings.accepts_query(&self.query) {
            PopupView::NoResults
        } else {
            PopupView::Hidden
        }
    }

    /// Whether a clear affordance should be offered.
    pub fn shows_clear_button(&self) -> bool {
        !self.query.is_empty() || (self.mode.holds_selection() && self.selection.is_some())
    }

    // --- user events ---

    /// The input text changed.
    ///
    /// Any held selection is dropped (and the owner told so), the in-flight
    /// lookup is abandoned and the debounce timer is re-armed. Emptying the
    /// input closes the popup right away.
    pub fn input_changed(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.query {
            return;
        }
        self.query = text;
        self.coordinator.retire();

        if self.selection.take().is_some() {
            debug!("edit cleared the selection");
            if let Some(on_commit) = self.on_commit.as_mut() {
                on_commit(None);
            }
        }

        if self.query.is_empty() {
            self.reset_search();
            self.phase = Phase::Idle;
            return;
        }

        self.debouncer.restart(&self.signals_tx);
        self.phase = Phase::Debouncing;
    }

    /// Append a typed character to the input.
    pub fn push_char(&mut self, c: char) {
        let mut text = self.query.clone();
        text.push(c);
        self.input_changed(text);
    }

    /// Remove the last character of the input.
    ///
    /// Returns `false` if the input was already empty.
    pub fn pop_char(&mut self) -> bool {
        let mut text = self.query.clone();
        if text.pop().is_none() {
            return false;
        }
        self.input_changed(text);
        true
    }

    /// Commit the candidate at `index` of the visible results.
    ///
    /// Returns `false` if the popup is closed or `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if !self.popup_open {
            return false;
        }
        let Some(item) = self.coordinator.results().get(index).cloned() else {
            return false;
        };

        debug!(index, "committing candidate");
        if let Some(on_commit) = self.on_commit.as_mut() {
            on_commit(Some(&item));
        }

        self.reset_search();
        match self.mode {
            SelectionMode::Persist => {
                self.query = (self.display)(&item);
                self.selection = Some(item);
                self.phase = Phase::Committed;
            }
            SelectionMode::Tag => {
                self.query.clear();
                self.selection = None;
                self.phase = Phase::Idle;
            }
        }
        true
    }

    /// Commit the keyboard-highlighted candidate.
    pub fn commit_highlighted(&mut self) -> bool {
        self.select(self.highlighted)
    }

    pub fn highlight_next(&mut self) {
        let len = self.coordinator.results().len();
        if self.highlighted + 1 < len {
            self.highlighted += 1;
        }
    }

    pub fn highlight_previous(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Explicit clear: empties the input, drops the selection and tells the
    /// owner.
    pub fn clear(&mut self) {
        self.reset_search();
        self.selection = None;
        self.query.clear();
        self.phase = Phase::Idle;
        if let Some(on_commit) = self.on_commit.as_mut() {
            on_commit(None);
        }
    }

    /// Pointer interaction outside the control.
    ///
    /// Closes the popup and stops any pending search. Query, selection and
    /// the current results are left as they are. Returns `true` if anything
    /// visible changed.
    pub fn dismiss(&mut self) -> bool {
        let was_open = std::mem::replace(&mut self.popup_open, false);
        match self.phase {
            Phase::Debouncing | Phase::Fetching { .. } | Phase::Showing => {
                self.debouncer.cancel();
                self.coordinator.retire();
                self.phase = Phase::Idle;
                true
            }
            Phase::Idle | Phase::Committed => was_open,
        }
    }

    /// The input gained focus: reopen the popup over the last results when
    /// the query is searchable.
    ///
    /// If those results answer an earlier query (a dismiss interrupted the
    /// search for the current one), they are dropped and the search is
    /// re-armed instead; the popup opens when it settles.
    pub fn focus(&mut self) -> bool {
        if self.popup_open
            || !matches!(self.phase, Phase::Idle | Phase::Showing)
            || (self.mode.holds_selection() && self.selection.is_some())
            || !self.settings.accepts_query(&self.query)
        {
            return false;
        }

        if self.coordinator.answered_query() != Some(self.query.as_str()) {
            debug!(query = %self.query, "results are stale; searching again");
            self.reset_search();
            self.debouncer.restart(&self.signals_tx);
            self.phase = Phase::Debouncing;
            return true;
        }

        self.popup_open = true;
        true
    }

    /// Owner-driven value synchronization.
    ///
    /// `Some` always replaces the current selection and shows its label,
    /// without a lookup. `None` clears a held selection and the input. The
    /// owner already knows the value, so `on_commit` is not called.
    pub fn set_initial_value(&mut self, value: Option<T>) {
        match value {
            Some(item) => {
                self.reset_search();
                self.query = (self.display)(&item);
                self.selection = Some(item);
                self.phase = Phase::Committed;
            }
            None => {
                if self.selection.take().is_none() {
                    return;
                }
                self.reset_search();
                self.query.clear();
                self.phase = Phase::Idle;
            }
        }
    }

    // --- event loop hooks ---

    /// Wait for the next timer or lookup signal.
    pub async fn next_signal(&mut self) -> Option<Signal<T>> {
        self.signals_rx.recv().await
    }

    /// Apply a signal produced by this control's background tasks.
    ///
    /// Returns `true` if the control's visible state changed.
    pub fn apply(&mut self, signal: Signal<T>) -> bool {
        match signal {
            Signal::DebounceElapsed { generation } => self.on_debounce_elapsed(generation),
            Signal::FetchSettled {
                request,
                query,
                outcome,
            } => self.on_fetch_settled(request, &query, outcome),
        }
    }

    /// Wait for and apply one signal.
    pub async fn pump(&mut self) -> bool {
        match self.next_signal().await {
            Some(signal) => self.apply(signal),
            None => false,
        }
    }

    fn on_debounce_elapsed(&mut self, generation: u64) -> bool {
        if !self.debouncer.take_elapsed(generation) || self.phase != Phase::Debouncing {
            debug!(generation, "ignoring superseded debounce timer");
            return false;
        }

        let blocked = self.mode.holds_selection() && self.selection.is_some();
        if blocked || !self.settings.accepts_query(&self.query) {
            self.coordinator.clear();
            self.popup_open = false;
            self.highlighted = 0;
            self.phase = if self.selection.is_some() {
                Phase::Committed
            } else {
                Phase::Idle
            };
            return true;
        }

        let request = self.coordinator.issue(&self.query, &self.signals_tx);
        debug!(%request, query = %self.query, "issued search");
        self.phase = Phase::Fetching { request };
        true
    }

    fn on_fetch_settled(
        &mut self,
        request: RequestId,
        query: &str,
        outcome: FetchOutcome<T>,
    ) -> bool {
        match self.coordinator.settle(request, outcome) {
            Settlement::Stale => {
                debug!(%request, query, "discarding stale search response");
                return false;
            }
            Settlement::Applied { count } => {
                debug!(%request, query, count, "search results applied");
            }
            Settlement::Failed(err) => {
                warn!(%request, query, error = %err, "search failed; showing no results");
            }
            Settlement::TimedOut => {
                warn!(%request, query, "search timed out; showing no results");
            }
        }

        self.highlighted = 0;
        self.popup_open = true;
        self.phase = Phase::Showing;
        true
    }

    /// Stop pending work, drop results and close the popup.
    fn reset_search(&mut self) {
        self.debouncer.cancel();
        self.coordinator.retire();
        self.coordinator.clear();
        self.popup_open = false;
        self.highlighted = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::source::SourceError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct PrefixSource {
        items: Vec<String>,
    }

    #[async_trait]
    impl SearchSource<String> for PrefixSource {
        async fn search(&self, query: &str) -> Result<Vec<String>, SourceError> {
            let query = query.to_lowercase();
            Ok(self
                .items
                .iter()
                .filter(|item| item.to_lowercase().starts_with(&query))
                .cloned()
                .collect())
        }
    }

    fn field() -> SearchSelect<String> {
        let source = PrefixSource {
            items: vec!["CoronaVac".to_string(), "Comirnaty".to_string(), "BCG".to_string()],
        };
        SearchSelect::new(source, |s: &String| s.clone())
    }

    async fn settle(field: &mut SearchSelect<String>) {
        while !matches!(field.phase(), Phase::Showing | Phase::Idle | Phase::Committed) {
            field.pump().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_then_settling_shows_candidates() {
        let mut field = field();

        field.input_changed("co");
        assert_eq!(field.phase(), Phase::Debouncing);
        field.input_changed("cor");
        settle(&mut field).await;

        assert_eq!(field.phase(), Phase::Showing);
        assert!(field.is_popup_open());
        assert_eq!(field.popup_view(), PopupView::Candidates(&["CoronaVac".to_string()][..]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_goes_idle() {
        let mut field = field();

        field.input_changed("co");
        settle(&mut field).await;

        assert_eq!(field.phase(), Phase::Idle);
        assert!(field.in_flight().is_none());
        assert_eq!(field.popup_view(), PopupView::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_results_view() {
        let mut field = field();

        field.input_changed("xyz");
        settle(&mut field).await;

        assert!(field.results().is_empty());
        assert_eq!(field.popup_view(), PopupView::NoResults);
    }

    #[tokio::test(start_paused = true)]
    async fn test_highlight_and_commit() {
        let commits = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&commits);
        let mut field = field().on_commit(move |item| {
            sink.lock().unwrap().push(item.cloned());
        });

        field.input_changed("co");
        field.input_changed("com");
        field.input_changed("co");
        field.push_char('m');
        settle(&mut field).await;
        assert_eq!(field.results(), &["Comirnaty".to_string()]);

        field.highlight_next();
        assert_eq!(field.highlighted(), 0);
        field.highlight_previous();
        assert_eq!(field.highlighted(), 0);

        assert!(field.commit_highlighted());
        assert_eq!(field.query(), "Comirnaty");
        assert_eq!(field.phase(), Phase::Committed);
        assert_eq!(*commits.lock().unwrap(), vec![Some("Comirnaty".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_requires_open_popup() {
        let mut field = field();

        field.input_changed("cor");
        settle(&mut field).await;
        field.dismiss();

        assert!(!field.select(0));
        assert_eq!(field.results().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_reopens_popup() {
        let mut field = field();

        field.input_changed("cor");
        settle(&mut field).await;
        assert!(field.dismiss());
        assert!(!field.is_popup_open());

        assert!(field.focus());
        assert_eq!(field.popup_view(), PopupView::Candidates(&["CoronaVac".to_string()][..]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pop_char_on_empty_input() {
        let mut field = field();
        assert!(!field.pop_char());

        field.push_char('b');
        assert!(field.pop_char());
        assert_eq!(field.query(), "");
        assert_eq!(field.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_button_visibility() {
        let mut field = field();
        assert!(!field.shows_clear_button());

        field.input_changed("c");
        assert!(field.shows_clear_button());

        field.clear();
        assert!(!field.shows_clear_button());

        field.set_initial_value(Some("BCG".to_string()));
        assert!(field.shows_clear_button());
    }

    #[test]
    fn test_initial_value_without_runtime() {
        let field = field().with_initial_value(Some("BCG".to_string()));

        assert_eq!(field.query(), "BCG");
        assert_eq!(field.selection(), Some(&"BCG".to_string()));
        assert_eq!(field.phase(), Phase::Committed);
    }
}
