//! Event handling utilities for the TUI.
//!
//! This module maps terminal input onto search-select operations:
//! - Form keys (focus cycling, save, cancel)
//! - Keyboard input for the focused control
//! - Mouse presses, including presses outside a control

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use vx_core::search::SearchSelect;

use crate::event::{EventStatus, FormCommand};
use crate::widgets::search_select::{Hit, SearchSelectRegions};

/// Map a key to a form-level command, if it is bound to one.
pub fn form_command(key_event: KeyEvent) -> Option<FormCommand> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Tab => Some(FormCommand::NextField),
        KeyCode::BackTab => Some(FormCommand::PreviousField),
        KeyCode::Char('s') if ctrl => Some(FormCommand::Save),
        KeyCode::Char('c') if ctrl => Some(FormCommand::Cancel),
        _ => None,
    }
}

/// Handle a keyboard event for the focused control.
pub fn handle_search_key<T>(field: &mut SearchSelect<T>, key_event: KeyEvent) -> EventStatus
where
    T: Clone + Send + 'static,
{
    if key_event.kind != KeyEventKind::Press {
        return EventStatus::NotConsumed;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char('u') if ctrl => {
            field.clear();
            EventStatus::Consumed
        }
        KeyCode::Char(_) if ctrl => EventStatus::NotConsumed,
        KeyCode::Char(c) => {
            field.push_char(c);
            EventStatus::Consumed
        }
        KeyCode::Backspace => field.pop_char().into(),
        KeyCode::Up if field.is_popup_open() => {
            field.highlight_previous();
            EventStatus::Consumed
        }
        KeyCode::Down if field.is_popup_open() => {
            field.highlight_next();
            EventStatus::Consumed
        }
        KeyCode::Down => field.focus().into(),
        KeyCode::Enter => field.commit_highlighted().into(),
        KeyCode::Esc => field.dismiss().into(),
        _ => EventStatus::NotConsumed,
    }
}

/// Handle a mouse event for one control.
///
/// Only left-button presses are acted on. A press outside the control
/// dismisses it. Returns what the press hit, or `None` for any other mouse
/// event or a control that has not been drawn yet.
pub fn handle_search_mouse<T>(
    field: &mut SearchSelect<T>,
    regions: Option<&SearchSelectRegions>,
    mouse_event: MouseEvent,
) -> Option<Hit>
where
    T: Clone + Send + 'static,
{
    if mouse_event.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }

    let hit = regions?.hit_test(mouse_event.column, mouse_event.row);
    match hit {
        Hit::Outside => {
            field.dismiss();
        }
        Hit::Input => {
            field.focus();
        }
        Hit::ClearButton => field.clear(),
        Hit::Candidate(index) => {
            field.select(index);
        }
    }
    Some(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;
    use vx_core::search::Phase;
    use vx_core::sources::ScriptedSource;

    fn field() -> SearchSelect<String> {
        let source = ScriptedSource::new().respond(
            "cov",
            vec!["CoronaVac".to_string(), "Covishield".to_string()],
        );
        SearchSelect::new(source, |s: &String| s.clone())
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn type_text(field: &mut SearchSelect<String>, text: &str) {
        for c in text.chars() {
            handle_search_key(field, KeyEvent::from(KeyCode::Char(c)));
        }
    }

    async fn settle(field: &mut SearchSelect<String>) {
        field.pump().await;
        field.pump().await;
    }

    fn regions() -> SearchSelectRegions {
        SearchSelectRegions {
            input: Rect::new(0, 0, 20, 3),
            clear_button: Some(Rect::new(18, 1, 1, 1)),
            popup: Some(Rect::new(0, 3, 20, 4)),
            rows: vec![(0, Rect::new(1, 4, 18, 1)), (1, Rect::new(1, 5, 18, 1))],
            cursor: None,
        }
    }

    #[test]
    fn test_form_commands() {
        assert_eq!(form_command(KeyEvent::from(KeyCode::Tab)), Some(FormCommand::NextField));
        assert_eq!(form_command(KeyEvent::from(KeyCode::BackTab)), Some(FormCommand::PreviousField));
        assert_eq!(form_command(ctrl('s')), Some(FormCommand::Save));
        assert_eq!(form_command(ctrl('c')), Some(FormCommand::Cancel));
        assert_eq!(form_command(KeyEvent::from(KeyCode::Char('s'))), None);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Tab,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(form_command(release), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_and_backspace() {
        let mut field = field();

        type_text(&mut field, "cox");
        assert_eq!(field.query(), "cox");

        assert_eq!(
            handle_search_key(&mut field, KeyEvent::from(KeyCode::Backspace)),
            EventStatus::Consumed
        );
        assert_eq!(field.query(), "co");

        field.input_changed("");
        assert_eq!(
            handle_search_key(&mut field, KeyEvent::from(KeyCode::Backspace)),
            EventStatus::NotConsumed
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_arrows_and_enter_commit() {
        let mut field = field();
        type_text(&mut field, "cov");
        settle(&mut field).await;

        handle_search_key(&mut field, KeyEvent::from(KeyCode::Down));
        assert_eq!(field.highlighted(), 1);
        handle_search_key(&mut field, KeyEvent::from(KeyCode::Up));
        assert_eq!(field.highlighted(), 0);

        assert!(handle_search_key(&mut field, KeyEvent::from(KeyCode::Enter)).is_consumed());
        assert_eq!(field.query(), "CoronaVac");
        assert_eq!(field.phase(), Phase::Committed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_then_down_reopens() {
        let mut field = field();
        type_text(&mut field, "cov");
        settle(&mut field).await;

        assert!(handle_search_key(&mut field, KeyEvent::from(KeyCode::Esc)).is_consumed());
        assert!(!field.is_popup_open());

        assert!(handle_search_key(&mut field, KeyEvent::from(KeyCode::Down)).is_consumed());
        assert!(field.is_popup_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ctrl_u_clears() {
        let mut field = field();
        type_text(&mut field, "cov");

        assert!(handle_search_key(&mut field, ctrl('u')).is_consumed());
        assert_eq!(field.query(), "");
        assert!(!handle_search_key(&mut field, ctrl('s')).is_consumed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_outside_click_dismisses() {
        let mut field = field();
        type_text(&mut field, "cov");
        settle(&mut field).await;
        assert!(field.is_popup_open());

        let hit = handle_search_mouse(&mut field, Some(&regions()), click(40, 10));

        assert_eq!(hit, Some(Hit::Outside));
        assert!(!field.is_popup_open());
        assert_eq!(field.query(), "cov");
        assert_eq!(field.results().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_on_candidate_commits() {
        let mut field = field();
        type_text(&mut field, "cov");
        settle(&mut field).await;

        let hit = handle_search_mouse(&mut field, Some(&regions()), click(4, 5));

        assert_eq!(hit, Some(Hit::Candidate(1)));
        assert_eq!(field.query(), "Covishield");
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_on_clear_button() {
        let mut field = field();
        type_text(&mut field, "cov");

        let hit = handle_search_mouse(&mut field, Some(&regions()), click(18, 1));

        assert_eq!(hit, Some(Hit::ClearButton));
        assert_eq!(field.query(), "");
    }

    #[test]
    fn test_other_mouse_events_are_ignored() {
        let mut field = field();
        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 40,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };

        assert_eq!(handle_search_mouse(&mut field, Some(&regions()), moved), None);
        assert_eq!(handle_search_mouse(&mut field, None, click(40, 10)), None);
    }
}
