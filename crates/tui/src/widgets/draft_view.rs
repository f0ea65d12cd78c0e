//! Summary of the campaign draft assembled so far.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use vx_protocol::CampaignDraft;

/// Renders the draft: the chosen health unit and the vaccine tags.
///
/// # Arguments
///
/// * `frame` - The frame to render into
/// * `area` - The area to render within
/// * `draft` - Values committed by the form's controls
pub fn render_draft(frame: &mut Frame, area: Rect, draft: &CampaignDraft) {
    let block = Block::default().borders(Borders::ALL).title("Campaign draft");

    let unit = match &draft.health_unit {
        Some(unit) => Span::styled(unit.name.clone(), Style::default().fg(Color::Green)),
        None => Span::styled("not selected", Style::default().fg(Color::DarkGray)),
    };

    let mut tags: Vec<Span> = Vec::new();
    if draft.vaccines.is_empty() {
        tags.push(Span::styled("none", Style::default().fg(Color::DarkGray)));
    }
    for vaccine in &draft.vaccines {
        tags.push(Span::styled(
            format!("[{}]", vaccine.display_label()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        tags.push(Span::raw(" "));
    }

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut vaccines_line = vec![Span::styled("Vaccines: ", bold)];
    vaccines_line.extend(tags);

    let lines = vec![
        Line::from(vec![Span::styled("Health unit: ", bold), unit]),
        Line::from(vaccines_line),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Key help shown at the bottom of the form.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" next field  "),
        Span::styled("↑/↓ Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" pick  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" close  "),
        Span::styled("Ctrl+U", Style::default().fg(Color::Yellow)),
        Span::raw(" clear  "),
        Span::styled("Ctrl+S", Style::default().fg(Color::Yellow)),
        Span::raw(" save  "),
        Span::styled("Ctrl+C", Style::default().fg(Color::Yellow)),
        Span::raw(" cancel"),
    ]);
    frame.render_widget(Paragraph::new(help), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use uuid::Uuid;
    use vx_protocol::{HealthUnitHit, VaccineHit};

    fn render(draft: &CampaignDraft) -> String {
        let backend = TestBackend::new(60, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_draft(frame, frame.area(), draft))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_empty_draft() {
        let content = render(&CampaignDraft::default());
        assert!(content.contains("Campaign draft"));
        assert!(content.contains("not selected"));
        assert!(content.contains("none"));
    }

    #[test]
    fn test_draft_with_values() {
        let draft = CampaignDraft {
            health_unit: Some(HealthUnitHit {
                id: Uuid::new_v4(),
                name: "UBS Centro".to_string(),
            }),
            vaccines: vec![VaccineHit {
                id: 1,
                name: "CoronaVac".to_string(),
                manufacturer_name: "Sinovac".to_string(),
            }],
        };

        let content = render(&draft);
        assert!(content.contains("UBS Centro"));
        assert!(content.contains("[CoronaVac (Sinovac)]"));
    }
}
