use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::*;

use crate::ui::{AppState, ToastLevel, View};

pub fn help_text(view: View) -> &'static str {
    match view {
        View::Form => "↑/↓ Tab move • type to edit • Del clear • Enter sign in • F5 reload • Esc quit",
        View::Authenticated => "l sign out • F5 reload • q/Esc quit",
    }
}

pub fn draw_footer(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans: Vec<Span> = Vec::new();
    if let Some(t) = &state.toast {
        let color = state.theme.toast_color(t.level);
        let tag = match t.level {
            ToastLevel::Success => "[OK]",
            ToastLevel::Error => "[ERROR]",
            ToastLevel::Info => "[INFO]",
        };
        spans.push(Span::styled(
            format!(" {tag} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{}  |  ", t.text),
            Style::default().fg(color),
        ));
    }
    spans.push(Span::styled(
        help_text(state.view).to_string(),
        state.theme.text_muted(),
    ));
    let p = Paragraph::new(Line::from(spans));
    f.render_widget(p, area);
}
