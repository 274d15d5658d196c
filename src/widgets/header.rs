use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::*;

/// Form heading: bold title over a muted description line.
pub fn draw_header(f: &mut Frame, area: Rect, title: &str, description: &str, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(title.to_string(), theme.title_style())),
        Line::from(Span::styled(description.to_string(), theme.text_muted())),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM).border_style(theme.border_unfocused()));
    f.render_widget(p, area);
}
