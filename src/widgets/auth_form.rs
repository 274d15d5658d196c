use crate::form::FormController;
use crate::model::{FieldDescriptor, FieldKind};
use crate::theme::Theme;
use crate::widgets::chrome::panel_block;
use crate::widgets::header::draw_header;
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::collections::HashSet;

pub const SUBMIT_LABEL: &str = "[ Sign In ]";
pub const CLEAR_MARKER: &str = " [x]";

/// Presentation-only state: cursor position, chrome text and which fields
/// have been edited. Validation never looks at any of it.
#[derive(Clone, Debug, Default)]
pub struct FormView {
    pub title: String,
    pub description: String,
    pub selected: usize,
    pub touched: HashSet<String>,
}

impl FormView {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.touched.clear();
    }
}

/// Index of the submit button; field rows occupy `0..submit_index`.
pub fn submit_index(ctl: &FormController) -> usize {
    ctl.store().schema().len()
}

fn display_value(desc: &FieldDescriptor, value: &str) -> String {
    match desc.kind {
        FieldKind::Text | FieldKind::Email => value.to_string(),
        FieldKind::Password => "•".repeat(value.chars().count()),
    }
}

pub fn draw_auth_form(
    f: &mut Frame,
    area: Rect,
    ctl: &FormController,
    view: &FormView,
    theme: &Theme,
    focused: bool,
    cursor_on: bool,
) {
    let block = panel_block("", focused, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);
    draw_header(f, chunks[0], &view.title, &view.description, theme);

    let store = ctl.store();
    let mut lines: Vec<Line> = vec![Line::raw("")];
    for (i, desc) in store.schema().iter().enumerate() {
        let selected = i == view.selected;
        let value = store.value(&desc.id);
        let errors = store.errors_for(&desc.id);
        let show_errors = view.touched.contains(&desc.id) && !errors.is_empty();

        let marker = if selected { '›' } else { ' ' };
        let req = if desc.required { " *" } else { "" };
        let label_style = if show_errors {
            theme.text_error()
        } else {
            Style::default()
        };
        let value_style = match (show_errors, selected) {
            (true, true) => theme.text_error().add_modifier(Modifier::BOLD),
            (true, false) => theme.text_error(),
            (false, true) => theme.text_editing_bold(),
            (false, false) => Style::default(),
        };

        let mut spans = vec![Span::styled(
            format!("{marker} {}{req}: ", desc.label),
            label_style,
        )];
        if value.is_empty() {
            if selected && cursor_on {
                spans.push(Span::styled("▏", value_style));
            }
            if let Some(ph) = &desc.placeholder {
                spans.push(Span::styled(ph.clone(), theme.text_muted()));
            }
        } else {
            let mut shown = display_value(desc, value);
            if selected && cursor_on {
                shown.push('▏');
            }
            spans.push(Span::styled(shown, value_style));
            spans.push(Span::styled(CLEAR_MARKER, theme.text_muted()));
        }
        lines.push(Line::from(spans));

        if show_errors {
            for err in errors {
                lines.push(Line::from(Span::styled(
                    format!("    ✗ {err}"),
                    theme.text_error(),
                )));
            }
        }
    }
    lines.push(Line::raw(""));
    let on_submit = view.selected == submit_index(ctl);
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(SUBMIT_LABEL, theme.button_style(ctl.is_valid(), on_submit)),
    ]));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(p, chunks[1]);
}
