use crate::app::Effect;
use crate::form::{FormController, SubmitOutcome};
use crate::model::{AppConfig, FieldDescriptor};
use crate::theme::Theme;
use crate::ui::ToastLevel;
use crate::widgets::auth_form::{draw_auth_form, submit_index, FormView};
use crossterm::event::KeyCode;
use ratatui::prelude::*;

pub struct AuthFormWidget {
    pub controller: FormController,
    pub view: FormView,
    theme: Theme,
}

impl AuthFormWidget {
    pub fn new(config: &AppConfig, theme: Theme, on_success: impl FnMut() + 'static) -> Self {
        Self {
            controller: FormController::new(config.fields.clone(), on_success),
            view: FormView::new(&config.title, &config.description),
            theme,
        }
    }

    /// Pick up a reloaded config. Returns whether the field set changed,
    /// in which case every value and the cursor start over.
    pub fn apply_config(&mut self, config: &AppConfig) -> bool {
        self.view.title = config.title.clone();
        self.view.description = config.description.clone();
        let changed = self.controller.replace_schema(config.fields.clone());
        if changed {
            self.view.reset();
        }
        changed
    }

    fn selected_field(&self) -> Option<&FieldDescriptor> {
        self.controller.store().schema().get(self.view.selected)
    }

    /// Route an edit through the controller and mark the field as touched.
    pub fn edit_selected(&mut self, change: impl FnOnce(&mut String)) -> bool {
        let Some(id) = self.selected_field().map(|d| d.id.clone()) else {
            return false;
        };
        let mut value = self.controller.store().value(&id).to_string();
        change(&mut value);
        match self.controller.edit(&id, value) {
            Ok(applied) => {
                if applied {
                    self.view.touched.insert(id);
                }
                applied
            }
            Err(e) => {
                tracing::warn!("edit dropped: {e}");
                false
            }
        }
    }

    pub fn clear_selected(&mut self) -> bool {
        let Some(id) = self.selected_field().map(|d| d.id.clone()) else {
            return false;
        };
        if self.controller.store().value(&id).is_empty() {
            return false;
        }
        let applied = self.controller.clear(&id);
        if applied {
            self.view.touched.insert(id);
        }
        applied
    }

    pub fn submit(&mut self) -> Vec<Effect> {
        match self.controller.submit() {
            SubmitOutcome::Accepted => Vec::new(),
            SubmitOutcome::Rejected { invalid } => {
                // Reveal errors on every field that blocks submission
                self.view.touched.extend(invalid.iter().cloned());
                let labels: Vec<String> = invalid
                    .iter()
                    .filter_map(|id| self.controller.store().descriptor(id))
                    .map(|d| d.label.clone())
                    .collect();
                vec![Effect::ShowToast {
                    text: format!("Check: {}", labels.join(", ")),
                    level: ToastLevel::Error,
                    seconds: 3,
                }]
            }
            SubmitOutcome::AlreadySubmitted => Vec::new(),
        }
    }

    fn move_selection(&mut self, down: bool) {
        let last = submit_index(&self.controller);
        self.view.selected = if down {
            (self.view.selected + 1).min(last)
        } else {
            self.view.selected.saturating_sub(1)
        };
    }
}

impl crate::widgets::Widget for AuthFormWidget {
    fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, tick: u64) {
        let cursor_on = tick % 2 == 0;
        draw_auth_form(
            f,
            area,
            &self.controller,
            &self.view,
            &self.theme,
            focused,
            cursor_on,
        );
    }

    fn on_key(&mut self, key: KeyCode) -> Vec<Effect> {
        match key {
            KeyCode::Up | KeyCode::BackTab => {
                self.move_selection(false);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Tab => {
                self.move_selection(true);
                Vec::new()
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.edit_selected(|v| {
                    v.pop();
                });
                Vec::new()
            }
            KeyCode::Delete => {
                self.clear_selected();
                Vec::new()
            }
            KeyCode::Char(c) => {
                self.edit_selected(|v| v.push(c));
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}
