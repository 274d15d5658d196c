use crate::app::{update, AppMsg, Effect};
use crate::config::{self, ConfigSource};
use crate::model::AppConfig;
use crate::theme::Theme;
use crate::widgets::auth_form_widget::AuthFormWidget;
use crate::widgets::status_bar::draw_footer;
use crate::widgets::Widget;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Form,
    Authenticated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

pub(crate) struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) source: ConfigSource,
    pub(crate) theme: Theme,
    pub(crate) view: View,
    pub(crate) form: AuthFormWidget,
    pub(crate) toast: Option<Toast>,
    pub(crate) tick: u64,
    pub(crate) quit: bool,
    tx: Sender<AppMsg>,
    rx: Receiver<AppMsg>,
}

// The success callback only posts a message; the shell reacts when the
// channel is drained at the end of the same key handler.
fn new_form(config: &AppConfig, theme: &Theme, tx: &Sender<AppMsg>) -> AuthFormWidget {
    let tx = tx.clone();
    AuthFormWidget::new(config, theme.clone(), move || {
        let _ = tx.send(AppMsg::Authenticated);
    })
}

impl AppState {
    pub(crate) fn new(config: AppConfig, source: ConfigSource, theme: Theme) -> Self {
        let (tx, rx) = mpsc::channel::<AppMsg>();
        let form = new_form(&config, &theme, &tx);
        Self {
            config,
            source,
            theme,
            view: View::Form,
            form,
            toast: None,
            tick: 0,
            quit: false,
            tx,
            rx,
        }
    }

    /// Throw away the current form session and show a fresh form.
    pub(crate) fn start_session(&mut self) {
        self.form = new_form(&self.config, &self.theme, &self.tx);
        self.view = View::Form;
    }

    pub(crate) fn drain_messages(&mut self) {
        let mut drained: Vec<AppMsg> = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            drained.push(msg);
        }
        for msg in drained {
            let effects = update(self, msg);
            run_effects(self, effects);
        }
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }
}

pub(crate) fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        match eff {
            Effect::ShowToast {
                text,
                level,
                seconds,
            } => {
                state.toast = Some(Toast {
                    text,
                    level,
                    expires_at: Instant::now() + Duration::from_secs(seconds),
                });
            }
            Effect::ReloadConfig => {
                let outcome = config::reload(&state.source).map_err(|e| format!("{e:#}"));
                let effs = update(state, AppMsg::ConfigReloaded(outcome));
                run_effects(state, effs);
            }
        }
    }
}

pub(crate) fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.quit = true;
        return;
    }
    match (state.view, key.code) {
        (_, KeyCode::Esc) => state.quit = true,
        (_, KeyCode::F(5)) => run_effects(state, vec![Effect::ReloadConfig]),
        (View::Authenticated, KeyCode::Char('l')) => {
            let effects = update(state, AppMsg::Logout);
            run_effects(state, effects);
        }
        (View::Authenticated, KeyCode::Char('q')) => state.quit = true,
        (View::Authenticated, _) => {}
        // Chords are not text input
        (View::Form, KeyCode::Char(_))
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
        (View::Form, code) => {
            let effects = state.form.on_key(code);
            run_effects(state, effects);
        }
    }
    state.drain_messages();
}

/// Parse `id=value;id=value` as used by the headless smoke mode.
pub(crate) fn parse_headless_input(script: &str) -> Vec<(String, String)> {
    script
        .split(';')
        .filter(|part| !part.trim().is_empty())
        .map(|part| match part.split_once('=') {
            Some((id, value)) => (id.trim().to_string(), value.to_string()),
            None => (part.trim().to_string(), String::new()),
        })
        .collect()
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

pub(crate) fn headless_summary(state: &AppState) -> serde_json::Value {
    let view = match state.view {
        View::Form => "Form",
        View::Authenticated => "Authenticated",
    };
    let store = state.form.controller.store();
    // Password values never leave the process
    let values: serde_json::Map<String, serde_json::Value> = store
        .schema()
        .iter()
        .filter(|d| d.kind != crate::model::FieldKind::Password)
        .filter_map(|d| {
            store
                .values()
                .get(&d.id)
                .map(|v| (d.id.clone(), serde_json::Value::from(v.as_str())))
        })
        .collect();
    serde_json::json!({
        "values": values,
        "valid": state.form.controller.is_valid(),
        "submitted": state.form.controller.status() == crate::form::FormStatus::Submitted,
        "view": view,
        "invalid": state.form.controller.invalid_fields(),
    })
}

fn run_headless(state: &mut AppState) -> Result<()> {
    let ticks: u64 = std::env::var("AUTHFORM_TICKS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(3);
    if let Ok(script) = std::env::var("AUTHFORM_HEADLESS_INPUT") {
        for (id, value) in parse_headless_input(&script) {
            state
                .form
                .controller
                .edit(&id, value)
                .with_context(|| "applying AUTHFORM_HEADLESS_INPUT")?;
            state.form.view.touched.insert(id);
        }
        let effects = state.form.submit();
        run_effects(state, effects);
        state.drain_messages();
    }
    let backend = ratatui::backend::TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend)?;
    for _ in 0..ticks {
        terminal.draw(|f| ui(f, state))?;
        state.tick = state.tick.wrapping_add(1);
    }
    println!("{}", headless_summary(state));
    Ok(())
}

pub fn run() -> Result<()> {
    let (cfg, source) = config::load_config()?;
    let mut state = AppState::new(cfg, source, Theme::from_env());
    if env_flag("AUTHFORM_HEADLESS") {
        return run_headless(&mut state);
    }
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();
    tracing::info!("form session started");
    let res: Result<()> = loop {
        if let Err(e) = terminal.draw(|f| ui(f, &mut state)) {
            break Err(e.into());
        }
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));
        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => handle_key(&mut state, key),
                Ok(_) => {}
                Err(e) => break Err(e.into()),
            },
            Ok(false) => {}
            Err(e) => break Err(e.into()),
        }
        if state.quit {
            break Ok(());
        }
        if last_tick.elapsed() >= tick_rate {
            state.tick = state.tick.wrapping_add(1);
            state.expire_toast(Instant::now());
            last_tick = Instant::now();
        }
    };
    // Restore
    disable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    tracing::info!("exiting");
    res
}

fn ui(f: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());
    match state.view {
        View::Form => state.form.render(f, chunks[0], true, state.tick),
        View::Authenticated => draw_authenticated(f, chunks[0], state),
    }
    draw_footer(f, chunks[1], state);
}

fn draw_authenticated(f: &mut Frame, area: Rect, state: &AppState) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            state.config.success_message.clone(),
            state.theme.text_success().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Press l to sign out",
            state.theme.text_muted(),
        )),
    ];
    let block = crate::widgets::chrome::panel_block(&state.config.title, true, &state.theme);
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(p, area);
}
