use crate::model::AppConfig;
use crate::ui::{AppState, ToastLevel, View};

pub enum AppMsg {
    // Posted by the form's success callback
    Authenticated,
    Logout,
    ConfigReloaded(Result<AppConfig, String>),
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    ShowToast {
        text: String,
        level: ToastLevel,
        seconds: u64,
    },
    ReloadConfig,
}

pub fn update(state: &mut AppState, msg: AppMsg) -> Vec<Effect> {
    use AppMsg::*;
    let mut effects: Vec<Effect> = Vec::new();
    match msg {
        Authenticated => {
            tracing::info!("signed in");
            state.view = View::Authenticated;
            effects.push(Effect::ShowToast {
                text: "Signed in".into(),
                level: ToastLevel::Success,
                seconds: 3,
            });
        }
        Logout => {
            tracing::info!("signed out");
            state.start_session();
            effects.push(Effect::ShowToast {
                text: "Signed out".into(),
                level: ToastLevel::Info,
                seconds: 2,
            });
        }
        ConfigReloaded(Ok(cfg)) => {
            let changed = state.form.apply_config(&cfg);
            let text = if changed {
                format!("Form reset: {} fields", cfg.fields.len())
            } else {
                "Config reloaded".to_string()
            };
            state.config = cfg;
            effects.push(Effect::ShowToast {
                text,
                level: ToastLevel::Info,
                seconds: 2,
            });
        }
        ConfigReloaded(Err(e)) => {
            tracing::error!(error = %e, "config reload failed");
            effects.push(Effect::ShowToast {
                text: e,
                level: ToastLevel::Error,
                seconds: 5,
            });
        }
    }
    effects
}
