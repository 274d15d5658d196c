use crate::model::AppConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "AUTHFORM_CONFIG";
const CONFIG_FILE: &str = "authform.yaml";

/// Where the active configuration came from, so F5 can re-read it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    BuiltIn,
}

pub fn parse_config(path: &Path, text: &str) -> Result<AppConfig> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let cfg: AppConfig = if is_json {
        serde_json::from_str(text).with_context(|| format!("parsing {path:?}"))?
    } else {
        serde_yaml::from_str(text).with_context(|| format!("parsing {path:?}"))?
    };
    check_unique_ids(&cfg).with_context(|| format!("validating {path:?}"))?;
    Ok(cfg)
}

fn check_unique_ids(cfg: &AppConfig) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for f in &cfg.fields {
        if !seen.insert(f.id.as_str()) {
            anyhow::bail!("duplicate field id `{}`", f.id);
        }
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<AppConfig> {
    let s = fs::read_to_string(path).with_context(|| format!("reading {path:?}"))?;
    parse_config(path, &s)
}

/// Locate the configuration file: `AUTHFORM_CONFIG`, then `authform.yaml`
/// in the working directory or its `.tui/` subdirectory.
pub fn discover(cwd: &Path) -> Option<PathBuf> {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(p));
    }
    [cwd.join(CONFIG_FILE), cwd.join(".tui").join(CONFIG_FILE)]
        .into_iter()
        .find(|p| p.exists())
}

pub fn load_config() -> Result<(AppConfig, ConfigSource)> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match discover(&cwd) {
        Some(path) => {
            let cfg = load_from_path(&path)?;
            tracing::info!(path = %path.display(), fields = cfg.fields.len(), "config loaded");
            Ok((cfg, ConfigSource::File(path)))
        }
        None => {
            tracing::info!("no config file found, using built-in fields");
            Ok((AppConfig::default(), ConfigSource::BuiltIn))
        }
    }
}

pub fn reload(source: &ConfigSource) -> Result<AppConfig> {
    match source {
        ConfigSource::File(path) => load_from_path(path),
        ConfigSource::BuiltIn => Ok(AppConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldKind;

    #[test]
    fn yaml_and_json_configs_parse_alike() {
        let yaml = r#"
title: Login
fields:
  - id: email
    kind: email
    label: Email
    required: true
"#;
        let json = r#"{
            "title": "Login",
            "fields": [{"id": "email", "type": "inputEmail", "label": "Email", "required": true}]
        }"#;
        let a = parse_config(Path::new("authform.yaml"), yaml).unwrap();
        let b = parse_config(Path::new("data.JSON"), json).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.fields[0].kind, FieldKind::Email);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = r#"
fields:
  - {id: a, kind: text, label: A}
  - {id: a, kind: email, label: B}
"#;
        let err = parse_config(Path::new("x.yaml"), yaml).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate field id `a`"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_from_path(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("here.yaml"));
    }

    #[test]
    fn example_config_matches_builtin_fields() {
        let text = include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/config/authform.example.yaml"
        ));
        let cfg = parse_config(Path::new("authform.example.yaml"), text).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn builtin_source_reloads_defaults() {
        let cfg = reload(&ConfigSource::BuiltIn).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }
}
