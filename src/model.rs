use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    #[serde(rename = "text", alias = "inputText")]
    Text,
    #[serde(rename = "email", alias = "inputEmail")]
    Email,
    #[serde(rename = "password", alias = "inputPassword")]
    Password,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: String,
    // `type` in the config file
    #[serde(alias = "type")]
    pub kind: FieldKind,
    pub label: String,
    #[serde(default, alias = "defaultValue")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(id: &str, kind: FieldKind, label: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            label: label.to_string(),
            default_value: None,
            placeholder: None,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    // Shown in place of the form once the user is signed in
    #[serde(default = "default_success_message")]
    pub success_message: String,
    pub fields: Vec<FieldDescriptor>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            success_message: default_success_message(),
            fields: default_fields(),
        }
    }
}

fn default_title() -> String {
    "Authorization".to_string()
}

fn default_description() -> String {
    "Sign in to access your company's personal account".to_string()
}

fn default_success_message() -> String {
    "You are signed in".to_string()
}

/// Field set used when no configuration file is found.
pub fn default_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("first_name", FieldKind::Text, "First Name")
            .with_default("Some first name")
            .with_placeholder("Введите имя"),
        FieldDescriptor::new("last_name", FieldKind::Text, "Last Name")
            .with_placeholder("Введите фамилию"),
        FieldDescriptor::new("email", FieldKind::Email, "Email")
            .required()
            .with_placeholder("someemail@example.com"),
        FieldDescriptor::new("password", FieldKind::Password, "Password")
            .required()
            .with_placeholder("Введите пароль"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_accepts_both_kind_spellings() {
        let yaml = r#"
- id: email
  kind: email
  label: Email
  required: true
- id: password
  type: inputPassword
  label: Password
  defaultValue: hunter2
"#;
        let fields: Vec<FieldDescriptor> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(fields[0].kind, FieldKind::Email);
        assert!(fields[0].required);
        assert_eq!(fields[1].kind, FieldKind::Password);
        assert!(!fields[1].required);
        assert_eq!(fields[1].default_value.as_deref(), Some("hunter2"));
    }

    #[test]
    fn config_fills_in_chrome_defaults() {
        let cfg: AppConfig =
            serde_yaml::from_str("fields:\n  - {id: a, kind: text, label: A}\n").unwrap();
        assert_eq!(cfg.title, "Authorization");
        assert_eq!(cfg.fields.len(), 1);
        assert!(cfg.fields[0].placeholder.is_none());
    }

    #[test]
    fn default_fields_require_credentials_only() {
        let fields = default_fields();
        let required: Vec<&str> = fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(required, vec!["email", "password"]);
    }
}
