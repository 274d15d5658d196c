use crate::model::FieldDescriptor;
use crate::validate::{validate_form, FieldError, FieldErrors, FieldValues};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
}

/// Current values and derived errors for one form session.
///
/// Errors are never edited directly: every mutation rewrites `values` and
/// then recomputes the whole error map from the schema.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    schema: Vec<FieldDescriptor>,
    values: FieldValues,
    errors: FieldErrors,
}

impl FieldStore {
    pub fn new(schema: Vec<FieldDescriptor>) -> Self {
        let mut store = Self::default();
        store.initialize(schema);
        store
    }

    /// Seed values from defaults and validate immediately, so a required
    /// field without a default starts out invalid.
    pub fn initialize(&mut self, schema: Vec<FieldDescriptor>) {
        self.values = schema
            .iter()
            .map(|d| (d.id.clone(), d.default_value.clone().unwrap_or_default()))
            .collect();
        self.schema = schema;
        self.revalidate();
        tracing::debug!(fields = self.schema.len(), "form state initialized");
    }

    /// Start over when the field set changes; returns whether it did.
    pub fn replace_schema(&mut self, schema: Vec<FieldDescriptor>) -> bool {
        if schema == self.schema {
            return false;
        }
        self.initialize(schema);
        true
    }

    pub fn set_field_value(&mut self, id: &str, value: impl Into<String>) -> Result<(), FormError> {
        let slot = self
            .values
            .get_mut(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        *slot = value.into();
        self.revalidate();
        Ok(())
    }

    fn revalidate(&mut self) {
        self.errors = validate_form(&self.schema, &self.values);
    }

    pub fn schema(&self) -> &[FieldDescriptor] {
        &self.schema
    }

    pub fn descriptor(&self, id: &str) -> Option<&FieldDescriptor> {
        self.schema.iter().find(|d| d.id == id)
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn value(&self, id: &str) -> &str {
        self.values.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn errors_for(&self, id: &str) -> &[FieldError] {
        self.errors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldKind;
    use std::collections::HashSet;

    fn two_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", FieldKind::Text, "Name").with_default("Ada"),
            FieldDescriptor::new("email", FieldKind::Email, "Email").required(),
        ]
    }

    fn key_sets_match_schema(store: &FieldStore) {
        let ids: HashSet<&str> = store.schema().iter().map(|d| d.id.as_str()).collect();
        let vals: HashSet<&str> = store.values().keys().map(String::as_str).collect();
        let errs: HashSet<&str> = store.errors().keys().map(String::as_str).collect();
        assert_eq!(ids, vals);
        assert_eq!(ids, errs);
    }

    #[test]
    fn initialize_seeds_defaults_and_errors() {
        let store = FieldStore::new(two_fields());
        assert_eq!(store.value("name"), "Ada");
        assert_eq!(store.value("email"), "");
        assert!(store.errors_for("name").is_empty());
        assert_eq!(
            store.errors_for("email"),
            &[FieldError::RequiredFieldEmpty, FieldError::InvalidEmailFormat]
        );
        key_sets_match_schema(&store);
    }

    #[test]
    fn set_value_recomputes_errors() {
        let mut store = FieldStore::new(two_fields());
        store.set_field_value("email", "a@b").unwrap();
        assert_eq!(store.errors_for("email"), &[FieldError::InvalidEmailFormat]);
        store.set_field_value("email", "a@b.co").unwrap();
        assert!(store.errors_for("email").is_empty());
        key_sets_match_schema(&store);
    }

    #[test]
    fn unknown_id_is_rejected_without_side_effects() {
        let mut store = FieldStore::new(two_fields());
        let err = store.set_field_value("nope", "x").unwrap_err();
        assert_eq!(err, FormError::UnknownField("nope".into()));
        assert!(!store.values().contains_key("nope"));
        key_sets_match_schema(&store);
    }

    #[test]
    fn schema_swap_discards_previous_values() {
        let mut store = FieldStore::new(two_fields());
        store.set_field_value("name", "Grace").unwrap();
        store.set_field_value("email", "g@h.io").unwrap();
        let mut three = two_fields();
        three.push(FieldDescriptor::new("password", FieldKind::Password, "Password").required());
        assert!(store.replace_schema(three));
        assert_eq!(store.value("name"), "Ada");
        assert_eq!(store.value("email"), "");
        assert_eq!(store.errors_for("password"), &[FieldError::RequiredFieldEmpty]);
        assert_eq!(store.values().len(), 3);
        key_sets_match_schema(&store);
    }

    #[test]
    fn identical_schema_keeps_values() {
        let mut store = FieldStore::new(two_fields());
        store.set_field_value("name", "Grace").unwrap();
        assert!(!store.replace_schema(two_fields()));
        assert_eq!(store.value("name"), "Grace");
    }
}
