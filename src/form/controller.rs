use super::store::{FieldStore, FormError};
use crate::model::{FieldDescriptor, FieldKind};
use crate::validate::{invalid_fields, is_form_valid};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { invalid: Vec<String> },
    AlreadySubmitted,
}

/// Drives one form session: edits go through the store, submission is
/// gated on aggregate validity and reported through `on_success`.
pub struct FormController {
    store: FieldStore,
    status: FormStatus,
    on_success: Box<dyn FnMut()>,
}

impl FormController {
    pub fn new(schema: Vec<FieldDescriptor>, on_success: impl FnMut() + 'static) -> Self {
        Self {
            store: FieldStore::new(schema),
            status: FormStatus::Editing,
            on_success: Box::new(on_success),
        }
    }

    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_valid(&self) -> bool {
        is_form_valid(self.store.errors())
    }

    pub fn invalid_fields(&self) -> Vec<String> {
        invalid_fields(self.store.errors())
    }

    /// Apply an edit. Returns `Ok(false)` once the session is submitted.
    pub fn edit(&mut self, id: &str, value: impl Into<String>) -> Result<bool, FormError> {
        if self.status == FormStatus::Submitted {
            return Ok(false);
        }
        let value = value.into();
        self.store.set_field_value(id, value.as_str())?;
        let redacted = self
            .store
            .descriptor(id)
            .map(|d| d.kind == FieldKind::Password)
            .unwrap_or(true);
        let shown = if redacted { "[REDACTED]" } else { value.as_str() };
        tracing::debug!(
            field = id,
            value = shown,
            errors = self.store.errors_for(id).len(),
            "field edited"
        );
        Ok(true)
    }

    /// Reset one field to empty through the regular edit path.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not part of the schema; the clear affordance is
    /// only ever attached to rendered fields.
    pub fn clear(&mut self, id: &str) -> bool {
        if self.store.descriptor(id).is_none() {
            panic!("clear called on a field outside the form: {id}");
        }
        match self.edit(id, "") {
            Ok(applied) => applied,
            Err(e) => panic!("clear called on a field outside the form: {e}"),
        }
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.status == FormStatus::Submitted {
            return SubmitOutcome::AlreadySubmitted;
        }
        if !self.is_valid() {
            let invalid = self.invalid_fields();
            tracing::info!(?invalid, "submit rejected");
            return SubmitOutcome::Rejected { invalid };
        }
        self.status = FormStatus::Submitted;
        tracing::info!("submit accepted");
        (self.on_success)();
        SubmitOutcome::Accepted
    }

    /// Swap the field set; a different schema starts a fresh session.
    pub fn replace_schema(&mut self, schema: Vec<FieldDescriptor>) -> bool {
        let changed = self.store.replace_schema(schema);
        if changed {
            self.status = FormStatus::Editing;
            tracing::info!(fields = self.store.schema().len(), "schema replaced");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::FieldError;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting(schema: Vec<FieldDescriptor>) -> (FormController, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let ctl = FormController::new(schema, move || c.set(c.get() + 1));
        (ctl, calls)
    }

    fn email_only() -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::new("email", FieldKind::Email, "Email").required()]
    }

    #[test]
    fn email_scenario_walks_from_required_to_accepted() {
        let (mut ctl, calls) = counting(email_only());
        assert_eq!(
            ctl.store().errors_for("email"),
            &[FieldError::RequiredFieldEmpty, FieldError::InvalidEmailFormat]
        );
        assert!(!ctl.is_valid());

        ctl.edit("email", "a@b").unwrap();
        assert_eq!(ctl.store().errors_for("email"), &[FieldError::InvalidEmailFormat]);
        assert!(!ctl.is_valid());

        ctl.edit("email", "a@b.co").unwrap();
        assert!(ctl.store().errors_for("email").is_empty());
        assert!(ctl.is_valid());

        assert_eq!(ctl.submit(), SubmitOutcome::Accepted);
        assert_eq!(ctl.status(), FormStatus::Submitted);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn invalid_submit_is_rejected_without_callback() {
        let (mut ctl, calls) = counting(email_only());
        assert_eq!(
            ctl.submit(),
            SubmitOutcome::Rejected {
                invalid: vec!["email".into()]
            }
        );
        assert_eq!(ctl.status(), FormStatus::Editing);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn second_submit_does_not_call_back_again() {
        let (mut ctl, calls) = counting(email_only());
        ctl.edit("email", "x@y.org").unwrap();
        assert_eq!(ctl.submit(), SubmitOutcome::Accepted);
        assert_eq!(ctl.submit(), SubmitOutcome::AlreadySubmitted);
        assert_eq!(calls.get(), 1);
        assert!(!ctl.edit("email", "").unwrap());
        assert_eq!(ctl.store().value("email"), "x@y.org");
    }

    #[test]
    fn clear_routes_through_edit() {
        let (mut ctl, _) = counting(email_only());
        ctl.edit("email", "x@y.org").unwrap();
        assert!(ctl.is_valid());
        assert!(ctl.clear("email"));
        assert_eq!(ctl.store().value("email"), "");
        assert!(!ctl.is_valid());
    }

    #[test]
    #[should_panic(expected = "outside the form")]
    fn clear_on_unknown_field_fails_fast() {
        let (mut ctl, _) = counting(email_only());
        ctl.clear("ghost");
    }

    #[test]
    #[should_panic(expected = "outside the form")]
    fn clear_on_unknown_field_fails_fast_after_submit() {
        let (mut ctl, _) = counting(email_only());
        ctl.edit("email", "x@y.org").unwrap();
        assert_eq!(ctl.submit(), SubmitOutcome::Accepted);
        ctl.clear("ghost");
    }

    #[test]
    fn clear_after_submit_is_ignored_for_known_fields() {
        let (mut ctl, _) = counting(email_only());
        ctl.edit("email", "x@y.org").unwrap();
        ctl.submit();
        assert!(!ctl.clear("email"));
        assert_eq!(ctl.store().value("email"), "x@y.org");
    }

    #[test]
    fn schema_swap_reopens_submitted_session() {
        let (mut ctl, calls) = counting(email_only());
        ctl.edit("email", "x@y.org").unwrap();
        ctl.submit();
        let mut schema = email_only();
        schema.push(FieldDescriptor::new("password", FieldKind::Password, "Password").required());
        assert!(ctl.replace_schema(schema));
        assert_eq!(ctl.status(), FormStatus::Editing);
        assert_eq!(ctl.store().value("email"), "");
        assert_eq!(ctl.invalid_fields(), vec!["email", "password"]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn optional_fields_do_not_block_submit() {
        let schema = vec![
            FieldDescriptor::new("nick", FieldKind::Text, "Nick"),
            FieldDescriptor::new("pw", FieldKind::Password, "Password").required(),
        ];
        let (mut ctl, calls) = counting(schema);
        ctl.edit("pw", "secret").unwrap();
        assert_eq!(ctl.submit(), SubmitOutcome::Accepted);
        assert_eq!(calls.get(), 1);
    }
}
