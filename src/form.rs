//! Draft form. Collects one entity draft, validates it on every edit and
//! submits it through the type-specific create mutation.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::api::{self, CollectiveApi, CreateRequest};
use crate::entity::{CreatedEntity, EntityDraft, EntityType, FieldKind, InputKind, KindSpec};
use crate::error::{ApiError, Result, WizardError};
use crate::i18n::{Translator, messages};
use crate::validation::{self, ValidationErrors};

/// Called with the created entity once a submission succeeds.
pub type SuccessCallback = Box<dyn FnMut(&CreatedEntity) + Send>;
/// Called when the user cancels the form.
pub type CancelCallback = Box<dyn FnMut() + Send>;

/// Render model for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: FieldKind,
    pub path: &'static str,
    pub label: String,
    pub placeholder: &'static str,
    pub input: InputKind,
    pub value: String,
    /// Only set once the field has been touched.
    pub error: Option<String>,
}

/// Render model for a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub disabled: bool,
    pub loading: bool,
}

/// A validation error on a path the form has no input for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

/// Render model for the whole form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FieldView>,
    /// Errors blocking submission that no rendered field can show. Filled
    /// once a submit has been attempted; the host must collect those values.
    pub unrendered_errors: Vec<FieldError>,
    /// Inline panel for the last remote failure.
    pub error_panel: Option<String>,
    pub cancel: ButtonView,
    pub save: ButtonView,
}

/// Mini-form creating an individual, collective, event, or organization.
pub struct DraftForm {
    entity_type: EntityType,
    translator: Arc<dyn Translator>,
    draft: EntityDraft,
    errors: ValidationErrors,
    touched: BTreeSet<&'static str>,
    attempted: bool,
    is_submitting: bool,
    submit_error: Option<String>,
    on_success: SuccessCallback,
    on_cancel: CancelCallback,
}

impl DraftForm {
    pub fn new(
        entity_type: EntityType,
        translator: Arc<dyn Translator>,
        on_success: SuccessCallback,
        on_cancel: CancelCallback,
    ) -> Self {
        let draft = EntityDraft::default();
        let errors = validation::validate(&draft, entity_type, translator.as_ref());
        Self {
            entity_type,
            translator,
            draft,
            errors,
            touched: BTreeSet::new(),
            attempted: false,
            is_submitting: false,
            submit_error: None,
            on_success,
            on_cancel,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    fn spec(&self) -> &'static KindSpec {
        self.entity_type.spec()
    }

    pub fn draft(&self) -> &EntityDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting && self.errors.is_empty()
    }

    /// Apply a user edit and re-run validation.
    ///
    /// Returns `false` (and changes nothing) while a submission is in flight.
    pub fn set_field(&mut self, field: FieldKind, value: impl Into<String>) -> bool {
        if self.is_submitting {
            return false;
        }
        field.set(&mut self.draft, value.into());
        self.touched.insert(field.path());
        self.revalidate();
        true
    }

    /// Mark a field as visited (blur) so its error becomes visible.
    pub fn touch(&mut self, field: FieldKind) {
        self.touched.insert(field.path());
    }

    /// Mark every rendered field as visited and surface errors on paths
    /// without an input.
    pub fn touch_all(&mut self) {
        self.attempted = true;
        for field in self.spec().fields {
            self.touched.insert(field.path());
        }
    }

    fn revalidate(&mut self) {
        self.errors = validation::validate(&self.draft, self.entity_type, self.translator.as_ref());
    }

    /// First half of a submission: check the guard and validation, then
    /// build the request. Marks the form as submitting.
    pub fn begin_submit(&mut self) -> std::result::Result<CreateRequest, WizardError> {
        if self.is_submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        self.touch_all();
        if !self.errors.is_empty() {
            warn!(
                entity_type = %self.entity_type,
                fields = self.errors.len(),
                "Draft has validation errors, not submitting"
            );
            return Err(WizardError::Validation(self.errors.clone()));
        }

        self.is_submitting = true;
        self.submit_error = None;
        Ok((self.spec().build_request)(&mut self.draft, self.entity_type))
    }

    /// Second half of a submission: record the remote outcome.
    ///
    /// Success hands the entity to the success callback and discards the
    /// draft. Failure keeps the draft and stores a displayable message.
    pub fn finish_submit(
        &mut self,
        outcome: std::result::Result<CreatedEntity, ApiError>,
    ) -> Result<CreatedEntity> {
        self.is_submitting = false;
        match outcome {
            Ok(entity) => {
                info!(
                    entity_type = %self.entity_type,
                    entity_id = entity.id,
                    slug = %entity.slug,
                    "Entity created"
                );
                (self.on_success)(&entity);
                self.reset();
                Ok(entity)
            }
            Err(e) => {
                error!(entity_type = %self.entity_type, error = %e, "Entity creation failed");
                self.submit_error = Some(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Validate, send the create mutation, and record its outcome.
    pub async fn submit(&mut self, api: &dyn CollectiveApi) -> Result<CreatedEntity> {
        let request = self.begin_submit()?;
        info!(
            entity_type = %self.entity_type,
            operation = request.operation(),
            "Submitting entity draft"
        );
        let outcome = api::create_entity(api, &request).await;
        self.finish_submit(outcome)
    }

    /// Discard the draft and notify the caller. Refused while submitting.
    pub fn cancel(&mut self) -> bool {
        if self.is_submitting {
            return false;
        }
        self.reset();
        (self.on_cancel)();
        true
    }

    fn reset(&mut self) {
        self.draft = EntityDraft::default();
        self.touched.clear();
        self.attempted = false;
        self.submit_error = None;
        self.revalidate();
    }

    pub fn view(&self) -> FormView {
        let spec = self.spec();
        let t = self.translator.as_ref();
        let fields = spec
            .fields
            .iter()
            .map(|&field| {
                let path = field.path();
                // Website errors are shown without waiting for a touch.
                let visible = field == FieldKind::Website || self.touched.contains(path);
                FieldView {
                    field,
                    path,
                    label: t.translate(&spec.label(field)),
                    placeholder: spec.placeholder(field),
                    input: field.input(),
                    value: field.value(&self.draft).to_string(),
                    error: visible
                        .then(|| self.errors.get(path).map(String::from))
                        .flatten(),
                }
            })
            .collect();

        let unrendered_errors = if self.attempted {
            self.errors
                .iter()
                .filter(|(path, _)| !spec.fields.iter().any(|f| f.path() == *path))
                .map(|(path, message)| FieldError {
                    path: path.to_string(),
                    message: message.to_string(),
                })
                .collect()
        } else {
            Vec::new()
        };

        FormView {
            title: t.translate(&spec.title),
            fields,
            unrendered_errors,
            error_panel: self.submit_error.clone(),
            cancel: ButtonView {
                label: t.translate(&messages::CANCEL),
                disabled: self.is_submitting,
                loading: false,
            },
            save: ButtonView {
                label: t.translate(&messages::SAVE),
                disabled: false,
                loading: self.is_submitting,
            },
        }
    }
}
