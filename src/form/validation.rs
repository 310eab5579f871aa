use tracing::trace;

use super::config::FormConfig;
use super::state::{FormErrors, FormState, Values};

/// Normalized result of a form-level validate or warn hook.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ValidationOutcome {
    #[default]
    NoError,
    Global(String),
    Fields(FormErrors),
}

impl ValidationOutcome {
    /// `None` means "no error". An empty message or mapping counts as none.
    pub fn into_errors(self) -> Option<FormErrors> {
        let errors = match self {
            Self::NoError => return None,
            Self::Global(message) => FormErrors::with_global(message),
            Self::Fields(errors) => errors,
        };
        (!errors.is_empty()).then_some(errors)
    }
}

impl From<()> for ValidationOutcome {
    fn from(_: ()) -> Self {
        Self::NoError
    }
}

impl From<&str> for ValidationOutcome {
    fn from(message: &str) -> Self {
        Self::Global(message.to_string())
    }
}

impl From<String> for ValidationOutcome {
    fn from(message: String) -> Self {
        Self::Global(message)
    }
}

impl From<Option<String>> for ValidationOutcome {
    fn from(message: Option<String>) -> Self {
        message.map_or(Self::NoError, Self::Global)
    }
}

impl From<FormErrors> for ValidationOutcome {
    fn from(errors: FormErrors) -> Self {
        Self::Fields(errors)
    }
}

impl From<Option<FormErrors>> for ValidationOutcome {
    fn from(errors: Option<FormErrors>) -> Self {
        errors.map_or(Self::NoError, Self::Fields)
    }
}

impl From<Result<(), FormErrors>> for ValidationOutcome {
    fn from(result: Result<(), FormErrors>) -> Self {
        result.err().into()
    }
}

impl From<Result<(), Box<dyn std::error::Error + Send + Sync>>> for ValidationOutcome {
    fn from(result: Result<(), Box<dyn std::error::Error + Send + Sync>>) -> Self {
        match result {
            Ok(()) => Self::NoError,
            Err(error) => Self::Global(error.to_string()),
        }
    }
}

/// Form-level validate or warn hook, run against the current values.
pub trait FormValidator<V>: Send + Sync {
    fn validate(&self, values: &Values<V>) -> ValidationOutcome;
}

impl<V, O, F> FormValidator<V> for F
where
    O: Into<ValidationOutcome>,
    F: Fn(&Values<V>) -> O + Send + Sync,
{
    fn validate(&self, values: &Values<V>) -> ValidationOutcome {
        (self)(values).into()
    }
}

/// Per-field validate or warn hook. `None` means "no message".
pub trait FieldValidator<V>: Send + Sync {
    fn validate(&self, value: &V) -> Option<String>;
}

impl<V, F> FieldValidator<V> for F
where
    F: Fn(&V) -> Option<String> + Send + Sync,
{
    fn validate(&self, value: &V) -> Option<String> {
        (self)(value)
    }
}

/// Errors reported by the form-level validator, or `None` if there are none.
pub fn check_form<V>(
    values: &Values<V>,
    validator: Option<&dyn FormValidator<V>>,
) -> Option<FormErrors> {
    validator?.validate(values).into_errors()
}

#[derive(Clone, Copy)]
enum Channel {
    Errors,
    Warnings,
}

/// Recomputes `errors`, `warnings` and every field's message wholesale.
///
/// Messages from the previous pass are discarded first. Field-level hooks only
/// fill fields the form-level hook left without a message.
pub fn validate_form<V: Clone>(state: &FormState<V>, config: &FormConfig<V>) -> FormState<V> {
    let mut next = state.clone();
    next.errors = FormErrors::new();
    next.warnings = FormErrors::new();
    next.error = None;
    next.warning = None;
    next.is_valid = true;
    for field in next.fields.values_mut() {
        field.error = None;
        field.warning = None;
        field.is_valid = true;
    }

    let errors = collect(&next, config, Channel::Errors);
    dispatch(&mut next, errors, Channel::Errors);
    let warnings = collect(&next, config, Channel::Warnings);
    dispatch(&mut next, warnings, Channel::Warnings);

    next.is_valid = next.errors.is_empty();
    trace!(
        errors = next.errors.len(),
        warnings = next.warnings.len(),
        "form validation pass"
    );
    next
}

fn collect<V>(state: &FormState<V>, config: &FormConfig<V>, channel: Channel) -> FormErrors {
    let (form_hook, field_hooks) = match channel {
        Channel::Errors => (config.validate.as_deref(), &config.field_validators),
        Channel::Warnings => (config.warn.as_deref(), &config.field_warners),
    };

    let mut collected = check_form(&state.values, form_hook).unwrap_or_default();
    for (name, hooks) in field_hooks {
        if collected.contains(name) {
            continue;
        }
        let Some(value) = state.values.get(name) else {
            continue;
        };
        if let Some(message) = hooks.iter().find_map(|hook| hook.validate(value)) {
            collected.insert(name, message);
        }
    }
    collected
}

fn dispatch<V>(state: &mut FormState<V>, messages: FormErrors, channel: Channel) {
    for (name, message) in messages.field_entries() {
        let Some(field) = state.fields.get_mut(name) else {
            continue;
        };
        match channel {
            Channel::Errors => {
                field.error = Some(message.to_string());
                field.is_valid = false;
            }
            Channel::Warnings => field.warning = Some(message.to_string()),
        }
    }
    let global = messages.global().map(str::to_string);
    match channel {
        Channel::Errors => {
            state.error = global;
            state.errors = messages;
        }
        Channel::Warnings => {
            state.warning = global;
            state.warnings = messages;
        }
    }
}

/// Folds a parsed submit failure into the state. Unlike a validation pass this
/// is additive: existing messages stay unless the failure names the same key.
pub(super) fn merge_errors<V>(state: &mut FormState<V>, errors: FormErrors) {
    for (name, message) in errors.field_entries() {
        if let Some(field) = state.fields.get_mut(name) {
            field.error = Some(message.to_string());
            field.is_valid = false;
        }
    }
    if let Some(global) = errors.global() {
        state.error = Some(global.to_string());
    }
    state.errors.merge(errors);
    if !state.errors.is_empty() {
        state.is_valid = false;
    }
}
