use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use indexmap::IndexMap;

use super::key::{FieldKey, IntoFieldKey};
use super::state::Values;
use super::validation::{FieldValidator, FormValidator};

/// What the orchestration layer does with a submit request while another
/// submit is still in flight.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SubmitPolicy {
    #[default]
    Reject,
    Allow,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormOptions {
    /// Revalidate on every change instead of on blur and submit.
    pub live_validation: bool,
    pub concurrent_submit: SubmitPolicy,
    /// Do not start a submit at all while the form holds validation errors.
    pub skip_submit_when_invalid: bool,
}

/// Notified with the full value and change snapshots after a value mutation.
pub trait ChangeListener<V>: Send + Sync {
    fn on_change(&self, values: &Values<V>, changes: &Values<V>);
}

impl<V, F> ChangeListener<V> for F
where
    F: Fn(&Values<V>, &Values<V>) + Send + Sync,
{
    fn on_change(&self, values: &Values<V>, changes: &Values<V>) {
        (self)(values, changes)
    }
}

pub(super) type SharedFormValidator<V> = Arc<dyn FormValidator<V>>;
pub(super) type SharedFieldValidator<V> = Arc<dyn FieldValidator<V>>;

/// Options plus the caller-supplied hooks every transition may consult.
pub struct FormConfig<V> {
    pub options: FormOptions,
    pub(super) validate: Option<SharedFormValidator<V>>,
    pub(super) warn: Option<SharedFormValidator<V>>,
    pub(super) on_change: Option<Arc<dyn ChangeListener<V>>>,
    pub(super) field_validators: IndexMap<FieldKey, Vec<SharedFieldValidator<V>>>,
    pub(super) field_warners: IndexMap<FieldKey, Vec<SharedFieldValidator<V>>>,
}

impl<V> FormConfig<V> {
    pub fn new(options: FormOptions) -> Self {
        Self {
            options,
            validate: None,
            warn: None,
            on_change: None,
            field_validators: IndexMap::new(),
            field_warners: IndexMap::new(),
        }
    }

    pub fn live_validation(mut self, enabled: bool) -> Self {
        self.options.live_validation = enabled;
        self
    }

    pub fn validate(mut self, validator: impl FormValidator<V> + 'static) -> Self {
        self.validate = Some(Arc::new(validator));
        self
    }

    pub fn warn(mut self, warner: impl FormValidator<V> + 'static) -> Self {
        self.warn = Some(Arc::new(warner));
        self
    }

    /// Registers the form-wide change listener.
    ///
    /// Under a [`FormController`](super::FormController) the listener runs
    /// while the state lock is held, so it must not call back into that
    /// controller (`snapshot`, `change_field`, ...) or it deadlocks. The same
    /// holds for the `validate` and `warn` hooks.
    pub fn on_change(mut self, listener: impl ChangeListener<V> + 'static) -> Self {
        self.on_change = Some(Arc::new(listener));
        self
    }

    pub fn field_validator(
        mut self,
        name: impl IntoFieldKey,
        validator: impl FieldValidator<V> + 'static,
    ) -> Self {
        self.field_validators
            .entry(name.into_field_key())
            .or_default()
            .push(Arc::new(validator));
        self
    }

    pub fn field_warner(
        mut self,
        name: impl IntoFieldKey,
        warner: impl FieldValidator<V> + 'static,
    ) -> Self {
        self.field_warners
            .entry(name.into_field_key())
            .or_default()
            .push(Arc::new(warner));
        self
    }

    pub fn validator(&self) -> Option<&dyn FormValidator<V>> {
        self.validate.as_deref()
    }

    pub(super) fn notify_change(&self, values: &Values<V>, changes: &Values<V>) {
        if let Some(listener) = &self.on_change {
            listener.on_change(values, changes);
        }
    }
}

impl<V> Default for FormConfig<V> {
    fn default() -> Self {
        Self::new(FormOptions::default())
    }
}

impl<V> Clone for FormConfig<V> {
    fn clone(&self) -> Self {
        Self {
            options: self.options,
            validate: self.validate.clone(),
            warn: self.warn.clone(),
            on_change: self.on_change.clone(),
            field_validators: self.field_validators.clone(),
            field_warners: self.field_warners.clone(),
        }
    }
}

impl<V> Debug for FormConfig<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormConfig")
            .field("options", &self.options)
            .field("validate", &self.validate.is_some())
            .field("warn", &self.warn.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("field_validators", &self.field_validators.keys().collect::<Vec<_>>())
            .field("field_warners", &self.field_warners.keys().collect::<Vec<_>>())
            .finish()
    }
}
