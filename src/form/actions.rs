//! Pure transitions: each takes a snapshot and returns the next one.
//!
//! The only side effects are calls into the hooks carried by [`FormConfig`].

use std::future::{Future, Ready};

use super::config::FormConfig;
use super::error::{FormError, FormResult, SubmitError};
use super::key::{FieldKey, IntoFieldKey};
use super::modifier::FieldModifier;
use super::state::{FieldState, FormState, Values, default_field_state};
use super::validation::{check_form, merge_errors, validate_form};

fn mounted_key<V>(state: &FormState<V>, name: impl IntoFieldKey) -> FormResult<FieldKey> {
    let field = name.into_field_key();
    if state.fields.contains_key(&field) {
        Ok(field)
    } else {
        Err(FormError::FieldNotFound { field })
    }
}

/// Registers a field with its initial value.
///
/// Re-mounting with an equal initial value keeps the current value and dirty
/// flag, so an in-progress edit survives a redundant mount. A different
/// initial value resets the field.
pub fn mount<V>(
    state: &FormState<V>,
    name: impl IntoFieldKey,
    initial_value: V,
    config: &FormConfig<V>,
) -> FormState<V>
where
    V: Clone + PartialEq,
{
    let name = name.into_field_key();
    let mut next = state.clone();

    let unchanged = next
        .fields
        .get(&name)
        .is_some_and(|field| field.initial_value == initial_value);
    if !unchanged {
        next.fields.insert(
            name.clone(),
            FieldState::mounted(name.clone(), initial_value.clone()),
        );
        next.values.insert(name.clone(), initial_value);
        next.changes.shift_remove(&name);
    }

    let mut next = validate_form(&next, config);
    next.recompute_has_changed();
    next
}

pub fn focus<V: Clone>(state: &FormState<V>, name: impl IntoFieldKey) -> FormResult<FormState<V>> {
    let name = mounted_key(state, name)?;
    let mut next = state.clone();
    next.is_active = true;
    next.visited = true;
    if let Some(field) = next.fields.get_mut(&name) {
        field.is_active = true;
        field.visited = true;
    }
    Ok(next)
}

pub fn change<V>(
    state: &FormState<V>,
    name: impl IntoFieldKey,
    modifier: impl Into<FieldModifier<V>>,
    config: &FormConfig<V>,
) -> FormResult<FormState<V>>
where
    V: Clone + PartialEq,
{
    change_with(state, name, modifier, config, None)
}

/// [`change`] that also hands the resolved value to a per-field listener
/// before the form-wide change listener runs.
pub fn change_with<V>(
    state: &FormState<V>,
    name: impl IntoFieldKey,
    modifier: impl Into<FieldModifier<V>>,
    config: &FormConfig<V>,
    on_field_change: Option<&dyn Fn(&V)>,
) -> FormResult<FormState<V>>
where
    V: Clone + PartialEq,
{
    let name = name.into_field_key();
    let mut next = state.clone();
    let Some(field) = next.fields.get_mut(&name) else {
        return Err(FormError::FieldNotFound { field: name });
    };

    let modifier: FieldModifier<V> = modifier.into();
    let value = modifier.resolve(&name, &field.value)?;
    if let Some(listener) = on_field_change {
        listener(&value);
    }

    let has_changed = value != field.initial_value;
    field.value = value.clone();
    field.has_changed = has_changed;
    field.error = None;
    field.warning = None;
    field.is_valid = true;

    if has_changed {
        next.changes.insert(name.clone(), value.clone());
    } else {
        next.changes.shift_remove(&name);
    }
    next.values.insert(name, value);

    config.notify_change(&next.values, &next.changes);

    let mut next = if config.options.live_validation {
        validate_form(&next, config)
    } else {
        next
    };
    next.recompute_has_changed();
    Ok(next)
}

/// Clears focus on the field and on the form.
///
/// The form-level flag is cleared even if focus is moving straight to another
/// field; the following focus transition sets it again.
pub fn blur<V: Clone>(
    state: &FormState<V>,
    name: impl IntoFieldKey,
    config: &FormConfig<V>,
) -> FormResult<FormState<V>> {
    let name = mounted_key(state, name)?;
    let mut next = state.clone();
    next.is_active = false;
    if let Some(field) = next.fields.get_mut(&name) {
        field.is_active = false;
    }
    if config.options.live_validation {
        Ok(next)
    } else {
        Ok(validate_form(&next, config))
    }
}

/// Back to the freshly mounted state, interaction flags included.
fn reset_field_state<V: Clone>(field: &mut FieldState<V>) {
    field.apply_flags(default_field_state());
    field.value = field.initial_value.clone();
    field.error = None;
    field.warning = None;
}

pub fn reset_field<V: Clone>(
    state: &FormState<V>,
    name: impl IntoFieldKey,
    config: &FormConfig<V>,
) -> FormResult<FormState<V>> {
    let name = name.into_field_key();
    let mut next = state.clone();
    let Some(field) = next.fields.get_mut(&name) else {
        return Err(FormError::FieldNotFound { field: name });
    };
    reset_field_state(field);
    let initial_value = field.initial_value.clone();
    next.changes.shift_remove(&name);
    next.values.insert(name, initial_value);

    config.notify_change(&next.values, &next.changes);

    let mut next = if config.options.live_validation {
        validate_form(&next, config)
    } else {
        next
    };
    next.recompute_has_changed();
    Ok(next)
}

/// Restores every field to its initial value and zeroes the submit lifecycle.
pub fn reset_form<V: Clone>(state: &FormState<V>, config: &FormConfig<V>) -> FormState<V> {
    let mut next = FormState {
        fields: state.fields.clone(),
        values: state.values.clone(),
        ..FormState::default()
    };
    for (name, field) in next.fields.iter_mut() {
        reset_field_state(field);
        next.values.insert(name.clone(), field.initial_value.clone());
    }

    config.notify_change(&next.values, &next.changes);

    if config.options.live_validation {
        validate_form(&next, config)
    } else {
        next
    }
}

pub fn start_submit<V: Clone>(state: &FormState<V>) -> FormState<V> {
    let mut next = state.clone();
    next.is_submitting = true;
    next.submit_succeeded = false;
    next.submit_failed = false;
    next.submit_counter = next.submit_counter.saturating_add(1);
    for field in next.fields.values_mut() {
        field.submitted = true;
    }
    next
}

/// Marks the in-flight submit as succeeded.
pub fn finish_submit<V: Clone>(state: &FormState<V>) -> FormState<V> {
    let mut next = state.clone();
    next.is_submitting = false;
    next.submit_succeeded = true;
    next.submit_failed = false;
    next
}

/// Runs the configured validator, then the submit operation.
///
/// Validation errors short-circuit into [`fail_submit`] without calling
/// `on_submit`; that case resolves to `Ok`. A failure of the submit operation
/// is returned as `Err` untouched, and the caller routes it into
/// [`fail_submit`].
pub async fn submit<V, F, Fut>(
    state: &FormState<V>,
    on_submit: Option<F>,
    config: &FormConfig<V>,
) -> Result<FormState<V>, SubmitError>
where
    V: Clone,
    F: FnOnce(&Values<V>, &Values<V>) -> Fut,
    Fut: Future<Output = Result<(), SubmitError>>,
{
    if let Some(errors) = check_form(&state.values, config.validator()) {
        return Ok(fail_submit(state, SubmitError::Errors(errors)));
    }
    if let Some(on_submit) = on_submit {
        on_submit(&state.values, &state.changes).await?;
    }
    Ok(finish_submit(state))
}

/// Submit operation type for a form that has none, e.g.
/// `submit(&state, None::<NoSubmitOperation<V>>, &config)`.
pub type NoSubmitOperation<V> = fn(&Values<V>, &Values<V>) -> Ready<Result<(), SubmitError>>;

/// [`submit`] for a form without a submit operation: valid values finish as
/// succeeded, validation errors as failed.
pub async fn submit_without_operation<V: Clone>(
    state: &FormState<V>,
    config: &FormConfig<V>,
) -> FormState<V> {
    match submit(state, None::<NoSubmitOperation<V>>, config).await {
        Ok(next) => next,
        Err(error) => fail_submit(state, error),
    }
}

pub fn fail_submit<V: Clone>(state: &FormState<V>, error: SubmitError) -> FormState<V> {
    let mut next = state.clone();
    next.is_submitting = false;
    next.submit_succeeded = false;
    next.submit_failed = true;
    merge_errors(&mut next, error.into_form_errors());
    next
}
