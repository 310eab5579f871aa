use std::collections::BTreeMap;

use indexmap::IndexMap;

use super::key::{FieldKey, GLOBAL_KEY, IntoFieldKey};

/// Field name to value mapping in mount order.
pub type Values<V> = IndexMap<FieldKey, V>;

/// Field name (plus `_global`) to message mapping.
///
/// Used for validation errors, warnings and parsed submit failures alike.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FormErrors(BTreeMap<FieldKey, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.set_global(message);
        errors
    }

    pub fn with(mut self, name: impl IntoFieldKey, message: impl Into<String>) -> Self {
        self.insert(name, message);
        self
    }

    /// Empty messages are dropped: an empty string means "no error".
    pub fn insert(&mut self, name: impl IntoFieldKey, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            return;
        }
        self.0.insert(name.into_field_key(), message);
    }

    pub fn set_global(&mut self, message: impl Into<String>) {
        self.insert(FieldKey::global(), message);
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<&str> {
        self.0.get(name.as_ref()).map(String::as_str)
    }

    pub fn global(&self) -> Option<&str> {
        self.get(GLOBAL_KEY)
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.0.contains_key(name.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.0.iter().map(|(key, message)| (key, message.as_str()))
    }

    /// Entries attributed to a field, skipping `_global`.
    pub fn field_entries(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.iter().filter(|(key, _)| !key.is_global())
    }

    /// Entries of `other` override entries with the same key.
    pub fn merge(&mut self, other: FormErrors) {
        self.0.extend(other.0);
    }
}

impl<K, M> FromIterator<(K, M)> for FormErrors
where
    K: IntoFieldKey,
    M: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, M)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (name, message) in iter {
            errors.insert(name, message);
        }
        errors
    }
}

impl IntoIterator for FormErrors {
    type Item = (FieldKey, String);
    type IntoIter = std::collections::btree_map::IntoIter<FieldKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldState<V> {
    pub name: FieldKey,
    pub initial_value: V,
    pub value: V,
    pub has_changed: bool,
    pub is_valid: bool,
    pub is_active: bool,
    pub visited: bool,
    pub submitted: bool,
    pub error: Option<String>,
    pub warning: Option<String>,
}

impl<V: Clone> FieldState<V> {
    pub fn mounted(name: FieldKey, initial_value: V) -> Self {
        let flags = default_field_state();
        Self {
            name,
            value: initial_value.clone(),
            initial_value,
            has_changed: flags.has_changed,
            is_valid: flags.is_valid,
            is_active: flags.is_active,
            visited: flags.visited,
            submitted: flags.submitted,
            error: None,
            warning: None,
        }
    }
}

impl<V> FieldState<V> {
    /// The field error once the user has seen the field or tried to submit.
    pub fn display_error(&self) -> Option<&str> {
        if !self.visited && !self.submitted {
            return None;
        }
        self.error.as_deref()
    }

    pub(super) fn apply_flags(&mut self, flags: FieldFlags) {
        self.has_changed = flags.has_changed;
        self.is_valid = flags.is_valid;
        self.is_active = flags.is_active;
        self.visited = flags.visited;
        self.submitted = flags.submitted;
    }
}

/// The value-independent part of a field's state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldFlags {
    pub has_changed: bool,
    pub is_valid: bool,
    pub is_active: bool,
    pub visited: bool,
    pub submitted: bool,
}

pub fn default_field_state() -> FieldFlags {
    FieldFlags {
        has_changed: false,
        is_valid: true,
        is_active: false,
        visited: false,
        submitted: false,
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormState<V> {
    pub fields: IndexMap<FieldKey, FieldState<V>>,
    pub values: Values<V>,
    pub changes: Values<V>,
    pub errors: FormErrors,
    pub warnings: FormErrors,
    pub error: Option<String>,
    pub warning: Option<String>,
    pub is_valid: bool,
    pub has_changed: bool,
    pub is_active: bool,
    pub visited: bool,
    pub is_submitting: bool,
    pub submit_counter: u32,
    pub submit_succeeded: bool,
    pub submit_failed: bool,
}

pub fn default_form_state<V>() -> FormState<V> {
    FormState {
        fields: IndexMap::new(),
        values: IndexMap::new(),
        changes: IndexMap::new(),
        errors: FormErrors::new(),
        warnings: FormErrors::new(),
        error: None,
        warning: None,
        is_valid: true,
        has_changed: false,
        is_active: false,
        visited: false,
        is_submitting: false,
        submit_counter: 0,
        submit_succeeded: false,
        submit_failed: false,
    }
}

impl<V> Default for FormState<V> {
    fn default() -> Self {
        default_form_state()
    }
}

impl<V> FormState<V> {
    pub fn field(&self, name: impl AsRef<str>) -> Option<&FieldState<V>> {
        self.fields.get(name.as_ref())
    }

    pub fn value(&self, name: impl AsRef<str>) -> Option<&V> {
        self.values.get(name.as_ref())
    }

    pub fn is_mounted(&self, name: impl AsRef<str>) -> bool {
        self.fields.contains_key(name.as_ref())
    }

    pub fn field_error(&self, name: impl AsRef<str>) -> Option<&str> {
        self.errors.get(name)
    }

    pub fn field_warning(&self, name: impl AsRef<str>) -> Option<&str> {
        self.warnings.get(name)
    }

    pub fn global_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn global_warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn changed_fields(&self) -> impl Iterator<Item = &FieldKey> {
        self.changes.keys()
    }

    pub(super) fn recompute_has_changed(&mut self) {
        self.has_changed = self.fields.values().any(|field| field.has_changed);
    }
}
