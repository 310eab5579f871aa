use super::error::{FormError, FormResult};
use super::key::FieldKey;

/// Something carrying a `value`, as the target of a widget change event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventTarget<V> {
    pub value: V,
}

/// Widget change event. `target.value` wins over `currentTarget.value`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChangeEvent<V> {
    pub target: Option<EventTarget<V>>,
    pub current_target: Option<EventTarget<V>>,
}

impl<V> ChangeEvent<V> {
    pub fn target(value: V) -> Self {
        Self {
            target: Some(EventTarget { value }),
            current_target: None,
        }
    }

    pub fn current_target(value: V) -> Self {
        Self {
            target: None,
            current_target: Some(EventTarget { value }),
        }
    }

    pub fn into_value(self) -> Option<V> {
        self.target
            .or(self.current_target)
            .map(|target| target.value)
    }
}

/// How a change transition derives the next value of a field.
pub enum FieldModifier<V> {
    Value(V),
    Update(Box<dyn FnOnce(&V) -> V + Send>),
    Event(ChangeEvent<V>),
}

impl<V> FieldModifier<V> {
    pub fn update(f: impl FnOnce(&V) -> V + Send + 'static) -> Self {
        Self::Update(Box::new(f))
    }

    pub(super) fn resolve(self, field: &FieldKey, current: &V) -> FormResult<V> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Update(f) => Ok(f(current)),
            Self::Event(event) => event.into_value().ok_or_else(|| FormError::EventWithoutValue {
                field: field.clone(),
            }),
        }
    }
}

impl<V> From<V> for FieldModifier<V> {
    fn from(value: V) -> Self {
        Self::Value(value)
    }
}

impl<V> From<ChangeEvent<V>> for FieldModifier<V> {
    fn from(event: ChangeEvent<V>) -> Self {
        Self::Event(event)
    }
}

impl<V> std::fmt::Debug for FieldModifier<V>
where
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Update(_) => f.write_str("Update(..)"),
            Self::Event(event) => f.debug_tuple("Event").field(event).finish(),
        }
    }
}
