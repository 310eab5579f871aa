use super::key::FieldKey;

/// A struct whose named fields map one-to-one onto form fields.
///
/// Usually derived with `#[derive(FormSchema)]`, which also generates a
/// `<Name>Fields` type with one `const fn` key accessor per struct field.
pub trait FormSchema {
    type Fields;

    fn fields() -> Self::Fields;

    fn field_names() -> &'static [&'static str];

    fn field_keys() -> Vec<FieldKey> {
        Self::field_names()
            .iter()
            .copied()
            .map(FieldKey::new)
            .collect()
    }
}
