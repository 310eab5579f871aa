pub use crate::form::{
    ChangeEvent, FieldKey, FieldModifier, FieldState, FormConfig, FormController, FormError,
    FormErrors, FormOptions, FormResult, FormSchema, FormState, FormSubmitError, IntoFieldKey,
    SubmitError, SubmitPolicy, SubmitStatus, Values,
};
