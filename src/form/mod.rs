mod actions;
mod config;
mod controller;
mod error;
mod key;
mod modifier;
mod schema;
mod state;
mod validation;


pub use actions::{
    NoSubmitOperation, blur, change, change_with, fail_submit, finish_submit, focus, mount,
    reset_field, reset_form, start_submit, submit, submit_without_operation,
};
pub use calmform_derive::FormSchema;
pub use config::{ChangeListener, FormConfig, FormOptions, SubmitPolicy};
pub use controller::{FormController, FormId, SubmitStatus, SubmitTicket};
pub use error::{FormError, FormResult, FormSubmitError, SubmitError};
pub use key::{FieldKey, GLOBAL_KEY, IntoFieldKey, Symbol};
pub use modifier::{ChangeEvent, EventTarget, FieldModifier};
pub use schema::FormSchema;
pub use state::{
    FieldFlags, FieldState, FormErrors, FormState, Values, default_field_state,
    default_form_state,
};
pub use validation::{FieldValidator, FormValidator, ValidationOutcome, check_form, validate_form};
