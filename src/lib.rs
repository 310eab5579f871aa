//! Form state core: per-field value, dirtiness, validity and interaction
//! tracking, form-level aggregation, and the submit lifecycle.
//!
//! [`form`] holds pure transitions over immutable [`form::FormState`]
//! snapshots plus [`form::FormController`], a thin cell that folds them.

extern crate self as calmform;

pub mod form;
pub mod prelude;
