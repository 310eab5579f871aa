use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use super::actions;
use super::config::{FormConfig, FormOptions, SubmitPolicy};
use super::error::{FormError, FormResult, SubmitError};
use super::key::IntoFieldKey;
use super::modifier::FieldModifier;
use super::state::{FieldState, FormState, Values};
use super::validation::check_form;

static FORM_ID_ALLOCATOR: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FormId(pub u64);

impl FormId {
    pub fn next() -> Self {
        Self(FORM_ID_ALLOCATOR.fetch_add(1, Ordering::SeqCst))
    }
}

/// Controller epoch a submit attempt started under. Its outcome is only
/// applied while the epoch is unchanged.
///
/// Unlike `submit_counter`, the epoch is never reset: every submit start and
/// every form reset moves it forward.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SubmitTicket(pub u64);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitStatus {
    Succeeded,
    /// The submit operation failed; its error was folded into the state.
    Failed,
    /// The validator rejected the values; the submit operation never ran.
    Invalid,
    /// Nothing started because the form was invalid.
    Skipped,
    /// A newer submit or a form reset superseded this attempt.
    Stale,
}

/// Holds the current snapshot and folds every transition against it.
///
/// Each transition swaps in a fresh `Arc`, so `Arc::ptr_eq` between two
/// snapshots tells whether anything happened in between. Hooks run while the
/// state lock is held and must not call back into the same controller.
#[derive(Clone)]
pub struct FormController<V> {
    id: FormId,
    config: FormConfig<V>,
    slot: Arc<RwLock<Slot<V>>>,
}

struct Slot<V> {
    epoch: u64,
    state: Arc<FormState<V>>,
}

impl<V> Slot<V> {
    fn advance(&mut self) -> SubmitTicket {
        self.epoch = self.epoch.wrapping_add(1);
        SubmitTicket(self.epoch)
    }
}

impl<V> FormController<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(config: FormConfig<V>) -> Self {
        Self::with_state(FormState::default(), config)
    }

    pub fn with_state(state: FormState<V>, config: FormConfig<V>) -> Self {
        Self {
            id: FormId::next(),
            config,
            slot: Arc::new(RwLock::new(Slot {
                epoch: 0,
                state: Arc::new(state),
            })),
        }
    }

    pub fn form_id(&self) -> FormId {
        self.id
    }

    pub fn options(&self) -> FormOptions {
        self.config.options
    }

    pub fn config(&self) -> &FormConfig<V> {
        &self.config
    }

    pub fn snapshot(&self) -> FormResult<Arc<FormState<V>>> {
        Ok(read_lock(&self.slot, "creating form snapshot")?.state.clone())
    }

    pub fn field(&self, name: impl AsRef<str>) -> FormResult<Option<FieldState<V>>> {
        Ok(read_lock(&self.slot, "reading field state")?
            .state
            .field(name)
            .cloned())
    }

    pub fn mount_field(
        &self,
        name: impl IntoFieldKey,
        initial_value: V,
    ) -> FormResult<Arc<FormState<V>>> {
        let name = name.into_field_key();
        debug!(form = self.id.0, field = %name, "mounting field");
        self.apply("mounting field", |state| {
            Ok(actions::mount(state, name, initial_value, &self.config))
        })
    }

    pub fn focus_field(&self, name: impl IntoFieldKey) -> FormResult<Arc<FormState<V>>> {
        let name = name.into_field_key();
        debug!(form = self.id.0, field = %name, "focusing field");
        self.apply("focusing field", |state| actions::focus(state, name))
    }

    pub fn change_field(
        &self,
        name: impl IntoFieldKey,
        modifier: impl Into<FieldModifier<V>>,
    ) -> FormResult<Arc<FormState<V>>> {
        let name = name.into_field_key();
        debug!(form = self.id.0, field = %name, "changing field");
        self.apply("changing field", |state| {
            actions::change(state, name, modifier, &self.config)
        })
    }

    pub fn change_field_with(
        &self,
        name: impl IntoFieldKey,
        modifier: impl Into<FieldModifier<V>>,
        on_field_change: impl Fn(&V),
    ) -> FormResult<Arc<FormState<V>>> {
        let name = name.into_field_key();
        debug!(form = self.id.0, field = %name, "changing field");
        self.apply("changing field", |state| {
            actions::change_with(state, name, modifier, &self.config, Some(&on_field_change))
        })
    }

    pub fn blur_field(&self, name: impl IntoFieldKey) -> FormResult<Arc<FormState<V>>> {
        let name = name.into_field_key();
        debug!(form = self.id.0, field = %name, "blurring field");
        self.apply("blurring field", |state| {
            actions::blur(state, name, &self.config)
        })
    }

    pub fn reset_field(&self, name: impl IntoFieldKey) -> FormResult<Arc<FormState<V>>> {
        let name = name.into_field_key();
        debug!(form = self.id.0, field = %name, "resetting field");
        self.apply("resetting field", |state| {
            actions::reset_field(state, name, &self.config)
        })
    }

    pub fn reset_form(&self) -> FormResult<Arc<FormState<V>>> {
        debug!(form = self.id.0, "resetting form");
        let mut slot = write_lock(&self.slot, "resetting form")?;
        let next = Arc::new(actions::reset_form(&slot.state, &self.config));
        slot.advance();
        slot.state = next.clone();
        Ok(next)
    }

    /// Starts a submit, runs the validator and the submit operation, and folds
    /// the outcome into the latest snapshot.
    ///
    /// Values handed to `on_submit` are those at the time the submit started.
    /// Field edits made while it is pending are kept.
    pub async fn submit<F, Fut>(&self, on_submit: F) -> FormResult<SubmitStatus>
    where
        F: FnOnce(&Values<V>, &Values<V>) -> Fut,
        Fut: Future<Output = Result<(), SubmitError>>,
    {
        let (ticket, started) = {
            let mut slot = write_lock(&self.slot, "preparing submit")?;
            if slot.state.is_submitting
                && self.config.options.concurrent_submit == SubmitPolicy::Reject
            {
                warn!(form = self.id.0, "submit rejected, another submit is in flight");
                return Err(FormError::AlreadySubmitting);
            }
            if self.config.options.skip_submit_when_invalid && !slot.state.is_valid {
                debug!(form = self.id.0, "submit skipped, form is invalid");
                return Ok(SubmitStatus::Skipped);
            }
            let started = Arc::new(actions::start_submit(&slot.state));
            slot.state = started.clone();
            (slot.advance(), started)
        };
        debug!(form = self.id.0, ticket = ticket.0, "submit started");

        if let Some(errors) = check_form(&started.values, self.config.validator()) {
            return self.resolve_submit(ticket, SubmitStatus::Invalid, |state| {
                actions::fail_submit(state, SubmitError::Errors(errors))
            });
        }

        match on_submit(&started.values, &started.changes).await {
            Ok(()) => self.resolve_submit(ticket, SubmitStatus::Succeeded, actions::finish_submit),
            Err(error) => {
                debug!(form = self.id.0, ticket = ticket.0, %error, "submit failed");
                self.resolve_submit(ticket, SubmitStatus::Failed, |state| {
                    actions::fail_submit(state, error)
                })
            }
        }
    }

    fn resolve_submit(
        &self,
        ticket: SubmitTicket,
        status: SubmitStatus,
        transition: impl FnOnce(&FormState<V>) -> FormState<V>,
    ) -> FormResult<SubmitStatus> {
        let mut slot = write_lock(&self.slot, "completing submit")?;
        if slot.epoch != ticket.0 {
            warn!(
                form = self.id.0,
                ticket = ticket.0,
                current = slot.epoch,
                "discarding outcome of superseded submit"
            );
            return Ok(SubmitStatus::Stale);
        }
        slot.state = Arc::new(transition(&slot.state));
        debug!(form = self.id.0, ticket = ticket.0, ?status, "submit resolved");
        Ok(status)
    }

    fn apply(
        &self,
        context: &'static str,
        transition: impl FnOnce(&FormState<V>) -> FormResult<FormState<V>>,
    ) -> FormResult<Arc<FormState<V>>> {
        let mut slot = write_lock(&self.slot, context)?;
        let next = Arc::new(transition(&slot.state)?);
        slot.state = next.clone();
        Ok(next)
    }
}

pub(super) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(super) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
