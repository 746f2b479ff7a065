use tabsmith_core::{GenerationMode, GenerationResponse, SchemaModel};
use tabsmith_request::{Payload, build, check_description};

use crate::errors::{ServiceError, SessionError};
use crate::service::GenerationService;
use crate::store::ResultStore;

/// Where the current submission cycle stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Pending { ticket: u64, mode: GenerationMode },
    Resolved { ticket: u64 },
    Failed { ticket: u64, message: String },
}

/// A submission that has been started and awaits its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub ticket: u64,
    pub mode: GenerationMode,
    /// Snapshot taken when the request began.
    pub payload: Payload,
}

/// Owns the schema model and the result store for one user.
///
/// At most one request is pending. The model stays editable while it is;
/// edits never reach a payload that was already built.
#[derive(Debug, Clone)]
pub struct Session {
    model: SchemaModel,
    store: ResultStore,
    state: RequestState,
    next_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SchemaModel::default())
    }
}

impl Session {
    pub fn new(model: SchemaModel) -> Self {
        Self {
            model,
            store: ResultStore::new(),
            state: RequestState::Idle,
            next_ticket: 1,
        }
    }

    pub fn model(&self) -> &SchemaModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut SchemaModel {
        &mut self.model
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Table selection is the only store mutation open to callers.
    pub fn select_table(&mut self, name: &str) -> bool {
        self.store.select_table(name)
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, RequestState::Pending { .. })
    }

    /// Start a submission: build the payload snapshot and clear the previous
    /// outcome.
    ///
    /// Rejected while another request is pending, and for natural-language
    /// mode when the description is empty.
    pub fn begin(&mut self, mode: GenerationMode) -> Result<PendingRequest, SessionError> {
        if let RequestState::Pending { ticket, .. } = self.state {
            return Err(SessionError::InFlight { ticket });
        }
        if mode == GenerationMode::NaturalLanguage {
            let report = check_description(&self.model.description);
            if let Some(issue) = report.errors.first() {
                return Err(SessionError::InvalidDescription(issue.message.clone()));
            }
        }

        let payload = build(mode, &self.model);
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.store.clear();
        self.state = RequestState::Pending { ticket, mode };
        tracing::debug!(event = "submission_started", ticket, mode = mode.as_str());

        Ok(PendingRequest {
            ticket,
            mode,
            payload,
        })
    }

    /// Record the outcome of the pending request.
    ///
    /// Only the ticket handed out by the latest [`Session::begin`] is
    /// accepted, so a late response cannot overwrite a newer one.
    pub fn complete(
        &mut self,
        ticket: u64,
        outcome: Result<GenerationResponse, ServiceError>,
    ) -> Result<(), SessionError> {
        match self.state {
            RequestState::Pending { ticket: current, .. } if current == ticket => {}
            _ => return Err(SessionError::StaleTicket { ticket }),
        }

        match outcome {
            Ok(response) => {
                self.store.absorb(response);
                self.state = RequestState::Resolved { ticket };
            }
            Err(err) => {
                let message = err.to_string();
                tracing::debug!(event = "submission_failed", ticket, message = %message);
                self.store.fail(message.clone());
                self.state = RequestState::Failed { ticket, message };
            }
        }
        Ok(())
    }

    /// Begin, send through `service`, and complete in one step.
    pub async fn submit<S>(
        &mut self,
        service: &S,
        mode: GenerationMode,
    ) -> Result<&RequestState, SessionError>
    where
        S: GenerationService + ?Sized,
    {
        let pending = self.begin(mode)?;
        let outcome = service.generate(&pending.payload).await;
        self.complete(pending.ticket, outcome)?;
        Ok(&self.state)
    }
}
