use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use tabsmith_client::{
    GenerationService, HealthStatus, RequestState, ServiceError, Session, SessionError,
};
use tabsmith_core::{
    DatabaseProperty, FieldProperty, FieldScope, GenerationMode, GenerationResponse,
    SchemaModel, TableProperty,
};
use tabsmith_request::Payload;

/// Replays canned outcomes and records every payload it was sent.
struct StubService {
    outcomes: Mutex<Vec<Result<GenerationResponse, ServiceError>>>,
    seen: Mutex<Vec<Payload>>,
}

impl StubService {
    fn new(outcomes: Vec<Result<GenerationResponse, ServiceError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GenerationService for StubService {
    async fn generate(&self, payload: &Payload) -> Result<GenerationResponse, ServiceError> {
        self.seen.lock().unwrap().push(payload.clone());
        self.outcomes.lock().unwrap().remove(0)
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        Ok(serde_json::from_value(json!({"status": "healthy", "model": "stub"})).unwrap())
    }
}

fn school() -> GenerationResponse {
    GenerationResponse::decode(
        GenerationMode::Database,
        json!({
            "db_name": "school",
            "generation_order": ["students", "grades"],
            "tables": {
                "students": [{"id": 1}],
                "grades": [{"student_id": 1, "score": 8}]
            },
            "counts": {},
            "total_records": 2,
            "total_tables": 2
        }),
    )
    .unwrap()
}

fn school_model() -> SchemaModel {
    let mut model = SchemaModel::default();
    model.set_database_property(DatabaseProperty::Name("school".to_string()));
    model.set_table_property(0, TableProperty::Name("students".to_string()));
    model.set_field_property(FieldScope::Table(0), 0, FieldProperty::Name("id".to_string()));
    model
}

#[tokio::test]
async fn submit_absorbs_result_and_selects_first_table() {
    let service = StubService::new(vec![Ok(school())]);
    let mut session = Session::new(school_model());

    let state = session
        .submit(&service, GenerationMode::Database)
        .await
        .expect("submit");
    assert!(matches!(state, RequestState::Resolved { ticket: 1 }));
    assert_eq!(session.store().selected_table(), Some("students"));
    assert!(session.select_table("grades"));
    assert!(!session.select_table("nonexistent"));
    assert_eq!(session.store().selected_table(), Some("grades"));

    let seen = service.seen.lock().unwrap();
    let Payload::Database(payload) = &seen[0] else {
        panic!("expected database payload");
    };
    assert_eq!(payload.db_schema.db_name, "school");
}

#[tokio::test]
async fn service_error_clears_previous_result() {
    let service = StubService::new(vec![
        Ok(school()),
        Err(ServiceError::Rejected {
            status: 500,
            message: "model backend unavailable".to_string(),
        }),
    ]);
    let mut session = Session::new(school_model());
    session.submit(&service, GenerationMode::Database).await.unwrap();

    let state = session
        .submit(&service, GenerationMode::Database)
        .await
        .unwrap()
        .clone();
    assert_eq!(
        state,
        RequestState::Failed {
            ticket: 2,
            message: "model backend unavailable".to_string()
        }
    );
    assert!(session.store().result().is_none());
    assert!(session.store().selected_table().is_none());
    assert_eq!(session.store().error(), Some("model backend unavailable"));
}

#[test]
fn second_submission_is_rejected_while_pending() {
    let mut session = Session::new(school_model());
    let first = session.begin(GenerationMode::Database).unwrap();
    assert_eq!(
        session.begin(GenerationMode::Single),
        Err(SessionError::InFlight { ticket: first.ticket })
    );
}

#[test]
fn stale_ticket_cannot_overwrite_newer_result() {
    let mut session = Session::new(school_model());
    let first = session.begin(GenerationMode::Database).unwrap();
    session
        .complete(first.ticket, Err(ServiceError::Transport("timed out".to_string())))
        .unwrap();

    let second = session.begin(GenerationMode::Database).unwrap();
    assert_eq!(
        session.complete(first.ticket, Ok(school())),
        Err(SessionError::StaleTicket { ticket: first.ticket })
    );
    assert!(session.is_pending());

    session.complete(second.ticket, Ok(school())).unwrap();
    assert_eq!(session.state(), &RequestState::Resolved { ticket: second.ticket });
}

#[test]
fn edits_after_begin_do_not_reach_the_payload() {
    let mut session = Session::new(school_model());
    let pending = session.begin(GenerationMode::Database).unwrap();
    session
        .model_mut()
        .set_table_property(0, TableProperty::Name("pupils".to_string()));

    let Payload::Database(payload) = pending.payload else {
        panic!("expected database payload");
    };
    assert_eq!(payload.db_schema.tables[0].table_name, "students");
}

#[test]
fn empty_description_is_rejected_locally() {
    let mut session = Session::default();
    let err = session.begin(GenerationMode::NaturalLanguage).unwrap_err();
    assert!(matches!(err, SessionError::InvalidDescription(_)));
    assert_eq!(session.state(), &RequestState::Idle);

    session
        .model_mut()
        .set_description("A school with students, courses and grades");
    assert!(session.begin(GenerationMode::NaturalLanguage).is_ok());
}

#[tokio::test]
async fn health_reports_status() {
    let service = StubService::new(Vec::new());
    let health = service.health().await.unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.details["model"], json!("stub"));
}
