mod common;

use apistate_client::{ApiStateMiddleware, StatusBatchComposer};
use apistate_types::{
    Action, ActionType, Dispatch, FailurePayload, PhaseMeta, ReferenceStatus, RequestTimestamp,
    WILDCARD_TAG,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

use common::RecordingDispatcher;

const SCHEMA: &str = "schema_test";

fn make_meta() -> PhaseMeta {
    PhaseMeta::new(SCHEMA, RequestTimestamp::from_millis(123))
}

fn response_document() -> Value {
    json!({
        "data": {
            "schema": SCHEMA,
            "id": "1",
            "type": SCHEMA,
            "attributes": { "name": "Test1" },
        }
    })
}

fn types(actions: &[Action]) -> Vec<ActionType> {
    actions.iter().map(Action::action_type).collect()
}

// ── StatusBatchComposer ─────────────────────────────────────────

#[test]
fn request_phase_marks_collection_busy() {
    let batch = StatusBatchComposer::new()
        .compose(&Action::CreateRequest { meta: make_meta() })
        .unwrap();

    assert_eq!(batch.len(), 1);
    match &batch.actions()[0] {
        Action::ReferenceStatus { payload, meta } => {
            assert_eq!(*payload, ReferenceStatus::pending());
            assert_eq!(*meta, make_meta().with_tag(WILDCARD_TAG));
        }
        other => panic!("Expected ReferenceStatus, got {other:?}"),
    }
}

#[test]
fn success_phase_inserts_then_marks_idle() {
    let batch = StatusBatchComposer::new()
        .compose(&Action::CreateSuccess {
            payload: response_document(),
            meta: make_meta(),
        })
        .unwrap();

    assert_eq!(
        types(batch.actions()),
        vec![ActionType::ObjectCreated, ActionType::ReferenceStatus]
    );

    match &batch.actions()[0] {
        Action::ObjectCreated { payload, meta } => {
            assert_eq!(*payload, response_document()["data"]);
            assert_eq!(*meta, make_meta().with_transformation(Map::new()));
        }
        other => panic!("Expected ObjectCreated, got {other:?}"),
    }
    match &batch.actions()[1] {
        Action::ReferenceStatus { payload, meta } => {
            assert_eq!(*payload, ReferenceStatus::created());
            assert_eq!(meta.tag.as_deref(), Some(WILDCARD_TAG));
            assert_eq!(meta.timestamp, make_meta().timestamp);
        }
        other => panic!("Expected ReferenceStatus, got {other:?}"),
    }
}

#[test]
fn success_phase_carries_configured_transformation() {
    let mut transformation = Map::new();
    transformation.insert("name".into(), Value::from("title"));
    let meta = make_meta().with_transformation(transformation.clone());

    let batch = StatusBatchComposer::new()
        .compose(&Action::CreateSuccess {
            payload: response_document(),
            meta,
        })
        .unwrap();

    let object_meta = batch.actions()[0].meta().unwrap();
    assert_eq!(object_meta.transformation.as_ref(), Some(&transformation));
    let status_meta = batch.actions()[1].meta().unwrap();
    assert!(status_meta.transformation.is_none());
}

#[test]
fn success_without_data_yields_null_object() {
    let batch = StatusBatchComposer::new()
        .compose(&Action::CreateSuccess {
            payload: Value::Null,
            meta: make_meta(),
        })
        .unwrap();
    match &batch.actions()[0] {
        Action::ObjectCreated { payload, .. } => assert!(payload.is_null()),
        other => panic!("Expected ObjectCreated, got {other:?}"),
    }
}

#[test]
fn error_phase_has_no_batch() {
    let composer = StatusBatchComposer::new();
    let error = Action::CreateError {
        payload: FailurePayload::new("boom"),
        meta: make_meta(),
    };
    assert!(composer.compose(&error).is_none());
}

#[test]
fn derived_actions_are_not_composed() {
    let composer = StatusBatchComposer::new();
    let status = Action::reference_status(
        SCHEMA,
        WILDCARD_TAG,
        RequestTimestamp::from_millis(1),
        ReferenceStatus::pending(),
    );
    assert!(composer.compose(&status).is_none());
}

// ── ApiStateMiddleware ──────────────────────────────────────────

#[test]
fn middleware_dispatches_batch_before_phase() {
    let recorder = RecordingDispatcher::new();
    let middleware = ApiStateMiddleware::new(&recorder);

    middleware.dispatch(Action::CreateRequest { meta: make_meta() });
    middleware.dispatch(Action::CreateSuccess {
        payload: response_document(),
        meta: make_meta(),
    });

    let actions = recorder.actions();
    assert_eq!(
        types(&actions),
        vec![
            ActionType::Batch,
            ActionType::CreateRequest,
            ActionType::Batch,
            ActionType::CreateSuccess,
        ]
    );
    assert_eq!(actions[2].as_batch().unwrap().len(), 2);
}

#[test]
fn middleware_passes_error_through_alone() {
    let recorder = RecordingDispatcher::new();
    let middleware = ApiStateMiddleware::new(&recorder);

    middleware.dispatch(Action::CreateError {
        payload: FailurePayload::new("boom"),
        meta: make_meta(),
    });

    assert_eq!(types(&recorder.take()), vec![ActionType::CreateError]);
    assert!(middleware.inner().is_empty());
}
