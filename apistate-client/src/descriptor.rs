//! Request descriptors and the create action builder.
//!
//! [`create`] validates caller input and returns a [`RequestDescriptor`]:
//! method, endpoint, headers, body, and the three phase markers that the
//! lifecycle dispatches. Building has no side effects, so a rejected call
//! leaves the cache untouched.
//!
//! # Body resolution
//!
//! 1. The explicit `input` argument, when given.
//! 2. Otherwise `config.body`, when set.
//! 3. Otherwise no body, which is allowed.
//!
//! An item passed as the argument is validated and wrapped as
//! `{"data": item}`. `config.body` is already final: a raw body is sent
//! unchanged and an item there is serialized as-is, never re-wrapped. A raw
//! argument is sent unchanged too.

use crate::config::RequestConfig;
use crate::enricher::PhaseMetas;
use crate::error::{ActionError, ActionResult};
use apistate_types::{Action, ActionType, BodyInput, Document, FailurePayload, PhaseMeta};
use reqwest::Method;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// One lifecycle slot: the action type dispatched for a phase and its meta.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseMarker {
    pub action_type: ActionType,
    pub meta: PhaseMeta,
}

/// The request, success and error slots of a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTypes {
    pub request: PhaseMarker,
    pub success: PhaseMarker,
    pub error: PhaseMarker,
}

impl PhaseTypes {
    fn from_metas(metas: PhaseMetas) -> Self {
        Self {
            request: PhaseMarker {
                action_type: ActionType::CreateRequest,
                meta: metas.request,
            },
            success: PhaseMarker {
                action_type: ActionType::CreateSuccess,
                meta: metas.success,
            },
            error: PhaseMarker {
                action_type: ActionType::CreateError,
                meta: metas.error,
            },
        }
    }

    /// The three markers in dispatch-slot order.
    pub fn as_array(&self) -> [&PhaseMarker; 3] {
        [&self.request, &self.success, &self.error]
    }
}

/// A fully-resolved create request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub endpoint: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    pub types: PhaseTypes,
}

impl RequestDescriptor {
    /// The resource collection this request targets.
    pub fn schema(&self) -> &str {
        &self.types.request.meta.schema
    }

    /// The request-phase action.
    pub fn request_action(&self) -> Action {
        Action::CreateRequest {
            meta: self.types.request.meta.clone(),
        }
    }

    /// The success-phase action carrying the full response document.
    pub fn success_action(&self, document: Value) -> Action {
        Action::CreateSuccess {
            payload: document,
            meta: self.types.success.meta.clone(),
        }
    }

    /// The error-phase action.
    pub fn error_action(&self, failure: FailurePayload) -> Action {
        Action::CreateError {
            payload: failure,
            meta: self.types.error.meta.clone(),
        }
    }
}

/// Builds a create request for `schema`.
///
/// Fails with [`ActionError::Config`] when `config` is absent,
/// [`ActionError::Schema`] when `schema` is empty, and
/// [`ActionError::Item`] when the resolved item is invalid, checked in that
/// order.
pub fn create(
    config: Option<&RequestConfig>,
    schema: &str,
    input: Option<BodyInput>,
) -> ActionResult<RequestDescriptor> {
    let config = config.ok_or(ActionError::Config)?;
    if schema.is_empty() {
        return Err(ActionError::Schema);
    }

    let body = match (input.as_ref(), config.body.as_ref()) {
        (Some(input), _) => Some(wrap_body(input)?),
        (None, Some(body)) => Some(final_body(body)?),
        (None, None) => None,
    };

    let metas = PhaseMetas::capture(
        schema,
        config.tag.as_deref(),
        config.transformation.as_ref(),
    );
    debug!(
        schema,
        endpoint = %config.endpoint,
        timestamp = %metas.timestamp(),
        has_body = body.is_some(),
        "Built create descriptor"
    );

    Ok(RequestDescriptor {
        method: Method::POST,
        endpoint: config.endpoint.clone(),
        headers: config.headers.clone(),
        body,
        types: PhaseTypes::from_metas(metas),
    })
}

/// Builds a create request from loosely-typed JSON input.
///
/// `config` must be a JSON object. A `null` item is treated as absent. An
/// item that is neither an object nor a string fails with
/// [`ActionError::Item`].
pub fn create_from_value(
    config: Option<&Value>,
    schema: &str,
    item: Option<Value>,
) -> ActionResult<RequestDescriptor> {
    let config = config
        .filter(|c| c.is_object())
        .ok_or(ActionError::Config)?;
    if schema.is_empty() {
        return Err(ActionError::Schema);
    }
    let config = RequestConfig::try_from(config)?;
    let input = item
        .filter(|v| !v.is_null())
        .map(BodyInput::try_from)
        .transpose()
        .map_err(|_| ActionError::Item)?;
    create(Some(&config), schema, input)
}

fn wrap_body(input: &BodyInput) -> ActionResult<String> {
    match input {
        BodyInput::Item(item) => {
            item.validate().map_err(|_| ActionError::Item)?;
            Ok(serde_json::to_string(&Document::wrap(item))?)
        }
        BodyInput::Raw(raw) => Ok(raw.clone()),
    }
}

fn final_body(body: &BodyInput) -> ActionResult<String> {
    match body {
        BodyInput::Item(item) => {
            item.validate().map_err(|_| ActionError::Item)?;
            Ok(serde_json::to_string(item)?)
        }
        BodyInput::Raw(raw) => Ok(raw.clone()),
    }
}
