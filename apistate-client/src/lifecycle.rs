//! The create lifecycle.
//!
//! An [`Operation`] moves from `Pending` to `Settled` exactly once:
//!
//! ```text
//! issue ──► Pending ──► Settled(Success)
//!                  └──► Settled(Error)
//! ```
//!
//! Issuing dispatches the request phase (preceded by the busy batch). The
//! [`Orchestrator`] then awaits a single transport call, the only suspension
//! point, and settles the operation with the outcome.

use crate::composer::ApiStateMiddleware;
use crate::config::RequestConfig;
use crate::descriptor::{create, RequestDescriptor};
use crate::error::{ActionResult, TransportResult};
use crate::transport::Transport;
use apistate_types::{BodyInput, Dispatch, FailurePayload};
use serde_json::Value;
use tracing::{info, warn};

/// How an operation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// The transport returned this response document.
    Success(Value),
    /// The transport failed.
    Error(FailurePayload),
}

impl Settlement {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Lifecycle state of one operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationState {
    Pending,
    Settled(Settlement),
}

/// One in-flight create.
#[derive(Debug)]
pub struct Operation {
    descriptor: RequestDescriptor,
    state: OperationState,
}

impl Operation {
    /// Dispatches the request phase and returns the pending operation.
    pub fn issue<D: Dispatch + ?Sized>(descriptor: RequestDescriptor, dispatcher: &D) -> Self {
        info!(
            schema = descriptor.schema(),
            endpoint = %descriptor.endpoint,
            timestamp = %descriptor.types.request.meta.timestamp,
            "Issuing create"
        );
        ApiStateMiddleware::new(dispatcher).dispatch(descriptor.request_action());
        Self {
            descriptor,
            state: OperationState::Pending,
        }
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    pub fn state(&self) -> &OperationState {
        &self.state
    }

    /// Settles the operation with the transport outcome and dispatches the
    /// matching phase.
    ///
    /// Settling twice dispatches nothing and returns the first settlement.
    pub fn settle<D: Dispatch + ?Sized>(
        &mut self,
        outcome: TransportResult<Value>,
        dispatcher: &D,
    ) -> Settlement {
        if let OperationState::Settled(settlement) = &self.state {
            warn!(schema = self.descriptor.schema(), "Operation already settled");
            return settlement.clone();
        }

        let pipeline = ApiStateMiddleware::new(dispatcher);
        let settlement = match outcome {
            Ok(document) => {
                info!(schema = self.descriptor.schema(), "Create succeeded");
                pipeline.dispatch(self.descriptor.success_action(document.clone()));
                Settlement::Success(document)
            }
            Err(e) => {
                warn!(schema = self.descriptor.schema(), "Create failed: {}", e);
                let failure = e.to_failure();
                pipeline.dispatch(self.descriptor.error_action(failure.clone()));
                Settlement::Error(failure)
            }
        };
        self.state = OperationState::Settled(settlement.clone());
        settlement
    }
}

/// Drives create operations through a transport.
pub struct Orchestrator<T> {
    transport: T,
}

impl<T: Transport> Orchestrator<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs a built descriptor to settlement.
    pub async fn run<D: Dispatch + ?Sized>(
        &self,
        descriptor: RequestDescriptor,
        dispatcher: &D,
    ) -> Settlement {
        let mut operation = Operation::issue(descriptor, dispatcher);
        let outcome = self.transport.execute(operation.descriptor()).await;
        operation.settle(outcome, dispatcher)
    }

    /// Builds and runs a create. Validation errors are returned before
    /// anything is dispatched.
    pub async fn create<D: Dispatch + ?Sized>(
        &self,
        config: Option<&RequestConfig>,
        schema: &str,
        input: Option<BodyInput>,
        dispatcher: &D,
    ) -> ActionResult<Settlement> {
        let descriptor = create(config, schema, input)?;
        Ok(self.run(descriptor, dispatcher).await)
    }
}
