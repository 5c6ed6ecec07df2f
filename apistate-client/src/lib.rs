//! Create-lifecycle orchestrator for apistate.
//!
//! Turns a single "create resource" intent into the ordered sequence of
//! actions the resource cache needs:
//!
//! 1. **Build**: [`create`] validates input and produces a
//!    [`RequestDescriptor`] whose three phase metas share one timestamp.
//! 2. **Issue**: the request phase is dispatched, preceded by a batch marking
//!    the collection busy.
//! 3. **Settle**: after the [`Transport`] call completes, the success phase is
//!    dispatched after a batch that stores the returned object and marks the
//!    collection idle, or the error phase is dispatched on its own.
//!
//! # Example
//!
//! ```no_run
//! use apistate_client::{HttpTransport, HttpTransportConfig, Orchestrator, RequestConfig};
//! use apistate_types::{Action, Dispatch, Item};
//!
//! struct Log;
//!
//! impl Dispatch for Log {
//!     fn dispatch(&self, action: Action) {
//!         println!("{}", action.action_type());
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new(HttpTransportConfig::default())?;
//! let orchestrator = Orchestrator::new(transport);
//! let store = Log;
//!
//! let config = RequestConfig::new("https://api.example.com/notes")
//!     .with_header("Content-Type", "application/vnd.api+json");
//! let item = Item::new("notes").with_attribute("title", "Hello");
//!
//! let settlement = orchestrator
//!     .create(Some(&config), "notes", Some(item.into()), &store)
//!     .await?;
//! assert!(settlement.is_success());
//! # Ok(())
//! # }
//! ```

mod composer;
mod config;
mod descriptor;
mod enricher;
mod error;
mod lifecycle;
mod transport;

pub use composer::{ApiStateMiddleware, StatusBatchComposer};
pub use config::{HttpTransportConfig, RequestConfig};
pub use descriptor::{create, create_from_value, PhaseMarker, PhaseTypes, RequestDescriptor};
pub use enricher::PhaseMetas;
pub use error::{ActionError, ActionResult, TransportError, TransportResult};
pub use lifecycle::{Operation, OperationState, Orchestrator, Settlement};
pub use transport::{HttpTransport, Transport};
