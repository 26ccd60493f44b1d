//! # hostgraph
//!
//! A small graph-based workflow executor and, built on it, a travel policy automaton
//! that routes a user's request between remote specialists: a weather specialist and a
//! rental specialist whose ideas are only shared after the forecast is checked.
//!
//! ## Design Principles
//!
//! - **Single state type**: each graph uses one state struct that every stage reads.
//!   A stage gets `&S` and returns either a whole replacement state or nothing.
//! - **Named stages, explicit transitions**: static edges, conditional edges (router +
//!   route map, unknown keys end the run) and an `END` terminal that no stage name can
//!   collide with.
//! - **Collaborators behind traits**: classifier, hazard detector, specialist client and
//!   session store are injected, so tests run the whole automaton offline.
//!
//! ## Main Modules
//!
//! - [`graph`]: `StateGraph`, `CompiledStateGraph`, `Node`, `Next`, middleware, logging.
//! - [`policy`]: the five policy stages, `policy_graph` and `HostRouter`.
//! - [`specialist`]: `SpecialistClient`, `SpecialistDirectory`, A2A task payloads.
//! - [`session`]: history, context ids and follow-up intent per session.
//! - [`config`]: `HostConfig` from env.
//!
//! ## Features
//!
//! - `a2a` (default): `A2aClient` (JSON-RPC over `reqwest`) and `build_host_context`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hostgraph::policy::{Collaborators, HostRouter};
//! use hostgraph::session::InMemorySessionStore;
//! use hostgraph::specialist::{AgentCard, MockSpecialistClient, SpecialistDirectory};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let directory = SpecialistDirectory::from_cards([
//!     AgentCard::new("Weather Specialist", "Forecasts"),
//!     AgentCard::new("Hotel Specialist", "Lodging ideas"),
//! ]);
//! let client = MockSpecialistClient::new()
//!     .with_texts("Weather Specialist", ["Sunny all week."])
//!     .with_texts("Hotel Specialist", ["Harbor view studio."]);
//! let collab = Collaborators::new(directory, Arc::new(client));
//! let router = HostRouter::new(&collab, Arc::new(InMemorySessionStore::new())).unwrap();
//! let replies = router.handle_request("Find a hotel in Boston", "demo").await.unwrap();
//! for reply in replies {
//!     println!("{}", reply);
//! }
//! # }
//! ```

#[cfg(feature = "a2a")]
pub mod builder;
pub mod config;
pub mod error;
pub mod graph;
pub mod policy;
pub mod session;
pub mod specialist;
pub mod stream;

#[cfg(feature = "a2a")]
pub use builder::{build_host_context, HostContext};
pub use config::{ConfigError, HostConfig};
pub use error::AgentError;
pub use graph::{
    CompilationError, CompiledStateGraph, FnNode, NameNode, Next, Node, NodeMiddleware,
    StateGraph, END,
};
pub use policy::{Collaborators, HostRouter, HostState, RunError};
pub use session::{HistoryEntry, InMemorySessionStore, Role, SessionStore};
#[cfg(feature = "a2a")]
pub use specialist::A2aClient;
pub use specialist::{
    AgentCard, Capability, MockSpecialistClient, SpecialistClient, SpecialistDirectory,
    SpecialistError,
};
pub use stream::{StreamEvent, StreamMode};
