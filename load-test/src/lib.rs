//! # Video Game DB load simulation
//!
//! Virtual users run a fixed request chain against the API:
//!
//! ```text
//! Get all video games -> Authenticate -> Create New Game - #{name}
//!     -> Get Last Posted Game - #{name} -> Delete Game - #{name}
//! ```
//!
//! with a pause between requests. Users are injected after a start delay and
//! spread evenly over a ramp window; each carries its own [`UserSession`]
//! (fed fixture record plus captured token). Every request is recorded as OK or
//! KO in a shared [`Metrics`] and summarised in a [`SimulationReport`].
//!
//! ## Modules
//!
//! - [`session`] - per-user variables
//! - [`feeder`] - random fixture rows
//! - [`check`] - response checks and captures
//! - [`scenario`] - the request chain
//! - [`injection`] - when each user starts
//! - [`metrics`] - OK/KO counters, latency percentiles, the final report
//! - [`simulation`] - ties it all together

pub mod check;
pub mod feeder;
pub mod injection;
pub mod metrics;
pub mod scenario;
pub mod session;
pub mod simulation;

pub use injection::InjectionProfile;
pub use metrics::{Metrics, RequestSummary, SimulationReport};
pub use scenario::Scenario;
pub use session::UserSession;
pub use simulation::Simulation;
