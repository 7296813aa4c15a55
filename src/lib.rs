//! Ordered step composition with conditional filters.
//!
//! `stepwise` runs a fixed, ordered list of steps against one shared, mutable
//! context. Each organizer kind declares its steps once; every run then
//! invokes them in declaration order, skipping a step when its `unless`
//! filter holds or its `if` filter does not.
//!
//! # Architecture
//!
//! Steps are declared up front and shared by every run of a kind. A run
//! traverses an immutable snapshot of the declared sequence, and the first
//! step error ends the run and reaches the caller unchanged. Filters are
//! resolved against the organizer value itself, either through a closure or
//! through a named capability.
//!
//! # Modules
//!
//! - [`step`]: The single-step contract and nested step lists
//! - [`filter`]: `if` / `unless` filters and named capabilities
//! - [`sequence`]: Ordered storage and traversal of declared steps
//! - [`organizer`]: Per-kind declaration and the run surface
//! - [`config`]: Configuration system with layered precedence (CLI > env > file > defaults)
//! - [`logging`]: Subscriber set-up for the binary
//! - [`error`]: Semantic error types for the application
//! - [`checkout`]: The checkout organizer bundled with the binary

pub mod checkout;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod organizer;
pub mod sequence;
pub mod step;

pub use organizer::{Organizer, configure};
pub use sequence::{RunSummary, StepOptions, StepSequence};
pub use step::{Step, StepRef, step_fn};
