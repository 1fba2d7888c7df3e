//! Daedalus Backend Abstraction Layer
//!
//! This crate provides the interface between the circuit-building core and
//! whatever executes the circuits. The core never simulates anything
//! itself; it compiles a circuit through a [`Backend`] and reads back raw
//! measurement bitstrings.
//!
//! # Overview
//!
//! - [`Backend`]: the compile/run contract implemented by adapters
//! - [`Capabilities`]: structural limits, cached at construction
//! - [`Counts`]: outcome histogram helper
//! - [`HalError`]: unified error type
//!
//! # Example: Running a circuit
//!
//! ```ignore
//! use daedalus_hal::{Backend, Counts};
//! use daedalus_adapter_sim::SimulatorBackend;
//! use daedalus_ir::Circuit;
//!
//! let backend = SimulatorBackend::with_seed(7);
//! let executable = backend.compile(&circuit)?;
//! let memory = backend.run(&executable, 1000)?;
//!
//! let counts = Counts::from_memory(&memory);
//! if let Some((bitstring, count)) = counts.most_frequent() {
//!     println!("Most frequent: {bitstring} ({count} times)");
//! }
//! ```

pub mod backend;
pub mod error;
pub mod result;

pub use backend::{Backend, Capabilities};
pub use error::{HalError, HalResult};
pub use result::Counts;
