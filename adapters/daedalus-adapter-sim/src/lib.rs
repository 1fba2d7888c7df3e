//! Daedalus Local Statevector Simulator
//!
//! This crate provides the local execution backend the search core is
//! tested against. It is an adapter: the core only ever sees the
//! [`daedalus_hal::Backend`] trait.
//!
//! Statevector simulation is exact but memory-bound:
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//! | 25+ | not recommended |
//!
//! Measurements must be terminal. The state is evolved once per `run`
//! call and sampled per shot, so large shot counts are cheap.

mod simulator;
mod statevector;

pub use simulator::{CompiledCircuit, SimulatorBackend};
pub use statevector::Statevector;
