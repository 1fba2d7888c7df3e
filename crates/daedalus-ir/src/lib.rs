//! Daedalus Circuit Intermediate Representation
//!
//! This crate provides the data structures for representing reversible
//! marking circuits in Daedalus. It is the foundation the oracle compiler
//! and the amplification driver build on.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered instruction list over a fixed, self-inverse
//! gate set. Two operations carry the whole design:
//!
//! - [`Circuit::append`] composes a sub-circuit under a qubit mapping, so
//!   a verification block built once can be replayed at every path
//!   position.
//! - [`Circuit::inverse`] reverses the instruction list exactly, which is
//!   what lets an oracle uncompute its ancillas bit-for-bit.
//!
//! # Example: Marking the all-ones state
//!
//! ```rust
//! use daedalus_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("mark", 3, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.h(QubitId(1)).unwrap();
//! circuit.mcz(&[QubitId(0), QubitId(1)], QubitId(2)).unwrap();
//!
//! assert_eq!(circuit.gate_count(), 3);
//! let undo = circuit.inverse().unwrap();
//! assert_eq!(undo.len(), circuit.len());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Z` | 1 | Pauli gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CCX` | 3 | Toffoli (CCNOT) gate |
//! | `MCX` | n | Multi-controlled X (last qubit is the target) |
//! | `MCZ` | n | Multi-controlled Z (last qubit is the target) |
//!
//! Every gate is its own inverse; that restriction is deliberate.

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
