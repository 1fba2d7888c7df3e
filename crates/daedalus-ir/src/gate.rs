//! Gate types.
//!
//! The gate set is deliberately small: it is exactly the set an
//! oracle-plus-diffusion circuit needs, and every member is its own
//! inverse. Keeping the set self-inverse makes [`Circuit::inverse`]
//! a pure reversal of instruction order, which is what guarantees
//! exact ancilla uncomputation.
//!
//! [`Circuit::inverse`]: crate::circuit::Circuit::inverse

use serde::{Deserialize, Serialize};

/// A gate from the self-inverse working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Z gate.
    Z,
    /// Controlled-X (CNOT) gate.
    CX,
    /// Toffoli gate (CCX).
    CCX,
    /// Multi-controlled X: all qubits but the last are controls.
    MCX,
    /// Multi-controlled Z: all qubits but the last are controls.
    MCZ,
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H => "h",
            Gate::X => "x",
            Gate::Z => "z",
            Gate::CX => "cx",
            Gate::CCX => "ccx",
            Gate::MCX => "mcx",
            Gate::MCZ => "mcz",
        }
    }

    /// Number of qubits for fixed-arity gates, `None` for the
    /// multi-controlled variants.
    #[inline]
    pub fn num_qubits(&self) -> Option<u32> {
        match self {
            Gate::H | Gate::X | Gate::Z => Some(1),
            Gate::CX => Some(2),
            Gate::CCX => Some(3),
            Gate::MCX | Gate::MCZ => None,
        }
    }

    /// Minimum number of qubits this gate accepts.
    #[inline]
    pub fn min_qubits(&self) -> u32 {
        match self {
            Gate::H | Gate::X | Gate::Z => 1,
            Gate::CX | Gate::MCX | Gate::MCZ => 2,
            Gate::CCX => 3,
        }
    }

    /// The inverse gate. Every gate in this set is self-adjoint, so this
    /// is the identity; it is kept explicit so callers state intent.
    #[inline]
    pub fn inverse(&self) -> Gate {
        *self
    }
}
