//! Backend trait and capabilities.
//!
//! The [`Backend`] trait defines the two-step lifecycle for executing a
//! circuit:
//!
//! ```text
//!   compile(circuit) ──→ Executable ──→ run(executable, shots) ──→ memory
//! ```
//!
//! `compile` performs backend-specific lowering and is where structural
//! limits (qubit count, gate set) are enforced; `run` is a single
//! synchronous batch call returning one bitstring per trial. Retries and
//! re-tuning are caller policy, not backend policy.

use daedalus_ir::Circuit;
use serde::{Deserialize, Serialize};

use crate::error::HalResult;

/// Capabilities of a backend.
///
/// Cached at construction time; introspection is synchronous and
/// infallible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Maximum number of qubits the backend can handle.
    pub num_qubits: u32,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Whether this backend is a simulator.
    pub is_simulator: bool,
}

impl Capabilities {
    /// Capabilities for a local simulator with a qubit ceiling.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            max_shots: 1 << 20,
            is_simulator: true,
        }
    }
}

/// Trait for execution backends.
///
/// The core treats a backend as an injected dependency: it hands over an
/// assembled circuit and a shot count and gets back raw bitstrings. The
/// bitstring convention is defined in [`crate::result`].
pub trait Backend {
    /// The backend-specific lowered form of a circuit.
    type Executable;

    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Lower a circuit into the backend's executable form.
    ///
    /// Must reject circuits that exceed [`Capabilities::num_qubits`] or
    /// use unsupported instructions.
    fn compile(&self, circuit: &Circuit) -> HalResult<Self::Executable>;

    /// Execute `shots` independent trials.
    ///
    /// Returns one bitstring per trial, each covering exactly the
    /// measured classical bits.
    fn run(&self, executable: &Self::Executable, shots: u32) -> HalResult<Vec<String>>;
}
