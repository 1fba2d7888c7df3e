//! Simulator backend implementation.

use std::sync::Mutex;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use daedalus_hal::{Backend, Capabilities, HalError, HalResult};
use daedalus_ir::{Circuit, Instruction, InstructionKind};

use crate::statevector::Statevector;

/// A circuit lowered for statevector execution.
pub struct CompiledCircuit {
    name: String,
    num_qubits: usize,
    num_clbits: usize,
    /// Gate instructions only, in program order.
    gates: Vec<Instruction>,
    /// Terminal measurement map: (qubit, clbit).
    measures: Vec<(usize, usize)>,
}

impl CompiledCircuit {
    /// Name of the source circuit.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of gate instructions after lowering.
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }
}

/// Local statevector simulator backend.
///
/// Supports circuits up to ~20 qubits (limited by memory). Sampling uses
/// an explicit RNG: construct with [`SimulatorBackend::with_seed`] for
/// reproducible runs.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    rng: Mutex<StdRng>,
}

impl SimulatorBackend {
    /// Create a simulator with entropy-seeded sampling.
    pub fn new() -> Self {
        Self {
            capabilities: Capabilities::simulator(20),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a simulator with a fixed sampling seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            capabilities: Capabilities::simulator(20),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Create a simulator with a custom qubit ceiling.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimulatorBackend {
    type Executable = CompiledCircuit;

    fn name(&self) -> &str {
        "statevector_simulator"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn compile(&self, circuit: &Circuit) -> HalResult<CompiledCircuit> {
        if circuit.num_qubits() > self.capabilities.num_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit '{}' has {} qubits but the simulator supports {}",
                circuit.name(),
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }

        let mut gates = Vec::with_capacity(circuit.len());
        let mut measures = Vec::new();
        for inst in circuit.instructions() {
            match inst.kind {
                InstructionKind::Gate(_) => {
                    if !measures.is_empty() {
                        return Err(HalError::Unsupported(format!(
                            "mid-circuit measurement in '{}': gates after measure",
                            circuit.name()
                        )));
                    }
                    gates.push(inst.clone());
                }
                InstructionKind::Measure => {
                    measures.push((inst.qubits[0].0 as usize, inst.clbits[0].0 as usize));
                }
                InstructionKind::Barrier => {}
            }
        }
        if measures.is_empty() {
            return Err(HalError::InvalidCircuit(format!(
                "circuit '{}' has no measurements",
                circuit.name()
            )));
        }

        debug!(
            gates = gates.len(),
            measured = measures.len(),
            "lowered circuit for statevector execution"
        );

        Ok(CompiledCircuit {
            name: circuit.name().to_string(),
            num_qubits: circuit.num_qubits() as usize,
            num_clbits: circuit.num_clbits() as usize,
            gates,
            measures,
        })
    }

    #[instrument(skip(self, executable), fields(circuit = executable.name()))]
    fn run(&self, executable: &CompiledCircuit, shots: u32) -> HalResult<Vec<String>> {
        if shots == 0 || shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "shots must be in 1..={}, got {shots}",
                self.capabilities.max_shots
            )));
        }

        let start = Instant::now();

        // Measurements are terminal, so the state is evolved once and
        // sampled independently per shot.
        let mut sv = Statevector::new(executable.num_qubits);
        for inst in &executable.gates {
            sv.apply(inst);
        }

        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let mut memory = Vec::with_capacity(shots as usize);
        for _ in 0..shots {
            let outcome = sv.sample(&mut *rng);
            memory.push(outcome_to_bitstring(
                outcome,
                executable.num_clbits,
                &executable.measures,
            ));
        }

        debug!(shots, elapsed = ?start.elapsed(), "simulation completed");
        Ok(memory)
    }
}

/// Render an outcome index as a bitstring over the measured classical
/// bits: character `i` from the right is clbit `i`. Unmeasured classical
/// bits read 0.
fn outcome_to_bitstring(outcome: usize, num_clbits: usize, measures: &[(usize, usize)]) -> String {
    let mut bits = vec![b'0'; num_clbits];
    for &(qubit, clbit) in measures {
        if (outcome >> qubit) & 1 == 1 {
            bits[num_clbits - 1 - clbit] = b'1';
        }
    }
    String::from_utf8(bits).expect("bitstring is ascii")
}
