//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// A reversible circuit program.
///
/// Instructions are kept as an ordered list. This is what makes
/// [`Circuit::inverse`] exact: inverting a circuit whose gate set is
/// self-adjoint is precisely a reversal of instruction order, with no
/// ambiguity about commuting layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// Ordered instruction list.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new circuit with no qubits.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_size(name, 0, 0)
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    // =========================================================================
    // Gate application
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(Gate::H, [qubit]))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(Gate::X, [qubit]))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(Gate::Z, [qubit]))
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(Gate::CX, [control, target]))
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(Gate::CCX, [c1, c2, target]))
    }

    /// Apply a multi-controlled X: flips `target` iff every control is 1.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        let qubits: Vec<_> = controls.iter().copied().chain([target]).collect();
        self.apply(Instruction::gate(Gate::MCX, qubits))
    }

    /// Apply a multi-controlled Z: phase-flips iff every qubit is 1.
    ///
    /// Z is symmetric in controls and target; the last qubit is the
    /// nominal target.
    pub fn mcz(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        let qubits: Vec<_> = controls.iter().copied().chain([target]).collect();
        self.apply(Instruction::gate(Gate::MCZ, qubits))
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Validate and record an instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        let gate_name = || Some(instruction.name().to_string());

        for &qubit in &instruction.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name(),
                });
            }
        }
        for &clbit in &instruction.clbits {
            if clbit.0 >= self.num_clbits {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: gate_name(),
                });
            }
        }
        for (i, &qubit) in instruction.qubits.iter().enumerate() {
            if instruction.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name(),
                });
            }
        }
        if let InstructionKind::Gate(gate) = instruction.kind {
            let got = instruction.qubits.len() as u32;
            match gate.num_qubits() {
                Some(expected) if got != expected => {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: expected.to_string(),
                        got,
                    });
                }
                None if got < gate.min_qubits() => {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: format!("at least {}", gate.min_qubits()),
                        got,
                    });
                }
                _ => {}
            }
        }

        self.instructions.push(instruction);
        Ok(self)
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Append another circuit, mapping its qubit `i` onto `mapping[i]`.
    ///
    /// This is how a sub-circuit built once (an edge check, a diffusion
    /// block) is reused at many qubit offsets. The sub-circuit must be
    /// purely unitary; measurements do not survive remapping.
    pub fn append(&mut self, other: &Circuit, mapping: &[QubitId]) -> IrResult<&mut Self> {
        if mapping.len() != other.num_qubits as usize {
            return Err(IrError::AppendMismatch {
                name: other.name.clone(),
                expected: other.num_qubits as usize,
                got: mapping.len(),
            });
        }
        if other.instructions.iter().any(Instruction::is_measure) {
            return Err(IrError::NotInvertible(other.name.clone()));
        }
        for inst in &other.instructions {
            let mut remapped = inst.clone();
            remapped.qubits = inst
                .qubits
                .iter()
                .map(|q| mapping[q.0 as usize])
                .collect();
            self.apply(remapped)?;
        }
        Ok(self)
    }

    /// The exact inverse of this circuit.
    ///
    /// Every gate in the set is self-adjoint, so inversion is instruction
    /// reversal. Fails if the circuit contains measurements.
    pub fn inverse(&self) -> IrResult<Circuit> {
        if self.instructions.iter().any(Instruction::is_measure) {
            return Err(IrError::NotInvertible(self.name.clone()));
        }
        let mut inverted = Circuit::with_size(
            format!("{}_dg", self.name),
            self.num_qubits,
            self.num_clbits,
        );
        for inst in self.instructions.iter().rev() {
            let mut inv = inst.clone();
            if let InstructionKind::Gate(gate) = inv.kind {
                inv.kind = InstructionKind::Gate(gate.inverse());
            }
            inverted.instructions.push(inv);
        }
        Ok(inverted)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Iterate over the instructions in order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }

    /// Number of gate instructions (barriers and measures excluded).
    pub fn gate_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Total instruction count.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
