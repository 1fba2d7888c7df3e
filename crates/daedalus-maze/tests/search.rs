//! End-to-end search tests against the statevector simulator.

use daedalus_adapter_sim::SimulatorBackend;
use daedalus_hal::Backend;
use daedalus_ir::{Circuit, ClbitId, QubitId};
use daedalus_maze::{
    Graph, OracleBuilder, Path, PathSizing, PrimGenerator, QuantumSolver, SearchCircuit,
    SearchOptions, bfs,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn line_graph() -> Graph {
    Graph::from_edges(&[(0, 1), (1, 2), (2, 3)], 0, 3).unwrap()
}

#[test]
fn oracle_returns_ancillas_to_zero() {
    let graph = line_graph();
    let sizing = PathSizing::new(&graph, None).unwrap();
    let builder = OracleBuilder::new(&graph, sizing, false);
    let layout = builder.layout();
    let oracle = builder.build().unwrap();

    // Superpose the path register, run the oracle, measure only the
    // ancillas. Uncomputation must leave them at zero for every basis
    // state in the superposition.
    let num_ancillas = layout.num_ancillas();
    let mut circuit = Circuit::with_size("ancilla_probe", oracle.num_qubits(), num_ancillas);
    for q in 0..sizing.num_path_qubits() {
        circuit.h(QubitId(q)).unwrap();
    }
    let all: Vec<QubitId> = (0..oracle.num_qubits()).map(QubitId).collect();
    circuit.append(&oracle, &all).unwrap();
    for (i, &ancilla) in layout.ancilla_qubits().iter().enumerate() {
        circuit.measure(ancilla, ClbitId(i as u32)).unwrap();
    }

    let backend = SimulatorBackend::with_seed(5);
    let executable = backend.compile(&circuit).unwrap();
    let memory = backend.run(&executable, 200).unwrap();
    assert!(memory.iter().all(|m| m.bytes().all(|b| b == b'0')));
}

#[test]
fn line_graph_search_finds_bfs_path() {
    let graph = line_graph();
    let search = SearchCircuit::build(&graph, SearchOptions::default()).unwrap();
    let solver = QuantumSolver::new(SimulatorBackend::with_seed(17));

    let found = solver.most_frequent_path(&search, 50).unwrap().unwrap();
    let expected = Path::new(bfs::shortest_path(&graph).unwrap());
    assert_eq!(found, expected);
}

#[test]
fn turn_back_check_still_finds_path() {
    let graph = line_graph();
    let options = SearchOptions {
        turn_back_check: true,
        ..Default::default()
    };
    let search = SearchCircuit::build(&graph, options).unwrap();
    let solver = QuantumSolver::new(SimulatorBackend::with_seed(23));

    let found = solver.most_frequent_path(&search, 50).unwrap().unwrap();
    assert_eq!(found.nodes(), &[0, 1, 2, 3]);
}

#[test]
fn generated_maze_search_matches_classical_solver() {
    let mut rng = StdRng::seed_from_u64(4);
    let maze = PrimGenerator.generate(2, 2, &mut rng).unwrap();
    let graph = maze.into_graph();

    let classical = Path::new(bfs::shortest_path(&graph).unwrap());

    let search = SearchCircuit::build(&graph, SearchOptions::default()).unwrap();
    let solver = QuantumSolver::new(SimulatorBackend::with_seed(31));
    let quantum = solver.most_frequent_path(&search, 50).unwrap().unwrap();

    assert_eq!(quantum, classical);
}

#[test]
fn shorter_bound_shrinks_the_register() {
    let graph = line_graph();
    let options = SearchOptions {
        max_path_length: Some(2),
        ..Default::default()
    };
    let search = SearchCircuit::build(&graph, options).unwrap();
    assert_eq!(search.sizing().num_path_qubits(), 6);
    assert_eq!(search.circuit().num_clbits(), 6);
}

#[test]
fn solve_decodes_every_shot() {
    let graph = line_graph();
    let search = SearchCircuit::build(&graph, SearchOptions::default()).unwrap();
    let solver = QuantumSolver::new(SimulatorBackend::with_seed(2));

    let paths = solver.solve(&search, 20).unwrap();
    assert_eq!(paths.len(), 20);
    assert!(paths.iter().all(|p| p.as_ref().is_ok_and(|p| p.len() == 4)));
}
