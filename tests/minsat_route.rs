//! End-to-end checks of the MinSAT pipeline: greedy elimination, the
//! clique-partition re-encoding, and decoding back to vertices

use orbitsat::graph::Graph;
use orbitsat::solver::Solver;

#[test]
fn known_independence_numbers() {
    let solver = Solver::default();
    for (graph, expected) in [
        (Graph::cycle(4), 2),
        (Graph::cycle(5), 2),
        (Graph::cycle(6), 3),
        (Graph::complete(4), 1),
        (Graph::petersen(), 4),
    ] {
        let solution = solver.solve_via_minsat(&graph).unwrap();
        assert_eq!(solution.size(), expected);
        assert!(graph.is_independent_set(solution.vertices()));
    }
}

#[test]
fn star_graph_selects_all_leaves() {
    let mut graph: Graph<usize> = Graph::new();
    for leaf in 1..=5 {
        graph.add_edge(0, leaf);
    }
    let solver = Solver::default();
    let solution = solver.solve_via_minsat(&graph).unwrap();
    assert_eq!(solution.vertices(), &(1..=5).collect());
}

#[test]
fn isolated_vertices_are_always_chosen() {
    let mut graph: Graph<usize> = Graph::new();
    graph.add_edge(0, 1);
    graph.add_vertex(7);
    graph.add_vertex(9);
    let solver = Solver::default();
    let solution = solver.solve_via_minsat(&graph).unwrap();
    assert_eq!(solution.size(), 3);
    assert!(solution.vertices().contains(&7));
    assert!(solution.vertices().contains(&9));
}

#[test]
fn edgeless_graph_takes_everything() {
    let mut graph: Graph<usize> = Graph::new();
    for v in 0..6 {
        graph.add_vertex(v);
    }
    let solver = Solver::default();
    let solution = solver.solve_via_minsat(&graph).unwrap();
    assert_eq!(solution.size(), 6);
}

#[test]
fn empty_graph_is_trivial() {
    let graph: Graph<usize> = Graph::new();
    let solver = Solver::default();
    let solution = solver.solve_via_minsat(&graph).unwrap();
    assert_eq!(solution.size(), 0);
}

#[test]
fn agrees_with_the_plain_encoding() {
    let solver = Solver::default();
    for graph in [
        Graph::cycle(7),
        Graph::cycle(9),
        Graph::complete(6),
        Graph::petersen(),
    ] {
        let plain = solver.solve_plain(&graph).unwrap();
        let via_minsat = solver.solve_via_minsat(&graph).unwrap();
        assert_eq!(plain.size(), via_minsat.size());
    }
}
