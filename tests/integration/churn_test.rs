//! Integration test for sustained build/teardown churn on a larger graph.

use gamegraph::{AttrMap, Graph, NodeRef};

#[test]
fn test_layered_graph_build_and_teardown() {
    let mut graph = Graph::new();

    let num_layers = 50;
    let layer_width = 40;
    graph.reserve(num_layers * layer_width, num_layers * layer_width * 2);

    // Build a layered arena: every node points at two nodes of the next layer.
    let mut layers: Vec<Vec<NodeRef>> = Vec::with_capacity(num_layers);
    for layer in 0..num_layers {
        let nodes = graph.add_nodes_with(
            (0..layer_width)
                .map(|i| AttrMap::new().with("layer", layer as i64).with("slot", i as i64))
                .collect(),
        );
        layers.push(nodes);
    }
    for layer in 0..num_layers - 1 {
        for (i, node) in layers[layer].iter().enumerate() {
            graph.add_edge(node, &layers[layer + 1][i]).unwrap();
            graph
                .add_edge(node, &layers[layer + 1][(i + 1) % layer_width])
                .unwrap();
        }
    }

    let total_nodes = num_layers * layer_width;
    let total_edges = (num_layers - 1) * layer_width * 2;
    assert_eq!(graph.number_of_nodes(), total_nodes);
    assert_eq!(graph.number_of_edges(), total_edges);
    assert_eq!(graph.size(), (total_nodes + total_edges) as u64);

    // Every interior node has two distinct successors.
    for node in &layers[10] {
        assert_eq!(graph.successors(node).unwrap().len(), 2);
    }

    // Tear out every other layer; cascades must remove edges on both sides.
    for layer in (0..num_layers).step_by(2) {
        for node in &layers[layer] {
            assert!(graph.rem_node(node));
        }
    }
    assert_eq!(graph.number_of_nodes(), total_nodes / 2);
    assert_eq!(graph.number_of_edges(), 0);

    // Surviving nodes are intact and still queryable.
    for node in &layers[11] {
        assert!(graph.has_node(node));
        assert_eq!(node.get_attr("layer").unwrap().get_int().unwrap(), 11);
        assert!(graph.out_edges(node).unwrap().is_empty());
    }
}

#[test]
fn test_interleaved_churn_keeps_ids_fresh() {
    let mut graph = Graph::new();
    let rounds = 1_000;

    let anchor = graph.add_node();
    let mut highest_node_id = anchor.id();
    let mut highest_edge_id = 0;

    for round in 0..rounds {
        let node = graph.add_node_with(AttrMap::new().with("round", round as i64));
        let edge = graph.add_edge(&anchor, &node).unwrap();

        // Ids advance strictly, even while entities are being removed.
        assert!(node.id() > highest_node_id);
        highest_node_id = node.id();
        if round > 0 {
            assert!(edge.id() > highest_edge_id);
        }
        highest_edge_id = edge.id();

        if round % 3 == 0 {
            assert!(graph.rem_node(&node));
            assert!(!graph.has_edge(&edge));
        }
    }

    // Two thirds of the rounds survive, plus the anchor.
    let survivors = (0..rounds).filter(|r| r % 3 != 0).count();
    assert_eq!(graph.number_of_nodes(), survivors + 1);
    assert_eq!(graph.number_of_edges(), survivors);
    assert_eq!(graph.out_edges(&anchor).unwrap().len(), survivors);
}

#[test]
fn test_clear_resets_counters_across_generations() {
    let mut graph = Graph::new();
    graph.attrs_mut().insert("generation", 0i64);

    for generation in 0..5 {
        let nodes = graph.add_nodes_from(100);
        assert_eq!(nodes[0].id(), 0);
        assert_eq!(nodes[99].id(), 99);

        graph.add_edges_from((0..99).map(|i| (i, i + 1))).unwrap();
        assert_eq!(graph.number_of_edges(), 99);

        graph.clear();
        graph.attrs_mut().insert("generation", generation + 1i64);
        assert_eq!(graph.size(), 0);
    }

    assert_eq!(graph.attrs().get_int("generation"), Some(5));
    // Handles from earlier generations never resolve again.
    assert!(graph.get_node(50u64).is_err());
}
