use selkie::{Edge, Graph, Layout, LayoutOptions, Node, Strategy};

fn node(id: &str) -> Node {
    Node {
        id: id.to_string(),
        width: 50.0,
        height: 40.0,
        layer: None,
        rank_hint: None,
    }
}

fn hinted_node(id: &str, rank_hint: i32) -> Node {
    Node {
        rank_hint: Some(rank_hint),
        ..node(id)
    }
}

fn edge(source: &str, target: &str) -> Edge {
    Edge {
        source: source.to_string(),
        target: target.to_string(),
    }
}

fn run(graph: &Graph, strategy: Strategy) -> Layout {
    selkie::layout(graph, strategy, &LayoutOptions::default()).unwrap()
}

fn x_of(layout: &Layout, id: &str) -> f64 {
    layout.nodes.iter().find(|n| n.id == id).unwrap().x
}

#[test]
fn barycenter_uncrosses_two_swapped_edges() {
    let graph = Graph {
        nodes: vec![node("a"), node("b"), node("c"), node("d")],
        edges: vec![edge("a", "d"), edge("b", "c")],
        ..Default::default()
    };
    let out = run(&graph, Strategy::Current);
    // a is left of b, so d must come out left of c.
    assert!(x_of(&out, "a") < x_of(&out, "b"));
    assert!(x_of(&out, "d") < x_of(&out, "c"));
}

#[test]
fn median_pass_uncrosses_two_swapped_edges() {
    let graph = Graph {
        nodes: vec![node("a"), node("b"), node("c"), node("d")],
        edges: vec![edge("a", "d"), edge("b", "c")],
        ..Default::default()
    };
    let out = run(&graph, Strategy::Legacy);
    assert!(x_of(&out, "d") < x_of(&out, "c"));
}

#[test]
fn nodes_without_neighbors_keep_input_order() {
    let graph = Graph {
        nodes: vec![node("first"), node("second"), node("third")],
        ..Default::default()
    };
    for strategy in [Strategy::Current, Strategy::Legacy] {
        let out = run(&graph, strategy);
        assert!(x_of(&out, "first") < x_of(&out, "second"));
        assert!(x_of(&out, "second") < x_of(&out, "third"));
    }
}

#[test]
fn rank_hints_seed_the_initial_order() {
    let graph = Graph {
        nodes: vec![hinted_node("x", 1), hinted_node("y", 0)],
        ..Default::default()
    };
    for strategy in [Strategy::Current, Strategy::Legacy] {
        let out = run(&graph, strategy);
        assert!(x_of(&out, "y") < x_of(&out, "x"));
    }
}

#[test]
fn a_parent_centers_over_its_children() {
    let graph = Graph {
        nodes: vec![node("p"), node("c1"), node("c2"), node("c3")],
        edges: vec![edge("p", "c1"), edge("p", "c2"), edge("p", "c3")],
        ..Default::default()
    };
    let out = run(&graph, Strategy::Current);
    assert!(x_of(&out, "c1") < x_of(&out, "c2"));
    assert!(x_of(&out, "c2") < x_of(&out, "c3"));
}

#[test]
fn both_strategies_order_every_rank_without_gaps() {
    let graph = Graph {
        nodes: vec![
            node("a"),
            node("b"),
            node("c"),
            node("d"),
            node("e"),
            node("f"),
        ],
        edges: vec![
            edge("a", "c"),
            edge("b", "c"),
            edge("b", "d"),
            edge("c", "e"),
            edge("d", "f"),
        ],
        ..Default::default()
    };
    for strategy in [Strategy::Current, Strategy::Legacy] {
        let out = run(&graph, strategy);
        let mut by_rank: std::collections::BTreeMap<i32, Vec<usize>> =
            std::collections::BTreeMap::new();
        for n in &out.nodes {
            by_rank.entry(n.rank).or_default().push(n.order);
        }
        for (rank, mut orders) in by_rank {
            orders.sort_unstable();
            let expected: Vec<usize> = (0..orders.len()).collect();
            assert_eq!(orders, expected, "orders at rank {rank} must be 0..n");
        }
    }
}
