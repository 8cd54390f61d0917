//! Relationship Graph Layout
//!
//! Places characters on a circle and colours nodes by group and edges by
//! relationship type. An empty server graph is replaced by a small sample
//! cast so the dashboard never shows a blank panel.

use std::f64::consts::TAU;

use crate::models::{GraphEdge, GraphNode, RelationshipGraph};
use crate::views::string_to_color;

pub const GRAPH_SIZE: f64 = 420.0;
const RING_RADIUS: f64 = 160.0;
const BASE_NODE_RADIUS: f64 = 18.0;

/// (background, border) per known group
const GROUP_COLORS: &[(&str, &str, &str)] = &[
    ("Townspeople", "#c4b5fd", "#8b5cf6"),
    ("Farmers", "#a7f3d0", "#10b981"),
    ("Merchants", "#93c5fd", "#3b82f6"),
    ("Visitors", "#fcd34d", "#f59e0b"),
];

const EDGE_COLORS: &[(&str, &str)] = &[
    ("friend", "#4ade80"),
    ("business", "#3b82f6"),
    ("romantic", "#f472b6"),
    ("rival", "#ef4444"),
    ("family", "#f59e0b"),
];

const DEFAULT_EDGE_COLOR: &str = "#9ca3af";

pub fn group_colors(group: &str) -> (String, String) {
    match GROUP_COLORS.iter().find(|(name, _, _)| name.eq_ignore_ascii_case(group)) {
        Some((_, fill, border)) => (fill.to_string(), border.to_string()),
        None => {
            let color = string_to_color(group);
            (color.clone(), color)
        }
    }
}

pub fn edge_color(kind: &str) -> &'static str {
    EDGE_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(kind))
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_EDGE_COLOR)
}

pub fn sample_graph() -> RelationshipGraph {
    let node = |id: &str, name: &str, group: &str| GraphNode {
        id: id.into(),
        name: name.into(),
        group: group.into(),
        importance: 1.0,
    };
    let edge = |source: &str, target: &str, kind: &str| GraphEdge {
        source: source.into(),
        target: target.into(),
        kind: kind.into(),
        strength: 1.0,
    };
    RelationshipGraph {
        nodes: vec![
            node("1", "Mayor Thompson", "Townspeople"),
            node("2", "Farmer Joe", "Farmers"),
            node("3", "Merchant Sarah", "Merchants"),
            node("4", "Visitor Emma", "Visitors"),
            node("5", "Blacksmith Mike", "Townspeople"),
        ],
        edges: vec![
            edge("1", "2", "Friend"),
            edge("1", "3", "Business"),
            edge("2", "4", "Romantic"),
            edge("3", "5", "Rival"),
            edge("4", "5", "Family"),
        ],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub fill: String,
    pub stroke: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEdge {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub label: String,
    pub color: &'static str,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphLayout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<PlacedEdge>,
    pub sample: bool,
}

/// Lay out the graph; edges to unknown nodes are dropped
pub fn layout(graph: &RelationshipGraph) -> GraphLayout {
    let (graph, sample) = if graph.nodes.is_empty() {
        (sample_graph(), true)
    } else {
        (graph.clone(), false)
    };

    let center = GRAPH_SIZE / 2.0;
    let count = graph.nodes.len();
    let nodes: Vec<PlacedNode> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            // A lone node sits in the middle
            let (x, y) = if count == 1 {
                (center, center)
            } else {
                let angle = TAU * i as f64 / count as f64 - TAU / 4.0;
                (center + RING_RADIUS * angle.cos(), center + RING_RADIUS * angle.sin())
            };
            let (fill, stroke) = group_colors(&node.group);
            PlacedNode {
                id: node.id.clone(),
                name: node.name.clone(),
                x,
                y,
                r: BASE_NODE_RADIUS + 2.0 * node.importance.clamp(0.0, 5.0),
                fill,
                stroke,
            }
        })
        .collect();

    let position = |id: &str| nodes.iter().find(|n| n.id == id).map(|n| (n.x, n.y));
    let edges = graph
        .edges
        .iter()
        .filter_map(|edge| {
            Some(PlacedEdge {
                from: position(&edge.source)?,
                to: position(&edge.target)?,
                label: edge.kind.clone(),
                color: edge_color(&edge.kind),
                width: 1.0 + edge.strength.clamp(0.0, 5.0),
            })
        })
        .collect();

    GraphLayout { nodes, edges, sample }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_uses_labelled_sample() {
        let placed = layout(&RelationshipGraph::default());
        assert!(placed.sample);
        assert_eq!(placed.nodes.len(), 5);
        assert_eq!(placed.edges.len(), 5);
    }

    #[test]
    fn nodes_sit_on_the_ring() {
        let graph = RelationshipGraph {
            nodes: (0..4)
                .map(|i| GraphNode { id: i.to_string(), name: format!("n{i}"), ..Default::default() })
                .collect(),
            edges: vec![],
        };
        let placed = layout(&graph);
        assert!(!placed.sample);
        let center = GRAPH_SIZE / 2.0;
        for node in &placed.nodes {
            let dist = ((node.x - center).powi(2) + (node.y - center).powi(2)).sqrt();
            assert!((dist - RING_RADIUS).abs() < 1e-6);
        }
    }

    #[test]
    fn dangling_edges_are_dropped() {
        let graph = RelationshipGraph {
            nodes: vec![GraphNode { id: "a".into(), ..Default::default() }],
            edges: vec![GraphEdge { source: "a".into(), target: "ghost".into(), ..Default::default() }],
        };
        assert!(layout(&graph).edges.is_empty());
    }

    #[test]
    fn colours_by_type_and_group() {
        assert_eq!(edge_color("Rival"), "#ef4444");
        assert_eq!(edge_color("nemesis"), DEFAULT_EDGE_COLOR);
        assert_eq!(group_colors("Farmers").1, "#10b981");
        assert_eq!(group_colors("Pirates").0, string_to_color("Pirates"));
    }
}
