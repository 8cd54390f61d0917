//! Relationship Graph Component

use leptos::prelude::*;

use crate::graph::{layout, GraphLayout, GRAPH_SIZE};
use crate::store::{use_alice_store, AliceStateStoreFields, GraphView};

#[component]
fn GraphSvg(placed: GraphLayout) -> impl IntoView {
    let GraphLayout { nodes, edges, sample } = placed;

    view! {
        <Show when=move || sample>
            <span class="sample-badge">"Sample data"</span>
        </Show>
        <svg class="relationship-graph" viewBox=format!("0 0 {GRAPH_SIZE} {GRAPH_SIZE}")>
            <g class="edges">
                {edges
                    .into_iter()
                    .map(|edge| {
                        let mid = ((edge.from.0 + edge.to.0) / 2.0, (edge.from.1 + edge.to.1) / 2.0);
                        view! {
                            <line
                                x1=edge.from.0
                                y1=edge.from.1
                                x2=edge.to.0
                                y2=edge.to.1
                                stroke=edge.color
                                stroke-width=edge.width
                            />
                            <text class="edge-label" x=mid.0 y=mid.1 text-anchor="middle">{edge.label}</text>
                        }
                    })
                    .collect_view()}
            </g>
            <g class="nodes">
                {nodes
                    .into_iter()
                    .map(|node| {
                        view! {
                            <g class="node" data-node-id=node.id>
                                <circle cx=node.x cy=node.y r=node.r fill=node.fill stroke=node.stroke stroke-width="2" />
                                <text class="node-label" x=node.x y={node.y + node.r + 14.0} text-anchor="middle">
                                    {node.name}
                                </text>
                            </g>
                        }
                    })
                    .collect_view()}
            </g>
        </svg>
    }
}

#[component]
pub fn RelationshipGraphView() -> impl IntoView {
    let store = use_alice_store();

    view! {
        <div class="graph-card">
            <h3>"Character Relationships"</h3>
            {move || match store.graph().get() {
                GraphView::Loading => view! { <p class="loading">"Loading relationships..."</p> }.into_any(),
                GraphView::Failed(message) => {
                    view! {
                        <p class="graph-error">{format!("Could not load the relationship graph: {message}")}</p>
                    }
                        .into_any()
                }
                GraphView::Ready(graph) => view! { <GraphSvg placed=layout(&graph) /> }.into_any(),
            }}
        </div>
    }
}
