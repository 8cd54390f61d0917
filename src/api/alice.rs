//! Alice Endpoints
//!
//! Story elements and the character relationship graph.

use serde::Deserialize;
use serde_json::Value;

use super::{post, Backend, Endpoint};
use crate::error::ApiError;
use crate::models::{ApiResponse, Character, RelationshipGraph, StoryElement};

/// Story collections served under `/alice/api/{kind}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryKind {
    Character,
    Location,
    Quest,
    Dialogue,
    StoryArc,
}

impl StoryKind {
    pub const ALL: [StoryKind; 5] = [
        StoryKind::Character,
        StoryKind::Location,
        StoryKind::Quest,
        StoryKind::Dialogue,
        StoryKind::StoryArc,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            StoryKind::Character => "/api/characters",
            StoryKind::Location => "/api/locations",
            StoryKind::Quest => "/api/quests",
            StoryKind::Dialogue => "/api/dialogues",
            StoryKind::StoryArc => "/api/story-arcs",
        }
    }

    /// Singular, lower case ("story arc")
    pub fn noun(&self) -> &'static str {
        match self {
            StoryKind::Character => "character",
            StoryKind::Location => "location",
            StoryKind::Quest => "quest",
            StoryKind::Dialogue => "dialogue",
            StoryKind::StoryArc => "story arc",
        }
    }

    pub fn plural_title(&self) -> &'static str {
        match self {
            StoryKind::Character => "Characters",
            StoryKind::Location => "Locations",
            StoryKind::Quest => "Quests",
            StoryKind::Dialogue => "Dialogues",
            StoryKind::StoryArc => "Story Arcs",
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GraphEnvelope {
    success: bool,
    graph: Option<RelationshipGraph>,
    error: Option<String>,
}

pub async fn list_characters<B: Backend>(api: &B) -> Result<Vec<Character>, ApiError> {
    api.get(&Endpoint::alice(StoryKind::Character.path())).await
}

/// Locations, quests, dialogues and story arcs share one record shape
pub async fn list_story_elements<B: Backend>(api: &B, kind: StoryKind) -> Result<Vec<StoryElement>, ApiError> {
    api.get(&Endpoint::alice(kind.path())).await
}

pub async fn save_story_element<B: Backend>(
    api: &B,
    kind: StoryKind,
    payload: &Value,
) -> Result<ApiResponse, ApiError> {
    post(api, Endpoint::alice(kind.path()), payload).await
}

pub async fn relationship_graph<B: Backend>(api: &B) -> Result<RelationshipGraph, ApiError> {
    let envelope: GraphEnvelope = api
        .get(&Endpoint::alice("/api/characters/relationship-graph"))
        .await?;
    match envelope {
        GraphEnvelope { success: true, graph: Some(graph), .. } => Ok(graph),
        GraphEnvelope { error, .. } => Err(ApiError::Rejected(error.unwrap_or_default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn graph_requires_success_and_graph() {
        let api = MockBackend::new();
        api.respond_get(
            "/alice/api/characters/relationship-graph",
            json!({"success": true, "graph": {"nodes": [{"id": "c1", "name": "Joe"}], "edges": []}}),
        );
        let graph = block_on(relationship_graph(&api)).unwrap();
        assert_eq!(graph.nodes.len(), 1);

        api.respond_get(
            "/alice/api/characters/relationship-graph",
            json!({"success": false, "error": "Characters file not found"}),
        );
        assert!(block_on(relationship_graph(&api)).is_err());
    }

    #[test]
    fn story_elements_use_alice_prefix() {
        let api = MockBackend::new();
        api.respond_get("/alice/api/story-arcs", json!([{"title": "Harvest festival"}]));
        let arcs = block_on(list_story_elements(&api, StoryKind::StoryArc)).unwrap();
        assert_eq!(arcs[0].name, "Harvest festival");
    }
}
