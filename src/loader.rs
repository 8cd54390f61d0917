//! Data Loader
//!
//! One GET per collection. Failures are logged and skipped so the previous
//! state stays on screen; the chart and graph get an explicit fallback value.

use crate::api::{self, Backend, StoryKind};
use crate::error::ApiError;
use crate::models::{
    Character, Diagram, Idea, ImageAsset, PrdDocument, StoryElement, Task, TaskMetrics,
};
use crate::store::GraphView;

/// Server collections the views are built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Ideas,
    Tasks,
    PrdDocs,
    Images,
    Diagrams,
    TaskMetrics,
    Characters,
    Locations,
    Dialogues,
    Quests,
    StoryArcs,
    RelationshipGraph,
}

impl Collection {
    /// Value applied when the GET fails; None keeps the stale data
    fn on_failure(&self, err: &ApiError) -> Option<Loaded> {
        match self {
            Collection::TaskMetrics => Some(Loaded::TaskMetrics(None)),
            Collection::RelationshipGraph => Some(Loaded::Graph(GraphView::Failed(err.to_string()))),
            _ => None,
        }
    }
}

/// A fetched collection, ready to replace its field in the state
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Ideas(Vec<Idea>),
    Tasks(Vec<Task>),
    PrdDocs(Vec<PrdDocument>),
    Images(Vec<ImageAsset>),
    Diagrams(Vec<Diagram>),
    /// None: no metrics, the chart shows sample data
    TaskMetrics(Option<TaskMetrics>),
    Characters(Vec<Character>),
    Story(StoryKind, Vec<StoryElement>),
    Graph(GraphView),
}

pub async fn load<B: Backend>(api: &B, collection: Collection) -> Result<Loaded, ApiError> {
    Ok(match collection {
        Collection::Ideas => Loaded::Ideas(api::list_ideas(api).await?),
        Collection::Tasks => Loaded::Tasks(api::list_tasks(api).await?),
        Collection::PrdDocs => Loaded::PrdDocs(api::list_prd_docs(api).await?),
        Collection::Images => Loaded::Images(api::list_images(api).await?),
        Collection::Diagrams => Loaded::Diagrams(api::list_diagrams(api).await?),
        Collection::TaskMetrics => Loaded::TaskMetrics(Some(api::task_metrics(api).await?)),
        Collection::Characters => Loaded::Characters(api::list_characters(api).await?),
        Collection::RelationshipGraph => Loaded::Graph(GraphView::Ready(api::relationship_graph(api).await?)),
        Collection::Locations => story(api, StoryKind::Location).await?,
        Collection::Dialogues => story(api, StoryKind::Dialogue).await?,
        Collection::Quests => story(api, StoryKind::Quest).await?,
        Collection::StoryArcs => story(api, StoryKind::StoryArc).await?,
    })
}

async fn story<B: Backend>(api: &B, kind: StoryKind) -> Result<Loaded, ApiError> {
    Ok(Loaded::Story(kind, api::list_story_elements(api, kind).await?))
}

/// Load collections in order; failures are logged, never retried
pub async fn load_all<B: Backend>(api: &B, collections: &[Collection]) -> Vec<Loaded> {
    let mut loaded = Vec::with_capacity(collections.len());
    for &collection in collections {
        match load(api, collection).await {
            Ok(value) => loaded.push(value),
            Err(err) => {
                tracing::error!(?collection, error = %err, "failed to load collection");
                loaded.extend(collection.on_failure(&err));
            }
        }
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn failed_collection_is_skipped() {
        let api = MockBackend::new();
        api.respond_get("/api/ideas", json!([{"id": "1", "title": "Potion"}]));
        // no route for /api/tasks

        let loaded = block_on(load_all(&api, &[Collection::Tasks, Collection::Ideas]));
        assert_eq!(loaded.len(), 1);
        assert!(matches!(&loaded[0], Loaded::Ideas(ideas) if ideas.len() == 1));
    }

    #[test]
    fn failed_metrics_and_graph_have_fallbacks() {
        let api = MockBackend::new();
        let loaded = block_on(load_all(&api, &[Collection::TaskMetrics, Collection::RelationshipGraph]));
        assert_eq!(loaded[0], Loaded::TaskMetrics(None));
        assert!(matches!(loaded[1], Loaded::Graph(GraphView::Failed(_))));
    }

    #[test]
    fn story_collections_map_to_kinds() {
        let api = MockBackend::new();
        api.respond_get("/alice/api/quests", json!([{"name": "Lost ring"}]));
        let loaded = block_on(load(&api, Collection::Quests)).unwrap();
        assert!(matches!(loaded, Loaded::Story(StoryKind::Quest, ref quests) if quests[0].name == "Lost ring"));
    }
}
