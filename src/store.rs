//! Application State Stores
//!
//! One store per tool, using Leptos reactive_stores for field-level
//! reactivity. Fetched collections replace their field wholesale.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::StoryKind;
use crate::filters::{CharacterFilter, DocFilter, IdeaFilter, StoryFilter, TaskFilter};
use crate::loader::Loaded;
use crate::models::{
    Character, Diagram, Idea, ImageAsset, PrdDocument, RelationshipGraph, StoryElement, Task,
    TaskMetrics, TaskStatus,
};
use crate::nav::{AliceSection, FreyaSection};

/// Relationship graph as the dashboard shows it
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GraphView {
    #[default]
    Loading,
    Ready(RelationshipGraph),
    Failed(String),
}

/// Open document in the docs section
#[derive(Debug, Clone, PartialEq)]
pub struct DocView {
    pub doc: PrdDocument,
    /// Rendered HTML, None while loading
    pub html: Option<String>,
}

/// Freya state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct FreyaState {
    pub section: FreyaSection,
    pub ideas: Vec<Idea>,
    pub tasks: Vec<Task>,
    pub prd_docs: Vec<PrdDocument>,
    pub images: Vec<ImageAsset>,
    pub diagrams: Vec<Diagram>,
    /// None until loaded, or after a failed load
    pub metrics: Option<TaskMetrics>,
    /// Alice character count for the stat card
    pub story_count: usize,
    pub idea_filter: IdeaFilter,
    pub task_filter: TaskFilter,
    pub doc_filter: DocFilter,
    pub open_doc: Option<DocView>,
}

/// Alice state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AliceState {
    pub section: AliceSection,
    pub characters: Vec<Character>,
    pub locations: Vec<StoryElement>,
    pub dialogues: Vec<StoryElement>,
    pub quests: Vec<StoryElement>,
    pub story_arcs: Vec<StoryElement>,
    pub graph: GraphView,
    pub character_filter: CharacterFilter,
    pub story_filter: StoryFilter,
}

impl AliceState {
    pub fn elements(&self, kind: StoryKind) -> &[StoryElement] {
        match kind {
            StoryKind::Location => &self.locations,
            StoryKind::Dialogue => &self.dialogues,
            StoryKind::Quest => &self.quests,
            StoryKind::StoryArc => &self.story_arcs,
            StoryKind::Character => &[],
        }
    }
}

/// Type alias for the Freya store
pub type FreyaStore = Store<FreyaState>;
/// Type alias for the Alice store
pub type AliceStore = Store<AliceState>;

/// Get the Freya store from context
pub fn use_freya_store() -> FreyaStore {
    expect_context::<FreyaStore>()
}

/// Get the Alice store from context
pub fn use_alice_store() -> AliceStore {
    expect_context::<AliceStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Write a loaded collection into its store field
pub fn store_apply_freya(store: &FreyaStore, loaded: Loaded) {
    match loaded {
        Loaded::Ideas(v) => *store.ideas().write() = v,
        Loaded::Tasks(v) => *store.tasks().write() = v,
        Loaded::PrdDocs(v) => *store.prd_docs().write() = v,
        Loaded::Images(v) => *store.images().write() = v,
        Loaded::Diagrams(v) => *store.diagrams().write() = v,
        Loaded::TaskMetrics(v) => *store.metrics().write() = v,
        Loaded::Characters(v) => *store.story_count().write() = v.len(),
        Loaded::Story(..) | Loaded::Graph(_) => {}
    }
}

pub fn store_apply_alice(store: &AliceStore, loaded: Loaded) {
    match loaded {
        Loaded::Characters(v) => *store.characters().write() = v,
        Loaded::Story(StoryKind::Location, v) => *store.locations().write() = v,
        Loaded::Story(StoryKind::Dialogue, v) => *store.dialogues().write() = v,
        Loaded::Story(StoryKind::Quest, v) => *store.quests().write() = v,
        Loaded::Story(StoryKind::StoryArc, v) => *store.story_arcs().write() = v,
        Loaded::Graph(v) => *store.graph().write() = v,
        _ => {}
    }
}

fn set_status(tasks: &mut [Task], task_id: &str, status: TaskStatus) -> bool {
    match tasks.iter_mut().find(|task| task.id.as_deref() == Some(task_id)) {
        Some(task) => {
            task.status = status.as_str().to_string();
            true
        }
        None => false,
    }
}

/// Move a task to another column before the server confirms
pub fn store_set_task_status(store: &FreyaStore, task_id: &str, status: TaskStatus) {
    set_status(&mut store.tasks().write(), task_id, status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskMetrics;

    fn task(id: &str, status: &str) -> Task {
        Task { id: Some(id.into()), status: status.into(), ..Default::default() }
    }

    #[test]
    fn apply_replaces_whole_collection() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(FreyaState {
            ideas: vec![Idea { title: "old".into(), ..Default::default() }],
            ..Default::default()
        });
        store_apply_freya(
            &store,
            Loaded::Ideas(vec![
                Idea { title: "a".into(), ..Default::default() },
                Idea { title: "b".into(), ..Default::default() },
            ]),
        );
        let ideas = store.ideas().get_untracked();
        assert_eq!(ideas.len(), 2);
        assert_eq!(ideas[0].title, "a");
    }

    #[test]
    fn failed_metrics_clear_previous() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(FreyaState { metrics: Some(TaskMetrics::default()), ..Default::default() });
        store_apply_freya(&store, Loaded::TaskMetrics(None));
        assert!(store.metrics().get_untracked().is_none());
    }

    #[test]
    fn characters_only_feed_freya_count() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(FreyaState::default());
        store_apply_freya(&store, Loaded::Characters(vec![Character::default(), Character::default()]));
        assert_eq!(store.story_count().get_untracked(), 2);
    }

    #[test]
    fn optimistic_status_change() {
        let mut tasks = vec![task("t1", "Backlog"), task("t2", "Review")];
        assert!(set_status(&mut tasks, "t1", TaskStatus::Done));
        assert_eq!(tasks[0].status, "Done");
        assert_eq!(tasks[1].status, "Review");
        assert!(!set_status(&mut tasks, "missing", TaskStatus::Done));
    }

    #[test]
    fn alice_routes_story_kinds() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(AliceState::default());
        store_apply_alice(
            &store,
            Loaded::Story(StoryKind::Quest, vec![StoryElement { name: "Lost ring".into(), ..Default::default() }]),
        );
        store_apply_alice(&store, Loaded::Graph(GraphView::Failed("offline".into())));

        let state = store.get_untracked();
        assert_eq!(state.elements(StoryKind::Quest).len(), 1);
        assert!(state.locations.is_empty());
        assert_eq!(state.graph, GraphView::Failed("offline".into()));
    }
}
