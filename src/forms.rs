//! Modal Forms
//!
//! Form state for the create/edit modals. A form opened on an entity keeps
//! the entity's full JSON and overlays the edited fields on submit, so
//! fields the form does not show are sent back unchanged.

use serde_json::{json, Map, Value};

use crate::api::{self, Backend, StoryKind};
use crate::error::ApiError;
use crate::loader::{load_all, Collection, Loaded};
use crate::models::{split_tags, Character, Diagram, Idea, IdeaScore, StoryElement, Task, TaskStatus};

pub const IDEA_CATEGORIES: &[&str] = &["Gameplay", "Feature", "UI/UX", "Story", "World", "Art", "Audio"];
pub const IDEA_STATUSES: &[&str] = &["Backlog", "Evaluating", "Approved", "In Development", "Implemented", "Rejected"];
pub const TASK_TYPES: &[&str] = &["Feature", "Bug", "Improvement", "Research", "Content"];
pub const TASK_PRIORITIES: &[&str] = &["Low", "Medium", "High"];
pub const DIAGRAM_TYPES: &[(&str, &str)] = &[
    ("flowchart", "Flowchart"),
    ("sequence", "Sequence"),
    ("class", "Class Diagram"),
    ("state", "State Diagram"),
    ("gantt", "Gantt Chart"),
];

/// Where a form is saved and what it invalidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    Idea,
    Task,
    Diagram,
    Story(StoryKind),
}

impl SaveTarget {
    /// Lower-case entity name used in messages
    pub fn noun(&self) -> &'static str {
        match self {
            SaveTarget::Idea => "idea",
            SaveTarget::Task => "task",
            SaveTarget::Diagram => "diagram",
            SaveTarget::Story(kind) => kind.noun(),
        }
    }

    /// Collections to reload after a successful save
    pub fn reloads(&self) -> &'static [Collection] {
        match self {
            SaveTarget::Idea => &[Collection::Ideas],
            SaveTarget::Task => &[Collection::Tasks, Collection::TaskMetrics],
            SaveTarget::Diagram => &[Collection::Diagrams],
            SaveTarget::Story(StoryKind::Character) => &[Collection::Characters, Collection::RelationshipGraph],
            SaveTarget::Story(StoryKind::Location) => &[Collection::Locations],
            SaveTarget::Story(StoryKind::Dialogue) => &[Collection::Dialogues],
            SaveTarget::Story(StoryKind::Quest) => &[Collection::Quests],
            SaveTarget::Story(StoryKind::StoryArc) => &[Collection::StoryArcs],
        }
    }

    async fn save<B: Backend>(&self, api: &B, payload: &Value) -> Result<(), ApiError> {
        match self {
            SaveTarget::Idea => api::save_idea(api, payload).await?,
            SaveTarget::Task => api::save_task(api, payload).await?,
            SaveTarget::Diagram => api::create_diagram(api, payload).await?,
            SaveTarget::Story(kind) => api::save_story_element(api, *kind, payload).await?,
        };
        Ok(())
    }
}

/// Behaviour shared by every modal form
pub trait EntityForm {
    fn target(&self) -> SaveTarget;
    fn is_edit(&self) -> bool;
    /// Required fields, checked before anything is sent
    fn validate(&self) -> Result<(), String>;
    fn payload(&self) -> Value;

    fn heading(&self) -> String {
        let noun = self.target().noun();
        let mut words = noun.split(' ').map(capitalize).collect::<Vec<_>>().join(" ");
        words.insert_str(0, if self.is_edit() { "Edit " } else { "New " });
        words
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn entity_base<T: serde::Serialize>(entity: &T) -> Map<String, Value> {
    match serde_json::to_value(entity) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn overlay(mut base: Map<String, Value>, fields: Value) -> Value {
    if let Value::Object(fields) = fields {
        base.extend(fields);
    }
    Value::Object(base)
}

fn required(value: &str, message: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

// ========================
// Ideas
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct IdeaForm {
    base: Map<String, Value>,
    pub editing: bool,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub category: String,
    /// Comma separated, as typed
    pub tags: String,
    pub status: String,
    pub notes: String,
    pub score: IdeaScore,
}

impl IdeaForm {
    /// Sliders start in the middle of their range
    pub const DEFAULT_SCORE: u8 = 3;

    pub fn blank() -> Self {
        let mid = Self::DEFAULT_SCORE;
        Self {
            base: Map::new(),
            editing: false,
            title: String::new(),
            summary: String::new(),
            description: String::new(),
            category: String::new(),
            tags: String::new(),
            status: IDEA_STATUSES[0].to_string(),
            notes: String::new(),
            score: IdeaScore { impact: mid, feasibility: mid, originality: mid, player_value: mid, alignment: mid },
        }
    }

    pub fn from_entity(idea: &Idea) -> Self {
        Self {
            base: entity_base(idea),
            editing: true,
            title: idea.title.clone(),
            summary: idea.summary.clone(),
            description: idea.description.clone(),
            category: idea.category.clone(),
            tags: idea.tags.join(", "),
            status: idea.status.clone(),
            notes: idea.notes.clone(),
            score: idea.score.clamped(),
        }
    }

    pub fn open(idea: Option<&Idea>) -> Self {
        idea.map(Self::from_entity).unwrap_or_else(Self::blank)
    }
}

impl EntityForm for IdeaForm {
    fn target(&self) -> SaveTarget {
        SaveTarget::Idea
    }

    fn is_edit(&self) -> bool {
        self.editing
    }

    fn validate(&self) -> Result<(), String> {
        required(&self.title, "Title is required.")
    }

    fn payload(&self) -> Value {
        overlay(
            self.base.clone(),
            json!({
                "title": self.title.trim(),
                "summary": self.summary,
                "description": self.description,
                "category": self.category,
                "tags": split_tags(&self.tags),
                "status": self.status,
                "notes": self.notes,
                "score": self.score.clamped(),
            }),
        )
    }
}

// ========================
// Tasks
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    base: Map<String, Value>,
    pub editing: bool,
    pub title: String,
    pub task_type: String,
    pub estimated_time: String,
    pub milestone: String,
    pub priority: String,
    pub status: String,
    pub description: String,
    pub objective: String,
    pub acceptance_criteria: String,
    pub implementation_notes: String,
    pub dependencies: String,
    pub testing_plan: String,
    pub next_steps: String,
}

impl TaskForm {
    pub fn blank() -> Self {
        Self {
            base: Map::new(),
            editing: false,
            title: String::new(),
            task_type: TASK_TYPES[0].to_string(),
            estimated_time: String::new(),
            milestone: String::new(),
            priority: "Medium".to_string(),
            status: String::new(),
            description: String::new(),
            objective: String::new(),
            acceptance_criteria: String::new(),
            implementation_notes: String::new(),
            dependencies: String::new(),
            testing_plan: String::new(),
            next_steps: String::new(),
        }
    }

    pub fn from_entity(task: &Task) -> Self {
        Self {
            base: entity_base(task),
            editing: true,
            title: task.title.clone(),
            task_type: task.task_type.clone(),
            estimated_time: task.estimated_time.clone(),
            milestone: task.milestone.clone(),
            priority: task.priority.clone(),
            status: task.status.clone(),
            description: task.description.clone(),
            objective: task.objective.clone(),
            acceptance_criteria: task.acceptance_criteria.clone(),
            implementation_notes: task.implementation_notes.clone(),
            dependencies: task.dependencies.clone(),
            testing_plan: task.testing_plan.clone(),
            next_steps: task.next_steps.clone(),
        }
    }

    pub fn open(task: Option<&Task>) -> Self {
        task.map(Self::from_entity).unwrap_or_else(Self::blank)
    }

    /// Status sent to the server; tasks without one start in the backlog
    pub fn effective_status(&self) -> &str {
        if self.status.trim().is_empty() {
            TaskStatus::Backlog.as_str()
        } else {
            &self.status
        }
    }
}

impl EntityForm for TaskForm {
    fn target(&self) -> SaveTarget {
        SaveTarget::Task
    }

    fn is_edit(&self) -> bool {
        self.editing
    }

    fn validate(&self) -> Result<(), String> {
        required(&self.title, "Title is required.")
    }

    fn payload(&self) -> Value {
        overlay(
            self.base.clone(),
            json!({
                "title": self.title.trim(),
                "type": self.task_type,
                "estimated_time": self.estimated_time,
                "milestone": self.milestone,
                "priority": self.priority,
                "status": self.effective_status(),
                "description": self.description,
                "objective": self.objective,
                "acceptance_criteria": self.acceptance_criteria,
                "implementation_notes": self.implementation_notes,
                "dependencies": self.dependencies,
                "testing_plan": self.testing_plan,
                "next_steps": self.next_steps,
            }),
        )
    }
}

// ========================
// Diagrams
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramForm {
    base: Map<String, Value>,
    pub editing: bool,
    pub name: String,
    pub diagram_type: String,
    /// Mermaid source
    pub code: String,
    pub tags: String,
}

impl DiagramForm {
    pub fn blank() -> Self {
        Self {
            base: Map::new(),
            editing: false,
            name: String::new(),
            diagram_type: DIAGRAM_TYPES[0].0.to_string(),
            code: String::new(),
            tags: String::new(),
        }
    }

    pub fn from_entity(diagram: &Diagram) -> Self {
        Self {
            base: entity_base(diagram),
            editing: true,
            name: diagram.name.clone(),
            diagram_type: diagram.diagram_type.clone(),
            code: diagram.code.clone(),
            tags: diagram.tags.join(", "),
        }
    }
}

impl EntityForm for DiagramForm {
    fn target(&self) -> SaveTarget {
        SaveTarget::Diagram
    }

    fn is_edit(&self) -> bool {
        self.editing
    }

    fn validate(&self) -> Result<(), String> {
        required(&self.name, "Diagram name is required.")?;
        required(&self.code, "Mermaid code is required.")
    }

    fn payload(&self) -> Value {
        overlay(
            self.base.clone(),
            json!({
                "name": self.name.trim(),
                "type": self.diagram_type,
                "code": self.code,
                "tags": split_tags(&self.tags),
            }),
        )
    }
}

// ========================
// Story elements
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct StoryForm {
    base: Map<String, Value>,
    pub kind: StoryKind,
    pub editing: bool,
    pub name: String,
    pub description: String,
    /// Faction for characters, region for locations
    pub detail: String,
}

impl StoryForm {
    /// Key of the kind-specific field, if the kind has one
    pub fn detail_key(kind: StoryKind) -> Option<&'static str> {
        match kind {
            StoryKind::Character => Some("faction"),
            StoryKind::Location => Some("region"),
            _ => None,
        }
    }

    pub fn blank(kind: StoryKind) -> Self {
        Self {
            base: Map::new(),
            kind,
            editing: false,
            name: String::new(),
            description: String::new(),
            detail: String::new(),
        }
    }

    pub fn from_character(character: &Character) -> Self {
        Self {
            base: entity_base(character),
            kind: StoryKind::Character,
            editing: true,
            name: character.name.clone(),
            description: character.description.clone(),
            detail: character.faction.clone(),
        }
    }

    pub fn from_element(kind: StoryKind, element: &StoryElement) -> Self {
        let detail = Self::detail_key(kind)
            .and_then(|key| element.field(key))
            .unwrap_or_default()
            .to_string();
        Self {
            base: entity_base(element),
            kind,
            editing: true,
            name: element.name.clone(),
            description: element.description.clone(),
            detail,
        }
    }
}

impl EntityForm for StoryForm {
    fn target(&self) -> SaveTarget {
        SaveTarget::Story(self.kind)
    }

    fn is_edit(&self) -> bool {
        self.editing
    }

    fn validate(&self) -> Result<(), String> {
        required(&self.name, "Name is required.")
    }

    fn payload(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("name".into(), json!(self.name.trim()));
        fields.insert("description".into(), json!(self.description));
        if let Some(key) = Self::detail_key(self.kind) {
            fields.insert(key.into(), json!(self.detail));
        }
        overlay(self.base.clone(), Value::Object(fields))
    }
}

// ========================
// Submission
// ========================

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Saved; the modal closes and shows this notice
    Saved(String),
    /// Required field missing; nothing was sent
    Invalid(String),
    /// Alert text for a failed save
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submitted {
    pub outcome: SubmitOutcome,
    /// Fresh collections to apply, empty unless saved
    pub reloaded: Vec<Loaded>,
}

/// Alert text for a failed save
pub fn failure_message(noun: &str, err: &ApiError) -> String {
    err.alert_text(&format!("saving {noun}"))
}

/// Validate, POST, and on success reload what the save invalidated
pub async fn submit<B: Backend, F: EntityForm>(api: &B, form: &F) -> Submitted {
    let target = form.target();
    if let Err(message) = form.validate() {
        return Submitted { outcome: SubmitOutcome::Invalid(message), reloaded: Vec::new() };
    }

    match target.save(api, &form.payload()).await {
        Ok(()) => {
            tracing::info!(entity = target.noun(), edit = form.is_edit(), "saved");
            let verb = if form.is_edit() { "updated" } else { "created" };
            Submitted {
                outcome: SubmitOutcome::Saved(format!("{} {verb} successfully", capitalize(target.noun()))),
                reloaded: load_all(api, target.reloads()).await,
            }
        }
        Err(err) => {
            tracing::error!(entity = target.noun(), error = %err, "save failed");
            Submitted { outcome: SubmitOutcome::Failed(failure_message(target.noun(), &err)), reloaded: Vec::new() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::api::Method;
    use futures::executor::block_on;

    #[test]
    fn new_task_without_status_persists_backlog() {
        let api = MockBackend::new();
        api.respond_send(Method::Post, "/api/tasks", json!({"success": true, "id": "t9"}));
        api.respond_get("/api/tasks", json!([]));
        api.respond_get("/api/metrics/tasks", json!({"success": true, "data": {}}));

        let form = TaskForm { title: "Crafting UI".into(), ..TaskForm::blank() };
        let submitted = block_on(submit(&api, &form));

        assert!(matches!(submitted.outcome, SubmitOutcome::Saved(_)));
        let calls = api.calls();
        assert_eq!(calls[0].payload.as_ref().unwrap()["status"], json!("Backlog"));
    }

    #[test]
    fn success_reloads_origin_collection() {
        let api = MockBackend::new();
        api.respond_send(Method::Post, "/api/ideas", json!({"success": true}));
        api.respond_get("/api/ideas", json!([{"id": "1", "title": "Potion crafting"}]));

        let form = IdeaForm { title: "Potion crafting".into(), tags: "alchemy, crafting".into(), ..IdeaForm::blank() };
        let submitted = block_on(submit(&api, &form));

        assert_eq!(submitted.outcome, SubmitOutcome::Saved("Idea created successfully".into()));
        assert_eq!(api.get_count("/api/ideas"), 1);
        assert!(matches!(&submitted.reloaded[..], [Loaded::Ideas(ideas)] if ideas[0].title == "Potion crafting"));
        assert_eq!(api.calls()[0].payload.as_ref().unwrap()["tags"], json!(["alchemy", "crafting"]));
    }

    #[test]
    fn rejected_save_keeps_modal_open() {
        let api = MockBackend::new();
        api.respond_send(Method::Post, "/api/ideas", json!({"success": false, "error": "disk full"}));

        let form = IdeaForm { title: "x".into(), ..IdeaForm::blank() };
        let submitted = block_on(submit(&api, &form));

        assert_eq!(submitted.outcome, SubmitOutcome::Failed("Error saving idea: disk full".into()));
        assert!(!matches!(submitted.outcome, SubmitOutcome::Saved(_)));
        assert!(submitted.reloaded.is_empty());
        assert_eq!(api.get_count("/api/ideas"), 0);
    }

    #[test]
    fn network_failure_uses_generic_alert() {
        let api = MockBackend::new();
        let form = IdeaForm { title: "x".into(), ..IdeaForm::blank() };
        let submitted = block_on(submit(&api, &form));
        assert_eq!(submitted.outcome, SubmitOutcome::Failed("Error saving idea. Please try again.".into()));
    }

    #[test]
    fn missing_title_sends_nothing() {
        let api = MockBackend::new();
        let submitted = block_on(submit(&api, &TaskForm::blank()));
        assert!(matches!(submitted.outcome, SubmitOutcome::Invalid(_)));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn edit_payload_keeps_unknown_fields_and_id() {
        let idea: Idea = serde_json::from_value(json!({
            "id": "a1",
            "title": "Old",
            "tags": ["x"],
            "created": "2024-01-01 00:00:00"
        }))
        .unwrap();
        let mut form = IdeaForm::open(Some(&idea));
        assert!(form.is_edit());
        assert_eq!(form.heading(), "Edit Idea");
        form.title = "New".into();

        let payload = form.payload();
        assert_eq!(payload["id"], json!("a1"));
        assert_eq!(payload["title"], json!("New"));
        assert_eq!(payload["created"], json!("2024-01-01 00:00:00"));
    }

    #[test]
    fn edited_task_keeps_its_status() {
        let task = Task { id: Some("t1".into()), title: "t".into(), status: "Review".into(), ..Default::default() };
        assert_eq!(TaskForm::from_entity(&task).payload()["status"], json!("Review"));
    }

    #[test]
    fn story_form_detail_field_per_kind() {
        let form = StoryForm { name: "Old mill".into(), detail: "Valley".into(), ..StoryForm::blank(StoryKind::Location) };
        let payload = form.payload();
        assert_eq!(payload["region"], json!("Valley"));
        assert_eq!(form.heading(), "New Location");

        let arc = StoryForm { name: "Harvest".into(), detail: "ignored".into(), ..StoryForm::blank(StoryKind::StoryArc) };
        assert!(arc.payload().get("region").is_none());
        assert_eq!(arc.heading(), "New Story Arc");
    }

    #[test]
    fn quick_create_forms_open_blank() {
        let idea = IdeaForm::blank();
        let task = TaskForm::blank();
        let diagram = DiagramForm::blank();

        assert!(!idea.is_edit() && !task.is_edit() && !diagram.is_edit());
        assert_eq!(idea.heading(), "New Idea");
        assert_eq!(task.heading(), "New Task");
        assert_eq!(diagram.heading(), "New Diagram");
        assert_eq!(StoryForm::blank(StoryKind::StoryArc).heading(), "New Story Arc");
        assert_eq!(idea.score.total(), 5 * u32::from(IdeaForm::DEFAULT_SCORE));
        assert_eq!(diagram.target().reloads(), &[Collection::Diagrams]);
    }

    #[test]
    fn diagram_needs_code() {
        let form = DiagramForm { name: "Combat loop".into(), ..DiagramForm::blank() };
        assert_eq!(form.validate(), Err("Mermaid code is required.".to_string()));
    }
}
