//! Frontend Models
//!
//! Records served by the Freya and Alice REST endpoints. Unknown fields are
//! kept in `extra` so an edit resubmission sends back what the server sent.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Fields the backend owns but the forms never touch
pub type Extra = Map<String, Value>;

/// Idea score: five sub-scores in 0..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdeaScore {
    pub impact: u8,
    pub feasibility: u8,
    pub originality: u8,
    pub player_value: u8,
    pub alignment: u8,
}

impl IdeaScore {
    pub const MAX: u8 = 5;

    pub fn total(&self) -> u32 {
        [self.impact, self.feasibility, self.originality, self.player_value, self.alignment]
            .iter()
            .map(|v| u32::from(*v))
            .sum()
    }

    /// Clamp every sub-score into range
    pub fn clamped(self) -> Self {
        Self {
            impact: self.impact.min(Self::MAX),
            feasibility: self.feasibility.min(Self::MAX),
            originality: self.originality.min(Self::MAX),
            player_value: self.player_value.min(Self::MAX),
            alignment: self.alignment.min(Self::MAX),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Idea {
    #[serde(deserialize_with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub title: String,
    #[serde(deserialize_with = "or_default")]
    pub summary: String,
    #[serde(deserialize_with = "or_default")]
    pub description: String,
    #[serde(deserialize_with = "or_default")]
    pub category: String,
    #[serde(deserialize_with = "tag_list")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "or_default")]
    pub status: String,
    #[serde(deserialize_with = "or_default")]
    pub notes: String,
    #[serde(deserialize_with = "or_default")]
    pub score: IdeaScore,
    #[serde(deserialize_with = "or_default")]
    pub modified: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Kanban status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Backlog,
    NextUp,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// Column order on the board
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Backlog,
        TaskStatus::NextUp,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "Backlog",
            TaskStatus::NextUp => "NextUp",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Review => "Review",
            TaskStatus::Done => "Done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "Backlog",
            TaskStatus::NextUp => "Next Up",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Review => "Review",
            TaskStatus::Done => "Done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    #[serde(deserialize_with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub title: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "or_default")]
    pub task_type: String,
    #[serde(deserialize_with = "or_default")]
    pub description: String,
    #[serde(deserialize_with = "or_default")]
    pub priority: String,
    #[serde(deserialize_with = "or_default")]
    pub status: String,
    #[serde(deserialize_with = "or_default")]
    pub milestone: String,
    #[serde(deserialize_with = "or_default")]
    pub estimated_time: String,
    #[serde(deserialize_with = "or_default")]
    pub objective: String,
    #[serde(deserialize_with = "or_default")]
    pub acceptance_criteria: String,
    #[serde(deserialize_with = "or_default")]
    pub implementation_notes: String,
    #[serde(deserialize_with = "or_default")]
    pub dependencies: String,
    #[serde(deserialize_with = "or_default")]
    pub testing_plan: String,
    #[serde(deserialize_with = "or_default")]
    pub next_steps: String,
    #[serde(deserialize_with = "or_default")]
    pub modified: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Task {
    pub fn status(&self) -> Option<TaskStatus> {
        TaskStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    #[serde(deserialize_with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub name: String,
    #[serde(deserialize_with = "or_default")]
    pub faction: String,
    #[serde(deserialize_with = "or_default")]
    pub description: String,
    #[serde(deserialize_with = "or_default")]
    pub modified: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Location, dialogue, quest or story arc
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryElement {
    #[serde(deserialize_with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "title")]
    #[serde(deserialize_with = "or_default")]
    pub name: String,
    #[serde(deserialize_with = "or_default")]
    pub description: String,
    #[serde(deserialize_with = "or_default")]
    pub modified: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl StoryElement {
    /// Free-form string field stored by the backend (e.g. a location's region)
    pub fn field(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    pub fn region(&self) -> Option<&str> {
        self.field("region")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrdDocument {
    #[serde(deserialize_with = "or_default")]
    pub title: String,
    #[serde(alias = "description")]
    #[serde(deserialize_with = "or_default")]
    pub summary: String,
    #[serde(alias = "path")]
    #[serde(deserialize_with = "or_default")]
    pub file_path: String,
    #[serde(deserialize_with = "or_default")]
    pub modified: String,
}

/// `/api/file/{path}` answer
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FilePreview {
    pub success: bool,
    #[serde(alias = "html_content")]
    pub html: Option<String>,
    pub content: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageAsset {
    #[serde(deserialize_with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub filename: String,
    #[serde(deserialize_with = "or_default")]
    pub original_name: String,
    #[serde(deserialize_with = "or_default")]
    pub url: String,
    #[serde(deserialize_with = "or_default")]
    pub description: String,
    #[serde(deserialize_with = "tag_list")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "or_default")]
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagram {
    #[serde(deserialize_with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub name: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "or_default")]
    pub diagram_type: String,
    #[serde(deserialize_with = "or_default")]
    pub url: String,
    #[serde(deserialize_with = "or_default")]
    pub code: String,
    #[serde(deserialize_with = "tag_list")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "or_default")]
    pub modified: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelinePoint {
    #[serde(deserialize_with = "or_default")]
    pub date: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskMetrics {
    pub status_counts: BTreeMap<String, u32>,
    pub timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphNode {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "or_default")]
    pub name: String,
    #[serde(deserialize_with = "or_default")]
    pub group: String,
    pub importance: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphEdge {
    #[serde(deserialize_with = "id_string")]
    pub source: String,
    #[serde(deserialize_with = "id_string")]
    pub target: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "or_default")]
    pub kind: String,
    pub strength: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// `{success, error, id}` answer to every mutation
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ApiResponse {
    pub success: bool,
    pub error: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    pub id: Option<String>,
}

/// Parse the timestamp formats the backend writes
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
}

/// Split a comma-separated tag string into trimmed, non-empty tags
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn opt_id<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(de)?.map(String::from))
}

/// `null` reads as the field's empty value
fn or_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

fn id_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(String::from(RawId::deserialize(de)?))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTags {
    List(Vec<String>),
    Joined(String),
}

/// Tags arrive as a list, or as the raw comma string older forms posted
fn tag_list<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<RawTags>::deserialize(de)? {
        Some(RawTags::List(tags)) => tags,
        Some(RawTags::Joined(raw)) => split_tags(&raw),
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn idea_keeps_unknown_fields() {
        let idea: Idea = serde_json::from_value(json!({
            "id": "a1",
            "title": "Potion crafting",
            "tags": ["alchemy"],
            "score": {"impact": 4, "feasibility": 3, "originality": 5, "player_value": 4, "alignment": 4},
            "created": "2024-03-01 10:00:00"
        }))
        .unwrap();

        assert_eq!(idea.score.total(), 20);
        assert_eq!(idea.extra.get("created"), Some(&json!("2024-03-01 10:00:00")));

        let back = serde_json::to_value(&idea).unwrap();
        assert_eq!(back["created"], json!("2024-03-01 10:00:00"));
        assert_eq!(back["id"], json!("a1"));
    }

    #[test]
    fn tags_accept_joined_string() {
        let idea: Idea = serde_json::from_value(json!({"tags": "fire, ice ,, "})).unwrap();
        assert_eq!(idea.tags, vec!["fire", "ice"]);

        let idea: Idea = serde_json::from_value(json!({"tags": null})).unwrap();
        assert!(idea.tags.is_empty());
    }

    #[test]
    fn numeric_ids_become_strings() {
        let node: GraphNode = serde_json::from_value(json!({"id": 7, "name": "Joe"})).unwrap();
        assert_eq!(node.id, "7");

        let task: Task = serde_json::from_value(json!({"id": 12, "type": "Bug"})).unwrap();
        assert_eq!(task.id.as_deref(), Some("12"));
        assert_eq!(task.task_type, "Bug");
    }

    #[test]
    fn prd_document_accepts_backend_names() {
        let doc: PrdDocument = serde_json::from_value(json!({
            "title": "Combat",
            "description": "Melee rules",
            "path": "combat.md"
        }))
        .unwrap();
        assert_eq!(doc.summary, "Melee rules");
        assert_eq!(doc.file_path, "combat.md");
    }

    #[test]
    fn task_status_round_trips_wire_names() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("todo"), None);
    }

    #[test]
    fn timestamps_in_backend_formats() {
        assert!(parse_timestamp("2024-03-05 14:30:00").is_some());
        assert!(parse_timestamp("2024-03-05T14:30:00").is_some());
        assert!(parse_timestamp("2024-03-05T14:30:00+02:00").is_some());
        assert_eq!(
            parse_timestamp("2024-03-05"),
            NaiveDate::from_ymd_opt(2024, 3, 5).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn null_fields_decode_as_empty() {
        let tasks: Vec<Task> = serde_json::from_value(json!([
            {"id": 1, "title": "Forge", "milestone": null},
            {"id": 2, "title": null, "status": "Done"}
        ]))
        .unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].milestone, "");
        assert_eq!(tasks[1].title, "");

        let character: Character = serde_json::from_value(json!({"name": "Joe", "faction": null})).unwrap();
        assert_eq!(character.faction, "");

        let idea: Idea = serde_json::from_value(json!({"title": "Bees", "score": null})).unwrap();
        assert_eq!(idea.score.total(), 0);
    }

    #[test]
    fn graph_weights_accept_fractions() {
        let graph: RelationshipGraph = serde_json::from_value(json!({
            "nodes": [{"id": 1, "name": "Mayor", "importance": 2.5}],
            "edges": [{"source": 1, "target": 2, "type": "Friend", "strength": 0.8}]
        }))
        .unwrap();
        assert_eq!(graph.nodes[0].importance, 2.5);
        assert_eq!(graph.edges[0].strength, 0.8);
    }

    #[test]
    fn score_clamps_sub_scores() {
        let score = IdeaScore { impact: 9, feasibility: 2, ..Default::default() }.clamped();
        assert_eq!(score.impact, 5);
        assert_eq!(score.total(), 7);
    }
}
