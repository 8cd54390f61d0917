//! View Models
//!
//! Pure functions from state to what the components display: dashboard
//! lists and stats, kanban columns, labels and small text helpers.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::api::StoryKind;
use crate::models::{parse_timestamp, Character, Idea, PrdDocument, StoryElement, Task, TaskStatus};
use crate::store::{AliceState, FreyaState};

pub const NO_IDEAS: &str = "No ideas yet. Create your first idea!";
pub const NO_TASKS_IN_PROGRESS: &str = "No tasks in progress.";
pub const NO_CHARACTERS: &str = "No characters yet. Create your first character!";
pub const NO_LOCATIONS: &str = "No locations yet. Create your first location!";
pub const NO_DOCS: &str = "No PRD documents found.";
pub const NO_MATCHES: &str = "No items match the current filters.";

/// Empty-list message for a story element collection
pub fn empty_story_message(kind: StoryKind) -> String {
    format!("No {} yet. Create your first {}!", kind.plural_title().to_lowercase(), kind.noun())
}

/// Records that carry a `modified` timestamp
pub trait Modified {
    fn modified(&self) -> &str;
}

impl Modified for Idea {
    fn modified(&self) -> &str {
        &self.modified
    }
}

impl Modified for Task {
    fn modified(&self) -> &str {
        &self.modified
    }
}

impl Modified for Character {
    fn modified(&self) -> &str {
        &self.modified
    }
}

impl Modified for StoryElement {
    fn modified(&self) -> &str {
        &self.modified
    }
}

impl Modified for PrdDocument {
    fn modified(&self) -> &str {
        &self.modified
    }
}

// Newest first, unparseable timestamps last
fn newest_first(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Items ordered newest first; ties keep their incoming order
pub fn sort_by_modified<'a, T: Modified>(items: impl IntoIterator<Item = &'a T>) -> Vec<T>
where
    T: Clone + 'a,
{
    let mut keyed: Vec<_> = items
        .into_iter()
        .map(|item| (parse_timestamp(item.modified()), item))
        .collect();
    keyed.sort_by(|a, b| newest_first(a.0, b.0));
    keyed.into_iter().map(|(_, item)| item.clone()).collect()
}

/// The `limit` most recently modified items
pub fn recent_by_modified<'a, T: Modified>(items: impl IntoIterator<Item = &'a T>, limit: usize) -> Vec<T>
where
    T: Clone + 'a,
{
    let mut recent = sort_by_modified(items);
    recent.truncate(limit);
    recent
}

/// round(done / total × 100), 0 without tasks
pub fn progress_percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (done as f64 / total as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq)]
pub struct FreyaDashboard {
    pub recent_ideas: Vec<Idea>,
    pub in_progress: Vec<Task>,
    pub total_ideas: usize,
    pub total_tasks: usize,
    pub done_tasks: usize,
    pub progress: u32,
    pub story_elements: usize,
}

pub fn freya_dashboard(state: &FreyaState, limit: usize) -> FreyaDashboard {
    let done_tasks = state.tasks.iter().filter(|t| t.status() == Some(TaskStatus::Done)).count();
    let in_progress = state.tasks.iter().filter(|t| t.status() == Some(TaskStatus::InProgress));
    FreyaDashboard {
        recent_ideas: recent_by_modified(&state.ideas, limit),
        in_progress: recent_by_modified(in_progress, limit),
        total_ideas: state.ideas.len(),
        total_tasks: state.tasks.len(),
        done_tasks,
        progress: progress_percent(done_tasks, state.tasks.len()),
        story_elements: state.story_count,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AliceDashboard {
    pub recent_characters: Vec<Character>,
    pub recent_locations: Vec<StoryElement>,
    /// (label, count) per collection, sidebar order
    pub counts: Vec<(&'static str, usize)>,
}

pub fn alice_dashboard(state: &AliceState, limit: usize) -> AliceDashboard {
    AliceDashboard {
        recent_characters: recent_by_modified(&state.characters, limit),
        recent_locations: recent_by_modified(&state.locations, limit),
        counts: vec![
            (StoryKind::Character.plural_title(), state.characters.len()),
            (StoryKind::Location.plural_title(), state.locations.len()),
            (StoryKind::Quest.plural_title(), state.quests.len()),
            (StoryKind::Dialogue.plural_title(), state.dialogues.len()),
            (StoryKind::StoryArc.plural_title(), state.story_arcs.len()),
        ],
    }
}

/// Kanban columns in board order. Tasks with an unknown status are left out.
pub fn group_by_status<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<(TaskStatus, Vec<Task>)> {
    let mut columns: Vec<(TaskStatus, Vec<Task>)> = TaskStatus::ALL.iter().map(|s| (*s, Vec::new())).collect();
    for task in tasks {
        let Some(status) = task.status() else { continue };
        if let Some((_, cards)) = columns.iter_mut().find(|(s, _)| *s == status) {
            cards.push(task.clone());
        }
    }
    columns
}

/// Live label under the idea score sliders
pub fn priority_band(total: u32) -> &'static str {
    match total {
        t if t >= 20 => "High Priority",
        t if t >= 15 => "Medium Priority",
        _ => "Low Priority",
    }
}

pub fn priority_band_class(total: u32) -> &'static str {
    match total {
        t if t >= 20 => "priority-high",
        t if t >= 15 => "priority-medium",
        _ => "priority-low",
    }
}

/// CSS class for a task priority badge
pub fn task_priority_class(priority: &str) -> &'static str {
    match priority.to_ascii_lowercase().as_str() {
        "high" => "priority-high",
        "medium" => "priority-medium",
        "low" => "priority-low",
        _ => "priority-none",
    }
}

/// CSS class for an idea or task status badge
pub fn status_class(status: &str) -> String {
    let slug: String = status
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    if slug.is_empty() {
        "status-none".to_string()
    } else {
        format!("status-{slug}")
    }
}

/// Cut to `max` characters and append "..."
pub fn truncate_text(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// First letters of the first two words, upper case
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Stable colour for a string: 31-multiplier hash over UTF-16 units
pub fn string_to_color(value: &str) -> String {
    let hash = value
        .encode_utf16()
        .fold(0i32, |hash, unit| i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash)));
    let mut color = String::from("#");
    for i in 0..3 {
        color.push_str(&format!("{:02x}", (hash >> (i * 8)) & 0xFF));
    }
    color
}

/// "Mar 5, 2024"; the raw string when unparseable
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Escape text for insertion into generated markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Placeholder when a display field is blank
pub fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idea(title: &str, modified: &str) -> Idea {
        Idea { title: title.into(), modified: modified.into(), ..Default::default() }
    }

    fn task(id: &str, status: &str, modified: &str) -> Task {
        Task { id: Some(id.into()), status: status.into(), modified: modified.into(), ..Default::default() }
    }

    #[test]
    fn dashboard_lists_five_newest() {
        let ideas: Vec<_> = (1..=8).map(|d| idea(&format!("i{d}"), &format!("2024-03-0{d} 10:00:00"))).collect();
        let recent = recent_by_modified(&ideas, 5);
        let titles: Vec<_> = recent.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["i8", "i7", "i6", "i5", "i4"]);
    }

    #[test]
    fn ties_keep_order_and_bad_dates_go_last() {
        let ideas = vec![
            idea("broken", "someday"),
            idea("a", "2024-01-01 00:00:00"),
            idea("b", "2024-01-01 00:00:00"),
            idea("newer", "2024-02-01T00:00:00"),
        ];
        let titles: Vec<_> = recent_by_modified(&ideas, 10).into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["newer", "a", "b", "broken"]);
    }

    #[test]
    fn bare_dates_sort_newest_first() {
        let ideas = vec![idea("old", "2024-03-01"), idea("new", "2024-03-09"), idea("mid", "2024-03-05 09:00:00")];
        let titles: Vec<_> = recent_by_modified(&ideas, 5).into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[test]
    fn documents_sort_newest_first_without_limit() {
        let doc = |title: &str, modified: &str| PrdDocument {
            title: title.into(),
            modified: modified.into(),
            ..Default::default()
        };
        let docs: Vec<_> = (1..=7).map(|d| doc(&format!("d{d}"), &format!("2024-05-0{d}"))).chain([doc("undated", "")]).collect();
        let titles: Vec<_> = sort_by_modified(&docs).into_iter().map(|d| d.title).collect();
        assert_eq!(titles, vec!["d7", "d6", "d5", "d4", "d3", "d2", "d1", "undated"]);
    }

    #[test]
    fn every_known_status_lands_in_one_column() {
        let tasks: Vec<_> = TaskStatus::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| task(&format!("t{i}"), s.as_str(), ""))
            .chain([task("odd", "Archived", "")])
            .collect();
        let columns = group_by_status(&tasks);

        assert_eq!(columns.len(), 5);
        for (status, cards) in &columns {
            assert_eq!(cards.len(), 1);
            assert_eq!(cards[0].status, status.as_str());
        }
        let placed: usize = columns.iter().map(|(_, c)| c.len()).sum();
        assert_eq!(placed, 5);
    }

    #[test]
    fn freya_dashboard_stats() {
        let state = FreyaState {
            tasks: vec![
                task("1", "Done", ""),
                task("2", "Done", ""),
                task("3", "InProgress", "2024-01-02 00:00:00"),
            ],
            ..Default::default()
        };
        let dash = freya_dashboard(&state, 5);
        assert_eq!(dash.done_tasks, 2);
        assert_eq!(dash.progress, 67);
        assert_eq!(dash.in_progress.len(), 1);
        assert_eq!(freya_dashboard(&FreyaState::default(), 5).progress, 0);
    }

    #[test]
    fn priority_band_thresholds() {
        assert_eq!(priority_band(20), "High Priority");
        assert_eq!(priority_band(25), "High Priority");
        assert_eq!(priority_band(15), "Medium Priority");
        assert_eq!(priority_band(14), "Low Priority");
    }

    #[test]
    fn text_helpers() {
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("abc", 3), "abc");
        assert_eq!(truncate_text("héllo wörld", 5), "héllo...");
        assert_eq!(initials("joe the brave"), "JT");
        assert_eq!(initials("  "), "");
        assert_eq!(status_class("In Progress"), "status-in-progress");
    }

    #[test]
    fn colors_are_deterministic_hex() {
        let color = string_to_color("Villagers");
        assert_eq!(color, string_to_color("Villagers"));
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        // "a" hashes to 97
        assert_eq!(string_to_color("a"), "#610000");
    }

    #[test]
    fn dates_render_short_month() {
        assert_eq!(format_date("2024-03-05 14:30:00"), "Mar 5, 2024");
        assert_eq!(format_date("2024-03-05"), "Mar 5, 2024");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape_html(r#"<b a="1">&'</b>"#), "&lt;b a=&quot;1&quot;&gt;&amp;&#39;&lt;/b&gt;");
    }

    #[test]
    fn empty_story_messages() {
        assert_eq!(empty_story_message(StoryKind::StoryArc), "No story arcs yet. Create your first story arc!");
    }
}
