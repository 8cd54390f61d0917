//! List Filters
//!
//! Each filter is the AND of a case-insensitive text search and exact
//! select matches, where the select value `"all"` matches everything.

use std::collections::BTreeSet;

use crate::models::{Character, Idea, PrdDocument, StoryElement, Task};

/// Select value that disables a select filter
pub const ALL: &str = "all";

fn select_matches(selected: &str, value: &str) -> bool {
    selected.is_empty() || selected == ALL || selected == value
}

fn text_matches(query: &str, fields: &[&str]) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || fields.iter().any(|field| field.to_lowercase().contains(&query))
}

fn tag_matches(query: &str, tags: &[String]) -> bool {
    let query = query.trim().to_lowercase();
    !query.is_empty() && tags.iter().any(|tag| tag.to_lowercase().contains(&query))
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdeaFilter {
    pub search: String,
    pub category: String,
    pub status: String,
}

impl Default for IdeaFilter {
    fn default() -> Self {
        Self { search: String::new(), category: ALL.to_string(), status: ALL.to_string() }
    }
}

impl IdeaFilter {
    pub fn matches(&self, idea: &Idea) -> bool {
        (text_matches(&self.search, &[&idea.title, &idea.summary]) || tag_matches(&self.search, &idea.tags))
            && select_matches(&self.category, &idea.category)
            && select_matches(&self.status, &idea.status)
    }

    pub fn apply<'a>(&self, ideas: &'a [Idea]) -> Vec<&'a Idea> {
        ideas.iter().filter(|idea| self.matches(idea)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskFilter {
    pub search: String,
    pub task_type: String,
    /// Substring match, unlike the selects
    pub milestone: String,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self { search: String::new(), task_type: ALL.to_string(), milestone: ALL.to_string() }
    }
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        let milestone_ok = self.milestone.is_empty()
            || self.milestone == ALL
            || task.milestone.contains(self.milestone.as_str());
        text_matches(&self.search, &[&task.title, &task.description])
            && select_matches(&self.task_type, &task.task_type)
            && milestone_ok
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterFilter {
    pub search: String,
    pub faction: String,
}

impl Default for CharacterFilter {
    fn default() -> Self {
        Self { search: String::new(), faction: ALL.to_string() }
    }
}

impl CharacterFilter {
    pub fn matches(&self, character: &Character) -> bool {
        text_matches(&self.search, &[&character.name, &character.description])
            && select_matches(&self.faction, &character.faction)
    }
}

/// Search only: documents match on title and summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocFilter {
    pub search: String,
}

impl DocFilter {
    pub fn matches(&self, doc: &PrdDocument) -> bool {
        text_matches(&self.search, &[&doc.title, &doc.summary])
    }
}

/// Search only: story elements match on name and description
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryFilter {
    pub search: String,
}

impl StoryFilter {
    pub fn matches(&self, element: &StoryElement) -> bool {
        text_matches(&self.search, &[&element.name, &element.description])
    }
}

/// Sorted distinct non-empty values, for select options
pub fn distinct_values<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>, field: impl Fn(&T) -> &str) -> Vec<String> {
    items
        .into_iter()
        .map(|item| field(item).trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idea(title: &str, summary: &str, tags: &[&str], category: &str) -> Idea {
        Idea {
            title: title.into(),
            summary: summary.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category: category.into(),
            ..Default::default()
        }
    }

    #[test]
    fn search_covers_title_summary_and_tags() {
        let ideas = vec![
            idea("Potion crafting", "", &[], "Gameplay"),
            idea("Weather", "Rain slows POTIONS", &[], "World"),
            idea("Herbs", "", &["potion-ingredients"], "Gameplay"),
            idea("Fishing", "Relaxing", &["water"], "Gameplay"),
        ];
        let filter = IdeaFilter { search: "potion".into(), ..Default::default() };

        let titles: Vec<_> = filter.apply(&ideas).iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Potion crafting", "Weather", "Herbs"]);
    }

    #[test]
    fn category_is_exact_and_anded_with_search() {
        let ideas = vec![idea("Potion crafting", "", &[], "Gameplay"), idea("Potion lore", "", &[], "Story")];
        let filter = IdeaFilter { search: "potion".into(), category: "Story".into(), ..Default::default() };
        let matched = filter.apply(&ideas);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "Potion lore");
    }

    #[test]
    fn milestone_is_a_substring_match() {
        let task = Task { title: "Inventory UI".into(), milestone: "Alpha 2".into(), task_type: "Feature".into(), ..Default::default() };
        let by_milestone = TaskFilter { milestone: "Alpha".into(), ..Default::default() };
        assert!(by_milestone.matches(&task));

        let by_type = TaskFilter { task_type: "Bug".into(), ..Default::default() };
        assert!(!by_type.matches(&task));
    }

    #[test]
    fn character_filter_by_faction() {
        let joe = Character { name: "Joe".into(), faction: "Villagers".into(), ..Default::default() };
        assert!(CharacterFilter { search: "jo".into(), faction: ALL.into() }.matches(&joe));
        assert!(!CharacterFilter { search: String::new(), faction: "Bandits".into() }.matches(&joe));
    }

    #[test]
    fn distinct_values_skip_blanks() {
        let ideas = vec![idea("a", "", &[], "World"), idea("b", "", &[], ""), idea("c", "", &[], "Gameplay"), idea("d", "", &[], "World")];
        assert_eq!(distinct_values(&ideas, |i| i.category.as_str()), vec!["Gameplay", "World"]);
    }
}
