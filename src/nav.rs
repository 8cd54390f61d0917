//! Navigation
//!
//! Each tool has exactly one active section. Activating a section returns
//! the collections it refreshes; sections that render cached data refresh
//! nothing.

use crate::loader::Collection;

pub trait Section: Copy + PartialEq + Send + Sync + 'static {
    /// Sidebar order
    const ALL: &'static [Self];

    /// DOM id and `data-section` value
    fn id(&self) -> &'static str;
    fn title(&self) -> &'static str;
    fn refresh(&self) -> &'static [Collection];

    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.id() == id)
    }
}

/// Make `target` the single active section, returning what to reload
pub fn navigate<S: Section>(active: &mut S, target: S) -> &'static [Collection] {
    *active = target;
    target.refresh()
}

/// Sidebar link and content panel classes for `section`
pub fn section_classes<S: Section>(section: S, active: S) -> (&'static str, &'static str) {
    if section == active {
        ("nav-link active", "content-section active")
    } else {
        ("nav-link", "content-section")
    }
}

/// Document title for the active section
pub fn page_title<S: Section>(tool: &str, active: S) -> String {
    format!("{} - {}", active.title(), tool)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FreyaSection {
    #[default]
    Dashboard,
    Ideas,
    Tasks,
    Docs,
    Diagrams,
    Images,
}

impl Section for FreyaSection {
    const ALL: &'static [Self] = &[
        FreyaSection::Dashboard,
        FreyaSection::Ideas,
        FreyaSection::Tasks,
        FreyaSection::Docs,
        FreyaSection::Diagrams,
        FreyaSection::Images,
    ];

    fn id(&self) -> &'static str {
        match self {
            FreyaSection::Dashboard => "dashboard",
            FreyaSection::Ideas => "ideas",
            FreyaSection::Tasks => "tasks",
            FreyaSection::Docs => "docs",
            FreyaSection::Diagrams => "diagrams",
            FreyaSection::Images => "images",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            FreyaSection::Dashboard => "Dashboard",
            FreyaSection::Ideas => "Ideas",
            FreyaSection::Tasks => "Tasks",
            FreyaSection::Docs => "Documentation",
            FreyaSection::Diagrams => "Diagrams",
            FreyaSection::Images => "Images",
        }
    }

    fn refresh(&self) -> &'static [Collection] {
        match self {
            FreyaSection::Dashboard => &[
                Collection::Ideas,
                Collection::Tasks,
                Collection::TaskMetrics,
                Collection::Characters,
            ],
            FreyaSection::Docs => &[Collection::PrdDocs],
            FreyaSection::Diagrams => &[Collection::Diagrams],
            FreyaSection::Images => &[Collection::Images],
            FreyaSection::Ideas | FreyaSection::Tasks => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliceSection {
    #[default]
    Dashboard,
    Characters,
    Locations,
    Quests,
    Dialogues,
    StoryArcs,
}

impl Section for AliceSection {
    const ALL: &'static [Self] = &[
        AliceSection::Dashboard,
        AliceSection::Characters,
        AliceSection::Locations,
        AliceSection::Quests,
        AliceSection::Dialogues,
        AliceSection::StoryArcs,
    ];

    fn id(&self) -> &'static str {
        match self {
            AliceSection::Dashboard => "story-dashboard",
            AliceSection::Characters => "characters",
            AliceSection::Locations => "locations",
            AliceSection::Quests => "quests",
            AliceSection::Dialogues => "dialogues",
            AliceSection::StoryArcs => "story-arcs",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AliceSection::Dashboard => "Story Dashboard",
            AliceSection::Characters => "Characters",
            AliceSection::Locations => "Locations",
            AliceSection::Quests => "Quests",
            AliceSection::Dialogues => "Dialogues",
            AliceSection::StoryArcs => "Story Arcs",
        }
    }

    fn refresh(&self) -> &'static [Collection] {
        match self {
            AliceSection::Dashboard => &[Collection::Characters, Collection::Locations, Collection::RelationshipGraph],
            AliceSection::Characters => &[Collection::Characters],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_section_is_active() {
        let mut active = FreyaSection::Dashboard;
        for &target in FreyaSection::ALL {
            navigate(&mut active, target);
            let classes: Vec<_> = FreyaSection::ALL.iter().map(|&s| section_classes(s, active)).collect();
            let active_links: Vec<_> = classes.iter().filter(|(link, _)| *link == "nav-link active").collect();
            let active_panels: Vec<_> = classes.iter().filter(|(_, panel)| *panel == "content-section active").collect();
            assert_eq!(active_links.len(), 1);
            assert_eq!(active_panels.len(), 1);
            let position = FreyaSection::ALL.iter().position(|s| *s == target).unwrap();
            assert_eq!(classes[position], ("nav-link active", "content-section active"));
        }
    }

    #[test]
    fn navigation_returns_target_refresh_list() {
        let mut active = FreyaSection::Ideas;
        assert_eq!(navigate(&mut active, FreyaSection::Docs), &[Collection::PrdDocs]);
        assert_eq!(navigate(&mut active, FreyaSection::Images), &[Collection::Images]);
        assert_eq!(active, FreyaSection::Images);
    }

    #[test]
    fn some_sections_refresh_nothing() {
        let mut active = AliceSection::Dashboard;
        assert!(navigate(&mut active, AliceSection::Quests).is_empty());
        assert_eq!(active, AliceSection::Quests);
        assert_eq!(navigate(&mut active, AliceSection::Characters), &[Collection::Characters]);
    }

    #[test]
    fn section_ids_round_trip() {
        assert_eq!(AliceSection::from_id("story-arcs"), Some(AliceSection::StoryArcs));
        assert_eq!(FreyaSection::from_id("docs"), Some(FreyaSection::Docs));
        assert_eq!(FreyaSection::from_id("settings"), None);
    }

    #[test]
    fn title_follows_section() {
        assert_eq!(page_title("Freya", FreyaSection::Tasks), "Tasks - Freya");
    }
}
