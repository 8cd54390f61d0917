//! Markdown Preview
//!
//! Client-side fallback for document previews when the server sends raw
//! Markdown instead of HTML:
//! - raw HTML in the source is shown as text
//! - fenced code is highlighted with syntect
//!
//! Files that are not Markdown are shown escaped in a `<pre>` block.

use std::sync::OnceLock;

use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::api::{self, Backend};
use crate::models::{FilePreview, PrdDocument};
use crate::store::DocView;
use crate::views::escape_html;

/// Syntax highlighter resources (lazy loaded)
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

const THEME: &str = "InspiredGitHub";

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme() -> Option<&'static Theme> {
    THEME_SET.get_or_init(ThemeSet::load_defaults).themes.get(THEME)
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Render Markdown to HTML
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

const EMPTY_DOCUMENT: &str = "<p class=\"empty-state\">This document is empty.</p>";

fn is_markdown(file_path: &str) -> bool {
    let lower = file_path.to_ascii_lowercase();
    lower.ends_with(".md") || lower.ends_with(".markdown")
}

/// HTML for a preview answer: server HTML as is, else the raw content
/// rendered by file type
pub fn preview_html(preview: &FilePreview, file_path: &str) -> Option<String> {
    match (&preview.html, &preview.content) {
        (Some(html), _) if !html.trim().is_empty() => Some(html.clone()),
        (_, Some(content)) if is_markdown(file_path) => Some(parse_markdown(content)),
        (_, Some(content)) => Some(format!("<pre class=\"plain-text\">{}</pre>", escape_html(content))),
        _ => None,
    }
}

/// Fetch and render a document; the error is the alert text
pub async fn load_document<B: Backend>(api: &B, doc: PrdDocument) -> Result<DocView, String> {
    match api::file_preview(api, &doc.file_path).await {
        Ok(preview) => {
            let html = preview_html(&preview, &doc.file_path).unwrap_or_else(|| EMPTY_DOCUMENT.to_string());
            Ok(DocView { doc, html: Some(html) })
        }
        Err(err) => {
            tracing::error!(path = %doc.file_path, error = %err, "document preview failed");
            Err(err.alert_text("loading document"))
        }
    }
}

enum State {
    Normal,
    InCodeBlock { lang: Option<String>, content: String },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                        _ => None,
                    };
                    state = State::InCodeBlock { lang, content: String::new() };
                }
                // Raw HTML becomes visible text
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                other => events.push(other),
            },

            State::InCodeBlock { ref lang, ref mut content } => match event {
                Event::Text(t) => content.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let html = highlight_code(content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::Normal;
                }
                _ => {}
            },
        }
    }

    events
}

fn highlight_code(code: &str, lang: Option<&str>) -> String {
    let ss = get_syntax_set();
    let syntax = lang
        .and_then(|l| ss.find_syntax_by_token(l))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    get_theme()
        .and_then(|theme| highlighted_html_for_string(code, ss, syntax, theme).ok())
        .unwrap_or_else(|| format!("<pre><code>{}</code></pre>", escape_html(code)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_html_is_escaped() {
        let html = parse_markdown("Hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn fenced_code_is_highlighted() {
        let html = parse_markdown("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
    }

    #[test]
    fn preview_prefers_server_html() {
        let preview = FilePreview {
            success: true,
            html: Some("<h1>Combat</h1>".into()),
            content: Some("# ignored".into()),
            error: None,
        };
        assert_eq!(preview_html(&preview, "combat.md").as_deref(), Some("<h1>Combat</h1>"));

        let raw = FilePreview { success: true, content: Some("# Combat".into()), ..Default::default() };
        assert!(preview_html(&raw, "combat.md").unwrap().contains("<h1>Combat</h1>"));

        assert_eq!(preview_html(&FilePreview::default(), "combat.md"), None);
    }

    #[test]
    fn plain_text_is_escaped_not_rendered() {
        let raw = FilePreview { success: true, content: Some("# a <b>".into()), ..Default::default() };
        assert_eq!(
            preview_html(&raw, "notes.txt").as_deref(),
            Some("<pre class=\"plain-text\"># a &lt;b&gt;</pre>")
        );
    }

    #[test]
    fn document_load_reports_server_error() {
        use crate::api::mock::MockBackend;
        use futures::executor::block_on;
        use serde_json::json;

        let api = MockBackend::new();
        api.respond_get("/api/file/design/combat.md", json!({"success": true, "html": "<h1>Combat</h1>"}));
        api.respond_get("/api/file/lore.md", json!({"success": false, "error": "not found"}));
        api.respond_get("/api/file/notes.md", json!({"success": false}));

        let doc = |path: &str| PrdDocument { title: "t".into(), file_path: path.into(), ..Default::default() };

        let view = block_on(load_document(&api, doc("/srv/freya/docs/design/combat.md"))).unwrap();
        assert_eq!(view.html.as_deref(), Some("<h1>Combat</h1>"));

        let err = block_on(load_document(&api, doc("lore.md"))).unwrap_err();
        assert_eq!(err, "Error loading document: not found");

        let err = block_on(load_document(&api, doc("notes.md"))).unwrap_err();
        assert_eq!(err, "Error loading document: Unknown error");

        let err = block_on(load_document(&api, doc("missing.md"))).unwrap_err();
        assert_eq!(err, "Error loading document. Please try again.");
    }
}
