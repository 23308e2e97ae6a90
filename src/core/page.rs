//! Page content and its row layout.
//!
//! A page is a flat list of sections loaded from JSON (or the built-in
//! sample).  [`PageLayout`] wraps every section to the current width and
//! stacks the results; one row is one scroll unit.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read page: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid page JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("page has no sections")]
    Empty,
    #[error("duplicate section id \"{0}\"")]
    DuplicateSection(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSection {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Extra id this section can be reached by (a navbar target).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Experience entries: registered with the coordinator and drawn on the
    /// timeline.
    #[serde(default)]
    pub tracked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    pub title: String,
    pub sections: Vec<PageSection>,
}

impl PageDocument {
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, PageError> {
        let doc: PageDocument = serde_json::from_str(text)?;
        doc.validate()?;
        Ok(doc)
    }

    fn validate(&self) -> Result<(), PageError> {
        if self.sections.is_empty() {
            return Err(PageError::Empty);
        }
        let mut seen = HashSet::new();
        for section in &self.sections {
            for id in std::iter::once(&section.id).chain(section.anchor.as_ref()) {
                if !seen.insert(id.as_str()) {
                    return Err(PageError::DuplicateSection(id.clone()));
                }
            }
        }
        Ok(())
    }

    pub fn section(&self, id: &str) -> Option<&PageSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn tracked(&self) -> impl Iterator<Item = &PageSection> {
        self.sections.iter().filter(|s| s.tracked)
    }

    /// Built-in portfolio used when no page file is given.
    pub fn sample() -> Self {
        let text = |lines: &[&str]| lines.iter().map(|l| l.to_string()).collect::<Vec<_>>();
        let plain = |id: &str, title: &str, body: &[&str]| PageSection {
            id: id.to_string(),
            title: title.to_string(),
            subtitle: None,
            anchor: None,
            body: text(body),
            skills: Vec::new(),
            tracked: false,
        };
        let job = |n: usize, title: &str, when: &str, body: &[&str], skills: &[&str]| PageSection {
            id: format!("experience-{n}"),
            title: title.to_string(),
            subtitle: Some(when.to_string()),
            anchor: (n == 0).then(|| "experience".to_string()),
            body: text(body),
            skills: text(skills),
            tracked: true,
        };

        Self {
            title: "Portfolio".to_string(),
            sections: vec![
                plain(
                    "profile",
                    "Profile",
                    &[
                        "Systems engineer who likes small, fast tools and honest interfaces.",
                        "Ten years of shipping services, build pipelines and terminal apps.",
                        "",
                        "Currently interested in incremental computation and UI runtimes.",
                    ],
                ),
                job(
                    0,
                    "Staff Engineer · Streamline",
                    "2022 – present",
                    &[
                        "Owns the rendering pipeline for a collaborative editor used by 40k teams.",
                        "Cut cold-start time by 60% by moving layout into a shared worker.",
                        "Mentors four engineers; runs the performance guild.",
                    ],
                    &["Rust", "WebAssembly", "TypeScript", "Profiling"],
                ),
                job(
                    1,
                    "Senior Engineer · Parcelworks",
                    "2019 – 2022",
                    &[
                        "Built the routing service that plans 2M deliveries a day.",
                        "Replaced a nightly batch job with a streaming pipeline.",
                        "Introduced property-based testing across the team.",
                    ],
                    &["Go", "Kafka", "PostgreSQL", "gRPC"],
                ),
                job(
                    2,
                    "Software Engineer · Lumen Labs",
                    "2016 – 2019",
                    &[
                        "Wrote firmware update tooling for a fleet of field sensors.",
                        "Maintained the device simulator used in CI.",
                    ],
                    &["C", "Python", "Embedded Linux"],
                ),
                job(
                    3,
                    "Intern · Openfield",
                    "2015",
                    &["Ported the mapping front end to a tiled renderer."],
                    &["JavaScript", "Canvas"],
                ),
                plain(
                    "skills",
                    "Skills",
                    &[
                        "Languages: Rust, Go, TypeScript, C, Python.",
                        "Practices: performance work, API design, incremental delivery.",
                        "Tools: tracing, flame graphs, property testing, fuzzing.",
                    ],
                ),
                plain(
                    "education",
                    "Education",
                    &["BSc Computer Science, 2016."],
                ),
                plain(
                    "awards",
                    "Awards",
                    &[
                        "Internal hackathon winner, 2021 and 2023.",
                        "Speaker at two regional systems conferences.",
                    ],
                ),
                plain(
                    "contact",
                    "Contact",
                    &["mail: hello@example.dev", "code: git.example.dev/folio"],
                ),
            ],
        }
    }
}

// ───────────────────────────────────────── layout ─────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Subtitle,
    Body,
    Skills,
    Blank,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLine {
    pub kind: LineKind,
    pub text: String,
}

impl PageLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// One section wrapped to the current width.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub anchor: Option<String>,
    pub tracked: bool,
    /// First row, in document coordinates.
    pub top: usize,
    pub lines: Vec<PageLine>,
}

impl Block {
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn bottom(&self) -> usize {
        self.top + self.lines.len()
    }
}

/// Sections stacked top to bottom at a fixed width.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    width: u16,
    blocks: Vec<Block>,
    total_height: usize,
}

impl PageLayout {
    pub fn new(doc: &PageDocument, width: u16) -> Self {
        let wrap_width = usize::from(width.max(1));
        let mut blocks = Vec::with_capacity(doc.sections.len());
        let mut top = 0;
        for section in &doc.sections {
            let lines = section_lines(section, wrap_width);
            let height = lines.len();
            blocks.push(Block {
                id: section.id.clone(),
                anchor: section.anchor.clone(),
                tracked: section.tracked,
                top,
                lines,
            });
            top += height;
        }
        Self {
            width,
            blocks,
            total_height: top,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn total_height(&self) -> usize {
        self.total_height
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Look a block up by section id or anchor.
    pub fn find(&self, id: &str) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|b| b.id == id || b.anchor.as_deref() == Some(id))
    }

    /// Largest scroll offset that still fills a viewport of `viewport` rows.
    pub fn max_scroll(&self, viewport: usize) -> usize {
        self.total_height.saturating_sub(viewport)
    }

    /// The row at document position `row`, with the block it belongs to.
    pub fn line_at(&self, row: usize) -> Option<(&Block, &PageLine)> {
        let idx = self.blocks.partition_point(|b| b.bottom() <= row);
        let block = self.blocks.get(idx)?;
        block.lines.get(row.checked_sub(block.top)?).map(|line| (block, line))
    }
}

fn section_lines(section: &PageSection, width: usize) -> Vec<PageLine> {
    let mut lines = Vec::new();
    for row in wrap(&section.title, width) {
        lines.push(PageLine::new(LineKind::Title, row));
    }
    if let Some(subtitle) = &section.subtitle {
        for row in wrap(subtitle, width) {
            lines.push(PageLine::new(LineKind::Subtitle, row));
        }
    }
    for paragraph in &section.body {
        for row in wrap(paragraph, width) {
            lines.push(PageLine::new(LineKind::Body, row));
        }
    }
    if !section.skills.is_empty() {
        for row in wrap(&section.skills.join(" · "), width) {
            lines.push(PageLine::new(LineKind::Skills, row));
        }
    }
    lines.push(PageLine::new(LineKind::Blank, ""));
    lines
}

/// Greedy word wrap by character count.  Words longer than `width` are
/// split; an empty string yields one empty row.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        // Hard-split words that can never fit.
        while chars.len() > width {
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(width);
            rows.push(chars.into_iter().collect());
            chars = rest;
        }
        let word_len = chars.len();
        if word_len == 0 {
            continue;
        }
        let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };
        if needed > width {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(chars);
        current_len += word_len;
    }
    if current_len > 0 || rows.is_empty() {
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap("the quick brown fox", 9), vec!["the quick", "brown fox"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("a abcdefgh b", 4), vec!["a", "abcd", "efgh", "b"]);
    }

    #[test]
    fn sample_is_valid() {
        let doc = PageDocument::sample();
        assert!(doc.validate().is_ok());
        assert!(doc.tracked().count() >= 2);
        assert!(doc.section("experience-0").is_some());
    }

    #[test]
    fn blocks_stack_without_gaps() {
        let doc = PageDocument::sample();
        let layout = PageLayout::new(&doc, 40);
        let mut expected_top = 0;
        for block in layout.blocks() {
            assert_eq!(block.top, expected_top);
            assert!(block.height() >= 2);
            assert!(block.lines.iter().all(|l| l.text.chars().count() <= 40));
            expected_top = block.bottom();
        }
        assert_eq!(layout.total_height(), expected_top);
    }

    #[test]
    fn narrower_layout_is_taller() {
        let doc = PageDocument::sample();
        let wide = PageLayout::new(&doc, 120);
        let narrow = PageLayout::new(&doc, 30);
        assert!(narrow.total_height() > wide.total_height());
    }

    #[test]
    fn find_matches_anchor() {
        let layout = PageLayout::new(&PageDocument::sample(), 80);
        assert_eq!(layout.find("experience").map(|b| b.id.as_str()), Some("experience-0"));
        assert_eq!(layout.find("contact").map(|b| b.id.as_str()), Some("contact"));
        assert!(layout.find("nowhere").is_none());
    }

    #[test]
    fn line_at_maps_rows_to_blocks() {
        let layout = PageLayout::new(&PageDocument::sample(), 80);
        let second = &layout.blocks()[1];
        let (block, line) = layout.line_at(second.top).expect("row in range");
        assert_eq!(block.id, second.id);
        assert_eq!(line.kind, LineKind::Title);
        assert!(layout.line_at(layout.total_height()).is_none());
    }

    #[test]
    fn rejects_bad_documents() {
        assert!(matches!(
            PageDocument::from_json(r#"{"title":"x","sections":[]}"#),
            Err(PageError::Empty)
        ));
        let dup = r#"{"title":"x","sections":[
            {"id":"a","title":"A"},
            {"id":"b","title":"B","anchor":"a"}
        ]}"#;
        assert!(matches!(
            PageDocument::from_json(dup),
            Err(PageError::DuplicateSection(id)) if id == "a"
        ));
        assert!(matches!(PageDocument::from_json("{"), Err(PageError::Json(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("page.json");
        let json = serde_json::to_string(&PageDocument::sample()).expect("serialize");
        std::fs::write(&path, json).expect("write");
        assert_eq!(PageDocument::load(&path).expect("load"), PageDocument::sample());

        let missing = dir.path().join("missing.json");
        assert!(matches!(PageDocument::load(&missing), Err(PageError::Io(_))));
    }
}
