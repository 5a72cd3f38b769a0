//! Content segmentation over the top-level nodes of the rendered tree.
//!
//! Full-content mode scans for the first top-level `h1` and captures
//! everything from it onward. Section-aware mode routes nodes into named
//! regions keyed on the literal labels `Overview`, `Configuration`, and
//! `Use Cases`.

use crate::html::Node;

/// How report bodies are selected for publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMode {
    /// One `content` payload from the first top-level `h1` onward.
    FullContent,
    /// `overview` / `configuration` / `use_cases` payloads keyed on labels.
    Sectioned,
}

/// Selected fragments, one variant per mode.
///
/// The report carries either `content` or the section triple, never both;
/// this enum makes the invariant structural.
#[derive(Debug, PartialEq, Eq)]
pub enum Fragments {
    Full(Option<String>),
    Sections {
        overview: Option<String>,
        configuration: Option<String>,
        use_cases: Option<String>,
    },
}

/// Select the fragments to publish from the top-level nodes.
pub fn segment(nodes: &[Node], mode: SegmentMode) -> Fragments {
    match mode {
        SegmentMode::FullContent => Fragments::Full(capture_full(nodes)),
        SegmentMode::Sectioned => capture_sections(nodes),
    }
}

/// Full-content capture state.
#[derive(PartialEq)]
enum ScanState {
    /// Looking for the first top-level `h1`.
    Scanning,
    /// Capturing every node; terminal.
    Capturing,
}

/// Capture everything from the first top-level `h1` onward.
///
/// Header noise before the `h1` is dropped here. A document with no `h1`
/// captures nothing, which is a valid outcome: the report is published
/// without a payload field.
fn capture_full(nodes: &[Node]) -> Option<String> {
    let mut state = ScanState::Scanning;
    let mut buf = String::new();

    for node in nodes {
        if state == ScanState::Scanning && is_h1(node) {
            state = ScanState::Capturing;
        }
        if state == ScanState::Capturing {
            append_node(&mut buf, node);
        }
    }

    (!buf.is_empty()).then_some(buf)
}

/// Named regions recognized in section-aware mode.
#[derive(Clone, Copy, PartialEq)]
enum Region {
    Overview,
    Configuration,
    UseCases,
}

fn region_for_label(text: &str) -> Option<Region> {
    match text {
        "Overview" => Some(Region::Overview),
        "Configuration" => Some(Region::Configuration),
        "Use Cases" => Some(Region::UseCases),
        _ => None,
    }
}

/// Route nodes into named regions.
///
/// A label node opens its region and belongs to it; nodes before the first
/// recognized label are dropped. At most one region is active at a time.
fn capture_sections(nodes: &[Node]) -> Fragments {
    let mut overview = String::new();
    let mut configuration = String::new();
    let mut use_cases = String::new();
    let mut active: Option<Region> = None;

    for node in nodes {
        if let Some(region) = region_for_label(&node.text_content()) {
            active = Some(region);
        }
        let buf = match active {
            Some(Region::Overview) => &mut overview,
            Some(Region::Configuration) => &mut configuration,
            Some(Region::UseCases) => &mut use_cases,
            None => continue,
        };
        append_node(buf, node);
    }

    let non_empty = |buf: String| (!buf.is_empty()).then_some(buf);
    Fragments::Sections {
        overview: non_empty(overview),
        configuration: non_empty(configuration),
        use_cases: non_empty(use_cases),
    }
}

fn is_h1(node: &Node) -> bool {
    node.as_element().is_some_and(|elem| elem.tag == "h1")
}

/// Append a captured node as `"\n" + html`.
///
/// Each node carries a leading newline in the serialized fragment; the
/// shape is observable through the encoded payload and is kept as-is.
fn append_node(buf: &mut String, node: &Node) {
    buf.push('\n');
    node.render_to(buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{MarkdownOptions, from_markdown};

    fn nodes_of(markdown: &str) -> Vec<Node> {
        from_markdown(markdown, &MarkdownOptions::all())
    }

    #[test]
    fn test_full_capture_starts_at_h1() {
        let nodes = nodes_of("noise before\n\n# Start\n\nafter");
        let Fragments::Full(content) = segment(&nodes, SegmentMode::FullContent) else {
            panic!("expected full mode");
        };
        assert_eq!(content.unwrap(), "\n<h1>Start</h1>\n<p>after</p>");
    }

    #[test]
    fn test_full_capture_is_terminal() {
        // Everything after the first h1 is captured, h1 or not
        let nodes = nodes_of("# One\n\ntext\n\n# Two\n\nmore");
        let Fragments::Full(Some(content)) = segment(&nodes, SegmentMode::FullContent) else {
            panic!("expected captured content");
        };
        assert!(content.contains("<h1>Two</h1>"));
        assert!(content.contains("<p>more</p>"));
    }

    #[test]
    fn test_no_h1_captures_nothing() {
        let nodes = nodes_of("## Only h2\n\ntext");
        assert_eq!(
            segment(&nodes, SegmentMode::FullContent),
            Fragments::Full(None)
        );
    }

    #[test]
    fn test_header_noise_is_dropped() {
        let nodes = nodes_of("---\ntitle: X\n---\n# Real\n\nbody");
        let Fragments::Full(Some(content)) = segment(&nodes, SegmentMode::FullContent) else {
            panic!("expected captured content");
        };
        assert!(content.starts_with("\n<h1>Real</h1>"));
        assert!(!content.contains("title: X"));
    }

    #[test]
    fn test_sections_route_by_label() {
        let nodes = nodes_of(
            "intro\n\n## Overview\n\nov text\n\n## Configuration\n\ncfg text\n\n## Use Cases\n\nuc text",
        );
        let Fragments::Sections {
            overview,
            configuration,
            use_cases,
        } = segment(&nodes, SegmentMode::Sectioned)
        else {
            panic!("expected sectioned mode");
        };

        let overview = overview.unwrap();
        assert!(overview.contains("<h2>Overview</h2>"));
        assert!(overview.contains("<p>ov text</p>"));
        // Content before the first label is dropped
        assert!(!overview.contains("intro"));

        let configuration = configuration.unwrap();
        assert!(configuration.contains("<h2>Configuration</h2>"));
        assert!(configuration.contains("<p>cfg text</p>"));

        let use_cases = use_cases.unwrap();
        assert!(use_cases.contains("<h2>Use Cases</h2>"));
        assert!(use_cases.contains("<p>uc text</p>"));
    }

    #[test]
    fn test_sections_missing_region_is_none() {
        let nodes = nodes_of("## Overview\n\nonly overview");
        let Fragments::Sections {
            overview,
            configuration,
            use_cases,
        } = segment(&nodes, SegmentMode::Sectioned)
        else {
            panic!("expected sectioned mode");
        };
        assert!(overview.is_some());
        assert_eq!(configuration, None);
        assert_eq!(use_cases, None);
    }

    #[test]
    fn test_sections_label_must_match_exactly() {
        let nodes = nodes_of("## Overview notes\n\ntext");
        let Fragments::Sections { overview, .. } = segment(&nodes, SegmentMode::Sectioned) else {
            panic!("expected sectioned mode");
        };
        assert_eq!(overview, None);
    }
}
