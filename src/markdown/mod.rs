//! Markdown to HTML tree conversion using pulldown-cmark.
//!
//! The whole document is rendered, header block included: the metadata
//! header degrades to noise nodes (a rule plus a setext heading) that the
//! segmentation step discards, keeping fragment selection in one place.
//!
//! Inline and block HTML fragments are parsed with `tl` and folded into the
//! tree so that embedded `<img>` tags become rewritable element nodes.
//! Inline fragments arrive one tag at a time, so a non-void inline element
//! is parsed separately from its closing tag and loses any nested markdown
//! children; void tags like `<img>` are unaffected.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::html::{Element, Node};

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        opts
    }
}

/// Markdown to HTML tree converter
struct Converter {
    /// Stack of open elements (for nested structures)
    stack: Vec<Element>,
    /// Top-level nodes (collected when stack is empty)
    root: Vec<Node>,
}

impl Converter {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: Vec::new(),
        }
    }

    /// Convert a markdown string to its top-level nodes
    fn convert(mut self, markdown: &str, options: &MarkdownOptions) -> Vec<Node> {
        let parser = Parser::new_ext(markdown, options.to_pulldown_options());

        for event in parser {
            self.handle_event(event);
        }

        self.root
    }

    /// Handle a single pulldown-cmark event
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(&tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.add_text(text.as_ref()),
            Event::Code(code) => self.add_inline_code(code.as_ref()),
            Event::Html(html) => self.add_raw_html(html.as_ref()),
            Event::InlineHtml(html) => self.add_raw_html(html.as_ref()),
            Event::SoftBreak => self.add_text("\n"),
            Event::HardBreak => self.add_empty_element("br"),
            Event::Rule => self.add_empty_element("hr"),
            Event::FootnoteReference(name) => self.add_footnote_ref(name.as_ref()),
            Event::TaskListMarker(checked) => self.add_task_marker(checked),
            // Math extensions are not enabled; keep the formula as text
            Event::InlineMath(math) => self.add_text(math.as_ref()),
            Event::DisplayMath(math) => self.add_text(math.as_ref()),
        }
    }

    /// Start a new tag (push onto stack)
    fn start_tag(&mut self, tag: &Tag) {
        let (tag_name, attrs) = tag_to_element(tag);
        self.stack.push(Element::with_attrs(tag_name, attrs));
    }

    /// End a tag (pop from stack)
    fn end_tag(&mut self, _tag: TagEnd) {
        if let Some(elem) = self.stack.pop() {
            if elem.tag.is_empty() {
                // Transparent wrapper (html/metadata block): splice children
                for child in elem.children {
                    self.push(child);
                }
            } else {
                self.push(Node::element(elem));
            }
        }
    }

    /// Add text content
    fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.push(Node::text(text));
    }

    /// Add inline code
    fn add_inline_code(&mut self, code: &str) {
        let mut elem = Element::new("code");
        elem.children.push(Node::text(code));
        self.push(Node::element(elem));
    }

    /// Add raw HTML - parse with tl and fold into the tree
    fn add_raw_html(&mut self, html: &str) {
        let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
            // Parse failed, keep as raw text
            self.add_text(html);
            return;
        };

        let parser = dom.parser();
        for handle in dom.children() {
            if let Some(node) = tl_node_to_node(*handle, parser) {
                self.push(node);
            }
        }
    }

    /// Add a childless element
    fn add_empty_element(&mut self, tag: &str) {
        self.push(Node::element(Element::new(tag)));
    }

    /// Add footnote reference
    fn add_footnote_ref(&mut self, name: &str) {
        let mut link = Element::with_attrs(
            "a",
            vec![
                ("href".to_string(), format!("#fn-{name}")),
                ("id".to_string(), format!("fnref-{name}")),
            ],
        );
        link.children.push(Node::text(format!("[{name}]")));

        let mut sup =
            Element::with_attrs("sup", vec![("class".to_string(), "footnote-ref".to_string())]);
        sup.children.push(Node::element(link));
        self.push(Node::element(sup));
    }

    /// Add task list marker
    fn add_task_marker(&mut self, checked: bool) {
        let mut attrs = vec![
            ("type".to_string(), "checkbox".to_string()),
            ("disabled".to_string(), String::new()),
        ];
        if checked {
            attrs.push(("checked".to_string(), String::new()));
        }
        self.push(Node::element(Element::with_attrs("input", attrs)));
    }

    /// Add a node to the current context (top of stack or root)
    fn push(&mut self, node: Node) {
        if let Some(elem) = self.stack.last_mut() {
            elem.children.push(node);
        } else {
            self.root.push(node);
        }
    }
}

/// Convert a tl node handle to an HTML tree node
fn tl_node_to_node(handle: tl::NodeHandle, parser: &tl::Parser) -> Option<Node> {
    let node = handle.get(parser)?;

    match node {
        tl::Node::Tag(tag) => {
            let tag_name = tag.name().as_utf8_str().to_lowercase();

            let mut elem = Element::new(tag_name);
            for (key, value) in tag.attributes().iter() {
                let key: &str = key.as_ref();
                let value = value.map(|v| v.to_string()).unwrap_or_default();
                elem.attrs.push((key.to_string(), value));
            }

            for child_handle in tag.children().top().iter() {
                if let Some(child) = tl_node_to_node(*child_handle, parser) {
                    elem.children.push(child);
                }
            }

            Some(Node::element(elem))
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str().to_string();
            // Skip whitespace-only text
            if text.trim().is_empty() {
                None
            } else {
                Some(Node::text(text))
            }
        }
        tl::Node::Comment(_) => None, // Skip comments
    }
}

/// Convert pulldown-cmark Tag to (tag_name, attributes).
///
/// An empty tag name marks a transparent wrapper whose children are spliced
/// into the parent when the tag ends.
fn tag_to_element(tag: &Tag) -> (String, Vec<(String, String)>) {
    let simple = |name: &str| (name.to_string(), vec![]);

    match tag {
        // Block elements
        Tag::Paragraph => simple("p"),
        Tag::Heading { level, id, .. } => {
            let attrs = id
                .as_ref()
                .map(|id| vec![("id".to_string(), id.to_string())])
                .unwrap_or_default();
            (heading_level_to_tag(*level).to_string(), attrs)
        }
        Tag::BlockQuote(_) => simple("blockquote"),
        Tag::CodeBlock(kind) => {
            let attrs = match kind {
                pulldown_cmark::CodeBlockKind::Indented => vec![],
                pulldown_cmark::CodeBlockKind::Fenced(lang) => {
                    if lang.is_empty() {
                        vec![]
                    } else {
                        vec![("class".to_string(), format!("language-{lang}"))]
                    }
                }
            };
            ("pre".to_string(), attrs)
        }
        Tag::List(Some(start)) => {
            let attrs = if *start != 1 {
                vec![("start".to_string(), start.to_string())]
            } else {
                vec![]
            };
            ("ol".to_string(), attrs)
        }
        Tag::List(None) => simple("ul"),
        Tag::Item => simple("li"),
        Tag::FootnoteDefinition(name) => (
            "div".to_string(),
            vec![
                ("class".to_string(), "footnote".to_string()),
                ("id".to_string(), format!("fn-{name}")),
            ],
        ),

        // Table elements
        Tag::Table(_) => simple("table"),
        Tag::TableHead => simple("thead"),
        Tag::TableRow => simple("tr"),
        Tag::TableCell => simple("td"),

        // Inline elements
        Tag::Emphasis => simple("em"),
        Tag::Strong => simple("strong"),
        Tag::Strikethrough => simple("del"),
        Tag::Superscript => simple("sup"),
        Tag::Subscript => simple("sub"),
        Tag::Link {
            dest_url, title, ..
        } => {
            let mut attrs = vec![("href".to_string(), dest_url.to_string())];
            if !title.is_empty() {
                attrs.push(("title".to_string(), title.to_string()));
            }
            ("a".to_string(), attrs)
        }
        Tag::Image {
            dest_url, title, ..
        } => {
            let mut attrs = vec![("src".to_string(), dest_url.to_string())];
            if !title.is_empty() {
                attrs.push(("title".to_string(), title.to_string()));
            }
            // alt text arrives as children and is dropped by the void render
            ("img".to_string(), attrs)
        }

        // Definition list (extended syntax)
        Tag::DefinitionList => simple("dl"),
        Tag::DefinitionListTitle => simple("dt"),
        Tag::DefinitionListDefinition => simple("dd"),

        // Transparent wrappers: contents are spliced into the parent
        Tag::HtmlBlock => simple(""),
        Tag::MetadataBlock(_) => simple(""),
    }
}

/// Convert heading level to tag name
fn heading_level_to_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

/// Convert a markdown string to the top-level nodes of its HTML tree
pub fn from_markdown(markdown: &str, options: &MarkdownOptions) -> Vec<Node> {
    Converter::new().convert(markdown, options)
}
