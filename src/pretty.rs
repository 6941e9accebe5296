use serde_json::Value;

const INDENT: &str = "  ";
/// Strings with this prefix are internal routes the shell can re-fetch.
pub const ROUTE_PREFIX: &str = "/me/";
const EXTERNAL_PREFIXES: [&str; 2] = ["http", "mailto"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affordance {
    /// Opened by the presentation layer, never fetched by the shell.
    ExternalLink(String),
    /// Re-enters the shell as `curl <origin>/api<route>`.
    Route(String),
}

impl Affordance {
    fn classify(text: &str) -> Option<Self> {
        if EXTERNAL_PREFIXES
            .iter()
            .any(|prefix| text.starts_with(prefix))
        {
            return Some(Self::ExternalLink(text.to_string()));
        }
        if text.starts_with(ROUTE_PREFIX) {
            return Some(Self::Route(text.to_string()));
        }
        None
    }
}

/// Command that fetches an internal route from the allowed origin.
pub fn route_command(origin: &str, route: &str) -> String {
    format!("curl {origin}/api{route}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStyle {
    Punctuation,
    Key,
    Literal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: SegmentStyle,
    pub affordance: Option<Affordance>,
}

impl Segment {
    fn new(text: impl Into<String>, style: SegmentStyle) -> Self {
        Self {
            text: text.into(),
            style,
            affordance: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderLine {
    pub segments: Vec<Segment>,
}

impl RenderLine {
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderTree {
    pub lines: Vec<RenderLine>,
}

impl RenderTree {
    /// The tree without affordances: always valid, re-parseable JSON.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(RenderLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn affordances(&self) -> impl Iterator<Item = &Affordance> {
        self.lines
            .iter()
            .flat_map(|line| line.segments.iter())
            .filter_map(|segment| segment.affordance.as_ref())
    }

    fn push(&mut self, segment: Segment) {
        if self.lines.is_empty() {
            self.lines.push(RenderLine::default());
        }
        if let Some(line) = self.lines.last_mut() {
            line.segments.push(segment);
        }
    }

    fn push_punct(&mut self, text: impl Into<String>) {
        self.push(Segment::new(text, SegmentStyle::Punctuation));
    }

    fn newline(&mut self, indent_level: usize) {
        self.lines.push(RenderLine::default());
        if indent_level > 0 {
            self.push_punct(INDENT.repeat(indent_level));
        }
    }
}

/// Renders a decoded value as an indented tree, two spaces per level.
pub fn render(value: &Value) -> RenderTree {
    let mut tree = RenderTree::default();
    render_value(&mut tree, value, 0, false);
    tree
}

fn render_value(tree: &mut RenderTree, value: &Value, indent_level: usize, has_trailing: bool) {
    match value {
        Value::String(text) => push_string(tree, text, SegmentStyle::Literal, true),
        Value::Number(number) => tree.push(Segment::new(number.to_string(), SegmentStyle::Literal)),
        Value::Bool(flag) => tree.push(Segment::new(flag.to_string(), SegmentStyle::Literal)),
        Value::Null => tree.push(Segment::new("null", SegmentStyle::Literal)),
        Value::Array(items) if items.is_empty() => tree.push_punct("[]"),
        Value::Object(entries) if entries.is_empty() => tree.push_punct("{}"),
        Value::Array(items) => {
            tree.push_punct("[");
            for (idx, item) in items.iter().enumerate() {
                tree.newline(indent_level + 1);
                render_value(tree, item, indent_level + 1, idx + 1 < items.len());
            }
            tree.newline(indent_level);
            tree.push_punct("]");
        }
        Value::Object(entries) => {
            tree.push_punct("{");
            for (idx, (key, item)) in entries.iter().enumerate() {
                tree.newline(indent_level + 1);
                push_string(tree, key, SegmentStyle::Key, false);
                tree.push_punct(": ");
                render_value(tree, item, indent_level + 1, idx + 1 < entries.len());
            }
            tree.newline(indent_level);
            tree.push_punct("}");
        }
    }

    if has_trailing {
        tree.push_punct(",");
    }
}

fn push_string(tree: &mut RenderTree, text: &str, style: SegmentStyle, allow_affordance: bool) {
    let quoted = Value::String(text.to_string()).to_string();
    let inner = &quoted[1..quoted.len() - 1];
    let affordance = if allow_affordance {
        Affordance::classify(text)
    } else {
        None
    };

    tree.push(Segment::new("\"", style));
    tree.push(Segment {
        text: inner.to_string(),
        style,
        affordance,
    });
    tree.push(Segment::new("\"", style));
}
