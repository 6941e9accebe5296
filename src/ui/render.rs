use crate::pretty::{self, Affordance, SegmentStyle};
use crate::runtime::UserInputEvent;
use crate::state::{InputLine, Line as SessionLine, ResultKind, ResultLine, Session};
use crate::ui::input_metrics::{
    char_display_width, display_width, truncate_to_display_width, wrap_text_lines,
};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub const PROMPT: &str = "$ ";

/// What a mouse click on a span resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    AcceptSuggestion,
    Route(String),
    ExternalLink(String),
}

impl ClickTarget {
    pub fn into_event(self) -> UserInputEvent {
        match self {
            ClickTarget::AcceptSuggestion => UserInputEvent::SuggestionClicked,
            ClickTarget::Route(route) => UserInputEvent::RouteClicked(route),
            ClickTarget::ExternalLink(url) => UserInputEvent::LinkClicked(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowSpan {
    pub text: String,
    pub style: Style,
    pub target: Option<ClickTarget>,
}

impl RowSpan {
    fn plain(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            target: None,
        }
    }
}

/// One screen row of the transcript.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptRow {
    pub spans: Vec<RowSpan>,
    pub live_input: bool,
}

impl TranscriptRow {
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Column-accurate lookup of the clickable span under `col`.
    pub fn target_at(&self, col: usize) -> Option<&ClickTarget> {
        let mut start = 0usize;
        for span in &self.spans {
            let end = start + display_width(&span.text);
            if col >= start && col < end {
                return span.target.as_ref();
            }
            start = end;
        }
        None
    }
}

fn prompt_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

fn suggestion_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

fn segment_style(style: SegmentStyle, affordance: bool) -> Style {
    let base = match style {
        SegmentStyle::Punctuation => Style::default().fg(Color::White),
        SegmentStyle::Key => Style::default().fg(Color::Blue),
        SegmentStyle::Literal => Style::default().fg(Color::Green),
    };
    if affordance {
        base.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)
    } else {
        base
    }
}

/// Flattens the session into rows. Plain text wraps to `width`; structured
/// values keep their tree layout and are clipped by the viewport instead.
pub fn transcript_rows(session: &Session, width: usize) -> Vec<TranscriptRow> {
    let mut rows = Vec::new();
    for line in session.lines() {
        match line {
            SessionLine::Input(input) => rows.push(input_row(input)),
            SessionLine::Result(result) => push_result_rows(&mut rows, result, width),
        }
    }
    rows
}

fn input_row(input: &InputLine) -> TranscriptRow {
    let mut spans = vec![
        RowSpan::plain(PROMPT, prompt_style()),
        RowSpan::plain(input.command.clone(), Style::default()),
    ];
    if let Some(rest) = input.visible_suggestion() {
        spans.push(RowSpan {
            text: rest,
            style: suggestion_style(),
            target: Some(ClickTarget::AcceptSuggestion),
        });
    }
    TranscriptRow {
        spans,
        live_input: input.editable,
    }
}

fn push_result_rows(rows: &mut Vec<TranscriptRow>, result: &ResultLine, width: usize) {
    if result.kind == ResultKind::StructuredValue {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&result.payload) {
            rows.extend(pretty::render(&value).lines.into_iter().map(tree_row));
            return;
        }
        tracing::debug!(id = result.id, "structured payload did not parse, showing raw text");
    }

    let style = match result.kind {
        ResultKind::PlainText => Style::default().fg(Color::Yellow),
        ResultKind::StructuredValue => Style::default(),
    };
    for text in wrap_text_lines(&result.payload, width) {
        rows.push(TranscriptRow {
            spans: vec![RowSpan::plain(text, style)],
            live_input: false,
        });
    }
}

fn tree_row(line: pretty::RenderLine) -> TranscriptRow {
    let spans = line
        .segments
        .into_iter()
        .map(|segment| {
            let target = segment.affordance.map(|affordance| match affordance {
                Affordance::Route(route) => ClickTarget::Route(route),
                Affordance::ExternalLink(url) => ClickTarget::ExternalLink(url),
            });
            RowSpan {
                style: segment_style(segment.style, target.is_some()),
                text: segment.text,
                target,
            }
        })
        .collect();
    TranscriptRow {
        spans,
        live_input: false,
    }
}

/// Index of the first visible row when the view sits `scroll_from_bottom`
/// rows above the tail. Oversized offsets clamp to the top.
pub fn visible_top(total: usize, height: usize, scroll_from_bottom: usize) -> usize {
    total
        .saturating_sub(height)
        .saturating_sub(scroll_from_bottom)
}

/// Maps a click at terminal cell (`col`, `row`) to the event it triggers.
pub fn hit_test(
    rows: &[TranscriptRow],
    top: usize,
    area: Rect,
    col: u16,
    row: u16,
) -> Option<UserInputEvent> {
    if !area.contains(Position::new(col, row)) {
        return None;
    }
    let index = top + usize::from(row - area.y);
    let target = rows.get(index)?.target_at(usize::from(col - area.x))?;
    Some(target.clone().into_event())
}

/// Screen position of the caret on the live row, if that row is on screen.
/// `cursor` is a byte offset into the live command.
pub fn caret_position(
    rows: &[TranscriptRow],
    top: usize,
    area: Rect,
    command: &str,
    cursor: usize,
) -> Option<(u16, u16)> {
    let index = rows.iter().rposition(|row| row.live_input)?;
    if index < top || index - top >= usize::from(area.height) {
        return None;
    }
    let prefix = command.get(..cursor).unwrap_or(command);
    let col = display_width(PROMPT) + display_width(prefix);
    let x = area
        .x
        .saturating_add(u16::try_from(col).unwrap_or(u16::MAX))
        .min(area.right().saturating_sub(1));
    let y = area.y + u16::try_from(index - top).unwrap_or(0);
    Some((x, y))
}

pub fn render_transcript(
    frame: &mut Frame<'_>,
    area: Rect,
    rows: &[TranscriptRow],
    top: usize,
    caret: Option<(u16, u16)>,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let visible: Vec<Line<'_>> = rows
        .iter()
        .skip(top)
        .take(usize::from(area.height))
        .map(|row| {
            Line::from(
                row.spans
                    .iter()
                    .map(|span| Span::styled(span.text.as_str(), span.style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(visible), area);

    if let Some(position) = caret {
        frame.set_cursor_position(position);
    }
}

pub fn render_status_line(frame: &mut Frame<'_>, area: Rect, status: &str) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let text = truncate_line(status, area.width as usize);
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn truncate_line(input: &str, width: usize) -> String {
    let width = width.max(1);
    let mut out = String::new();
    let mut used = 0usize;
    let mut truncated = false;

    for ch in input.chars() {
        let ch_width = char_display_width(ch);
        if used + ch_width > width {
            truncated = true;
            break;
        }
        out.push(ch);
        used += ch_width;
    }

    if truncated && width >= 4 {
        out = truncate_to_display_width(&out, width - 3);
        out.push_str("...");
    }
    out
}
