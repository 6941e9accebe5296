use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::widgets::Clear;
use std::time::Duration;
use termfolio::app::build_runtime;
use termfolio::config::Config;
use termfolio::logging;
use termfolio::runtime::{FrontendAdapter, ScrollAction, ShellMode, UserInputEvent};
use termfolio::terminal;
use termfolio::ui::editor::LineEditor;
use termfolio::ui::layout::split_shell_layout;
use termfolio::ui::render::{
    caret_position, hit_test, render_status_line, render_transcript, transcript_rows,
    visible_top, TranscriptRow,
};

const KEY_HINTS: &str =
    "tab accept  enter run  up/down history  pgup/pgdn scroll  click links  ctrl+c quit";

struct ManagedTuiFrontend {
    terminal: terminal::TerminalType,
    editor: LineEditor,
    rows: Vec<TranscriptRow>,
    top: usize,
    transcript_area: Rect,
    quit: bool,
}

impl ManagedTuiFrontend {
    fn new() -> Result<Self> {
        let terminal = terminal::setup()?;
        Self::drain_startup_events();
        Ok(Self {
            terminal,
            editor: LineEditor::new(),
            rows: Vec::new(),
            top: 0,
            transcript_area: Rect::default(),
            quit: false,
        })
    }

    fn drain_startup_events() {
        for _ in 0..1024 {
            match event::poll(Duration::from_millis(0)) {
                Ok(true) => {
                    if event::read().is_err() {
                        break;
                    }
                }
                Ok(false) | Err(_) => break,
            }
        }
    }

    fn map_mouse(&self, mouse: MouseEvent) -> Option<UserInputEvent> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => hit_test(
                &self.rows,
                self.top,
                self.transcript_area,
                mouse.column,
                mouse.row,
            ),
            MouseEventKind::ScrollUp => Some(UserInputEvent::Scroll(ScrollAction::LineUp)),
            MouseEventKind::ScrollDown => Some(UserInputEvent::Scroll(ScrollAction::LineDown)),
            _ => None,
        }
    }
}

impl Drop for ManagedTuiFrontend {
    fn drop(&mut self) {
        let _ = terminal::restore();
    }
}

impl FrontendAdapter for ManagedTuiFrontend {
    fn poll_user_input(&mut self, mode: &ShellMode) -> Option<UserInputEvent> {
        if mode.quit_requested() {
            self.quit = true;
            return None;
        }

        let Ok(has_event) = event::poll(Duration::from_millis(16)) else {
            self.quit = true;
            return None;
        };
        if !has_event {
            return None;
        }

        let Ok(ev) = event::read() else {
            self.quit = true;
            return None;
        };

        let live = mode.session().live_command().to_string();
        match ev {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return None;
                }
                self.editor.map_key(&live, key)
            }
            Event::Paste(text) => {
                if text.contains('\u{1b}') {
                    return None;
                }
                self.editor.insert_str(&live, &text)
            }
            Event::Mouse(mouse) => self.map_mouse(mouse),
            _ => None,
        }
    }

    fn render(&mut self, mode: &ShellMode) {
        let session = mode.session();
        self.editor
            .sync(session.live_line(), session.refocus_signal());

        let status = mode.status_line();
        let footer = mode.notice().unwrap_or(KEY_HINTS).to_string();
        let live = session.live_command();
        let cursor = self.editor.cursor();
        let scroll_from_bottom = mode.scroll_from_bottom();

        let Self {
            terminal,
            rows,
            top,
            transcript_area,
            ..
        } = self;
        let _ = terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(Clear, area);
            let panes = split_shell_layout(area);

            *rows = transcript_rows(session, usize::from(panes.transcript.width));
            *top = visible_top(
                rows.len(),
                usize::from(panes.transcript.height),
                scroll_from_bottom,
            );
            *transcript_area = panes.transcript;
            let caret = caret_position(rows.as_slice(), *top, panes.transcript, live, cursor);

            render_status_line(frame, panes.header, &status);
            render_transcript(frame, panes.transcript, rows.as_slice(), *top, caret);
            render_status_line(frame, panes.footer, &footer);
        });
    }

    fn should_quit(&self) -> bool {
        self.quit
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    config.validate()?;
    logging::init()?;

    let mut runtime = build_runtime(config)?;
    let mut frontend = ManagedTuiFrontend::new()?;
    runtime.run(&mut frontend).await;
    tracing::info!("session closed");
    Ok(())
}
