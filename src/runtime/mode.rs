use super::frontend::{ScrollAction, UserInputEvent};
use super::update::UiUpdate;
use crate::commands::CommandPipeline;
use crate::pretty::route_command;
use crate::state::{Session, SessionPhase};
use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Owns the current session snapshot and turns user events into new ones.
/// Network work runs on spawned tasks and reports back through `UiUpdate`.
pub struct ShellMode {
    session: Session,
    pipeline: CommandPipeline,
    update_tx: mpsc::UnboundedSender<UiUpdate>,
    settle_delay: Duration,
    browser: String,
    fill_pending: bool,
    scroll_from_bottom: usize,
    notice: Option<String>,
    quit: bool,
}

impl ShellMode {
    pub fn new(
        session: Session,
        pipeline: CommandPipeline,
        update_tx: mpsc::UnboundedSender<UiUpdate>,
        settle_delay: Duration,
        browser: String,
    ) -> Self {
        Self {
            session,
            pipeline,
            update_tx,
            settle_delay,
            browser,
            fill_pending: false,
            scroll_from_bottom: 0,
            notice: None,
            quit: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn origin(&self) -> &str {
        self.pipeline.origin()
    }

    pub fn scroll_from_bottom(&self) -> usize {
        self.scroll_from_bottom
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// True while input is locked: executing, or waiting out a fill's settle delay.
    pub fn is_busy(&self) -> bool {
        self.fill_pending || self.session.is_executing()
    }

    pub fn status_line(&self) -> String {
        let phase = match (self.session.phase(), self.fill_pending) {
            (SessionPhase::Executing, _) => "executing",
            (SessionPhase::Idle, true) => "queued",
            (SessionPhase::Idle, false) => "idle",
        };
        let view = if self.scroll_from_bottom == 0 {
            "following"
        } else {
            "scrolled"
        };
        format!(
            "termfolio  origin:{}  state:{phase}  view:{view}",
            self.origin()
        )
    }

    pub fn on_user_event(&mut self, event: UserInputEvent) {
        match event {
            UserInputEvent::Quit => self.quit = true,
            UserInputEvent::Scroll(action) => self.scroll(action),
            UserInputEvent::LinkClicked(url) => self.open_link(&url),
            _ if self.is_busy() => {}
            UserInputEvent::TextChanged(text) => {
                self.notice = None;
                self.replace(self.session.update_command(&text));
            }
            UserInputEvent::Tab => self.replace(self.session.accept_suggestion()),
            UserInputEvent::Cycle(direction) => {
                self.replace(self.session.cycle_command(direction));
            }
            UserInputEvent::Submit => self.submit(),
            UserInputEvent::SuggestionClicked => {
                let suggestion = self
                    .session
                    .live_line()
                    .filter(|line| line.visible_suggestion().is_some())
                    .map(|line| line.suggestion.clone());
                if let Some(command) = suggestion {
                    self.fill_and_execute(&command);
                }
            }
            UserInputEvent::RouteClicked(route) => {
                let command = route_command(self.origin(), &route);
                self.fill_and_execute(&command);
            }
        }
    }

    pub fn on_update(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::CommandResolved(outcome) => {
                self.replace(self.session.finish_execution(&outcome));
                self.scroll_from_bottom = 0;
            }
            UiUpdate::SettleElapsed => {
                self.fill_pending = false;
                self.submit();
            }
        }
    }

    fn replace(&mut self, next: Session) {
        self.session = next;
    }

    fn submit(&mut self) {
        let Some((executing, command)) = self.session.begin_execution() else {
            return;
        };
        self.session = executing;
        self.scroll_from_bottom = 0;

        let pipeline = self.pipeline.clone();
        let update_tx = self.update_tx.clone();
        tokio::spawn(async move {
            let outcome = pipeline.execute(&command).await;
            let _ = update_tx.send(UiUpdate::CommandResolved(outcome));
        });
    }

    fn fill_and_execute(&mut self, command: &str) {
        self.session = self.session.fill_command(command);
        if self.settle_delay.is_zero() {
            self.submit();
            return;
        }

        self.fill_pending = true;
        let delay = self.settle_delay;
        let update_tx = self.update_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = update_tx.send(UiUpdate::SettleElapsed);
        });
    }

    fn open_link(&mut self, url: &str) {
        match spawn_browser(&self.browser, url) {
            Ok(_) => {
                tracing::info!(url, browser = %self.browser, "opened external link");
                self.notice = Some(format!("opened {url}"));
            }
            Err(error) => {
                tracing::warn!(url, browser = %self.browser, error = %error, "failed to open link");
                self.notice = Some(format!("could not open {url} with {}: {error}", self.browser));
            }
        }
    }

    fn scroll(&mut self, action: ScrollAction) {
        self.scroll_from_bottom = match action {
            ScrollAction::LineUp => self.scroll_from_bottom.saturating_add(1),
            ScrollAction::LineDown => self.scroll_from_bottom.saturating_sub(1),
            ScrollAction::PageUp(rows) => self.scroll_from_bottom.saturating_add(rows),
            ScrollAction::PageDown(rows) => self.scroll_from_bottom.saturating_sub(rows),
            ScrollAction::Home => usize::MAX,
            ScrollAction::End => 0,
        };
    }
}

/// Launches `browser url` detached from the terminal and reaps it on a
/// background task so finished launchers never linger as zombies.
fn spawn_browser(browser: &str, url: &str) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = Command::new(browser)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(tokio::spawn(async move {
        let status = child.wait().await;
        if let Err(error) = &status {
            tracing::warn!(error = %error, "browser process wait failed");
        }
        status
    }))
}
