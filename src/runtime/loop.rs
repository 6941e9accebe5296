use super::frontend::FrontendAdapter;
use super::mode::ShellMode;
use super::update::UiUpdate;
use tokio::sync::mpsc;

pub struct Runtime {
    pub mode: ShellMode,
    update_rx: mpsc::UnboundedReceiver<UiUpdate>,
}

impl Runtime {
    pub fn new(mode: ShellMode, update_rx: mpsc::UnboundedReceiver<UiUpdate>) -> Self {
        Self { mode, update_rx }
    }

    /// One tick: apply finished background work, draw, then handle at most
    /// one user event. Runs until the frontend or the mode asks to quit.
    pub async fn run<F: FrontendAdapter>(&mut self, frontend: &mut F) {
        loop {
            self.drain_updates();
            frontend.render(&self.mode);
            if frontend.should_quit() || self.mode.quit_requested() {
                break;
            }

            match frontend.poll_user_input(&self.mode) {
                Some(event) => self.mode.on_user_event(event),
                None => tokio::task::yield_now().await,
            }
        }
    }

    fn drain_updates(&mut self) {
        while let Ok(update) = self.update_rx.try_recv() {
            self.mode.on_update(update);
        }
    }
}
