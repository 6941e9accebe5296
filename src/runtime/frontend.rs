use super::mode::ShellMode;
use crate::state::CycleDirection;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAction {
    LineUp,
    LineDown,
    PageUp(usize),
    PageDown(usize),
    Home,
    End,
}

/// The presentation layer's view of user actions. The first five map one to
/// one onto session callbacks; the rest are affordances and chrome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserInputEvent {
    TextChanged(String),
    Tab,
    Cycle(CycleDirection),
    Submit,
    SuggestionClicked,
    RouteClicked(String),
    LinkClicked(String),
    Scroll(ScrollAction),
    Quit,
}

pub trait FrontendAdapter {
    fn poll_user_input(&mut self, mode: &ShellMode) -> Option<UserInputEvent>;
    fn render(&mut self, mode: &ShellMode);
    fn should_quit(&self) -> bool;
}
