use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShellLayout {
    pub header: Rect,
    pub transcript: Rect,
    pub footer: Rect,
}

pub fn split_shell_layout(area: Rect) -> ShellLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    ShellLayout {
        header: chunks[0],
        transcript: chunks[1],
        footer: chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_splits_into_header_transcript_footer() {
        let area = Rect::new(0, 0, 80, 20);
        let panes = split_shell_layout(area);

        assert_eq!(panes.header.height, 1);
        assert_eq!(panes.transcript.height, 18);
        assert_eq!(panes.footer.height, 1);
        assert_eq!(panes.header.y, 0);
        assert_eq!(panes.transcript.y, 1);
        assert_eq!(panes.footer.y, 19);
    }

    #[test]
    fn layout_keeps_transcript_on_tiny_terminals() {
        let panes = split_shell_layout(Rect::new(0, 0, 40, 3));
        assert_eq!(panes.transcript.height, 1);
    }
}
