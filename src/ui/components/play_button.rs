use crate::app::state::AppState;
use crate::ui::theme::Role;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn glyph(playing: bool) -> &'static str {
    if playing {
        "[⏸]"
    } else {
        "[⏵]"
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let line = Line::from(vec![Span::styled(
        glyph(app.player.playing),
        app.theme.fg(Role::Control).add_modifier(Modifier::BOLD),
    )]);

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
