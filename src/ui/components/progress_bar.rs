use crate::app::state::AppState;
use crate::ui::theme::Role;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Column of the knob on a bar `width` cells wide; it moves on `[0, width-1]`.
pub fn knob_column(width: usize, ratio: f32) -> usize {
    if width <= 1 {
        return 0;
    }
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    (ratio * (width as f32 - 1.0)).round() as usize
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let w = area.width as usize;
    if w == 0 {
        return;
    }

    // no range yet: flat, knob-less track
    let Some(ratio) = app.player.ratio() else {
        let line = Line::from(Span::styled(
            "┄".repeat(w),
            app.theme.fg(Role::Muted),
        ));
        f.render_widget(Paragraph::new(line), area);
        return;
    };

    let knob = knob_column(w, ratio);
    let left = "━".repeat(knob);
    let right = "─".repeat(w.saturating_sub(1 + knob));

    let line = Line::from(vec![
        Span::styled(left, app.theme.fg(Role::FilledTrack)),
        Span::styled("●", app.theme.fg(Role::Knob)),
        Span::styled(right, app.theme.fg(Role::Muted)),
    ]);

    f.render_widget(Paragraph::new(line), area);
}
