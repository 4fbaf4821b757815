use crate::app::state::AppState;
use crate::ui::components::progress_bar::knob_column;
use crate::ui::theme::Role;
use crate::utils::timefmt::mmss;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const LABEL_W: u16 = 5;

/// Left edge of a label centered under the knob, kept inside `track`.
pub fn label_x(track: Rect, ratio: f32) -> u16 {
    if track.width <= LABEL_W {
        return track.x;
    }
    let knob = knob_column(track.width as usize, ratio) as u16;
    let max_x = track.x + track.width - LABEL_W;
    (track.x + knob).saturating_sub(LABEL_W / 2).clamp(track.x, max_x)
}

pub fn render(f: &mut Frame, track: Rect, app: &AppState) {
    if track.width == 0 || track.height == 0 {
        return;
    }

    let ratio = app.player.ratio().unwrap_or(0.0);
    let x = label_x(track, ratio);
    let area = Rect {
        x,
        y: track.y,
        width: LABEL_W.min(track.width),
        height: 1,
    };

    let label = Span::styled(
        mmss(app.player.position),
        app.theme.fg(Role::Muted).add_modifier(Modifier::BOLD),
    );
    f.render_widget(Paragraph::new(label), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(x: u16, width: u16) -> Rect {
        Rect { x, y: 3, width, height: 1 }
    }

    #[test]
    fn label_centers_on_knob() {
        // knob at column 10 of 21 -> label starts two cells left of it
        assert_eq!(label_x(track(4, 21), 0.5), 4 + 10 - 2);
    }

    #[test]
    fn label_stays_inside_track() {
        assert_eq!(label_x(track(4, 21), 0.0), 4);
        assert_eq!(label_x(track(4, 21), 1.0), 4 + 21 - 5);
        assert_eq!(label_x(track(4, 3), 0.9), 4);
    }
}
