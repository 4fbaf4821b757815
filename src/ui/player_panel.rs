use crate::app::state::AppState;
use crate::ui::borders::ROUNDED_BORDER;
use crate::ui::components::{play_button, progress_bar, time_mark};
use crate::ui::theme::Role;
use crate::utils::timefmt::mmss;
use ratatui::layout::{Alignment, Margin, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const CARD_MAX_W: u16 = 76;
const CARD_H: u16 = 7;
const CONTROL_W: u16 = 5;
const READOUT_W: u16 = 13; // "mm:ss / mm:ss"

#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerPanelLayout {
    pub card: Rect,
    pub title: Rect,
    pub control: Rect,
    pub progress: Rect,
    pub mark: Rect,
    pub readout: Rect,
}

pub fn layout(area: Rect) -> PlayerPanelLayout {
    let w = area.width.saturating_sub(4).min(CARD_MAX_W);
    let h = CARD_H.min(area.height);
    let card = Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    };
    let inner = card.inner(&Margin { horizontal: 2, vertical: 1 });

    let title = Rect { height: 1u16.min(inner.height), ..inner };
    let row_y = inner.y + 2;

    let control = Rect { x: inner.x, y: row_y, width: CONTROL_W.min(inner.width), height: 1 };

    let readout_w = READOUT_W.min(inner.width.saturating_sub(CONTROL_W + 2));
    let readout = Rect {
        x: inner.x + inner.width - readout_w,
        y: row_y,
        width: readout_w,
        height: 1,
    };

    let progress_x = control.x + control.width + 2;
    let progress_w = readout.x.saturating_sub(progress_x + 2);
    let progress = Rect { x: progress_x, y: row_y, width: progress_w, height: 1 };
    let mark = Rect { y: row_y + 1, ..progress };

    PlayerPanelLayout {
        card,
        title,
        control,
        progress,
        mark,
        readout,
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) -> PlayerPanelLayout {
    let l = layout(area);

    let mut card_style = app.theme.fg(Role::Muted);
    if !app.config.transparent_background {
        card_style = card_style.bg(app.theme.color(Role::Card));
    }
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_set(ROUNDED_BORDER)
            .style(card_style),
        l.card,
    );

    f.render_widget(
        Paragraph::new(Span::styled(
            app.player.title.as_str(),
            app.theme.fg(Role::Text),
        ))
        .alignment(Alignment::Left),
        l.title,
    );

    play_button::render(f, l.control, app);
    progress_bar::render(f, l.progress, app);
    time_mark::render(f, l.mark, app);

    let total = app.player.duration.map(mmss).unwrap_or_else(|| "--:--".to_string());
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("{} / {}", mmss(app.player.position), total),
            app.theme.fg(Role::Text),
        ))
        .alignment(Alignment::Right),
        l.readout,
    );

    l
}
