use crate::app::state::AppState;
use crate::ui::player_panel::{self, PlayerPanelLayout};
use crate::ui::theme::Role;
use crate::utils::input::Action;
use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Terminal;
use std::io::{self, Stdout};

const MIN_W: u16 = 44;
const MIN_H: u16 = 9;

#[derive(Debug, Default, Clone, Copy)]
pub struct UiLayout {
    pub full: Rect,
    pub panel: PlayerPanelLayout,
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, event::EnableMouseCapture)?;
        self.terminal.hide_cursor()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(io::stdout(), event::DisableMouseCapture, LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    pub fn draw(&mut self, app: &AppState) -> Result<UiLayout> {
        let mut layout_out = UiLayout::default();

        self.terminal.draw(|f| {
            let size = f.size();
            layout_out.full = size;

            f.render_widget(Clear, size);
            let mut base_style = app.theme.fg(Role::Text);
            if !app.config.transparent_background {
                base_style = base_style.bg(app.theme.color(Role::Background));
            }
            f.render_widget(Block::default().style(base_style), size);

            // small terminal: no controls, so no hit areas either
            if size.width < MIN_W || size.height < MIN_H {
                f.render_widget(
                    Paragraph::new("Terminal too small")
                        .style(app.theme.fg(Role::Muted)),
                    size,
                );
                return;
            }

            layout_out.panel = player_panel::render(f, size, app);

            let footer = "Space: Play/Pause  ←/→: Seek  Home: Start  Q: Quit";
            let footer_area = Rect {
                x: size.x,
                y: size.y + size.height.saturating_sub(1),
                width: size.width,
                height: 1,
            };
            f.render_widget(
                Paragraph::new(footer).style(app.theme.fg(Role::Muted)),
                footer_area,
            );

            if let Some((msg, _)) = &app.toast {
                let area = Rect {
                    x: size.x,
                    y: size.y,
                    width: size.width,
                    height: 1,
                };
                f.render_widget(
                    Paragraph::new(msg.as_str()).style(app.theme.fg(Role::Notice)),
                    area,
                );
            }
        })?;

        Ok(layout_out)
    }
}

pub fn hit_test(layout: &UiLayout, col: u16, row: u16) -> Option<Action> {
    let p = &layout.panel;
    if contains(p.control, col, row) {
        return Some(Action::TogglePlayPause);
    }
    if contains(p.progress, col, row) || contains(p.mark, col, row) {
        return Some(Action::SeekToFraction(ratio_in_track(p.progress, col)));
    }
    None
}

/// Seek ratio for a drag that started on the track; the pointer may leave it.
pub fn drag_ratio(layout: &UiLayout, col: u16) -> Option<f32> {
    let track = layout.panel.progress;
    if track.width == 0 {
        return None;
    }
    Some(ratio_in_track(track, col))
}

fn contains(r: Rect, col: u16, row: u16) -> bool {
    col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

fn ratio_in_track(r: Rect, col: u16) -> f32 {
    if r.width <= 1 {
        return 0.0;
    }
    let denom = (r.width - 1) as f32;
    let x = col.saturating_sub(r.x) as f32;
    (x / denom).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_layout() -> UiLayout {
        UiLayout {
            full: Rect { x: 0, y: 0, width: 80, height: 24 },
            panel: player_panel::layout(Rect { x: 0, y: 0, width: 80, height: 24 }),
        }
    }

    #[test]
    fn control_click_toggles() {
        let l = sample_layout();
        let c = l.panel.control;
        assert_eq!(hit_test(&l, c.x + 1, c.y), Some(Action::TogglePlayPause));
    }

    #[test]
    fn track_click_maps_ends() {
        let l = sample_layout();
        let t = l.panel.progress;
        assert_eq!(hit_test(&l, t.x, t.y), Some(Action::SeekToFraction(0.0)));
        assert_eq!(
            hit_test(&l, t.x + t.width - 1, t.y),
            Some(Action::SeekToFraction(1.0))
        );
    }

    #[test]
    fn clicks_elsewhere_do_nothing() {
        let l = sample_layout();
        assert_eq!(hit_test(&l, 0, 0), None);
        assert_eq!(hit_test(&l, l.panel.readout.x, l.panel.readout.y), None);
    }

    #[test]
    fn drag_clamps_outside_track() {
        let l = sample_layout();
        let t = l.panel.progress;
        assert_eq!(drag_ratio(&l, 0), Some(0.0));
        assert_eq!(drag_ratio(&l, t.x + t.width + 20), Some(1.0));
        assert_eq!(drag_ratio(&UiLayout::default(), 5), None);
    }
}
