use crate::app::state::AppState;
use crate::media::local::{ClipSource, LocalMedia};
use crate::media::MediaResource;
use crate::player::PlaybackController;
use crate::ui::tui::{drag_ratio, hit_test, Tui, UiLayout};
use crate::utils::input::{map_key, map_mouse, Action};
use anyhow::Result;
use crossterm::event::{self, Event};
use std::time::{Duration, Instant};

pub fn run(app: &mut AppState, source: Option<ClipSource>) -> Result<()> {
    let every = Duration::from_millis(app.config.time_update_ms.max(15));
    let mut media = LocalMedia::new(source, every);

    match media.source() {
        Some(src) => {
            app.player.title = src.label();
            // a failed preload is retried (and reported) by the first play
            if let Err(e) = media.preload() {
                log::warn!("preload failed: {e}");
                app.set_toast(format!("Cannot load clip: {e}"));
            }
        }
        None => {
            app.player.title = "No clip".to_string();
            app.set_toast("No clip: pass a file or URL, or set `source` in config.toml");
        }
    }

    let mut player = PlaybackController::new(media);

    let mut tui = Tui::new()?;
    tui.enter()?;
    let res = frame_loop(app, &mut player, &mut tui);
    player.dispose();
    tui.exit()?;
    res
}

fn frame_loop<M: MediaResource>(
    app: &mut AppState,
    player: &mut PlaybackController<M>,
    tui: &mut Tui,
) -> Result<()> {
    let mut last_layout = UiLayout::default();

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::from_millis(0))? {
            let action = match event::read()? {
                Event::Key(k) => map_key(k),
                Event::Mouse(m) => map_mouse(m),
                _ => Action::None,
            };
            handle_action(app, player, action, &last_layout);
        }

        player.poll();
        if let Some(msg) = player.take_notice() {
            app.set_toast(msg);
        }
        app.player.sync_from(player);

        app.tick(frame_start);
        last_layout = tui.draw(app)?;

        if app.should_quit {
            return Ok(());
        }

        // frame pacing
        let frame_dt = fps_to_dt(app.config.ui_fps);
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dt {
            std::thread::sleep(frame_dt - elapsed);
        }
    }
}

fn fps_to_dt(fps: u32) -> Duration {
    let fps = fps.clamp(30, 60);
    Duration::from_millis((1000 / fps) as u64)
}

pub fn handle_action<M: MediaResource>(
    app: &mut AppState,
    player: &mut PlaybackController<M>,
    action: Action,
    layout: &UiLayout,
) {
    let step = app.config.seek_step_secs.abs();
    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::TogglePlayPause => {
            player.toggle();
        }
        Action::SeekBackward => player.seek_by(-step),
        Action::SeekForward => player.seek_by(step),
        Action::SeekStart => player.seek(0.0),
        Action::SeekToFraction(ratio) => {
            player.seek_to_fraction(ratio);
        }
        Action::MouseClick { col, row } => {
            if let Some(hit) = hit_test(layout, col, row) {
                app.scrubbing = matches!(hit, Action::SeekToFraction(_));
                handle_action(app, player, hit, layout);
            }
        }
        Action::MouseDrag { col, .. } => {
            if app.scrubbing {
                if let Some(ratio) = drag_ratio(layout, col) {
                    player.seek_to_fraction(ratio);
                }
            }
        }
        Action::MouseRelease => {
            app.scrubbing = false;
        }
        Action::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::config::Config;
    use crate::data::theme_loader::ThemeLoader;
    use crate::media::scripted::{Instruction, ScriptedMedia};
    use crate::ui::player_panel;
    use ratatui::layout::Rect;

    fn setup() -> (AppState, PlaybackController<ScriptedMedia>, UiLayout) {
        let app = AppState::new(Config::default(), ThemeLoader::load("mocha"));
        let player = PlaybackController::new(ScriptedMedia::new(100.0));
        let full = Rect { x: 0, y: 0, width: 80, height: 24 };
        let layout = UiLayout { full, panel: player_panel::layout(full) };
        (app, player, layout)
    }

    #[test]
    fn clicking_the_control_toggles() {
        let (mut app, mut player, layout) = setup();
        let c = layout.panel.control;
        handle_action(&mut app, &mut player, Action::MouseClick { col: c.x, row: c.y }, &layout);
        assert!(player.is_playing());
        assert!(!app.scrubbing);
    }

    #[test]
    fn drag_after_track_click_keeps_seeking() {
        let (mut app, mut player, layout) = setup();
        let t = layout.panel.progress;

        handle_action(&mut app, &mut player, Action::MouseClick { col: t.x, row: t.y }, &layout);
        assert!(app.scrubbing);
        assert_eq!(player.media().last(), Some(Instruction::Seek(0.0)));

        let end = t.x + t.width + 5;
        handle_action(&mut app, &mut player, Action::MouseDrag { col: end, row: 0 }, &layout);
        assert_eq!(player.media().last(), Some(Instruction::Seek(100.0)));

        handle_action(&mut app, &mut player, Action::MouseRelease, &layout);
        assert!(!app.scrubbing);
        let before = player.media().log.len();
        handle_action(&mut app, &mut player, Action::MouseDrag { col: t.x, row: t.y }, &layout);
        assert_eq!(player.media().log.len(), before);
    }

    #[test]
    fn keyboard_nudges_use_configured_step() {
        let (mut app, mut player, layout) = setup();
        app.config.seek_step_secs = 2.5;
        player.handle_event(crate::media::MediaEvent::TimeUpdate(10.0));

        handle_action(&mut app, &mut player, Action::SeekForward, &layout);
        assert_eq!(player.media().last(), Some(Instruction::Seek(12.5)));
        handle_action(&mut app, &mut player, Action::SeekBackward, &layout);
        assert_eq!(player.media().last(), Some(Instruction::Seek(7.5)));
        handle_action(&mut app, &mut player, Action::SeekStart, &layout);
        assert_eq!(player.media().last(), Some(Instruction::Seek(0.0)));
    }

    #[test]
    fn quit_sets_flag() {
        let (mut app, mut player, layout) = setup();
        handle_action(&mut app, &mut player, Action::Quit, &layout);
        assert!(app.should_quit);
    }

    #[test]
    fn fps_is_clamped() {
        assert_eq!(fps_to_dt(1000), Duration::from_millis(16));
        assert_eq!(fps_to_dt(1), Duration::from_millis(33));
    }
}
