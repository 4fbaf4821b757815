use crate::data::config::Config;
use crate::media::MediaResource;
use crate::player::PlaybackController;
use crate::ui::theme::Theme;
use std::time::{Duration, Instant};

const TOAST_TTL: Duration = Duration::from_millis(2500);

/// What the frame needs from the controller, copied once per frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerView {
    pub playing: bool,
    pub position: f64,
    pub duration: Option<f64>,
    pub title: String,
}

impl PlayerView {
    pub fn sync_from<M: MediaResource>(&mut self, ctl: &PlaybackController<M>) {
        self.playing = ctl.is_playing();
        self.position = ctl.position();
        self.duration = ctl.slider_range().map(|r| *r.end());
    }

    /// Knob position on the scrub bar, `None` while the range is unknown.
    pub fn ratio(&self) -> Option<f32> {
        let d = self.duration?;
        if d <= 0.0 {
            return Some(0.0);
        }
        Some((self.position / d).clamp(0.0, 1.0) as f32)
    }
}

#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub theme: Theme,

    pub player: PlayerView,

    // set while a left-button drag started on the scrub bar
    pub scrubbing: bool,

    pub toast: Option<(String, Instant)>,
    pub should_quit: bool,

    pub last_frame: Instant,
}

impl AppState {
    pub fn new(config: Config, theme: Theme) -> Self {
        Self {
            config,
            theme,
            player: PlayerView::default(),
            scrubbing: false,
            toast: None,
            should_quit: false,
            last_frame: Instant::now(),
        }
    }

    pub fn set_toast(&mut self, msg: impl Into<String>) {
        self.toast = Some((msg.into(), Instant::now()));
    }

    pub fn tick(&mut self, now: Instant) {
        self.last_frame = now;

        if let Some((_, at)) = &self.toast {
            if now.duration_since(*at) > TOAST_TTL {
                self.toast = None;
            }
        }
    }
}
