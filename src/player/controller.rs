use crate::media::{ListenerId, MediaEvent, MediaEventKind, MediaResource};
use std::ops::RangeInclusive;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Play/pause flag and tracked position bound to a single media resource.
///
/// The resource is owned for the controller's whole life. Subscriptions made
/// in [`PlaybackController::new`] are removed by [`PlaybackController::dispose`],
/// which also runs on drop.
pub struct PlaybackController<M: MediaResource> {
    media: M,
    playing: bool,
    position: f64,
    notice: Option<String>,

    events: Receiver<MediaEvent>,
    subscriptions: Vec<ListenerId>,
    disposed: bool,
}

impl<M: MediaResource> PlaybackController<M> {
    pub fn new(mut media: M) -> Self {
        let (tx, events) = mpsc::channel();
        let subscriptions = vec![
            media.subscribe(MediaEventKind::TimeUpdate, tx.clone()),
            media.subscribe(MediaEventKind::Ended, tx),
        ];
        let position = finite_or_zero(media.current_time());

        let mut ctl = Self {
            media,
            playing: false,
            position,
            notice: None,
            events,
            subscriptions,
            disposed: false,
        };
        ctl.sync();
        ctl
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// `None` while the media has not reported a duration yet.
    pub fn duration(&self) -> Option<f64> {
        let d = self.media.duration();
        if d.is_finite() && d >= 0.0 {
            Some(d)
        } else {
            None
        }
    }

    pub fn slider_range(&self) -> Option<RangeInclusive<f64>> {
        self.duration().map(|d| 0.0..=d)
    }

    #[cfg(test)]
    pub fn media(&self) -> &M {
        &self.media
    }

    #[cfg(test)]
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
        log::debug!("toggle -> playing={}", self.playing);
        self.sync();
    }

    /// Re-drives the media from the playing flag. The media is paused first
    /// so a failed start never leaves it running.
    fn sync(&mut self) {
        self.media.pause();
        if !self.playing {
            return;
        }
        if let Err(e) = self.media.play() {
            log::warn!("playback failed to start: {e}");
            self.playing = false;
            self.notice = Some(format!("Cannot play: {e}"));
        }
    }

    /// Moves the media to `target` seconds. Non-finite targets are dropped.
    ///
    /// The tracked position is left alone; it follows on the next time update.
    pub fn seek(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }
        let mut target = target.max(0.0);
        if let Some(d) = self.duration() {
            target = target.min(d);
        }
        log::debug!("seek -> {target:.3}s");
        if let Err(e) = self.media.set_current_time(target) {
            log::warn!("seek to {target:.3}s failed: {e}");
            self.notice = Some(format!("Cannot seek: {e}"));
            if self.media.paused() {
                self.playing = false;
            }
        }
    }

    pub fn seek_by(&mut self, delta: f64) {
        self.seek(self.position + delta);
    }

    pub fn seek_to_fraction(&mut self, ratio: f32) {
        let Some(d) = self.duration() else {
            return;
        };
        let ratio = f64::from(ratio);
        if ratio.is_finite() {
            self.seek(ratio.clamp(0.0, 1.0) * d);
        }
    }

    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate(p) => {
                self.position = p;
            }
            MediaEvent::Ended => {
                log::debug!("ended");
                self.playing = false;
                self.media.pause();
            }
        }
    }

    /// Lets the media emit due notifications, then applies them in order.
    pub fn poll(&mut self) {
        self.media.poll();
        self.drain_events();
    }

    pub fn drain_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(ev) => self.handle_event(ev),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.media.pause();
        for id in self.subscriptions.drain(..) {
            if !self.media.unsubscribe(id) {
                log::warn!("listener {id:?} was already detached");
            }
        }
    }
}

impl<M: MediaResource> Drop for PlaybackController<M> {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
