use super::{ListenerId, Listeners, MediaError, MediaEvent, MediaEventKind, MediaResource};
use lofty::{AudioFile, Probe};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipSource {
    File(PathBuf),
    Url(String),
}

impl ClipSource {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Some(Self::Url(raw.to_string()))
        } else {
            Some(Self::File(PathBuf::from(raw)))
        }
    }

    pub fn label(&self) -> String {
        match self {
            ClipSource::File(p) => p
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("Unknown")
                .to_string(),
            ClipSource::Url(u) => u.rsplit('/').next().unwrap_or(u).to_string(),
        }
    }
}

struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Sink,
}

/// rodio-backed clip. Bytes are read once and decoded again on every seek.
pub struct LocalMedia {
    source: Option<ClipSource>,
    bytes: Option<Arc<[u8]>>,
    duration: Option<Duration>,
    output: Option<Output>,

    // position tracking
    offset: Duration,
    started_at: Option<Instant>,
    ended: bool,

    time_update_every: Duration,
    last_time_update: Option<Instant>,
    listeners: Listeners,
}

impl LocalMedia {
    pub fn new(source: Option<ClipSource>, time_update_every: Duration) -> Self {
        Self {
            source,
            bytes: None,
            duration: None,
            output: None,
            offset: Duration::ZERO,
            started_at: None,
            ended: false,
            time_update_every,
            last_time_update: None,
            listeners: Listeners::default(),
        }
    }

    pub fn source(&self) -> Option<&ClipSource> {
        self.source.as_ref()
    }

    /// Reads the clip and its metadata without touching the audio device.
    pub fn preload(&mut self) -> Result<(), MediaError> {
        if self.bytes.is_some() {
            return Ok(());
        }
        let source = self.source.as_ref().ok_or(MediaError::NoSource)?;
        let bytes: Arc<[u8]> = match source {
            ClipSource::File(path) => {
                if !path.is_file() {
                    return Err(MediaError::NotFound(path.clone()));
                }
                std::fs::read(path)?.into()
            }
            ClipSource::Url(url) => fetch(url)?.into(),
        };

        // validate up front so a bad clip fails here, not inside the sink
        Decoder::new(Cursor::new(Arc::clone(&bytes)))?;

        self.duration = probe_duration(&bytes);
        log::info!(
            "loaded {} ({} bytes, duration {:?})",
            source.label(),
            bytes.len(),
            self.duration
        );
        self.bytes = Some(bytes);
        Ok(())
    }

    fn position(&self) -> Duration {
        let pos = match self.started_at {
            Some(start) => self.offset + start.elapsed(),
            None => self.offset,
        };
        match self.duration {
            Some(d) => pos.min(d),
            None => pos,
        }
    }

    fn ensure_output(&mut self) -> Result<&mut Output, MediaError> {
        if self.output.is_none() {
            let (_stream, handle) =
                OutputStream::try_default().map_err(|e| MediaError::Output(e.to_string()))?;
            let sink = Sink::try_new(&handle).map_err(|e| MediaError::Output(e.to_string()))?;
            sink.pause();
            self.output = Some(Output { _stream, handle, sink });
        }
        self.output
            .as_mut()
            .ok_or_else(|| MediaError::Output("output stream missing".to_string()))
    }

    /// Replaces the queued audio with the clip decoded from `offset`.
    fn requeue(&mut self, offset: Duration) -> Result<(), MediaError> {
        let bytes = self.bytes.clone().ok_or(MediaError::NoSource)?;
        let decoder = Decoder::new(Cursor::new(bytes))?;
        let out = self.ensure_output()?;

        out.sink.stop();
        out.sink = Sink::try_new(&out.handle).map_err(|e| MediaError::Output(e.to_string()))?;
        out.sink.pause();
        out.sink
            .append(decoder.convert_samples::<f32>().skip_duration(offset));
        Ok(())
    }

    /// After the end, playing again starts over.
    fn rewind_if_ended(&mut self) -> bool {
        if !self.ended {
            return false;
        }
        self.offset = Duration::ZERO;
        self.ended = false;
        true
    }

    fn emit_time_update(&mut self, now: Instant) {
        self.last_time_update = Some(now);
        self.listeners
            .emit(MediaEvent::TimeUpdate(self.position().as_secs_f64()));
    }
}

impl MediaResource for LocalMedia {
    fn play(&mut self) -> Result<(), MediaError> {
        if self.started_at.is_some() {
            return Ok(());
        }
        self.preload()?;

        let rewound = self.rewind_if_ended();
        let needs_queue = rewound || self.output.as_ref().map(|o| o.sink.empty()).unwrap_or(true);
        if needs_queue {
            self.requeue(self.offset)?;
        }

        let out = self.ensure_output()?;
        out.sink.play();
        self.started_at = Some(Instant::now());
        log::debug!("play from {:?}", self.offset);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(out) = self.output.as_ref() {
            out.sink.pause();
        }
        if self.started_at.is_some() {
            self.offset = self.position();
            self.started_at = None;
            self.emit_time_update(Instant::now());
        }
    }

    fn paused(&self) -> bool {
        self.started_at.is_none()
    }

    fn current_time(&self) -> f64 {
        self.position().as_secs_f64()
    }

    fn set_current_time(&mut self, secs: f64) -> Result<(), MediaError> {
        let target = Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::ZERO);
        let target = match self.duration {
            Some(d) => target.min(d),
            None => target,
        };

        // stopped until the new audio is queued, so a failed requeue reads as paused
        let playing = self.started_at.take().is_some();
        self.offset = target;
        self.ended = false;

        // without an output the next play() queues from `offset`
        if self.output.is_some() {
            if let Err(e) = self.requeue(target) {
                self.emit_time_update(Instant::now());
                return Err(e);
            }
            if playing {
                if let Some(out) = self.output.as_ref() {
                    out.sink.play();
                }
            }
        }
        if playing {
            self.started_at = Some(Instant::now());
        }

        self.emit_time_update(Instant::now());
        Ok(())
    }

    fn duration(&self) -> f64 {
        self.duration.map(|d| d.as_secs_f64()).unwrap_or(f64::NAN)
    }

    fn subscribe(&mut self, kind: MediaEventKind, tx: Sender<MediaEvent>) -> ListenerId {
        self.listeners.add(kind, tx)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn poll(&mut self) {
        if self.started_at.is_none() {
            return;
        }
        let now = Instant::now();

        let drained = self.output.as_ref().map(|o| o.sink.empty()).unwrap_or(false);
        if drained {
            self.offset = self.duration.unwrap_or_else(|| self.position());
            self.started_at = None;
            self.ended = true;
            self.emit_time_update(now);
            log::debug!("clip ended at {:?}", self.offset);
            self.listeners.emit(MediaEvent::Ended);
            return;
        }

        let due = self
            .last_time_update
            .map(|t| now.duration_since(t) >= self.time_update_every)
            .unwrap_or(true);
        if due {
            self.emit_time_update(now);
        }
    }
}

impl Drop for LocalMedia {
    fn drop(&mut self) {
        if let Some(out) = self.output.take() {
            out.sink.stop();
        }
    }
}

fn fetch(url: &str) -> Result<Vec<u8>, MediaError> {
    let fail = |reason: String| MediaError::Fetch {
        url: url.to_string(),
        reason,
    };
    let resp = http_agent()
        .get(url)
        .call()
        .map_err(|e| fail(e.to_string()))?;
    read_capped(resp.into_reader(), MAX_CLIP_BYTES).map_err(fail)
}

const MAX_CLIP_BYTES: u64 = 64 * 1024 * 1024;

/// Reads the whole body, refusing anything over `cap` instead of truncating it.
fn read_capped(reader: impl Read, cap: u64) -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    reader
        .take(cap + 1)
        .read_to_end(&mut buf)
        .map_err(|e| e.to_string())?;
    if buf.len() as u64 > cap {
        return Err(format!("clip larger than {}", size_label(cap)));
    }
    Ok(buf)
}

fn size_label(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MiB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}

fn http_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(8))
        .build()
}

fn probe_duration(bytes: &Arc<[u8]>) -> Option<Duration> {
    let probe = Probe::new(Cursor::new(Arc::clone(bytes)))
        .guess_file_type()
        .ok()?;
    let tagged = probe.read().ok()?;
    let d = tagged.properties().duration();
    if d.is_zero() {
        None
    } else {
        Some(d)
    }
}
