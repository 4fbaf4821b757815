//! In-memory media double for controller tests.

use super::{ListenerId, Listeners, MediaError, MediaEvent, MediaEventKind, MediaResource};
use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    Play,
    Pause,
    Seek(f64),
}

#[derive(Debug)]
pub struct ScriptedMedia {
    pub log: Vec<Instruction>,
    pub position: f64,
    pub duration: f64,
    pub paused: bool,
    pub fail_play: bool,
    pub fail_seek: bool,
    pub listeners: Listeners,
}

impl ScriptedMedia {
    pub fn new(duration: f64) -> Self {
        Self {
            log: Vec::new(),
            position: 0.0,
            duration,
            paused: true,
            fail_play: false,
            fail_seek: false,
            listeners: Listeners::default(),
        }
    }

    pub fn fire(&self, event: MediaEvent) {
        self.listeners.emit(event);
    }

    pub fn last(&self) -> Option<Instruction> {
        self.log.last().copied()
    }
}

impl MediaResource for ScriptedMedia {
    fn play(&mut self) -> Result<(), MediaError> {
        self.log.push(Instruction::Play);
        if self.fail_play {
            return Err(MediaError::Output("scripted failure".to_string()));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.log.push(Instruction::Pause);
        self.paused = true;
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, secs: f64) -> Result<(), MediaError> {
        self.log.push(Instruction::Seek(secs));
        if self.fail_seek {
            // like a backend whose requeue failed: stopped, position moved
            self.paused = true;
            self.position = secs;
            return Err(MediaError::Output("scripted seek failure".to_string()));
        }
        self.position = secs;
        Ok(())
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn subscribe(&mut self, kind: MediaEventKind, tx: Sender<MediaEvent>) -> ListenerId {
        self.listeners.add(kind, tx)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}
