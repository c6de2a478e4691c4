// Recording fakes for the audio and drawing seams.

#![allow(dead_code)]

use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wavefield_core::*;

#[derive(Clone, Debug, PartialEq)]
pub enum SinkEvent {
    Start(usize),
    Stop(usize),
    Gain(usize, f32, f32),
}

pub type SinkLog = Rc<RefCell<Vec<SinkEvent>>>;

pub struct RecordingSink {
    pub voice: usize,
    pub log: SinkLog,
}

impl VoiceSink for RecordingSink {
    fn start_loop(&mut self) {
        self.log.borrow_mut().push(SinkEvent::Start(self.voice));
    }

    fn stop(&mut self) {
        self.log.borrow_mut().push(SinkEvent::Stop(self.voice));
    }

    fn set_gain(&mut self, amplitude: f32, ramp_sec: f32) {
        self.log
            .borrow_mut()
            .push(SinkEvent::Gain(self.voice, amplitude, ramp_sec));
    }
}

pub struct RecordingBank {
    pub samples: usize,
    pub opened: Rc<RefCell<Vec<usize>>>,
    pub log: SinkLog,
}

impl RecordingBank {
    pub fn new(samples: usize) -> Self {
        Self {
            samples,
            opened: Rc::new(RefCell::new(Vec::new())),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl SampleBank for RecordingBank {
    fn len(&self) -> usize {
        self.samples
    }

    fn open_voice(&mut self, index: usize) -> Box<dyn VoiceSink> {
        let voice = self.opened.borrow().len();
        self.opened.borrow_mut().push(index);
        Box::new(RecordingSink {
            voice,
            log: self.log.clone(),
        })
    }
}

pub fn sink(log: &SinkLog) -> Box<dyn VoiceSink> {
    Box::new(RecordingSink {
        voice: 0,
        log: log.clone(),
    })
}

pub fn new_log() -> SinkLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn registry() -> (VoiceRegistry, SinkLog) {
    let bank = RecordingBank::new(8);
    let log = bank.log.clone();
    let reg = VoiceRegistry::new(Box::new(bank), VoiceParams::default(), 7).unwrap();
    (reg, log)
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear(Rgba),
    Ring {
        center: Vec2,
        radius: f32,
        stroke: Rgba,
        width: f32,
    },
    Disc {
        center: Vec2,
        radius: f32,
        fill: Rgba,
    },
}

pub struct RecordingSurface {
    pub size: Vec2,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            size: Vec2::new(w, h),
            calls: Vec::new(),
        }
    }

    pub fn rings(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Ring { .. }))
            .count()
    }

    pub fn discs(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Disc { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Rgba) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn draw_ring(&mut self, center: Vec2, radius: f32, stroke: Rgba, stroke_width: f32) {
        self.calls.push(DrawCall::Ring {
            center,
            radius,
            stroke,
            width: stroke_width,
        });
    }

    fn draw_filled_disc(&mut self, center: Vec2, radius: f32, fill: Rgba) {
        self.calls.push(DrawCall::Disc {
            center,
            radius,
            fill,
        });
    }
}

/// Field with no startup population and the default tuning.
pub fn empty_field(seed: u64) -> WaveField {
    WaveField::new(FieldParams::default(), Vec2::new(800.0, 600.0), seed)
}
