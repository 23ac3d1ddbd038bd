//! Recording fake media service for unit tests

use super::{BackendStatus, MediaBackend, MediaEvent, MediaService, VideoFrame};
use crate::utils::error::{Result, RythmxError};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// State of one fake backend, shared with the test
#[derive(Debug)]
pub(crate) struct FakeHandle {
    pub uri: String,
    pub status: BackendStatus,
    pub position: Duration,
    pub duration: Duration,
    pub volume: f64,
    pub rate: f64,
    pub pending: Vec<MediaEvent>,
    pub frame: Option<VideoFrame>,
}

/// Everything the fake service has seen, in call order
#[derive(Debug, Default)]
pub(crate) struct FakeLog {
    pub calls: Vec<String>,
    pub handles: Vec<Rc<RefCell<FakeHandle>>>,
}

impl FakeLog {
    pub fn handle(&self, index: usize) -> Rc<RefCell<FakeHandle>> {
        Rc::clone(&self.handles[index])
    }
}

pub(crate) struct FakeService {
    pub log: Rc<RefCell<FakeLog>>,
    pub duration: Duration,
    pub fail_loads: bool,
}

impl FakeService {
    pub fn new(duration: Duration) -> Self {
        Self {
            log: Rc::new(RefCell::new(FakeLog::default())),
            duration,
            fail_loads: false,
        }
    }
}

impl MediaService for FakeService {
    fn load(&self, uri: &str) -> Result<Box<dyn MediaBackend>> {
        let mut log = self.log.borrow_mut();
        let id = log.handles.len();
        log.calls.push(format!("{}:load {}", id, uri));
        if self.fail_loads {
            return Err(RythmxError::media_error("cannot decode"));
        }

        let handle = Rc::new(RefCell::new(FakeHandle {
            uri: uri.to_string(),
            status: BackendStatus::Ready,
            position: Duration::ZERO,
            duration: self.duration,
            volume: 1.0,
            rate: 1.0,
            pending: vec![MediaEvent::Ready {
                duration: self.duration,
            }],
            frame: None,
        }));
        log.handles.push(Rc::clone(&handle));

        Ok(Box::new(FakeBackend {
            id,
            handle,
            log: Rc::clone(&self.log),
        }))
    }
}

pub(crate) struct FakeBackend {
    id: usize,
    handle: Rc<RefCell<FakeHandle>>,
    log: Rc<RefCell<FakeLog>>,
}

impl FakeBackend {
    fn record(&self, call: String) {
        self.log.borrow_mut().calls.push(format!("{}:{}", self.id, call));
    }
}

impl MediaBackend for FakeBackend {
    fn play(&mut self) -> Result<()> {
        self.record("play".to_string());
        self.handle.borrow_mut().status = BackendStatus::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.record("pause".to_string());
        self.handle.borrow_mut().status = BackendStatus::Paused;
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.record(format!("seek {}", position.as_secs_f64()));
        self.handle.borrow_mut().position = position;
        Ok(())
    }

    fn set_rate(&mut self, rate: f64) -> Result<()> {
        self.record(format!("rate {}", rate));
        self.handle.borrow_mut().rate = rate;
        Ok(())
    }

    fn set_volume(&mut self, level: f64) -> Result<()> {
        self.record(format!("volume {}", level));
        self.handle.borrow_mut().volume = level;
        Ok(())
    }

    fn volume(&self) -> f64 {
        self.handle.borrow().volume
    }

    fn status(&self) -> BackendStatus {
        self.handle.borrow().status
    }

    fn position(&self) -> Duration {
        self.handle.borrow().position
    }

    fn duration(&self) -> Option<Duration> {
        Some(self.handle.borrow().duration)
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.handle.borrow_mut().pending)
    }

    fn take_frame(&mut self) -> Option<VideoFrame> {
        self.handle.borrow_mut().frame.take()
    }

    fn dispose(&mut self) -> Result<()> {
        self.record("dispose".to_string());
        self.handle.borrow_mut().status = BackendStatus::Disposed;
        Ok(())
    }
}
