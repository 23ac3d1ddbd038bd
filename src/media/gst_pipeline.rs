//! GStreamer playback engine
//!
//! Each opened file gets its own `playbin`. Video is pulled through an
//! `appsink` as RGBA so the window can upload it as a texture; audio goes to
//! the platform's default sink chosen by `playbin`.

use super::{BackendStatus, MediaBackend, MediaEvent, MediaService, VideoFrame};
use crate::utils::error::{IntoPlayerError, Result, RythmxError};
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Callback run on the streaming thread whenever a new frame is available
pub type FrameNotify = Arc<dyn Fn() + Send + Sync>;

/// Media service creating one `playbin` per file
pub struct GstMediaService {
    notify: FrameNotify,
}

impl GstMediaService {
    /// Initialize GStreamer and create the service
    pub fn new() -> Result<Self> {
        gst::init()?;
        info!("GStreamer {} initialized", gst::version_string());

        Ok(Self {
            notify: Arc::new(|| {}),
        })
    }

    /// Run `notify` whenever a decoded frame lands
    pub fn with_frame_notify(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.notify = Arc::new(notify);
        self
    }
}

impl MediaService for GstMediaService {
    fn load(&self, uri: &str) -> Result<Box<dyn MediaBackend>> {
        let backend = GstBackend::open(uri, Arc::clone(&self.notify))?;
        Ok(Box::new(backend))
    }
}

/// Build a `file://` URI for a local path
pub fn path_to_uri(path: &Path) -> Result<String> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let uri = gst::glib::filename_to_uri(&absolute, None)?;
    Ok(uri.to_string())
}

/// A `playbin` pipeline for one media file
pub struct GstBackend {
    playbin: gst::Element,
    bus: gst::Bus,
    frame: Arc<Mutex<Option<VideoFrame>>>,
    status: BackendStatus,
    duration: Option<Duration>,
    last_position: Duration,
    rate: f64,
    rate_pending: bool,
}

impl GstBackend {
    /// Create the pipeline and preroll it in the paused state
    pub fn open(uri: &str, notify: FrameNotify) -> Result<Self> {
        debug!("Creating playbin for {}", uri);

        let playbin = gst::ElementFactory::make("playbin")
            .property("uri", uri)
            .build()
            .media_err("Failed to create playbin")?;

        let caps = gst_video::VideoCapsBuilder::new()
            .format(gst_video::VideoFormat::Rgba)
            .build();
        let appsink = gst_app::AppSink::builder()
            .caps(&caps)
            .max_buffers(1)
            .drop(true)
            .build();

        let frame = Arc::new(Mutex::new(None));
        let sink_frame = Arc::clone(&frame);
        appsink.set_callbacks(
            gst_app::AppSinkCallbacks::builder()
                .new_sample(move |sink| {
                    let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                    if let Some(decoded) = frame_from_sample(&sample) {
                        *sink_frame.lock() = Some(decoded);
                        notify();
                    }
                    Ok(gst::FlowSuccess::Ok)
                })
                .build(),
        );
        playbin.set_property("video-sink", appsink.upcast_ref::<gst::Element>());

        let bus = playbin
            .bus()
            .ok_or_else(|| RythmxError::media_error("playbin has no bus"))?;

        playbin.set_state(gst::State::Paused)?;

        Ok(Self {
            playbin,
            bus,
            frame,
            status: BackendStatus::Ready,
            duration: None,
            last_position: Duration::ZERO,
            rate: 1.0,
            rate_pending: false,
        })
    }

    fn query_position(&self) -> Option<Duration> {
        self.playbin
            .query_position::<gst::ClockTime>()
            .map(|t| Duration::from_nanos(t.nseconds()))
    }

    fn query_duration(&self) -> Option<Duration> {
        self.playbin
            .query_duration::<gst::ClockTime>()
            .map(|t| Duration::from_nanos(t.nseconds()))
    }

    /// Flushing seek that also carries the current rate
    fn seek_with_rate(&self, position: Duration) -> Result<()> {
        let target = gst::ClockTime::from_nseconds(position.as_nanos() as u64);
        self.playbin
            .seek(
                self.rate,
                gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
                gst::SeekType::Set,
                target,
                gst::SeekType::End,
                gst::ClockTime::ZERO,
            )
            .media_err("Seek failed")
    }

    fn refresh_duration(&mut self, events: &mut Vec<MediaEvent>) {
        if let Some(duration) = self.query_duration() {
            if self.duration != Some(duration) {
                debug!("Duration known: {:?}", duration);
                self.duration = Some(duration);
                events.push(MediaEvent::Ready { duration });
            }
        }
    }
}

fn frame_from_sample(sample: &gst::Sample) -> Option<VideoFrame> {
    let caps = sample.caps()?;
    let info = gst_video::VideoInfo::from_caps(caps).ok()?;
    let buffer = sample.buffer()?;
    let map = buffer.map_readable().ok()?;
    let stride = usize::try_from(*info.stride().first()?).ok()?;

    VideoFrame::from_strided(info.width(), info.height(), stride, map.as_slice())
}

impl MediaBackend for GstBackend {
    fn play(&mut self) -> Result<()> {
        self.playbin.set_state(gst::State::Playing)?;
        self.status = BackendStatus::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playbin.set_state(gst::State::Paused)?;
        self.status = BackendStatus::Paused;
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.seek_with_rate(position)?;
        self.last_position = position;
        Ok(())
    }

    fn set_rate(&mut self, rate: f64) -> Result<()> {
        self.rate = rate;
        // A rate change is a seek; before preroll there is nowhere to seek yet
        match self.query_position() {
            Some(position) => {
                self.rate_pending = false;
                self.seek_with_rate(position)
            }
            None => {
                self.rate_pending = true;
                Ok(())
            }
        }
    }

    fn set_volume(&mut self, level: f64) -> Result<()> {
        self.playbin.set_property("volume", level.clamp(0.0, 1.0));
        Ok(())
    }

    fn volume(&self) -> f64 {
        self.playbin.property::<f64>("volume")
    }

    fn status(&self) -> BackendStatus {
        self.status
    }

    fn position(&self) -> Duration {
        self.query_position().unwrap_or(self.last_position)
    }

    fn duration(&self) -> Option<Duration> {
        self.duration.or_else(|| self.query_duration())
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        let mut events = Vec::new();

        while let Some(msg) = self.bus.pop() {
            match msg.view() {
                gst::MessageView::AsyncDone(_) => {
                    self.refresh_duration(&mut events);
                    if self.rate_pending {
                        let rate = self.rate;
                        if let Err(e) = self.set_rate(rate) {
                            warn!("Deferred rate change failed: {}", e);
                        }
                    }
                }
                gst::MessageView::DurationChanged(_) => self.refresh_duration(&mut events),
                gst::MessageView::Eos(_) => events.push(MediaEvent::EndOfMedia),
                gst::MessageView::Error(err) => {
                    let message = match err.debug() {
                        Some(details) => format!("{} ({})", err.error(), details),
                        None => err.error().to_string(),
                    };
                    events.push(MediaEvent::Error { message });
                }
                gst::MessageView::Warning(w) => warn!("GStreamer warning: {}", w.error()),
                _ => {}
            }
        }

        if let Some(position) = self.query_position() {
            if position != self.last_position {
                self.last_position = position;
                events.push(MediaEvent::PositionChanged { position });
            }
        }

        events
    }

    fn take_frame(&mut self) -> Option<VideoFrame> {
        self.frame.lock().take()
    }

    fn dispose(&mut self) -> Result<()> {
        if self.status == BackendStatus::Disposed {
            return Ok(());
        }

        self.playbin.set_state(gst::State::Null)?;
        self.frame.lock().take();
        self.status = BackendStatus::Disposed;
        debug!("playbin disposed");
        Ok(())
    }
}

impl Drop for GstBackend {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            warn!("Failed to shut down playbin: {}", e);
        }
    }
}
