//! End-to-end controller flows against a scripted media service
//!
//! These tests drive the controller only through UI actions, the way the
//! window does, and check what reaches the playback engine.

use anyhow::Result;
use rythmx::media::{BackendStatus, MediaEvent};
use rythmx::player::PlayIcon;
use rythmx::window::UiAction;
use rythmx::{PlaybackState, PlayerConfig, PlayerController};
use rythmx_integration_tests::{QueuedDialog, RecordingWindow, Script, ScriptedService, TestFixture};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

struct Harness {
    controller: PlayerController,
    window: RecordingWindow,
    dialog: QueuedDialog,
    script: Rc<RefCell<Script>>,
    start: Instant,
}

impl Harness {
    fn new(duration: Duration) -> Self {
        let (service, script) = ScriptedService::new(duration);
        Self {
            controller: PlayerController::new(Box::new(service), PlayerConfig::default(), "RythmX"),
            window: RecordingWindow::default(),
            dialog: QueuedDialog::default(),
            script,
            start: Instant::now(),
        }
    }

    fn at(&self, secs: f64) -> Instant {
        self.start + Duration::from_secs_f64(secs)
    }

    fn act(&mut self, action: UiAction, secs: f64) -> rythmx::Result<()> {
        let now = self.at(secs);
        self.controller
            .handle_action(action, &mut self.window, &mut self.dialog, now)
    }

    fn tick(&mut self, secs: f64) -> Result<()> {
        let now = self.at(secs);
        self.controller.tick(now)?;
        Ok(())
    }

    fn journal(&self) -> Vec<String> {
        self.script.borrow().journal.clone()
    }

    fn clear_journal(&self) {
        self.script.borrow_mut().journal.clear();
    }
}

#[test]
fn test_open_from_dialog_starts_playing() -> Result<()> {
    let fixture = TestFixture::new()?;
    let mut h = Harness::new(Duration::from_secs(754));
    h.dialog = QueuedDialog::answering(&[fixture.first_clip.as_path()]);

    h.act(UiAction::OpenFile, 0.0)?;
    h.tick(0.1)?;

    assert_eq!(h.controller.state(), PlaybackState::Playing);
    assert_eq!(h.controller.view().play_icon, PlayIcon::Pause);
    assert_eq!(h.controller.view().total_time, "12:34");
    assert_eq!(h.window.title, "RythmX - first.mp4");
    assert_eq!(h.journal(), vec!["load first.mp4", "play first.mp4"]);
    Ok(())
}

#[test]
fn test_cancelled_dialog_keeps_current_media() -> Result<()> {
    let fixture = TestFixture::new()?;
    let mut h = Harness::new(Duration::from_secs(60));
    h.act(UiAction::OpenPath(fixture.first_clip.clone()), 0.0)?;
    h.clear_journal();

    h.act(UiAction::OpenFile, 1.0)?;

    assert_eq!(h.controller.state(), PlaybackState::Playing);
    assert!(h.journal().is_empty());
    Ok(())
}

#[test]
fn test_opening_again_releases_before_loading() -> Result<()> {
    let fixture = TestFixture::new()?;
    let mut h = Harness::new(Duration::from_secs(60));

    h.act(UiAction::OpenPath(fixture.first_clip.clone()), 0.0)?;
    h.act(UiAction::OpenPath(fixture.second_clip.clone()), 1.0)?;
    h.act(UiAction::OpenPath(fixture.first_clip.clone()), 2.0)?;

    let script = h.script.borrow();
    assert_eq!(script.max_live_sessions, 1);
    assert_eq!(script.live_sessions, 1);
    assert_eq!(
        script.journal,
        vec![
            "load first.mp4",
            "play first.mp4",
            "dispose first.mp4",
            "load second.mkv",
            "play second.mkv",
            "dispose second.mkv",
            "load first.mp4",
            "play first.mp4",
        ]
    );
    Ok(())
}

#[test]
fn test_rejected_file_leaves_no_media_then_recovers() -> Result<()> {
    let fixture = TestFixture::new()?;
    let mut h = Harness::new(Duration::from_secs(60));
    h.script.borrow_mut().reject.push("second.mkv".to_string());

    h.act(UiAction::OpenPath(fixture.first_clip.clone()), 0.0)?;
    assert!(h.act(UiAction::OpenPath(fixture.second_clip.clone()), 1.0).is_err());
    assert_eq!(h.controller.state(), PlaybackState::NoMedia);
    assert_eq!(h.window.title, "RythmX");

    // Transport does nothing without media
    h.act(UiAction::TogglePlayPause, 2.0)?;
    h.act(UiAction::Forward, 2.0)?;
    assert_eq!(h.controller.state(), PlaybackState::NoMedia);

    h.act(UiAction::OpenPath(fixture.first_clip.clone()), 3.0)?;
    assert_eq!(h.controller.state(), PlaybackState::Playing);
    Ok(())
}

#[test]
fn test_progress_drag_pauses_seeks_and_resumes() -> Result<()> {
    let fixture = TestFixture::new()?;
    let mut h = Harness::new(Duration::from_secs(300));
    h.act(UiAction::OpenPath(fixture.first_clip.clone()), 0.0)?;
    h.tick(0.1)?;
    h.clear_journal();

    h.act(UiAction::ProgressDragStarted, 1.0)?;
    h.act(UiAction::ProgressDragged(100.0), 1.1)?;
    h.script.borrow().push_event(MediaEvent::PositionChanged {
        position: Duration::from_secs(2),
    });
    h.tick(1.2)?;
    assert_eq!(h.controller.view().current_time, "01:40");

    h.act(UiAction::ProgressDragged(150.0), 1.3)?;
    h.act(UiAction::ProgressDragEnded(150.0), 1.4)?;

    assert_eq!(
        h.journal(),
        vec!["pause first.mp4", "seek 150 first.mp4", "play first.mp4"]
    );
    assert_eq!(h.controller.state(), PlaybackState::Playing);
    assert_eq!(h.controller.view().current_time, "02:30");
    Ok(())
}

#[test]
fn test_fullscreen_controls_auto_hide() -> Result<()> {
    let fixture = TestFixture::new()?;
    let mut h = Harness::new(Duration::from_secs(60));
    h.act(UiAction::OpenPath(fixture.first_clip.clone()), 0.0)?;
    h.act(UiAction::TogglePlayPause, 0.5)?;

    h.act(UiAction::ToggleFullscreen, 1.0)?;
    assert!(h.window.fullscreen);
    assert!(!h.controller.view().top_bar_visible);
    assert!(!h.controller.view().control_bar_visible);
    assert_eq!(h.controller.state(), PlaybackState::Playing);

    h.act(UiAction::PointerMoved, 2.0)?;
    assert!(h.controller.view().control_bar_visible);
    assert!(!h.controller.view().top_bar_visible);

    // Movement keeps pushing the deadline out
    h.act(UiAction::PointerMoved, 5.0)?;
    h.tick(8.0)?;
    assert!(h.controller.view().control_bar_visible);
    h.tick(10.0)?;
    assert!(!h.controller.view().control_bar_visible);

    h.act(UiAction::PointerMoved, 11.0)?;
    h.act(UiAction::ExitFullscreen, 12.0)?;
    assert!(!h.window.fullscreen);
    assert!(h.controller.view().top_bar_visible);
    assert!(h.controller.view().control_bar_visible);

    // The pending deadline was cancelled on exit
    h.tick(30.0)?;
    assert!(h.controller.view().control_bar_visible);
    Ok(())
}

#[test]
fn test_mute_volume_and_speed() -> Result<()> {
    let fixture = TestFixture::new()?;
    let mut h = Harness::new(Duration::from_secs(60));
    h.act(UiAction::OpenPath(fixture.first_clip.clone()), 0.0)?;
    let media = h.script.borrow().media(0);
    assert_eq!(media.borrow().volume, 0.5);

    h.act(UiAction::SetVolume(20.0), 1.0)?;
    h.act(UiAction::ToggleMute, 2.0)?;
    assert_eq!(media.borrow().volume, 0.0);
    assert!(h.controller.view().muted);

    h.act(UiAction::ToggleMute, 3.0)?;
    assert_eq!(media.borrow().volume, 0.2);
    assert!(!h.controller.view().muted);

    // Raising the slider while muted unmutes
    h.act(UiAction::ToggleMute, 4.0)?;
    h.act(UiAction::SetVolume(70.0), 5.0)?;
    assert!(!h.controller.is_muted());
    assert_eq!(media.borrow().volume, 0.7);

    h.act(UiAction::SetSpeed(0.1), 6.0)?;
    assert_eq!(media.borrow().rate, 0.5);
    h.act(UiAction::SetSpeed(1.25), 7.0)?;
    assert_eq!(media.borrow().rate, 1.25);
    Ok(())
}

#[test]
fn test_end_of_media_then_replay() -> Result<()> {
    let fixture = TestFixture::new()?;
    let mut h = Harness::new(Duration::from_secs(42));
    h.act(UiAction::OpenPath(fixture.first_clip.clone()), 0.0)?;
    h.tick(0.1)?;

    h.script.borrow().set_position(Duration::from_secs(42));
    h.script.borrow().push_event(MediaEvent::EndOfMedia);
    h.tick(42.0)?;
    assert_eq!(h.controller.state(), PlaybackState::Paused);
    assert_eq!(h.controller.view().play_icon, PlayIcon::Play);

    h.clear_journal();
    h.act(UiAction::TogglePlayPause, 43.0)?;
    assert_eq!(h.journal(), vec!["seek 0 first.mp4", "play first.mp4"]);
    Ok(())
}

#[test]
fn test_quit_releases_session() -> Result<()> {
    let fixture = TestFixture::new()?;
    let mut h = Harness::new(Duration::from_secs(60));
    h.act(UiAction::OpenPath(fixture.first_clip.clone()), 0.0)?;

    h.act(UiAction::Quit, 1.0)?;
    assert!(h.window.closed);

    drop(h.controller);
    let media = h.script.borrow().media(0);
    assert_eq!(media.borrow().status, BackendStatus::Disposed);
    assert_eq!(h.script.borrow().live_sessions, 0);
    Ok(())
}
