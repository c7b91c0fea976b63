//! Tracking session management.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tiltdrift_animator::AnimationDriver;
use tiltdrift_common::clock::{SessionClock, GAME_RATE_HZ};
use tiltdrift_common::error::{TiltdriftError, TiltdriftResult};
use tiltdrift_motion_model::animation::AnimationSpec;
use tiltdrift_motion_model::geometry::Offset;
use tiltdrift_motion_model::sample::{EventKind, SensorEvent, TraceHeader};
use tiltdrift_sensor_feed::writer::TraceWriter;
use tiltdrift_sensor_feed::{SensorBackend, SensorFeed};
use tiltdrift_tracker_core::tracker::TrackerConfig;
use tiltdrift_tracker_core::{FilterState, TiltTracker};

use crate::layout::LayoutProvider;

/// Configuration for a tracking session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Filter and clamping tuning.
    pub tracker: TrackerConfig,

    /// Duration and easing handed to the driver with every target.
    pub animation: AnimationSpec,

    /// Sensor delivery rate (Hz).
    pub sample_rate_hz: u32,

    /// Zero the filter state on every start, giving fresh-start semantics
    /// across stop/start boundaries. Off by default: the filter carries
    /// over, so re-registration resumes smoothing from where it left off.
    pub reset_filter_on_start: bool,

    /// Optional path to mirror all delivered events into a JSONL trace.
    pub trace_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            animation: AnimationSpec::default(),
            sample_rate_hz: GAME_RATE_HZ,
            reset_filter_on_start: false,
            trace_path: None,
        }
    }
}

/// State of a tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Session created but not started.
    Idle,
    /// Receiving and processing samples.
    Tracking,
    /// Registered but discarding samples; filter state is retained.
    Paused,
    /// Unregistered. Can be started again.
    Stopped,
}

/// A tracking session wiring feed -> tracker -> driver.
///
/// The session is the single consumer of the feed's channel: every filter
/// state mutation happens on the task that calls [`TrackingSession::run_for`]
/// or [`TrackingSession::process_next`], which is what serializes updates.
/// The tracker itself holds no locks and must not be driven concurrently.
///
/// Stopping halts delivery but does not cancel the driver's in-flight
/// transition; the last target keeps animating under driver ownership.
pub struct TrackingSession<D: AnimationDriver> {
    config: SessionConfig,
    tracker: TiltTracker,
    filter: FilterState,
    state: SessionState,
    layout: Box<dyn LayoutProvider>,
    driver: D,
    clock: Option<SessionClock>,
    receiver: Option<tokio::sync::mpsc::Receiver<SensorEvent>>,
    feed_stop: Option<Arc<AtomicBool>>,
    feed_pause: Option<Arc<AtomicBool>>,
    feed_task: Option<tokio::task::JoinHandle<TiltdriftResult<u64>>>,
    samples_processed: u64,
    offsets_emitted: u64,
    events_ignored: u64,
    last_offset: Option<Offset>,
}

impl<D: AnimationDriver> TrackingSession<D> {
    /// Create a session. Fails on invalid tracker tuning.
    pub fn new(
        config: SessionConfig,
        layout: Box<dyn LayoutProvider>,
        driver: D,
    ) -> TiltdriftResult<Self> {
        let tracker = TiltTracker::new(config.tracker.validated()?);
        Ok(Self {
            config,
            tracker,
            filter: FilterState::default(),
            state: SessionState::Idle,
            layout,
            driver,
            clock: None,
            receiver: None,
            feed_stop: None,
            feed_pause: None,
            feed_task: None,
            samples_processed: 0,
            offsets_emitted: 0,
            events_ignored: 0,
            last_offset: None,
        })
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The filter state as of the last processed sample.
    pub fn filter_state(&self) -> FilterState {
        self.filter
    }

    /// The last offset handed to the driver, if any.
    pub fn last_offset(&self) -> Option<Offset> {
        self.last_offset
    }

    /// Accelerometer samples run through the tracker.
    pub fn samples_processed(&self) -> u64 {
        self.samples_processed
    }

    /// Offsets handed to the driver.
    pub fn offsets_emitted(&self) -> u64 {
        self.offsets_emitted
    }

    /// Events discarded: foreign sensor kinds, accuracy changes, and
    /// anything drained while paused.
    pub fn events_ignored(&self) -> u64 {
        self.events_ignored
    }

    /// The animation driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Start tracking: registers the feed at the configured delivery rate.
    ///
    /// Valid from `Idle` or `Stopped`. Unless
    /// [`SessionConfig::reset_filter_on_start`] is set, the filter state
    /// carries over from any previous run.
    pub fn start(&mut self, backend: Box<dyn SensorBackend>) -> TiltdriftResult<()> {
        if self.state != SessionState::Idle && self.state != SessionState::Stopped {
            return Err(TiltdriftError::session("Session already started"));
        }

        if self.config.reset_filter_on_start {
            self.filter.reset();
        }

        let clock = SessionClock::start();
        tracing::info!(
            backend = %backend.name(),
            rate_hz = self.config.sample_rate_hz,
            epoch_wall = %clock.epoch_wall(),
            "Starting tracking session"
        );

        let (sender, receiver) = tokio::sync::mpsc::channel(64);
        let mut feed = SensorFeed::new(
            backend,
            clock.clone(),
            self.config.sample_rate_hz,
            sender,
        );

        if let Some(ref path) = self.config.trace_path {
            let header = TraceHeader {
                schema_version: "1.0".to_string(),
                epoch_wall: clock.epoch_wall().to_string(),
                sample_rate_hz: self.config.sample_rate_hz,
                source: "live".to_string(),
            };
            feed = feed.with_trace(TraceWriter::new(path.clone(), header)?);
        }

        self.feed_stop = Some(feed.stop_flag());
        self.feed_pause = Some(feed.pause_flag());
        self.feed_task = Some(tokio::spawn(feed.run()));
        self.receiver = Some(receiver);
        self.clock = Some(clock);
        self.state = SessionState::Tracking;

        Ok(())
    }

    /// Process one delivered event against the current layout.
    ///
    /// This is the whole per-sample pipeline: kind-filter, invert/clamp,
    /// low-pass, scale, bound, hand to the driver. Accuracy changes and
    /// foreign sensor kinds are absorbed as no-ops; while paused every
    /// event is discarded without touching the filter.
    pub fn handle_event(&mut self, event: SensorEvent) {
        if self.state == SessionState::Paused {
            self.events_ignored += 1;
            return;
        }

        match event.accel_axes() {
            Some((ax, ay)) => {
                self.samples_processed += 1;
                let layout = self.layout.layout();
                if let Some(offset) = self.tracker.update(&mut self.filter, ax, ay, &layout) {
                    self.driver
                        .animate_to(offset, &self.config.animation, event.timestamp_ns);
                    self.last_offset = Some(offset);
                    self.offsets_emitted += 1;
                }
            }
            None => {
                if let EventKind::AccuracyChange { sensor, accuracy } = event.kind {
                    tracing::trace!(?sensor, ?accuracy, "Ignoring accuracy change");
                } else {
                    tracing::trace!(sensor = ?event.sensor(), "Ignoring foreign sensor reading");
                }
                self.events_ignored += 1;
            }
        }
    }

    /// Wait for and process the next delivered event.
    ///
    /// Returns `false` when the feed has shut down and the channel is
    /// drained.
    pub async fn process_next(&mut self) -> TiltdriftResult<bool> {
        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| TiltdriftError::session("Session not started"))?;
        let delivered = receiver.recv().await;

        match delivered {
            Some(event) => {
                self.handle_event(event);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Consume delivered events for a fixed duration.
    pub async fn run_for(&mut self, duration: std::time::Duration) -> TiltdriftResult<()> {
        let deadline = tokio::time::Instant::now() + duration;

        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return Ok(());
            }

            let receiver = self
                .receiver
                .as_mut()
                .ok_or_else(|| TiltdriftError::session("Session not started"))?;
            let delivered = tokio::time::timeout(remaining, receiver.recv()).await;

            match delivered {
                Ok(Some(event)) => self.handle_event(event),
                Ok(None) => return Ok(()),
                Err(_) => return Ok(()), // deadline reached
            }
        }
    }

    /// Pause: delivery halts, drained events are discarded, and the filter
    /// state is retained for resume.
    pub fn pause(&mut self) -> TiltdriftResult<()> {
        if self.state != SessionState::Tracking {
            return Err(TiltdriftError::session("Not tracking"));
        }
        if let Some(ref pause) = self.feed_pause {
            pause.store(true, Ordering::SeqCst);
        }
        self.state = SessionState::Paused;
        tracing::info!("Tracking paused");
        Ok(())
    }

    /// Resume a paused session. Smoothing continues from the retained
    /// filter state; call [`TrackingSession::reset`] first for a
    /// snap-back-to-center resume.
    pub fn resume(&mut self) -> TiltdriftResult<()> {
        if self.state != SessionState::Paused {
            return Err(TiltdriftError::session("Not paused"));
        }
        if let Some(ref pause) = self.feed_pause {
            pause.store(false, Ordering::SeqCst);
        }
        self.state = SessionState::Tracking;
        tracing::info!("Tracking resumed");
        Ok(())
    }

    /// Zero the filter state explicitly.
    pub fn reset(&mut self) {
        self.filter.reset();
        tracing::debug!("Filter state reset");
    }

    /// Stop tracking: unregisters the feed and joins its task.
    ///
    /// Any in-flight animation keeps running under driver ownership.
    pub async fn stop(&mut self) -> TiltdriftResult<()> {
        if self.state != SessionState::Tracking && self.state != SessionState::Paused {
            return Err(TiltdriftError::session("Session not tracking"));
        }

        tracing::info!("Stopping tracking session");
        if let Some(ref stop) = self.feed_stop {
            stop.store(true, Ordering::SeqCst);
        }

        // Closing the channel unblocks a feed stuck on a full send.
        self.receiver = None;

        if let Some(handle) = self.feed_task.take() {
            match handle.await {
                Ok(Ok(delivered)) => tracing::info!(delivered, "Sensor feed flushed"),
                Ok(Err(e)) => tracing::warn!(error = %e, "Sensor feed exited with error"),
                Err(e) => tracing::warn!(error = %e, "Sensor feed join failed"),
            }
        }

        self.feed_stop = None;
        self.feed_pause = None;

        let elapsed = self.clock.as_ref().map(|c| c.elapsed_secs()).unwrap_or(0.0);
        tracing::info!(
            duration_secs = elapsed,
            samples = self.samples_processed,
            offsets = self.offsets_emitted,
            ignored = self.events_ignored,
            "Tracking stopped"
        );

        self.state = SessionState::Stopped;
        Ok(())
    }
}
