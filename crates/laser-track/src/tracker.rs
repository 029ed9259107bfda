//! The control loop: grab → locate → map → govern → send → observe → poll.
//!
//! Single-threaded and cooperative; one iteration per frame. The capture
//! source and the actuation transport are exclusively owned by the loop
//! for its lifetime.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use laser_track_core::{
    map_pixel_to_angles, ActuatorAngles, CalibrationBounds, ConfigError, DetectionMode, PixelCoord,
    RgbFrame, TrackerConfig,
};
use laser_track_detect::{DetectError, Locator, LocatorParams};
use laser_track_servo::{ActuationChannel, SafetyGovernor};

/// Fatal control-loop failures. Capture failure and a lost transport are
/// not here: the former shuts the loop down cleanly, the latter degrades
/// to simulated operation.
#[derive(thiserror::Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Detect(#[from] DetectError),
}

/// Discrete operator events, however they are captured upstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorCommand {
    Quit,
    SetMode(DetectionMode),
    ToggleOverlay,
}

/// External capture source. Frames are fixed-size for the session;
/// `None` signals end of stream or capture failure.
pub trait FrameSource {
    fn grab(&mut self) -> Option<RgbFrame>;

    /// Release the device. Idempotent; the default is a no-op.
    fn release(&mut self) {}
}

/// Operator input seam, polled once per iteration.
pub trait CommandInput {
    fn poll(&mut self) -> Option<OperatorCommand>;
}

/// Input source that never produces a command.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl CommandInput for NoInput {
    fn poll(&mut self) -> Option<OperatorCommand> {
        None
    }
}

/// Single-slot latest-wins command queue. Producers overwrite the pending
/// command; the loop consumes it once per iteration.
#[derive(Clone, Debug, Default)]
pub struct LatestSlot {
    slot: Arc<Mutex<Option<OperatorCommand>>>,
}

impl LatestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending command with this one.
    pub fn push(&self, command: OperatorCommand) {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(command);
    }
}

impl CommandInput for LatestSlot {
    fn poll(&mut self) -> Option<OperatorCommand> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }
}

/// Per-iteration hook for overlay rendering and diagnostics. Rendering is
/// an external concern; the loop only reports what it saw and sent.
pub trait TrackerObserver {
    fn on_frame(
        &mut self,
        frame: &RgbFrame,
        target: Option<PixelCoord>,
        sent: Option<ActuatorAngles>,
        overlay: bool,
    ) {
        let _ = (frame, target, sent, overlay);
    }
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl TrackerObserver for NullObserver {}

/// Control loop lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    ShuttingDown,
}

/// Summary returned by a completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackerReport {
    pub frames: u64,
    pub commands_sent: u64,
    /// Governor correction count at shutdown.
    pub corrections: u64,
}

/// The detection→mapping→actuation loop.
pub struct Tracker<S, I = NoInput> {
    source: S,
    input: I,
    channel: Option<Box<dyn ActuationChannel>>,
    locator: Locator,
    mode: DetectionMode,
    bounds: CalibrationBounds,
    governor: SafetyGovernor,
    state: LoopState,
    overlay: bool,
    actuation_warned: bool,
    released: bool,
}

impl<S: FrameSource, I: CommandInput> Tracker<S, I> {
    /// Build an idle tracker. Without a channel it runs in simulated mode:
    /// every send is a no-op while mapping and governing run identically.
    pub fn new(config: &TrackerConfig, source: S, input: I) -> Self {
        Self {
            source,
            input,
            channel: None,
            locator: Locator::new(LocatorParams::default()),
            mode: config.mode,
            bounds: config.calibration,
            governor: SafetyGovernor::new(config.limits),
            state: LoopState::Idle,
            overlay: true,
            actuation_warned: false,
            released: false,
        }
    }

    pub fn with_channel(mut self, channel: Box<dyn ActuationChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_locator(mut self, locator: Locator) -> Self {
        self.locator = locator;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    pub fn governor(&self) -> &SafetyGovernor {
        &self.governor
    }

    /// Run until the capture source fails or the operator quits.
    pub fn run(&mut self, observer: &mut dyn TrackerObserver) -> Result<TrackerReport, TrackerError> {
        self.state = LoopState::Running;
        log::info!("tracking started in {} mode", self.mode.as_str());

        let mut report = TrackerReport::default();
        while self.state == LoopState::Running {
            match self.step(observer, &mut report) {
                Ok(()) => {}
                Err(err) => {
                    self.shutdown();
                    return Err(err);
                }
            }
        }

        self.shutdown();
        report.corrections = self.governor.corrections();
        Ok(report)
    }

    fn step(
        &mut self,
        observer: &mut dyn TrackerObserver,
        report: &mut TrackerReport,
    ) -> Result<(), TrackerError> {
        let Some(frame) = self.source.grab() else {
            log::warn!("frame acquisition failed; shutting down");
            self.state = LoopState::ShuttingDown;
            return Ok(());
        };
        report.frames += 1;

        let target = self.locator.locate(&frame.view(), self.mode)?;

        let mut sent = None;
        if let Some(pixel) = target {
            let raw = map_pixel_to_angles(
                pixel,
                frame.width as u32,
                frame.height as u32,
                &self.bounds,
            )?;
            if let Some(governed) = self.governor.govern(raw, Instant::now()) {
                if self.transmit(governed) {
                    report.commands_sent += 1;
                }
                sent = Some(governed);
            }
        }

        observer.on_frame(&frame, target, sent, self.overlay);

        match self.input.poll() {
            Some(OperatorCommand::Quit) => {
                log::info!("stop requested");
                self.state = LoopState::ShuttingDown;
            }
            Some(OperatorCommand::SetMode(mode)) => {
                log::info!("detection mode -> {}", mode.as_str());
                self.mode = mode;
            }
            Some(OperatorCommand::ToggleOverlay) => self.overlay = !self.overlay,
            None => {}
        }
        Ok(())
    }

    /// Write the command to the transport; true when it actually went out.
    /// A failed transport is dropped and the loop continues simulated.
    fn transmit(&mut self, angles: ActuatorAngles) -> bool {
        match self.channel.as_mut() {
            Some(channel) => match channel.send(angles) {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("actuation unavailable ({err}); continuing in simulated mode");
                    self.channel = None;
                    // The loss is reported here once; later iterations run
                    // simulated without warning again.
                    self.actuation_warned = true;
                    false
                }
            },
            None => {
                if !self.actuation_warned {
                    log::warn!("no actuation channel; running in simulated mode");
                    self.actuation_warned = true;
                }
                false
            }
        }
    }

    /// Release capture source, then channel. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.state = LoopState::ShuttingDown;
        if self.released {
            return;
        }
        self.released = true;
        self.source.release();
        if let Some(channel) = self.channel.as_mut() {
            if let Err(err) = channel.close() {
                log::warn!("channel close failed: {err}");
            }
        }
        log::info!(
            "tracker stopped ({} safety corrections)",
            self.governor.corrections()
        );
    }
}
