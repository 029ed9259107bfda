//! Operator binary: replays frames from a directory of image files through
//! the full tracking pipeline, optionally driving real servos over serial.
//!
//! A live camera is just another `FrameSource` implementor; replay keeps
//! the binary usable on any machine and makes calibration dry runs cheap.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use log::{info, warn, LevelFilter};

use laser_track::core::init_with_level;
use laser_track::interop::rgb_frame_from_image;
use laser_track::servo::SerialChannel;
use laser_track::tracker::{FrameSource, NoInput, TrackerObserver};
use laser_track::{
    ActuatorAngles, DetectionMode, PixelCoord, RgbFrame, Tracker, TrackerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "laser-track", about = "Point a steerable laser at a detected target")]
struct Args {
    /// Tracker config JSON (calibration bounds, safety limits, mode).
    #[arg(long)]
    config: PathBuf,

    /// Directory of image files replayed as the capture source, in
    /// lexicographic order.
    #[arg(long)]
    frames: PathBuf,

    /// Serial port of the servo controller; omit to run simulated.
    #[arg(long)]
    port: Option<String>,

    #[arg(long, default_value_t = SerialChannel::DEFAULT_BAUD)]
    baud: u32,

    /// Override the detection mode from the config file.
    #[arg(long)]
    mode: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Replays image files as capture frames; end of directory is end of stream.
struct DirectorySource {
    files: Vec<PathBuf>,
    next: usize,
}

impl DirectorySource {
    fn open(dir: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        info!("replaying {} frames from {}", files.len(), dir.display());
        Ok(Self { files, next: 0 })
    }
}

impl FrameSource for DirectorySource {
    fn grab(&mut self) -> Option<RgbFrame> {
        while self.next < self.files.len() {
            let path = &self.files[self.next];
            self.next += 1;
            let decoded = image::ImageReader::open(path)
                .map_err(image::ImageError::IoError)
                .and_then(|reader| reader.decode());
            match decoded {
                Ok(img) => return Some(rgb_frame_from_image(&img.to_rgb8())),
                Err(err) => warn!("skipping {}: {err}", path.display()),
            }
        }
        None
    }
}

/// Logs what each iteration saw and sent.
struct ConsoleObserver;

impl TrackerObserver for ConsoleObserver {
    fn on_frame(
        &mut self,
        _frame: &RgbFrame,
        target: Option<PixelCoord>,
        sent: Option<ActuatorAngles>,
        _overlay: bool,
    ) {
        match (target, sent) {
            (Some(px), Some(angles)) => {
                info!("target ({}, {}) -> X:{} Y:{}", px.x, px.y, angles.x, angles.y)
            }
            (Some(px), None) => log::debug!("target ({}, {}); command suppressed", px.x, px.y),
            (None, _) => log::debug!("no target"),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    init_with_level(level)?;

    let mut config = TrackerConfig::from_json_file(&args.config)?;
    if let Some(mode) = args.mode.as_deref() {
        config.mode = DetectionMode::from_str(mode)?;
    }

    let source = DirectorySource::open(&args.frames)?;
    let mut tracker = Tracker::new(&config, source, NoInput);

    if let Some(port) = args.port.as_deref() {
        match SerialChannel::connect(port, args.baud) {
            Ok(channel) => tracker = tracker.with_channel(Box::new(channel)),
            Err(err) => warn!("{err}; running simulated"),
        }
    }

    let report = tracker.run(&mut ConsoleObserver)?;
    info!(
        "done: {} frames, {} commands sent, {} safety corrections",
        report.frames, report.commands_sent, report.corrections
    );
    Ok(())
}
