//! Animated GIF sequence export.
//!
//! The exporter drives `camo_core::evaluate` over a fixed list of frame
//! timestamps, encodes each frame into a growing GIF container
//! (palettized independently per frame), and reports fractional progress
//! after every frame. The loop is modeled as an explicit step API: one
//! [`SequenceExport::step`] call per frame is the cooperative suspension
//! point, so a synchronous host can interleave other work, an async host
//! can await between steps, and cancellation is honored at every
//! boundary.
//!
//! At most one export is in flight per [`ExportSlot`]; the interactive
//! animation path and the exporter therefore never contend for a render
//! target — each export evaluates into its own fresh surfaces.

use camo_core::{evaluate, CamoError, PatternParams};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// GIF encoder speed (1 = slowest/best quantization, 30 = fastest).
/// Camo frames carry at most four distinct colors, so quantization
/// quality is a non-issue; favor encoding speed.
const GIF_ENCODE_SPEED: i32 = 10;

/// Settings for one sequence export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportSettings {
    /// Number of frames to render and encode.
    pub frame_count: u32,
    /// Playback rate used both for frame timestamps and per-frame delay.
    pub fps: f32,
    /// Animation speed multiplier applied to frame timestamps.
    pub speed: f32,
}

impl ExportSettings {
    /// Checks the settings against their documented domains.
    pub fn validate(&self) -> Result<(), CamoError> {
        if self.frame_count == 0 {
            return Err(CamoError::invalid_param(
                "frame_count",
                "must be at least 1",
            ));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(CamoError::invalid_param(
                "fps",
                format!("must be a positive finite number, got {}", self.fps),
            ));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(CamoError::invalid_param(
                "speed",
                format!("must be a positive finite number, got {}", self.speed),
            ));
        }
        Ok(())
    }

    /// Timestamp of frame `i`: `(i / fps) * speed`.
    pub fn frame_time(&self, i: u32) -> f32 {
        (i as f32 / self.fps) * self.speed
    }

    /// Per-frame delay in whole milliseconds.
    pub fn frame_delay_ms(&self) -> u32 {
        (1000.0 / self.fps).round() as u32
    }
}

/// Queryable cancellation flag, checked at every per-frame suspension
/// point. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; the export aborts at its next step.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Admission control: at most one export in flight per slot.
///
/// Clones share the slot, so the UI-facing handle and the worker can
/// both observe it. A rejected `begin` leaves the running export
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct ExportSlot(Arc<AtomicBool>);

impl ExportSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while an export holds the slot.
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Starts a sequence export, claiming the slot.
    ///
    /// Validates params and settings first, then claims the slot
    /// atomically; a concurrent holder yields `CamoError::ExportInProgress`.
    /// The slot is released when the returned job is finished or dropped.
    pub fn begin(
        &self,
        params: PatternParams,
        width: u32,
        height: u32,
        settings: ExportSettings,
    ) -> Result<SequenceExport, CamoError> {
        params.validate()?;
        settings.validate()?;
        if width == 0 || height == 0 {
            return Err(CamoError::InvalidDimensions);
        }
        if self
            .0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(CamoError::ExportInProgress);
        }

        let buf = SharedBuf::default();
        let mut encoder = GifEncoder::new_with_speed(buf.clone(), GIF_ENCODE_SPEED);
        if let Err(e) = encoder.set_repeat(Repeat::Infinite) {
            self.0.store(false, Ordering::Release);
            return Err(CamoError::Encode(e.to_string()));
        }

        Ok(SequenceExport {
            params,
            width,
            height,
            settings,
            completed: 0,
            encoder: Some(encoder),
            buf,
            cancel: CancelFlag::new(),
            slot: self.clone(),
        })
    }
}

/// Outcome of one exporter step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportStep {
    /// One more frame was rendered and encoded.
    Frame { completed: u32, total: u32 },
    /// All frames are encoded; call [`SequenceExport::finish`].
    Done,
}

/// An in-flight sequence export.
///
/// Dropping the job at any point releases its slot and discards all
/// partial output.
pub struct SequenceExport {
    params: PatternParams,
    width: u32,
    height: u32,
    settings: ExportSettings,
    completed: u32,
    encoder: Option<GifEncoder<SharedBuf>>,
    buf: SharedBuf,
    cancel: CancelFlag,
    slot: ExportSlot,
}

impl SequenceExport {
    /// A shared handle for cancelling this export from another owner.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Progress as a percentage in [0, 100].
    pub fn progress(&self) -> f64 {
        self.completed as f64 * 100.0 / self.settings.frame_count as f64
    }

    /// Renders and encodes the next frame; the per-frame suspension point.
    ///
    /// Checks the cancellation flag first, then evaluates the frame at
    /// `time = (i / fps) * speed` into a fresh surface, palettizes it
    /// (per frame, no palette shared across frames), and appends it to
    /// the container with its delay. Any failure aborts the export.
    pub fn step(&mut self) -> Result<ExportStep, CamoError> {
        if self.cancel.is_cancelled() {
            return Err(CamoError::ExportCancelled);
        }
        if self.completed >= self.settings.frame_count {
            return Ok(ExportStep::Done);
        }
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| CamoError::Encode("export already finished".into()))?;

        let time = self.settings.frame_time(self.completed);
        let surface = evaluate(&self.params.at_time(time), self.width, self.height)?;
        let img = RgbaImage::from_raw(self.width, self.height, surface.into_data())
            .ok_or_else(|| CamoError::Encode("RGBA buffer size mismatch".into()))?;
        let delay = Delay::from_numer_denom_ms(self.settings.frame_delay_ms(), 1);
        encoder
            .encode_frame(Frame::from_parts(img, 0, 0, delay))
            .map_err(|e| CamoError::Encode(e.to_string()))?;

        self.completed += 1;
        Ok(ExportStep::Frame {
            completed: self.completed,
            total: self.settings.frame_count,
        })
    }

    /// Finalizes the container and returns the complete GIF bytes.
    pub fn finish(mut self) -> Result<Vec<u8>, CamoError> {
        // The encoder writes the GIF trailer when dropped.
        drop(self.encoder.take());
        self.buf.take()
    }

    /// Runs the export to completion on the calling thread.
    ///
    /// Invokes `progress` with a strictly increasing percentage after
    /// every frame (exactly `frame_count` times, ending at 100), and
    /// yields to the scheduler between frames so a long export does not
    /// monopolize its thread.
    ///
    /// On failure or cancellation the callback stops being invoked
    /// before it reaches 100; the error travels through the returned
    /// `Result`, never through the sink. A sink that saw 100 can
    /// therefore trust that every frame was encoded.
    pub fn run<F: FnMut(f64)>(mut self, mut progress: F) -> Result<Vec<u8>, CamoError> {
        loop {
            match self.step()? {
                ExportStep::Frame { .. } => {
                    progress(self.progress());
                    std::thread::yield_now();
                }
                ExportStep::Done => return self.finish(),
            }
        }
    }
}

impl Drop for SequenceExport {
    fn drop(&mut self) {
        self.slot.0.store(false, Ordering::Release);
    }
}

/// Byte sink shared between the GIF encoder and the job that needs the
/// bytes back after the encoder is dropped.
#[derive(Debug, Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn take(&self) -> Result<Vec<u8>, CamoError> {
        self.0
            .lock()
            .map(|mut b| std::mem::take(&mut *b))
            .map_err(|_| CamoError::Encode("export buffer poisoned".into()))
    }
}

impl Write for SharedBuf {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "export buffer poisoned"))?;
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camo_core::{Palette, PatternKind};
    use image::codecs::gif::GifDecoder;
    use image::AnimationDecoder;
    use std::io::Cursor;

    fn dazzle_params() -> PatternParams {
        let mut p = PatternParams::new(PatternKind::Dazzle, 7, Palette::default());
        p.complexity = 0.9;
        p
    }

    fn settings(frames: u32) -> ExportSettings {
        ExportSettings {
            frame_count: frames,
            fps: 15.0,
            speed: 1.0,
        }
    }

    // -- Settings --

    #[test]
    fn frame_times_follow_fps_and_speed() {
        let s = ExportSettings {
            frame_count: 3,
            fps: 15.0,
            speed: 2.0,
        };
        assert_eq!(s.frame_time(0), 0.0);
        assert!((s.frame_time(1) - 2.0 / 15.0).abs() < 1e-6);
        assert!((s.frame_time(2) - 4.0 / 15.0).abs() < 1e-6);
    }

    #[test]
    fn frame_delay_rounds_to_whole_milliseconds() {
        assert_eq!(settings(1).frame_delay_ms(), 67);
        let s = ExportSettings {
            frame_count: 1,
            fps: 10.0,
            speed: 1.0,
        };
        assert_eq!(s.frame_delay_ms(), 100);
    }

    #[test]
    fn settings_validation_rejects_bad_domains() {
        assert!(settings(0).validate().is_err());
        let bad_fps = ExportSettings {
            frame_count: 1,
            fps: 0.0,
            speed: 1.0,
        };
        assert!(bad_fps.validate().is_err());
        let bad_speed = ExportSettings {
            frame_count: 1,
            fps: 15.0,
            speed: -1.0,
        };
        assert!(bad_speed.validate().is_err());
    }

    // -- Bookkeeping --

    #[test]
    fn progress_is_reported_once_per_frame_strictly_increasing_to_100() {
        let slot = ExportSlot::new();
        let export = slot.begin(dazzle_params(), 32, 32, settings(5)).unwrap();

        let mut reports = Vec::new();
        let bytes = export.run(|p| reports.push(p)).unwrap();

        assert_eq!(reports.len(), 5);
        assert!(reports.windows(2).all(|w| w[0] < w[1]), "{reports:?}");
        assert_eq!(*reports.last().unwrap(), 100.0);
        assert!(!bytes.is_empty());
    }

    #[test]
    fn gif_frame_count_matches_requested_frames() {
        let slot = ExportSlot::new();
        let export = slot.begin(dazzle_params(), 32, 32, settings(4)).unwrap();
        let bytes = export.run(|_| {}).unwrap();

        let decoder = GifDecoder::new(Cursor::new(bytes)).unwrap();
        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 4);
    }

    #[test]
    fn exported_frame_zero_matches_a_still_at_time_zero() {
        // The animation must degenerate to the still image: frame 0 is
        // rendered at time 0 with identical params.
        let params = dazzle_params();
        let still = evaluate(&params, 24, 24).unwrap();

        let slot = ExportSlot::new();
        let export = slot.begin(params, 24, 24, settings(2)).unwrap();
        let bytes = export.run(|_| {}).unwrap();

        let decoder = GifDecoder::new(Cursor::new(bytes)).unwrap();
        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames[0].buffer().as_raw().as_slice(), still.data());
    }

    // -- Single-flight guard --

    #[test]
    fn concurrent_begin_is_rejected() {
        let slot = ExportSlot::new();
        let first = slot.begin(dazzle_params(), 16, 16, settings(2)).unwrap();
        assert!(slot.is_busy());

        let second = slot.begin(dazzle_params(), 16, 16, settings(2));
        assert!(matches!(second, Err(CamoError::ExportInProgress)));

        drop(first);
        assert!(!slot.is_busy());
        assert!(slot.begin(dazzle_params(), 16, 16, settings(2)).is_ok());
    }

    #[test]
    fn invalid_params_do_not_claim_the_slot() {
        let slot = ExportSlot::new();
        let mut bad = dazzle_params();
        bad.scale = -1.0;
        assert!(slot.begin(bad, 16, 16, settings(2)).is_err());
        assert!(!slot.is_busy());
    }

    #[test]
    fn finishing_releases_the_slot() {
        let slot = ExportSlot::new();
        let export = slot.begin(dazzle_params(), 16, 16, settings(2)).unwrap();
        let _ = export.run(|_| {}).unwrap();
        assert!(!slot.is_busy());
    }

    // -- Cancellation --

    #[test]
    fn cancellation_aborts_at_the_next_step() {
        let slot = ExportSlot::new();
        let mut export = slot.begin(dazzle_params(), 16, 16, settings(10)).unwrap();
        let flag = export.cancel_flag();

        assert!(matches!(export.step(), Ok(ExportStep::Frame { .. })));
        flag.cancel();
        assert!(matches!(export.step(), Err(CamoError::ExportCancelled)));

        // The job still holds the slot until dropped; dropping discards
        // the partial output and frees it.
        drop(export);
        assert!(!slot.is_busy());
    }

    #[test]
    fn progress_never_reaches_100_when_the_export_is_cancelled() {
        // The sink is only told about completed frames; failure travels
        // through the Result, so a sink that saw 100 can trust the file
        // is complete.
        let slot = ExportSlot::new();
        let export = slot.begin(dazzle_params(), 16, 16, settings(10)).unwrap();
        let flag = export.cancel_flag();

        let mut reports = Vec::new();
        let result = export.run(|p| {
            reports.push(p);
            flag.cancel();
        });

        assert!(matches!(result, Err(CamoError::ExportCancelled)));
        assert_eq!(reports.len(), 1);
        assert!(reports[0] < 100.0);
        assert!(!slot.is_busy());
    }

    #[test]
    fn step_by_step_export_matches_run() {
        let slot = ExportSlot::new();
        let mut export = slot.begin(dazzle_params(), 24, 24, settings(3)).unwrap();
        let mut seen = Vec::new();
        loop {
            match export.step().unwrap() {
                ExportStep::Frame { completed, total } => seen.push((completed, total)),
                ExportStep::Done => break,
            }
        }
        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
        let bytes = export.finish().unwrap();

        let other = slot.begin(dazzle_params(), 24, 24, settings(3)).unwrap();
        let bytes_via_run = other.run(|_| {}).unwrap();
        assert_eq!(bytes, bytes_via_run);
    }
}
