//! Animation driver for interactive dazzle playback.
//!
//! A two-state machine (Idle / Running) over a caller-supplied clock.
//! On each scheduler tick the host asks for the frame's params; the
//! driver stamps them with the elapsed time since it entered Running.
//! Only the Dazzle kernel animates, so requesting animation for Blotch
//! is a no-op, and switching the kind away from Dazzle stops playback.
//!
//! The clock is plain seconds (`f64`) injected by the caller rather than
//! an internal `Instant`, keeping the state machine deterministic under
//! test. No state survives a stop: elapsed time always restarts at 0.

use crate::params::{PatternKind, PatternParams};

/// Playback state of the [`Animator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorState {
    /// Not animating; parameter changes render normally.
    Idle,
    /// Animating since the contained clock value.
    Running { started_at: f64 },
}

/// Drives repeated evaluation of the dazzle pattern over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animator {
    state: AnimatorState,
}

impl Animator {
    /// Creates an idle driver.
    pub fn new() -> Self {
        Self {
            state: AnimatorState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// True while animation is active.
    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimatorState::Running { .. })
    }

    /// Requests animation for the given pattern kind at clock value `now`.
    ///
    /// Enters Running only for [`PatternKind::Dazzle`]; any other kind
    /// leaves the driver Idle. Re-requesting while already Running
    /// restarts the elapsed clock.
    pub fn start(&mut self, kind: PatternKind, now: f64) {
        self.state = match kind {
            PatternKind::Dazzle => AnimatorState::Running { started_at: now },
            _ => AnimatorState::Idle,
        };
    }

    /// Turns animation off.
    pub fn stop(&mut self) {
        self.state = AnimatorState::Idle;
    }

    /// Notifies the driver that the pattern kind changed.
    ///
    /// Any kind other than Dazzle forces Idle; staying on Dazzle keeps
    /// the current playback untouched.
    pub fn kind_changed(&mut self, kind: PatternKind) {
        if kind != PatternKind::Dazzle {
            self.state = AnimatorState::Idle;
        }
    }

    /// While Running, re-renders triggered by anything other than the
    /// driver's own tick are suppressed to avoid duplicate evaluation.
    pub fn allows_external_render(&self) -> bool {
        !self.is_running()
    }

    /// Builds the params for one tick at clock value `now`, stamped with
    /// the elapsed time since Running began. Returns `None` while Idle.
    ///
    /// The host evaluates the returned params against its live display
    /// surface once per tick.
    pub fn frame_params(&self, base: &PatternParams, now: f64) -> Option<PatternParams> {
        match self.state {
            AnimatorState::Running { started_at } => {
                Some(base.at_time((now - started_at).max(0.0) as f32))
            }
            AnimatorState::Idle => None,
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    fn dazzle_params() -> PatternParams {
        PatternParams::new(PatternKind::Dazzle, 7, Palette::default())
    }

    // -- Transitions --

    #[test]
    fn starts_idle() {
        let a = Animator::new();
        assert_eq!(a.state(), AnimatorState::Idle);
        assert!(!a.is_running());
    }

    #[test]
    fn start_enters_running_for_dazzle_only() {
        let mut a = Animator::new();
        a.start(PatternKind::Blotch, 10.0);
        assert!(!a.is_running());
        a.start(PatternKind::Dazzle, 10.0);
        assert!(a.is_running());
    }

    #[test]
    fn stop_returns_to_idle() {
        let mut a = Animator::new();
        a.start(PatternKind::Dazzle, 0.0);
        a.stop();
        assert_eq!(a.state(), AnimatorState::Idle);
    }

    #[test]
    fn leaving_dazzle_forces_idle() {
        let mut a = Animator::new();
        a.start(PatternKind::Dazzle, 0.0);
        a.kind_changed(PatternKind::Blotch);
        assert!(!a.is_running());
    }

    #[test]
    fn staying_on_dazzle_keeps_playback() {
        let mut a = Animator::new();
        a.start(PatternKind::Dazzle, 3.0);
        a.kind_changed(PatternKind::Dazzle);
        assert!(a.is_running());
        let p = a.frame_params(&dazzle_params(), 5.0).unwrap();
        assert!((p.time - 2.0).abs() < 1e-6);
    }

    // -- Elapsed time --

    #[test]
    fn frame_time_is_elapsed_since_start() {
        let mut a = Animator::new();
        a.start(PatternKind::Dazzle, 100.0);
        let p = a.frame_params(&dazzle_params(), 101.5).unwrap();
        assert!((p.time - 1.5).abs() < 1e-6);
    }

    #[test]
    fn elapsed_restarts_at_zero_on_every_start() {
        let mut a = Animator::new();
        a.start(PatternKind::Dazzle, 0.0);
        let _ = a.frame_params(&dazzle_params(), 9.0);
        a.stop();
        a.start(PatternKind::Dazzle, 20.0);
        let p = a.frame_params(&dazzle_params(), 20.0).unwrap();
        assert_eq!(p.time, 0.0);
    }

    #[test]
    fn clock_skew_never_yields_negative_time() {
        let mut a = Animator::new();
        a.start(PatternKind::Dazzle, 10.0);
        let p = a.frame_params(&dazzle_params(), 9.5).unwrap();
        assert_eq!(p.time, 0.0);
    }

    #[test]
    fn idle_driver_produces_no_frames() {
        let a = Animator::new();
        assert!(a.frame_params(&dazzle_params(), 1.0).is_none());
    }

    // -- Suppression --

    #[test]
    fn external_renders_suppressed_only_while_running() {
        let mut a = Animator::new();
        assert!(a.allows_external_render());
        a.start(PatternKind::Dazzle, 0.0);
        assert!(!a.allows_external_render());
        a.stop();
        assert!(a.allows_external_render());
    }

    #[test]
    fn frame_params_only_vary_time() {
        let mut a = Animator::new();
        a.start(PatternKind::Dazzle, 0.0);
        let base = dazzle_params();
        let p = a.frame_params(&base, 2.0).unwrap();
        assert_eq!(p.at_time(base.time), base);
    }
}
