#![forbid(unsafe_code)]

//! The console demo orchestrator.
//!
//! [`ConsoleDemo`] owns the stage, the phase tracker, and the single live
//! stream session, and advances the fixed [`SCRIPT`] timeline from
//! [`ConsoleDemo::tick`]. Instantaneous steps run back-to-back within one
//! tick; the stream and delay steps suspend the timeline until they finish.
//!
//! # Invariants
//!
//! 1. `trigger` is rejected while Running or Completed; at most one stream
//!    session is live at a time.
//! 2. A missing surface or control skips that single action; the sequence
//!    continues.
//! 3. `reset` restores every touched surface and control to its pre-trigger
//!    literal content, and is a no-op unless the sequence has completed.

use std::time::Duration;

use typereel_core::stage::{ClassSet, Control, Stage};
use typereel_core::surface::{MemorySurface, Span, TextSurface};
use typereel_core::{Phase, PhaseTracker};
use typereel_engine::{StreamConfig, StreamSession};

use crate::content;
use crate::script::{SCRIPT, Step};

// ---------------------------------------------------------------------------
// Stage names
// ---------------------------------------------------------------------------

/// Primary code-display surface.
pub const SURFACE_CODE: &str = "code-content";
/// Secondary stylesheet surface the engine streams into.
pub const SURFACE_STYLE: &str = "css-code";

/// Companion toggle control (gains ACTIVE after the style stream).
pub const CTRL_SIGN_UP: &str = "sign-up";
/// Trigger control with the swappable icon fill.
pub const CTRL_SEND: &str = "send";
/// Auxiliary informational element / reload affordance.
pub const CTRL_INFORMATIVE: &str = "informative";
/// Placeholder-bearing input surface.
pub const CTRL_PLACEHOLDER: &str = "placeholder";
/// Attachment decoration removed by prepare and restored by reset.
pub const CTRL_ATTACHMENT: &str = "attachment";

// ---------------------------------------------------------------------------
// ConsoleDemo
// ---------------------------------------------------------------------------

/// Orchestrator for the scripted code-editing demo.
pub struct ConsoleDemo {
    stage: Stage<MemorySurface>,
    phase: PhaseTracker,
    config: StreamConfig,
    step: usize,
    /// Remaining time of the delay step currently in progress.
    wait: Option<Duration>,
    /// The stream currently being awaited by the timeline.
    live: Option<StreamSession>,
    /// A completed stream still sweeping its emphasis markers.
    cooling: Option<StreamSession>,
}

impl std::fmt::Debug for ConsoleDemo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleDemo")
            .field("phase", &self.phase.phase())
            .field("step", &self.step)
            .field("streaming", &self.live.is_some())
            .field("cooling", &self.cooling.is_some())
            .finish()
    }
}

impl ConsoleDemo {
    /// Build the demo with the default stream cadence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StreamConfig::new())
    }

    /// Build the demo with a custom stream cadence.
    #[must_use]
    pub fn with_config(config: StreamConfig) -> Self {
        Self {
            stage: Self::build_stage(),
            phase: PhaseTracker::new(),
            config,
            step: 0,
            wait: None,
            live: None,
            cooling: None,
        }
    }

    /// The stage in its pre-trigger state.
    fn build_stage() -> Stage<MemorySurface> {
        Stage::new()
            .with_surface(
                SURFACE_CODE,
                MemorySurface::with_content(14, 80, content::jsx_content(false)),
            )
            .with_surface(
                SURFACE_STYLE,
                MemorySurface::with_content(10, 44, vec![Span::plain(content::ORIGINAL_CSS)]),
            )
            .with_control(CTRL_SIGN_UP, Control::new())
            .with_control(CTRL_SEND, Control::new().with_gradient().with_pulse())
            .with_control(
                CTRL_INFORMATIVE,
                Control::new().with_content(content::initial_informative()),
            )
            .with_control(
                CTRL_PLACEHOLDER,
                Control::new()
                    .with_text(content::ORIGINAL_PLACEHOLDER)
                    .with_shimmer(),
            )
            .with_control(CTRL_ATTACHMENT, Control::new())
    }

    // -- entry points ---------------------------------------------------------

    /// Start the sequence. Rejected (returns `false`) while a sequence is
    /// running or after one has completed without a reset.
    ///
    /// The prepare step runs synchronously before this returns; the stream
    /// and everything after it advance from [`ConsoleDemo::tick`].
    pub fn trigger(&mut self) -> bool {
        if !self.phase.try_begin() {
            tracing::debug!(phase = ?self.phase.phase(), "trigger rejected");
            return false;
        }
        tracing::debug!("sequence started");

        self.step = 0;
        self.wait = None;
        self.prepare();

        self.step = 1;
        debug_assert_eq!(SCRIPT[self.step], Step::StreamStyle);
        self.live = self
            .stage
            .surface_mut(SURFACE_STYLE)
            .map(|surface| StreamSession::start(&self.config, content::UPDATED_CSS, surface));
        true
    }

    /// Restore every touched surface and control to its pre-trigger state.
    ///
    /// Only reachable once the sequence has completed; a reset from Idle is
    /// a safe no-op and a running sequence cannot be reset.
    pub fn reset(&mut self) -> bool {
        if !self.phase.reset() {
            return false;
        }
        tracing::debug!("console state reloaded");

        self.live = None;
        self.cooling = None;
        self.step = 0;
        self.wait = None;

        if let Some(code) = self.stage.surface_mut(SURFACE_CODE) {
            code.clear();
            code.set_content(content::jsx_content(false));
        }
        if let Some(style) = self.stage.surface_mut(SURFACE_STYLE) {
            style.clear();
            style.set_content(vec![Span::plain(content::ORIGINAL_CSS)]);
        }
        if let Some(sign_up) = self.stage.control_mut(CTRL_SIGN_UP) {
            sign_up.remove_class(ClassSet::ANIMATING);
            sign_up.remove_class(ClassSet::ACTIVE);
        }
        if let Some(placeholder) = self.stage.control_mut(CTRL_PLACEHOLDER) {
            placeholder.set_text(content::ORIGINAL_PLACEHOLDER);
            placeholder.set_shimmer(true);
        }
        if !self.stage.has_control(CTRL_ATTACHMENT) {
            self.stage.insert_control(CTRL_ATTACHMENT, Control::new());
        }
        if let Some(send) = self.stage.control_mut(CTRL_SEND) {
            send.restore_gradient();
            send.set_pulse(true);
            send.set_interactive(true, 1.0);
        }
        if let Some(info) = self.stage.control_mut(CTRL_INFORMATIVE) {
            info.set_visible(true);
            info.remove_class(ClassSet::RELOAD);
            info.set_rich_content(content::initial_informative());
        }
        true
    }

    /// Hard-stop any streaming for page teardown. Never part of the normal
    /// sequence.
    pub fn abort(&mut self) {
        if let Some(session) = &mut self.live {
            session.halt();
        }
        if let Some(session) = &mut self.cooling {
            session.halt();
        }
        self.live = None;
        self.cooling = None;
    }

    /// Advance the timeline by `dt`.
    pub fn tick(&mut self, mut dt: Duration) {
        // The marker sweep of a completed stream overlaps later steps.
        if let Some(session) = &mut self.cooling {
            if let Some(surface) = self.stage.surface_mut(SURFACE_STYLE) {
                session.tick(dt, surface);
            }
            if session.is_settled() {
                self.cooling = None;
            }
        }

        if !self.phase.is_running() {
            return;
        }

        loop {
            match SCRIPT[self.step] {
                // Prepare ran synchronously inside trigger.
                Step::Prepare => self.step += 1,

                Step::StreamStyle => {
                    let Some(session) = &mut self.live else {
                        // Missing style surface: the stream action is
                        // skipped, the sequence continues.
                        self.step += 1;
                        continue;
                    };
                    if let Some(surface) = self.stage.surface_mut(SURFACE_STYLE) {
                        session.tick(dt, surface);
                    }
                    if session.is_complete() {
                        self.cooling = self.live.take();
                        self.step += 1;
                        dt = Duration::ZERO;
                        continue;
                    }
                    return;
                }

                Step::CompanionToggle => {
                    self.companion_toggle();
                    self.step += 1;
                }

                Step::Delay(total) => {
                    let remaining = self.wait.unwrap_or(total).saturating_sub(dt);
                    if remaining.is_zero() {
                        self.wait = None;
                        self.step += 1;
                        dt = Duration::ZERO;
                        continue;
                    }
                    self.wait = Some(remaining);
                    return;
                }

                Step::SwapCode => {
                    self.swap_code();
                    self.step += 1;
                }

                Step::ShowReload => {
                    self.show_reload();
                    self.step += 1;
                }

                Step::Finish => {
                    self.finish();
                    return;
                }
            }
        }
    }

    // -- step bodies ----------------------------------------------------------

    /// Step 1: every synchronous mutation before any awaited work begins.
    fn prepare(&mut self) {
        if let Some(code) = self.stage.surface_mut(SURFACE_CODE) {
            code.clear_highlights();
        }
        if let Some(sign_up) = self.stage.control_mut(CTRL_SIGN_UP) {
            sign_up.add_class(ClassSet::ANIMATING);
        }
        if let Some(info) = self.stage.control_mut(CTRL_INFORMATIVE) {
            info.set_visible(false);
        }
        self.stage.remove_control(CTRL_ATTACHMENT);
        if let Some(placeholder) = self.stage.control_mut(CTRL_PLACEHOLDER) {
            placeholder.set_text(content::UPDATED_PLACEHOLDER);
            placeholder.set_shimmer(false);
        }
        if let Some(send) = self.stage.control_mut(CTRL_SEND) {
            send.set_solid_fill(content::SEND_FILL_SOLID);
            send.set_pulse(false);
            send.set_interactive(false, 0.6);
        }
    }

    /// Step 3: companion goes active, busy indicator clears.
    fn companion_toggle(&mut self) {
        if let Some(sign_up) = self.stage.control_mut(CTRL_SIGN_UP) {
            sign_up.remove_class(ClassSet::ANIMATING);
            sign_up.add_class(ClassSet::ACTIVE);
        }
    }

    /// Step 5: atomic content swap, no streaming.
    fn swap_code(&mut self) {
        if let Some(code) = self.stage.surface_mut(SURFACE_CODE) {
            code.set_content(content::jsx_content(true));
        }
    }

    /// Step 7: the informative element becomes the reload affordance.
    fn show_reload(&mut self) {
        if let Some(info) = self.stage.control_mut(CTRL_INFORMATIVE) {
            info.set_visible(true);
            info.add_class(ClassSet::RELOAD);
            info.set_rich_content(content::reload_informative());
        }
    }

    /// Steps 8–9: pointer interaction restored, sequence completed.
    fn finish(&mut self) {
        if let Some(send) = self.stage.control_mut(CTRL_SEND) {
            send.set_interactive(true, 1.0);
        }
        self.phase.finish();
        tracing::debug!("sequence completed");
    }

    // -- observers ------------------------------------------------------------

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase.phase()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    #[must_use]
    pub fn has_completed(&self) -> bool {
        self.phase.is_completed()
    }

    /// Completed, and the emphasis sweep of the streamed surface is done.
    #[must_use]
    pub fn is_quiescent(&self) -> bool {
        self.has_completed() && self.cooling.is_none()
    }

    /// Read access to the stage for embedders and tests.
    #[must_use]
    pub fn stage(&self) -> &Stage<MemorySurface> {
        &self.stage
    }

    /// Mutable stage access for embedders wiring their own surfaces.
    pub fn stage_mut(&mut self) -> &mut Stage<MemorySurface> {
        &mut self.stage
    }
}

impl Default for ConsoleDemo {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run_until<F: Fn(&ConsoleDemo) -> bool>(demo: &mut ConsoleDemo, done: F) {
        for _ in 0..100_000 {
            if done(demo) {
                return;
            }
            demo.tick(FRAME);
        }
        panic!("demo never reached the expected state");
    }

    #[test]
    fn fresh_demo_is_idle_with_original_content() {
        let demo = ConsoleDemo::new();
        assert_eq!(demo.phase(), Phase::Idle);
        let code = demo.stage().surface(SURFACE_CODE).unwrap();
        assert!(code.has_highlights());
        assert_eq!(
            demo.stage().surface(SURFACE_STYLE).unwrap().text(),
            content::ORIGINAL_CSS
        );
        assert!(demo.stage().has_control(CTRL_ATTACHMENT));
    }

    #[test]
    fn trigger_runs_prepare_synchronously() {
        let mut demo = ConsoleDemo::new();
        assert!(demo.trigger());
        // All step-1 effects are visible before any tick.
        assert!(!demo.stage().surface(SURFACE_CODE).unwrap().has_highlights());
        assert!(!demo.stage().has_control(CTRL_ATTACHMENT));
        let send = demo.stage().control(CTRL_SEND).unwrap();
        assert!(!send.is_interactive());
        assert_eq!(send.fill(), Some(content::SEND_FILL_SOLID));
        assert!(!send.has_gradient());
        assert!(!send.has_pulse());
        let placeholder = demo.stage().control(CTRL_PLACEHOLDER).unwrap();
        assert_eq!(placeholder.text(), content::UPDATED_PLACEHOLDER);
        assert!(!placeholder.has_shimmer());
        assert!(!demo.stage().control(CTRL_INFORMATIVE).unwrap().is_visible());
        assert!(
            demo.stage()
                .control(CTRL_SIGN_UP)
                .unwrap()
                .has_class(ClassSet::ANIMATING)
        );
    }

    #[test]
    fn retrigger_rejected_while_running() {
        let mut demo = ConsoleDemo::new();
        assert!(demo.trigger());
        assert!(!demo.trigger());
        demo.tick(FRAME);
        assert!(!demo.trigger());
    }

    #[test]
    fn trigger_is_noop_after_completion_until_reset() {
        let mut demo = ConsoleDemo::new();
        demo.trigger();
        run_until(&mut demo, ConsoleDemo::has_completed);
        assert!(!demo.trigger());
        assert!(demo.reset());
        assert!(demo.trigger());
    }

    #[test]
    fn companion_toggles_when_style_stream_completes() {
        let mut demo = ConsoleDemo::new();
        demo.trigger();
        run_until(&mut demo, |d| {
            d.stage()
                .control(CTRL_SIGN_UP)
                .is_some_and(|c| c.has_class(ClassSet::ACTIVE))
        });
        // Stream is fully emitted by then, and the busy indicator is gone.
        assert_eq!(
            demo.stage().surface(SURFACE_STYLE).unwrap().text(),
            content::UPDATED_CSS
        );
        assert!(
            !demo
                .stage()
                .control(CTRL_SIGN_UP)
                .unwrap()
                .has_class(ClassSet::ANIMATING)
        );
        // Code swap waits for the 500ms delay.
        assert!(!demo.has_completed());
    }

    #[test]
    fn full_sequence_reaches_completed_state() {
        let mut demo = ConsoleDemo::new();
        demo.trigger();
        run_until(&mut demo, ConsoleDemo::has_completed);

        let code = demo.stage().surface(SURFACE_CODE).unwrap();
        assert_eq!(code.spans(), content::jsx_content(true).as_slice());

        let info = demo.stage().control(CTRL_INFORMATIVE).unwrap();
        assert!(info.is_visible());
        assert!(info.has_class(ClassSet::RELOAD));

        let send = demo.stage().control(CTRL_SEND).unwrap();
        assert!(send.is_interactive());
        assert!((send.opacity() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn emphasis_sweep_finishes_after_completion() {
        let mut demo = ConsoleDemo::new();
        demo.trigger();
        run_until(&mut demo, ConsoleDemo::has_completed);
        run_until(&mut demo, ConsoleDemo::is_quiescent);
        assert_eq!(
            demo.stage().surface(SURFACE_STYLE).unwrap().marked_count(),
            0
        );
    }

    #[test]
    fn reset_restores_pre_trigger_state() {
        let mut demo = ConsoleDemo::new();
        demo.trigger();
        run_until(&mut demo, ConsoleDemo::is_quiescent);
        assert!(demo.reset());
        assert_eq!(demo.phase(), Phase::Idle);

        let fresh = ConsoleDemo::new();
        for name in [SURFACE_CODE, SURFACE_STYLE] {
            assert_eq!(
                demo.stage().surface(name).unwrap(),
                fresh.stage().surface(name).unwrap(),
                "surface {name} not restored"
            );
        }
        for name in [
            CTRL_SIGN_UP,
            CTRL_SEND,
            CTRL_INFORMATIVE,
            CTRL_PLACEHOLDER,
            CTRL_ATTACHMENT,
        ] {
            assert_eq!(
                demo.stage().control(name).unwrap(),
                fresh.stage().control(name).unwrap(),
                "control {name} not restored"
            );
        }
    }

    #[test]
    fn reset_from_idle_is_noop() {
        let mut demo = ConsoleDemo::new();
        assert!(!demo.reset());
        assert_eq!(demo.phase(), Phase::Idle);
    }

    #[test]
    fn reset_rejected_while_running() {
        let mut demo = ConsoleDemo::new();
        demo.trigger();
        demo.tick(FRAME);
        assert!(!demo.reset());
        assert!(demo.is_running());
    }

    #[test]
    fn reset_does_not_duplicate_attachment() {
        let mut demo = ConsoleDemo::new();
        demo.trigger();
        run_until(&mut demo, ConsoleDemo::has_completed);
        // Re-add the attachment externally before resetting.
        demo.stage_mut()
            .insert_control(CTRL_ATTACHMENT, Control::new());
        assert!(demo.reset());
        assert!(demo.stage().has_control(CTRL_ATTACHMENT));
    }

    #[test]
    fn missing_targets_are_skipped_not_fatal() {
        let mut demo = ConsoleDemo::new();
        demo.stage_mut().remove_control(CTRL_SIGN_UP);
        demo.stage_mut().remove_control(CTRL_INFORMATIVE);
        demo.trigger();
        run_until(&mut demo, ConsoleDemo::has_completed);
        // The rest of the sequence still ran.
        assert_eq!(
            demo.stage().surface(SURFACE_CODE).unwrap().spans(),
            content::jsx_content(true).as_slice()
        );
    }

    #[test]
    fn abort_halts_streaming() {
        let mut demo = ConsoleDemo::new();
        demo.trigger();
        demo.tick(FRAME);
        let partial = demo.stage().surface(SURFACE_STYLE).unwrap().text();
        demo.abort();
        demo.tick(Duration::from_secs(30));
        assert_eq!(
            demo.stage().surface(SURFACE_STYLE).unwrap().text(),
            partial
        );
    }
}
