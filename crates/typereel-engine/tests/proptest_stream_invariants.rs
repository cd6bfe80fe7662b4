#![forbid(unsafe_code)]

//! Property tests for streaming invariants: for any source text and seed,
//! streaming to settle reproduces the source exactly, emits at most two
//! graphemes per interval, and leaves no caret or markers behind.

use std::time::Duration;

use proptest::prelude::*;
use typereel_core::surface::MemorySurface;
use typereel_engine::{StreamConfig, StreamSession};

const TICK: Duration = Duration::from_millis(10);

fn run_to_settled(session: &mut StreamSession, surface: &mut MemorySurface) {
    for _ in 0..100_000 {
        if session.is_settled() {
            return;
        }
        session.tick(TICK, surface);
    }
    panic!("stream did not settle");
}

proptest! {
    #[test]
    fn stream_reproduces_source_exactly(
        source in "\\PC{0,200}",
        seed in 1u32..,
        tail in 0usize..64,
    ) {
        let config = StreamConfig::new()
            .seed(seed)
            .emphasis_tail(tail)
            .cooldown(Duration::from_millis(40));
        let mut surface = MemorySurface::new(10, 40);
        let mut session = StreamSession::start(&config, source.as_str(), &mut surface);
        run_to_settled(&mut session, &mut surface);

        prop_assert_eq!(surface.text(), source);
        prop_assert_eq!(session.emitted(), session.total());
        prop_assert_eq!(surface.marked_count(), 0);
        prop_assert!(!surface.caret_visible());
    }

    #[test]
    fn emission_is_monotonic_and_bounded(
        source in "[a-z \\n]{1,120}",
        seed in 1u32..,
    ) {
        let config = StreamConfig::new().seed(seed);
        let mut surface = MemorySurface::new(10, 40);
        let mut session = StreamSession::start(&config, source.as_str(), &mut surface);

        let mut previous = 0;
        while !session.is_complete() {
            session.tick(TICK, &mut surface);
            let emitted = session.emitted();
            prop_assert!(emitted >= previous);
            prop_assert!(emitted - previous <= 2);
            previous = emitted;
        }
    }

    #[test]
    fn markers_never_exceed_tail(
        source in "[a-z]{1,120}",
        seed in 1u32..,
        tail in 1usize..16,
    ) {
        let config = StreamConfig::new().seed(seed).emphasis_tail(tail);
        let mut surface = MemorySurface::new(10, 40);
        let mut session = StreamSession::start(&config, source.as_str(), &mut surface);

        while !session.is_complete() {
            session.tick(TICK, &mut surface);
            prop_assert!(surface.marked_count() <= tail);
        }
    }

    #[test]
    fn halt_freezes_emission(
        source in "[a-z]{20,120}",
        seed in 1u32..,
        halt_after in 1usize..8,
    ) {
        let config = StreamConfig::new().seed(seed);
        let mut surface = MemorySurface::new(10, 40);
        let mut session = StreamSession::start(&config, source.as_str(), &mut surface);

        for _ in 0..halt_after {
            session.tick(TICK, &mut surface);
        }
        session.halt();
        let frozen = session.emitted();
        let frozen_text = surface.text();

        session.tick(Duration::from_secs(60), &mut surface);
        prop_assert_eq!(session.emitted(), frozen);
        prop_assert_eq!(surface.text(), frozen_text);
        prop_assert!(!session.is_complete());
    }
}
