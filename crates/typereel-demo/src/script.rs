#![forbid(unsafe_code)]

//! The fixed demo timeline.
//!
//! Step order is a strict contract: no step begins before the previous
//! one's effect (including any awaited delay or stream) completes.

use std::time::Duration;

/// One ordered unit of work in the demo timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Synchronous batch run inside the trigger itself: strip pending-edit
    /// highlights, arm the busy indicator, hide the informative element,
    /// remove the attachment, swap placeholder text, flatten the send icon,
    /// and disable pointer interaction.
    Prepare,
    /// Stream the updated stylesheet into the style surface; awaited.
    StreamStyle,
    /// Flip the companion control active and clear the busy indicator.
    CompanionToggle,
    /// Fixed pause.
    Delay(Duration),
    /// Atomic swap of the code surface to the updated component source.
    SwapCode,
    /// Show the reload affordance on the informative element.
    ShowReload,
    /// Re-enable pointer interaction and mark the sequence completed.
    Finish,
}

/// The demo sequence, in contract order.
pub const SCRIPT: [Step; 8] = [
    Step::Prepare,
    Step::StreamStyle,
    Step::CompanionToggle,
    Step::Delay(Duration::from_millis(500)),
    Step::SwapCode,
    Step::Delay(Duration::from_millis(2000)),
    Step::ShowReload,
    Step::Finish,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_order_is_the_contract() {
        assert_eq!(SCRIPT[0], Step::Prepare);
        assert_eq!(SCRIPT[1], Step::StreamStyle);
        assert_eq!(SCRIPT[2], Step::CompanionToggle);
        assert_eq!(SCRIPT[3], Step::Delay(Duration::from_millis(500)));
        assert_eq!(SCRIPT[4], Step::SwapCode);
        assert_eq!(SCRIPT[5], Step::Delay(Duration::from_millis(2000)));
        assert_eq!(SCRIPT[6], Step::ShowReload);
        assert_eq!(SCRIPT[7], Step::Finish);
    }

    #[test]
    fn exactly_one_stream_step() {
        let streams = SCRIPT.iter().filter(|s| **s == Step::StreamStyle).count();
        assert_eq!(streams, 1);
    }
}
