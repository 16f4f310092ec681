//! One player's frame on the bowling scoreboard.

use serde::{Deserialize, Serialize};

/// Number of pins in a full rack.
pub const PINS: u8 = 10;

/// Throws and score of a single frame.
///
/// `frame_score` stays `None` until every throw the frame depends on has
/// been recorded (a strike waits for the next two throws, a spare for the
/// next one).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub throw1: Option<u8>,
    pub throw2: Option<u8>,
    /// Only ever set in the final frame.
    pub throw3: Option<u8>,
    pub frame_score: Option<u32>,
    pub is_strike: bool,
    pub is_spare: bool,
}

impl Frame {
    /// An empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any throw has been recorded.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.throw1.is_some() || self.throw2.is_some() || self.throw3.is_some()
    }

    /// Slot for throw `throw` (1-based). `None` for anything past 3.
    #[must_use]
    pub fn throw(&self, throw: u8) -> Option<u8> {
        match throw {
            1 => self.throw1,
            2 => self.throw2,
            3 => self.throw3,
            _ => None,
        }
    }

    /// Sum of the throws recorded so far.
    #[must_use]
    pub fn pins_total(&self) -> u32 {
        [self.throw1, self.throw2, self.throw3]
            .into_iter()
            .flatten()
            .map(u32::from)
            .sum()
    }
}

/// A fresh row of `count` frames.
#[must_use]
pub fn empty_frames(count: usize) -> Vec<Frame> {
    vec![Frame::new(); count]
}
