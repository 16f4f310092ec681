//! Bowling scoring over one player's row of frames.
//!
//! ## Rules
//!
//! - Strike (non-final frame): 10 plus the next two throws. When the next
//!   frame is itself a strike and not the final frame, the second bonus
//!   throw is the first throw of the frame after it.
//! - Spare: 10 plus the next throw.
//! - Open frame: the sum of its two throws.
//! - Final frame: the plain sum of its throws. A strike on the first throw
//!   or a spare on the second grants a third throw.
//!
//! Scores are recalculated for the whole row after every throw. A frame
//! whose bonus throws are not in yet keeps `frame_score == None`.

use super::cursor::TurnCursor;
use super::frame::{Frame, PINS};

/// Check if a frame has received every throw it is entitled to.
#[must_use]
pub fn is_frame_completed(frame: &Frame, is_final: bool) -> bool {
    if !is_final {
        return frame.is_strike || (frame.throw1.is_some() && frame.throw2.is_some());
    }
    if frame.is_strike || frame.is_spare {
        frame.throw3.is_some()
    } else {
        frame.throw1.is_some() && frame.throw2.is_some()
    }
}

/// Score of frame `index`, or `None` while it depends on missing throws.
#[must_use]
pub fn score_frame(frames: &[Frame], index: usize) -> Option<u32> {
    let frame = frames.get(index)?;
    let last = frames.len() - 1;

    if index == last {
        return Some(frame.pins_total());
    }

    let next = frames.get(index + 1)?;
    let strike = u32::from(PINS);

    if frame.is_strike {
        if next.is_strike && index + 1 != last {
            let after = frames.get(index + 2)?;
            return after.throw1.map(|t| 2 * strike + u32::from(t));
        }
        return Some(strike + u32::from(next.throw1?) + u32::from(next.throw2?));
    }

    if frame.is_spare {
        return next.throw1.map(|t| strike + u32::from(t));
    }

    Some(u32::from(frame.throw1?) + u32::from(frame.throw2?))
}

/// Recompute `frame_score` for every started frame.
pub fn recalculate_scores(frames: &mut [Frame]) {
    for index in 0..frames.len() {
        if frames[index].is_started() {
            let score = score_frame(frames, index);
            frames[index].frame_score = score;
        }
    }
}

/// Running total. Pending frames count as zero.
#[must_use]
pub fn total_score(frames: &[Frame]) -> u32 {
    frames.iter().filter_map(|frame| frame.frame_score).sum()
}

/// Record `pins` at `cursor` in the acting player's row and return where
/// the next throw goes.
///
/// The row's scores are recalculated; a completed frame hands the turn to
/// the other player. `pins` must already be validated to `0..=10`.
pub fn apply_throw(frames: &mut [Frame], cursor: TurnCursor, pins: u8) -> TurnCursor {
    let is_final = cursor.frame + 1 == frames.len();
    let Some(frame) = frames.get_mut(cursor.frame) else {
        return cursor;
    };

    let mut next = cursor;
    match cursor.throw {
        1 => {
            frame.throw1 = Some(pins);
            frame.is_strike = pins == PINS;
            if !frame.is_strike || is_final {
                next = cursor.with_throw(2);
            }
        }
        2 => {
            frame.throw2 = Some(pins);
            frame.is_spare = frame
                .throw1
                .is_some_and(|first| first != PINS && first + pins == PINS);
            if is_final && (frame.throw1 == Some(PINS) || frame.is_spare) {
                next = cursor.with_throw(3);
            }
        }
        _ => frame.throw3 = Some(pins),
    }

    recalculate_scores(frames);

    if is_frame_completed(&frames[cursor.frame], is_final) {
        next = cursor.next_turn();
    }
    next
}
