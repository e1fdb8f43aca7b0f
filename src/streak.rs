//! Streak calculation.
//!
//! A streak is the unbroken run of on-time contacts ending at the most
//! recent one, not the longest run anywhere in history.

use chrono::NaiveDate;

/// Tolerance around the cadence for a gap to count as on-time, in
/// days. Inclusive on both sides.
pub const STREAK_TOLERANCE_DAYS: i64 = 2;

/// Count consecutive on-time contacts anchored at the most recent one.
///
/// Returns 0 for an empty history, or when the most recent contact is
/// itself more than `frequency_days` old. Otherwise walks history from
/// newest to oldest: each gap between consecutive contacts must fall
/// within `frequency_days` ± [`STREAK_TOLERANCE_DAYS`] to extend the
/// streak, and the walk stops at the first gap outside the window.
pub fn current_streak(history: &[NaiveDate], frequency_days: u32, today: NaiveDate) -> u32 {
    if history.is_empty() {
        return 0;
    }

    let mut sorted = history.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let freq = i64::from(frequency_days);

    // The anchor contact must still be within the cadence window.
    if (today - sorted[0]).num_days() > freq {
        return 0;
    }

    let mut streak = 1;
    for pair in sorted.windows(2) {
        let gap = (pair[0] - pair[1]).num_days();
        if gap >= freq - STREAK_TOLERANCE_DAYS && gap <= freq + STREAK_TOLERANCE_DAYS {
            streak += 1;
        } else {
            break;
        }
    }

    streak
}
