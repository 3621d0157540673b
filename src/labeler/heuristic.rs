use crate::types::EpochSeconds;

/// Gap between consecutive transactions that raises a provisional flag.
pub const FLAG_GAP_SECONDS: EpochSeconds = 7 * 24 * 60 * 60;

/// Assigns a provisional fraud flag to each timestamp.
///
/// The input must be sorted ascending. The first entry is always flagged;
/// every later entry is flagged when its gap from the previous entry is seven
/// days or more. This is a proxy label that only exists to drive target
/// encoding; it is never the pipeline's output.
pub fn label_time_gaps(timestamps: &[EpochSeconds]) -> Vec<u8> {
    debug_assert!(timestamps.windows(2).all(|pair| pair[0] <= pair[1]));

    let mut flags = Vec::with_capacity(timestamps.len());
    let mut previous: Option<EpochSeconds> = None;

    for &timestamp in timestamps {
        let flag = match previous {
            None => 1,
            Some(previous) if timestamp - previous >= FLAG_GAP_SECONDS => 1,
            Some(_) => 0
        };

        flags.push(flag);
        previous = Some(timestamp);
    }

    flags
}
