//! Pitch-synchronous overlap-add mutators: `skip` (speedup) and `insert`
//! (slowdown), plus the plan for how much unmodified input to forward
//! between mutator invocations.

use crate::{queue::SampleQueue, StreamError};

/// What a single mutator invocation decided to do, so the driver knows how
/// far to advance its read cursor and whether a pass-through run follows.
pub(crate) struct MutationPlan {
    /// How many input samples the driver should advance past (beyond the
    /// period already accounted for by the caller).
    pub advance: usize,
    /// Samples to forward verbatim before the next mutator invocation.
    pub remaining_input_to_copy: usize,
}

/// `speed > 1`: delete one pitch period, cross-fading the seam.
///
/// `view` must contain at least `2 * period` samples.
pub(crate) fn skip(
    out: &mut SampleQueue,
    view: &[f32],
    period: usize,
    speed: f32,
) -> Result<MutationPlan, StreamError> {
    debug_assert!(view.len() >= 2 * period);
    let (new_samples, remaining_input_to_copy) = if speed >= 2.0 {
        let new_samples = (period as f32 / (speed - 1.0)) as usize;
        (new_samples.max(1), 0)
    } else {
        let remaining =
            (period as f32 * (2.0 - speed) / (speed - 1.0)) as usize;
        (period, remaining)
    };
    let mut segment = Vec::with_capacity(new_samples);
    for t in 0 .. new_samples {
        let w_first = (new_samples - t) as f32;
        let w_second = t as f32;
        segment.push(
            (view[t] * w_first + view[t + period] * w_second) / new_samples as f32,
        );
    }
    out.append(&segment)?;
    Ok(MutationPlan { advance: period + new_samples, remaining_input_to_copy })
}

/// `speed < 1`: repeat one pitch period, cross-fading the seam.
///
/// `view` must contain at least `2 * period` samples.
pub(crate) fn insert(
    out: &mut SampleQueue,
    view: &[f32],
    period: usize,
    speed: f32,
) -> Result<MutationPlan, StreamError> {
    debug_assert!(view.len() >= 2 * period);
    let (new_samples, remaining_input_to_copy) = if speed < 0.5 {
        let new_samples = (period as f32 * speed / (1.0 - speed)) as usize;
        (new_samples.max(1), 0)
    } else {
        let remaining =
            (period as f32 * (2.0 * speed - 1.0) / (1.0 - speed)) as usize;
        (period, remaining)
    };
    let mut segment = Vec::with_capacity(period + new_samples);
    segment.extend_from_slice(&view[..period]);
    for t in 0 .. new_samples {
        let w_first = t as f32;
        let w_second = (new_samples - t) as f32;
        segment.push(
            (view[t] * w_first + view[t + period] * w_second) / new_samples as f32,
        );
    }
    out.append(&segment)?;
    Ok(MutationPlan { advance: new_samples, remaining_input_to_copy })
}
