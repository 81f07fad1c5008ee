//! Pitch-period estimation via the Average Magnitude Difference Function.

/// Find the period (in samples) minimizing the normalized AMDF criterion
/// `D(p)/p` over `p` in `{lo, lo+stride, lo+2*stride, ..., <= hi}`, where
/// `D(p) = sum_{i=0,stride,2*stride,...,i<p} |s[i] - s[i+p]|`.
///
/// Ties go to the first (smallest) candidate examined: `p` only replaces the
/// running best when it is *strictly* better, matching the spec's delayed-
/// division tie-break (`D < min_diff * p` before dividing).
///
/// # Panics
///
/// Panics in debug builds if `s` is too short to evaluate the largest
/// candidate period (`hi`) against `hi` samples of lookahead; this is a
/// programming error in the caller, not a reportable runtime condition.
fn amdf_in_range(s: &[f32], lo: usize, hi: usize, stride: usize) -> usize {
    debug_assert!(lo <= hi);
    debug_assert!(stride >= 1);
    debug_assert!(s.len() >= hi + hi, "caller must supply 2*max_period lookahead");
    let mut best_period = 0usize;
    let mut min_diff = 0.0f32;
    let mut p = lo;
    while p <= hi {
        let mut diff = 0.0f32;
        let mut i = 0usize;
        while i < p {
            diff += (s[i] - s[i + p]).abs();
            i += stride;
        }
        if best_period == 0 || diff < min_diff * p as f32 {
            best_period = p;
            min_diff = diff / p as f32;
        }
        p += stride;
    }
    best_period
}

/// Two-pass AMDF pitch-period search: a decimated coarse pass over the full
/// `[min_period, max_period]` range, followed by a full-resolution fine pass
/// narrowed to within `AMDF_RANGE` of the coarse result.
///
/// `s` must contain at least `2 * max_period` readable samples, which the
/// caller (the stream driver) guarantees by only invoking this once
/// `max_required` samples are buffered.
pub(crate) fn find_pitch_period(
    s: &[f32],
    min_period: usize,
    max_period: usize,
    amdf_freq: u32,
    amdf_range: f32,
    sample_rate: u32,
) -> usize {
    let skip = (sample_rate / amdf_freq).max(1) as usize;
    let coarse = amdf_in_range(s, min_period, max_period, skip);
    let fine_lo =
        ((coarse as f32 * (1.0 - amdf_range)).floor() as usize).max(min_period);
    let fine_hi =
        ((coarse as f32 * (1.0 + amdf_range)).ceil() as usize).min(max_period);
    amdf_in_range(s, fine_lo, fine_hi, 1)
}
