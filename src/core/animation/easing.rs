//! Easing Curves

/// Four-segment piecewise ease-out-bounce over `t` in `[0, 1]`.
///
/// The standard CSS bounce polynomial: a decaying series of parabolic
/// arcs that lands exactly on 1.0 at `t = 1`. Input outside `[0, 1]` is
/// clamped.
pub fn ease_out_bounce(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    let t = t.clamp(0.0, 1.0);
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}
