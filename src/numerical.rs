//! Gaussian primitives for the moment-matched rating update.
//!
//! The `v_*` and `w_*` functions follow the usual TrueSkill convention: for a
//! standardized performance difference `d ~ N(t, 1)` conditioned on an observed
//! outcome, the posterior mean is `t + v(t, eps)` and the posterior variance is
//! `1 - w(t, eps)`.

use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::{FRAC_2_SQRT_PI, SQRT_2};

/// Number of standard deviations into a tail beyond which density/mass ratios
/// are evaluated with Laplace's continued fraction instead of through `erfc`.
pub const TAIL_CUTOFF: f64 = 5.0;

// Terms of the continued fraction; plenty for arguments beyond TAIL_CUTOFF
const MILLS_DEPTH: u32 = 64;

// Truncation intervals narrower than this, scaled by their distance from the
// origin, have their moments expanded in series
const NARROW_INTERVAL: f64 = 1e-2;

pub fn standard_normal_pdf(z: f64) -> f64 {
    const NORMALIZE: f64 = 0.5 * FRAC_2_SQRT_PI / SQRT_2;
    NORMALIZE * (-0.5 * z * z).exp()
}

pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
    // Less numerically stable: 0.5 + 0.5 * statrs::function::erf::erf(z / SQRT_2)
}

/// Upper tail `1 - cdf(z)`, without cancellation for large positive `z`.
pub fn standard_normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / SQRT_2)
}

pub fn standard_normal_cdf_inv(prob: f64) -> f64 {
    -SQRT_2 * erfc_inv(2. * prob)
    // Equivalently: SQRT_2 * statrs::function::erf::erf_inv(2. * prob - 1.)
}

// For z > 0, pdf(z) / sf(z) = z + mills_remainder(z), where
// mills_remainder(z) = 1 / (z + 2 / (z + 3 / (z + ...))).
// Only accurate in the tail, which is the only place it is used.
fn mills_remainder(z: f64) -> f64 {
    let mut acc = z;
    for k in (2..=MILLS_DEPTH).rev() {
        acc = z + k as f64 / acc;
    }
    acc.recip()
}

// Mean and variance of a standard normal truncated to [lo, hi], assuming lo + hi >= 0.
fn truncated_moments(lo: f64, hi: f64) -> (f64, f64) {
    let (mid, half_width) = (0.5 * (lo + hi), 0.5 * (hi - lo));
    if half_width * (1. + mid) < NARROW_INTERVAL {
        // Series in the half-width about the midpoint; the closed forms below would
        // subtract nearly equal masses and densities
        let (h2, m2) = (half_width * half_width, mid * mid);
        let mean = mid * (1. - h2 / 3. + (m2 + 2.) * h2 * h2 / 45.);
        let var = h2 / 3. - (3. * m2 + 2.) * h2 * h2 / 45.;
        return (mean, var.max(0.));
    }
    let (mean, second_moment) = if lo > TAIL_CUTOFF {
        // Everything rescaled by pdf(lo), which may underflow on its own
        let ratio = (-0.5 * (hi - lo) * (hi + lo)).exp();
        let mills_lo = (lo + mills_remainder(lo)).recip();
        let mills_hi = (hi + mills_remainder(hi)).recip();
        let mass = mills_lo - ratio * mills_hi;
        ((1. - ratio) / mass, 1. + (lo - ratio * hi) / mass)
    } else {
        let mass = if lo > 0. {
            standard_normal_sf(lo) - standard_normal_sf(hi)
        } else {
            standard_normal_cdf(hi) - standard_normal_cdf(lo)
        };
        let (pdf_lo, pdf_hi) = (standard_normal_pdf(lo), standard_normal_pdf(hi));
        (
            (pdf_lo - pdf_hi) / mass,
            1. + (lo * pdf_lo - hi * pdf_hi) / mass,
        )
    };
    (mean, (second_moment - mean * mean).max(0.))
}

fn win_correction(t: f64, eps: f64) -> (f64, f64) {
    // d > eps  <=>  d - t > x
    let x = eps - t;
    let (v, gap) = if x > TAIL_CUTOFF {
        let rem = mills_remainder(x);
        (x + rem, rem)
    } else {
        let v = standard_normal_pdf(x) / standard_normal_sf(x);
        (v, v - x)
    };
    (v, (v * gap).clamp(0., 1.))
}

fn draw_correction(t: f64, eps: f64) -> (f64, f64) {
    if eps <= 0. {
        // A draw with no margin pins the difference at exactly zero
        return (-t, 1.);
    }
    // d - t lies in [-eps - t, eps - t]; mirror it so the interval sits right of the origin
    let a = t.abs();
    let (mean, var) = truncated_moments(a - eps, a + eps);
    let v = if t >= 0. { -mean } else { mean };
    (v, (1. - var).clamp(0., 1.))
}

/// Mean correction after observing that the difference exceeded `eps`.
pub fn v_win(t: f64, eps: f64) -> f64 {
    win_correction(t, eps).0
}

/// Variance correction after observing that the difference exceeded `eps`.
pub fn w_win(t: f64, eps: f64) -> f64 {
    win_correction(t, eps).1
}

/// Mean correction after observing that the difference fell within `±eps`.
pub fn v_draw(t: f64, eps: f64) -> f64 {
    draw_correction(t, eps).0
}

/// Variance correction after observing that the difference fell within `±eps`.
pub fn w_draw(t: f64, eps: f64) -> f64 {
    draw_correction(t, eps).1
}

/// Performance gap below which a contest between `num_players` players with
/// performance noise `beta` ends in a draw with probability `draw_probability`,
/// assuming both sides are equally skilled.
pub fn draw_margin(draw_probability: f64, beta: f64, num_players: usize) -> f64 {
    let z = standard_normal_cdf_inv(0.5 * (draw_probability + 1.));
    (z * (num_players as f64).sqrt() * beta).max(0.)
}

#[cfg(test)]
mod test {
    use super::*;

    const TOL: f64 = 1e-6;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOL,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_normal_basics() {
        assert_close(standard_normal_pdf(0.), 0.3989422804014327);
        assert_close(standard_normal_cdf(0.), 0.5);
        assert_close(standard_normal_cdf(1.), 0.8413447460685429);
        assert_close(standard_normal_sf(1.), 0.15865525393145707);
        for &p in &[0.01, 0.3, 0.5, 0.55, 0.975] {
            assert_close(standard_normal_cdf(standard_normal_cdf_inv(p)), p);
        }
        assert!(standard_normal_sf(40.) > 0.);
    }

    #[test]
    fn test_win_reference_values() {
        // (t, eps, v, w), computed with 50-digit arithmetic
        let cases = [
            (0., 0., 0.7978845608028654, 0.6366197723675814),
            (1., 0., 0.2875999709391784, 0.3703137142233946),
            (0.5, 0.2, 0.6172208536127345, 0.5661278382182529),
            (-1., 0.1, 1.6057971722098505, 0.8122076688463167),
            (-8., 0.3, 8.417213965503613, 0.9866150273890658),
            (-30., 0.5, 30.53271677066016, 0.9989318922172501),
            (3., 0.2, 0.007935728403317318, 0.022283015314579706),
        ];
        for &(t, eps, v, w) in &cases {
            assert_close(v_win(t, eps), v);
            assert_close(w_win(t, eps), w);
        }
    }

    #[test]
    fn test_draw_reference_values() {
        let cases = [
            (0., 0.5, 0., 0.9194108453991883),
            (0.5, 0.5, -0.4598622292864265, 0.9203481751514887),
            (-1., 0.3, 0.9705309109181716, 0.9708729648466766),
            (8., 0.5, -7.6286734924015756, 0.9841680542980001),
            (-12., 1.0, 11.08946502965157, 0.9921193185351139),
            (30., 0.5, -29.53382084416789, 0.9988587524558249),
        ];
        for &(t, eps, v, w) in &cases {
            assert_close(v_draw(t, eps), v);
            assert_close(w_draw(t, eps), w);
        }
    }

    #[test]
    fn test_narrow_draw_reference_values() {
        let cases = [
            (0., 1e-4, 0., 0.9999999966666667),
            (0.3, 1e-4, -0.299999999, 0.9999999966666667),
            (4.99, 1e-4, -4.989999983366667, 0.9999999966666668),
            (5.01, 1e-4, -5.0099999833, 0.9999999966666668),
            (10., 1e-4, -9.999999966666669, 0.9999999966666673),
            (0.3, 0.007, -0.29999509995, 0.9999836668),
        ];
        for &(t, eps, v, w) in &cases {
            assert_close(v_draw(t, eps), v);
            assert_close(w_draw(t, eps), w);
        }
    }

    #[test]
    fn test_draw_converges_as_margin_vanishes() {
        for &t in &[0., 0.3, 4.99, 5.01, 10., -10.] {
            let mut prev_gap = f64::INFINITY;
            for &eps in &[1e-2, 1e-4, 1e-8, 1e-17] {
                let (v, w) = (v_draw(t, eps), w_draw(t, eps));
                assert!(v.is_finite() && w.is_finite(), "t = {}, eps = {}", t, eps);
                assert!((0. ..=1.).contains(&w));
                // Shrinking the margin only moves the correction closer to (-t, 1)
                let gap = (v + t).abs() + (1. - w);
                assert!(gap <= prev_gap, "t = {}, eps = {}", t, eps);
                prev_gap = gap;
            }
            assert!((v_draw(t, 1e-17) + t).abs() < 1e-12);
            assert_eq!(w_draw(t, 1e-17), 1.);
        }
    }

    #[test]
    fn test_continuous_across_tail_cutoff() {
        let eps = 0.25;
        let (below, above) = (TAIL_CUTOFF - 1e-9, TAIL_CUTOFF + 1e-9);
        assert_close(v_win(eps - below, eps), v_win(eps - above, eps));
        assert_close(w_win(eps - below, eps), w_win(eps - above, eps));
        assert_close(v_draw(eps + below, eps), v_draw(eps + above, eps));
        assert_close(w_draw(eps + below, eps), w_draw(eps + above, eps));
    }

    #[test]
    fn test_extreme_tails_are_finite() {
        for &t in &[-1e6, -500., -40., 40., 500., 1e6] {
            for &eps in &[0., 0.1, 2.] {
                let (v, w) = (v_win(t, eps), w_win(t, eps));
                assert!(v.is_finite() && v >= 0.);
                assert!((0. ..=1.).contains(&w));
                let (v, w) = (v_draw(t, eps), w_draw(t, eps));
                assert!(v.is_finite());
                assert!((0. ..=1.).contains(&w));
            }
        }
    }

    #[test]
    fn test_draw_symmetry() {
        for &t in &[0.3, 1.7, 6.5, 25.] {
            assert_close(v_draw(-t, 0.4), -v_draw(t, 0.4));
            assert_close(w_draw(-t, 0.4), w_draw(t, 0.4));
        }
    }

    #[test]
    fn test_draw_margin() {
        assert_eq!(draw_margin(0., 4., 2), 0.);
        // Two players with beta = 25/6 and a 10% draw rate give the familiar ~0.74
        assert_close(
            draw_margin(0.1, 25. / 6., 2),
            standard_normal_cdf_inv(0.55) * 2f64.sqrt() * 25. / 6.,
        );
        assert!(draw_margin(0.1, 1., 8) > draw_margin(0.1, 1., 2));
    }
}
