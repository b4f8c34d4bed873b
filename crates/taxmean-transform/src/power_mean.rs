//! Generalized (power) mean.
//!
//! For exponent `p` the power mean of `x_1..x_n` is
//! `(sum(|x_i|^p) / n)^(1/p)`. Special cases:
//!
//! - `p = 1`: arithmetic mean
//! - `p = 0`: geometric mean (the limit as `p → 0`)
//! - `p = +inf`: maximum
//!
//! Values are sorted before summation and summed with Neumaier compensation,
//! so the result does not depend on the order the values arrive in.

use taxmean_model::{Abundance, PowerExponent};

/// Compensated summation (Neumaier's variant of Kahan summation).
pub fn compensated_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for x in values {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Power mean of `values`; `None` for an empty slice.
pub fn power_mean(values: &[f64], power: PowerExponent) -> Option<f64> {
    match values {
        [] => return None,
        [single] => return Some(*single),
        _ => {}
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;

    let p = match power {
        PowerExponent::Infinite => {
            return Some(sorted.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        }
        PowerExponent::Finite(p) => p,
    };

    // A zero drives every mean with p <= 0 to zero.
    if p <= 0 && sorted.iter().any(|x| *x == 0.0) {
        return Some(0.0);
    }

    if p == 0 {
        let log_sum = compensated_sum(sorted.iter().map(|x| x.abs().ln()));
        return Some((log_sum / n).exp());
    }

    // Scale by the dominant magnitude so |x|^p stays finite for large |p|.
    let magnitudes = sorted.iter().map(|x| x.abs());
    let scale = match p {
        2.. => magnitudes.fold(0.0, f64::max),
        ..=-2 => magnitudes.fold(f64::INFINITY, f64::min),
        _ => 1.0,
    };
    if scale == 0.0 {
        return Some(0.0);
    }

    let p = f64::from(p);
    let sum = compensated_sum(sorted.iter().map(|x| (x.abs() / scale).powf(p)));
    Some(scale * (sum / n).powf(1.0 / p))
}

/// Power mean over cells, skipping missing ones.
///
/// Returns [`Abundance::Missing`] when no cell is present.
pub fn power_mean_of_cells(cells: &[Abundance], power: PowerExponent) -> Abundance {
    let present: Vec<f64> = cells.iter().filter_map(|cell| cell.value()).collect();
    power_mean(&present, power).map_or(Abundance::Missing, Abundance::Present)
}
