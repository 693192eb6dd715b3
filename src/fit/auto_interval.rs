use std::cmp::Ordering;

use super::config::FitConfig;
use super::error::FitError;
use super::regression::Moments;
use super::types::FitInterval;

/// Locate the linear phase of a reaction curve.
///
/// See the module documentation for the heuristic. The returned interval
/// always satisfies `stop - start >= min_span` when the series is long
/// enough, and otherwise spans the whole series. The search is quadratic in
/// the series length.
pub fn detect_interval(
    time: &[f64],
    signal: &[f64],
    config: &FitConfig,
) -> Result<FitInterval, FitError> {
    if time.len() != signal.len() {
        return Err(FitError::LengthMismatch {
            time: time.len(),
            signal: signal.len(),
        });
    }

    let len = time.len();
    let full = FitInterval::full(len);
    let min_span = config.effective_min_span();
    if len < 2 || full.span() <= min_span {
        return Ok(full);
    }

    let whole = Moments::from_points(time, signal);
    let trend = if whole.is_degenerate() {
        Ordering::Equal
    } else {
        whole.slope().partial_cmp(&0.0).unwrap_or(Ordering::Equal)
    };

    let prefix = PrefixSums::new(time, signal, whole.mean_t, whole.mean_y);
    let mut best: Option<Candidate> = None;

    for start in 0..len {
        for stop in (start + min_span)..len {
            let moments = prefix.window(start, stop);
            if moments.is_degenerate() {
                continue;
            }
            if !agrees_with_trend(moments.slope(), trend) {
                continue;
            }
            let r_squared = moments.r_squared();
            if r_squared < config.min_r_squared {
                continue;
            }

            let candidate = Candidate {
                interval: FitInterval::new(start, stop),
                rise: moments.slope().abs() * (time[stop] - time[start]),
                r_squared,
            };
            if best.as_ref().map_or(true, |b| candidate.beats(b)) {
                best = Some(candidate);
            }
        }
    }

    match best {
        Some(candidate) => {
            log::debug!(
                "Auto interval [{}, {}] with r^2 = {:.4}",
                candidate.interval.start,
                candidate.interval.stop,
                candidate.r_squared
            );
            Ok(candidate.interval)
        }
        None => {
            log::debug!("No window reached r^2 >= {}, using full series", config.min_r_squared);
            Ok(full)
        }
    }
}

fn agrees_with_trend(slope: f64, trend: Ordering) -> bool {
    match trend {
        Ordering::Greater => slope > 0.0,
        Ordering::Less => slope < 0.0,
        Ordering::Equal => true,
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    interval: FitInterval,
    /// Signal change explained by the fitted line across the window
    rise: f64,
    r_squared: f64,
}

impl Candidate {
    /// Larger rise wins, then better r^2. Earlier start wins remaining ties
    /// because windows are visited in ascending start order.
    fn beats(&self, other: &Candidate) -> bool {
        let tol = 1e-12 * self.rise.max(other.rise);
        if self.rise > other.rise + tol {
            true
        } else if self.rise < other.rise - tol {
            false
        } else {
            self.r_squared > other.r_squared
        }
    }
}

/// Cumulative sums of centered coordinates for O(1) window moments
struct PrefixSums {
    mean_t: f64,
    mean_y: f64,
    u: Vec<f64>,
    v: Vec<f64>,
    uu: Vec<f64>,
    uv: Vec<f64>,
    vv: Vec<f64>,
}

impl PrefixSums {
    fn new(time: &[f64], signal: &[f64], mean_t: f64, mean_y: f64) -> Self {
        let cap = time.len() + 1;
        let mut sums = Self {
            mean_t,
            mean_y,
            u: Vec::with_capacity(cap),
            v: Vec::with_capacity(cap),
            uu: Vec::with_capacity(cap),
            uv: Vec::with_capacity(cap),
            vv: Vec::with_capacity(cap),
        };
        let (mut u, mut v, mut uu, mut uv, mut vv) = (0.0, 0.0, 0.0, 0.0, 0.0);
        sums.push(u, v, uu, uv, vv);
        for (&t, &y) in time.iter().zip(signal) {
            let du = t - mean_t;
            let dv = y - mean_y;
            u += du;
            v += dv;
            uu += du * du;
            uv += du * dv;
            vv += dv * dv;
            sums.push(u, v, uu, uv, vv);
        }
        sums
    }

    fn push(&mut self, u: f64, v: f64, uu: f64, uv: f64, vv: f64) {
        self.u.push(u);
        self.v.push(v);
        self.uu.push(uu);
        self.uv.push(uv);
        self.vv.push(vv);
    }

    fn window(&self, start: usize, stop: usize) -> Moments {
        let n = stop - start + 1;
        let nf = n as f64;
        let range = |s: &Vec<f64>| s[stop + 1] - s[start];
        let su = range(&self.u);
        let sv = range(&self.v);

        Moments {
            n,
            mean_t: self.mean_t + su / nf,
            mean_y: self.mean_y + sv / nf,
            sxx: range(&self.uu) - su * su / nf,
            sxy: range(&self.uv) - su * sv / nf,
            syy: (range(&self.vv) - sv * sv / nf).max(0.0),
        }
    }
}
