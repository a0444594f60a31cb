//! IRAF zscale display limits.
//!
//! Picks display limits near the median of an image by fitting a straight
//! line to its sorted pixel sample. Outliers beyond `krej` standard deviations
//! are rejected (and their neighbours with them) for a few iterations, and the
//! resulting slope, divided by the contrast, sets how far the limits reach
//! from the median. Limits never leave the range of the sample.

use ndarray::Array2;

/// Parameters of the zscale algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScaleInterval {
    /// Maximum number of pixels sampled from the image
    pub n_samples: usize,
    /// Scaling of the fitted slope; smaller values widen the limits
    pub contrast: f64,
    /// Largest fraction of the sample that may be rejected
    pub max_reject: f64,
    /// Fewest surviving pixels for the fit to be trusted
    pub min_npixels: usize,
    /// Rejection threshold in standard deviations
    pub krej: f64,
    pub max_iterations: usize,
}

impl Default for ZScaleInterval {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            contrast: 0.25,
            max_reject: 0.5,
            min_npixels: 5,
            krej: 2.5,
            max_iterations: 5,
        }
    }
}

/// Least squares line through the points whose mask entry is false
fn fit_line(samples: &[f64], rejected: &[bool]) -> Option<(f64, f64)> {
    let (mut n, mut sx, mut sy, mut sxx, mut sxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (i, (&y, &bad)) in samples.iter().zip(rejected).enumerate() {
        if bad {
            continue;
        }
        let x = i as f64;
        n += 1.0;
        sx += x;
        sy += y;
        sxx += x * x;
        sxy += x * y;
    }

    let denominator = n * sxx - sx * sx;
    if n < 2.0 || denominator == 0.0 {
        return None;
    }

    let slope = (n * sxy - sx * sy) / denominator;
    let intercept = (sy - slope * sx) / n;
    Some((slope, intercept))
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

impl ZScaleInterval {
    /// Regularly strided sample of the finite pixels, sorted ascending
    ///
    /// Non-finite pixels are dropped before the stride is chosen, so masked
    /// regions do not thin out the sample.
    fn sample(&self, data: &Array2<f64>) -> Vec<f64> {
        let finite: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
        let stride = (finite.len() / self.n_samples.max(1)).max(1);
        let mut samples: Vec<f64> = finite
            .into_iter()
            .step_by(stride)
            .take(self.n_samples)
            .collect();
        samples.sort_by(f64::total_cmp);
        samples
    }

    /// Display limits `(vmin, vmax)`, or `None` if the image has no finite pixels
    pub fn get_limits(&self, data: &Array2<f64>) -> Option<(f64, f64)> {
        let samples = self.sample(data);
        let npix = samples.len();
        let (mut vmin, mut vmax) = (*samples.first()?, *samples.last()?);

        let min_pix = self
            .min_npixels
            .max((npix as f64 * self.max_reject) as usize);
        let n_grow = ((npix as f64 * 0.01) as usize).max(1);

        let mut rejected = vec![false; npix];
        let mut n_good = npix;
        let mut last_n_good = npix + 1;
        let mut fit = None;

        for _ in 0..self.max_iterations {
            if n_good >= last_n_good || n_good < min_pix {
                break;
            }

            let Some((slope, intercept)) = fit_line(&samples, &rejected) else {
                break;
            };
            fit = Some((slope, intercept));

            let residuals: Vec<f64> = samples
                .iter()
                .enumerate()
                .map(|(i, &v)| v - (intercept + slope * i as f64))
                .collect();

            let good: Vec<f64> = residuals
                .iter()
                .zip(&rejected)
                .filter(|(_, bad)| !**bad)
                .map(|(r, _)| *r)
                .collect();
            let mean = good.iter().sum::<f64>() / good.len() as f64;
            let variance = good.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / good.len() as f64;
            let threshold = self.krej * variance.sqrt();

            for (bad, r) in rejected.iter_mut().zip(&residuals) {
                if *r < -threshold || *r > threshold {
                    *bad = true;
                }
            }

            rejected = grow_mask(&rejected, n_grow);
            last_n_good = n_good;
            n_good = rejected.iter().filter(|&&bad| !bad).count();
        }

        if let Some((slope, _)) = fit {
            if n_good >= min_pix {
                let slope = if self.contrast > 0.0 {
                    slope / self.contrast
                } else {
                    slope
                };
                let center = ((npix - 1) / 2) as f64;
                let median = median_of_sorted(&samples);
                vmin = vmin.max(median - (center - 1.0) * slope);
                vmax = vmax.min(median + (npix as f64 - center) * slope);
            }
        }

        Some((vmin, vmax))
    }
}

/// Mark every pixel within a centered window of a rejected pixel as rejected
fn grow_mask(rejected: &[bool], width: usize) -> Vec<bool> {
    let n = rejected.len();
    let offset = (width - 1) / 2;
    (0..n)
        .map(|i| {
            (0..width).any(|m| {
                (i + offset)
                    .checked_sub(m)
                    .is_some_and(|j| j < n && rejected[j])
            })
        })
        .collect()
}
