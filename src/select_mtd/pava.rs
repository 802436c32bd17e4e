//----------------------------------------
// Isotonic regression
//----------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct IsotonicFit {
    /// Fitted non-decreasing values, one per input
    pub fitted: Vec<f64>,
    /// Index of the last element of each pooled block
    pub knots: Vec<usize>,
}

struct Block {
    weighted_sum: f64,
    weight: f64,
    end: usize,
}

impl Block {
    fn mean(&self) -> f64 {
        self.weighted_sum / self.weight
    }
}

/// Weighted pool-adjacent-violators fit of a non-decreasing sequence.
/// `values` and `weights` have equal length; weights are positive.
pub fn pava(values: &[f64], weights: &[f64]) -> IsotonicFit {
    let mut blocks: Vec<Block> = Vec::with_capacity(values.len());

    for (i, (&v, &w)) in values.iter().zip(weights).enumerate() {
        blocks.push(Block {
            weighted_sum: v * w,
            weight: w,
            end: i,
        });
        // Pool backwards while the last two blocks violate the ordering
        while let [.., prev, last] = blocks.as_mut_slice()
            && prev.mean() > last.mean()
        {
            prev.weighted_sum += last.weighted_sum;
            prev.weight += last.weight;
            prev.end = last.end;
            blocks.pop();
        }
    }

    let mut fitted = Vec::with_capacity(values.len());
    for block in blocks.iter() {
        fitted.resize(block.end + 1, block.mean());
    }

    IsotonicFit {
        fitted,
        knots: blocks.iter().map(|b| b.end).collect(),
    }
}

/// Evaluates the fit at every index by linear interpolation between adjacent
/// knots. Indices before the first knot take the first block's value.
pub fn interpolate_knots(fit: &IsotonicFit) -> Vec<f64> {
    let n = fit.fitted.len();
    let Some(&first_knot) = fit.knots.first() else {
        return vec![];
    };

    let mut estimates = vec![fit.fitted[first_knot]; n];
    for pair in fit.knots.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        let (y_lo, y_hi) = (fit.fitted[lo], fit.fitted[hi]);
        for x in lo..=hi {
            let frac = (x - lo) as f64 / (hi - lo) as f64;
            estimates[x] = y_lo + frac * (y_hi - y_lo);
        }
    }
    estimates
}
