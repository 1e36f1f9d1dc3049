use std::f64::consts::PI;

/// Incremental estimator of a univariate Gaussian, updated one weighted
/// observation at a time.
#[derive(Debug, Clone, Default)]
pub struct GaussianEstimator {
    weight_sum: f64,
    mean: f64,
    variance_sum: f64,
}

impl GaussianEstimator {
    pub fn new() -> Self {
        GaussianEstimator::default()
    }

    /// Folds `value` into the running mean and variance. Missing values and
    /// zero weights are ignored.
    pub fn add_observation(&mut self, value: f64, weight: f64) {
        if value.is_nan() || weight <= 0.0 {
            return;
        }
        if self.weight_sum > 0.0 {
            self.weight_sum += weight;
            let previous_mean = self.mean;
            self.mean += weight * (value - previous_mean) / self.weight_sum;
            self.variance_sum += weight * (value - previous_mean) * (value - self.mean);
        } else {
            self.mean = value;
            self.weight_sum = weight;
            self.variance_sum = 0.0;
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.weight_sum
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        if self.weight_sum > 1.0 {
            self.variance_sum / (self.weight_sum - 1.0)
        } else {
            0.0
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Density of the fitted Gaussian at `value`. With zero variance the
    /// estimate degenerates to an indicator on the mean.
    pub fn probability_density(&self, value: f64) -> f64 {
        if self.weight_sum == 0.0 {
            return 0.0;
        }
        let std_dev = self.std_dev();
        if std_dev > 0.0 {
            let diff = value - self.mean;
            (1.0 / ((2.0 * PI).sqrt() * std_dev))
                * (-(diff * diff) / (2.0 * std_dev * std_dev)).exp()
        } else if value == self.mean {
            1.0
        } else {
            0.0
        }
    }
}
