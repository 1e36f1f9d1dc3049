use crate::utils::math::normal_probability;

/// Arithmetic mean; `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance; `NaN` with fewer than two values.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let center = mean(values);
    let squared: f64 = values.iter().map(|v| (v - center) * (v - center)).sum();
    squared / (values.len() - 1) as f64
}

pub fn std_deviation(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Welch z statistic for the difference between two sample means.
pub fn welch_z(
    mean_a: f64,
    variance_a: f64,
    count_a: usize,
    mean_b: f64,
    variance_b: f64,
    count_b: usize,
) -> f64 {
    if count_a == 0 || count_b == 0 {
        return f64::NAN;
    }
    let pooled = variance_a / count_a as f64 + variance_b / count_b as f64;
    if pooled > 0.0 {
        (mean_a - mean_b) / pooled.sqrt()
    } else if mean_a == mean_b {
        0.0
    } else if mean_a > mean_b {
        f64::INFINITY
    } else {
        f64::NEG_INFINITY
    }
}

/// Two-sided p-value of a standard normal test statistic.
pub fn two_sided_p_value(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    2.0 * (1.0 - normal_probability(z.abs()))
}
