//! Utility functions shared by the engines

/// Calculate Shannon entropy in bits from a probability distribution.
///
/// H = -Σ(p * log2(p)) for p > 0
///
/// # Examples
///
/// ```
/// use algoviz::utils::entropy_bits;
///
/// // Fair coin carries one bit
/// assert!((entropy_bits(vec![0.5, 0.5]) - 1.0).abs() < 1e-12);
///
/// // Deterministic distribution carries none
/// assert_eq!(entropy_bits(vec![1.0, 0.0]), 0.0);
/// ```
pub fn entropy_bits<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let h: f64 = probabilities
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .sum();
    // -0.0 for a single certain outcome
    h.max(0.0)
}

/// Entropy in bits of a frequency table.
///
/// Returns 0.0 when the counts are empty or sum to zero.
///
/// # Examples
///
/// ```
/// use algoviz::utils::entropy_from_counts;
///
/// // 9 yes / 5 no, the classic play-tennis split
/// let h = entropy_from_counts([9, 5]);
/// assert!((h - 0.940286).abs() < 1e-6);
/// ```
pub fn entropy_from_counts<I>(counts: I) -> f64
where
    I: IntoIterator<Item = usize>,
{
    let counts: Vec<usize> = counts.into_iter().collect();
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    entropy_bits(counts.iter().map(|&c| c as f64 / total as f64))
}

/// Normalize weights to probabilities that sum to 1.0.
///
/// # Returns
///
/// - `Some(Vec<f64>)` containing normalized probabilities if total weight is positive
/// - `None` if total weight is zero, negative or not finite
///
/// # Examples
///
/// ```
/// use algoviz::utils::normalize_weights;
///
/// let normalized = normalize_weights(vec![1.0, 2.0, 1.0]).unwrap();
/// assert_eq!(normalized, vec![0.25, 0.5, 0.25]);
///
/// assert_eq!(normalize_weights(vec![0.0, 0.0]), None);
/// ```
pub fn normalize_weights<I>(weights: I) -> Option<Vec<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let weights: Vec<f64> = weights.into_iter().collect();
    let sum: f64 = weights.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return None;
    }
    Some(weights.iter().map(|&w| w / sum).collect())
}

/// Index of the largest value; the first one wins on exact ties. NaN
/// values are skipped.
///
/// # Examples
///
/// ```
/// use algoviz::utils::argmax_first;
///
/// assert_eq!(argmax_first([1.0, 3.0, 3.0, 2.0]), Some(1));
/// assert_eq!(argmax_first([f64::NAN, 0.2]), Some(1));
/// assert_eq!(argmax_first(std::iter::empty::<f64>()), None);
/// ```
pub fn argmax_first<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in values.into_iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Format a cost or score with two decimals.
pub fn format_cost(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a search bound, rendering infinities as ±∞.
pub fn format_bound(value: f64) -> String {
    if value == f64::INFINITY {
        "+∞".to_string()
    } else if value == f64::NEG_INFINITY {
        "-∞".to_string()
    } else {
        format_value(value)
    }
}

/// Format a value without a trailing `.0` for whole numbers.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Squared Euclidean distance between two planar points.
pub fn squared_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}
