/// Categorical cross-entropy `-Σ t_i ln(p_i)` of a probability vector against a one-hot target.
///
/// Terms with a zero target are skipped so that an underflowed probability on a
/// wrong class contributes nothing instead of `0 * -inf`. An underflowed
/// probability on the true class still yields `+inf`.
pub fn cross_entropy(pred: &[f64], actual: &[f64]) -> f64 {
    let loss = actual
        .iter()
        .zip(pred.iter())
        .filter(|&(&t, _)| t != 0.)
        .map(|(&t, &p)| t * p.ln())
        .sum::<f64>();

    -loss
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
