/// Percentage of positions where `prediction` and `actual` agree.
pub fn accuracy<T: Copy + PartialEq>(prediction: &[T], actual: &[T]) -> f64 {
    let hits = prediction
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();

    (hits as f64 / prediction.len() as f64) * 100.
}
