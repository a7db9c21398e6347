/// Logistic sigmoid, `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1. / (1. + (-x).exp())
}

/// Derivative of the sigmoid expressed through its output `s = sigmoid(x)`.
pub fn d_sigmoid(s: f64) -> f64 {
    s * (1. - s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sigmoid_is_centered() {
        assert_eq!(sigmoid(0.), 0.5);
        assert_eq!(d_sigmoid(0.5), 0.25);
    }

    #[test]
    fn sigmoid_is_symmetric() {
        for x in [0.1, 1., 3.5, 12.] {
            assert_abs_diff_eq!(sigmoid(x) + sigmoid(-x), 1., epsilon = 1e-12);
        }
    }
}
