use tracing::subscriber::SetGlobalDefaultError;

/// Installs a compact fmt subscriber as the global default, showing `info!` and above.
pub fn init_logging() -> Result<(), SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt().compact().finish();
    tracing::subscriber::set_global_default(subscriber)
}

/// Scientific notation with a signed, at least two digit exponent, e.g. `6.931e-01`.
pub fn scientific(x: f64, precision: usize) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return match x > 0. {
            true => "Infinity".to_string(),
            false => "-Infinity".to_string(),
        };
    }

    let formatted = format!("{:.*e}", precision, x);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scientific_pads_exponent() {
        assert_eq!(scientific(0.6931471805599453, 3), "6.931e-01");
        assert_eq!(scientific(12345.678, 3), "1.235e+04");
        assert_eq!(scientific(0., 3), "0.000e+00");
        assert_eq!(scientific(1.5e-120, 2), "1.50e-120");
    }

    #[test]
    fn scientific_non_finite() {
        assert_eq!(scientific(f64::INFINITY, 3), "Infinity");
        assert_eq!(scientific(f64::NAN, 3), "NaN");
    }
}
