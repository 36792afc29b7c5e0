use crate::{
    error::PredictionError,
    model::Regressor,
    record::{Frame, Record},
};

/// A successful prediction together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub premium: f64,
    pub record: Record,
}

impl Prediction {
    /// The premium as displayed to the operator.
    pub fn formatted(&self) -> String {
        format_premium(self.premium)
    }
}

/// Runs the model on a single-row frame built from `record`.
///
/// The frame's columns follow the record's order, which the form keeps equal
/// to the schema's feature order.
///
/// # Errors
/// Returns `PredictionError` if the model rejects the input, returns nothing,
/// or returns a non-finite value.
pub fn predict(record: &Record, model: &dyn Regressor) -> Result<Prediction, PredictionError> {
    let frame = Frame::from_record(record);
    log::debug!("predicting on {} column(s)", frame.columns().len());

    let premium = model
        .predict(&frame)?
        .first()
        .copied()
        .ok_or(PredictionError::EmptyOutput)?;

    if !premium.is_finite() {
        return Err(PredictionError::NonFinite {
            column: "prediction".into(),
        });
    }

    log::info!("predicted premium {premium:.2}");
    Ok(Prediction {
        premium,
        record: record.clone(),
    })
}

/// Formats an amount as rupees with thousands separators and two decimals,
/// e.g. `₹42,000.00` or `₹-1,234.50`.
pub fn format_premium(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("₹{sign}{grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_grouping() {
        assert_eq!(format_premium(42_000.0), "₹42,000.00");
        assert_eq!(format_premium(1_234_567.891), "₹1,234,567.89");
        assert_eq!(format_premium(999.999), "₹1,000.00");
        assert_eq!(format_premium(12.5), "₹12.50");
        assert_eq!(format_premium(0.0), "₹0.00");
    }

    #[test]
    fn formats_negatives_after_symbol() {
        assert_eq!(format_premium(-1_234.5), "₹-1,234.50");
        assert_eq!(format_premium(-0.001), "₹0.00");
    }
}
