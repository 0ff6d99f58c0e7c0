use crate::error::{AppError, Result};

/// Validates that an optional reading is a percentage in 0-100.
pub fn validate_percent(label: &str, value: Option<f64>) -> Result<()> {
    if let Some(v) = value {
        if !(0.0..=100.0).contains(&v) {
            return Err(AppError::Validation(format!(
                "{} must be between 0 and 100",
                label
            )));
        }
    }
    Ok(())
}

/// Validates that an optional rating is an integer in 0-100.
pub fn validate_rating(label: &str, value: Option<i32>) -> Result<()> {
    if let Some(v) = value {
        if !(0..=100).contains(&v) {
            return Err(AppError::Validation(format!(
                "{} must be between 0 and 100",
                label
            )));
        }
    }
    Ok(())
}

/// Validates a short required name-like field.
pub fn validate_label(label: &str, value: &str, min: usize) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.len() < min {
        return Err(AppError::Validation(format!(
            "{} must be at least {} characters",
            label, min
        )));
    }
    if trimmed.len() > 255 {
        return Err(AppError::Validation(format!(
            "{} must be at most 255 characters",
            label
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_bounds_are_inclusive() {
        assert!(validate_percent("Activity", Some(0.0)).is_ok());
        assert!(validate_percent("Activity", Some(100.0)).is_ok());
        assert!(validate_percent("Activity", Some(100.1)).is_err());
        assert!(validate_percent("Activity", Some(-0.1)).is_err());
        assert!(validate_percent("Activity", None).is_ok());
    }

    #[test]
    fn labels_need_a_minimum_length() {
        assert!(validate_label("Name", "A", 2).is_err());
        assert!(validate_label("Name", "  A  ", 2).is_err());
        assert!(validate_label("Name", "North field", 2).is_ok());
    }
}
