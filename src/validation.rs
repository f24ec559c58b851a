use validator::ValidationError;

/// Validates that an amount is positive (greater than 0)
pub fn validate_positive_amount(amount: &rust_decimal::Decimal) -> Result<(), ValidationError> {
    if *amount <= rust_decimal::Decimal::ZERO {
        let mut error = ValidationError::new("invalid_amount");
        error.message = Some("Amount must be greater than 0".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_positive_amount_accepted() {
        let amount = Decimal::from_str("12.50").unwrap();
        assert!(validate_positive_amount(&amount).is_ok());
    }

    #[test]
    fn test_zero_amount_rejected() {
        assert!(validate_positive_amount(&Decimal::ZERO).is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let amount = Decimal::from_str("-3.99").unwrap();
        assert!(validate_positive_amount(&amount).is_err());
    }
}
