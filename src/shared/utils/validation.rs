use rust_decimal::Decimal;

use crate::shared::errors::AppError;

/// Upper bound implied by NUMERIC(7, 2) price/discount columns.
const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

pub struct Validator;

impl Validator {
    pub fn validate_book_name(name: &str) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Book name cannot be empty".to_string(),
            ));
        }
        if name.len() > 255 {
            return Err(AppError::ValidationError(
                "Book name too long (max 255 characters)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_author_name(author_name: &str) -> Result<(), AppError> {
        if author_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Author name cannot be empty".to_string(),
            ));
        }
        if author_name.len() > 255 {
            return Err(AppError::ValidationError(
                "Author name too long (max 255 characters)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_price(price: Decimal) -> Result<(), AppError> {
        if price.is_sign_negative() {
            return Err(AppError::ValidationError(
                "Price cannot be negative".to_string(),
            ));
        }
        if price >= MAX_AMOUNT {
            return Err(AppError::ValidationError(
                "Price must be below 100000".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_discount(discount: Decimal) -> Result<(), AppError> {
        if discount.is_sign_negative() {
            return Err(AppError::ValidationError(
                "Discount cannot be negative".to_string(),
            ));
        }
        if discount >= MAX_AMOUNT {
            return Err(AppError::ValidationError(
                "Discount must be below 100000".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_rate(rate: i16) -> Result<(), AppError> {
        if !(1..=5).contains(&rate) {
            return Err(AppError::ValidationError(
                "Rate must be between 1 and 5".to_string(),
            ));
        }
        Ok(())
    }
}
