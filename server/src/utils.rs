use super::error::AppError;

/// An email doubles as the primary key in every table, so a blank one would
/// create a phantom row.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::MalformedPayload);
    }

    Ok(())
}

pub fn validate_account(email: &str, password: &str) -> Result<(), AppError> {
    validate_email(email)?;

    if password.is_empty() {
        return Err(AppError::MalformedPayload);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_fields_are_rejected() {
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_account("a@b.c", "").is_err());
        assert!(validate_account("a@b.c", "secret").is_ok());
    }
}
