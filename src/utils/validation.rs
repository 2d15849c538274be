use crate::utils::error::CustomError;
use regex::Regex;

pub fn validate_password(password: &str) -> Result<(), CustomError> {
    // Check password length
    if password.len() < 8 || password.len() > 20 {
        return Err(CustomError::ValidationError(
            "Password must be between 8 and 20 characters long.".into(),
        ));
    }

    // Check for at least one lowercase letter, one uppercase letter, and one digit
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !has_lowercase || !has_uppercase || !has_digit {
        return Err(CustomError::ValidationError(
            "Password must include at least one uppercase letter, one lowercase letter, and one number.".into(),
        ));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CustomError> {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map_err(|e| CustomError::InternalServerError(format!("Invalid email regex: {}", e)))?;

    if !re.is_match(email) {
        return Err(CustomError::ValidationError(
            "Email address is not valid.".into(),
        ));
    }

    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), CustomError> {
    let trimmed = username.trim();
    if trimmed.len() < 3 || trimmed.len() > 30 {
        return Err(CustomError::ValidationError(
            "Username must be between 3 and 30 characters long.".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_and_long_passwords() {
        assert!(validate_password("Ab1").is_err());
        assert!(validate_password("Abcdefgh1Abcdefgh1Abcdefgh1").is_err());
    }

    #[test]
    fn requires_mixed_case_and_digit() {
        assert!(validate_password("alllowercase1").is_err());
        assert!(validate_password("ALLUPPERCASE1").is_err());
        assert!(validate_password("NoDigitsHere").is_err());
        assert!(validate_password("GoodPass12").is_ok());
    }

    #[test]
    fn email_format_check() {
        assert!(validate_email("reader@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("spaces in@example.com").is_err());
    }

    #[test]
    fn username_length_check() {
        assert!(validate_username("jo").is_err());
        assert!(validate_username("flaubert").is_ok());
    }
}
