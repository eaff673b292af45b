use std::borrow::Cow;

use validator::ValidationError;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// 1 to 255 characters once surrounding whitespace is trimmed.
pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if len == 0 || len > 255 {
        return Err(error("name", "name is required and must be at most 255 characters"));
    }
    Ok(())
}

/// 8 to 64 characters, no whitespace or control characters.
pub(crate) fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if !(8..=64).contains(&len)
        || password
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(error("password", "password has an invalid format"));
    }
    Ok(())
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "value must not be blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert!(validate_name("Taro Tanaka").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(256)).is_err());
        assert!(validate_name(&"a".repeat(255)).is_ok());
    }

    #[test]
    fn passwords() {
        assert!(validate_password("mypassword123").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("has space inside").is_err());
        assert!(validate_password("tab\tinside!").is_err());
        assert!(validate_password(&"p".repeat(65)).is_err());
        assert!(validate_password(&"p".repeat(64)).is_ok());
    }
}
