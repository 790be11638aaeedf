//! Validation utilities for the Modular Build Tracking Platform

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate phone number format
/// Accepts: 5551234567, 555-123-4567, (555) 123-4567, +15551234567
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Standard 10-digit number
    if digits.len() == 10 {
        return Ok(());
    }
    // With country code: 11 digits starting with 1
    if digits.len() == 11 && digits.starts_with('1') {
        return Ok(());
    }

    Err("Invalid phone number format")
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate a display color in #RRGGBB form
pub fn validate_hex_color(color: &str) -> Result<(), &'static str> {
    let Some(hex) = color.strip_prefix('#') else {
        return Err("Color must start with '#'");
    };
    if hex.len() != 6 {
        return Err("Color must be in #RRGGBB form");
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("Color must contain only hex digits");
    }
    Ok(())
}

// ============================================================================
// Project Validations
// ============================================================================

/// Validate project number format
/// Format: YY-NNNN (e.g., 26-0142), sequence at least 1 digit
pub fn validate_project_number(number: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = number.split('-').collect();

    if parts.len() != 2 {
        return Err("Project number must be in format YY-NNNN");
    }
    if parts[0].len() != 2 || !parts[0].chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid year in project number");
    }
    if parts[1].is_empty() || parts[1].len() > 6 || !parts[1].chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid sequence number in project number");
    }
    Ok(())
}

/// Validate factory code format (2-8 uppercase alphanumeric)
pub fn validate_factory_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 2 {
        return Err("Factory code must be at least 2 characters");
    }
    if code.len() > 8 {
        return Err("Factory code must be at most 8 characters");
    }
    if !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err("Factory code must be uppercase alphanumeric only");
    }
    Ok(())
}

/// Validate submittal spec section format
/// CSI-style section: 2-digit groups separated by spaces or dots (e.g., "06 10 00")
pub fn validate_spec_section(section: &str) -> Result<(), &'static str> {
    let groups: Vec<&str> = section
        .split(|c: char| c == ' ' || c == '.')
        .filter(|g| !g.is_empty())
        .collect();

    if groups.len() < 2 || groups.len() > 4 {
        return Err("Spec section must have 2-4 numeric groups");
    }
    for group in groups {
        if group.len() > 2 || !group.chars().all(|c| c.is_ascii_digit()) {
            return Err("Spec section groups must be 1-2 digits");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name@modular.co").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_validate_phone_valid() {
        assert!(validate_phone("5551234567").is_ok());
        assert!(validate_phone("555-123-4567").is_ok());
        assert!(validate_phone("(555) 123-4567").is_ok());
        assert!(validate_phone("+15551234567").is_ok());
    }

    #[test]
    fn test_validate_phone_invalid() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("123456789012").is_err());
        assert!(validate_phone("abcdefghij").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_hex_color_valid() {
        assert!(validate_hex_color("#4472C4").is_ok());
        assert!(validate_hex_color("#9e9e9e").is_ok());
    }

    #[test]
    fn test_validate_hex_color_invalid() {
        assert!(validate_hex_color("4472C4").is_err()); // Missing #
        assert!(validate_hex_color("#4472C").is_err()); // Too short
        assert!(validate_hex_color("#4472C4FF").is_err()); // Too long
        assert!(validate_hex_color("#GGGGGG").is_err()); // Non-hex
    }

    #[test]
    fn test_validate_project_number_valid() {
        assert!(validate_project_number("26-0142").is_ok());
        assert!(validate_project_number("24-1").is_ok());
        assert!(validate_project_number("25-123456").is_ok());
    }

    #[test]
    fn test_validate_project_number_invalid() {
        assert!(validate_project_number("2026-0142").is_err()); // 4-digit year
        assert!(validate_project_number("26-").is_err()); // Empty sequence
        assert!(validate_project_number("260142").is_err()); // No dash
        assert!(validate_project_number("26-ABCD").is_err()); // Non-numeric
    }

    #[test]
    fn test_validate_factory_code_valid() {
        assert!(validate_factory_code("BLD1").is_ok());
        assert!(validate_factory_code("NE").is_ok());
        assert!(validate_factory_code("PLANT22").is_ok());
    }

    #[test]
    fn test_validate_factory_code_invalid() {
        assert!(validate_factory_code("B").is_err()); // Too short
        assert!(validate_factory_code("PLANTNINE").is_err()); // Too long
        assert!(validate_factory_code("bld1").is_err()); // Lowercase
        assert!(validate_factory_code("BL-1").is_err()); // Special char
    }

    #[test]
    fn test_validate_spec_section_valid() {
        assert!(validate_spec_section("06 10 00").is_ok());
        assert!(validate_spec_section("09.91").is_ok());
        assert!(validate_spec_section("23 05 93 13").is_ok());
    }

    #[test]
    fn test_validate_spec_section_invalid() {
        assert!(validate_spec_section("06").is_err()); // Single group
        assert!(validate_spec_section("061000").is_err()); // No separators
        assert!(validate_spec_section("06 AB 00").is_err()); // Non-numeric
    }
}
