use crate::utils::error::{MergeError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// A name is valid when, with spaces and hyphens removed, it is non-empty and
/// every remaining character is alphabetic (Unicode, not locale dependent).
pub fn is_valid_name(name: &str) -> bool {
    let mut letters = name.chars().filter(|c| *c != ' ' && *c != '-').peekable();
    letters.peek().is_some() && letters.all(char::is_alphabetic)
}

pub fn has_placeholder(text: &str, placeholder: &str) -> bool {
    text.contains(placeholder)
}

/// Uppercases the first letter of every word and lowercases the rest.
/// A word starts after any non-letter, so `"mary-jane o'neil"` becomes `"Mary-Jane O'Neil"`.
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut previous_is_letter = false;

    for c in name.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }

    result
}

/// Names from the list that fail [`is_valid_name`], in order.
pub fn invalid_names(names: &[String]) -> Vec<&str> {
    names
        .iter()
        .map(String::as_str)
        .filter(|name| !is_valid_name(name))
        .collect()
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// File name patterns must name the recipient and stay inside the output folder.
pub fn validate_file_name_pattern(field_name: &str, pattern: &str) -> Result<()> {
    if !pattern.contains("{name}") {
        return Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: pattern.to_string(),
            reason: "Pattern must contain {name}".to_string(),
        });
    }

    if pattern.contains('/') || pattern.contains('\\') || pattern.contains('\0') {
        return Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: pattern.to_string(),
            reason: "Pattern cannot contain path separators".to_string(),
        });
    }

    Ok(())
}
