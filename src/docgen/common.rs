//! Shared pieces of the document generators: organization details, palette,
//! date formatting and filename sanitizing.

use chrono::{Datelike, NaiveDate};

use super::renderer::TextColor;

pub const COLOR_PRIMARY: TextColor = TextColor::from_hex(0x005A9C);
pub const COLOR_SECONDARY: TextColor = TextColor::from_hex(0x2C7BB6);
pub const COLOR_TEXT: TextColor = TextColor::from_hex(0x333333);

/// Issuing-organization details printed on every generated document.
#[derive(Debug, Clone)]
pub struct CompanyDetails {
    pub name: String,
    pub address: String,
    pub contact_number: String,
    pub email: String,
    pub website: String,
}

impl Default for CompanyDetails {
    fn default() -> Self {
        Self {
            name: "Renu Sharma Healthcare Education & Foundation".to_string(),
            address: "VPO Baspadmka, Teh Pataudi, Dist Gurugram (HR), Pin 122503".to_string(),
            contact_number: "9671457366".to_string(),
            email: "Neha.rshefoundation@gmail.com".to_string(),
            website: "www.rshefoundation.org".to_string(),
        }
    }
}

/// Format a date for letter bodies (e.g., "30 December 2025").
pub fn format_display_date(date: NaiveDate) -> String {
    let months = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    let month = months[(date.month0() as usize).min(months.len() - 1)];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Sanitize a string for use in filenames.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut result = String::new();
    let mut last_dash = false;

    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            if !last_dash && !result.is_empty() {
                result.push('-');
                last_dash = true;
            }
        }
    }

    if result.is_empty() {
        return fallback.to_string();
    }

    result.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_dates_with_month_names() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap();
        assert_eq!(format_display_date(date), "30 December 2025");
    }

    #[test]
    fn sanitizes_names_to_kebab_case() {
        assert_eq!(sanitize_filename("Jane  Doe", "candidate"), "jane-doe");
        assert_eq!(sanitize_filename("  ", "candidate"), "candidate");
        assert_eq!(sanitize_filename("A. B. (C)", "candidate"), "a-b-c");
    }
}
