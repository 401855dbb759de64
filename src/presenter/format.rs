//! Counter formatting

use num_format::{Locale, ToFormattedString};

/// Format a count with comma thousands separators, e.g. `1,234,567`
pub fn format_count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}
