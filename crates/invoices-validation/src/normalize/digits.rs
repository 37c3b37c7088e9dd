//! Digit extraction and grouping for numeric inputs (phone numbers, postal codes)

/// Keep only ASCII decimal digits
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Number of decimal digits in `raw`, ignoring separators and any other characters
pub fn digit_count(raw: &str) -> usize {
    raw.chars().filter(char::is_ascii_digit).count()
}

/// Strip non-digits and regroup the digits into space-separated blocks.
///
/// Blocks are consumed left to right; digits beyond the last block form a
/// final ungrouped block.
///
/// ```
/// use invoices_validation::normalize::group_digits;
///
/// assert_eq!(group_digits("1234567890", &[3, 3, 4]), "123 456 7890");
/// assert_eq!(group_digits("+420 777-123", &[3, 3]), "420 777 123");
/// ```
pub fn group_digits(raw: &str, blocks: &[usize]) -> String {
    let digits = digits_only(raw);
    if digits.is_empty() || blocks.is_empty() {
        return digits;
    }

    let mut parts: Vec<&str> = Vec::with_capacity(blocks.len() + 1);
    let mut rest = digits.as_str();

    for &block in blocks.iter().filter(|&&b| b > 0) {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(block.min(rest.len()));
        parts.push(head);
        rest = tail;
    }

    if !rest.is_empty() {
        parts.push(rest);
    }

    parts.join(" ")
}

/// Strip non-digits and insert one space after `position` digits, if there are more.
pub fn insert_space_after(raw: &str, position: usize) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let mut digits = digits_only(raw);
    if digits.len() > position {
        digits.insert(position, ' ');
    }
    digits
}

/// Czech postal code, `XXX XX`
pub fn format_postal_code(raw: &str) -> String {
    insert_space_after(raw, 3)
}

/// Czech phone number, `XXX XXX XXX`
pub fn format_telephone(raw: &str) -> String {
    group_digits(raw, &[3, 3, 3])
}
