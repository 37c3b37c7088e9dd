//! Input normalizers applied before a value is stored and validated

pub mod digits;
pub mod text;

pub use digits::{
    digit_count, digits_only, format_postal_code, format_telephone, group_digits,
    insert_space_after,
};
pub use text::{normalize_text, TextCasing, TextOptions};
