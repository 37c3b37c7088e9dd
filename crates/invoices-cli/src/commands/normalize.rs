use invoices_validation::normalize::{group_digits, normalize_text, TextCasing, TextOptions};

pub struct NormalizeArgs {
    pub trim: bool,
    pub collapse_whitespace: bool,
    pub remove_diacritics: bool,
    pub casing: TextCasing,
    pub max_length: Option<usize>,
}

impl NormalizeArgs {
    fn options(&self) -> TextOptions {
        TextOptions {
            trim: self.trim,
            collapse_whitespace: self.collapse_whitespace,
            remove_diacritics: self.remove_diacritics,
            casing: self.casing,
            max_length: self.max_length,
        }
    }
}

pub fn text(raw: &str, args: &NormalizeArgs) -> String {
    normalize_text(Some(raw), &args.options())
}

pub fn group(raw: &str, blocks: &[usize]) -> String {
    group_digits(raw, blocks)
}
