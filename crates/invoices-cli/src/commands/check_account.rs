use invoices_validation::is_valid_modulo11;
use tracing::debug;

/// Print the modulo-11 verdict for `number`; returns whether it is valid
pub fn run(number: &str) -> bool {
    let number = number.trim();
    let valid = is_valid_modulo11(number);
    debug!(number, valid, "account number checked");

    if valid {
        println!("{}: valid", number);
    } else {
        println!("{}: invalid", number);
    }
    valid
}
