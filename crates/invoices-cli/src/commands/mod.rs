pub mod check_account;
pub mod normalize;
pub mod validate_person;
