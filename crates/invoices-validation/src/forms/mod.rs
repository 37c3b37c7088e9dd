//! Ready-made field presets for the application's forms

pub mod person;

pub use person::{PersonDraft, PersonForm};
