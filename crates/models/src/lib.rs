pub mod academic;
pub mod contact;
pub mod error;
pub mod integrity;
pub mod person;
pub mod records;
pub mod rules;
pub mod validate;
