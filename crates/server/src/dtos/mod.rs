pub mod academic;
pub mod faculty;
pub mod member;
pub mod pagination;
pub mod person;
