pub mod sort;
pub mod validate;
