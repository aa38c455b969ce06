//! Service layer providing subscription operations on top of models.
//! - Separates business rules (validation, date normalization) from data access.
//! - Builds the dynamic filters shared by listing and the price summary.

pub mod errors;
pub mod db;
pub mod subscription;
#[cfg(test)]
pub mod test_support;
