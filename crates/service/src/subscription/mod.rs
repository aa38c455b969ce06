//! Subscription module: three-layer architecture (domain, repository, service).
//!
//! The filter builder turns optional query parameters into a SQL predicate
//! shared by the list and summary queries.

pub mod domain;
pub mod filter;
pub mod repository;
pub mod service;

pub use service::SubscriptionService;
