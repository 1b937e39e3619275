//! Post module: domain types, list query composition, storage port and lifecycle service.

pub mod domain;
pub mod filter;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::PostService;
