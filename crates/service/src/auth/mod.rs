//! Auth module: domain types, hashing and storage seams, and the service
//! that composes them.

pub mod domain;
pub mod errors;
pub mod hasher;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
