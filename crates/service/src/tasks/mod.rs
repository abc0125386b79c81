//! Tasks module: to-do items owned by registered accounts.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::TaskService;
