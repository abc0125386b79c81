pub mod errors;
pub mod db;
pub mod users;
pub mod tasks;
