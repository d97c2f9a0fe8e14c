//! Wire shapes of the gateway's HTTP API
//!
//! Field names are snake_case in Rust and camelCase on the wire; enumerations
//! use SCREAMING_SNAKE_CASE values.
pub mod accounts;
pub mod cards;
pub mod documents;
pub mod operations;
pub mod users;
