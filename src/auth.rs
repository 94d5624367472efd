//! Entity types handed between the protocol engine, the adapter, and backend managers.

pub mod client;
pub mod generator;
pub mod id;
pub mod secret;
pub mod token;
pub mod user;

pub use client::*;
pub use generator::*;
pub use id::*;
pub use secret::*;
pub use token::*;
pub use user::*;
