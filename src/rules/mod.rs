//! The engine seam every game plugs into.
//!
//! See [`Rules`] for the contract; the session loop drives games only
//! through it.

pub mod engine;

pub use engine::Rules;
