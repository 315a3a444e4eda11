//! The language front-end, split into submodules according to their functionality.
//! See the crate-level documentation for further information.

// Shared functionality
pub mod errors;
pub mod types;
pub mod value;

// Specific Phases
pub mod environment;
pub mod token;
