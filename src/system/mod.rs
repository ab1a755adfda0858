//! # System Interaction Layer
//!
//! The boundary between the engine and the operating system.
//!
//! ## Modules
//!
//! - **`executor`**: spawns one command line through a shell, captures stdout and
//!   stderr into separate buffers and reports them once the process exits.

pub mod executor;
