//! Filesystem operations: existence checks, moves with cross-device fallback,
//! and collision-free naming.

mod atomic;
mod copy;
mod duplicate;
mod helpers;
mod local;
mod util;

pub use copy::safe_copy_and_rename;
pub use duplicate::{DEFAULT_MAX_NAME_ATTEMPTS, generate_new_filename};
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use local::{Filesystem, LocalFs};
