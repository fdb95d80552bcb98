//! Chess match rules engine: maintains the board, computes where each piece
//! can go, executes moves with rollback of the ones that expose the mover's
//! king and detects check and checkmate.
//!
//! The rules live in [`chess`], [`Session`] is the text front end driving a
//! [`chess::game::Match`] from an input stream.

pub mod chess;
pub mod session;

use std::io::Write;

pub use session::Session;
use shadow_rs::shadow;

shadow!(build);

/// Target triple and build profile. Produced by `build.rs`.
const TARGET: &str = include_str!(concat!(env!("OUT_DIR"), "/target"));

/// Returns the full version that can be used to identify how the binary was
/// built in the first place.
#[must_use]
pub fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the version and the repository on startup.
///
/// # Errors
///
/// Propagates write failures.
pub fn print_engine_info(output: &mut impl Write) -> std::io::Result<()> {
    writeln!(output, "Rookery chess match {}", engine_version())?;
    writeln!(output, "{}", env!("CARGO_PKG_DESCRIPTION"))
}

/// Prints the build type and target and whether the build is clean.
///
/// # Errors
///
/// Propagates write failures.
pub fn print_binary_info(output: &mut impl Write) -> std::io::Result<()> {
    writeln!(output, "Release build: {}", !shadow_rs::is_debug())?;
    writeln!(output, "Target: {TARGET}")?;
    if !shadow_rs::git_clean() {
        writeln!(output, "Warning: built with uncommitted changes")?;
    }
    writeln!(output)
}
