//! Simulator of a turn-based chess-like game on rectangular boards of
//! arbitrary size.
//!
//! The initial placement is read from plain text (see
//! [`chess::board::Board::from_text`]), then two pluggable
//! [`policy::Policy`] implementations alternate moves inside
//! [`game::Game`] until one side runs out of pieces or moves, or the move
//! limit is reached.
//!
//! The rules are deliberately simplified: there is no check, castling, en
//! passant or repetition tracking. A side is done when it has no pieces or no
//! candidate moves.

pub mod chess;
pub mod game;
pub mod policy;

use shadow_rs::shadow;

shadow!(build);

/// Returns the full version that can be used to identify how the binary was
/// built in the first place.
#[must_use]
pub fn version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Writes information about the simulator version and build type on startup.
///
/// # Errors
///
/// Propagates failures of the underlying writer.
pub fn print_binary_info(output: &mut impl std::io::Write) -> anyhow::Result<()> {
    writeln!(output, "{} {}", env!("CARGO_PKG_NAME"), version())?;
    writeln!(output, "Release build: {}", !shadow_rs::is_debug())?;
    if !shadow_rs::git_clean() {
        writeln!(output, "Warning: built with uncommitted changes")?;
    }
    Ok(())
}
