//! Parsers for the monitoring daemon's flat-file dumps.
//!
//! # Data Flow
//! ```text
//! status.dat / objects.cache (text)
//!     → blocks.rs (tokenize `name { ... }` blocks, line-numbered)
//!     → status.rs / objects.rs (group blocks into snapshots)
//!     → value.rs (raw text → integer / float / string)
//! ```
//!
//! # Design Decisions
//! - Parsers take `&str` so fixtures need no filesystem
//! - Map keys (host names, object names) stay raw text; only field
//!   values are typed
//! - Structural problems are errors with line numbers; a block lacking
//!   its identifying field is skipped with a warning

mod blocks;
pub mod objects;
pub mod status;
mod value;

pub use objects::parse_objects;
pub use status::parse_status;

/// Error produced while parsing a snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The text does not follow the block grammar.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

impl ParseError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}
