//! # CLI Module
//!
//! User-facing commands of the `moodlist` binary. Each command opens what it
//! needs (database pool, HTTP clients), delegates to the library, and reports
//! through the colored output macros. Fatal problems end the process via
//! [`error!`](crate::error!).
//!
//! ```bash
//! moodlist generate --mood "rainy sunday" --genre jazz --genre lofi
//! moodlist list --owner me
//! moodlist show 3
//! moodlist serve
//! ```

mod generate;
mod playlists;
mod serve;

pub use generate::generate;
pub use playlists::list_playlists;
pub use playlists::show_playlist;
pub use serve::serve;
