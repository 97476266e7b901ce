//! # Spotify Integration Module
//!
//! Client-credentials authorization and track search against the Spotify Web API.
//!
//! ```text
//! Playlist pipeline
//!          ↓
//! Spotify Integration Layer
//!     ├── Authorization (client credentials → short-lived bearer token)
//!     └── Search (title/artist → best single track match)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - client-credentials exchange
//! - `GET /search?type=track&limit=1` - best match for a field-qualified query
//!
//! Neither call is retried. A non-success status surfaces as
//! [`Error::Authorization`](crate::error::Error::Authorization) or
//! [`Error::Search`](crate::error::Error::Search) respectively.
//!
//! Tokens are cached by [`TokenManager`](crate::management::TokenManager);
//! [`SpotifyCatalog`] asks it for a valid credential right before every search.

pub mod auth;
pub mod search;

pub use auth::ClientCredentials;
pub use search::{SpotifyCatalog, TrackSearch};
