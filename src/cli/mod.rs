//! # CLI Module
//!
//! The operations behind the command-line flags:
//!
//! - [`bootstrap`] - Obtains an authenticated session from an INI file or an
//!   interactive device login
//! - [`backup`] - Exports favorites (and owned playlist covers) to a JSON snapshot
//! - [`restore`] - Re-adds artists, tracks and albums from a snapshot
//!
//! Each operation takes the session and paths explicitly; nothing is kept in
//! process-wide state.
//!
//! ## Usage
//!
//! ```bash
//! tidalfav --backup                                # login, write backup/tidal_favorites.json
//! tidalfav --backup --ini session.ini -o mine.json # reuse saved credentials
//! tidalfav --restore -i session.ini -o backup/tidal_favorites.json
//! ```

mod backup;
mod restore;
mod session;

pub use backup::backup;
pub use restore::restore;
pub use restore::restore_snapshot;
pub use session::{SessionOrigin, bootstrap, resolve_session};
