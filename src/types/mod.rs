//! Core identifier and value types.
//!
//! - [`SessionId`] names one session: season, round, and [`SessionKind`]
//! - [`format_timedelta`] renders lap and sector times for the JSON snapshot
//!
//! ## Usage Example
//!
//! ```rust
//! use paddock::types::{SessionId, SessionKind, duration_from_secs, format_timedelta};
//!
//! let id: SessionId = SessionId::new(2024, 1, "R".parse::<SessionKind>().unwrap());
//! assert_eq!(id, SessionId::BAHRAIN_2024);
//!
//! let lap = duration_from_secs(94.284).unwrap();
//! assert_eq!(format_timedelta(lap), "0 days 00:01:34.284000");
//! ```

mod session_id;
mod timedelta;

pub use session_id::{SessionId, SessionKind};
pub use timedelta::{duration_from_secs, format_timedelta};
