//! Business logic: user resolution and chat rooms.

pub mod rooms;
pub mod users;

pub use rooms::RoomHub;
pub use users::{resolve_identity, PgUserStore, UserStore};
