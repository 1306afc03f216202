//! Entity structs for the Pulse domain.
//!
//! `Task` maps to a row in the libSQL `tasks` table. `SessionState` is the
//! value published over the session channel. Both derive `Serialize` and
//! `Deserialize` for JSON roundtrip.

mod session;
mod task;

pub use session::SessionState;
pub use task::Task;
