pub mod auth;
pub mod dispatch;
pub mod shared;
pub mod sync;
pub mod task;
