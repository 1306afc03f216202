//! Repository methods on [`crate::service::TaskService`], one file per
//! entity.

pub mod task;
