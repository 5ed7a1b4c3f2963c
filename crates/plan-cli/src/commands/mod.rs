pub mod dispatch;
pub mod history;
pub mod list;
pub mod shared;
pub mod task;
