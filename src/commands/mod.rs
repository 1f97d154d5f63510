pub mod dispatch;
pub mod hook;
pub mod notification;
pub mod stop;
pub mod subagent_stop;
