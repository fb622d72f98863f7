//! Process-wide state shared with native code: connected modules and the
//! notification callbacks of open sessions.

pub mod connection;
pub mod notify;
