mod channel_groups;
mod config;
mod config_log;
mod credential;
mod playlist;

pub use self::channel_groups::*;
pub use self::config::*;
pub use self::config_log::*;
pub use self::credential::*;
pub use self::playlist::*;
