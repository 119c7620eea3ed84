mod constants;
mod default_utils;
mod file;
mod logging;
mod network;
mod step_measure;

#[macro_export]
macro_rules! debug_if_enabled {
    ($fmt:expr, $( $args:expr ),*) => {
        if log::log_enabled!(log::Level::Debug) {
            log::log!(log::Level::Debug, $fmt, $($args),*);
        }
    };

    ($txt:expr) => {
        if log::log_enabled!(log::Level::Debug) {
            log::log!(log::Level::Debug, $txt);
        }
    };
}

pub use debug_if_enabled;

#[macro_export]
macro_rules! exit {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
        std::process::exit(1);
    }};
}
pub use exit;

pub use self::constants::*;
pub use self::default_utils::*;
pub use self::file::*;
pub use self::logging::*;
pub use self::network::*;
pub use self::step_measure::*;
