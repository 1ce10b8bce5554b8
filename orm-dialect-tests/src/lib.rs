mod mock_dialector;
mod mock_driver;
mod mock_pool;

pub use mock_dialector::*;
pub use mock_driver::*;
pub use mock_pool::*;

#[doc(hidden)]
pub use log;

use log::LevelFilter;
use std::{env, sync::LazyLock};
use tokio::sync::{Mutex, MutexGuard};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

static DRIVERS_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Serializes the tests that register drivers under a shared name.
pub async fn lock_drivers() -> MutexGuard<'static, ()> {
    DRIVERS_MUTEX.lock().await
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = $crate::log::max_level();
        $crate::log::set_max_level($crate::log::LevelFilter::Off);
        $($code)+
        $crate::log::set_max_level(level);
    }};
}
