use crate::{ConnPool, Error, Result};
use futures::future::BoxFuture;
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, RwLock},
};

/// Opens connection pools for one engine client.
pub trait Driver: Send + Sync {
    /// Create a connection pool for the given data source name.
    fn open<'a>(&'a self, dsn: &'a str) -> BoxFuture<'a, Result<Arc<dyn ConnPool>>>;
}

static DRIVERS: LazyLock<RwLock<HashMap<String, Arc<dyn Driver>>>> =
    LazyLock::new(Default::default);

/// Make a driver available under `name` to the whole process, replacing any previous one.
pub fn register_driver(name: impl Into<String>, driver: Arc<dyn Driver>) {
    let name = name.into();
    log::debug!("Registering driver `{}`", name);
    let mut drivers = DRIVERS.write().unwrap_or_else(|e| e.into_inner());
    drivers.insert(name, driver);
}

/// Remove the driver registered under `name`, returning it.
pub fn unregister_driver(name: &str) -> Option<Arc<dyn Driver>> {
    let mut drivers = DRIVERS.write().unwrap_or_else(|e| e.into_inner());
    drivers.remove(name)
}

pub fn registered_drivers() -> Vec<String> {
    let drivers = DRIVERS.read().unwrap_or_else(|e| e.into_inner());
    let mut names = drivers.keys().cloned().collect::<Vec<_>>();
    names.sort();
    names
}

/// Open a connection pool with the driver registered under `name`.
pub async fn open_driver(name: &str, dsn: &str) -> Result<Arc<dyn ConnPool>> {
    let driver = {
        let drivers = DRIVERS.read().unwrap_or_else(|e| e.into_inner());
        drivers.get(name).cloned()
    };
    let Some(driver) = driver else {
        return Err(Error::msg(format!(
            "Unknown driver `{}` (forgotten registration?)",
            name
        )));
    };
    driver.open(dsn).await
}
