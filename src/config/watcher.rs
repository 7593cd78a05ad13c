//! Route file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::{load_config, ConfigError};
use crate::routing::router::SharedRouter;

/// A watcher that monitors the route file and republishes the route table.
pub struct ConfigWatcher {
    path: PathBuf,
    router: Arc<SharedRouter>,
}

impl ConfigWatcher {
    pub fn new(path: &Path, router: Arc<SharedRouter>) -> Self {
        Self {
            path: path.to_path_buf(),
            router,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for as long as reloads are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let router = self.router.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Route file change detected, reloading...");
                        if let Err(e) = reload(&path, &router) {
                            tracing::error!(
                                "Failed to reload routes: {}. Keeping current route table.",
                                e
                            );
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Route file watcher started");
        Ok(watcher)
    }
}

/// Load, validate and build the route file, then publish it to `router`.
///
/// On any error the currently published table is left untouched.
pub fn reload(path: &Path, router: &SharedRouter) -> Result<(), ConfigError> {
    let config = load_config(path)?;
    let table = config
        .build_table()
        .map_err(|e| ConfigError::Validation(vec![e]))?;
    router.replace(table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::table::{RouteDeclaration, RouteTable};

    #[test]
    fn test_reload_publishes_and_keeps_on_failure() {
        let path = std::env::temp_dir().join("deeplink_router_reload_test.toml");
        let table = RouteTable::build(["https"], ["example.com"], [RouteDeclaration::new("old", "/old")])
            .unwrap();
        let router = SharedRouter::new(table);

        std::fs::write(
            &path,
            "schemas = [\"https\"]\ndefault_hosts = [\"example.com\"]\n\n[[routes]]\nname = \"new\"\npath = \"/new\"\n",
        )
        .unwrap();
        reload(&path, &router).unwrap();
        assert_eq!(router.resolve("https://example.com/new").unwrap().route, "new");
        assert!(router.resolve("https://example.com/old").is_none());

        // Broken file: no schemas
        std::fs::write(&path, "[[routes]]\nname = \"x\"\npath = \"/x\"\n").unwrap();
        assert!(reload(&path, &router).is_err());
        assert_eq!(router.resolve("https://example.com/new").unwrap().route, "new");

        std::fs::remove_file(&path).unwrap_or_default();
    }
}
