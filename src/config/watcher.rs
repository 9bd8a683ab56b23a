//! Hot reload of the configuration file.
//!
//! Only validated configs are forwarded; a broken edit leaves the running
//! configuration in place.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::DocsConfig;

const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Watches one config file and forwards reloaded configs over a channel.
pub struct ConfigWatcher {
    path: PathBuf,
    updates: mpsc::UnboundedSender<DocsConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for reloaded configs.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<DocsConfig>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            updates,
        };
        (watcher, rx)
    }

    /// Start watching. Keep the returned handle alive for as long as reloads are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, updates } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if is_reload_trigger(&event.kind) {
                        reload(&path, &updates);
                    }
                }
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(POLL_INTERVAL),
        )?;
        watcher.watch(&watched, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %watched.display(), "Config watcher started");
        Ok(watcher)
    }
}

fn is_reload_trigger(kind: &EventKind) -> bool {
    kind.is_modify() || kind.is_create()
}

/// Load `path` and forward it if valid. Returns whether a config was sent.
fn reload(path: &Path, updates: &mpsc::UnboundedSender<DocsConfig>) -> bool {
    match load_config(path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "Config file changed, reloading");
            updates.send(config).is_ok()
        }
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "Config reload rejected, keeping current configuration"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};

    #[test]
    fn test_reload_triggers() {
        assert!(is_reload_trigger(&EventKind::Modify(ModifyKind::Any)));
        assert!(is_reload_trigger(&EventKind::Create(CreateKind::File)));
        assert!(!is_reload_trigger(&EventKind::Access(AccessKind::Any)));
    }

    #[test]
    fn test_reload_forwards_only_valid_configs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.toml");
        let (tx, mut rx) = mpsc::unbounded_channel();

        std::fs::write(&path, "[site]\ndefault_version = \"4.0\"\n").unwrap();
        assert!(reload(&path, &tx));
        assert_eq!(rx.try_recv().unwrap().site.default_version, "4.0");

        std::fs::write(&path, "[site]\ndefault_version = \"\"\n").unwrap();
        assert!(!reload(&path, &tx));
        assert!(rx.try_recv().is_err());
    }
}
