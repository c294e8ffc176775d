//! File-backed dynamic property source.

use arc_swap::ArcSwap;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::store::notification::ChangeNotification;

/// Errors reading or parsing the watched property file.
#[derive(Debug, Error)]
pub enum PropertyFileError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Watches a TOML property file and emits before/after notification
/// pairs on every reload.
///
/// Emission mirrors how operational property stores actually behave:
/// every key present in the reloaded file produces a pair, whether or
/// not its value changed, so reinstalling an identical file floods the
/// stream with no-op pairs. The dispatcher's value comparison is what
/// decides which pairs are genuine changes.
pub struct FilePropertySource {
    path: PathBuf,
    snapshot: Arc<ArcSwap<HashMap<String, String>>>,
    update_tx: mpsc::UnboundedSender<Value>,
}

impl FilePropertySource {
    /// Create a source for `path`.
    ///
    /// Returns the source and the raw notification stream to feed a
    /// dispatcher.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<Value>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                snapshot: Arc::new(ArcSwap::from_pointee(HashMap::new())),
                update_tx,
            },
            update_rx,
        )
    }

    /// Parse the file once and seed the snapshot without emitting
    /// notifications. Call before [`FilePropertySource::run`] so the
    /// first reload diffs against real values instead of an empty map.
    pub fn prime(&self) -> Result<(), PropertyFileError> {
        let values = parse_property_file(&self.path)?;
        tracing::info!(path = ?self.path, properties = values.len(), "property file primed");
        self.snapshot.store(Arc::new(values));
        Ok(())
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for events to flow.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let snapshot = self.snapshot.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("property file change detected, re-reading...");
                        match parse_property_file(&path) {
                            Ok(new_values) => {
                                let previous = snapshot.swap(Arc::new(new_values.clone()));
                                emit_change_pairs(&tx, &previous, &new_values);
                            }
                            Err(e) => {
                                tracing::error!(
                                    "failed to re-read property file: {}. Keeping current values.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "property file watcher started");
        Ok(watcher)
    }
}

/// Emit a before/after pair for every key in the reloaded file.
///
/// A key seen for the first time snapshots its own value as the before
/// phase, so the dispatcher records it without firing anything.
fn emit_change_pairs(
    tx: &mpsc::UnboundedSender<Value>,
    previous: &HashMap<String, String>,
    current: &HashMap<String, String>,
) {
    let mut names: Vec<&String> = current.keys().collect();
    names.sort();

    for name in names {
        let value = &current[name];
        let before = previous.get(name).unwrap_or(value);
        let _ = tx.send(ChangeNotification::before(name, before).into_raw());
        let _ = tx.send(ChangeNotification::after(name, value).into_raw());
    }
}

/// Flatten a TOML document into dotted property names with string
/// values, so `[db] host = "x"` is addressed as `db.host`.
fn parse_property_file(path: &Path) -> Result<HashMap<String, String>, PropertyFileError> {
    let content = std::fs::read_to_string(path)?;
    let document: toml::Value = toml::from_str(&content)?;

    let mut values = HashMap::new();
    flatten_into("", &document, &mut values);
    Ok(values)
}

fn flatten_into(prefix: &str, value: &toml::Value, out: &mut HashMap<String, String>) {
    match value {
        toml::Value::Table(table) => {
            for (key, nested) in table {
                let name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(&name, nested, out);
            }
        }
        toml::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}
