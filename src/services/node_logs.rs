//! Append-only index of node deploy logs.
//!
//! Each successful node creation appends `name,log_path` to the index file.
//! Lookups scan the whole file and take the last entry for a name, so a
//! redeployed node resolves to its newest log.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::models::node_log::NodeLogEntry;

#[derive(Debug, Clone)]
pub struct NodeLogIndex {
    path: PathBuf,
    // Serializes appends so concurrent creates never interleave partial lines.
    writer: Arc<Mutex<()>>,
}

impl NodeLogIndex {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Append an entry. Returns `false` without touching the file when the
    /// name or log reference is blank.
    pub async fn record(&self, node_name: &str, log_reference: &str) -> io::Result<bool> {
        let Some(entry) = NodeLogEntry::new(node_name, log_reference) else {
            return Ok(false);
        };

        let _guard = self.writer.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(entry.to_line().as_bytes()).await?;
        file.flush().await?;

        tracing::info!(node = %entry.node_name, log = %entry.log_reference, "Recorded node deploy log");
        Ok(true)
    }

    /// Log reference of the last entry recorded for `node_name`.
    pub async fn lookup(&self, node_name: &str) -> io::Result<Option<String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let node_name = node_name.trim();

        Ok(contents
            .lines()
            .filter_map(NodeLogEntry::parse_line)
            .filter(|entry| entry.node_name == node_name)
            .last()
            .map(|entry| entry.log_reference))
    }

    /// Text of the node's deploy log, or a not-found notice.
    pub async fn read_log(&self, node_name: &str) -> String {
        let not_found = || format!("Could not find logfile for: {node_name}");

        let log_path = match self.lookup(node_name).await {
            Ok(Some(path)) => path,
            Ok(None) => return not_found(),
            Err(e) => {
                tracing::warn!(error = %e, index = %self.path.display(), "Failed to read node log index");
                return not_found();
            }
        };

        match tokio::fs::read_to_string(&log_path).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, log = %log_path, "Failed to read node deploy log");
                not_found()
            }
        }
    }
}
