//! Entries of the node deploy-log index.

/// One line of the index: `name,log_reference`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLogEntry {
    pub node_name: String,
    pub log_reference: String,
}

impl NodeLogEntry {
    /// Build an entry from raw values, `None` when either is blank after trimming.
    pub fn new(node_name: &str, log_reference: &str) -> Option<Self> {
        let node_name = node_name.trim();
        let log_reference = log_reference.trim();
        if node_name.is_empty() || log_reference.is_empty() {
            return None;
        }
        Some(Self {
            node_name: node_name.to_string(),
            log_reference: log_reference.to_string(),
        })
    }

    /// Parse an index line. The log reference is the text after the last comma.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (name, log_reference) = line.rsplit_once(',')?;
        Self::new(name, log_reference)
    }

    pub fn to_line(&self) -> String {
        format!("{},{}\n", self.node_name, self.log_reference)
    }
}
