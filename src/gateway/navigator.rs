use std::sync::{PoisonError, RwLock};

/// How an entry was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// Client-side navigation adding a history entry.
    Push,
    /// Client-side navigation replacing the current entry.
    Replace,
    /// Full page load; in-memory view state is discarded.
    Reload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    pub path: String,
    pub kind: NavigationKind,
    /// Location the user originally asked for, when redirected.
    pub from: Option<String>,
}

/// Moves the application between views.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn push(&self, path: &str);
    fn replace(&self, path: &str, from: Option<&str>);
    fn assign(&self, path: &str);
}

/// In-memory history.
pub struct HistoryNavigator {
    entries: RwLock<Vec<NavigationEntry>>,
}

impl HistoryNavigator {
    pub fn new(start: &str) -> Self {
        Self {
            entries: RwLock::new(vec![NavigationEntry {
                path: start.to_string(),
                kind: NavigationKind::Reload,
                from: None,
            }]),
        }
    }

    pub fn entries(&self) -> Vec<NavigationEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current(&self) -> NavigationEntry {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        // Starts with one entry and only ever grows or replaces in place.
        entries[entries.len() - 1].clone()
    }

    fn record(&self, path: &str, kind: NavigationKind, from: Option<&str>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = NavigationEntry {
            path: path.to_string(),
            kind,
            from: from.map(str::to_string),
        };
        match (kind, entries.last_mut()) {
            (NavigationKind::Replace, Some(last)) => *last = entry,
            _ => entries.push(entry),
        }
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HistoryNavigator {
    fn current_path(&self) -> String {
        self.current().path
    }

    fn push(&self, path: &str) {
        self.record(path, NavigationKind::Push, None);
    }

    fn replace(&self, path: &str, from: Option<&str>) {
        self.record(path, NavigationKind::Replace, from);
    }

    fn assign(&self, path: &str) {
        self.record(path, NavigationKind::Reload, None);
    }
}
