use std::path::PathBuf;
use std::time::SystemTime;

use tokio::sync::mpsc;

use crate::action::Action;
use crate::host::{DataTable, HostResult, MemoryDataTable};

#[derive(Debug)]
pub enum LoadRequest {
    /// Read the data file unconditionally.
    Load,
    /// Read the data file only if it changed since the last load.
    LoadIfChanged,
}

#[derive(Clone)]
pub struct LoadHandle {
    tx: mpsc::UnboundedSender<LoadRequest>,
}

impl LoadHandle {
    pub fn send(&self, request: LoadRequest) {
        let _ = self.tx.send(request);
    }
}

/// Reads the audit export off the UI task and reports back as actions.
pub struct LoadWorker {
    path: PathBuf,
    last_modified: Option<SystemTime>,
    rx: mpsc::UnboundedReceiver<LoadRequest>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl LoadWorker {
    pub fn new(path: PathBuf, action_tx: mpsc::UnboundedSender<Action>) -> (Self, LoadHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = LoadHandle { tx };
        let worker = Self {
            path,
            last_modified: None,
            rx,
            action_tx,
        };
        (worker, handle)
    }

    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            let Some(action) = self.process(request).await else {
                continue;
            };
            if self.action_tx.send(action).is_err() {
                break;
            }
        }
    }

    async fn process(&mut self, request: LoadRequest) -> Option<Action> {
        let modified = tokio::fs::metadata(&self.path)
            .await
            .and_then(|meta| meta.modified())
            .ok();

        if matches!(request, LoadRequest::LoadIfChanged)
            && modified.is_some()
            && modified == self.last_modified
        {
            return None;
        }

        match self.read().await {
            Ok(table) => {
                self.last_modified = modified;
                Some(Action::DataLoaded(Box::new(table)))
            }
            Err(e) => Some(Action::Error(format!(
                "failed to load {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn read(&self) -> HostResult<MemoryDataTable> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let table = MemoryDataTable::from_json(&content)?;
        tracing::info!(
            "Loaded {} audit rows from {}",
            table.rows().len(),
            self.path.display()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"properties": [], "rows": [{"id": "1"}]}"#;

    #[tokio::test]
    async fn load_if_changed_skips_unmodified_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("audit.json");
        std::fs::write(&path, DOC).expect("write document");

        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let (mut worker, _handle) = LoadWorker::new(path, action_tx);

        let first = worker.process(LoadRequest::Load).await;
        assert!(matches!(first, Some(Action::DataLoaded(_))));

        let second = worker.process(LoadRequest::LoadIfChanged).await;
        assert!(second.is_none());

        let forced = worker.process(LoadRequest::Load).await;
        assert!(matches!(forced, Some(Action::DataLoaded(_))));
    }

    #[tokio::test]
    async fn unreadable_file_reports_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let (mut worker, _handle) = LoadWorker::new(dir.path().join("missing.json"), action_tx);

        let action = worker.process(LoadRequest::LoadIfChanged).await;
        assert!(matches!(action, Some(Action::Error(msg)) if msg.contains("missing.json")));
    }
}
