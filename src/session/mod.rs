//! The live viewer session.
//!
//! [`App`] is the pure state machine; [`Session`] wraps it in a mutex and
//! runs analyses on a tokio runtime. Only one analysis is in flight at a
//! time, and a reset aborts it.

mod app;

pub use app::{App, AppError, AppState, Ticket};

use crate::core::Document;
use crate::generate::{Generator, StructureGenerator};
use crate::logger::{status_detach, status_error, status_pending, status_success};
use crate::utils::plural::plural_count;
use crate::viewer::Theme;
use crate::{debug, log};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub struct Session {
    app: Mutex<App>,
    task: Mutex<Option<JoinHandle<()>>>,
    generator: Arc<Generator>,
    runtime: Handle,
}

impl Session {
    pub fn new(generator: Generator, runtime: Handle, initial_theme: Option<Theme>) -> Arc<Self> {
        Arc::new(Self {
            app: Mutex::new(App::new(initial_theme)),
            task: Mutex::new(None),
            generator: Arc::new(generator),
            runtime,
        })
    }

    /// Run `f` with the state machine locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut App) -> R) -> R {
        f(&mut self.app.lock())
    }

    /// Start analyzing a new batch.
    pub fn upload(self: &Arc<Self>, documents: Vec<Document>) -> Result<Ticket, AppError> {
        let started = self.app.lock().begin(documents)?;
        Ok(self.spawn(started))
    }

    /// Analyze the documents of a failed run again.
    pub fn retry(self: &Arc<Self>) -> Result<Ticket, AppError> {
        let started = self.app.lock().retry()?;
        Ok(self.spawn(started))
    }

    /// Discard the session and abort any running analysis.
    pub fn reset(&self) {
        self.app.lock().reset();
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
        debug!("session"; "reset");
    }

    fn spawn(self: &Arc<Self>, (ticket, documents): (Ticket, Arc<[Document]>)) -> Ticket {
        status_pending(&format!("analyzing {}", plural_count(documents.len(), "file")));

        let session = Arc::clone(self);
        let generator = Arc::clone(&self.generator);
        let task = self.runtime.spawn(async move {
            let started = Instant::now();
            let result = generator.generate(&documents).await;

            match &result {
                Ok(structure) => status_success(&format!(
                    "{} in {} ({:.1}s)",
                    plural_count(structure.item_count(), "page"),
                    plural_count(structure.navigation.len(), "category"),
                    started.elapsed().as_secs_f32(),
                )),
                Err(e) => status_error("generation failed", &e.to_string()),
            }
            // request logs go below the outcome
            status_detach();

            if !session.app.lock().complete(ticket, result) {
                log!("session"; "discarded result of an abandoned analysis");
            }
        });

        // the previous task, if any, already finished or was reset
        if let Some(previous) = self.task.lock().replace(task) {
            previous.abort();
        }
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_document;
    use crate::generate::SavedStructure;
    use std::time::Duration;

    async fn wait_until_settled(session: &Session) -> &'static str {
        for _ in 0..200 {
            let name = session.with(|app| app.state().name());
            if name != "analyzing" {
                return name;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        "analyzing"
    }

    fn saved(json: &str) -> (tempfile::TempDir, Generator) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, json).unwrap();
        (dir, Generator::Saved(SavedStructure::new(path)))
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_upload_reaches_viewing() {
        let (_dir, generator) = saved(
            r#"{"siteTitle":"Docs","siteDescription":"","navigation":[
                {"categoryName":"Welcome","items":[{"title":"Home","fileName":"index.md"}]}]}"#,
        );
        let session = Session::new(generator, Handle::current(), None);

        session.upload(vec![test_document("index.md", "# Home")]).unwrap();
        assert_eq!(wait_until_settled(&session).await, "viewing");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_invalid_structure_reaches_error_and_retries() {
        let (_dir, generator) = saved(r#"{"siteTitle":"Docs"}"#);
        let session = Session::new(generator, Handle::current(), None);

        session.upload(vec![test_document("index.md", "")]).unwrap();
        assert_eq!(wait_until_settled(&session).await, "error");

        session.retry().unwrap();
        assert_eq!(wait_until_settled(&session).await, "error");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_reset_returns_to_idle() {
        let (_dir, generator) = saved("{}");
        let session = Session::new(generator, Handle::current(), None);

        session.upload(vec![test_document("a.md", "")]).unwrap();
        session.reset();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(session.with(|app| app.state().name()), "idle");
    }
}
