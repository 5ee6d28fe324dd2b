//! Application state machine.
//!
//! ```text
//!            begin                 complete(Ok)
//!   Idle ──────────────► Analyzing ─────────────► Viewing
//!    ▲                     │    ▲                    │
//!    │       complete(Err) ▼    │ retry, begin       │
//!    └──────── reset ──── Error ┘                    │
//!    └──────────────────── reset ────────────────────┘
//! ```
//!
//! A site being viewed is only left through reset.
//!
//! Every analysis carries a [`Ticket`]. A result is applied only while the
//! session is still analyzing under that ticket, so a reset (or a new
//! upload after a reset) discards whatever an abandoned call returns.

use crate::core::{Document, SiteStructure};
use crate::generate::GenerationError;
use crate::viewer::{Theme, ViewerAction, ViewerEffect, ViewerState};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("a site is already being generated")]
    Busy,

    #[error("no documents to analyze")]
    NoDocuments,

    #[error("nothing to retry")]
    NothingToRetry,

    #[error("no site is being viewed")]
    NotViewing,

    #[error("a site is already being viewed, reset first")]
    AlreadyViewing,
}

/// Identifies one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Documents and structure of one successful analysis, plus the viewer.
#[derive(Debug)]
pub struct ViewingSession {
    documents: Arc<[Document]>,
    structure: SiteStructure,
    viewer: ViewerState,
}

impl ViewingSession {
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn structure(&self) -> &SiteStructure {
        &self.structure
    }

    pub fn viewer(&self) -> &ViewerState {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut ViewerState {
        &mut self.viewer
    }
}

#[derive(Debug, Default)]
pub enum AppState {
    #[default]
    Idle,
    Analyzing {
        ticket: Ticket,
        documents: Arc<[Document]>,
    },
    Viewing(ViewingSession),
    /// Failed analysis. The documents are kept for [`App::retry`].
    Error {
        message: String,
        documents: Arc<[Document]>,
    },
}

impl AppState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Analyzing { .. } => "analyzing",
            Self::Viewing(_) => "viewing",
            Self::Error { .. } => "error",
        }
    }
}

/// The single session owned by the viewer.
#[derive(Debug, Default)]
pub struct App {
    state: AppState,
    last_ticket: u64,
    /// Theme new viewing sessions start with; `None` follows the system.
    initial_theme: Option<Theme>,
}

impl App {
    pub fn new(initial_theme: Option<Theme>) -> Self {
        Self {
            initial_theme,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Start analyzing a fresh batch from `Idle` or `Error`. A failed
    /// batch is replaced.
    pub fn begin(&mut self, documents: Vec<Document>) -> Result<(Ticket, Arc<[Document]>), AppError> {
        match self.state {
            AppState::Analyzing { .. } => return Err(AppError::Busy),
            AppState::Viewing(_) => return Err(AppError::AlreadyViewing),
            AppState::Idle | AppState::Error { .. } => {}
        }
        if documents.is_empty() {
            return Err(AppError::NoDocuments);
        }
        Ok(self.analyze(documents.into()))
    }

    /// Re-run the failed analysis with the documents it kept.
    pub fn retry(&mut self) -> Result<(Ticket, Arc<[Document]>), AppError> {
        match &self.state {
            AppState::Error { documents, .. } => {
                let documents = Arc::clone(documents);
                Ok(self.analyze(documents))
            }
            AppState::Analyzing { .. } => Err(AppError::Busy),
            _ => Err(AppError::NothingToRetry),
        }
    }

    fn analyze(&mut self, documents: Arc<[Document]>) -> (Ticket, Arc<[Document]>) {
        self.last_ticket += 1;
        let ticket = Ticket(self.last_ticket);
        self.state = AppState::Analyzing {
            ticket,
            documents: Arc::clone(&documents),
        };
        (ticket, documents)
    }

    /// Apply a generation result. Returns `false` when the ticket is stale
    /// and the result was dropped.
    pub fn complete(&mut self, ticket: Ticket, result: Result<SiteStructure, GenerationError>) -> bool {
        let documents = match &self.state {
            AppState::Analyzing { ticket: current, documents } if *current == ticket => Arc::clone(documents),
            _ => return false,
        };

        self.state = match result {
            Ok(structure) => AppState::Viewing(ViewingSession {
                documents,
                structure,
                viewer: ViewerState::new(self.initial_theme),
            }),
            Err(e) => AppState::Error {
                message: e.user_message().to_string(),
                documents,
            },
        };
        true
    }

    /// Back to idle, discarding documents and structure together.
    pub fn reset(&mut self) {
        self.state = AppState::Idle;
    }

    pub fn viewing_mut(&mut self) -> Result<&mut ViewingSession, AppError> {
        match &mut self.state {
            AppState::Viewing(session) => Ok(session),
            _ => Err(AppError::NotViewing),
        }
    }

    pub fn apply(&mut self, action: ViewerAction) -> Result<ViewerEffect, AppError> {
        Ok(self.viewing_mut()?.viewer_mut().apply(action))
    }
}
