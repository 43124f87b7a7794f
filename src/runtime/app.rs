use std::sync::mpsc::Receiver;

use crate::commands::Cmd;
use crate::config::OutlineConfig;
use crate::messages::Msg;
use crate::model::OutlineModel;
use crate::store::DocumentId;
use crate::surface::{StatusIndicator, SurfaceFactory, SurfaceSyntax};
use crate::sync::{SyncOutcome, ViewSynchronizer};
use crate::update::update;

/// Single-threaded driver: every message runs to completion, including its
/// surface writes, before the next one is looked at.
pub struct App<F: SurfaceFactory, T> {
    model: OutlineModel,
    factory: F,
    sync: ViewSynchronizer<F::Surface>,
    status: T,
    last_outcome: Option<SyncOutcome>,
}

impl<F: SurfaceFactory, T: StatusIndicator> App<F, T> {
    pub fn new(config: OutlineConfig, factory: F, status: T) -> Self {
        let sync = ViewSynchronizer::new(config.highlight_group.clone());
        Self {
            model: OutlineModel::new(config),
            factory,
            sync,
            status,
            last_outcome: None,
        }
    }

    pub fn model(&self) -> &OutlineModel {
        &self.model
    }

    pub fn synchronizer(&self) -> &ViewSynchronizer<F::Surface> {
        &self.sync
    }

    pub fn surface(&self) -> Option<&F::Surface> {
        self.sync.surface()
    }

    pub fn surface_mut(&mut self) -> Option<&mut F::Surface> {
        self.sync.surface_mut()
    }

    pub fn status(&self) -> &T {
        &self.status
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Outcome of the most recent surface synchronization
    pub fn last_outcome(&self) -> Option<SyncOutcome> {
        self.last_outcome
    }

    /// Handle one message and carry out the resulting commands
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    /// Process messages until every sender is gone. Returns how many ran.
    pub fn run(&mut self, msg_rx: Receiver<Msg>) -> usize {
        let mut processed = 0;
        while let Ok(msg) = msg_rx.recv() {
            self.dispatch(msg);
            processed += 1;
        }
        tracing::debug!("runtime: channel closed after {} messages", processed);
        processed
    }

    /// Process whatever is queued right now without blocking
    pub fn pump(&mut self, msg_rx: &Receiver<Msg>) -> usize {
        let mut processed = 0;
        while let Ok(msg) = msg_rx.try_recv() {
            self.dispatch(msg);
            processed += 1;
        }
        processed
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Sync { document, force } => self.sync_document(&document, force),
            Cmd::ShowBreadcrumb(text) => {
                if let Err(e) = self.status.show(&text) {
                    tracing::debug!("runtime: status indicator unavailable: {:#}", e);
                }
            }
            Cmd::OpenSurface { name, width } => match self.factory.open(&name, width) {
                Ok(surface) => {
                    self.sync.attach(surface);
                    tracing::debug!("runtime: opened view {} ({} columns)", name, width);
                }
                Err(e) => tracing::warn!("runtime: could not open view {}: {:#}", name, e),
            },
            Cmd::SetupSurface => {
                self.sync.setup(&SurfaceSyntax::outline());
            }
            Cmd::DetachSurface => {
                self.sync.detach();
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    fn sync_document(&mut self, document: &DocumentId, force: bool) {
        let current = self.model.current_node_in(document).cloned();
        let outcome =
            self.sync
                .synchronize(&mut self.model.store, document, current.as_ref(), force);
        tracing::trace!(?outcome, "runtime: synchronized {}", document);
        self.last_outcome = Some(outcome);
    }
}
