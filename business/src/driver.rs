//! Executes page requests and routes outcomes back to the renderer.
//!
//! Reads are spawned on a tokio runtime with a [`CancellationToken`]; a new
//! request cancels the previous read so abandoned fetches stop early. The
//! renderer's request ids still guard against any outcome that slips through.

use std::sync::Arc;

use log::debug;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::api::PageApi;
use crate::page::{PageOutcome, PageRenderer, PageRequest, RequestId, RowsPage, tab_options_from};

/// Runs one request against `api`.
pub async fn execute(api: &dyn PageApi, request: PageRequest) -> PageOutcome {
    match request {
        PageRequest::TabOptions { id, query } => PageOutcome::TabOptions {
            id,
            result: api
                .get(&query.path, &query.params)
                .await
                .map(|envelope| tab_options_from(&envelope.data)),
        },
        PageRequest::Rows {
            id,
            query,
            page,
            tab,
        } => PageOutcome::Rows {
            id,
            page,
            tab,
            result: api
                .get(&query.path, &query.params)
                .await
                .map(|envelope| RowsPage {
                    data: envelope.data,
                    meta: envelope.meta,
                }),
        },
        PageRequest::Update { id, path, body } => PageOutcome::Updated {
            id,
            result: api.put(&path, &body).await.map(|_| ()),
        },
    }
}

/// Feeds `first` and every follow-up request through `api` until the
/// renderer settles.
pub async fn run_until_idle(renderer: &mut PageRenderer, api: &dyn PageApi, first: PageRequest) {
    let mut next = Some(first);
    while let Some(request) = next {
        let outcome = execute(api, request).await;
        next = renderer.apply(outcome);
    }
}

struct InFlight {
    id: RequestId,
    token: CancellationToken,
    cancellable: bool,
}

/// Non-blocking driver for frame-based callers.
pub struct PageDriver {
    api: Arc<dyn PageApi>,
    runtime: Handle,
    tx: flume::Sender<PageOutcome>,
    rx: flume::Receiver<PageOutcome>,
    in_flight: Option<InFlight>,
}

impl PageDriver {
    pub fn new(api: Arc<dyn PageApi>, runtime: Handle) -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            api,
            runtime,
            tx,
            rx,
            in_flight: None,
        }
    }

    /// Spawns `request`, cancelling the read it supersedes.
    pub fn dispatch(&mut self, request: PageRequest) {
        if let Some(previous) = self.in_flight.take() {
            if previous.cancellable {
                debug!("cancelling superseded request #{}", previous.id.get());
                previous.token.cancel();
            }
        }

        let id = request.id();
        let token = CancellationToken::new();
        self.in_flight = Some(InFlight {
            id,
            token: token.clone(),
            cancellable: request.is_read(),
        });

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("request #{} cancelled", id.get());
                }
                outcome = execute(api.as_ref(), request) => {
                    // The receiver is gone once the page is closed.
                    let _ = tx.send(outcome);
                }
            }
        });
    }

    /// Applies every outcome that has arrived, dispatching follow-ups.
    ///
    /// Returns `true` when the renderer state changed.
    pub fn pump(&mut self, renderer: &mut PageRenderer) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.rx.try_recv() {
            changed = true;
            if let Some(next) = renderer.apply(outcome) {
                self.dispatch(next);
            }
        }
        changed
    }

    /// Cancels a read still running. A dispatched update always completes.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            if previous.cancellable {
                previous.token.cancel();
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|f| !f.token.is_cancelled())
    }
}

impl Drop for PageDriver {
    fn drop(&mut self) {
        self.cancel();
    }
}
