use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use switchboard_core::{Answer, Hangup, IceCandidate, Offer, SpaEvent, SpaSpec};
use tokio::sync::mpsc;

/// Boundary to one external signaling backend.
///
/// Calls are fire-and-forget: the backend acknowledges asynchronously on the
/// event channel handed over at construction, and failures are reported
/// there as [`SpaEvent::Error`], never across this boundary.
#[async_trait]
pub trait SpaAdapter: Send + Sync {
    async fn connect(&self, credentials: Value);

    async fn disconnect(&self);

    /// Ask the backend for the current roster. Used only when the worker
    /// holds no cached roster.
    async fn presence_request(&self);

    async fn call_offer(&self, offer: Offer);

    async fn call_answer(&self, answer: Answer);

    async fn call_hangup(&self, hangup: Hangup);

    async fn ice_candidate(&self, candidate: IceCandidate);
}

/// Factory instantiating adapters for a given SPA spec. Injected into the
/// worker at construction so the gateway supplies its socket bridge and
/// tests supply a recording mock.
pub trait SpaConnector: Send + Sync {
    fn create(&self, spec: &SpaSpec, events: mpsc::Sender<SpaEvent>) -> Arc<dyn SpaAdapter>;
}
