//! Topic dispatch: one handler per inbound topic, one per SPA event. All of
//! them run on the worker loop, so state is never mutated concurrently;
//! anything read before a spawned backend call is re-checked when the
//! resulting event arrives.

use std::sync::Arc;

use serde_json::Value;
use switchboard_core::codec::{self, Payload, PayloadKind};
use switchboard_core::{
    Answer, ContactsUpdate, Hangup, IceCandidate, Offer, PortEvent, PortId, RosterEntry, SpaEvent,
    SpaSpec, WorkerMessage,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::ports::Port;
use crate::spa::{SpaAdapter, SpaHandle, SpaState};
use crate::user::Presence;
use crate::worker::Worker;
use crate::worker::worker::SpaSignal;

/// Close code used when the worker itself tears an adapter down.
const CLOSE_NORMAL: u16 = 1000;

impl Worker {
    pub(crate) fn dispatch(&mut self, source: PortId, message: WorkerMessage) {
        match message {
            WorkerMessage::SidebarReady {} => self.on_sidebar_ready(source),
            WorkerMessage::ChatWindowReady {} => self.on_chat_window_ready(source),
            WorkerMessage::PortClosing {} => self.on_port_closing(source),
            WorkerMessage::Contacts(update) => self.on_contacts(update),
            WorkerMessage::ConversationOpen { peer } => self.on_conversation_open(&peer),
            WorkerMessage::SpaEnable(raw) => self.on_spa_enable(&raw),
            WorkerMessage::SpaDisable(name) => self.on_spa_disable(&name),
            WorkerMessage::PresenceRequest {} => self.on_presence_request(),
            WorkerMessage::CallOffer(raw) => self.on_call_offer(&raw),
            WorkerMessage::CallAnswer(raw) => self.on_call_answer(&raw),
            WorkerMessage::CallHangup(raw) => self.on_call_hangup(&raw),
            WorkerMessage::IceCandidate(raw) => self.on_ice_candidate(&raw),
            // Forward compatibility: newer UIs may emit topics we do not
            // know yet.
            WorkerMessage::Unknown => debug!(port = %source, "ignoring unknown topic"),
        }
    }

    fn on_sidebar_ready(&mut self, source: PortId) {
        let Some(port) = self.ctx.ports.find_mut(&source) else {
            debug!(port = %source, "sidebar-ready from unregistered port");
            return;
        };

        port.mark_sidebar();
        self.post_to(source, PortEvent::WorkerReady {});

        // A sidebar that announces ready mid-session (reload) missed the
        // connect broadcasts, so replay the current status to it.
        if self.ctx.user.signed_in() {
            self.post_to(source, PortEvent::SpaConnected {});
            if !self.ctx.roster.is_empty() {
                self.post_to(source, PortEvent::Users(self.ctx.roster.entries().to_vec()));
            }
        }
    }

    fn on_chat_window_ready(&mut self, source: PortId) {
        if self.ctx.ports.find(&source).is_some_and(Port::is_sidebar) {
            warn!(port = %source, "roster surface cannot take a call window");
            return;
        }

        let Some((peer, stashed)) = self.ctx.conversations.bind_next(source) else {
            warn!(port = %source, "chat window ready but no conversation is waiting");
            return;
        };

        info!(%peer, port = %source, "bound call window to conversation");

        let nick = self.ctx.user.name().to_owned();
        self.post_to(source, PortEvent::UserNick { nick });
        self.post_to(source, PortEvent::ConversationOpen { peer });

        if let Some(offer) = stashed {
            self.post_to(source, PortEvent::CallOffer(offer));
        }
    }

    pub(crate) fn on_port_closing(&mut self, source: PortId) {
        if self.ctx.ports.remove(&source).is_none() {
            // Benign: the port may already have been pruned by a broadcast.
            debug!(port = %source, "close for unregistered port");
        }

        self.ctx.conversations.clear_bound_to(source);
    }

    fn on_contacts(&mut self, update: ContactsUpdate) {
        info!(
            source = %update.source,
            count = update.contacts.len(),
            "replacing roster from contact source"
        );

        let entries: Vec<RosterEntry> = update
            .contacts
            .into_iter()
            .map(|contact| RosterEntry::new(contact.username))
            .collect();

        self.ctx.roster.replace(entries);
        self.broadcast(PortEvent::Users(self.ctx.roster.entries().to_vec()));
    }

    fn on_conversation_open(&mut self, peer: &str) {
        if self.ctx.conversations.open(peer) {
            // Known gap: the previous call's backend state is left as-is.
            warn!(%peer, "replacing in-flight conversation without hanging it up");
        }
    }

    fn on_spa_enable(&mut self, raw: &Value) {
        let Some(spec): Option<SpaSpec> = self.validated(PayloadKind::SpaSpec, raw) else {
            return;
        };

        if let Some(old) = self.ctx.spa.take() {
            info!(name = old.name(), "disabling active SPA before enabling a new one");
            let adapter = old.adapter();
            tokio::spawn(async move { adapter.disconnect().await });
            // The old backend's identity and roster must not leak into the
            // connecting gap of the replacement.
            self.ctx.user.reset();
            self.ctx.roster.reset();
            self.broadcast(PortEvent::PresenceUnavailable(CLOSE_NORMAL));
        }

        info!(name = %spec.name, src = %spec.src, "enabling SPA");

        let handle = self.instantiate_adapter(&spec);
        self.ctx.user.set_presence(Presence::Connecting);

        let credentials = spec.credentials.clone();
        let connecting = handle.adapter();
        tokio::spawn(async move { connecting.connect(credentials).await });

        self.ctx.spa = Some(handle);
    }

    /// Build the adapter for `spec` and plumb its event stream into the
    /// worker loop, tagged with a fresh epoch.
    fn instantiate_adapter(&mut self, spec: &SpaSpec) -> SpaHandle {
        let epoch = self.next_epoch;
        self.next_epoch += 1;

        let (events_tx, mut events_rx) = mpsc::channel(64);
        let adapter = self.connector.create(spec, events_tx);

        let signal_tx = self.spa_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = events_rx.recv().await {
                if signal_tx.send(SpaSignal { epoch, event }).await.is_err() {
                    break;
                }
            }
        });

        SpaHandle::new(spec, epoch, adapter)
    }

    fn on_spa_disable(&mut self, name: &str) {
        let matches = self
            .ctx
            .spa
            .as_ref()
            .is_some_and(|handle| handle.name() == name);
        if !matches {
            debug!(%name, "spa-disable for an inactive SPA, ignoring");
            return;
        }

        info!(%name, "disabling SPA");
        if let Some(handle) = self.ctx.spa.take() {
            let adapter = handle.adapter();
            tokio::spawn(async move { adapter.disconnect().await });
        }

        self.ctx.user.reset();
        self.ctx.roster.reset();
        self.broadcast(PortEvent::PresenceUnavailable(CLOSE_NORMAL));
    }

    fn on_presence_request(&mut self) {
        if self.ctx.roster.is_empty() {
            let Some(spa) = self.active_adapter("presence-request") else {
                return;
            };
            tokio::spawn(async move { spa.presence_request().await });
        } else {
            self.broadcast(PortEvent::Users(self.ctx.roster.entries().to_vec()));
        }
    }

    fn on_call_offer(&mut self, raw: &Value) {
        let Some(offer): Option<Offer> = self.validated(PayloadKind::Offer, raw) else {
            return;
        };
        let Some(spa) = self.active_adapter("call-offer") else {
            return;
        };
        tokio::spawn(async move { spa.call_offer(offer).await });
    }

    fn on_call_answer(&mut self, raw: &Value) {
        let Some(answer): Option<Answer> = self.validated(PayloadKind::Answer, raw) else {
            return;
        };

        if let Some(session) = self.ctx.conversations.get_mut(&answer.peer) {
            session.answered();
        }

        let Some(spa) = self.active_adapter("call-answer") else {
            return;
        };
        tokio::spawn(async move { spa.call_answer(answer).await });
    }

    fn on_call_hangup(&mut self, raw: &Value) {
        let Some(hangup): Option<Hangup> = self.validated(PayloadKind::Hangup, raw) else {
            return;
        };

        if self.ctx.conversations.end(&hangup.peer).is_some() {
            info!(peer = %hangup.peer, "call hung up locally");
        }

        // Local origin: the backend side must be hung up as well.
        let Some(spa) = self.active_adapter("call-hangup") else {
            return;
        };
        tokio::spawn(async move { spa.call_hangup(hangup).await });
    }

    fn on_ice_candidate(&mut self, raw: &Value) {
        let Some(candidate): Option<IceCandidate> =
            self.validated(PayloadKind::IceCandidate, raw)
        else {
            return;
        };
        let Some(spa) = self.active_adapter("ice-candidate") else {
            return;
        };
        tokio::spawn(async move { spa.ice_candidate(candidate).await });
    }

    /// Run `raw` through the codec; a rejected payload is logged and never
    /// forwarded.
    fn validated<T: TryFrom<Payload>>(&self, kind: PayloadKind, raw: &Value) -> Option<T> {
        match codec::parse(kind, raw) {
            Ok(payload) => T::try_from(payload).ok(),
            Err(err) => {
                warn!(%err, ?kind, "rejecting malformed signaling payload");
                None
            }
        }
    }

    /// The adapter to forward calls to, or `None` (logged) when no SPA is
    /// enabled or the enabled one is down; there is nobody to route the
    /// message to.
    fn active_adapter(&self, what: &'static str) -> Option<Arc<dyn SpaAdapter>> {
        match &self.ctx.spa {
            Some(handle) if handle.state() != SpaState::Disconnected => Some(handle.adapter()),
            Some(_) => {
                warn!(what, "SPA is down, dropping message");
                None
            }
            None => {
                warn!(what, "no SPA enabled, dropping message");
                None
            }
        }
    }

    pub(crate) fn handle_spa_signal(&mut self, signal: SpaSignal) {
        let SpaSignal { epoch, event } = signal;

        let Some(handle) = &self.ctx.spa else {
            debug!("dropping SPA event, no adapter enabled");
            return;
        };
        if handle.epoch() != epoch {
            // Result of a call issued before the handle was replaced; the
            // state it belongs to is gone.
            debug!("dropping SPA event from a replaced adapter");
            return;
        }

        match event {
            SpaEvent::Connected { addr } => {
                info!(%addr, "SPA connected");
                if let Some(handle) = self.ctx.spa.as_mut() {
                    handle.set_state(SpaState::Connected);
                }
                self.ctx.user.set_name(addr);
                self.ctx.user.set_presence(Presence::Connected);
                self.broadcast(PortEvent::SpaConnected {});
            }

            SpaEvent::Disconnected { code } | SpaEvent::PresenceUnavailable { code } => {
                warn!(code, "SPA connection lost");
                if let Some(handle) = self.ctx.spa.as_mut() {
                    handle.set_state(SpaState::Disconnected);
                }
                self.ctx.user.reset();
                self.ctx.roster.reset();
                self.broadcast(PortEvent::PresenceUnavailable(code));
            }

            SpaEvent::Error(reason) => {
                // The UI is the only place a human can react, so backend
                // failures always surface as a broadcast.
                warn!(%reason, "SPA error");
                if let Some(handle) = self.ctx.spa.as_mut() {
                    handle.set_state(SpaState::Disconnected);
                }
                self.ctx.user.reset();
                self.ctx.roster.reset();
                self.broadcast(PortEvent::SpaError(reason));
            }

            SpaEvent::Users(entries) => {
                self.ctx.roster.replace(entries);
                self.broadcast(PortEvent::Users(self.ctx.roster.entries().to_vec()));
            }

            SpaEvent::Offer(offer) => self.on_spa_offer(offer),
            SpaEvent::Answer(answer) => self.on_spa_answer(answer),
            SpaEvent::Hangup(hangup) => self.on_spa_hangup(hangup),
            SpaEvent::IceCandidate(candidate) => self.on_spa_ice_candidate(candidate),
        }
    }

    fn on_spa_offer(&mut self, offer: Offer) {
        let Some(session) = self.ctx.conversations.get_mut(&offer.peer) else {
            // Incoming call: nobody asked for this conversation yet, so
            // create it and hold the offer for the window.
            info!(peer = %offer.peer, "incoming call");
            let peer = offer.peer.clone();
            self.ctx.conversations.open(&peer);
            if let Some(session) = self.ctx.conversations.get_mut(&peer) {
                session.stash_offer(offer);
            }
            return;
        };

        match session.port() {
            Some(port) => self.post_to(port, PortEvent::CallOffer(offer)),
            None => session.stash_offer(offer),
        }
    }

    fn on_spa_answer(&mut self, answer: Answer) {
        let Some(session) = self.ctx.conversations.get_mut(&answer.peer) else {
            warn!(peer = %answer.peer, "answer for an unknown conversation, ignoring");
            return;
        };

        session.answered();
        match session.port() {
            Some(port) => self.post_to(port, PortEvent::CallAnswer(answer)),
            None => warn!(peer = %answer.peer, "answer before a window bound, dropping"),
        }
    }

    fn on_spa_hangup(&mut self, hangup: Hangup) {
        // Remote origin: no backend hangup is issued back.
        let Some(session) = self.ctx.conversations.end(&hangup.peer) else {
            debug!(peer = %hangup.peer, "hangup for an unknown conversation, ignoring");
            return;
        };

        info!(peer = %hangup.peer, "call hung up by peer");
        if let Some(port) = session.port() {
            self.post_to(port, PortEvent::CallHangup(hangup));
        }
    }

    fn on_spa_ice_candidate(&mut self, candidate: IceCandidate) {
        let Some(session) = self.ctx.conversations.get(&candidate.peer) else {
            debug!(peer = %candidate.peer, "ICE candidate for an unknown conversation, ignoring");
            return;
        };

        match session.port() {
            Some(port) => self.post_to(port, PortEvent::IceCandidate(candidate)),
            None => debug!(peer = %candidate.peer, "ICE candidate before a window bound, dropping"),
        }
    }
}
