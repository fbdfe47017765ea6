use switchboard_core::{PortEvent, RosterEntry, SpaEvent, WorkerMessage};

use crate::integration::{create_test_worker, init_tracing};
use crate::utils::{SpaCall, open_port, spa_enable};

#[tokio::test]
async fn test_presence_request_broadcasts_cached_roster() {
    init_tracing();

    let (commands, connector) = create_test_worker();
    let mut sidebar = open_port(&commands).await;

    sidebar.send(spa_enable("jb@example.com")).await;
    let spa = connector.wait_for_spa(1, 1000).await;
    assert_eq!(sidebar.recv().await, PortEvent::SpaConnected {});

    let roster = vec![RosterEntry::new("alice"), RosterEntry::new("bob")];
    spa.emit(SpaEvent::Users(roster.clone())).await;
    assert_eq!(sidebar.recv().await, PortEvent::Users(roster.clone()));

    sidebar.send(WorkerMessage::PresenceRequest {}).await;

    // Served from the cache: one broadcast, no adapter call.
    assert_eq!(sidebar.recv().await, PortEvent::Users(roster));
    sidebar.expect_silence().await;
    assert!(!spa.calls().contains(&SpaCall::PresenceRequest));
}
