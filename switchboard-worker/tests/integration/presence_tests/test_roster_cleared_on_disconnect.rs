use switchboard_core::{PortEvent, RosterEntry, SpaEvent, WorkerMessage};

use crate::integration::{create_test_worker, init_tracing};
use crate::utils::{SpaCall, open_port, spa_enable};

#[tokio::test]
async fn test_roster_cleared_on_disconnect() {
    init_tracing();

    let (commands, connector) = create_test_worker();
    let mut sidebar = open_port(&commands).await;

    sidebar.send(spa_enable("a@b")).await;
    let spa = connector.wait_for_spa(1, 1000).await;
    assert_eq!(sidebar.recv().await, PortEvent::SpaConnected {});

    spa.emit(SpaEvent::Users(vec![RosterEntry::new("alice")]))
        .await;
    assert_eq!(
        sidebar.recv().await,
        PortEvent::Users(vec![RosterEntry::new("alice")])
    );

    spa.emit(SpaEvent::Disconnected { code: 1006 }).await;
    assert_eq!(sidebar.recv().await, PortEvent::PresenceUnavailable(1006));

    // The dead backend's roster is gone: no cached broadcast, and the down
    // adapter is not queried either.
    sidebar.send(WorkerMessage::PresenceRequest {}).await;
    sidebar.expect_silence().await;
    assert!(!spa.calls().contains(&SpaCall::PresenceRequest));
}
