use serde_json::json;
use switchboard_core::{PortEvent, SpaEvent, WorkerMessage};

use crate::integration::{create_test_worker, init_tracing};
use crate::utils::{SpaCall, ice_payload, open_port, spa_enable};

#[tokio::test]
async fn test_ice_candidate_relayed() {
    init_tracing();

    let (commands, connector) = create_test_worker();
    let mut sidebar = open_port(&commands).await;

    sidebar.send(spa_enable("tom@example.com")).await;
    let spa = connector.wait_for_spa(1, 1000).await;
    assert_eq!(sidebar.recv().await, PortEvent::SpaConnected {});

    sidebar
        .send(WorkerMessage::ConversationOpen { peer: "bob".into() })
        .await;
    let mut window = open_port(&commands).await;
    window.send(WorkerMessage::ChatWindowReady {}).await;
    window.recv().await; // user nick
    window.recv().await; // conversation open

    // Outbound: candidates gathered locally go to the backend.
    window
        .send(WorkerMessage::IceCandidate(json!({
            "peer": "bob",
            "candidate": "candidate:0 1 UDP 2122252543",
        })))
        .await;
    assert!(spa.wait_for_calls(2, 1000).await);
    assert_eq!(spa.calls()[1], SpaCall::IceCandidate(ice_payload("bob")));

    // Inbound: candidates from the peer reach the bound window.
    spa.emit(SpaEvent::IceCandidate(ice_payload("bob"))).await;
    assert_eq!(
        window.recv().await,
        PortEvent::IceCandidate(ice_payload("bob"))
    );
}
