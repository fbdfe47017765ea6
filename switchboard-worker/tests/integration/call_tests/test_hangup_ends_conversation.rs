use serde_json::json;
use switchboard_core::{PortEvent, SpaEvent, WorkerMessage};

use crate::integration::{create_test_worker, init_tracing};
use crate::utils::{SpaCall, hangup_payload, ice_payload, open_port, spa_enable};

#[tokio::test]
async fn test_hangup_ends_conversation() {
    init_tracing();

    let (commands, connector) = create_test_worker();
    let mut sidebar = open_port(&commands).await;

    sidebar.send(spa_enable("florian@example.com")).await;
    let spa = connector.wait_for_spa(1, 1000).await;
    assert_eq!(sidebar.recv().await, PortEvent::SpaConnected {});

    sidebar
        .send(WorkerMessage::ConversationOpen { peer: "bob".into() })
        .await;
    let mut window = open_port(&commands).await;
    window.send(WorkerMessage::ChatWindowReady {}).await;
    window.recv().await; // user nick
    window.recv().await; // conversation open

    window
        .send(WorkerMessage::CallHangup(json!({"peer": "bob"})))
        .await;
    assert!(spa.wait_for_calls(2, 1000).await);
    assert_eq!(spa.calls()[1], SpaCall::CallHangup(hangup_payload("bob")));

    // The session ended with the hangup, so late signaling for it is
    // dropped instead of reaching the old window.
    spa.emit(SpaEvent::IceCandidate(ice_payload("bob"))).await;
    window.expect_silence().await;

    // Reopening the peer starts a clean session with nothing stashed.
    sidebar
        .send(WorkerMessage::ConversationOpen { peer: "bob".into() })
        .await;
    let mut fresh = open_port(&commands).await;
    fresh.send(WorkerMessage::ChatWindowReady {}).await;
    assert_eq!(
        fresh.recv().await,
        PortEvent::UserNick {
            nick: "florian@example.com".into()
        }
    );
    assert_eq!(
        fresh.recv().await,
        PortEvent::ConversationOpen { peer: "bob".into() }
    );
    fresh.expect_silence().await;
}
