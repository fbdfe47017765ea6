use switchboard_core::{PortEvent, SpaEvent, WorkerMessage};

use crate::integration::{create_test_worker, init_tracing};
use crate::utils::{answer_payload, open_port, spa_enable};

#[tokio::test]
async fn test_answer_for_unknown_peer_ignored() {
    init_tracing();

    let (commands, connector) = create_test_worker();
    let mut sidebar = open_port(&commands).await;

    sidebar.send(spa_enable("tom@example.com")).await;
    let spa = connector.wait_for_spa(1, 1000).await;
    assert_eq!(sidebar.recv().await, PortEvent::SpaConnected {});

    // No conversation exists for this peer, so the answer has no window to
    // land in and must not surface anywhere.
    spa.emit(SpaEvent::Answer(answer_payload("stranger"))).await;
    sidebar.expect_silence().await;

    sidebar
        .send(WorkerMessage::ConversationOpen { peer: "bob".into() })
        .await;
    let mut window = open_port(&commands).await;
    window.send(WorkerMessage::ChatWindowReady {}).await;
    window.recv().await; // user nick
    window.recv().await; // conversation open

    spa.emit(SpaEvent::Answer(answer_payload("bob"))).await;
    assert_eq!(
        window.recv().await,
        PortEvent::CallAnswer(answer_payload("bob"))
    );
}
