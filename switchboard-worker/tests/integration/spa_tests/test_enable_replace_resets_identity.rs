use switchboard_core::{PortEvent, WorkerMessage};

use crate::integration::{create_test_worker, init_tracing};
use crate::utils::{open_port, spa_enable};

#[tokio::test]
async fn test_enable_replace_resets_identity() {
    init_tracing();

    let (commands, connector) = create_test_worker();
    let mut sidebar = open_port(&commands).await;

    sidebar.send(spa_enable("a@b")).await;
    connector.wait_for_spa(1, 1000).await;
    assert_eq!(sidebar.recv().await, PortEvent::SpaConnected {});

    // The replacement's backend never answers, so the worker stays in the
    // connecting gap.
    connector.silent_next_connect();
    sidebar.send(spa_enable("a@b")).await;
    assert_eq!(sidebar.recv().await, PortEvent::PresenceUnavailable(1000));

    // A window bound during the gap must not be told the old backend's
    // identity.
    sidebar
        .send(WorkerMessage::ConversationOpen { peer: "bob".into() })
        .await;
    let mut window = open_port(&commands).await;
    window.send(WorkerMessage::ChatWindowReady {}).await;
    assert_eq!(
        window.recv().await,
        PortEvent::UserNick {
            nick: String::new()
        }
    );
}
