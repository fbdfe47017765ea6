use switchboard_core::{PortEvent, SpaEvent, WorkerMessage};

use crate::integration::{create_test_worker, init_tracing};
use crate::utils::{offer_body, open_port, spa_enable};

#[tokio::test]
async fn test_calls_dropped_after_spa_error() {
    init_tracing();

    let (commands, connector) = create_test_worker();
    let mut sidebar = open_port(&commands).await;

    sidebar.send(spa_enable("a@b")).await;
    let spa = connector.wait_for_spa(1, 1000).await;
    assert_eq!(sidebar.recv().await, PortEvent::SpaConnected {});

    spa.emit(SpaEvent::Error("server fault".into())).await;
    assert_eq!(sidebar.recv().await, PortEvent::SpaError("server fault".into()));

    // The handle is down; signaling has nowhere to go until a fresh enable.
    sidebar
        .send(WorkerMessage::CallOffer(offer_body("bob")))
        .await;
    sidebar.expect_silence().await;
    assert_eq!(spa.calls().len(), 1, "only the connect call may be recorded");
}
