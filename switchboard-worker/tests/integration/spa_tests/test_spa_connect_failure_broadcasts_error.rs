use switchboard_core::PortEvent;

use crate::integration::{create_test_worker, init_tracing};
use crate::utils::{open_port, spa_enable};

#[tokio::test]
async fn test_spa_connect_failure_broadcasts_error() {
    init_tracing();

    let (commands, connector) = create_test_worker();
    connector.fail_next_connect();

    let mut a = open_port(&commands).await;
    let mut b = open_port(&commands).await;

    a.send(spa_enable("a@b")).await;

    // Every registered port hears about the failure exactly once.
    let expected = PortEvent::SpaError("connection refused".into());
    assert_eq!(a.recv().await, expected);
    assert_eq!(b.recv().await, expected);
    a.expect_silence().await;
    b.expect_silence().await;
}
