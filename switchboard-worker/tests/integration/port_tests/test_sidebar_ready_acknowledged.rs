use switchboard_core::{PortEvent, WorkerMessage};

use crate::integration::{create_test_worker, init_tracing};
use crate::utils::open_port;

#[tokio::test]
async fn test_sidebar_ready_acknowledged() {
    init_tracing();

    let (commands, _connector) = create_test_worker();
    let mut sidebar = open_port(&commands).await;
    let mut other = open_port(&commands).await;

    sidebar.send(WorkerMessage::SidebarReady {}).await;

    assert_eq!(sidebar.recv().await, PortEvent::WorkerReady {});
    // The acknowledgement goes to the announcing sidebar only.
    other.expect_silence().await;
}
