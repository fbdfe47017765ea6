use switchboard_core::{Contact, ContactsUpdate, PortEvent, RosterEntry, WorkerMessage};

use crate::integration::{create_test_worker, init_tracing};
use crate::utils::open_port;

#[tokio::test]
async fn test_broadcast_reaches_all_ports() {
    init_tracing();

    let (commands, _connector) = create_test_worker();
    let mut a = open_port(&commands).await;
    let mut b = open_port(&commands).await;

    a.send(WorkerMessage::Contacts(ContactsUpdate {
        contacts: vec![
            Contact {
                username: "foo".into(),
            },
            Contact {
                username: "bar".into(),
            },
        ],
        source: "google".into(),
    }))
    .await;

    let expected = PortEvent::Users(vec![RosterEntry::new("foo"), RosterEntry::new("bar")]);
    assert_eq!(a.recv().await, expected);
    assert_eq!(b.recv().await, expected);

    // Exactly once per port, regardless of registration order.
    a.expect_silence().await;
    b.expect_silence().await;
}
