use serde_json::json;

use crate::integration::{create_test_switchboard, init_tracing};
use crate::utils::{WsClient, join, spawn_test_server, sync_switchboard};

#[tokio::test]
async fn test_producer_disconnect_notifies_consumers() {
    init_tracing();

    let addr = spawn_test_server().await.expect("Failed to start server");

    let (producer, p_boot) = WsClient::join(addr, "producer").await.expect("Producer");
    let (mut consumer, c_boot) = WsClient::join(addr, "consumer").await.expect("Consumer");
    assert_eq!(c_boot["streamers"], json!([p_boot["id"].clone()]));

    producer.close().await.expect("Failed to close producer");

    let event = consumer.recv_json().await.expect("Disconnect event expected");
    assert_eq!(
        event,
        json!({"type": "producer-disconnected", "producer_id": p_boot["id"].clone()})
    );

    // The departed producer is no longer listed for newcomers.
    let (_late, late_boot) = WsClient::join(addr, "consumer").await.expect("Late consumer");
    assert_eq!(late_boot["streamers"], json!([]));
}

#[tokio::test]
async fn test_consumer_disconnect_notifies_producers_only() {
    init_tracing();

    let switchboard = create_test_switchboard();

    let mut producer = join(&switchboard, "producer").await.expect("Producer");
    let mut other_consumer = join(&switchboard, "consumer").await.expect("Consumer 1");
    let consumer = join(&switchboard, "consumer").await.expect("Consumer 2");

    switchboard.disconnect(consumer.id).await;

    let event = producer.recv().await.expect("Disconnect event expected");
    assert_eq!(
        event,
        json!({"type": "consumer-disconnected", "consumer_id": consumer.id.get()})
    );

    sync_switchboard(&switchboard).await;
    other_consumer.assert_idle();
    assert!(consumer.connection.frames_of_type("consumer-disconnected").await.is_empty());

    // A second close report for the same session changes nothing.
    switchboard.disconnect(consumer.id).await;
    sync_switchboard(&switchboard).await;
    producer.assert_idle();
}
