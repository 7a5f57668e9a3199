//! Keyspace operations against a live Redis

mod common;

use common::{redis_queues, unique_name};
use listq_core::application::ReadMode;

#[tokio::test]
async fn test_delete_existing_queue() {
    let Some(queues) = redis_queues() else { return };
    let name = unique_name("delete");
    let queue = queues.open(&name).await.unwrap();
    queue.write("a").await.unwrap();
    queue.write("b").await.unwrap();

    assert!(queues.delete_queue(&name).await.unwrap());
    assert_eq!(queue.len().await.unwrap(), 0);
    assert_eq!(queue.read(ReadMode::NonBlocking).await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_missing_queue() {
    let Some(queues) = redis_queues() else { return };
    assert!(!queues.delete_queue(&unique_name("missing")).await.unwrap());
}

#[tokio::test]
async fn test_create_queue_is_noop() {
    let Some(queues) = redis_queues() else { return };
    let name = unique_name("create");

    assert!(queues.create_queue(&name).await.unwrap());
    // Nothing is provisioned until the first write
    assert!(!queues.list_queue_names().await.unwrap().contains(&name));
}

#[tokio::test]
async fn test_list_queue_names() {
    let Some(queues) = redis_queues() else { return };
    let prefix = unique_name("list");
    let names: Vec<String> = ["emails", "reports"]
        .iter()
        .map(|suffix| format!("{}:{}", prefix, suffix))
        .collect();

    for name in &names {
        queues.open(name).await.unwrap().write("x").await.unwrap();
    }

    let all = queues.list_queue_names().await.unwrap();
    for name in &names {
        assert!(all.contains(name), "{} missing from {:?}", name, all);
    }

    let admin = queues.admin().await.unwrap();
    let matching = admin
        .list_queue_names_matching(&format!("{}:*", prefix))
        .await
        .unwrap();
    assert_eq!(matching, names);

    for name in &names {
        assert!(queues.delete_queue(name).await.unwrap());
    }
}
