/*
 * End-to-end coverage of the cache orchestrator against a real
 * (temporary) filesystem - what the `#[cfg(test)]` unit tests per
 * module can't exercise because they stub collaborators individually.
 */

use std::sync::Arc;

use cachewire::models::{Board, Address, EntityKind, Post, Thread};
use cachewire::persistence::fake::InMemoryPersistence;
use cachewire::services::CacheOrchestrator;
use cachewire::utils::ConfigBuilder;

fn seeded_persistence() -> InMemoryPersistence {
    let mut persistence = InMemoryPersistence::new();
    for i in 0..45 {
        persistence.boards.push(Board {
            fingerprint: format!("board-{}", i).into(),
            creation: i,
            last_update: i,
            name: Some(format!("board {}", i)),
        });
    }
    persistence.threads.push(Thread {
        fingerprint: "thread-1".into(),
        board: "board-0".into(),
        creation: 5,
        name: Some("a thread".to_string()),
    });
    persistence.posts.push(Post {
        fingerprint: "post-1".into(),
        board: "board-0".into(),
        thread: "thread-1".into(),
        creation: 6,
        body: Some("hello".to_string()),
    });
    persistence.addresses.push(Address {
        location: "1.2.3.4".to_string(),
        sub_location: String::new(),
        port: 8090,
        last_online: 7,
        protocol_major: 1,
        protocol_minor: 0,
    });
    persistence
}

#[tokio::test]
async fn create_cache_writes_entity_and_index_pages() {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(
        ConfigBuilder::new()
            .caches_location(dir.path().to_str().unwrap())
            .page_sizes(cachewire::utils::PageSizes {
                boards: 20,
                ..ConfigBuilder::new().build().page_sizes
            })
            .build(),
    );
    let orchestrator = CacheOrchestrator::new(config, Arc::new(seeded_persistence()));

    orchestrator.create_cache(EntityKind::Board, 0, 100).await.unwrap();

    let boards_dir = dir.path().join("boards");
    let catalog = std::fs::read(boards_dir.join("index.json")).unwrap();
    let catalog_json: serde_json::Value = serde_json::from_slice(&catalog).unwrap();
    assert_eq!(catalog_json["Results"].as_array().unwrap().len(), 1);

    let cache_name = catalog_json["Results"][0]["ResponseUrl"].as_str().unwrap();
    let cache_dir = boards_dir.join(cache_name);

    // 45 boards over a 20-per-page size produces 3 pages: 20, 20, 5.
    assert!(cache_dir.join("0.json").exists());
    assert!(cache_dir.join("1.json").exists());
    assert!(cache_dir.join("2.json").exists());
    assert!(cache_dir.join("index").join("0.json").exists());

    let page0 = std::fs::read(cache_dir.join("0.json")).unwrap();
    let page0_json: serde_json::Value = serde_json::from_slice(&page0).unwrap();
    assert_eq!(page0_json["Endpoint"], "entity");
    assert_eq!(page0_json["ResponseBody"]["Boards"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn create_cache_for_addresses_writes_no_index_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(
        ConfigBuilder::new()
            .caches_location(dir.path().to_str().unwrap())
            .build(),
    );
    let orchestrator = CacheOrchestrator::new(config, Arc::new(seeded_persistence()));

    orchestrator.create_cache(EntityKind::Address, 0, 100).await.unwrap();

    let addresses_dir = dir.path().join("addresses");
    let catalog = std::fs::read(addresses_dir.join("index.json")).unwrap();
    let catalog_json: serde_json::Value = serde_json::from_slice(&catalog).unwrap();
    let cache_name = catalog_json["Results"][0]["ResponseUrl"].as_str().unwrap();
    let cache_dir = addresses_dir.join(cache_name);

    assert!(!cache_dir.join("index").exists());

    let page0 = std::fs::read(cache_dir.join("0.json")).unwrap();
    let page0_json: serde_json::Value = serde_json::from_slice(&page0).unwrap();
    assert_eq!(page0_json["ResponseBody"]["Addresses"].as_array().unwrap().len(), 1);
    assert_eq!(page0_json["ResponseBody"]["Addresses"][0]["Location"], "1.2.3.4");
}

#[tokio::test]
async fn repeated_cache_generation_appends_to_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(
        ConfigBuilder::new()
            .caches_location(dir.path().to_str().unwrap())
            .build(),
    );
    let orchestrator = CacheOrchestrator::new(config, Arc::new(seeded_persistence()));

    orchestrator.create_cache(EntityKind::Thread, 0, 50).await.unwrap();
    orchestrator.create_cache(EntityKind::Thread, 50, 100).await.unwrap();

    let catalog = std::fs::read(dir.path().join("threads").join("index.json")).unwrap();
    let catalog_json: serde_json::Value = serde_json::from_slice(&catalog).unwrap();
    assert_eq!(catalog_json["Results"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn generate_post_response_for_single_page_is_inline() {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(
        ConfigBuilder::new()
            .user_directory(dir.path().to_str().unwrap())
            .build(),
    );
    let orchestrator = CacheOrchestrator::new(config, Arc::new(seeded_persistence()));

    let bytes = orchestrator
        .generate_post_response(EntityKind::Thread, &[])
        .await
        .unwrap();
    let response: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(response["Endpoint"], "singular_post_response");
    assert_eq!(response["ResponseBody"]["Threads"].as_array().unwrap().len(), 1);

    // No statics directory should be created for an inline response.
    assert!(!dir.path().join("statics").exists());
}

#[tokio::test]
async fn generate_post_response_for_many_pages_writes_multipart_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(
        ConfigBuilder::new()
            .user_directory(dir.path().to_str().unwrap())
            .page_sizes(cachewire::utils::PageSizes {
                boards: 10,
                ..ConfigBuilder::new().build().page_sizes
            })
            .build(),
    );
    let orchestrator = CacheOrchestrator::new(config, Arc::new(seeded_persistence()));

    let bytes = orchestrator
        .generate_post_response(EntityKind::Board, &[])
        .await
        .unwrap();
    let response: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(response["Endpoint"], "multipart_post_response");
    let results = response["Results"].as_array().unwrap();
    // 45 boards at 10-per-page is 5 pages (4 full + 1 of 5, no exact multiple).
    assert_eq!(results.len(), 5);

    let responses_root = dir.path().join("statics").join("responses");
    let folders: Vec<_> = std::fs::read_dir(&responses_root).unwrap().collect();
    assert_eq!(folders.len(), 1);
}
