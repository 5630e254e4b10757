//! Link mutations mirrored into the JSONL trail.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use lit_core::entities::NewItem;
use lit_core::enums::{RelationType, TrailOp};
use lit_core::query::BulkLinkEntry;
use lit_core::trail::TrailOperation;
use lit_db::service::LitService;
use lit_db::test_support::{memory_service_with_trail, utc_date};

fn read_trail(svc: &LitService) -> Vec<TrailOperation> {
    let path = svc.trail().trail_path();
    if !path.exists() {
        return Vec::new();
    }
    serde_jsonlines::json_lines(path)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

async fn service(tmp: &TempDir) -> LitService {
    let svc = memory_service_with_trail(tmp.path().join("trail"))
        .await
        .unwrap();
    svc.add_item(NewItem::new("arxiv:2312.0001").with_added_date(utc_date(2023, 12, 1)))
        .await
        .unwrap();
    svc
}

#[tokio::test]
async fn new_local_without_trail_dir_is_disabled() {
    let svc = LitService::new_local(":memory:", None).await.unwrap();
    assert!(!svc.trail().is_enabled());
}

#[tokio::test]
async fn link_relink_unlink_are_recorded() {
    let tmp = TempDir::new().unwrap();
    let svc = service(&tmp).await;

    svc.link("arxiv:2312.0001", "attention", RelationType::Introduces, None, None)
        .await
        .unwrap();
    svc.link("arxiv:2312.0001", "attention", RelationType::Extends, None, None)
        .await
        .unwrap();
    svc.unlink("arxiv:2312.0001", "attention").await.unwrap();
    svc.unlink("arxiv:2312.0001", "attention").await.unwrap();

    let ops: Vec<_> = read_trail(&svc).into_iter().map(|o| o.op).collect();
    assert_eq!(ops, vec![TrailOp::Link, TrailOp::Relink, TrailOp::Unlink]);

    let trail = read_trail(&svc);
    assert_eq!(trail[1].data["relation_type"], "extends");
    assert_eq!(trail[2].data["relation_type"], "extends", "unlink records the removed link");
}

#[tokio::test]
async fn unlink_of_missing_link_leaves_trail_untouched() {
    let tmp = TempDir::new().unwrap();
    let svc = service(&tmp).await;

    let response = svc.unlink("arxiv:2312.0001", "never-linked").await.unwrap();
    assert!(!response.removed);
    assert!(read_trail(&svc).is_empty());
}

#[tokio::test]
async fn rolled_back_bulk_link_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let svc = service(&tmp).await;

    let entries = vec![
        BulkLinkEntry::new("attention", RelationType::Introduces),
        BulkLinkEntry::new(" ", RelationType::Discusses),
    ];
    assert!(svc.bulk_link("arxiv:2312.0001", &entries).await.is_err());
    assert!(read_trail(&svc).is_empty());
}

#[tokio::test]
async fn sync_removal_is_recorded_per_link() {
    let tmp = TempDir::new().unwrap();
    let svc = service(&tmp).await;
    svc.link("arxiv:2312.0001", "attention", RelationType::Discusses, None, None)
        .await
        .unwrap();
    svc.link("arxiv:2312.0001", "gpt", RelationType::Discusses, None, None)
        .await
        .unwrap();

    svc.delete_links_for_entities(&["attention".into(), "gpt".into()])
        .await
        .unwrap();

    let removals: Vec<_> = read_trail(&svc)
        .into_iter()
        .filter(|o| o.op == TrailOp::SyncRemove)
        .map(|o| o.entity_name)
        .collect();
    assert_eq!(removals, vec!["attention", "gpt"]);
}
