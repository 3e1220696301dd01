use taskboard_core::{WorkItem, WorkItemId, WorkItemStatus};

#[test]
fn work_item_serializes_with_expected_wire_fields() {
    let id: WorkItemId = "11111111-2222-4333-8444-555555555555".parse().unwrap();
    let mut item = WorkItem::new("Build API", "Design and implement", 3);
    item.id = id;
    item.status = WorkItemStatus::Finished;

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["title"], "Build API");
    assert_eq!(json["description"], "Design and implement");
    assert_eq!(json["people_count"], 3);
    assert_eq!(json["status"], "finished");

    let decoded: WorkItem = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn status_defaults_to_active() {
    assert_eq!(WorkItemStatus::default(), WorkItemStatus::Active);
    assert_eq!(WorkItemStatus::Finished.as_str(), "finished");
}

#[test]
fn id_parse_accepts_surrounding_whitespace() {
    let id = WorkItemId::generate();
    let parsed: WorkItemId = format!("  {id}\n").parse().unwrap();
    assert_eq!(parsed, id);
}
