use super::*;

fn notification(id: i64, is_read: bool) -> Notification {
    Notification {
        id,
        kind: "comment".to_owned(),
        message: format!("notification {id}"),
        is_read,
        url: Some(format!("/debate/{id}")),
        time: None,
    }
}

#[test]
fn load_replaces_items_and_count() {
    let mut s = NotificationsState::default();
    s.load(NotificationFeed {
        notifications: vec![notification(1, false), notification(2, true)],
        unread_count: 1,
    });
    assert_eq!(s.items.len(), 2);
    assert_eq!(s.unread_count, 1);
}

#[test]
fn mark_read_decrements_once_and_returns_url() {
    let mut s = NotificationsState::default();
    s.load(NotificationFeed {
        notifications: vec![notification(1, false)],
        unread_count: 1,
    });

    assert_eq!(s.mark_read(1).as_deref(), Some("/debate/1"));
    assert_eq!(s.unread_count, 0);
    assert!(s.items[0].is_read);

    // already read: count stays, url still returned for navigation
    assert_eq!(s.mark_read(1).as_deref(), Some("/debate/1"));
    assert_eq!(s.unread_count, 0);
}

#[test]
fn mark_read_unknown_id_returns_none() {
    let mut s = NotificationsState::default();
    assert!(s.mark_read(9).is_none());
}
