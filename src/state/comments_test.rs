use super::*;
use crate::net::types::Comment;
use crate::state::optimistic::Tentative;

fn comment(id: i64, content: &str) -> Comment {
    Comment { id, content: content.to_owned(), ..Comment::default() }
}

fn reply_of(parent: i64, id: i64, content: &str) -> Comment {
    Comment { id, parent_id: Some(parent), content: content.to_owned(), ..Comment::default() }
}

/// N roots, each with M replies. Ids: roots 1..=n, replies 100*root+k.
fn grid(n: i64, m: i64) -> CommentThread {
    let list = (1..=n)
        .map(|r| {
            let mut root = comment(r, &format!("root {r}"));
            root.replies = (1..=m)
                .map(|k| reply_of(r, r * 100 + k, &format!("reply {r}.{k}")))
                .collect();
            root
        })
        .collect();
    CommentThread::from_comments(list)
}

// =============================================================
// Index construction
// =============================================================

#[test]
fn from_comments_indexes_roots_and_replies() {
    let thread = grid(3, 2);
    assert_eq!(thread.root_count(), 3);
    assert_eq!(thread.len(), 9);
    assert_eq!(thread.iter_roots().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(thread.replies_of(2).iter().map(|c| c.id).collect::<Vec<_>>(), vec![201, 202]);
}

#[test]
fn from_comments_drops_duplicate_ids() {
    let list = vec![comment(1, "first"), comment(1, "imposter"), comment(2, "second")];
    let thread = CommentThread::from_comments(list);
    assert_eq!(thread.root_count(), 2);
    assert_eq!(thread.get(1).unwrap().content, "first");
}

#[test]
fn from_comments_links_replies_missing_parent_id() {
    let mut root = comment(5, "root");
    root.replies = vec![comment(6, "reply with no parentId")];
    let thread = CommentThread::from_comments(vec![root]);
    assert_eq!(thread.get(6).unwrap().parent_id, Some(5));
}

#[test]
fn to_comments_rebuilds_nested_shape_in_order() {
    let thread = grid(2, 2);
    let list = thread.to_comments();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, 1);
    assert_eq!(list[0].replies.iter().map(|c| c.id).collect::<Vec<_>>(), vec![101, 102]);
}

#[test]
fn lookup_searches_roots_then_replies() {
    let thread = grid(2, 2);
    assert_eq!(thread.get(2).unwrap().content, "root 2");
    assert_eq!(thread.get(102).unwrap().content, "reply 1.2");
    assert!(thread.get(999).is_none());
}

// =============================================================
// Create (optimistic insert + rollback)
// =============================================================

#[test]
fn insert_root_front_places_fabricated_comment_first() {
    let mut thread = grid(2, 0);
    let temp = thread.local_id();
    assert!(temp < 0);
    assert!(thread.insert_root_front(comment(temp, "just typed")));

    let ids: Vec<i64> = thread.iter_roots().map(|c| c.id).collect();
    assert_eq!(ids, vec![temp, 1, 2]);
}

#[test]
fn insert_rejects_duplicate_id() {
    let mut thread = grid(2, 1);
    assert!(!thread.insert_root_front(comment(1, "dup")));
    assert!(!thread.insert_root_front(comment(101, "dup of reply")));
    assert_eq!(thread.len(), 4);
}

#[test]
fn failed_create_rolls_back_to_exact_pre_mutation_tree() {
    let mut thread = grid(2, 1);
    let before = thread.clone();

    let temp = thread.local_id();
    thread.insert_root_front(comment(temp, "optimistic"));
    assert_ne!(thread, before);

    // request failed: remove the fabricated entry
    assert!(thread.remove(temp));
    assert_eq!(thread, before);
}

#[test]
fn refetch_replaces_fabricated_id_without_duplicates() {
    // sort=latest: fabricated comment shows first immediately...
    let mut thread = grid(1, 0);
    let temp = thread.local_id();
    thread.insert_root_front(comment(temp, "typed"));
    assert_eq!(thread.iter_roots().next().unwrap().id, temp);

    // ...then the confirming refetch is authoritative.
    let confirmed = CommentThread::from_comments(vec![comment(7, "typed"), comment(1, "root 1")]);
    assert_eq!(confirmed.root_count(), 2);
    assert!(!confirmed.contains(temp));
    assert_eq!(confirmed.iter_roots().next().unwrap().id, 7);
}

#[test]
fn insert_reply_front_prepends_to_its_root_only() {
    let mut thread = grid(2, 2);
    let temp = thread.local_id();
    assert!(thread.insert_reply_front(2, comment(temp, "quick reply")));

    let ids: Vec<i64> = thread.replies_of(2).iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![temp, 201, 202]);
    assert_eq!(thread.replies_of(1).iter().map(|c| c.id).collect::<Vec<_>>(), vec![101, 102]);
    assert_eq!(thread.get(temp).unwrap().parent_id, Some(2));
}

#[test]
fn insert_reply_rejects_unknown_root() {
    let mut thread = grid(1, 0);
    assert!(!thread.insert_reply_front(42, comment(-1, "orphan")));
    assert_eq!(thread.len(), 1);
}

#[test]
fn local_ids_stay_unique_across_pending_inserts() {
    let mut thread = grid(1, 0);
    let a = thread.local_id();
    thread.insert_root_front(comment(a, "one"));
    let b = thread.local_id();
    assert_ne!(a, b);
    assert!(b < 0);
}

// =============================================================
// Edit
// =============================================================

#[test]
fn edit_touches_exactly_one_node() {
    let thread = grid(4, 3);
    let mut edited = thread.clone();
    assert!(edited.edit(302, "changed"));

    for root in thread.iter_roots() {
        for before in std::iter::once(root).chain(thread.replies_of(root.id)) {
            let after = edited.get(before.id).expect("node survives edit");
            if before.id == 302 {
                assert_eq!(after.content, "changed");
                let mut rest = after.clone();
                rest.content.clone_from(&before.content);
                assert_eq!(&rest, before);
            } else {
                assert_eq!(after, before);
            }
        }
    }
}

#[test]
fn edit_unknown_id_is_a_no_op() {
    let mut thread = grid(2, 2);
    let before = thread.clone();
    assert!(!thread.edit(999, "nope"));
    assert_eq!(thread, before);
}

#[test]
fn failed_edit_reverts_via_snapshot() {
    let mut thread = grid(2, 2);
    let guard = Tentative::capture(&thread);

    thread.edit(102, "optimistic edit");
    assert_eq!(thread.get(102).unwrap().content, "optimistic edit");

    thread = guard.revert();
    assert_eq!(thread.get(102).unwrap().content, "reply 1.2");
    assert_eq!(thread, grid(2, 2));
}

// =============================================================
// Delete
// =============================================================

#[test]
fn delete_reply_touches_exactly_one_node() {
    let thread = grid(3, 3);
    let mut after = thread.clone();
    assert!(after.remove(203));

    assert_eq!(after.len(), thread.len() - 1);
    assert!(!after.contains(203));
    for root in thread.iter_roots() {
        for before in std::iter::once(root).chain(thread.replies_of(root.id)) {
            if before.id == 203 {
                continue;
            }
            assert_eq!(after.get(before.id).expect("untouched"), before);
        }
    }
    assert_eq!(after.replies_of(2).iter().map(|c| c.id).collect::<Vec<_>>(), vec![201, 202]);
}

#[test]
fn delete_root_removes_its_replies() {
    let mut thread = grid(2, 2);
    assert!(thread.remove(1));
    assert!(!thread.contains(1));
    assert!(!thread.contains(101));
    assert!(!thread.contains(102));
    assert_eq!(thread.len(), 3);
}

#[test]
fn delete_unknown_id_is_a_no_op() {
    let mut thread = grid(1, 1);
    let before = thread.clone();
    assert!(!thread.remove(999));
    assert_eq!(thread, before);
}

#[test]
fn failed_delete_restores_tree_snapshot() {
    let mut thread = grid(2, 2);
    let guard = Tentative::capture(&thread);

    thread.remove(2);
    assert_eq!(thread.root_count(), 1);

    thread = guard.revert();
    assert_eq!(thread, grid(2, 2));
}

// =============================================================
// Like toggle
// =============================================================

#[test]
fn toggle_like_flips_flag_and_counter() {
    let mut thread = grid(1, 1);
    assert!(thread.toggle_like(101));
    let node = thread.get(101).unwrap();
    assert!(node.liked);
    assert_eq!(node.like_count, 1);
}

#[test]
fn double_toggle_restores_original_state() {
    let mut thread = grid(2, 2);
    let before = thread.clone();

    assert!(thread.toggle_like(201));
    assert!(thread.toggle_like(201));
    assert_eq!(thread, before);
}

#[test]
fn failed_toggle_rolls_back_by_reapplying() {
    let mut thread = grid(2, 2);
    let before = thread.clone();

    // optimistic toggle, then the request fails: symmetric undo
    thread.toggle_like(102);
    thread.toggle_like(102);
    assert_eq!(thread, before);
}

#[test]
fn unliking_decrements_the_counter() {
    let mut root = comment(1, "root");
    root.liked = true;
    root.like_count = 5;
    let mut thread = CommentThread::from_comments(vec![root]);

    thread.toggle_like(1);
    let node = thread.get(1).unwrap();
    assert!(!node.liked);
    assert_eq!(node.like_count, 4);
}
