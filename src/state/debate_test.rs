use super::*;
use crate::state::optimistic::Tentative;

fn author() -> UserProfile {
    UserProfile { id: 1, nickname: "alice".to_owned(), ..UserProfile::default() }
}

fn state_with_comments(comment_count: i64, comments: Vec<Comment>) -> DebateState {
    DebateState {
        debate: Some(Debate { id: 7, comment_count, ..Debate::default() }),
        comments: CommentThread::from_comments(comments),
        ..DebateState::default()
    }
}

fn root(id: i64, content: &str) -> Comment {
    Comment { id, content: content.to_owned(), ..Comment::default() }
}

// =============================================================
// Create
// =============================================================

#[test]
fn create_under_latest_sort_inserts_first_and_bumps_counter() {
    let mut state = state_with_comments(2, vec![root(1, "a"), root(2, "b")]);
    let temp = state.optimistic_create("typed just now", None, &author()).expect("inserted");

    assert!(temp < 0);
    assert_eq!(state.comments.iter_roots().next().unwrap().id, temp);
    assert_eq!(state.debate.as_ref().unwrap().comment_count, 3);
}

#[test]
fn create_under_other_sorts_skips_local_insertion() {
    let mut state = state_with_comments(2, vec![root(1, "a")]);
    state.comment_sort = CommentSort::Oldest;

    assert!(state.optimistic_create("typed", None, &author()).is_none());
    assert_eq!(state.comments.root_count(), 1);
    assert_eq!(state.debate.as_ref().unwrap().comment_count, 2);
}

#[test]
fn failed_create_restores_tree_and_counter_exactly() {
    let mut state = state_with_comments(2, vec![root(1, "a"), root(2, "b")]);
    let before_tree = state.comments.clone();

    let temp = state.optimistic_create("typed", None, &author()).expect("inserted");
    state.rollback_create(temp);

    assert_eq!(state.comments, before_tree);
    assert_eq!(state.debate.as_ref().unwrap().comment_count, 2);
}

#[test]
fn create_reply_lands_under_its_root() {
    let mut state = state_with_comments(1, vec![root(1, "a")]);
    let temp = state.optimistic_create("reply", Some(1), &author()).expect("inserted");

    assert_eq!(state.comments.replies_of(1)[0].id, temp);
    assert_eq!(state.comments.get(temp).unwrap().parent_id, Some(1));
}

// =============================================================
// Delete
// =============================================================

#[test]
fn delete_decrements_counter_and_failed_delete_restores_both() {
    let mut state = state_with_comments(3, vec![root(1, "a"), root(2, "b"), root(3, "c")]);
    let guard = Tentative::capture(&state.comments);
    let count_before = state.debate.as_ref().unwrap().comment_count;

    assert!(state.optimistic_delete(2));
    assert_eq!(state.debate.as_ref().unwrap().comment_count, 2);

    // request failed: restore snapshot and counter
    state.comments = guard.revert();
    state.debate.as_mut().unwrap().comment_count = count_before;

    assert_eq!(state.comments.root_count(), 3);
    assert_eq!(state.debate.as_ref().unwrap().comment_count, 3);
}

#[test]
fn delete_unknown_id_leaves_counter_alone() {
    let mut state = state_with_comments(1, vec![root(1, "a")]);
    assert!(!state.optimistic_delete(99));
    assert_eq!(state.debate.as_ref().unwrap().comment_count, 1);
}

// =============================================================
// Debate like
// =============================================================

#[test]
fn debate_like_double_toggle_restores_original() {
    let mut state = state_with_comments(0, Vec::new());
    state.debate.as_mut().unwrap().like_count = 10;

    state.toggle_debate_like();
    assert!(state.liked);
    assert_eq!(state.debate.as_ref().unwrap().like_count, 11);

    state.toggle_debate_like();
    assert!(!state.liked);
    assert_eq!(state.debate.as_ref().unwrap().like_count, 10);
}

// =============================================================
// Authoritative reload
// =============================================================

#[test]
fn load_comments_discards_optimistic_state() {
    let mut state = state_with_comments(1, vec![root(1, "a")]);
    state.optimistic_create("pending", None, &author());

    state.load_comments(vec![root(5, "confirmed"), root(1, "a")], 2);
    assert_eq!(state.comments.root_count(), 2);
    assert!(!state.comments.contains(-1));
    assert_eq!(state.comment_total_pages, 2);
}

// =============================================================
// Vote tally
// =============================================================

fn opinion(id: i64, side: OpinionSide) -> Opinion {
    Opinion {
        id,
        debate_id: 7,
        user_id: Some(id),
        nickname: None,
        side,
        content: None,
        created_at: None,
    }
}

#[test]
fn tally_counts_sides_and_rounds_percentages() {
    let opinions = vec![
        opinion(1, OpinionSide::For),
        opinion(2, OpinionSide::For),
        opinion(3, OpinionSide::Against),
    ];
    let tally = VoteTally::from_opinions(&opinions);
    assert_eq!(tally.for_count, 2);
    assert_eq!(tally.against_count, 1);
    assert_eq!(tally.for_percent(), 67);
    assert_eq!(tally.against_percent(), 33);
}

#[test]
fn empty_tally_shows_zero_percent() {
    let tally = VoteTally::from_opinions(&[]);
    assert_eq!(tally.total(), 0);
    assert_eq!(tally.for_percent(), 0);
    assert_eq!(tally.against_percent(), 0);
}
