use super::*;

fn page_of(ids: &[i64], total_pages: u32) -> Page<Debate> {
    Page {
        content: ids.iter().map(|id| Debate { id: *id, ..Debate::default() }).collect(),
        total_pages,
        total_elements: u64::from(total_pages) * ids.len() as u64,
    }
}

#[test]
fn debates_state_defaults() {
    let s = DebatesState::default();
    assert!(s.items.is_empty());
    assert_eq!(s.page, 0);
    assert_eq!(s.sort, DebateSort::Latest);
    assert!(s.category_id.is_none());
}

#[test]
fn load_page_replaces_items_and_totals() {
    let mut s = DebatesState { loading: true, ..DebatesState::default() };
    s.load_page(page_of(&[3, 2, 1], 4));
    assert_eq!(s.items.len(), 3);
    assert_eq!(s.total_pages, 4);
    assert!(!s.loading);
}

#[test]
fn filter_changes_reset_to_first_page() {
    let mut s = DebatesState { page: 3, total_pages: 5, ..DebatesState::default() };
    s.set_sort(DebateSort::Popular);
    assert_eq!(s.page, 0);

    s.page = 2;
    s.set_category(Some(9));
    assert_eq!(s.page, 0);

    s.page = 2;
    s.set_keyword("school".to_owned());
    assert_eq!(s.page, 0);
}

#[test]
fn paging_clamps_at_both_ends() {
    let mut s = DebatesState { total_pages: 2, ..DebatesState::default() };
    s.prev_page();
    assert_eq!(s.page, 0);
    s.next_page();
    assert_eq!(s.page, 1);
    s.next_page();
    assert_eq!(s.page, 1);
}

#[test]
fn sort_params_match_backend_values() {
    assert_eq!(DebateSort::Latest.as_param(), "latest");
    assert_eq!(DebateSort::Popular.as_param(), "popular");
    assert_eq!(DebateSort::Comments.as_param(), "comments");
    assert_eq!(DebateSort::Views.as_param(), "views");
}
