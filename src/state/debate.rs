#[cfg(test)]
#[path = "debate_test.rs"]
mod debate_test;

use crate::net::types::{Comment, Debate, Opinion, OpinionSide, UserProfile};
use crate::state::comments::{CommentSort, CommentThread};

/// State for the debate detail page: the debate, its comment tree,
/// opinions, and the viewer's like flag.
///
/// Mutating methods are local-first; the page layer pairs them with the
/// REST call and reverts on failure. A failed mutation must leave the
/// visible tree and the comment counter exactly at their pre-mutation
/// values, so create/delete adjust the counter inside the same method
/// that edits the tree.
#[derive(Clone, Debug, Default)]
pub struct DebateState {
    pub debate: Option<Debate>,
    pub comments: CommentThread,
    pub comment_sort: CommentSort,
    pub comment_page: u32,
    pub comment_total_pages: u32,
    pub opinions: Vec<Opinion>,
    pub liked: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl DebateState {
    /// Fabricate and insert a local comment ahead of server confirmation.
    ///
    /// Only inserts when the active sort shows newest first; under any
    /// other order a fabricated entry would be misplaced, and the reload
    /// puts it where it belongs. Returns the temporary id when inserted.
    pub fn optimistic_create(
        &mut self,
        content: &str,
        parent_id: Option<i64>,
        author: &UserProfile,
    ) -> Option<i64> {
        if self.comment_sort != CommentSort::Latest {
            return None;
        }
        let temp_id = self.comments.local_id();
        let fabricated = Comment {
            id: temp_id,
            debate_id: self.debate.as_ref().map_or(0, |d| d.id),
            user_id: Some(author.id),
            nickname: Some(author.nickname.clone()),
            profile_image: author.profile_image.clone(),
            content: content.to_owned(),
            parent_id,
            ..Comment::default()
        };
        let inserted = match parent_id {
            Some(root_id) => self.comments.insert_reply_front(root_id, fabricated),
            None => self.comments.insert_root_front(fabricated),
        };
        if !inserted {
            return None;
        }
        self.bump_comment_count(1);
        Some(temp_id)
    }

    /// Undo a failed create: drop the fabricated entry and restore the
    /// counter.
    pub fn rollback_create(&mut self, temp_id: i64) {
        if self.comments.remove(temp_id) {
            self.bump_comment_count(-1);
        }
    }

    /// Remove a comment and decrement the debate counter in one step.
    pub fn optimistic_delete(&mut self, id: i64) -> bool {
        if self.comments.remove(id) {
            self.bump_comment_count(-1);
            true
        } else {
            false
        }
    }

    /// Flip the viewer's like on the debate itself. Symmetric, so a
    /// failed request rolls back by calling this again.
    pub fn toggle_debate_like(&mut self) {
        self.liked = !self.liked;
        if let Some(debate) = self.debate.as_mut() {
            debate.like_count += if self.liked { 1 } else { -1 };
        }
    }

    /// Replace comment state from an authoritative fetch, discarding any
    /// optimistic leftovers.
    pub fn load_comments(&mut self, list: Vec<Comment>, total_pages: u32) {
        self.comments = CommentThread::from_comments(list);
        self.comment_total_pages = total_pages;
    }

    fn bump_comment_count(&mut self, delta: i64) {
        if let Some(debate) = self.debate.as_mut() {
            debate.comment_count += delta;
        }
    }
}

/// FOR/AGAINST tallies with display percentages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub for_count: usize,
    pub against_count: usize,
}

impl VoteTally {
    pub fn from_opinions(opinions: &[Opinion]) -> Self {
        let for_count = opinions.iter().filter(|o| o.side == OpinionSide::For).count();
        let against_count = opinions.iter().filter(|o| o.side == OpinionSide::Against).count();
        Self { for_count, against_count }
    }

    pub fn total(self) -> usize {
        self.for_count + self.against_count
    }

    pub fn for_percent(self) -> u32 {
        percent(self.for_count, self.total())
    }

    pub fn against_percent(self) -> u32 {
        percent(self.against_count, self.total())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}
