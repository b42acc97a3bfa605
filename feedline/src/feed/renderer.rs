//! Feed renderer
//!
//! Renders feed state snapshots to plain console text. Post bodies come
//! from plugin dispatch; this module draws everything around them.

use crate::app::FeedState;
use crate::domain::entities::Post;
use crate::feed::PluginRegistry;

const RULE_WIDTH: usize = 50;

/// Render the whole feed: header, error banner, posts, pagination status
pub fn render_feed(state: &FeedState, plugins: &PluginRegistry) -> String {
    let mut buf = String::new();

    // Header
    buf.push('\n');
    buf.push_str(&"=".repeat(RULE_WIDTH));
    buf.push_str("\nSOCIAL MEDIA FEED\n");
    buf.push_str(&"=".repeat(RULE_WIDTH));
    buf.push('\n');

    if let Some(error) = &state.error {
        buf.push_str(&format!("\nError: {}\n", error));
    }

    if state.posts.is_empty() {
        if state.is_busy() {
            buf.push_str("\nLoading posts...\n");
        } else {
            buf.push_str("\n_No posts yet._\n");
        }
        return buf;
    }

    for (i, post) in state.posts.iter().enumerate() {
        buf.push_str(&render_post(i + 1, post, plugins));
    }

    buf.push_str(&format!("\n{}\n", render_status_line(state)));
    buf
}

/// Render one post as a card. `index` is the 1-based feed position used by `like N`.
pub fn render_post(index: usize, post: &Post, plugins: &PluginRegistry) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let like_icon = if post.liked { "♥" } else { "♡" };

    format!(
        "\n{rule}\n[{index}] {} (@{})\nPosted at: {}\n\n{}\n\n{like_icon} {} likes | 💬 {} comments | ↪ {} shares\n{rule}\n",
        post.author.name,
        post.author.username,
        post.created_at.format("%Y-%m-%d %H:%M"),
        plugins.render(post),
        post.likes,
        post.comments,
        post.shares,
    )
}

fn render_status_line(state: &FeedState) -> &'static str {
    if state.is_refreshing {
        "Refreshing..."
    } else if state.is_loading {
        "Loading more posts..."
    } else if state.has_more {
        "Type `more` to load more..."
    } else {
        "No more posts to load."
    }
}

/// Render the loaded posts as pretty-printed JSON
pub fn render_json(state: &FeedState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&state.posts)
}
