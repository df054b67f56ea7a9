//! Hashtag statistics over a snapshot of posts.
//!
//! Every function recomputes from the slice it is given; nothing is cached
//! between calls and the input is never modified.

use std::collections::{HashMap, HashSet};
use tagboard_types::{HashtagCount, HashtagStat, HashtagTrends, Post};

pub const DEFAULT_POPULAR_LIMIT: usize = 10;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;
pub const DEFAULT_RECENT_WINDOW: usize = 100;

/// Grouping key used by the statistics: trimmed, ASCII-lowercased
fn group_key(hashtag: &str) -> String {
    hashtag.trim().to_ascii_lowercase()
}

/// Key for query and target matching: trimmed, lowercased in full Unicode
fn match_key(hashtag: &str) -> String {
    hashtag.trim().to_lowercase()
}

fn normalized_query(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| query.to_lowercase())
}

/// Count hashtag usage across posts, most used first.
///
/// Hashtags are grouped case-insensitively (ASCII only) and displayed with
/// the first spelling seen. Counts are per occurrence, so a post listing the
/// same tag twice contributes twice. Blank entries are skipped. Ties keep the
/// order in which hashtags were first encountered.
pub fn calculate_hashtag_stats(posts: &[Post]) -> Vec<HashtagStat> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut stats: Vec<HashtagStat> = Vec::new();

    for post in posts {
        for hashtag in &post.hashtags {
            let key = group_key(hashtag);
            if key.is_empty() {
                continue;
            }

            match index.get(&key) {
                Some(&slot) => {
                    let stat = &mut stats[slot];
                    stat.count += 1;
                    stat.posts.push(post.id.clone());
                }
                None => {
                    index.insert(key, stats.len());
                    stats.push(HashtagStat {
                        hashtag: hashtag.clone(),
                        count: 1,
                        posts: vec![post.id.clone()],
                    });
                }
            }
        }
    }

    // sort_by is stable, so equal counts stay in first-seen order
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    tracing::trace!(posts = posts.len(), groups = stats.len(), "calculated hashtag stats");
    stats
}

/// Top `limit` hashtags by usage
pub fn get_popular_hashtags(posts: &[Post], limit: usize) -> Vec<HashtagCount> {
    calculate_hashtag_stats(posts)
        .iter()
        .take(limit)
        .map(HashtagCount::from)
        .collect()
}

/// Popular hashtags among the last `window` posts of the snapshot
pub fn recent_popular_hashtags(posts: &[Post], window: usize, limit: usize) -> Vec<HashtagCount> {
    let start = posts.len().saturating_sub(window);
    get_popular_hashtags(&posts[start..], limit)
}

/// Posts carrying a hashtag that contains `query` (case-insensitive
/// substring match). A blank query keeps every post.
pub fn filter_posts_by_hashtag<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let Some(query) = normalized_query(query) else {
        return posts.iter().collect();
    };

    posts
        .iter()
        .filter(|post| {
            post.hashtags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query))
        })
        .collect()
}

/// Summarize hashtag usage across the snapshot
pub fn analyze_hashtag_trends(posts: &[Post]) -> HashtagTrends {
    let stats = calculate_hashtag_stats(posts);
    let total_hashtags: usize = stats.iter().map(|stat| stat.count).sum();
    let tagged_posts = posts.iter().filter(|post| !post.hashtags.is_empty()).count();

    let average_hashtags_per_post = if tagged_posts > 0 {
        total_hashtags as f64 / tagged_posts as f64
    } else {
        0.0
    };

    HashtagTrends {
        total_hashtags,
        unique_hashtags: stats.len(),
        average_hashtags_per_post,
        most_popular: stats.first().map(|stat| stat.hashtag.clone()),
        least_used: stats
            .iter()
            .filter(|stat| stat.count == 1)
            .map(|stat| stat.hashtag.clone())
            .collect(),
    }
}

/// Hashtags appearing alongside `target`, most frequent first.
///
/// A post qualifies when one of its hashtags equals `target` after trimming
/// and lowercasing. Companions are counted by their exact spelling, so
/// `Rust` and `rust` are reported separately here, unlike in
/// [`calculate_hashtag_stats`].
pub fn get_co_occurring_hashtags(posts: &[Post], target: &str) -> Vec<HashtagCount> {
    let target = match_key(target);
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<HashtagCount> = Vec::new();

    for post in posts {
        if !post.hashtags.iter().any(|tag| match_key(tag) == target) {
            continue;
        }

        for hashtag in &post.hashtags {
            if match_key(hashtag) == target {
                continue;
            }

            match index.get(hashtag.as_str()) {
                Some(&slot) => counts[slot].count += 1,
                None => {
                    index.insert(hashtag.as_str(), counts.len());
                    counts.push(HashtagCount {
                        hashtag: hashtag.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Autocomplete candidates for a partially typed hashtag.
///
/// A blank query falls back to the most popular hashtags.
pub fn get_hashtag_suggestions(posts: &[Post], query: &str, limit: usize) -> Vec<HashtagCount> {
    let Some(query) = normalized_query(query) else {
        return get_popular_hashtags(posts, limit);
    };

    calculate_hashtag_stats(posts)
        .iter()
        .filter(|stat| stat.hashtag.to_lowercase().contains(&query))
        .take(limit)
        .map(HashtagCount::from)
        .collect()
}

/// Distinct hashtag spellings containing `query`, in first-seen order.
/// A blank query yields nothing.
pub fn search_hashtags(posts: &[Post], query: &str) -> Vec<String> {
    let Some(query) = normalized_query(query) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    posts
        .iter()
        .flat_map(|post| post.hashtags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .filter(|tag| tag.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
