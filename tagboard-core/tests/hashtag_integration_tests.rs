// Integration tests for the hashtag system
// These drive the full flow: sign in, compose, publish, then compute
// statistics over the board snapshot.

use serde_json::json;
use tagboard_core::board::{MemoryBoard, PostSource};
use tagboard_core::compose::{submit_post, Composer};
use tagboard_core::ingest::ingest_posts;
use tagboard_core::session::{AnonymousSessions, SessionProvider};
use tagboard_core::{
    analyze_hashtag_trends, calculate_hashtag_stats, filter_posts_by_hashtag,
    get_co_occurring_hashtags, get_hashtag_suggestions, get_popular_hashtags, BoardError,
};
use tagboard_types::{PostDraft, RawPost};

fn draft(text: &str, hashtags: &[&str]) -> PostDraft {
    PostDraft {
        text: text.to_string(),
        hashtags: hashtags.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_post_creation_with_hashtags() {
    let composer = Composer::default();
    let mut sessions = AnonymousSessions::default();
    let mut board = MemoryBoard::new();

    // Posting before choosing a nickname is refused
    sessions.sign_in_anonymously().unwrap();
    let err = submit_post(&composer, &sessions, &mut board, &draft("hi", &[])).unwrap_err();
    assert_eq!(err, BoardError::NicknameRequired);

    sessions.set_nickname("はなこ").unwrap();
    let post = submit_post(
        &composer,
        &sessions,
        &mut board,
        &draft("今日は文化祭で楽しかった！ #文化祭 #楽しい", &["感想"]),
    )
    .unwrap();

    assert_eq!(post.hashtags, vec!["文化祭", "楽しい", "感想"]);
    assert_eq!(post.nickname, "はなこ");
    assert_eq!(board.len(), 1);
}

#[test]
fn test_statistics_follow_new_posts() {
    let composer = Composer::default();
    let mut sessions = AnonymousSessions::default();
    let mut board = MemoryBoard::new();
    sessions.sign_in_anonymously().unwrap();
    sessions.set_nickname("ferris").unwrap();

    for text in [
        "#Rust release day #news",
        "learning #rust and #wasm",
        "#wasm in the browser",
    ] {
        submit_post(&composer, &sessions, &mut board, &draft(text, &[])).unwrap();
    }

    let posts = board.snapshot().unwrap();
    let stats = calculate_hashtag_stats(&posts);
    let rust = stats.iter().find(|s| s.hashtag == "rust").unwrap();
    assert_eq!(rust.count, 2);

    // A new post is reflected on the next computation
    submit_post(&composer, &sessions, &mut board, &draft("more #RUST", &[])).unwrap();
    let posts = board.snapshot().unwrap();
    assert_eq!(get_popular_hashtags(&posts, 1)[0].count, 3);

    let trends = analyze_hashtag_trends(&posts);
    assert_eq!(trends.total_hashtags, 6);
    assert_eq!(trends.most_popular.as_deref(), Some("rust"));

    let wasm_posts = filter_posts_by_hashtag(&posts, "WAS");
    assert_eq!(wasm_posts.len(), 2);
}

#[test]
fn test_legacy_export_feeds_statistics() {
    let records: Vec<RawPost> = serde_json::from_value(json!([
        {"id": "post1", "text": "#文化祭 最高", "hashtags": ["文化祭", "楽しい", "感想"], "createdAt": "2024-11-02T09:00:00Z"},
        {"id": "post2", "text": "準備中", "hashtags": ["文化祭", "準備", "応援"], "createdAt": "2024-11-02T10:00:00Z"},
        {"id": "post3", "text": "質問です", "categoryId": "質問", "createdAt": "2024-11-02T11:00:00Z"},
        {"id": "post4", "text": "", "hashtags": ["楽しい", "感想", null], "createdAt": "2024-11-02T12:00:00Z"},
        {"id": "post5", "text": "", "hashtags": [], "createdAt": "2024-11-02T13:00:00Z"}
    ]))
    .unwrap();
    let posts = ingest_posts(records);

    let stats = calculate_hashtag_stats(&posts);
    assert_eq!(stats.len(), 6);
    assert_eq!(stats[0].hashtag, "文化祭");
    assert_eq!(stats[0].posts, vec!["post1", "post2"]);

    let popular: Vec<(String, usize)> = get_popular_hashtags(&posts, 3)
        .into_iter()
        .map(|c| (c.hashtag, c.count))
        .collect();
    assert_eq!(
        popular,
        vec![
            ("文化祭".to_string(), 2),
            ("楽しい".to_string(), 2),
            ("感想".to_string(), 2),
        ]
    );

    let trends = analyze_hashtag_trends(&posts);
    assert!((trends.average_hashtags_per_post - 2.25).abs() < 1e-9);

    let related = get_co_occurring_hashtags(&posts, "文化祭");
    assert_eq!(related.len(), 4);
    assert!(related.iter().all(|c| c.hashtag != "文化祭"));

    let suggestions = get_hashtag_suggestions(&posts, "感", 5);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].hashtag, "感想");
}
