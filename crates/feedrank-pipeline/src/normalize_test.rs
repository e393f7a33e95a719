use chrono::TimeZone;
use feedrank_core::FieldCandidates;
use serde_json::{json, Value};

use super::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
}

fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn normalize(value: Value) -> CanonicalItem {
    normalize_record(&record(value), &NormalizerConfig::default(), now())
}

// -----------------------------------------------------------------------
// source shapes
// -----------------------------------------------------------------------

#[test]
fn normalizes_hacker_news_item() {
    let item = normalize(json!({
        "id": 123_456,
        "title": "Show HN: My Project",
        "url": "https://example.com",
        "score": 150,
        "descendants": 42,
        "time": 1_704_067_200
    }));
    assert_eq!(item.title, "Show HN: My Project");
    assert_eq!(item.url, "example.com");
    assert_eq!(item.domain, "example.com");
    assert_eq!(item.source, DEFAULT_SOURCE);
    assert!((item.score - 150.0).abs() < f64::EPSILON);
    assert_eq!(item.comments, 42);
    assert_eq!(item.timestamp, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(item.age_hours, 24);
    assert_eq!(item.id.as_deref(), Some("123456"));
}

#[test]
fn normalizes_newsapi_article_with_nested_source() {
    let item = normalize(json!({
        "source": { "id": null, "name": "Reuters" },
        "title": "Markets rally",
        "url": "https://www.reuters.com/markets/rally/",
        "publishedAt": "2024-01-01T18:00:00Z",
        "description": "Stocks rose\non Monday."
    }));
    assert_eq!(item.source, "Reuters");
    assert_eq!(item.url, "reuters.com/markets/rally");
    assert_eq!(item.domain, "reuters.com");
    assert_eq!(item.summary, "Stocks rose on Monday.");
    assert_eq!(item.age_hours, 6);
    assert!(item.score.abs() < f64::EPSILON);
    assert_eq!(item.comments, 0);
}

#[test]
fn normalizes_rss_item() {
    let item = normalize(json!({
        "title": "Release notes",
        "link": "http://blog.example.org/posts/1/",
        "creator": "Jane",
        "pubDate": "Mon, 01 Jan 2024 12:00:00 GMT",
        "contentSnippet": "What changed this week"
    }));
    assert_eq!(item.url, "blog.example.org/posts/1");
    assert_eq!(item.domain, "blog.example.org");
    assert_eq!(item.source, "Jane");
    assert_eq!(item.summary, "What changed this week");
    assert_eq!(item.age_hours, 12);
}

#[test]
fn normalizes_reddit_post_votes() {
    let item = normalize(json!({
        "title": "Ask: favourite tools?",
        "url": "https://www.reddit.com/r/rust/comments/abc/",
        "ups": 80,
        "downs": 5,
        "num_comments": 17,
        "created_utc": 1_704_110_400.0
    }));
    assert!((item.score - 80.0).abs() < f64::EPSILON);
    assert_eq!(item.upvotes, 80);
    assert_eq!(item.downvotes, 5);
    assert_eq!(item.comments, 17);
    assert_eq!(item.age_hours, 12);
}

// -----------------------------------------------------------------------
// defaults and degradation
// -----------------------------------------------------------------------

#[test]
fn empty_record_gets_all_defaults() {
    let (item, issues) =
        normalize_record_with_issues(&RawRecord::new(), &NormalizerConfig::default(), now());
    assert_eq!(item.title, DEFAULT_TITLE);
    assert_eq!(item.source, DEFAULT_SOURCE);
    assert_eq!(item.summary, "");
    assert_eq!(item.url, "");
    assert_eq!(item.domain, UNKNOWN_DOMAIN);
    assert!(item.score.abs() < f64::EPSILON);
    assert_eq!(item.comments, 0);
    assert_eq!(item.timestamp, now());
    assert_eq!(item.age_hours, 0);
    assert!(item.id.is_none());
    assert_eq!(issues, vec![RecordIssue::MissingTimestamp]);
}

#[test]
fn unparsable_timestamp_falls_back_to_now() {
    let (item, issues) = normalize_record_with_issues(
        &record(json!({ "title": "x", "timestamp": "the other day" })),
        &NormalizerConfig::default(),
        now(),
    );
    assert_eq!(item.timestamp, now());
    assert_eq!(item.age_hours, 0);
    assert!(matches!(
        issues.as_slice(),
        [RecordIssue::UnparsableTimestamp { .. }]
    ));
}

#[test]
fn unparsable_url_yields_unknown_domain() {
    let (item, issues) = normalize_record_with_issues(
        &record(json!({ "url": "not a url at all", "timestamp": 1_704_067_200 })),
        &NormalizerConfig::default(),
        now(),
    );
    assert_eq!(item.url, "not a url at all");
    assert_eq!(item.domain, UNKNOWN_DOMAIN);
    assert_eq!(
        issues,
        vec![RecordIssue::UnparsableUrl {
            url: "not a url at all".to_string()
        }]
    );
}

#[test]
fn future_timestamp_keeps_negative_age() {
    let item = normalize(json!({ "timestamp": "2024-01-02T05:00:00Z" }));
    assert_eq!(item.age_hours, -5);
}

#[test]
fn whitespace_only_title_falls_through_to_next_candidate() {
    let item = normalize(json!({ "title": "  \n ", "headline": "Real headline" }));
    assert_eq!(item.title, "Real headline");
}

#[test]
fn non_string_values_do_not_break_text_fields() {
    let item = normalize(json!({ "title": ["a", "b"], "summary": 42, "score": "n/a" }));
    assert_eq!(item.title, DEFAULT_TITLE);
    assert_eq!(item.summary, "42");
    assert!(item.score.abs() < f64::EPSILON);
}

#[test]
fn negative_comment_counts_clamp_to_zero() {
    let item = normalize(json!({ "comments": -3 }));
    assert_eq!(item.comments, 0);
}

// -----------------------------------------------------------------------
// configuration
// -----------------------------------------------------------------------

#[test]
fn truncates_title_and_summary_to_configured_lengths() {
    let config = NormalizerConfig {
        max_title_len: 10,
        max_summary_len: 4,
        ..NormalizerConfig::default()
    };
    let item = normalize_record(
        &record(json!({ "title": "An   extremely long\ttitle", "summary": "abcdefgh" })),
        &config,
        now(),
    );
    assert_eq!(item.title, "An extreme");
    assert_eq!(item.summary, "abcd");
}

#[test]
fn default_lengths_are_200_and_500() {
    let long = "x".repeat(1_000);
    let item = normalize(json!({ "title": long, "summary": long }));
    assert_eq!(item.title.chars().count(), 200);
    assert_eq!(item.summary.chars().count(), 500);
}

#[test]
fn custom_candidate_lists_are_evaluated_in_order() {
    let config = NormalizerConfig {
        fields: FieldCandidates {
            title: vec!["data.headline".to_string(), "title".to_string()],
            score: vec!["metrics.likes".to_string()],
            ..FieldCandidates::default()
        },
        ..NormalizerConfig::default()
    };
    let item = normalize_record(
        &record(json!({
            "title": "ignored",
            "data": { "headline": "From nested data" },
            "metrics": { "likes": 12 }
        })),
        &config,
        now(),
    );
    assert_eq!(item.title, "From nested data");
    assert!((item.score - 12.0).abs() < f64::EPSILON);
}

// -----------------------------------------------------------------------
// normalize_batch
// -----------------------------------------------------------------------

#[test]
fn batch_preserves_length_and_order() {
    let records: Vec<RawRecord> = vec![
        record(json!({ "title": "first" })),
        RawRecord::new(),
        record(json!({ "title": "third", "timestamp": "garbage" })),
    ];
    let items = normalize_batch(&records, &NormalizerConfig::default(), now());
    assert_eq!(items.len(), records.len());
    assert_eq!(items[0].title, "first");
    assert_eq!(items[1].title, DEFAULT_TITLE);
    assert_eq!(items[2].title, "third");
}

#[test]
fn batch_uses_one_now_for_every_item() {
    let records: Vec<RawRecord> = (0..5).map(|_| RawRecord::new()).collect();
    let items = normalize_batch(&records, &NormalizerConfig::default(), now());
    assert!(items.iter().all(|item| item.timestamp == now()));
}

#[test]
fn empty_batch_is_empty() {
    assert!(normalize_batch(&[], &NormalizerConfig::default(), now()).is_empty());
}
