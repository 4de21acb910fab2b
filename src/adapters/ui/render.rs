//! Terminal rendering of an AnalysisReport. Display only; all numbers come from the report.

use crate::domain::{AnalysisReport, DomainError, SentimentLabel, TermGroup};
use crossterm::style::{Color, Stylize};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;
const TERMS_SHOWN: usize = 15;
const COMMENT_PREVIEW: usize = 80;

fn label_color(label: &SentimentLabel) -> Color {
    match label {
        SentimentLabel::Positive => Color::Green,
        SentimentLabel::Negative => Color::Red,
        SentimentLabel::Neutral => Color::Grey,
        SentimentLabel::Other(_) => Color::Yellow,
    }
}

fn group_title(group: &TermGroup) -> String {
    match group {
        TermGroup::All => "All comments".to_string(),
        TermGroup::Label(label) => format!("{} comments", capitalize(label.as_str())),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn preview(text: &str) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= COMMENT_PREVIEW {
        flat
    } else {
        let cut: String = flat.chars().take(COMMENT_PREVIEW).collect();
        format!("{}...", cut)
    }
}

/// Right-aligned like count. Padded before styling; styled content ignores width.
fn likes_cell(like_count: u64) -> String {
    format!("{:>7}", format!("👍 {}", like_count))
}

/// Human-readable, colored report.
pub fn format_report(report: &AnalysisReport) -> String {
    let agg = &report.aggregation;
    let mut out = String::new();

    let _ = writeln!(out, "\n{} {}", "Video:".bold(), report.video.as_str().cyan());
    let _ = writeln!(
        out,
        "{} {}",
        "Analyzed:".bold(),
        report.analyzed_at.format("%Y-%m-%d %H:%M UTC")
    );

    let _ = writeln!(out, "\n{}", "Engagement".bold().underlined());
    let _ = writeln!(out, "  Likes:    {}", report.engagement.like_count.to_string().green());
    let _ = writeln!(out, "  Dislikes: {}", "not reported by YouTube".dark_grey());

    let total: usize = agg.label_counts.values().sum();
    let _ = writeln!(
        out,
        "\n{} ({} comments)",
        "Sentiment ratio".bold().underlined(),
        total
    );
    for (label, count) in &agg.label_counts {
        let ratio = agg.ratio(label);
        let filled = (ratio * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
        let _ = writeln!(
            out,
            "  {:<10} {} {:>5.1}% ({})",
            label.as_str(),
            bar.with(label_color(label)),
            ratio * 100.0,
            count
        );
    }

    let _ = writeln!(out, "\n{}", "Top liked comments".bold().underlined());
    if agg.top_liked.is_empty() {
        let _ = writeln!(out, "  {}", "no comments".dark_grey());
    }
    for (i, c) in agg.top_liked.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {}  {}",
            i + 1,
            likes_cell(c.like_count).yellow(),
            preview(&c.text)
        );
    }

    for (group, terms) in &agg.term_frequency_by_label {
        let color = match group {
            TermGroup::All => Color::Cyan,
            TermGroup::Label(label) => label_color(label),
        };
        let _ = writeln!(out, "\n{}", group_title(group).bold().with(color));
        if terms.is_empty() {
            let _ = writeln!(out, "  {}", "no terms".dark_grey());
            continue;
        }
        let line = terms
            .iter()
            .take(TERMS_SHOWN)
            .map(|t| format!("{} ({})", t.term, t.count))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "  {}", line);
    }

    out
}

/// Machine-readable report for headless consumers.
pub fn format_json(report: &AnalysisReport) -> Result<String, DomainError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| DomainError::Api(format!("failed to serialize report: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Comment, EngagementStats, LabeledComment, VideoRef};
    use crate::usecases::Aggregator;
    use chrono::Utc;

    fn report() -> AnalysisReport {
        let comments = vec![
            LabeledComment {
                comment: Comment::new("great video", 20),
                label: SentimentLabel::Positive,
            },
            LabeledComment {
                comment: Comment::new("terrible content", 5),
                label: SentimentLabel::Negative,
            },
        ];
        let plain: Vec<Comment> = comments.iter().map(|l| l.comment.clone()).collect();
        AnalysisReport {
            video: VideoRef::resolve("https://youtu.be/abc123XYZ0").unwrap(),
            engagement: EngagementStats { like_count: 99 },
            aggregation: Aggregator::default().aggregate(&comments, &plain),
            comments,
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn text_report_mentions_every_section() {
        let text = format_report(&report());
        assert!(text.contains("abc123XYZ0"));
        assert!(text.contains("99"));
        assert!(text.contains("not reported"));
        assert!(text.contains("great video"));
        assert!(text.contains("Positive comments"));
        assert!(text.contains("terrible (1)"));
    }

    #[test]
    fn json_report_has_string_keyed_maps() {
        let json = format_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["video"], "abc123XYZ0");
        assert_eq!(value["engagement"]["like_count"], 99);
        assert_eq!(value["aggregation"]["label_counts"]["positive"], 1);
        assert_eq!(value["aggregation"]["label_counts"]["negative"], 1);
        assert_eq!(value["aggregation"]["top_liked"][0]["like_count"], 20);
        assert!(value["aggregation"]["term_frequency_by_label"]["all"].is_array());
        assert_eq!(value["comments"][1]["label"], "negative");
        assert_eq!(value["comments"][1]["text"], "terrible content");
    }

    #[test]
    fn like_column_is_right_aligned() {
        assert_eq!(likes_cell(20), "   👍 20");
        assert_eq!(likes_cell(12345), "👍 12345");
        assert!(format_report(&report()).contains("   👍 20"));
    }

    #[test]
    fn long_comments_are_truncated() {
        let long = "x".repeat(200);
        assert_eq!(preview(&long).chars().count(), COMMENT_PREVIEW + 3);
        assert_eq!(preview("a\nb"), "a b");
    }
}
