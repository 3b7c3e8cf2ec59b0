// Colored terminal output for clusters, stats, and the recent feed.
//
// This module handles all terminal-specific formatting. The main.rs
// commands compute data and delegate display here.

use colored::Colorize;

use crate::clustering::TopicCluster;
use crate::db::models::{SentimentLabel, SentimentResult};
use crate::stats::{FeedEntry, Mood, PulseStats};

/// Display a sentiment analysis and topic tags for a single text.
pub fn display_analysis(text: &str, sentiment: &SentimentResult, topics: &[String]) {
    println!("\n{}", "=== Pulse Analysis ===".bold());
    println!("  Text: {}", super::truncate_chars(text, 120).dimmed());
    println!(
        "  Sentiment: {}  (score {:+.2}, magnitude {:.2})",
        colorize_label(sentiment.label),
        sentiment.score,
        sentiment.magnitude
    );
    if topics.is_empty() {
        println!("  Topics: {}", "none".dimmed());
    } else {
        println!("  Topics: {}", topics.join(", "));
    }
}

/// Display the current topic clusters.
pub fn display_clusters(clusters: &[TopicCluster]) {
    if clusters.is_empty() {
        println!("No clusters right now. Clusters need 3+ pulses in the last hour in one area.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Topic Clusters ({}) ===", clusters.len()).bold()
    );
    println!();

    println!(
        "  {:<24} {:>7}  {:>8}  {:<22}",
        "Topic".dimmed(),
        "Pulses".dimmed(),
        "Strength".dimmed(),
        "Center".dimmed(),
    );
    println!("  {}", "-".repeat(66).dimmed());

    for cluster in clusters {
        let hot = if cluster.emergent {
            " HOT".yellow().bold().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<24} {:>7}  {:>7.0}%  {:>9.4}, {:<10.4}{}",
            cluster.label,
            cluster.submissions.len(),
            cluster.strength * 100.0,
            cluster.center.latitude,
            cluster.center.longitude,
            hot,
        );
        for s in cluster.submissions.iter().take(3) {
            println!("      \"{}\"", super::truncate_chars(&s.text, 80).dimmed());
        }
        if cluster.submissions.len() > 3 {
            println!(
                "      {}",
                format!("+{} more pulses", cluster.submissions.len() - 3).dimmed()
            );
        }
    }
    println!();
}

/// Display the area stats panel.
pub fn display_stats(stats: &PulseStats) {
    println!("\n{}", "=== Area Pulse ===".bold());
    println!(
        "  Overall vibe: {}  (avg score {:+.2})",
        colorize_mood(stats.mood),
        stats.average_score
    );
    println!("  Total pulses: {}", stats.total);
    println!("  Last hour:    {}", stats.last_hour.to_string().purple().bold());

    println!("\n  Sentiment breakdown:");
    println!("    {} {}", "positive".green(), stats.sentiment.positive);
    println!("    {} {}", "neutral ".dimmed(), stats.sentiment.neutral);
    println!("    {} {}", "negative".red(), stats.sentiment.negative);

    if !stats.top_topics.is_empty() {
        println!("\n  Trending topics:");
        for (i, topic) in stats.top_topics.iter().enumerate() {
            let hot = if topic.emergent {
                " Hot".yellow().to_string()
            } else {
                String::new()
            };
            println!(
                "    #{} {:<24} {} pulses{}",
                i + 1,
                topic.label,
                topic.members,
                hot
            );
        }
    }

    if stats.emergent_clusters > 0 {
        let plural = if stats.emergent_clusters > 1 { "s" } else { "" };
        println!(
            "\n  {} {} new topic{} detected in your area",
            "!".yellow().bold(),
            stats.emergent_clusters,
            plural
        );
    }
}

/// Display the recent pulse feed.
pub fn display_feed(entries: &[FeedEntry]) {
    if entries.is_empty() {
        println!("No pulses yet in this area. Be the first to share the vibe!");
        return;
    }

    println!(
        "\n{}",
        format!("=== Recent Pulses ({}) ===", entries.len()).bold()
    );
    println!();

    for entry in entries {
        println!(
            "  {:<9} {:>9}  {}",
            colorize_label(entry.label),
            entry.time_ago.dimmed(),
            super::truncate_chars(&entry.text, 100)
        );
        if !entry.topics.is_empty() {
            println!("  {:<9} {:>9}  {}", "", "", entry.topics.join(" · ").cyan());
        }
    }
    println!();
}

fn colorize_label(label: SentimentLabel) -> colored::ColoredString {
    match label {
        SentimentLabel::Positive => label.as_str().green(),
        SentimentLabel::Negative => label.as_str().red(),
        SentimentLabel::Neutral => label.as_str().dimmed(),
    }
}

fn colorize_mood(mood: Mood) -> colored::ColoredString {
    match mood {
        Mood::Positive => mood.as_str().green().bold(),
        Mood::Negative => mood.as_str().red().bold(),
        Mood::Neutral => mood.as_str().normal(),
    }
}
