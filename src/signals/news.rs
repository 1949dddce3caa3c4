//! News sentiment signal from headline keyword counts.

use crate::config::NewsKeywords;
use crate::models::signal::{Bias, Confidence, Signal, SignalKind};
use crate::models::NewsItem;

const MAX_HEADLINE_DETAILS: usize = 3;

/// Keyword hits across a batch of headlines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordScore {
    pub positive: usize,
    pub negative: usize,
}

impl KeywordScore {
    pub fn bias(&self) -> Bias {
        if self.positive > self.negative + 1 {
            Bias::Bullish
        } else if self.negative > self.positive + 1 {
            Bias::Bearish
        } else {
            Bias::Neutral
        }
    }
}

/// Count keyword hits, one per keyword per headline, case-insensitively.
///
/// Matching is by substring, so "again" counts for `gain` and "cutting" for `cut`.
pub fn score_headlines(items: &[NewsItem], keywords: &NewsKeywords) -> KeywordScore {
    let mut score = KeywordScore::default();
    for item in items {
        let title = item.title().to_lowercase();
        if title.is_empty() {
            continue;
        }
        score.positive += keywords
            .positive
            .iter()
            .filter(|k| title.contains(k.as_str()))
            .count();
        score.negative += keywords
            .negative
            .iter()
            .filter(|k| title.contains(k.as_str()))
            .count();
    }
    score
}

/// Whether any headline names the ticker itself.
pub fn mentions_ticker(items: &[NewsItem], ticker: &str) -> bool {
    let ticker = ticker.trim().to_lowercase();
    if ticker.is_empty() {
        return false;
    }
    items
        .iter()
        .any(|item| item.title().to_lowercase().contains(&ticker))
}

fn tag_counts(items: &[NewsItem]) -> (usize, usize) {
    items
        .iter()
        .filter_map(|item| item.sentiment.as_deref())
        .map(|tag| tag.trim().to_lowercase())
        .fold((0, 0), |(pos, neg), tag| {
            if tag.starts_with("pos") || tag.starts_with("bull") {
                (pos + 1, neg)
            } else if tag.starts_with("neg") || tag.starts_with("bear") {
                (pos, neg + 1)
            } else {
                (pos, neg)
            }
        })
}

/// News never reports NO_DATA; an empty feed is a neutral, low-confidence read.
pub fn build_news_signal(ticker: &str, items: &[NewsItem], keywords: &NewsKeywords) -> Signal {
    let ticker_display = ticker.to_uppercase();
    if items.is_empty() {
        return Signal::new(
            SignalKind::NewsSentiment,
            Bias::Neutral,
            Confidence::Low,
            format!("No recent news for {}.", ticker_display),
            Vec::new(),
        );
    }

    let score = score_headlines(items, keywords);
    let bias = score.bias();
    let confidence = if mentions_ticker(items, ticker) {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    let article_noun = if items.len() == 1 { "article" } else { "articles" };
    let lean = match bias {
        Bias::Bullish => "Headlines lean positive",
        Bias::Bearish => "Headlines lean negative",
        _ => "Headlines are mixed",
    };
    let summary = format!(
        "{}: {} positive vs {} negative keyword hits across {} {}.",
        lean,
        score.positive,
        score.negative,
        items.len(),
        article_noun
    );

    let mut details = vec![
        format!("Positive hits: {}", score.positive),
        format!("Negative hits: {}", score.negative),
    ];
    let (tagged_positive, tagged_negative) = tag_counts(items);
    if tagged_positive + tagged_negative > 0 {
        details.push(format!(
            "Source tags: {} positive / {} negative",
            tagged_positive, tagged_negative
        ));
    }
    details.extend(
        items
            .iter()
            .map(|item| item.title().trim())
            .filter(|title| !title.is_empty())
            .take(MAX_HEADLINE_DETAILS)
            .map(str::to_string),
    );

    Signal::new(SignalKind::NewsSentiment, bias, confidence, summary, details)
}
