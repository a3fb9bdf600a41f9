//! Rendering policy: a pure function from session state to what the UI shows.
//!
//! Nothing here is stateful. Hosts call `View::of` after every transition and
//! draw the result however they like.

use std::fmt;

use serde_json::Number;

use crate::config::Classifier;
use crate::session::SessionState;
use crate::types::{Features, PredictionResult};

pub const IDLE_LABEL: &str = "Analyze";
pub const PENDING_LABEL: &str = "Analyzing...";

/// The two mutually exclusive panel styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Positive,
    Negative,
}

/// Explicit decision type for servers that send a recognisable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Watch,
    Skip,
}

impl Decision {
    /// Parse the first alphabetic word of a label, ignoring case. Trailing
    /// decoration such as emoji is skipped.
    pub fn parse(label: &str) -> Option<Self> {
        let word = label
            .split(|c: char| !c.is_alphabetic())
            .find(|w| !w.is_empty())?
            .to_lowercase();
        match word.as_str() {
            "watch" => Some(Decision::Watch),
            "skip" => Some(Decision::Skip),
            _ => None,
        }
    }
}

/// Literal substring rule: any label whose lowercase form contains `"watch"`
/// is positive, including `"DO NOT WATCH"`.
pub fn classify_substring(decision: &str) -> Variant {
    if decision.to_lowercase().contains("watch") {
        Variant::Positive
    } else {
        Variant::Negative
    }
}

/// Enumerated rule: only a label that parses as `Decision::Watch` is
/// positive; unrecognised labels are negative.
pub fn classify_enumerated(decision: &str) -> Variant {
    match Decision::parse(decision) {
        Some(Decision::Watch) => Variant::Positive,
        Some(Decision::Skip) | None => Variant::Negative,
    }
}

pub fn classify(classifier: Classifier, decision: &str) -> Variant {
    match classifier {
        Classifier::Substring => classify_substring(decision),
        Classifier::Enumerated => classify_enumerated(decision),
    }
}

/// Everything the UI draws for one state snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub trigger_label: &'static str,
    pub trigger_enabled: bool,
    pub panel: Option<ResultPanel>,
}

impl View {
    pub fn of(state: &SessionState, classifier: Classifier) -> Self {
        let (trigger_label, trigger_enabled) = if state.is_pending {
            (PENDING_LABEL, false)
        } else {
            (IDLE_LABEL, true)
        };
        Self {
            trigger_label,
            trigger_enabled,
            panel: state
                .last_result
                .as_ref()
                .map(|result| ResultPanel::new(result, classifier)),
        }
    }
}

/// The result panel with every field already formatted. Absent features are
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub variant: Variant,
    pub decision: String,
    pub sentiment: String,
    pub likes: String,
    pub comments: String,
}

impl ResultPanel {
    pub fn new(result: &PredictionResult, classifier: Classifier) -> Self {
        let Features {
            sentiment,
            likes,
            comments,
            ..
        } = &result.features;
        Self {
            variant: classify(classifier, &result.decision),
            decision: result.decision.clone(),
            sentiment: sentiment.map(fixed_two_places).unwrap_or_default(),
            likes: likes.as_ref().map(number_text).unwrap_or_default(),
            comments: comments.as_ref().map(number_text).unwrap_or_default(),
        }
    }

    pub fn metrics_line(&self) -> String {
        format!(
            "Sentiment Score: {} | Likes: {} | Comments: {}",
            self.sentiment, self.likes, self.comments
        )
    }
}

/// Two-decimal text with exact ties rounded away from zero, the way a
/// browser's `toFixed(2)` prints it. `{:.2}` alone rounds ties to even.
pub fn fixed_two_places(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    // Every finite f64 has a terminating expansion within 1074 places.
    let exact = format!("{magnitude:.1074}");
    if let Some((whole, frac)) = exact.split_once('.') {
        let tie = frac.as_bytes().get(2) == Some(&b'5') && frac[3..].bytes().all(|b| b == b'0');
        if tie {
            if let (Ok(whole), Ok(cents)) = (whole.parse::<u128>(), frac[..2].parse::<u128>()) {
                let total = whole * 100 + cents + 1;
                return format!("{sign}{}.{:02}", total / 100, total % 100);
            }
        }
    }
    format!("{sign}{magnitude:.2}")
}

/// Shortest default text of a JSON number: integers as-is, integral floats
/// without a trailing `.0`, and exponent form outside `[1e-6, 1e21)`.
pub fn number_text(number: &Number) -> String {
    if number.is_u64() || number.is_i64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(value) => float_text(value),
        None => number.to_string(),
    }
}

fn float_text(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    value.to_string()
}

impl fmt::Display for ResultPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.decision)?;
        write!(f, "{}", self.metrics_line())
    }
}
