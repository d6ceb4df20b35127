use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Deserialize};

use crate::ParsedParams;

use super::MetadataError;

/// Metadata field that holds the generation parameters blob
pub const PARAMETERS_FIELD: &str = "parameters";

/// Marks the start of the negative prompt section
const NEGATIVE_MARKER: &str = "Negative prompt:";

/// Marks the start of the settings line
const SETTINGS_MARKER: &str = "Steps:";

/// Keys pulled to the front and highlighted on display
pub const HIGHLIGHT_KEYS: &[&str] = &[
    "Model:",
    "Sampler:",
    "Steps:",
    "CFG scale:",
    "VAE:",
    "Lora",
];

/// Escaped line break `\n` inside a settings value
static BREAK_REX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\n").unwrap()
});

/// Single settings entry ready for display
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct SettingsTag {
    /// Entry text, possibly with escaped `\n` line breaks
    pub text: String,
    /// Entry contains one of [`HIGHLIGHT_KEYS`]
    pub highlighted: bool,
}

impl SettingsTag {
    /// Entry text split on escaped line breaks
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        BREAK_REX.split(&self.text)
    }
}

/// Split raw `parameters` field into prompt, negative prompt and settings
///
/// Layout:
/// '''
/// <prompt>
/// ...
/// Negative prompt: <neg_prompt>
/// ...
/// Steps: <steps>, Sampler: <sampler>, CFG scale: ...
/// '''
///
/// An absent negative prompt marker resolves to the start of input, so
/// the prompt collapses to nothing and the negative prompt absorbs
/// everything before the settings marker. An absent settings marker
/// resolves to the end of input, leaving the settings empty.
pub fn split_params(raw: Option<&str>) -> Result<ParsedParams, MetadataError> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Err(MetadataError::MissingMetadata),
    };

    let neg_at = raw.find(NEGATIVE_MARKER).unwrap_or(0);
    let settings_at = raw.find(SETTINGS_MARKER).unwrap_or(raw.len());

    // Markers may come in unexpected order, clamp instead of panicking
    // on a reversed slice
    let neg_end = settings_at.max(neg_at);

    let prompt = raw[..neg_at].trim();
    let negative_prompt = raw[neg_at..neg_end]
        .trim_start_matches(NEGATIVE_MARKER)
        .trim();
    let parameters = raw[settings_at..].trim();

    Ok(ParsedParams {
        prompt: prompt.to_string(),
        negative_prompt: negative_prompt.to_string(),
        parameters: parameters.to_string(),
    })
}

/// Whether settings entry contains one of the highlighted keys
fn is_highlighted(entry: &str) -> bool {
    HIGHLIGHT_KEYS.iter().any(|key| entry.contains(key))
}

/// Append pending continuation fragments to the last entry.
///
/// Fragments that come before any keyed entry have nothing to attach
/// to and are dropped.
fn flush_pending(entries: &mut Vec<String>, pending: &mut Vec<&str>) {
    if pending.is_empty() {
        return;
    }
    if let Some(last) = entries.last_mut() {
        *last = format!("{last}, {}", pending.iter().join(", "));
    }
    pending.clear();
}

/// Group comma-separated settings into logical `key: value` entries.
///
/// A fragment without a key is a continuation of the previous entry:
/// values may legitimately contain commas, e.g. a Lora list.
fn group_entries(raw: &str) -> Vec<String> {
    let mut entries = vec![];
    let mut pending = vec![];

    for token in raw.split(',').map(str::trim) {
        if token.contains(": ") {
            flush_pending(&mut entries, &mut pending);
            entries.push(token.to_string());
        } else {
            pending.push(token);
        }
    }
    flush_pending(&mut entries, &mut pending);

    entries
}

/// Tokenize raw settings into display tags, highlighted keys first
pub fn format_settings(raw: &str) -> Vec<SettingsTag> {
    if raw.trim().is_empty() {
        return vec![];
    }

    let mut entries = group_entries(raw);
    // Stable: relative order inside each group is kept
    entries.sort_by_key(|entry| !is_highlighted(entry));

    entries
        .into_iter()
        .map(|text| {
            let highlighted = is_highlighted(&text);
            SettingsTag { text, highlighted }
        })
        .collect()
}

#[test]
fn test_split_sections() {
    let raw = "masterpiece, best quality\n\
        Negative prompt: lowres, bad anatomy\n\
        Steps: 20, Sampler: Euler a, CFG scale: 7";
    let params = split_params(Some(raw)).unwrap();
    assert_eq!(params.prompt, "masterpiece, best quality");
    assert_eq!(params.negative_prompt, "lowres, bad anatomy");
    assert_eq!(params.parameters, "Steps: 20, Sampler: Euler a, CFG scale: 7");
}

#[test]
fn test_split_reconstructs_input() {
    let raw = "solo, 1girl \nNegative prompt: blurry \nSteps: 30, Sampler: DPM++ 2M";
    let params = split_params(Some(raw)).unwrap();
    let rebuilt = format!(
        "{} Negative prompt: {} {}",
        params.prompt, params.negative_prompt, params.parameters
    );
    let squash = |s: &str| s.split_whitespace().join(" ");
    assert_eq!(squash(&rebuilt), squash(raw));
}

#[test]
fn test_split_missing_field() {
    assert_eq!(split_params(None), Err(MetadataError::MissingMetadata));
    assert_eq!(split_params(Some("")), Err(MetadataError::MissingMetadata));
    assert_eq!(split_params(Some(" \n ")), Err(MetadataError::MissingMetadata));
}

#[test]
fn test_split_without_negative_marker() {
    // Prompt collapses to nothing, negative prompt takes everything
    // before the settings
    let params = split_params(Some("some text Steps: 20, Sampler: Euler")).unwrap();
    assert_eq!(params.prompt, "");
    assert_eq!(params.negative_prompt, "some text");
    assert_eq!(params.parameters, "Steps: 20, Sampler: Euler");
}

#[test]
fn test_split_without_settings_marker() {
    let params = split_params(Some("1girl\nNegative prompt: lowres")).unwrap();
    assert_eq!(params.prompt, "1girl");
    assert_eq!(params.negative_prompt, "lowres");
    assert_eq!(params.parameters, "");
}

#[test]
fn test_split_without_any_marker() {
    let params = split_params(Some("just some prompt")).unwrap();
    assert_eq!(params.prompt, "");
    assert_eq!(params.negative_prompt, "just some prompt");
    assert_eq!(params.parameters, "");
}

#[test]
fn test_format_highlights_all_entries() {
    let tags = format_settings("Steps: 20, Sampler: Euler, CFG scale: 7");
    assert_eq!(tags.len(), 3);
    assert!(tags.iter().all(|tag| tag.highlighted));
}

#[test]
fn test_format_merges_continuations() {
    let tags = format_settings("Lora: foo, bar, baz, Steps: 20");
    let texts: Vec<_> = tags.iter().map(|tag| tag.text.as_str()).collect();
    assert_eq!(texts, ["Lora: foo, bar, baz", "Steps: 20"]);
}

#[test]
fn test_format_highlighted_first() {
    let tags = format_settings("Unknown setting: x, Steps: 5");
    let texts: Vec<_> = tags.iter().map(|tag| tag.text.as_str()).collect();
    assert_eq!(texts, ["Steps: 5", "Unknown setting: x"]);
    assert!(tags[0].highlighted);
    assert!(!tags[1].highlighted);
}

#[test]
fn test_format_trims_tokens() {
    let tags = format_settings("  Steps: 1 ,   Size: 512x512  ");
    let texts: Vec<_> = tags.iter().map(|tag| tag.text.as_str()).collect();
    assert_eq!(texts, ["Steps: 1", "Size: 512x512"]);
}

#[test]
fn test_format_drops_leading_fragments() {
    // Nothing to attach them to
    let tags = format_settings("stray, another, Steps: 3");
    let texts: Vec<_> = tags.iter().map(|tag| tag.text.as_str()).collect();
    assert_eq!(texts, ["Steps: 3"]);
}

#[test]
fn test_format_empty_settings() {
    assert!(format_settings("").is_empty());
    assert!(format_settings("   ").is_empty());
}

#[test]
fn test_tag_lines() {
    let tag = SettingsTag {
        text: r"Lora hashes: \nfoo: 1\nbar: 2".to_string(),
        highlighted: true,
    };
    let lines: Vec<_> = tag.lines().collect();
    assert_eq!(lines, ["Lora hashes: ", "foo: 1", "bar: 2"]);
}
