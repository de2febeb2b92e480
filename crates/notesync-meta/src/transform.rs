//! Metadata transforms between platforms
//!
//! Each ordered pair of distinct platforms has a table of key rules. Every
//! rule is evaluated, whether or not its key is present in the input, and
//! returns the new value or `None` to omit the key. Keys without a rule
//! pass through unchanged.

use chrono::NaiveDate;
use notesync_content::Metadata;
use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::platform::Platform;

/// Values a rule may need besides the metadata itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformContext {
    pub today: NaiveDate,
}

impl TransformContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Today as a `YYYY-MM-DD` metadata value.
    pub fn today_value(&self) -> Value {
        Value::String(self.today.format("%Y-%m-%d").to_string())
    }
}

type Rule = fn(Option<&Value>, &Metadata, &TransformContext) -> Option<Value>;

/// Rule for one metadata key.
pub struct KeyTransform {
    pub key: &'static str,
    rule: Rule,
}

impl KeyTransform {
    pub fn apply(&self, metadata: &Metadata, ctx: &TransformContext) -> Option<Value> {
        (self.rule)(metadata.get(self.key), metadata, ctx)
    }
}

/// Whether a value carries nothing: null, blank string or empty sequence.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Sequence(items) => items.is_empty(),
        _ => false,
    }
}

/// Turn a comma-separated string into a sequence; other values are kept.
pub fn as_list(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::Sequence(
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(|t| Value::String(t.to_string()))
                .collect(),
        ),
        Value::Null => Value::Sequence(Vec::new()),
        other => other.clone(),
    }
}

fn present<'a>(metadata: &'a Metadata, key: &str) -> Option<&'a Value> {
    metadata.get(key).filter(|v| !is_blank(v))
}

fn keep(value: Option<&Value>, _: &Metadata, _: &TransformContext) -> Option<Value> {
    value.cloned()
}

fn remove(_: Option<&Value>, _: &Metadata, _: &TransformContext) -> Option<Value> {
    None
}

fn html(_: Option<&Value>, _: &Metadata, _: &TransformContext) -> Option<Value> {
    Some(Value::String("html".to_string()))
}

fn note_type(_: Option<&Value>, _: &Metadata, _: &TransformContext) -> Option<Value> {
    Some(Value::String("note".to_string()))
}

fn today(_: Option<&Value>, _: &Metadata, ctx: &TransformContext) -> Option<Value> {
    Some(ctx.today_value())
}

fn split_list(value: Option<&Value>, _: &Metadata, _: &TransformContext) -> Option<Value> {
    value.map(as_list)
}

fn kept_or_today(value: Option<&Value>, _: &Metadata, ctx: &TransformContext) -> Option<Value> {
    match value {
        Some(v) if !is_blank(v) => Some(v.clone()),
        _ => Some(ctx.today_value()),
    }
}

fn created_or_today(_: Option<&Value>, meta: &Metadata, ctx: &TransformContext) -> Option<Value> {
    Some(present(meta, "created").cloned().unwrap_or_else(|| ctx.today_value()))
}

fn date_or_today(_: Option<&Value>, meta: &Metadata, ctx: &TransformContext) -> Option<Value> {
    Some(present(meta, "date").cloned().unwrap_or_else(|| ctx.today_value()))
}

fn tags_as_list(_: Option<&Value>, meta: &Metadata, _: &TransformContext) -> Option<Value> {
    Some(meta.get("tags").map_or(Value::Sequence(Vec::new()), as_list))
}

fn categories_as_list(_: Option<&Value>, meta: &Metadata, _: &TransformContext) -> Option<Value> {
    Some(meta.get("categories").map_or(Value::Sequence(Vec::new()), as_list))
}

macro_rules! rules {
    ($($key:literal => $rule:expr),* $(,)?) => {
        &[$(KeyTransform { key: $key, rule: $rule }),*]
    };
}

const OUTLINE_TO_PERSONAL: &[KeyTransform] = rules! {
    "title" => keep,
    "type" => remove,
    "tags" => split_list,
    "created" => kept_or_today,
};

const OUTLINE_TO_PUBLISH: &[KeyTransform] = rules! {
    "title" => keep,
    "type" => remove,
    "format" => html,
    "date" => today,
    "categories" => tags_as_list,
};

const PERSONAL_TO_OUTLINE: &[KeyTransform] = rules! {
    "title" => keep,
    "tags" => remove,
    "created" => remove,
    "type" => note_type,
};

const PERSONAL_TO_PUBLISH: &[KeyTransform] = rules! {
    "title" => keep,
    "tags" => remove,
    "created" => remove,
    "format" => html,
    "date" => created_or_today,
    "categories" => tags_as_list,
};

const PUBLISH_TO_OUTLINE: &[KeyTransform] = rules! {
    "title" => keep,
    "format" => remove,
    "date" => remove,
    "categories" => remove,
    "type" => note_type,
};

const PUBLISH_TO_PERSONAL: &[KeyTransform] = rules! {
    "title" => keep,
    "format" => remove,
    "date" => remove,
    "categories" => remove,
    "tags" => categories_as_list,
    "created" => date_or_today,
};

/// Rule table for a platform pair.
pub fn rules_for(from: Platform, to: Platform) -> Result<&'static [KeyTransform]> {
    use Platform::*;

    match (from, to) {
        (Outline, Personal) => Ok(OUTLINE_TO_PERSONAL),
        (Outline, Publish) => Ok(OUTLINE_TO_PUBLISH),
        (Personal, Outline) => Ok(PERSONAL_TO_OUTLINE),
        (Personal, Publish) => Ok(PERSONAL_TO_PUBLISH),
        (Publish, Outline) => Ok(PUBLISH_TO_OUTLINE),
        (Publish, Personal) => Ok(PUBLISH_TO_PERSONAL),
        _ => Err(Error::UnsupportedTransform {
            from: from.to_string(),
            to: to.to_string(),
        }),
    }
}

/// Transform metadata from one platform's conventions to another's.
pub fn transform(
    metadata: &Metadata,
    from: Platform,
    to: Platform,
    ctx: &TransformContext,
) -> Result<Metadata> {
    let rules = rules_for(from, to)?;
    let mut out = Metadata::new();

    for rule in rules {
        if let Some(value) = rule.apply(metadata, ctx) {
            out.insert(rule.key.to_string(), value);
        }
    }

    for (key, value) in metadata {
        if !rules.iter().any(|r| r.key == key) {
            out.insert(key.clone(), value.clone());
        }
    }

    tracing::debug!(%from, %to, keys = out.len(), "transformed metadata");
    Ok(out)
}
