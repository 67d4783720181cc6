//! Candidate profile input and the Prompt Builder.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::analysis::prompts::VISA_ANALYSIS_PROMPT_TEMPLATE;

/// The candidate's profile as submitted by the front end.
///
/// Every field is optional and accepts any JSON scalar: the form may send
/// `experience` as a number or a string, `has_offer` as a bool or "Yes"/"No".
/// Values are kept as display text since they only ever end up in the prompt.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient_text")]
    pub education: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub field: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub current_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub has_offer: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_details: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub achievements: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
}

/// Accepts strings, numbers, booleans and null. Null reads as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(true) => Some("Yes".to_string()),
        Value::Bool(false) => Some("No".to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }))
}

impl Profile {
    /// Reads a profile from a request body. Only a JSON object is a profile;
    /// serde would otherwise fill the fields positionally from an array.
    pub fn from_json(body: Value) -> Result<Self, String> {
        if !body.is_object() {
            return Err("request body must be a JSON object".to_string());
        }
        Profile::deserialize(body).map_err(|e| e.to_string())
    }

    /// Placeholder name → value pairs with absent fields replaced by their
    /// neutral defaults.
    fn prompt_fields(&self) -> [(&'static str, &str); 8] {
        [
            ("education", or_default(&self.education, "")),
            ("experience", or_default(&self.experience, "")),
            ("field", or_default(&self.field, "")),
            ("current_status", or_default(&self.current_status, "")),
            ("has_offer", or_default(&self.has_offer, "No")),
            ("job_details", or_default(&self.job_details, "N/A")),
            ("achievements", or_default(&self.achievements, "None")),
            ("country", or_default(&self.country, "")),
        ]
    }
}

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value.as_deref().unwrap_or(default)
}

/// Builds the visa analysis prompt for a profile. Never fails.
pub fn build_prompt(profile: &Profile) -> String {
    render_template(VISA_ANALYSIS_PROMPT_TEMPLATE, &profile.prompt_fields())
}

/// Single-pass `{name}` substitution. Braces that do not open a known
/// placeholder (the JSON skeleton) are copied through, and substituted
/// values are never rescanned, so user text containing `{country}` stays literal.
fn render_template(template: &str, fields: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let matched = fields.iter().find_map(|(name, value)| {
            after
                .strip_prefix(*name)
                .and_then(|tail| tail.strip_prefix('}'))
                .map(|tail| (*value, tail))
        });

        match matched {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
