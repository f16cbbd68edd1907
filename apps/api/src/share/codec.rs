//! Share-Link Codec.
//!
//! A token is `base64url(percent_escape(json(payload)))`, unpadded. The token
//! is the only state a share link carries; nothing is stored server-side.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::layout::templates::TemplateId;

/// Longest résumé text accepted for sharing.
pub const MAX_SHARE_TEXT_CHARS: usize = 4000;

/// Longest token handed out. Non-Latin text expands up to twelve-fold on the
/// way to a token, so the character budget alone does not bound the URL.
pub const MAX_SHARE_TOKEN_LEN: usize = 12_000;

/// Query parameter carrying the token.
pub const SHARE_PARAM: &str = "shareData";

/// Snapshot of everything a shared preview needs. Field names are kept short
/// to save URL space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    /// Candidate name.
    pub n: String,
    /// Email.
    pub e: String,
    /// Phone.
    pub p: String,
    /// Résumé text.
    pub r: String,
    #[serde(deserialize_with = "lenient_template")]
    pub t: TemplateId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l: Option<String>,
}

fn lenient_template<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TemplateId, D::Error> {
    let id = String::deserialize(deserializer)?;
    Ok(TemplateId::resolve(&id))
}

#[derive(Debug, Error, PartialEq)]
pub enum ShareError {
    #[error("no share data present")]
    NoData,

    #[error("share data is corrupt: {0}")]
    Corrupt(String),

    #[error("résumé is too long to share by link ({len} characters, limit {max})")]
    TooLarge { len: usize, max: usize },

    #[error("share token is too long for a link ({len} bytes, limit {max})")]
    TokenTooLong { len: usize, max: usize },

    #[error("could not serialize share payload: {0}")]
    Serialize(String),
}

pub fn encode(payload: &SharePayload) -> Result<String, ShareError> {
    let len = payload.r.chars().count();
    if len > MAX_SHARE_TEXT_CHARS {
        return Err(ShareError::TooLarge {
            len,
            max: MAX_SHARE_TEXT_CHARS,
        });
    }
    let json = serde_json::to_string(payload).map_err(|e| ShareError::Serialize(e.to_string()))?;
    let escaped = urlencoding::encode(&json);
    let token = URL_SAFE_NO_PAD.encode(escaped.as_bytes());
    if token.len() > MAX_SHARE_TOKEN_LEN {
        return Err(ShareError::TokenTooLong {
            len: token.len(),
            max: MAX_SHARE_TOKEN_LEN,
        });
    }
    Ok(token)
}

/// Decodes a token. Total: every failure is a typed [`ShareError`].
pub fn decode(token: &str) -> Result<SharePayload, ShareError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ShareError::NoData);
    }

    // Tokens produced elsewhere may use the standard, padded alphabet.
    let raw = URL_SAFE_NO_PAD
        .decode(token.trim_end_matches('='))
        .or_else(|_| STANDARD.decode(token))
        .map_err(|e| ShareError::Corrupt(format!("invalid base64: {e}")))?;
    let escaped =
        String::from_utf8(raw).map_err(|e| ShareError::Corrupt(format!("invalid UTF-8: {e}")))?;
    let json = urlencoding::decode(&escaped)
        .map_err(|e| ShareError::Corrupt(format!("invalid percent-escape: {e}")))?;
    serde_json::from_str(&json).map_err(|e| ShareError::Corrupt(format!("invalid payload: {e}")))
}

/// Pulls the token out of a URL or query string and decodes it.
///
/// A missing or empty `shareData` parameter is [`ShareError::NoData`].
pub fn decode_query(url_or_query: &str) -> Result<SharePayload, ShareError> {
    let query = match url_or_query.split_once('?') {
        Some((_, query)) => query,
        None => url_or_query,
    };
    let query = query.split('#').next().unwrap_or_default();

    let value = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == SHARE_PARAM)
        .map(|(_, value)| value)
        .ok_or(ShareError::NoData)?;

    let token = urlencoding::decode(value)
        .map_err(|e| ShareError::Corrupt(format!("invalid percent-escape: {e}")))?;
    decode(&token)
}

/// `<origin><path>?shareData=<token>`
pub fn share_url(base: &str, token: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{SHARE_PARAM}={token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SharePayload {
        SharePayload {
            n: "Jane Doe".into(),
            e: "jane@x.com".into(),
            p: "+1 555".into(),
            r: "SUMMARY\nBuilds things".into(),
            t: TemplateId::Classic,
            l: None,
        }
    }

    #[test]
    fn test_sample_payload_round_trips() {
        let token = encode(&sample()).unwrap();
        assert_eq!(decode(&token).unwrap(), sample());
    }

    #[test]
    fn test_token_is_url_safe() {
        let mut payload = sample();
        payload.r = "Zoë — résumé ✨ 100% <done> & more?".into();
        payload.l = Some("https://github.com/jane?tab=repos".into());
        let token = encode(&payload).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(decode(&token).unwrap(), payload);
    }

    #[test]
    fn test_wire_format_uses_short_keys() {
        let token = encode(&sample()).unwrap();
        let escaped = String::from_utf8(URL_SAFE_NO_PAD.decode(&token).unwrap()).unwrap();
        let json = urlencoding::decode(&escaped).unwrap();
        assert!(json.starts_with("{\"n\":\"Jane Doe\""));
        assert!(json.contains("\"t\":\"Classic\""));
        assert!(!json.contains("\"l\""));
    }

    #[test]
    fn test_missing_share_param_is_no_data() {
        assert_eq!(decode_query("https://app.example/view"), Err(ShareError::NoData));
        assert_eq!(decode_query("https://app.example/view?foo=1"), Err(ShareError::NoData));
        assert_eq!(decode_query("?shareData="), Err(ShareError::NoData));
        assert_eq!(decode(""), Err(ShareError::NoData));
    }

    #[test]
    fn test_non_base64_is_corrupt() {
        assert!(matches!(decode("%%%not base64!!"), Err(ShareError::Corrupt(_))));
        assert!(matches!(
            decode_query("https://app.example/view?shareData=***"),
            Err(ShareError::Corrupt(_))
        ));
    }

    #[test]
    fn test_truncated_token_is_corrupt() {
        let token = encode(&sample()).unwrap();
        let truncated = &token[..token.len() / 2];
        assert!(matches!(decode(truncated), Err(ShareError::Corrupt(_))));
    }

    #[test]
    fn test_valid_base64_of_garbage_is_corrupt() {
        let token = URL_SAFE_NO_PAD.encode("{\"n\": 1}");
        assert!(matches!(decode(&token), Err(ShareError::Corrupt(_))));
    }

    #[test]
    fn test_standard_alphabet_accepted() {
        let escaped = urlencoding::encode(&serde_json::to_string(&sample()).unwrap()).into_owned();
        let token = STANDARD.encode(escaped.as_bytes());
        assert_eq!(decode(&token).unwrap(), sample());
    }

    #[test]
    fn test_share_url_and_query_round_trip() {
        let token = encode(&sample()).unwrap();
        let url = share_url("https://app.example/view", &token);
        assert_eq!(url, format!("https://app.example/view?shareData={token}"));
        assert_eq!(decode_query(&url).unwrap(), sample());
        assert_eq!(
            share_url("https://app.example/view?lang=en", "abc"),
            "https://app.example/view?lang=en&shareData=abc"
        );
    }

    #[test]
    fn test_unknown_template_falls_back_to_classic() {
        let json = r#"{"n":"A","e":"","p":"","r":"x","t":"Baroque"}"#;
        let token = URL_SAFE_NO_PAD.encode(urlencoding::encode(json).as_bytes());
        assert_eq!(decode(&token).unwrap().t, TemplateId::Classic);
    }

    #[test]
    fn test_over_budget_fails_fast() {
        let mut payload = sample();
        payload.r = "x".repeat(MAX_SHARE_TEXT_CHARS + 1);
        assert_eq!(
            encode(&payload),
            Err(ShareError::TooLarge { len: MAX_SHARE_TEXT_CHARS + 1, max: MAX_SHARE_TEXT_CHARS })
        );
        payload.r.pop();
        assert!(encode(&payload).is_ok());
    }

    #[test]
    fn test_token_length_capped_for_non_latin_text() {
        let mut payload = sample();
        payload.r = "漢".repeat(MAX_SHARE_TEXT_CHARS);
        assert!(matches!(
            encode(&payload),
            Err(ShareError::TokenTooLong { max: MAX_SHARE_TOKEN_LEN, .. })
        ));

        payload.r = "Built apps, shipped (fast).\n"
            .repeat(MAX_SHARE_TEXT_CHARS)
            .chars()
            .take(MAX_SHARE_TEXT_CHARS)
            .collect();
        let token = encode(&payload).unwrap();
        assert!(token.len() <= MAX_SHARE_TOKEN_LEN);
        assert_eq!(decode(&token).unwrap(), payload);
    }
}
