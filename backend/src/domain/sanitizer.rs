//! HTML escaping applied to untrusted text before validation or storage.
//!
//! A single escaping routine backs both sanitization boundaries: the
//! request-parameter middleware (via [`sanitize_request_parameters`]) and
//! body field decoding (via the [`SanitizedText`] `Deserialize` impl).
//!
//! Escaping happens in one left-to-right pass over the original input, so
//! `&lt;` becomes `&amp;lt;`. Running the routine twice re-escapes every
//! ampersand; callers must only sanitize raw input.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn escape_into(raw: &str, out: &mut String) {
    for ch in raw.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '&' => out.push_str("&amp;"),
            other => out.push(other),
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    escape_into(raw, &mut out);
    out
}

/// Escape HTML-significant characters in an optional field value.
///
/// # Examples
/// ```
/// use cake_manager::domain::sanitize_field;
///
/// assert_eq!(sanitize_field(None), None);
/// assert_eq!(
///     sanitize_field(Some("<b>\"Tom\" & 'Jerry'</b>")).as_deref(),
///     Some("&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;")
/// );
/// ```
#[must_use]
pub fn sanitize_field(raw: Option<&str>) -> Option<String> {
    raw.map(escape)
}

/// Sanitize every value of every request parameter. Keys are left untouched.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use cake_manager::domain::sanitize_request_parameters;
///
/// let mut params = BTreeMap::new();
/// params.insert("q".to_owned(), vec!["<i>".to_owned(), "plain".to_owned()]);
/// let cleaned = sanitize_request_parameters(&params);
/// assert_eq!(cleaned["q"], ["&lt;i&gt;", "plain"]);
/// ```
#[must_use]
pub fn sanitize_request_parameters(
    params: &BTreeMap<String, Vec<String>>,
) -> BTreeMap<String, Vec<String>> {
    params
        .iter()
        .map(|(key, values)| {
            let cleaned = values.iter().map(|value| escape(value)).collect();
            (key.clone(), cleaned)
        })
        .collect()
}

/// Text that has passed through the sanitizer exactly once.
///
/// The only ways to obtain a value are [`SanitizedText::sanitize`] and
/// deserialisation, both of which escape the raw input. Code that accepts a
/// `SanitizedText` can therefore rely on the escaping having happened, and
/// cannot accidentally apply it a second time.
///
/// # Examples
/// ```
/// use cake_manager::domain::SanitizedText;
///
/// let text: SanitizedText = serde_json::from_str("\"a<b\"").expect("string decodes");
/// assert_eq!(text.as_str(), "a&lt;b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SanitizedText(String);

impl SanitizedText {
    /// Escape `raw` and wrap the result.
    #[must_use]
    pub fn sanitize(raw: &str) -> Self {
        Self(escape(raw))
    }

    /// Borrow the escaped text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Unwrap into the escaped `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SanitizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SanitizedText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for SanitizedText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SanitizedText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::sanitize(&raw))
    }
}
