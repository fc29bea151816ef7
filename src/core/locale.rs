//! # Locale Detection
//!
//! Supported display languages and the startup detection chain.
//!
//! Sources are tried in a fixed, validated order; the first one that
//! yields a supported language wins:
//!
//! ```text
//! localStorage → navigator → htmlTag → path → subdomain → fallback (en)
//! ```
//!
//! Candidates are normalized before lookup (`"ta-IN"`, `"ta_IN.UTF-8"`
//! and `"TA"` all mean `ta`).

use std::fmt;

use log::debug;
use reqwest::Url;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    Bn,
    En,
    Hi,
    Kn,
    Ta,
    Te,
}

impl LanguageCode {
    pub const SUPPORTED: [LanguageCode; 6] = [
        LanguageCode::Bn,
        LanguageCode::En,
        LanguageCode::Hi,
        LanguageCode::Kn,
        LanguageCode::Ta,
        LanguageCode::Te,
    ];

    pub const FALLBACK: LanguageCode = LanguageCode::En;

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Bn => "bn",
            LanguageCode::En => "en",
            LanguageCode::Hi => "hi",
            LanguageCode::Kn => "kn",
            LanguageCode::Ta => "ta",
            LanguageCode::Te => "te",
        }
    }

    /// Name of the language in its own script, for the language switcher.
    pub fn native_name(&self) -> &'static str {
        match self {
            LanguageCode::Bn => "বাংলা",
            LanguageCode::En => "English",
            LanguageCode::Hi => "हिन्दी",
            LanguageCode::Kn => "ಕನ್ನಡ",
            LanguageCode::Ta => "தமிழ்",
            LanguageCode::Te => "తెలుగు",
        }
    }

    /// Parses a language tag or locale string. Returns `None` for anything
    /// outside the supported set.
    pub fn parse(tag: &str) -> Option<LanguageCode> {
        let primary = tag
            .trim()
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        LanguageCode::SUPPORTED
            .into_iter()
            .find(|code| code.as_str() == primary)
    }

    /// Exact match against the supported codes, for explicit selections.
    pub fn from_code(code: &str) -> Option<LanguageCode> {
        LanguageCode::SUPPORTED
            .into_iter()
            .find(|c| c.as_str() == code)
    }

    /// The next language in switcher order, wrapping around.
    pub fn next(&self) -> LanguageCode {
        let idx = LanguageCode::SUPPORTED
            .iter()
            .position(|c| c == self)
            .unwrap_or(0);
        LanguageCode::SUPPORTED[(idx + 1) % LanguageCode::SUPPORTED.len()]
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Detection Order
// ============================================================================

#[derive(Debug)]
pub enum LocaleError {
    UnknownSource(String),
    DuplicateSource(DetectionSource),
    EmptyOrder,
}

impl fmt::Display for LocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleError::UnknownSource(name) => write!(f, "unknown detection source: {name}"),
            LocaleError::DuplicateSource(src) => {
                write!(f, "detection source listed twice: {}", src.as_str())
            }
            LocaleError::EmptyOrder => write!(f, "detection order is empty"),
        }
    }
}

impl std::error::Error for LocaleError {}

/// Where a language candidate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    /// The persisted `preferredLanguage` key.
    LocalStorage,
    /// The platform's negotiated languages (browser settings, `LANG` on a terminal).
    Navigator,
    /// The document's declared language.
    HtmlTag,
    /// First path segment of the origin URL (`/hi/...`).
    Path,
    /// First label of the origin host (`ta.example.org`).
    Subdomain,
}

impl DetectionSource {
    pub fn parse(name: &str) -> Result<DetectionSource, LocaleError> {
        match name {
            "localStorage" => Ok(DetectionSource::LocalStorage),
            "navigator" => Ok(DetectionSource::Navigator),
            "htmlTag" => Ok(DetectionSource::HtmlTag),
            "path" => Ok(DetectionSource::Path),
            "subdomain" => Ok(DetectionSource::Subdomain),
            other => Err(LocaleError::UnknownSource(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionSource::LocalStorage => "localStorage",
            DetectionSource::Navigator => "navigator",
            DetectionSource::HtmlTag => "htmlTag",
            DetectionSource::Path => "path",
            DetectionSource::Subdomain => "subdomain",
        }
    }
}

/// Non-empty, duplicate-free list of detection sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionOrder(Vec<DetectionSource>);

impl DetectionOrder {
    pub fn new(sources: Vec<DetectionSource>) -> Result<Self, LocaleError> {
        if sources.is_empty() {
            return Err(LocaleError::EmptyOrder);
        }
        for (i, source) in sources.iter().enumerate() {
            if sources[..i].contains(source) {
                return Err(LocaleError::DuplicateSource(*source));
            }
        }
        Ok(Self(sources))
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, LocaleError> {
        let sources = names
            .iter()
            .map(|n| DetectionSource::parse(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(sources)
    }

    pub fn sources(&self) -> &[DetectionSource] {
        &self.0
    }
}

impl Default for DetectionOrder {
    fn default() -> Self {
        Self(vec![
            DetectionSource::LocalStorage,
            DetectionSource::Navigator,
            DetectionSource::HtmlTag,
            DetectionSource::Path,
            DetectionSource::Subdomain,
        ])
    }
}

// ============================================================================
// Detection
// ============================================================================

/// Raw candidate values gathered from the environment at startup.
#[derive(Debug, Clone, Default)]
pub struct DetectionInputs {
    pub stored: Option<String>,
    /// Preferred languages in priority order.
    pub navigator: Vec<String>,
    pub html_lang: Option<String>,
    pub origin_url: Option<String>,
}

impl DetectionInputs {
    /// Locale environment variables, most specific first.
    pub fn navigator_from_env() -> Vec<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .filter(|v| !v.is_empty() && v != "C" && v != "POSIX")
            .collect()
    }

    fn url(&self) -> Option<Url> {
        self.origin_url.as_deref().and_then(|u| Url::parse(u).ok())
    }

    fn candidates(&self, source: DetectionSource) -> Vec<String> {
        match source {
            DetectionSource::LocalStorage => self.stored.iter().cloned().collect(),
            DetectionSource::Navigator => self.navigator.clone(),
            DetectionSource::HtmlTag => self.html_lang.iter().cloned().collect(),
            DetectionSource::Path => self
                .url()
                .and_then(|u| {
                    u.path_segments()
                        .and_then(|mut segs| segs.next().map(str::to_string))
                })
                .filter(|s| !s.is_empty())
                .into_iter()
                .collect(),
            DetectionSource::Subdomain => self
                .url()
                .and_then(|u| {
                    u.host_str()
                        .and_then(|h| h.split('.').next().map(str::to_string))
                })
                .into_iter()
                .collect(),
        }
    }
}

/// Returns the first supported language found by walking `order`, or the
/// fallback language.
pub fn detect_initial_locale(order: &DetectionOrder, inputs: &DetectionInputs) -> LanguageCode {
    for source in order.sources() {
        for candidate in inputs.candidates(*source) {
            if let Some(code) = LanguageCode::parse(&candidate) {
                debug!("Detected language '{}' from {}", code, source.as_str());
                return code;
            }
        }
    }
    debug!("No supported language detected, using {}", LanguageCode::FALLBACK);
    LanguageCode::FALLBACK
}
