//! Access to the request currently being handled, if any.
//!
//! Loads take the context as an explicit argument; there is no ambient
//! request stack to look up.

use crate::config::LocaleConfig;

/// Exposes the negotiated locale of the in-flight request.
///
/// `None` means no request is active (CLI, batch jobs, migrations, tests).
pub trait RequestContext: Sync {
    fn current_locale(&self) -> Option<&str>;
}

/// The request being served, reduced to what loads need from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentRequest {
    locale: Option<String>,
}

impl CurrentRequest {
    /// No request in flight.
    pub fn none() -> Self {
        Self { locale: None }
    }

    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
        }
    }

    /// Pick the request locale from an `Accept-Language` header.
    ///
    /// Candidates are ranked by `q` (ties keep header order) and matched on
    /// their primary subtag against the supported locales. Falls back to the
    /// configured default when nothing matches or the header is absent.
    pub fn negotiate(accept_language: Option<&str>, locales: &LocaleConfig) -> Self {
        let locale = accept_language
            .and_then(|header| best_match(header, locales))
            .unwrap_or_else(|| locales.default_locale.clone());
        tracing::debug!("request.negotiate: locale={}", locale);
        Self::with_locale(locale)
    }
}

impl RequestContext for CurrentRequest {
    fn current_locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}

/// Value of a `q=` parameter; the name is case-insensitive.
fn weight_param(param: &str) -> Option<&str> {
    let (name, value) = param.split_once('=')?;
    name.trim().eq_ignore_ascii_case("q").then_some(value)
}

fn best_match(header: &str, locales: &LocaleConfig) -> Option<String> {
    let mut candidates: Vec<(&str, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let q = match pieces.find_map(weight_param) {
                Some(raw) => raw.trim().parse::<f32>().ok()?,
                None => 1.0,
            };
            (q.is_finite() && q > 0.0 && q <= 1.0).then_some((tag, q))
        })
        .collect();

    // Stable sort keeps header order among equal weights.
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

    candidates.into_iter().find_map(|(tag, _)| {
        let primary = tag.split(['-', '_']).next().unwrap_or(tag);
        locales
            .supported
            .iter()
            .find(|supported| {
                supported.eq_ignore_ascii_case(tag) || supported.eq_ignore_ascii_case(primary)
            })
            .cloned()
    })
}
