//! URL decomposition.

use crate::base::neterror::NetError;
use url::Url;

/// Components of a URL, exactly as written in the source string.
///
/// A field is `None` when that part is absent or empty. Text fields are
/// never case-folded, percent-encoded, percent-decoded or dot-segment
/// normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub scheme: Option<String>,
    /// Host without user info or port; IPv6 hosts keep their brackets.
    pub host: Option<String>,
    /// Explicit port, omitted when it is the scheme default.
    pub port: Option<u16>,
    pub path: Option<String>,
    /// Query without the leading `?`.
    pub query: Option<String>,
    /// Fragment without the leading `#`.
    pub fragment: Option<String>,
}

/// Splits `url` into its components.
///
/// The URL must be valid; the components are then cut out of the input
/// text itself rather than out of a normalized form.
///
/// ```
/// let parts = hostnet::urlparse::decompose("HTTP://Example.com/a/../b?q=A B").unwrap();
/// assert_eq!(parts.scheme.as_deref(), Some("HTTP"));
/// assert_eq!(parts.host.as_deref(), Some("Example.com"));
/// assert_eq!(parts.path.as_deref(), Some("/a/../b"));
/// assert_eq!(parts.query.as_deref(), Some("q=A B"));
/// ```
pub fn decompose(url: &str) -> Result<UrlParts, NetError> {
    let parsed = Url::parse(url).map_err(|source| {
        tracing::debug!(url = %url, error = %source, "URL parse failed");
        NetError::InvalidUrlFor {
            url: url.to_string(),
            source,
        }
    })?;

    let raw = RawParts::split(url);
    Ok(UrlParts {
        scheme: non_empty(raw.scheme),
        host: raw.host.and_then(non_empty),
        port: parsed.port(),
        path: non_empty(raw.path),
        query: raw.query.and_then(non_empty),
        fragment: raw.fragment.and_then(non_empty),
    })
}

/// Slices of an already validated URL string.
#[derive(Debug, PartialEq, Eq)]
struct RawParts<'a> {
    scheme: &'a str,
    host: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl<'a> RawParts<'a> {
    fn split(url: &'a str) -> Self {
        // The parser ignores leading and trailing C0 controls and spaces
        let url = url.trim_matches(|c: char| c <= ' ');
        let (scheme, rest) = url.split_once(':').unwrap_or(("", url));

        let (host, rest) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find(['/', '?', '#']).unwrap_or(after.len());
                let (authority, rest) = after.split_at(end);
                (Some(host_of(authority)), rest)
            }
            None => (None, rest),
        };

        let (rest, fragment) = match rest.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (rest, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };

        Self {
            scheme,
            host,
            path,
            query,
            fragment,
        }
    }
}

/// Host part of an authority: user info and port removed.
fn host_of(authority: &str) -> &str {
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);
    if host_port.starts_with('[') {
        if let Some(end) = host_port.find(']') {
            return &host_port[..=end];
        }
    }
    host_port.split(':').next().unwrap_or(host_port)
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
