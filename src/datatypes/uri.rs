//! `xs:anyURI` as an RFC 3986 URI-reference
//!
//! The input is first decomposed with the generic regex of RFC 3986
//! Appendix B, then every component is checked against its own production.
//! No normalization is performed: [`AnyUri::uri`] reproduces the input.

use crate::datatypes::Datatype;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use url::Url;

const PCT_ENCODED: &str = "%[0-9A-Fa-f]{2}";
const UNRESERVED: &str = r"A-Za-z0-9\-._~";
const SUB_DELIMS: &str = "!$&'()*+,;=";

static URI_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(([^:/?#]+):)?(//([^/?#]*))?([^?#]*)(\?([^#]*))?(#(.*))?$").unwrap()
});

static SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+\-.]*$").unwrap());

static USER_INFO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "^(?:[{}{}:]|{})*$",
        UNRESERVED, SUB_DELIMS, PCT_ENCODED
    ))
    .unwrap()
});

static IP_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^\[(?:{}|[vV][0-9A-Fa-f]+\.[{}{}:]+)\]$",
        ipv6_address(),
        UNRESERVED,
        SUB_DELIMS
    ))
    .unwrap()
});

static REG_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:[{}{}]|{})*$", UNRESERVED, SUB_DELIMS, PCT_ENCODED)).unwrap()
});

static PORT: Lazy<Regex> = Lazy::new(|| Regex::new("^[0-9]*$").unwrap());

static PATH_ABEMPTY: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^(?:/{}*)*$", pchar())).unwrap());

static PATH_ABSOLUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^/(?:{p}+(?:/{p}*)*)?$", p = pchar())).unwrap()
});

static PATH_NOSCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "^(?:[{}{}@]|{})+(?:/{}*)*$",
        UNRESERVED,
        SUB_DELIMS,
        PCT_ENCODED,
        pchar()
    ))
    .unwrap()
});

static PATH_ROOTLESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{p}+(?:/{p}*)*$", p = pchar())).unwrap());

static QUERY_OR_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^(?:{}|[/?])*$", pchar())).unwrap());

/// `IPv6address`: eight `h16` groups, optionally compressed with one `::`,
/// the last two of which may be written as an `IPv4address`
fn ipv6_address() -> String {
    let h16 = "[0-9A-Fa-f]{1,4}";
    let dec_octet = "(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])";
    let ipv4 = format!(r"{d}\.{d}\.{d}\.{d}", d = dec_octet);
    let ls32 = format!("(?:{h}:{h}|{v4})", h = h16, v4 = ipv4);

    // left-hand groups before `::`, right-hand groups after it
    let head = |max: usize| format!("(?:(?:{h}:){{0,{m}}}{h})?", h = h16, m = max);
    let tail = |n: usize| format!("(?:{}:){{{}}}", h16, n);

    let alternatives = [
        format!("{}{}", tail(6), ls32),
        format!("::{}{}", tail(5), ls32),
        format!("(?:{})?::{}{}", h16, tail(4), ls32),
        format!("{}::{}{}", head(1), tail(3), ls32),
        format!("{}::{}{}", head(2), tail(2), ls32),
        format!("{}::{}{}", head(3), tail(1), ls32),
        format!("{}::{}", head(4), ls32),
        format!("{}::{}", head(5), h16),
        format!("{}::", head(6)),
    ];
    format!("(?:{})", alternatives.join("|"))
}

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`
fn pchar() -> String {
    format!("(?:[{}{}:@]|{})", UNRESERVED, SUB_DELIMS, PCT_ENCODED)
}

fn check(regex: &Regex, value: &str, kind: &str) -> Result<()> {
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(Error::invalid_value(value, kind))
    }
}

/// A decomposed URI-reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AnyUri {
    #[serde(skip_serializing_if = "Option::is_none")]
    scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<String>,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment: Option<String>,
}

impl Datatype for AnyUri {
    const VALIDATOR_NAME: &'static str = "AnyURIType";
}

impl AnyUri {
    /// Parse and validate a URI-reference
    pub fn new(value: &str) -> Result<Self> {
        let caps = URI_REFERENCE
            .captures(value)
            .ok_or_else(|| Error::invalid_value(value, "URI"))?;
        let group = |i: usize| caps.get(i).map(|m| m.as_str());

        let scheme = group(2);
        if let Some(scheme) = scheme {
            check(&SCHEME, scheme, "scheme")?;
        }

        let path = group(5).unwrap_or_default();
        let mut uri = Self {
            scheme: scheme.map(str::to_string),
            user_info: None,
            host: None,
            port: None,
            path: path.to_string(),
            query: None,
            fragment: None,
        };

        if let Some(authority) = group(4) {
            uri.parse_authority(authority)?;
            check(&PATH_ABEMPTY, path, "path-abempty")?;
        } else {
            Self::check_path(path, scheme.is_some())?;
        }

        if let Some(query) = group(7) {
            check(&QUERY_OR_FRAGMENT, query, "query")?;
            uri.query = Some(query.to_string());
        }

        if let Some(fragment) = group(9) {
            check(&QUERY_OR_FRAGMENT, fragment, "fragment")?;
            uri.fragment = Some(fragment.to_string());
        }

        Ok(uri)
    }

    fn parse_authority(&mut self, authority: &str) -> Result<()> {
        let (user_info, host_port) = match authority.rfind('@') {
            Some(at) => (Some(&authority[..at]), &authority[at + 1..]),
            None => (None, authority),
        };

        // A port can only follow the closing bracket of an IP-literal
        let port_search_from = if host_port.starts_with('[') {
            host_port.find(']').map_or(host_port.len(), |i| i + 1)
        } else {
            0
        };
        let (host, port) = match host_port[port_search_from..].rfind(':') {
            Some(colon) => {
                let colon = port_search_from + colon;
                (&host_port[..colon], Some(&host_port[colon + 1..]))
            }
            None => (host_port, None),
        };

        if let Some(user_info) = user_info {
            check(&USER_INFO, user_info, "userinfo")?;
        }
        if host.starts_with('[') {
            check(&IP_LITERAL, host, "host")?;
        } else {
            check(&REG_NAME, host, "host")?;
        }
        if let Some(port) = port {
            check(&PORT, port, "port")?;
        }

        self.user_info = user_info.map(str::to_string);
        self.host = Some(host.to_string());
        self.port = port.map(str::to_string);
        Ok(())
    }

    /// Path shapes without an authority, tried in order
    fn check_path(path: &str, has_scheme: bool) -> Result<()> {
        let matched = PATH_ABSOLUTE.is_match(path)
            || (!has_scheme && PATH_NOSCHEME.is_match(path))
            || (has_scheme && PATH_ROOTLESS.is_match(path))
            || path.is_empty();
        if matched {
            Ok(())
        } else {
            Err(Error::invalid_value(path, "path"))
        }
    }

    /// The scheme, if the URI is absolute
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// The userinfo part of the authority
    pub fn user_info(&self) -> Option<&str> {
        self.user_info.as_deref()
    }

    /// The host part of the authority
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The port part of the authority
    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    /// The path, possibly empty
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query, without the leading `?`
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The fragment, without the leading `#`
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// A URI without a scheme is a relative reference
    pub fn is_relative(&self) -> bool {
        self.scheme.is_none()
    }

    /// Reassemble the textual form from the components
    pub fn uri(&self) -> String {
        let mut out = String::new();
        if let Some(scheme) = &self.scheme {
            out.push_str(scheme);
            out.push(':');
        }
        if let Some(host) = &self.host {
            out.push_str("//");
            if let Some(user_info) = &self.user_info {
                out.push_str(user_info);
                out.push('@');
            }
            out.push_str(host);
            if let Some(port) = &self.port {
                out.push(':');
                out.push_str(port);
            }
        }
        out.push_str(&self.path);
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }

    /// Convert an absolute URI to a [`Url`]
    pub fn to_url(&self) -> Result<Url> {
        if self.is_relative() {
            return Err(Error::InvalidOperation(format!(
                "relative reference '{}' has no absolute URL form",
                self
            )));
        }
        Ok(Url::parse(&self.uri())?)
    }

    /// Resolve this reference against an absolute `base`
    pub fn resolve(&self, base: &AnyUri) -> Result<Url> {
        Ok(base.to_url()?.join(&self.uri())?)
    }
}

impl fmt::Display for AnyUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

impl FromStr for AnyUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
