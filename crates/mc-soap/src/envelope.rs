//! In-body token injection and fault extraction for SOAP envelopes.
//!
//! Caller-authored XML is edited by pattern match rather than parsed, so
//! everything outside the insertion point round-trips byte for byte.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

use busbar_mc_client::security::xml;
use busbar_mc_client::{Error, ErrorKind, Result};

/// Element that carries the access token inside the SOAP header.
pub const TOKEN_ELEMENT: &str = "fueloauth";

/// Opening (or self-closing) header tag with any namespace prefix.
static HEADER_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<((?:[A-Za-z_][\w.\-]*:)?Header)(\s[^>]*?)?(/?)>").expect("valid header pattern")
});

/// Opening (or self-closing) envelope tag with any namespace prefix.
static ENVELOPE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<((?:[A-Za-z_][\w.\-]*:)?)Envelope(\s[^>]*?)?(/?)>").expect("valid envelope pattern")
});

static STATUS_MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(?:[A-Za-z_][\w.\-]*:)?StatusMessage(?:\s[^>]*)?>(.*?)</(?:[A-Za-z_][\w.\-]*:)?StatusMessage\s*>")
        .expect("valid status message pattern")
});

fn token_element(token: &str) -> String {
    format!("<{TOKEN_ELEMENT}>{}</{TOKEN_ELEMENT}>", xml::escape(token))
}

/// Insert `<fueloauth>{token}</fueloauth>` into a SOAP envelope.
///
/// An existing header receives the token as its first child. Without one, a
/// header is synthesized as the first child of the envelope using the
/// envelope's namespace prefix. Fails with [`ErrorKind::InvalidRequest`] when
/// the document has neither.
pub fn inject_token(envelope: &str, token: &str) -> Result<String> {
    let element = token_element(token);

    if let Some(caps) = HEADER_OPEN.captures(envelope) {
        return Ok(splice_into_header(envelope, &caps, &element));
    }

    if let Some(caps) = ENVELOPE_OPEN.captures(envelope) {
        return Ok(splice_into_envelope(envelope, &caps, &element));
    }

    Err(Error::new(ErrorKind::InvalidRequest(
        "SOAP body has no Envelope element to carry the access token".to_string(),
    )))
}

fn splice_into_header(envelope: &str, caps: &Captures<'_>, element: &str) -> String {
    let open = caps.get(0).map_or(0..0, |m| m.range());
    let name = caps.get(1).map_or("Header", |m| m.as_str());
    let attrs = caps.get(2).map_or("", |m| m.as_str());
    let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());

    let mut out = String::with_capacity(envelope.len() + element.len() + name.len() + 5);
    if self_closing {
        out.push_str(&envelope[..open.start]);
        out.push_str(&format!("<{name}{attrs}>{element}</{name}>"));
    } else {
        out.push_str(&envelope[..open.end]);
        out.push_str(element);
    }
    out.push_str(&envelope[open.end..]);
    out
}

fn splice_into_envelope(envelope: &str, caps: &Captures<'_>, element: &str) -> String {
    let open = caps.get(0).map_or(0..0, |m| m.range());
    let prefix = caps.get(1).map_or("", |m| m.as_str());
    let attrs = caps.get(2).map_or("", |m| m.as_str());
    let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());
    let header = format!("<{prefix}Header>{element}</{prefix}Header>");

    let mut out = String::with_capacity(envelope.len() + header.len() + prefix.len() + 12);
    if self_closing {
        out.push_str(&envelope[..open.start]);
        out.push_str(&format!("<{prefix}Envelope{attrs}>{header}</{prefix}Envelope>"));
    } else {
        out.push_str(&envelope[..open.end]);
        out.push_str(&header);
    }
    out.push_str(&envelope[open.end..]);
    out
}

/// Text of the first `StatusMessage` element in a SOAP response, if any.
pub fn extract_status_message(body: &str) -> Option<String> {
    STATUS_MESSAGE
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|m| !m.is_empty())
}

/// SOAP service URL derived from a REST base URI.
///
/// `https://abc.rest.marketingcloudapis.com` becomes
/// `https://abc.soap.marketingcloudapis.com/Service.asmx`.
pub fn soap_endpoint(rest_base_uri: &str) -> String {
    let host = rest_base_uri.replacen(".rest.", ".soap.", 1);
    format!("{}/Service.asmx", host.trim_end_matches('/'))
}
