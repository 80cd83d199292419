// nfctag/src/address.rs
//! Web address normalization and comparison.
//!
//! Tags in the field carry all kinds of damage: schemes with a missing
//! leading `h`, bare domains, web addresses stored behind a `tel:` prefix.
//! [`repair`] undoes those, [`normalize`] additionally validates the result
//! and rewrites private-network addresses to plain `http://`.

const HTTP: &str = "http://";
const HTTPS: &str = "https://";

/// Top-level suffixes that mark a schemeless string as a web address.
const WEB_SUFFIXES: [&str; 7] = [".com", ".org", ".net", ".edu", ".gov", ".io", ".app"];

/// Broken scheme spellings that only lack their leading `h`
const MISSING_H: [&str; 4] = ["ttps://", "tps://", "tp://", "ttp://"];

/// Loose heuristic used when deciding whether a schemeless string should be
/// stored as a URI record.
pub fn looks_like_web_address(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    WEB_SUFFIXES.iter().any(|suffix| lower.contains(suffix))
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// Split off a leading run of `[A-Za-z0-9-]`.
fn take_label(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_label_char(c)).unwrap_or(s.len());
    s.split_at(end)
}

fn leading_letters(s: &str) -> usize {
    s.chars().take_while(|c| c.is_ascii_alphabetic()).count()
}

/// True if `s` starts with `label.tld` or `label.label.tld`, where the
/// top-level part begins with at least two letters.
pub fn is_domain_like(s: &str) -> bool {
    let (first, rest) = take_label(s);
    let Some(rest) = rest.strip_prefix('.') else {
        return false;
    };
    if first.is_empty() {
        return false;
    }
    if leading_letters(rest) >= 2 {
        return true;
    }
    let (second, rest) = take_label(rest);
    match rest.strip_prefix('.') {
        Some(tld) => !second.is_empty() && leading_letters(tld) >= 2,
        None => false,
    }
}

fn has_web_scheme(s: &str) -> bool {
    s.starts_with(HTTP) || s.starts_with(HTTPS)
}

/// Restore a scheme that lost its leading `h`, or lost a `t` to a typo.
fn fix_scheme_typos(s: &str) -> String {
    if let Some(rest) = s.strip_prefix("htttps://") {
        return format!("{}{}", HTTPS, rest);
    }
    if MISSING_H.iter().any(|p| s.starts_with(p)) {
        return format!("h{}", s);
    }
    s.to_string()
}

/// A web address stored as `tel:example.com` is turned back into one.
fn fix_tel_address(s: &str) -> Option<String> {
    let rest = s.strip_prefix("tel:")?;
    if !rest.contains('.') && !rest.contains('/') {
        return None;
    }
    let rest = rest.trim();
    let scheme = if is_domain_like(rest) { HTTPS } else { HTTP };
    Some(format!("{}{}", scheme, rest))
}

/// Prefix `https://` onto `www.` hosts and bare domains.
fn infer_scheme(s: String) -> String {
    if has_web_scheme(&s) {
        return s;
    }
    if s.starts_with("www.") || is_domain_like(&s) {
        return format!("{}{}", HTTPS, s);
    }
    s
}

/// Apply typo repair, `tel:` repair and scheme inference.
/// Anything the steps do not recognize is returned trimmed but unchanged.
pub fn repair(raw: &str) -> String {
    let s = fix_scheme_typos(raw.trim());
    let s = fix_tel_address(&s).unwrap_or(s);
    infer_scheme(s)
}

/// Repair for free text: typo repair and scheme inference only. Text that
/// does not start like a web address is returned trimmed.
pub fn repair_text(raw: &str) -> String {
    infer_scheme(fix_scheme_typos(raw.trim()))
}

/// True for hosts in 10/8, 172.16/12 and 192.168/16.
fn is_private_host(host: &str) -> bool {
    if host.starts_with("10.") || host.starts_with("192.168.") {
        return true;
    }
    if let Some(rest) = host.strip_prefix("172.") {
        let (octet, tail) = rest.split_at(rest.find('.').unwrap_or(rest.len()));
        if tail.starts_with('.') {
            if let Ok(n) = octet.parse::<u8>() {
                return (16..=31).contains(&n) && octet.len() == 2;
            }
        }
    }
    false
}

/// Devices on private networks rarely hold a certificate; downgrade to http.
fn downgrade_private(s: String) -> String {
    match s.strip_prefix(HTTPS) {
        Some(host) if is_private_host(host) => format!("{}{}", HTTP, host),
        _ => s,
    }
}

/// `http(s)://` followed by at least two characters, no whitespace anywhere
/// and a first host character that is not one of `/$.?#`.
pub fn is_valid_web_address(s: &str) -> bool {
    let Some(rest) = s.strip_prefix(HTTPS).or_else(|| s.strip_prefix(HTTP)) else {
        return false;
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if !c.is_whitespace() && !"/$.?#".contains(c) => {}
        _ => return false,
    }
    chars.next().is_some() && !rest.chars().any(char::is_whitespace)
}

/// Normalize user input into a web address.
///
/// Returns `(true, normalized)` on success and `(false, raw)` otherwise.
/// Applying it to its own output changes nothing.
pub fn normalize(raw: &str) -> (bool, String) {
    if raw.trim().is_empty() {
        return (false, raw.to_string());
    }
    let candidate = downgrade_private(repair(raw));
    if is_valid_web_address(&candidate) {
        (true, candidate)
    } else {
        (false, raw.to_string())
    }
}

fn strip_for_compare(s: &str) -> &str {
    let s = s
        .strip_prefix(HTTPS)
        .or_else(|| s.strip_prefix(HTTP))
        .unwrap_or(s);
    s.trim_end_matches('/')
}

/// Tolerant equality used when verifying a written tag: the `http(s)://`
/// scheme and trailing slashes are ignored.
pub fn addresses_equivalent(a: &str, b: &str) -> bool {
    a == b || strip_for_compare(a) == strip_for_compare(b)
}
