//! Deep links: the `program` query parameter of the page URL.

/// Query parameter holding the id of the program shown in the detail dialog.
pub const PROGRAM_PARAM: &str = "program";

struct SplitUrl<'a> {
    base: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

fn split(url: &str) -> SplitUrl<'_> {
    let (rest, fragment) = match url.split_once('#') {
        Some((r, f)) => (r, Some(f)),
        None => (url, None),
    };
    let (base, query) = match rest.split_once('?') {
        Some((b, q)) => (b, Some(q)),
        None => (rest, None),
    };
    SplitUrl {
        base,
        query,
        fragment,
    }
}

fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

fn pairs(query: Option<&str>) -> impl Iterator<Item = &str> {
    query
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty())
}

fn param_name(pair: &str) -> String {
    decode(pair.split_once('=').map(|(k, _)| k).unwrap_or(pair))
}

/// Program id carried by `url`, if any. An empty value counts as absent.
pub fn program_param(url: &str) -> Option<String> {
    pairs(split(url).query)
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| decode(k) == PROGRAM_PARAM)
        .map(|(_, v)| decode(v))
        .filter(|v| !v.is_empty())
}

/// `url` with the program parameter set to `id`, other parameters kept in place.
pub fn with_program_param(url: &str, id: &str) -> String {
    let parts = split(url);
    let encoded = format!("{}={}", PROGRAM_PARAM, urlencoding::encode(id));
    let mut replaced = false;
    let mut kept: Vec<String> = Vec::new();
    for pair in pairs(parts.query) {
        if param_name(pair) == PROGRAM_PARAM {
            if !replaced {
                kept.push(encoded.clone());
                replaced = true;
            }
        } else {
            kept.push(pair.to_string());
        }
    }
    if !replaced {
        kept.push(encoded);
    }
    assemble(parts.base, &kept, parts.fragment)
}

/// `url` with the program parameter removed entirely.
pub fn without_program_param(url: &str) -> String {
    let parts = split(url);
    let kept: Vec<String> = pairs(parts.query)
        .filter(|pair| param_name(pair) != PROGRAM_PARAM)
        .map(str::to_string)
        .collect();
    assemble(parts.base, &kept, parts.fragment)
}

fn assemble(base: &str, pairs: &[String], fragment: Option<&str>) -> String {
    let mut out = base.to_string();
    if !pairs.is_empty() {
        out.push('?');
        out.push_str(&pairs.join("&"));
    }
    if let Some(f) = fragment {
        out.push('#');
        out.push_str(f);
    }
    out
}
