//! Killmail link parsing.

/// Extract `(killmail_id, hash)` from a link containing
/// `/killmails/<digits>/<hex>`, e.g.
/// `https://esi.evetech.net/latest/killmails/118000001/4f3a.../?datasource=tranquility`.
///
/// The first matching segment wins. Returns `None` when no segment matches or
/// the ID does not fit in an `i64`.
#[must_use]
pub fn parse_killmail_link(link: &str) -> Option<(i64, String)> {
    const MARKER: &str = "/killmails/";

    let mut rest = link;
    while let Some(pos) = rest.find(MARKER) {
        if let Some(found) = parse_id_and_hash(&rest[pos + MARKER.len()..]) {
            return Some(found);
        }
        rest = &rest[pos + 1..];
    }
    None
}

fn parse_id_and_hash(segment: &str) -> Option<(i64, String)> {
    let id_len = segment.bytes().take_while(u8::is_ascii_digit).count();
    if id_len == 0 {
        return None;
    }
    let (id, rest) = segment.split_at(id_len);
    let rest = rest.strip_prefix('/')?;
    let hash_len = rest.bytes().take_while(u8::is_ascii_hexdigit).count();
    if hash_len == 0 {
        return None;
    }
    let id = id.parse().ok()?;
    Some((id, rest[..hash_len].to_string()))
}
