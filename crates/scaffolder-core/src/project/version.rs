//! Version range comparison for dependency merging

use semver::{Op, Version, VersionReq};

/// Lowest version accepted by an npm-style range (`^16.13.1`, `~1.2`, `3.0.0`, `v2`)
///
/// Returns None for anything that does not name a floor: `*`, `<2.0.0`, dist tags,
/// URLs, or compound npm ranges the semver crate cannot parse.
pub fn lower_bound(range: &str) -> Option<Version> {
    let cleaned = range.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    let req = VersionReq::parse(cleaned).ok()?;

    req.comparators
        .iter()
        .filter(|c| {
            matches!(
                c.op,
                Op::Exact | Op::Greater | Op::GreaterEq | Op::Tilde | Op::Caret | Op::Wildcard
            )
        })
        .map(|c| {
            let mut version = Version::new(c.major, c.minor.unwrap_or(0), c.patch.unwrap_or(0));
            version.pre = c.pre.clone();
            version
        })
        .max()
}

/// Whether replacing `existing` by `requested` would lower the version floor.
///
/// Ranges that cannot be compared count as a downgrade so the existing entry is kept.
pub fn is_downgrade(existing: &str, requested: &str) -> bool {
    match (lower_bound(existing), lower_bound(requested)) {
        (Some(existing), Some(requested)) => requested < existing,
        _ => true,
    }
}
