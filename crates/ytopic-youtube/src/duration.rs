//! ISO-8601 duration parsing for `contentDetails.duration`.

use std::sync::LazyLock;

use regex::Regex;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$").expect("valid regex")
});

/// Convert a `PnDTnHnMnS` duration into total seconds.
///
/// `YouTube` only emits day, hour, minute and second components. Anything
/// that does not match (including the empty string) yields `0`, which the
/// classifier treats as short-form.
#[must_use]
pub fn parse_duration_secs(duration: &str) -> u64 {
    let Some(caps) = DURATION_RE.captures(duration.trim()) else {
        return 0;
    };

    let part = |idx: usize| -> u64 {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    [(1, 86_400), (2, 3_600), (3, 60), (4, 1)]
        .into_iter()
        .try_fold(0_u64, |total, (idx, unit)| {
            part(idx).checked_mul(unit)?.checked_add(total)
        })
        .unwrap_or(0)
}
