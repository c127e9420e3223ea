//! Group-tagged replacement over a combined pattern

use std::borrow::Cow;

use regex::Regex;

use crate::{Result, SanitizeError};

/// Replace every match of `re` with the literal of the group that matched
///
/// `re` is an alternation with one capture group per alternative and
/// `replacements[i]` is the literal for group `i + 1`. Matches are found in a
/// single left-to-right scan, so adjacent runs of different alternatives are
/// each replaced by their own literal.
pub fn replace_all_submatch<'a>(
    re: &Regex,
    src: &'a str,
    replacements: &[&str],
) -> Result<Cow<'a, str>> {
    let groups = re.captures_len() - 1;
    if groups != replacements.len() {
        return Err(SanitizeError::GroupMismatch {
            groups,
            replacements: replacements.len(),
        });
    }

    let mut result = String::new();
    let mut last = 0;
    let mut replaced = false;

    for caps in re.captures_iter(src) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(group) = (1..=groups).find(|&i| caps.get(i).is_some()) else {
            continue;
        };

        result.push_str(&src[last..whole.start()]);
        result.push_str(replacements[group - 1]);
        last = whole.end();
        replaced = true;
    }

    if !replaced {
        return Ok(Cow::Borrowed(src));
    }

    result.push_str(&src[last..]);
    Ok(Cow::Owned(result))
}
