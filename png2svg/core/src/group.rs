//! Groups same-colored elements under `<g fill="...">` containers.
//!
//! The rendered document is cut into fragments that each end at a `>`.
//! Every top-level fragment carrying a `fill` attribute is pulled out and
//! bucketed by its (shortened) color. Buckets with several members become a
//! group that holds the fill once; single members are written back as they
//! are. The combined text replaces the first fragment that was pulled out.
//!
//! Emitted boxes never overlap, so reordering them this way does not change
//! the rendered image.

use std::collections::HashMap;

use log::debug;

use crate::color::{shorten_lossless, shorten_lossy};

const FILL_ATTR: &str = " fill=\"";

#[derive(Debug)]
struct ColorBucket {
    color: String,
    members: Vec<String>,
}

/// Splits markup after every `>`. Text after the last `>` is kept as a
/// final fragment, so joining the fragments restores the input.
pub fn fragments(document: &str) -> Vec<String> {
    document.split_inclusive('>').map(str::to_owned).collect()
}

/// Returns the value of the first `fill` attribute in `fragment`.
pub fn fill_color(fragment: &str) -> Option<&str> {
    let start = fragment.find(FILL_ATTR)? + FILL_ATTR.len();
    let len = fragment[start..].find('"')?;
    Some(&fragment[start..start + len])
}

/// An opening `<g>` tag. A self-closing `<g/>` opens nothing.
fn is_group_start(tag: &str) -> bool {
    (tag == "<g>" || tag.starts_with("<g ")) && !tag.trim_end().ends_with("/>")
}

/// Runs the grouping pass over `fragments` in place.
///
/// Fragments that were moved into the combined block are left empty. With
/// `lossy` set, bucket keys drop the second digit of every channel; otherwise
/// colors are only shortened when that loses nothing.
pub fn group_fragments(fragments: &mut [String], lossy: bool) {
    let mut buckets: Vec<ColorBucket> = Vec::new();
    let mut by_color: HashMap<String, usize> = HashMap::new();
    let mut first_slot = None;
    let mut depth = 0usize;

    for (i, fragment) in fragments.iter_mut().enumerate() {
        let tag = fragment.trim_start();
        if is_group_start(tag) {
            depth += 1;
            continue;
        }
        if tag.starts_with("</g") {
            depth = depth.saturating_sub(1);
            continue;
        }
        if depth > 0 {
            continue;
        }
        let Some(color) = fill_color(fragment.as_str()).map(str::to_owned) else {
            continue;
        };
        let key = (if lossy {
            shorten_lossy(&color)
        } else {
            shorten_lossless(&color)
        })
        .into_owned();

        let mut member = std::mem::take(fragment);
        if key != color {
            let from = format!("{FILL_ATTR}{color}\"");
            let to = format!("{FILL_ATTR}{key}\"");
            member = member.replacen(&from, &to, 1);
        }
        first_slot.get_or_insert(i);

        let idx = *by_color.entry(key.clone()).or_insert_with(|| {
            buckets.push(ColorBucket {
                color: key,
                members: Vec::new(),
            });
            buckets.len() - 1
        });
        buckets[idx].members.push(member);
    }

    let Some(slot) = first_slot else {
        return;
    };

    // Singletons first, then groups: a second pass sees the singletons as one
    // contiguous run at the same slot and leaves the groups alone.
    let mut block = String::new();
    for bucket in buckets.iter().filter(|b| b.members.len() == 1) {
        block.push_str(&bucket.members[0]);
    }
    let mut groups = 0;
    for bucket in buckets.iter().filter(|b| b.members.len() > 1) {
        let attr = format!("{FILL_ATTR}{}\"", bucket.color);
        block.push_str("<g");
        block.push_str(&attr);
        block.push('>');
        for member in &bucket.members {
            block.push_str(&member.replacen(&attr, "", 1));
        }
        block.push_str("</g>");
        groups += 1;
    }
    debug!("grouped {} colors into {groups} groups", buckets.len());
    fragments[slot] = block;
}

/// Groups a whole document by fill color and returns the new text.
pub fn group_by_fill_color(document: &str, lossy: bool) -> String {
    let mut parts = fragments(document);
    group_fragments(&mut parts, lossy);
    parts.concat()
}
