//! Text rewrites that shrink a rendered document without changing what it
//! draws.

use crate::color::NAMED_COLORS;

/// Attributes whose value `0` is the SVG default.
const ZERO_ATTRS: [&str; 4] = [" x=\"0\"", " y=\"0\"", " width=\"0\"", " height=\"0\""];

pub fn minify(document: &str) -> String {
    let mut svg = document.replace('\n', "");
    svg = svg.replace(" />", "/>");
    while svg.contains("  ") {
        svg = svg.replace("  ", " ");
    }
    for attr in ZERO_ATTRS {
        svg = svg.replace(attr, "");
    }
    svg = svg.replace("> <", "><");
    replace_named_colors(&svg)
}

/// Swaps quoted hex values for shorter color names, `"#f00"` -> `"red"`.
/// Unquoted text is never touched, so `#f00` inside `#f00000` stays as is.
pub fn replace_named_colors(document: &str) -> String {
    let mut svg = document.to_owned();
    for (hex, name) in NAMED_COLORS {
        let quoted = format!("\"{hex}\"");
        if svg.contains(&quoted) {
            svg = svg.replace(&quoted, &format!("\"{name}\""));
        }
    }
    svg
}
