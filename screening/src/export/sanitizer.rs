//! Print-safe copy of the rendered report.
//!
//! The live report is styled for a dark screen. The export snapshot is a
//! deep copy rewritten for white paper: dark text, light cards, and the
//! feature bars left in their diagnosis colour.

use crate::dom::{ids, Element, Page};
use crate::error::{Result, ScreeningError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Id given to the snapshot root so it never collides with the live container
pub const SNAPSHOT_ID: &str = "resultContainer-export";

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").expect("Invalid hex color regex")
});

/// How a descendant of the snapshot is rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    KeepBarFill,
    BarTrack,
    Card,
    Text,
}

impl Rule {
    /// First matching rule wins
    fn classify(element: &Element) -> Self {
        if element.has_class("bar-fill") {
            Self::KeepBarFill
        } else if element.has_class("bar-track") {
            Self::BarTrack
        } else if element.has_class("result-header-card") || element.has_class("info-card") {
            Self::Card
        } else {
            Self::Text
        }
    }

    fn apply(self, element: &mut Element) {
        match self {
            Self::KeepBarFill => {}
            Self::BarTrack => element.style.set("background", "#e2e8f0"),
            Self::Card => {
                element.style.set("background", "#f8fafc");
                element.style.set("border", "1px solid #000000");
                element.style.set("box-shadow", "none");
                element.style.set("color", "#000000");
            }
            Self::Text => {
                element.style.set("color", "#000000");
                let dark_background = element
                    .style
                    .get("background")
                    .is_some_and(|background| !is_white_based(background));
                if dark_background {
                    element.style.set("background", "transparent");
                }
            }
        }
    }
}

/// Deep copy of the live container, placed off-screen on a white sheet.
///
/// Only the root is touched; the descendants are rewritten by [`sanitize`].
pub fn prepare_snapshot(live: &Element) -> Element {
    let mut snapshot = live.clone();
    snapshot.id = Some(SNAPSHOT_ID.to_string());
    for (property, value) in [
        ("position", "absolute"),
        ("left", "-9999px"),
        ("top", "0"),
        ("width", "800px"),
        ("background", "#ffffff"),
        ("padding", "40px"),
    ] {
        snapshot.style.set(property, value);
    }
    snapshot
}

/// Rewrite every descendant for print and drop the export trigger
pub fn sanitize(mut tree: Element) -> Element {
    tree.for_each_descendant_mut(&mut |element| Rule::classify(element).apply(element));
    tree.remove_by_id(ids::BTN_PDF);
    tree
}

/// Build the sanitized snapshot of the page's result container
pub fn build_export_snapshot(page: &Page) -> Result<Element> {
    let live = page
        .element(ids::RESULT_CONTAINER)
        .ok_or_else(|| ScreeningError::missing_element(ids::RESULT_CONTAINER))?;
    Ok(sanitize(prepare_snapshot(live)))
}

/// Whether a background value starts from full red, the way a browser
/// reports it (`#fff` reads back as `rgb(255, 255, 255)`)
fn is_white_based(background: &str) -> bool {
    let expanded = HEX_COLOR.replace_all(background, |caps: &regex::Captures| hex_to_rgb(&caps[1]));
    let compact: String = expanded
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    compact.contains("rgb(255")
}

fn hex_to_rgb(hex: &str) -> String {
    let digits: Vec<u8> = if hex.len() == 3 {
        hex.chars()
            .filter_map(|c| c.to_digit(16))
            .map(|d| (d * 17) as u8)
            .collect()
    } else {
        (0..3)
            .filter_map(|i| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok())
            .collect()
    };
    match digits.as_slice() {
        [r, g, b] => format!("rgb({r}, {g}, {b})"),
        _ => hex.to_string(),
    }
}
