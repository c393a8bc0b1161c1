//! Figure-code combining.
//!
//! A figure code is a dot-delimited list of parts, each starting with a
//! two-letter category (`hr-100-61.hd-180-1.ch-210-66.lg-270-82`).
//! Combining takes the *kept* categories from a base figure and
//! everything else from an overlay figure:
//!
//! ```text
//! base    = hr-100.hd-200.lg-300.ch-400
//! overlay = hr-500.hd-600.lg-700.ch-800
//! mode 2  = hr-100.hd-200 . lg-700.ch-800
//! ```
//!
//! Removal from the overlay is done per part together with its trailing
//! dot. If the last part of the overlay is removed, the dot in front of
//! it survives (`lg-700.hr-500` -> `lg-700.`). That artifact is part of
//! the observable output and is left alone.

use crate::entity::{UpdateTarget, UserEntity};

/// Category-keep rule used when combining two figures.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CombineMode {
    /// 1: keep hair, legs and head from the base.
    HairLegsHead,
    /// 2: keep hair and head from the base.
    HairHead,
    /// 3: keep everything worn on the head from the base.
    #[default]
    Headwear,
}

impl CombineMode {
    /// Map a 1-based mode number. Anything outside `1..=3` is `None`.
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(CombineMode::HairLegsHead),
            2 => Some(CombineMode::HairHead),
            3 => Some(CombineMode::Headwear),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            CombineMode::HairLegsHead => 1,
            CombineMode::HairHead => 2,
            CombineMode::Headwear => 3,
        }
    }

    /// Categories the base figure contributes.
    pub fn kept_categories(self) -> &'static [&'static str] {
        match self {
            CombineMode::HairLegsHead => &["hr", "lg", "hd"],
            CombineMode::HairHead => &["hr", "hd"],
            CombineMode::Headwear => &["hr", "hd", "he", "ha", "ea", "fa"],
        }
    }

    fn keeps(self, part: &str) -> bool {
        !part.chars().any(char::is_whitespace)
            && self
                .kept_categories()
                .iter()
                .any(|category| part.starts_with(category))
    }
}

/// Parts of `figure` in a kept category, in source order, joined by `.`.
///
/// Returns an empty string when nothing matches.
pub fn kept_parts(figure: &str, mode: CombineMode) -> String {
    figure
        .split('.')
        .filter(|part| mode.keeps(part))
        .collect::<Vec<_>>()
        .join(".")
}

/// `figure` with every kept-category part (and its trailing dot) removed.
pub fn without_kept_parts(figure: &str, mode: CombineMode) -> String {
    let parts: Vec<&str> = figure.split('.').collect();
    let last = parts.len().saturating_sub(1);

    let mut out = String::with_capacity(figure.len());
    for (i, part) in parts.iter().enumerate() {
        if mode.keeps(part) {
            continue;
        }
        out.push_str(part);
        if i < last {
            out.push('.');
        }
    }
    out
}

/// Combine two figure codes: `kept(base) + "." + rest(overlay)`.
///
/// A base with no kept parts yields an empty base segment, so the result
/// starts with the separator.
pub fn combine_figures(base: &str, overlay: &str, mode: CombineMode) -> String {
    format!(
        "{}.{}",
        kept_parts(base, mode),
        without_kept_parts(overlay, mode)
    )
}

/// Combine two users into a bare update target.
///
/// The result always takes the base user's gender.
pub fn combine(base: &UserEntity, overlay: &UserEntity, mode: CombineMode) -> UpdateTarget {
    UpdateTarget::new(
        base.gender,
        combine_figures(&base.figure, &overlay.figure, mode),
    )
}
