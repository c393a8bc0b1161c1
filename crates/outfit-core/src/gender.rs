//! Avatar gender as carried in figure packets.

/// Avatar gender: Male or Female.
///
/// On the wire this is a one-letter string (`"M"` / `"F"`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Wire code sent in `UpdateFigureData` (`"M"` / `"F"`).
    pub fn as_code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    /// Parse a wire gender code.
    ///
    /// `"m"` (any ASCII case) is Male; everything else, including an
    /// empty string, is Female.
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("m") {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}
