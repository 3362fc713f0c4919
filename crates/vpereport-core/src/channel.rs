//! The fixed set of media channels every report is grouped by.

use std::fmt;

/// One of the four media categories a clipping report covers.
///
/// The set and its order are fixed; charts always iterate channels in the
/// order of [`Channel::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    MediosDigitales,
    Prensa,
    Radio,
    Tv,
}

impl Channel {
    /// All channels in canonical rendering order.
    pub const ALL: [Channel; 4] = [
        Channel::MediosDigitales,
        Channel::Prensa,
        Channel::Radio,
        Channel::Tv,
    ];

    /// The exact key the channel uses in incoming payloads.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Channel::MediosDigitales => "Medios Digitales",
            Channel::Prensa => "Prensa",
            Channel::Radio => "Radio",
            Channel::Tv => "TV",
        }
    }

    /// Lowercase, underscore-separated form used in output filenames.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Channel::MediosDigitales => "medios_digitales",
            Channel::Prensa => "prensa",
            Channel::Radio => "radio",
            Channel::Tv => "tv",
        }
    }

    /// Payload key of the per-channel raw article document.
    #[must_use]
    pub fn raw_key(self) -> String {
        format!("{}_raw", self.display_name())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_ordered_and_complete() {
        let names: Vec<&str> = Channel::ALL.iter().map(|c| c.display_name()).collect();
        assert_eq!(names, ["Medios Digitales", "Prensa", "Radio", "TV"]);
    }

    #[test]
    fn slug_matches_filename_convention() {
        assert_eq!(Channel::MediosDigitales.slug(), "medios_digitales");
        assert_eq!(Channel::Tv.slug(), "tv");
    }

    #[test]
    fn raw_key_appends_suffix_to_display_name() {
        assert_eq!(Channel::Prensa.raw_key(), "Prensa_raw");
        assert_eq!(Channel::MediosDigitales.raw_key(), "Medios Digitales_raw");
    }
}
