// Player name normalization used as the join key between roster names and
// box-score names.

use unicode_normalization::UnicodeNormalization;

/// Canonical matching key for a player name.
///
/// Accented letters are decomposed and their combining marks dropped, every
/// character that is not a word character or whitespace is removed, and the
/// result is lower-cased and trimmed. Interior whitespace is left alone, so
/// "Ronald Acuña Jr." becomes "ronald acuna jr".
///
/// The function is idempotent: `normalize_name(&normalize_name(x))` equals
/// `normalize_name(x)`.
pub fn normalize_name(name: &str) -> String {
    let folded: String = name
        .nfd()
        .filter(|c| c.is_ascii())
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    folded.to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents() {
        assert_eq!(normalize_name("José Ramírez"), "jose ramirez");
        assert_eq!(normalize_name("Ronald Acuña Jr."), "ronald acuna jr");
        assert_eq!(normalize_name("Teoscar Hernández"), "teoscar hernandez");
    }

    #[test]
    fn accent_and_case_insensitive() {
        assert_eq!(normalize_name("José Ramírez"), normalize_name("jose ramirez"));
        assert_eq!(normalize_name("JOSE RAMIREZ"), normalize_name("jose ramirez"));
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(normalize_name("Travis d'Arnaud"), "travis darnaud");
        assert_eq!(normalize_name("J.D. Martinez"), "jd martinez");
        assert_eq!(normalize_name("Jazz Chisholm Jr."), "jazz chisholm jr");
        assert_eq!(normalize_name("Ke'Bryan Hayes"), "kebryan hayes");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize_name("  Cal Raleigh \t"), "cal raleigh");
    }

    #[test]
    fn keeps_digits_and_underscores() {
        assert_eq!(normalize_name("Player_2 III"), "player_2 iii");
    }

    #[test]
    fn drops_non_latin_characters() {
        assert_eq!(normalize_name("大谷翔平"), "");
        assert_eq!(normalize_name("Shohei Ohtani 大谷"), "shohei ohtani");
    }

    #[test]
    fn idempotent() {
        let names = [
            "José Ramírez",
            "Ronald Acuña Jr.",
            "  Eugenio Suárez ",
            "Travis d'Arnaud",
            "Yandy Díaz",
            "Vladimir Guerrero Jr.",
            "",
            "!!!",
        ];
        for name in names {
            let once = normalize_name(name);
            assert_eq!(normalize_name(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn empty_and_punctuation_only() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name(".,-'"), "");
    }
}
