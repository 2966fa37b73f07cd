//! Genre normalization and umbrella-genre mapping
//!
//! Specific genre labels collapse onto a closed set of umbrella categories
//! through a static many-to-one table. Lookup keys are normalized; the
//! original label is kept for display.

use lazy_static::lazy_static;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Umbrella category for genres the table does not know
pub const OTHER_UMBRELLA: &str = "other";

/// Specific genre label -> umbrella category, raw table form
///
/// Keys are normalized through `normalize_genre_key` before lookup, so the
/// punctuation here ("avant-prog", "shibuya-kei") is cosmetic.
const GENRE_UMBRELLAS: &[(&str, &str)] = &[
    // rock
    ("acid rock", "rock"),
    ("alternative rock", "rock"),
    ("anatolian rock", "rock"),
    ("art rock", "rock"),
    ("avant-prog", "rock"),
    ("brutal prog", "rock"),
    ("canterbury scene", "rock"),
    ("garage rock", "rock"),
    ("garage rock revival", "rock"),
    ("gothic rock", "rock"),
    ("grunge", "rock"),
    ("hard rock", "rock"),
    ("indie", "rock"),
    ("indie rock", "rock"),
    ("industrial rock", "rock"),
    ("javanese tribal rock", "rock"),
    ("krautrock", "rock"),
    ("math rock", "rock"),
    ("neo-psychedelia", "rock"),
    ("new wave", "rock"),
    ("no wave", "rock"),
    ("noise rock", "rock"),
    ("pop rock", "rock"),
    ("post-britpop", "rock"),
    ("post-rock", "rock"),
    ("progressive rock", "rock"),
    ("proto-punk", "rock"),
    ("psychedelic rock", "rock"),
    ("raga rock", "rock"),
    ("rock in opposition", "rock"),
    ("rock opera", "rock"),
    ("shoegaze", "rock"),
    ("slacker rock", "rock"),
    ("slowcore", "rock"),
    ("space rock", "rock"),
    ("space rock revival", "rock"),
    ("symphonic prog", "rock"),
    ("symphonic rock", "rock"),
    ("yacht rock", "rock"),
    // punk
    ("art punk", "punk / hardcore"),
    ("emo", "punk / hardcore"),
    ("hardcore punk", "punk / hardcore"),
    ("midwest emo", "punk / hardcore"),
    ("post-hardcore", "punk / hardcore"),
    ("post-punk", "punk / hardcore"),
    ("post-punk revival", "punk / hardcore"),
    ("punk blues", "punk / hardcore"),
    ("stoner metal", "metal"),
    // jazz
    ("avant-garde jazz", "jazz"),
    ("chamber jazz", "jazz"),
    ("contemporary jazz", "jazz"),
    ("cool jazz", "jazz"),
    ("european free jazz", "jazz"),
    ("experimental big band", "jazz"),
    ("free improvisation", "jazz"),
    ("free jazz", "jazz"),
    ("hard bop", "jazz"),
    ("indo jazz", "jazz"),
    ("jazz funk", "jazz"),
    ("jazz fusion", "jazz"),
    ("jazz pop", "jazz"),
    ("jazz rock", "jazz"),
    ("modal jazz", "jazz"),
    ("post-bop", "jazz"),
    ("spiritual jazz", "jazz"),
    ("third stream", "jazz"),
    ("vocal jazz", "jazz"),
    // blues
    ("blues", "blues"),
    ("blues rock", "blues"),
    ("chicago blues", "blues"),
    ("electric blues", "blues"),
    // electronic
    ("acid techno", "electronic"),
    ("ambient techno", "electronic"),
    ("downtempo", "electronic"),
    ("drill and bass", "electronic"),
    ("dubstep", "electronic"),
    ("electronic", "electronic"),
    ("electronic dance music", "electronic"),
    ("electropop", "electronic"),
    ("future garage", "electronic"),
    ("glitch", "electronic"),
    ("glitch pop", "electronic"),
    ("house", "electronic"),
    ("idm", "electronic"),
    ("indietronica", "electronic"),
    ("industrial", "electronic"),
    ("microhouse", "electronic"),
    ("microsound", "electronic"),
    ("progressive electronic", "electronic"),
    ("synthpop", "electronic"),
    ("trip hop", "electronic"),
    // ambient
    ("ambient", "ambient"),
    ("ambient pop", "ambient"),
    ("dark ambient", "ambient"),
    ("drone", "ambient"),
    ("eai", "ambient"),
    ("onkyo", "ambient"),
    ("new age", "ambient"),
    ("space ambient", "ambient"),
    ("tribal ambient", "ambient"),
    // experimental
    ("avant-garde", "experimental / sound art"),
    ("data sonification", "experimental / sound art"),
    ("electroacoustic", "experimental / sound art"),
    ("experimental", "experimental / sound art"),
    ("field recordings", "experimental / sound art"),
    ("musique concrete", "experimental / sound art"),
    ("nature recordings", "experimental / sound art"),
    ("noise", "experimental / sound art"),
    ("sound collage", "experimental / sound art"),
    ("plunderphonics", "experimental / sound art"),
    ("tape music", "experimental / sound art"),
    ("turntable music", "experimental / sound art"),
    // country
    ("alt-country", "country / americana"),
    ("americana", "country / americana"),
    ("contemporary country", "country / americana"),
    ("progressive bluegrass", "country / americana"),
    // folk
    ("acoustic", "folk"),
    ("avant-folk", "folk"),
    ("chamber folk", "folk"),
    ("contemporary folk", "folk"),
    ("folk baroque", "folk"),
    ("folk rock", "folk"),
    ("folktronica", "folk"),
    ("freak folk", "folk"),
    ("indie folk", "folk"),
    ("neofolk", "folk"),
    ("progressive folk", "folk"),
    ("psychedelic folk", "folk"),
    ("wyrd folk", "folk"),
    // classical
    ("ballet", "classical"),
    ("carnatic classical music", "classical"),
    ("chamber music", "classical"),
    ("classical", "classical"),
    ("hindustani classical music", "classical"),
    ("microtonal classical", "classical"),
    ("minimalism", "classical"),
    ("modern classical", "classical"),
    ("post-minimalism", "classical"),
    ("totalism", "classical"),
    // pop
    ("a cappella", "pop"),
    ("art pop", "pop"),
    ("baroque pop", "pop"),
    ("chamber pop", "pop"),
    ("dark cabaret", "pop"),
    ("dream pop", "pop"),
    ("hypnagogic pop", "pop"),
    ("indie pop", "pop"),
    ("jangle pop", "pop"),
    ("math pop", "pop"),
    ("noise pop", "pop"),
    ("power pop", "pop"),
    ("progressive pop", "pop"),
    ("psychedelic pop", "pop"),
    ("shibuya-kei", "pop"),
    // funk / reggae
    ("funk", "funk / soul"),
    ("dub", "reggae"),
    ("reggae fusion", "reggae"),
    // world
    ("afrobeat", "world / traditional"),
    ("bossa nova", "world / traditional"),
    ("burmese stereo", "world / traditional"),
    ("gamelan", "world / traditional"),
    ("ghazal", "world / traditional"),
    ("griot music", "world / traditional"),
    ("jaipongan", "world / traditional"),
    ("klezmer", "world / traditional"),
    ("mande music", "world / traditional"),
    ("min yo", "world / traditional"),
    ("molam sing", "world / traditional"),
    ("qawwali", "world / traditional"),
    ("southeast asian folk music", "world / traditional"),
    // other
    ("spoken word", "spoken / vocal"),
];

lazy_static! {
    static ref NORMALIZED_UMBRELLAS: HashMap<String, &'static str> = GENRE_UMBRELLAS
        .iter()
        .map(|(label, umbrella)| (normalize_genre_key(label), *umbrella))
        .collect();
}

/// Normalize a genre label into its lookup key
///
/// Lowercase, NFD-decompose, strip combining marks, `&` -> " and ",
/// collapse every run of non-alphanumerics to a single space, trim.
/// Total: any input yields a (possibly empty) key, never an error.
pub fn normalize_genre_key(value: &str) -> String {
    let stripped: String = value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    collapse_non_alphanumeric(&stripped.replace('&', " and "))
}

/// Umbrella category for a genre label, "other" when unmapped
pub fn umbrella_for(genre: &str) -> &'static str {
    NORMALIZED_UMBRELLAS
        .get(normalize_genre_key(genre).as_str())
        .copied()
        .unwrap_or(OTHER_UMBRELLA)
}

/// Group genre labels under their umbrellas, both levels sorted alphabetically
pub fn group_by_umbrella(genres: &[String]) -> Vec<(String, Vec<String>)> {
    let mut grouped: HashMap<&'static str, Vec<String>> = HashMap::new();
    for genre in genres {
        grouped
            .entry(umbrella_for(genre))
            .or_default()
            .push(genre.clone());
    }
    let mut out: Vec<(String, Vec<String>)> = grouped
        .into_iter()
        .map(|(umbrella, mut members)| {
            members.sort_by_key(|g| g.to_lowercase());
            (umbrella.to_string(), members)
        })
        .collect();
    out.sort_by_key(|(umbrella, _)| umbrella.to_lowercase());
    out
}

pub(crate) fn collapse_non_alphanumeric(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_space = false;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_genre_key() {
        assert_eq!(normalize_genre_key("Avant-Prog"), "avant prog");
        assert_eq!(normalize_genre_key("R&B"), "r and b");
        assert_eq!(normalize_genre_key("  Musique Concrète "), "musique concrete");
        assert_eq!(normalize_genre_key(""), "");
        assert_eq!(normalize_genre_key("!!!"), "");
    }

    #[test]
    fn test_umbrella_lookup() {
        assert_eq!(umbrella_for("Krautrock"), "rock");
        assert_eq!(umbrella_for("avant-prog"), "rock");
        assert_eq!(umbrella_for("Musique Concrète"), "experimental / sound art");
        assert_eq!(umbrella_for("free jazz"), "jazz");
    }

    #[test]
    fn test_umbrella_total_for_any_input() {
        assert_eq!(umbrella_for(""), OTHER_UMBRELLA);
        assert_eq!(umbrella_for("polka-死"), OTHER_UMBRELLA);
        assert_eq!(umbrella_for("completely made up genre"), OTHER_UMBRELLA);
        assert_eq!(umbrella_for("\u{0301}\u{0302}"), OTHER_UMBRELLA);
    }

    #[test]
    fn test_group_by_umbrella() {
        let genres = vec![
            "krautrock".to_string(),
            "free jazz".to_string(),
            "hard bop".to_string(),
            "unknown thing".to_string(),
        ];
        let grouped = group_by_umbrella(&genres);
        let names: Vec<&str> = grouped.iter().map(|(u, _)| u.as_str()).collect();
        assert_eq!(names, vec!["jazz", "other", "rock"]);
        assert_eq!(grouped[0].1, vec!["free jazz", "hard bop"]);
    }
}
