//! LaTeX escape decoding and encoding.
//!
//! BibTeX field values carry accents and special letters as LaTeX escapes
//! (`{\'e}`, `\"{o}`, `\c{c}`, `{\ss}`). [`decode`] turns them into Unicode;
//! [`encode`] applies the reverse substitution. Both use the same fixed
//! tables keyed by escape command and base letter.

use std::borrow::Cow;
use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// (command, base letter, Unicode result) for accent commands.
const ACCENTS: &[(char, char, char)] = &[
    ('\'', 'a', 'á'), ('\'', 'e', 'é'), ('\'', 'i', 'í'), ('\'', 'o', 'ó'),
    ('\'', 'u', 'ú'), ('\'', 'y', 'ý'), ('\'', 'c', 'ć'), ('\'', 'n', 'ń'),
    ('\'', 's', 'ś'), ('\'', 'z', 'ź'), ('\'', 'A', 'Á'), ('\'', 'E', 'É'),
    ('\'', 'I', 'Í'), ('\'', 'O', 'Ó'), ('\'', 'U', 'Ú'), ('\'', 'Y', 'Ý'),
    ('\'', 'C', 'Ć'), ('\'', 'N', 'Ń'), ('\'', 'S', 'Ś'), ('\'', 'Z', 'Ź'),
    ('`', 'a', 'à'), ('`', 'e', 'è'), ('`', 'i', 'ì'), ('`', 'o', 'ò'),
    ('`', 'u', 'ù'), ('`', 'A', 'À'), ('`', 'E', 'È'), ('`', 'I', 'Ì'),
    ('`', 'O', 'Ò'), ('`', 'U', 'Ù'),
    ('^', 'a', 'â'), ('^', 'e', 'ê'), ('^', 'i', 'î'), ('^', 'o', 'ô'),
    ('^', 'u', 'û'), ('^', 'A', 'Â'), ('^', 'E', 'Ê'), ('^', 'I', 'Î'),
    ('^', 'O', 'Ô'), ('^', 'U', 'Û'),
    ('"', 'a', 'ä'), ('"', 'e', 'ë'), ('"', 'i', 'ï'), ('"', 'o', 'ö'),
    ('"', 'u', 'ü'), ('"', 'y', 'ÿ'), ('"', 'A', 'Ä'), ('"', 'E', 'Ë'),
    ('"', 'I', 'Ï'), ('"', 'O', 'Ö'), ('"', 'U', 'Ü'), ('"', 'Y', 'Ÿ'),
    ('~', 'a', 'ã'), ('~', 'n', 'ñ'), ('~', 'o', 'õ'), ('~', 'A', 'Ã'),
    ('~', 'N', 'Ñ'), ('~', 'O', 'Õ'),
    ('=', 'a', 'ā'), ('=', 'e', 'ē'), ('=', 'i', 'ī'), ('=', 'o', 'ō'),
    ('=', 'u', 'ū'), ('=', 'A', 'Ā'), ('=', 'E', 'Ē'), ('=', 'I', 'Ī'),
    ('=', 'O', 'Ō'), ('=', 'U', 'Ū'),
    ('.', 'e', 'ė'), ('.', 'z', 'ż'), ('.', 'E', 'Ė'), ('.', 'Z', 'Ż'),
    ('.', 'I', 'İ'),
    ('u', 'a', 'ă'), ('u', 'g', 'ğ'), ('u', 'A', 'Ă'), ('u', 'G', 'Ğ'),
    ('v', 'c', 'č'), ('v', 'd', 'ď'), ('v', 'e', 'ě'), ('v', 'n', 'ň'),
    ('v', 'r', 'ř'), ('v', 's', 'š'), ('v', 't', 'ť'), ('v', 'z', 'ž'),
    ('v', 'C', 'Č'), ('v', 'D', 'Ď'), ('v', 'E', 'Ě'), ('v', 'N', 'Ň'),
    ('v', 'R', 'Ř'), ('v', 'S', 'Š'), ('v', 'T', 'Ť'), ('v', 'Z', 'Ž'),
    ('H', 'o', 'ő'), ('H', 'u', 'ű'), ('H', 'O', 'Ő'), ('H', 'U', 'Ű'),
    ('c', 'c', 'ç'), ('c', 's', 'ş'), ('c', 't', 'ţ'), ('c', 'C', 'Ç'),
    ('c', 'S', 'Ş'), ('c', 'T', 'Ţ'),
    ('k', 'a', 'ą'), ('k', 'e', 'ę'), ('k', 'A', 'Ą'), ('k', 'E', 'Ę'),
    ('r', 'u', 'ů'), ('r', 'U', 'Ů'),
];

/// Special letters written as bare commands (`{\ss}`, `\o`).
const LETTERS: &[(&str, char)] = &[
    ("ss", 'ß'), ("ae", 'æ'), ("AE", 'Æ'), ("oe", 'œ'), ("OE", 'Œ'),
    ("aa", 'å'), ("AA", 'Å'), ("o", 'ø'), ("O", 'Ø'), ("l", 'ł'),
    ("L", 'Ł'), ("i", 'ı'), ("j", 'ȷ'),
];

/// Characters that BibTeX requires to be backslash-escaped.
const SYMBOLS: &[char] = &['&', '%', '#'];

lazy_static! {
    static ref ACCENT_RE: Regex = Regex::new(concat!(
        r"(\{)?\\(?:",
        r#"([`'^"~=.])\s*(?:\{(\\?[A-Za-z])\}|(\\?[A-Za-z]))"#,
        r"|([uvHckr])(?:\s*\{(\\?[A-Za-z])\}|\s+([A-Za-z]))",
        r")(\})?"
    ))
    .unwrap();
    static ref LETTER_RE: Regex =
        Regex::new(r"(\{)?\\(ss|ae|AE|oe|OE|aa|AA|o|O|l|L|i|j)\b(?:\{\}|\s)?(\})?").unwrap();
    static ref SYMBOL_RE: Regex = Regex::new(r"\\([&%#])").unwrap();

    static ref ACCENT_TABLE: HashMap<(char, char), char> =
        ACCENTS.iter().map(|&(cmd, base, out)| ((cmd, base), out)).collect();
    static ref LETTER_TABLE: HashMap<&'static str, char> = LETTERS.iter().copied().collect();

    /// Unicode character to its canonical escape.
    static ref ENCODE_TABLE: HashMap<char, String> = {
        let mut table = HashMap::new();
        for &(name, ch) in LETTERS {
            table.entry(ch).or_insert_with(|| format!("{{\\{name}}}"));
        }
        for &(cmd, base, ch) in ACCENTS {
            let escape = if cmd.is_ascii_alphabetic() {
                format!("{{\\{cmd}{{{base}}}}}")
            } else {
                format!("{{\\{cmd}{base}}}")
            };
            table.entry(ch).or_insert(escape);
        }
        table
    };
}

/// Re-attach a brace the pattern consumed without its partner.
fn rebalance(caps: &Captures<'_>, open: usize, close: usize, replacement: char) -> String {
    match (caps.get(open).is_some(), caps.get(close).is_some()) {
        (true, false) => format!("{{{replacement}"),
        (false, true) => format!("{replacement}}}"),
        _ => replacement.to_string(),
    }
}

fn base_letter(raw: &str) -> Option<char> {
    raw.trim_start_matches('\\').chars().next()
}

/// Convert LaTeX escapes to Unicode.
///
/// Unknown escapes are left untouched.
///
/// # Examples
///
/// ```
/// use bibo_bridge::latex;
///
/// assert_eq!(latex::decode(r#"G{\"o}del"#), "Gödel");
/// assert_eq!(latex::decode(r"Fran\c{c}ois"), "François");
/// assert_eq!(latex::decode(r"Stra{\ss}e"), "Straße");
/// ```
#[must_use]
pub fn decode(input: &str) -> String {
    if !input.contains('\\') {
        return input.to_string();
    }

    let accents = ACCENT_RE.replace_all(input, |caps: &Captures<'_>| {
        let (cmd, base) = match caps.get(2) {
            Some(cmd) => (cmd, caps.get(3).or_else(|| caps.get(4))),
            None => match caps.get(5) {
                Some(cmd) => (cmd, caps.get(6).or_else(|| caps.get(7))),
                None => return caps[0].to_string(),
            },
        };
        let key = cmd
            .as_str()
            .chars()
            .next()
            .zip(base.and_then(|b| base_letter(b.as_str())));
        match key.and_then(|k| ACCENT_TABLE.get(&k)) {
            Some(&ch) => rebalance(caps, 1, 8, ch),
            None => caps[0].to_string(),
        }
    });

    let letters = LETTER_RE.replace_all(&accents, |caps: &Captures<'_>| {
        match LETTER_TABLE.get(&caps[2]) {
            Some(&ch) => rebalance(caps, 1, 3, ch),
            None => caps[0].to_string(),
        }
    });

    let symbols: Cow<'_, str> = SYMBOL_RE.replace_all(&letters, "$1");
    symbols.into_owned()
}

/// Convert Unicode characters that have a table entry back to LaTeX escapes.
///
/// # Examples
///
/// ```
/// use bibo_bridge::latex;
///
/// assert_eq!(latex::encode("Gödel & Co"), r#"G{\"o}del \& Co"#);
/// ```
#[must_use]
pub fn encode(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        if SYMBOLS.contains(&ch) {
            output.push('\\');
            output.push(ch);
        } else if let Some(escape) = ENCODE_TABLE.get(&ch) {
            output.push_str(escape);
        } else {
            output.push(ch);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_accent_forms() {
        assert_eq!(decode(r"{\'e}"), "é");
        assert_eq!(decode(r"\'{e}"), "é");
        assert_eq!(decode(r"\'e"), "é");
        assert_eq!(decode(r"{\'{e}}"), "é");
        assert_eq!(decode(r"Caf\'e au lait"), "Café au lait");
        assert_eq!(decode(r#"Schr\"odinger"#), "Schrödinger");
        assert_eq!(decode(r"\'{\i}"), "í");
    }

    #[test]
    fn test_decode_letter_commands_need_separator() {
        assert_eq!(decode(r"\c{c}"), "ç");
        assert_eq!(decode(r"\c c"), "ç");
        assert_eq!(decode(r"{\v{S}}koda"), "Škoda");
        assert_eq!(decode(r"Erd\H{o}s"), "Erdős");
        // macros that merely start with an accent letter are untouched
        assert_eq!(decode(r"\cite{x}"), r"\cite{x}");
        assert_eq!(decode(r"\url{http://a.b}"), r"\url{http://a.b}");
    }

    #[test]
    fn test_decode_special_letters() {
        assert_eq!(decode(r"Stra{\ss}e"), "Straße");
        assert_eq!(decode(r"Stra\ss e"), "Straße");
        assert_eq!(decode(r"{\O}rsted"), "Ørsted");
        assert_eq!(decode(r#"{\AA}ngstr{\"o}m"#), "Ångström");
        assert_eq!(decode(r"\oe uvre"), "œuvre");
        assert_eq!(decode(r"\ldots"), r"\ldots");
    }

    #[test]
    fn test_decode_keeps_unmatched_braces() {
        assert_eq!(decode(r"{caf\'e}"), "{café}");
        assert_eq!(decode(r"{\'e t\'e}"), "{é té}");
    }

    #[test]
    fn test_decode_symbols() {
        assert_eq!(decode(r"Smith \& Sons"), "Smith & Sons");
        assert_eq!(decode(r"50\% off"), "50% off");
    }

    #[test]
    fn test_decode_unknown_escape_untouched() {
        assert_eq!(decode(r"\'q"), r"\'q");
        assert_eq!(decode("plain text"), "plain text");
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode("é"), r"{\'e}");
        assert_eq!(encode("ç"), r"{\c{c}}");
        assert_eq!(encode("ß"), r"{\ss}");
        assert_eq!(encode("å"), r"{\aa}");
        assert_eq!(encode("R&D 100%"), r"R\&D 100\%");
        assert_eq!(encode("plain"), "plain");
    }

    #[test]
    fn test_every_table_entry_survives_encode_then_decode() {
        for &(_, _, ch) in ACCENTS {
            let s = ch.to_string();
            assert_eq!(decode(&encode(&s)), s, "accent {ch}");
        }
        for &(_, ch) in LETTERS {
            let s = ch.to_string();
            assert_eq!(decode(&encode(&s)), s, "letter {ch}");
        }
    }
}
