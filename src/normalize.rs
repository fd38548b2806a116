//! Filename normalization.
//!
//! Produces filesystem-safe stems for sorted files: Cyrillic letters are
//! transliterated to Latin sequences and every other non-alphanumeric
//! character becomes an underscore.

/// Normalizes a filename stem into a transliterated, filesystem-safe token.
///
/// The transform is a single pass over the original characters:
/// - a character with a transliteration mapping emits its Latin replacement
///   (the soft and hard signs emit nothing),
/// - any other alphanumeric character passes through unchanged,
/// - everything else becomes `_`.
///
/// Total for any input; an empty string normalizes to an empty string.
///
/// # Examples
///
/// ```
/// use dirsort::normalize::normalize;
///
/// assert_eq!(normalize("фото"), "foto");
/// assert_eq!(normalize("Щука"), "Shchuka");
/// assert_eq!(normalize("hello world!"), "hello_world_");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if let Some(mapped) = transliterate(ch) {
            out.push_str(mapped);
        } else if ch.is_alphanumeric() {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    out
}

/// Latin replacement for a Cyrillic letter, `None` for everything else.
///
/// Covers the Russian and Ukrainian alphabets. `Ъ`, `ъ`, `Ь` and `ь` map to
/// the empty string, i.e. they are dropped from the output.
fn transliterate(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        'А' => "A",
        'а' => "a",
        'Б' => "B",
        'б' => "b",
        'В' => "V",
        'в' => "v",
        'Г' => "G",
        'г' => "g",
        'Ґ' => "G",
        'ґ' => "g",
        'Д' => "D",
        'д' => "d",
        'Е' => "E",
        'е' => "e",
        'Є' => "Ye",
        'є' => "ye",
        'Ё' => "Yo",
        'ё' => "yo",
        'Ж' => "Zh",
        'ж' => "zh",
        'З' => "Z",
        'з' => "z",
        'И' => "I",
        'и' => "i",
        'І' => "I",
        'і' => "i",
        'Ї' => "Yi",
        'ї' => "yi",
        'Й' => "Y",
        'й' => "y",
        'К' => "K",
        'к' => "k",
        'Л' => "L",
        'л' => "l",
        'М' => "M",
        'м' => "m",
        'Н' => "N",
        'н' => "n",
        'О' => "O",
        'о' => "o",
        'П' => "P",
        'п' => "p",
        'Р' => "R",
        'р' => "r",
        'С' => "S",
        'с' => "s",
        'Т' => "T",
        'т' => "t",
        'У' => "U",
        'у' => "u",
        'Ф' => "F",
        'ф' => "f",
        'Х' => "Kh",
        'х' => "kh",
        'Ц' => "Ts",
        'ц' => "ts",
        'Ч' => "Ch",
        'ч' => "ch",
        'Ш' => "Sh",
        'ш' => "sh",
        'Щ' => "Shch",
        'щ' => "shch",
        'Ъ' => "",
        'ъ' => "",
        'Ы' => "Y",
        'ы' => "y",
        'Ь' => "",
        'ь' => "",
        'Э' => "E",
        'э' => "e",
        'Ю' => "Yu",
        'ю' => "yu",
        'Я' => "Ya",
        'я' => "ya",
        _ => return None,
    };
    Some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliterates_lowercase_cyrillic() {
        assert_eq!(normalize("фото"), "foto");
        assert_eq!(normalize("діло"), "dilo");
        assert_eq!(normalize("музика"), "muzika");
    }

    #[test]
    fn test_transliterates_digraphs() {
        assert_eq!(normalize("жук"), "zhuk");
        assert_eq!(normalize("Чайка"), "Chayka");
        assert_eq!(normalize("Щука"), "Shchuka");
        assert_eq!(normalize("Юхим"), "Yukhim");
    }

    #[test]
    fn test_soft_and_hard_signs_are_dropped() {
        assert_eq!(normalize("день"), "den");
        assert_eq!(normalize("объём"), "obyom");
    }

    #[test]
    fn test_non_alphanumeric_becomes_underscore() {
        assert_eq!(normalize("hello world!"), "hello_world_");
        assert_eq!(normalize("a-b.c"), "a_b_c");
        assert_eq!(normalize("зйомка-2023"), "zyomka_2023");
    }

    #[test]
    fn test_latin_and_digits_pass_through() {
        assert_eq!(normalize("report2024"), "report2024");
        assert_eq!(normalize("MixedCase"), "MixedCase");
    }

    #[test]
    fn test_transliteration_applies_to_original_characters() {
        // Cyrillic letters are alphanumeric, so they must never be turned
        // into underscores before the table is consulted.
        assert_eq!(normalize("річний звіт"), "richniy_zvit");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_idempotent_on_normalized_input() {
        for input in ["foto", "hello_world_", "zvit_2023", "a_b_c"] {
            assert_eq!(normalize(&normalize(input)), normalize(input));
        }
    }

    #[test]
    fn test_unmapped_alphabets_pass_through() {
        // Greek is alphanumeric but has no mapping, so it is kept as-is.
        assert_eq!(normalize("αβγ"), "αβγ");
    }
}
