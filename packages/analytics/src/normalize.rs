//! Department name normalization.
//!
//! Case exports and boundary files spell department names differently
//! ("Apurímac" vs "APURIMAC", sometimes with the accent stored as a
//! separate combining mark), so both sides are lower-cased and stripped of
//! Latin diacritics before joining. Letters outside the Latin-1 and
//! Latin Extended-A accent table pass through unchanged.

use std::ops::RangeInclusive;

/// Combining Diacritical Marks block.
const COMBINING_MARKS: RangeInclusive<char> = '\u{300}'..='\u{36f}';

/// Lower-cases `name`, strips diacritics, and trims whitespace.
#[must_use]
pub fn normalize_department(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .map(fold_char)
        .collect::<String>()
        .to_lowercase()
}

const fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'Á' | 'À' | 'Ä' | 'Â' | 'Ã' | 'Å' | 'Ā' | 'Ă' | 'Ą' => 'A',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => 'C',
        'é' | 'è' | 'ë' | 'ê' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'É' | 'È' | 'Ë' | 'Ê' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'í' | 'ì' | 'ï' | 'î' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'Í' | 'Ì' | 'Ï' | 'Î' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => 'I',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => 'N',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' | 'ō' | 'ŏ' | 'ő' => 'o',
        'Ó' | 'Ò' | 'Ö' | 'Ô' | 'Õ' | 'Ō' | 'Ŏ' | 'Ő' => 'O',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => 'S',
        'ú' | 'ù' | 'ü' | 'û' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'Ú' | 'Ù' | 'Ü' | 'Û' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' | 'Ÿ' => 'Y',
        'ź' | 'ż' | 'ž' => 'z',
        'Ź' | 'Ż' | 'Ž' => 'Z',
        other => other,
    }
}
