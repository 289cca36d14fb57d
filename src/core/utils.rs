use std::sync::OnceLock;

use regex::Regex;

/// Unicode blocks treated as Chinese characters (inclusive code point ranges).
pub const CJK_RANGES: &[(u32, u32)] = &[
    (0x4E00, 0x9FFF),   // CJK Unified Ideographs
    (0x3400, 0x4DBF),   // Extension A
    (0x20000, 0x2A6DF), // Extension B
    (0x2A700, 0x2B73F), // Extension C
    (0x2B740, 0x2B81F), // Extension D
    (0x2B820, 0x2CEAF), // Extension E
];

pub fn is_cjk(c: char) -> bool {
    let code_point = c as u32;
    CJK_RANGES.iter().any(|&(low, high)| (low..=high).contains(&code_point))
}

fn cjk_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let class: String = CJK_RANGES
            .iter()
            .map(|(low, high)| format!("\\x{{{:X}}}-\\x{{{:X}}}", low, high))
            .collect();
        Regex::new(&format!("[{}]+", class)).expect("CJK character class is a valid pattern")
    })
}

pub trait CjkText {
    /// Maximal runs of consecutive CJK characters.
    fn cjk_runs(&self) -> Vec<&str>;

    /// Characters that take part in alignment matching: punctuation and whitespace
    /// are never spoken, so only alphanumeric code points are kept.
    fn alignment_key(&self) -> Vec<char>;
}

impl CjkText for str {
    fn cjk_runs(&self) -> Vec<&str> {
        cjk_run_regex().find_iter(self).map(|m| m.as_str()).collect()
    }

    fn alignment_key(&self) -> Vec<char> {
        self.chars().filter(|c| c.is_alphanumeric()).collect()
    }
}

impl CjkText for String {
    fn cjk_runs(&self) -> Vec<&str> {
        self.as_str().cjk_runs()
    }

    fn alignment_key(&self) -> Vec<char> {
        self.as_str().alignment_key()
    }
}

/// First index at or after `from` where `needle` occurs contiguously in `haystack`.
pub fn find_from<T: PartialEq>(haystack: &[T], needle: &[T], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..].windows(needle.len()).position(|window| window == needle).map(|pos| pos + from)
}

/// Dictionary definitions often end with stray separators ("to eat; ").
pub fn clean_definition(definition: &str) -> &str {
    definition.trim_end_matches(|c: char| c.is_whitespace() || c == ';')
}
