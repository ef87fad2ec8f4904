//! # Pattern Compiler
//!
//! Turns identifying names into anchored regular expressions and compresses
//! patterns that differ only in their digit runs.
//!
//! ## Ordering
//!
//! Consumers try patterns in row order, so more specific names must come
//! first: longer names before shorter ones, and among equally long names
//! the one with fewer wildcards first. Ties keep arrival order.
//!
//! ## Compression
//!
//! Every maximal run of decimal digits in a pattern is a *slot*. Replacing
//! each slot with `(\d+)` gives the pattern's skeleton; patterns sharing a
//! skeleton form a [`CompressionGroup`]:
//!
//! ```text
//!   ^Chrome/61\.0.*$  ┐
//!   ^Chrome/62\.0.*$  ├──►  ^Chrome/(\d+)\.0.*$  { "@61": 4, "@62": 7, "@63": 9 }
//!   ^Chrome/63\.0.*$  ┘
//! ```
//!
//! Slots holding the same value in every member are folded back into the
//! skeleton (`\.0` above); the rest make up each member's variant key.
//! Groups of one or two members are not worth a nested table and collapse
//! to a single pattern → row mapping.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::cmp::Reverse;

pub const CAPTURE_SLOT: &str = r"(\d+)";
pub const VARIANT_MARKER: char = '@';
pub const VARIANT_DELIMITER: &str = "|";

/// Backslash escapes are matched first so their digits never count as runs.
static ESCAPE_OR_DIGITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\x[0-9A-Fa-f]{0,2}|\\.|[0-9]+").expect("static regex must compile")
});

pub fn has_wildcard(name: &str) -> bool {
    name.contains(['*', '?'])
}

/// Sort key placing more specific names first.
pub fn ordering_key(name: &str) -> (Reverse<usize>, Reverse<usize>) {
    let stripped = name.chars().filter(|c| !matches!(c, '*' | '?')).count();
    (Reverse(name.len()), Reverse(stripped))
}

fn flush_literal(pattern: &mut String, literal: &mut String) {
    if !literal.is_empty() {
        pattern.push_str(&regex::escape(literal));
        literal.clear();
    }
}

/// The `xHH` following a backslash, if the two hex digits are really there.
fn hex_escape(mut rest: impl Iterator<Item = char>) -> Option<String> {
    let x = rest.next().filter(|c| *c == 'x')?;
    let hi = rest.next().filter(char::is_ascii_hexdigit)?;
    let lo = rest.next().filter(char::is_ascii_hexdigit)?;
    Some([x, hi, lo].iter().collect())
}

/// Builds the anchored expression for an identifying name.
///
/// `*` matches any sequence, `?` any single character. A `\xHH` byte
/// escape is kept as-is; any other backslash is a literal character.
pub fn to_pattern(name: &str) -> String {
    let mut pattern = String::with_capacity(name.len() + 8);
    let mut literal = String::new();
    pattern.push('^');

    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                flush_literal(&mut pattern, &mut literal);
                pattern.push_str(".*");
            }
            '?' => {
                flush_literal(&mut pattern, &mut literal);
                pattern.push('.');
            }
            '\\' => match hex_escape(chars.clone()) {
                Some(escape) => {
                    flush_literal(&mut pattern, &mut literal);
                    pattern.push('\\');
                    pattern.push_str(&escape);
                    chars.nth(escape.len() - 1);
                }
                None => literal.push(c),
            },
            _ => literal.push(c),
        }
    }

    flush_literal(&mut pattern, &mut literal);
    pattern.push('$');
    pattern
}

/// A pattern split around its digit runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitScan {
    pub skeleton: String,
    pub runs: Vec<String>,
}

/// Finds the digit runs of a pattern, or `None` when it has none.
pub fn scan_digits(pattern: &str) -> Option<DigitScan> {
    let mut skeleton = String::with_capacity(pattern.len());
    let mut runs = Vec::new();
    let mut last = 0;

    for found in ESCAPE_OR_DIGITS.find_iter(pattern) {
        if !found.as_str().starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        skeleton.push_str(&pattern[last..found.start()]);
        skeleton.push_str(CAPTURE_SLOT);
        runs.push(found.as_str().to_string());
        last = found.end();
    }

    if runs.is_empty() {
        return None;
    }
    skeleton.push_str(&pattern[last..]);
    Some(DigitScan { skeleton, runs })
}

/// How one pattern table key maps to rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternEntry {
    /// A pattern without digit runs.
    Ungrouped { pattern: String, index: usize },
    /// A group too small to be worth a variant table.
    Collapsed { first_pattern: String, index: usize },
    Grouped {
        skeleton: String,
        variants: Vec<(String, usize)>,
    },
}

/// The value stored under a pattern table key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PatternTarget {
    Index(usize),
    Variants(IndexMap<String, usize>),
}

impl PatternEntry {
    pub fn key(&self) -> &str {
        match self {
            PatternEntry::Ungrouped { pattern, .. } => pattern,
            PatternEntry::Collapsed { first_pattern, .. } => first_pattern,
            PatternEntry::Grouped { skeleton, .. } => skeleton,
        }
    }

    pub fn into_table_entry(self) -> (String, PatternTarget) {
        match self {
            PatternEntry::Ungrouped { pattern, index } => (pattern, PatternTarget::Index(index)),
            PatternEntry::Collapsed {
                first_pattern,
                index,
            } => (first_pattern, PatternTarget::Index(index)),
            PatternEntry::Grouped { skeleton, variants } => {
                (skeleton, PatternTarget::Variants(variants.into_iter().collect()))
            }
        }
    }
}

/// Patterns sharing one skeleton, in arrival order.
#[derive(Debug, Clone)]
pub struct CompressionGroup {
    skeleton: String,
    first_pattern: String,
    members: Vec<(usize, Vec<String>)>,
}

impl CompressionGroup {
    fn new(skeleton: String, first_pattern: String) -> Self {
        Self {
            skeleton,
            first_pattern,
            members: Vec::new(),
        }
    }

    fn push(&mut self, index: usize, runs: Vec<String>) {
        self.members.push((index, runs));
    }

    pub fn finish(self) -> PatternEntry {
        if self.members.len() <= 2 {
            // With two members the first member's pattern points at the
            // second member's row. Downstream artifacts depend on it.
            let index = self.members.last().map(|(index, _)| *index).unwrap_or_default();
            return PatternEntry::Collapsed {
                first_pattern: self.first_pattern,
                index,
            };
        }

        let (_, first_runs) = &self.members[0];
        let constant: Vec<bool> = (0..first_runs.len())
            .map(|slot| {
                self.members
                    .iter()
                    .all(|(_, runs)| runs[slot] == first_runs[slot])
            })
            .collect();

        let mut skeleton = String::with_capacity(self.skeleton.len());
        for (slot, piece) in self.skeleton.split(CAPTURE_SLOT).enumerate() {
            if slot > 0 {
                if constant[slot - 1] {
                    skeleton.push_str(&first_runs[slot - 1]);
                } else {
                    skeleton.push_str(CAPTURE_SLOT);
                }
            }
            skeleton.push_str(piece);
        }

        let variants = self
            .members
            .into_iter()
            .map(|(index, runs)| {
                let varying: Vec<String> = runs
                    .into_iter()
                    .zip(&constant)
                    .filter(|(_, fixed)| !**fixed)
                    .map(|(run, _)| run)
                    .collect();
                let key = format!("{}{}", VARIANT_MARKER, varying.join(VARIANT_DELIMITER));
                (key, index)
            })
            .collect();

        PatternEntry::Grouped { skeleton, variants }
    }
}

/// Collects patterns in row order and groups them by skeleton.
#[derive(Debug, Default)]
pub struct PatternCompressor {
    ungrouped: Vec<PatternEntry>,
    groups: IndexMap<String, CompressionGroup>,
}

impl PatternCompressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, index: usize, pattern: String) {
        let Some(scan) = scan_digits(&pattern) else {
            self.ungrouped.push(PatternEntry::Ungrouped { pattern, index });
            return;
        };
        self.groups
            .entry(scan.skeleton.clone())
            .or_insert_with(|| CompressionGroup::new(scan.skeleton, pattern))
            .push(index, scan.runs);
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn finish(self) -> Vec<PatternEntry> {
        let mut entries = self.ungrouped;
        entries.extend(self.groups.into_values().map(CompressionGroup::finish));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compress(patterns: &[&str]) -> Vec<PatternEntry> {
        let mut compressor = PatternCompressor::new();
        for (index, pattern) in patterns.iter().enumerate() {
            compressor.add(index, pattern.to_string());
        }
        compressor.finish()
    }

    #[test]
    fn test_wildcard_name_sorts_before_plain_name() {
        let mut names = vec!["AB", "A*B"];
        names.sort_by_key(|name| ordering_key(name));
        assert_eq!(names, vec!["A*B", "AB"]);
    }

    #[test]
    fn test_fewer_wildcards_first_at_equal_length() {
        let mut names = vec!["A**B", "AB*C", "ABCD"];
        names.sort_by_key(|name| ordering_key(name));
        assert_eq!(names, vec!["ABCD", "AB*C", "A**B"]);
    }

    #[test]
    fn test_ordering_is_stable() {
        let mut names = vec!["B*", "A?", "C*"];
        names.sort_by_key(|name| ordering_key(name));
        assert_eq!(names, vec!["B*", "A?", "C*"]);
    }

    #[test]
    fn test_to_pattern_escapes_and_expands_wildcards() {
        assert_eq!(
            to_pattern("Mozilla/5.0 (*) Chrome/6?.0*"),
            r"^Mozilla/5\.0 \(.*\) Chrome/6.\.0.*$"
        );
        assert_eq!(to_pattern("*"), "^.*$");
    }

    #[test]
    fn test_to_pattern_keeps_hex_escapes() {
        assert_eq!(to_pattern(r"Caf\xE9*"), r"^Caf\xE9.*$");
    }

    #[test]
    fn test_incomplete_hex_escape_is_literal() {
        assert_eq!(to_pattern(r"Foo\xZ"), r"^Foo\\xZ$");
        assert_eq!(to_pattern(r"Foo\x"), r"^Foo\\x$");
        assert_eq!(to_pattern(r"Foo\x4"), r"^Foo\\x4$");
        for name in [r"Foo\xZ", r"Foo\x", r"Foo\x4*"] {
            let re = Regex::new(&to_pattern(name)).unwrap();
            assert!(re.is_match(&name.replace('*', "")));
        }
    }

    #[test]
    fn test_patterns_match_what_they_describe() {
        let re = Regex::new(&to_pattern("Mozilla/5.0 (*; Pixel 2 Build/*) Chrome/62.0*")).unwrap();
        assert!(re.is_match("Mozilla/5.0 (Linux; Android 8.1; Pixel 2 Build/OPM1) Chrome/62.0.3202"));
        assert!(!re.is_match("Mozilla/5.0 (Linux; Pixel 3 Build/X) Chrome/62.0"));
    }

    #[test]
    fn test_scan_digits_finds_maximal_runs() {
        let scan = scan_digits(r"^Chrome/62\.0.*$").unwrap();
        assert_eq!(scan.skeleton, r"^Chrome/(\d+)\.(\d+).*$");
        assert_eq!(scan.runs, vec!["62", "0"]);
        assert!(scan_digits(r"^.*Feedfetcher-Google.*$").is_none());
    }

    #[test]
    fn test_scan_digits_skips_escape_sequences() {
        let scan = scan_digits(r"^Caf\xE9 10$").unwrap();
        assert_eq!(scan.skeleton, r"^Caf\xE9 (\d+)$");
        assert_eq!(scan.runs, vec!["10"]);
    }

    #[test]
    fn test_three_member_group_folds_constant_slots() {
        let entries = compress(&[r"^A12/34$", r"^A12/56$", r"^A12/78$"]);
        assert_eq!(
            entries,
            vec![PatternEntry::Grouped {
                skeleton: r"^A12/(\d+)$".to_string(),
                variants: vec![
                    ("@34".to_string(), 0),
                    ("@56".to_string(), 1),
                    ("@78".to_string(), 2),
                ],
            }]
        );
    }

    #[test]
    fn test_variant_keys_join_varying_slots() {
        let entries = compress(&[r"^A1\.2x9$", r"^A1\.3x8$", r"^A1\.4x7$"]);
        let PatternEntry::Grouped { skeleton, variants } = &entries[0] else {
            panic!("expected a grouped entry");
        };
        assert_eq!(skeleton, r"^A1\.(\d+)x(\d+)$");
        assert_eq!(variants[0], ("@2|9".to_string(), 0));
        assert_eq!(variants[2], ("@4|7".to_string(), 2));
    }

    #[test]
    fn test_quirk_two_member_group_maps_first_pattern_to_second_row() {
        let entries = compress(&[r"^Chrome/61$", r"^Chrome/62$"]);
        assert_eq!(
            entries,
            vec![PatternEntry::Collapsed {
                first_pattern: r"^Chrome/61$".to_string(),
                index: 1,
            }]
        );
    }

    #[test]
    fn test_single_member_group_maps_to_itself() {
        let entries = compress(&[r"^.*$", r"^Googlebot/2\.1.*$"]);
        assert_eq!(
            entries,
            vec![
                PatternEntry::Ungrouped {
                    pattern: "^.*$".to_string(),
                    index: 0
                },
                PatternEntry::Collapsed {
                    first_pattern: r"^Googlebot/2\.1.*$".to_string(),
                    index: 1
                },
            ]
        );
    }

    #[test]
    fn test_table_entry_shapes() {
        let (key, target) = PatternEntry::Grouped {
            skeleton: "s".into(),
            variants: vec![("@2".into(), 5), ("@1".into(), 6)],
        }
        .into_table_entry();
        assert_eq!(key, "s");
        assert_eq!(
            serde_json::to_string(&target).unwrap(),
            r#"{"@2":5,"@1":6}"#
        );
        let (_, target) = PatternEntry::Ungrouped {
            pattern: "p".into(),
            index: 3,
        }
        .into_table_entry();
        assert_eq!(serde_json::to_string(&target).unwrap(), "3");
    }
}
