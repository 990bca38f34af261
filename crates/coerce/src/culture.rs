//! Locale conventions for number and date text.

use std::borrow::Cow;
use std::fmt;

/// Order of the day, month and year fields in short date text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DateOrder {
    /// `month/day/year`
    Mdy,
    /// `day/month/year`
    Dmy,
    /// `year/month/day`
    Ymd,
}

/// Formatting conventions used when parsing and rendering text.
///
/// Only the conventions coercion needs are modelled: separators and the
/// short date layout. Use one of the presets or [`Culture::new`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Culture {
    name: Cow<'static, str>,
    decimal_separator: char,
    group_separator: char,
    date_order: DateOrder,
    date_separator: char,
}

impl Culture {
    /// Culture-neutral conventions: `.` decimals, `,` grouping, `MM/dd/yyyy`.
    pub const INVARIANT: Self = Self::preset("", '.', ',', DateOrder::Mdy, '/');

    const fn preset(
        name: &'static str,
        decimal_separator: char,
        group_separator: char,
        date_order: DateOrder,
        date_separator: char,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            decimal_separator,
            group_separator,
            date_order,
            date_separator,
        }
    }

    pub fn new(
        name: impl Into<Cow<'static, str>>,
        decimal_separator: char,
        group_separator: char,
        date_order: DateOrder,
        date_separator: char,
    ) -> Self {
        Self {
            name: name.into(),
            decimal_separator,
            group_separator,
            date_order,
            date_separator,
        }
    }

    pub const fn invariant() -> Self {
        Self::INVARIANT
    }

    pub const fn en_us() -> Self {
        Self::preset("en-US", '.', ',', DateOrder::Mdy, '/')
    }

    pub const fn en_gb() -> Self {
        Self::preset("en-GB", '.', ',', DateOrder::Dmy, '/')
    }

    pub const fn de_de() -> Self {
        Self::preset("de-DE", ',', '.', DateOrder::Dmy, '.')
    }

    pub const fn fr_fr() -> Self {
        Self::preset("fr-FR", ',', ' ', DateOrder::Dmy, '/')
    }

    pub const fn ja_jp() -> Self {
        Self::preset("ja-JP", '.', ',', DateOrder::Ymd, '/')
    }

    /// Looks up a preset by tag, ignoring case. `""` and `"invariant"`
    /// select the invariant culture; `_` is accepted in place of `-`.
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = name.trim().replace('_', "-");
        let found = match tag.to_ascii_lowercase().as_str() {
            "" | "invariant" => Self::invariant(),
            "en-us" => Self::en_us(),
            "en-gb" => Self::en_gb(),
            "de-de" => Self::de_de(),
            "fr-fr" => Self::fr_fr(),
            "ja-jp" => Self::ja_jp(),
            _ => return None,
        };
        Some(found)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub const fn group_separator(&self) -> char {
        self.group_separator
    }

    pub const fn date_order(&self) -> DateOrder {
        self.date_order
    }

    pub const fn date_separator(&self) -> char {
        self.date_separator
    }

    /// Rewrites culture number text into the form Rust's parsers accept.
    ///
    /// Surrounding whitespace is trimmed and the decimal separator becomes
    /// `.`. Group separators are dropped.
    pub fn normalize_number(&self, text: &str) -> String {
        self.normalize(text, true)
    }

    /// Like [`normalize_number`](Self::normalize_number) but keeps group
    /// separators in place, so grouped text fails to parse as an integer.
    pub fn normalize_integer(&self, text: &str) -> String {
        self.normalize(text, false)
    }

    fn normalize(&self, text: &str, allow_grouping: bool) -> String {
        text.trim()
            .chars()
            .filter(|c| !(allow_grouping && self.is_group_separator(*c)))
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect()
    }

    fn is_group_separator(&self, c: char) -> bool {
        c == self.group_separator
            || (self.group_separator == ' ' && matches!(c, '\u{a0}' | '\u{202f}'))
    }

    /// Replaces the `.` of Rust-rendered number text with this culture's
    /// decimal separator.
    pub fn localize_number(&self, text: &str) -> String {
        if self.decimal_separator == '.' {
            text.to_owned()
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }

    /// `chrono` format string of the short date layout, e.g. `%d.%m.%Y`.
    pub fn date_pattern(&self) -> String {
        let sep = self.date_separator;
        match self.date_order {
            DateOrder::Mdy => format!("%m{sep}%d{sep}%Y"),
            DateOrder::Dmy => format!("%d{sep}%m{sep}%Y"),
            DateOrder::Ymd => format!("%Y{sep}%m{sep}%d"),
        }
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::INVARIANT
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            f.write_str("invariant")
        } else {
            f.write_str(&self.name)
        }
    }
}
