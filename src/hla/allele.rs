//! HLA allele parsing and derivation
//!
//! An allele token is either one of the word tokens for a negative or
//! missing typing result, or `<LOCUS>*<SPECIFICITY>` where the locus is one
//! of the twelve known codes (or a `B3`/`B4`/`B5` alias for the DRB
//! paralogs) and the specificity is a colon-separated field sequence:
//! two-or-more digits, then either a single MAC code field (two-or-more
//! letters) or further numeric fields, the last of which may carry a
//! single-letter expression suffix.
//!
//! ```text
//! A*01:01:01    three-field typing at locus A
//! A*01:AB       MAC (multiple allele code) ambiguity
//! B*44:02N      null-expressed variant
//! B3*02:01      DRB3 via its reporting alias
//! NEGATIVE      negative result, carried in the DRB345 slot
//! ```

use crate::error::HlaError;
use crate::hla::locus::Locus;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Word tokens reporting a negative typing result
const NEGATIVE_SPECIFICITIES: [&str; 2] = ["NEGATIVO", "NEGATIVE"];

/// Word tokens reporting that no result is available
const MISSING_SPECIFICITIES: [&str; 2] = ["AUSENTE", "MISSING"];

/// Specificity grammar. The MAC alternative admits exactly one alphabetic
/// field directly after the allelic group; the numeric alternative admits
/// any number of two-or-more-digit fields with an optional single trailing
/// letter on the last.
static SPECIFICITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2,}(?:(?::[A-Za-z]{2,})|(?::\d{2,}[A-Za-z]?)*)$").unwrap()
});

fn is_negative_token(normalized: &str) -> bool {
    NEGATIVE_SPECIFICITIES.contains(&normalized)
}

fn is_missing_token(normalized: &str) -> bool {
    MISSING_SPECIFICITIES.contains(&normalized)
}

fn is_valid_specificity(specificity: &str) -> bool {
    let normalized = specificity.to_ascii_uppercase();
    normalized == "?"
        || is_negative_token(&normalized)
        || is_missing_token(&normalized)
        || SPECIFICITY_RE.is_match(specificity)
}

/// Reporting aliases accepted for the DRB3/4/5 loci in allele tokens
fn locus_alias(code: &str) -> Option<Locus> {
    match code {
        "B3" => Some(Locus::Drb3),
        "B4" => Some(Locus::Drb4),
        "B5" => Some(Locus::Drb5),
        _ => None,
    }
}

/// Short display alias for DRB345-group loci; the aggregate locus itself
/// renders without a prefix
fn drb_alias(locus: Locus) -> Option<&'static str> {
    match locus {
        Locus::Drb3 => Some("B3"),
        Locus::Drb4 => Some("B4"),
        Locus::Drb5 => Some("B5"),
        Locus::Drb345 => Some(""),
        _ => None,
    }
}

fn parse_locus_code(code: &str) -> crate::Result<Locus> {
    let normalized = code.to_ascii_uppercase();
    if let Ok(locus) = Locus::from_value(&normalized) {
        return Ok(locus);
    }
    locus_alias(&normalized).ok_or_else(|| HlaError::unknown_locus(normalized))
}

/// Split an allele token into its locus code and specificity.
///
/// Negative/missing word tokens synthesize the DRB345 locus code with the
/// upper-cased token as specificity; every other token must contain `*`.
/// The specificity substring is taken verbatim from the input.
fn split_allele(token: &str) -> crate::Result<(String, String)> {
    let normalized = token.trim().to_ascii_uppercase();
    if is_negative_token(&normalized) || is_missing_token(&normalized) {
        return Ok(("DRB345".to_string(), normalized));
    }

    match token.split_once('*') {
        Some((locus, specificity)) => Ok((locus.to_string(), specificity.to_string())),
        None => Err(HlaError::missing_separator(token)),
    }
}

/// A parsed, validated HLA allele
///
/// Immutable: every transforming operation returns a new value, so alleles
/// can be shared freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Allele {
    locus: Locus,
    specificity: String,
    field_count: usize,
    mac_code: Option<String>,
    display_field_count: usize,
    suffix: Option<char>,
}

impl Allele {
    /// Default number of fields shown by the display truncation rules
    pub const DEFAULT_DISPLAY_FIELDS: usize = 2;

    /// Build an allele from a locus and specificity, deriving the field
    /// count, MAC code and suffix from the specificity.
    ///
    /// # Panics
    ///
    /// Panics when the specificity fails the allele grammar. Use
    /// [`parse_allele`] or [`str::parse`] for untrusted input.
    pub fn new(locus: Locus, specificity: impl Into<String>) -> Self {
        let specificity = specificity.into();
        let field_count = Self::field_count_of(&specificity);
        let mac_code = Self::mac_code_of(&specificity);
        let suffix = Self::suffix_of(&specificity);
        Self::from_parts(
            locus,
            specificity,
            field_count,
            mac_code,
            Self::DEFAULT_DISPLAY_FIELDS,
            suffix,
        )
    }

    fn from_parts(
        locus: Locus,
        specificity: String,
        field_count: usize,
        mac_code: Option<String>,
        display_field_count: usize,
        suffix: Option<char>,
    ) -> Self {
        assert!(
            is_valid_specificity(&specificity),
            "Invalid specificity: {specificity}"
        );
        Self {
            locus,
            specificity,
            field_count,
            mac_code,
            display_field_count,
            suffix,
        }
    }

    // ------------------------------------------------------------------
    // Static extraction helpers, usable without constructing an allele
    // ------------------------------------------------------------------

    /// Locus portion of an allele token, before locus resolution
    pub fn extract_locus_str(token: &str) -> crate::Result<String> {
        split_allele(token).map(|(locus, _)| locus)
    }

    /// Resolved locus of an allele token
    pub fn extract_locus(token: &str) -> crate::Result<Locus> {
        Self::extract_locus_str(token).and_then(|code| parse_locus_code(&code))
    }

    /// Specificity portion of an allele token
    pub fn extract_specificity(token: &str) -> crate::Result<String> {
        split_allele(token).map(|(_, specificity)| specificity)
    }

    /// Number of colon-separated fields in a specificity
    pub fn field_count_of(specificity: &str) -> usize {
        specificity.split(':').count()
    }

    /// MAC (multiple allele code) of a specificity, if present: an
    /// all-alphabetic final field of two or more letters, upper-cased
    pub fn mac_code_of(specificity: &str) -> Option<String> {
        let last = specificity.split(':').next_back()?;
        if last.len() >= 2 && last.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(last.to_ascii_uppercase())
        } else {
            None
        }
    }

    /// Expression suffix of a specificity, if present: a single trailing
    /// letter on a numeric final field of three or more characters
    pub fn suffix_of(specificity: &str) -> Option<char> {
        let last = specificity.split(':').next_back()?;
        let all_alpha = last.chars().all(|c| c.is_ascii_alphabetic());
        let trailing = last.chars().next_back()?;
        if last.len() >= 3 && !all_alpha && trailing.is_ascii_alphabetic() {
            Some(trailing.to_ascii_uppercase())
        } else {
            None
        }
    }

    /// Whether a token parses as a well-formed allele
    pub fn is_valid(token: &str) -> bool {
        let Ok((locus_code, specificity)) = split_allele(token) else {
            return false;
        };
        parse_locus_code(&locus_code).is_ok() && is_valid_specificity(&specificity)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn locus(&self) -> Locus {
        self.locus
    }

    pub fn specificity(&self) -> &str {
        &self.specificity
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    pub fn mac_code(&self) -> Option<&str> {
        self.mac_code.as_deref()
    }

    pub fn display_field_count(&self) -> usize {
        self.display_field_count
    }

    pub fn suffix(&self) -> Option<char> {
        self.suffix
    }

    // ------------------------------------------------------------------
    // Derived predicates
    // ------------------------------------------------------------------

    pub fn has_mac_code(&self) -> bool {
        self.mac_code
            .as_deref()
            .is_some_and(|code| !code.trim().is_empty())
    }

    pub fn has_suffix(&self) -> bool {
        self.suffix.is_some()
    }

    pub fn is_drb345(&self) -> bool {
        self.locus.is_drb345()
    }

    /// Whether this allele reports a negative typing result
    pub fn is_negative(&self) -> bool {
        is_negative_token(&self.specificity.to_ascii_uppercase())
    }

    /// Whether this allele reports that no result is available
    pub fn is_missing(&self) -> bool {
        self.specificity.trim().is_empty()
            || is_missing_token(&self.specificity.to_ascii_uppercase())
    }

    pub fn is_class_i(&self) -> bool {
        self.locus.is_class_i()
    }

    pub fn is_class_ii(&self) -> bool {
        self.locus.is_class_ii()
    }

    /// First-field rendering of the full allele (e.g. `A*01`)
    pub fn allelic_group(&self) -> String {
        self.with_display_field_count(1).display_with(true, false)
    }

    /// Null-expressed variant (`N` suffix)
    pub fn is_null(&self) -> bool {
        self.suffix == Some('N')
    }

    /// Low-expressed variant (`L` suffix)
    pub fn is_low(&self) -> bool {
        self.suffix == Some('L')
    }

    /// Questionable-expression variant (`Q` suffix)
    pub fn is_questionable(&self) -> bool {
        self.suffix == Some('Q')
    }

    /// Single-field typing
    pub fn is_low_resolution(&self) -> bool {
        self.field_count == 1
    }

    /// Two fields with a MAC ambiguity code
    pub fn is_mid_resolution(&self) -> bool {
        self.field_count == 2 && self.has_mac_code()
    }

    /// Two or more fields without a MAC code
    pub fn is_high_resolution(&self) -> bool {
        self.field_count >= 2 && !self.has_mac_code()
    }

    // ------------------------------------------------------------------
    // Display
    // ------------------------------------------------------------------

    /// Truncate `source` to the display field count. Suffixed alleles pass
    /// through untruncated unless forced; `keep_suffix` re-appends the
    /// suffix after truncation.
    fn reduce(&self, source: &str, force_truncate: bool, keep_suffix: bool) -> String {
        if !force_truncate && self.has_suffix() {
            return source.to_string();
        }
        let reduced = source
            .split(':')
            .take(self.display_field_count)
            .collect::<Vec<_>>()
            .join(":");
        match self.suffix {
            Some(suffix) if keep_suffix => format!("{reduced}{suffix}"),
            _ => reduced,
        }
    }

    /// Render the allele, applying the display truncation rules
    pub fn display(&self) -> String {
        self.display_with(false, false)
    }

    /// Render the allele with explicit truncation control
    pub fn display_with(&self, force_truncate: bool, keep_suffix: bool) -> String {
        self.reduce(&self.to_string(), force_truncate, keep_suffix)
    }

    /// Render the specificity alone, prefixed with the `B3`/`B4`/`B5`
    /// reporting alias when the locus has one
    pub fn display_specificity(&self) -> String {
        self.display_specificity_with(false, false)
    }

    /// [`display_specificity`](Self::display_specificity) with explicit
    /// truncation control
    pub fn display_specificity_with(&self, force_truncate: bool, keep_suffix: bool) -> String {
        let reduced = self.reduce(&self.specificity, force_truncate, keep_suffix);
        if !self.is_drb345() {
            return reduced;
        }
        match drb_alias(self.locus) {
            Some(alias) if !alias.is_empty() => format!("{alias}*{reduced}"),
            _ => reduced,
        }
    }

    // ------------------------------------------------------------------
    // Comparison and transforms
    // ------------------------------------------------------------------

    /// Whether this allele subsumes `other`: true when this allele's full
    /// string extends the other's, i.e. a higher-resolution typing contains
    /// the lower-resolution prefix. MAC-coded alleles on either side never
    /// certify containment.
    pub fn contains(&self, other: &Allele) -> bool {
        if self.has_mac_code() || other.has_mac_code() {
            return false;
        }
        self.to_string().starts_with(&other.to_string())
    }

    /// [`contains`](Self::contains) against a raw token, propagating its
    /// parse failure
    pub fn contains_str(&self, other: &str) -> crate::Result<bool> {
        Ok(self.contains(&other.parse::<Allele>()?))
    }

    /// Copy with a different display field count
    pub fn with_display_field_count(&self, display_field_count: usize) -> Allele {
        Self::from_parts(
            self.locus,
            self.specificity.clone(),
            self.field_count,
            self.mac_code.clone(),
            display_field_count,
            self.suffix,
        )
    }

    /// Copy with the expression suffix stripped from the specificity
    ///
    /// Suffix removal strips the trailing character of the last field and
    /// never changes the field split, so the stored field count carries
    /// over unchanged.
    pub fn without_suffix(&self) -> Allele {
        if !self.has_suffix() {
            return self.clone();
        }
        let mut specificity = self.specificity.clone();
        specificity.pop();
        Self::from_parts(
            self.locus,
            specificity,
            self.field_count,
            self.mac_code.clone(),
            self.display_field_count,
            None,
        )
    }

    /// Downgrade to at most `n_field` fields, keeping any suffix
    ///
    /// See [`as_resolution_with`](Self::as_resolution_with).
    pub fn as_resolution(&self, n_field: usize) -> Allele {
        self.as_resolution_with(n_field, true)
    }

    /// Downgrade the typing resolution to at most `n_field` fields
    ///
    /// Resolution can only be lowered: when `n_field` is at or above the
    /// current field count the allele is returned unchanged. The MAC code
    /// is re-derived from the truncated specificity, the suffix carries
    /// over only when `keep_suffix` is set, and the display field count is
    /// clamped to `n_field`.
    ///
    /// # Panics
    ///
    /// Panics when `n_field` is zero.
    pub fn as_resolution_with(&self, n_field: usize, keep_suffix: bool) -> Allele {
        assert!(n_field >= 1, "n_field must be >= 1");
        if n_field > self.field_count {
            return self.clone();
        }
        let specificity = self
            .specificity
            .split(':')
            .take(n_field)
            .collect::<Vec<_>>()
            .join(":");
        let mac_code = Self::mac_code_of(&specificity);
        let suffix = if keep_suffix { self.suffix } else { None };
        Self::from_parts(
            self.locus,
            specificity,
            n_field,
            mac_code,
            self.display_field_count.min(n_field),
            suffix,
        )
    }
}

impl FromStr for Allele {
    type Err = HlaError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (locus_code, specificity) = split_allele(token)?;
        let locus = parse_locus_code(&locus_code)?;
        if !is_valid_specificity(&specificity) {
            return Err(HlaError::invalid_specificity(specificity));
        }
        let field_count = Self::field_count_of(&specificity);
        let mac_code = Self::mac_code_of(&specificity);
        let suffix = Self::suffix_of(&specificity);
        Ok(Self::from_parts(
            locus,
            specificity,
            field_count,
            mac_code,
            Self::DEFAULT_DISPLAY_FIELDS,
            suffix,
        ))
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}", self.locus, self.specificity)
    }
}

/// Parse an allele token
///
/// # Example
///
/// ```
/// use ferro_hla::{parse_allele, Locus};
///
/// let allele = parse_allele("B3*02:01").unwrap();
/// assert_eq!(allele.locus(), Locus::Drb3);
/// assert_eq!(allele.display_specificity(), "B3*02:01");
/// ```
pub fn parse_allele(token: &str) -> crate::Result<Allele> {
    token.parse()
}
