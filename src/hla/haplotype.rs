//! Haplotype collection semantics
//!
//! A haplotype holds at most one allele per locus slot. The DRB3/4/5
//! paralogs share the single DRB345 slot, since a chromosome carries at
//! most one of the three genes, so a later DRB-sub-locus allele displaces
//! an earlier one. All mutation-like operations return new haplotypes; the
//! receiver is never altered.

use crate::error::HlaError;
use crate::hla::allele::Allele;
use crate::hla::locus::Locus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Slot key an allele is stored under: DRB3/4/5 aggregate to the DRB345
/// slot, every other locus keys itself
fn storage_key(locus: Locus) -> Locus {
    if locus.is_drb345() {
        Locus::Drb345
    } else {
        locus
    }
}

/// Identifies a locus slot for haplotype queries
///
/// Implemented for [`Locus`] and for raw code strings. String resolution
/// panics on unknown codes: passing an unresolvable code is API misuse,
/// not malformed external input.
pub trait LocusSource {
    /// Resolve to the concrete locus
    ///
    /// # Panics
    ///
    /// The string implementations panic when the code is not a known locus.
    fn resolve(&self) -> Locus;
}

impl LocusSource for Locus {
    fn resolve(&self) -> Locus {
        *self
    }
}

impl LocusSource for &str {
    fn resolve(&self) -> Locus {
        match Locus::from_value(self) {
            Ok(locus) => locus,
            Err(err) => panic!("{err}"),
        }
    }
}

impl LocusSource for String {
    fn resolve(&self) -> Locus {
        self.as_str().resolve()
    }
}

/// An immutable, locus-keyed collection of alleles
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Allele>", into = "Vec<Allele>")]
pub struct Haplotype {
    entries: Vec<Allele>,
}

impl Haplotype {
    /// Build a haplotype from alleles in iteration order
    ///
    /// When two alleles normalize to the same slot the later one wins,
    /// keeping the slot's original position.
    pub fn new(alleles: impl IntoIterator<Item = Allele>) -> Self {
        let mut haplotype = Self {
            entries: Vec::new(),
        };
        for allele in alleles {
            haplotype.insert(allele);
        }
        haplotype
    }

    fn insert(&mut self, allele: Allele) {
        let key = storage_key(allele.locus());
        let slot = self
            .entries
            .iter()
            .position(|existing| storage_key(existing.locus()) == key);
        match slot {
            Some(index) => self.entries[index] = allele,
            None => self.entries.push(allele),
        }
    }

    /// The stored alleles, in slot insertion order
    pub fn alleles(&self) -> &[Allele] {
        &self.entries
    }

    /// Iterate over the stored alleles
    pub fn iter(&self) -> std::slice::Iter<'_, Allele> {
        self.entries.iter()
    }

    /// Allele at the slot `locus` resolves to, aggregating DRB3/4/5
    /// queries onto the DRB345 slot
    pub fn get<L: LocusSource>(&self, locus: L) -> Option<&Allele> {
        self.lookup(locus.resolve(), false)
    }

    /// Allele at the slot `locus` resolves to, additionally requiring (for
    /// DRB345-group queries) that the stored allele's own locus equals the
    /// queried one
    pub fn get_exact<L: LocusSource>(&self, locus: L) -> Option<&Allele> {
        self.lookup(locus.resolve(), true)
    }

    fn lookup(&self, locus: Locus, exact: bool) -> Option<&Allele> {
        let key = storage_key(locus);
        let candidate = self
            .entries
            .iter()
            .find(|allele| storage_key(allele.locus()) == key)?;
        if key == Locus::Drb345 && exact && candidate.locus() != locus {
            return None;
        }
        Some(candidate)
    }

    /// Whether the slot `locus` resolves to holds an allele
    pub fn has<L: LocusSource>(&self, locus: L) -> bool {
        self.get(locus).is_some()
    }

    /// [`has`](Self::has) with the exact-locus requirement of
    /// [`get_exact`](Self::get_exact)
    pub fn has_exact<L: LocusSource>(&self, locus: L) -> bool {
        self.get_exact(locus).is_some()
    }

    /// Copy with `allele` stored at the slot `locus` resolves to
    ///
    /// Refuses mismatched slots: when the allele's own slot differs from
    /// the requested one, an unchanged copy is returned.
    pub fn set<L: LocusSource>(&self, locus: L, allele: Allele) -> Haplotype {
        let key = storage_key(locus.resolve());
        if key != storage_key(allele.locus()) {
            return self.clone();
        }
        let mut next = self.clone();
        next.insert(allele);
        next
    }

    /// Exchange the alleles at `locus` between `self` and `other`
    ///
    /// Returns unchanged copies of both when either side lacks an allele at
    /// the slot; there is no partial swap.
    pub fn swap<L: LocusSource>(&self, other: &Haplotype, locus: L) -> (Haplotype, Haplotype) {
        let locus = locus.resolve();
        let (Some(first), Some(second)) = (self.get(locus), other.get(locus)) else {
            return (self.clone(), other.clone());
        };
        let (first, second) = (first.clone(), second.clone());
        (self.set(locus, second), other.set(locus, first))
    }

    /// Apply [`swap`](Self::swap) for each locus in order, threading the
    /// evolving pair forward to model a multi-locus crossover
    pub fn swap_all<L: LocusSource>(
        &self,
        other: &Haplotype,
        loci: &[L],
    ) -> (Haplotype, Haplotype) {
        let mut pair = (self.clone(), other.clone());
        for locus in loci {
            pair = pair.0.swap(&pair.1, locus.resolve());
        }
        pair
    }

    /// Merge two haplotypes; shared slots resolve to `other`'s entry
    pub fn concat(&self, other: &Haplotype) -> Haplotype {
        Self::new(self.entries.iter().chain(other.entries.iter()).cloned())
    }
}

impl FromStr for Haplotype {
    type Err = HlaError;

    /// Parse a `+`-delimited haplotype, failing fast on the first malformed
    /// token; blank tokens are skipped
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut alleles = Vec::new();
        for token in text.split('+') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            alleles.push(token.parse::<Allele>()?);
        }
        Ok(Self::new(alleles))
    }
}

impl fmt::Display for Haplotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for allele in &self.entries {
            if !first {
                write!(f, "+")?;
            }
            write!(f, "{allele}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<Vec<Allele>> for Haplotype {
    fn from(alleles: Vec<Allele>) -> Self {
        Self::new(alleles)
    }
}

impl From<Haplotype> for Vec<Allele> {
    fn from(haplotype: Haplotype) -> Self {
        haplotype.entries
    }
}

impl FromIterator<Allele> for Haplotype {
    fn from_iter<I: IntoIterator<Item = Allele>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl IntoIterator for Haplotype {
    type Item = Allele;
    type IntoIter = std::vec::IntoIter<Allele>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Haplotype {
    type Item = &'a Allele;
    type IntoIter = std::slice::Iter<'a, Allele>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Parse a `+`-delimited haplotype string
///
/// # Example
///
/// ```
/// use ferro_hla::{parse_haplotype, Locus};
///
/// let haplotype = parse_haplotype("A*01:01+B*08:01").unwrap();
/// assert_eq!(haplotype.alleles().len(), 2);
/// assert_eq!(haplotype.get(Locus::A).unwrap().to_string(), "A*01:01");
/// ```
pub fn parse_haplotype(text: &str) -> crate::Result<Haplotype> {
    text.parse()
}
