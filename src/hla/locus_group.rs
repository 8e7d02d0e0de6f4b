//! HLA locus group classification
//!
//! Locus groups classify related gene loci: DR spans DRB1 together with the
//! DRB3/4/5 paralogs, DQ and DP each span an alpha and a beta gene. Each
//! group records which chains its gene products contribute and whether it
//! belongs to MHC class I or class II.

use crate::error::HlaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// MHC class of a locus group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocusClass {
    /// Class I (HLA-A, -B, -C)
    I,
    /// Class II (HLA-DR, -DQ, -DP)
    II,
}

impl fmt::Display for LocusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocusClass::I => write!(f, "I"),
            LocusClass::II => write!(f, "II"),
        }
    }
}

/// Gene-group classification for HLA loci
///
/// A closed set, built once: every locus belongs to at least one group, and
/// the DRB3/4/5 paralogs (plus the aggregate locus) additionally belong to
/// [`LocusGroup::Drb345`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocusGroup {
    A,
    B,
    C,
    Dr,
    Drb345,
    Dq,
    Dp,
}

impl LocusGroup {
    /// All groups, in nomenclature order
    pub const ALL: [LocusGroup; 7] = [
        LocusGroup::A,
        LocusGroup::B,
        LocusGroup::C,
        LocusGroup::Dr,
        LocusGroup::Drb345,
        LocusGroup::Dq,
        LocusGroup::Dp,
    ];

    /// Look up a group by its code, case-insensitively
    pub fn from_value(code: &str) -> crate::Result<Self> {
        match code.to_ascii_uppercase().as_str() {
            "A" => Ok(LocusGroup::A),
            "B" => Ok(LocusGroup::B),
            "C" => Ok(LocusGroup::C),
            "DR" => Ok(LocusGroup::Dr),
            "DRB345" => Ok(LocusGroup::Drb345),
            "DQ" => Ok(LocusGroup::Dq),
            "DP" => Ok(LocusGroup::Dp),
            _ => Err(HlaError::unknown_locus_group(code)),
        }
    }

    /// The group code as written in typing reports
    pub fn as_str(&self) -> &'static str {
        match self {
            LocusGroup::A => "A",
            LocusGroup::B => "B",
            LocusGroup::C => "C",
            LocusGroup::Dr => "DR",
            LocusGroup::Drb345 => "DRB345",
            LocusGroup::Dq => "DQ",
            LocusGroup::Dp => "DP",
        }
    }

    /// Whether gene products in this group contribute an alpha chain
    pub fn has_alpha(&self) -> bool {
        matches!(
            self,
            LocusGroup::A | LocusGroup::B | LocusGroup::C | LocusGroup::Dq | LocusGroup::Dp
        )
    }

    /// Whether gene products in this group contribute a beta chain
    pub fn has_beta(&self) -> bool {
        matches!(
            self,
            LocusGroup::Dr | LocusGroup::Drb345 | LocusGroup::Dq | LocusGroup::Dp
        )
    }

    /// MHC class of this group
    pub fn classification(&self) -> LocusClass {
        match self {
            LocusGroup::A | LocusGroup::B | LocusGroup::C => LocusClass::I,
            LocusGroup::Dr | LocusGroup::Drb345 | LocusGroup::Dq | LocusGroup::Dp => LocusClass::II,
        }
    }

    pub fn is_class_i(&self) -> bool {
        self.classification() == LocusClass::I
    }

    pub fn is_class_ii(&self) -> bool {
        self.classification() == LocusClass::II
    }
}

impl fmt::Display for LocusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
