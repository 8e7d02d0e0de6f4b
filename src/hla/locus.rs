//! Concrete HLA gene loci
//!
//! Twelve loci are modeled. The DRB3/DRB4/DRB5 paralogs (and the aggregate
//! DRB345 locus) belong to both the DR group and the DRB345 group;
//! membership in the DRB345 group is the sole signal that routes an allele
//! into the shared DRB345 haplotype slot.

use crate::error::HlaError;
use crate::hla::locus_group::LocusGroup;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain type encoded by a locus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocusChain {
    Alpha,
    Beta,
}

impl fmt::Display for LocusChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocusChain::Alpha => write!(f, "ALPHA"),
            LocusChain::Beta => write!(f, "BETA"),
        }
    }
}

/// A concrete HLA gene locus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locus {
    A,
    B,
    C,
    Drb1,
    Drb3,
    Drb4,
    Drb5,
    /// Aggregate slot for the DRB3/4/5 paralogs: a chromosome carries at
    /// most one of the three genes
    Drb345,
    Dqb1,
    Dqa1,
    Dpb1,
    Dpa1,
}

impl Locus {
    /// All loci, in nomenclature order
    pub const ALL: [Locus; 12] = [
        Locus::A,
        Locus::B,
        Locus::C,
        Locus::Drb1,
        Locus::Drb3,
        Locus::Drb4,
        Locus::Drb5,
        Locus::Drb345,
        Locus::Dqb1,
        Locus::Dqa1,
        Locus::Dpb1,
        Locus::Dpa1,
    ];

    /// Look up a locus by code, case-insensitively
    pub fn from_value(code: &str) -> crate::Result<Self> {
        match code.to_ascii_uppercase().as_str() {
            "A" => Ok(Locus::A),
            "B" => Ok(Locus::B),
            "C" => Ok(Locus::C),
            "DRB1" => Ok(Locus::Drb1),
            "DRB3" => Ok(Locus::Drb3),
            "DRB4" => Ok(Locus::Drb4),
            "DRB5" => Ok(Locus::Drb5),
            "DRB345" => Ok(Locus::Drb345),
            "DQB1" => Ok(Locus::Dqb1),
            "DQA1" => Ok(Locus::Dqa1),
            "DPB1" => Ok(Locus::Dpb1),
            "DPA1" => Ok(Locus::Dpa1),
            _ => Err(HlaError::unknown_locus(code)),
        }
    }

    /// The locus code as written in typing reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Locus::A => "A",
            Locus::B => "B",
            Locus::C => "C",
            Locus::Drb1 => "DRB1",
            Locus::Drb3 => "DRB3",
            Locus::Drb4 => "DRB4",
            Locus::Drb5 => "DRB5",
            Locus::Drb345 => "DRB345",
            Locus::Dqb1 => "DQB1",
            Locus::Dqa1 => "DQA1",
            Locus::Dpb1 => "DPB1",
            Locus::Dpa1 => "DPA1",
        }
    }

    /// Groups this locus belongs to, in precedence order
    pub fn groups(&self) -> &'static [LocusGroup] {
        match self {
            Locus::A => &[LocusGroup::A],
            Locus::B => &[LocusGroup::B],
            Locus::C => &[LocusGroup::C],
            Locus::Drb1 => &[LocusGroup::Dr],
            Locus::Drb3 | Locus::Drb4 | Locus::Drb5 | Locus::Drb345 => {
                &[LocusGroup::Dr, LocusGroup::Drb345]
            }
            Locus::Dqb1 | Locus::Dqa1 => &[LocusGroup::Dq],
            Locus::Dpb1 | Locus::Dpa1 => &[LocusGroup::Dp],
        }
    }

    /// Chain type of the gene product
    pub fn chain(&self) -> LocusChain {
        match self {
            Locus::A | Locus::B | Locus::C | Locus::Dqa1 | Locus::Dpa1 => LocusChain::Alpha,
            Locus::Drb1
            | Locus::Drb3
            | Locus::Drb4
            | Locus::Drb5
            | Locus::Drb345
            | Locus::Dqb1
            | Locus::Dpb1 => LocusChain::Beta,
        }
    }

    /// Whether alleles at this locus aggregate into the DRB345 haplotype slot
    pub fn is_drb345(&self) -> bool {
        self.groups().contains(&LocusGroup::Drb345)
    }

    pub fn is_alpha(&self) -> bool {
        self.chain() == LocusChain::Alpha
    }

    pub fn is_beta(&self) -> bool {
        self.chain() == LocusChain::Beta
    }

    /// True if any associated group is class I
    pub fn is_class_i(&self) -> bool {
        self.groups().iter().any(|group| group.is_class_i())
    }

    /// True if any associated group is class II
    pub fn is_class_ii(&self) -> bool {
        self.groups().iter().any(|group| group.is_class_ii())
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value_is_case_insensitive() {
        assert_eq!(Locus::from_value("drb1").unwrap(), Locus::Drb1);
        assert_eq!(Locus::from_value("DqA1").unwrap(), Locus::Dqa1);
        assert!(Locus::from_value("B3").is_err());
        assert!(Locus::from_value("ZZ").is_err());
    }

    #[test]
    fn test_from_value_round_trips_all() {
        for locus in Locus::ALL {
            assert_eq!(Locus::from_value(locus.as_str()).unwrap(), locus);
        }
    }

    #[test]
    fn test_drb345_membership() {
        assert!(Locus::Drb3.is_drb345());
        assert!(Locus::Drb4.is_drb345());
        assert!(Locus::Drb5.is_drb345());
        assert!(Locus::Drb345.is_drb345());
        assert!(!Locus::Drb1.is_drb345());
        assert!(!Locus::A.is_drb345());
    }

    #[test]
    fn test_chain_assignments() {
        assert!(Locus::A.is_alpha());
        assert!(Locus::B.is_alpha());
        assert!(Locus::C.is_alpha());
        assert!(Locus::Dqa1.is_alpha());
        assert!(Locus::Dpa1.is_alpha());
        assert!(Locus::Drb1.is_beta());
        assert!(Locus::Drb345.is_beta());
        assert!(Locus::Dqb1.is_beta());
        assert!(Locus::Dpb1.is_beta());
    }

    #[test]
    fn test_classification() {
        assert!(Locus::A.is_class_i());
        assert!(!Locus::A.is_class_ii());
        assert!(Locus::Drb1.is_class_ii());
        assert!(!Locus::Drb1.is_class_i());
        assert!(Locus::Dqa1.is_class_ii());
        assert!(Locus::Dpb1.is_class_ii());
    }

    #[test]
    fn test_groups() {
        assert_eq!(Locus::Drb3.groups(), &[LocusGroup::Dr, LocusGroup::Drb345]);
        assert_eq!(Locus::Drb1.groups(), &[LocusGroup::Dr]);
        assert_eq!(Locus::A.groups(), &[LocusGroup::A]);
        for locus in Locus::ALL {
            assert!(!locus.groups().is_empty());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Locus::Drb345.to_string(), "DRB345");
        assert_eq!(Locus::Dqb1.to_string(), "DQB1");
    }
}
