//! HLA nomenclature types and parser
//!
//! This module contains the locus classification hierarchy (locus group,
//! class, chain, locus), the allele value type with its string grammar,
//! and the locus-keyed haplotype collection.

pub mod allele;
pub mod haplotype;
pub mod locus;
pub mod locus_group;

// Re-export commonly used types
pub use allele::{parse_allele, Allele};
pub use haplotype::{parse_haplotype, Haplotype, LocusSource};
pub use locus::{Locus, LocusChain};
pub use locus_group::{LocusClass, LocusGroup};
