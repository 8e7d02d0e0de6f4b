// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-hla: HLA typing nomenclature
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Parses textual HLA allele codes into structured, comparable value
//! objects, classifies the gene locus they belong to, and composes alleles
//! into haplotypes that support locus-keyed lookup and chromosome-pair
//! recombination (swap/crossover) operations.
//!
//! Validation is purely syntactic: an allele is checked against the
//! nomenclature grammar, not against a registry of specificities known to
//! exist.
//!
//! # Example
//!
//! ```
//! use ferro_hla::{parse_allele, parse_haplotype, Locus};
//!
//! // Parse an allele token
//! let allele = parse_allele("A*01:01:01").unwrap();
//! assert_eq!(allele.locus(), Locus::A);
//! assert_eq!(allele.display(), "A*01:01");
//!
//! // Build a haplotype and look alleles up by locus
//! let haplotype = parse_haplotype("A*01:01+B*08:01+DRB1*15:01").unwrap();
//! assert!(haplotype.has(Locus::Drb1));
//! println!("{haplotype}");
//! ```

pub mod error;
pub mod hla;
pub mod logging;
pub mod registry;

// Re-export commonly used types
pub use error::{ApiError, HlaError};
pub use hla::allele::{parse_allele, Allele};
pub use hla::haplotype::{parse_haplotype, Haplotype, LocusSource};
pub use hla::locus::{Locus, LocusChain};
pub use hla::locus_group::{LocusClass, LocusGroup};
pub use logging::{logger, logger_with_level, LogLevel, Logger};
pub use registry::instance_of;

/// Result type alias for ferro-hla operations
pub type Result<T> = std::result::Result<T, HlaError>;
