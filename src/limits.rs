//! Limits and constraints for grammar loading
//!
//! This module defines limits that bound the work done on a single input so
//! that oversized or pathologically nested documents fail early.

use crate::error::{Error, Result};

/// Loading limits configuration
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum input size in bytes
    pub max_xml_size: usize,

    /// Maximum element nesting depth
    pub max_xml_depth: usize,

    /// Maximum number of nodes in the grammar model
    pub max_grammar_nodes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_xml_size: 100 * 1024 * 1024, // 100 MB
            max_xml_depth: 1000,
            max_grammar_nodes: 1_000_000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_xml_size: 10 * 1024 * 1024, // 10 MB
            max_xml_depth: 100,
            max_grammar_nodes: 100_000,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_xml_size: 1024 * 1024 * 1024, // 1 GB
            max_xml_depth: 10_000,
            max_grammar_nodes: 100_000_000,
        }
    }

    /// Check if the input size is within limits
    pub fn check_xml_size(&self, size: usize) -> Result<()> {
        if size > self.max_xml_size {
            Err(Error::LimitExceeded(format!(
                "XML size {} bytes exceeds maximum {} bytes",
                size, self.max_xml_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if the nesting depth is within limits
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_xml_depth {
            Err(Error::LimitExceeded(format!(
                "XML depth {} exceeds maximum {}",
                depth, self.max_xml_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if the number of grammar nodes is within limits
    pub fn check_grammar_nodes(&self, count: usize) -> Result<()> {
        if count > self.max_grammar_nodes {
            Err(Error::LimitExceeded(format!(
                "Grammar node count {} exceeds maximum {}",
                count, self.max_grammar_nodes
            )))
        } else {
            Ok(())
        }
    }
}
