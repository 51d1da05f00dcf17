//! Printer selection: `all` or a comma-separated list of ids

use std::str::FromStr;

use itertools::Itertools;

use crate::domain::{DomainError, DomainResult, Fleet, PrinterProfile};

/// Token selecting every configured printer.
pub const ALL_TOKEN: &str = "all";

/// Parsed selector expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Every printer, in config order
    All,
    /// Explicit ids, in the order the user gave them (may contain repeats)
    Ids(Vec<u32>),
}

impl Selector {
    /// Parse a selector expression.
    ///
    /// Empty chunks are skipped, so `1,,2` selects printers 1 and 2.
    pub fn parse(expr: &str) -> DomainResult<Self> {
        let expr = expr.trim();
        if expr.eq_ignore_ascii_case(ALL_TOKEN) {
            return Ok(Selector::All);
        }

        let ids = expr
            .split(',')
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| {
                chunk
                    .parse::<u32>()
                    .map_err(|_| DomainError::InvalidPrinterId(chunk.to_string()))
            })
            .collect::<DomainResult<Vec<_>>>()?;

        if ids.is_empty() {
            return Err(DomainError::EmptySelection);
        }
        Ok(Selector::Ids(ids))
    }

    /// Resolve against the fleet.
    ///
    /// Repeated ids collapse onto their first occurrence. Every id missing from
    /// the fleet is reported at once.
    pub fn resolve<'a>(&self, fleet: &'a Fleet) -> DomainResult<Selection<'a>> {
        let printers: Vec<&PrinterProfile> = match self {
            Selector::All => fleet.iter().collect(),
            Selector::Ids(ids) => {
                let missing: Vec<u32> = ids
                    .iter()
                    .copied()
                    .filter(|id| !fleet.contains(*id))
                    .unique()
                    .collect();
                if !missing.is_empty() {
                    return Err(DomainError::UnknownPrinters(missing));
                }
                ids.iter()
                    .copied()
                    .unique()
                    .filter_map(|id| fleet.get(id))
                    .collect()
            }
        };

        if printers.is_empty() {
            return Err(DomainError::EmptySelection);
        }
        Ok(Selection { printers })
    }
}

impl FromStr for Selector {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

/// Ordered, duplicate-free set of printers chosen for one invocation.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    printers: Vec<&'a PrinterProfile>,
}

impl<'a> Selection<'a> {
    pub fn printers(&self) -> &[&'a PrinterProfile] {
        &self.printers
    }

    pub fn ids(&self) -> Vec<u32> {
        self.printers.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.printers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.printers.is_empty()
    }
}
