use crate::core::prefix::Prefix;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  Search Results
-------------------------------------------------------------------------------------------------*/

/// Search results containing a map of found addresses to the prefixes that contain them, and the
/// set of addresses not found in the [PrefixList](crate::PrefixList).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SearchResults {
    /// Map of found addresses to the [Prefix] containing each address.
    pub matches: BTreeMap<IpAddr, Prefix>,

    /// Set of addresses not contained in any prefix.
    pub not_found: BTreeSet<IpAddr>,
}

impl SearchResults {
    /// Distinct prefixes that matched at least one searched address.
    pub fn matched_prefixes(&self) -> BTreeSet<Prefix> {
        self.matches.values().copied().collect()
    }

    /// Every searched address in address order, with its containing prefix or `None`.
    pub fn results(&self) -> BTreeMap<IpAddr, Option<Prefix>> {
        self.matches
            .iter()
            .map(|(address, prefix)| (*address, Some(*prefix)))
            .chain(self.not_found.iter().map(|address| (*address, None)))
            .collect()
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
