use crate::core::address_family::AddressFamily;
use crate::core::errors::{ListResult, PrefixListError};
use crate::core::prefix::{normalize_addr, Prefix};
use crate::core::search_results::SearchResults;
use log::{debug, trace};
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  Prefix List
-------------------------------------------------------------------------------------------------*/

/// A list of normalized [Prefix] values stored in one contiguous vector and queried by binary
/// search. Suited to large, static prefix sets: build it with [PrefixList::append], finalize it
/// once with [PrefixList::sort] or [PrefixList::sort_and_merge], then query it with
/// [PrefixList::contains] and [PrefixList::lookup].
///
/// IPv4 prefixes are stored in their IPv4-mapped IPv6 form, so IPv4 and IPv6 prefixes share one
/// ordering and one list.
///
/// ```
/// use cidrlist::PrefixList;
/// use std::net::IpAddr;
///
/// let mut list = PrefixList::new();
/// list.append("10.0.0.0/8").unwrap();
/// list.append("2001:db8::/32").unwrap();
/// list.sort();
///
/// let addr: IpAddr = "10.1.2.3".parse().unwrap();
/// assert_eq!(list.lookup(addr).unwrap().unwrap().to_string(), "10.0.0.0/8");
/// assert!(!list.contains("192.168.0.1".parse::<IpAddr>().unwrap()).unwrap());
/// ```
///
/// Appending takes `&mut self` and every query takes `&self`, so a finalized list can be shared
/// between threads for reading without further synchronization.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PrefixList {
    prefixes: Vec<Prefix>,
    finalized: bool,
}

/*--------------------------------------------------------------------------------------
  Prefix List Implementation
--------------------------------------------------------------------------------------*/

impl PrefixList {
    /// Create an empty, unfinalized list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty, unfinalized list with room for `capacity` prefixes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            prefixes: Vec::with_capacity(capacity),
            finalized: false,
        }
    }

    /*-------------------------------------------------------------------------
      Append
    -------------------------------------------------------------------------*/

    /// Normalize and append a prefix. Accepts a [Prefix], an [ipnetwork::IpNetwork] (or its
    /// V4/V6 variants), an `(IpAddr, u8)` pair, or a CIDR string.
    ///
    /// Appending marks the list as unfinalized; call [PrefixList::sort] or
    /// [PrefixList::sort_and_merge] again before querying. An invalid prefix returns
    /// [PrefixListError::InvalidPrefix] and leaves the list untouched.
    pub fn append<P>(&mut self, prefix: P) -> ListResult<()>
    where
        P: TryInto<Prefix>,
        PrefixListError: From<P::Error>,
    {
        let prefix = prefix.try_into()?;
        self.prefixes.push(prefix);
        self.finalized = false;
        Ok(())
    }

    /*-------------------------------------------------------------------------
      Finalize
    -------------------------------------------------------------------------*/

    /// Sort the list and remove duplicate and overlapping prefixes, keeping the broadest prefix
    /// of every overlapping group. Does nothing if the list is already sorted.
    pub fn sort(&mut self) {
        self.finalize(false);
    }

    /// Sort the list, remove duplicate and overlapping prefixes, and merge sibling prefixes into
    /// their common supernet (`10.0.0.0/24` and `10.0.1.0/24` become `10.0.0.0/23`). Does nothing
    /// if the list is already sorted.
    pub fn sort_and_merge(&mut self) {
        self.finalize(true);
    }

    /// Reports whether the list is sorted and ready to query.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn finalize(&mut self, merge: bool) {
        if self.finalized {
            trace!("Prefix list is already sorted");
            return;
        }

        self.prefixes.sort_by_key(Prefix::start);

        let mut out: Vec<Prefix> = Vec::with_capacity(self.prefixes.len());
        for &prefix in &self.prefixes {
            let Some(last) = out.len().checked_sub(1) else {
                out.push(prefix);
                continue;
            };

            let kept = out[last];
            let (hi, lo) = prefix.start();
            if prefix.start() == kept.start() {
                // Same starting address; the shorter prefix covers the longer one
                if prefix.prefix_len() < kept.prefix_len() {
                    out[last] = prefix;
                    if merge {
                        merge_backward(&mut out);
                    }
                }
            } else if !kept.contains_normalized(hi, lo) {
                out.push(prefix);
                if merge {
                    merge_backward(&mut out);
                }
            }
        }

        debug!(
            "Sorted {} prefixes into {} (merge: {})",
            self.prefixes.len(),
            out.len(),
            merge
        );

        self.prefixes = out;
        self.finalized = true;
    }

    /*-------------------------------------------------------------------------
      Queries
    -------------------------------------------------------------------------*/

    /// Reports whether any prefix in the list contains the address.
    ///
    /// Returns [PrefixListError::NotFinalized] if the list has not been sorted since the last
    /// append.
    pub fn contains(&self, addr: impl Into<IpAddr>) -> ListResult<bool> {
        self.lookup(addr).map(|prefix| prefix.is_some())
    }

    /// Get the prefix that contains the address, or `None` when no prefix does.
    ///
    /// Returns [PrefixListError::NotFinalized] if the list has not been sorted since the last
    /// append.
    pub fn lookup(&self, addr: impl Into<IpAddr>) -> ListResult<Option<Prefix>> {
        if !self.finalized {
            return Err(PrefixListError::NotFinalized);
        }

        let (hi, lo) = normalize_addr(addr.into());

        // Rightmost prefix starting at or before the address
        let index = self
            .prefixes
            .partition_point(|prefix| prefix.start() <= (hi, lo));

        Ok(index
            .checked_sub(1)
            .map(|index| self.prefixes[index])
            .filter(|prefix| prefix.contains_normalized(hi, lo)))
    }

    /// Look up each address, collecting the containing prefixes and the addresses not found.
    pub fn search<'a, I>(&self, addrs: I) -> ListResult<SearchResults>
    where
        I: IntoIterator<Item = &'a IpAddr>,
    {
        if !self.finalized {
            return Err(PrefixListError::NotFinalized);
        }

        let mut search_results = SearchResults::default();

        for addr in addrs {
            match self.lookup(*addr)? {
                Some(prefix) => {
                    search_results.matches.insert(*addr, prefix);
                }
                None => {
                    debug!("Address not found in prefix list: {addr}");
                    search_results.not_found.insert(*addr);
                }
            }
        }

        Ok(search_results)
    }

    /// New list covering only the addresses of one address family, with the same finalized
    /// state.
    ///
    /// An IPv6 prefix that covers the IPv4-mapped range (such as `::/0`) covers every IPv4
    /// address: the IPv4 list holds `0.0.0.0/0` in its place, and the IPv6 list holds the
    /// prefixes covering the rest of it.
    pub fn filter(&self, family: AddressFamily) -> PrefixList {
        let prefixes: Vec<Prefix> = match family {
            AddressFamily::IPv4 => self
                .prefixes
                .iter()
                .map(Prefix::ipv4_view)
                .filter(|prefix| prefix.family().is_ipv4())
                .collect(),
            AddressFamily::IPv6 => self
                .prefixes
                .iter()
                .flat_map(Prefix::ipv6_view)
                .filter(|prefix| prefix.family().is_ipv6())
                .collect(),
        };

        PrefixList {
            prefixes,
            finalized: self.finalized,
        }
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Copy of the list's prefixes. Changes to the returned vector do not affect the list.
    pub fn prefixes(&self) -> Vec<Prefix> {
        self.prefixes.to_vec()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Prefix> {
        self.prefixes.iter()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.prefixes.capacity()
    }
}

/*--------------------------------------------------------------------------------------
  Collect and Extend
--------------------------------------------------------------------------------------*/

impl FromIterator<Prefix> for PrefixList {
    fn from_iter<I: IntoIterator<Item = Prefix>>(iter: I) -> Self {
        PrefixList {
            prefixes: iter.into_iter().collect(),
            finalized: false,
        }
    }
}

impl Extend<Prefix> for PrefixList {
    fn extend<I: IntoIterator<Item = Prefix>>(&mut self, iter: I) {
        self.prefixes.extend(iter);
        self.finalized = false;
    }
}

impl<'a> IntoIterator for &'a PrefixList {
    type Item = &'a Prefix;
    type IntoIter = std::slice::Iter<'a, Prefix>;

    fn into_iter(self) -> Self::IntoIter {
        self.prefixes.iter()
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Collapse sibling pairs at the end of the output into their supernet, walking backward for as
/// long as the last two prefixes keep merging.
fn merge_backward(out: &mut Vec<Prefix>) {
    while out.len() >= 2 {
        let index = out.len() - 2;
        if out[index].next_sibling() != Some(out[index + 1]) {
            break;
        }
        trace!("Merging {} and {}", out[index], out[index + 1]);
        out[index] = out[index].supernet();
        out.truncate(index + 1);
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
