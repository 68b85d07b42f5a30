//! Store large, mostly static lists of IPv4 and IPv6 CIDR prefixes and answer "is this address
//! in the list?" with a binary search.
//!
//! Prefixes of both address families share one 128-bit address space: IPv4 prefixes are stored
//! as IPv4-mapped IPv6 prefixes (`::ffff:a.b.c.d`) with their length increased by 96. Build a
//! [PrefixList] by appending prefixes, finalize it with [PrefixList::sort] or
//! [PrefixList::sort_and_merge], then query it with [PrefixList::contains] and
//! [PrefixList::lookup].
//!
//! ```
//! use std::net::IpAddr;
//!
//! let mut prefix_list = cidrlist::PrefixList::new();
//! prefix_list.append("10.0.0.0/24")?;
//! prefix_list.append("10.0.1.0/24")?;
//! prefix_list.append("2001:db8::/32")?;
//! prefix_list.sort_and_merge();
//!
//! let addr: IpAddr = "10.0.1.7".parse()?;
//! let prefix = prefix_list.lookup(addr)?;
//! assert_eq!(prefix.map(|prefix| prefix.to_string()), Some("10.0.0.0/23".to_string()));
//! # Ok::<(), cidrlist::Error>(())
//! ```
//!
//! Prefix list files can be read with the [load] function or a configured [Loader].

mod core;

/*--------------------------------------------------------------------------------------
  Library Interface
--------------------------------------------------------------------------------------*/

pub use crate::core::address_family::AddressFamily;
pub use crate::core::errors::{Error, ListResult, PrefixListError, Result};
pub use crate::core::json::JsonPrefixList;
pub use crate::core::loader::{load, Loader, LoaderBuilder};
pub use crate::core::prefix::Prefix;
pub use crate::core::prefix_list::PrefixList;
pub use crate::core::search_results::SearchResults;
pub use crate::core::utils::parse_address;

pub use ipnetwork;
