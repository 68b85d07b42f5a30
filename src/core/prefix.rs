use crate::core::address_family::AddressFamily;
use crate::core::errors::{ListResult, PrefixListError};
use ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  Prefix
-------------------------------------------------------------------------------------------------*/

/// Bit-length offset of an IPv4 prefix embedded in the IPv4-mapped IPv6 range (`::ffff:0:0/96`).
const IPV4_MAPPED_OFFSET: u8 = 96;

/// Upper 32 bits of the low half of every IPv4-mapped IPv6 address.
const IPV4_MAPPED_TAG: u64 = 0xffff;

/// The IPv4-mapped range `::ffff:0:0/96`; displayed as `0.0.0.0/0`.
const IPV4_MAPPED_RANGE: Prefix = Prefix {
    hi: 0,
    lo: IPV4_MAPPED_TAG << 32,
    bits: IPV4_MAPPED_OFFSET,
};

/// A normalized CIDR prefix.
///
/// Every prefix, regardless of its original address family, is stored in a single 128-bit
/// address space as two big-endian 64-bit halves. IPv4 prefixes are embedded in the
/// IPv4-mapped IPv6 range and their length grows by 96 bits, so `10.0.0.0/8` is stored as
/// `::ffff:10.0.0.0/104`. Host bits are always zero.
///
/// The derived ordering compares the starting address first and the prefix length second.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Prefix {
    hi: u64,
    lo: u64,
    bits: u8,
}

/*--------------------------------------------------------------------------------------
  Prefix Implementation
--------------------------------------------------------------------------------------*/

impl Prefix {
    /// Create a normalized prefix from an address of either family and a prefix length valid
    /// for that family (`0..=32` for IPv4, `0..=128` for IPv6). Host bits are cleared.
    ///
    /// ```
    /// use cidrlist::Prefix;
    /// use std::net::{IpAddr, Ipv4Addr};
    ///
    /// let prefix = Prefix::new(IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3)), 8).unwrap();
    /// assert_eq!(prefix.to_string(), "10.0.0.0/8");
    /// assert_eq!(prefix.prefix_len(), 104);
    ///
    /// assert!(Prefix::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)), 33).is_err());
    /// ```
    pub fn new(addr: IpAddr, prefix_len: u8) -> ListResult<Prefix> {
        match addr {
            IpAddr::V4(ipv4) if prefix_len <= 32 => Ok(Prefix::from_mapped(
                ipv4.to_ipv6_mapped(),
                prefix_len + IPV4_MAPPED_OFFSET,
            )),
            IpAddr::V6(ipv6) if prefix_len <= 128 => Ok(Prefix::from_mapped(ipv6, prefix_len)),
            _ => Err(PrefixListError::InvalidPrefix(format!("{addr}/{prefix_len}"))),
        }
    }

    /// Build from an IPv6 (or IPv4-mapped) address and a length already known to be `<= 128`.
    fn from_mapped(addr: Ipv6Addr, bits: u8) -> Prefix {
        let (hi, lo) = split(addr);
        let (mask_hi, mask_lo) = netmask(bits);
        Prefix {
            hi: hi & mask_hi,
            lo: lo & mask_lo,
            bits,
        }
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Starting address in the normalized (IPv6) address space.
    pub fn addr(&self) -> Ipv6Addr {
        join(self.hi, self.lo)
    }

    /// Prefix length in the normalized (IPv6) address space; IPv4 prefixes report their
    /// original length plus 96.
    pub fn prefix_len(&self) -> u8 {
        self.bits
    }

    /// Address family the prefix was expressed in before normalization.
    pub fn family(&self) -> AddressFamily {
        if self.bits >= IPV4_MAPPED_OFFSET && self.hi == 0 && self.lo >> 32 == IPV4_MAPPED_TAG {
            AddressFamily::IPv4
        } else {
            AddressFamily::IPv6
        }
    }

    pub(crate) fn start(&self) -> (u64, u64) {
        (self.hi, self.lo)
    }

    /*-------------------------------------------------------------------------
      Containment
    -------------------------------------------------------------------------*/

    /// Reports whether the prefix contains the address. IPv4 addresses match both IPv4
    /// prefixes and IPv6 prefixes covering the IPv4-mapped range.
    pub fn contains(&self, addr: IpAddr) -> bool {
        let (hi, lo) = normalize_addr(addr);
        self.contains_normalized(hi, lo)
    }

    pub(crate) fn contains_normalized(&self, hi: u64, lo: u64) -> bool {
        let (mask_hi, mask_lo) = netmask(self.bits);
        hi & mask_hi == self.hi && lo & mask_lo == self.lo
    }

    /*-------------------------------------------------------------------------
      Merge Arithmetic
    -------------------------------------------------------------------------*/

    /// The sibling prefix this prefix can merge with: same length, starting right where this
    /// prefix ends. Only the lower sibling of a pair has one; the upper sibling, the whole
    /// address space (`::/0`), and anything whose successor would wrap past the top of the
    /// address space return `None`.
    ///
    /// ```
    /// use cidrlist::Prefix;
    ///
    /// let lower: Prefix = "10.0.0.0/24".parse().unwrap();
    /// let upper: Prefix = "10.0.1.0/24".parse().unwrap();
    ///
    /// assert_eq!(lower.next_sibling(), Some(upper));
    /// assert_eq!(upper.next_sibling(), None);
    /// ```
    pub fn next_sibling(&self) -> Option<Prefix> {
        let host_bits = 128 - u32::from(self.bits);

        let (hi, lo) = match host_bits {
            0..=63 => {
                if !is_bit_clear(self.lo, host_bits) {
                    return None;
                }
                let (lo, carry) = self.lo.overflowing_add(1 << host_bits);
                let (hi, overflow) = self.hi.overflowing_add(u64::from(carry));
                if overflow {
                    return None;
                }
                (hi, lo)
            }
            64..=127 => {
                if !is_bit_clear(self.hi, host_bits - 64) {
                    return None;
                }
                let (hi, overflow) = self.hi.overflowing_add(1 << (host_bits - 64));
                if overflow {
                    return None;
                }
                (hi, self.lo)
            }
            _ => return None,
        };

        Some(Prefix {
            hi,
            lo,
            bits: self.bits,
        })
    }

    /// The prefix one bit broader at the same starting address. Only called on the lower
    /// sibling of a merge pair, whose last network bit is zero.
    pub(crate) fn supernet(&self) -> Prefix {
        Prefix {
            bits: self.bits - 1,
            ..*self
        }
    }

    /*-------------------------------------------------------------------------
      Address Family Views
    -------------------------------------------------------------------------*/

    /// Reports whether the prefix covers the entire IPv4-mapped range, and so every IPv4
    /// address.
    pub(crate) fn covers_ipv4(&self) -> bool {
        self.bits <= IPV4_MAPPED_OFFSET
            && self.contains_normalized(IPV4_MAPPED_RANGE.hi, IPV4_MAPPED_RANGE.lo)
    }

    /// The prefix restricted to IPv4 addresses: `0.0.0.0/0` when it covers the IPv4-mapped
    /// range, otherwise the prefix itself.
    pub(crate) fn ipv4_view(&self) -> Prefix {
        if self.covers_ipv4() {
            IPV4_MAPPED_RANGE
        } else {
            *self
        }
    }

    /// The prefixes covering the same addresses minus the IPv4-mapped range, ordered by
    /// starting address. A prefix outside the mapped range is returned unchanged.
    pub(crate) fn ipv6_view(&self) -> Vec<Prefix> {
        if !self.covers_ipv4() {
            return vec![*self];
        }

        // One sibling per level on the path down to the mapped range
        let mut pieces: Vec<Prefix> = (self.bits + 1..=IPV4_MAPPED_OFFSET)
            .map(|bits| Prefix::from_mapped(IPV4_MAPPED_RANGE.addr(), bits).sibling())
            .collect();
        pieces.sort_by_key(Prefix::start);
        pieces
    }

    /// The other half of this prefix's supernet. Requires a prefix length of at least 1.
    fn sibling(&self) -> Prefix {
        let host_bits = 128 - u32::from(self.bits);
        match host_bits {
            0..=63 => Prefix {
                lo: self.lo ^ (1 << host_bits),
                ..*self
            },
            _ => Prefix {
                hi: self.hi ^ (1 << (host_bits - 64)),
                ..*self
            },
        }
    }

    /*-------------------------------------------------------------------------
      Conversions
    -------------------------------------------------------------------------*/

    /// Convert back to an [IpNetwork] in the prefix's original address family.
    pub fn to_ip_network(&self) -> IpNetwork {
        match self.family() {
            AddressFamily::IPv4 => IpNetwork::V4(
                Ipv4Network::new(self.ipv4_addr(), self.bits - IPV4_MAPPED_OFFSET)
                    .expect("IPv4-mapped prefix length is between 96 and 128"),
            ),
            AddressFamily::IPv6 => IpNetwork::V6(
                Ipv6Network::new(self.addr(), self.bits)
                    .expect("Prefix length is at most 128"),
            ),
        }
    }

    fn ipv4_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.lo as u32)
    }
}

/*--------------------------------------------------------------------------------------
  Display and Parse
--------------------------------------------------------------------------------------*/

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family() {
            AddressFamily::IPv4 => write!(
                f,
                "{}/{}",
                self.ipv4_addr(),
                self.bits - IPV4_MAPPED_OFFSET
            ),
            AddressFamily::IPv6 => write!(f, "{}/{}", self.addr(), self.bits),
        }
    }
}

impl FromStr for Prefix {
    type Err = PrefixListError;

    /// Parse CIDR notation (`10.0.0.0/8`, `2001:db8::/32`); a bare address is a host prefix.
    fn from_str(s: &str) -> ListResult<Self> {
        s.trim()
            .parse::<IpNetwork>()
            .map(Prefix::from)
            .map_err(|_| PrefixListError::InvalidPrefix(s.to_string()))
    }
}

/*--------------------------------------------------------------------------------------
  Conversions from IP Networks
--------------------------------------------------------------------------------------*/

impl From<IpNetwork> for Prefix {
    fn from(value: IpNetwork) -> Self {
        match value {
            IpNetwork::V4(ipv4_network) => Prefix::from(ipv4_network),
            IpNetwork::V6(ipv6_network) => Prefix::from(ipv6_network),
        }
    }
}

impl From<Ipv4Network> for Prefix {
    fn from(value: Ipv4Network) -> Self {
        Prefix::from_mapped(
            value.ip().to_ipv6_mapped(),
            value.prefix() + IPV4_MAPPED_OFFSET,
        )
    }
}

impl From<Ipv6Network> for Prefix {
    fn from(value: Ipv6Network) -> Self {
        Prefix::from_mapped(value.ip(), value.prefix())
    }
}

impl TryFrom<(IpAddr, u8)> for Prefix {
    type Error = PrefixListError;

    fn try_from((addr, prefix_len): (IpAddr, u8)) -> ListResult<Self> {
        Prefix::new(addr, prefix_len)
    }
}

impl TryFrom<&str> for Prefix {
    type Error = PrefixListError;

    fn try_from(value: &str) -> ListResult<Self> {
        value.parse()
    }
}

/*--------------------------------------------------------------------------------------
  Serde
--------------------------------------------------------------------------------------*/

impl Serialize for Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Map an address of either family into the normalized address space.
pub(crate) fn normalize_addr(addr: IpAddr) -> (u64, u64) {
    match addr {
        IpAddr::V4(ipv4) => split(ipv4.to_ipv6_mapped()),
        IpAddr::V6(ipv6) => split(ipv6),
    }
}

fn split(addr: Ipv6Addr) -> (u64, u64) {
    let octets = addr.octets();
    let mut hi = [0u8; 8];
    let mut lo = [0u8; 8];
    hi.copy_from_slice(&octets[..8]);
    lo.copy_from_slice(&octets[8..]);
    (u64::from_be_bytes(hi), u64::from_be_bytes(lo))
}

fn join(hi: u64, lo: u64) -> Ipv6Addr {
    let mut octets = [0u8; 16];
    octets[..8].copy_from_slice(&hi.to_be_bytes());
    octets[8..].copy_from_slice(&lo.to_be_bytes());
    Ipv6Addr::from(octets)
}

/// Network mask for a prefix length, as (high half, low half).
fn netmask(bits: u8) -> (u64, u64) {
    match bits {
        0 => (0, 0),
        1..=64 => (u64::MAX << (64 - bits), 0),
        _ => (u64::MAX, u64::MAX << (128 - u32::from(bits))),
    }
}

fn is_bit_clear(value: u64, bit: u32) -> bool {
    value & (1 << bit) == 0
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
