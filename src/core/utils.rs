use crate::core::errors::{ListResult, PrefixListError};
use log::{info, warn};
use std::env;
use std::net::IpAddr;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  Utilities
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Parse IP Addresses
--------------------------------------------------------------------------------------*/

/// Parse an IPv4 or IPv6 address, reporting [PrefixListError::InvalidAddress] on failure.
///
/// ```
/// use cidrlist::{parse_address, PrefixListError};
///
/// assert!(parse_address("10.1.2.3").is_ok());
/// assert!(parse_address(" 2001:db8::1 ").is_ok());
/// assert_eq!(
///     parse_address("10.1.2"),
///     Err(PrefixListError::InvalidAddress("10.1.2".to_string()))
/// );
/// ```
pub fn parse_address(value: &str) -> ListResult<IpAddr> {
    value
        .trim()
        .parse()
        .map_err(|_| PrefixListError::InvalidAddress(value.to_string()))
}

/*--------------------------------------------------------------------------------------
  Prefix List Text Format
--------------------------------------------------------------------------------------*/

/// Strip a trailing `#` comment and surrounding whitespace from a prefix list line.
pub(crate) fn strip_comment(line: &str) -> &str {
    line.split_once('#')
        .map_or(line, |(content, _comment)| content)
        .trim()
}

/*--------------------------------------------------------------------------------------
  Environment Variables
--------------------------------------------------------------------------------------*/

/// Get and parse an environment variable value or return a default value.
pub(crate) fn get_env_var<T: FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("10.1.2.3"), Ok("10.1.2.3".parse().unwrap()));
        assert_eq!(parse_address("2001:db8::1"), Ok("2001:db8::1".parse().unwrap()));
        assert!(matches!(
            parse_address("10.0.0.0/8"),
            Err(PrefixListError::InvalidAddress(_))
        ));
        assert!(parse_address("").is_err());
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("10.0.0.0/8"), "10.0.0.0/8");
        assert_eq!(strip_comment("  10.0.0.0/8  # private  "), "10.0.0.0/8");
        assert_eq!(strip_comment("# comment only"), "");
        assert_eq!(strip_comment("   "), "");
    }

    #[test]
    fn test_get_env_var_default() {
        assert_eq!(get_env_var("CIDRLIST_TEST_UNSET_VARIABLE", 42u32), 42);
    }
}
