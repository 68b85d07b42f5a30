use cidrlist::SearchResults;
use log::{info, warn};
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Initialize Logging
--------------------------------------------------------------------------------------*/

/// Log records from the `cidrlist` library and binary to stderr at the requested verbosity.
pub fn init(verbose: &clap_verbosity_flag::Verbosity) {
    stderrlog::new()
        .module("cidrlist")
        .verbosity(verbose.log_level_filter())
        .init()
        .unwrap_or_else(|error| eprintln!("Unable to initialize logging: {error}"));
}

/*--------------------------------------------------------------------------------------
  Search Results
--------------------------------------------------------------------------------------*/

pub fn search_results(addresses: &[IpAddr], search_results: &SearchResults) {
    let count_addresses = addresses.len();
    info!("Looked up {count_addresses} address(es) in the prefix list");

    let count_found = search_results.matches.len();
    let count_containing_prefixes = search_results.matched_prefixes().len();
    if count_found > 0 {
        info!("Found {count_found} address(es) contained in {count_containing_prefixes} prefix(es)");
    };

    let count_not_found = search_results.not_found.len();
    if count_not_found > 0 {
        warn!("Did not find {count_not_found} address(es)");
    };
}
