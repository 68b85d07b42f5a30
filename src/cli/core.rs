use crate::cli;
use cidrlist::{parse_address, AddressFamily, Loader, LoaderBuilder, PrefixList};
use log::error;
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Build the prefix list loader from CLI arguments
--------------------------------------------------------------------------------------*/

/// Command-line flags switch options on; environment variables still apply when a flag is absent.
pub fn build_loader(args: &cli::Args) -> Loader {
    let mut loader_builder = LoaderBuilder::new();
    if args.merge {
        loader_builder.merge(true);
    }
    if args.strict {
        loader_builder.strict(true);
    }
    loader_builder.build()
}

/*--------------------------------------------------------------------------------------
  Parse IP addresses from CLI arguments
--------------------------------------------------------------------------------------*/

pub fn parse_addresses(args: &cli::Args) -> Option<Vec<IpAddr>> {
    args.addresses.as_ref().map(|addresses| {
        addresses
            .iter()
            .filter_map(|address| {
                parse_address(address)
                    .inspect_err(|error| error!("{}", error))
                    .ok()
            })
            .collect()
    })
}

/*--------------------------------------------------------------------------------------
  Filter the prefix list by address family
--------------------------------------------------------------------------------------*/

pub fn filter_family(args: &cli::Args, prefix_list: PrefixList) -> PrefixList {
    match (args.ipv4, args.ipv6) {
        (true, false) => prefix_list.filter(AddressFamily::IPv4),
        (false, true) => prefix_list.filter(AddressFamily::IPv6),
        _ => prefix_list,
    }
}
