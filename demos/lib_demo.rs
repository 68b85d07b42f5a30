use cidrlist::ipnetwork::IpNetwork;
use cidrlist::{AddressFamily, LoaderBuilder, PrefixList, Result};
use std::net::IpAddr;

fn main() -> Result<()> {
    // Build a prefix list from several kinds of input
    let mut prefix_list = PrefixList::new();
    prefix_list.append("10.0.0.0/24")?;
    prefix_list.append("10.0.1.0/24")?;
    prefix_list.append("10.0.0.128/25")?;
    prefix_list.append("2001:db8::/32".parse::<IpNetwork>()?)?;
    prefix_list.append(("192.0.2.0".parse::<IpAddr>()?, 24u8))?;

    // Sort, drop overlaps, and merge siblings
    prefix_list.sort_and_merge();
    for prefix in &prefix_list {
        println!("{prefix}");
    }

    // Find the prefix containing an IP address
    let ip_address: IpAddr = "10.0.1.42".parse()?;
    let prefix = prefix_list.lookup(ip_address)?;
    println!("{ip_address}: {:?}", prefix.map(|prefix| prefix.to_string()));

    // Look up several addresses at once
    let addresses: Vec<IpAddr> = vec!["192.0.2.7".parse()?, "198.51.100.1".parse()?];
    let search_results = prefix_list.search(&addresses)?;
    println!("{:?}", search_results);

    // Keep only the IPv6 prefixes
    let ipv6_prefixes = prefix_list.filter(AddressFamily::IPv6);
    println!("{} IPv6 prefix(es)", ipv6_prefixes.len());

    // Load and merge a text prefix list
    let loaded = LoaderBuilder::default()
        .merge(true)
        .build()
        .load_str("# office\n172.16.0.0/25\n172.16.0.128/25\n")?;
    println!("{:?}", loaded.prefixes());

    Ok(())
}
