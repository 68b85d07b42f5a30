use cidrlist::{AddressFamily, JsonPrefixList, PrefixList, Result, SearchResults};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::*;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Prefix Table
--------------------------------------------------------------------------------------*/

pub fn prefix_table(prefix_list: &PrefixList) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        header_cell("IP Prefix"),
        header_cell("Address Family"),
        header_cell("Prefix Length"),
    ]);

    for prefix in prefix_list {
        let prefix_len = match prefix.family() {
            AddressFamily::IPv4 => prefix.to_ip_network().prefix(),
            AddressFamily::IPv6 => prefix.prefix_len(),
        };

        table.add_row(vec![
            Cell::new(prefix).add_attribute(Attribute::Bold),
            Cell::new(prefix.family()),
            Cell::new(prefix_len),
        ]);
    }

    // Right-align the IP Prefix column
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{table}");
}

/*--------------------------------------------------------------------------------------
  Prefix List Summary
--------------------------------------------------------------------------------------*/

pub fn summary(prefix_list: &PrefixList) {
    let ipv4_prefix_count = prefix_list
        .iter()
        .filter(|prefix| prefix.family().is_ipv4())
        .count();
    let ipv6_prefix_count = prefix_list.len() - ipv4_prefix_count;

    let mut summary_table = Table::new();
    summary_table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);

    summary_table.add_row(vec![Cell::new(prefix_list.len()), Cell::new("IP Prefixes")]);
    summary_table.add_row(vec![Cell::new(ipv4_prefix_count), Cell::new("IPv4 Prefixes")]);
    summary_table.add_row(vec![Cell::new(ipv6_prefix_count), Cell::new("IPv6 Prefixes")]);

    if let Some(column) = summary_table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{summary_table}");
}

/*--------------------------------------------------------------------------------------
  Lookup Table
--------------------------------------------------------------------------------------*/

pub fn lookup_table(search_results: &SearchResults) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![header_cell("IP Address"), header_cell("IP Prefix")]);

    for (address, prefix) in search_results.results() {
        let prefix_cell = match prefix {
            Some(prefix) => Cell::new(prefix),
            None => Cell::new("not found").fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(address).add_attribute(Attribute::Bold),
            prefix_cell,
        ]);
    }

    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{table}");
}

/*--------------------------------------------------------------------------------------
  Prefixes In CIDR Format
--------------------------------------------------------------------------------------*/

pub fn prefixes_in_cidr_format(prefix_list: &PrefixList) {
    for prefix in prefix_list {
        println!("{prefix}");
    }
}

pub fn search_results_in_cidr_format(search_results: &SearchResults) {
    for prefix in search_results.matched_prefixes() {
        println!("{prefix}");
    }
}

/*--------------------------------------------------------------------------------------
  JSON
--------------------------------------------------------------------------------------*/

pub fn prefixes_in_json_format(prefix_list: &PrefixList) -> Result<()> {
    let json_prefix_list = JsonPrefixList {
        prefixes: prefix_list.prefixes(),
    };
    println!("{}", serde_json::to_string_pretty(&json_prefix_list)?);
    Ok(())
}

pub fn search_results_in_json_format(search_results: &SearchResults) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(search_results)?);
    Ok(())
}

/*--------------------------------------------------------------------------------------
  Helper Functions
--------------------------------------------------------------------------------------*/

fn header_cell(title: &str) -> Cell {
    Cell::new(title)
        .add_attribute(Attribute::Bold)
        .fg(Color::Green)
}
