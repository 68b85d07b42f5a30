use cidrlist::{PrefixList, Result, SearchResults};
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Save Prefix List to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save(prefix_list: &PrefixList, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.serialize(["IP Prefix", "Address Family"])?;

    // Write prefix records
    for prefix in prefix_list {
        writer.serialize((prefix, prefix.family()))?;
    }

    writer.flush()?;

    Ok(())
}

/*-------------------------------------------------------------------------------------------------
  Save Search Results to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save_search_results(search_results: &SearchResults, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.serialize(["IP Address", "IP Prefix"])?;

    // Write lookup records; addresses not found have an empty prefix
    for (address, prefix) in search_results.results() {
        let prefix = prefix.map(|prefix| prefix.to_string()).unwrap_or_default();
        writer.serialize((address.to_string(), prefix))?;
    }

    writer.flush()?;

    Ok(())
}
