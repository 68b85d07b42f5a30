/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod address_family;
pub mod errors;
pub mod json;
pub mod loader;
pub mod prefix;
pub mod prefix_list;
pub mod search_results;
pub mod utils;
