use crate::core::errors::{Error, Result};
use crate::core::json;
use crate::core::prefix::Prefix;
use crate::core::prefix_list::PrefixList;
use crate::core::utils::{get_env_var, strip_comment};
use log::{error, info, warn};
use std::fs;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// _**Simple library interface**_ that reads a prefix list file using the default loader
/// configuration and returns a sorted [PrefixList] ready to query.
///
/// Files ending in `.json` are read as `{"prefixes": [...]}` documents; anything else is read as
/// text with one prefix per line and `#` comments.
///
/// ```no_run
/// let prefix_list = cidrlist::load("blocklist.txt").unwrap();
/// let blocked = prefix_list.contains("192.0.2.1".parse::<std::net::IpAddr>().unwrap());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<PrefixList> {
    Loader::new().load_file(path)
}

/*-------------------------------------------------------------------------------------------------
  Loader Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Loader] struct that allows you to customize how prefix lists are read and
/// finalized.
///
/// ```
/// let loader = cidrlist::LoaderBuilder::default()
///     .merge(true)
///     .strict(true)
///     .capacity(1024)
///     .build();
///
/// assert!(loader.merge());
/// ```
///
/// The [LoaderBuilder::new] method sources configuration values from environment variables when
/// set and uses default values otherwise. [LoaderBuilder::default] ignores the environment.
#[derive(Debug, Clone, Default)]
pub struct LoaderBuilder {
    merge: bool,
    strict: bool,
    capacity: usize,
}

/*--------------------------------------------------------------------------------------
  Loader Builder Implementation
--------------------------------------------------------------------------------------*/

impl LoaderBuilder {
    /// Create a new [LoaderBuilder] reading initial configuration values from environment
    /// variables when set and default values when they are not set.
    ///
    /// The environment variables used to set the initial configuration values are:
    /// - `CIDRLIST_MERGE`
    /// - `CIDRLIST_STRICT`
    /// - `CIDRLIST_CAPACITY`
    pub fn new() -> Self {
        let default = LoaderBuilder::default();

        Self {
            merge: get_env_var("CIDRLIST_MERGE", default.merge),
            strict: get_env_var("CIDRLIST_STRICT", default.strict),
            capacity: get_env_var("CIDRLIST_CAPACITY", default.capacity),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Merge sibling prefixes into their supernets after sorting; defaults to `false`.
    pub fn merge(&mut self, merge: bool) -> &mut Self {
        self.merge = merge;
        self
    }

    /// Fail on the first invalid entry instead of logging and skipping it; defaults to `false`.
    pub fn strict(&mut self, strict: bool) -> &mut Self {
        self.strict = strict;
        self
    }

    /// Number of prefixes to allocate room for up front; defaults to `0`.
    pub fn capacity(&mut self, capacity: usize) -> &mut Self {
        self.capacity = capacity;
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Loader {
        Loader {
            merge: self.merge,
            strict: self.strict,
            capacity: self.capacity,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Loader
-------------------------------------------------------------------------------------------------*/

/// Reads prefix lists from text, JSON, and files into a sorted [PrefixList].
///
/// ```
/// let prefix_list = cidrlist::Loader::default()
///     .load_str("10.0.0.0/24 # office\n10.0.1.0/24\n")
///     .unwrap();
///
/// assert_eq!(prefix_list.len(), 2);
/// assert!(prefix_list.is_finalized());
/// ```
#[derive(Debug, Clone)]
pub struct Loader {
    merge: bool,
    strict: bool,
    capacity: usize,
}

/*--------------------------------------------------------------------------------------
  Loader Implementation
--------------------------------------------------------------------------------------*/

impl Default for Loader {
    fn default() -> Self {
        LoaderBuilder::default().build()
    }
}

impl Loader {
    pub fn new() -> Self {
        LoaderBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn merge(&self) -> bool {
        self.merge
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /*-------------------------------------------------------------------------
      Load Methods
    -------------------------------------------------------------------------*/

    /// Read a text prefix list: one prefix per line, `#` comments, blank lines ignored.
    pub fn load_str(&self, text: &str) -> Result<PrefixList> {
        let mut prefix_list = PrefixList::with_capacity(self.capacity);
        self.append_text(&mut prefix_list, text, "<text>")?;
        Ok(self.finalize(prefix_list))
    }

    /// Read a JSON prefix list document.
    pub fn load_json(&self, json: &str) -> Result<PrefixList> {
        let mut prefix_list = PrefixList::with_capacity(self.capacity);
        self.append_json(&mut prefix_list, json, "<json>")?;
        Ok(self.finalize(prefix_list))
    }

    /// Read a prefix list file; `.json` files are read as JSON, all others as text.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<PrefixList> {
        self.load_files([path])
    }

    /// Read several prefix list files into one list.
    pub fn load_files<I, P>(&self, paths: I) -> Result<PrefixList>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut prefix_list = PrefixList::with_capacity(self.capacity);
        for path in paths {
            self.append_file(&mut prefix_list, path.as_ref())?;
        }
        Ok(self.finalize(prefix_list))
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    fn append_file(&self, prefix_list: &mut PrefixList, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path)
            .inspect(|_| info!("Read prefix list file: {:?}", path))
            .map_err(Error::from)
            .inspect_err(|error| error!("Failed to read `{:?}`: {}", path, error))?;

        let source = path.display().to_string();
        let is_json = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

        if is_json {
            self.append_json(prefix_list, &contents, &source)
        } else {
            self.append_text(prefix_list, &contents, &source)
        }
    }

    fn append_text(&self, prefix_list: &mut PrefixList, text: &str, source: &str) -> Result<()> {
        for (index, line) in text.lines().enumerate() {
            let entry = strip_comment(line);
            if entry.is_empty() {
                continue;
            }
            self.append_entry(prefix_list, entry, &format!("{}:{}", source, index + 1))?;
        }
        Ok(())
    }

    fn append_json(&self, prefix_list: &mut PrefixList, json: &str, source: &str) -> Result<()> {
        let json_prefix_list = json::parse(json)
            .inspect_err(|error| error!("Failed to parse `{}`: {}", source, error))?;

        for (index, entry) in json_prefix_list.prefixes.iter().enumerate() {
            self.append_entry(prefix_list, entry, &format!("{}[{}]", source, index))?;
        }
        Ok(())
    }

    fn append_entry(&self, prefix_list: &mut PrefixList, entry: &str, location: &str) -> Result<()> {
        match entry.parse::<Prefix>() {
            Ok(prefix) => Ok(prefix_list.append(prefix)?),
            Err(error) if self.strict => {
                error!("{}: {}", location, error);
                Err(error.into())
            }
            Err(error) => {
                warn!("{}: {}; skipping", location, error);
                Ok(())
            }
        }
    }

    fn finalize(&self, mut prefix_list: PrefixList) -> PrefixList {
        let appended = prefix_list.len();
        if self.merge {
            prefix_list.sort_and_merge();
        } else {
            prefix_list.sort();
        }
        info!(
            "Loaded {} prefixes into {} list entries",
            appended,
            prefix_list.len()
        );
        prefix_list
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
