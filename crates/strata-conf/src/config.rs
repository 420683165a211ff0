use strata_trie::Trie;

use crate::error::ParseError;
use crate::parser;

/// One `[name]` block of a configuration file.
///
/// The kind is fixed at the moment the header is parsed: names the
/// caller designated as list sections collect their lines as ordered
/// items, every other section maps keys to values.
#[derive(Debug, PartialEq)]
pub enum Section {
    Map(Trie<String>),
    List(Vec<String>),
}

/// A parsed configuration: section names mapped to [`Section`]s, in an
/// insertion-ordered trie.
///
/// A `Config` is only ever produced by [`Config::parse`]; everything
/// else on it is a read-only query. Lookups for absent sections or keys
/// return `None`, they are not errors.
#[derive(Debug, PartialEq)]
pub struct Config {
    pub(crate) root: Trie<Section>,
}

impl Config {
    /// Parse a configuration buffer.
    ///
    /// `list_sections` names the sections to be collected as ordered
    /// lists of lines instead of key/value maps. The first malformed
    /// construct aborts the parse: the partial result is discarded and
    /// the error returned. Parsing the same input twice yields
    /// structurally equal configs.
    pub fn parse(src: &[u8], list_sections: &[&str]) -> Result<Config, ParseError> {
        parser::parse(src, list_sections)
    }

    /// Section names, in first-inserted prefix-grouped order.
    pub fn sections(&self) -> Vec<String> {
        self.root
            .iter()
            .map(|(name, _)| String::from_utf8_lossy(&name).into_owned())
            .collect()
    }

    /// Keys of a map section, in the same order rule as [`sections`].
    ///
    /// `None` when the section does not exist or is a list section.
    ///
    /// [`sections`]: Config::sections
    pub fn keys(&self, section: &str) -> Option<Vec<String>> {
        match self.root.get(section.as_bytes())? {
            Section::Map(map) => Some(
                map.iter()
                    .map(|(key, _)| String::from_utf8_lossy(&key).into_owned())
                    .collect(),
            ),
            Section::List(_) => None,
        }
    }

    /// Value stored under `section`/`key`, if both exist and the section
    /// is a map.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        match self.root.get(section.as_bytes())? {
            Section::Map(map) => map.get(key.as_bytes()).map(String::as_str),
            Section::List(_) => None,
        }
    }

    /// Like [`get`], falling back to `default` for absent values.
    ///
    /// [`get`]: Config::get
    pub fn get_or<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.get(section, key).unwrap_or(default)
    }

    /// Items of a list section, in file order.
    ///
    /// `None` when the section does not exist or is a map section.
    pub fn get_list(&self, section: &str) -> Option<&[String]> {
        match self.root.get(section.as_bytes())? {
            Section::List(items) => Some(items),
            Section::Map(_) => None,
        }
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}
