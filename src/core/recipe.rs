//! Recipe metadata: what is being packaged and where it comes from.

use anyhow::{Context, Result};
use semver::Version;
use url::Url;

/// Default download location. `{version}` and `{folder}` are substituted.
pub const DEFAULT_SOURCE_URL: &str =
    "https://sourceforge.net/projects/boost/files/boost/{version}/{folder}.tar.gz";

/// Compiled Boost libraries declared to consumers, in link order.
pub const BOOST_LIBRARIES: &[&str] = &[
    "wave",
    "unit_test_framework",
    "prg_exec_monitor",
    "test_exec_monitor",
    "container",
    "exception",
    "graph",
    "iostreams",
    "locale",
    "log",
    "log_setup",
    "math_c99",
    "math_c99f",
    "math_c99l",
    "math_tr1",
    "math_tr1f",
    "math_tr1l",
    "program_options",
    "random",
    "regex",
    "wserialization",
    "serialization",
    "signals",
    "coroutine",
    "context",
    "timer",
    "thread",
    "chrono",
    "date_time",
    "atomic",
    "filesystem",
    "system",
];

/// Recipe-side files shipped verbatim in the package root.
pub const EXPORTS: &[&str] = &["FindBoost.cmake", "OriginalFindBoost*"];

/// A library distribution the tool knows how to package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub name: &'static str,
    pub version: Version,
    pub license: &'static str,
    /// Directory holding the headers inside the source tree, and below `include/`
    pub include_root: &'static str,
    /// Base names of the compiled libraries
    pub libraries: &'static [&'static str],
}

impl Recipe {
    /// Boost 1.63.0.
    pub fn boost() -> Self {
        Recipe {
            name: "Boost",
            version: Version::new(1, 63, 0),
            license: "Boost Software License - Version 1.0. http://www.boost.org/LICENSE_1_0.txt",
            include_root: "boost",
            libraries: BOOST_LIBRARIES,
        }
    }

    /// Name of the top-level folder in the source archive (`boost_1_63_0`).
    pub fn folder_name(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.name.to_lowercase(),
            self.version.major,
            self.version.minor,
            self.version.patch
        )
    }

    /// Archive file name (`boost_1_63_0.tar.gz`).
    pub fn archive_name(&self) -> String {
        format!("{}.tar.gz", self.folder_name())
    }

    /// Expand a source URL template.
    pub fn source_url(&self, template: &str) -> Result<Url> {
        let expanded = template
            .replace("{version}", &self.version.to_string())
            .replace("{folder}", &self.folder_name());
        Url::parse(&expanded).with_context(|| format!("invalid source url: {}", expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boost_names() {
        let recipe = Recipe::boost();
        assert_eq!(recipe.folder_name(), "boost_1_63_0");
        assert_eq!(recipe.archive_name(), "boost_1_63_0.tar.gz");
    }

    #[test]
    fn test_default_source_url() {
        let url = Recipe::boost().source_url(DEFAULT_SOURCE_URL).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sourceforge.net/projects/boost/files/boost/1.63.0/boost_1_63_0.tar.gz"
        );
    }

    #[test]
    fn test_invalid_source_url() {
        assert!(Recipe::boost().source_url("not a url/{folder}").is_err());
    }

    #[test]
    fn test_library_list() {
        let recipe = Recipe::boost();
        assert_eq!(recipe.libraries.len(), 32);
        assert_eq!(recipe.libraries.first(), Some(&"wave"));
        assert_eq!(recipe.libraries.last(), Some(&"system"));
    }
}
