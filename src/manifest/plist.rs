//! Info.plist string values
//!
//! Handles XML property lists only. Values are located and replaced with
//! regex-based text edits so that key order, indentation and comments are
//! preserved byte for byte outside the edited `<string>` element.

use crate::error::ManifestError;
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Magic prefix of binary property lists
const BINARY_PLIST_MAGIC: &str = "bplist";

/// Default indentation used when inserting a key into a plist without any keys
const DEFAULT_INDENT: &str = "\t";

/// An XML Info.plist held in memory
#[derive(Debug, Clone)]
pub struct InfoPlist {
    path: PathBuf,
    content: String,
}

impl InfoPlist {
    /// Read and validate a plist from disk
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content =
            fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
        Self::from_content(path, content)
    }

    /// Wrap plist content that was read elsewhere
    pub fn from_content(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Result<Self, ManifestError> {
        let path = path.into();
        let content = content.into();

        if content.starts_with(BINARY_PLIST_MAGIC) {
            return Err(ManifestError::plist_parse_error(
                path,
                "binary property lists are not supported",
            ));
        }
        if !content.contains("<plist") || !content.contains("</dict>") {
            return Err(ManifestError::plist_parse_error(
                path,
                "not an XML property list with a root dictionary",
            ));
        }

        Ok(Self { path, content })
    }

    /// Path the plist was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current text of the plist
    pub fn content(&self) -> &str {
        &self.content
    }

    /// String value stored under `key` in the root dictionary, if present
    pub fn get(&self, key: &str) -> Option<String> {
        let re = key_pattern(key);
        root_entry(&self.content, &re).map(|caps| {
            caps.get(3)
                .map(|m| unescape_xml(m.as_str()))
                .unwrap_or_default()
        })
    }

    /// String value stored under `key`, or an error naming the key
    pub fn require(&self, key: &str) -> Result<String, ManifestError> {
        self.get(key)
            .ok_or_else(|| ManifestError::key_not_found(&self.path, key))
    }

    /// Set `key` to `value` in the root dictionary, inserting the key if needed
    ///
    /// Keys of nested dictionaries are never touched. Returns whether the
    /// content changed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool, ManifestError> {
        let escaped = escape_xml(value);
        let re = key_pattern(key);

        let updated = if let Some(caps) = root_entry(&self.content, &re) {
            let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
            let mut updated = String::with_capacity(self.content.len() + escaped.len());
            updated.push_str(&self.content[..whole.start]);
            updated.push_str(&caps[1]);
            updated.push_str("<string>");
            updated.push_str(&escaped);
            updated.push_str("</string>");
            updated.push_str(&self.content[whole.end..]);
            updated
        } else {
            self.insert_key(key, &escaped)?
        };

        let changed = updated != self.content;
        self.content = updated;
        Ok(changed)
    }

    /// Insert a new key/value pair just before the root dictionary closes
    fn insert_key(&self, key: &str, escaped_value: &str) -> Result<String, ManifestError> {
        let close = self.content.rfind("</dict>").ok_or_else(|| {
            ManifestError::plist_parse_error(&self.path, "root dictionary is not closed")
        })?;
        let line_start = self.content[..close].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let shares_line = !self.content[line_start..close].trim().is_empty();
        let at = if shares_line { close } else { line_start };
        let indent = self.detect_indent();

        let mut updated = String::with_capacity(self.content.len() + 64);
        updated.push_str(&self.content[..at]);
        if shares_line {
            updated.push('\n');
        }
        updated.push_str(&format!("{}<key>{}</key>\n", indent, escape_xml(key)));
        updated.push_str(&format!("{}<string>{}</string>\n", indent, escaped_value));
        updated.push_str(&self.content[at..]);
        Ok(updated)
    }

    /// Indentation of the first `<key>` line, falling back to a tab
    fn detect_indent(&self) -> String {
        self.content
            .lines()
            .find(|line| line.trim_start().starts_with("<key>"))
            .map(|line| {
                line.chars()
                    .take_while(|c| c.is_whitespace())
                    .collect::<String>()
            })
            .unwrap_or_else(|| DEFAULT_INDENT.to_string())
    }
}

/// Pattern for `<key>KEY</key>` followed by a string element
///
/// Group 1 is everything up to the value element, group 3 the text value
/// (absent for `<string/>`).
fn key_pattern(key: &str) -> Regex {
    let pattern = format!(
        r"(<key>\s*{}\s*</key>\s*)(<string>([^<]*)</string>|<string\s*/>)",
        regex::escape(&escape_xml(key))
    );
    Regex::new(&pattern).expect("escaped key always forms a valid pattern")
}

/// First match of `re` sitting directly inside the root dictionary
fn root_entry<'c>(content: &'c str, re: &Regex) -> Option<Captures<'c>> {
    re.captures_iter(content).find(|caps| {
        caps.get(0)
            .is_some_and(|m| dict_depth(&content[..m.start()]) == 1)
    })
}

/// Number of `<dict>` elements still open at the end of `prefix`
fn dict_depth(prefix: &str) -> i64 {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"</?dict\s*>").expect("valid dict tag pattern"));
    re.find_iter(prefix).fold(0, |depth, tag| {
        if tag.as_str().starts_with("</") {
            depth - 1
        } else {
            depth + 1
        }
    })
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn unescape_xml(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
