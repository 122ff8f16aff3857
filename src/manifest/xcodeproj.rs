//! Minimal reader for Xcode `project.pbxproj` files
//!
//! Only what is needed to find a target's Info.plist is understood:
//! - PBXProject (project-level build configuration list)
//! - PBXNativeTarget (name, build configuration list)
//! - XCConfigurationList (configurations, default configuration)
//! - XCBuildConfiguration (name, build settings)

use crate::error::ManifestError;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// File inside the `.xcodeproj` bundle that holds the object graph
pub const PBXPROJ_FILE: &str = "project.pbxproj";

/// Extension of Xcode project bundles
pub const PROJECT_EXTENSION: &str = "xcodeproj";

/// Extension of Xcode workspaces
pub const WORKSPACE_EXTENSION: &str = "xcworkspace";

/// Build setting naming the target's Info.plist
pub const INFOPLIST_FILE: &str = "INFOPLIST_FILE";

/// Build setting carrying the target's bundle identifier
pub const PRODUCT_BUNDLE_IDENTIFIER: &str = "PRODUCT_BUNDLE_IDENTIFIER";

/// Variables that expand to the directory containing the `.xcodeproj`
const PROJECT_DIR_VARIABLES: &[&str] = &["$(SRCROOT)", "${SRCROOT}", "$(PROJECT_DIR)", "${PROJECT_DIR}"];

/// A single entry of the pbxproj `objects` dictionary
#[derive(Debug, Clone)]
struct PbxObject {
    isa: String,
    body: String,
}

/// A parsed Xcode project
#[derive(Debug, Clone)]
pub struct XcodeProject {
    path: PathBuf,
    objects: HashMap<String, PbxObject>,
    /// Object ids in file order
    order: Vec<String>,
}

/// A native target and its build configurations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    pub name: String,
    pub configurations: Vec<BuildConfiguration>,
    pub default_configuration: Option<String>,
}

/// A named build configuration with its build settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub name: String,
    pub settings: HashMap<String, String>,
}

impl XcodeProject {
    /// Open a `.xcodeproj` bundle and parse its `project.pbxproj`
    pub fn open(path: &Path) -> Result<Self, ManifestError> {
        let pbxproj = path.join(PBXPROJ_FILE);
        let content =
            fs::read_to_string(&pbxproj).map_err(|e| ManifestError::read_error(&pbxproj, e))?;
        Self::parse(path, &content)
    }

    /// Parse pbxproj content belonging to the project at `path`
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, ManifestError> {
        let path = path.into();
        let mut objects = HashMap::new();
        let mut order = Vec::new();

        for caps in object_header_regex().captures_iter(content) {
            let id = caps[1].to_string();
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let open = whole.end() - 1;
            let close = find_block_end(content, open).ok_or_else(|| {
                ManifestError::project_parse_error(
                    &path,
                    format!("unterminated object {}", id),
                )
            })?;
            let body = content[open + 1..close].to_string();
            let Some(isa) = attribute(&body, "isa") else {
                continue;
            };

            order.push(id.clone());
            objects.insert(id, PbxObject { isa, body });
        }

        if objects.is_empty() {
            return Err(ManifestError::project_parse_error(
                &path,
                "no objects found",
            ));
        }

        Ok(Self {
            path,
            objects,
            order,
        })
    }

    /// Path to the `.xcodeproj` bundle
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that `$(SRCROOT)` refers to
    pub fn project_dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Native targets in file order
    ///
    /// Each target configuration carries the project-level settings of the
    /// configuration with the same name, overridden by its own.
    pub fn targets(&self) -> Vec<BuildTarget> {
        let inherited = self.project_configurations();
        self.order
            .iter()
            .filter_map(|id| self.objects.get(id))
            .filter(|object| object.isa == "PBXNativeTarget")
            .filter_map(|object| self.build_target(object, &inherited))
            .collect()
    }

    /// Native target by name
    pub fn target(&self, name: &str) -> Option<BuildTarget> {
        self.targets().into_iter().find(|t| t.name == name)
    }

    /// Configurations of the PBXProject object's own configuration list
    fn project_configurations(&self) -> Vec<BuildConfiguration> {
        self.order
            .iter()
            .filter_map(|id| self.objects.get(id))
            .find(|object| object.isa == "PBXProject")
            .and_then(|project| self.configuration_list(project))
            .map(|(configurations, _)| configurations)
            .unwrap_or_default()
    }

    fn configuration_list(
        &self,
        owner: &PbxObject,
    ) -> Option<(Vec<BuildConfiguration>, Option<String>)> {
        let list = attribute(&owner.body, "buildConfigurationList")
            .and_then(|id| self.objects.get(&id))?;
        let configurations = id_list(&list.body, "buildConfigurations")
            .iter()
            .filter_map(|id| self.objects.get(id))
            .filter(|object| object.isa == "XCBuildConfiguration")
            .filter_map(build_configuration)
            .collect();
        Some((
            configurations,
            attribute(&list.body, "defaultConfigurationName"),
        ))
    }

    fn build_target(
        &self,
        object: &PbxObject,
        inherited: &[BuildConfiguration],
    ) -> Option<BuildTarget> {
        let name = attribute(&object.body, "name")?;
        let (configurations, default_configuration) =
            self.configuration_list(object).unwrap_or_default();

        let configurations = configurations
            .into_iter()
            .map(|configuration| {
                match inherited.iter().find(|c| c.name == configuration.name) {
                    Some(base) => configuration.inherit(base),
                    None => configuration,
                }
            })
            .collect();

        Some(BuildTarget {
            name,
            configurations,
            default_configuration,
        })
    }

    /// Resolve a path-valued build setting relative to the project directory
    ///
    /// `$(SRCROOT)` and `$(PROJECT_DIR)` are expanded; other variables are
    /// left untouched.
    pub fn resolve_path(&self, value: &str) -> PathBuf {
        let project_dir = self.project_dir();
        let mut expanded = value.to_string();
        for variable in PROJECT_DIR_VARIABLES {
            if let Some(rest) = expanded.strip_prefix(variable) {
                expanded = rest.trim_start_matches('/').to_string();
                break;
            }
        }

        let path = Path::new(&expanded);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_dir.join(path)
        }
    }
}

impl BuildTarget {
    /// Pick a configuration by name, or the list default, or the first one
    pub fn configuration(&self, name: Option<&str>) -> Option<&BuildConfiguration> {
        match name {
            Some(name) => self.configurations.iter().find(|c| c.name == name),
            None => self
                .default_configuration
                .as_deref()
                .and_then(|default| self.configurations.iter().find(|c| c.name == default))
                .or_else(|| self.configurations.first()),
        }
    }
}

impl BuildConfiguration {
    /// Fill in settings this configuration does not set from `base`
    fn inherit(mut self, base: &BuildConfiguration) -> Self {
        for (key, value) in &base.settings {
            self.settings
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    /// Raw value of a build setting
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// The INFOPLIST_FILE setting, if set
    pub fn info_plist(&self) -> Option<&str> {
        self.setting(INFOPLIST_FILE).filter(|v| !v.is_empty())
    }

    /// The bundle identifier, if it is a literal value
    pub fn bundle_identifier(&self) -> Option<&str> {
        self.setting(PRODUCT_BUNDLE_IDENTIFIER)
            .filter(|v| !v.is_empty() && !has_variable(v))
    }
}

/// Whether a build setting value references another variable
pub fn has_variable(value: &str) -> bool {
    value.contains("$(") || value.contains("${")
}

/// Whether a path names an Xcode workspace
pub fn is_workspace(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(WORKSPACE_EXTENSION)
}

/// List `.xcodeproj` bundles directly inside `dir`, sorted by name
pub fn find_projects(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut projects: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir() && path.extension().and_then(|e| e.to_str()) == Some(PROJECT_EXTENSION)
        })
        .collect();
    projects.sort();
    Ok(projects)
}

fn build_configuration(object: &PbxObject) -> Option<BuildConfiguration> {
    let name = attribute(&object.body, "name")?;
    let settings = block(&object.body, "buildSettings")
        .map(parse_settings)
        .unwrap_or_default();
    Some(BuildConfiguration { name, settings })
}

fn object_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*([0-9A-F]{24})\s*(?:/\*.*?\*/\s*)?=\s*\{")
            .expect("valid object header pattern")
    })
}

fn setting_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^\s*("(?:[^"\\]|\\.)*"|[^\s=;"]+)\s*=\s*("(?:[^"\\]|\\.)*"|[^;]*?)\s*;"#)
            .expect("valid build setting pattern")
    })
}

/// Value of a top-level `key = value;` pair inside an object body
fn attribute(body: &str, key: &str) -> Option<String> {
    let pattern = format!(
        r#"(?:^|[\s;{{]){}\s*=\s*("(?:[^"\\]|\\.)*"|[^;\s]+)\s*;"#,
        regex::escape(key)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(&strip_comments(body))
        .map(|caps| unquote(&caps[1]))
}

/// Object ids listed in `key = ( ... );`
fn id_list(body: &str, key: &str) -> Vec<String> {
    let stripped = strip_comments(body);
    let pattern = format!(r"{}\s*=\s*\(([^)]*)\)", regex::escape(key));
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };
    re.captures(&stripped)
        .map(|caps| {
            caps[1]
                .split(',')
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Contents of a nested `key = { ... };` dictionary
fn block<'a>(body: &'a str, key: &str) -> Option<&'a str> {
    let pattern = format!(r"{}\s*=\s*\{{", regex::escape(key));
    let re = Regex::new(&pattern).ok()?;
    let found = re.find(body)?;
    let open = found.end() - 1;
    let close = find_block_end(body, open)?;
    Some(&body[open + 1..close])
}

fn parse_settings(block: &str) -> HashMap<String, String> {
    let stripped = strip_comments(block);
    setting_regex()
        .captures_iter(&stripped)
        .map(|caps| (unquote(&caps[1]), unquote(caps[2].trim())))
        .collect()
}

/// Index of the `}` matching the `{` at `open`, skipping strings and comments
fn find_block_end(content: &str, open: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = content[i + 2..].find("*/")?;
                i += end + 3;
            }
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

fn strip_comments(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid comment pattern"));
    re.replace_all(text, "").into_owned()
}

fn unquote(value: &str) -> String {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => value.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// A trimmed-down pbxproj with two targets and two configurations each
    pub const PBXPROJ: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 56;
	objects = {

/* Begin PBXNativeTarget section */
		1D6058900D05DD3D006BFB54 /* Sample */ = {
			isa = PBXNativeTarget;
			buildConfigurationList = 1D6058960D05DD3E006BFB54 /* Build configuration list for PBXNativeTarget "Sample" */;
			buildPhases = (
			);
			name = Sample;
			productName = Sample;
			productType = "com.apple.product-type.application";
		};
		2A1B3C4D5E6F708192A3B4C5 /* Sample Widget */ = {
			isa = PBXNativeTarget;
			buildConfigurationList = 2A1B3C4D5E6F708192A3B4D0 /* Build configuration list for PBXNativeTarget "Sample Widget" */;
			name = "Sample Widget";
			productType = "com.apple.product-type.app-extension";
		};
/* End PBXNativeTarget section */

/* Begin XCBuildConfiguration section */
		1D6058940D05DD3E006BFB54 /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				INFOPLIST_FILE = "Sample/Info-Debug.plist";
				LD_RUNPATH_SEARCH_PATHS = (
					"$(inherited)",
					"@executable_path/Frameworks",
				);
				PRODUCT_BUNDLE_IDENTIFIER = com.example.sample.debug;
				PRODUCT_NAME = "$(TARGET_NAME)";
			};
			name = Debug;
		};
		1D6058950D05DD3E006BFB54 /* Release */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				"CODE_SIGN_IDENTITY[sdk=iphoneos*]" = "iPhone Distribution";
				INFOPLIST_FILE = "$(SRCROOT)/Sample/Info.plist";
				PRODUCT_BUNDLE_IDENTIFIER = com.example.sample;
				PRODUCT_NAME = "$(TARGET_NAME)";
			};
			name = Release;
		};
		2A1B3C4D5E6F708192A3B4D1 /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				INFOPLIST_FILE = Widget/Info.plist;
				PRODUCT_BUNDLE_IDENTIFIER = "$(PRODUCT_NAME:rfc1034identifier)";
			};
			name = Debug;
		};
		2A1B3C4D5E6F708192A3B4D2 /* Release */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				INFOPLIST_FILE = Widget/Info.plist;
				PRODUCT_BUNDLE_IDENTIFIER = com.example.sample.widget;
			};
			name = Release;
		};
/* End XCBuildConfiguration section */

/* Begin XCConfigurationList section */
		1D6058960D05DD3E006BFB54 /* Build configuration list for PBXNativeTarget "Sample" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				1D6058940D05DD3E006BFB54 /* Debug */,
				1D6058950D05DD3E006BFB54 /* Release */,
			);
			defaultConfigurationIsVisible = 0;
			defaultConfigurationName = Release;
		};
		2A1B3C4D5E6F708192A3B4D0 /* Build configuration list for PBXNativeTarget "Sample Widget" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				2A1B3C4D5E6F708192A3B4D1 /* Debug */,
				2A1B3C4D5E6F708192A3B4D2 /* Release */,
			);
		};
/* End XCConfigurationList section */
	};
	rootObject = 29B97313FDCFA39411CA2CEA /* Project object */;
}
"#;
}
