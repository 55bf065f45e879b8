use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::injector::depth::normalize;

pub const DEFAULT_CONFIG_FILE: &str = "import_injector.toml";
pub const DEFAULT_PATTERN: &str = "lib/features/**/*.dart";
pub const DEFAULT_MARKER: &str = "app_theme_helpers.dart";
pub const DEFAULT_TARGET: &str = "shared/util/app_theme_helpers.dart";
pub const DEFAULT_KEYWORD: &str = "import ";
/// `lib/features/<feature>/file.dart` sits three directories below the root
/// and gets no `../` segments.
pub const DEFAULT_DEPTH_OFFSET: usize = 3;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub root: PathBuf,
    pub pattern: String,
    pub marker: String,
    pub target: String,
    pub keyword: String,
    pub import_pattern: Regex,
    pub depth_offset: usize,
}

/// Values supplied on the command line. They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub pattern: Option<String>,
    pub marker: Option<String>,
    pub target: Option<String>,
    pub depth_offset: Option<usize>,
}

// --- Raw TOML structures ---
#[derive(Deserialize)]
struct ConfigFile {
    import_injector: Option<InjectorToml>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct InjectorToml {
    root: Option<String>,
    pattern: Option<String>,
    marker: Option<String>,
    target: Option<String>,
    keyword: Option<String>,
    import_pattern: Option<String>,
    depth_offset: Option<usize>,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `config_path` must exist. Without one, `import_injector.toml`
    /// in the working directory is used when present and the built-in defaults
    /// otherwise.
    pub fn load(config_path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let raw = match config_path {
            Some(p) => read_config_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    read_config_file(default_path)?
                } else {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    InjectorToml::default()
                }
            }
        };
        Self::resolve(raw, overrides)
    }

    /// Built-in defaults scanning below `root`.
    #[cfg(test)]
    pub(crate) fn for_root(root: &Path) -> Self {
        let overrides = Overrides {
            root: Some(root.to_path_buf()),
            ..Overrides::default()
        };
        Self::resolve(InjectorToml::default(), overrides).unwrap()
    }

    fn resolve(raw: InjectorToml, overrides: Overrides) -> Result<Self> {
        let root = overrides
            .root
            .or_else(|| raw.root.map(PathBuf::from))
            .map(|r| normalize(&r))
            .filter(|r| !r.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("."));
        let pattern = overrides
            .pattern
            .or(raw.pattern)
            .unwrap_or_else(|| DEFAULT_PATTERN.to_string());
        let marker = overrides
            .marker
            .or(raw.marker)
            .unwrap_or_else(|| DEFAULT_MARKER.to_string());
        let target = overrides
            .target
            .or(raw.target)
            .unwrap_or_else(|| DEFAULT_TARGET.to_string());
        let keyword = raw.keyword.unwrap_or_else(|| DEFAULT_KEYWORD.to_string());
        let depth_offset = overrides
            .depth_offset
            .or(raw.depth_offset)
            .unwrap_or(DEFAULT_DEPTH_OFFSET);

        if pattern.trim().is_empty() {
            bail!("pattern must not be empty");
        }
        if marker.is_empty() {
            bail!("marker must not be empty");
        }
        if keyword.is_empty() {
            bail!("keyword must not be empty");
        }

        let import_pattern = match raw.import_pattern {
            Some(re) => {
                Regex::new(&re).with_context(|| format!("invalid import_pattern: {}", re))?
            }
            None => Regex::new(&format!("^{}", regex::escape(&keyword)))
                .context("failed to build import matcher from keyword")?,
        };

        Ok(Self {
            root,
            pattern,
            marker,
            target,
            keyword,
            import_pattern,
            depth_offset,
        })
    }
}

fn read_config_file(path: &Path) -> Result<InjectorToml> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let Some(injector) = file.import_injector else {
        bail!("[import_injector] not found in {}", path.display());
    };
    Ok(injector)
}
