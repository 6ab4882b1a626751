use crate::errors::CompactError;
use crate::language::extension_of;
use glob::Pattern;
use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path};
use tracing::debug;

pub const INCLUDED_EXTENSIONS: &[&str] = &[".astro", ".ts", ".js", ".svelte", ".css", ".scss"];

pub const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "examples",
    "build",
    ".next",
    ".svelte-kit",
    ".astro",
    "coverage",
    ".vscode",
    "out",
    "public",
];

/// Always excluded, even when configuration files are requested.
pub const SECURITY_PATTERNS: &[&str] = &[
    ".env",
    ".env.*",
    ".env.local",
    ".env.development",
    ".env.production",
    ".env.test",
    "*.pem",
    "*.key",
    "*.cert",
    "*.crt",
    "id_rsa",
    "id_rsa.pub",
    "*.log",
    "npm-debug.log*",
    "yarn-debug.log*",
    "yarn-error.log*",
];

/// Excluded unless configuration files are requested.
pub const CONFIG_PATTERNS: &[&str] = &[
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "tsconfig.json",
    "astro.config.*",
    "svelte.config.*",
    "vite.config.*",
    "*.config.*",
    "README.md",
    "LICENSE",
    "CHANGELOG.md",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Extension,
    ExcludedDir(String),
    Security(String),
    Config(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Extension => write!(f, "extension not included"),
            SkipReason::ExcludedDir(dir) => write!(f, "inside excluded directory '{}'", dir),
            SkipReason::Security(pattern) => write!(f, "security-sensitive ('{}')", pattern),
            SkipReason::Config(pattern) => write!(f, "configuration file ('{}')", pattern),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Skip(SkipReason),
}

/// The immutable rule set applied to every walked entry.
#[derive(Debug, Clone)]
pub struct FilterRules {
    extensions: HashSet<String>,
    excluded_dirs: HashSet<String>,
    security: Vec<Pattern>,
    config: Vec<Pattern>,
    include_config: bool,
}

impl FilterRules {
    /// Builds the built-in rule set.
    pub fn new(include_config: bool) -> Result<Self, CompactError> {
        Self::from_lists(
            INCLUDED_EXTENSIONS,
            EXCLUDED_DIRS,
            SECURITY_PATTERNS,
            CONFIG_PATTERNS,
            include_config,
        )
    }

    pub fn from_lists(
        extensions: &[&str],
        excluded_dirs: &[&str],
        security_patterns: &[&str],
        config_patterns: &[&str],
        include_config: bool,
    ) -> Result<Self, CompactError> {
        let rules = FilterRules {
            extensions: extensions.iter().map(|e| e.to_ascii_lowercase()).collect(),
            excluded_dirs: excluded_dirs.iter().map(|d| d.to_string()).collect(),
            security: compile_patterns(security_patterns)?,
            config: compile_patterns(config_patterns)?,
            include_config,
        };
        debug!(
            "Filter rules: {} extensions, {} excluded dirs, {} security patterns, {} config patterns, include_config={}",
            rules.extensions.len(),
            rules.excluded_dirs.len(),
            rules.security.len(),
            rules.config.len(),
            include_config
        );
        Ok(rules)
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.contains(name)
    }

    pub fn has_included_extension(&self, file_name: &str) -> bool {
        extension_of(file_name)
            .map(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
            .unwrap_or(false)
    }

    /// Decides whether a file is emitted. `relative` is the file's path
    /// against the project root, `file_name` its base name.
    pub fn classify(&self, relative: &Path, file_name: &str) -> Decision {
        let config_match = first_match(&self.config, file_name);
        let admitted_as_config = self.include_config && config_match.is_some();

        if !admitted_as_config && !self.has_included_extension(file_name) {
            return Decision::Skip(SkipReason::Extension);
        }

        for component in relative.components() {
            if let Component::Normal(part) = component {
                let part = part.to_string_lossy();
                if self.is_excluded_dir(&part) {
                    return Decision::Skip(SkipReason::ExcludedDir(part.into_owned()));
                }
            }
        }

        if let Some(pattern) = first_match(&self.security, file_name) {
            return Decision::Skip(SkipReason::Security(pattern.as_str().to_owned()));
        }

        if !self.include_config {
            if let Some(pattern) = config_match {
                return Decision::Skip(SkipReason::Config(pattern.as_str().to_owned()));
            }
        }

        Decision::Accept
    }
}

fn compile_patterns(patterns: &[&str]) -> Result<Vec<Pattern>, CompactError> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|source| CompactError::Pattern {
                pattern: p.to_string(),
                source,
            })
        })
        .collect()
}

fn first_match<'a>(patterns: &'a [Pattern], file_name: &str) -> Option<&'a Pattern> {
    patterns.iter().find(|pattern| pattern.matches(file_name))
}
