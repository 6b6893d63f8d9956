use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::SolangError;
use crate::SolangResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["solang.toml", ".solang.toml", ".config/solang.toml"];

/// Environment variable holding the Stack Exchange API key.
pub const KEY_ENV_VAR: &str = "SOLANG_KEY";
/// Environment variable holding the Stack Exchange access token.
pub const TOKEN_ENV_VAR: &str = "SOLANG_TOKEN";

pub const DEFAULT_SITE: &str = "stackoverflow";
pub const DEFAULT_BASE_URL: &str = "https://api.stackexchange.com";
pub const DEFAULT_API_VERSION: &str = "2.2";
pub const DEFAULT_CACHE_DIR: &str = ".so_cache";

/// Configuration loaded from a `solang.toml` file.
///
/// ```toml
/// [api]
/// key = "..."
/// access_token = "..."
/// site = "stackoverflow"
///
/// [cache]
/// dir = ".so_cache"
/// enabled = true
/// ```
///
/// Credentials can also come from the `SOLANG_KEY` and `SOLANG_TOKEN`
/// environment variables, which take precedence over the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolangConfig {
	#[serde(default)]
	pub api: ApiConfig,
	#[serde(default)]
	pub cache: CacheConfig,
}

/// Settings for the Stack Exchange API client.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
	#[serde(default)]
	pub key: Option<String>,
	#[serde(default)]
	pub access_token: Option<String>,
	/// Stack Exchange site the answers live on.
	#[serde(default = "default_site")]
	pub site: String,
	#[serde(default = "default_base_url")]
	pub base_url: String,
	#[serde(default = "default_api_version")]
	pub version: String,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			key: None,
			access_token: None,
			site: default_site(),
			base_url: default_base_url(),
			version: default_api_version(),
		}
	}
}

/// Settings for the on-disk answer cache.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
	/// Directory holding one `a<answer id>.html` file per cached answer.
	/// Relative paths resolve against the working directory.
	#[serde(default = "default_cache_dir")]
	pub dir: PathBuf,
	#[serde(default = "default_true")]
	pub enabled: bool,
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			dir: default_cache_dir(),
			enabled: true,
		}
	}
}

/// API key and access token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
	pub key: String,
	pub access_token: String,
}

fn default_site() -> String {
	DEFAULT_SITE.to_string()
}

fn default_base_url() -> String {
	DEFAULT_BASE_URL.to_string()
}

fn default_api_version() -> String {
	DEFAULT_API_VERSION.to_string()
}

fn default_cache_dir() -> PathBuf {
	PathBuf::from(DEFAULT_CACHE_DIR)
}

fn default_true() -> bool {
	true
}

impl SolangConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> SolangResult<Option<SolangConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_from_path(&config_path).map(Some)
	}

	/// Load the config from an explicit file.
	pub fn load_from_path(path: &Path) -> SolangResult<SolangConfig> {
		let content = std::fs::read_to_string(path)?;
		let config: SolangConfig =
			toml::from_str(&content).map_err(|e| SolangError::ConfigParse {
				path: path.display().to_string(),
				reason: e.to_string(),
			})?;

		tracing::debug!(path = %path.display(), "loaded config");
		Ok(config)
	}

	/// Override credentials from the process environment.
	pub fn apply_env(&mut self) {
		self.apply_env_with(|name| std::env::var(name).ok());
	}

	/// Override credentials using `lookup` to read variables. Empty values
	/// are ignored.
	pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
		let read = |name: &str| lookup(name).filter(|value| !value.is_empty());

		if let Some(key) = read(KEY_ENV_VAR) {
			self.api.key = Some(key);
		}

		if let Some(token) = read(TOKEN_ENV_VAR) {
			self.api.access_token = Some(token);
		}
	}

	/// Both credentials, when both are configured.
	pub fn credentials(&self) -> Option<Credentials> {
		let key = self.api.key.clone()?;
		let access_token = self.api.access_token.clone()?;

		Some(Credentials { key, access_token })
	}
}
