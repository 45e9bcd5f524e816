//! Service configuration: TOML with an embedded default.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::Context;
use contractsheet::{GeneratorConfig, TemplateSource};
use serde::Deserialize;

pub const CONFIG_ENV: &str = "CONTRACTSHEET_CONFIG";
pub const PORT_ENV: &str = "PORT";

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 5000

[template]
path = "template.xlsx"
preload = false

[logging]
filter = "info"

[generator]
sc_sheet = "SC"
pi_sheet = "PI"
pi_fill = "full"
empty_values = "write"
never_bold = false
require_identity = false
default_date_to_today = true
dedupe_route_words = false
"#;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub template: TemplateConfig,
    pub logging: LoggingConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TemplateConfig {
    pub path: PathBuf,
    /// Read the template once at start instead of on every request.
    pub preload: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("template.xlsx"),
            preload: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    pub filter: String,
    /// Optional plain-text log file, appended to.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Embedded,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::File(path) => write!(f, "{}", path.display()),
            ConfigOrigin::Embedded => f.write_str("embedded default"),
        }
    }
}

/// Pick the config file to read.
///
/// Search order:
/// 1. `--config` flag
/// 2. `CONTRACTSHEET_CONFIG`
/// 3. `config.toml` next to the executable, if it exists
/// 4. none (embedded default)
pub fn resolve_config_path(
    flag: Option<&Path>,
    env: Option<&Path>,
    exe_dir: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(p) = flag.or(env) {
        return Some(p.to_path_buf());
    }
    let candidate = exe_dir?.join("config.toml");
    candidate.is_file().then_some(candidate)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Load configuration; an explicitly named file must exist and parse.
///
/// Runs before the subscriber is installed, so the caller logs the origin.
pub fn load_config(flag: Option<&Path>) -> anyhow::Result<(Config, ConfigOrigin)> {
    let env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let exe_dir = exe_dir();
    match resolve_config_path(flag, env.as_deref(), exe_dir.as_deref()) {
        Some(path) => {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config = parse_config(&contents)
                .with_context(|| format!("parsing config {}", path.display()))?;
            Ok((config, ConfigOrigin::File(path)))
        }
        None => Ok((parse_config(DEFAULT_CONFIG)?, ConfigOrigin::Embedded)),
    }
}

/// Hosting platforms hand the port over in `PORT`.
pub fn apply_port_override(config: &mut Config, port: Option<&str>) -> anyhow::Result<()> {
    if let Some(raw) = port.map(str::trim).filter(|s| !s.is_empty()) {
        config.server.port = raw
            .parse()
            .with_context(|| format!("{PORT_ENV} is not a valid port: {raw}"))?;
    }
    Ok(())
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

/// Resolve a relative template path: working directory first, then the
/// executable's directory, then the config file's directory.
pub fn resolve_template_path(path: &Path, origin: &ConfigOrigin) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    let mut candidates = Vec::new();
    if let Some(dir) = exe_dir() {
        candidates.push(dir.join(path));
    }
    if let ConfigOrigin::File(cfg) = origin {
        if let Some(dir) = cfg.parent() {
            candidates.push(dir.join(path));
        }
    }
    candidates
        .into_iter()
        .find(|p| p.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Build the template source. A preloaded template must be readable at start.
pub fn template_source(
    config: &TemplateConfig,
    origin: &ConfigOrigin,
) -> anyhow::Result<TemplateSource> {
    let path = resolve_template_path(&config.path, origin);
    if config.preload {
        let source = TemplateSource::preload(&path)
            .with_context(|| format!("preloading template {}", path.display()))?;
        tracing::info!("Template preloaded from {}", path.display());
        Ok(source)
    } else {
        if !path.is_file() {
            tracing::warn!(
                "Template not found at {}; requests will fail until it exists",
                path.display()
            );
        }
        Ok(TemplateSource::Path(path))
    }
}
