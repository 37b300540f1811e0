use crate::error::{AppError, AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 重叠请求的响应处理策略
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// 只应用最新发出的请求的响应，过期响应被丢弃
    #[default]
    Sequenced,
    /// 最后到达的响应覆盖状态（不做任何保护）
    LastArrival,
}

impl FromStr for ResponseOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequenced" => Ok(Self::Sequenced),
            "last_arrival" | "last-arrival" => Ok(Self::LastArrival),
            other => Err(other.to_string()),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端地址，例如 http://127.0.0.1:5000
    pub backend_url: String,
    /// 单个请求的超时时间（秒）
    pub request_timeout_secs: u64,
    /// 可选的 Bearer token，随每个请求发送
    pub api_token: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    pub response_ordering: ResponseOrdering,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 10,
            api_token: None,
            verbose_logging: false,
            response_ordering: ResponseOrdering::Sequenced,
        }
    }
}

impl Config {
    /// 加载配置
    ///
    /// 如果设置了 `TRIVIA_CONFIG`，先读取该 TOML 文件，再用环境变量覆盖。
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("TRIVIA_CONFIG") {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::default(),
        };
        Self::from_lookup(base, |name| std::env::var(name).ok())
    }

    /// 读取 TOML 配置文件
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        config.validated()
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用 `lookup` 提供的变量覆盖 `base`
    fn from_lookup(base: Self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let mut config = base;

        if let Some(url) = lookup("TRIVIA_BACKEND_URL") {
            config.backend_url = url;
        }
        if let Some(value) = lookup("REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = value
                .parse()
                .map_err(|_| AppError::env_var_parse_failed("REQUEST_TIMEOUT_SECS", &value, "u64"))?;
        }
        if let Some(token) = lookup("TRIVIA_API_TOKEN") {
            config.api_token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(value) = lookup("VERBOSE_LOGGING") {
            config.verbose_logging = value
                .parse()
                .map_err(|_| AppError::env_var_parse_failed("VERBOSE_LOGGING", &value, "bool"))?;
        }
        if let Some(value) = lookup("RESPONSE_ORDERING") {
            config.response_ordering = value.parse().map_err(|_| {
                AppError::env_var_parse_failed(
                    "RESPONSE_ORDERING",
                    &value,
                    "sequenced | last_arrival",
                )
            })?;
        }

        config.validated()
    }

    /// 校验并规范化后端地址（去掉末尾的 `/`）
    fn validated(mut self) -> AppResult<Self> {
        let url = self.backend_url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBackendUrl(self.backend_url).into());
        }
        self.backend_url = url;
        Ok(self)
    }
}
