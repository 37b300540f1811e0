use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 状态转换错误
    #[error("状态转换错误: {0}")]
    Transition(#[from] TransitionError),
    /// 终端读写错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// API 调用错误
///
/// 对用户来说这些错误没有区别，统一显示为"请求失败"；
/// 区分它们只是为了日志。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（连接、超时等）
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 后端返回非 2xx 状态码
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BadStatus {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// 响应体不是期望的 JSON 结构
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 后端地址无效
    #[error("后端地址无效: '{0}'")]
    InvalidBackendUrl(String),
    /// 创建 HTTP 客户端失败
    #[error("创建 HTTP 客户端失败: {0}")]
    HttpClientBuildFailed(#[source] reqwest::Error),
}

/// 状态转换错误
///
/// 调用方在当前状态下请求了不允许的转换，没有发出任何请求。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// 只有在"全部题目"模式下才能翻页
    #[error("当前不是分页浏览全部题目的模式，无法翻页")]
    NotPaged,
    /// 页码超出范围
    #[error("页码 {page} 超出范围 [1, {max_page}]")]
    PageOutOfRange { page: u32, max_page: u32 },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建环境变量解析错误
    pub fn env_var_parse_failed(
        var_name: impl Into<String>,
        value: impl Into<String>,
        expected_type: impl Into<String>,
    ) -> Self {
        AppError::Config(ConfigError::EnvVarParseFailed {
            var_name: var_name.into(),
            value: value.into(),
            expected_type: expected_type.into(),
        })
    }
}

impl ApiError {
    /// 创建网络请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

/// API 调用结果类型
pub type ApiResult<T> = Result<T, ApiError>;
