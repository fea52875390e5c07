//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `MAIMAI__*` 覆盖（双下划线表示嵌套，
//! 如 `MAIMAI__CATALOG__HOME_REGION=US`）。API Key 只走环境变量，不进配置文件。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub ranking: RankingSection,
}

/// [app] 段：应用名
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppSection {
    pub name: Option<String>,
}

/// [catalog] 段：目录 API 端点、超时与默认地区；API Key 取环境变量 `RAPIDAPI_KEY`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub base_url: String,
    /// x-rapidapi-host 请求头
    pub api_host: String,
    /// 单次目录调用超时（秒）
    pub timeout_secs: u64,
    /// region 参数缺省值（主场地区）
    pub home_region: String,
    /// 搜索接口的 language 参数，不设置则不携带
    pub language: Option<String>,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            base_url: "https://real-time-amazon-data.p.rapidapi.com".to_string(),
            api_host: "real-time-amazon-data.p.rapidapi.com".to_string(),
            timeout_secs: 15,
            home_region: "IN".to_string(),
            language: None,
        }
    }
}

/// [ranking] 段：可选的 LLM 相关性重排序
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RankingSection {
    /// 关闭时搜索结果保持远端原始顺序
    pub enabled: bool,
    /// 后端：deepseek / openai
    pub provider: String,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl Default for RankingSection {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: "deepseek".to_string(),
            model: None,
            base_url: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSection::default(),
            catalog: CatalogSection::default(),
            ranking: RankingSection::default(),
        }
    }
}

/// 从 config 目录加载配置，环境变量 MAIMAI__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 MAIMAI__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("MAIMAI")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}
