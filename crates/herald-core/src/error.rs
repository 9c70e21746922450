//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 为消息管线对外暴露的错误语义提供集中定义，装配期（配置、阶段名）与运行期（编码、自定义生产者）
//!   的失败都落在同一个枚举中，调用方只需处理一种错误类型；
//! - 每个变体携带稳定错误码，便于日志与告警按 `herald.*` 前缀聚合。
//!
//! ## 设计要求（What）
//! - 所有错误类型派生 `thiserror::Error`，与 `std::error::Error` 生态兼容；
//! - 任一阶段返回的错误按原样向最外层 `send` 的调用方传播，管线内部不做重试或吞没；
//! - 日志失败不属于本枚举的范畴：日志阶段自行隔离该类故障。

use std::path::PathBuf;

use thiserror::Error;

/// 管线统一结果别名。
pub type Result<T, E = HeraldError> = core::result::Result<T, E>;

/// 消息管线错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：聚合装配与发送路径上的全部失败，提供可直接用 `?` 传播的单一类型。
/// - **契约 (What)**：
///   - 所有变体满足 `Send + Sync + 'static`，可跨线程传递；
///   - [`HeraldError::code`] 返回低基数、稳定的错误码，适合作为日志字段或指标标签。
/// - **设计权衡 (Trade-offs)**：上下文以 `String` 保存，牺牲少量分配换取可读性。
#[derive(Debug, Error)]
pub enum HeraldError {
    /// 配置或命令行中出现了未知的阶段名称。
    ///
    /// - **意图 (Why)**：阶段构造缺少合法来源时必须快速失败，绝不静默退化为终端生产者。
    /// - **契约 (What)**：`name` 为原始输入，保留大小写以便排障。
    #[error("unknown pipeline stage `{name}` (expected one of: log, encrypt, signature)")]
    UnknownStage { name: String },

    /// 文本无法按指定编码方案解码。
    #[error("failed to decode `{scheme}` payload: {detail}")]
    Decode {
        scheme: &'static str,
        detail: String,
    },

    /// 解码后的字节不是合法 UTF-8。
    #[error("decoded `{scheme}` payload is not valid UTF-8")]
    InvalidUtf8 { scheme: &'static str },

    /// 配置文本解析失败。
    #[error("invalid pipeline configuration: {detail}")]
    Config { detail: String },

    /// 读取配置文件失败。
    #[error("failed to read configuration `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 外部实现的生产者或阶段报告的失败。
    ///
    /// - **意图 (Why)**：内置阶段均为全函数，但调用方可以注入自定义生产者；
    ///   该变体为它们提供与内置错误一致的传播通道。
    #[error("producer `{stage}` failed: {detail}")]
    Producer { stage: String, detail: String },
}

impl HeraldError {
    /// 以自定义生产者名称构造运行期错误。
    pub fn producer(stage: impl Into<String>, detail: impl Into<String>) -> Self {
        HeraldError::Producer {
            stage: stage.into(),
            detail: detail.into(),
        }
    }

    /// 返回稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            HeraldError::UnknownStage { .. } => "herald.config.unknown_stage",
            HeraldError::Decode { .. } => "herald.encoding.decode",
            HeraldError::InvalidUtf8 { .. } => "herald.encoding.invalid_utf8",
            HeraldError::Config { .. } => "herald.config.invalid",
            HeraldError::Io { .. } => "herald.config.io",
            HeraldError::Producer { .. } => "herald.producer.failure",
        }
    }
}

impl From<toml::de::Error> for HeraldError {
    fn from(err: toml::de::Error) -> Self {
        HeraldError::Config {
            detail: err.to_string(),
        }
    }
}
