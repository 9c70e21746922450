//! 进程级 `tracing` Subscriber 安装。
//!
//! # 教案式说明
//! - **意图（Why）**：日志阶段默认经由 [`herald_core::TracingLogger`] 输出到 `tracing`；宿主进程需要在启动时
//!   安装一次全局 Subscriber，日志才会真正落地。
//! - **逻辑（How）**：
//!   1. 检查本模块是否已安装、外部是否已提前设置 Subscriber；
//!   2. 以 `RUST_LOG`（优先）或调用方给出的过滤串构造 `EnvFilter`，缺省为 `info`；
//!   3. 组装 `fmt` Layer（输出到 stderr，stdout 留给响应正文）并设置为全局默认；
//!   4. 将安装状态写入 `INSTALLED`，保证进程生命周期内只安装一次。
//! - **契约（What）**：重复调用返回 [`InstallError::AlreadyInstalled`]；外部已设置 Subscriber 时返回
//!   [`InstallError::SubscriberAlreadySet`]；过滤串非法时返回 [`InstallError::InvalidFilter`]。

use std::sync::OnceLock;

use tracing::dispatcher;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

/// 缺省过滤级别。
pub const DEFAULT_FILTER: &str = "info";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// 安装过程可能出现的错误。
#[derive(Debug)]
pub enum InstallError {
    /// `install_tracing` 被重复调用。
    AlreadyInstalled,
    /// 外部提前设置了全局 `tracing` Subscriber。
    SubscriberAlreadySet,
    /// 过滤表达式无法解析。
    InvalidFilter(String),
    /// 设置全局 Subscriber 失败的底层错误。
    SetGlobalSubscriber(dispatcher::SetGlobalDefaultError),
}

impl core::fmt::Display for InstallError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InstallError::AlreadyInstalled => f.write_str("tracing subscriber already installed"),
            InstallError::SubscriberAlreadySet => {
                f.write_str("a global tracing subscriber was set by someone else")
            }
            InstallError::InvalidFilter(reason) => write!(f, "invalid log filter: {reason}"),
            InstallError::SetGlobalSubscriber(err) => {
                write!(f, "failed to set global tracing subscriber: {err}")
            }
        }
    }
}

impl std::error::Error for InstallError {}

/// 解析过滤表达式：`RUST_LOG` 优先，其次是 `fallback`，最后是 [`DEFAULT_FILTER`]。
pub fn build_filter(fallback: Option<&str>) -> Result<EnvFilter, InstallError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(fallback.unwrap_or(DEFAULT_FILTER))
        .map_err(|err| InstallError::InvalidFilter(err.to_string()))
}

/// 安装全局 `fmt + EnvFilter` Subscriber。
pub fn install_tracing(filter: Option<&str>) -> Result<(), InstallError> {
    if INSTALLED.get().is_some() {
        return Err(InstallError::AlreadyInstalled);
    }
    if dispatcher::has_been_set() {
        return Err(InstallError::SubscriberAlreadySet);
    }

    let subscriber = tracing_subscriber::registry()
        .with(build_filter(filter)?)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true));
    tracing::subscriber::set_global_default(subscriber).map_err(InstallError::SetGlobalSubscriber)?;

    INSTALLED.set(()).map_err(|_| InstallError::AlreadyInstalled)
}
