//! 日志契约与 `tracing` 桥接。
//!
//! # 教案式说明
//! - **意图（Why）**：日志阶段只依赖抽象的 [`Logger`]，由装配方注入具体实现；核心逻辑因此可以在
//!   没有真实日志后端的情况下测试（注入 [`crate::test_stubs`] 中的桩对象即可）。
//! - **结构（How）**：[`LogRecord`] 打包消息、级别、目标与结构化字段；[`Logger::log`] 是唯一必需方法，
//!   其余便捷方法都归约到它；[`TracingLogger`] 把记录转发到 `tracing` 生态。
//! - **契约（What）**：`log` 没有返回值，调用方以“发出即忘”的方式使用；实现应尽量非阻塞。

use std::{borrow::Cow, fmt, str::FromStr};

use crate::error::HeraldError;

/// 日志级别，取 OpenTelemetry `SeverityNumber` 与 `tracing::Level` 的交集。
///
/// 解析时忽略大小写与首尾空白，`warning` 视同 `warn`。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogSeverity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogSeverity {
    /// 返回小写名称，用于结构化输出。
    pub fn as_str(self) -> &'static str {
        match self {
            LogSeverity::Trace => "trace",
            LogSeverity::Debug => "debug",
            LogSeverity::Info => "info",
            LogSeverity::Warn => "warn",
            LogSeverity::Error => "error",
        }
    }
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogSeverity {
    type Err = HeraldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogSeverity::Trace),
            "debug" => Ok(LogSeverity::Debug),
            "info" => Ok(LogSeverity::Info),
            "warn" | "warning" => Ok(LogSeverity::Warn),
            "error" => Ok(LogSeverity::Error),
            _ => Err(HeraldError::Config {
                detail: format!("unknown log severity `{s}`"),
            }),
        }
    }
}

impl<'de> serde::Deserialize<'de> for LogSeverity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 单个结构化字段。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue<'a> {
    pub key: &'a str,
    pub value: Cow<'a, str>,
}

impl<'a> KeyValue<'a> {
    pub fn new(key: &'a str, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// 单条结构化日志记录。
///
/// # 教案式说明
/// - **结构（How）**：`message` 使用 `Cow`，静态与动态消息都无需额外拷贝；`target` 对应观测平台上的分类标签；
///   `attributes` 为借用切片。
/// - **契约（What）**：记录只包含引用，提交给 [`Logger`] 后视为不可变；若实现需要延迟输出，必须自行克隆。
#[derive(Debug)]
pub struct LogRecord<'a> {
    pub message: Cow<'a, str>,
    pub severity: LogSeverity,
    pub target: Option<&'a str>,
    pub attributes: &'a [KeyValue<'a>],
}

impl<'a> LogRecord<'a> {
    pub fn new(
        message: impl Into<Cow<'a, str>>,
        severity: LogSeverity,
        target: Option<&'a str>,
        attributes: &'a [KeyValue<'a>],
    ) -> Self {
        Self {
            message: message.into(),
            severity,
            target,
            attributes,
        }
    }

    /// 按键查找字段值。
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|kv| kv.key == key)
            .map(|kv| kv.value.as_ref())
    }
}

/// 日志接口的核心契约。
///
/// # 教案式说明
/// - **意图（Why）**：统一管线对宿主日志实现的依赖，可对接 `tracing`、文件或测试桩。
/// - **逻辑（How）**：`log` 为唯一必需方法；`info`/`warn` 便捷方法内部构造 [`LogRecord`] 再调用 `log`。
/// - **契约（What）**：
///   - 调用是“发出即忘”的，没有返回值可供调用方消费；
///   - 实现不应 panic；即便发生 panic，日志阶段也会将其隔离，不影响消息结果。
pub trait Logger: Send + Sync + 'static {
    /// 提交结构化日志。
    fn log(&self, record: &LogRecord<'_>);

    /// 输出 INFO 日志（无额外字段）。
    fn info(&self, message: &str) {
        self.log(&LogRecord::new(message, LogSeverity::Info, None, &[]));
    }

    /// 输出 WARN 日志（无额外字段）。
    fn warn(&self, message: &str) {
        self.log(&LogRecord::new(message, LogSeverity::Warn, None, &[]));
    }
}

/// 将 [`LogRecord`] 转发到 `tracing` 的生产实现。
///
/// # 教案式说明
/// - **意图（Why）**：宿主进程通过 `tracing-subscriber` 统一输出，日志阶段无需感知具体 Subscriber。
/// - **逻辑（How）**：按级别选择对应的 `tracing` 宏；`tracing` 的 target 必须是编译期常量，因此记录自身的
///   `target` 以 `herald.target` 字段携带，结构化字段拼接为 `key=value` 序列放入 `herald.attributes`。
/// - **风险提示（Trade-offs）**：字段拼接会产生一次分配；高频链路可改为自定义 Subscriber 直接消费记录。
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, record: &LogRecord<'_>) {
        let target = record.target.unwrap_or("herald");
        let attributes = record
            .attributes
            .iter()
            .map(|kv| format!("{}={}", kv.key, kv.value))
            .collect::<Vec<_>>()
            .join(" ");
        let message = record.message.as_ref();
        match record.severity {
            LogSeverity::Trace => {
                tracing::trace!(herald.target = target, herald.attributes = %attributes, "{message}")
            }
            LogSeverity::Debug => {
                tracing::debug!(herald.target = target, herald.attributes = %attributes, "{message}")
            }
            LogSeverity::Info => {
                tracing::info!(herald.target = target, herald.attributes = %attributes, "{message}")
            }
            LogSeverity::Warn => {
                tracing::warn!(herald.target = target, herald.attributes = %attributes, "{message}")
            }
            LogSeverity::Error => {
                tracing::error!(herald.target = target, herald.attributes = %attributes, "{message}")
            }
        }
    }
}
