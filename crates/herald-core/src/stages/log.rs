use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

use crate::{
    error::Result,
    observability::{KeyValue, LogRecord, LogSeverity, Logger},
    producer::{BoxProducer, MessageProducer, ProducerDescriptor},
    stage::{Stage, StageFactory, StageKind},
};

/// 日志字段键常量，保持跨阶段的命名一致性。
const ATTR_MESSAGE: &str = "herald.stage.log.message";
const ATTR_MESSAGE_CHARS: &str = "herald.stage.log.message_chars";

/// 默认日志目标。
pub const DEFAULT_LOG_TARGET: &str = "herald.stage.log";
/// 默认日志消息前缀（“发送消息: ”）。
pub const DEFAULT_LOG_MESSAGE_PREFIX: &str = "ارسال پیام: ";

/// 日志阶段配置。
///
/// # 教案式说明
/// - **意图（Why）**：不同部署对日志目标、级别与文案的要求不同，外部化后阶段本身保持无状态。
/// - **契约（What）**：
///   - `target`：面向日志后端的分类标签；
///   - `severity`：每条记录的级别，默认 `Info`；
///   - `message_prefix`：拼在原始消息前的文案，记录的消息为 `message_prefix + message`。
/// - **风险提示（Trade-offs）**：高频链路使用 `Info` 可能造成日志风暴，可调低为 `Debug`。
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogStageConfig {
    pub target: String,
    pub severity: LogSeverity,
    pub message_prefix: String,
}

impl Default for LogStageConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_LOG_TARGET.to_owned(),
            severity: LogSeverity::Info,
            message_prefix: DEFAULT_LOG_MESSAGE_PREFIX.to_owned(),
        }
    }
}

/// 仅观测的前处理阶段：委托前记录本阶段收到的消息，结果原样返回。
///
/// # 教案式说明
/// - **意图（Why）**：在链路中任意位置观察经过的消息，而不影响消息内容。
/// - **逻辑（How）**：
///   1. 组装结构化字段并调用注入的 [`Logger`]，调用包裹在 `catch_unwind` 中；
///   2. 以未修改的消息委托内部生产者一次；
///   3. 返回内部结果。
/// - **契约（What）**：
///   - 每次 `send` 恰好产生一条记录，内容是本阶段收到的未变换消息；
///   - 日志器 panic 被吞没并以 `tracing` 告警，返回值与移除本阶段时完全一致。
pub struct LogStage<P = BoxProducer> {
    inner: P,
    logger: Arc<dyn Logger>,
    config: Arc<LogStageConfig>,
}

impl<P: MessageProducer> LogStage<P> {
    /// 使用默认配置包裹内部生产者。
    pub fn new(inner: P, logger: Arc<dyn Logger>) -> Self {
        Self::with_config(inner, logger, Arc::new(LogStageConfig::default()))
    }

    pub fn with_config(inner: P, logger: Arc<dyn Logger>, config: Arc<LogStageConfig>) -> Self {
        Self {
            inner,
            logger,
            config,
        }
    }

    fn record(&self, message: &str) {
        let chars = message.chars().count().to_string();
        let fields = [
            KeyValue::new(ATTR_MESSAGE, message),
            KeyValue::new(ATTR_MESSAGE_CHARS, chars),
        ];
        let text = format!("{}{}", self.config.message_prefix, message);
        let record = LogRecord::new(
            text,
            self.config.severity,
            Some(self.config.target.as_str()),
            &fields,
        );
        let outcome = catch_unwind(AssertUnwindSafe(|| self.logger.log(&record)));
        if outcome.is_err() {
            tracing::warn!(
                herald.target = %self.config.target,
                "logging sink panicked; message delivery continues"
            );
        }
    }
}

impl<P: MessageProducer> MessageProducer for LogStage<P> {
    fn send(&self, message: &str) -> Result<String> {
        self.record(message);
        self.inner.send(message)
    }

    fn descriptor(&self) -> ProducerDescriptor {
        log_descriptor()
    }

    fn chain_len(&self) -> usize {
        self.inner.chain_len() + 1
    }

    fn chain_names(&self) -> Vec<String> {
        let mut names = vec![self.descriptor().name().to_owned()];
        names.extend(self.inner.chain_names());
        names
    }
}

impl<P: MessageProducer> Stage for LogStage<P> {
    type Inner = P;

    fn inner(&self) -> &P {
        &self.inner
    }

    fn kind(&self) -> StageKind {
        StageKind::Log
    }
}

fn log_descriptor() -> ProducerDescriptor {
    ProducerDescriptor::new(
        "herald.stage.log",
        "observability",
        "委托前记录经过的消息",
    )
}

/// [`LogStage`] 的构造器，持有配置与注入的日志器。
#[derive(Clone)]
pub struct LogStageFactory {
    config: Arc<LogStageConfig>,
    logger: Arc<dyn Logger>,
}

impl LogStageFactory {
    pub fn new(config: LogStageConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            config: Arc::new(config),
            logger,
        }
    }
}

impl StageFactory for LogStageFactory {
    fn descriptor(&self) -> ProducerDescriptor {
        log_descriptor()
    }

    fn kind(&self) -> StageKind {
        StageKind::Log
    }

    fn wrap(&self, inner: BoxProducer) -> BoxProducer {
        Box::new(LogStage::with_config(
            inner,
            Arc::clone(&self.logger),
            Arc::clone(&self.config),
        ))
    }
}
