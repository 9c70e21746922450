use std::sync::Arc;

use crate::{
    config::PipelineConfig,
    error::Result,
    observability::Logger,
    producer::{BasicProducer, BoxProducer},
    stage::{StageFactory, StageKind},
    stages::{EncryptStageFactory, LogStageFactory, SignatureStageFactory},
};

/// 将终端生产者与按顺序排列的阶段构造器折叠为一条链路。
///
/// 第一个构造器包裹终端，之后每个构造器包裹到目前为止装配出的生产者；返回值是最外层阶段。
pub fn assemble_with<I>(terminal: BoxProducer, factories: I) -> BoxProducer
where
    I: IntoIterator,
    I::Item: AsRef<dyn StageFactory>,
{
    factories
        .into_iter()
        .fold(terminal, |producer, factory| factory.as_ref().wrap(producer))
}

/// `PipelineAssembler` 负责把配置与注入的日志器聚合为可直接调用的管线。
///
/// # 教案级说明
/// - **意图（Why）**：
///   - 每次请求都需要一条全新的链路，阶段实例之间不共享任何可变状态；
///   - 集中在一个入口完成“选阶段、定顺序、包裹、调用一次”，调用方无需手工嵌套。
/// - **执行逻辑（How）**：
///   1. [`Self::factories`] 按 `config.stages` 的顺序为每个阶段种类生成构造器；
///   2. [`Self::assemble`] 以 [`BasicProducer`] 为根，经由 [`assemble_with`] 逐层包裹；
///   3. [`Self::run`] 装配新链路并在最外层调用 `send` 恰好一次。
/// - **契约（What）**：
///   - 包裹顺序决定效果顺序：前处理阶段越靠外越先执行，后处理阶段越靠外越晚执行；
///   - 对 N 个阶段，一次 `run` 恰好触发 N + 1 次 `send`；
///   - 装配器本身无状态，`Send + Sync`，可在多个线程上并发调用。
/// - **风险与权衡（Trade-offs）**：
///   - 每次 `run` 都会重新分配链路，换取请求间的完全隔离；
///   - 同一阶段种类可以在 `stages` 中出现多次，每次出现都会生成独立实例。
#[derive(Clone)]
pub struct PipelineAssembler {
    config: Arc<PipelineConfig>,
    logger: Arc<dyn Logger>,
}

impl PipelineAssembler {
    pub fn new(config: PipelineConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            config: Arc::new(config),
            logger,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 为单个阶段种类生成构造器。
    pub fn factory(&self, kind: StageKind) -> Arc<dyn StageFactory> {
        match kind {
            StageKind::Log => Arc::new(LogStageFactory::new(
                self.config.log.clone(),
                Arc::clone(&self.logger),
            )),
            StageKind::Encrypt => Arc::new(EncryptStageFactory::new(self.config.encoding)),
            StageKind::Signature => Arc::new(SignatureStageFactory::new(
                self.config.signature_block.clone(),
            )),
        }
    }

    /// 按配置顺序生成全部构造器。
    pub fn factories(&self) -> Vec<Arc<dyn StageFactory>> {
        self.config
            .stages
            .iter()
            .map(|kind| self.factory(*kind))
            .collect()
    }

    /// 装配一条全新的链路。
    pub fn assemble(&self) -> BoxProducer {
        let terminal: BoxProducer = Box::new(BasicProducer::new(self.config.prefix.clone()));
        assemble_with(terminal, self.factories())
    }

    /// 装配新链路并处理一条消息。
    pub fn run(&self, message: &str) -> Result<String> {
        let pipeline = self.assemble();
        tracing::debug!(
            chain = ?pipeline.chain_names(),
            stages = pipeline.chain_len() - 1,
            "pipeline assembled"
        );
        pipeline.send(message)
    }
}

impl std::fmt::Debug for PipelineAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAssembler")
            .field("config", &self.config)
            .field("logger", &"opaque")
            .finish()
    }
}
