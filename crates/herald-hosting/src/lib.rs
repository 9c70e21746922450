//! herald-hosting：消息管线的宿主入口。
//!
//! # 教案式说明
//! - **意图（Why）**：核心 crate 只描述管线本身；真正对外提供服务还需要安装日志 Subscriber、加载配置、
//!   按请求装配并调用管线。本 crate 以命令行承担这一薄层。
//! - **结构（How）**：[`cli`] 定义参数；[`telemetry`] 安装全局 `tracing` Subscriber；
//!   [`resolve_config`] 合并配置文件与覆盖项；[`handle`] 处理一次请求。
//! - **契约（What）**：`handle` 每次调用都装配全新链路并恰好调用一次，返回值即响应正文。

pub mod cli;
pub mod telemetry;

use std::sync::Arc;

use anyhow::Context as _;
use herald_core::{Logger, PipelineAssembler, PipelineConfig, TracingLogger};

pub use cli::{Cli, DEFAULT_MESSAGE};

/// 合并配置来源：先读取文件（缺省为内置默认值），再应用命令行覆盖项。
pub fn resolve_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("loading pipeline configuration from {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(list) = &cli.stages {
        config = config.with_stage_list(list).context("parsing --stages")?;
    }
    if let Some(encoding) = cli.encoding {
        config = config.with_encoding(encoding);
    }
    Ok(config)
}

/// 以注入的日志器处理一次请求。
pub fn handle_with_logger(cli: &Cli, logger: Arc<dyn Logger>) -> anyhow::Result<String> {
    let assembler = PipelineAssembler::new(resolve_config(cli)?, logger);
    let config = assembler.config();
    tracing::debug!(stages = ?config.stages, encoding = %config.encoding, "handling message");
    assembler.run(&cli.message).context("running message pipeline")
}

/// 处理一次请求，日志经由 `tracing` 输出。
pub fn handle(cli: &Cli) -> anyhow::Result<String> {
    handle_with_logger(cli, Arc::new(TracingLogger))
}
