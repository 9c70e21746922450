#![deny(unsafe_code)]

//! herald-core：可叠加装饰阶段的消息生产管线。
//!
//! # 教案式概览
//! - **意图（Why）**：以一个终端生产者为根，把日志、编码、签名等相互独立的处理阶段逐层包裹，得到一条
//!   输出确定、且依赖包裹顺序的组合管线。
//! - **结构（How）**：
//!   - [`producer`]：`send(text) -> text` 能力契约与终端实现 [`BasicProducer`]；
//!   - [`stage`]：装饰阶段的共同契约与阶段构造器；
//!   - [`stages`]：内置的 [`LogStage`]、[`EncryptStage`]、[`SignatureStage`]；
//!   - [`assembler`]：按配置折叠阶段并调用一次的 [`PipelineAssembler`]；
//!   - [`config`]、[`encoding`]、[`error`]、[`observability`]：配置、编码方案、错误域与日志契约。
//! - **契约（What）**：纯同步、进程内执行；一次顶层调用沿嵌套链路恰好执行每个阶段一次，
//!   要么返回结果，要么原样传播首个失败阶段的错误。
//!
//! ```
//! use std::sync::Arc;
//! use herald_core::{PipelineAssembler, PipelineConfig, test_stubs::NoopLogger};
//!
//! let assembler = PipelineAssembler::new(PipelineConfig::default(), Arc::new(NoopLogger));
//! let out = assembler.run("سلام کاربر عزیز!").unwrap();
//! assert!(out.starts_with("پیام اصلی: "));
//! ```

pub mod assembler;
pub mod config;
pub mod encoding;
pub mod error;
pub mod observability;
pub mod producer;
pub mod stage;
pub mod stages;
pub mod test_stubs;

pub use assembler::{PipelineAssembler, assemble_with};
pub use config::PipelineConfig;
pub use encoding::EncodingScheme;
pub use error::{HeraldError, Result};
pub use observability::{KeyValue, LogRecord, LogSeverity, Logger, TracingLogger};
pub use producer::{BasicProducer, BoxProducer, DEFAULT_PREFIX, MessageProducer, ProducerDescriptor};
pub use stage::{Stage, StageFactory, StageKind};
pub use stages::{
    EncryptStage, EncryptStageFactory, LogStage, LogStageConfig, LogStageFactory, SignatureStage,
    SignatureStageFactory,
};
