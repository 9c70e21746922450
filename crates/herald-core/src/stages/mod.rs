//! 内置装饰阶段。
//!
//! | 阶段 | 位置 | 变换 |
//! |------|------|------|
//! | [`LogStage`] | 委托前 | 无，仅记录收到的消息 |
//! | [`EncryptStage`] | 委托前 | 以可逆文本编码变换消息 |
//! | [`SignatureStage`] | 委托后 | 在结果末尾追加签名块 |
//!
//! 每个阶段都泛型于内部生产者 `P`（默认 [`crate::BoxProducer`]），既能在编译期静态嵌套，
//! 也能经由对应的 [`crate::StageFactory`] 在运行期按配置动态装配。

mod encrypt;
mod log;
mod signature;

pub use encrypt::{EncryptStage, EncryptStageFactory};
pub use log::{
    DEFAULT_LOG_MESSAGE_PREFIX, DEFAULT_LOG_TARGET, LogStage, LogStageConfig, LogStageFactory,
};
pub use signature::{DEFAULT_SIGNATURE_BLOCK, SignatureStage, SignatureStageFactory};
