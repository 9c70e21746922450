use std::borrow::Cow;

use crate::{
    error::Result,
    producer::{BoxProducer, MessageProducer, ProducerDescriptor},
    stage::{Stage, StageFactory, StageKind},
};

/// 默认签名块：换行加固定署名（“签名: 网站管理”）。
pub const DEFAULT_SIGNATURE_BLOCK: &str = "\n-- امضا: مدیریت سایت";

/// 签名后处理阶段：先委托，再在结果末尾追加签名块。
///
/// # 教案式说明
/// - **意图（Why）**：演示“变换输出”的阶段形态，与编码阶段互为镜像。
/// - **契约（What）**：委托前不改动消息；返回值恰为 `inner.send(m)? + signature_block`；
///   内部生产者失败时原样向上传播，不追加签名。
pub struct SignatureStage<P = BoxProducer> {
    inner: P,
    block: Cow<'static, str>,
}

impl<P: MessageProducer> SignatureStage<P> {
    /// 使用默认签名块包裹内部生产者。
    pub fn new(inner: P) -> Self {
        Self::with_block(inner, DEFAULT_SIGNATURE_BLOCK)
    }

    pub fn with_block(inner: P, block: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner,
            block: block.into(),
        }
    }

    pub fn block(&self) -> &str {
        &self.block
    }
}

impl<P: MessageProducer> MessageProducer for SignatureStage<P> {
    fn send(&self, message: &str) -> Result<String> {
        let mut out = self.inner.send(message)?;
        out.push_str(&self.block);
        Ok(out)
    }

    fn descriptor(&self) -> ProducerDescriptor {
        signature_descriptor()
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

impl<P: MessageProducer> Stage for SignatureStage<P> {
    type Inner = P;

    fn inner(&self) -> &P {
        &self.inner
    }

    fn kind(&self) -> StageKind {
        StageKind::Signature
    }
}

fn signature_descriptor() -> ProducerDescriptor {
    ProducerDescriptor::new(
        "herald.stage.signature",
        "signature",
        "委托后在结果末尾追加固定签名块",
    )
}

/// [`SignatureStage`] 的构造器。
#[derive(Clone, Debug)]
pub struct SignatureStageFactory {
    block: Cow<'static, str>,
}

impl SignatureStageFactory {
    pub fn new(block: impl Into<Cow<'static, str>>) -> Self {
        Self {
            block: block.into(),
        }
    }
}

impl Default for SignatureStageFactory {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNATURE_BLOCK)
    }
}

impl StageFactory for SignatureStageFactory {
    fn descriptor(&self) -> ProducerDescriptor {
        signature_descriptor()
    }

    fn kind(&self) -> StageKind {
        StageKind::Signature
    }

    fn wrap(&self, inner: BoxProducer) -> BoxProducer {
        Box::new(SignatureStage::with_block(inner, self.block.clone()))
    }
}
