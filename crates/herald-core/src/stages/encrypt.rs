use crate::{
    encoding::EncodingScheme,
    error::Result,
    producer::{BoxProducer, MessageProducer, ProducerDescriptor},
    stage::{Stage, StageFactory, StageKind},
};

/// 编码前处理阶段：委托前把消息编码为文本安全表示。
///
/// # 教案式说明
/// - **意图（Why）**：演示“变换输入后再委托”的阶段形态。名称沿用历史叫法，但这只是一个占位变换，
///   **不提供任何机密性**：编码结果可被任何人还原。
/// - **逻辑（How）**：以 [`EncodingScheme::encode`] 编码消息的 UTF-8 字节，再把编码文本交给内部生产者。
/// - **契约（What）**：编码确定且对任意文本成立；输出只含方案字母表，后续阶段可把它当普通文本处理。
pub struct EncryptStage<P = BoxProducer> {
    inner: P,
    scheme: EncodingScheme,
}

impl<P: MessageProducer> EncryptStage<P> {
    /// 使用默认的 base64 方案包裹内部生产者。
    pub fn new(inner: P) -> Self {
        Self::with_scheme(inner, EncodingScheme::default())
    }

    pub fn with_scheme(inner: P, scheme: EncodingScheme) -> Self {
        Self { inner, scheme }
    }

    pub fn scheme(&self) -> EncodingScheme {
        self.scheme
    }
}

impl<P: MessageProducer> MessageProducer for EncryptStage<P> {
    fn send(&self, message: &str) -> Result<String> {
        let encoded = self.scheme.encode(message);
        self.inner.send(&encoded)
    }

    fn descriptor(&self) -> ProducerDescriptor {
        encrypt_descriptor()
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

impl<P: MessageProducer> Stage for EncryptStage<P> {
    type Inner = P;

    fn inner(&self) -> &P {
        &self.inner
    }

    fn kind(&self) -> StageKind {
        StageKind::Encrypt
    }
}

fn encrypt_descriptor() -> ProducerDescriptor {
    ProducerDescriptor::new(
        "herald.stage.encrypt",
        "codec",
        "委托前以可逆文本编码变换消息（非密码学加密）",
    )
}

/// [`EncryptStage`] 的构造器。
#[derive(Clone, Copy, Debug, Default)]
pub struct EncryptStageFactory {
    scheme: EncodingScheme,
}

impl EncryptStageFactory {
    pub fn new(scheme: EncodingScheme) -> Self {
        Self { scheme }
    }
}

impl StageFactory for EncryptStageFactory {
    fn descriptor(&self) -> ProducerDescriptor {
        encrypt_descriptor()
    }

    fn kind(&self) -> StageKind {
        StageKind::Encrypt
    }

    fn wrap(&self, inner: BoxProducer) -> BoxProducer {
        Box::new(EncryptStage::with_scheme(inner, self.scheme))
    }
}
