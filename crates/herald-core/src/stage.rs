//! 装饰阶段的共同契约。
//!
//! # 教案式说明
//! - **意图（Why）**：日志、编码、签名三个阶段共享同一组合方式：持有恰好一个内部生产者，并在委托前或委托后
//!   施加一次变换。把这部分契约抽出来，具体阶段只需描述自己的变换。
//! - **结构（How）**：
//!   - [`Stage`]：非终端生产者的接口，暴露内部生产者与阶段种类；
//!   - [`StageKind`]：封闭的阶段种类集合，配置文件与命令行以名称引用它；
//!   - [`StageFactory`]：阶段构造器，装配器按顺序调用 `wrap` 逐层包裹。
//! - **契约（What）**：
//!   - 内部生产者在构造时按值传入并私有持有，类型系统保证其存在，之后不可替换；
//!   - 每次 `send` 恰好调用一次内部 `send`，链路因此按严格全序执行每个阶段一次；
//!   - 所有权是单向嵌套的，链路天然无环且有限。

use std::{fmt, str::FromStr};

use crate::{
    error::HeraldError,
    producer::{BoxProducer, MessageProducer, ProducerDescriptor},
};

/// 阶段种类。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// 仅观测：委托前记录收到的消息。
    Log,
    /// 前处理：委托前把消息编码为文本安全表示。
    Encrypt,
    /// 后处理：委托后在结果末尾追加签名块。
    Signature,
}

impl StageKind {
    /// 全部阶段种类，顺序即默认管线的装配顺序（由内向外）。
    pub const ALL: [StageKind; 3] = [StageKind::Log, StageKind::Encrypt, StageKind::Signature];

    pub fn name(self) -> &'static str {
        match self {
            StageKind::Log => "log",
            StageKind::Encrypt => "encrypt",
            StageKind::Signature => "signature",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StageKind {
    type Err = HeraldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(StageKind::Log),
            "encrypt" => Ok(StageKind::Encrypt),
            "signature" => Ok(StageKind::Signature),
            _ => Err(HeraldError::UnknownStage { name: s.to_owned() }),
        }
    }
}

impl<'de> serde::Deserialize<'de> for StageKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 非终端生产者。
///
/// # 教案式说明
/// - **意图（Why）**：让测试与诊断代码可以沿链路向下遍历，而不必知道具体阶段类型。
/// - **契约（What）**：`inner` 返回构造时传入的生产者；实现者的 `send` 必须且只能调用它一次。
pub trait Stage: MessageProducer {
    type Inner: MessageProducer;

    /// 被包裹的内部生产者。
    fn inner(&self) -> &Self::Inner;

    /// 阶段种类。
    fn kind(&self) -> StageKind;
}

/// 阶段构造器。
///
/// # 教案式说明
/// - **意图（Why）**：装配器只面对“阶段构造器”的有序列表，按 `producer := factory.wrap(producer)`
///   折叠即可得到整条链路；构造器持有阶段配置与注入的协作者（例如日志器）。
/// - **契约（What）**：
///   - `wrap` 取得内部生产者的所有权并返回新的外层生产者；
///   - 构造器本身无可变状态，可重复调用、跨线程共享，每次调用产出独立的新阶段实例。
pub trait StageFactory: Send + Sync {
    fn descriptor(&self) -> ProducerDescriptor;

    fn kind(&self) -> StageKind;

    fn wrap(&self, inner: BoxProducer) -> BoxProducer;
}
