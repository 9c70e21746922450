//! 消息生产者契约与终端实现。
//!
//! # 教案式概览
//! - **意图（Why）**：整条管线只认识一个能力：“给定文本，产出文本”。终端生产者与所有装饰阶段都实现同一契约，
//!   因而可以任意嵌套。
//! - **结构（How）**：[`MessageProducer`] 定义 `send` 与若干诊断方法；[`BasicProducer`] 是递归组合的基例；
//!   [`ProducerDescriptor`] 为每个节点提供稳定的名称与分类。
//! - **契约（What）**：`send` 借用输入、返回新字符串，从不修改调用方持有的消息。

use std::{borrow::Cow, sync::Arc};

use crate::error::Result;

/// 管线节点的静态描述。
///
/// # 契约说明（What）
/// - `name`：稳定标识，建议使用 `herald.<component>` 命名；
/// - `category`：`terminal` 或阶段类别（`observability`、`codec`、`signature`）；
/// - `summary`：人类可读描述。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProducerDescriptor {
    name: Cow<'static, str>,
    category: Cow<'static, str>,
    summary: Cow<'static, str>,
}

impl ProducerDescriptor {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        category: impl Into<Cow<'static, str>>,
        summary: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            summary: summary.into(),
        }
    }

    /// 构造匿名描述，常用于测试中的自定义生产者。
    pub fn anonymous(component: impl Into<Cow<'static, str>>) -> Self {
        let component = component.into();
        Self {
            name: Cow::Owned(format!("anonymous.{component}")),
            category: Cow::Borrowed("unspecified"),
            summary: Cow::Owned(format!("auto-generated descriptor for {component}")),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }
}

/// 消息生产能力。
///
/// # 教案式说明
/// - **意图（Why）**：以单一 trait 表达终端与非终端节点，调用方只需持有最外层对象。
/// - **逻辑（How）**：
///   - `send` 为核心操作；非终端实现必须恰好委托一次内部生产者；
///   - `chain_len`/`chain_names` 暴露链路拓扑，终端返回 `1` 与自身名称，阶段在内部结果上追加自身。
/// - **契约（What）**：
///   - 实现需满足 `Send + Sync`，管线可以在任意线程上构建并调用；
///   - 失败以 [`crate::HeraldError`] 返回，调用方收到的是最先出错阶段的原始错误。
pub trait MessageProducer: Send + Sync {
    /// 处理一条消息并返回结果。
    fn send(&self, message: &str) -> Result<String>;

    /// 返回节点描述。
    fn descriptor(&self) -> ProducerDescriptor;

    /// 以本节点为根的链路长度（含终端）。
    fn chain_len(&self) -> usize {
        1
    }

    /// 从本节点到终端的描述名称序列。
    fn chain_names(&self) -> Vec<String> {
        vec![self.descriptor().name().to_owned()]
    }
}

/// 类型擦除后的生产者，装配器按此形态逐层包裹。
pub type BoxProducer = Box<dyn MessageProducer>;

impl<P: MessageProducer + ?Sized> MessageProducer for Box<P> {
    fn send(&self, message: &str) -> Result<String> {
        (**self).send(message)
    }

    fn descriptor(&self) -> ProducerDescriptor {
        (**self).descriptor()
    }

    fn chain_len(&self) -> usize {
        (**self).chain_len()
    }

    fn chain_names(&self) -> Vec<String> {
        (**self).chain_names()
    }
}

impl<P: MessageProducer + ?Sized> MessageProducer for Arc<P> {
    fn send(&self, message: &str) -> Result<String> {
        (**self).send(message)
    }

    fn descriptor(&self) -> ProducerDescriptor {
        (**self).descriptor()
    }

    fn chain_len(&self) -> usize {
        (**self).chain_len()
    }

    fn chain_names(&self) -> Vec<String> {
        (**self).chain_names()
    }
}

/// 默认的终端前缀。
pub const DEFAULT_PREFIX: &str = "پیام اصلی: ";

/// 终端生产者：在消息前拼接固定前缀，不再委托。
///
/// # 教案式说明
/// - **意图（Why）**：作为递归组合的基例，保证每条链路都有唯一的终点。
/// - **契约（What）**：`send(m) == prefix + m`；纯函数，永不失败，也不持有内部生产者。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicProducer {
    prefix: Cow<'static, str>,
}

impl BasicProducer {
    pub fn new(prefix: impl Into<Cow<'static, str>>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for BasicProducer {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl MessageProducer for BasicProducer {
    fn send(&self, message: &str) -> Result<String> {
        let mut out = String::with_capacity(self.prefix.len() + message.len());
        out.push_str(&self.prefix);
        out.push_str(message);
        Ok(out)
    }

    fn descriptor(&self) -> ProducerDescriptor {
        ProducerDescriptor::new(
            "herald.basic",
            "terminal",
            "在消息前拼接固定前缀的终端生产者",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_producer_prepends_default_prefix() {
        let producer = BasicProducer::default();
        assert_eq!(producer.send("hello").unwrap(), "پیام اصلی: hello");
        assert_eq!(producer.send("").unwrap(), DEFAULT_PREFIX);
    }

    #[test]
    fn basic_producer_is_a_single_node_chain() {
        let producer = BasicProducer::new("> ");
        assert_eq!(producer.chain_len(), 1);
        assert_eq!(producer.chain_names(), ["herald.basic"]);
        assert_eq!(producer.descriptor().category(), "terminal");
        assert!(!producer.descriptor().summary().is_empty());
    }

    #[test]
    fn boxed_and_shared_producers_forward_the_contract() {
        let boxed: BoxProducer = Box::new(BasicProducer::new("[b] "));
        assert_eq!(boxed.send("x").unwrap(), "[b] x");

        let shared: Arc<dyn MessageProducer> = Arc::new(BasicProducer::new("[a] "));
        assert_eq!(shared.send("x").unwrap(), "[a] x");
        assert_eq!(shared.chain_len(), 1);
    }

    #[test]
    fn anonymous_descriptor_is_namespaced() {
        let descriptor = ProducerDescriptor::anonymous("sidecar");
        assert_eq!(descriptor.name(), "anonymous.sidecar");
        assert_eq!(descriptor.category(), "unspecified");
    }
}
