//! 日志契约的测试桩集合。
//!
//! # 设计定位（Why）
//! - 日志阶段与装配器的测试需要满足 [`Logger`] 契约，但多数场景只关心消息结果或调用次数；
//! - 集中提供桩对象，接口调整时只需在此处同步。
//!
//! # 使用方式（How）
//! - [`NoopLogger`]：完全忽略输入；
//! - [`RecordingLogger`]：把记录复制为拥有所有权的 [`CapturedRecord`]，供断言使用；
//! - [`PanickingLogger`]：模拟不可用的日志后端，用于验证故障隔离。
//!
//! # 风险与权衡（Trade-offs）
//! - 这些类型随 crate 公开，生产代码若依赖它们应显式说明原因。

use std::sync::Mutex;

use crate::observability::{LogRecord, LogSeverity, Logger};

/// 空实现：任何记录都被丢弃。
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _record: &LogRecord<'_>) {}
}

/// [`RecordingLogger`] 捕获的记录副本。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedRecord {
    pub message: String,
    pub severity: LogSeverity,
    pub target: Option<String>,
    pub attributes: Vec<(String, String)>,
}

impl CapturedRecord {
    /// 按键查找字段值。
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// 记录型实现：按到达顺序保存全部日志。
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<CapturedRecord>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 返回已捕获记录的快照。
    pub fn records(&self) -> Vec<CapturedRecord> {
        match self.records.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 已捕获记录的数量。
    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Logger for RecordingLogger {
    fn log(&self, record: &LogRecord<'_>) {
        let captured = CapturedRecord {
            message: record.message.to_string(),
            severity: record.severity,
            target: record.target.map(str::to_owned),
            attributes: record
                .attributes
                .iter()
                .map(|kv| (kv.key.to_owned(), kv.value.to_string()))
                .collect(),
        };
        match self.records.lock() {
            Ok(mut guard) => guard.push(captured),
            Err(poisoned) => poisoned.into_inner().push(captured),
        }
    }
}

/// 故障注入实现：每次调用都会 panic，模拟日志后端不可用。
#[derive(Debug, Default, Clone, Copy)]
pub struct PanickingLogger;

impl Logger for PanickingLogger {
    fn log(&self, _record: &LogRecord<'_>) {
        panic!("logging sink unavailable");
    }
}
