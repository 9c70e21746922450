//! 管线配置。
//!
//! # 教案式说明
//! - **意图（Why）**：前缀、签名块、编码方案与阶段顺序原本是写死在代码里的常量；外部化后，同一套阶段实现
//!   可以按部署需要装配出不同管线。
//! - **结构（How）**：[`PipelineConfig`] 以 `serde` 反序列化，所有字段都有默认值；默认值重现参考管线
//!   （`log → encrypt → signature`，base64，波斯语前缀与签名）。
//! - **契约（What）**：
//!   - TOML 中未出现的字段取默认值，出现未知字段或未知阶段名时立即报错；
//!   - `stages` 的顺序即包裹顺序：第一个阶段最靠近终端，最后一个阶段是最外层。
//!
//! ```toml
//! prefix = "پیام اصلی: "
//! signature_block = "\n-- امضا: مدیریت سایت"
//! encoding = "base64"
//! stages = ["log", "encrypt", "signature"]
//!
//! [log]
//! target = "herald.stage.log"
//! severity = "info"
//! message_prefix = "ارسال پیام: "
//! ```

use std::{fs, path::Path};

use crate::{
    encoding::EncodingScheme,
    error::{HeraldError, Result},
    producer::DEFAULT_PREFIX,
    stage::StageKind,
    stages::{DEFAULT_SIGNATURE_BLOCK, LogStageConfig},
};

/// 管线整体配置。
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// 终端生产者的前缀。
    pub prefix: String,
    /// 签名阶段追加的文本。
    pub signature_block: String,
    /// 编码阶段使用的方案。
    pub encoding: EncodingScheme,
    /// 阶段包裹顺序，由内向外。
    pub stages: Vec<StageKind>,
    pub log: LogStageConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            signature_block: DEFAULT_SIGNATURE_BLOCK.to_owned(),
            encoding: EncodingScheme::Base64,
            stages: StageKind::ALL.to_vec(),
            log: LogStageConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// 从 TOML 文本解析配置。
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// 读取并解析 TOML 配置文件。
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| HeraldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// 以逗号分隔的阶段列表覆盖 `stages`，例如 `"log, encrypt"`；空串表示不装配任何阶段。
    pub fn with_stage_list(mut self, list: &str) -> Result<Self> {
        self.stages = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::parse::<StageKind>)
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    pub fn with_encoding(mut self, encoding: EncodingScheme) -> Self {
        self.encoding = encoding;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::LogSeverity;

    #[test]
    fn empty_document_yields_defaults() {
        let config = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(
            config.stages,
            [StageKind::Log, StageKind::Encrypt, StageKind::Signature]
        );
        assert_eq!(config.log.severity, LogSeverity::Info);
    }

    #[test]
    fn parses_every_field() {
        let raw = r#"
            prefix = "> "
            signature_block = " -- ops"
            encoding = "hex"
            stages = ["signature", "LOG"]

            [log]
            target = "audit"
            severity = "debug"
            message_prefix = "out: "
        "#;
        let config = PipelineConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.prefix, "> ");
        assert_eq!(config.signature_block, " -- ops");
        assert_eq!(config.encoding, EncodingScheme::Hex);
        assert_eq!(config.stages, [StageKind::Signature, StageKind::Log]);
        assert_eq!(config.log.target, "audit");
        assert_eq!(config.log.severity, LogSeverity::Debug);
        assert_eq!(config.log.message_prefix, "out: ");
    }

    #[test]
    fn partial_log_table_keeps_other_defaults() {
        let config = PipelineConfig::from_toml_str("[log]\nseverity = \"warn\"\n").unwrap();
        assert_eq!(config.log.severity, LogSeverity::Warn);
        assert_eq!(config.log.target, LogStageConfig::default().target);
    }

    #[test]
    fn file_accepts_same_aliases_as_command_line() {
        for (raw, expected) in [
            ("Base64", EncodingScheme::Base64),
            ("base64url", EncodingScheme::Base64UrlSafe),
            ("base64-url-safe", EncodingScheme::Base64UrlSafe),
            (" HEX ", EncodingScheme::Hex),
        ] {
            let config = PipelineConfig::from_toml_str(&format!("encoding = \"{raw}\"")).unwrap();
            assert_eq!(config.encoding, expected, "{raw}");
            assert_eq!(raw.parse::<EncodingScheme>().unwrap(), expected);
        }

        let config = PipelineConfig::from_toml_str("[log]\nseverity = \"INFO\"\n").unwrap();
        assert_eq!(config.log.severity, LogSeverity::Info);
        let config = PipelineConfig::from_toml_str("[log]\nseverity = \"Warning\"\n").unwrap();
        assert_eq!(config.log.severity, LogSeverity::Warn);
    }

    #[test]
    fn unknown_encoding_and_severity_are_rejected() {
        let err = PipelineConfig::from_toml_str("encoding = \"rot13\"").unwrap_err();
        assert_eq!(err.code(), "herald.config.invalid");
        assert!(err.to_string().contains("rot13"), "{err}");

        let err = PipelineConfig::from_toml_str("[log]\nseverity = \"loud\"\n").unwrap_err();
        assert_eq!(err.code(), "herald.config.invalid");
    }

    #[test]
    fn unknown_stage_is_rejected_at_parse_time() {
        let err = PipelineConfig::from_toml_str("stages = [\"log\", \"compress\"]").unwrap_err();
        assert_eq!(err.code(), "herald.config.invalid");
        assert!(err.to_string().contains("compress"), "{err}");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = PipelineConfig::from_toml_str("retries = 3").unwrap_err();
        assert_eq!(err.code(), "herald.config.invalid");
    }

    #[test]
    fn stage_list_override() {
        let config = PipelineConfig::default()
            .with_stage_list(" encrypt ,signature")
            .unwrap();
        assert_eq!(config.stages, [StageKind::Encrypt, StageKind::Signature]);

        let config = PipelineConfig::default().with_stage_list("").unwrap();
        assert!(config.stages.is_empty());

        let err = PipelineConfig::default()
            .with_stage_list("log,zip")
            .unwrap_err();
        assert_eq!(err.code(), "herald.config.unknown_stage");
    }

    #[test]
    fn missing_file_maps_to_io_error() {
        let err = PipelineConfig::load("/nonexistent/herald.toml").unwrap_err();
        assert_eq!(err.code(), "herald.config.io");
        assert!(err.to_string().contains("/nonexistent/herald.toml"));
    }
}
