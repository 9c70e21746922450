use std::path::PathBuf;

use clap::Parser;
use herald_core::EncodingScheme;

/// 未给出消息时发送的问候语（“你好，亲爱的用户！”）。
pub const DEFAULT_MESSAGE: &str = "سلام کاربر عزیز!";

/// 命令行入口参数。
///
/// 优先级：命令行覆盖项 > 配置文件 > 内置默认值。
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "herald")]
#[command(about = "Run a message through a stack of log / encrypt / signature stages")]
pub struct Cli {
    /// TOML 配置文件路径。
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// 逗号分隔的阶段顺序（由内向外），例如 `log,encrypt,signature`。
    #[arg(long, value_name = "LIST")]
    pub stages: Option<String>,

    /// 编码阶段使用的方案。
    #[arg(long, value_name = "SCHEME", value_parser = parse_encoding)]
    pub encoding: Option<EncodingScheme>,

    /// `RUST_LOG` 未设置时使用的日志过滤表达式。
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// 要发送的消息。
    #[arg(default_value = DEFAULT_MESSAGE)]
    pub message: String,
}

fn parse_encoding(raw: &str) -> Result<EncodingScheme, String> {
    raw.parse().map_err(|err: herald_core::HeraldError| err.to_string())
}
