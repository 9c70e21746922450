//! 宿主入口的集成测试：参数解析、配置合并与请求处理。

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use herald_core::{EncodingScheme, StageKind, test_stubs::RecordingLogger};
use herald_hosting::{Cli, DEFAULT_MESSAGE, handle, handle_with_logger, resolve_config};
use tracing_test::traced_test;

fn temp_config(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("herald-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, body).expect("write temp config");
    path
}

#[test]
fn defaults_reproduce_reference_response() {
    let cli = Cli::try_parse_from(["herald"]).unwrap();
    assert_eq!(cli.message, DEFAULT_MESSAGE);

    let logger = Arc::new(RecordingLogger::new());
    let body = handle_with_logger(&cli, logger.clone()).unwrap();

    assert_eq!(
        body,
        "پیام اصلی: 2LPZhNin2YUg2qnYp9ix2KjYsSDYudiy24zYsiE=\n-- امضا: مدیریت سایت"
    );
    assert_eq!(
        logger.records()[0].message,
        "ارسال پیام: 2LPZhNin2YUg2qnYp9ix2KjYsSDYudiy24zYsiE="
    );
}

#[test]
fn command_line_overrides_stages_and_encoding() {
    let cli = Cli::try_parse_from([
        "herald",
        "--stages",
        "encrypt",
        "--encoding",
        "hex",
        "Hi!",
    ])
    .unwrap();
    let config = resolve_config(&cli).unwrap();
    assert_eq!(config.stages, [StageKind::Encrypt]);
    assert_eq!(config.encoding, EncodingScheme::Hex);

    let body = handle_with_logger(&cli, Arc::new(RecordingLogger::new())).unwrap();
    assert_eq!(body, "پیام اصلی: 486921");
}

#[test]
fn invalid_encoding_is_rejected_by_parser() {
    assert!(Cli::try_parse_from(["herald", "--encoding", "rot13"]).is_err());
}

#[test]
fn unknown_stage_fails_the_request() {
    let cli = Cli::try_parse_from(["herald", "--stages", "log,compress"]).unwrap();
    let err = handle_with_logger(&cli, Arc::new(RecordingLogger::new())).unwrap_err();
    assert!(format!("{err:#}").contains("compress"), "{err:#}");
}

#[test]
fn config_file_is_loaded_then_overridden() {
    let path = temp_config(
        "override",
        "prefix = \"> \"\nsignature_block = \" --ops\"\nstages = [\"signature\"]\n",
    );
    let cli = Cli::try_parse_from([
        "herald",
        "--config",
        path.to_str().unwrap(),
        "--stages",
        "encrypt,signature",
        "ab",
    ])
    .unwrap();

    let body = handle_with_logger(&cli, Arc::new(RecordingLogger::new())).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(body, "> YWI= --ops");
}

#[test]
fn missing_config_file_reports_path() {
    let cli = Cli::try_parse_from(["herald", "-c", "/nonexistent/herald.toml"]).unwrap();
    let err = resolve_config(&cli).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/herald.toml"));
}

#[traced_test]
#[test]
fn default_handler_logs_through_tracing() {
    let cli = Cli::try_parse_from(["herald", "ping"]).unwrap();
    let body = handle(&cli).unwrap();
    assert!(body.ends_with("\n-- امضا: مدیریت سایت"));
    assert!(logs_contain("ارسال پیام: cGluZw=="));
}
