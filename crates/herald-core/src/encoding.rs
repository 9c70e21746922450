//! 可逆的文本安全编码方案。
//!
//! # 教案式说明
//! - **意图（Why）**：加密阶段需要把任意文本变换为只含安全字母表的文本，使后续阶段可以把结果当作普通字符串处理。
//! - **契约（What）**：
//!   - 这里的方案**不是**密码学意义上的加密，只是表示形式的变换，任何人都能还原；
//!   - `encode` 对任意 UTF-8 输入都是全函数且确定的；
//!   - `decode(encode(m)) == m` 对所有文本成立。
//! - **风险提示（Trade-offs）**：若未来需要真正的机密性，应新增独立阶段，而不是修改这里的方案。

use std::fmt;

use base64::{
    Engine as _,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};

use crate::error::{HeraldError, Result};

/// 编码方案枚举。
///
/// 配置文件与命令行共用 [`std::str::FromStr`] 的解析规则，因此 `Base64`、`base64url` 等别名在两处都被接受。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EncodingScheme {
    /// RFC 4648 标准字母表，带 `=` 填充。
    #[default]
    Base64,
    /// RFC 4648 URL 安全字母表，无填充。
    Base64UrlSafe,
    /// 小写十六进制。
    Hex,
}

impl EncodingScheme {
    /// 稳定名称，与配置中的写法一致。
    pub fn name(self) -> &'static str {
        match self {
            EncodingScheme::Base64 => "base64",
            EncodingScheme::Base64UrlSafe => "base64_url_safe",
            EncodingScheme::Hex => "hex",
        }
    }

    /// 编码消息的 UTF-8 字节。
    pub fn encode(self, message: &str) -> String {
        let bytes = message.as_bytes();
        match self {
            EncodingScheme::Base64 => STANDARD.encode(bytes),
            EncodingScheme::Base64UrlSafe => URL_SAFE_NO_PAD.encode(bytes),
            EncodingScheme::Hex => hex::encode(bytes),
        }
    }

    /// 还原 [`EncodingScheme::encode`] 的结果。
    ///
    /// 字母表或填充非法时返回 [`HeraldError::Decode`]；字节不是 UTF-8 时返回 [`HeraldError::InvalidUtf8`]。
    pub fn decode(self, encoded: &str) -> Result<String> {
        let scheme = self.name();
        let bytes = match self {
            EncodingScheme::Base64 => STANDARD.decode(encoded).map_err(|err| HeraldError::Decode {
                scheme,
                detail: err.to_string(),
            })?,
            EncodingScheme::Base64UrlSafe => {
                URL_SAFE_NO_PAD
                    .decode(encoded)
                    .map_err(|err| HeraldError::Decode {
                        scheme,
                        detail: err.to_string(),
                    })?
            }
            EncodingScheme::Hex => hex::decode(encoded).map_err(|err| HeraldError::Decode {
                scheme,
                detail: err.to_string(),
            })?,
        };
        String::from_utf8(bytes).map_err(|_| HeraldError::InvalidUtf8 { scheme })
    }

    /// 判断文本是否只含本方案的输出字母表。
    pub fn is_alphabet(self, text: &str) -> bool {
        match self {
            EncodingScheme::Base64 => text
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')),
            EncodingScheme::Base64UrlSafe => text
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_')),
            EncodingScheme::Hex => text.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')),
        }
    }
}

impl fmt::Display for EncodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for EncodingScheme {
    type Err = HeraldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "base64" => Ok(EncodingScheme::Base64),
            "base64_url_safe" | "base64url" => Ok(EncodingScheme::Base64UrlSafe),
            "hex" => Ok(EncodingScheme::Hex),
            _ => Err(HeraldError::Config {
                detail: format!("unknown encoding scheme `{s}`"),
            }),
        }
    }
}

impl<'de> serde::Deserialize<'de> for EncodingScheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREETING: &str = "سلام کاربر عزیز!";

    #[test]
    fn base64_matches_reference_output() {
        assert_eq!(
            EncodingScheme::Base64.encode(GREETING),
            "2LPZhNin2YUg2qnYp9ix2KjYsSDYudiy24zYsiE="
        );
        assert_eq!(EncodingScheme::Base64.encode(""), "");
    }

    #[test]
    fn hex_is_lowercase() {
        assert_eq!(EncodingScheme::Hex.encode("Hi!"), "486921");
    }

    #[test]
    fn url_safe_avoids_plus_slash_and_padding() {
        // 标准字母表下为 `37/vv78=`。
        let text = "\u{7ff}\u{ffff}";
        assert_eq!(EncodingScheme::Base64.encode(text), "37/vv78=");
        let encoded = EncodingScheme::Base64UrlSafe.encode(text);
        assert!(EncodingScheme::Base64UrlSafe.is_alphabet(&encoded), "{encoded}");
        assert_eq!(EncodingScheme::Base64UrlSafe.decode(&encoded).unwrap(), text);
    }

    #[test]
    fn every_scheme_round_trips_persian_text() {
        for scheme in [
            EncodingScheme::Base64,
            EncodingScheme::Base64UrlSafe,
            EncodingScheme::Hex,
        ] {
            let encoded = scheme.encode(GREETING);
            assert!(scheme.is_alphabet(&encoded), "{scheme}: {encoded}");
            assert_eq!(scheme.decode(&encoded).unwrap(), GREETING, "{scheme}");
        }
    }

    #[test]
    fn decode_rejects_foreign_alphabet() {
        let err = EncodingScheme::Base64.decode("@@@").unwrap_err();
        assert_eq!(err.code(), "herald.encoding.decode");

        let err = EncodingScheme::Hex.decode("abc").unwrap_err();
        assert_eq!(err.code(), "herald.encoding.decode");
    }

    #[test]
    fn decode_rejects_non_utf8_bytes() {
        // 0xff 0xfe 不是合法 UTF-8。
        let err = EncodingScheme::Hex.decode("fffe").unwrap_err();
        assert!(matches!(err, HeraldError::InvalidUtf8 { scheme: "hex" }));
    }

    #[test]
    fn parses_names_leniently() {
        assert_eq!("Base64".parse::<EncodingScheme>().unwrap(), EncodingScheme::Base64);
        assert_eq!(
            "base64-url-safe".parse::<EncodingScheme>().unwrap(),
            EncodingScheme::Base64UrlSafe
        );
        assert_eq!(" hex ".parse::<EncodingScheme>().unwrap(), EncodingScheme::Hex);
        assert!("rot13".parse::<EncodingScheme>().is_err());
    }
}
