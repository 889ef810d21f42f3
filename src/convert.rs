//! Script conversion between traditional and simplified Chinese.
//!
//! The content normalizer only depends on the [`ScriptConverter`] trait.
//! [`ZhConverter`] is the production implementation, converting to
//! simplified script with the `zhconv` tables.

use crate::error::ConvertError;
use zhconv::{Variant, zhconv};

/// Converts text from one written-script variant to another.
pub trait ScriptConverter {
    fn convert(&self, text: &str) -> Result<String, ConvertError>;
}

/// Traditional → simplified Chinese converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZhConverter;

impl ZhConverter {
    pub fn simplified() -> Self {
        Self
    }
}

impl ScriptConverter for ZhConverter {
    fn convert(&self, text: &str) -> Result<String, ConvertError> {
        Ok(zhconv(text, Variant::ZhHans))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traditional_to_simplified() {
        let converter = ZhConverter::simplified();
        assert_eq!(converter.convert("國際西藏郵報").unwrap(), "国际西藏邮报");
    }

    #[test]
    fn test_markdown_passes_through() {
        let converter = ZhConverter::default();
        let text = "> 引言  \n\n**重點**  \nplain ascii  \n";
        let out = converter.convert(text).unwrap();
        assert!(out.starts_with("> "));
        assert!(out.contains("**重点**  \n"));
        assert!(out.contains("plain ascii  \n"));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(ZhConverter::default().convert("").unwrap(), "");
    }
}
