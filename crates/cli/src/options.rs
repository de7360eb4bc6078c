// crates/cli/src/options.rs
use clap::ValueEnum;
use devtodo_engine::LineResolution;
use serde::{Deserialize, Serialize};

/// 出力フォーマット
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
    Jsonl,
}

/// 行番号の決定方法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    /// スキャン時に追跡した行番号
    #[default]
    Tracked,
    /// ファイル先頭から内容を再検索 (互換モード)
    Rescan,
}

// CLI 側の列挙型からエンジン側への変換
macro_rules! map_enum {
    ($from:ty, $to:ty, $($variant:ident),+ $(,)?) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self {
                match f {
                    $( <$from>::$variant => <$to>::$variant, )+
                }
            }
        }
    };
}

map_enum!(LineMode, LineResolution, Tracked, Rescan);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_mode_maps_to_resolution() {
        assert_eq!(LineResolution::from(LineMode::Tracked), LineResolution::Tracked);
        assert_eq!(LineResolution::from(LineMode::Rescan), LineResolution::Rescan);
    }

    #[test]
    fn test_value_enum_names() {
        assert_eq!(
            OutputFormat::from_str("jsonl", true).unwrap(),
            OutputFormat::Jsonl
        );
        assert_eq!(LineMode::from_str("rescan", true).unwrap(), LineMode::Rescan);
    }
}
