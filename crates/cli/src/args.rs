// crates/cli/src/args.rs
use crate::options::{LineMode, OutputFormat};
use crate::parsers;
use clap::{ArgAction, Args as ClapArgs, Parser, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "devtodo",
    version,
    about = "ソースコメント中の TODO / FIXME 等の注釈を収集するツール"
)]
pub struct Args {
    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(flatten)]
    pub annotation: AnnotationArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// 設定ファイル (既定: <root>/.devtodo.yml)
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "動作")]
    pub config: Option<PathBuf>,

    /// 対応言語とコメント区切りを表示して終了
    #[arg(long, help_heading = "動作")]
    pub list_languages: bool,

    /// ログを詳細化 (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = ArgAction::Count, help_heading = "動作")]
    pub verbose: u8,

    /// 対象パス (既定: リポジトリルート)
    #[arg(value_hint = ValueHint::AnyPath, help_heading = "走査/入力")]
    pub paths: Vec<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct ScanArgs {
    /// リポジトリルート (相対パスと git blame の基準)
    #[arg(long, value_hint = ValueHint::DirPath, help_heading = "走査/入力")]
    pub root: Option<PathBuf>,

    /// 除外する glob パターン（カンマ区切り/複数指定可）
    #[arg(long, value_delimiter = ',', help_heading = "走査/入力")]
    pub exclude: Vec<String>,

    /// 隠しファイルも対象
    #[arg(long, help_heading = "走査/入力")]
    pub hidden: bool,

    /// 拡張子から言語へのマッピング (例: tpl=html)
    #[arg(long, value_parser = parsers::parse_key_val, help_heading = "走査/入力")]
    pub map_ext: Vec<(String, String)>,

    /// 並列ワーカー数
    #[arg(short, long, value_parser = parsers::parse_positive_usize, help_heading = "走査/入力")]
    pub jobs: Option<usize>,
}

#[derive(ClapArgs, Debug)]
pub struct AnnotationArgs {
    /// 検索するキーワード（カンマ区切り/複数指定可, 既定: TODO,FIXME）
    #[arg(
        short,
        long = "keyword",
        env = "DEVTODO_KEYWORDS",
        value_delimiter = ',',
        value_parser = parsers::parse_keyword,
        help_heading = "注釈"
    )]
    pub keywords: Vec<String>,

    /// git blame による作者解決を無効化
    #[arg(long, help_heading = "注釈")]
    pub no_blame: bool,

    /// git プロセスのタイムアウト秒数
    #[arg(long, value_parser = parsers::parse_timeout_secs, help_heading = "注釈")]
    pub blame_timeout: Option<u64>,

    /// 行番号の決定方法
    #[arg(long, value_enum, default_value = "tracked", help_heading = "注釈")]
    pub line_mode: LineMode,

    /// ブロックコメントを無視
    #[arg(long, help_heading = "注釈")]
    pub no_block_comments: bool,

    /// 行コメントを無視
    #[arg(long, help_heading = "注釈")]
    pub no_line_comments: bool,
}

#[derive(ClapArgs, Debug)]
pub struct OutputArgs {
    /// 出力フォーマット
    #[arg(long, value_enum, default_value = "table", help_heading = "出力")]
    pub format: OutputFormat,

    /// 結果の出力先ファイル (既定: 標準出力)
    #[arg(short, long, value_hint = ValueHint::FilePath, help_heading = "出力")]
    pub output: Option<PathBuf>,
}
