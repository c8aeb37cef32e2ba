//! rad-adk の CLI エントリーポイント
//!
//! 入力フォルダの画像を列挙し、レポート生成パイプラインを画像ごとに実行して、
//! 結果を CSV に書き出します。
//!
//! # 使用例
//!
//! ```text
//! rad-adk --input images --output submission.csv
//! rad-adk --input images --pipeline pipelines/radiology.toml --log-file rad-adk.log
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rad_adk::batch::run_batch;
use rad_adk::config::pipeline::Pipeline;
use rad_adk::engine::SequentialExecutor;

/// 組み込みの既定パイプライン定義
const DEFAULT_PIPELINE: &str = include_str!("../pipelines/radiology.toml");

/// 放射線科レポート生成のバッチドライバー
#[derive(Debug, Parser)]
#[command(name = "rad-adk", version, about)]
struct Args {
    /// 入力画像フォルダのパス
    #[arg(short, long)]
    input: PathBuf,

    /// 出力 CSV ファイルのパス
    #[arg(short, long, default_value = "submission.csv")]
    output: PathBuf,

    /// パイプライン定義（TOML）のパス。省略時は組み込みの定義を使用
    #[arg(short, long)]
    pipeline: Option<PathBuf>,

    /// ログの JSON 出力先ファイル。省略時は標準エラーへ出力
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// ロギングの初期化
///
/// 返り値のガードは main の終わりまで保持する必要があります
/// （ドロップ時にバッファが破棄されるため）。
fn init_logging(log_file: Option<&PathBuf>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => std::path::Path::new("."),
            };
            let name = path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("rad-adk.log"));
            let file = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let _guard = init_logging(args.log_file.as_ref());

    let pipeline = match &args.pipeline {
        Some(path) => Pipeline::from_file(path),
        None => Pipeline::from_toml(DEFAULT_PIPELINE),
    };
    let pipeline = match pipeline {
        Ok(pipeline) => pipeline,
        Err(err) => {
            eprintln!("パイプライン定義の読み込みに失敗しました: {err}");
            return ExitCode::FAILURE;
        }
    };

    let executor = match SequentialExecutor::from_pipeline(&pipeline) {
        Ok(executor) => executor,
        Err(err) => {
            eprintln!("エグゼキューターの生成に失敗しました: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        pipeline = pipeline.name(),
        steps = pipeline.steps().len(),
        input = %args.input.display(),
        "バッチ処理を開始します"
    );

    match run_batch(&executor, &args.input, &args.output).await {
        Ok(summary) => {
            println!(
                "CSV を生成しました: {} (処理 {} 件 / 失敗 {} 件)",
                args.output.display(),
                summary.processed,
                summary.failed
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("バッチ処理に失敗しました: {err}");
            ExitCode::FAILURE
        }
    }
}
