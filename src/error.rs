//! エラー型の定義
//!
//! このモジュールは、rad-adk 全体で使用されるエラー型を定義します。
//!
//! # エラーの分類
//!
//! - [`ConfigError`]: ワークフロー定義の不備（構成ミス）。致命的であり、リトライ対象外
//! - [`AgentError`]: エージェントの `run` 実行中に発生したエラー（実行時障害）
//! - [`BatchError`]: バッチドライバー層のエラー（入力フォルダ走査、CSV書き込み等）

use std::path::PathBuf;

use thiserror::Error;

/// 設定関連のエラー
///
/// パイプライン定義（TOML）の読み込み・検証、および [`Step`](crate::engine::step::Step)
/// の組み立て時に発生します。プログラミング／配線のミスを示すため、
/// 即座に呼び出し元へ伝播し、リトライは行いません。
#[derive(Debug, Error)]
pub enum ConfigError {
    /// ファイルの読み込みに失敗
    #[error("パイプライン定義の読み込みに失敗しました: {0}")]
    FileRead(#[from] std::io::Error),

    /// TOML のデシリアライズに失敗
    #[error("TOML のデシリアライズに失敗しました: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    /// TOML のシリアライズに失敗
    #[error("TOML のシリアライズに失敗しました: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// バリデーションエラー
    #[error("パイプライン定義のバリデーションに失敗しました: {0}")]
    Validation(String),
}

/// エージェント実行時のエラー
///
/// [`Agent::run`](crate::agent::Agent::run) の内部で発生したエラーです。
/// エグゼキューターはこのエラーを握りつぶさず、
/// [`WorkflowError::Agent`](crate::engine::result::WorkflowError::Agent)
/// として呼び出し元へ伝播し、残りのステップを中断します。
#[derive(Debug, Error)]
pub enum AgentError {
    /// 入力値がエージェントの期待する形ではない
    #[error("エージェントへの入力が不正です: {0}")]
    InvalidInput(String),

    /// エージェント内部の処理失敗
    #[error("エージェントの実行に失敗しました: {0}")]
    Execution(String),
}

/// バッチドライバーのエラー
///
/// 画像フォルダの走査と CSV 書き込みで発生するエラーです。
/// 個々の画像に対するワークフロー失敗はここには含まれません
/// （ドライバーが捕捉し、`error` 列に記録して処理を継続します）。
#[derive(Debug, Error)]
pub enum BatchError {
    /// 入力フォルダが存在しない
    #[error("入力フォルダが見つかりません: {0}")]
    InputDirNotFound(PathBuf),

    /// 入出力エラー
    #[error("入出力エラー: {0}")]
    Io(#[from] std::io::Error),
}
