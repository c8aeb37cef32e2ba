//! TOML デシリアライズ用の DTO (Data Transfer Object)
//!
//! # 責務
//!
//! このモジュールは、TOML ファイルからのデータ読み込み専用の構造体を提供します。
//! DTO はバリデーション前の「生データ」を表現し、ドメインモデルとは分離されています。
//!
//! ## 設計思想
//!
//! - **単一責務**: TOML のデシリアライズのみを担当
//! - **TOML 構造への密結合**: TOML の構造変更に柔軟に対応
//! - **バリデーション前の状態**: 不正なデータも一旦受け入れる
//! - **カプセル化**: config モジュール内部のみで使用（外部非公開）
//!
//! ## 変換フロー
//!
//! ```text
//! TOML ファイル
//!   ↓ (デシリアライズ)
//! PipelineDto
//!   ↓ (TryFrom でバリデーション)
//! Pipeline (ドメインモデル)
//! ```

use serde::{Deserialize, Serialize};

/// パイプライン DTO
///
/// TOML の `[pipeline]` セクションと `[[steps]]` 配列を
/// デシリアライズ/シリアライズします。
///
/// **注**: この構造体は config モジュール内部の実装詳細です。
/// 外部からは [`Pipeline`](super::pipeline::Pipeline) を使用してください。
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PipelineDto {
    /// パイプラインのメタデータ
    pub(super) pipeline: PipelineMetadataDto,
    /// ステップの配列
    #[serde(default)]
    pub(super) steps: Vec<PipelineStepDto>,
}

/// パイプラインメタデータ DTO
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PipelineMetadataDto {
    /// パイプライン名
    pub(super) name: String,
    /// 説明（任意）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) description: Option<String>,
    /// バージョン（任意）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) version: Option<String>,
}

/// パイプラインステップ DTO
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PipelineStepDto {
    /// ステップ名
    pub(super) name: String,
    /// エージェント名（バリデーション時に AgentKind へ解決）
    pub(super) agent: String,
    /// 入力キー（単一の文字列、または文字列の配列）
    pub(super) input_key: InputKeyDto,
    /// 出力キー
    pub(super) output_key: String,
}

/// 入力キー DTO
///
/// TOML 上では `input_key = "user_request"` と
/// `input_key = ["patient_data", "analysis_findings"]` の両方を受け付けます。
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub(super) enum InputKeyDto {
    /// 単一キー
    Single(String),
    /// 複数キーのファンイン
    Many(Vec<String>),
}
