//! パイプライン定義の設定レイヤー
//!
//! # 責務
//!
//! - TOML 形式のパイプライン定義の読み込み・検証・書き出し
//! - DTO（生データ）とドメインモデル（バリデーション済み）の分離
//!
//! # モジュール構成
//!
//! - [`pipeline`][]: ドメインモデル（[`Pipeline`]、[`PipelineStep`]、[`AgentKind`]）
//! - `dto`: TOML デシリアライズ専用の内部構造体（外部非公開）

mod dto;
pub mod pipeline;

// 公開APIの再エクスポート
pub use pipeline::{AgentKind, Pipeline, PipelineStep};
