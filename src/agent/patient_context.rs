//! 患者コンテキスト取得エージェント
//!
//! # 責務
//!
//! - リクエスト（画像パス）から患者 ID を導出し、EMR から患者情報を取得
//! - [`Agent`] トレイトを実装し、統一インターフェースを提供
//!
//! # シミュレーション
//!
//! EMR への接続はスタブです。患者 ID は画像ファイル名の拡張子を除いた部分から
//! 導出し、固定の患者レコードを返します。

use async_trait::async_trait;
use serde_json::{Value, json};
use std::path::Path;

use super::traits::{Agent, AgentOutput};
use crate::error::AgentError;

/// 患者コンテキスト取得エージェント
///
/// 入力はリクエスト値（通常は画像パスの文字列）です。
/// シミュレートされた EMR 参照の結果として、患者レコードを生の値で返します。
#[derive(Debug, Default)]
pub struct PatientContextAgent;

impl PatientContextAgent {
    /// 新しいエージェントを生成
    pub fn new() -> Self {
        Self
    }

    /// EMR からの患者情報取得（シミュレーション）
    fn retrieve_patient_history(patient_id: &str) -> Value {
        json!({
            "patient_id": patient_id,
            "name": "Ali Ahmadi",
            "age": 45,
        })
    }
}

#[async_trait]
impl Agent for PatientContextAgent {
    async fn run(&self, input: Value) -> Result<AgentOutput, AgentError> {
        // 入力は画像パス文字列。欠損時は空の ID で進める
        let patient_id = match &input {
            Value::String(path) => Path::new(path)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(path)
                .to_string(),
            _ => String::new(),
        };

        tracing::info!(patient_id = %patient_id, "患者コンテキストを取得します");
        Ok(AgentOutput::Value(Self::retrieve_patient_history(
            &patient_id,
        )))
    }
}
