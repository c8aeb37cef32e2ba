//! 病理コーディングエージェント
//!
//! # 責務
//!
//! - 最終レポートの文面から ICD-10 / CPT コードを引き当てる
//! - [`Agent`] トレイトを実装し、統一インターフェースを提供
//!
//! # シミュレーション
//!
//! コーディングルールは固定のルックアップです。レポートに "Pneumothorax" が
//! 含まれる場合のみコードを返し、それ以外は空のレコードを返します。

use async_trait::async_trait;
use serde_json::{Value, json};

use super::traits::{Agent, AgentOutput};
use crate::error::AgentError;

/// 病理コーディングエージェント
///
/// 入力は最終レポート（文字列、または `final_report` キーを持つレコード）です。
/// `{ "ICD_10_Code", "CPT_Code" }` または空のレコードを生の値で返します。
#[derive(Debug, Default)]
pub struct PathologyCodingAgent;

impl PathologyCodingAgent {
    /// 新しいエージェントを生成
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Agent for PathologyCodingAgent {
    async fn run(&self, input: Value) -> Result<AgentOutput, AgentError> {
        let report = match &input {
            Value::String(text) => text.clone(),
            Value::Object(map) => map
                .get("final_report")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        };

        let coded = report.contains("Pneumothorax");
        let codes = if coded {
            json!({"ICD_10_Code": "J93.9", "CPT_Code": "71045"})
        } else {
            json!({})
        };

        tracing::info!(coded, "病理コーディングを実行しました");
        Ok(AgentOutput::Value(codes))
    }
}
