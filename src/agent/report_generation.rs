//! レポート生成エージェント
//!
//! # 責務
//!
//! - 患者情報と画像解析所見を受け取り、最終レポートの文面を組み立てる
//! - [`Agent`] トレイトを実装し、統一インターフェースを提供
//!
//! # 入力の形
//!
//! このエージェントは複数キーのファンイン入力を前提としています。
//! ステップの `input_key` に `["patient_data", "analysis_findings"]` を
//! 指定すると、エグゼキューターが両キーの値をまとめたレコードを渡します。
//! どちらかが欠損していても既定値（"No finding" / "N/A"）で文面を組み立てます。

use async_trait::async_trait;
use serde_json::{Value, json};

use super::traits::{Agent, AgentOutput};
use crate::error::AgentError;

/// レポート生成エージェント
///
/// 入力は `{ "patient_data": {...}, "analysis_findings": {...} }` 形式の
/// レコードです。レポート文面を生の文字列で返します。
#[derive(Debug, Default)]
pub struct ReportGenerationAgent;

impl ReportGenerationAgent {
    /// 新しいエージェントを生成
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Agent for ReportGenerationAgent {
    async fn run(&self, input: Value) -> Result<AgentOutput, AgentError> {
        let pathology = input["analysis_findings"]["pathology"]
            .as_str()
            .unwrap_or("No finding");
        let name = input["patient_data"]["name"].as_str().unwrap_or("N/A");

        let report = format!("Final Report: {pathology} for patient {name}.");
        tracing::info!(patient = %name, "最終レポートを生成しました");
        Ok(AgentOutput::Value(json!(report)))
    }
}
