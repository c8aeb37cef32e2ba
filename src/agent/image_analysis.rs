//! 画像解析エージェント
//!
//! # 責務
//!
//! - 胸部X線画像の解析（シミュレーション）を実行し、所見を返す
//! - [`Agent`] トレイトを実装し、統一インターフェースを提供
//!
//! # シミュレーション
//!
//! 実際のモデル推論の代わりに、短い非同期スリープで長時間処理を模擬し、
//! 固定の所見（気胸、信頼度 95%）を返します。推論基盤を接続する場合は
//! このエージェントを置き換えます。

use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;

use super::traits::{Agent, AgentOutput};
use crate::error::AgentError;

/// 解析のシミュレートに使う待機時間
const SIMULATED_ANALYSIS_DELAY: Duration = Duration::from_millis(50);

/// 画像解析エージェント
///
/// 入力は画像パス（文字列）、または `user_request` キーを持つレコードです。
/// 所見レコード `{ "pathology", "confidence" }` を生の値で返します。
#[derive(Debug, Default)]
pub struct ImageAnalysisAgent;

impl ImageAnalysisAgent {
    /// 新しいエージェントを生成
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Agent for ImageAnalysisAgent {
    async fn run(&self, input: Value) -> Result<AgentOutput, AgentError> {
        let img_path = match &input {
            Value::String(path) => path.clone(),
            Value::Object(map) => map
                .get("user_request")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        };

        tracing::info!(image = %img_path, "画像解析を開始します");

        // 長時間処理（LRO）のシミュレーション
        tokio::time::sleep(SIMULATED_ANALYSIS_DELAY).await;

        let findings = json!({
            "pathology": "Pneumothorax (Left Upper Lobe)",
            "confidence": "95%",
        });
        Ok(AgentOutput::Value(findings))
    }
}
