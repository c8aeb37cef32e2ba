//! 長期記憶保存エージェント
//!
//! # 責務
//!
//! - 最終レポートの要点を長期記憶へ保存する（シミュレーション）
//! - [`Agent`] トレイトを実装し、統一インターフェースを提供
//!
//! # 戻り値の形
//!
//! このエージェントは出力を封筒（[`AgentOutput::Wrapped`]）で返します。
//! 生の値を返すほかのエージェントと混在させることで、エグゼキューターの
//! 展開処理が本番経路でも通ることを保証しています。

use async_trait::async_trait;
use serde_json::{Value, json};

use super::traits::{Agent, AgentOutput};
use crate::error::AgentError;

/// 長期記憶保存エージェント
///
/// 入力は最終レポート（文字列）です。保存ステータスのレコードを
/// ラップ済みの値で返します。
#[derive(Debug, Default)]
pub struct MemoryConsolidationAgent;

impl MemoryConsolidationAgent {
    /// 新しいエージェントを生成
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Agent for MemoryConsolidationAgent {
    async fn run(&self, _input: Value) -> Result<AgentOutput, AgentError> {
        tracing::info!("重要な事実を長期記憶へ保存しました");
        Ok(AgentOutput::wrapped(json!({
            "memory_status": "Consolidation Successful",
        })))
    }
}
