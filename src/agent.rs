//! エージェント層
//!
//! # 責務
//!
//! - ステップが束縛する能力の共通トレイト [`Agent`] と結果型 [`AgentOutput`] を提供
//! - パイプライン定義のエージェント名（[`AgentKind`]）から
//!   実体を生成するファクトリー機能
//!
//! # モジュール構成
//!
//! - `traits` - 共通インターフェース（[`Agent`] トレイト、[`AgentOutput`]、[`FnAgent`]）
//! - `patient_context` - 患者コンテキスト取得（シミュレーション）
//! - `image_analysis` - 画像解析（シミュレーション）
//! - `report_generation` - レポート文面の組み立て
//! - `pathology_coding` - ICD-10 / CPT コードの引き当て
//! - `memory_consolidation` - 長期記憶への保存（シミュレーション）
//!
//! # 使用例
//!
//! ```rust
//! use rad_adk::agent::{Agent, create_agent};
//! use rad_adk::config::pipeline::AgentKind;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let agent = create_agent(&AgentKind::ImageAnalysis);
//! let findings = agent.run(json!("case1.png")).await.unwrap().into_value();
//! assert_eq!(findings["confidence"], json!("95%"));
//! # }
//! ```

pub mod image_analysis;
pub mod memory_consolidation;
pub mod pathology_coding;
pub mod patient_context;
pub mod report_generation;
pub mod traits;

// 公開APIの再エクスポート
pub use traits::{Agent, AgentOutput, FnAgent, StepResult};

use std::sync::Arc;

use crate::config::pipeline::AgentKind;

/// エージェントを生成するファクトリー関数
///
/// パイプライン定義のエージェント名に応じて、対応する実装を生成します。
/// 生成されたエージェントは `Arc` 共有され、複数のステップに束縛できます。
///
/// # 引数
///
/// - `kind`: エージェントの種類（[`AgentKind`]）
///
/// # 例
///
/// ```rust
/// use rad_adk::agent::create_agent;
/// use rad_adk::config::pipeline::AgentKind;
///
/// let agent = create_agent(&AgentKind::PatientContext);
/// ```
pub fn create_agent(kind: &AgentKind) -> Arc<dyn Agent> {
    match kind {
        AgentKind::PatientContext => Arc::new(patient_context::PatientContextAgent::new()),
        AgentKind::ImageAnalysis => Arc::new(image_analysis::ImageAnalysisAgent::new()),
        AgentKind::ReportGeneration => Arc::new(report_generation::ReportGenerationAgent::new()),
        AgentKind::PathologyCoding => Arc::new(pathology_coding::PathologyCodingAgent::new()),
        AgentKind::MemoryConsolidation => {
            Arc::new(memory_consolidation::MemoryConsolidationAgent::new())
        }
    }
}
