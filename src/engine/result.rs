//! ワークフロー実行時のエラー型
//!
//! # 責務
//!
//! - ワークフロー1回の実行（`run` / `run_blocking`）で発生するエラー
//!   [`WorkflowError`] の型定義
//!
//! # 伝播ポリシー
//!
//! エグゼキューターはフェイルファストです。いずれかのステップが失敗すると、
//! その時点で実行を中断してエラーを呼び出し元へ返します。部分的な
//! アーティファクトマップが返ることはありません。項目単位で捕捉して
//! 継続するかどうかは、呼び出し元（例: [`crate::batch`]）のポリシーです。

use thiserror::Error;

use crate::error::{AgentError, ConfigError};

/// ワークフロー実行エラー
///
/// # エラー種別
///
/// - [`WorkflowError::Config`] - 構成エラー（ステップ定義・パイプライン定義の不備）
/// - [`WorkflowError::Agent`] - エージェント実行エラー（ステップ内部の失敗）
/// - [`WorkflowError::Runtime`] - `run_blocking` 用ランタイムの生成失敗
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// 構成エラー
    #[error("構成エラー: {0}")]
    Config(#[from] ConfigError),

    /// エージェント実行エラー
    #[error("ステップ '{step_name}' の実行に失敗しました: {source}")]
    Agent {
        /// 失敗したステップ名
        step_name: String,
        /// エージェントが返したエラー
        #[source]
        source: AgentError,
    },

    /// 専用ランタイムの生成に失敗
    #[error("実行用ランタイムの生成に失敗しました: {0}")]
    Runtime(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ConfigError からの変換をテスト
    #[test]
    fn test_workflow_error_from_config_error() {
        let config_err = ConfigError::Validation("出力キーが空です".to_string());
        let err = WorkflowError::from(config_err);

        assert!(matches!(err, WorkflowError::Config(_)));
        assert_eq!(
            err.to_string(),
            "構成エラー: パイプライン定義のバリデーションに失敗しました: 出力キーが空です"
        );
    }

    /// エージェントエラーがステップ名を保持することをテスト
    #[test]
    fn test_workflow_error_agent_carries_step_name() {
        let err = WorkflowError::Agent {
            step_name: "run_image_analysis".to_string(),
            source: AgentError::Execution("モデルが応答しません".to_string()),
        };

        assert_eq!(
            err.to_string(),
            "ステップ 'run_image_analysis' の実行に失敗しました: エージェントの実行に失敗しました: モデルが応答しません"
        );
    }
}
