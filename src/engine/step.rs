//! ワークフローステップの定義
//!
//! # 責務
//!
//! ワークフローを構成する [`Step`] と、入力の引き当て規則を表す
//! [`InputKey`] を提供します。
//!
//! # 設計
//!
//! ステップは不変のレコードです。束縛するエージェントは `Arc<dyn Agent>` で
//! 保持するため、「run 操作を持たないエージェント」は型として表現できません。
//! 残る構成チェック（出力キーが空でないこと）は、実行時ではなく生成時に
//! [`ConfigError::Validation`] として検出します。

use std::sync::Arc;

use crate::agent::Agent;
use crate::error::ConfigError;

/// ステップ入力の引き当て規則
///
/// - [`InputKey::Single`]: 1つのキーを引き当て、その値をそのまま渡す
/// - [`InputKey::Many`]: 各キーを独立に引き当て、キー → 値のレコードに
///   まとめて渡す（ファンイン）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// 単一キー
    Single(String),

    /// 複数キーのファンイン
    Many(Vec<String>),
}

impl From<&str> for InputKey {
    fn from(key: &str) -> Self {
        InputKey::Single(key.to_string())
    }
}

impl From<String> for InputKey {
    fn from(key: String) -> Self {
        InputKey::Single(key)
    }
}

impl From<Vec<String>> for InputKey {
    fn from(keys: Vec<String>) -> Self {
        InputKey::Many(keys)
    }
}

impl From<Vec<&str>> for InputKey {
    fn from(keys: Vec<&str>) -> Self {
        InputKey::Many(keys.into_iter().map(str::to_string).collect())
    }
}

/// ワークフローステップ
///
/// ワークフロー内の1つの処理単位を表します。エージェント（能力）を1つ束縛し、
/// どのキーから入力を引き当て、どのキーへ出力を書き込むかを宣言します。
///
/// # フィールド
///
/// - `name`: 人間向けの識別子（ログ・診断用。ルーティングには使わない）
/// - `agent`: 束縛するエージェント
/// - `input`: 入力の引き当て規則
/// - `output_key`: 出力の書き込み先キー（空であってはならない）
#[derive(Clone)]
pub struct Step {
    name: String,
    agent: Arc<dyn Agent>,
    input: InputKey,
    output_key: String,
}

impl Step {
    /// 新しいステップを生成
    ///
    /// # 引数
    ///
    /// - `name`: ステップ名（診断用）
    /// - `agent`: 束縛するエージェント
    /// - `input`: 入力キー（`&str`、`Vec<&str>` 等から変換可能）
    /// - `output_key`: 出力キー
    ///
    /// # 戻り値
    ///
    /// - `Ok(Step)`: 生成成功
    /// - `Err(ConfigError::Validation)`: `output_key` が空の場合
    ///
    /// # 例
    ///
    /// ```rust
    /// use rad_adk::agent::create_agent;
    /// use rad_adk::config::pipeline::AgentKind;
    /// use rad_adk::engine::Step;
    ///
    /// let step = Step::new(
    ///     "get_patient_context",
    ///     create_agent(&AgentKind::PatientContext),
    ///     "user_request",
    ///     "patient_data",
    /// ).unwrap();
    /// assert_eq!(step.name(), "get_patient_context");
    /// ```
    pub fn new(
        name: impl Into<String>,
        agent: Arc<dyn Agent>,
        input: impl Into<InputKey>,
        output_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let output_key = output_key.into();
        if output_key.is_empty() {
            return Err(ConfigError::Validation(format!(
                "ステップ '{name}' の出力キーが空です"
            )));
        }

        Ok(Self {
            name,
            agent,
            input: input.into(),
            output_key,
        })
    }

    /// ステップ名を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 束縛されたエージェントを取得
    pub fn agent(&self) -> &Arc<dyn Agent> {
        &self.agent
    }

    /// 入力の引き当て規則を取得
    pub fn input(&self) -> &InputKey {
        &self.input
    }

    /// 出力キーを取得
    pub fn output_key(&self) -> &str {
        &self.output_key
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("input", &self.input)
            .field("output_key", &self.output_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentOutput, FnAgent};

    fn echo_agent() -> Arc<dyn Agent> {
        Arc::new(FnAgent::new(|input| Ok(AgentOutput::Value(input))))
    }

    /// 単一キーのステップ生成をテスト
    #[test]
    fn test_step_new_single_key() {
        let step = Step::new("ctx", echo_agent(), "user_request", "patient_data").unwrap();

        assert_eq!(step.name(), "ctx");
        assert_eq!(step.input(), &InputKey::Single("user_request".to_string()));
        assert_eq!(step.output_key(), "patient_data");
    }

    /// 複数キー（ファンイン）のステップ生成をテスト
    #[test]
    fn test_step_new_many_keys() {
        let step = Step::new(
            "report",
            echo_agent(),
            vec!["patient_data", "analysis_findings"],
            "final_report",
        )
        .unwrap();

        assert_eq!(
            step.input(),
            &InputKey::Many(vec![
                "patient_data".to_string(),
                "analysis_findings".to_string()
            ])
        );
    }

    /// 空の出力キーはバリデーションエラーになることをテスト
    #[test]
    fn test_step_new_rejects_empty_output_key() {
        let err = Step::new("bad", echo_agent(), "user_request", "").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    /// InputKey の From 変換をテスト
    #[test]
    fn test_input_key_conversions() {
        let single: InputKey = "final_report".into();
        assert_eq!(single, InputKey::Single("final_report".to_string()));

        let many: InputKey = vec!["a".to_string(), "b".to_string()].into();
        assert_eq!(many, InputKey::Many(vec!["a".to_string(), "b".to_string()]));
    }
}
