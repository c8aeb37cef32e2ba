//! ワークフロー実行エンジン
//!
//! # 責務
//!
//! このモジュールは、ワークフローの実行を制御する [`SequentialExecutor`] を提供します。
//! ステップの列を受け取り、宣言順に逐次実行し、アーティファクトストアを介して
//! ステップ間でデータを受け渡します。
//!
//! # 実行フロー
//!
//! 1. 初期マッピングのコピーでアーティファクトストアを生成
//! 2. 各ステップを宣言順に実行
//!    - 入力を引き当てる（現在のストア → 初期シード → Null センチネル）
//!    - エージェントの `run` を await する
//!    - 出力を展開し、出力キーへ書き込む
//! 3. 最終的なストアを返す
//!
//! エージェントがエラーを返した時点で実行は中断され、以降のステップは
//! 実行されません（フェイルファスト）。
//!
//! # 使用例
//!
//! ```rust,no_run
//! use rad_adk::config::pipeline::Pipeline;
//! use rad_adk::engine::SequentialExecutor;
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = Pipeline::from_file("pipelines/radiology.toml")?;
//!     let executor = SequentialExecutor::from_pipeline(&pipeline)?;
//!
//!     let initial = HashMap::from([("user_request".to_string(), json!("case1.png"))]);
//!     let store = executor.run(initial).await?;
//!
//!     println!("final_report: {}", store.get("final_report").unwrap());
//!     Ok(())
//! }
//! ```

use serde_json::Value;
use std::collections::HashMap;

use crate::agent::create_agent;
use crate::config::pipeline::Pipeline;
use crate::error::ConfigError;

use super::result::WorkflowError;
use super::step::Step;
use super::store::ArtifactStore;

/// シーケンシャルワークフローエグゼキューター
///
/// ステップの列を所有し、宣言順に逐次実行します。エグゼキューター自体は
/// 実行間で状態を持たず、1つのインスタンスを複数回の実行に再利用できます
/// （実行ごとに新しいアーティファクトストアが作られます）。
///
/// # 並行性
///
/// ステップは厳密に逐次実行されます。待機が発生するのは実行中のステップの
/// await ポイントだけで、2つのステップが同時に走ることはありません。
/// ストアは1回の実行に専有されるため、ロックは不要です。
pub struct SequentialExecutor {
    steps: Vec<Step>,
}

impl SequentialExecutor {
    /// ステップの列からエグゼキューターを生成
    ///
    /// ステップは生成後に変更できません。
    ///
    /// # 例
    ///
    /// ```rust
    /// use rad_adk::agent::create_agent;
    /// use rad_adk::config::pipeline::AgentKind;
    /// use rad_adk::engine::{SequentialExecutor, Step};
    ///
    /// let steps = vec![Step::new(
    ///     "get_patient_context",
    ///     create_agent(&AgentKind::PatientContext),
    ///     "user_request",
    ///     "patient_data",
    /// ).unwrap()];
    /// let executor = SequentialExecutor::new(steps);
    /// assert_eq!(executor.steps().len(), 1);
    /// ```
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// パイプライン定義からエグゼキューターを生成
    ///
    /// 各ステップのエージェント名を [`create_agent`] で実体に解決します。
    ///
    /// # 戻り値
    ///
    /// - `Ok(SequentialExecutor)`: 生成成功
    /// - `Err(ConfigError)`: ステップ定義が不正な場合
    pub fn from_pipeline(pipeline: &Pipeline) -> Result<Self, ConfigError> {
        let steps = pipeline
            .steps()
            .iter()
            .map(|decl| {
                Step::new(
                    decl.name(),
                    create_agent(decl.agent()),
                    decl.input().clone(),
                    decl.output_key(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(steps))
    }

    /// ステップの列を取得
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// ワークフローを実行（呼び出し元のランタイム上）
    ///
    /// 初期マッピングのコピーでストアを生成し、各ステップを宣言順に実行して、
    /// 最終的なアーティファクトストアを返します。
    ///
    /// # 引数
    ///
    /// - `initial`: 初期アーティファクト（空のマッピングも可）
    ///
    /// # 戻り値
    ///
    /// - `Ok(ArtifactStore)`: 全ステップ完了後の最終ストア
    /// - `Err(WorkflowError)`: いずれかのステップが失敗した場合。
    ///   実行されなかったステップの出力キーは最終マップに現れません
    pub async fn run(
        &self,
        initial: HashMap<String, Value>,
    ) -> Result<ArtifactStore, WorkflowError> {
        let mut store = ArtifactStore::seeded(initial);

        for step in &self.steps {
            tracing::debug!(step = step.name(), "ステップを開始します");

            let input = store.resolve(step.input());
            let output = step
                .agent()
                .run(input)
                .await
                .map_err(|source| WorkflowError::Agent {
                    step_name: step.name().to_string(),
                    source,
                })?;

            store.set(step.output_key(), output.into_value());
            tracing::debug!(
                step = step.name(),
                output_key = step.output_key(),
                "ステップが完了しました"
            );
        }

        Ok(store)
    }

    /// ワークフローを実行（専用ランタイム上でブロッキング）
    ///
    /// 非同期コンテキストを持たない呼び出し元のための同期ファサードです。
    /// この呼び出し専用のシングルスレッドランタイムを生成し、[`run`](Self::run)
    /// を完了まで駆動してから、ランタイムを破棄します。順序・出力のセマンティクスは
    /// `run` と同一です。
    ///
    /// どちらのスケジューラーで走らせるかは呼び出し元がエントリーポイントで
    /// 選択します。既に Tokio ランタイムの中にいる場合はこのメソッドではなく
    /// `run(...).await` を使ってください（Tokio はランタイムの入れ子を
    /// 許可しません）。
    ///
    /// # 戻り値
    ///
    /// - `Ok(ArtifactStore)`: 最終ストア
    /// - `Err(WorkflowError::Runtime)`: ランタイムの生成に失敗した場合
    pub fn run_blocking(
        &self,
        initial: HashMap<String, Value>,
    ) -> Result<ArtifactStore, WorkflowError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(WorkflowError::Runtime)?;

        runtime.block_on(self.run(initial))
    }
}
