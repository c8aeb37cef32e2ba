//! パイプライン定義の読み込みと管理を行うモジュール
//!
//! # 責務
//!
//! このモジュールは、レポート生成のワークフローを TOML 形式で定義し、
//! それを Rust の型として扱うための機能を提供します。
//!
//! ## 主な機能
//!
//! - **TOML パース**: `pipelines/` ディレクトリ内の TOML ファイルを読み込み、
//!   [`Pipeline`] 構造体にデシリアライズ
//! - **パイプライン定義**: 患者情報取得→画像解析→レポート生成 のような
//!   処理フローをステップの連鎖として表現
//! - **メタデータ管理**: パイプライン名、説明などの情報を保持
//! - **ステップ参照**: [`PipelineStep`] の配列を管理し、実行エンジンに渡す
//!
//! ## 使用例
//!
//! ```toml
//! [pipeline]
//! name = "radiology-report"
//! description = "胸部X線のレポート生成パイプライン"
//!
//! [[steps]]
//! name = "get_patient_context"
//! agent = "patient_context"
//! input_key = "user_request"
//! output_key = "patient_data"
//!
//! [[steps]]
//! name = "generate_final_report"
//! agent = "report_generation"
//! input_key = ["patient_data", "analysis_findings"]
//! output_key = "final_report"
//! ```
//!
//! ## 関連モジュール
//!
//! - [`crate::engine::executor`]: パイプラインの実行エンジン
//! - [`crate::agent`]: エージェント名から実体への解決

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::dto::{InputKeyDto, PipelineDto, PipelineMetadataDto, PipelineStepDto};
use crate::engine::step::InputKey;
use crate::error::ConfigError;

/// パイプライン定義（ドメインモデル）
///
/// レポート生成ワークフロー全体を表す構造体です。
/// バリデーション済みの状態を保証します。
///
/// ## DTO との違い
///
/// - [`PipelineDto`]: TOML デシリアライズ専用、バリデーション前の生データ
/// - [`Pipeline`]: バリデーション済み、ドメインロジックを持つ
#[derive(Debug, Clone)]
pub struct Pipeline {
    name: String,
    description: Option<String>,
    version: Option<String>,
    steps: Vec<PipelineStep>,
}

impl Pipeline {
    /// TOML ファイルからパイプラインを読み込む
    ///
    /// # 処理フロー
    ///
    /// 1. ファイル読み込み
    /// 2. TOML デシリアライズ → [`PipelineDto`]
    /// 3. バリデーション & 変換 → [`Pipeline`]
    ///
    /// # 引数
    ///
    /// * `path` - TOML ファイルのパス
    ///
    /// # 戻り値
    ///
    /// * `Ok(Pipeline)` - 読み込みに成功した場合
    /// * `Err(ConfigError)` - ファイルの読み込みまたはパースに失敗した場合
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// TOML 文字列からパイプラインを生成
    ///
    /// # 引数
    ///
    /// * `toml` - TOML 形式の文字列
    ///
    /// # 戻り値
    ///
    /// * `Ok(Pipeline)` - パースに成功した場合
    /// * `Err(ConfigError)` - パースまたはバリデーションに失敗した場合
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let dto: PipelineDto = toml::from_str(toml)?;
        Self::try_from(dto)
    }

    /// パイプラインを TOML 文字列に変換
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - TOML 文字列
    /// * `Err(ConfigError)` - シリアライズに失敗した場合
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let dto = PipelineDto::from(self.clone());
        Ok(toml::to_string(&dto)?)
    }

    /// パイプラインを TOML ファイルに保存
    ///
    /// # 引数
    ///
    /// * `path` - 保存先のファイルパス
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 保存に成功した場合
    /// * `Err(ConfigError)` - ファイル書き込みに失敗した場合
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// パイプライン名を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 説明を取得
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// バージョンを取得
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// ステップ定義の列を取得
    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }
}

/// パイプラインステップ（ドメインモデル）
///
/// パイプライン内の1つの処理単位の宣言です。実行時には
/// [`create_agent`](crate::agent::create_agent) でエージェント名が実体に
/// 解決され、[`Step`](crate::engine::step::Step) に束縛されます。
#[derive(Debug, Clone)]
pub struct PipelineStep {
    name: String,
    agent: AgentKind,
    input: InputKey,
    output_key: String,
}

impl PipelineStep {
    /// ステップ名を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// エージェントの種類を取得
    pub fn agent(&self) -> &AgentKind {
        &self.agent
    }

    /// 入力キーを取得
    pub fn input(&self) -> &InputKey {
        &self.input
    }

    /// 出力キーを取得
    pub fn output_key(&self) -> &str {
        &self.output_key
    }
}

/// パイプラインに束縛できるエージェントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// 患者コンテキスト取得（EMR シミュレーション）
    PatientContext,
    /// 画像解析（推論シミュレーション）
    ImageAnalysis,
    /// レポート文面の組み立て
    ReportGeneration,
    /// ICD-10 / CPT コードの引き当て
    PathologyCoding,
    /// 長期記憶への保存（シミュレーション）
    MemoryConsolidation,
}

impl AgentKind {
    /// TOML 上のエージェント名を取得
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::PatientContext => "patient_context",
            AgentKind::ImageAnalysis => "image_analysis",
            AgentKind::ReportGeneration => "report_generation",
            AgentKind::PathologyCoding => "pathology_coding",
            AgentKind::MemoryConsolidation => "memory_consolidation",
        }
    }
}

impl FromStr for AgentKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient_context" => Ok(AgentKind::PatientContext),
            "image_analysis" => Ok(AgentKind::ImageAnalysis),
            "report_generation" => Ok(AgentKind::ReportGeneration),
            "pathology_coding" => Ok(AgentKind::PathologyCoding),
            "memory_consolidation" => Ok(AgentKind::MemoryConsolidation),
            other => Err(ConfigError::Validation(format!(
                "未知のエージェント名です: '{other}'"
            ))),
        }
    }
}

/// DTO からドメインモデルへの変換（読み込み方向）
///
/// バリデーションを実施し、不正なデータの場合は [`ConfigError::Validation`] を返します。
///
/// # 処理フロー
///
/// 1. メタデータのバリデーション（名前が空でないこと）
/// 2. ステップの変換（`PipelineStepDto` → `PipelineStep`）
/// 3. `Pipeline` の構築
impl TryFrom<PipelineDto> for Pipeline {
    type Error = ConfigError;

    fn try_from(dto: PipelineDto) -> Result<Self, Self::Error> {
        if dto.pipeline.name.is_empty() {
            return Err(ConfigError::Validation(
                "パイプライン名が空です".to_string(),
            ));
        }
        if dto.steps.is_empty() {
            return Err(ConfigError::Validation(format!(
                "パイプライン '{}' にステップがありません",
                dto.pipeline.name
            )));
        }

        let steps = dto
            .steps
            .into_iter()
            .map(PipelineStep::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: dto.pipeline.name,
            description: dto.pipeline.description,
            version: dto.pipeline.version,
            steps,
        })
    }
}

impl TryFrom<PipelineStepDto> for PipelineStep {
    type Error = ConfigError;

    fn try_from(dto: PipelineStepDto) -> Result<Self, Self::Error> {
        if dto.name.is_empty() {
            return Err(ConfigError::Validation("ステップ名が空です".to_string()));
        }
        if dto.output_key.is_empty() {
            return Err(ConfigError::Validation(format!(
                "ステップ '{}' の出力キーが空です",
                dto.name
            )));
        }

        let agent = dto.agent.parse::<AgentKind>()?;
        let input = match dto.input_key {
            InputKeyDto::Single(key) => InputKey::Single(key),
            InputKeyDto::Many(keys) => InputKey::Many(keys),
        };

        Ok(Self {
            name: dto.name,
            agent,
            input,
            output_key: dto.output_key,
        })
    }
}

/// ドメインモデルから DTO への変換（書き込み方向）
///
/// バリデーション済みのドメインモデルから DTO を生成するため、
/// この変換は失敗しません（`From` トレイトを使用）。
impl From<Pipeline> for PipelineDto {
    fn from(pipeline: Pipeline) -> Self {
        Self {
            pipeline: PipelineMetadataDto {
                name: pipeline.name,
                description: pipeline.description,
                version: pipeline.version,
            },
            steps: pipeline
                .steps
                .into_iter()
                .map(PipelineStepDto::from)
                .collect(),
        }
    }
}

impl From<PipelineStep> for PipelineStepDto {
    fn from(step: PipelineStep) -> Self {
        Self {
            name: step.name,
            agent: step.agent.as_str().to_string(),
            input_key: match step.input {
                InputKey::Single(key) => InputKeyDto::Single(key),
                InputKey::Many(keys) => InputKeyDto::Many(keys),
            },
            output_key: step.output_key,
        }
    }
}
