//! エージェント能力契約の定義
//!
//! # 責務
//!
//! - すべてのステップが束縛するエージェントの共通トレイト [`Agent`] を定義
//! - 「生の値」と「ラップ済みの値」を統一的に表す結果型 [`AgentOutput`] を提供
//! - 同期的なクロージャをエージェントとして扱うアダプター [`FnAgent`] を提供
//!
//! # 設計
//!
//! `run` 操作は常に非同期です（`async_trait` を使用）。同期的にしか書けない
//! 処理は [`FnAgent`] でラップすることで、即座に解決される Future として
//! 扱われ、エグゼキューター側の待機ポイントはエージェントの種類によらず
//! 一様になります。
//!
//! 戻り値の形は [`AgentOutput`] で明示的にタグ付けします。生の値
//! （[`AgentOutput::Value`]）と封筒入りの値（[`AgentOutput::Wrapped`]）は、
//! [`AgentOutput::into_value`] を通すとどちらも同じペイロードに展開されます。
//!
//! # 使用例
//!
//! ```rust
//! use rad_adk::agent::{Agent, AgentOutput, FnAgent};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let doubler = FnAgent::new(|input| {
//!     let n = input.as_i64().unwrap_or(0);
//!     Ok(AgentOutput::Value(json!(n * 2)))
//! });
//!
//! let output = doubler.run(json!(21)).await.unwrap();
//! assert_eq!(output.into_value(), json!(42));
//! # }
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AgentError;

/// エージェントの共通インターフェース
///
/// ワークフローの各ステップが束縛する「能力」を表します。
/// このトレイトを実装することで、任意の処理をステップとして
/// ワークフローに組み込めます。
///
/// # 実装要件
///
/// - `Send + Sync`: `Arc<dyn Agent>` として複数のステップ・呼び出しから共有可能
/// - 非同期実行対応（`async_trait` を使用）
///
/// # 契約
///
/// `run` は1つの入力値（スカラー、レコード、またはファンインのマッピング）を
/// 受け取り、[`AgentOutput`] を返します。入力が引き当てられなかった場合、
/// エグゼキューターは欠損センチネルとして [`Value::Null`] を渡します。
/// エージェントはそれをエラーにするか既定値で進めるか、自身で判断します。
#[async_trait]
pub trait Agent: Send + Sync {
    /// 入力値に対してエージェントを実行する
    ///
    /// # 引数
    ///
    /// - `input`: 引き当て済みの入力値（欠損時は [`Value::Null`]）
    ///
    /// # 戻り値
    ///
    /// - `Ok(AgentOutput)`: 成功時、生またはラップ済みの出力
    /// - `Err(AgentError)`: 失敗時。エグゼキューターはこのエラーを伝播し、
    ///   以降のステップを実行しません
    async fn run(&self, input: Value) -> Result<AgentOutput, AgentError>;
}

/// エージェントの出力
///
/// 「生の値を返す」「最終出力であることを明示した封筒で返す」という
/// 2つの返し方を、明示的なタグ付き型として統一したものです。
/// どちらの形で返しても、ストアに書き込まれる値は同一になります。
#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutput {
    /// 生の出力値
    Value(Value),

    /// 封筒入りの出力値
    Wrapped(StepResult),
}

impl AgentOutput {
    /// ラップ済みの出力を生成するショートハンド
    pub fn wrapped(output: Value) -> Self {
        AgentOutput::Wrapped(StepResult { output })
    }

    /// 出力を最終的なペイロードへ展開する
    ///
    /// [`AgentOutput::Value`] はそのまま、[`AgentOutput::Wrapped`] は
    /// 封筒の `output` フィールドを取り出します。
    pub fn into_value(self) -> Value {
        match self {
            AgentOutput::Value(value) => value,
            AgentOutput::Wrapped(result) => result.output,
        }
    }
}

impl From<Value> for AgentOutput {
    fn from(value: Value) -> Self {
        AgentOutput::Value(value)
    }
}

/// ステップ結果の封筒
///
/// `output` フィールドに真のペイロードを1つだけ持ちます。
/// エージェントが「これが最終出力である」ことを明示したい場合に使います。
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// 真のペイロード
    pub output: Value,
}

/// 同期クロージャをエージェントとして扱うアダプター
///
/// 同期的な処理を即座に解決される Future でラップし、
/// エグゼキューターから見た待機ポイントを非同期エージェントと揃えます。
/// テストでのモックエージェントの定義にも使えます。
///
/// # 例
///
/// ```rust
/// use rad_adk::agent::{AgentOutput, FnAgent};
/// use serde_json::json;
///
/// let echo = FnAgent::new(|input| Ok(AgentOutput::Value(input)));
/// ```
pub struct FnAgent<F>
where
    F: Fn(Value) -> Result<AgentOutput, AgentError> + Send + Sync,
{
    func: F,
}

impl<F> FnAgent<F>
where
    F: Fn(Value) -> Result<AgentOutput, AgentError> + Send + Sync,
{
    /// クロージャからエージェントを生成
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> Agent for FnAgent<F>
where
    F: Fn(Value) -> Result<AgentOutput, AgentError> + Send + Sync,
{
    async fn run(&self, input: Value) -> Result<AgentOutput, AgentError> {
        (self.func)(input)
    }
}
