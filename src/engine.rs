//! ワークフロー実行エンジン
//!
//! # 責務
//!
//! - ステップの列を受け取り、宣言順に逐次実行
//! - アーティファクトストアを介したステップ間のデータ受け渡し
//! - 単一キー / 複数キー（ファンイン）の入力引き当て
//! - 同期・非同期エージェントの一様な待機ポイントへの正規化
//!
//! # モジュール構成
//!
//! - [`executor`][]: エグゼキューター本体（[`SequentialExecutor`]）
//! - [`step`][]: ステップ定義（[`Step`]、[`InputKey`]）
//! - [`store`][]: アーティファクトストア（[`ArtifactStore`]）
//! - [`result`][]: 実行エラー型（[`WorkflowError`]）
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
//!     // 1. パイプライン定義を読み込む
//!     let pipeline = Pipeline::from_file("pipelines/radiology.toml")?;
//!
//!     // 2. エグゼキューターを生成
//!     let executor = SequentialExecutor::from_pipeline(&pipeline)?;
//!
//!     // 3. ワークフローを実行
//!     let initial = HashMap::from([("user_request".to_string(), json!("case1.png"))]);
//!     let store = executor.run(initial).await?;
//!
//!     // 4. 結果を出力
//!     for (key, value) in store.into_inner() {
//!         println!("{key}: {value}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod executor;
pub mod result;
pub mod step;
pub mod store;

// 公開APIの再エクスポート
pub use executor::SequentialExecutor;
pub use result::WorkflowError;
pub use step::{InputKey, Step};
pub use store::ArtifactStore;
