//! rad-adk — 放射線科レポート生成のためのシーケンシャルエージェントワークフロー
//!
//! # 概要
//!
//! 順序付けられた「ステップ」の列を、共有のアーティファクトストア
//! （文字列キー → 任意の JSON 値）に対して逐次実行する最小限のエンジンです。
//! 各ステップはエージェント（[`agent::Agent`] を実装した能力）を1つ束縛し、
//! 単一キーまたは複数キー（ファンイン）で入力を引き当て、出力キーへ結果を書き込みます。
//!
//! ドメインエージェント（患者情報の取得、画像解析のシミュレーション、
//! レポート文面の組み立て、病理コーディング、長期記憶への保存）は
//! すべてスタブ実装であり、外部サービスへは接続しません。
//!
//! # モジュール構成
//!
//! - [`engine`]: エグゼキューター本体（[`engine::SequentialExecutor`]）、
//!   ステップ定義、アーティファクトストア
//! - [`agent`]: エージェント能力契約（[`agent::Agent`]）と5つのドメインエージェント
//! - [`config`]: TOML によるパイプライン定義の読み込みと検証
//! - [`batch`]: 画像フォルダを走査して CSV を生成するバッチドライバー
//! - [`error`]: エラー型
//!
//! # 使用例
//!
//! ```rust
//! use rad_adk::agent::create_agent;
//! use rad_adk::config::pipeline::AgentKind;
//! use rad_adk::engine::{SequentialExecutor, Step};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let steps = vec![
//!     Step::new(
//!         "get_patient_context",
//!         create_agent(&AgentKind::PatientContext),
//!         "user_request",
//!         "patient_data",
//!     ).unwrap(),
//!     Step::new(
//!         "run_image_analysis",
//!         create_agent(&AgentKind::ImageAnalysis),
//!         "user_request",
//!         "analysis_findings",
//!     ).unwrap(),
//! ];
//!
//! let executor = SequentialExecutor::new(steps);
//! let initial = HashMap::from([("user_request".to_string(), json!("case1.png"))]);
//!
//! // 非同期コンテキストの外からは run_blocking、中からは run を使う
//! let store = executor.run_blocking(initial).unwrap();
//! assert!(store.get("analysis_findings").is_some());
//! ```

pub mod agent;
pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
