//! アーティファクトストアの管理
//!
//! # 責務
//!
//! - ワークフロー1回の実行で蓄積されるキー・バリューのアーティファクトを保持
//! - ステップ入力の引き当て（単一キー / ファンイン）を実装
//!
//! # ライフサイクル
//!
//! ストアは実行ごとに初期シードのコピーから生成され、各ステップの完了時に
//! エグゼキューターだけが書き込みます。呼び出し元のシードは変更されません。
//! キーの削除操作はなく、同じキーへの書き込みは値の丸ごと置き換えになります。
//!
//! # 使用例
//!
//! ```rust
//! use rad_adk::engine::{ArtifactStore, InputKey};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let seed = HashMap::from([("user_request".to_string(), json!("case1.png"))]);
//! let mut store = ArtifactStore::seeded(seed);
//!
//! store.set("patient_data", json!({"name": "Ali"}));
//!
//! // 単一キーは生の値を返す
//! let input = store.resolve(&InputKey::Single("patient_data".to_string()));
//! assert_eq!(input, json!({"name": "Ali"}));
//!
//! // 欠損キーはエラーではなく Null センチネル
//! let missing = store.resolve(&InputKey::Single("unknown".to_string()));
//! assert!(missing.is_null());
//! ```

use serde_json::Value;
use std::collections::HashMap;

use super::step::InputKey;

/// アーティファクトストア
///
/// 文字列キー → 任意の JSON 値のマッピングです。初期シードのコピーを
/// 作業領域とし、引き当て時のフォールバック用にシードも保持します。
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    artifacts: HashMap<String, Value>,
    initial: HashMap<String, Value>,
}

impl ArtifactStore {
    /// 初期シードからストアを生成
    ///
    /// シードはコピーされます。以降のストアへの書き込みが
    /// 呼び出し元のマッピングへ影響することはありません。
    pub fn seeded(initial: HashMap<String, Value>) -> Self {
        Self {
            artifacts: initial.clone(),
            initial,
        }
    }

    /// キーの値を取得
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.artifacts.get(key)
    }

    /// キーへ値を書き込む
    ///
    /// 既存のキーに対しては値を丸ごと置き換えます（部分マージはしません）。
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.artifacts.insert(key.into(), value);
    }

    /// キーが存在するかどうか
    pub fn contains_key(&self, key: &str) -> bool {
        self.artifacts.contains_key(key)
    }

    /// 保持しているアーティファクトの数
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// ストアが空かどうか
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// ステップ入力を引き当てる
    ///
    /// # 規則
    ///
    /// - 単一キー: 現在のストア → 初期シード の順に探し、どちらにも
    ///   なければ欠損センチネルとして [`Value::Null`] を返します。
    ///   この段階でエラーにはなりません。
    /// - 複数キー: 各キーに単一キーと同じ規則を独立に適用し、
    ///   キー → 値のレコード（ファンイン）を新しく組み立てて返します。
    pub fn resolve(&self, input: &InputKey) -> Value {
        match input {
            InputKey::Single(key) => self.resolve_key(key),
            InputKey::Many(keys) => {
                let mut record = serde_json::Map::with_capacity(keys.len());
                for key in keys {
                    record.insert(key.clone(), self.resolve_key(key));
                }
                Value::Object(record)
            }
        }
    }

    /// 単一キーの引き当て
    fn resolve_key(&self, key: &str) -> Value {
        self.artifacts
            .get(key)
            .or_else(|| self.initial.get(key))
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// 最終的なマッピングを取り出す
    pub fn into_inner(self) -> HashMap<String, Value> {
        self.artifacts
    }
}
