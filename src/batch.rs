//! バッチドライバー
//!
//! # 責務
//!
//! - 入力フォルダから画像ファイルを列挙（名前順）
//! - 画像ごとにワークフローを実行し、アーティファクトを固定の行スキーマへ射影
//! - 結果を CSV（UTF-8、ヘッダー行付き、カンマ区切り）へ書き出し
//!
//! # エラーポリシー
//!
//! エグゼキューター本体はフェイルファストですが、このドライバーは
//! 項目単位のポリシーとして [`WorkflowError`] を捕捉し、`error` 列に記録して
//! 次の画像の処理を継続します。バッチ全体が中断されるのは、入力フォルダの
//! 走査や CSV 書き込みなどドライバー自身の入出力が失敗した場合だけです。
//!
//! # 行スキーマ
//!
//! ```text
//! image, analysis_pathology, analysis_confidence, final_report, ICD_10, CPT, memory_status, error
//! ```
//!
//! 欠損キーは空文字列になります。

use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::{ArtifactStore, SequentialExecutor};
use crate::error::BatchError;

/// 処理対象とする画像の拡張子（小文字・DICOM を含む）
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "dcm"];

/// CSV のヘッダー行
const CSV_HEADER: &[&str] = &[
    "image",
    "analysis_pathology",
    "analysis_confidence",
    "final_report",
    "ICD_10",
    "CPT",
    "memory_status",
    "error",
];

/// 1画像分の出力行
///
/// アーティファクトストアを固定スキーマへ射影したものです。
/// 欠損キーは空文字列になります。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRow {
    /// 画像ファイル名
    pub image: String,
    /// 所見の病理名
    pub analysis_pathology: String,
    /// 所見の信頼度
    pub analysis_confidence: String,
    /// 最終レポート
    pub final_report: String,
    /// ICD-10 コード
    pub icd_10: String,
    /// CPT コード
    pub cpt: String,
    /// 長期記憶保存のステータス
    pub memory_status: String,
    /// ワークフロー失敗時のエラーメッセージ（成功時は空）
    pub error: String,
}

impl SubmissionRow {
    /// アーティファクトストアから行を射影する
    ///
    /// # 引数
    ///
    /// - `image`: 画像ファイル名（パスではなく名前）
    /// - `store`: ワークフロー完了後のアーティファクトストア
    pub fn project(image: &str, store: &ArtifactStore) -> Self {
        let analysis = store.get("analysis_findings");
        let coding = store.get("coding_result");

        Self {
            image: image.to_string(),
            analysis_pathology: nested_cell(analysis, "pathology"),
            analysis_confidence: nested_cell(analysis, "confidence"),
            final_report: cell(store.get("final_report")),
            // 元データにより ICD_10_Code / ICD_10 の両方の綴りを受け付ける
            icd_10: first_nested_cell(coding, &["ICD_10_Code", "ICD_10"]),
            cpt: first_nested_cell(coding, &["CPT_Code", "CPT"]),
            memory_status: cell(store.get("memory_status")),
            error: String::new(),
        }
    }

    /// ワークフロー失敗時のエラー行を生成する
    pub fn failed(image: &str, error: impl std::fmt::Display) -> Self {
        Self {
            image: image.to_string(),
            analysis_pathology: String::new(),
            analysis_confidence: String::new(),
            final_report: String::new(),
            icd_10: String::new(),
            cpt: String::new(),
            memory_status: String::new(),
            error: error.to_string(),
        }
    }

    fn fields(&self) -> [&str; 8] {
        [
            &self.image,
            &self.analysis_pathology,
            &self.analysis_confidence,
            &self.final_report,
            &self.icd_10,
            &self.cpt,
            &self.memory_status,
            &self.error,
        ]
    }
}

/// バッチ実行のサマリー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// 処理した画像の総数
    pub processed: usize,
    /// ワークフローが失敗した画像の数
    pub failed: usize,
}

/// 入力フォルダの画像に対してワークフローを実行し、CSV を書き出す
///
/// 画像が1枚も見つからない場合は、ヘッダー行だけの CSV を生成します。
///
/// # 引数
///
/// - `executor`: 実行するワークフロー
/// - `input_dir`: 画像フォルダ
/// - `output_csv`: 出力先 CSV のパス
///
/// # 戻り値
///
/// - `Ok(BatchSummary)`: 処理件数と失敗件数
/// - `Err(BatchError)`: フォルダ走査または CSV 書き込みに失敗した場合
pub async fn run_batch(
    executor: &SequentialExecutor,
    input_dir: impl AsRef<Path>,
    output_csv: impl AsRef<Path>,
) -> Result<BatchSummary, BatchError> {
    let input_dir = input_dir.as_ref();
    if !input_dir.is_dir() {
        return Err(BatchError::InputDirNotFound(input_dir.to_path_buf()));
    }

    let images = list_images(input_dir)?;
    if images.is_empty() {
        tracing::warn!(dir = %input_dir.display(), "画像が見つかりませんでした");
    }

    let mut rows = Vec::with_capacity(images.len());
    let mut failed = 0;

    for image in &images {
        let file_name = image
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        tracing::info!(image = %image.display(), "処理を開始します");

        let initial = HashMap::from([(
            "user_request".to_string(),
            Value::String(image.display().to_string()),
        )]);

        match executor.run(initial).await {
            Ok(store) => rows.push(SubmissionRow::project(file_name, &store)),
            Err(err) => {
                // 項目単位のポリシー: 記録して次の画像へ進む
                tracing::error!(image = %image.display(), error = %err, "ワークフローが失敗しました");
                failed += 1;
                rows.push(SubmissionRow::failed(file_name, err));
            }
        }
    }

    write_csv(output_csv.as_ref(), &rows)?;
    tracing::info!(
        output = %output_csv.as_ref().display(),
        rows = rows.len(),
        "CSV を生成しました"
    );

    Ok(BatchSummary {
        processed: rows.len(),
        failed,
    })
}

/// フォルダ内の画像ファイルを名前順に列挙する
///
/// 拡張子（大文字小文字を区別しない）が [`IMAGE_EXTENSIONS`] に
/// 含まれるファイルだけを対象にします。
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
        if is_image {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// 行の列を CSV へ書き出す（ヘッダー行付き、UTF-8）
pub fn write_csv(path: &Path, rows: &[SubmissionRow]) -> Result<(), BatchError> {
    let mut csv = CSV_HEADER.join(",");
    csv.push('\n');

    for row in rows {
        let cells: Vec<String> = row.fields().iter().map(|cell| escape_cell(cell)).collect();
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }

    fs::write(path, csv)?;
    Ok(())
}

/// CSV セルのエスケープ
///
/// カンマ・引用符・改行を含むセルは二重引用符で囲み、
/// セル内の引用符は2つ重ねます。
fn escape_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// 値をセル文字列へ変換する（欠損は空文字列、文字列以外は JSON 表現）
fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// レコード値の中のキーをセル文字列へ変換する
fn nested_cell(value: Option<&Value>, key: &str) -> String {
    cell(value.and_then(|record| record.get(key)))
}

/// 複数の候補キーのうち最初に見つかった値をセル文字列へ変換する
fn first_nested_cell(value: Option<&Value>, keys: &[&str]) -> String {
    for key in keys {
        let found = nested_cell(value, key);
        if !found.is_empty() {
            return found;
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with(entries: &[(&str, Value)]) -> ArtifactStore {
        let mut store = ArtifactStore::seeded(HashMap::new());
        for (key, value) in entries {
            store.set(*key, value.clone());
        }
        store
    }

    /// アーティファクトからの行の射影をテスト
    #[test]
    fn test_project_full_store() {
        let store = store_with(&[
            ("analysis_findings", json!({"pathology": "Pneumothorax", "confidence": "95%"})),
            ("final_report", json!("Final Report: Pneumothorax for patient Ali.")),
            ("coding_result", json!({"ICD_10_Code": "J93.9", "CPT_Code": "71045"})),
            ("memory_status", json!("Consolidation Successful")),
        ]);

        let row = SubmissionRow::project("case1.png", &store);

        assert_eq!(row.image, "case1.png");
        assert_eq!(row.analysis_pathology, "Pneumothorax");
        assert_eq!(row.analysis_confidence, "95%");
        assert_eq!(row.final_report, "Final Report: Pneumothorax for patient Ali.");
        assert_eq!(row.icd_10, "J93.9");
        assert_eq!(row.cpt, "71045");
        assert_eq!(row.memory_status, "Consolidation Successful");
        assert_eq!(row.error, "");
    }

    /// 欠損キーが空文字列に射影されることをテスト
    #[test]
    fn test_project_missing_keys_default_to_empty() {
        let store = store_with(&[]);
        let row = SubmissionRow::project("case2.png", &store);

        assert_eq!(row.image, "case2.png");
        assert_eq!(row.analysis_pathology, "");
        assert_eq!(row.final_report, "");
        assert_eq!(row.icd_10, "");
        assert_eq!(row.memory_status, "");
    }

    /// ICD_10 / CPT の別綴りを受け付けることをテスト
    #[test]
    fn test_project_accepts_alternate_coding_spellings() {
        let store = store_with(&[("coding_result", json!({"ICD_10": "J93.9", "CPT": "71045"}))]);
        let row = SubmissionRow::project("case3.png", &store);

        assert_eq!(row.icd_10, "J93.9");
        assert_eq!(row.cpt, "71045");
    }

    /// 文字列以外の値が JSON 表現でセルに入ることをテスト
    #[test]
    fn test_non_string_cell_serializes_as_json() {
        let store = store_with(&[("memory_status", json!({"memory_status": "Consolidation Successful"}))]);
        let row = SubmissionRow::project("case4.png", &store);

        assert_eq!(
            row.memory_status,
            r#"{"memory_status":"Consolidation Successful"}"#
        );
    }

    /// CSV セルのエスケープ規則をテスト
    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("plain"), "plain");
        assert_eq!(escape_cell("a,b"), "\"a,b\"");
        assert_eq!(escape_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_cell("line\nbreak"), "\"line\nbreak\"");
    }

    /// ヘッダー行と行データの CSV 書き出しをテスト
    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submission.csv");

        let rows = vec![SubmissionRow {
            image: "case1.png".to_string(),
            analysis_pathology: "Pneumothorax (Left Upper Lobe)".to_string(),
            analysis_confidence: "95%".to_string(),
            final_report: "Final Report: Pneumothorax, left side.".to_string(),
            icd_10: "J93.9".to_string(),
            cpt: "71045".to_string(),
            memory_status: "Consolidation Successful".to_string(),
            error: String::new(),
        }];
        write_csv(&path, &rows).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "image,analysis_pathology,analysis_confidence,final_report,ICD_10,CPT,memory_status,error"
        );
        let data = lines.next().unwrap();
        assert!(data.starts_with("case1.png,Pneumothorax (Left Upper Lobe),95%,"));
        // カンマを含むレポートは引用符で囲まれる
        assert!(data.contains("\"Final Report: Pneumothorax, left side.\""));
    }

    /// 画像が無い場合はヘッダーだけの CSV になることをテスト
    #[test]
    fn test_write_csv_empty_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_csv(&path, &[]).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }

    /// 画像の列挙が拡張子でフィルタされ名前順になることをテスト
    #[test]
    fn test_list_images_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.dcm", "notes.txt", "c.JPG"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let images = list_images(dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["a.dcm", "b.png", "c.JPG"]);
    }

    /// 存在しない入力フォルダがエラーになることをテスト
    #[tokio::test]
    async fn test_run_batch_missing_input_dir() {
        let executor = SequentialExecutor::new(vec![]);
        let err = run_batch(&executor, "/no/such/dir", "/tmp/out.csv")
            .await
            .unwrap_err();

        assert!(matches!(err, BatchError::InputDirNotFound(_)));
    }

    /// 失敗した画像が error 列に記録され、バッチが継続することをテスト
    #[tokio::test]
    async fn test_run_batch_records_failure_and_continues() {
        use crate::agent::{AgentOutput, FnAgent};
        use crate::engine::Step;
        use crate::error::AgentError;
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.png"), b"x").unwrap();
        fs::write(dir.path().join("good.png"), b"x").unwrap();

        // bad.png のときだけ失敗するエージェント
        let steps = vec![
            Step::new(
                "report",
                Arc::new(FnAgent::new(|input| {
                    let path = input.as_str().unwrap_or_default();
                    if path.ends_with("bad.png") {
                        Err(AgentError::Execution("解析できません".to_string()))
                    } else {
                        Ok(AgentOutput::Value(json!("Final Report: NoFinding.")))
                    }
                })),
                "user_request",
                "final_report",
            )
            .unwrap(),
        ];
        let executor = SequentialExecutor::new(steps);

        let out = dir.path().join("submission.csv");
        let summary = run_batch(&executor, dir.path(), &out).await.unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed, 1);

        let contents = fs::read_to_string(&out).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        // bad.png の行は error 列にメッセージを持つ
        assert!(lines[1].starts_with("bad.png,"));
        assert!(lines[1].contains("解析できません"));
        // good.png の行は最終レポートを持ち error 列は空
        assert!(lines[2].starts_with("good.png,"));
        assert!(lines[2].contains("Final Report: NoFinding."));
        assert!(lines[2].ends_with(","));
    }
}
