use crate::common::*;

use crate::errors::bot_error::*;

use crate::model::dataset::{cell_value::*, dataset::*};

use crate::traits::service_traits::dataset_service::*;

use crate::dto::upload_meta::*;

/* Telegram 단일 메시지 최대 길이 */
const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/* MIME 이 없거나 범용 타입일 때는 확장자로 CSV 여부를 판단한다 */
const GENERIC_MIME_TYPES: [&str; 2] = ["application/octet-stream", "application/vnd.ms-excel"];

#[derive(Debug, Clone, new)]
pub struct DatasetServiceImpl {
    preview_rows: usize,
    max_upload_bytes: u64,
}

impl DatasetServiceImpl {
    fn is_csv_file_name(file_name: Option<&str>) -> bool {
        file_name
            .map(|name| name.to_ascii_lowercase().ends_with(".csv"))
            .unwrap_or(false)
    }

    #[doc = "미리보기에 표시할 행 인덱스. 생략 구간은 None"]
    fn preview_row_indices(&self, row_count: usize) -> Vec<Option<usize>> {
        let head: usize = self.preview_rows.max(1);

        if row_count <= head * 2 {
            return (0..row_count).map(Some).collect();
        }

        (0..head)
            .map(Some)
            .chain(std::iter::once(None))
            .chain((row_count - head..row_count).map(Some))
            .collect()
    }

    fn truncate_for_telegram(mut preview: String, footer: &str) -> String {
        let budget: usize = TELEGRAM_MESSAGE_LIMIT - footer.len() - "\n...".len();

        if preview.len() + footer.len() > TELEGRAM_MESSAGE_LIMIT {
            let mut cut: usize = budget.min(preview.len());
            while !preview.is_char_boundary(cut) {
                cut -= 1;
            }
            preview.truncate(cut);
            preview.push_str("\n...");
        }

        preview.push_str(footer);
        preview
    }
}

impl DatasetService for DatasetServiceImpl {
    fn validate_upload(&self, meta: &UploadMeta) -> Result<(), BotError> {
        if *meta.size() > self.max_upload_bytes {
            return Err(BotError::FileTooLarge {
                size: *meta.size(),
                limit: self.max_upload_bytes,
            });
        }

        let is_csv_name: bool = Self::is_csv_file_name(meta.file_name().as_deref());

        let accepted: bool = match meta.mime_type().as_deref() {
            Some(mime) if mime.starts_with("text/") => true,
            Some(mime) if GENERIC_MIME_TYPES.contains(&mime) => is_csv_name,
            Some(_) => false,
            None => is_csv_name,
        };

        if accepted {
            Ok(())
        } else {
            Err(BotError::UnsupportedDocument)
        }
    }

    #[doc = r#"
        업로드된 CSV 를 Dataset 으로 변환한다.

        1. 0 바이트(또는 공백만 있는) 파일은 컬럼/행이 없는 빈 데이터셋
        2. UTF-8 BOM 제거 후 UTF-8 검증
        3. 첫 행은 헤더, 이후 모든 행은 헤더와 필드 수가 같아야 한다
        4. 각 값은 숫자/텍스트/결측치로 분류
    "#]
    fn parse_dataset(&self, content: &[u8]) -> Result<Dataset, BotError> {
        let content: &[u8] = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);

        let text: &str = std::str::from_utf8(content)
            .map_err(|e| BotError::DatasetParse(format!("file is not valid UTF-8: {}", e)))?;

        if text.trim().is_empty() {
            return Ok(Dataset::default());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|header| header.trim().to_string())
            .collect();

        let mut rows: Vec<Vec<CellValue>> = Vec::new();

        for record in reader.records() {
            let record: csv::StringRecord = record?;
            rows.push(record.iter().map(CellValue::parse).collect());
        }

        Dataset::from_rows(headers, rows)
    }

    #[doc = r#"
        pandas 의 DataFrame 출력과 비슷한 형태의 표 문자열을 만든다.

        - 값은 오른쪽 정렬, 인덱스는 왼쪽 정렬, 컬럼 사이 공백 2칸
        - 행이 `preview_rows * 2` 보다 많으면 앞/뒤 `preview_rows` 행만 출력
        - 마지막 줄에 `[n rows x m columns]`
    "#]
    fn render_preview(&self, dataset: &Dataset) -> String {
        if dataset.is_empty() {
            return format!(
                "Empty dataset\nColumns: [{}]\nIndex: []",
                dataset.column_names().join(", ")
            );
        }

        let shown_rows: Vec<Option<usize>> = self.preview_row_indices(*dataset.row_count());
        let truncated: bool = shown_rows.iter().any(Option::is_none);

        let index_labels: Vec<String> = shown_rows
            .iter()
            .map(|row| match row {
                Some(idx) => idx.to_string(),
                None => "..".to_string(),
            })
            .collect();
        let index_width: usize = index_labels.iter().map(String::len).max().unwrap_or(0);

        /* 컬럼별 셀 문자열과 폭 계산 */
        let columns_cells: Vec<(String, Vec<String>, usize)> = dataset
            .columns()
            .iter()
            .map(|column| {
                let cells: Vec<String> = shown_rows
                    .iter()
                    .map(|row| match row {
                        Some(idx) => column.values()[*idx].to_string(),
                        None => "...".to_string(),
                    })
                    .collect();

                let width: usize = cells
                    .iter()
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.name().chars().count()))
                    .max()
                    .unwrap_or(0);

                (column.name().clone(), cells, width)
            })
            .collect();

        let mut preview: String = " ".repeat(index_width);
        for (name, _, width) in &columns_cells {
            preview.push_str(&format!("  {:>width$}", name, width = *width));
        }

        for (line_idx, index_label) in index_labels.iter().enumerate() {
            preview.push('\n');
            preview.push_str(&format!("{:<width$}", index_label, width = index_width));
            for (_, cells, width) in &columns_cells {
                preview.push_str(&format!("  {:>width$}", cells[line_idx], width = *width));
            }
        }

        if truncated {
            info!(
                "[DatasetServiceImpl->render_preview] preview truncated to {} of {} rows",
                shown_rows.len() - 1,
                dataset.row_count()
            );
        }

        let footer: String = format!(
            "\n\n[{} rows x {} columns]",
            dataset.row_count(),
            dataset.column_count()
        );

        Self::truncate_for_telegram(preview, &footer)
    }
}
