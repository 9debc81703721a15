use crate::common::*;

use crate::errors::bot_error::*;

use crate::model::dataset::cell_value::*;

#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct DataColumn {
    name: String,
    values: Vec<CellValue>,
}

#[doc = r#"
    채팅별로 업로드된 표 형식 데이터.

    컬럼 순서는 헤더 순서를 그대로 따르며 모든 컬럼의 길이는 `row_count` 와 같다.
    레지스트리에 저장된 이후에는 변경되지 않고, 새 업로드로 통째로 교체된다.
"#]
#[derive(Debug, Clone, Default, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct Dataset {
    columns: Vec<DataColumn>,
    row_count: usize,
}

impl Dataset {
    #[doc = r#"
        헤더와 행 목록으로 Dataset 을 만든다.

        # Errors
        어떤 행의 필드 수가 헤더 수와 다르면 `BotError::DatasetParse`
    "#]
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, BotError> {
        let mut columns_values: Vec<Vec<CellValue>> =
            headers.iter().map(|_| Vec::with_capacity(rows.len())).collect();

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(BotError::DatasetParse(format!(
                    "row {} has {} fields, but the header has {}",
                    row_idx + 1,
                    row.len(),
                    headers.len()
                )));
            }

            for (col_idx, cell) in row.iter().enumerate() {
                columns_values[col_idx].push(cell.clone());
            }
        }

        let row_count: usize = rows.len();
        let columns: Vec<DataColumn> = headers
            .into_iter()
            .zip(columns_values)
            .map(|(name, values)| DataColumn::new(name, values))
            .collect();

        Ok(Dataset { columns, row_count })
    }

    pub fn column(&self, name: &str) -> Option<&DataColumn> {
        self.columns.iter().find(|col| col.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    #[doc = r#"
        지정한 컬럼들을 숫자 행 단위로 뽑아낸다.

        1. 컬럼이 하나라도 없으면 `MissingColumn` (먼저 나열된 컬럼 기준)
        2. 숫자가 아닌 텍스트 값이 있으면 `NonNumericValue`
        3. 결측치(Empty)가 하나라도 포함된 행은 건너뛴다
        4. 남은 행이 없으면 `NoNumericValues`

        # Returns
        * `Vec<Vec<f64>>` - 행마다 `names` 순서대로의 값
    "#]
    pub fn numeric_rows(&self, names: &[&str]) -> Result<Vec<Vec<f64>>, BotError> {
        let mut selected: Vec<&DataColumn> = Vec::with_capacity(names.len());

        for name in names {
            let column: &DataColumn = self
                .column(name)
                .ok_or_else(|| BotError::MissingColumn(name.to_string()))?;
            selected.push(column);
        }

        for column in &selected {
            if let Some((row, CellValue::Text(value))) = column
                .values
                .iter()
                .enumerate()
                .find(|(_, cell)| matches!(cell, CellValue::Text(_)))
            {
                return Err(BotError::NonNumericValue {
                    column: column.name.clone(),
                    value: value.clone(),
                    row,
                });
            }
        }

        let rows: Vec<Vec<f64>> = (0..self.row_count)
            .filter_map(|row| {
                selected
                    .iter()
                    .map(|column| column.values[row].as_number())
                    .collect::<Option<Vec<f64>>>()
            })
            .collect();

        if rows.is_empty() {
            let first: &str = names.first().copied().unwrap_or_default();
            return Err(BotError::NoNumericValues(first.to_string()));
        }

        Ok(rows)
    }
}
