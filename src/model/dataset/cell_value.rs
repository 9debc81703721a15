use crate::common::*;

#[doc = "CSV 한 칸의 값. 숫자로 파싱되면 Number, 공백이면 Empty, 나머지는 Text"]
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    pub fn parse(raw: &str) -> Self {
        let trimmed: &str = raw.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        /* NaN, inf 등 유한하지 않은 값은 결측치로 취급 */
        match trimmed.parse::<f64>() {
            Ok(num) if num.is_finite() => CellValue::Number(num),
            Ok(_) => CellValue::Empty,
            Err(_) => CellValue::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(num) => Some(*num),
            _ => None,
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(num) if num.fract() == 0.0 && num.abs() < 1e15 => {
                write!(f, "{}", *num as i64)
            }
            CellValue::Number(num) => write!(f, "{}", num),
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Empty => write!(f, "NaN"),
        }
    }
}
