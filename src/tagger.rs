//! 행 태깅 모듈
//!
//! 각 행에 출처 파일명 컬럼을 추가하는 순수 변환을 담당합니다.

use crate::reader::Chunk;

/// 출처 파일명이 기록되는 컬럼 이름
pub const FILENAME_COLUMN: &str = "filename";

/// 청크의 모든 행에 출처 파일명 컬럼 추가
///
/// 입력 청크는 변경하지 않고, `filename` 컬럼이 마지막에 붙은 새 청크를
/// 반환합니다. 행 순서와 기존 필드 값은 그대로 유지됩니다.
///
/// # Arguments
/// * `chunk` - 원본 청크
/// * `filename` - 행에 기록할 파일 이름 (디렉토리 제외)
///
/// # Examples
/// ```
/// use csv::StringRecord;
/// use csvcat::reader::Chunk;
/// use csvcat::tagger::tag_chunk;
///
/// let chunk = Chunk {
///     columns: vec!["id".to_string()],
///     rows: vec![StringRecord::from(vec!["1"])],
/// };
/// let tagged = tag_chunk(&chunk, "a.csv");
///
/// assert_eq!(tagged.columns, ["id", "filename"]);
/// assert_eq!(&tagged.rows[0], &StringRecord::from(vec!["1", "a.csv"]));
/// ```
pub fn tag_chunk(chunk: &Chunk, filename: &str) -> Chunk {
    let mut columns = chunk.columns.clone();
    columns.push(FILENAME_COLUMN.to_string());

    let rows = chunk
        .rows
        .iter()
        .map(|row| {
            let mut tagged = row.clone();
            tagged.push_field(filename);
            tagged
        })
        .collect();

    Chunk { columns, rows }
}
