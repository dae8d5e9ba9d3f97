//! CSV 청크 읽기 모듈
//!
//! 개별 CSV 파일을 청크 단위로 읽는 이터레이터를 제공합니다.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};

use crate::error::{CsvcatError, Result};

/// 한 파일에서 읽은 행들의 묶음
///
/// 컬럼 이름과 행 순서는 파일에 기록된 순서 그대로 유지됩니다.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// 헤더에서 읽은 컬럼 이름 목록
    pub columns: Vec<String>,
    /// 청크에 포함된 행 목록
    pub rows: Vec<StringRecord>,
}

impl Chunk {
    /// 청크에 포함된 행 수
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 행이 하나도 없는지 확인
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// CSV 파일을 청크 단위로 읽는 이터레이터
///
/// 첫 줄을 헤더로 읽고, 이후 행들을 최대 `chunk_size`개씩 묶어 반환합니다.
/// 한 번 소진된 뒤 다시 읽으려면 `open`으로 새로 열면 됩니다.
///
/// 헤더와 필드 수가 다른 행을 만나면 해당 파일은 치명적 에러로 처리되며
/// 이후 청크는 생성되지 않습니다.
pub struct ChunkedReader {
    reader: csv::Reader<File>,
    columns: Vec<String>,
    chunk_size: usize,
    path: PathBuf,
    done: bool,
}

impl ChunkedReader {
    /// CSV 파일 열기
    ///
    /// # Arguments
    /// * `path` - 읽을 CSV 파일 경로
    /// * `chunk_size` - 한 청크에 담을 최대 행 수 (최소 1)
    ///
    /// # Returns
    /// 헤더까지 읽은 `ChunkedReader` 또는 에러
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| CsvcatError::FileOpenError {
                file: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let columns = reader
            .headers()
            .map_err(|e| map_csv_error(e, path))?
            .iter()
            .map(str::to_string)
            .collect();

        Ok(Self {
            reader,
            columns,
            chunk_size: chunk_size.max(1),
            path: path.to_path_buf(),
            done: false,
        })
    }

    /// 헤더에서 읽은 컬럼 이름 목록
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Iterator for ChunkedReader {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut rows = Vec::new();

        while rows.len() < self.chunk_size {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => rows.push(record),
                Ok(false) => {
                    self.done = true;
                    break;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(map_csv_error(e, &self.path)));
                }
            }
        }

        if rows.is_empty() {
            None
        } else {
            Some(Ok(Chunk {
                columns: self.columns.clone(),
                rows,
            }))
        }
    }
}

/// csv 크레이트 에러를 csvcat 에러로 변환
///
/// 필드 수 불일치는 행 위치 정보를 담아 `MalformedRow`로 구분합니다.
fn map_csv_error(err: csv::Error, path: &Path) -> CsvcatError {
    if let csv::ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        return CsvcatError::MalformedRow {
            file: path.to_path_buf(),
            line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
            expected: *expected_len,
            found: *len,
        };
    }

    CsvcatError::ParseError {
        file: path.to_path_buf(),
        reason: err.to_string(),
    }
}
