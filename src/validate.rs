//! 입력 경로 검증 모듈
//!
//! 병합 대상 CSV 파일 경로들의 유효성 검사를 담당합니다.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CsvcatError, Result};

/// 검증이 끝난 입력 파일
///
/// 경로는 검증 시점에 한 번만 해석되며 이후에는 변경되지 않습니다.
#[derive(Debug, Clone)]
pub struct InputFile {
    /// 입력 파일 경로
    pub path: PathBuf,
    /// 파일 크기 (바이트)
    pub size: u64,
    /// 디렉토리를 제외한 파일 이름
    pub basename: String,
}

/// 입력 경로 목록 검증
///
/// 모든 경로가 존재하는 비어 있지 않은 일반 파일인지 순서대로 확인합니다.
/// 첫 번째 문제 경로에서 즉시 중단하며, 나머지 경로는 검사하지 않습니다.
///
/// # Arguments
/// * `paths` - 검증할 입력 파일 경로 목록
///
/// # Returns
/// 인자 순서 그대로의 `InputFile` 목록 또는 첫 번째 검증 에러
pub fn validate_paths(paths: &[PathBuf]) -> Result<Vec<InputFile>> {
    if paths.is_empty() {
        return Err(CsvcatError::NoInputPaths);
    }

    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        if !path.exists() {
            return Err(CsvcatError::PathNotFound { path: path.clone() });
        }

        let metadata = fs::metadata(path).map_err(|e| CsvcatError::FileOpenError {
            file: path.clone(),
            reason: e.to_string(),
        })?;

        if !metadata.is_file() {
            return Err(CsvcatError::NotAFile { path: path.clone() });
        }

        if metadata.len() == 0 {
            return Err(CsvcatError::EmptyFile { path: path.clone() });
        }

        files.push(InputFile {
            path: path.clone(),
            size: metadata.len(),
            basename: basename_of(path),
        });
    }

    Ok(files)
}

/// 경로에서 디렉토리를 제외한 파일 이름 추출
fn basename_of(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
