//! 병합 오케스트레이션 모듈
//!
//! 검증 → 읽기 → 태깅 → 출력 파이프라인을 연결합니다.

use std::io::Write;
use std::path::PathBuf;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::emitter::CsvEmitter;
use crate::error::Result;
use crate::reader::ChunkedReader;
use crate::stats::Statistics;
use crate::tagger::tag_chunk;
use crate::validate::validate_paths;

/// 기본 청크 크기 (한 번에 읽는 최대 행 수)
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;

/// 병합 옵션
#[derive(Debug, Clone)]
pub struct CombineOptions {
    /// 한 청크에 담을 최대 행 수
    pub chunk_size: usize,
    /// 파일별 처리 내역을 stderr로 출력
    pub verbose: bool,
    /// 파일 단위 진행률 바 표시
    pub progress: bool,
    /// 헤더 행 출력 여부 (이어 쓰기 시 false)
    pub write_header: bool,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            verbose: false,
            progress: false,
            write_header: true,
        }
    }
}

impl CombineOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 청크 크기 설정 (최소 1)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// 상세 출력 설정
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 진행률 바 설정
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// 헤더 출력 여부 설정
    pub fn with_write_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }
}

/// 여러 CSV 파일을 하나의 CSV 스트림으로 병합
///
/// 모든 경로의 검증이 끝난 뒤에야 출력이 시작됩니다. 파일들은 인자 순서대로,
/// 각 파일의 행은 파일에 기록된 순서대로 출력되며, 각 행 끝에는 출처 파일명
/// 컬럼이 붙습니다. 헤더는 전체 출력에서 한 번만 쓰입니다.
///
/// 읽기/파싱 에러는 실행 전체를 중단시킵니다. 이미 출력된 내용은 되돌리지
/// 않습니다.
///
/// # Arguments
/// * `paths` - 병합할 CSV 파일 경로 목록 (인자 순서 유지)
/// * `options` - 병합 옵션
/// * `sink` - CSV 텍스트를 받을 writer
///
/// # Returns
/// 병합 통계 또는 첫 번째 에러
pub fn combine<W: Write>(
    paths: &[PathBuf],
    options: &CombineOptions,
    sink: W,
) -> Result<Statistics> {
    let files = validate_paths(paths)?;

    let mut stats = Statistics::new(files.len());
    let mut emitter = if options.write_header {
        CsvEmitter::new(sink)
    } else {
        CsvEmitter::without_header(sink)
    };

    let pb = if options.progress {
        create_progress_bar(files.len())
    } else {
        ProgressBar::hidden()
    };

    for file in &files {
        let reader = ChunkedReader::open(&file.path, options.chunk_size)?;
        let mut file_rows = 0u64;

        for chunk in reader {
            let tagged = tag_chunk(&chunk?, &file.basename);
            file_rows += tagged.len() as u64;
            emitter.write_chunk(&tagged)?;
        }

        stats.increment_files();
        stats.add_rows(file_rows);
        stats.add_bytes_read(file.size);

        if options.verbose {
            eprintln!("  {} {} ({} 행)", "✓".green(), file.basename, file_rows);
        }
        pb.inc(1);
    }

    pb.finish_with_message("완료!");

    let bytes_written = emitter.finish()?;
    stats.set_bytes_written(bytes_written);

    Ok(stats)
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("█▓▒░"),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CsvcatError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_csv_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn combine_to_string(paths: &[PathBuf], options: &CombineOptions) -> (String, Statistics) {
        let mut buf = Vec::new();
        let stats = combine(paths, options, &mut buf).unwrap();
        (String::from_utf8(buf).unwrap(), stats)
    }

    #[test]
    fn test_no_paths_produces_no_output() {
        let mut buf = Vec::new();
        let err = combine(&[], &CombineOptions::new(), &mut buf).unwrap_err();

        assert!(matches!(err, CsvcatError::NoInputPaths));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_two_files_combined_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_csv_file(temp_dir.path(), "a.csv", "id,name\n1,alpha\n2,beta\n3,gamma\n");
        let b = create_csv_file(temp_dir.path(), "b.csv", "id,name\n4,delta\n5,epsilon\n");

        let (output, stats) = combine_to_string(&[a, b], &CombineOptions::new());

        assert_eq!(
            output,
            "id,name,filename\n\
             1,alpha,a.csv\n\
             2,beta,a.csv\n\
             3,gamma,a.csv\n\
             4,delta,b.csv\n\
             5,epsilon,b.csv\n"
        );
        assert_eq!(stats.files_combined, 2);
        assert_eq!(stats.rows_written, 5);
        assert_eq!(stats.bytes_written, output.len() as u64);
    }

    #[test]
    fn test_chunk_size_does_not_change_output() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_csv_file(temp_dir.path(), "a.csv", "id\n1\n2\n3\n4\n5\n");

        let (big, _) = combine_to_string(&[a.clone()], &CombineOptions::new());
        let (small, _) =
            combine_to_string(&[a], &CombineOptions::new().with_chunk_size(2));

        assert_eq!(big, small);
    }

    #[test]
    fn test_validation_failure_before_any_output() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_csv_file(temp_dir.path(), "a.csv", "id\n1\n");
        let missing = temp_dir.path().join("missing.csv");

        let mut buf = Vec::new();
        let err = combine(&[a, missing], &CombineOptions::new(), &mut buf).unwrap_err();

        assert!(err.to_string().contains("not found"));
        // 앞 파일이 유효해도 전체 검증 전에는 아무것도 출력되지 않는다
        assert!(buf.is_empty());
    }

    #[test]
    fn test_malformed_row_aborts_run() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_csv_file(temp_dir.path(), "a.csv", "id,name\n1,a\n");
        let bad = create_csv_file(temp_dir.path(), "bad.csv", "id,name\n2,b\n3\n");

        let mut buf = Vec::new();
        let err = combine(&[a, bad], &CombineOptions::new(), &mut buf).unwrap_err();

        assert!(matches!(err, CsvcatError::MalformedRow { .. }));
    }

    #[test]
    fn test_without_header_option() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_csv_file(temp_dir.path(), "a.csv", "id\n7\n");

        let (output, _) =
            combine_to_string(&[a], &CombineOptions::new().with_write_header(false));

        assert_eq!(output, "7,a.csv\n");
    }
}
