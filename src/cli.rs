//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::combiner::DEFAULT_CHUNK_SIZE;

/// 출력 파일 모드
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
pub enum WriteMode {
    /// 기존 파일이 있으면 덮어쓰기
    #[default]
    Overwrite,
    /// 기존 파일에 이어 쓰기 (헤더는 다시 쓰지 않음)
    Append,
    /// 기존 파일이 있으면 에러
    Error,
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::Overwrite => write!(f, "Overwrite"),
            WriteMode::Append => write!(f, "Append"),
            WriteMode::Error => write!(f, "Error"),
        }
    }
}

/// csvcat CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "csvcat",
    author = "YourName <your@email.com>",
    version,
    about = "CSV COMBINER - 여러 CSV 파일을 하나로 병합하고 출처 파일명 컬럼을 추가하는 CLI 도구",
    long_about = r#"
CSV COMBINER
============

같은 컬럼 구성을 가진 여러 CSV 파일을 인자 순서대로 이어 붙여
하나의 CSV 스트림으로 출력합니다. 각 행 끝에는 그 행이 나온
파일 이름을 담은 'filename' 컬럼이 추가됩니다.

특징:
  • 헤더는 전체 출력에서 정확히 한 번만 출력
  • 청크 단위 읽기로 대용량 파일도 메모리 걱정 없이 처리
  • 출처 파일명 컬럼으로 행 단위 추적 가능
  • 표준 출력 또는 파일로 출력 (덮어쓰기/이어쓰기/에러 모드)
  • 드라이런 모드로 병합 대상 미리 확인

예제:
  csvcat fixtures/accessories.csv fixtures/clothing.csv > combined.csv
  csvcat a.csv b.csv -o combined.csv
  csvcat a.csv b.csv -o combined.csv --mode append
  csvcat a.csv b.csv --chunk-size 50000 --verbose
  csvcat a.csv b.csv --dry-run
"#
)]
pub struct Args {
    /// 병합할 CSV 파일 경로 목록 (인자 순서대로 병합)
    #[arg(value_name = "FILE")]
    pub paths: Vec<PathBuf>,

    /// 출력 파일 경로 (지정하지 않으면 표준 출력)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 출력 파일 모드
    #[arg(short, long, value_enum, default_value_t = WriteMode::Overwrite)]
    pub mode: WriteMode,

    /// 한 번에 읽는 최대 행 수
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 병합 없이 처리될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_parsed_in_order() {
        let args = Args::try_parse_from(["csvcat", "a.csv", "b.csv", "c.csv"]).unwrap();

        assert_eq!(
            args.paths,
            [
                PathBuf::from("a.csv"),
                PathBuf::from("b.csv"),
                PathBuf::from("c.csv")
            ]
        );
        assert_eq!(args.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(args.mode, WriteMode::Overwrite);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_zero_paths_accepted_by_parser() {
        // 경로가 없는 경우는 clap이 아니라 검증 단계에서 진단한다
        let args = Args::try_parse_from(["csvcat"]).unwrap();
        assert!(args.paths.is_empty());
    }

    #[test]
    fn test_options_parsed() {
        let args = Args::try_parse_from([
            "csvcat",
            "a.csv",
            "-o",
            "out.csv",
            "--mode",
            "append",
            "--chunk-size",
            "10",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
        assert_eq!(args.mode, WriteMode::Append);
        assert_eq!(args.chunk_size, 10);
        assert!(args.verbose);
    }

    #[test]
    fn test_write_mode_display() {
        assert_eq!(WriteMode::Overwrite.to_string(), "Overwrite");
        assert_eq!(WriteMode::Append.to_string(), "Append");
        assert_eq!(WriteMode::Error.to_string(), "Error");
    }
}
