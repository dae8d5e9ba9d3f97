//! csvcat - CSV COMBINER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::Path;

use csvcat::{
    cli::{Args, WriteMode},
    combiner::{combine, CombineOptions},
    error::CsvcatError,
    stats::format_bytes,
    validate::validate_paths,
};

fn main() -> Result<()> {
    let args = Args::parse();

    // 표준 출력은 데이터 채널이므로 안내 출력은 모두 stderr로 나간다
    if args.verbose || args.dry_run {
        print_header(&args);
    }

    if args.dry_run {
        return run_dry_run(&args);
    }

    run_combine(&args)
}

/// 헤더 출력
fn print_header(args: &Args) {
    eprintln!("\n{}", "═".repeat(50).bright_blue());
    eprintln!("{}", " 🚀 CSV COMBINER".bright_white().bold());
    eprintln!("{}", "═".repeat(50).bright_blue());
    eprintln!(
        "  {} 입력 파일 수: {}",
        "📂".bright_cyan(),
        args.paths.len().to_string().bright_green()
    );

    match &args.output {
        Some(path) => {
            eprintln!("  {} 출력 파일: {:?}", "📄".bright_green(), path);
            eprintln!("  {} 모드: {}", "⚙️".bright_yellow(), args.mode);
        }
        None => eprintln!("  {} 출력: 표준 출력", "📄".bright_green()),
    }

    eprintln!("  {} 청크 크기: {}", "📏".bright_white(), args.chunk_size);

    if args.dry_run {
        eprintln!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 병합 없음)".yellow()
        );
    }

    eprintln!("{}", "═".repeat(50).bright_blue());
}

/// 드라이런 실행: 검증만 하고 병합 대상 목록 출력
fn run_dry_run(args: &Args) -> Result<()> {
    let files = validate_paths(&args.paths)?;

    eprintln!("\n{}", "📋 병합 예정 파일 목록:".bright_cyan());
    for (i, file) in files.iter().enumerate() {
        eprintln!(
            "  {}. {} ({})",
            i + 1,
            file.basename,
            format_bytes(file.size)
        );
    }
    eprintln!(
        "\n{} 총 {} 개의 파일이 병합될 예정입니다.",
        "ℹ️".bright_blue(),
        files.len().to_string().bright_green()
    );

    Ok(())
}

/// 병합 실행
fn run_combine(args: &Args) -> Result<()> {
    let options = CombineOptions::new()
        .with_chunk_size(args.chunk_size)
        .with_verbose(args.verbose)
        .with_progress(args.output.is_some())
        .with_write_header(should_write_header(args));

    let stats = match &args.output {
        Some(path) => {
            check_output_mode(args)?;
            let file = open_output_file(path, args.mode)?;
            combine(&args.paths, &options, BufWriter::new(file))?
        }
        None => {
            let stdout = io::stdout();
            combine(&args.paths, &options, stdout.lock())?
        }
    };

    if args.verbose {
        stats.print_summary();
    }

    if let Some(ref path) = args.output {
        eprintln!("\n{} 저장 완료: {:?}", "✅".bright_green(), path);
    }

    Ok(())
}

/// 헤더 출력 여부 결정
///
/// 비어 있지 않은 기존 파일에 이어 쓸 때만 헤더를 생략한다.
fn should_write_header(args: &Args) -> bool {
    match (&args.output, args.mode) {
        (Some(path), WriteMode::Append) => {
            !(path.exists() && path.metadata().map(|m| m.len() > 0).unwrap_or(false))
        }
        _ => true,
    }
}

/// 출력 모드 확인
fn check_output_mode(args: &Args) -> Result<()> {
    if let Some(ref path) = args.output {
        if args.mode == WriteMode::Error && path.exists() {
            return Err(CsvcatError::OutputExists { path: path.clone() }.into());
        }
    }
    Ok(())
}

/// 출력 파일 열기
fn open_output_file(path: &Path, mode: WriteMode) -> Result<File> {
    let file = match mode {
        WriteMode::Append => OpenOptions::new()
            .create(true)
            .append(true)
            .open(path),
        _ => File::create(path),
    }
    .with_context(|| format!("cannot open output file: {:?}", path))?;

    Ok(file)
}
