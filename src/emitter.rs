//! CSV 출력 모듈
//!
//! 청크들을 하나의 CSV 스트림으로 직렬화하는 역할을 담당합니다.

use std::io::{self, Write};

use csv::{Terminator, WriterBuilder};

use crate::error::{CsvcatError, Result};
use crate::reader::Chunk;

/// 쓴 바이트 수를 세는 래퍼 writer
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    /// 새 카운팅 writer 생성
    pub fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    /// 지금까지 쓴 바이트 수
    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// 청크들을 CSV 텍스트로 직렬화하는 emitter
///
/// 헤더는 전체 실행에서 첫 청크의 컬럼 이름으로 정확히 한 번만 쓰며,
/// 이후 청크와 파일이 몇 개가 오더라도 다시 쓰지 않습니다.
///
/// 구분자나 따옴표, 줄바꿈이 포함된 필드는 표준 CSV 규칙대로 큰따옴표로
/// 감싸고 내부 따옴표는 두 번 씁니다. 행 종결자는 `\n`입니다.
pub struct CsvEmitter<W: Write> {
    writer: csv::Writer<CountingWriter<W>>,
    header_written: bool,
}

impl<W: Write> CsvEmitter<W> {
    /// 새 emitter 생성
    pub fn new(sink: W) -> Self {
        Self::build(sink, false)
    }

    /// 헤더 출력이 생략된 emitter 생성
    ///
    /// 이미 헤더가 있는 출력 파일에 이어 쓸 때 사용합니다.
    pub fn without_header(sink: W) -> Self {
        Self::build(sink, true)
    }

    fn build(sink: W, header_written: bool) -> Self {
        let writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(CountingWriter::new(sink));

        Self {
            writer,
            header_written,
        }
    }

    /// 청크 한 개 직렬화
    ///
    /// 첫 호출에서만 헤더를 쓰고, 행들은 청크에 담긴 순서 그대로 씁니다.
    pub fn write_chunk(&mut self, chunk: &Chunk) -> Result<()> {
        if !self.header_written {
            self.writer
                .write_record(&chunk.columns)
                .map_err(write_error)?;
            self.header_written = true;
        }

        for row in &chunk.rows {
            self.writer.write_record(row).map_err(write_error)?;
        }

        Ok(())
    }

    /// 헤더가 이미 출력되었는지 확인
    pub fn header_written(&self) -> bool {
        self.header_written
    }

    /// 버퍼를 비우고 emitter 종료
    ///
    /// # Returns
    /// 실제로 쓴 바이트 수
    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush().map_err(|e| CsvcatError::WriteError {
            reason: e.to_string(),
        })?;

        let counter = self
            .writer
            .into_inner()
            .map_err(|e| CsvcatError::WriteError {
                reason: e.to_string(),
            })?;

        Ok(counter.bytes_written())
    }
}

fn write_error(err: csv::Error) -> CsvcatError {
    CsvcatError::WriteError {
        reason: err.to_string(),
    }
}
