//! util — общие утилиты для snapshot/event log.
//!
//! Содержит:
//! - strip_line_end(): срезать завершающие "\r\n" / "\n" / "\r".
//! - open_if_exists(): открыть файл на чтение; отсутствующий файл — Ok(None).

use std::fs::File;
use std::io::{self, BufReader, ErrorKind};
use std::path::Path;

#[inline]
pub fn strip_line_end(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

/// Отсутствие файла — не ошибка (первый запуск).
pub fn open_if_exists(path: &Path) -> io::Result<Option<BufReader<File>>> {
    match File::open(path) {
        Ok(f) => Ok(Some(BufReader::new(f))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
