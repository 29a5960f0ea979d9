use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{PipelineError, Result};
use crate::utils::parser::SourceParser;

/// gzip 压缩的二进制文件读取器（例如 nt11@00.1.bin.gz）
/// 解压后的字节与原始 .bin 完全一致
pub struct GzipBinaryParser;

impl GzipBinaryParser {
    pub fn new() -> Self {
        GzipBinaryParser
    }
}

impl SourceParser for GzipBinaryParser {
    fn supported_extensions(&self) -> Vec<&'static str> {
        vec!["gz"]
    }

    fn name(&self) -> &'static str {
        "Gzip Binary Reader"
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
        let mut decoder = GzDecoder::new(BufReader::new(file));
        let mut bytes = Vec::new();
        decoder
            .read_to_end(&mut bytes)
            .map_err(|e| PipelineError::io(path, e))?;
        Ok(bytes)
    }
}
