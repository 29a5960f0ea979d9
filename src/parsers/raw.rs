use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{PipelineError, Result};
use crate::utils::parser::SourceParser;

/// 未压缩的二进制文件读取器（FEM 求解器直接输出的 .bin）
pub struct RawBinaryParser;

impl RawBinaryParser {
    pub fn new() -> Self {
        RawBinaryParser
    }
}

impl SourceParser for RawBinaryParser {
    fn supported_extensions(&self) -> Vec<&'static str> {
        vec!["bin"]
    }

    fn name(&self) -> &'static str {
        "Raw Binary Reader"
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
        let mut reader = BufReader::new(file);
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| PipelineError::io(path, e))?;
        Ok(bytes)
    }
}
