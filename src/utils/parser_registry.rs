use std::path::Path;

use crate::error::{PipelineError, Result};
use crate::utils::parser::SourceParser;

/// 源文件读取器注册表
/// 管理所有可用的读取器，并根据文件扩展名匹配对应的读取器
pub struct SourceRegistry {
    parsers: Vec<Box<dyn SourceParser>>,
}

impl SourceRegistry {
    /// 创建新的注册表，自动注册所有可用的读取器
    pub fn new() -> Self {
        let parsers = crate::parsers::get_all_parsers();
        Self { parsers }
    }

    /// 根据文件扩展名查找匹配的读取器
    /// extension: 文件扩展名（不含点号），例如 "bin"
    pub fn find_parser(&self, extension: &str) -> Option<&dyn SourceParser> {
        self.parsers
            .iter()
            .find(|parser| parser.supports(extension))
            .map(|p| p.as_ref())
    }

    /// 根据文件路径查找匹配的读取器
    pub fn find_parser_for_file(&self, path: &Path) -> Option<&dyn SourceParser> {
        let extension = path.extension().and_then(|ext| ext.to_str())?;
        self.find_parser(extension)
    }

    /// 选择读取器并读取整个文件
    pub fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let parser = self
            .find_parser_for_file(path)
            .ok_or_else(|| PipelineError::UnsupportedSource {
                path: path.to_path_buf(),
            })?;
        let bytes = parser.read_bytes(path)?;
        log::debug!(
            "[{}] 读取 {} 完成，共 {} 字节",
            parser.name(),
            path.display(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// 获取所有支持的扩展名列表
    pub fn supported_extensions(&self) -> Vec<String> {
        let mut extensions = Vec::new();
        for parser in &self.parsers {
            extensions.extend(
                parser
                    .supported_extensions()
                    .iter()
                    .map(|s| s.to_lowercase()),
            );
        }
        extensions.sort();
        extensions.dedup();
        extensions
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
