use std::path::Path;

use crate::error::Result;

/// 二进制源文件读取器 trait
/// 不同的存储格式（原始二进制、gzip 压缩等）需要实现这个 trait
pub trait SourceParser: Send + Sync {
    /// 获取支持的文件扩展名（不含点号），例如: "bin"
    fn supported_extensions(&self) -> Vec<&'static str>;

    /// 检查文件扩展名是否被支持
    fn supports(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// 读取文件的全部原始字节（已解压）
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// 获取读取器名称（用于日志和错误信息）
    fn name(&self) -> &'static str;
}
