mod gzip;
mod raw;

pub use gzip::GzipBinaryParser;
pub use raw::RawBinaryParser;

/// 获取所有可用的源文件读取器
pub fn get_all_parsers() -> Vec<Box<dyn crate::utils::parser::SourceParser>> {
    vec![
        Box::new(RawBinaryParser::new()),
        Box::new(GzipBinaryParser::new()),
    ]
}
