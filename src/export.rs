//! 逗号分隔的文本输出格式
//!
//! - 顶点：`x,y,z` 三元组按压缩编号排列
//! - 索引：按 三角形 → 角点 的顺序排列
//! - 颜色：`r,g,b` 三元组，与顶点一一对应
//!
//! 三者末尾都没有多余的逗号。

use std::fmt::Display;
use std::io::{self, Write};

use crate::mesh::Node;

fn write_joined<W, T>(writer: &mut W, values: impl IntoIterator<Item = T>) -> io::Result<()>
where
    W: Write,
    T: Display,
{
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            writer.write_all(b",")?;
        }
        write!(writer, "{}", value)?;
    }
    Ok(())
}

pub fn write_vertices<W: Write>(writer: &mut W, vertices: &[Node]) -> io::Result<()> {
    write_joined(writer, vertices.iter().flatten())
}

pub fn write_indices<W: Write>(writer: &mut W, indices: &[u32]) -> io::Result<()> {
    write_joined(writer, indices)
}

pub fn write_colors<W: Write>(writer: &mut W, colors: &[[u8; 3]]) -> io::Result<()> {
    write_joined(writer, colors.iter().flatten())
}

fn join<T: Display>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn vertices_to_string(vertices: &[Node]) -> String {
    join(vertices.iter().flatten())
}

pub fn indices_to_string(indices: &[u32]) -> String {
    join(indices)
}

pub fn colors_to_string(colors: &[[u8; 3]]) -> String {
    join(colors.iter().flatten())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices() {
        let vertices = vec![[0.0, 1.5, -2.0], [3.0, 0.25, 1e-3]];
        assert_eq!(vertices_to_string(&vertices), "0,1.5,-2,3,0.25,0.001");
    }

    #[test]
    fn test_indices_no_trailing_comma() {
        assert_eq!(indices_to_string(&[0, 1, 2, 0, 2, 3]), "0,1,2,0,2,3");
        assert_eq!(indices_to_string(&[]), "");
    }

    #[test]
    fn test_colors_aligned_with_vertices() {
        let colors = vec![[0, 0, 255], [255, 128, 0]];
        let text = colors_to_string(&colors);
        assert_eq!(text, "0,0,255,255,128,0");
        assert_eq!(text.split(',').count(), colors.len() * 3);
    }

    #[test]
    fn test_writer_target() {
        let mut out = Vec::new();
        write_indices(&mut out, &[7, 8, 9]).unwrap();
        assert_eq!(out, b"7,8,9");
    }

    #[test]
    fn test_writer_and_string_agree() {
        let vertices = vec![[1.0, -0.5, 2.0], [0.0, 0.0, 1e-6]];
        let mut out = Vec::new();
        write_vertices(&mut out, &vertices).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), vertices_to_string(&vertices));
    }
}
