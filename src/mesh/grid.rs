use crate::mesh::{Element, Node};

/// 生成 nx × ny × nz 个单位立方体组成的规则六面体网格
///
/// 节点编号为 `i + (nx+1) * (j + (ny+1) * k)`；单元角点顺序与求解器输出一致：
/// 0-3 为底面 (z 较小) 逆时针，4-7 为对应的顶面。
pub fn structured_hex_grid(dims: [usize; 3]) -> (Vec<Node>, Vec<Element>) {
    let [nx, ny, nz] = dims;
    let (px, py, pz) = (nx + 1, ny + 1, nz + 1);
    let id = |i: usize, j: usize, k: usize| (i + px * (j + py * k)) as i32;

    let mut nodes = Vec::with_capacity(px * py * pz);
    for k in 0..pz {
        for j in 0..py {
            for i in 0..px {
                nodes.push([i as f64, j as f64, k as f64]);
            }
        }
    }

    let mut elements = Vec::with_capacity(nx * ny * nz);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                elements.push([
                    id(i, j, k),
                    id(i + 1, j, k),
                    id(i + 1, j + 1, k),
                    id(i, j + 1, k),
                    id(i, j, k + 1),
                    id(i + 1, j, k + 1),
                    id(i + 1, j + 1, k + 1),
                    id(i, j + 1, k + 1),
                ]);
            }
        }
    }

    (nodes, elements)
}
