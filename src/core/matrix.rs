//! # Test Matrix Builder / 测试矩阵构建器
//!
//! Expands ordered lists of candidate generic values into the full Cartesian
//! product. The first axis varies slowest, the last axis fastest, and every
//! value is rendered to its string form.
//!
//! 将有序的候选 generic 值列表展开为完整的笛卡尔积。
//! 第一个轴变化最慢，最后一个轴变化最快，每个值都被转换为字符串形式。

use crate::core::models::{Configuration, GenericValue};

/// Builds the Cartesian product of `axes`.
///
/// The result holds `axes.iter().map(Vec::len).product()` configurations, so
/// a single empty axis yields no configuration at all. With no axes the
/// product is one empty configuration.
///
/// # Examples
/// ```
/// use vip_regress::core::matrix::cartesian_product;
/// use vip_regress::core::models::GenericValue;
///
/// let configs = cartesian_product(&[
///     vec![GenericValue::Int(8), GenericValue::Int(16)],
///     vec![GenericValue::Bool(true)],
/// ]);
/// assert_eq!(configs.len(), 2);
/// assert_eq!(configs[1].values(), ["16", "true"]);
/// ```
pub fn cartesian_product(axes: &[Vec<GenericValue>]) -> Vec<Configuration> {
    let rendered: Vec<Vec<String>> = axes
        .iter()
        .map(|axis| axis.iter().map(ToString::to_string).collect())
        .collect();

    let total: usize = rendered.iter().map(Vec::len).product();
    let mut configs = Vec::with_capacity(total);
    if total == 0 {
        return configs;
    }

    // Odometer over the axis indices, last axis ticking first.
    let mut indices = vec![0usize; rendered.len()];
    loop {
        configs.push(Configuration(
            indices
                .iter()
                .zip(&rendered)
                .map(|(&i, axis)| axis[i].clone())
                .collect(),
        ));

        let mut pos = rendered.len();
        loop {
            if pos == 0 {
                return configs;
            }
            pos -= 1;
            indices[pos] += 1;
            if indices[pos] < rendered[pos].len() {
                break;
            }
            indices[pos] = 0;
        }
    }
}
