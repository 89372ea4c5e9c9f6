//! 掩膜平面的布尔组合.

use ndarray::{Array2, ArrayView2, Zip};

use crate::view::CombineMode;
use crate::Idx2d;

/// 逐像素统计有多少个掩膜平面标记了该像素.
///
/// 所有平面形状必须等于 `shape`, 否则 panic
/// (由 [`crate::VolumeStore`] 的载入校验保证不会发生).
fn vote(planes: &[ArrayView2<'_, bool>], shape: Idx2d) -> Array2<u32> {
    let mut votes = Array2::<u32>::zeros(shape);
    for plane in planes {
        Zip::from(&mut votes).and(plane).for_each(|v, &set| {
            if set {
                *v += 1;
            }
        });
    }
    votes
}

/// 将选中的预测掩膜平面合并为单个布尔 "预测" 平面.
///
/// 交集模式下, 仅当所有选中掩膜都标记某像素时该像素为真;
/// 并集模式下, 任一掩膜标记即为真. 未选中任何掩膜时返回全假平面,
/// 与模式无关 -- 这是正常情形, 不是错误.
pub fn combine_predictions(
    planes: &[ArrayView2<'_, bool>],
    mode: CombineMode,
    shape: Idx2d,
) -> Array2<bool> {
    if planes.is_empty() {
        return Array2::from_elem(shape, false);
    }
    let votes = vote(planes, shape);
    let n = planes.len() as u32;
    match mode {
        CombineMode::Intersection => votes.mapv(|v| v == n),
        CombineMode::Union => votes.mapv(|v| v > 0),
    }
}

/// 将选中的真值掩膜平面合并为单个布尔 "真值" 平面.
///
/// 恒取并集, 不受预测合并策略影响. 未选中任何掩膜时返回全假平面.
pub fn combine_truth(planes: &[ArrayView2<'_, bool>], shape: Idx2d) -> Array2<bool> {
    vote(planes, shape).mapv(|v| v > 0)
}
