//! 选中预测掩膜的体级组合导出.

use std::collections::BTreeSet;

use ndarray::{s, Array3, Zip};

use crate::view::CombineMode;
use crate::VolumeStore;

/// 将选中的预测掩膜按 `mode` 组合为单个布尔体数据, 供外部持久化协作者落盘.
///
/// 组合规则与渲染管线的预测分支 ([`crate::combine_predictions`]) 相同,
/// 只是作用于整个体数据. 返回值的 depth 轴已反转, 以匹配磁盘上的原始方向
/// 约定 (加载器载入时做过一次同样的反转).
///
/// 以下情形返回 `None`, 调用方不应落盘:
///
/// 1. 未选中任何掩膜;
/// 2. 存在过期 (集合中不存在的) 标识符;
/// 3. 组合结果不含任何真体素.
pub fn write_selection(
    store: &VolumeStore,
    ids: &BTreeSet<String>,
    mode: CombineMode,
) -> Option<Array3<bool>> {
    if ids.is_empty() {
        return None;
    }

    let mut votes = Array3::<u32>::zeros(store.shape());
    for name in ids {
        let mask = store.masks().prediction(name)?;
        Zip::from(&mut votes).and(mask).for_each(|v, &set| {
            if set {
                *v += 1;
            }
        });
    }

    let n = ids.len() as u32;
    let combined = match mode {
        CombineMode::Intersection => votes.mapv(|v| v == n),
        CombineMode::Union => votes.mapv(|v| v > 0),
    };

    if !combined.iter().any(|&v| v) {
        return None;
    }
    Some(combined.slice(s![..;-1, .., ..]).to_owned())
}
