//! 基于一像素形态学膨胀的轮廓提取.
//!
//! 用轮廓而不是填充来标注分歧: 填充的半透明掩膜会互相遮挡,
//! 也会盖住底层解剖结构; 一像素的环既清晰标记分歧, 又保留底图可见.

use ndarray::{Array2, Zip};

/// 以十字 (4-邻域) 结构元对布尔区域做一像素膨胀.
///
/// 与原型所用 scipy `binary_dilation` 的默认结构元一致.
pub fn dilate4(region: &Array2<bool>) -> Array2<bool> {
    let (h_len, w_len) = region.dim();
    let mut out = region.clone();
    for ((h, w), &set) in region.indexed_iter() {
        if !set {
            continue;
        }
        for pos in [
            (h.wrapping_sub(1), w),
            (h.saturating_add(1), w),
            (h, w.wrapping_sub(1)),
            (h, w.saturating_add(1)),
        ] {
            if pos.0 < h_len && pos.1 < w_len {
                out[pos] = true;
            }
        }
    }
    out
}

/// 区域边缘: 紧贴区域外侧的一圈背景像素, 即 `dilate4(R) AND NOT R`.
///
/// 恒有 `boundary(R) ∩ R = ∅`; 空区域的边缘为空.
pub fn boundary(region: &Array2<bool>) -> Array2<bool> {
    let mut ring = dilate4(region);
    Zip::from(&mut ring).and(region).for_each(|r, &inside| {
        if inside {
            *r = false;
        }
    });
    ring
}

/// 预测/真值平面对比得到的三类互斥区域的轮廓.
#[derive(Debug, Clone)]
pub struct OutlineSet {
    /// 假阳性区域 (`P AND NOT T`) 的轮廓.
    pub false_positive: Array2<bool>,

    /// 一致区域 (`P AND T`) 的轮廓.
    ///
    /// 当前合成行为 ([`crate::compose`]) 计算但不绘制它, 与原行为一致;
    /// 调用方可用 [`crate::consts::rgb::AGREEMENT`] 自行上色.
    pub agreement: Array2<bool>,

    /// 假阴性区域的轮廓. 通常为 `T AND NOT P`; 退化情形见
    /// [`OutlineSet::detect`].
    pub false_negative: Array2<bool>,
}

impl OutlineSet {
    /// 从布尔预测平面与真值平面提取三类轮廓. 两平面形状必须一致.
    ///
    /// 退化情形: 当前平面不含任何预测像素时, 假阴性区域取整个真值区域 `T`
    /// -- 没有预测可比较时, 所有真值都算 "漏检", 而不是计算一个无意义的差.
    /// 该判断是平面局部的: 只看当前平面, 不看体数据的其他切片.
    pub fn detect(pred: &Array2<bool>, truth: &Array2<bool>) -> Self {
        debug_assert_eq!(pred.dim(), truth.dim());

        let fp_region = zip_map(pred, truth, |p, t| p && !t);
        let agree_region = zip_map(pred, truth, |p, t| p && t);
        let fn_region = if pred.iter().any(|&p| p) {
            zip_map(pred, truth, |p, t| t && !p)
        } else {
            truth.clone()
        };

        Self {
            false_positive: boundary(&fp_region),
            agreement: boundary(&agree_region),
            false_negative: boundary(&fn_region),
        }
    }
}

/// 两个布尔平面的逐像素组合.
fn zip_map(
    a: &Array2<bool>,
    b: &Array2<bool>,
    f: impl Fn(bool, bool) -> bool,
) -> Array2<bool> {
    Zip::from(a).and(b).map_collect(|&x, &y| f(x, y))
}
