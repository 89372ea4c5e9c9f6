//! 三轴切片提取与显示期灰度拉伸.

use itertools::Itertools;
use ndarray::{Array2, ArrayView3, Axis};
use ordered_float::OrderedFloat;

use crate::Idx3d;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 三个标准正交解剖视图轴.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ViewAxis {
    /// 轴状位 (横断面), 沿 depth 维切片.
    #[default]
    Axial,

    /// 冠状位, 沿 row 维切片.
    Coronal,

    /// 矢状位, 沿 column 维切片.
    Sagittal,
}

impl ViewAxis {
    /// 该视图轴切开的体数据维度. 体数据轴序固定为 (depth, row, column).
    #[inline]
    pub const fn dim(self) -> usize {
        match self {
            Self::Axial => 0,
            Self::Coronal => 1,
            Self::Sagittal => 2,
        }
    }

    /// 该轴上合法切片索引的个数.
    #[inline]
    pub const fn extent(self, shape: Idx3d) -> usize {
        match self {
            Self::Axial => shape.0,
            Self::Coronal => shape.1,
            Self::Sagittal => shape.2,
        }
    }

    /// "切换视图" 的循环顺序: 轴状位 → 冠状位 → 矢状位 → 轴状位.
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::Axial => Self::Coronal,
            Self::Coronal => Self::Sagittal,
            Self::Sagittal => Self::Axial,
        }
    }
}

/// 沿 `axis` 提取体数据的第 `index` 层平面.
///
/// 返回平面的形状等于体数据形状去掉该轴维度: 轴状位得 (row, column),
/// 冠状位得 (depth, column), 矢状位得 (depth, row). 三种轴共用这一个
/// 按轴参数化的实现, 不再逐轴复制粘贴.
///
/// `index` 必须满足 `index < axis.extent(shape)`, 越界属于调用方 bug,
/// 直接 panic. 钳制应当发生在 [`crate::ViewState`] 变更边界, 而不是这里.
pub fn extract<A: Clone>(volume: ArrayView3<'_, A>, axis: ViewAxis, index: usize) -> Array2<A> {
    volume.index_axis(Axis(axis.dim()), index).to_owned()
}

/// 显示期拉伸: 按平面自身的 min/max 线性映射到 \[0, 255\].
///
/// 该操作在每次渲染时对当前平面执行, 与载入期的 [`crate::CtWindow`]
/// 窗口化是两回事. 零动态范围 (min == max) 的平面渲染为全黑, 而不是除零.
pub fn stretch_to_gray(plane: &Array2<f32>) -> Array2<u8> {
    use itertools::MinMaxResult::MinMax;

    let MinMax(OrderedFloat(min), OrderedFloat(max)) =
        plane.iter().copied().map(OrderedFloat).minmax()
    else {
        // 空平面或单像素平面: 没有可拉伸的动态范围.
        return Array2::zeros(plane.raw_dim());
    };

    if max - min == 0.0 {
        return Array2::zeros(plane.raw_dim());
    }
    plane.mapv(|v| ((v - min) / (max - min) * 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::{extract, stretch_to_gray, ViewAxis};
    use ndarray::{Array2, Array3};

    #[test]
    fn test_extract_shape_drops_axis_dim() {
        let volume = Array3::<f32>::zeros((3, 4, 5));
        let v = volume.view();
        for index in 0..3 {
            assert_eq!(extract(v, ViewAxis::Axial, index).dim(), (4, 5));
        }
        for index in 0..4 {
            assert_eq!(extract(v, ViewAxis::Coronal, index).dim(), (3, 5));
        }
        for index in 0..5 {
            assert_eq!(extract(v, ViewAxis::Sagittal, index).dim(), (3, 4));
        }
    }

    #[test]
    fn test_extract_picks_expected_values() {
        let mut volume = Array3::<f32>::zeros((3, 4, 5));
        volume[(2, 1, 3)] = 7.0;

        assert_eq!(extract(volume.view(), ViewAxis::Axial, 2)[(1, 3)], 7.0);
        assert_eq!(extract(volume.view(), ViewAxis::Coronal, 1)[(2, 3)], 7.0);
        assert_eq!(extract(volume.view(), ViewAxis::Sagittal, 3)[(2, 1)], 7.0);
        assert_eq!(extract(volume.view(), ViewAxis::Axial, 0)[(1, 3)], 0.0);
    }

    #[test]
    fn test_axis_cycle_and_extent() {
        let shape = (3, 4, 5);
        assert_eq!(ViewAxis::Axial.extent(shape), 3);
        assert_eq!(ViewAxis::Coronal.extent(shape), 4);
        assert_eq!(ViewAxis::Sagittal.extent(shape), 5);

        let mut axis = ViewAxis::Axial;
        axis = axis.next();
        assert_eq!(axis, ViewAxis::Coronal);
        axis = axis.next();
        assert_eq!(axis, ViewAxis::Sagittal);
        axis = axis.next();
        assert_eq!(axis, ViewAxis::Axial);
    }

    #[test]
    fn test_stretch_generic() {
        let plane = Array2::from_shape_vec((1, 3), vec![102.0_f32, 127.5, 153.0]).unwrap();
        let gray = stretch_to_gray(&plane);
        assert_eq!(gray[(0, 0)], 0);
        assert_eq!(gray[(0, 1)], 127);
        assert_eq!(gray[(0, 2)], 255);
    }

    #[test]
    fn test_stretch_degenerate_is_flat_black() {
        let flat = Array2::from_elem((4, 4), 102.0_f32);
        assert!(stretch_to_gray(&flat).iter().all(|&g| g == 0));

        let empty = Array2::<f32>::zeros((0, 0));
        assert_eq!(stretch_to_gray(&empty).dim(), (0, 0));
    }
}
