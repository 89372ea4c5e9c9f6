//! 交互会话的显式视图状态.

use std::collections::BTreeSet;

use crate::slicing::ViewAxis;
use crate::Idx3d;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 多个预测掩膜的布尔合并策略. 只影响预测平面, 真值平面恒取并集.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CombineMode {
    /// 交集: 仅保留所有选中预测掩膜一致认可的像素.
    #[default]
    Intersection,

    /// 并集: 保留至少一个选中预测掩膜认可的像素.
    Union,
}

/// 视图状态. 由 UI 事件变更, 渲染管线只读; 每次变更应当触发恰好一次重绘.
///
/// 原型把这些字段散落在窗口对象的实例属性上; 这里收拢为一个显式、
/// 可序列化的值, 以便把不可测试的 UI 胶水与可测试的合成核心隔开.
/// 所有带 `shape` 参数的变更方法都会就地钳制, 保证喂给渲染管线的索引恒合法.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewState {
    /// 当前视图轴.
    pub axis: ViewAxis,

    /// 当前切片索引. 变更方法保证 `slice_index < axis.extent(shape)`.
    pub slice_index: usize,

    /// 缩放倍率. 恒为正.
    pub zoom: f64,

    /// 平移偏移 (x, y), 单位画布像素. 首次锚定缩放后通常为非整数.
    pub pan: (f64, f64),

    /// 当前勾选的预测掩膜标识符.
    pub selected_predictions: BTreeSet<String>,

    /// 当前勾选的真值掩膜标识符.
    pub selected_truth: BTreeSet<String>,

    /// 预测掩膜合并策略.
    pub combine_mode: CombineMode,
}

impl Default for ViewState {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// 创建初始视图状态: 轴状位第 0 层, 不缩放不平移, 无勾选掩膜, 交集模式.
    pub fn new() -> Self {
        Self {
            axis: ViewAxis::Axial,
            slice_index: 0,
            zoom: 1.0,
            pan: (0.0, 0.0),
            selected_predictions: BTreeSet::new(),
            selected_truth: BTreeSet::new(),
            combine_mode: CombineMode::Intersection,
        }
    }

    /// 直接设置切片索引 (scale 控件), 钳制到当前轴的合法范围.
    #[inline]
    pub fn set_slice(&mut self, index: usize, shape: Idx3d) {
        self.slice_index = index.min(self.axis.extent(shape).saturating_sub(1));
    }

    /// 滚轮换片: `delta < 0` 前一层, `delta > 0` 后一层. 两端钳制, 不回绕.
    pub fn scroll_slice(&mut self, delta: i32, shape: Idx3d) {
        let last = self.axis.extent(shape).saturating_sub(1);
        self.slice_index = match delta {
            d if d < 0 => self.slice_index.saturating_sub(1),
            d if d > 0 => self.slice_index.saturating_add(1).min(last),
            _ => self.slice_index,
        };
    }

    /// 循环切换视图轴, 并把切片索引重置到新轴范围的中点.
    ///
    /// 旧轴上的数字索引在新轴上未必有意义, 因此不保留.
    pub fn switch_axis(&mut self, shape: Idx3d) {
        self.axis = self.axis.next();
        self.slice_index = self.axis.extent(shape) / 2;
    }

    /// 以光标位置 (画布像素坐标) 为锚点缩放.
    ///
    /// 重算平移偏移, 使 `real = (cursor - pan) / zoom`
    /// 描述的图像点在缩放前后不动. `factor` 必须为正有限数, 否则 panic.
    pub fn zoom_at(&mut self, factor: f64, cursor: (f64, f64)) {
        assert!(factor > 0.0 && factor.is_finite(), "缩放倍率必须为正有限数");

        let (cx, cy) = cursor;
        let real_x = (cx - self.pan.0) / self.zoom;
        let real_y = (cy - self.pan.1) / self.zoom;
        self.zoom *= factor;
        self.pan = (cx - real_x * self.zoom, cy - real_y * self.zoom);
    }

    /// 勾选/取消一个预测掩膜. 返回操作后该掩膜是否处于选中状态.
    pub fn toggle_prediction(&mut self, name: &str) -> bool {
        if self.selected_predictions.remove(name) {
            false
        } else {
            self.selected_predictions.insert(name.to_owned())
        }
    }

    /// 勾选/取消一个真值掩膜. 返回操作后该掩膜是否处于选中状态.
    pub fn toggle_truth(&mut self, name: &str) -> bool {
        if self.selected_truth.remove(name) {
            false
        } else {
            self.selected_truth.insert(name.to_owned())
        }
    }

    /// 设置预测掩膜合并策略 (combobox 控件).
    #[inline]
    pub fn set_combine_mode(&mut self, mode: CombineMode) {
        self.combine_mode = mode;
    }
}
