use std::collections::BTreeMap;

use log::debug;
use ndarray::{Array3, ArrayView3};

use crate::error::LoadError;
use crate::{Idx2d, Idx3d};

pub mod window;

pub use window::CtWindow;

/// 布尔掩膜体数据. 形状必须与图像体数据一致 (载入时校验).
pub type MaskVolume = Array3<bool>;

/// 按角色划分的命名掩膜集合.
///
/// 掩膜分为两类互斥角色: "预测候选" 与 "真值候选".
/// 角色由外部加载器按文件命名约定在载入前决定, 本库只保存划分结果.
/// 内部使用 `BTreeMap` 以保证名字迭代顺序确定.
#[derive(Debug, Clone, Default)]
pub struct MaskSet {
    predictions: BTreeMap<String, MaskVolume>,
    truths: BTreeMap<String, MaskVolume>,
}

impl MaskSet {
    /// 创建空掩膜集合.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个预测候选掩膜. 同名掩膜会被覆盖.
    #[inline]
    pub fn insert_prediction(&mut self, name: impl Into<String>, mask: MaskVolume) {
        self.predictions.insert(name.into(), mask);
    }

    /// 注册一个真值候选掩膜. 同名掩膜会被覆盖.
    #[inline]
    pub fn insert_truth(&mut self, name: impl Into<String>, mask: MaskVolume) {
        self.truths.insert(name.into(), mask);
    }

    /// 按名字查找预测候选掩膜.
    #[inline]
    pub fn prediction(&self, name: &str) -> Option<&MaskVolume> {
        self.predictions.get(name)
    }

    /// 按名字查找真值候选掩膜.
    #[inline]
    pub fn truth(&self, name: &str) -> Option<&MaskVolume> {
        self.truths.get(name)
    }

    /// 以升序迭代所有预测候选掩膜名. 供 UI 生成勾选列表.
    pub fn prediction_names(&self) -> impl Iterator<Item = &str> {
        self.predictions.keys().map(String::as_str)
    }

    /// 以升序迭代所有真值候选掩膜名. 供 UI 生成勾选列表.
    pub fn truth_names(&self) -> impl Iterator<Item = &str> {
        self.truths.keys().map(String::as_str)
    }

    /// 掩膜总个数 (两类角色之和).
    #[inline]
    pub fn len(&self) -> usize {
        self.predictions.len() + self.truths.len()
    }

    /// 集合是否为空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 两类角色合并的迭代器, 供载入校验使用.
    fn iter_all(&self) -> impl Iterator<Item = (&String, &MaskVolume)> {
        self.predictions.iter().chain(self.truths.iter())
    }
}

/// 已对齐的 3D 体数据仓库: 窗口化后的图像体数据 + 命名掩膜集合.
///
/// 在单个病例的生命周期内, 该结构独占持有全部体数据. 从中提取的平面与
/// 渲染产物均为临时值, 每次重绘重新计算, 不跨帧缓存.
#[derive(Debug, Clone)]
pub struct VolumeStore {
    /// 窗口化后的图像体数据, 轴序 (depth, row, column).
    image: Array3<f32>,
    masks: MaskSet,
    window: CtWindow,
}

impl VolumeStore {
    /// 载入一个病例.
    ///
    /// 先校验每个掩膜的形状与图像形状一致: 首个不一致的掩膜以
    /// [`LoadError::ShapeMismatch`] 报告, 整次载入失败, 不保留任何部分状态.
    /// 校验通过后, 以 `window` 对整个图像体数据做一次窗口化
    /// (HU → \[0, 255\] 浮点); 显示期再按切片做 min/max 拉伸.
    /// 非有限 HU 值 (inf, NaN) 映射到窗下限.
    pub fn load(image: Array3<f32>, masks: MaskSet, window: CtWindow) -> Result<Self, LoadError> {
        let expected = image.dim();
        for (name, mask) in masks.iter_all() {
            let found = mask.dim();
            if found != expected {
                return Err(LoadError::ShapeMismatch {
                    name: name.clone(),
                    expected,
                    found,
                });
            }
        }

        let mut image = image;
        window_in_place(&mut image, window);
        debug!(
            "载入病例: 形状 {expected:?}, 掩膜 {} 个, 窗 [{}, {}]",
            masks.len(),
            window.lower_bound(),
            window.upper_bound()
        );
        Ok(Self {
            image,
            masks,
            window,
        })
    }

    /// 体数据形状 (depth, row, column).
    #[inline]
    pub fn shape(&self) -> Idx3d {
        self.image.dim()
    }

    /// 轴状位切片的形状 (row, column).
    #[inline]
    pub fn slice_shape(&self) -> Idx2d {
        let (_, h, w) = self.shape();
        (h, w)
    }

    /// 载入时使用的 CT 窗.
    #[inline]
    pub fn window(&self) -> CtWindow {
        self.window
    }

    /// 窗口化后图像体数据的一份不可变 shallow copy.
    #[inline]
    pub fn image(&self) -> ArrayView3<'_, f32> {
        self.image.view()
    }

    /// 掩膜集合.
    #[inline]
    pub fn masks(&self) -> &MaskSet {
        &self.masks
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use ndarray::Axis;
        use rayon::iter::{IntoParallelIterator, ParallelIterator};
    }
}

/// 对整个体数据做一次载入窗口化. 借助 `rayon` 按水平切片并行.
///
/// 载入是一次性同步步骤, 并行不影响 "每事件一次重绘" 的顺序语义.
#[cfg(feature = "rayon")]
fn window_in_place(image: &mut Array3<f32>, window: CtWindow) {
    image
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .for_each(|mut sli| {
            sli.mapv_inplace(|hu| window.eval_f32(hu).unwrap_or(0.0));
        });
}

/// 对整个体数据做一次载入窗口化.
#[cfg(not(feature = "rayon"))]
fn window_in_place(image: &mut Array3<f32>, window: CtWindow) {
    image.mapv_inplace(|hu| window.eval_f32(hu).unwrap_or(0.0));
}

#[cfg(test)]
mod tests {
    use super::{CtWindow, MaskSet, VolumeStore};
    use crate::LoadError;
    use ndarray::Array3;

    fn init_log() {
        let _ = simple_logger::SimpleLogger::new().init();
    }

    #[test]
    fn test_shape_mismatch_names_offender() {
        init_log();
        let image = Array3::<f32>::zeros((4, 4, 4));
        let mut masks = MaskSet::new();
        masks.insert_prediction("Pred_A", Array3::from_elem((4, 4, 4), false));
        masks.insert_truth("Truth_B", Array3::from_elem((4, 4, 5), false));

        let err = VolumeStore::load(image, masks, CtWindow::from_overlay_visual()).unwrap_err();
        assert_eq!(
            err,
            LoadError::ShapeMismatch {
                name: "Truth_B".into(),
                expected: (4, 4, 4),
                found: (4, 4, 5),
            }
        );
    }

    #[test]
    fn test_load_applies_window_once() {
        let mut image = Array3::<f32>::zeros((2, 2, 2));
        image[(1, 0, 0)] = 100.0;
        image[(1, 1, 1)] = f32::NAN;
        let store = VolumeStore::load(image, MaskSet::new(), CtWindow::from_overlay_visual())
            .expect("形状一致, 载入应当成功");

        assert_eq!(store.shape(), (2, 2, 2));
        assert_eq!(store.slice_shape(), (2, 2));
        // 0 HU -> 102.0, 100 HU -> 153.0, NaN -> 窗下限.
        assert!((store.image()[(0, 0, 0)] - 102.0).abs() < 1e-4);
        assert!((store.image()[(1, 0, 0)] - 153.0).abs() < 1e-4);
        assert_eq!(store.image()[(1, 1, 1)], 0.0);
    }

    #[test]
    fn test_mask_roles_are_disjoint() {
        let mut masks = MaskSet::new();
        masks.insert_prediction("A", Array3::from_elem((1, 1, 1), true));
        masks.insert_truth("B", Array3::from_elem((1, 1, 1), true));

        assert_eq!(masks.len(), 2);
        assert!(masks.prediction("A").is_some());
        assert!(masks.prediction("B").is_none());
        assert!(masks.truth("B").is_some());
        assert_eq!(masks.prediction_names().collect::<Vec<_>>(), ["A"]);
        assert_eq!(masks.truth_names().collect::<Vec<_>>(), ["B"]);
    }
}
