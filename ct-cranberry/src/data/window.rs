use crate::consts::{DEFAULT_WINDOW_LOWER, DEFAULT_WINDOW_UPPER};

/// CT 窗口, 包含窗位 (window level) 和窗宽 (window width).
///
/// 载入期对整个体数据做一次该窗口化 (HU → \[0, 255\] 浮点);
/// 显示期的逐切片 min/max 拉伸是另一回事, 见 [`crate::stretch_to_gray`],
/// 两者不要混淆.
///
/// 该窗口是只读的. 若要修改窗口参数, 你应该创建新的实例.
#[derive(Copy, Clone, Debug)]
pub struct CtWindow {
    level: f32,
    width: f32,
}

impl CtWindow {
    /// 构建 CT 窗.
    ///
    /// `level` 和 `width` 必须在合理范围内, 否则返回 `None`.
    pub fn new(level: f32, width: f32) -> Option<CtWindow> {
        if (-1e5..=1e5).contains(&level) && 0.0 < width && width <= 1e5 {
            Some(Self { level, width })
        } else {
            None
        }
    }

    /// 由窗上下限构建 CT 窗. `lower` 必须严格小于 `upper`, 否则返回 `None`.
    pub fn from_bounds(lower: f32, upper: f32) -> Option<CtWindow> {
        if lower < upper {
            Self::new((lower + upper) / 2.0, upper - lower)
        } else {
            None
        }
    }

    /// 构建叠加视图的默认载入窗: 窗口范围 \[-200, 300\] HU,
    /// 即窗位 50, 窗宽 500.
    #[inline]
    pub const fn from_overlay_visual() -> CtWindow {
        Self {
            level: (DEFAULT_WINDOW_LOWER + DEFAULT_WINDOW_UPPER) / 2.0,
            width: DEFAULT_WINDOW_UPPER - DEFAULT_WINDOW_LOWER,
        }
    }

    /// 窗下限.
    #[inline]
    pub fn lower_bound(&self) -> f32 {
        self.level - self.width / 2.0
    }

    /// 窗上限.
    #[inline]
    pub fn upper_bound(&self) -> f32 {
        self.level + self.width / 2.0
    }

    /// 窗位.
    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// 窗宽.
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// 求在当前 CT 窗设置下, `ct` HU 值对应的灰度图像素整数值 (0 <= value <= 255)
    ///
    /// 如果 `ct` 无意义 (如 inf, NaN), 则返回 `None`.
    pub fn eval(&self, ct: f32) -> Option<u8> {
        if !ct.is_finite() {
            return None;
        }
        let lb = self.lower_bound();
        if ct <= lb {
            Some(u8::MIN)
        } else if ct >= self.upper_bound() {
            Some(u8::MAX)
        } else {
            // 255, not 256.
            Some((((ct - lb) / self.width()) * 255.0) as u8)
        }
    }

    /// 求在当前 CT 窗设置下, `ct` HU 值对应的灰度图像素分布点 (0.0 <= value <= 255.0).
    ///
    /// 如果 `ct` 无意义 (如 inf, NaN), 则返回 `None`.
    pub fn eval_f32(&self, ct: f32) -> Option<f32> {
        if !ct.is_finite() {
            return None;
        }
        let lb = self.lower_bound();
        let ub = self.upper_bound();
        if ct <= lb {
            Some(0.0)
        } else if ct >= ub {
            Some(255.0)
        } else {
            Some((ct - lb) / self.width() * 255.0)
        }
    }
}

impl Default for CtWindow {
    /// 等价于 [`Self::from_overlay_visual`].
    #[inline]
    fn default() -> Self {
        Self::from_overlay_visual()
    }
}
