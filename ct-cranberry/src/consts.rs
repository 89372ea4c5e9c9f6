//! 通用常量.

/// 三通道轮廓颜色.
pub mod rgb {
    /// 假阳性区域 (预测有、真值无) 的轮廓颜色.
    ///
    /// 原型中记作 "green", 实际取值是一种浅蓝灰色. 按原样保留.
    pub const FALSE_POSITIVE: [u8; 3] = [123, 175, 212];

    /// 假阴性区域 (真值有、预测无) 的轮廓颜色.
    pub const FALSE_NEGATIVE: [u8; 3] = [255, 0, 0];

    /// 一致区域 (预测与真值重合) 的轮廓颜色.
    ///
    /// 当前合成行为只绘制假阳性与假阴性两类轮廓, 该颜色被计算但不绘制.
    /// 保留此常量, 以便调用方对 [`crate::OutlineSet::agreement`] 自行上色.
    pub const AGREEMENT: [u8; 3] = [0, 0, 255];
}

/// 默认载入窗下限, 单位 HU.
pub const DEFAULT_WINDOW_LOWER: f32 = -200.0;

/// 默认载入窗上限, 单位 HU.
pub const DEFAULT_WINDOW_UPPER: f32 = 300.0;
