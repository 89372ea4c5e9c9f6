//! 轮廓上色合成与整条渲染管线.

use image::{Rgb, RgbImage};
use ndarray::Array2;

use crate::combine::{combine_predictions, combine_truth};
use crate::consts::rgb;
use crate::outline::OutlineSet;
use crate::slicing::{extract, stretch_to_gray};
use crate::view::ViewState;
use crate::viewport;
use crate::VolumeStore;

/// 最终显示用的 RGB 位图. 每帧重新生成, 被显示面消费一次后即丢弃.
pub type Raster = RgbImage;

/// 将灰度平面扩展为三通道位图, 并按固定颜色绘制轮廓.
///
/// 绘制顺序: 先假阳性, 后假阴性. 两类轮廓在单像素环上偶有重叠,
/// 重叠处红色胜出, 保证漏检始终可见. 一致轮廓被计算但不绘制
/// (保留原行为; 见 [`OutlineSet::agreement`]).
pub fn compose(gray: &Array2<u8>, outlines: &OutlineSet) -> Raster {
    let (height, width) = gray.dim();
    let mut buf = RgbImage::new(width as u32, height as u32);
    for ((h, w), &g) in gray.indexed_iter() {
        buf.put_pixel(w as u32, h as u32, Rgb([g, g, g]));
    }
    paint(&mut buf, &outlines.false_positive, rgb::FALSE_POSITIVE);
    paint(&mut buf, &outlines.false_negative, rgb::FALSE_NEGATIVE);
    buf
}

/// 把 `mask` 为真的像素涂成 `color`. `(h, w)` 索引对应 `(y, x)` 像素.
fn paint(buf: &mut Raster, mask: &Array2<bool>, color: [u8; 3]) {
    for ((h, w), &set) in mask.indexed_iter() {
        if set {
            buf.put_pixel(w as u32, h as u32, Rgb(color));
        }
    }
}

/// 完整渲染管线: 切片提取 → 灰度拉伸 → 掩膜组合 → 轮廓提取 →
/// 上色合成 → 视口变换.
///
/// `canvas` 为显示面的 (宽, 高), 单位像素. 任何渲染期失败 --
/// 过期的掩膜标识符、越界切片索引、非法缩放倍率、被平移出画布的空视口 --
/// 都返回 `None`, 语义为 "保留上一帧". 该函数对交互会话保证不 panic.
pub fn render(store: &VolumeStore, view: &ViewState, canvas: (u32, u32)) -> Option<Raster> {
    let shape = store.shape();
    if view.slice_index >= view.axis.extent(shape) {
        return None;
    }
    if !(view.zoom > 0.0 && view.zoom.is_finite()) {
        return None;
    }

    let img_plane = extract(store.image(), view.axis, view.slice_index);
    let gray = stretch_to_gray(&img_plane);
    let plane_shape = img_plane.dim();

    // 选中掩膜的同位切片. 标识符在掩膜集合中不存在 => 渲染失败.
    let mut pred_planes = Vec::with_capacity(view.selected_predictions.len());
    for name in &view.selected_predictions {
        let mask = store.masks().prediction(name)?;
        pred_planes.push(extract(mask.view(), view.axis, view.slice_index));
    }
    let mut truth_planes = Vec::with_capacity(view.selected_truth.len());
    for name in &view.selected_truth {
        let mask = store.masks().truth(name)?;
        truth_planes.push(extract(mask.view(), view.axis, view.slice_index));
    }

    let pred_views: Vec<_> = pred_planes.iter().map(|p| p.view()).collect();
    let truth_views: Vec<_> = truth_planes.iter().map(|p| p.view()).collect();
    let pred = combine_predictions(&pred_views, view.combine_mode, plane_shape);
    let truth = combine_truth(&truth_views, plane_shape);

    let outlines = OutlineSet::detect(&pred, &truth);
    let full = compose(&gray, &outlines);
    viewport::apply(&full, view.zoom, view.pan, canvas)
}
