//! 缩放与平移的视口映射.

use image::imageops;

use crate::render::Raster;

/// 以最近邻采样缩放位图.
///
/// 对每个目标像素取源索引 `floor(dst * old / new)` 并钳制到合法范围,
/// 不做任何插值混合. `zoom == 1.0` 时返回逐字节相同的副本 (幂等).
///
/// `zoom` 必须为正有限数, 否则 panic; [`crate::render`] 已在入口处
/// 把非法缩放挡在渲染边界之外.
pub fn resize_nearest(raster: &Raster, zoom: f64) -> Raster {
    assert!(zoom > 0.0 && zoom.is_finite(), "缩放倍率必须为正有限数");
    let (old_w, old_h) = raster.dimensions();
    if zoom == 1.0 || old_w == 0 || old_h == 0 {
        return raster.clone();
    }
    let new_w = ((old_w as f64 * zoom) as u32).max(1);
    let new_h = ((old_h as f64 * zoom) as u32).max(1);

    let mut out = Raster::new(new_w, new_h);
    for y in 0..new_h {
        let src_y = ((y as u64 * old_h as u64) / new_h as u64) as u32;
        let src_y = src_y.min(old_h - 1);
        for x in 0..new_w {
            let src_x = ((x as u64 * old_w as u64) / new_w as u64) as u32;
            let src_x = src_x.min(old_w - 1);
            out.put_pixel(x, y, *raster.get_pixel(src_x, src_y));
        }
    }
    out
}

/// 计算可见矩形: 缩放后的位图被 `pan` 平移后, 与画布相交的部分.
///
/// 返回 `(x, y, 宽, 高)`, 坐标相对缩放后的位图; 平移偏移向下取整.
/// 位图完全移出画布 (交集为空) 时返回 `None`.
pub fn visible_rect(
    zoomed: (u32, u32),
    canvas: (u32, u32),
    pan: (f64, f64),
) -> Option<(u32, u32, u32, u32)> {
    let (zw, zh) = (zoomed.0 as i64, zoomed.1 as i64);
    let (cw, ch) = (canvas.0 as i64, canvas.1 as i64);
    let (px, py) = (pan.0.floor() as i64, pan.1.floor() as i64);

    let x0 = 0.max(-px);
    let y0 = 0.max(-py);
    let x1 = zw.min(cw - px);
    let y1 = zh.min(ch - py);

    (x0 < x1 && y0 < y1).then(|| (x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
}

/// 完整视口变换: 先按 `zoom` 最近邻缩放, 再按可见矩形裁剪.
///
/// 交集为空 (被平移出画布、或画布为零尺寸) 时返回 `None`.
pub fn apply(raster: &Raster, zoom: f64, pan: (f64, f64), canvas: (u32, u32)) -> Option<Raster> {
    let zoomed = resize_nearest(raster, zoom);
    let (x, y, w, h) = visible_rect(zoomed.dimensions(), canvas, pan)?;
    Some(imageops::crop_imm(&zoomed, x, y, w, h).to_image())
}

#[cfg(test)]
mod tests {
    use super::{apply, resize_nearest, visible_rect};
    use crate::render::Raster;
    use image::Rgb;

    /// 4x4 棋盘位图, 左上角白.
    fn checker4() -> Raster {
        let mut r = Raster::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                r.put_pixel(x, y, Rgb([v, v, v]));
            }
        }
        r
    }

    #[test]
    fn test_resize_noop_is_identity() {
        let r = checker4();
        assert_eq!(resize_nearest(&r, 1.0), r);
    }

    #[test]
    fn test_resize_double_replicates_pixels() {
        let r = checker4();
        let big = resize_nearest(&r, 2.0);
        assert_eq!(big.dimensions(), (8, 8));
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(big.get_pixel(x, y), r.get_pixel(x / 2, y / 2));
            }
        }
    }

    #[test]
    fn test_resize_shrink_uses_floor_mapping() {
        let r = checker4();
        let small = resize_nearest(&r, 0.5);
        assert_eq!(small.dimensions(), (2, 2));
        // src = floor(dst * 4 / 2) = 2 * dst.
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(small.get_pixel(x, y), r.get_pixel(x * 2, y * 2));
            }
        }
    }

    #[test]
    fn test_visible_rect_intersection() {
        // 位图整体落在画布内.
        assert_eq!(visible_rect((8, 8), (4, 4), (0.0, 0.0)), Some((0, 0, 4, 4)));

        // 向左上平移: 裁掉位图左上.
        assert_eq!(
            visible_rect((8, 8), (4, 4), (-2.0, -1.0)),
            Some((2, 1, 4, 4))
        );

        // 向右下平移: 画布右侧只剩部分列.
        assert_eq!(visible_rect((8, 8), (4, 4), (2.0, 0.0)), Some((0, 0, 2, 4)));

        // 完全移出画布.
        assert_eq!(visible_rect((8, 8), (4, 4), (10.0, 0.0)), None);
        assert_eq!(visible_rect((8, 8), (4, 4), (0.0, -9.0)), None);

        // 零尺寸画布.
        assert_eq!(visible_rect((8, 8), (0, 4), (0.0, 0.0)), None);
    }

    #[test]
    fn test_apply_crops_after_zoom() {
        let r = checker4();
        let got = apply(&r, 2.0, (-2.0, -1.0), (4, 4)).unwrap();
        assert_eq!(got.dimensions(), (4, 4));

        let big = resize_nearest(&r, 2.0);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(got.get_pixel(x, y), big.get_pixel(x + 2, y + 1));
            }
        }

        assert!(apply(&r, 1.0, (100.0, 0.0), (4, 4)).is_none());
    }
}
