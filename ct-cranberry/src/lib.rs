#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 将 3D CT 体数据与若干二值分割掩膜叠加, 逐切片展示
//! 预测掩膜集与真值掩膜集之间的一致/分歧轮廓.
//!
//! 该 crate 只覆盖有算法内容的部分: 三轴切片提取、CT 窗口化、
//! 掩膜布尔组合、基于形态学膨胀的轮廓提取、上色合成, 以及缩放/平移的视口映射.
//! 窗口系统 (checkbox, scrollbar 等控件) 和文件读写 (nii/npy 解码、
//! 异构网格重采样、落盘) 均为外部协作者的职责; 本库只消费已对齐的 3D 数组,
//! 输出最终 RGB [`Raster`] 与组合后的布尔体数据.
//!
//! # 注意
//!
//! 1. 载入失败 (掩膜形状不一致) 是致命错误, 以 [`LoadError`] 返回,
//!    不保留任何部分状态.
//! 2. 渲染期间的一切失败都退化为 `None` ("保留上一帧"), 不会让交互会话崩溃.
//! 3. 对程序员错误 (如把越界切片索引直接喂给提取器), 程序会直接 panic,
//!    而不会导致内存错误. As what Rust promises.
//!    钳制应当发生在 [`ViewState`] 变更边界.
//!
//! # 数据流
//!
//! 每次重绘恰好执行一趟:
//!
//! [`VolumeStore`] → [`extract`] → [`stretch_to_gray`] →
//! ([`combine_predictions`] / [`combine_truth`]) → [`OutlineSet::detect`] →
//! [`compose`] → [`viewport`] → [`Raster`].
//!
//! 会话是单线程、与 UI 事件循环协作式同步的: 每个用户事件触发一次完整重算.
//! 打开 `rayon` feature 后, 载入期的全体窗口化会按切片并行,
//! 但不改变 "每事件一次重绘" 的顺序语义.

/// 二维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx2d = (usize, usize);

/// 三维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx3d = (usize, usize, usize);

/// 体数据与掩膜集合的基础数据结构.
mod data;

pub use data::{CtWindow, MaskSet, MaskVolume, VolumeStore};

pub mod consts;

mod error;

pub use error::LoadError;

mod slicing;

pub use slicing::{extract, stretch_to_gray, ViewAxis};

mod view;

pub use view::{CombineMode, ViewState};

mod combine;

pub use combine::{combine_predictions, combine_truth};

mod outline;

pub use outline::{boundary, dilate4, OutlineSet};

mod render;

pub use render::{compose, render, Raster};

pub mod viewport;

mod export;

pub use export::write_selection;

pub mod prelude;
