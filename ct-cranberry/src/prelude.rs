//! 🫐欢迎光临🫐
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Idx2d, Idx3d};

pub use crate::data::{CtWindow, MaskSet, MaskVolume, VolumeStore};

pub use crate::consts::rgb;
pub use crate::consts::{DEFAULT_WINDOW_LOWER, DEFAULT_WINDOW_UPPER};

pub use crate::error::LoadError;

pub use crate::slicing::{extract, stretch_to_gray, ViewAxis};

pub use crate::view::{CombineMode, ViewState};

pub use crate::combine::{combine_predictions, combine_truth};

pub use crate::outline::{boundary, dilate4, OutlineSet};

pub use crate::render::{compose, render, Raster};

pub use crate::export::write_selection;

pub use crate::viewport;
