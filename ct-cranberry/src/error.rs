//! 运行时错误.

use crate::Idx3d;
use std::error::Error;
use std::fmt;

/// 载入 3D 体数据时的致命错误.
///
/// 载入失败不产生任何部分状态: 会话维持 "未载入" 状态,
/// 调用方修复输入后必须从头重新载入.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// 某掩膜的形状与图像体数据不一致.
    ///
    /// 对齐 (重采样) 是外部加载器的职责, 本库不做任何恢复.
    ShapeMismatch {
        /// 不一致掩膜的标识符.
        name: String,

        /// 图像体数据的形状.
        expected: Idx3d,

        /// 该掩膜的实际形状.
        found: Idx3d,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "掩膜 `{name}` 的形状 {found:?} 与图像体数据形状 {expected:?} 不一致"
            ),
        }
    }
}

impl Error for LoadError {}
