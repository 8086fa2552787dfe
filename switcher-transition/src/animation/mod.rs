//! # Animation 模块
//!
//! 动画原语：缓动函数与数值时间轴。
//!
//! 内置动画器（平移、淡入淡出、缩放展开）和遮罩伴随动画都基于 `Timeline`
//! 驱动，帧推进由宿主每帧调用 `update(dt)` 完成。

mod easing;
mod timeline;

pub use easing::EasingFunction;
pub use timeline::{Timeline, TimelineState};
