//! # Visual 模块
//!
//! 覆盖层的可动画视觉状态。
//!
//! 动画器把当前值写入 `OverlayVisual`，合成器每帧读取快照绘制。
//! 使用 `RefCell` 实现内部可变性，多个动画器可以共享同一个 `Rc<OverlayVisual>`。

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::Timeline;
use crate::geometry::{Color, Rect};
use crate::preview::PreviewImage;

use super::PlanAnimation;

/// 可被时间轴驱动的单值属性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualProperty {
    /// 透明度 (0.0 - 1.0)
    Alpha,
    /// 垂直偏移（像素，正值向下）
    OffsetY,
}

/// 视觉状态快照
#[derive(Debug, Clone)]
pub struct OverlayVisualData {
    pub alpha: f32,
    pub offset_y: f32,
    /// 缩放展开动画的裁剪区域
    pub clip: Option<Rect>,
    /// 缩放展开动画的背景色
    pub background: Option<Color>,
    /// 缩放展开动画使用的预览图
    pub preview: Option<PreviewImage>,
}

impl Default for OverlayVisualData {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            offset_y: 0.0,
            clip: None,
            background: None,
            preview: None,
        }
    }
}

/// 覆盖层视觉状态
#[derive(Debug, Default)]
pub struct OverlayVisual {
    inner: RefCell<OverlayVisualData>,
}

impl OverlayVisual {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取当前快照
    pub fn snapshot(&self) -> OverlayVisualData {
        self.inner.borrow().clone()
    }

    pub fn alpha(&self) -> f32 {
        self.inner.borrow().alpha
    }

    pub fn offset_y(&self) -> f32 {
        self.inner.borrow().offset_y
    }

    pub fn clip(&self) -> Option<Rect> {
        self.inner.borrow().clip
    }

    pub fn has_preview(&self) -> bool {
        self.inner.borrow().preview.is_some()
    }

    /// 设置单值属性
    pub fn set_property(&self, property: VisualProperty, value: f32) {
        let mut data = self.inner.borrow_mut();
        match property {
            VisualProperty::Alpha => data.alpha = value.clamp(0.0, 1.0),
            VisualProperty::OffsetY => data.offset_y = value,
        }
    }

    pub fn set_clip(&self, clip: Option<Rect>) {
        self.inner.borrow_mut().clip = clip;
    }

    pub fn set_background(&self, background: Option<Color>) {
        self.inner.borrow_mut().background = background;
    }

    pub fn set_preview(&self, preview: Option<PreviewImage>) {
        self.inner.borrow_mut().preview = preview;
    }

    /// 恢复为静止的完全可见状态
    pub fn reset(&self) {
        *self.inner.borrow_mut() = OverlayVisualData::default();
    }
}

/// 用一条时间轴驱动一个视觉属性的动画
pub(crate) struct PropertyAnimation {
    timeline: Timeline,
    property: VisualProperty,
    visual: Rc<OverlayVisual>,
}

impl PropertyAnimation {
    pub(crate) fn new(
        timeline: Timeline,
        property: VisualProperty,
        visual: Rc<OverlayVisual>,
    ) -> Self {
        Self {
            timeline,
            property,
            visual,
        }
    }

    fn apply(&self) {
        self.visual.set_property(self.property, self.timeline.value());
    }
}

impl PlanAnimation for PropertyAnimation {
    fn start(&mut self) {
        self.timeline.start();
        self.apply();
    }

    fn update(&mut self, dt: f32) -> bool {
        let running = self.timeline.update(dt);
        self.apply();
        running
    }

    fn finish_now(&mut self) {
        self.timeline.finish();
        self.apply();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::EasingFunction;

    #[test]
    fn test_visual_properties() {
        let visual = OverlayVisual::new();
        assert_eq!(visual.alpha(), 1.0);

        visual.set_property(VisualProperty::Alpha, 1.5);
        assert_eq!(visual.alpha(), 1.0);

        visual.set_property(VisualProperty::OffsetY, 40.0);
        visual.set_clip(Some(Rect::point(1.0, 2.0)));
        assert_eq!(visual.offset_y(), 40.0);
        assert_eq!(visual.snapshot().clip, Some(Rect::point(1.0, 2.0)));

        visual.reset();
        assert_eq!(visual.offset_y(), 0.0);
        assert!(visual.clip().is_none());
    }

    #[test]
    fn test_property_animation_drives_visual() {
        let visual = Rc::new(OverlayVisual::new());
        let timeline = Timeline::new(0.0, 1.0, 1.0).with_easing(EasingFunction::Linear);
        let mut animation = PropertyAnimation::new(timeline, VisualProperty::Alpha, visual.clone());

        animation.start();
        assert_eq!(visual.alpha(), 0.0);

        assert!(animation.update(0.25));
        assert!((visual.alpha() - 0.25).abs() < 1e-4);

        animation.finish_now();
        assert_eq!(visual.alpha(), 1.0);
        assert!(!animation.update(0.1));
    }
}
