//! # Scrim 模块
//!
//! 覆盖层背后的遮罩（变暗）伴随动画。
//!
//! 遮罩由宿主驱动，控制器只在强制结束主运行器时同步强制结束遮罩。

use std::cell::RefCell;

use crate::animation::Timeline;
use crate::config::AnimationTiming;

/// 遮罩伴随动画
pub trait ScrimCompanion {
    /// 立即跳到终态
    fn force_to_finish(&self);
}

#[derive(Debug)]
struct ScrimData {
    timeline: Option<Timeline>,
    alpha: f32,
}

/// 基于时间轴的遮罩动画
#[derive(Debug)]
pub struct ScrimAnimator {
    timing: AnimationTiming,
    /// 完全显示时的遮罩透明度
    max_alpha: f32,
    inner: RefCell<ScrimData>,
}

impl ScrimAnimator {
    pub fn new(timing: AnimationTiming, max_alpha: f32) -> Self {
        Self {
            timing,
            max_alpha: max_alpha.clamp(0.0, 1.0),
            inner: RefCell::new(ScrimData {
                timeline: None,
                alpha: 0.0,
            }),
        }
    }

    /// 遮罩淡入
    pub fn show(&self) {
        self.animate_to(self.max_alpha);
    }

    /// 遮罩淡出
    pub fn hide(&self) {
        self.animate_to(0.0);
    }

    fn animate_to(&self, target: f32) {
        let mut data = self.inner.borrow_mut();
        let mut timeline = Timeline::new(data.alpha, target, self.timing.duration_secs())
            .with_easing(self.timing.easing);
        timeline.start();
        data.alpha = timeline.value();
        data.timeline = Some(timeline);
    }

    /// 推进遮罩动画；返回是否仍在播放
    pub fn update(&self, dt: f32) -> bool {
        let mut data = self.inner.borrow_mut();
        let Some(timeline) = data.timeline.as_mut() else {
            return false;
        };
        let running = timeline.update(dt);
        let alpha = timeline.value();
        data.alpha = alpha;
        if !running {
            data.timeline = None;
        }
        running
    }

    pub fn alpha(&self) -> f32 {
        self.inner.borrow().alpha
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().timeline.is_some()
    }
}

impl ScrimCompanion for ScrimAnimator {
    fn force_to_finish(&self) {
        let mut data = self.inner.borrow_mut();
        if let Some(mut timeline) = data.timeline.take() {
            timeline.finish();
            data.alpha = timeline.value();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::EasingFunction;

    fn scrim() -> ScrimAnimator {
        ScrimAnimator::new(AnimationTiming::new(100, EasingFunction::Linear), 0.6)
    }

    #[test]
    fn test_show_then_update() {
        let scrim = scrim();
        scrim.show();
        assert!(scrim.is_animating());
        assert_eq!(scrim.alpha(), 0.0);

        assert!(scrim.update(0.05));
        assert!((scrim.alpha() - 0.3).abs() < 1e-4);

        assert!(!scrim.update(0.1));
        assert!(!scrim.is_animating());
        assert!((scrim.alpha() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_force_to_finish() {
        let scrim = scrim();
        scrim.show();
        scrim.force_to_finish();
        assert!(!scrim.is_animating());
        assert!((scrim.alpha() - 0.6).abs() < 1e-6);

        scrim.hide();
        scrim.force_to_finish();
        assert_eq!(scrim.alpha(), 0.0);

        // 没有动画时是空操作
        scrim.force_to_finish();
        assert_eq!(scrim.alpha(), 0.0);
    }
}
