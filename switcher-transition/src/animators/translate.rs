//! 宽屏设备上的整体平移：显示时从底部滑入，隐藏时滑出到底部。

use std::rc::Rc;

use crate::animation::Timeline;
use crate::config::AnimationTiming;
use crate::geometry::Rect;
use crate::model::{AnimationKind, TransitionDirection};

use super::visual::{OverlayVisual, PropertyAnimation, VisualProperty};
use super::{AnimationPlan, AnimatorProvider};

pub struct TranslateAnimatorProvider {
    direction: TransitionDirection,
    timing: AnimationTiming,
    visual: Rc<OverlayVisual>,
}

impl TranslateAnimatorProvider {
    pub fn new(
        direction: TransitionDirection,
        timing: AnimationTiming,
        visual: Rc<OverlayVisual>,
    ) -> Self {
        Self {
            direction,
            timing,
            visual,
        }
    }
}

impl AnimatorProvider for TranslateAnimatorProvider {
    fn kind(&self) -> AnimationKind {
        AnimationKind::Translate
    }

    fn supply_plan(&mut self, bounds: Rect) -> AnimationPlan {
        let (from, to) = match self.direction {
            TransitionDirection::Show => (bounds.height, 0.0),
            TransitionDirection::Hide => (0.0, bounds.height),
        };
        self.visual.reset();

        let timeline =
            Timeline::new(from, to, self.timing.duration_secs()).with_easing(self.timing.easing);
        AnimationPlan::new(Box::new(PropertyAnimation::new(
            timeline,
            VisualProperty::OffsetY,
            self.visual.clone(),
        )))
    }
}
