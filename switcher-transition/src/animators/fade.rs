//! 淡入淡出：没有可靠视觉锚点时的安全回退。

use std::rc::Rc;

use crate::animation::Timeline;
use crate::config::AnimationTiming;
use crate::geometry::Rect;
use crate::model::{AnimationKind, TransitionDirection};

use super::visual::{OverlayVisual, PropertyAnimation, VisualProperty};
use super::{AnimationPlan, AnimatorProvider};

pub struct FadeAnimatorProvider {
    direction: TransitionDirection,
    timing: AnimationTiming,
    visual: Rc<OverlayVisual>,
}

impl FadeAnimatorProvider {
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

impl AnimatorProvider for FadeAnimatorProvider {
    fn kind(&self) -> AnimationKind {
        AnimationKind::Fade
    }

    fn supply_plan(&mut self, _bounds: Rect) -> AnimationPlan {
        let (from, to) = match self.direction {
            TransitionDirection::Show => (0.0, 1.0),
            TransitionDirection::Hide => (1.0, 0.0),
        };
        self.visual.reset();

        let timeline =
            Timeline::new(from, to, self.timing.duration_secs()).with_easing(self.timing.easing);
        AnimationPlan::new(Box::new(PropertyAnimation::new(
            timeline,
            VisualProperty::Alpha,
            self.visual.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::EasingFunction;

    #[test]
    fn test_fade_out_on_hide() {
        let visual = Rc::new(OverlayVisual::new());
        let timing = AnimationTiming::new(200, EasingFunction::Linear);
        let mut provider =
            FadeAnimatorProvider::new(TransitionDirection::Hide, timing, visual.clone());
        assert_eq!(provider.kind(), AnimationKind::Fade);

        let mut plan = provider.supply_plan(Rect::default());
        plan.animation.start();
        assert_eq!(visual.alpha(), 1.0);

        assert!(plan.animation.update(0.1));
        assert!((visual.alpha() - 0.5).abs() < 1e-4);

        assert!(!plan.animation.update(0.15));
        assert_eq!(visual.alpha(), 0.0);
    }
}
