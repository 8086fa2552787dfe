//! # ShrinkExpand 模块
//!
//! 裁剪区域从起始矩形插值到目标矩形的缩放展开动画。
//!
//! 两种用法：
//! - 新建内容入口：从面板左上角的一个点展开到整个面板区域
//! - 面板专属动画：在整页内容与缩略图位置之间缩放，可选使用预览图

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::animation::Timeline;
use crate::config::AnimationTiming;
use crate::geometry::{Color, Rect};
use crate::model::AnimationKind;
use crate::preview::PreviewImage;

use super::visual::OverlayVisual;
use super::{AnimationPlan, AnimatorProvider, PlanAnimation};

/// 缩放展开动画的落位数据
///
/// 每次过渡创建一次，只被它所播种的运行器消费一次。
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPlacementData {
    pub origin_rect: Rect,
    pub final_rect: Rect,
    /// 预览图尺寸（收到预览后填入）
    pub preview_size: Option<(u32, u32)>,
    /// 没有可用预览，动画不使用位图
    pub fallback: bool,
}

impl PendingPlacementData {
    pub fn new(origin_rect: Rect, final_rect: Rect) -> Self {
        Self {
            origin_rect,
            final_rect,
            preview_size: None,
            fallback: false,
        }
    }
}

pub struct ShrinkExpandAnimatorProvider {
    kind: AnimationKind,
    placement: Option<PendingPlacementData>,
    background: Color,
    timing: AnimationTiming,
    visual: Rc<OverlayVisual>,
}

impl ShrinkExpandAnimatorProvider {
    /// 新建内容入口动画
    pub fn new_tab(
        placement: PendingPlacementData,
        background: Color,
        timing: AnimationTiming,
        visual: Rc<OverlayVisual>,
    ) -> Self {
        Self {
            kind: AnimationKind::ShrinkExpandNewTab,
            placement: Some(placement),
            background,
            timing,
            visual,
        }
    }

    /// 供目的地面板使用的缩放动画
    pub fn for_pane(
        placement: PendingPlacementData,
        background: Color,
        timing: AnimationTiming,
        visual: Rc<OverlayVisual>,
    ) -> Self {
        Self {
            kind: AnimationKind::PaneSpecific,
            ..Self::new_tab(placement, background, timing, visual)
        }
    }

    /// 落位数据尚未被消费
    pub fn has_pending_placement(&self) -> bool {
        self.placement.is_some()
    }
}

impl AnimatorProvider for ShrinkExpandAnimatorProvider {
    fn kind(&self) -> AnimationKind {
        self.kind
    }

    fn supply_plan(&mut self, bounds: Rect) -> AnimationPlan {
        let placement = self.placement.take().unwrap_or_else(|| {
            warn!("落位数据已被消费，退化为整个容器区域");
            PendingPlacementData::new(bounds, bounds)
        });
        let placement = Rc::new(RefCell::new(placement));
        self.visual.reset();

        let shared = placement.clone();
        let visual = self.visual.clone();
        let on_preview_ready = Box::new(move |image: Option<PreviewImage>| {
            let mut placement = shared.borrow_mut();
            match image {
                Some(image) => {
                    placement.preview_size = Some(image.dimensions());
                    visual.set_preview(Some(image));
                }
                None => {
                    debug!("没有预览图，缩放动画不使用位图");
                    placement.fallback = true;
                }
            }
        });

        let timeline = Timeline::new(0.0, 1.0, self.timing.duration_secs())
            .with_easing(self.timing.easing);
        AnimationPlan::new(Box::new(ShrinkExpandAnimation {
            timeline,
            placement,
            background: self.background,
            visual: self.visual.clone(),
        }))
        .with_preview_consumer(on_preview_ready)
    }
}

struct ShrinkExpandAnimation {
    timeline: Timeline,
    placement: Rc<RefCell<PendingPlacementData>>,
    background: Color,
    visual: Rc<OverlayVisual>,
}

impl ShrinkExpandAnimation {
    fn apply(&self) {
        let placement = self.placement.borrow();
        let clip = placement
            .origin_rect
            .lerp(placement.final_rect, self.timeline.progress());
        self.visual.set_clip(Some(clip));
        if placement.fallback {
            self.visual.set_preview(None);
        }
    }
}

impl PlanAnimation for ShrinkExpandAnimation {
    fn start(&mut self) {
        self.visual.set_background(Some(self.background));
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
