//! # Animators 模块
//!
//! 动画策略选择与内置动画器。
//!
//! ## 核心概念
//!
//! - `AnimatorProvider`: 同步确定策略，在容器完成布局后产出 `AnimationPlan`
//! - `AnimationPlan`: 可运行的动画 + 可选的预览消费者
//! - `select_policy`: 纯函数，每次 show / hide 重新求值
//! - `Animators`: 按配置构建内置的平移、淡入淡出、新建内容动画器

mod fade;
mod shrink_expand;
mod translate;
mod visual;

use std::rc::Rc;

use crate::config::{AnimationTiming, TransitionConfig};
use crate::geometry::{Color, Rect};
use crate::model::{AnimationKind, TransitionContext, TransitionDirection};
use crate::preview::PreviewConsumer;

pub use fade::FadeAnimatorProvider;
pub use shrink_expand::{PendingPlacementData, ShrinkExpandAnimatorProvider};
pub use translate::TranslateAnimatorProvider;
pub use visual::{OverlayVisual, OverlayVisualData, VisualProperty};

/// 可运行的动画句柄
///
/// 计时由动画自身负责，宿主通过 `update(dt)` 推进。
pub trait PlanAnimation {
    /// 开始播放
    fn start(&mut self);

    /// 推进动画
    ///
    /// # 返回
    /// - `true`: 仍在播放
    /// - `false`: 已结束
    fn update(&mut self, dt: f32) -> bool;

    /// 立即跳到终态
    fn finish_now(&mut self);
}

/// 动画计划
///
/// 由包装它的运行器独占，运行器完成或被强制结束时销毁。
pub struct AnimationPlan {
    pub animation: Box<dyn PlanAnimation>,
    pub on_preview_ready: Option<PreviewConsumer>,
}

impl AnimationPlan {
    pub fn new(animation: Box<dyn PlanAnimation>) -> Self {
        Self {
            animation,
            on_preview_ready: None,
        }
    }

    /// 附加预览消费者
    pub fn with_preview_consumer(mut self, consumer: PreviewConsumer) -> Self {
        self.on_preview_ready = Some(consumer);
        self
    }
}

/// 动画提供者
pub trait AnimatorProvider {
    /// 该提供者代表的动画种类
    fn kind(&self) -> AnimationKind;

    /// 在容器布局完成后产出动画计划
    fn supply_plan(&mut self, bounds: Rect) -> AnimationPlan;
}

/// 策略选择结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorPolicy {
    Translate,
    Fade,
    PaneSpecific,
}

/// 选择动画策略
///
/// `context` 在显示时是之前的内容类型，在隐藏时是之后的内容类型。
/// 替代界面和没有聚焦目的地的情况没有可靠的视觉锚点，统一退化为淡入淡出。
pub fn select_policy(
    direction: TransitionDirection,
    context: TransitionContext,
    wide_display: bool,
    has_focused_destination: bool,
) -> AnimatorPolicy {
    if wide_display {
        return AnimatorPolicy::Translate;
    }

    let no_anchor = context == TransitionContext::AlternateSurface || !has_focused_destination;
    match direction {
        TransitionDirection::Show if no_anchor => AnimatorPolicy::Fade,
        TransitionDirection::Hide if no_anchor => AnimatorPolicy::Fade,
        TransitionDirection::Show | TransitionDirection::Hide => AnimatorPolicy::PaneSpecific,
    }
}

/// 内置动画器工厂
///
/// 所有内置动画器共享同一个 `OverlayVisual`。
#[derive(Clone)]
pub struct Animators {
    translate: AnimationTiming,
    fade: AnimationTiming,
    shrink_expand: AnimationTiming,
    visual: Rc<OverlayVisual>,
}

impl Animators {
    pub fn new(config: &TransitionConfig) -> Self {
        Self {
            translate: config.translate,
            fade: config.fade,
            shrink_expand: config.shrink_expand,
            visual: Rc::new(OverlayVisual::new()),
        }
    }

    /// 共享的视觉状态
    pub fn visual(&self) -> Rc<OverlayVisual> {
        self.visual.clone()
    }

    pub fn translate(&self, direction: TransitionDirection) -> Box<dyn AnimatorProvider> {
        Box::new(TranslateAnimatorProvider::new(
            direction,
            self.translate,
            self.visual.clone(),
        ))
    }

    pub fn fade(&self, direction: TransitionDirection) -> Box<dyn AnimatorProvider> {
        Box::new(FadeAnimatorProvider::new(
            direction,
            self.fade,
            self.visual.clone(),
        ))
    }

    pub fn shrink_expand_new_tab(
        &self,
        placement: PendingPlacementData,
        background: Color,
    ) -> Box<dyn AnimatorProvider> {
        Box::new(ShrinkExpandAnimatorProvider::new_tab(
            placement,
            background,
            self.shrink_expand,
            self.visual.clone(),
        ))
    }

    /// 供目的地面板复用的缩放动画
    pub fn shrink_expand_pane(
        &self,
        placement: PendingPlacementData,
        background: Color,
    ) -> Box<dyn AnimatorProvider> {
        Box::new(ShrinkExpandAnimatorProvider::for_pane(
            placement,
            background,
            self.shrink_expand,
            self.visual.clone(),
        ))
    }
}
