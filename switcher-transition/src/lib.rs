//! # Switcher Transition
//!
//! 内容切换器覆盖层的显示 / 隐藏过渡协调核心。
//!
//! ## 架构说明
//!
//! 核心负责：
//! - 维护 `Hidden / Showing / Shown / Hiding` 状态机
//! - 为每次过渡选择动画策略并驱动唯一的动画运行器
//! - 异步获取被替换内容的预览快照
//! - 处理打断（显示中途隐藏）与前台新建内容的入口动画
//!
//! 宿主界面、内容注册表、预览来源和调度器都以 trait 形式注入，核心不包含任何渲染代码。

pub mod animation;
pub mod animators;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod host;
pub mod model;
pub mod preview;
pub mod runner;
pub mod scheduler;
pub mod scrim;
pub mod visible;

pub use animation::{EasingFunction, Timeline, TimelineState};
pub use animators::{
    AnimationPlan, AnimatorPolicy, AnimatorProvider, Animators, OverlayVisual, OverlayVisualData,
    PendingPlacementData, PlanAnimation, select_policy,
};
pub use config::{AnimationTiming, NewContentConfig, TransitionConfig};
pub use controller::{Collaborators, TransitionController};
pub use error::{TransitionError, TransitionResult};
pub use geometry::{Color, Rect};
pub use host::{ContentRegistry, Destination, DestinationRegistry, DisplayClass, HostController};
pub use model::{
    AnimationKind, ContentId, ContentKind, DestinationId, PlaceholderContent, ResumeReason,
    SelectionMode, SuspendReason, TransitionContext, TransitionDirection, TransitionState,
};
pub use preview::{PreviewCapture, PreviewImage, PreviewPromise, PreviewSource};
pub use runner::{AnimationRunner, CompletionListener, RunnerCompletion, RunnerId};
pub use scheduler::{DeferredTask, QueueScheduler, Scheduler};
pub use scrim::{ScrimAnimator, ScrimCompanion};
pub use visible::VisibleContent;
