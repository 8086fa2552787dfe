//! # Host 模块
//!
//! 过渡协调器依赖的外部协作者接口。
//!
//! 所有协作者都运行在同一个 UI 线程上，通过 `Rc` 共享，需要可变状态时自行使用
//! 内部可变性。协作者在这些回调中不得同步重入 `TransitionController`，需要时
//! 通过 `Scheduler` 延后。

use std::rc::Rc;

use crate::animators::AnimatorProvider;
use crate::geometry::{Color, Rect};
use crate::model::{
    ContentId, ContentKind, DestinationId, ResumeReason, SelectionMode, SuspendReason,
    TransitionContext,
};

/// 宿主控制器
pub trait HostController {
    /// 覆盖层即将显示
    fn on_will_show(&self);

    /// 覆盖层即将隐藏
    fn on_will_hide(&self, _next: Option<ContentId>, _hint_at_next_selection: bool) {}

    /// 覆盖层已完全隐藏
    fn on_did_hide(&self);

    /// 释放 / 隐藏被覆盖层替换的内容
    fn release_content(&self, content_id: ContentId);

    /// 把覆盖层容器插入宿主视图树（初始不绘制）
    fn attach_container(&self);

    /// 从宿主视图树移除覆盖层容器
    fn detach_container(&self);

    /// 覆盖层容器的当前边界
    fn container_bounds(&self) -> Rect;

    /// 目的地面板的内容区域
    fn pane_host_bounds(&self) -> Rect;

    /// 目的地对应的背景色
    fn background_color(&self, destination: DestinationId) -> Color;

    /// 显示前处于前台的内容类型
    fn previous_context(&self) -> TransitionContext;

    /// 隐藏后将处于前台的内容类型
    fn next_context(&self) -> TransitionContext;

    /// 当前选择模式（普通 / 隐私）
    fn selection_mode(&self) -> SelectionMode;
}

/// 内容注册表（只通过 ID 访问）
pub trait ContentRegistry {
    fn current_content_id(&self) -> Option<ContentId>;

    fn is_content_suspended(&self, content_id: ContentId) -> bool;

    fn resume_content(&self, content_id: ContentId, reason: ResumeReason);

    fn suspend_content(&self, content_id: ContentId, reason: SuspendReason);

    /// 把内容设为当前选中
    fn select_content(&self, content_id: ContentId);

    fn content_kind(&self, content_id: ContentId) -> ContentKind;
}

/// 覆盖层内的目的地（面板）
pub trait Destination {
    fn id(&self) -> DestinationId;

    /// 面板专属的显示动画
    fn create_show_animator_provider(&self, container: Rect) -> Box<dyn AnimatorProvider>;

    /// 面板专属的隐藏动画
    fn create_hide_animator_provider(&self, container: Rect) -> Box<dyn AnimatorProvider>;
}

/// 目的地注册表
pub trait DestinationRegistry {
    /// 聚焦指定目的地
    fn focus(&self, destination: DestinationId);

    /// 当前聚焦的目的地；未注册或未聚焦时为 `None`
    fn focused_destination(&self) -> Option<Rc<dyn Destination>>;
}

/// 设备显示类别
pub trait DisplayClass {
    /// 宽屏 / 多窗口设备
    fn is_wide_display_class(&self) -> bool;
}
