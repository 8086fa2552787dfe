//! # Model 模块
//!
//! 过渡协调器的数据模型：状态、上下文标签、动画种类以及内容 / 目的地标识。

use std::fmt;

/// 切换器覆盖层的过渡状态
///
/// 只由 `TransitionController` 持有和修改。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionState {
    /// 覆盖层不可见
    #[default]
    Hidden,
    /// 正在显示（运行器存活或等待布局后启动）
    Showing,
    /// 覆盖层完全可见
    Shown,
    /// 正在隐藏（运行器存活或等待下一轮事件后启动）
    Hiding,
}

/// 覆盖层背后 / 前方的内容类型
///
/// 由宿主在 show / hide 时提供，核心只读。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionContext {
    /// 普通的单页面内容
    Content,
    /// 旧版兼容的替代界面，需要瞬时过渡
    AlternateSurface,
    /// 其它
    Other,
}

/// 过渡方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    Show,
    Hide,
}

/// 产生当前动画计划的策略种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// 整体平移（宽屏 / 多窗口）
    Translate,
    /// 淡入淡出
    Fade,
    /// 由目的地面板提供的专属动画
    PaneSpecific,
    /// 新建内容时的缩放展开动画
    ShrinkExpandNewTab,
    /// 无动画
    None,
}

/// 内容（标签页）标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(pub i32);

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 内容种类，用于决定预览是否需要走缓存回退路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentKind {
    /// 普通网页内容，实时截图总能得到新位图
    #[default]
    Standard,
    /// 原生页面，实时截图不一定能产出新位图
    NativePage,
}

impl ContentKind {
    /// 实时截图返回空时是否应改用缓存路径重试
    pub fn may_lack_fresh_preview(&self) -> bool {
        matches!(self, Self::NativePage)
    }
}

/// 宿主的选择模式（普通 / 隐私）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Normal,
    Private,
}

/// 覆盖层内可选择的区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestinationId {
    /// 普通内容切换视图
    Normal,
    /// 隐私内容切换视图
    Private,
}

impl DestinationId {
    /// 根据隐私标记选择目的地
    pub fn for_privacy(private: bool) -> Self {
        if private { Self::Private } else { Self::Normal }
    }
}

/// 根据宿主的选择模式决定应聚焦的目的地（纯函数）
pub fn select_destination(mode: SelectionMode) -> DestinationId {
    match mode {
        SelectionMode::Normal => DestinationId::Normal,
        SelectionMode::Private => DestinationId::Private,
    }
}

/// 恢复内容的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeReason {
    /// 隐藏动画期间需要内容可渲染
    TransitionAnimation,
    /// 新建内容被选中
    NewContent,
}

/// 挂起内容的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspendReason {
    /// 被覆盖层完全遮挡
    CoveredByOverlay,
}

/// 隐藏过程中为下一个内容构建的轻量占位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderContent {
    pub content_id: ContentId,
}

impl PlaceholderContent {
    pub fn new(content_id: ContentId) -> Self {
        Self { content_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_destination() {
        assert_eq!(
            select_destination(SelectionMode::Normal),
            DestinationId::Normal
        );
        assert_eq!(
            select_destination(SelectionMode::Private),
            DestinationId::Private
        );
        assert_eq!(DestinationId::for_privacy(true), DestinationId::Private);
    }

    #[test]
    fn test_content_kind_retry() {
        assert!(ContentKind::NativePage.may_lack_fresh_preview());
        assert!(!ContentKind::Standard.may_lack_fresh_preview());
    }
}
