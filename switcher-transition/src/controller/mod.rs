//! # Controller 模块
//!
//! 切换器覆盖层的过渡协调器。
//!
//! ## 状态机
//!
//! ```text
//! Hidden --show()--> Showing --(运行器完成)--> Shown
//! Shown --start_hiding()--> Hiding --(运行器完成)--> Hidden
//! Showing --start_hiding()--> (强制结束显示) --> Hiding
//! ```
//!
//! `show` 在 `Showing` 时、`start_hiding` 在 `Hiding` 时都是空操作。
//!
//! ## 运行模型
//!
//! 所有方法运行在同一个 UI 线程上。控制器同一时刻最多持有一个运行器；
//! 强制结束会同步折叠进行中的动画和等待布局的启动任务，因此 `show` /
//! `start_hiding` 返回时不会残留过期的运行器。

mod new_content;

use std::rc::Rc;

use tracing::{debug, error, info};

use crate::animators::{AnimatorPolicy, AnimatorProvider, Animators, OverlayVisual, select_policy};
use crate::config::TransitionConfig;
use crate::host::{ContentRegistry, DestinationRegistry, DisplayClass, HostController};
use crate::model::{
    AnimationKind, ContentId, PlaceholderContent, ResumeReason, TransitionContext,
    TransitionDirection, TransitionState, select_destination,
};
use crate::preview::{PreviewCapture, PreviewPromise, PreviewSource};
use crate::runner::{AnimationRunner, CompletionListener, RunnerCompletion, RunnerId};
use crate::scheduler::{DeferredTask, Scheduler};
use crate::scrim::ScrimCompanion;
use crate::visible::VisibleContent;

/// 控制器依赖的全部协作者
#[derive(Clone)]
pub struct Collaborators {
    pub host: Rc<dyn HostController>,
    pub contents: Rc<dyn ContentRegistry>,
    pub previews: Rc<dyn PreviewSource>,
    pub destinations: Rc<dyn DestinationRegistry>,
    pub display: Rc<dyn DisplayClass>,
    pub scheduler: Rc<dyn Scheduler>,
    pub scrim: Option<Rc<dyn ScrimCompanion>>,
}

/// 强制结束的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ForceCause {
    /// 显式调用或新一轮 show 之前的清理
    Explicit,
    /// 隐藏请求打断了进行中的显示
    Interruption,
}

/// 过渡协调器
pub struct TransitionController {
    config: TransitionConfig,
    host: Rc<dyn HostController>,
    contents: Rc<dyn ContentRegistry>,
    destinations: Rc<dyn DestinationRegistry>,
    display: Rc<dyn DisplayClass>,
    scheduler: Rc<dyn Scheduler>,
    scrim: Option<Rc<dyn ScrimCompanion>>,
    capture: PreviewCapture,
    animators: Animators,

    state: TransitionState,
    runner: Option<AnimationRunner>,
    /// 等待布局后启动的运行器
    pending_layout: Option<RunnerId>,
    next_runner_id: u64,
    placeholder: Option<PlaceholderContent>,
    visible: VisibleContent,
}

impl TransitionController {
    pub fn new(config: TransitionConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            host,
            contents,
            previews,
            destinations,
            display,
            scheduler,
            scrim,
        } = collaborators;

        Self {
            capture: PreviewCapture::new(previews, contents.clone()),
            animators: Animators::new(&config),
            config,
            host,
            contents,
            destinations,
            display,
            scheduler,
            scrim,
            state: TransitionState::Hidden,
            runner: None,
            pending_layout: None,
            next_runner_id: 1,
            placeholder: None,
            visible: VisibleContent::new(),
        }
    }

    // ========== 查询 ==========

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// 当前运行器的动画种类
    pub fn active_animation_kind(&self) -> Option<AnimationKind> {
        self.runner.as_ref().map(AnimationRunner::kind)
    }

    pub fn has_active_runner(&self) -> bool {
        self.runner.is_some()
    }

    /// 当前运行器是否已启动
    pub fn is_runner_started(&self) -> bool {
        self.runner.as_ref().is_some_and(AnimationRunner::has_started)
    }

    /// 隐藏过程中构建的占位内容
    pub fn placeholder(&self) -> Option<PlaceholderContent> {
        self.placeholder
    }

    /// 可见内容缓存
    pub fn visible_content(&self) -> VisibleContent {
        self.visible.clone()
    }

    /// 内置动画器共享的视觉状态
    pub fn visual(&self) -> Rc<OverlayVisual> {
        self.animators.visual()
    }

    /// 内置动画器工厂，供目的地面板复用
    pub fn animators(&self) -> &Animators {
        &self.animators
    }

    // ========== 显示 ==========

    /// 显示覆盖层
    ///
    /// `request_time_ms` 只用于日志关联。
    pub fn show(&mut self, request_time_ms: u64, should_animate: bool) {
        if self.state == TransitionState::Showing {
            debug!("覆盖层已在显示中，忽略 show");
            return;
        }

        self.force_active_runner(ForceCause::Explicit);

        let previous_context = self.host.previous_context();
        let replaced = self.contents.current_content_id();
        info!(
            request_time_ms,
            should_animate,
            context = ?previous_context,
            replaced = ?replaced,
            "开始显示覆盖层"
        );

        let preview = if previous_context == TransitionContext::Content {
            if let Some(id) = replaced {
                self.visible.publish(vec![id]);
            }
            self.capture.capture_live(replaced)
        } else {
            PreviewPromise::resolved(None)
        };

        let destination = select_destination(self.host.selection_mode());
        self.destinations.focus(destination);

        self.host.on_will_show();

        let provider = self.select_animator_provider(TransitionDirection::Show, previous_context);
        let runner_id = self.install_runner(
            provider,
            preview,
            CompletionListener::DoneShowing { replaced },
        );
        self.state = TransitionState::Showing;

        self.host.attach_container();

        if !should_animate || previous_context == TransitionContext::AlternateSurface {
            // 瞬时过渡：同一调用内启动并强制结束，释放被替换的内容
            self.start_runner(runner_id);
            self.force_active_runner(ForceCause::Explicit);
        } else {
            self.pending_layout = Some(runner_id);
            self.scheduler
                .defer_to_next_layout(DeferredTask::StartRunner(runner_id));
        }
    }

    fn done_showing(&mut self) {
        self.runner = None;
        self.pending_layout = None;
        self.state = TransitionState::Shown;
        self.placeholder = None;
        // 发布空列表，让等待中的快照请求得到结果
        self.visible.publish(Vec::new());
        debug!("覆盖层显示完成");
    }

    // ========== 隐藏 ==========

    /// 隐藏覆盖层
    ///
    /// `next` 是隐藏后将显示的内容。
    pub fn start_hiding(&mut self, next: Option<ContentId>, hint_at_next_selection: bool) {
        if self.state == TransitionState::Hiding {
            debug!("覆盖层已在隐藏中，忽略 start_hiding");
            return;
        }

        if let Some(runner) = self.runner.as_ref()
            && runner.kind() == AnimationKind::ShrinkExpandNewTab
            && !runner.has_started()
        {
            // 新建内容时已完成准备，只需启动预构建的运行器
            let runner_id = runner.id();
            self.state = TransitionState::Hiding;
            self.scheduler
                .defer_to_next_turn(DeferredTask::StartRunner(runner_id));
            debug!(runner = %runner_id, "调度预构建的新建内容动画");
            return;
        }

        self.force_active_runner(ForceCause::Interruption);
        self.state = TransitionState::Hiding;

        if let Some(id) = next
            && self.contents.is_content_suspended(id)
        {
            self.contents
                .resume_content(id, ResumeReason::TransitionAnimation);
        }

        let next_context = self.host.next_context();
        info!(next = ?next, context = ?next_context, "开始隐藏覆盖层");

        if next_context == TransitionContext::Content
            && let Some(id) = next
        {
            self.placeholder = Some(PlaceholderContent::new(id));
            self.visible.publish(vec![id]);
        }

        self.host.on_will_hide(next, hint_at_next_selection);
        let provider = self.select_animator_provider(TransitionDirection::Hide, next_context);

        let preview = match next {
            Some(id) if next_context == TransitionContext::Content => {
                self.capture.capture_cached_fast(id)
            }
            _ => PreviewPromise::resolved(None),
        };

        let runner_id = self.install_runner(provider, preview, CompletionListener::DoneHiding);

        // 延后一轮，避免在其它组件自己的 show 尚未布局时启动
        let task = if next_context == TransitionContext::AlternateSurface {
            DeferredTask::StartAndFinishRunner(runner_id)
        } else {
            DeferredTask::StartRunner(runner_id)
        };
        self.scheduler.defer_to_next_turn(task);
    }

    fn done_hiding(&mut self) {
        self.host.detach_container();
        self.runner = None;
        self.pending_layout = None;
        self.host.on_did_hide();
        // 可见内容缓存可能已被新的 show 重新填充，这里不清空
        self.placeholder = None;
        self.state = TransitionState::Hidden;
        debug!("覆盖层隐藏完成");
    }

    // ========== 运行器 ==========

    /// 强制结束当前动画
    ///
    /// 没有运行器时是空操作。
    pub fn force_animation_to_finish(&mut self) {
        self.force_active_runner(ForceCause::Explicit);
    }

    fn force_active_runner(&mut self, cause: ForceCause) {
        let Some(mut runner) = self.runner.take() else {
            return;
        };

        // 等待布局的启动任务立即执行
        if self.pending_layout.take() == Some(runner.id()) {
            runner.start(self.host.container_bounds());
        }

        debug!(runner = %runner.id(), kind = ?runner.kind(), cause = ?cause, "强制结束动画");
        let completion = runner.force_finish();
        drop(runner);

        if let Some(completion) = completion {
            self.dispatch_completion(completion, cause);
        }
        if let Some(scrim) = &self.scrim {
            scrim.force_to_finish();
        }
    }

    /// 推进当前动画
    ///
    /// # 返回
    /// - `true`: 仍有运行器存活
    /// - `false`: 没有运行器
    pub fn update(&mut self, dt: f32) -> bool {
        let Some(runner) = self.runner.as_mut() else {
            return false;
        };

        if let Some(completion) = runner.update(dt) {
            self.runner = None;
            self.dispatch_completion(completion, ForceCause::Explicit);
        }
        self.runner.is_some()
    }

    /// 执行调度器交回的延迟任务；过期任务被忽略
    pub fn run_deferred(&mut self, task: DeferredTask) {
        let runner_id = task.runner_id();
        if self.runner.as_ref().map(AnimationRunner::id) != Some(runner_id) {
            debug!(task = ?task, "忽略过期的延迟任务");
            return;
        }

        if self.pending_layout == Some(runner_id) {
            self.pending_layout = None;
        }

        match task {
            DeferredTask::StartRunner(id) => self.start_runner(id),
            DeferredTask::StartAndFinishRunner(id) => {
                self.start_runner(id);
                self.force_active_runner(ForceCause::Explicit);
            }
        }
    }

    fn start_runner(&mut self, runner_id: RunnerId) {
        let bounds = self.host.container_bounds();
        if let Some(runner) = self.runner.as_mut()
            && runner.id() == runner_id
        {
            runner.start(bounds);
        }
    }

    /// 构建运行器并放入唯一的运行器槽位
    fn install_runner(
        &mut self,
        provider: Box<dyn AnimatorProvider>,
        preview: PreviewPromise,
        listener: CompletionListener,
    ) -> RunnerId {
        debug_assert!(self.runner.is_none(), "运行器槽位必须为空");

        let runner_id = RunnerId(self.next_runner_id);
        self.next_runner_id += 1;

        let mut runner = AnimationRunner::new(runner_id, provider, preview);
        if let Err(e) = runner.set_listener(listener) {
            error!(error = %e, "注册完成监听器失败");
            debug_assert!(false, "{e}");
        }
        debug!(runner = %runner_id, kind = ?runner.kind(), "创建动画运行器");
        self.runner = Some(runner);
        runner_id
    }

    fn dispatch_completion(&mut self, completion: RunnerCompletion, cause: ForceCause) {
        match completion.listener {
            CompletionListener::DoneShowing { replaced } => {
                self.done_showing();
                // 被隐藏打断时，即将显示的内容不能在交接途中被释放
                let suppressed = completion.forced && cause == ForceCause::Interruption;
                if let Some(id) = replaced
                    && !suppressed
                {
                    self.host.release_content(id);
                }
            }
            CompletionListener::DoneHiding => self.done_hiding(),
        }
    }

    /// 选择动画提供者，每次调用重新求值
    fn select_animator_provider(
        &self,
        direction: TransitionDirection,
        context: TransitionContext,
    ) -> Box<dyn AnimatorProvider> {
        let wide = self.display.is_wide_display_class();
        let focused = self.destinations.focused_destination();
        let policy = select_policy(direction, context, wide, focused.is_some());
        debug!(direction = ?direction, context = ?context, wide, policy = ?policy, "选择动画策略");

        match (policy, focused) {
            (AnimatorPolicy::Translate, _) => self.animators.translate(direction),
            (AnimatorPolicy::PaneSpecific, Some(destination)) => {
                let container = self.host.container_bounds();
                match direction {
                    TransitionDirection::Show => {
                        destination.create_show_animator_provider(container)
                    }
                    TransitionDirection::Hide => {
                        destination.create_hide_animator_provider(container)
                    }
                }
            }
            (AnimatorPolicy::Fade | AnimatorPolicy::PaneSpecific, _) => {
                self.animators.fade(direction)
            }
        }
    }
}

impl std::fmt::Debug for TransitionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionController")
            .field("state", &self.state)
            .field("runner", &self.runner)
            .field("pending_layout", &self.pending_layout)
            .field("placeholder", &self.placeholder)
            .finish()
    }
}
