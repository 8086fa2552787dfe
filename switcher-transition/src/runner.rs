//! # Runner 模块
//!
//! 动画运行器：包装一个动画提供者，管理一次动画的生命周期。
//!
//! ## 生命周期
//!
//! ```text
//! Constructed --start()--> Running --(动画自然结束)--> Finished
//!      |                      |
//!      +---force_finish()-----+-----------------------> Finished
//! ```
//!
//! 完成监听器是类型化的值，随完成事件一起返回给控制器分发，运行器不持有任何
//! 指向控制器的回调。

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::animators::{AnimatorProvider, PlanAnimation};
use crate::error::{TransitionError, TransitionResult};
use crate::geometry::Rect;
use crate::model::{AnimationKind, ContentId};
use crate::preview::{PreviewConsumer, PreviewPromise};

/// 计划的预览消费者槽位；运行器结束时清空，迟到的预览不再触达已销毁的计划
type ConsumerSlot = Rc<RefCell<Option<PreviewConsumer>>>;

/// 运行器 ID
///
/// 由控制器单调分配，用于识别过期的延迟任务。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunnerId(pub u64);

impl fmt::Display for RunnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunnerId({})", self.0)
    }
}

/// 完成监听器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionListener {
    /// 显示完成；`replaced` 是被覆盖层替换的内容
    DoneShowing { replaced: Option<ContentId> },
    /// 隐藏完成
    DoneHiding,
}

/// 完成事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerCompletion {
    pub listener: CompletionListener,
    /// 是否由强制结束触发
    pub forced: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunnerPhase {
    Constructed,
    Running,
    Finished,
}

/// 动画运行器
pub struct AnimationRunner {
    id: RunnerId,
    kind: AnimationKind,
    provider: Box<dyn AnimatorProvider>,
    animation: Option<Box<dyn PlanAnimation>>,
    preview: PreviewPromise,
    consumer: Option<ConsumerSlot>,
    phase: RunnerPhase,
    listener: Option<CompletionListener>,
}

impl AnimationRunner {
    /// 创建运行器
    ///
    /// `preview` 的结果会在计划产出后转交给计划的预览消费者（如果有）。
    pub fn new(id: RunnerId, provider: Box<dyn AnimatorProvider>, preview: PreviewPromise) -> Self {
        Self {
            id,
            kind: provider.kind(),
            provider,
            animation: None,
            preview,
            consumer: None,
            phase: RunnerPhase::Constructed,
            listener: None,
        }
    }

    pub fn id(&self) -> RunnerId {
        self.id
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    /// 完成监听器尚未触发
    pub fn is_running(&self) -> bool {
        self.phase != RunnerPhase::Finished
    }

    /// 是否已经调用过 `start()`
    pub fn has_started(&self) -> bool {
        self.phase != RunnerPhase::Constructed
    }

    /// 注册完成监听器
    ///
    /// 上一个监听器尚未触发时再次注册属于编程错误。
    pub fn set_listener(&mut self, listener: CompletionListener) -> TransitionResult<()> {
        if self.listener.is_some() {
            return Err(TransitionError::ListenerAlreadyRegistered { runner: self.id });
        }
        self.listener = Some(listener);
        Ok(())
    }

    /// 开始动画
    ///
    /// 此时才向提供者索取计划，`bounds` 是布局完成后的容器边界。
    /// 重复调用或在结束后调用都不生效。
    pub fn start(&mut self, bounds: Rect) {
        if self.phase != RunnerPhase::Constructed {
            return;
        }

        let plan = self.provider.supply_plan(bounds);
        if let Some(consumer) = plan.on_preview_ready {
            let slot: ConsumerSlot = Rc::new(RefCell::new(Some(consumer)));
            let pending = slot.clone();
            self.preview.then(Box::new(move |image| {
                let consumer = pending.borrow_mut().take();
                if let Some(consumer) = consumer {
                    consumer(image);
                }
            }));
            self.consumer = Some(slot);
        }

        let mut animation = plan.animation;
        animation.start();
        self.animation = Some(animation);
        self.phase = RunnerPhase::Running;
        debug!(runner = %self.id, kind = ?self.kind, "动画开始");
    }

    /// 推进动画；自然结束时返回完成事件
    pub fn update(&mut self, dt: f32) -> Option<RunnerCompletion> {
        if self.phase != RunnerPhase::Running {
            return None;
        }

        let running = self
            .animation
            .as_mut()
            .is_some_and(|animation| animation.update(dt));
        if running {
            None
        } else {
            self.complete(false)
        }
    }

    /// 强制结束
    ///
    /// 无论是否已开始都可以调用；首次调用同步返回 `forced = true` 的完成事件，
    /// 之后的调用返回 `None`。
    pub fn force_finish(&mut self) -> Option<RunnerCompletion> {
        if self.phase == RunnerPhase::Finished {
            return None;
        }

        if let Some(animation) = self.animation.as_mut() {
            animation.finish_now();
        }
        self.complete(true)
    }

    fn complete(&mut self, forced: bool) -> Option<RunnerCompletion> {
        self.phase = RunnerPhase::Finished;
        self.animation = None;
        if let Some(slot) = self.consumer.take()
            && slot.borrow_mut().take().is_some()
        {
            debug!(runner = %self.id, "计划已销毁，丢弃尚未收到预览的消费者");
        }
        debug!(runner = %self.id, kind = ?self.kind, forced, "动画结束");
        self.listener
            .take()
            .map(|listener| RunnerCompletion { listener, forced })
    }
}

impl fmt::Debug for AnimationRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRunner")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("phase", &self.phase)
            .field("listener", &self.listener)
            .finish()
    }
}
