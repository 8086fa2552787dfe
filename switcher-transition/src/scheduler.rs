//! # Scheduler 模块
//!
//! UI 事件循环上的一次性延迟任务。
//!
//! 控制器不向调度器交出闭包，而是投递类型化的 `DeferredTask`，事件循环在合适的
//! 时机把任务交回 `TransitionController::run_deferred`。这样延迟任务不捕获控制器，
//! 过期任务（运行器已被替换）由控制器按 `RunnerId` 丢弃。

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::controller::TransitionController;
use crate::runner::RunnerId;

/// 延迟任务
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// 启动运行器
    StartRunner(RunnerId),
    /// 启动运行器并立即强制结束（瞬时过渡）
    StartAndFinishRunner(RunnerId),
}

impl DeferredTask {
    pub fn runner_id(&self) -> RunnerId {
        match self {
            DeferredTask::StartRunner(id) | DeferredTask::StartAndFinishRunner(id) => *id,
        }
    }
}

/// 延迟调度器
pub trait Scheduler {
    /// 在事件队列的下一轮执行
    fn defer_to_next_turn(&self, task: DeferredTask);

    /// 在覆盖层容器完成下一次布局后执行
    fn defer_to_next_layout(&self, task: DeferredTask);
}

/// 基于队列的确定性调度器
///
/// 任务按投递顺序排队，由宿主（或测试）显式冲刷。
#[derive(Debug, Default)]
pub struct QueueScheduler {
    next_turn: RefCell<VecDeque<DeferredTask>>,
    next_layout: RefCell<VecDeque<DeferredTask>>,
}

impl QueueScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 执行当前排队的“下一轮”任务，返回执行数量
    ///
    /// 执行过程中新投递的任务留到下一次冲刷。
    pub fn run_next_turn(&self, controller: &mut TransitionController) -> usize {
        let tasks: Vec<_> = self.next_turn.borrow_mut().drain(..).collect();
        let count = tasks.len();
        for task in tasks {
            controller.run_deferred(task);
        }
        count
    }

    /// 模拟一次布局完成，执行等待布局的任务
    pub fn run_layout_pass(&self, controller: &mut TransitionController) -> usize {
        let tasks: Vec<_> = self.next_layout.borrow_mut().drain(..).collect();
        let count = tasks.len();
        for task in tasks {
            controller.run_deferred(task);
        }
        count
    }

    pub fn pending_turn_tasks(&self) -> usize {
        self.next_turn.borrow().len()
    }

    pub fn pending_layout_tasks(&self) -> usize {
        self.next_layout.borrow().len()
    }

    /// 是否没有任何排队任务
    pub fn is_idle(&self) -> bool {
        self.pending_turn_tasks() == 0 && self.pending_layout_tasks() == 0
    }
}

impl Scheduler for QueueScheduler {
    fn defer_to_next_turn(&self, task: DeferredTask) {
        self.next_turn.borrow_mut().push_back(task);
    }

    fn defer_to_next_layout(&self, task: DeferredTask) {
        self.next_layout.borrow_mut().push_back(task);
    }
}
