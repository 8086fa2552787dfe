//! # Preview 模块
//!
//! 被替换内容的预览快照获取。
//!
//! 快照由外部的 `PreviewSource` 异步产出（回调），这里负责：
//! - 用 `PreviewPromise` 把“结果到达”和“消费者挂接”解耦，两者先后顺序任意
//! - 实时截图返回空且内容种类不保证有新位图时，改走一次缓存快速路径

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use image::RgbaImage;
use tracing::debug;

use crate::host::ContentRegistry;
use crate::model::ContentId;

/// 预览位图（共享所有权，克隆廉价）
pub type PreviewImage = Rc<RgbaImage>;

/// 预览结果回调
pub type PreviewCallback = Box<dyn FnOnce(Option<PreviewImage>)>;

/// 动画计划上的预览消费者
pub type PreviewConsumer = Box<dyn FnOnce(Option<PreviewImage>)>;

/// 预览位图来源
///
/// 两个方法都不得阻塞调用方；结果稍后通过回调送达，也可能永远不送达。
pub trait PreviewSource {
    /// 实时截取内容当前画面
    fn capture_live(&self, content_id: ContentId, callback: PreviewCallback);

    /// 读取缓存中的快照（快速、非阻塞）
    fn capture_cached_fast(&self, content_id: ContentId, callback: PreviewCallback);
}

enum PromiseState {
    Pending(Vec<PreviewConsumer>),
    Resolved(Option<PreviewImage>),
}

/// 一次性预览结果
///
/// 第一次 `resolve` 生效，之后的调用被忽略。`then` 挂接的消费者在结果到达后
/// 各被调用一次；结果已到达时立即调用。
#[derive(Clone)]
pub struct PreviewPromise {
    inner: Rc<RefCell<PromiseState>>,
}

impl PreviewPromise {
    /// 等待结果的 promise
    pub fn pending() -> Self {
        Self {
            inner: Rc::new(RefCell::new(PromiseState::Pending(Vec::new()))),
        }
    }

    /// 已有结果的 promise
    pub fn resolved(image: Option<PreviewImage>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PromiseState::Resolved(image))),
        }
    }

    /// 写入结果并通知所有消费者
    pub fn resolve(&self, image: Option<PreviewImage>) {
        let consumers = {
            let mut state = self.inner.borrow_mut();
            if matches!(*state, PromiseState::Resolved(_)) {
                return;
            }
            match std::mem::replace(&mut *state, PromiseState::Resolved(image.clone())) {
                PromiseState::Pending(consumers) => consumers,
                PromiseState::Resolved(_) => Vec::new(),
            }
        };

        for consumer in consumers {
            consumer(image.clone());
        }
    }

    /// 挂接消费者
    pub fn then(&self, consumer: PreviewConsumer) {
        let ready = {
            let mut state = self.inner.borrow_mut();
            match &mut *state {
                PromiseState::Pending(consumers) => {
                    consumers.push(consumer);
                    return;
                }
                PromiseState::Resolved(image) => image.clone(),
            }
        };
        consumer(ready);
    }

    pub fn is_resolved(&self) -> bool {
        matches!(&*self.inner.borrow(), PromiseState::Resolved(_))
    }
}

impl fmt::Debug for PreviewPromise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.inner.borrow() {
            PromiseState::Pending(consumers) => format!("Pending({})", consumers.len()),
            PromiseState::Resolved(image) => format!("Resolved({})", image.is_some()),
        };
        f.debug_struct("PreviewPromise").field("state", &state).finish()
    }
}

/// 预览获取器
///
/// 包装 `PreviewSource`，提供带回退的实时截图和缓存快速截图。
#[derive(Clone)]
pub struct PreviewCapture {
    source: Rc<dyn PreviewSource>,
    contents: Rc<dyn ContentRegistry>,
}

impl PreviewCapture {
    pub fn new(source: Rc<dyn PreviewSource>, contents: Rc<dyn ContentRegistry>) -> Self {
        Self { source, contents }
    }

    /// 实时截图
    ///
    /// 没有内容 ID 时立即以空结果完成。实时结果为空且内容种类可能缺少新位图时，
    /// 改用缓存快速路径重试一次。
    pub fn capture_live(&self, content_id: Option<ContentId>) -> PreviewPromise {
        let Some(content_id) = content_id else {
            debug!("没有当前内容，跳过预览截图");
            return PreviewPromise::resolved(None);
        };

        let promise = PreviewPromise::pending();
        let retryable = self
            .contents
            .content_kind(content_id)
            .may_lack_fresh_preview();
        let source = self.source.clone();
        let target = promise.clone();

        self.source.capture_live(
            content_id,
            Box::new(move |image| {
                if image.is_none() && retryable {
                    debug!(content = %content_id, "实时截图为空，改用缓存快照");
                    source.capture_cached_fast(
                        content_id,
                        Box::new(move |cached| target.resolve(cached)),
                    );
                } else {
                    target.resolve(image);
                }
            }),
        );

        promise
    }

    /// 缓存快速截图（隐藏路径使用）
    pub fn capture_cached_fast(&self, content_id: ContentId) -> PreviewPromise {
        let promise = PreviewPromise::pending();
        let target = promise.clone();
        self.source.capture_cached_fast(
            content_id,
            Box::new(move |image| target.resolve(image)),
        );
        promise
    }
}
