//! # Visible 模块
//!
//! “当前哪些内容可见”的缓存，快照请求依赖它决定截取哪些内容。
//!
//! 请求在 ID 列表发布之前会排队等待；控制器保证显示完成时发布一次（可能为空）
//! 列表，使排队的请求不会永远挂起。

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::model::ContentId;

type SnapshotRequest = Box<dyn FnOnce(&[ContentId])>;

#[derive(Default)]
struct VisibleData {
    ids: Option<Vec<ContentId>>,
    waiting: Vec<SnapshotRequest>,
}

/// 可见内容缓存（共享句柄）
#[derive(Clone, Default)]
pub struct VisibleContent {
    inner: Rc<RefCell<VisibleData>>,
}

impl VisibleContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// 发布可见内容列表，并处理所有排队的快照请求
    pub fn publish(&self, ids: Vec<ContentId>) {
        let waiting = {
            let mut data = self.inner.borrow_mut();
            data.ids = Some(ids.clone());
            std::mem::take(&mut data.waiting)
        };
        for request in waiting {
            request(&ids);
        }
    }

    /// 请求可见内容列表；已发布时立即回调
    pub fn request_snapshot(&self, request: impl FnOnce(&[ContentId]) + 'static) {
        let ids = {
            let mut data = self.inner.borrow_mut();
            let Some(ids) = data.ids.clone() else {
                data.waiting.push(Box::new(request));
                return;
            };
            ids
        };
        request(&ids);
    }

    /// 当前发布的列表；尚未发布时为 `None`
    pub fn ids(&self) -> Option<Vec<ContentId>> {
        self.inner.borrow().ids.clone()
    }

    pub fn pending_requests(&self) -> usize {
        self.inner.borrow().waiting.len()
    }
}

impl fmt::Debug for VisibleContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        f.debug_struct("VisibleContent")
            .field("ids", &data.ids)
            .field("pending_requests", &data.waiting.len())
            .finish()
    }
}
