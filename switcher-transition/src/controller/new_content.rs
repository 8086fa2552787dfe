//! 前台新建内容时的入口动画

use tracing::{debug, info};

use crate::animators::PendingPlacementData;
use crate::geometry::Rect;
use crate::model::{ContentId, DestinationId, ResumeReason, TransitionState};
use crate::preview::PreviewPromise;
use crate::runner::{AnimationRunner, CompletionListener};

use super::{ForceCause, TransitionController};

impl TransitionController {
    /// 覆盖层完全可见时，前台新建了内容
    ///
    /// 窄屏设备预构建缩放展开运行器，再走普通的隐藏路径；宽屏设备选中并恢复内容后
    /// 无动画地隐藏覆盖层。
    pub fn on_content_created_in_foreground(&mut self, content_id: ContentId, private: bool) {
        if self.state != TransitionState::Shown {
            debug!(content = %content_id, state = ?self.state, "非完全显示状态，忽略新建内容");
            return;
        }

        if self.display.is_wide_display_class() {
            info!(content = %content_id, "宽屏设备新建内容，跳过入口动画");
            self.select_and_resume(content_id);
            self.hide_instantly(content_id);
            return;
        }

        let region = self.host.pane_host_bounds();
        let placement = PendingPlacementData::new(self.origin_point(region), region);
        let background = self.host.background_color(DestinationId::for_privacy(private));
        info!(content = %content_id, private, "构建新建内容入口动画");

        let provider = self.animators.shrink_expand_new_tab(placement, background);
        self.install_runner(
            provider,
            PreviewPromise::resolved(None),
            CompletionListener::DoneHiding,
        );

        self.select_and_resume(content_id);
        self.start_hiding(Some(content_id), false);
    }

    /// 走普通隐藏路径，但在同一调用内启动并强制结束；排队的启动任务随之过期
    fn hide_instantly(&mut self, content_id: ContentId) {
        self.start_hiding(Some(content_id), false);
        if let Some(runner_id) = self.runner.as_ref().map(AnimationRunner::id) {
            self.start_runner(runner_id);
            self.force_active_runner(ForceCause::Explicit);
        }
    }

    /// 面板左上角内缩后的一个点
    fn origin_point(&self, region: Rect) -> Rect {
        let inset = self.config.new_content.origin_inset;
        Rect::point(
            (region.x + inset).min(region.right()),
            (region.y + inset).min(region.bottom()),
        )
    }

    fn select_and_resume(&self, content_id: ContentId) {
        self.contents.select_content(content_id);
        if self.contents.is_content_suspended(content_id) {
            self.contents
                .resume_content(content_id, ResumeReason::NewContent);
        }
    }
}
