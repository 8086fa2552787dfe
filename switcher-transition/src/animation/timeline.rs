//! # Timeline 模块
//!
//! 单个 f32 值在一段时间内的变化。时间轴只关注数值，不假设被驱动的对象。

use super::EasingFunction;

/// 时间轴状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimelineState {
    /// 已创建，尚未开始
    #[default]
    Pending,
    /// 正在播放
    Playing,
    /// 自然播放结束
    Completed,
    /// 被强制跳到终点
    Finished,
}

impl TimelineState {
    /// 是否已结束
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Completed | Self::Finished)
    }
}

/// 数值时间轴
///
/// 管理单个 f32 值从 `from` 到 `to` 在 `duration` 秒内的变化。
/// 只有 `start()` 之后 `update()` 才会推进。
#[derive(Debug, Clone)]
pub struct Timeline {
    from: f32,
    to: f32,
    duration: f32,
    easing: EasingFunction,
    elapsed: f32,
    progress: f32,
    state: TimelineState,
}

impl Timeline {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            easing: EasingFunction::default(),
            elapsed: 0.0,
            progress: 0.0,
            state: TimelineState::Pending,
        }
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 开始播放；零时长的时间轴立即完成
    pub fn start(&mut self) {
        if self.state != TimelineState::Pending {
            return;
        }
        if self.duration <= 0.0 {
            self.progress = 1.0;
            self.state = TimelineState::Completed;
        } else {
            self.state = TimelineState::Playing;
        }
    }

    /// 推进时间轴
    ///
    /// # 返回
    /// - `true`: 仍在播放
    /// - `false`: 未开始或已结束
    pub fn update(&mut self, dt: f32) -> bool {
        if self.state != TimelineState::Playing {
            return false;
        }

        self.elapsed += dt.max(0.0);
        let raw = self.elapsed / self.duration;
        if raw >= 1.0 {
            self.progress = 1.0;
            self.state = TimelineState::Completed;
            false
        } else {
            self.progress = self.easing.apply(raw);
            true
        }
    }

    /// 强制跳到终点（无论是否已开始）
    pub fn finish(&mut self) {
        if self.state.is_done() {
            return;
        }
        self.progress = 1.0;
        self.state = TimelineState::Finished;
    }

    /// 当前值
    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.progress
    }

    /// 已应用缓动的进度 (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TimelineState::Playing
    }

    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_before_start_does_nothing() {
        let mut timeline = Timeline::new(0.0, 1.0, 1.0);
        assert!(!timeline.update(0.5));
        assert_eq!(timeline.state(), TimelineState::Pending);
        assert_eq!(timeline.value(), 0.0);
    }

    #[test]
    fn test_play_to_completion() {
        let mut timeline = Timeline::new(0.0, 10.0, 1.0).with_easing(EasingFunction::Linear);
        timeline.start();
        assert!(timeline.is_playing());

        assert!(timeline.update(0.5));
        assert!((timeline.value() - 5.0).abs() < 1e-4);

        assert!(!timeline.update(0.6));
        assert_eq!(timeline.state(), TimelineState::Completed);
        assert_eq!(timeline.value(), 10.0);
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut timeline = Timeline::new(1.0, 0.0, 1.0);
        timeline.finish();
        assert_eq!(timeline.state(), TimelineState::Finished);
        assert_eq!(timeline.value(), 0.0);

        timeline.finish();
        timeline.start();
        assert_eq!(timeline.state(), TimelineState::Finished);
    }

    #[test]
    fn test_zero_duration_completes_on_start() {
        let mut timeline = Timeline::new(0.0, 1.0, 0.0);
        timeline.start();
        assert!(timeline.is_done());
        assert_eq!(timeline.value(), 1.0);
    }
}
