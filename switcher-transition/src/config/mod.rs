//! # Config 模块
//!
//! 过渡动画配置，集中管理各动画器的时长与缓动。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（仅 switcher-trace）
//! 2. 配置文件 (JSON)
//! 3. 默认值

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::animation::EasingFunction;
use crate::error::{TransitionError, TransitionResult};

/// 单个动画的时长上限（毫秒）
const MAX_DURATION_MS: u32 = 10_000;

/// 过渡配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// 宽屏平移动画
    #[serde(default = "default_translate_timing")]
    pub translate: AnimationTiming,

    /// 淡入淡出动画
    #[serde(default = "default_fade_timing")]
    pub fade: AnimationTiming,

    /// 缩放展开动画（新建内容 / 面板缩略图）
    #[serde(default = "default_shrink_expand_timing")]
    pub shrink_expand: AnimationTiming,

    /// 遮罩伴随动画
    #[serde(default = "default_scrim_timing")]
    pub scrim: AnimationTiming,

    /// 新建内容入口
    #[serde(default)]
    pub new_content: NewContentConfig,
}

/// 动画时长与缓动
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationTiming {
    /// 时长（毫秒）
    pub duration_ms: u32,

    /// 缓动函数
    #[serde(default)]
    pub easing: EasingFunction,
}

impl AnimationTiming {
    pub const fn new(duration_ms: u32, easing: EasingFunction) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }

    /// 时长（秒），供时间轴使用
    pub fn duration_secs(&self) -> f32 {
        self.duration_ms as f32 / 1000.0
    }
}

/// 新建内容入口配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContentConfig {
    /// 起始点相对面板左上角的内缩距离（像素）
    #[serde(default = "default_origin_inset")]
    pub origin_inset: f32,
}

impl Default for NewContentConfig {
    fn default() -> Self {
        Self {
            origin_inset: default_origin_inset(),
        }
    }
}

// 默认值函数
fn default_translate_timing() -> AnimationTiming {
    AnimationTiming::new(300, EasingFunction::EaseInOutCubic)
}

fn default_fade_timing() -> AnimationTiming {
    AnimationTiming::new(225, EasingFunction::EaseInOutQuad)
}

fn default_shrink_expand_timing() -> AnimationTiming {
    AnimationTiming::new(325, EasingFunction::EaseOutCubic)
}

fn default_scrim_timing() -> AnimationTiming {
    AnimationTiming::new(225, EasingFunction::Linear)
}

fn default_origin_inset() -> f32 {
    16.0
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            translate: default_translate_timing(),
            fade: default_fade_timing(),
            shrink_expand: default_shrink_expand_timing(),
            scrim: default_scrim_timing(),
            new_content: NewContentConfig::default(),
        }
    }
}

impl TransitionConfig {
    /// 加载配置文件
    ///
    /// 文件不存在、解析失败或验证失败时返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::try_load(path) {
            Ok(config) => {
                info!(path = ?path, "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(path = ?path, error = %e, "配置文件加载失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 加载并验证配置文件，失败时返回错误
    pub fn try_load(path: impl AsRef<Path>) -> TransitionResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> TransitionResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> TransitionResult<()> {
        let timings = [
            ("translate", &self.translate),
            ("fade", &self.fade),
            ("shrink_expand", &self.shrink_expand),
            ("scrim", &self.scrim),
        ];
        for (name, timing) in timings {
            if timing.duration_ms > MAX_DURATION_MS {
                return Err(TransitionError::ConfigInvalid {
                    message: format!(
                        "{name} 时长 {}ms 超过上限 {MAX_DURATION_MS}ms",
                        timing.duration_ms
                    ),
                });
            }
        }

        if !self.new_content.origin_inset.is_finite() || self.new_content.origin_inset < 0.0 {
            return Err(TransitionError::ConfigInvalid {
                message: "new_content.origin_inset 必须是非负数".to_string(),
            });
        }

        Ok(())
    }
}
