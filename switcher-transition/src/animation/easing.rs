//! # Easing 模块
//!
//! 缓动函数，可在配置文件中按名称引用（snake_case）。

use serde::{Deserialize, Serialize};

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// 线性（匀速）
    Linear,
    /// 二次缓入
    EaseInQuad,
    /// 二次缓出
    EaseOutQuad,
    /// 二次缓入缓出
    #[default]
    EaseInOutQuad,
    /// 三次缓出（减速，适合进入画面）
    EaseOutCubic,
    /// 三次缓入缓出
    EaseInOutCubic,
}

impl EasingFunction {
    /// 计算缓动值
    ///
    /// 输入会被钳制到 0.0 - 1.0。
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseInQuad => t * t,
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 6] = [
        EasingFunction::Linear,
        EasingFunction::EaseInQuad,
        EasingFunction::EaseOutQuad,
        EasingFunction::EaseInOutQuad,
        EasingFunction::EaseOutCubic,
        EasingFunction::EaseInOutCubic,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_clamped_input() {
        assert_eq!(EasingFunction::Linear.apply(-1.0), 0.0);
        assert_eq!(EasingFunction::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_serde_name() {
        let json = serde_json::to_string(&EasingFunction::EaseOutCubic).unwrap();
        assert_eq!(json, "\"ease_out_cubic\"");
        let parsed: EasingFunction = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(parsed, EasingFunction::Linear);
    }
}
