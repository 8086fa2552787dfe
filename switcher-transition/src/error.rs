//! # Error 模块
//!
//! 定义 switcher-transition 中使用的错误类型。
//!
//! 过渡动画是尽力而为的视觉效果：缺失预览、无效内容 ID 等情况都会被吸收降级，
//! 这里只收录编程错误与配置错误。

use thiserror::Error;

use crate::runner::RunnerId;

/// 过渡协调器统一错误类型
#[derive(Error, Debug)]
pub enum TransitionError {
    /// 同一个运行器在上一个监听器触发前重复注册监听器
    #[error("动画运行器 {runner} 已注册完成监听器，不允许重复注册")]
    ListenerAlreadyRegistered { runner: RunnerId },

    /// 配置文件读写失败
    #[error("配置 IO 错误: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// 配置序列化 / 反序列化失败
    #[error("配置序列化失败: {0}")]
    ConfigSerde(#[from] serde_json::Error),

    /// 配置验证失败
    #[error("配置验证失败: {message}")]
    ConfigInvalid { message: String },
}

/// Result 类型别名
pub type TransitionResult<T> = Result<T, TransitionError>;
