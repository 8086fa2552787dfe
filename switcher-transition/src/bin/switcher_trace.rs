//! # Switcher Trace
//!
//! 用内存中的宿主驱动一次完整的显示 / 隐藏过渡，并把每一步打印为日志。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p switcher-transition --bin switcher-trace
//! cargo run -p switcher-transition --bin switcher-trace -- --interrupt
//! cargo run -p switcher-transition --bin switcher-trace -- --new-tab --log-level debug
//! cargo run -p switcher-transition --bin switcher-trace -- --config transition.json --wide
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, ValueEnum};
use image::RgbaImage;
use tracing::{Level, info, warn};

use switcher_transition::animators::PendingPlacementData;
use switcher_transition::preview::PreviewCallback;
use switcher_transition::{
    AnimatorProvider, Animators, Collaborators, Color, ContentId, ContentKind, ContentRegistry,
    Destination, DestinationId, DestinationRegistry, DisplayClass, HostController, PreviewSource,
    QueueScheduler, Rect, ResumeReason, ScrimAnimator, SelectionMode, SuspendReason,
    TransitionConfig, TransitionContext, TransitionController, TransitionState,
};

#[derive(Parser)]
#[command(name = "switcher-trace")]
#[command(about = "切换器过渡追踪工具 - 在内存宿主上演示一次显示 / 隐藏过渡")]
#[command(version)]
struct Cli {
    /// 过渡配置文件（JSON），缺省使用默认配置
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 显示动画进行中立即隐藏
    #[arg(long)]
    interrupt: bool,

    /// 模拟宽屏设备
    #[arg(long)]
    wide: bool,

    /// 不播放显示动画
    #[arg(long)]
    instant: bool,

    /// 完全显示后在前台新建内容
    #[arg(long)]
    new_tab: bool,

    /// 单个阶段最多推进的帧数
    #[arg(long, default_value = "120")]
    frames: u32,

    /// 每帧时长（毫秒）
    #[arg(long, default_value = "16")]
    frame_ms: u32,

    /// 日志级别
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

const CONTAINER: Rect = Rect::new(0.0, 0.0, 412.0, 915.0);
const PANE_HOST: Rect = Rect::new(0.0, 120.0, 412.0, 795.0);
const LIGHT_BACKGROUND: Color = Color::rgb(242, 242, 247);
const DARK_BACKGROUND: Color = Color::rgb(33, 33, 38);

/// 内存中的宿主与内容注册表
struct DemoHost {
    current: Cell<Option<ContentId>>,
    suspended: RefCell<BTreeSet<ContentId>>,
    scrim: Rc<ScrimAnimator>,
}

impl DemoHost {
    fn new(scrim: Rc<ScrimAnimator>) -> Self {
        Self {
            current: Cell::new(Some(ContentId(1))),
            suspended: RefCell::new(BTreeSet::new()),
            scrim,
        }
    }
}

impl HostController for DemoHost {
    fn on_will_show(&self) {
        info!("[host] on_will_show");
        self.scrim.show();
    }

    fn on_will_hide(&self, next: Option<ContentId>, hint_at_next_selection: bool) {
        info!(next = ?next, hint_at_next_selection, "[host] on_will_hide");
        self.scrim.hide();
    }

    fn on_did_hide(&self) {
        info!("[host] on_did_hide");
    }

    fn release_content(&self, content_id: ContentId) {
        info!(content = %content_id, "[host] release_content");
        self.suspend_content(content_id, SuspendReason::CoveredByOverlay);
    }

    fn attach_container(&self) {
        info!("[host] attach_container");
    }

    fn detach_container(&self) {
        info!("[host] detach_container");
    }

    fn container_bounds(&self) -> Rect {
        CONTAINER
    }

    fn pane_host_bounds(&self) -> Rect {
        PANE_HOST
    }

    fn background_color(&self, destination: DestinationId) -> Color {
        match destination {
            DestinationId::Normal => LIGHT_BACKGROUND,
            DestinationId::Private => DARK_BACKGROUND,
        }
    }

    fn previous_context(&self) -> TransitionContext {
        TransitionContext::Content
    }

    fn next_context(&self) -> TransitionContext {
        TransitionContext::Content
    }

    fn selection_mode(&self) -> SelectionMode {
        SelectionMode::Normal
    }
}

impl ContentRegistry for DemoHost {
    fn current_content_id(&self) -> Option<ContentId> {
        self.current.get()
    }

    fn is_content_suspended(&self, content_id: ContentId) -> bool {
        self.suspended.borrow().contains(&content_id)
    }

    fn resume_content(&self, content_id: ContentId, reason: ResumeReason) {
        info!(content = %content_id, reason = ?reason, "[contents] resume");
        self.suspended.borrow_mut().remove(&content_id);
    }

    fn suspend_content(&self, content_id: ContentId, reason: SuspendReason) {
        info!(content = %content_id, reason = ?reason, "[contents] suspend");
        self.suspended.borrow_mut().insert(content_id);
    }

    fn select_content(&self, content_id: ContentId) {
        info!(content = %content_id, "[contents] select");
        self.current.set(Some(content_id));
    }

    fn content_kind(&self, _content_id: ContentId) -> ContentKind {
        ContentKind::Standard
    }
}

/// 同步产出纯色位图的预览来源
struct DemoPreviews;

impl PreviewSource for DemoPreviews {
    fn capture_live(&self, content_id: ContentId, callback: PreviewCallback) {
        info!(content = %content_id, "[preview] capture_live");
        callback(Some(Rc::new(RgbaImage::new(206, 457))));
    }

    fn capture_cached_fast(&self, content_id: ContentId, callback: PreviewCallback) {
        info!(content = %content_id, "[preview] capture_cached_fast");
        callback(Some(Rc::new(RgbaImage::new(103, 228))));
    }
}

/// 内容网格面板：在整页与第一个缩略图之间缩放
struct GridPane {
    id: DestinationId,
    background: Color,
    animators: Animators,
}

impl GridPane {
    fn thumbnail(container: Rect) -> Rect {
        let width = container.width / 2.0;
        Rect::new(
            PANE_HOST.x,
            PANE_HOST.y,
            width,
            width * container.height / container.width.max(1.0),
        )
        .inset(8.0)
    }
}

impl Destination for GridPane {
    fn id(&self) -> DestinationId {
        self.id
    }

    fn create_show_animator_provider(&self, container: Rect) -> Box<dyn AnimatorProvider> {
        let placement = PendingPlacementData::new(container, Self::thumbnail(container));
        self.animators.shrink_expand_pane(placement, self.background)
    }

    fn create_hide_animator_provider(&self, container: Rect) -> Box<dyn AnimatorProvider> {
        let placement = PendingPlacementData::new(Self::thumbnail(container), container);
        self.animators.shrink_expand_pane(placement, self.background)
    }
}

struct DemoDestinations {
    normal: Rc<GridPane>,
    private: Rc<GridPane>,
    focused: Cell<Option<DestinationId>>,
}

impl DestinationRegistry for DemoDestinations {
    fn focus(&self, destination: DestinationId) {
        info!(destination = ?destination, "[destinations] focus");
        self.focused.set(Some(destination));
    }

    fn focused_destination(&self) -> Option<Rc<dyn Destination>> {
        let pane: Rc<dyn Destination> = match self.focused.get()? {
            DestinationId::Normal => self.normal.clone(),
            DestinationId::Private => self.private.clone(),
        };
        Some(pane)
    }
}

struct DemoDisplay {
    wide: bool,
}

impl DisplayClass for DemoDisplay {
    fn is_wide_display_class(&self) -> bool {
        self.wide
    }
}

/// 推进调度器、主运行器和遮罩，直到没有工作或达到帧数上限
fn drive(
    scheduler: &QueueScheduler,
    controller: &mut TransitionController,
    scrim: &ScrimAnimator,
    frames: u32,
    dt: f32,
) {
    for frame in 0..frames {
        scheduler.run_layout_pass(controller);
        scheduler.run_next_turn(controller);

        let animating = controller.update(dt);
        let scrim_animating = scrim.update(dt);
        if !animating && !scrim_animating && scheduler.is_idle() {
            info!(frame, state = ?controller.state(), "过渡静止");
            return;
        }
    }
    warn!(frames, state = ?controller.state(), "达到帧数上限，强制结束动画");
    controller.force_animation_to_finish();
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => TransitionConfig::load(path),
        None => TransitionConfig::default(),
    };
    let dt = cli.frame_ms as f32 / 1000.0;

    let scrim = Rc::new(ScrimAnimator::new(config.scrim, 0.6));
    let host = Rc::new(DemoHost::new(scrim.clone()));
    let pane_animators = Animators::new(&config);
    let destinations = Rc::new(DemoDestinations {
        normal: Rc::new(GridPane {
            id: DestinationId::Normal,
            background: LIGHT_BACKGROUND,
            animators: pane_animators.clone(),
        }),
        private: Rc::new(GridPane {
            id: DestinationId::Private,
            background: DARK_BACKGROUND,
            animators: pane_animators,
        }),
        focused: Cell::new(None),
    });
    let scheduler = Rc::new(QueueScheduler::new());

    let mut controller = TransitionController::new(
        config,
        Collaborators {
            host: host.clone(),
            contents: host.clone(),
            previews: Rc::new(DemoPreviews),
            destinations,
            display: Rc::new(DemoDisplay { wide: cli.wide }),
            scheduler: scheduler.clone(),
            scrim: Some(scrim.clone()),
        },
    );

    info!(wide = cli.wide, instant = cli.instant, "显示覆盖层");
    controller.show(0, !cli.instant);

    if cli.interrupt {
        scheduler.run_layout_pass(&mut controller);
        controller.update(dt);
        info!(state = ?controller.state(), "显示途中隐藏");
    } else {
        drive(&scheduler, &mut controller, &scrim, cli.frames, dt);
        info!(state = ?controller.state(), "显示阶段结束");
    }

    if cli.new_tab && controller.state() == TransitionState::Shown {
        controller.on_content_created_in_foreground(ContentId(2), false);
    } else {
        controller.start_hiding(Some(ContentId(1)), false);
    }
    drive(&scheduler, &mut controller, &scrim, cli.frames, dt);

    info!(
        state = ?controller.state(),
        current = ?host.current_content_id(),
        suspended = ?host.suspended.borrow(),
        "追踪结束"
    );
}
