//! 集成测试共用的内存宿主
//!
//! `FakeWorld` 同时扮演宿主、内容注册表、目的地注册表、显示类别和预览来源，
//! 并把每次外部可见的调用记录为一条事件字符串。

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use image::RgbaImage;
use switcher_transition::preview::PreviewCallback;
use switcher_transition::{
    AnimationKind, AnimationPlan, AnimatorProvider, Collaborators, Color, ContentId, ContentKind,
    ContentRegistry, Destination, DestinationId, DestinationRegistry, DisplayClass,
    HostController, PlanAnimation, PreviewImage, PreviewSource, QueueScheduler, Rect,
    ResumeReason, ScrimCompanion, SelectionMode, SuspendReason, TransitionConfig,
    TransitionContext, TransitionController,
};

pub const CONTAINER: Rect = Rect::new(0.0, 0.0, 400.0, 800.0);
pub const PANE_HOST: Rect = Rect::new(0.0, 100.0, 400.0, 700.0);
pub const NORMAL_BACKGROUND: Color = Color::rgb(255, 255, 255);
pub const PRIVATE_BACKGROUND: Color = Color::rgb(0, 0, 0);

/// 面板专属动画的帧数
pub const PANE_FRAMES: u32 = 2;

type EventLog = Rc<RefCell<Vec<String>>>;

/// 实时截图结果（8x16）
pub fn preview_image() -> PreviewImage {
    Rc::new(RgbaImage::new(8, 16))
}

/// 缓存快照结果（4x4），与实时截图区分
pub fn cached_image() -> PreviewImage {
    Rc::new(RgbaImage::new(4, 4))
}

pub struct FakeWorld {
    log: EventLog,
    /// 面板计划的预览消费者收到的结果
    plan_previews: EventLog,

    pub previous_context: Cell<TransitionContext>,
    pub next_context: Cell<TransitionContext>,
    pub wide: Cell<bool>,
    pub selection_mode: Cell<SelectionMode>,
    /// 为 false 时没有任何目的地可聚焦
    pub has_panes: Cell<bool>,
    pub focused: Cell<Option<DestinationId>>,

    pub current: Cell<Option<ContentId>>,
    pub suspended: RefCell<BTreeSet<ContentId>>,
    pub kinds: RefCell<HashMap<ContentId, ContentKind>>,

    pub live_preview: RefCell<Option<PreviewImage>>,
    pub cached_preview: RefCell<Option<PreviewImage>>,
    pub live_calls: Cell<usize>,
    pub cached_calls: Cell<usize>,
    /// 为 true 时预览回调先挂起，由 `release_previews` 送达
    pub hold_previews: Cell<bool>,
    held: RefCell<Vec<(PreviewCallback, Option<PreviewImage>)>>,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            plan_previews: Rc::new(RefCell::new(Vec::new())),
            previous_context: Cell::new(TransitionContext::Content),
            next_context: Cell::new(TransitionContext::Content),
            wide: Cell::new(false),
            selection_mode: Cell::new(SelectionMode::Normal),
            has_panes: Cell::new(true),
            focused: Cell::new(None),
            current: Cell::new(Some(ContentId(1))),
            suspended: RefCell::new(BTreeSet::new()),
            kinds: RefCell::new(HashMap::new()),
            live_preview: RefCell::new(Some(preview_image())),
            cached_preview: RefCell::new(Some(cached_image())),
            live_calls: Cell::new(0),
            cached_calls: Cell::new(0),
            hold_previews: Cell::new(false),
            held: RefCell::new(Vec::new()),
        }
    }

    fn record(&self, event: impl Into<String>) {
        self.log.borrow_mut().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn take_events(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// 面板计划收到的预览，例如 `show 8x16` / `hide none`
    pub fn plan_previews(&self) -> Vec<String> {
        self.plan_previews.borrow().clone()
    }

    /// 送达当前挂起的预览回调，返回送达数量
    ///
    /// 回调中新发起的截图请求留到下一次调用。
    pub fn release_previews(&self) -> usize {
        let held = std::mem::take(&mut *self.held.borrow_mut());
        let count = held.len();
        for (callback, image) in held {
            callback(image);
        }
        count
    }

    fn deliver(&self, callback: PreviewCallback, image: Option<PreviewImage>) {
        if self.hold_previews.get() {
            self.held.borrow_mut().push((callback, image));
        } else {
            callback(image);
        }
    }

    /// 某个事件出现的次数
    pub fn count(&self, event: &str) -> usize {
        self.log.borrow().iter().filter(|e| *e == event).count()
    }
}

impl HostController for FakeWorld {
    fn on_will_show(&self) {
        self.record("will_show");
    }

    fn on_will_hide(&self, next: Option<ContentId>, hint_at_next_selection: bool) {
        match next {
            Some(id) => self.record(format!("will_hide {id} hint={hint_at_next_selection}")),
            None => self.record(format!("will_hide none hint={hint_at_next_selection}")),
        }
    }

    fn on_did_hide(&self) {
        self.record("did_hide");
    }

    fn release_content(&self, content_id: ContentId) {
        self.record(format!("release {content_id}"));
        self.suspended.borrow_mut().insert(content_id);
    }

    fn attach_container(&self) {
        self.record("attach");
    }

    fn detach_container(&self) {
        self.record("detach");
    }

    fn container_bounds(&self) -> Rect {
        CONTAINER
    }

    fn pane_host_bounds(&self) -> Rect {
        PANE_HOST
    }

    fn background_color(&self, destination: DestinationId) -> Color {
        self.record(format!("background {destination:?}"));
        match destination {
            DestinationId::Normal => NORMAL_BACKGROUND,
            DestinationId::Private => PRIVATE_BACKGROUND,
        }
    }

    fn previous_context(&self) -> TransitionContext {
        self.previous_context.get()
    }

    fn next_context(&self) -> TransitionContext {
        self.next_context.get()
    }

    fn selection_mode(&self) -> SelectionMode {
        self.selection_mode.get()
    }
}

impl ContentRegistry for FakeWorld {
    fn current_content_id(&self) -> Option<ContentId> {
        self.current.get()
    }

    fn is_content_suspended(&self, content_id: ContentId) -> bool {
        self.suspended.borrow().contains(&content_id)
    }

    fn resume_content(&self, content_id: ContentId, reason: ResumeReason) {
        self.record(format!("resume {content_id} {reason:?}"));
        self.suspended.borrow_mut().remove(&content_id);
    }

    fn suspend_content(&self, content_id: ContentId, reason: SuspendReason) {
        self.record(format!("suspend {content_id} {reason:?}"));
        self.suspended.borrow_mut().insert(content_id);
    }

    fn select_content(&self, content_id: ContentId) {
        self.record(format!("select {content_id}"));
        self.current.set(Some(content_id));
    }

    fn content_kind(&self, content_id: ContentId) -> ContentKind {
        self.kinds
            .borrow()
            .get(&content_id)
            .copied()
            .unwrap_or_default()
    }
}

impl DestinationRegistry for FakeWorld {
    fn focus(&self, destination: DestinationId) {
        self.record(format!("focus {destination:?}"));
        if self.has_panes.get() {
            self.focused.set(Some(destination));
        }
    }

    fn focused_destination(&self) -> Option<Rc<dyn Destination>> {
        let id = self.focused.get()?;
        Some(Rc::new(FakePane {
            id,
            log: self.log.clone(),
            previews: self.plan_previews.clone(),
        }))
    }
}

impl DisplayClass for FakeWorld {
    fn is_wide_display_class(&self) -> bool {
        self.wide.get()
    }
}

impl PreviewSource for FakeWorld {
    fn capture_live(&self, content_id: ContentId, callback: PreviewCallback) {
        self.record(format!("live {content_id}"));
        self.live_calls.set(self.live_calls.get() + 1);
        let image = self.live_preview.borrow().clone();
        self.deliver(callback, image);
    }

    fn capture_cached_fast(&self, content_id: ContentId, callback: PreviewCallback) {
        self.record(format!("cached {content_id}"));
        self.cached_calls.set(self.cached_calls.get() + 1);
        let image = self.cached_preview.borrow().clone();
        self.deliver(callback, image);
    }
}

/// 目的地面板：专属动画固定推进 `PANE_FRAMES` 帧，并记录计划收到的预览
struct FakePane {
    id: DestinationId,
    log: EventLog,
    previews: EventLog,
}

impl Destination for FakePane {
    fn id(&self) -> DestinationId {
        self.id
    }

    fn create_show_animator_provider(&self, _container: Rect) -> Box<dyn AnimatorProvider> {
        Box::new(PaneProvider {
            label: "show",
            log: self.log.clone(),
            previews: self.previews.clone(),
        })
    }

    fn create_hide_animator_provider(&self, _container: Rect) -> Box<dyn AnimatorProvider> {
        Box::new(PaneProvider {
            label: "hide",
            log: self.log.clone(),
            previews: self.previews.clone(),
        })
    }
}

struct PaneProvider {
    label: &'static str,
    log: EventLog,
    previews: EventLog,
}

impl AnimatorProvider for PaneProvider {
    fn kind(&self) -> AnimationKind {
        AnimationKind::PaneSpecific
    }

    fn supply_plan(&mut self, _bounds: Rect) -> AnimationPlan {
        self.log.borrow_mut().push(format!("plan {}", self.label));

        let label = self.label;
        let previews = self.previews.clone();
        AnimationPlan::new(Box::new(FrameAnimation {
            remaining: PANE_FRAMES,
        }))
        .with_preview_consumer(Box::new(move |image: Option<PreviewImage>| {
            let entry = match image {
                Some(image) => format!("{label} {}x{}", image.width(), image.height()),
                None => format!("{label} none"),
            };
            previews.borrow_mut().push(entry);
        }))
    }
}

struct FrameAnimation {
    remaining: u32,
}

impl PlanAnimation for FrameAnimation {
    fn start(&mut self) {}

    fn update(&mut self, _dt: f32) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining > 0
    }

    fn finish_now(&mut self) {
        self.remaining = 0;
    }
}

/// 只统计强制结束次数的遮罩
#[derive(Default)]
pub struct FakeScrim {
    pub forced: Cell<usize>,
}

impl ScrimCompanion for FakeScrim {
    fn force_to_finish(&self) {
        self.forced.set(self.forced.get() + 1);
    }
}

/// 控制器与它的全部假协作者
pub struct Harness {
    pub world: Rc<FakeWorld>,
    pub scheduler: Rc<QueueScheduler>,
    pub scrim: Rc<FakeScrim>,
    pub controller: TransitionController,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_world(FakeWorld::new())
    }

    pub fn with_world(world: FakeWorld) -> Self {
        let world = Rc::new(world);
        let scheduler = Rc::new(QueueScheduler::new());
        let scrim = Rc::new(FakeScrim::default());

        let controller = TransitionController::new(
            TransitionConfig::default(),
            Collaborators {
                host: world.clone(),
                contents: world.clone(),
                previews: world.clone(),
                destinations: world.clone(),
                display: world.clone(),
                scheduler: scheduler.clone(),
                scrim: Some(scrim.clone()),
            },
        );

        Self {
            world,
            scheduler,
            scrim,
            controller,
        }
    }

    pub fn run_layout(&mut self) -> usize {
        self.scheduler.run_layout_pass(&mut self.controller)
    }

    pub fn run_turn(&mut self) -> usize {
        self.scheduler.run_next_turn(&mut self.controller)
    }

    /// 冲刷调度器并推进动画直到静止
    pub fn settle(&mut self) {
        for _ in 0..64 {
            self.run_layout();
            self.run_turn();
            let animating = self.controller.update(1.0);
            if !animating && self.scheduler.is_idle() {
                return;
            }
        }
        panic!("过渡没有在 64 帧内静止: {:?}", self.controller);
    }
}
