//! One user session: reference images, generation settings and run state.
//!
//! Each piece sits behind its own lock so the UI can edit images or settings
//! while a run is in flight. Locks are short-lived and never held across an
//! `.await`; the pipeline re-reads images and settings before every call.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use petpack_types::{
    Category, GeneratedResult, GenerationRequest, MarketSite, ReferenceImage, TemplateEntry,
};
use tokio::sync::watch;

use crate::catalog;
use crate::error::Result;
use crate::store::{self, ImageStore};

/// 用户可编辑的生成设置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSettings {
    pub market: MarketSite,
    pub category: Category,
    pub custom_instruction: String,
}

/// 运行状态。
#[derive(Debug, Clone, Default)]
pub struct RunState {
    pub is_running: bool,
    pub completed_count: usize,
    pub total_count: usize,
    pub results: Vec<GeneratedResult>,
}

impl RunState {
    /// 进度百分比：`round(100 * completed / total)`，total 为 0 时为 0。
    #[must_use]
    pub fn progress(&self) -> u8 {
        progress_percent(self.completed_count, self.total_count)
    }

    fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            is_running: self.is_running,
            completed_count: self.completed_count,
            total_count: self.total_count,
            progress: self.progress(),
            result_count: self.results.len(),
        }
    }
}

/// 推送给观察者的轻量状态。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSnapshot {
    pub is_running: bool,
    pub completed_count: usize,
    pub total_count: usize,
    pub progress: u8,
    pub result_count: usize,
}

pub(crate) fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    // round half up
    u8::try_from((200 * completed + total) / (2 * total)).unwrap_or(100)
}

pub struct Session {
    store: RwLock<ImageStore>,
    settings: RwLock<GenerationSettings>,
    run: Mutex<RunState>,
    updates: watch::Sender<RunSnapshot>,
    cancelled: AtomicBool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(GenerationSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: GenerationSettings) -> Self {
        let (updates, _) = watch::channel(RunSnapshot::default());
        Self {
            store: RwLock::new(ImageStore::new()),
            settings: RwLock::new(settings),
            run: Mutex::new(RunState::default()),
            updates,
            cancelled: AtomicBool::new(false),
        }
    }

    // ---- images ----

    pub fn add_image(&self, image: ReferenceImage) {
        self.store_mut().add(image);
    }

    /// 上传文件（仅接受图像类型）。
    ///
    /// # Errors
    /// 文件无法读取或不是图像时返回错误。
    pub async fn add_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let image = store::read_image_file(path.as_ref()).await?;
        self.add_image(image);
        Ok(())
    }

    /// 上传 `data:` URI（仅接受图像类型）。
    ///
    /// # Errors
    /// URI 无效或不是图像时返回错误。
    pub fn add_data_uri(&self, uri: &str) -> Result<()> {
        self.store_mut().add_data_uri(uri)
    }

    /// 越界时不做任何事。
    pub fn remove_image(&self, index: usize) -> Option<ReferenceImage> {
        self.store_mut().remove(index)
    }

    #[must_use]
    pub fn images(&self) -> Vec<ReferenceImage> {
        self.store_ref().list()
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.store_ref().len()
    }

    // ---- settings ----

    #[must_use]
    pub fn settings(&self) -> GenerationSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update_settings(&self, update: impl FnOnce(&mut GenerationSettings)) {
        let mut settings = self
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        update(&mut *settings);
    }

    pub fn set_market(&self, market: MarketSite) {
        self.update_settings(|settings| settings.market = market);
    }

    pub fn set_category(&self, category: Category) {
        self.update_settings(|settings| settings.category = category);
    }

    pub fn set_custom_instruction(&self, instruction: impl Into<String>) {
        let instruction = instruction.into();
        self.update_settings(|settings| settings.custom_instruction = instruction);
    }

    // ---- run state ----

    /// 订阅进度更新。
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RunSnapshot> {
        self.updates.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> RunSnapshot {
        self.run_state().snapshot()
    }

    #[must_use]
    pub fn results(&self) -> Vec<GeneratedResult> {
        self.run_state().results.clone()
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        self.run_state().progress()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run_state().is_running
    }

    /// 清空结果（运行中不生效）。
    pub fn clear_results(&self) -> bool {
        self.mutate_run(|run| {
            if run.is_running {
                return false;
            }
            run.results.clear();
            run.completed_count = 0;
            run.total_count = 0;
            true
        })
    }

    /// 请求取消；当前调用完成后不再发起新的请求。
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    // ---- pipeline hooks ----

    /// 按当前图像与设置构建请求。
    pub(crate) fn build_request(&self, entry: &TemplateEntry) -> GenerationRequest {
        let settings = self.settings();
        GenerationRequest {
            reference_images: self.images(),
            instruction: entry.instruction.to_string(),
            market: settings.market,
            custom_instruction: settings.custom_instruction,
        }
    }

    /// 开始新一轮运行：清空旧结果。已在运行时返回 false。
    pub(crate) fn begin_run(&self, total: usize) -> bool {
        self.mutate_run(|run| {
            if run.is_running {
                return false;
            }
            // cleared before the running snapshot is published
            self.cancelled.store(false, Ordering::SeqCst);
            *run = RunState {
                is_running: true,
                completed_count: 0,
                total_count: total,
                results: Vec::new(),
            };
            true
        })
    }

    /// 单条重新生成：只占用运行标记，不动计数。
    pub(crate) fn begin_single(&self) -> bool {
        self.mutate_run(|run| {
            if run.is_running {
                return false;
            }
            self.cancelled.store(false, Ordering::SeqCst);
            run.is_running = true;
            true
        })
    }

    pub(crate) fn push_result(&self, result: GeneratedResult) {
        self.mutate_run(|run| run.results.push(result));
    }

    /// 替换同类结果；没有则按模板目录顺序插入。
    pub(crate) fn replace_result(&self, result: GeneratedResult) {
        self.mutate_run(|run| {
            if let Some(existing) = run.results.iter_mut().find(|r| r.kind == result.kind) {
                *existing = result;
                return;
            }
            let rank = |kind| catalog::position(kind).unwrap_or(usize::MAX);
            let target = rank(result.kind);
            let index = run
                .results
                .iter()
                .position(|r| rank(r.kind) > target)
                .unwrap_or(run.results.len());
            run.results.insert(index, result);
        });
    }

    pub(crate) fn complete_entry(&self) {
        self.mutate_run(|run| {
            run.completed_count = (run.completed_count + 1).min(run.total_count);
        });
    }

    pub(crate) fn end_run(&self) {
        self.mutate_run(|run| run.is_running = false);
    }

    fn mutate_run<T>(&self, f: impl FnOnce(&mut RunState) -> T) -> T {
        let (value, snapshot) = {
            let mut run = self.run_state();
            let value = f(&mut *run);
            (value, run.snapshot())
        };
        self.updates.send_replace(snapshot);
        value
    }

    fn run_state(&self) -> MutexGuard<'_, RunState> {
        self.run.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn store_ref(&self) -> RwLockReadGuard<'_, ImageStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn store_mut(&self) -> RwLockWriteGuard<'_, ImageStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}
