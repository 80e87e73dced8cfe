use std::any::Any;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::expiration_watcher::ExpirationWatcher;
use crate::{Config, Context, ContextError, ContextValue, DoneSignal, Epoch, ReinitContext};


// 期限は約 30 年先を上限とし、それでも Instant に加算できなければ加算できる長さまで縮める
const MAX_TIMEOUT: Duration = Duration::from_secs(86_400 * 365 * 30);

fn deadline_after(duration: Duration) -> Instant {
  let now = Instant::now();
  let mut timeout = duration.min(MAX_TIMEOUT);
  loop {
    if let Some(deadline) = now.checked_add(timeout) {
      return deadline;
    }
    timeout /= 2;
  }
}

pub(crate) struct TimerContextInner {
  pub(crate) state: RwLock<TimerContextState>,
  pub(crate) config: Config,
  runtime: Handle,
}

pub(crate) struct TimerContextState {
  pub(crate) deadline: Instant,
  pub(crate) epoch: Epoch,
  pub(crate) done: DoneSignal,
  pub(crate) err: Option<ContextError>,
  pub(crate) retarget: Arc<Notify>,
}

impl TimerContextInner {
  pub(crate) fn log_name(&self) -> &str {
    self.config.name.as_deref().unwrap_or("-")
  }
}

/// A consistent view of a `TimerContext` taken under one read lock.<br/>
/// 一度の読み取りロックで取得した `TimerContext` の一貫したビュー。
#[derive(Debug, Clone)]
pub struct TimerContextSnapshot {
  pub deadline: Instant,
  pub epoch: Epoch,
  pub done: DoneSignal,
  pub err: Option<ContextError>,
}

/// A deadline context that can be reinitialized in place.<br/>
/// その場で再初期化できる期限付きコンテキスト。
///
/// 構築時にエポック 0 のウォッチャーを起動する。`reinit` は、現在のエポックが
/// まだ期限切れでなければ期限だけを更新し、期限切れ後であれば新しいシグナルと
/// ウォッチャーで次のエポックを開始する。クローンは同じ状態を共有する。
///
/// ウォッチャーは構築時に決めたランタイムで起動するため、`reinit` は
/// ランタイム外のスレッドからも呼び出せる。ウォッチャーは自身のエポックが
/// 期限切れになるまで状態を保持するので、全てのハンドルを破棄しても
/// 取得済みのシグナルは期限でクローズされる。
///
/// # Panics
///
/// `Config::runtime` を指定せずに tokio ランタイムの外で構築するとパニックする
/// (`Handle::current` と同じ)。
#[derive(Clone)]
pub struct TimerContext {
  inner: Arc<TimerContextInner>,
}

impl TimerContext {
  pub fn new(duration: Duration) -> Self {
    Self::with_config(duration, Config::default())
  }

  pub fn with_config(duration: Duration, config: Config) -> Self {
    let epoch = Epoch::initial();
    let retarget = Arc::new(Notify::new());
    let runtime = config.runtime.clone().unwrap_or_else(Handle::current);
    let inner = Arc::new(TimerContextInner {
      state: RwLock::new(TimerContextState {
        deadline: deadline_after(duration),
        epoch,
        done: DoneSignal::new(),
        err: None,
        retarget: retarget.clone(),
      }),
      config,
      runtime,
    });
    let ctx = Self { inner };
    ctx.spawn_watcher(epoch, retarget);
    ctx
  }

  // 書き込みロック保持中に呼ばれても、ウォッチャーはロック解放後に状態を読む
  fn spawn_watcher(&self, epoch: Epoch, retarget: Arc<Notify>) {
    let watcher = ExpirationWatcher::new(epoch, self.inner.clone(), retarget);
    self.inner.runtime.spawn(watcher.run());
  }

  pub fn name(&self) -> Option<&str> {
    self.inner.config.name.as_deref()
  }

  pub fn epoch(&self) -> Epoch {
    self.inner.state.read().epoch
  }

  /// Returns the time left until the deadline, zero once it has passed.<br/>
  /// 期限までの残り時間を返します。期限を過ぎていればゼロ。
  pub fn remaining(&self) -> Duration {
    let deadline = self.inner.state.read().deadline;
    deadline.saturating_duration_since(Instant::now())
  }

  pub fn snapshot(&self) -> TimerContextSnapshot {
    let state = self.inner.state.read();
    TimerContextSnapshot {
      deadline: state.deadline,
      epoch: state.epoch,
      done: state.done.clone(),
      err: state.err,
    }
  }
}

impl Context for TimerContext {
  fn deadline(&self) -> Option<Instant> {
    Some(self.inner.state.read().deadline)
  }

  fn done(&self) -> DoneSignal {
    self.inner.state.read().done.clone()
  }

  fn err(&self) -> Option<ContextError> {
    self.inner.state.read().err
  }

  fn value(&self, _key: &dyn Any) -> Option<ContextValue> {
    None
  }
}

impl ReinitContext for TimerContext {
  fn reinit(&self, duration: Duration) {
    let mut state = self.inner.state.write();
    let deadline = deadline_after(duration);

    if state.err.is_none() {
      // 期限を早める場合だけウォッチャーを起こす。延長はウォッチャーが起床時に検出する
      if deadline < state.deadline {
        state.retarget.notify_one();
      }
      state.deadline = deadline;
      tracing::trace!(
        "TimerContext::reinit: name = {}, epoch = {}, extended",
        self.inner.log_name(),
        state.epoch
      );
      return;
    }

    let epoch = state.epoch.next();
    let retarget = Arc::new(Notify::new());
    self.spawn_watcher(epoch, retarget.clone());
    state.epoch = epoch;
    state.done = DoneSignal::new();
    state.err = None;
    state.retarget = retarget;
    state.deadline = deadline;
    tracing::debug!(
      "TimerContext::reinit: name = {}, epoch = {}, started new epoch",
      self.inner.log_name(),
      epoch
    );
  }
}

impl Debug for TimerContext {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let state = self.inner.state.read();
    f.debug_struct("TimerContext")
      .field("name", &self.inner.config.name)
      .field("deadline", &state.deadline)
      .field("epoch", &state.epoch)
      .field("err", &state.err)
      .finish()
  }
}
